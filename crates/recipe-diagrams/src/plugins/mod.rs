//! Diagram assemblers for the recipe-sharing application
//!
//! Each plugin builds one family of views over the same domain: data-flow
//! diagrams, entity-relationship diagrams and the application flowchart.
//! Node IDs for shared concepts live in [`domain`].

pub mod dfd;
pub mod domain;
pub mod er;
pub mod flowchart;
pub mod orchestrator;

pub use dfd::*;
pub use er::*;
pub use flowchart::*;
pub use orchestrator::*;
