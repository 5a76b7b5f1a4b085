//! Core abstractions for graph descriptions
//!
//! This module defines the graph description model, the label-placement
//! adapter, DOT serialization and the renderer boundary shared by every
//! diagram.

mod config;
mod database;
mod description;
mod diagram;
pub mod dot;
mod error;
mod label;
pub mod logging;
mod renderer;
mod types;

pub use config::*;
pub use database::*;
pub use description::*;
pub use diagram::*;
pub use error::*;
pub use label::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
