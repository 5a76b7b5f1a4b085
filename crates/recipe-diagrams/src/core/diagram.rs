//! Core diagram trait
//!
//! Every documentation view of the recipe-sharing application implements
//! [`Diagram`]. Assemblers take no runtime input: the modeled domain is fixed,
//! so `build` is deterministic and can be called any number of times.

use super::{DiagramResult, RenderableGraph};

/// One documentation view that assembles a finalized graph
pub trait Diagram: Send + Sync {
    /// Stable identifier, e.g. `dfd-context`
    fn name(&self) -> &'static str;

    /// File name (without extension) the rendered artifact is written to
    fn file_stem(&self) -> String;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Assemble and finalize the graph description
    fn build(&self) -> DiagramResult<RenderableGraph>;
}
