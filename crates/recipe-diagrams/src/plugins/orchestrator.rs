//! Orchestrator coordinating the build → render pipeline
//!
//! Every diagram is registered as a [`DiagramKind`]. The orchestrator builds
//! one or all of them and hands the finalized graphs to the Graphviz
//! renderer. Diagrams share nothing, so `render_all` can run each one on its
//! own thread.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::thread;

use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    Diagram, DiagramError, DiagramResult, GraphvizRenderer, RenderConfig, RenderableGraph,
    Renderer,
};
use crate::plugins::dfd::{ContextDfd, Level1Dfd, Level2Dfd};
use crate::plugins::er::{ConceptualEr, LogicalEr, SchemaVersion};
use crate::plugins::flowchart::ApplicationFlowchart;

/// Every diagram this crate can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    DfdContext,
    DfdLevel1,
    DfdLevel2,
    ErConceptual,
    ErConceptualDashboard,
    ErLogical,
    ErLogicalDashboard,
    Flowchart,
}

impl DiagramKind {
    /// All kinds, in the order they are listed and rendered
    pub fn all() -> [DiagramKind; 8] {
        [
            DiagramKind::DfdContext,
            DiagramKind::DfdLevel1,
            DiagramKind::DfdLevel2,
            DiagramKind::ErConceptual,
            DiagramKind::ErConceptualDashboard,
            DiagramKind::ErLogical,
            DiagramKind::ErLogicalDashboard,
            DiagramKind::Flowchart,
        ]
    }

    pub fn name(&self) -> &'static str {
        self.diagram().name()
    }

    /// The assembler for this kind
    pub fn diagram(&self) -> Box<dyn Diagram> {
        match self {
            DiagramKind::DfdContext => Box::new(ContextDfd::new()),
            DiagramKind::DfdLevel1 => Box::new(Level1Dfd::new()),
            DiagramKind::DfdLevel2 => Box::new(Level2Dfd::new()),
            DiagramKind::ErConceptual => Box::new(ConceptualEr::new(SchemaVersion::ActivityLog)),
            DiagramKind::ErConceptualDashboard => {
                Box::new(ConceptualEr::new(SchemaVersion::StatsDashboard))
            }
            DiagramKind::ErLogical => Box::new(LogicalEr::new(SchemaVersion::ActivityLog)),
            DiagramKind::ErLogicalDashboard => {
                Box::new(LogicalEr::new(SchemaVersion::StatsDashboard))
            }
            DiagramKind::Flowchart => Box::new(ApplicationFlowchart::new()),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagramKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DiagramKind::all()
            .into_iter()
            .find(|kind| {
                let diagram = kind.diagram();
                diagram.name() == wanted || diagram.file_stem() == wanted
            })
            .ok_or(DiagramError::UnknownDiagram {
                name: s.to_string(),
            })
    }
}

/// Build and finalize one diagram
pub fn build(kind: DiagramKind) -> DiagramResult<RenderableGraph> {
    trace!(diagram = %kind, "Building diagram");
    kind.diagram().build()
}

/// Build one diagram and render it into the configured output directory
pub fn render(kind: DiagramKind, config: &RenderConfig) -> DiagramResult<PathBuf> {
    let render_span = span!(Level::INFO, "render_diagram", diagram = %kind);
    let _enter = render_span.enter();

    let diagram = kind.diagram();
    let graph = diagram.build()?;
    let path = GraphvizRenderer::new(config).render(&graph)?;
    info!(diagram = %kind, path = %path.display(), "Diagram rendered");
    Ok(path)
}

/// Render every diagram, one result per kind in [`DiagramKind::all`] order
///
/// A failure in one diagram never stops the others.
pub fn render_all(config: &RenderConfig) -> Vec<(DiagramKind, DiagramResult<PathBuf>)> {
    let render_span = span!(
        Level::INFO,
        "render_all",
        output_dir = %config.output_dir.display(),
        format = %config.format,
        parallel = config.parallel
    );
    let _enter = render_span.enter();

    let results: Vec<(DiagramKind, DiagramResult<PathBuf>)> = if config.parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = DiagramKind::all()
                .into_iter()
                .map(|kind| (kind, scope.spawn(move || render(kind, config))))
                .collect();
            handles
                .into_iter()
                .map(|(kind, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(DiagramError::render_engine(format!(
                            "rendering {} panicked",
                            kind
                        )))
                    });
                    (kind, result)
                })
                .collect()
        })
    } else {
        DiagramKind::all()
            .into_iter()
            .map(|kind| (kind, render(kind, config)))
            .collect()
    };

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();
    for (kind, result) in &results {
        if let Err(error) = result {
            warn!(diagram = %kind, %error, "Diagram failed to render");
        }
    }
    debug!(
        rendered = results.len() - failures,
        failed = failures,
        "Finished rendering diagrams"
    );
    results
}
