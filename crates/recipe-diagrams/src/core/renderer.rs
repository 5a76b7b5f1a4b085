//! Renderer boundary
//!
//! A [`Renderer`] consumes a finalized [`RenderableGraph`]. [`DotRenderer`]
//! stops at DOT source text; [`GraphvizRenderer`] hands that text to the
//! Graphviz engine and writes the resulting artifact to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, span, warn, Level};

use super::dot::to_dot;
use super::{DiagramError, DiagramResult, OutputFormat, RenderConfig, RenderableGraph};

/// Core trait for graph renderers
pub trait Renderer: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render a finalized graph
    fn render(&self, graph: &RenderableGraph) -> DiagramResult<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the produced output format
    fn format(&self) -> &'static str;
}

/// Renders graphs to DOT source text
#[derive(Debug, Default, Clone, Copy)]
pub struct DotRenderer;

impl DotRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DotRenderer {
    type Output = String;

    fn render(&self, graph: &RenderableGraph) -> DiagramResult<String> {
        Ok(to_dot(graph))
    }

    fn name(&self) -> &'static str {
        "dot-source"
    }

    fn format(&self) -> &'static str {
        "dot"
    }
}

/// Renders graphs to files through the Graphviz engine
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    config: RenderConfig,
}

impl GraphvizRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Render a graph to `<output_dir>/<file_stem>.<ext>`
    pub fn render_named(&self, graph: &RenderableGraph, file_stem: &str) -> DiagramResult<PathBuf> {
        let path = self.config.output_path(file_stem);
        self.render_to(graph, &path)?;
        Ok(path)
    }

    /// Render a graph to an explicit path
    ///
    /// Missing parent directories are created. The engine is not invoked
    /// for [`OutputFormat::Dot`].
    pub fn render_to(&self, graph: &RenderableGraph, path: &Path) -> DiagramResult<()> {
        let render_span = span!(
            Level::INFO,
            "render_graph",
            graph = %graph.name(),
            format = %self.config.format
        );
        let _enter = render_span.enter();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let source = to_dot(graph);
        if self.config.format == OutputFormat::Dot {
            fs::write(path, source)?;
            info!(path = %path.display(), "Wrote DOT source");
            return Ok(());
        }

        self.run_engine(&source, path)?;
        info!(path = %path.display(), "Rendered diagram");
        Ok(())
    }

    fn run_engine(&self, source: &str, path: &Path) -> DiagramResult<()> {
        let engine = &self.config.engine;
        debug!(engine = %engine.display(), "Spawning Graphviz");
        let mut child = Command::new(engine)
            .arg(format!("-T{}", self.config.format.extension()))
            .arg("-o")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                DiagramError::render_engine(format!(
                    "failed to start {}: {}",
                    engine.display(),
                    e
                ))
            })?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| DiagramError::render_engine("engine stdin is not available"))?;
            stdin.write_all(source.as_bytes()).map_err(|e| {
                DiagramError::render_engine(format!("failed to write DOT to engine: {}", e))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            DiagramError::render_engine(format!("failed to wait for engine: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "Graphviz failed");
            return Err(DiagramError::render_engine(format!(
                "{} exited with {}: {}",
                engine.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Renderer for GraphvizRenderer {
    type Output = PathBuf;

    /// Render to the output directory, naming the file after the graph's file stem
    fn render(&self, graph: &RenderableGraph) -> DiagramResult<PathBuf> {
        self.render_named(graph, graph.file_stem())
    }

    fn name(&self) -> &'static str {
        "graphviz"
    }

    fn format(&self) -> &'static str {
        self.config.format.extension()
    }
}
