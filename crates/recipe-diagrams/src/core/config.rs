//! Rendering configuration
//!
//! Controls where rendered diagrams go, which encoding they use and which
//! Graphviz binary produces them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding the Graphviz engine binary
pub const ENGINE_ENV_VAR: &str = "RECIPE_DIAGRAMS_DOT";

/// Output encoding of a rendered diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// Raw DOT source; written without invoking the engine
    Dot,
}

impl OutputFormat {
    /// File extension, also the value passed to `dot -T`
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }

    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["png", "svg", "pdf", "dot"]
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Settings for rendering diagrams to files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory receiving one file per diagram
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Graphviz engine binary
    pub engine: PathBuf,
    /// Build and render diagrams on separate threads
    pub parallel: bool,
}

impl RenderConfig {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            ..Self::default()
        }
    }

    pub fn with_engine(mut self, engine: impl Into<PathBuf>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Path of the artifact for a diagram file stem
    pub fn output_path(&self, file_stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", file_stem, self.format.extension()))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let engine = std::env::var_os(ENGINE_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dot"));
        Self {
            output_dir: PathBuf::from("out"),
            format: OutputFormat::default(),
            engine,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_str("SVG").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_str("pdf").unwrap(), OutputFormat::Pdf);
        assert_eq!(OutputFormat::from_str("gv").unwrap(), OutputFormat::Dot);
        assert!(OutputFormat::from_str("bmp").is_err());
    }

    #[test]
    fn test_output_format_variants() {
        let variants = OutputFormat::variants();
        assert!(variants.contains(&"png"));
        assert!(variants.contains(&"dot"));
        assert_eq!(OutputFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_output_path() {
        let config = RenderConfig::new("build/diagrams", OutputFormat::Svg);
        assert_eq!(
            config.output_path("er_recipe_logical"),
            PathBuf::from("build/diagrams/er_recipe_logical.svg")
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = RenderConfig::new("out", OutputFormat::Dot)
            .with_engine("/usr/local/bin/dot")
            .with_parallel(false);
        assert_eq!(config.engine, PathBuf::from("/usr/local/bin/dot"));
        assert!(!config.parallel);
        assert_eq!(config.output_dir(), Path::new("out"));
    }
}
