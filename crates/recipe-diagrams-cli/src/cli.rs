//! Command-line interface for the recipe-diagrams utility
//!
//! Lists the available diagrams, prints their DOT source and renders them
//! through Graphviz.

use anyhow::{anyhow, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use recipe_diagrams::core::logging::{init_logging, LogFormat};
use recipe_diagrams::{
    dot_source, render, render_all, DiagramKind, OutputFormat, RenderConfig, ENGINE_ENV_VAR,
};

/// Recipe Diagrams - render the recipe-sharing app's design diagrams
#[derive(Parser)]
#[command(name = "recipe-diagrams")]
#[command(about = "Render the recipe-sharing application's DFD, ER and flowchart diagrams with Graphviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, global = true, value_parser = log_format_parser())]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the diagrams that can be built
    List {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the DOT source of one diagram
    Dot {
        /// Diagram name or file stem, e.g. dfd-context
        #[arg(value_parser = parse_diagram)]
        diagram: DiagramKind,

        /// Output file for the DOT source (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render diagrams through Graphviz
    Render {
        /// Render only this diagram (default: all)
        #[arg(short, long, value_parser = parse_diagram)]
        diagram: Option<DiagramKind>,

        /// Directory receiving the rendered files
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Output format (dot writes DOT source without Graphviz)
        #[arg(short, long, default_value_t = OutputFormat::Png, value_parser = output_format_parser())]
        format: OutputFormat,

        /// Graphviz binary to run
        #[arg(long, env = ENGINE_ENV_VAR)]
        engine: Option<PathBuf>,

        /// Render one diagram at a time
        #[arg(long)]
        sequential: bool,
    },
}

fn output_format_parser() -> impl TypedValueParser<Value = OutputFormat> {
    PossibleValuesParser::new(OutputFormat::variants().iter().copied())
        .try_map(|value| value.parse::<OutputFormat>())
}

fn log_format_parser() -> impl TypedValueParser<Value = LogFormat> {
    PossibleValuesParser::new(LogFormat::variants().iter().copied())
        .try_map(|value| value.parse::<LogFormat>())
}

fn parse_diagram(value: &str) -> std::result::Result<DiagramKind, String> {
    value.parse::<DiagramKind>().map_err(|_| {
        let names: Vec<_> = DiagramKind::all().iter().map(|k| k.name()).collect();
        format!("unknown diagram '{}' (expected one of: {})", value, names.join(", "))
    })
}

/// One entry of `list --json`
#[derive(Debug, Serialize)]
pub struct DiagramInfo {
    pub name: &'static str,
    pub file_stem: String,
    pub description: &'static str,
}

impl From<DiagramKind> for DiagramInfo {
    fn from(kind: DiagramKind) -> Self {
        let diagram = kind.diagram();
        Self {
            name: diagram.name(),
            file_stem: diagram.file_stem(),
            description: diagram.description(),
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct DiagramsApp;

impl DiagramsApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Flags win; init_logging falls back to the environment otherwise
        let log_format = cli.log_format.map(|f| f.to_string());
        if let Err(e) = init_logging(cli.log_level.map(|l| l.as_str()), log_format.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("recipe-diagrams v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::List { json } => self.list_command(json, cli.verbose),
            Commands::Dot { diagram, output } => self.dot_command(diagram, output, cli.verbose),
            Commands::Render {
                diagram,
                out_dir,
                format,
                engine,
                sequential,
            } => {
                let mut config = RenderConfig::new(out_dir, format).with_parallel(!sequential);
                if let Some(engine) = engine {
                    config = config.with_engine(engine);
                }
                self.render_command(diagram, &config, cli.verbose)
            }
        }
    }

    /// Handle the list command
    fn list_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing available diagrams");
        }
        if json {
            println!("{}", self.list_json()?);
        } else {
            println!("Available diagrams:");
            for kind in DiagramKind::all() {
                let diagram = kind.diagram();
                println!("  {:<24} - {}", diagram.name(), diagram.description());
            }
            println!();
            println!("Total: {} diagrams", DiagramKind::all().len());
        }
        Ok(())
    }

    /// The diagram list as pretty-printed JSON
    pub fn list_json(&self) -> Result<String> {
        let diagrams: Vec<DiagramInfo> = DiagramKind::all().into_iter().map(Into::into).collect();
        let listing = serde_json::json!({
            "diagrams": diagrams,
            "total": diagrams.len(),
        });
        Ok(serde_json::to_string_pretty(&listing)?)
    }

    /// Handle the dot command
    fn dot_command(&self, kind: DiagramKind, output: Option<PathBuf>, verbose: bool) -> Result<()> {
        let source = dot_source(kind)?;
        if verbose {
            eprintln!("Built {} ({} bytes of DOT)", kind, source.len());
        }
        debug!(diagram = %kind, bytes = source.len(), "DOT source ready");
        self.write_output(output, &source)
    }

    /// Handle the render command
    fn render_command(
        &self,
        diagram: Option<DiagramKind>,
        config: &RenderConfig,
        verbose: bool,
    ) -> Result<()> {
        if verbose {
            eprintln!(
                "Rendering {} to {} as {}",
                diagram.map_or("all diagrams".to_string(), |k| k.to_string()),
                config.output_dir().display(),
                config.format
            );
        }

        let results = match diagram {
            Some(kind) => vec![(kind, render(kind, config))],
            None => render_all(config),
        };

        let total = results.len();
        let mut failed = 0;
        for (kind, result) in results {
            match result {
                Ok(path) => println!("{}", path.display()),
                Err(e) => {
                    failed += 1;
                    eprintln!("Failed to render {}: {}", kind, e);
                }
            }
        }
        info!(total, failed, "Render command finished");

        if failed > 0 {
            return Err(anyhow!("{} of {} diagrams failed to render", failed, total));
        }
        Ok(())
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })
            }
            _ => {
                print!("{}", content);
                io::stdout().flush()?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_render_defaults() {
        let cli = Cli::try_parse_from(["recipe-diagrams", "render"]).unwrap();
        match cli.command {
            Commands::Render {
                diagram,
                out_dir,
                format,
                sequential,
                ..
            } => {
                assert!(diagram.is_none());
                assert_eq!(out_dir, PathBuf::from("out"));
                assert_eq!(format, OutputFormat::Png);
                assert!(!sequential);
            }
            _ => panic!("Expected render command"),
        }
        assert!(cli.log_level.is_none());
        assert!(cli.log_format.is_none());
    }

    #[test]
    fn test_cli_parsing_render_options() {
        let cli = Cli::try_parse_from([
            "recipe-diagrams",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "render",
            "--diagram",
            "er-logical-dashboard",
            "--out-dir",
            "docs",
            "--format",
            "svg",
            "--engine",
            "/opt/graphviz/bin/dot",
            "--sequential",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        match cli.command {
            Commands::Render {
                diagram,
                format,
                engine,
                sequential,
                ..
            } => {
                assert_eq!(diagram, Some(DiagramKind::ErLogicalDashboard));
                assert_eq!(format, OutputFormat::Svg);
                assert_eq!(engine, Some(PathBuf::from("/opt/graphviz/bin/dot")));
                assert!(sequential);
            }
            _ => panic!("Expected render command"),
        }
    }

    #[test]
    fn test_cli_parsing_dot_command() {
        let cli = Cli::try_parse_from(["recipe-diagrams", "dot", "data_flow_level2", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Dot { diagram, output } => {
                assert_eq!(diagram, DiagramKind::DfdLevel2);
                assert!(output.is_none());
            }
            _ => panic!("Expected dot command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_diagram() {
        let err = Cli::try_parse_from(["recipe-diagrams", "dot", "gantt"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown diagram 'gantt'"));
    }

    #[test]
    fn test_format_values_come_from_output_format() {
        for name in OutputFormat::variants() {
            let cli = Cli::try_parse_from(["recipe-diagrams", "render", "--format", *name]).unwrap();
            match cli.command {
                Commands::Render { format, .. } => assert_eq!(format.to_string(), *name),
                _ => panic!("Expected render command"),
            }
        }

        let err = Cli::try_parse_from(["recipe-diagrams", "render", "--format", "bmp"])
            .err()
            .unwrap();
        let message = err.to_string();
        assert!(message.contains("bmp"));
        assert!(message.contains("png"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = Cli::try_parse_from(["recipe-diagrams", "--log-format", "xml", "list"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_list_json() {
        let json = DiagramsApp::new().list_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 8);
        assert_eq!(value["diagrams"][0]["name"], "dfd-context");
        assert_eq!(value["diagrams"][0]["file_stem"], "data_flow_context");
    }

    #[test]
    fn test_dot_command_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dfd").join("context.dot");
        DiagramsApp::new()
            .dot_command(DiagramKind::DfdContext, Some(path.clone()), false)
            .unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("digraph \"DataFlow_Context\""));
    }

    #[test]
    fn test_render_command_dot_format() {
        let dir = tempdir().unwrap();
        let config = RenderConfig::new(dir.path(), OutputFormat::Dot);
        DiagramsApp::new()
            .render_command(Some(DiagramKind::Flowchart), &config, false)
            .unwrap();
        assert!(dir.path().join("application_flowchart.dot").exists());
    }

    #[test]
    fn test_render_command_reports_failures() {
        let dir = tempdir().unwrap();
        let config = RenderConfig::new(dir.path(), OutputFormat::Png)
            .with_engine("/nonexistent/dot")
            .with_parallel(false);
        let err = DiagramsApp::new()
            .render_command(None, &config, false)
            .unwrap_err();
        assert!(err.to_string().contains("8 of 8 diagrams failed"));
    }
}
