//! Tests for core error types

use std::io;

use recipe_diagrams::core::{DiagramError, DiagramResult};
use recipe_diagrams::DiagramKind;

#[test]
fn test_invalid_graph_message() {
    let error = DiagramError::invalid_graph("edge #3 A -> B requests conflicting label placements");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid graph"));
    assert!(error_msg.contains("edge #3"));
}

#[test]
fn test_render_engine_message() {
    let error = DiagramError::render_engine("dot exited with exit status: 1");
    assert!(error.to_string().contains("Render engine error"));
    assert!(!error.is_invalid_graph());
}

#[test]
fn test_io_error_conversion() {
    fn write_fails() -> DiagramResult<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))?;
        Ok(())
    }

    let error = write_fails().unwrap_err();
    assert!(matches!(error, DiagramError::Io { .. }));
    assert!(error.to_string().contains("read-only"));
}

#[test]
fn test_unknown_diagram_from_parse() {
    let error = "sequence".parse::<DiagramKind>().unwrap_err();
    assert_eq!(error.to_string(), "Unknown diagram: sequence");
}

#[test]
fn test_errors_work_with_anyhow() {
    fn run() -> anyhow::Result<()> {
        Err(DiagramError::invalid_graph("bad"))?;
        Ok(())
    }
    let error = run().unwrap_err();
    assert!(error.downcast_ref::<DiagramError>().is_some());
}
