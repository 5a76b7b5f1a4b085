//! Core error types for graph construction and rendering
//!
//! The model itself can only fail with [`DiagramError::InvalidGraph`]; every
//! other variant comes from the rendering boundary.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Invalid graph: {message}")]
    InvalidGraph { message: String },

    #[error("Render engine error: {message}")]
    RenderEngine { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown diagram: {name}")]
    UnknownDiagram { name: String },
}

impl DiagramError {
    /// Create a new invalid graph error
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::InvalidGraph {
            message: message.into(),
        }
    }

    /// Create a new render engine error
    pub fn render_engine(message: impl Into<String>) -> Self {
        Self::RenderEngine {
            message: message.into(),
        }
    }

    /// True for errors raised by the model rather than the renderer
    pub fn is_invalid_graph(&self) -> bool {
        matches!(self, Self::InvalidGraph { .. })
    }
}

/// Result alias used across the library
pub type DiagramResult<T> = Result<T, DiagramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_graph() {
        let error = DiagramError::invalid_graph("edge A -> B has two labels");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid graph"));
        assert!(error_msg.contains("A -> B"));
        assert!(error.is_invalid_graph());
    }

    #[test]
    fn test_render_engine() {
        let error = DiagramError::render_engine("dot exited with status 1");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Render engine error"));
        assert!(error_msg.contains("status 1"));
        assert!(!error.is_invalid_graph());
    }

    #[test]
    fn test_unknown_diagram() {
        let error = DiagramError::UnknownDiagram {
            name: "gantt".to_string(),
        };
        assert!(error.to_string().contains("gantt"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("read-only"));
    }
}
