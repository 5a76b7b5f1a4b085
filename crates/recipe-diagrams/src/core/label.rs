//! Label-placement adapter
//!
//! Graphviz draws inline (`label`) edge labels detached from their edges when
//! `splines=ortho`, while offset (`xlabel`) labels stay attached. Every edge
//! label request goes through [`place`], so assemblers always ask for a plain
//! label and never need to know which routing mode is active.

use std::fmt;

use super::RoutingMode;

/// Which edge attribute carries the label text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAttribute {
    /// Inline label drawn on the edge (`label`)
    Inline,
    /// Offset label placed next to the edge (`xlabel`)
    Offset,
}

impl LabelAttribute {
    /// Graphviz attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelAttribute::Inline => "label",
            LabelAttribute::Offset => "xlabel",
        }
    }
}

impl fmt::Display for LabelAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label requested for an edge as it is added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRequest<'a> {
    pub text: &'a str,
    /// `false` when the caller explicitly asked for an offset label
    pub is_primary: bool,
}

impl<'a> LabelRequest<'a> {
    pub fn primary(text: &'a str) -> Self {
        Self {
            text,
            is_primary: true,
        }
    }

    pub fn secondary(text: &'a str) -> Self {
        Self {
            text,
            is_primary: false,
        }
    }
}

/// The resolved attribute/value pair written for an edge label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPlacementDirective {
    pub attribute: LabelAttribute,
    pub value: String,
}

impl LabelPlacementDirective {
    pub fn is_offset(&self) -> bool {
        self.attribute == LabelAttribute::Offset
    }
}

/// Decide how a requested label is attached under a routing mode
///
/// Orthogonal routing always gets an offset label. Curved and polyline
/// routing keep primary labels inline. Secondary requests are offset in
/// every mode.
pub fn place(routing: RoutingMode, request: &LabelRequest<'_>) -> LabelPlacementDirective {
    let attribute = match (routing, request.is_primary) {
        (_, false) => LabelAttribute::Offset,
        (RoutingMode::Orthogonal, true) => LabelAttribute::Offset,
        (RoutingMode::Curved | RoutingMode::Polyline, true) => LabelAttribute::Inline,
    };

    LabelPlacementDirective {
        attribute,
        value: request.text.to_string(),
    }
}
