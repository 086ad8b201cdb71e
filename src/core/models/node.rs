//! Node records read from the relationship sheet

use std::fmt;

/// Identifier of a node as written in the sheet
///
/// Integral numbers (including floats such as `3.0`) become [`NodeId::Int`] so
/// that `3` and `3.0` name the same node; everything else is kept as text.
/// The derived order puts every `Int` before every `Text` and is used as the
/// canonical ordering of undirected endpoint pairs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// Whole-number identifier
    Int(i64),
    /// Any other identifier
    Text(String),
}

impl NodeId {
    /// Parse a normalized cell value into an identifier
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        match trimmed.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation)]
            Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 => {
                Self::Int(value as i64)
            }
            _ => Self::Text(trimmed.to_string()),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Display color of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeColor {
    /// Drawn as a red marker
    Red,
    /// Drawn as a blue marker
    Blue,
    /// Any other value; such nodes are never drawn as markers
    Other(String),
}

impl NodeColor {
    /// Parse a color cell. Only the exact values `red` and `blue` are recognized.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "red" => Self::Red,
            "blue" => Self::Blue,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether nodes of this color get a marker in the drawing
    #[must_use]
    pub const fn is_drawn(&self) -> bool {
        matches!(self, Self::Red | Self::Blue)
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One data row of the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Marker color
    pub color: NodeColor,
    /// Identifier referenced by relation cells
    pub id: NodeId,
    /// Label text
    pub text: String,
}

impl Node {
    /// Create a new node
    #[must_use]
    pub const fn new(color: NodeColor, id: NodeId, text: String) -> Self {
        Self { color, id, text }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.color, self.text)
    }
}
