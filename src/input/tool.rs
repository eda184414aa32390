//! Placement tool selection.

use crate::draw::IconKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Annotation kind that the next click/tap on empty canvas will place.
///
/// Armed from the toolbar; stays armed until another tool is chosen or the
/// host disarms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Place an icon marker of the given kind
    Icon(IconKind),
    /// Ask the host for text, then place a label
    Text,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Icon(kind) => kind.as_str(),
            Tool::Text => "text",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tool {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("text") {
            return Ok(Tool::Text);
        }
        s.parse::<IconKind>()
            .map(Tool::Icon)
            .map_err(|_| format!("unknown tool '{s}'"))
    }
}
