//! Host-invoked editor commands.

use super::tool::Tool;
use std::fmt;
use std::str::FromStr;

/// Commands the host UI (toolbar, keyboard shortcuts, scripts) can invoke.
///
/// Selection commands are no-ops when nothing is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Arm a placement tool for the next click
    ArmTool(Tool),
    /// Clear the armed placement tool
    DisarmTool,
    /// Remove the selected annotation
    DeleteSelection,
    /// Rotate the selected icon by one 45° step
    RotateSelection,
    /// Grow the selection by the configured step
    GrowSelection,
    /// Shrink the selection by the configured step
    ShrinkSelection,
    /// Replace the selected label's text
    SetText(String),
    /// Cover-fit the base image again
    ResetView,
    NudgeLeft,
    NudgeRight,
    NudgeUp,
    NudgeDown,
    /// Zoom in around the canvas centre
    ZoomIn,
    /// Zoom out around the canvas centre
    ZoomOut,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ArmTool(tool) => write!(f, "arm:{tool}"),
            Action::DisarmTool => f.write_str("disarm"),
            Action::DeleteSelection => f.write_str("delete"),
            Action::RotateSelection => f.write_str("rotate"),
            Action::GrowSelection => f.write_str("grow"),
            Action::ShrinkSelection => f.write_str("shrink"),
            Action::SetText(text) => write!(f, "set-text:{text}"),
            Action::ResetView => f.write_str("reset-view"),
            Action::NudgeLeft => f.write_str("nudge-left"),
            Action::NudgeRight => f.write_str("nudge-right"),
            Action::NudgeUp => f.write_str("nudge-up"),
            Action::NudgeDown => f.write_str("nudge-down"),
            Action::ZoomIn => f.write_str("zoom-in"),
            Action::ZoomOut => f.write_str("zoom-out"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parses `name` or `name:argument` (e.g. `arm:crash`, `set-text:Wet floor`).
    ///
    /// Names are case-insensitive and accept `-` or `_` as separators. The
    /// argument of `set-text` is taken verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, argument) = match s.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s, None),
        };
        let name = name.trim().to_lowercase().replace('_', "-");

        let action = match (name.as_str(), argument) {
            ("arm", Some(tool)) => Action::ArmTool(tool.trim().parse()?),
            ("disarm", None) => Action::DisarmTool,
            ("delete", None) => Action::DeleteSelection,
            ("rotate", None) => Action::RotateSelection,
            ("grow", None) => Action::GrowSelection,
            ("shrink", None) => Action::ShrinkSelection,
            ("set-text", Some(text)) => Action::SetText(text.to_string()),
            ("reset-view", None) => Action::ResetView,
            ("nudge-left", None) => Action::NudgeLeft,
            ("nudge-right", None) => Action::NudgeRight,
            ("nudge-up", None) => Action::NudgeUp,
            ("nudge-down", None) => Action::NudgeDown,
            ("zoom-in", None) => Action::ZoomIn,
            ("zoom-out", None) => Action::ZoomOut,
            ("arm", None) => return Err("'arm' needs a tool, e.g. arm:crash".to_string()),
            ("set-text", None) => {
                return Err("'set-text' needs content, e.g. set-text:Wet floor".to_string());
            }
            (_, Some(_)) if is_known(&name) => {
                return Err(format!("action '{name}' takes no argument"));
            }
            _ => return Err(format!("unknown action '{s}'")),
        };
        Ok(action)
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "disarm"
            | "delete"
            | "rotate"
            | "grow"
            | "shrink"
            | "reset-view"
            | "nudge-left"
            | "nudge-right"
            | "nudge-up"
            | "nudge-down"
            | "zoom-in"
            | "zoom-out"
    )
}
