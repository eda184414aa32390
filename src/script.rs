//! Scripted editing steps.
//!
//! The command-line binary drives an [`EditorSession`] with a sequence of
//! steps instead of live input. A step is either a host command (see
//! [`Action`]) or a synthetic pointer gesture:
//!
//! | Step                         | Meaning                                        |
//! |------------------------------|------------------------------------------------|
//! | `click:X,Y`                  | press and release without moving               |
//! | `drag:X1,Y1,X2,Y2`           | press, move and release                        |
//! | `pinch:CX,CY,FROM,TO`        | two-finger pinch around a centre               |
//! | `scroll:X,Y,DY`              | wheel input (negative `DY` zooms in)           |
//! | `type:TEXT`                  | answer the pending text request                |
//!
//! Coordinates are in display space and mapped to the logical canvas.

use crate::input::{Action, DisplayMapping, EditorSession, PointerEvent, PointerRelease};
use crate::util::Point;
use std::fmt;
use std::str::FromStr;

/// Number of intermediate moves synthesised for drags and pinches.
const GESTURE_STEPS: u32 = 8;

/// One scripted step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Action(Action),
    Click(Point),
    Drag { from: Point, to: Point },
    Pinch { center: Point, from: f64, to: f64 },
    Scroll { at: Point, delta_y: f64 },
    Type(String),
}

impl Step {
    /// Feeds the step into the session.
    ///
    /// Returns `false` when the step had nothing to act on (for example
    /// `type:` without a pending text request).
    pub fn apply(&self, session: &mut EditorSession, mapping: &DisplayMapping) -> bool {
        match self {
            Step::Action(action) => session.apply_action(action.clone()),
            Step::Click(point) => {
                let point = mapping.to_logical(*point);
                session.on_pointer_press(PointerEvent::single(point));
                session.on_pointer_release(PointerRelease::lifted(point));
                true
            }
            Step::Drag { from, to } => {
                let (from, to) = (mapping.to_logical(*from), mapping.to_logical(*to));
                session.on_pointer_press(PointerEvent::single(from));
                for i in 1..=GESTURE_STEPS {
                    let t = f64::from(i) / f64::from(GESTURE_STEPS);
                    let point = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
                    session.on_pointer_move(PointerEvent::single(point));
                }
                session.on_pointer_release(PointerRelease::lifted(to));
                true
            }
            Step::Pinch { center, from, to } => {
                let center = mapping.to_logical(*center);
                let fingers = |distance: f64| {
                    (
                        Point::new(center.x - distance / 2.0, center.y),
                        Point::new(center.x + distance / 2.0, center.y),
                    )
                };
                let (a, b) = fingers(*from);
                session.on_pointer_press(PointerEvent::pair(a, b));
                for i in 1..=GESTURE_STEPS {
                    let t = f64::from(i) / f64::from(GESTURE_STEPS);
                    let (a, b) = fingers(from + (to - from) * t);
                    session.on_pointer_move(PointerEvent::pair(a, b));
                }
                let (a, b) = fingers(*to);
                session.on_pointer_release(PointerRelease::with_remaining(b, a));
                session.on_pointer_release(PointerRelease::lifted(a));
                true
            }
            Step::Scroll { at, delta_y } => {
                session.on_scroll(*delta_y, mapping.to_logical(*at));
                true
            }
            Step::Type(content) => match session.take_text_request() {
                Some(at) => session.add_text_at(at, content).is_some(),
                None => {
                    log::warn!("No text placement pending; ignoring '{}'", content);
                    false
                }
            },
        }
    }
}

fn parse_numbers<const N: usize>(args: &str, step: &str) -> Result<[f64; N], String> {
    let values: Vec<f64> = args
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|err| format!("invalid number in '{step}': {err}"))?;
    let values: [f64; N] = values
        .try_into()
        .map_err(|_| format!("'{step}' expects {N} comma-separated numbers"))?;
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(format!("'{step}' contains a non-finite number"))
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, args)) = s.split_once(':') else {
            return s.parse().map(Step::Action);
        };
        match name.trim().to_lowercase().as_str() {
            "click" => {
                let [x, y] = parse_numbers(args, s)?;
                Ok(Step::Click(Point::new(x, y)))
            }
            "drag" => {
                let [x1, y1, x2, y2] = parse_numbers(args, s)?;
                Ok(Step::Drag {
                    from: Point::new(x1, y1),
                    to: Point::new(x2, y2),
                })
            }
            "pinch" => {
                let [x, y, from, to] = parse_numbers(args, s)?;
                Ok(Step::Pinch {
                    center: Point::new(x, y),
                    from,
                    to,
                })
            }
            "scroll" => {
                let [x, y, delta_y] = parse_numbers(args, s)?;
                Ok(Step::Scroll {
                    at: Point::new(x, y),
                    delta_y,
                })
            }
            "type" => Ok(Step::Type(args.to_string())),
            _ => s.parse().map(Step::Action),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Action(action) => write!(f, "{action}"),
            Step::Click(p) => write!(f, "click:{},{}", p.x, p.y),
            Step::Drag { from, to } => write!(f, "drag:{},{},{},{}", from.x, from.y, to.x, to.y),
            Step::Pinch { center, from, to } => {
                write!(f, "pinch:{},{},{},{}", center.x, center.y, from, to)
            }
            Step::Scroll { at, delta_y } => write!(f, "scroll:{},{},{}", at.x, at.y, delta_y),
            Step::Type(content) => write!(f, "type:{content}"),
        }
    }
}
