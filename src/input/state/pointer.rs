use crate::draw::hit_test;
use crate::draw::transform::MAX_PINCH_SCALE;
use crate::input::events::{PointerEvent, PointerRelease};
use crate::input::tool::Tool;
use crate::util::Point;
use std::time::Instant;

use super::{EditorSession, GestureState};

/// Finger separations below this are treated as degenerate.
const MIN_PINCH_DISTANCE: f64 = 1.0;

impl EditorSession {
    /// Processes a pointer press (mouse button down or touch start).
    ///
    /// # Behavior
    /// - Two contacts: cancels any pan or drag and starts pinching
    /// - One contact on an annotation: selects it, brings it to the top and
    ///   starts dragging
    /// - One contact on empty canvas: clears the selection and waits to see
    ///   whether this becomes a pan or a click
    pub fn on_pointer_press(&mut self, event: PointerEvent) {
        if let Some(secondary) = event.secondary {
            self.begin_pinch(event.primary, secondary);
            return;
        }

        let point = event.primary;
        let hit = hit_test(self.state.annotations.all(), point, &self.settings.font)
            .map(|a| (a.id.clone(), a.position));

        match hit {
            Some((id, position)) => {
                self.state.annotations.bring_to_front(&id);
                log::debug!("Dragging annotation {}", id);
                self.selected = Some(id.clone());
                self.gesture = GestureState::DraggingAnnotation {
                    id,
                    offset: point.offset_from(position),
                };
                self.needs_redraw = true;
                self.notify();
            }
            None => {
                self.gesture = GestureState::PendingPan {
                    origin: point,
                    click: true,
                };
                if self.selected.take().is_some() {
                    self.needs_redraw = true;
                    self.notify();
                }
            }
        }
    }

    /// Processes pointer motion while contacts are down.
    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        let point = event.primary;

        match self.gesture {
            GestureState::Idle => {}
            _ if event.secondary.is_some()
                && !matches!(self.gesture, GestureState::Pinching { .. }) =>
            {
                // A second finger landed without its own press event
                if let Some(secondary) = event.secondary {
                    self.begin_pinch(point, secondary);
                }
            }
            GestureState::PendingPan { origin, .. } => {
                if point.distance_to(origin) > self.settings.drag_threshold {
                    log::debug!("Press became a pan");
                    self.gesture = GestureState::Panning { last: origin };
                    self.pan_to(point, event.at);
                }
            }
            GestureState::Panning { .. } => self.pan_to(point, event.at),
            GestureState::DraggingAnnotation { ref id, offset } => {
                let id = id.clone();
                let position = Point::new(point.x - offset.0, point.y - offset.1);
                if let Some(annotation) = self.state.annotations.find_mut(&id) {
                    annotation.position = position;
                    self.needs_redraw = true;
                    self.notify_throttled(event.at);
                }
            }
            GestureState::Pinching {
                start_distance,
                start_transform,
            } => {
                let Some(secondary) = event.secondary else {
                    return;
                };
                let distance = point.distance_to(secondary);
                if start_distance < MIN_PINCH_DISTANCE || distance < MIN_PINCH_DISTANCE {
                    log::trace!("Skipping degenerate pinch frame ({distance:.2}px)");
                    return;
                }
                let scale = (start_transform.scale * distance / start_distance)
                    .min(MAX_PINCH_SCALE);
                self.state.transform = start_transform.zoomed_to(scale, point.midpoint(secondary));
                self.needs_redraw = true;
                self.notify_throttled(event.at);
            }
        }
    }

    /// Processes a contact being lifted.
    ///
    /// # Behavior
    /// - Ends pans and drags
    /// - A release before the drag threshold was crossed on empty canvas is a
    ///   click: an armed icon tool places an icon there, the text tool queues
    ///   a text request for the host
    /// - Lifting one of two pinching fingers falls back to a pending pan at
    ///   the remaining finger
    pub fn on_pointer_release(&mut self, release: PointerRelease) {
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Idle => {}
            GestureState::PendingPan { click, .. } => {
                if click {
                    self.on_click(release.position);
                }
            }
            GestureState::Panning { .. } | GestureState::DraggingAnnotation { .. } => {
                self.throttle.reset();
                self.notify();
            }
            GestureState::Pinching { .. } => {
                self.throttle.reset();
                if let Some(remaining) = release.remaining {
                    self.gesture = GestureState::PendingPan {
                        origin: remaining,
                        click: false,
                    };
                }
                self.notify();
            }
        }
    }

    /// Zooms around the pointer for a wheel/scroll input.
    ///
    /// Negative `delta_y` (scrolling up) zooms in. Works in any gesture state.
    pub fn on_scroll(&mut self, delta_y: f64, position: Point) {
        let step = if delta_y < 0.0 {
            self.settings.wheel_zoom_step
        } else if delta_y > 0.0 {
            -self.settings.wheel_zoom_step
        } else {
            return;
        };
        if self.state.transform.zoom_by(step, position) {
            self.needs_redraw = true;
            self.notify();
        }
    }

    fn on_click(&mut self, position: Point) {
        match self.armed_tool {
            Some(Tool::Icon(kind)) => {
                self.add_icon_at(kind, position);
            }
            Some(Tool::Text) => self.request_text(position),
            None => {}
        }
    }

    fn begin_pinch(&mut self, first: Point, second: Point) {
        log::debug!("Pinch started");
        self.gesture = GestureState::Pinching {
            start_distance: first.distance_to(second),
            start_transform: self.state.transform.snapshot(),
        };
    }

    fn pan_to(&mut self, point: Point, at: Instant) {
        if let GestureState::Panning { last } = &mut self.gesture {
            let (dx, dy) = point.offset_from(*last);
            *last = point;
            self.state.transform.pan_by(dx, dy);
            self.needs_redraw = true;
            self.notify_throttled(at);
        }
    }
}
