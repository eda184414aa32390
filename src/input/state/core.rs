//! Editor session: owned state, selection, armed tool and gesture tracking.

use super::notify::{FrameThrottle, Notification, Observers, SelectionInfo, SubscriptionId};
use crate::config::Config;
use crate::draw::annotation::{DEFAULT_ICON_SIZE, DEFAULT_TEXT_SIZE, clamp_text_size};
use crate::draw::{Annotation, EditorState, FontDescriptor, IconKind, Transform};
use crate::input::tool::Tool;
use crate::util::{CANVAS_HEIGHT, CANVAS_WIDTH, Point};
use std::time::{Duration, Instant};

/// Gesture recognizer state.
///
/// Single-pointer presses start in `PendingPan` (empty canvas) or
/// `DraggingAnnotation` (hit). `PendingPan` becomes `Panning` once the
/// pointer travels past the drag threshold; a release before that is a
/// click. Two pointers always mean `Pinching`.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    /// No pointer down
    Idle,
    /// Pressed on empty canvas, not yet past the drag threshold
    PendingPan {
        /// Where the pointer went down
        origin: Point,
        /// Whether releasing here counts as a click (false after a pinch)
        click: bool,
    },
    /// Panning the base image
    Panning {
        /// Pointer position at the previous move
        last: Point,
    },
    /// Moving the selected annotation
    DraggingAnnotation {
        id: String,
        /// Press point minus annotation position
        offset: (f64, f64),
    },
    /// Two-finger pinch zoom
    Pinching {
        /// Finger separation when the pinch started
        start_distance: f64,
        /// Transform when the pinch started; updates are applied to this
        start_transform: Transform,
    },
}

/// Tunables for a session, usually derived from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Logical pixels a press must travel before it becomes a pan
    pub drag_threshold: f64,
    /// Scale delta per wheel notch
    pub wheel_zoom_step: f64,
    /// Scale delta for the zoom in/out commands
    pub zoom_step: f64,
    /// Pan offset for the nudge commands
    pub nudge_offset: f64,
    /// Minimum spacing of drag notifications
    pub notify_interval: Duration,
    pub default_icon_size: f64,
    pub default_text_size: f64,
    pub icon_size_step: f64,
    pub text_size_step: f64,
    /// Label font, for measuring hit areas
    pub font: FontDescriptor,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 2.0,
            wheel_zoom_step: 0.1,
            zoom_step: 0.1,
            nudge_offset: 40.0,
            notify_interval: Duration::from_millis(16),
            default_icon_size: DEFAULT_ICON_SIZE,
            default_text_size: DEFAULT_TEXT_SIZE,
            icon_size_step: 10.0,
            text_size_step: 4.0,
            font: FontDescriptor::default(),
        }
    }
}

impl From<&Config> for EditorSettings {
    fn from(config: &Config) -> Self {
        Self {
            drag_threshold: config.input.drag_threshold,
            wheel_zoom_step: config.input.wheel_zoom_step,
            zoom_step: config.input.zoom_step,
            nudge_offset: config.input.nudge_offset,
            notify_interval: Duration::from_millis(config.input.notify_interval_ms),
            default_icon_size: config.annotations.default_icon_size,
            default_text_size: config.annotations.default_text_size,
            icon_size_step: config.annotations.icon_size_step,
            text_size_step: config.annotations.text_size_step,
            font: config.annotations.font(),
        }
    }
}

/// One open editor.
///
/// Owns the [`EditorState`] exclusively; every mutation goes through the
/// pointer handlers or [`EditorSession::apply_action`]. Hosts render from
/// [`EditorSession::state`] whenever `needs_redraw` is set and clear it
/// afterwards.
#[derive(Debug)]
pub struct EditorSession {
    pub(crate) state: EditorState,
    /// Current gesture
    pub gesture: GestureState,
    /// Tunables
    pub settings: EditorSettings,
    /// Whether the preview needs to be redrawn
    pub needs_redraw: bool,
    pub(crate) selected: Option<String>,
    pub(crate) armed_tool: Option<Tool>,
    /// Base image size for cover-fit resets (`None` when it failed to load)
    image_size: Option<(f64, f64)>,
    /// Canvas point waiting for host-supplied text
    pending_text_request: Option<Point>,
    observers: Observers,
    pub(crate) throttle: FrameThrottle,
}

impl EditorSession {
    /// Opens a session over an existing (restored or freshly fitted) state.
    pub fn new(state: EditorState, image_size: Option<(f64, f64)>, settings: EditorSettings) -> Self {
        let throttle = FrameThrottle::new(settings.notify_interval);
        Self {
            state,
            gesture: GestureState::Idle,
            settings,
            needs_redraw: true,
            selected: None,
            armed_tool: None,
            image_size,
            pending_text_request: None,
            observers: Observers::default(),
            throttle,
        }
    }

    /// Fresh session: image cover-fitted, no annotations.
    pub fn fitted(image_size: Option<(f64, f64)>, settings: EditorSettings) -> Self {
        let state = match image_size {
            Some((width, height)) => EditorState::fitted(width, height),
            None => EditorState::default(),
        };
        Self::new(state, image_size, settings)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Ends the session, returning the composition.
    pub fn into_state(self) -> EditorState {
        self.state
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn image_size(&self) -> Option<(f64, f64)> {
        self.image_size
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selected
            .as_deref()
            .and_then(|id| self.state.annotations.find(id))
    }

    pub fn armed_tool(&self) -> Option<Tool> {
        self.armed_tool
    }

    /// Arms (or with `None`, disarms) the placement tool.
    pub fn arm_tool(&mut self, tool: Option<Tool>) {
        if self.armed_tool != tool {
            log::debug!(
                "Placement tool: {}",
                tool.map_or("none".to_string(), |t| t.to_string())
            );
            self.armed_tool = tool;
            self.notify();
        }
    }

    /// Selects an annotation by id, or clears the selection.
    ///
    /// Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        let next = id
            .filter(|id| self.state.annotations.contains(id))
            .map(str::to_string);
        if next != self.selected {
            self.selected = next;
            self.needs_redraw = true;
            self.notify();
        }
    }

    /// Places an icon at `position` using the configured default size and
    /// selects it. Returns the new id.
    pub fn add_icon_at(&mut self, tool: IconKind, position: Point) -> String {
        let mut annotation = Annotation::icon(tool, position);
        annotation.set_size(self.settings.default_icon_size);
        let id = self.state.annotations.add(annotation);
        log::debug!("Placed {} icon {} at ({:.1}, {:.1})", tool, id, position.x, position.y);
        self.selected = Some(id.clone());
        self.needs_redraw = true;
        self.notify();
        id
    }

    /// Commits host-supplied text as a new label at `position` and selects it.
    ///
    /// Blank content is discarded and `None` returned.
    pub fn add_text_at(&mut self, position: Point, content: &str) -> Option<String> {
        if crate::draw::text::is_blank(content) {
            log::debug!("Ignoring blank label at ({:.1}, {:.1})", position.x, position.y);
            return None;
        }
        let size = clamp_text_size(self.settings.default_text_size);
        let id = self
            .state
            .annotations
            .add(Annotation::text(content, size, position));
        log::debug!("Placed label {} at ({:.1}, {:.1})", id, position.x, position.y);
        self.selected = Some(id.clone());
        self.needs_redraw = true;
        self.notify();
        Some(id)
    }

    /// Takes the pending text placement request, if the text tool was clicked.
    ///
    /// The host collects the content and commits it with
    /// [`EditorSession::add_text_at`].
    pub fn take_text_request(&mut self) -> Option<Point> {
        self.pending_text_request.take()
    }

    pub(crate) fn request_text(&mut self, position: Point) {
        log::debug!("Text requested at ({:.1}, {:.1})", position.x, position.y);
        self.pending_text_request = Some(position);
    }

    /// Cover-fits the base image again (identity when no image is loaded).
    pub fn reset_view(&mut self) {
        let mut transform = Transform::identity();
        if let Some((width, height)) = self.image_size {
            transform.fit_cover(width, height, CANVAS_WIDTH, CANVAS_HEIGHT);
        }
        self.state.transform = transform;
        self.needs_redraw = true;
        self.notify();
    }

    // ------------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------------

    /// Registers an observer called after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Current notification payload.
    pub fn notification(&self) -> Notification {
        Notification {
            armed_tool: self.armed_tool,
            selection: self.selected_annotation().map(SelectionInfo::from),
        }
    }

    /// Emits a notification to every observer right away.
    pub(crate) fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let notification = self.notification();
        self.observers.emit(&notification);
    }

    /// Emits a notification unless one went out less than an interval ago.
    pub(crate) fn notify_throttled(&mut self, now: Instant) {
        if self.throttle.should_emit(now) {
            self.notify();
        }
    }

    /// Emits a held-back notification once its interval has passed.
    ///
    /// Hosts call this from their frame callback. Returns `true` if a
    /// notification went out.
    pub fn flush_notifications(&mut self, now: Instant) -> bool {
        if self.throttle.take_pending(now) {
            self.notify();
            true
        } else {
            false
        }
    }
}
