use crate::draw::AnnotationKind;
use crate::input::action::Action;
use crate::util::CANVAS_CENTER;

use super::EditorSession;

impl EditorSession {
    /// Executes a host command.
    ///
    /// Selection commands without a selection (or on the wrong annotation
    /// type, e.g. rotating a label) do nothing. Returns `true` when the
    /// state changed.
    pub fn apply_action(&mut self, action: Action) -> bool {
        log::debug!("Action: {}", action);
        let changed = match action {
            Action::ArmTool(tool) => {
                let changed = self.armed_tool != Some(tool);
                self.arm_tool(Some(tool));
                return changed;
            }
            Action::DisarmTool => {
                let changed = self.armed_tool.is_some();
                self.arm_tool(None);
                return changed;
            }
            Action::DeleteSelection => match self.selected.take() {
                Some(id) => self.state.annotations.remove(&id).is_some(),
                None => false,
            },
            Action::RotateSelection => self.with_selection(|annotation| {
                if matches!(annotation.kind, AnnotationKind::Icon { .. }) {
                    annotation.rotate_step();
                    true
                } else {
                    false
                }
            }),
            Action::GrowSelection => self.resize_selection(1.0),
            Action::ShrinkSelection => self.resize_selection(-1.0),
            Action::SetText(content) => {
                self.with_selection(|annotation| annotation.set_content(content))
            }
            Action::ResetView => {
                self.reset_view();
                return true;
            }
            Action::NudgeLeft => self.nudge(-1.0, 0.0),
            Action::NudgeRight => self.nudge(1.0, 0.0),
            Action::NudgeUp => self.nudge(0.0, -1.0),
            Action::NudgeDown => self.nudge(0.0, 1.0),
            Action::ZoomIn => self.state.transform.zoom_by(self.settings.zoom_step, CANVAS_CENTER),
            Action::ZoomOut => self
                .state
                .transform
                .zoom_by(-self.settings.zoom_step, CANVAS_CENTER),
        };

        if changed {
            self.needs_redraw = true;
            self.notify();
        }
        changed
    }

    fn with_selection<F>(&mut self, mutate: F) -> bool
    where
        F: FnOnce(&mut crate::draw::Annotation) -> bool,
    {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };
        match self.state.annotations.find_mut(id) {
            Some(annotation) => mutate(annotation),
            None => false,
        }
    }

    fn resize_selection(&mut self, direction: f64) -> bool {
        let icon_step = self.settings.icon_size_step;
        let text_step = self.settings.text_size_step;
        self.with_selection(|annotation| {
            let before = annotation.size();
            let step = match annotation.kind {
                AnnotationKind::Icon { .. } => icon_step,
                AnnotationKind::Text { .. } => text_step,
            };
            annotation.resize_by(direction * step);
            annotation.size() != before
        })
    }

    fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        let offset = self.settings.nudge_offset;
        self.state.transform.pan_by(dx * offset, dy * offset);
        true
    }
}
