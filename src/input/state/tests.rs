use super::*;
use crate::draw::text::layout_label;
use crate::draw::{Annotation, AnnotationKind, EditorState, IconKind, Transform};
use crate::input::{Action, PointerEvent, PointerRelease, Tool};
use crate::util::Point;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn create_test_session() -> EditorSession {
    EditorSession::new(EditorState::default(), None, EditorSettings::default())
}

fn click(session: &mut EditorSession, x: f64, y: f64) {
    let point = Point::new(x, y);
    session.on_pointer_press(PointerEvent::single(point));
    session.on_pointer_release(PointerRelease::lifted(point));
}

fn drag(session: &mut EditorSession, from: Point, to: Point) {
    session.on_pointer_press(PointerEvent::single(from));
    session.on_pointer_move(PointerEvent::single(to));
    session.on_pointer_release(PointerRelease::lifted(to));
}

fn add_icon(session: &mut EditorSession, kind: IconKind, x: f64, y: f64) -> String {
    session.add_icon_at(kind, Point::new(x, y))
}

#[test]
fn test_click_with_armed_icon_places_one_icon() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Crash)));

    click(&mut session, 640.0, 360.0);

    let annotations = session.state().annotations.all();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].position, Point::new(640.0, 360.0));
    assert_eq!(annotations[0].size(), 140.0);
    assert_eq!(session.selected(), Some(annotations[0].id.as_str()));
    assert_eq!(session.armed_tool(), Some(Tool::Icon(IconKind::Crash)));
}

#[test]
fn test_drag_past_threshold_never_places() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Arrow)));

    drag(&mut session, Point::new(100.0, 100.0), Point::new(150.0, 120.0));

    assert!(session.state().annotations.is_empty());
    assert_eq!(session.transform().x, 50.0);
    assert_eq!(session.transform().y, 20.0);
    assert_eq!(session.gesture, GestureState::Idle);
}

#[test]
fn test_jitter_below_threshold_is_still_a_click() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Cross)));

    session.on_pointer_press(PointerEvent::single(Point::new(300.0, 300.0)));
    session.on_pointer_move(PointerEvent::single(Point::new(301.0, 301.0)));
    session.on_pointer_release(PointerRelease::lifted(Point::new(301.0, 301.0)));

    assert_eq!(session.state().annotations.len(), 1);
    assert_eq!(session.transform(), Transform::identity());
}

#[test]
fn test_click_on_wide_label_edge_selects_instead_of_placing() {
    let mut session = create_test_session();
    let anchor = Point::new(100.0, 300.0);
    let id = session.add_text_at(anchor, "WET FLOOR WARNING").unwrap();
    session.select(None);
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Warning)));

    let plate = layout_label("WET FLOOR WARNING", 32.0, &session.settings.font).unwrap();
    click(&mut session, anchor.x + plate.width - 3.0, anchor.y + plate.height - 3.0);

    assert_eq!(session.state().annotations.len(), 1);
    assert_eq!(session.selected(), Some(id.as_str()));
}

#[test]
fn test_click_without_tool_only_deselects() {
    let mut session = create_test_session();
    let id = add_icon(&mut session, IconKind::Warning, 200.0, 200.0);
    assert_eq!(session.selected(), Some(id.as_str()));

    click(&mut session, 900.0, 900.0);

    assert_eq!(session.selected(), None);
    assert_eq!(session.state().annotations.len(), 1);
}

#[test]
fn test_click_on_annotation_selects_without_placing() {
    let mut session = create_test_session();
    let first = add_icon(&mut session, IconKind::Circle, 400.0, 400.0);
    add_icon(&mut session, IconKind::Injury, 900.0, 400.0);
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Crash)));

    click(&mut session, 410.0, 390.0);

    assert_eq!(session.state().annotations.len(), 2);
    assert_eq!(session.selected(), Some(first.as_str()));
    // Touched annotation moves to the top of the paint order
    assert_eq!(session.state().annotations.all()[1].id, first);
}

#[test]
fn test_dragging_annotation_keeps_grab_offset() {
    let mut session = create_test_session();
    let id = add_icon(&mut session, IconKind::Arrow, 500.0, 300.0);

    drag(&mut session, Point::new(510.0, 290.0), Point::new(710.0, 490.0));

    let annotation = session.state().annotations.find(&id).unwrap();
    assert_eq!(annotation.position, Point::new(700.0, 500.0));
    assert_eq!(session.transform(), Transform::identity());
}

#[test]
fn test_text_tool_queues_request() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Text));

    click(&mut session, 250.0, 120.0);

    assert!(session.state().annotations.is_empty());
    let at = session.take_text_request().expect("text request");
    assert_eq!(at, Point::new(250.0, 120.0));
    assert!(session.take_text_request().is_none());

    let id = session.add_text_at(at, "Oil spill").unwrap();
    assert_eq!(session.selected(), Some(id.as_str()));
    assert!(session.add_text_at(at, "  \n ").is_none());
    assert_eq!(session.state().annotations.len(), 1);
}

#[test]
fn test_pinch_doubles_scale() {
    let mut session = create_test_session();
    let a = Point::new(910.0, 540.0);
    let b = Point::new(1010.0, 540.0);
    session.on_pointer_press(PointerEvent::pair(a, b));
    session.on_pointer_move(PointerEvent::pair(Point::new(860.0, 540.0), Point::new(1060.0, 540.0)));

    let transform = session.transform();
    assert!((transform.scale - 2.0).abs() < 1e-9);
    // Pinch centre (960, 540) stays put
    let anchored = transform.image_to_canvas(Point::new(960.0, 540.0));
    assert!((anchored.x - 960.0).abs() < 1e-9);
    assert!((anchored.y - 540.0).abs() < 1e-9);
}

#[test]
fn test_pinch_clamps_to_ceiling() {
    let mut session = create_test_session();
    session.on_pointer_press(PointerEvent::pair(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
    session.on_pointer_move(PointerEvent::pair(Point::new(0.0, 0.0), Point::new(1000.0, 0.0)));
    assert_eq!(session.transform().scale, 5.0);
}

#[test]
fn test_pinch_is_applied_against_start_snapshot() {
    let mut session = create_test_session();
    let left = Point::new(500.0, 500.0);
    session.on_pointer_press(PointerEvent::pair(left, Point::new(600.0, 500.0)));
    for right in [650.0, 700.0, 750.0, 700.0] {
        session.on_pointer_move(PointerEvent::pair(left, Point::new(right, 500.0)));
    }
    assert!((session.transform().scale - 2.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_pinch_frame_is_skipped() {
    let mut session = create_test_session();
    session.on_pointer_press(PointerEvent::pair(Point::new(500.0, 500.0), Point::new(600.0, 500.0)));
    session.on_pointer_move(PointerEvent::pair(Point::new(500.0, 500.0), Point::new(500.4, 500.0)));
    assert_eq!(session.transform(), Transform::identity());

    let mut collapsed = create_test_session();
    let p = Point::new(300.0, 300.0);
    collapsed.on_pointer_press(PointerEvent::pair(p, p));
    collapsed.on_pointer_move(PointerEvent::pair(p, Point::new(900.0, 300.0)));
    assert_eq!(collapsed.transform(), Transform::identity());
}

#[test]
fn test_lifting_one_pinch_finger_falls_back_to_pan() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Crash)));
    let remaining = Point::new(400.0, 400.0);
    session.on_pointer_press(PointerEvent::pair(remaining, Point::new(600.0, 400.0)));
    session.on_pointer_release(PointerRelease::with_remaining(Point::new(600.0, 400.0), remaining));

    assert_eq!(
        session.gesture,
        GestureState::PendingPan {
            origin: remaining,
            click: false
        }
    );

    session.on_pointer_move(PointerEvent::single(Point::new(430.0, 400.0)));
    assert_eq!(session.transform().x, 30.0);
    session.on_pointer_release(PointerRelease::lifted(Point::new(430.0, 400.0)));
    assert!(session.state().annotations.is_empty());
}

#[test]
fn test_lifted_pinch_without_move_does_not_place() {
    let mut session = create_test_session();
    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Crash)));
    let remaining = Point::new(400.0, 400.0);
    session.on_pointer_press(PointerEvent::pair(remaining, Point::new(600.0, 400.0)));
    session.on_pointer_release(PointerRelease::with_remaining(Point::new(600.0, 400.0), remaining));
    session.on_pointer_release(PointerRelease::lifted(remaining));
    assert!(session.state().annotations.is_empty());
}

#[test]
fn test_scroll_zooms_at_pointer() {
    let mut session = create_test_session();
    let pointer = Point::new(300.0, 200.0);
    let image_point = session.transform().canvas_to_image(pointer);

    session.on_scroll(-1.0, pointer);
    assert!((session.transform().scale - 1.1).abs() < 1e-9);
    let mapped = session.transform().image_to_canvas(image_point);
    assert!((mapped.x - pointer.x).abs() < 1e-9);
    assert!((mapped.y - pointer.y).abs() < 1e-9);

    for _ in 0..50 {
        session.on_scroll(3.0, pointer);
    }
    assert!(session.transform().scale >= 0.1);
}

#[test]
fn test_arrow_rotate_scenario() {
    let mut session = create_test_session();
    let id = add_icon(&mut session, IconKind::Arrow, 500.0, 300.0);
    assert!(session.apply_action(Action::RotateSelection));

    let annotation = session.state().annotations.find(&id).unwrap();
    assert_eq!(annotation.position, Point::new(500.0, 300.0));
    match annotation.kind {
        AnnotationKind::Icon {
            tool,
            size,
            rotation,
        } => {
            assert_eq!(tool, IconKind::Arrow);
            assert_eq!(size, 140.0);
            assert_eq!(rotation, 45.0);
        }
        _ => panic!("expected icon"),
    }
}

#[test]
fn test_selection_actions_without_selection_are_noops() {
    let mut session = create_test_session();
    add_icon(&mut session, IconKind::Arrow, 500.0, 300.0);
    session.select(None);
    let before = session.state().clone();
    session.needs_redraw = false;

    for action in [
        Action::DeleteSelection,
        Action::RotateSelection,
        Action::GrowSelection,
        Action::ShrinkSelection,
        Action::SetText("x".to_string()),
    ] {
        assert!(!session.apply_action(action));
    }
    assert_eq!(session.state(), &before);
    assert!(!session.needs_redraw);
}

#[test]
fn test_resize_steps_and_clamps() {
    let mut session = create_test_session();
    let icon = add_icon(&mut session, IconKind::Circle, 500.0, 500.0);
    session.apply_action(Action::GrowSelection);
    assert_eq!(session.selected_annotation().unwrap().size(), 150.0);
    for _ in 0..20 {
        session.apply_action(Action::GrowSelection);
    }
    assert_eq!(session.state().annotations.find(&icon).unwrap().size(), 220.0);
    assert!(!session.apply_action(Action::GrowSelection));

    session.add_text_at(Point::new(10.0, 10.0), "Exit").unwrap();
    session.apply_action(Action::ShrinkSelection);
    assert_eq!(session.selected_annotation().unwrap().size(), 28.0);
    for _ in 0..10 {
        session.apply_action(Action::ShrinkSelection);
    }
    assert_eq!(session.selected_annotation().unwrap().size(), 14.0);
}

#[test]
fn test_set_text_and_rotate_respect_type() {
    let mut session = create_test_session();
    session.add_text_at(Point::new(10.0, 10.0), "Before").unwrap();
    assert!(!session.apply_action(Action::RotateSelection));
    assert!(session.apply_action(Action::SetText("After".to_string())));
    match &session.selected_annotation().unwrap().kind {
        AnnotationKind::Text { content, .. } => assert_eq!(content, "After"),
        _ => panic!("expected text"),
    }

    add_icon(&mut session, IconKind::Crash, 800.0, 800.0);
    assert!(!session.apply_action(Action::SetText("nope".to_string())));
}

#[test]
fn test_delete_selection_clears_it() {
    let mut session = create_test_session();
    let id = add_icon(&mut session, IconKind::Crash, 800.0, 800.0);
    assert!(session.apply_action(Action::DeleteSelection));
    assert!(!session.state().annotations.contains(&id));
    assert_eq!(session.selected(), None);
}

#[test]
fn test_view_commands() {
    let mut session = EditorSession::fitted(Some((800.0, 600.0)), EditorSettings::default());
    let fitted = session.transform();
    assert_eq!(fitted, Transform::new(0.0, -180.0, 2.4));

    session.apply_action(Action::NudgeLeft);
    session.apply_action(Action::NudgeDown);
    assert_eq!(session.transform().x, -40.0);
    assert_eq!(session.transform().y, -140.0);

    session.apply_action(Action::ZoomIn);
    assert!((session.transform().scale - 2.5).abs() < 1e-9);

    session.apply_action(Action::ResetView);
    assert_eq!(session.transform(), fitted);
}

#[test]
fn test_reset_view_without_image_is_identity() {
    let mut session = create_test_session();
    session.apply_action(Action::NudgeUp);
    session.apply_action(Action::ResetView);
    assert_eq!(session.transform(), Transform::identity());
}

#[test]
fn test_observers_receive_selection_details() {
    let mut session = create_test_session();
    let seen: Rc<RefCell<Vec<Notification>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let subscription = session.subscribe(move |n| sink.borrow_mut().push(n.clone()));

    session.apply_action(Action::ArmTool(Tool::Icon(IconKind::Warning)));
    click(&mut session, 700.0, 400.0);

    {
        let seen = seen.borrow();
        let last = seen.last().unwrap();
        assert_eq!(last.armed_tool, Some(Tool::Icon(IconKind::Warning)));
        let selection = last.selection.as_ref().unwrap();
        assert_eq!(selection.kind, "icon");
        assert_eq!(selection.position, Point::new(700.0, 400.0));
        assert_eq!(
            selection.fields,
            SelectionFields::Icon {
                tool: IconKind::Warning,
                rotation: 0.0,
                size: 140.0
            }
        );
    }

    assert!(session.unsubscribe(subscription));
    let count = seen.borrow().len();
    session.apply_action(Action::DisarmTool);
    assert_eq!(seen.borrow().len(), count);
}

#[test]
fn test_drag_notifications_are_throttled() {
    let mut session = create_test_session();
    let id = add_icon(&mut session, IconKind::Arrow, 500.0, 500.0);
    let seen: Rc<RefCell<Vec<Point>>> = Rc::default();
    let sink = Rc::clone(&seen);
    session.subscribe(move |n| {
        if let Some(selection) = &n.selection {
            sink.borrow_mut().push(selection.position);
        }
    });

    let start = Instant::now();
    session.on_pointer_press(PointerEvent::single(Point::new(500.0, 500.0)).at(start));
    let after_press = seen.borrow().len();

    for step in 1..=10u64 {
        let at = start + Duration::from_millis(step);
        let point = Point::new(500.0 + step as f64, 500.0);
        session.on_pointer_move(PointerEvent::single(point).at(at));
    }
    // Model tracks every move; observers saw one update
    assert_eq!(
        session.state().annotations.find(&id).unwrap().position,
        Point::new(510.0, 500.0)
    );
    assert_eq!(seen.borrow().len(), after_press + 1);

    assert!(session.flush_notifications(start + Duration::from_millis(40)));
    assert_eq!(seen.borrow().last(), Some(&Point::new(510.0, 500.0)));

    session.on_pointer_release(PointerRelease::lifted(Point::new(510.0, 500.0)));
    assert_eq!(seen.borrow().len(), after_press + 3);
}

#[test]
fn test_restored_state_is_editable() {
    let annotations = crate::draw::AnnotationStore::from_annotations(vec![
        Annotation::icon(IconKind::Injury, Point::new(100.0, 100.0)).with_id("keep"),
    ]);
    let state = EditorState::new(Transform::new(10.0, 20.0, 1.5), annotations);
    let mut session = EditorSession::new(state, Some((1000.0, 1000.0)), EditorSettings::default());

    click(&mut session, 100.0, 100.0);
    assert_eq!(session.selected(), Some("keep"));
    assert!(session.apply_action(Action::DeleteSelection));
    assert!(session.into_state().annotations.is_empty());
}
