// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::geometry::{Point, SnapConfig};
use crate::model::{ConnectionKind, NodeId, ObjectRef};
use crate::ops::{ChangeEvent, ChangeKind, ChangeTarget, GraphError, GraphModel};

use super::{
    ConnectionStyle, Controller, InputEvent, InteractionConfig, Key, Mode, Modifiers,
    PointerButton, PresentationAdapter, SelectionItem, VisibilityFilter, NEW_NODE_LABEL,
};

#[derive(Debug, Default)]
struct Recorder {
    changes: Vec<ChangeEvent>,
    view_changes: usize,
}

impl PresentationAdapter for Recorder {
    fn notify(&mut self, change: &ChangeEvent) {
        self.changes.push(*change);
    }

    fn view_changed(&mut self) {
        self.view_changes += 1;
    }
}

const CTRL: Modifiers = Modifiers {
    ctrl: true,
    shift: false,
    alt: false,
};

const ALT: Modifiers = Modifiers {
    ctrl: false,
    shift: false,
    alt: true,
};

fn down(x: f64, y: f64) -> InputEvent {
    down_with(x, y, Modifiers::NONE)
}

fn down_with(x: f64, y: f64, modifiers: Modifiers) -> InputEvent {
    InputEvent::PointerDown {
        point: Point::new(x, y),
        button: PointerButton::Primary,
        modifiers,
    }
}

fn move_to(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        point: Point::new(x, y),
    }
}

fn up(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerUp {
        point: Point::new(x, y),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    }
}

fn key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::NONE,
    }
}

fn no_snap() -> InteractionConfig {
    InteractionConfig {
        snap: SnapConfig {
            enabled: false,
            ..SnapConfig::default()
        },
        ..InteractionConfig::default()
    }
}

struct Canvas {
    model: GraphModel,
    controller: Controller,
    recorder: Recorder,
}

impl Canvas {
    fn send(&mut self, event: InputEvent) -> super::Outcome {
        self.controller
            .handle(&mut self.model, event, &mut self.recorder)
    }

    fn click(&mut self, x: f64, y: f64) {
        self.send(down(x, y));
        self.send(up(x, y));
    }

    fn position(&self, node_id: NodeId) -> Point {
        self.model.node(node_id).expect("node").position()
    }
}

fn canvas_with(config: InteractionConfig, nodes: &[(f64, f64, &str)]) -> (Canvas, Vec<NodeId>) {
    let mut model = GraphModel::new();
    let ids = nodes
        .iter()
        .map(|(x, y, label)| model.add_node(Point::new(*x, *y), *label).expect("add"))
        .collect();
    model.take_changes();
    let canvas = Canvas {
        model,
        controller: Controller::new(config),
        recorder: Recorder::default(),
    };
    (canvas, ids)
}

/// Three unconnected 150x50 nodes: A at the origin, B to the right, C below.
#[fixture]
fn three() -> (Canvas, Vec<NodeId>) {
    canvas_with(
        no_snap(),
        &[(0.0, 0.0, "a"), (400.0, 0.0, "b"), (0.0, 300.0, "c")],
    )
}

#[test]
fn double_press_on_empty_canvas_creates_node_and_edits_label() {
    let (mut canvas, _) = canvas_with(InteractionConfig::default(), &[]);

    let outcome = canvas.send(InputEvent::DoublePress {
        point: Point::new(200.0, 100.0),
    });
    assert!(outcome.handled);

    let node_id = canvas.model.document().node_ids()[0];
    assert_eq!(canvas.position(node_id), Point::new(181.25, 93.75));
    assert_eq!(canvas.model.node(node_id).expect("node").label(), NEW_NODE_LABEL);
    assert!(canvas.controller.view().is_node_selected(node_id));
    assert!(matches!(canvas.controller.view().mode, Mode::EditingLabel(_)));
    assert_eq!(
        canvas.recorder.changes,
        vec![ChangeEvent {
            target: ChangeTarget::Object(ObjectRef::Node(node_id)),
            kind: ChangeKind::Added,
        }]
    );

    for c in "Idea".chars() {
        canvas.send(key(Key::Char(c)));
    }
    canvas.send(key(Key::Backspace));
    canvas.send(key(Key::Enter));

    assert_eq!(canvas.model.node(node_id).expect("node").label(), "Ide");
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
}

#[test]
fn escape_discards_label_edit() {
    let (mut canvas, ids) = canvas_with(InteractionConfig::default(), &[(0.0, 0.0, "keep")]);

    canvas.send(InputEvent::DoublePress {
        point: Point::new(10.0, 10.0),
    });
    canvas.send(key(Key::Char('x')));
    canvas.send(key(Key::Escape));

    assert_eq!(canvas.model.node(ids[0]).expect("node").label(), "keep");
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
    assert_eq!(canvas.model.document().node_count(), 1);
}

#[test]
fn editing_starts_from_the_current_label() {
    let (mut canvas, ids) = canvas_with(InteractionConfig::default(), &[(0.0, 0.0, "draft")]);

    canvas.send(InputEvent::DoublePress {
        point: Point::new(10.0, 10.0),
    });
    match &canvas.controller.view().mode {
        Mode::EditingLabel(edit) => assert_eq!(edit.buffer, "draft"),
        other => panic!("expected label edit, got {other:?}"),
    }
    canvas.send(key(Key::Backspace));
    canvas.send(key(Key::Char('s')));
    canvas.send(key(Key::Enter));

    assert_eq!(canvas.model.node(ids[0]).expect("node").label(), "drafs");
}

#[test]
fn empty_buffer_keeps_label_on_commit() {
    let (mut canvas, ids) = canvas_with(InteractionConfig::default(), &[(0.0, 0.0, "keep")]);

    canvas.send(InputEvent::DoublePress {
        point: Point::new(10.0, 10.0),
    });
    for _ in 0.."keep".len() {
        canvas.send(key(Key::Backspace));
    }
    canvas.send(InputEvent::FocusLost);

    assert_eq!(canvas.model.node(ids[0]).expect("node").label(), "keep");
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
}

#[test]
fn pressing_elsewhere_commits_label_edit() {
    let (mut canvas, ids) = canvas_with(InteractionConfig::default(), &[(0.0, 0.0, "old")]);

    canvas.send(InputEvent::DoublePress {
        point: Point::new(10.0, 10.0),
    });
    canvas.send(key(Key::Char('n')));
    canvas.send(down(900.0, 900.0));

    assert_eq!(canvas.model.node(ids[0]).expect("node").label(), "oldn");
}

#[test]
fn drag_snaps_to_neighbour_and_release_clears_guides() {
    let (mut canvas, ids) = canvas_with(
        InteractionConfig::default(),
        &[(0.0, 0.0, "a"), (300.0, 200.0, "b")],
    );
    let b = ids[1];

    canvas.send(down(310.0, 210.0));
    assert!(matches!(canvas.controller.view().mode, Mode::Dragging(_)));

    canvas.send(move_to(13.0, 300.0));
    assert_eq!(canvas.position(b), Point::new(0.0, 290.0));
    assert!(!canvas.controller.view().snap_guides.is_empty());

    canvas.send(up(13.0, 300.0));
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
    assert!(canvas.controller.view().snap_guides.is_empty());
    assert_eq!(canvas.position(b), Point::new(0.0, 290.0));
}

#[rstest]
fn selected_nodes_move_together(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    canvas.click(10.0, 10.0);
    canvas.send(down_with(410.0, 10.0, CTRL));
    canvas.send(move_to(460.0, 60.0));
    canvas.send(up(460.0, 60.0));

    assert_eq!(canvas.position(b), Point::new(450.0, 50.0));
    assert_eq!(canvas.position(a), Point::new(50.0, 50.0));
    assert_eq!(canvas.position(c), Point::new(0.0, 300.0));
}

#[rstest]
fn plain_press_keeps_existing_multi_selection(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    canvas.click(10.0, 10.0);
    canvas.send(down_with(410.0, 10.0, CTRL));
    canvas.send(up(410.0, 10.0));
    canvas.send(down(10.0, 10.0));

    let view = canvas.controller.view();
    assert!(view.is_node_selected(ids[0]));
    assert!(view.is_node_selected(ids[1]));
}

#[rstest]
fn toggling_off_does_not_start_drag(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    canvas.click(10.0, 10.0);
    canvas.send(down_with(10.0, 10.0, CTRL));

    assert!(!canvas.controller.view().is_node_selected(ids[0]));
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
}

#[rstest]
fn escape_restores_drag_start(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    let b = ids[1];

    canvas.send(down(410.0, 10.0));
    canvas.send(move_to(700.0, 500.0));
    assert_ne!(canvas.position(b), Point::new(400.0, 0.0));

    canvas.send(key(Key::Escape));
    assert_eq!(canvas.position(b), Point::new(400.0, 0.0));
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
    assert!(canvas.controller.view().is_node_selected(b));
}

#[rstest]
#[case::connect_mode(false, ConnectionKind::Strong)]
#[case::alt_press(true, ConnectionKind::Weak)]
fn connection_draft_adds_connection_on_release(
    three: (Canvas, Vec<NodeId>),
    #[case] use_alt: bool,
    #[case] kind: ConnectionKind,
) {
    let (mut canvas, ids) = three;
    canvas.controller.set_connect_kind(kind);
    let modifiers = if use_alt {
        ALT
    } else {
        canvas.controller.set_connect_mode(true);
        Modifiers::NONE
    };

    canvas.send(down_with(10.0, 10.0, modifiers));
    canvas.send(move_to(200.0, 20.0));
    match &canvas.controller.view().mode {
        Mode::ConnectingDraft(draft) => {
            assert_eq!(draft.source_id, ids[0]);
            assert_eq!(draft.current_pointer_position, Point::new(200.0, 20.0));
        }
        other => panic!("expected draft, got {other:?}"),
    }
    assert_eq!(canvas.position(ids[0]), Point::new(0.0, 0.0));

    let outcome = canvas.send(up(410.0, 10.0));
    assert_eq!(outcome.rejected, None);
    let connection = canvas
        .model
        .document()
        .connections()
        .next()
        .copied()
        .expect("connection");
    assert_eq!(connection.source_id(), ids[0]);
    assert_eq!(connection.target_id(), ids[1]);
    assert_eq!(connection.kind(), kind);
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
}

#[rstest]
fn releasing_draft_on_empty_canvas_discards_it(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, _) = three;
    canvas.controller.set_connect_mode(true);

    canvas.send(down(10.0, 10.0));
    let outcome = canvas.send(up(900.0, 900.0));

    assert_eq!(outcome.rejected, None);
    assert_eq!(canvas.model.document().connection_count(), 0);
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
}

#[rstest]
fn cycle_closing_draft_is_rejected_without_mutation(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    canvas
        .model
        .add_connection(ids[0], ids[1], ConnectionKind::Strong)
        .expect("a->b");
    let rev = canvas.model.rev();
    canvas.controller.set_connect_mode(true);

    canvas.send(down(410.0, 10.0));
    let outcome = canvas.send(up(10.0, 10.0));

    assert!(outcome.handled);
    assert!(matches!(outcome.rejected, Some(GraphError::Cycle { .. })));
    assert_eq!(canvas.model.document().connection_count(), 1);
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
    assert_eq!(canvas.model.rev(), rev);
}

#[rstest]
fn strong_child_inherits_parent_group(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    let group = canvas.model.add_group("team", None).expect("group");
    canvas
        .model
        .set_node_group(ids[0], Some(group))
        .expect("assign");
    canvas.controller.set_connect_mode(true);

    canvas.send(down(10.0, 10.0));
    canvas.send(up(410.0, 10.0));

    assert_eq!(canvas.model.node(ids[1]).expect("b").group_id(), Some(group));
}

#[rstest]
fn marquee_selects_intersecting_nodes(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    canvas.send(down(-10.0, -10.0));
    assert!(matches!(canvas.controller.view().mode, Mode::Marquee(_)));
    canvas.send(move_to(600.0, 60.0));
    canvas.send(up(600.0, 60.0));

    let view = canvas.controller.view();
    assert!(view.is_node_selected(ids[0]));
    assert!(view.is_node_selected(ids[1]));
    assert!(!view.is_node_selected(ids[2]));
    assert_eq!(view.mode, Mode::Idle);
}

#[rstest]
fn press_on_empty_canvas_clears_selection(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, _) = three;

    canvas.click(10.0, 10.0);
    assert_eq!(canvas.controller.view().selection.len(), 1);
    canvas.click(900.0, 900.0);
    assert!(canvas.controller.view().selection.is_empty());
}

#[rstest]
fn middle_button_pans_viewport(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    canvas.send(InputEvent::PointerDown {
        point: Point::new(100.0, 100.0),
        button: PointerButton::Middle,
        modifiers: Modifiers::NONE,
    });
    canvas.send(move_to(130.0, 90.0));
    canvas.send(InputEvent::PointerUp {
        point: Point::new(130.0, 90.0),
        button: PointerButton::Middle,
        modifiers: Modifiers::NONE,
    });

    let viewport = canvas.model.document().viewport();
    assert_eq!((viewport.pan_x, viewport.pan_y), (30.0, -10.0));
    assert_eq!(canvas.position(ids[0]), Point::new(0.0, 0.0));
    assert_eq!(canvas.controller.view().mode, Mode::Idle);
    assert!(canvas
        .recorder
        .changes
        .iter()
        .any(|change| change.target == ChangeTarget::Viewport));
}

#[rstest]
#[case::zoom_in(100.0, 1.75)]
#[case::zoom_out(-100.0, 0.35)]
fn wheel_zoom_is_clamped(three: (Canvas, Vec<NodeId>), #[case] delta: f64, #[case] expected: f64) {
    let (mut canvas, _) = three;

    canvas.send(InputEvent::Wheel {
        point: Point::new(0.0, 0.0),
        delta,
    });

    assert_eq!(canvas.model.document().viewport().zoom, expected);
}

#[test]
fn wheel_zoom_keeps_pointer_anchor() {
    let (mut canvas, _) = canvas_with(InteractionConfig::default(), &[]);
    let anchor = Point::new(120.0, 80.0);

    canvas.send(InputEvent::Wheel {
        point: anchor,
        delta: 1.0,
    });

    let viewport = canvas.model.document().viewport();
    assert!((viewport.zoom - 1.15).abs() < 1e-9);
    let back = viewport.canvas_to_screen(Point::new(120.0, 80.0));
    assert!((back.x - anchor.x).abs() < 1e-9);
    assert!((back.y - anchor.y).abs() < 1e-9);
}

#[test]
fn delete_removes_selected_node_and_its_connections() {
    let (mut canvas, ids) = canvas_with(
        no_snap(),
        &[(0.0, 0.0, "a"), (400.0, 300.0, "b")],
    );
    canvas
        .model
        .add_connection(ids[0], ids[1], ConnectionKind::Strong)
        .expect("connect");

    canvas.click(10.0, 10.0);
    let outcome = canvas.send(key(Key::Delete));

    assert!(outcome.handled);
    assert!(!canvas.model.document().contains_node(ids[0]));
    assert_eq!(canvas.model.document().connection_count(), 0);
    assert!(canvas.controller.view().selection.is_empty());
}

#[test]
fn clicking_a_connection_selects_it() {
    let (mut canvas, ids) = canvas_with(
        no_snap(),
        &[(0.0, 0.0, "a"), (400.0, 300.0, "b")],
    );
    let connection = canvas
        .model
        .add_connection(ids[0], ids[1], ConnectionKind::Strong)
        .expect("connect");

    canvas.click(300.0, 22.0);

    let view = canvas.controller.view();
    assert!(view.is_selected(SelectionItem::Connection(connection)));
    assert_eq!(view.selection.len(), 1);
}

#[test]
fn connection_styles_follow_selection_and_hover() {
    let (mut canvas, ids) = canvas_with(
        no_snap(),
        &[(0.0, 0.0, "a"), (400.0, 300.0, "b")],
    );
    let connection = canvas
        .model
        .add_connection(ids[0], ids[1], ConnectionKind::Strong)
        .expect("connect");
    let style = |canvas: &Canvas| canvas.controller.connection_style(&canvas.model, connection);

    assert_eq!(style(&canvas), ConnectionStyle::Default);

    canvas.send(move_to(300.0, 22.0));
    assert_eq!(style(&canvas), ConnectionStyle::Hover);

    canvas.click(10.0, 10.0);
    assert_eq!(style(&canvas), ConnectionStyle::Highlighted);

    canvas.click(300.0, 22.0);
    assert_eq!(style(&canvas), ConnectionStyle::Selected);
}

#[rstest]
fn stale_selection_is_pruned(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    canvas.click(10.0, 10.0);
    assert!(canvas.model.remove_node(ids[0]));
    canvas.send(move_to(900.0, 900.0));

    assert!(canvas.controller.view().selection.is_empty());
}

#[rstest]
fn unbound_keys_are_left_to_the_caller(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, _) = three;

    let outcome = canvas.send(key(Key::Char('g')));

    assert!(!outcome.handled);
    assert_eq!(canvas.recorder.view_changes, 0);
}

#[rstest]
fn group_selection_groups_selected_nodes(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;

    assert_eq!(
        canvas
            .controller
            .group_selection(&mut canvas.model, "empty")
            .expect("no-op"),
        None
    );

    canvas.click(10.0, 10.0);
    canvas.send(down_with(410.0, 10.0, CTRL));
    canvas.send(up(410.0, 10.0));
    let group = canvas
        .controller
        .group_selection(&mut canvas.model, "pair")
        .expect("group")
        .expect("group id");

    assert_eq!(canvas.model.group(group).expect("group").name(), "pair");
    assert_eq!(canvas.model.group_members(group), vec![ids[0], ids[1]]);

    canvas
        .controller
        .ungroup_selection(&mut canvas.model)
        .expect("ungroup");
    assert!(canvas.model.group_members(group).is_empty());
}

#[rstest]
fn tag_and_collapse_commands_apply_to_selection(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    canvas.click(10.0, 10.0);

    canvas
        .controller
        .tag_selection(&mut canvas.model, "todo")
        .expect("tag");
    assert!(canvas.model.node(ids[0]).expect("a").has_tag("todo"));
    assert!(!canvas.model.node(ids[1]).expect("b").has_tag("todo"));

    canvas
        .controller
        .untag_selection(&mut canvas.model, "todo")
        .expect("untag");
    assert!(!canvas.model.node(ids[0]).expect("a").has_tag("todo"));

    canvas
        .controller
        .toggle_collapse_selection(&mut canvas.model)
        .expect("collapse");
    assert!(canvas.model.node(ids[0]).expect("a").collapsed());
}

#[rstest]
fn bring_selection_to_front_keeps_relative_order(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    canvas.controller.select_all(&canvas.model);
    canvas.send(down_with(10.0, 310.0, CTRL));
    canvas.send(up(10.0, 310.0));
    // A and B stay selected; C was toggled off.

    canvas
        .controller
        .bring_selection_to_front(&mut canvas.model)
        .expect("front");

    let order = canvas
        .model
        .nodes_in_z_order()
        .into_iter()
        .map(|node| node.id())
        .collect::<Vec<_>>();
    assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
}

#[rstest]
fn select_all_respects_filter(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    canvas.model.add_tag(ids[1], "keep").expect("tag");
    let mut filter = VisibilityFilter::default();
    filter.tags.insert("keep".to_owned());
    canvas.controller.set_filter(filter);

    canvas.controller.select_all(&canvas.model);

    let selected = canvas.controller.view().selected_nodes().collect::<Vec<_>>();
    assert_eq!(selected, vec![ids[1]]);
}

#[rstest]
fn delete_selection_reports_removed_count(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, _) = three;
    canvas.controller.select_all(&canvas.model);

    assert_eq!(canvas.controller.delete_selection(&mut canvas.model), 3);
    assert!(canvas.model.document().is_empty());
}

#[rstest]
fn collapsed_away_nodes_leave_the_selection(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    let (a, c) = (ids[0], ids[2]);
    canvas
        .model
        .add_connection(a, c, ConnectionKind::Strong)
        .expect("a->c");
    canvas.click(10.0, 310.0);
    assert!(canvas.controller.view().is_node_selected(c));
    canvas.model.set_collapsed(a, true).expect("collapse");

    canvas.send(down_with(10.0, 10.0, CTRL));
    canvas.send(move_to(110.0, 10.0));
    canvas.send(up(110.0, 10.0));

    assert_eq!(canvas.position(a), Point::new(100.0, 0.0));
    assert_eq!(canvas.position(c), Point::new(0.0, 300.0));
    let selected = canvas.controller.view().selected_nodes().collect::<Vec<_>>();
    assert_eq!(selected, vec![a]);

    canvas.send(key(Key::Delete));
    assert!(!canvas.model.document().contains_node(a));
    assert!(canvas.model.document().contains_node(c));
}

#[rstest]
fn filtered_out_nodes_are_not_deleted(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    canvas.click(410.0, 10.0);
    canvas.model.add_tag(ids[0], "keep").expect("tag");
    let mut filter = VisibilityFilter::default();
    filter.tags.insert("keep".to_owned());
    canvas.controller.set_filter(filter);

    assert_eq!(canvas.controller.delete_selection(&mut canvas.model), 0);
    assert!(canvas.model.document().contains_node(ids[1]));
}

#[rstest]
fn group_collapse_command_folds_and_unfolds(three: (Canvas, Vec<NodeId>)) {
    let (mut canvas, ids) = three;
    let (a, b) = (ids[0], ids[1]);
    canvas.click(10.0, 10.0);
    canvas.send(down_with(410.0, 10.0, CTRL));
    canvas.send(up(410.0, 10.0));
    let group = canvas
        .controller
        .group_selection(&mut canvas.model, "pair")
        .expect("group")
        .expect("group id");

    let touched = canvas
        .controller
        .toggle_group_collapse_selection(&mut canvas.model)
        .expect("collapse");
    assert_eq!(touched, 1);
    assert!(canvas.model.group(group).expect("group").collapsed());
    assert!(!canvas.model.is_node_visible(b));
    let selected = canvas.controller.view().selected_nodes().collect::<Vec<_>>();
    assert_eq!(selected, vec![a]);

    canvas
        .controller
        .toggle_group_collapse_selection(&mut canvas.model)
        .expect("expand");
    assert!(!canvas.model.group(group).expect("group").collapsed());
    assert!(canvas.model.is_node_visible(b));
}
