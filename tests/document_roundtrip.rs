// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use nodemap::format::{self, legacy, SourceFormat};
use nodemap::geometry::Point;
use nodemap::interact::{
    Controller, InputEvent, InteractionConfig, Key, Modifiers, PointerButton, PresentationAdapter,
};
use nodemap::model::{ConnectionKind, GroupId, NodeId, NodeSizing};
use nodemap::ops::{ChangeEvent, GraphModel};
use nodemap::store::DocumentFile;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

#[derive(Default)]
struct CountingAdapter {
    changes: usize,
}

impl PresentationAdapter for CountingAdapter {
    fn notify(&mut self, _change: &ChangeEvent) {
        self.changes += 1;
    }
}

fn send(
    model: &mut GraphModel,
    controller: &mut Controller,
    adapter: &mut CountingAdapter,
    event: InputEvent,
) {
    controller.handle(model, event, adapter);
}

fn primary(point: Point, down: bool) -> InputEvent {
    if down {
        InputEvent::PointerDown {
            point,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    } else {
        InputEvent::PointerUp {
            point,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }
}

#[test]
fn legacy_project_imports_with_repairs() {
    let text = read_fixture("legacy_project.json");

    let (document, report) =
        legacy::import_with_report(&text, &NodeSizing::default()).expect("import");

    assert_eq!(document.node_count(), 4);
    assert_eq!(document.connection_count(), 4);
    assert_eq!(report.dangling, 1);
    assert_eq!(report.weakened, 1);

    let weak = document
        .connections()
        .filter(|connection| connection.kind() == ConnectionKind::Weak)
        .map(|connection| (connection.source_id(), connection.target_id()))
        .collect::<Vec<_>>();
    assert_eq!(weak, vec![(NodeId::new(4), NodeId::new(1))]);

    let group = document.group(GroupId::new(1)).expect("group");
    assert_eq!(group.name(), "Go-to-market");
    assert_eq!(group.color(), "#E67E22");
    let launch = document.node(NodeId::new(1)).expect("launch");
    assert_eq!(launch.group_id(), Some(GroupId::new(1)));
    assert!(launch.has_tag("q3"));
    assert_eq!(document.node(NodeId::new(3)).expect("eng").group_id(), None);
}

#[test]
fn imported_legacy_project_survives_a_save_and_reload() {
    let text = read_fixture("legacy_project.json");
    let (imported, source) =
        format::deserialize_with(&text, &NodeSizing::default()).expect("deserialize");
    assert_eq!(source, SourceFormat::Legacy);

    let saved = format::serialize(&imported).expect("serialize");
    let (reloaded, source) =
        format::deserialize_with(&saved, &NodeSizing::default()).expect("reload");

    assert_eq!(source, SourceFormat::Current);
    assert_eq!(reloaded, imported);
}

#[test]
fn editing_session_persists_through_the_store() {
    let path = std::env::temp_dir().join(format!(
        "nodemap-roundtrip-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    let file = DocumentFile::new(&path);
    let document = file.load_or_new().expect("new");
    let mut model = GraphModel::from_document(document, NodeSizing::default());
    let mut controller = Controller::new(InteractionConfig {
        snap: nodemap::geometry::SnapConfig {
            enabled: false,
            ..Default::default()
        },
        ..InteractionConfig::default()
    });
    let mut adapter = CountingAdapter::default();

    // Create two nodes by double-pressing empty canvas, naming each one.
    for (point, label) in [
        (Point::new(100.0, 100.0), "Root"),
        (Point::new(500.0, 100.0), "Leaf"),
    ] {
        send(&mut model, &mut controller, &mut adapter, InputEvent::DoublePress { point });
        for c in label.chars() {
            send(
                &mut model,
                &mut controller,
                &mut adapter,
                InputEvent::Key {
                    key: Key::Char(c),
                    modifiers: Modifiers::NONE,
                },
            );
        }
        send(
            &mut model,
            &mut controller,
            &mut adapter,
            InputEvent::Key {
                key: Key::Enter,
                modifiers: Modifiers::NONE,
            },
        );
    }
    assert_eq!(model.document().node_count(), 2);

    // Draw a strong connection from Root to Leaf.
    controller.set_connect_mode(true);
    send(&mut model, &mut controller, &mut adapter, primary(Point::new(100.0, 100.0), true));
    send(
        &mut model,
        &mut controller,
        &mut adapter,
        InputEvent::PointerMove {
            point: Point::new(500.0, 100.0),
        },
    );
    send(&mut model, &mut controller, &mut adapter, primary(Point::new(500.0, 100.0), false));
    controller.set_connect_mode(false);
    assert_eq!(model.document().connection_count(), 1);
    assert!(adapter.changes > 0);

    file.save(model.document()).expect("save");
    let loaded = file.load().expect("load");
    let _ = fs::remove_file(&path);

    assert_eq!(&loaded, model.document());
    let labels = loaded
        .nodes()
        .map(|node| node.label().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["Root".to_owned(), "Leaf".to_owned()]);
    let connection = loaded.connections().next().expect("connection");
    assert_eq!(connection.kind(), ConnectionKind::Strong);
}
