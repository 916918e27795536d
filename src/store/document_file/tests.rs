// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{DocumentFile, StoreError, WriteDurability};
use crate::format::FormatError;
use crate::geometry::Point;
use crate::model::{ConnectionKind, Document};
use crate::ops::GraphModel;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("nodemap-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("store")
}

fn sample_model() -> GraphModel {
    let mut model = GraphModel::new();
    let a = model.add_node(Point::new(0.0, 0.0), "alpha").expect("a");
    let b = model.add_node(Point::new(240.0, 80.0), "beta").expect("b");
    model
        .add_connection(a, b, ConnectionKind::Strong)
        .expect("connect");
    model
}

fn temp_files_in(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".nodemap.tmp."))
        .collect()
}

#[rstest]
#[case::best_effort(WriteDurability::BestEffort)]
#[case::durable(WriteDurability::Durable)]
fn save_then_load_round_trips(tmp: TempDir, #[case] durability: WriteDurability) {
    let file = DocumentFile::new(tmp.path().join("map.json")).with_durability(durability);
    let model = sample_model();

    file.save(model.document()).expect("save");
    let loaded = file.load().expect("load");

    assert_eq!(&loaded, model.document());
    assert!(temp_files_in(tmp.path()).is_empty());
}

#[rstest]
fn save_overwrites_existing_file(tmp: TempDir) {
    let file = DocumentFile::new(tmp.path().join("map.json"));
    file.save(&Document::new()).expect("first save");

    let model = sample_model();
    file.save(model.document()).expect("second save");

    assert_eq!(file.load().expect("load").node_count(), 2);
}

#[rstest]
fn load_or_new_starts_empty_for_missing_file(tmp: TempDir) {
    let file = DocumentFile::new(tmp.path().join("missing.json"));

    assert!(!file.exists());
    assert!(file.load_or_new().expect("new").is_empty());
    assert!(matches!(file.load(), Err(StoreError::Io { .. })));
}

#[rstest]
fn failed_load_leaves_model_untouched(tmp: TempDir) {
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, "{\"version\": \"1.0\", \"nodes\": [").expect("write");
    let file = DocumentFile::new(&path);
    let mut model = sample_model();
    let before = model.document().clone();
    let rev = model.rev();

    let err = file.load_into(&mut model).expect_err("broken file");

    assert!(matches!(
        err,
        StoreError::Format {
            source: FormatError::Malformed { .. },
            ..
        }
    ));
    assert_eq!(model.document(), &before);
    assert_eq!(model.rev(), rev);
}

#[rstest]
fn load_into_replaces_document(tmp: TempDir) {
    let file = DocumentFile::new(tmp.path().join("map.json"));
    let saved = sample_model();
    file.save(saved.document()).expect("save");

    let mut model = GraphModel::new();
    model
        .add_node(Point::new(5.0, 5.0), "scratch")
        .expect("scratch");
    let rev = model.rev();
    file.load_into(&mut model).expect("load into");

    assert_eq!(model.document(), saved.document());
    assert!(model.rev() > rev);
}

#[rstest]
fn legacy_files_are_imported_on_load(tmp: TempDir) {
    let path = tmp.path().join("old.json");
    std::fs::write(
        &path,
        r#"{"nodes": [{"id": 0, "text": "x", "pos_x": 1, "pos_y": 2}], "connections": []}"#,
    )
    .expect("write");

    let document = DocumentFile::new(&path).load().expect("load");

    assert_eq!(document.node_count(), 1);
}

#[cfg(unix)]
#[rstest]
fn save_refuses_symlinks(tmp: TempDir) {
    let target = tmp.path().join("real.json");
    std::fs::write(&target, "keep").expect("write");
    let link = tmp.path().join("link.json");
    std::os::unix::fs::symlink(&target, &link).expect("symlink");

    let err = DocumentFile::new(&link)
        .save(&Document::new())
        .expect_err("symlink");

    assert!(matches!(err, StoreError::SymlinkRefused { .. }));
    assert_eq!(std::fs::read_to_string(&target).expect("read"), "keep");
}

#[rstest]
fn save_into_missing_directory_fails_cleanly(tmp: TempDir) {
    let file = DocumentFile::new(tmp.path().join("nope").join("map.json"));

    assert!(matches!(
        file.save(&Document::new()),
        Err(StoreError::Io { .. })
    ));
}

#[rstest]
fn save_to_a_path_without_file_name_is_an_io_error(tmp: TempDir) {
    let file = DocumentFile::new(tmp.path().join(".."));

    match file.save(&Document::new()) {
        Err(StoreError::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::Other);
            assert_eq!(source.to_string(), "path has no file name");
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
