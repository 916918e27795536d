// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use nodemap::geometry::Point;
use nodemap::model::{ConnectionKind, NodeId};
use nodemap::ops::GraphModel;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 10 x 10 nodes.
    Small,
    /// 25 x 20 nodes.
    Medium,
    /// 40 x 50 nodes.
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn dims(self) -> (usize, usize) {
        match self {
            Self::Small => (10, 10),
            Self::Medium => (25, 20),
            Self::Large => (40, 50),
        }
    }
}

pub const SPACING_X: f64 = 220.0;
pub const SPACING_Y: f64 = 110.0;

/// A grid of nodes where every row is a strong chain and every fifth column links weakly
/// to the row below.
pub fn grid_model(case: Case) -> (GraphModel, Vec<NodeId>) {
    let (columns, rows) = case.dims();
    let mut model = GraphModel::new();
    let mut ids = Vec::with_capacity(columns * rows);

    for row in 0..rows {
        for column in 0..columns {
            let position = Point::new(column as f64 * SPACING_X, row as f64 * SPACING_Y);
            let label = format!("node {row}.{column}");
            ids.push(model.add_node(position, label).expect("add node"));
        }
    }
    for row in 0..rows {
        for column in 1..columns {
            let parent = ids[row * columns + column - 1];
            let child = ids[row * columns + column];
            model
                .add_connection(parent, child, ConnectionKind::Strong)
                .expect("strong link");
        }
    }
    for row in 1..rows {
        for column in (0..columns).step_by(5) {
            let upper = ids[(row - 1) * columns + column];
            let lower = ids[row * columns + column];
            model
                .add_connection(upper, lower, ConnectionKind::Weak)
                .expect("weak link");
        }
    }
    model.take_changes();
    (model, ids)
}
