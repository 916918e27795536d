// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Alignment snapping for a node being dragged.
//!
//! The moving rectangle's features (start edge, center, end edge) are compared per axis against
//! the same features of every other rectangle. Horizontal and vertical corrections are resolved
//! independently, so corner alignment falls out of the two axes snapping at once.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    /// Maximum distance (canvas units, inclusive) between two features for them to snap.
    pub threshold: f64,
    /// Also pair opposite edges (left with right, top with bottom) so nodes can be placed
    /// flush against each other.
    pub abut: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 8.0,
            abut: false,
        }
    }
}

/// Orientation of a guide line: a vertical guide marks an x alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapAxis {
    Vertical,
    Horizontal,
}

/// Transient alignment line drawn while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide<K> {
    pub axis: SnapAxis,
    /// x for vertical guides, y for horizontal ones.
    pub coordinate: f64,
    pub from: f64,
    pub to: f64,
    /// The node the moving node aligned with.
    pub anchor: K,
}

pub type SnapGuides<K> = SmallVec<[SnapGuide<K>; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult<K> {
    pub position: Point,
    pub guides: SnapGuides<K>,
}

impl<K> SnapResult<K> {
    pub fn unchanged(position: Point) -> Self {
        Self {
            position,
            guides: SmallVec::new(),
        }
    }

    pub fn snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Feature {
    Start,
    Center,
    End,
}

impl Feature {
    fn pairs_with(self, other: Feature, abut: bool) -> bool {
        if self == other {
            return true;
        }
        abut && matches!(
            (self, other),
            (Feature::Start, Feature::End) | (Feature::End, Feature::Start)
        )
    }
}

fn features(start: f64, len: f64) -> [(Feature, f64); 3] {
    [
        (Feature::Start, start),
        (Feature::Center, start + len / 2.0),
        (Feature::End, start + len),
    ]
}

#[derive(Debug, Clone, Copy)]
struct AxisMatch<K> {
    distance: f64,
    anchor: K,
    moving: Feature,
    target: Feature,
    correction: f64,
    coordinate: f64,
    anchor_rect: Rect,
}

impl<K: Ord> AxisMatch<K> {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.anchor.cmp(&other.anchor))
            .then_with(|| self.moving.cmp(&other.moving))
            .then_with(|| self.target.cmp(&other.target))
    }
}

fn best_axis_match<K: Ord + Copy>(
    moving_start: f64,
    moving_len: f64,
    others: &[(K, Rect)],
    project: impl Fn(&Rect) -> (f64, f64),
    config: &SnapConfig,
) -> Option<AxisMatch<K>> {
    let mut best: Option<AxisMatch<K>> = None;

    for (anchor, rect) in others {
        let (other_start, other_len) = project(rect);
        for (moving_feature, moving_value) in features(moving_start, moving_len) {
            for (target_feature, target_value) in features(other_start, other_len) {
                if !moving_feature.pairs_with(target_feature, config.abut) {
                    continue;
                }
                let correction = target_value - moving_value;
                let distance = correction.abs();
                if !distance.is_finite() || distance > config.threshold {
                    continue;
                }

                let candidate = AxisMatch {
                    distance,
                    anchor: *anchor,
                    moving: moving_feature,
                    target: target_feature,
                    correction,
                    coordinate: target_value,
                    anchor_rect: *rect,
                };
                let replace = match &best {
                    None => true,
                    Some(current) => candidate.cmp_priority(current) == Ordering::Less,
                };
                if replace {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

/// Snaps a rectangle of `moving_size` proposed at `candidate` against `others`.
///
/// `others` must not contain the moving node itself; callers pass only visible nodes. The result
/// is independent of the iteration order of `others`: the closest feature per axis wins, ties go
/// to the lowest anchor key and then to the earliest feature (start, center, end).
pub fn compute_snap<K, I>(
    moving_size: Size,
    candidate: Point,
    others: I,
    config: &SnapConfig,
) -> SnapResult<K>
where
    K: Ord + Copy,
    I: IntoIterator<Item = (K, Rect)>,
{
    if !config.enabled || config.threshold <= 0.0 || !candidate.is_finite() {
        return SnapResult::unchanged(candidate);
    }

    let others = others.into_iter().collect::<Vec<_>>();
    if others.is_empty() {
        return SnapResult::unchanged(candidate);
    }

    let x_match = best_axis_match(
        candidate.x,
        moving_size.width,
        &others,
        |rect| (rect.left(), rect.size.width),
        config,
    );
    let y_match = best_axis_match(
        candidate.y,
        moving_size.height,
        &others,
        |rect| (rect.top(), rect.size.height),
        config,
    );

    let mut position = candidate;
    if let Some(m) = &x_match {
        position.x += m.correction;
    }
    if let Some(m) = &y_match {
        position.y += m.correction;
    }

    let moved = Rect::new(position, moving_size);
    let mut guides = SnapGuides::new();
    if let Some(m) = x_match {
        guides.push(SnapGuide {
            axis: SnapAxis::Vertical,
            coordinate: m.coordinate,
            from: moved.top().min(m.anchor_rect.top()),
            to: moved.bottom().max(m.anchor_rect.bottom()),
            anchor: m.anchor,
        });
    }
    if let Some(m) = y_match {
        guides.push(SnapGuide {
            axis: SnapAxis::Horizontal,
            coordinate: m.coordinate,
            from: moved.left().min(m.anchor_rect.left()),
            to: moved.right().max(m.anchor_rect.right()),
            anchor: m.anchor,
        });
    }

    SnapResult { position, guides }
}
