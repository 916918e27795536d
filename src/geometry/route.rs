// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{Point, Rect};

/// Orthogonal elbow route: horizontal out of the source, then vertical into the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPath {
    pub start: Point,
    pub corner: Point,
    pub end: Point,
}

impl ConnectionPath {
    pub fn segments(&self) -> [(Point, Point); 2] {
        [(self.start, self.corner), (self.corner, self.end)]
    }

    /// Shortest distance from `point` to either segment of the route.
    pub fn distance_to(&self, point: Point) -> f64 {
        self.segments()
            .into_iter()
            .map(|(a, b)| distance_to_segment(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn bounds(&self) -> Rect {
        let first = Rect::from_corners(self.start, self.corner);
        first.union(&Rect::from_corners(self.corner, self.end))
    }
}

fn quantize(value: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        (value / grid).round() * grid
    } else {
        value
    }
}

/// Border coordinate where a ray from the rect center toward `toward` leaves the rect along one
/// axis; the center itself when `toward` lies within the rect's span.
fn exit_coordinate(start: f64, end: f64, center: f64, toward: f64) -> f64 {
    if toward > end {
        end
    } else if toward < start {
        start
    } else {
        center
    }
}

pub fn route_connection(source: &Rect, target: &Rect, grid: f64) -> ConnectionPath {
    let from = source.center();
    let to = target.center();

    let corner = Point::new(quantize(to.x, grid), quantize(from.y, grid));

    let start_x = exit_coordinate(source.left(), source.right(), from.x, corner.x);
    let start = Point::new(quantize(start_x, grid), corner.y);

    let end_y = exit_coordinate(target.top(), target.bottom(), to.y, corner.y);
    let end = Point::new(corner.x, quantize(end_y, grid));

    ConnectionPath { start, corner, end }
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = b.delta_from(a);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return point.distance_to(a);
    }
    let (apx, apy) = point.delta_from(a);
    let t = ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0);
    point.distance_to(a.offset(abx * t, aby * t))
}
