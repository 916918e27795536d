// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::GroupId;

/// Colors handed out to new groups in order, wrapping around.
pub const GROUP_PALETTE: [&str; 15] = [
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4", "#00BCD4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800",
];

pub fn palette_color(index: usize) -> &'static str {
    GROUP_PALETTE[index % GROUP_PALETTE.len()]
}

/// `#RRGGBB`, case-insensitive.
pub fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn parse_color(color: &str) -> Option<(u8, u8, u8)> {
    if !is_valid_color(color) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&color[range], 16).ok();
    Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    name: String,
    color: String,
    /// Folds every member except the anchor out of view.
    collapsed: bool,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            collapsed: false,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_color, palette_color, parse_color, GROUP_PALETTE};

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), "#F44336");
        assert_eq!(palette_color(GROUP_PALETTE.len()), "#F44336");
        assert!(GROUP_PALETTE.iter().all(|c| is_valid_color(c)));
    }

    #[test]
    fn colors_must_be_hex_triplets() {
        assert_eq!(parse_color("#ff9800"), Some((0xff, 0x98, 0x00)));
        assert!(!is_valid_color("red"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("#12345g"));
    }
}
