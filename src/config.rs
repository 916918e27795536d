// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor settings loaded from a JSON file. Every section and field is optional.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{Size, SnapConfig};
use crate::interact::InteractionConfig;
use crate::model::{NodeSizing, ZoomLimits};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub snap: SnapConfig,
    pub nodes: NodeConfig,
    pub zoom: ZoomLimits,
    pub connections: ConnectionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub default_width: f64,
    pub default_height: f64,
    pub auto_fit: bool,
    pub char_width: f64,
    pub padding: f64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let sizing = NodeSizing::default();
        Self {
            default_width: sizing.default_size.width,
            default_height: sizing.default_size.height,
            auto_fit: sizing.auto_fit,
            char_width: sizing.char_width,
            padding: sizing.padding,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Routing grid for connection elbows; 0 disables quantization.
    pub grid: f64,
    /// Hit radius around a connection, in screen units.
    pub hit_tolerance: f64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            grid: 20.0,
            hit_tolerance: 6.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {path:?}: {source}"),
            Self::Parse { path, source } => write!(f, "invalid config {path:?}: {source}"),
            Self::Invalid { field, reason } => write!(f, "invalid config value {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

impl EditorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        let non_negative = |value: f64| value.is_finite() && value >= 0.0;

        if !positive(self.nodes.default_width) || !positive(self.nodes.default_height) {
            return Err(ConfigError::Invalid {
                field: "nodes.default_width/default_height",
                reason: "must be positive",
            });
        }
        if !non_negative(self.nodes.char_width) || !non_negative(self.nodes.padding) {
            return Err(ConfigError::Invalid {
                field: "nodes.char_width/padding",
                reason: "must not be negative",
            });
        }
        if !positive(self.zoom.min) || !positive(self.zoom.max) || self.zoom.min > self.zoom.max {
            return Err(ConfigError::Invalid {
                field: "zoom.min/max",
                reason: "must be positive with min <= max",
            });
        }
        if !positive(self.zoom.step) {
            return Err(ConfigError::Invalid {
                field: "zoom.step",
                reason: "must be positive",
            });
        }
        if !non_negative(self.snap.threshold) {
            return Err(ConfigError::Invalid {
                field: "snap.threshold",
                reason: "must not be negative",
            });
        }
        if !non_negative(self.connections.grid) || !non_negative(self.connections.hit_tolerance) {
            return Err(ConfigError::Invalid {
                field: "connections.grid/hit_tolerance",
                reason: "must not be negative",
            });
        }
        Ok(())
    }

    pub fn node_sizing(&self) -> NodeSizing {
        NodeSizing {
            default_size: self.default_node_size(),
            auto_fit: self.nodes.auto_fit,
            char_width: self.nodes.char_width,
            padding: self.nodes.padding,
        }
    }

    pub fn interaction(&self) -> InteractionConfig {
        InteractionConfig {
            snap: self.snap,
            zoom: self.zoom,
            default_node_size: self.default_node_size(),
            grid: self.connections.grid,
            hit_tolerance: self.connections.hit_tolerance,
        }
    }

    fn default_node_size(&self) -> Size {
        Size::new(self.nodes.default_width, self.nodes.default_height)
    }
}
