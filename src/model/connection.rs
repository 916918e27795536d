// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{ConnectionId, NodeId};

/// Strong connections form the hierarchy that collapse and subtree queries follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ConnectionKind {
    #[default]
    Strong,
    Weak,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Strong => Self::Weak,
            Self::Weak => Self::Strong,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConnectionKindError(pub String);

impl fmt::Display for ParseConnectionKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown connection kind {:?} (expected strong or weak)", self.0)
    }
}

impl std::error::Error for ParseConnectionKindError {}

impl FromStr for ConnectionKind {
    type Err = ParseConnectionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strong" => Ok(Self::Strong),
            "weak" => Ok(Self::Weak),
            other => Err(ParseConnectionKindError(other.to_owned())),
        }
    }
}

/// A directed link between two nodes of the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    source_id: NodeId,
    target_id: NodeId,
    kind: ConnectionKind,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        source_id: NodeId,
        target_id: NodeId,
        kind: ConnectionKind,
    ) -> Self {
        Self {
            id,
            source_id,
            target_id,
            kind,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn source_id(&self) -> NodeId {
        self.source_id
    }

    pub fn target_id(&self) -> NodeId {
        self.target_id
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    pub fn touches(&self, node_id: NodeId) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }

    pub fn same_link(&self, source_id: NodeId, target_id: NodeId, kind: ConnectionKind) -> bool {
        self.source_id == source_id && self.target_id == target_id && self.kind == kind
    }
}
