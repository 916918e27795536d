// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{
    ConnectionId, ConnectionIdTag, GroupId, GroupIdTag, IdError, IdKind, NodeId, NodeIdTag,
};

/// Reference to any addressable object in a document.
///
/// The display form is the referenced id's own form (`n:3`, `c:7`, `g:1`), so the prefix
/// decides the variant when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Node(NodeId),
    Connection(ConnectionId),
    Group(GroupId),
}

impl ObjectRef {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Node(_) => NodeIdTag::NAME,
            Self::Connection(_) => ConnectionIdTag::NAME,
            Self::Group(_) => GroupIdTag::NAME,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_connection(&self) -> Option<ConnectionId> {
        match self {
            Self::Connection(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<NodeId> for ObjectRef {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<ConnectionId> for ObjectRef {
    fn from(id: ConnectionId) -> Self {
        Self::Connection(id)
    }
}

impl From<GroupId> for ObjectRef {
    fn from(id: GroupId) -> Self {
        Self::Group(id)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "{id}"),
            Self::Connection(id) => write!(f, "{id}"),
            Self::Group(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseObjectRefError {
    UnknownPrefix(String),
    InvalidId(IdError),
}

impl fmt::Display for ParseObjectRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPrefix(prefix) => {
                write!(f, "object ref prefix must be n, c or g (found {prefix:?})")
            }
            Self::InvalidId(err) => write!(f, "invalid object id: {err}"),
        }
    }
}

impl std::error::Error for ParseObjectRefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            Self::UnknownPrefix(_) => None,
        }
    }
}

impl FromStr for ObjectRef {
    type Err = ParseObjectRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = s.split_once(':').map(|(prefix, _)| prefix).unwrap_or(s);
        match prefix {
            "n" => s.parse().map(Self::Node),
            "c" => s.parse().map(Self::Connection),
            "g" => s.parse().map(Self::Group),
            other => return Err(ParseObjectRefError::UnknownPrefix(other.to_owned())),
        }
        .map_err(ParseObjectRefError::InvalidId)
    }
}
