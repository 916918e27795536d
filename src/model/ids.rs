// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Identifies what an [`Id`] points at and how it is written out.
pub trait IdKind {
    /// Short prefix used in the display form, e.g. `n` for `n:3`.
    const PREFIX: &'static str;
    /// Human-readable object kind for error messages.
    const NAME: &'static str;
}

/// A numeric identifier, unique per document and per kind.
///
/// Ids are allocated monotonically by the document and never reused, so a stale id held by the
/// view state can never alias a newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> u64 {
        self.value
    }
}

impl<T: IdKind> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", T::PREFIX, self.value)
    }
}

impl<T: IdKind> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        let Some((prefix, number)) = s.split_once(':') else {
            return Err(IdError::MissingPrefix);
        };
        if prefix != T::PREFIX {
            return Err(IdError::WrongPrefix {
                expected: T::PREFIX,
                found: prefix.to_owned(),
            });
        }
        number
            .parse::<u64>()
            .map(Self::new)
            .map_err(|_| IdError::InvalidNumber(number.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    MissingPrefix,
    WrongPrefix {
        expected: &'static str,
        found: String,
    },
    InvalidNumber(String),
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::MissingPrefix => f.write_str("id must look like <prefix>:<number>"),
            Self::WrongPrefix { expected, found } => {
                write!(f, "expected id prefix {expected:?}, found {found:?}")
            }
            Self::InvalidNumber(value) => write!(f, "invalid id number {value:?}"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

impl IdKind for NodeIdTag {
    const PREFIX: &'static str = "n";
    const NAME: &'static str = "node";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectionIdTag {}
pub type ConnectionId = Id<ConnectionIdTag>;

impl IdKind for ConnectionIdTag {
    const PREFIX: &'static str = "c";
    const NAME: &'static str = "connection";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupIdTag {}
pub type GroupId = Id<GroupIdTag>;

impl IdKind for GroupIdTag {
    const PREFIX: &'static str = "g";
    const NAME: &'static str = "group";
}

/// Next free value per id kind. Persisted with the document so reloading never reissues an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCounters {
    pub node: u64,
    pub connection: u64,
    pub group: u64,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            node: 1,
            connection: 1,
            group: 1,
        }
    }
}

impl IdCounters {
    pub fn peek_node(&self) -> NodeId {
        NodeId::new(self.node)
    }

    pub fn peek_connection(&self) -> ConnectionId {
        ConnectionId::new(self.connection)
    }

    pub fn peek_group(&self) -> GroupId {
        GroupId::new(self.group)
    }

    /// Raises the counters so they sit above every id already in use.
    pub fn cover(&mut self, node: Option<u64>, connection: Option<u64>, group: Option<u64>) {
        let above = |counter: &mut u64, used: Option<u64>| {
            if let Some(used) = used {
                *counter = (*counter).max(used.saturating_add(1));
            }
        };
        above(&mut self.node, node);
        above(&mut self.connection, connection);
        above(&mut self.group, group);
    }
}
