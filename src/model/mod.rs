// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document holds nodes, connections and groups plus the saved viewport.

pub mod connection;
pub mod document;
pub mod group;
pub mod ids;
pub mod node;
pub mod object_ref;
pub mod viewport;

pub use connection::{Connection, ConnectionKind, ParseConnectionKindError};
pub use document::Document;
pub use group::{is_valid_color, palette_color, parse_color, Group, GROUP_PALETTE};
pub use ids::{
    ConnectionId, ConnectionIdTag, GroupId, GroupIdTag, Id, IdCounters, IdError, IdKind, NodeId,
    NodeIdTag,
};
pub use node::{Node, NodeSizing};
pub use object_ref::{ObjectRef, ParseObjectRefError};
pub use viewport::{Viewport, ZoomLimits};
