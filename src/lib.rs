// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nodemap: a mind-map and roadmap canvas.
//!
//! The document model and its validated operations live in [`model`] and [`ops`]; pointer and
//! keyboard interaction in [`interact`]; snapping and connection routing in [`geometry`].
//! [`format`] and [`store`] read and write documents, and [`tui`] hosts everything in a
//! terminal.

pub mod config;
pub mod format;
pub mod geometry;
pub mod interact;
pub mod model;
pub mod ops;
pub mod store;
pub mod tui;
