// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for documents on disk.
//!
//! A document lives in a single file. Saves go through a temp file in the same directory and an
//! atomic rename, so a failed save never leaves a half-written document behind.

pub mod document_file;

pub use document_file::{DocumentFile, StoreError, WriteDurability};
