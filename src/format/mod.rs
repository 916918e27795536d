// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document file format.
//!
//! Documents are stored as pretty-printed JSON with a `format`/`version` marker. Files without a
//! version marker are read as legacy project files (see [`legacy`]).

use std::fmt;

use crate::model::{Document, NodeSizing, ObjectRef};

pub mod json;
pub mod legacy;

pub use json::{serialize, FORMAT_NAME, FORMAT_VERSION};

#[derive(Debug)]
pub enum FormatError {
    /// Not well-formed, or violating a document rule. `line`/`column` are 1-based and 0 when the
    /// problem is not tied to a source position.
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
    /// A version marker is present but its major version is not readable.
    SchemaVersion { found: String },
    /// An object refers to one that is not in the document.
    DanglingReference { from: ObjectRef, missing: ObjectRef },
    Encode(serde_json::Error),
}

impl FormatError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        Self::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed {
                line: 0, message, ..
            } => write!(f, "malformed document: {message}"),
            Self::Malformed {
                line,
                column,
                message,
            } => write!(f, "malformed document at {line}:{column}: {message}"),
            Self::SchemaVersion { found } => {
                write!(f, "unsupported document version {found:?} (expected {FORMAT_VERSION})")
            }
            Self::DanglingReference { from, missing } => {
                write!(f, "{from} refers to missing {} {missing}", missing.kind_name())
            }
            Self::Encode(err) => write!(f, "cannot encode document: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

/// How a file was recognized on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Current,
    Legacy,
}

/// Decodes a document in either format, sizing legacy nodes with the default [`NodeSizing`].
pub fn deserialize(text: &str) -> Result<Document, FormatError> {
    deserialize_with(text, &NodeSizing::default()).map(|(document, _)| document)
}

/// Decodes a document in either format, reporting which one was found.
///
/// Legacy files carry no node sizes, so `sizing` decides them.
pub fn deserialize_with(
    text: &str,
    sizing: &NodeSizing,
) -> Result<(Document, SourceFormat), FormatError> {
    if json::has_version_marker(text)? {
        json::decode(text).map(|document| (document, SourceFormat::Current))
    } else {
        legacy::import(text, sizing).map(|document| (document, SourceFormat::Legacy))
    }
}
