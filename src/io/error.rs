// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Error types for mesh file access

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh file operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Failures reading a mesh file.
///
/// Parsing never fails: malformed content degrades to fewer facets, so
/// only the read itself can go wrong.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesh file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
