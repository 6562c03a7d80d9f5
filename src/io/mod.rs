// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! I/O module - mesh file parsing and measurement

mod error;
mod importer;
pub mod stl;

pub use error::{MeshError, MeshResult};
pub use importer::{extract_mesh, load_mesh_summary, MeshSummary};
pub use stl::StlFormat;
