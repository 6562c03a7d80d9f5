// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! STL importer - volume and extents of a mesh file

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{MeshError, MeshResult};
use super::stl::{StlFormat, StlPayload};
use crate::geometry::VolumeAccumulator;

/// Volume and size of a part, measured from its mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub format: StlFormat,
    /// Enclosed volume in millilitres, never negative
    pub volume_ml: f64,
    /// Bounding box extents in millimetres, longest first
    pub dimensions_mm: [f64; 3],
    /// Accumulated signed volume before taking the magnitude. Negative for
    /// meshes wound inside-out.
    pub signed_volume_mm3: f64,
    pub facet_count: usize,
    pub skipped_lines: usize,
}

impl MeshSummary {
    pub fn largest_dimension_mm(&self) -> f64 {
        self.dimensions_mm[0]
    }

    /// Whether the facet winding produced a negative volume
    pub fn is_inverted(&self) -> bool {
        self.signed_volume_mm3 < 0.0
    }
}

/// Measure an in-memory STL payload in a single pass.
///
/// Payloads that are not valid STL still produce a summary, possibly with
/// zero volume and zero extents.
pub fn extract_mesh(data: &[u8]) -> MeshSummary {
    let payload = StlPayload::parse(data);
    let mut acc = VolumeAccumulator::new();

    let mut facets = payload.facets();
    for facet in facets.by_ref() {
        acc.add_facet(&facet);
    }
    for vertex in facets.stray_vertices() {
        acc.add_stray_vertex(vertex);
    }

    let summary = MeshSummary {
        format: payload.format(),
        volume_ml: acc.volume_ml(),
        dimensions_mm: acc.bounding_box().dimensions_descending(),
        signed_volume_mm3: acc.signed_volume_mm3(),
        facet_count: acc.facet_count(),
        skipped_lines: facets.skipped_lines(),
    };
    debug!(
        format = summary.format.as_str(),
        facets = summary.facet_count,
        skipped = summary.skipped_lines,
        volume_ml = summary.volume_ml,
        "measured STL payload"
    );
    summary
}

/// Read an STL file and measure it
pub fn load_mesh_summary(path: impl AsRef<Path>) -> MeshResult<MeshSummary> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = data.len(), "read mesh file");
    Ok(extract_mesh(&data))
}
