// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Triangle facets as read from a mesh file

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Vertex position in millimetres
pub type Vertex = Point3<f64>;

/// Triangle defined by three ordered vertices.
///
/// The winding order decides the sign of the facet's volume contribution;
/// any normal stored alongside the facet in the source file is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub vertices: [Vertex; 3],
}

impl Facet {
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    pub fn from_coords(coords: [[f64; 3]; 3]) -> Self {
        let [a, b, c] = coords;
        Self::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    /// Signed volume of the tetrahedron spanned by the facet and the origin
    pub fn signed_volume(&self) -> f64 {
        let [v1, v2, v3] = &self.vertices;
        v1.coords.dot(&v2.coords.cross(&v3.coords)) / 6.0
    }

    /// Same triangle with the opposite winding
    pub fn reversed(&self) -> Self {
        let [v1, v2, v3] = self.vertices;
        Self::new(v1, v3, v2)
    }
}
