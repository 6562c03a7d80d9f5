// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Bounding box utilities

use super::Vertex;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_vertices<'a>(vertices: impl IntoIterator<Item = &'a Vertex>) -> Self {
        let mut bbox = Self::empty();
        for vertex in vertices {
            bbox.expand_to_include(vertex);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Extent along x, y and z. An axis whose max does not exceed its min
    /// (empty box, single vertex) has extent 0.
    pub fn size(&self) -> [f64; 3] {
        let extent = |min: f64, max: f64| if max > min { max - min } else { 0.0 };
        [
            extent(self.min.x, self.max.x),
            extent(self.min.y, self.max.y),
            extent(self.min.z, self.max.z),
        ]
    }

    /// Extents sorted longest first, independent of part orientation
    pub fn dimensions_descending(&self) -> [f64; 3] {
        let mut dims = self.size();
        dims.sort_by(|a, b| b.total_cmp(a));
        dims
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
