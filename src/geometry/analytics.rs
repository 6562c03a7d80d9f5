// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Single-pass volume and extent accumulation over a facet stream

use super::{BoundingBox, Facet, Vertex};

/// Cubic millimetres per millilitre
pub const MM3_PER_ML: f64 = 1000.0;

/// Running totals gathered while facets are streamed out of a mesh file.
///
/// Volume uses the divergence theorem: every facet adds the signed volume of
/// the tetrahedron it forms with the origin. For a closed, consistently
/// wound mesh the sum is the enclosed volume, with a sign that follows the
/// winding convention.
#[derive(Debug, Clone, Default)]
pub struct VolumeAccumulator {
    signed_volume_mm3: f64,
    bbox: BoundingBox,
    facet_count: usize,
}

impl VolumeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a facet's volume contribution and its vertices' extent
    pub fn add_facet(&mut self, facet: &Facet) {
        for vertex in &facet.vertices {
            self.bbox.expand_to_include(vertex);
        }
        self.signed_volume_mm3 += facet.signed_volume();
        self.facet_count += 1;
    }

    /// Widen the extent with a vertex that belongs to no complete facet
    pub fn add_stray_vertex(&mut self, vertex: &Vertex) {
        self.bbox.expand_to_include(vertex);
    }

    /// Raw accumulated sum, sign included
    pub fn signed_volume_mm3(&self) -> f64 {
        self.signed_volume_mm3
    }

    pub fn volume_ml(&self) -> f64 {
        self.signed_volume_mm3.abs() / MM3_PER_ML
    }

    pub fn facet_count(&self) -> usize {
        self.facet_count
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn unit_tetrahedron() -> Vec<Facet> {
        vec![
            Facet::from_coords([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]),
            Facet::from_coords([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
            Facet::from_coords([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]),
            Facet::from_coords([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
        ]
    }

    #[test]
    fn test_tetrahedron_volume() {
        let mut acc = VolumeAccumulator::new();
        for facet in unit_tetrahedron() {
            acc.add_facet(&facet);
        }

        assert!((acc.signed_volume_mm3() - 1.0 / 6.0).abs() < 1e-12);
        assert!((acc.volume_ml() - 1.0 / 6000.0).abs() < 1e-15);
        assert_eq!(acc.facet_count(), 4);
        assert_eq!(acc.bounding_box().size(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_inverted_tetrahedron_keeps_magnitude() {
        let mut acc = VolumeAccumulator::new();
        for facet in unit_tetrahedron() {
            acc.add_facet(&facet.reversed());
        }

        assert!(acc.signed_volume_mm3() < 0.0);
        assert!((acc.volume_ml() - 1.0 / 6000.0).abs() < 1e-15);
    }

    #[test]
    fn test_stray_vertex_only_widens_extent() {
        let mut acc = VolumeAccumulator::new();
        acc.add_stray_vertex(&Point3::new(0.0, 0.0, 0.0));
        acc.add_stray_vertex(&Point3::new(3.0, 2.0, 1.0));

        assert_eq!(acc.volume_ml(), 0.0);
        assert_eq!(acc.facet_count(), 0);
        assert_eq!(acc.bounding_box().dimensions_descending(), [3.0, 2.0, 1.0]);
    }
}
