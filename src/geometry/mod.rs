// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Geometry module - facets, extents and volume

mod analytics;
mod bbox;
mod mesh;

pub use analytics::{VolumeAccumulator, MM3_PER_ML};
pub use bbox::BoundingBox;
pub use mesh::{Facet, Vertex};
