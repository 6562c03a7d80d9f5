// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Fersch 3D quote engine
//!
//! Measures STL meshes (volume and bounding box) and turns the volume of a
//! part into an itemized 3D-printing quote from a pricing configuration.

pub mod cli;
pub mod geometry;
pub mod io;
pub mod pricing;
pub mod quote;

pub use geometry::{BoundingBox, Facet, VolumeAccumulator};
pub use io::{extract_mesh, load_mesh_summary, MeshError, MeshSummary, StlFormat};
pub use pricing::{Material, PricingConfig, TierTable, TimeEstimate, TypePiece, Typology};
pub use quote::{QuoteBreakdown, QuoteEngine, QuoteError, QuoteRequest, Selection, ShippingMethod};

/// Quote an in-memory STL payload
pub fn quote_stl(
    engine: &QuoteEngine,
    data: &[u8],
    selection: Selection,
) -> Result<(MeshSummary, QuoteBreakdown), QuoteError> {
    let summary = extract_mesh(data);
    let breakdown = engine.quote_mesh(&summary, selection)?;
    Ok((summary, breakdown))
}
