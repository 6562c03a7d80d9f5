// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! End-to-end pricing scenarios

use anyhow::Result;
use approx::assert_relative_eq;
use fersch_quote::pricing::Tier;
use fersch_quote::{
    quote_stl, Material, PricingConfig, QuoteBreakdown, QuoteEngine, QuoteError, QuoteRequest,
    Selection, ShippingMethod, TierTable, TimeEstimate, TypePiece, Typology,
};
use std::io::Write;

fn workshop() -> PricingConfig {
    PricingConfig {
        machine_hour_rate: 7.0,
        machine_time_per_ml: 0.0687,
        post_rate: 0.15,
        finish_rate: 0.1,
        vat_rate: 0.2,
        pickup_shipping: 0.0,
        delivery_shipping: 12.0,
        time_estimate: TimeEstimate::Volume,
        materials: vec![
            Material::new("Grey Resin", 0.5),
            Material::new("Tough 2000", 0.35).with_support_percent(15.0),
        ],
        type_pieces: vec![
            TypePiece::new("Prototype", 1.0),
            TypePiece::new("Jewellery", 1.8),
        ],
        typologies: vec![Typology::new("Standard", 0.2), Typology::new("Fragile", 1.5)],
        markup: TierTable::from_pairs(&[(0.0, 1.0), (50.0, 1.2), (200.0, 1.1)]),
        packaging: TierTable::from_pairs(&[(0.0, 2.0), (50.0, 4.0), (500.0, 9.0)]),
        ..PricingConfig::default()
    }
}

fn quote(engine: &QuoteEngine, volume_ml: f64, selection: Selection) -> QuoteBreakdown {
    engine
        .compute_quote(&QuoteRequest::new(volume_ml, selection))
        .expect("known material")
}

#[test]
fn test_material_cost_scenario() {
    let engine = QuoteEngine::new(workshop());
    let selection = Selection::new("Grey Resin").type_piece("Prototype").quantity(2);
    let q = quote(&engine, 10.0, selection);

    assert_relative_eq!(q.effective_volume_ml, 20.0);
    assert_relative_eq!(q.volume_with_supports_ml, 20.0);
    assert_relative_eq!(q.material_cost, 10.0);
}

#[test]
fn test_markup_scenario() {
    let engine = QuoteEngine::new(workshop());

    let below = quote(&engine, 20.0, Selection::new("Grey Resin"));
    assert_eq!(below.markup_factor, 1.0);

    let at = quote(&engine, 25.0, Selection::new("Grey Resin").quantity(2));
    assert_eq!(at.effective_volume_ml, 50.0);
    assert_eq!(at.markup_factor, 1.2);
    assert_eq!(at.packaging_cost, 4.0);
}

#[test]
fn test_totals_add_up() {
    let engine = QuoteEngine::new(workshop());
    let selection = Selection::new("Tough 2000")
        .type_piece("Jewellery")
        .typology("Fragile")
        .quantity(3)
        .shipping(ShippingMethod::Delivery);
    let q = quote(&engine, 12.5, selection);

    assert_relative_eq!(q.volume_with_supports_ml, 37.5 * 1.15, epsilon = 1e-9);
    assert_relative_eq!(q.base_cost, q.material_cost + q.machine_cost);
    assert_relative_eq!(
        q.total_cost_before_markup,
        q.base_cost * (1.0 + 0.15 + 0.1),
        epsilon = 1e-9
    );
    assert_relative_eq!(q.bag_cost, 4.5);
    assert_eq!(q.shipping_cost, 12.0);
    assert_relative_eq!(
        q.total_ht,
        q.price_ht_plate + q.packaging_cost + q.bag_cost + q.shipping_cost
    );
    assert_relative_eq!(q.total_ttc, q.total_ht * 1.2, epsilon = 1e-9);
}

#[test]
fn test_monotonic_in_quantity() {
    // Non-increasing markup tiers are allowed, so compare at a fixed factor
    let mut config = workshop();
    config.markup = TierTable::from_pairs(&[(0.0, 1.3)]);
    let engine = QuoteEngine::new(config);

    let mut previous: Option<QuoteBreakdown> = None;
    for quantity in 1..=40 {
        let selection = Selection::new("Tough 2000")
            .typology("Standard")
            .quantity(quantity)
            .shipping(ShippingMethod::Delivery);
        let q = quote(&engine, 7.3, selection);
        if let Some(p) = &previous {
            assert!(q.material_cost >= p.material_cost);
            assert!(q.machine_cost >= p.machine_cost);
            assert!(q.packaging_cost >= p.packaging_cost);
            assert!(q.bag_cost >= p.bag_cost);
            assert!(q.total_ht >= p.total_ht);
            assert!(q.total_ttc >= p.total_ttc);
        }
        previous = Some(q);
    }
}

#[test]
fn test_tier_lookup_is_right_continuous() {
    let table = TierTable::new(vec![Tier::new(50.0, 4.0), Tier::new(0.0, 2.0)]);

    assert_eq!(table.lookup(49.999, 0.0), 2.0);
    assert_eq!(table.lookup(50.0, 0.0), 4.0);
    assert_eq!(table.lookup(-1.0, 0.0), 0.0);
}

#[test]
fn test_unknown_material_only_when_absent() {
    let engine = QuoteEngine::new(workshop());

    for name in ["Grey Resin", "Tough 2000"] {
        assert!(engine
            .compute_quote(&QuoteRequest::new(5.0, Selection::new(name)))
            .is_ok());
    }

    let err = engine
        .compute_quote(&QuoteRequest::new(5.0, Selection::new("grey resin")))
        .unwrap_err();
    assert_eq!(
        err,
        QuoteError::UnknownMaterial {
            name: "grey resin".to_string()
        }
    );
}

#[test]
fn test_unknown_categories_use_neutral_defaults() {
    let engine = QuoteEngine::new(workshop());
    let known = quote(
        &engine,
        10.0,
        Selection::new("Grey Resin").type_piece("Prototype"),
    );
    let unknown = quote(
        &engine,
        10.0,
        Selection::new("Grey Resin")
            .type_piece("Spaceship")
            .typology("Crate"),
    );

    assert_eq!(unknown.material_cost, known.material_cost);
    assert_eq!(unknown.bag_cost, 0.0);
}

#[test]
fn test_zero_quantity_counts_as_one() {
    let engine = QuoteEngine::new(workshop());
    let zero = quote(&engine, 10.0, Selection::new("Grey Resin").quantity(0));
    let one = quote(&engine, 10.0, Selection::new("Grey Resin").quantity(1));

    assert_eq!(zero, one);
}

#[test]
fn test_engine_is_shared_across_threads() {
    let engine = QuoteEngine::new(workshop());
    let expected: Vec<f64> = (1..=8u32)
        .map(|q| quote(&engine, 3.0, Selection::new("Grey Resin").quantity(q)).total_ttc)
        .collect();

    let results: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8u32)
            .map(|q| {
                let engine = &engine;
                scope.spawn(move || {
                    quote(engine, 3.0, Selection::new("Grey Resin").quantity(q)).total_ttc
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("quote thread"))
            .collect()
    });

    assert_eq!(results, expected);
}

#[test]
fn test_quote_stl_payload_uses_largest_dimension() {
    let mut config = workshop();
    config.time_estimate = TimeEstimate::Dimension;
    config.default_print_speed = 0.01;
    let engine = QuoteEngine::new(config);

    let text = "solid bar\nfacet normal 0 0 0\nouter loop\n\
                vertex 0 0 0\nvertex 36 0 0\nvertex 0 1 0\n\
                endloop\nendfacet\nendsolid bar\n";
    let (summary, q) = quote_stl(&engine, text.as_bytes(), Selection::new("Grey Resin"))
        .expect("known material");

    assert_eq!(summary.largest_dimension_mm(), 36.0);
    // 36 mm at 0.01 mm/s is one hour
    assert_relative_eq!(q.print_time_minutes, 60.0, epsilon = 1e-9);
    assert_relative_eq!(q.machine_cost, 7.0, epsilon = 1e-9);
}

#[test]
fn test_quote_stl_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".stl").tempfile()?;
    write!(
        file,
        "solid t\nfacet normal 0 0 0\nouter loop\n\
         vertex 0 0 0\nvertex 10 0 0\nvertex 0 10 0\n\
         endloop\nendfacet\nendsolid t\n"
    )?;

    let engine = QuoteEngine::new(workshop());
    let (summary, q) = engine.quote_stl_file(file.path(), Selection::new("Grey Resin"))?;

    assert_eq!(summary.facet_count, 1);
    assert_eq!(summary.volume_ml, 0.0);
    assert_eq!(q.material_cost, 0.0);
    assert_eq!(q.packaging_cost, 2.0);

    let missing = engine.quote_stl_file(
        file.path().with_extension("missing"),
        Selection::new("Grey Resin"),
    );
    assert!(missing.is_err());
    Ok(())
}
