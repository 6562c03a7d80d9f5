// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Cost-breakdown pipeline

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::error::{QuoteError, QuoteResult};
use super::request::{QuoteRequest, Selection, ShippingMethod};
use crate::io::{load_mesh_summary, MeshSummary};
use crate::pricing::{Material, PricingConfig, TimeEstimate};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Print speed (mm/s) used when a configured speed cannot be divided by
const FALLBACK_PRINT_SPEED: f64 = 1.0;

/// Neutral multiplier for an unknown part category
const NEUTRAL_TYPE_FACTOR: f64 = 1.0;

/// Bag price for an unknown typology
const NEUTRAL_BAG_PRICE: f64 = 0.0;

const NEUTRAL_MARKUP: f64 = 1.0;
const NO_PACKAGING: f64 = 0.0;

/// Itemized quote. Monetary fields share the currency of the pricing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Part volume times quantity
    pub effective_volume_ml: f64,
    pub volume_with_supports_ml: f64,
    pub material_cost: f64,
    pub machine_cost: f64,
    pub base_cost: f64,
    pub post_cost: f64,
    pub finish_cost: f64,
    /// Reserved surcharge, always zero
    pub painting_cost: f64,
    pub total_cost_before_markup: f64,
    pub markup_factor: f64,
    pub price_ht_plate: f64,
    pub packaging_cost: f64,
    pub bag_cost: f64,
    pub shipping_cost: f64,
    pub total_ht: f64,
    pub vat: f64,
    pub total_ttc: f64,
    pub print_time_minutes: f64,
}

impl QuoteBreakdown {
    /// Customer-facing price lines, in display order
    pub fn line_items(&self) -> [(&'static str, f64); 11] {
        [
            ("Material", self.material_cost),
            ("Machine", self.machine_cost),
            ("Post-processing", self.post_cost),
            ("Finishing", self.finish_cost),
            ("Price HT (plate)", self.price_ht_plate),
            ("Packaging", self.packaging_cost),
            ("Bags", self.bag_cost),
            ("Shipping", self.shipping_cost),
            ("Total HT", self.total_ht),
            ("VAT", self.vat),
            ("Total TTC", self.total_ttc),
        ]
    }
}

/// Computes quotes against one immutable [`PricingConfig`]
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: PricingConfig,
}

impl QuoteEngine {
    pub fn new(config: PricingConfig) -> Self {
        config.check();
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Run the pricing pipeline for one request.
    ///
    /// Only an unknown material fails; unknown part categories and
    /// typologies price with a factor of 1 and no bag cost.
    pub fn compute_quote(&self, request: &QuoteRequest) -> QuoteResult<QuoteBreakdown> {
        let config = &self.config;
        let selection = &request.selection;

        let material =
            config
                .material(&selection.material)
                .ok_or_else(|| QuoteError::UnknownMaterial {
                    name: selection.material.clone(),
                })?;
        let type_factor = match config.type_piece(&selection.type_piece) {
            Some(piece) => piece.factor,
            None => {
                debug!(type_piece = %selection.type_piece, "unknown type piece, using neutral factor");
                NEUTRAL_TYPE_FACTOR
            }
        };
        let bag_price = match config.typology(&selection.typology) {
            Some(typology) => typology.bag_price,
            None => {
                debug!(typology = %selection.typology, "unknown typology, no bag cost");
                NEUTRAL_BAG_PRICE
            }
        };
        let quantity = f64::from(request.quantity());

        let effective_volume_ml = request.volume_ml * quantity;
        let volume_with_supports_ml =
            effective_volume_ml * (1.0 + config.support_percent(material) / 100.0);
        let material_cost =
            volume_with_supports_ml * material.price_per_ml_with_loss * type_factor;

        let machine_hours = self.machine_hours(
            material,
            volume_with_supports_ml,
            type_factor,
            request.largest_dimension_mm,
        );
        let machine_cost = machine_hours * config.machine_hour_rate;

        let base_cost = material_cost + machine_cost;
        let post_cost = base_cost * config.post_rate;
        let finish_cost = base_cost * config.finish_rate;
        let painting_cost = 0.0;
        let total_cost_before_markup = base_cost + post_cost + finish_cost + painting_cost;

        let markup_factor = config.markup.lookup(effective_volume_ml, NEUTRAL_MARKUP);
        let price_ht_plate = total_cost_before_markup * markup_factor;

        let packaging_cost = config.packaging.lookup(effective_volume_ml, NO_PACKAGING);
        let bag_cost = bag_price * quantity;
        let shipping_cost = match selection.shipping {
            ShippingMethod::Pickup => config.pickup_shipping,
            ShippingMethod::Delivery => config.delivery_shipping,
        };

        let total_ht = price_ht_plate + packaging_cost + bag_cost + shipping_cost;
        let vat = total_ht * config.vat_rate;
        let total_ttc = total_ht + vat;

        debug!(
            material = %material.name,
            quantity,
            effective_volume_ml,
            total_ttc,
            "computed quote"
        );

        Ok(QuoteBreakdown {
            effective_volume_ml,
            volume_with_supports_ml,
            material_cost,
            machine_cost,
            base_cost,
            post_cost,
            finish_cost,
            painting_cost,
            total_cost_before_markup,
            markup_factor,
            price_ht_plate,
            packaging_cost,
            bag_cost,
            shipping_cost,
            total_ht,
            vat,
            total_ttc,
            print_time_minutes: machine_hours * MINUTES_PER_HOUR,
        })
    }

    /// Quote a measured part, using its longest extent as the print-time hint
    pub fn quote_mesh(
        &self,
        summary: &MeshSummary,
        selection: Selection,
    ) -> QuoteResult<QuoteBreakdown> {
        let request = QuoteRequest::new(summary.volume_ml, selection)
            .with_largest_dimension(summary.largest_dimension_mm());
        self.compute_quote(&request)
    }

    /// Measure an STL file and quote it
    pub fn quote_stl_file(
        &self,
        path: impl AsRef<Path>,
        selection: Selection,
    ) -> Result<(MeshSummary, QuoteBreakdown)> {
        let summary = load_mesh_summary(path)?;
        let breakdown = self.quote_mesh(&summary, selection)?;
        Ok((summary, breakdown))
    }

    /// Machine time in hours. The dimension estimate models travel distance
    /// over print speed, the volume estimate a deposition rate.
    fn machine_hours(
        &self,
        material: &Material,
        volume_with_supports_ml: f64,
        type_factor: f64,
        largest_dimension_mm: Option<f64>,
    ) -> f64 {
        let config = &self.config;
        match (config.time_estimate, largest_dimension_mm) {
            (TimeEstimate::Dimension, Some(dimension_mm)) => {
                let configured = config.print_speed(material);
                let speed = if configured.is_finite() && configured > 0.0 {
                    configured
                } else {
                    warn!(
                        material = %material.name,
                        speed = configured,
                        fallback = FALLBACK_PRINT_SPEED,
                        "unusable print speed, using fallback"
                    );
                    FALLBACK_PRINT_SPEED
                };
                dimension_mm * config.time_factor / speed / SECONDS_PER_HOUR
            }
            _ => volume_with_supports_ml * config.machine_time_per_ml * type_factor,
        }
    }
}
