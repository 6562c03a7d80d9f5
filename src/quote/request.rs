// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Quote inputs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the order leaves the workshop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Pickup,
    Delivery,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Pickup => "pickup",
            ShippingMethod::Delivery => "delivery",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pickup" | "retrait" => Ok(ShippingMethod::Pickup),
            "delivery" | "livraison" => Ok(ShippingMethod::Delivery),
            other => Err(format!(
                "unknown shipping method '{other}' (expected pickup or delivery)"
            )),
        }
    }
}

/// Catalog keys chosen for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub material: String,
    pub type_piece: String,
    pub typology: String,
    pub quantity: u32,
    pub shipping: ShippingMethod,
}

impl Selection {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            type_piece: String::new(),
            typology: String::new(),
            quantity: 1,
            shipping: ShippingMethod::Pickup,
        }
    }

    pub fn type_piece(mut self, name: impl Into<String>) -> Self {
        self.type_piece = name.into();
        self
    }

    pub fn typology(mut self, name: impl Into<String>) -> Self {
        self.typology = name.into();
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn shipping(mut self, shipping: ShippingMethod) -> Self {
        self.shipping = shipping;
        self
    }
}

/// Everything a single quote computation needs besides the pricing tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Volume of one part in millilitres
    pub volume_ml: f64,
    pub selection: Selection,
    /// Longest bounding-box extent of the part, when measured
    pub largest_dimension_mm: Option<f64>,
}

impl QuoteRequest {
    pub fn new(volume_ml: f64, selection: Selection) -> Self {
        Self {
            volume_ml,
            selection,
            largest_dimension_mm: None,
        }
    }

    pub fn with_largest_dimension(mut self, mm: f64) -> Self {
        self.largest_dimension_mm = Some(mm);
        self
    }

    /// Ordered quantity, never below one
    pub fn quantity(&self) -> u32 {
        self.selection.quantity.max(1)
    }
}
