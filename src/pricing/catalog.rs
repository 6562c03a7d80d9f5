// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! Catalog entries selectable on a quote

use serde::{Deserialize, Serialize};

/// Printing material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Resin price per millilitre, print loss included
    pub price_per_ml_with_loss: f64,
    /// Extra volume spent on supports, in percent of the part volume.
    /// Falls back to the configuration default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_percent: Option<f64>,
    /// Print speed in mm/s. Falls back to the configuration default when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_speed: Option<f64>,
}

impl Material {
    pub fn new(name: impl Into<String>, price_per_ml_with_loss: f64) -> Self {
        Self {
            name: name.into(),
            price_per_ml_with_loss,
            support_percent: None,
            print_speed: None,
        }
    }

    pub fn with_support_percent(mut self, percent: f64) -> Self {
        self.support_percent = Some(percent);
        self
    }

    pub fn with_print_speed(mut self, mm_per_s: f64) -> Self {
        self.print_speed = Some(mm_per_s);
        self
    }
}

/// Part category, scaling material and machine cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePiece {
    pub name: String,
    pub factor: f64,
}

impl TypePiece {
    pub fn new(name: impl Into<String>, factor: f64) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }
}

/// Packaging category, priced per bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typology {
    pub name: String,
    pub bag_price: f64,
}

impl Typology {
    pub fn new(name: impl Into<String>, bag_price: f64) -> Self {
        Self {
            name: name.into(),
            bag_price,
        }
    }
}

/// Catalog entries addressed by name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Material {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for TypePiece {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Typology {
    fn name(&self) -> &str {
        &self.name
    }
}

/// First entry called `name`; keys are matched exactly
pub fn find_by_name<'a, T: Named>(entries: &'a [T], name: &str) -> Option<&'a T> {
    entries.iter().find(|entry| entry.name() == name)
}

/// Names that appear more than once, each reported once
pub fn duplicate_names<T: Named>(entries: &[T]) -> Vec<&str> {
    let mut duplicates: Vec<&str> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let name = entry.name();
        if entries[..index].iter().any(|earlier| earlier.name() == name)
            && !duplicates.contains(&name)
        {
            duplicates.push(name);
        }
    }
    duplicates
}
