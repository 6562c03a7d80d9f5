// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Fersch 3D Team

//! CLI output reporter with colored formatting

use crate::io::MeshSummary;
use crate::pricing::PricingConfig;
use crate::quote::{QuoteBreakdown, Selection};
use colored::*;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the measurements of a mesh file
    pub fn report_measure(file: &str, summary: &MeshSummary) {
        Self::header("Measured:", file);
        Self::print_mesh(summary);
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a full quote with its price lines
    pub fn report_quote(
        file: &str,
        summary: &MeshSummary,
        selection: &Selection,
        quote: &QuoteBreakdown,
    ) {
        Self::header("Quote:", file);
        Self::print_mesh(summary);

        println!("\n{}", "Order:".bold());
        Self::print_field("Material", selection.material.cyan());
        Self::print_field("Type", Self::or_none(&selection.type_piece).cyan());
        Self::print_field("Typology", Self::or_none(&selection.typology).cyan());
        Self::print_field("Quantity", selection.quantity.max(1).to_string().cyan());
        Self::print_field("Shipping", selection.shipping.as_str().cyan());
        Self::print_field(
            "With supports",
            format!("{:.2} ml", quote.volume_with_supports_ml).cyan(),
        );
        Self::print_field(
            "Print time",
            format!("{:.1} min", quote.print_time_minutes).yellow(),
        );
        Self::print_field("Markup", format!("×{:.2}", quote.markup_factor).yellow());

        println!("\n{}", "Price:".bold());
        for (label, amount) in quote.line_items() {
            let value = Self::format_money(amount);
            if label.starts_with("Total") {
                Self::print_field(label, value.green().bold());
            } else {
                Self::print_field(label, value.normal());
            }
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the selectable catalog entries
    pub fn report_catalog(config: &PricingConfig) {
        println!("\n{}", "Materials:".bold());
        for material in &config.materials {
            println!(
                "  {} {} {}",
                "•".bright_black(),
                material.name.cyan(),
                format!(
                    "({}/ml, supports {:.0}%, {:.1} mm/s)",
                    Self::format_money(material.price_per_ml_with_loss),
                    config.support_percent(material),
                    config.print_speed(material)
                )
                .bright_black()
            );
        }

        println!("\n{}", "Type pieces:".bold());
        for piece in &config.type_pieces {
            println!(
                "  {} {} {}",
                "•".bright_black(),
                piece.name.cyan(),
                format!("(×{:.2})", piece.factor).bright_black()
            );
        }

        println!("\n{}", "Typologies:".bold());
        for typology in &config.typologies {
            println!(
                "  {} {} {}",
                "•".bright_black(),
                typology.name.cyan(),
                format!("({} per bag)", Self::format_money(typology.bag_price)).bright_black()
            );
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn header(title: &str, file: &str) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", title.bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
    }

    fn print_mesh(summary: &MeshSummary) {
        let [length, width, height] = summary.dimensions_mm;
        Self::print_field("Format", summary.format.as_str().cyan());
        Self::print_field("Facets", summary.facet_count.to_string().cyan());
        Self::print_field("Volume", format!("{:.2} ml", summary.volume_ml).cyan());
        Self::print_field(
            "Size",
            format!("{:.2} × {:.2} × {:.2} mm", length, width, height).cyan(),
        );
        if summary.skipped_lines > 0 {
            Self::report_warning(&format!(
                "{} malformed vertex lines were skipped",
                summary.skipped_lines
            ));
        }
        if summary.is_inverted() {
            Self::report_warning("facets are wound inside-out (negative signed volume)");
        }
    }

    fn print_field(name: &str, value: ColoredString) {
        println!("  {} {}", format!("{:<16}", format!("{}:", name)).bright_black(), value);
    }

    fn or_none(name: &str) -> &str {
        if name.is_empty() {
            "-"
        } else {
            name
        }
    }

    /// Format an amount with two decimals and a euro sign
    fn format_money(amount: f64) -> String {
        format!("{:.2} €", amount)
    }
}
