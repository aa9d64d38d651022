//! Cart and shipping summaries

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{MergedCart, ViewSource},
    items::LineOrigin,
    shipping::ShippingPlan,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Output could not be written.
    #[error("failed to write summary")]
    Io(#[from] io::Error),
}

/// Write a table of the cart's lines followed by totals.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if writing to `out` fails.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &MergedCart,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Name", "Source", "Qty", "Unit", "Total"]);

    for line in cart.iter() {
        builder.push_record([
            line.item.code.clone(),
            line.item.name.clone(),
            origin_label(line.origin).to_string(),
            line.item.quantity.to_string(),
            Money::from_decimal(line.item.unit_price, currency).to_string(),
            Money::from_decimal(line.item.line_total(), currency).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Items: {}  Subtotal: {}",
        cart.item_count(),
        cart.subtotal_money(currency)
    )?;

    if cart.source() == ViewSource::Degraded {
        writeln!(out, "Server cart unavailable; showing this device's cart only")?;
    }

    Ok(())
}

/// Write the chosen box and how full it is.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if writing to `out` fails.
pub fn write_shipping_plan(
    mut out: impl io::Write,
    plan: &ShippingPlan<'_>,
) -> Result<(), SummaryError> {
    let shipping_box = plan.shipping_box;
    let mut builder = Builder::default();

    builder.push_record(["", "Required", "Capacity"]);
    builder.push_record([
        "Volume (mm³)".to_string(),
        plan.request.total_volume_mm3.to_string(),
        shipping_box.volume_mm3().to_string(),
    ]);
    builder.push_record([
        "Weight (kg)".to_string(),
        plan.request.total_weight_kg.to_string(),
        shipping_box.max_weight_kg.to_string(),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..3), Alignment::right());

    writeln!(
        out,
        "Box #{} {} ({}×{}×{} mm)",
        shipping_box.id,
        shipping_box.label,
        shipping_box.dimensions.length_mm,
        shipping_box.dimensions.width_mm,
        shipping_box.dimensions.height_mm,
    )?;
    writeln!(out, "{table}")?;
    writeln!(out, "Gross weight: {} kg", plan.gross_weight_kg())?;

    if plan.needs_split() {
        writeln!(out, "Does not fit a single box; order may need several parcels")?;
    }

    Ok(())
}

fn origin_label(origin: LineOrigin) -> &'static str {
    match origin {
        LineOrigin::Local => "device",
        LineOrigin::Server => "account",
    }
}
