//! Money calculation utilities using rust_decimal for precision
//!
//! This module provides precise decimal arithmetic for monetary calculations.
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;

use crate::db::models::PaymentStatus;
use crate::utils::{AppError, AppResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (Rp 1.000.000.000)
const MAX_PRICE: f64 = 1_000_000_000.0;
/// Maximum allowed quantity per treatment line
const MAX_QUANTITY: i32 = 99;
/// Maximum allowed payment amount (Rp 1.000.000.000)
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a treatment charge before it is written
pub fn validate_charge(unit_price: f64, quantity: i32, discount: f64) -> AppResult<()> {
    require_finite(unit_price, "unit_price")?;
    if unit_price < 0.0 {
        return Err(AppError::validation(format!(
            "unit_price must be non-negative, got {}",
            unit_price
        )));
    }
    if unit_price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, unit_price
        )));
    }

    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }

    require_finite(discount, "discount")?;
    if discount < 0.0 {
        return Err(AppError::validation(format!(
            "discount must be non-negative, got {}",
            discount
        )));
    }
    // Discount may not exceed the gross line amount
    let gross = to_decimal(unit_price) * Decimal::from(quantity);
    if to_decimal(discount) > gross {
        return Err(AppError::validation(format!(
            "discount ({}) exceeds line amount ({})",
            discount,
            to_f64(gross)
        )));
    }

    Ok(())
}

/// Validate a payment before it is written
pub fn validate_payment(amount: f64, paid_amount: f64) -> AppResult<()> {
    require_finite(amount, "amount")?;
    if amount < 0.0 {
        return Err(AppError::validation(format!(
            "amount must be non-negative, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::validation(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }

    require_finite(paid_amount, "paid_amount")?;
    if paid_amount < 0.0 {
        return Err(AppError::validation(format!(
            "paid_amount must be non-negative, got {}",
            paid_amount
        )));
    }
    if paid_amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::validation(format!(
            "paid_amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, paid_amount
        )));
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the boundary.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO
/// to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with inputs bounded by MAX_PRICE
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Treatment line subtotal
///
/// Formula: unit_price * quantity - discount
pub fn line_subtotal(unit_price: f64, quantity: i32, discount: f64) -> f64 {
    let subtotal =
        to_decimal(unit_price) * Decimal::from(quantity) - to_decimal(discount);
    to_f64(subtotal)
}

/// Commission derived from a treatment subtotal
///
/// Formula: subtotal * rate / 100
pub fn commission_amount(subtotal: f64, rate: f64) -> f64 {
    let amount = to_decimal(subtotal) * to_decimal(rate) / Decimal::ONE_HUNDRED;
    to_f64(amount)
}

/// Change returned to the patient
///
/// Formula: max(paid_amount - amount, 0)
pub fn change_amount(amount: f64, paid_amount: f64) -> f64 {
    let change = (to_decimal(paid_amount) - to_decimal(amount)).max(Decimal::ZERO);
    to_f64(change)
}

/// Payment status is a pure function of amount vs. paid amount
///
/// PAID iff paid_amount >= amount, else PARTIAL.
pub fn payment_status(amount: f64, paid_amount: f64) -> PaymentStatus {
    if to_decimal(paid_amount) >= to_decimal(amount) {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    }
}

/// Sum amounts with precise arithmetic
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    let total: Decimal = amounts.into_iter().map(to_decimal).sum();
    to_f64(total)
}

#[cfg(test)]
mod tests;
