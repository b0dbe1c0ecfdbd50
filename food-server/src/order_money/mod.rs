//! Money calculation utilities using rust_decimal for precision
//!
//! All checkout arithmetic is done on `Decimal`, then converted to `f64`
//! (rounded to 2 decimal places, half-up) for storage/serialization.
//! Inputs are bounded and every operation is checked; any failure is
//! `INVALID_AMOUNT`.

use rust_decimal::prelude::*;
use shared::models::{MAX_PRICE, MAX_QUANTITY};
use shared::{AppError, AppResult, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

fn invalid_amount(message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::InvalidAmount, message)
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> AppResult<Decimal> {
    if !value.is_finite() {
        return Err(invalid_amount(format!("{value} is not a finite amount")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| invalid_amount(format!("{value} cannot be represented as an amount")))
}

/// Round to cents, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Order totals derived from cart lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

impl Totals {
    /// `lines` are `(unit_price, quantity)`; `discount_percent` comes from an
    /// active offer, if the checkout named one.
    pub fn compute(lines: &[(f64, i64)], discount_percent: Option<f64>) -> AppResult<Self> {
        let mut subtotal = Decimal::ZERO;
        for &(price, quantity) in lines {
            if price > MAX_PRICE {
                return Err(invalid_amount(format!(
                    "unit price {price} exceeds the maximum of {MAX_PRICE}"
                ))
                .with_detail("price", price));
            }
            if !(1..=MAX_QUANTITY).contains(&quantity) {
                return Err(invalid_amount(format!(
                    "quantity {quantity} is outside 1..={MAX_QUANTITY}"
                ))
                .with_detail("quantity", quantity));
            }
            let line_total = to_decimal(price)?
                .checked_mul(Decimal::from(quantity))
                .ok_or_else(|| invalid_amount("line total overflows"))?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| invalid_amount("order subtotal overflows"))?;
        }
        let subtotal = round_money(subtotal);

        let discount = match discount_percent {
            None => Decimal::ZERO,
            Some(pct) => {
                let off = subtotal
                    .checked_mul(to_decimal(pct)?)
                    .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| invalid_amount("discount overflows"))?;
                round_money(off).min(subtotal)
            }
        };

        Ok(Self {
            subtotal,
            discount,
            final_amount: subtotal - discount,
        })
    }
}
