use crate::config::PricingConfig;
use crate::models::admin::DiscountType;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub discount: f64,
    pub total: f64,
}

pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sum of price x quantity over `(price, quantity)` pairs.
pub fn subtotal<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    round_money(
        lines
            .into_iter()
            .map(|(price, qty)| price * f64::from(qty))
            .sum(),
    )
}

pub fn delivery_charge(subtotal: f64, cfg: &PricingConfig) -> f64 {
    if subtotal < cfg.free_delivery_threshold {
        cfg.delivery_charge
    } else {
        0.0
    }
}

/// Discount never exceeds the subtotal and never goes negative.
pub fn coupon_discount(discount_type: DiscountType, value: f64, subtotal: f64) -> f64 {
    let raw = match discount_type {
        DiscountType::Percentage => subtotal * value.clamp(0.0, 100.0) / 100.0,
        DiscountType::Fixed => value.max(0.0),
    };
    round_money(raw.min(subtotal))
}

pub fn compute_totals(
    subtotal: f64,
    cfg: &PricingConfig,
    discount: Option<(DiscountType, f64)>,
) -> CartTotals {
    let delivery = delivery_charge(subtotal, cfg);
    let discount = discount
        .map(|(kind, value)| coupon_discount(kind, value, subtotal))
        .unwrap_or(0.0);
    CartTotals {
        subtotal,
        delivery_charge: delivery,
        discount,
        total: round_money(subtotal - discount + delivery),
    }
}

/// `ORD` + UTC timestamp + random 4-digit suffix. Uniqueness is left to the
/// database constraint.
pub fn generate_order_number<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!(
        "ORD{}{}",
        now.format("%Y%m%d%H%M%S"),
        rng.gen_range(1000..=9999)
    )
}
