//! Subscription pricing
//!
//! Local, side-effect free estimate of what a subscription of a given length
//! costs. The server computes the authoritative amount with the same tiers;
//! the estimate exists so the checkout slider can update on every change.
//!
//! ```rust
//! use remotedesk::shared::pricing::{quote, DurationSelection};
//!
//! let selection = DurationSelection::new(30).unwrap();
//! let price = quote(selection);
//! assert_eq!(price.discount_percent, 5);
//! assert_eq!(price.total_amount.to_string(), "142.50");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::shared::error::ClientError;

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

/// Price per day, in currency units (5.00).
pub const UNIT_PRICE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// A duration threshold and the discount it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    pub min_days: u32,
    pub percent: u32,
}

/// Ordered by descending threshold; the first match wins.
pub const DISCOUNT_TIERS: [DiscountTier; 3] = [
    DiscountTier { min_days: 180, percent: 15 },
    DiscountTier { min_days: 90, percent: 10 },
    DiscountTier { min_days: 30, percent: 5 },
];

/// A validated subscription length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DurationSelection(u32);

impl DurationSelection {
    /// Fails for anything outside `1..=365`.
    pub fn new(days: u32) -> Result<Self, ClientError> {
        if (MIN_DAYS..=MAX_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(ClientError::validation(
                "duration_days",
                format!("Duration must be between {} and {} days", MIN_DAYS, MAX_DAYS),
            ))
        }
    }

    /// Pins raw slider input into range.
    pub fn clamped(days: i64) -> Self {
        Self(days.clamp(MIN_DAYS as i64, MAX_DAYS as i64) as u32)
    }

    pub fn days(self) -> u32 {
        self.0
    }
}

impl Default for DurationSelection {
    fn default() -> Self {
        Self(30)
    }
}

impl<'de> Deserialize<'de> for DurationSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let days = u32::deserialize(deserializer)?;
        DurationSelection::new(days).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub days: u32,
    pub base_amount: Decimal,
    pub discount_percent: u32,
    pub total_amount: Decimal,
}

impl PriceQuote {
    /// How much the tier takes off the base price.
    pub fn discount_amount(&self) -> Decimal {
        self.base_amount - self.total_amount
    }

    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0
    }
}

pub fn discount_percent(days: u32) -> u32 {
    DISCOUNT_TIERS
        .iter()
        .find(|tier| days >= tier.min_days)
        .map(|tier| tier.percent)
        .unwrap_or(0)
}

/// Compute the quote for a validated duration.
pub fn quote(selection: DurationSelection) -> PriceQuote {
    let days = selection.days();
    let base_amount = round_currency(Decimal::from(days) * UNIT_PRICE);
    let percent = discount_percent(days);
    let factor = Decimal::ONE - Decimal::new(percent as i64, 2);
    let total_amount = round_currency(base_amount * factor);

    PriceQuote {
        days,
        base_amount,
        discount_percent: percent,
        total_amount,
    }
}

/// Validate then quote raw input.
pub fn quote_days(days: u32) -> Result<PriceQuote, ClientError> {
    DurationSelection::new(days).map(quote)
}

/// Two decimal places, half-up.
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
