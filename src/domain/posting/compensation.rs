//! Compensation value object: pay amount, currency and payment period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// How often the compensation amount is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPeriod {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Immutable pay offer attached to a posting.
///
/// # Invariants
///
/// - `amount >= 0`
/// - `currency` is a three-letter upper-case code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CompensationRecord")]
pub struct Compensation {
    amount: Decimal,
    currency: String,
    period: PaymentPeriod,
}

/// Unvalidated wire shape; deserialization goes through `Compensation::new`.
#[derive(Deserialize)]
struct CompensationRecord {
    amount: Decimal,
    currency: String,
    period: PaymentPeriod,
}

impl TryFrom<CompensationRecord> for Compensation {
    type Error = ValidationError;

    fn try_from(record: CompensationRecord) -> Result<Self, Self::Error> {
        Compensation::new(record.amount, record.currency, record.period)
    }
}

impl Compensation {
    /// Creates a compensation value.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` on `compensation.amount` if the amount is negative
    /// - `InvalidFormat` on `compensation.currency` if it is not three ASCII letters
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        period: PaymentPeriod,
    ) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "compensation.amount",
                format!("amount must be non-negative, got {}", amount),
            ));
        }

        let currency = currency.into().trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "compensation.currency",
                format!("expected a three-letter currency code, got '{}'", currency),
            ));
        }

        Ok(Self {
            amount,
            currency,
            period,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn period(&self) -> PaymentPeriod {
        self.period
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = match self.period {
            PaymentPeriod::Hourly => "hour",
            PaymentPeriod::Daily => "day",
            PaymentPeriod::Weekly => "week",
            PaymentPeriod::Monthly => "month",
            PaymentPeriod::Yearly => "year",
        };
        write!(f, "{} {}/{}", self.amount, self.currency, period)
    }
}
