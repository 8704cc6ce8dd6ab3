use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// One extracted price observation for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price.
    pub price: f64,
    /// Signed absolute change versus previous close.
    pub change: f64,
    /// Signed percentage change versus previous close.
    pub percent_change: f64,
    /// When the extraction succeeded.
    pub fetched_at: UtcDateTime,
}

impl Quote {
    pub fn new(
        price: f64,
        change: f64,
        percent_change: f64,
        fetched_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_finite("change", change)?;
        validate_finite("percent_change", percent_change)?;

        Ok(Self {
            price,
            change,
            percent_change,
            fetched_at,
        })
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_negative_change_but_not_negative_price() {
        let fetched_at = UtcDateTime::parse("2026-02-20T10:00:00Z").expect("timestamp");
        let quote = Quote::new(1204.5, -9.5, -0.78, fetched_at).expect("quote");
        assert_eq!(quote.change, -9.5);

        let err = Quote::new(-1.0, 0.0, 0.0, fetched_at).expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "price" }));
    }

    #[test]
    fn rejects_non_finite_fields() {
        let fetched_at = UtcDateTime::parse("2026-02-20T10:00:00Z").expect("timestamp");
        let err = Quote::new(100.0, f64::NAN, 0.0, fetched_at).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "change" }));
    }
}
