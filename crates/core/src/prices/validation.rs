//! Validity rules for upstream values.

use price_proxy_market_data::RawQuote;

/// A quote that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidQuote {
    pub price: f64,
    pub market_cap: Option<f64>,
}

/// A quoted amount is usable iff it is a finite number >= 0.
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn valid(value: Option<f64>) -> Option<f64> {
    value.filter(|v| is_valid_amount(*v))
}

/// Validate one asset's quote.
///
/// The configured quoted fields form a single predicate: the price must be
/// valid, and when market cap is tracked the market cap must be valid too.
/// Values are kept exactly as the provider sent them.
/// Returns `None` when the quote is missing or fails either check.
pub fn validate_quote(raw: Option<&RawQuote>, track_market_cap: bool) -> Option<ValidQuote> {
    let raw = raw?;
    let price = valid(raw.price)?;
    let market_cap = if track_market_cap {
        Some(valid(raw.market_cap)?)
    } else {
        None
    };
    Some(ValidQuote { price, market_cap })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quote(price: Option<f64>, market_cap: Option<f64>) -> RawQuote {
        RawQuote { price, market_cap }
    }

    #[test]
    fn test_valid_price() {
        let valid = validate_quote(Some(&quote(Some(1.23), None)), false).unwrap();
        assert_eq!(valid.price, 1.23);
        assert!(valid.market_cap.is_none());
    }

    #[test]
    fn test_zero_is_valid() {
        assert!(validate_quote(Some(&quote(Some(0.0), None)), false).is_some());
    }

    #[test]
    fn test_extreme_magnitudes_kept_exactly() {
        for price in [1e-30, 1e29, 8e28, 1.2345678901234567e-8, f64::MAX, f64::MIN_POSITIVE] {
            let valid = validate_quote(Some(&quote(Some(price), None)), false);
            assert_eq!(valid.map(|q| q.price), Some(price), "{price} should be kept");
        }
    }

    #[test]
    fn test_missing_quote_or_price_is_invalid() {
        assert!(validate_quote(None, false).is_none());
        assert!(validate_quote(Some(&quote(None, Some(5.0))), false).is_none());
    }

    #[test]
    fn test_negative_and_non_finite_are_invalid() {
        for bad in [-0.01, -1e-30, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                validate_quote(Some(&quote(Some(bad), None)), false).is_none(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_market_cap_ignored_when_not_tracked() {
        let valid = validate_quote(Some(&quote(Some(1.0), Some(-5.0))), false).unwrap();
        assert!(valid.market_cap.is_none());
    }

    #[test]
    fn test_market_cap_required_when_tracked() {
        assert!(validate_quote(Some(&quote(Some(1.0), None)), true).is_none());
        assert!(validate_quote(Some(&quote(Some(1.0), Some(-1.0))), true).is_none());

        let valid = validate_quote(Some(&quote(Some(1.0), Some(1e29))), true).unwrap();
        assert_eq!(valid.market_cap, Some(1e29));
    }

    proptest! {
        #[test]
        fn prop_non_negative_finite_prices_kept(price in 0.0f64..f64::MAX) {
            let valid = validate_quote(Some(&quote(Some(price), None)), false);
            prop_assert_eq!(valid.map(|q| q.price), Some(price));
        }

        #[test]
        fn prop_negative_prices_rejected(price in f64::MIN..-f64::MIN_POSITIVE) {
            prop_assert!(validate_quote(Some(&quote(Some(price), None)), false).is_none());
        }
    }
}
