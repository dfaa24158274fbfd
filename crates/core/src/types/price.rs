//! Type-safe price representation using decimal arithmetic.
//!
//! Prices carry their ISO 4217 currency code so that display formatting can
//! pick the right symbol and digit grouping. Amounts are in the currency's
//! standard unit (rupees, not paise).

use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of currency units.
    #[cfg(test)]
    #[must_use]
    pub fn whole(units: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::from(units), currency_code)
    }

    /// Format for display, e.g. `₹1,23,456.00` or `$1,234.50`.
    ///
    /// Always renders two fractional digits. Rupee amounts use Indian digit
    /// grouping (a group of three followed by groups of two).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let rounded = rounded.abs();

        // A Decimal mantissa is 96 bits, so the whole part always fits in u128.
        let whole = rounded.trunc().to_u128().unwrap_or_default();
        let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
            .to_u8()
            .unwrap_or_default();

        let sign = if negative { "-" } else { "" };
        format!(
            "{sign}{}{}.{cents:02}",
            self.currency_code.symbol(),
            whole.to_formatted_string(&self.currency_code.locale())
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Locale whose digit grouping is used when displaying amounts.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        match self {
            Self::INR => Locale::en_IN,
            Self::USD | Self::EUR | Self::GBP | Self::CAD | Self::AUD => Locale::en,
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inr_small_amount() {
        assert_eq!(Price::whole(299, CurrencyCode::INR).display(), "₹299.00");
    }

    #[test]
    fn test_inr_indian_grouping() {
        assert_eq!(Price::whole(1299, CurrencyCode::INR).display(), "₹1,299.00");
        assert_eq!(
            Price::whole(123_456, CurrencyCode::INR).display(),
            "₹1,23,456.00"
        );
        assert_eq!(
            Price::whole(12_345_678, CurrencyCode::INR).display(),
            "₹1,23,45,678.00"
        );
    }

    #[test]
    fn test_usd_thousands_grouping() {
        assert_eq!(
            Price::whole(1_234_567, CurrencyCode::USD).display(),
            "$1,234,567.00"
        );
        assert_eq!(Price::whole(999, CurrencyCode::USD).display(), "$999.00");
    }

    #[test]
    fn test_fractional_amount_rounds_to_two_places() {
        let price = Price::new(Decimal::new(19_996, 3), CurrencyCode::GBP);
        assert_eq!(price.display(), "£20.00");

        let price = Price::new(Decimal::new(1050, 2), CurrencyCode::EUR);
        assert_eq!(price.display(), "€10.50");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(Price::whole(0, CurrencyCode::INR).display(), "₹0.00");
        assert_eq!(Price::whole(-1500, CurrencyCode::INR).display(), "-₹1,500.00");
    }

    #[test]
    fn test_largest_amount_formats() {
        let price = Price::new(Decimal::MAX, CurrencyCode::USD);
        assert_eq!(
            price.display(),
            "$79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
        assert_eq!(CurrencyCode::INR.code(), "INR");
    }
}
