use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting currencies with their display conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chilean Peso (no decimal places, `.` thousands separator)
    CLP,
    /// US Dollar (2 decimal places, `,` thousands separator)
    USD,
}

impl Currency {
    /// Returns the decimal scale for this currency
    /// - CLP: 0 (no decimals)
    /// - USD: 2
    pub fn scale(&self) -> u32 {
        match self {
            Currency::CLP => 0,
            Currency::USD => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::CLP => "$",
            Currency::USD => "US$",
        }
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::CLP => '.',
            Currency::USD => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::CLP => ',',
            Currency::USD => '.',
        }
    }

    /// Rounds a decimal value to the display scale of this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount for display, e.g. `$1.234.567` or `US$1,234.50`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let body = self.group_decimal(amount.abs(), self.scale());
        if self.round(amount).is_sign_negative() && !self.round(amount).is_zero() {
            format!("-{}{}", self.symbol(), body)
        } else {
            format!("{}{}", self.symbol(), body)
        }
    }

    /// Formats a count with the thousands separator of this currency's locale
    pub fn format_integer(&self, value: i64) -> String {
        let body = self.group_decimal(Decimal::from(value.unsigned_abs()), 0);
        if value < 0 {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Formats a percentage with one decimal place, e.g. `12,5%`
    pub fn format_percentage(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        let body = self.group_decimal(rounded.abs(), 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}%", body)
        } else {
            format!("{}%", body)
        }
    }

    /// Renders a non-negative value with `dp` decimals and locale separators
    fn group_decimal(&self, value: Decimal, dp: u32) -> String {
        let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.*}", dp as usize, rounded);
        let (integer_part, fraction_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
        for (i, c) in integer_part.chars().enumerate() {
            if i > 0 && (integer_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator());
            }
            grouped.push(c);
        }

        match fraction_part {
            Some(f) => format!("{}{}{}", grouped, self.decimal_separator(), f),
            None => grouped,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::CLP
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::CLP => write!(f, "CLP"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CLP" => Ok(Currency::CLP),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
