//! Option contract definitions
//!
//! Commodity options are described on the wire as a single line of text:
//!
//! ```text
//! <ASSET> <MON><YY> <Call|Put> Strike <STRIKE> <UNIT...>
//! ```
//!
//! e.g. `BRN Jan24 Call Strike 100 USD/BBL`. Parsing is all-or-nothing: either
//! every field is read and validated, or a [`PvError::Parse`] naming the input
//! is returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{PvError, PvResult};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

/// Delivery month of the underlying future, parsed from a token like `Jan24`.
///
/// Two-digit years always map into the 2000s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeliveryMonth {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
}

impl DeliveryMonth {
    pub fn new(year: i32, month: u32) -> PvResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(PvError::invalid_input(format!("month {} out of range", month)));
        }
        Ok(Self { year, month })
    }

    /// Shift back by a whole number of months, carrying into the year.
    pub fn months_back(&self, months: u32) -> (i32, u32) {
        let total = self.year * 12 + (self.month as i32 - 1) - months as i32;
        (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
    }
}

impl FromStr for DeliveryMonth {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if !token.is_ascii() {
            return Err(format!("delivery token {:?} must be ASCII <MON><YY>", token));
        }

        let (mon, yy) = match (token.get(..3), token.get(3..)) {
            (Some(mon), Some(yy)) if token.len() == 5 => (mon, yy),
            _ => return Err(format!("delivery token {:?} is not <MON><YY>", token)),
        };

        if !mon.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("delivery month {:?} must be three letters", mon));
        }
        if !yy.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("delivery year {:?} must be two digits", yy));
        }

        let month = MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(mon))
            .ok_or_else(|| format!("unknown month abbreviation {:?}", mon))?;
        let yy: i32 = yy
            .parse()
            .map_err(|_| format!("delivery year {:?} must be two digits", yy))?;

        Ok(Self {
            year: 2000 + yy,
            month: month as u32 + 1,
        })
    }
}

impl fmt::Display for DeliveryMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = MONTHS[self.month.saturating_sub(1) as usize % 12];
        write!(f, "{}{:02}", name, self.year.rem_euclid(100))
    }
}

/// Commodity option contract as read from its text description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying asset code (e.g., "BRN", "HH")
    pub asset: String,
    /// Delivery token exactly as written (e.g., "Jan24")
    pub delivery_token: String,
    /// Parsed delivery month
    pub delivery: DeliveryMonth,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Strike price
    pub strike: f64,
    /// Price denomination (e.g., "USD/BBL")
    pub unit: String,
}

impl OptionContract {
    /// Parse a contract description.
    pub fn parse(text: &str) -> PvResult<Self> {
        text.parse()
    }

    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }
}

impl FromStr for OptionContract {
    type Err = PvError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fail = |reason: String| PvError::parse(text, reason);

        if text.contains(['\n', '\r']) {
            return Err(fail("description must be a single line".into()));
        }

        let mut rest = text;
        let mut field = |name: &str| {
            let (token, tail) =
                next_token(rest).ok_or_else(|| fail(format!("missing {}", name)))?;
            rest = tail;
            Ok::<_, PvError>(token)
        };

        let asset = field("asset")?;
        let delivery_token = field("delivery month")?;
        let kind = field("Call/Put")?;
        let keyword = field("Strike keyword")?;
        let strike = field("strike")?;

        if !asset.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(fail(format!("asset {:?} must be uppercase letters", asset)));
        }

        let delivery: DeliveryMonth = delivery_token.parse().map_err(fail)?;

        let option_type = match kind {
            "Call" => OptionType::Call,
            "Put" => OptionType::Put,
            other => return Err(fail(format!("expected Call or Put, found {:?}", other))),
        };

        if keyword != "Strike" {
            return Err(fail(format!("expected Strike, found {:?}", keyword)));
        }

        let strike = parse_strike(strike).ok_or_else(|| {
            fail(format!("strike {:?} is not a non-negative number", strike))
        })?;

        let unit = rest.trim();
        if unit.is_empty() {
            return Err(fail("missing unit".into()));
        }

        Ok(Self {
            asset: asset.to_string(),
            delivery_token: delivery_token.to_string(),
            delivery,
            option_type,
            strike,
            unit: unit.to_string(),
        })
    }
}

impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} Strike {} {}",
            self.asset,
            self.delivery_token,
            self.option_type.label(),
            self.strike,
            self.unit
        )
    }
}

/// Split off the next whitespace-delimited token.
fn next_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], &text[end..])),
        None => Some((text, "")),
    }
}

/// Digits with an optional fractional part; no sign or exponent.
fn parse_strike(token: &str) -> Option<f64> {
    let (int, frac) = match token.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (token, None),
    };

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(int) || !frac.map_or(true, digits) {
        return None;
    }

    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_contract() {
        let opt = OptionContract::parse("BRN Jan24 Call Strike 100 USD/BBL").unwrap();

        assert_eq!(opt.asset, "BRN");
        assert_eq!(opt.delivery_token, "Jan24");
        assert_eq!(opt.delivery, DeliveryMonth { year: 2024, month: 1 });
        assert!(opt.is_call());
        assert_eq!(opt.strike, 100.0);
        assert_eq!(opt.unit, "USD/BBL");
    }

    #[test]
    fn test_parse_put_with_decimal_strike_and_spaced_unit() {
        let opt: OptionContract = "HH mar24 Put Strike 2.75 USD / MMBtu ".parse().unwrap();

        assert_eq!(opt.option_type, OptionType::Put);
        assert_eq!(opt.delivery, DeliveryMonth { year: 2024, month: 3 });
        assert_eq!(opt.delivery.to_string(), "Mar24");
        assert!((opt.strike - 2.75).abs() < 1e-12);
        assert_eq!(opt.unit, "USD / MMBtu");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let bad = [
            "",
            "BRN Jan24 Call 100 USD/BBL",
            "BRN Jan24 Call Strike abc USD/BBL",
            "BRN Jan24 Call Strike -5 USD/BBL",
            "BRN Jan24 Call Strike 1e3 USD/BBL",
            "BRN Jan24 call Strike 100 USD/BBL",
            "BRN Jan24 CALL Strike 100 USD/BBL",
            "BRN Jan24 Straddle Strike 100 USD/BBL",
            "BRN Jan24 Call strike 100 USD/BBL",
            "BRN Jan24 Call Strike 100",
            "BRN Jan24 Call Strike 100   ",
            "brn Jan24 Call Strike 100 USD/BBL",
            "BRN Foo24 Call Strike 100 USD/BBL",
            "BRN Jan2024 Call Strike 100 USD/BBL",
            "BRN Jan2x Call Strike 100 USD/BBL",
            "BRN Jan24 Call Strike 100 USD/BBL\nHH Mar24 Put Strike 10 USD",
        ];

        for text in bad {
            match OptionContract::parse(text) {
                Err(PvError::Parse { input, .. }) => assert_eq!(input, text),
                other => panic!("expected parse error for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_non_ascii_delivery_token_names_whole_token() {
        let err = "Jän4".parse::<DeliveryMonth>().unwrap_err();
        assert!(err.contains("\"Jän4\""), "{}", err);

        match OptionContract::parse("BRN Jän4 Call Strike 100 USD/BBL") {
            Err(PvError::Parse { reason, .. }) => assert!(reason.contains("Jän4"), "{}", reason),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_round_trips_description() {
        let text = "HH Mar24 Put Strike 10 USD/MMBTu";
        let opt = OptionContract::parse(text).unwrap();
        assert_eq!(opt.to_string(), text);
    }

    #[test]
    fn test_months_back_crosses_year() {
        let jan = DeliveryMonth::new(2024, 1).unwrap();
        assert_eq!(jan.months_back(2), (2023, 11));
        assert_eq!(jan.months_back(1), (2023, 12));
        assert_eq!(jan.months_back(0), (2024, 1));
        assert_eq!(jan.months_back(13), (2022, 12));

        assert!(DeliveryMonth::new(2024, 13).is_err());
    }
}
