//! Exact fixed-point money.
//!
//! An amount is stored as whole units plus hundredths, and every arithmetic
//! operation or comparison goes through a single integer minor-unit count.
//! No floating point anywhere, so no precision loss, ever.

use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The sub-unit field must stay within [0, 100).
    #[error("invalid amount: {units} units and {hundredths} hundredths")]
    InvalidAmount { units: i64, hundredths: i64 },
}

/// The input was not in the canonical `x.xx` form: a whole part, a dot, and
/// exactly two fractional digits.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed amount {0:?}: expected the format x.xx")]
pub struct ParseMoneyError(String);

/// A currency amount: whole units plus hundredths of a unit.
///
/// Invariant: `0 <= hundredths < 100` on every value. Negative amounts keep
/// the sub-unit field in that range by letting the whole-unit field absorb
/// the sign, so -0.10 is stored as -1 units and 90 hundredths. Values are
/// immutable; operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    units: i64,
    hundredths: i64,
}

impl Money {
    pub const ZERO: Money = Money {
        units: 0,
        hundredths: 0,
    };

    pub fn new(units: i64, hundredths: i64) -> Result<Self, MoneyError> {
        if !(0..100).contains(&hundredths) {
            return Err(MoneyError::InvalidAmount { units, hundredths });
        }
        // The minor-unit count must fit in i64 too, or later arithmetic
        // would wrap instead of staying exact.
        if units.checked_mul(100).and_then(|t| t.checked_add(hundredths)).is_none() {
            return Err(MoneyError::InvalidAmount { units, hundredths });
        }
        Ok(Self { units, hundredths })
    }

    /// Build a normalized amount from a minor-unit count. Euclidean
    /// division keeps the sub-unit field within [0, 100) for negative
    /// counts as well.
    pub fn from_hundredths(total: i64) -> Self {
        Self {
            units: total.div_euclid(100),
            hundredths: total.rem_euclid(100),
        }
    }

    /// The amount as a single minor-unit count. All arithmetic and
    /// comparisons work on this.
    pub fn hundredths_total(&self) -> i64 {
        // Every constructor guarantees the count fits in i64; the wide
        // intermediate keeps the units multiplication exact right up to the
        // ends of that range.
        (self.units as i128 * 100 + self.hundredths as i128) as i64
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_hundredths(self.hundredths_total() + other.hundredths_total())
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_hundredths(self.hundredths_total() - other.hundredths_total())
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hundredths_total().cmp(&other.hundredths_total())
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Money {
    /// Canonical `x.xx` form, with a leading `-` for negative amounts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.hundredths_total();
        let sign = if total < 0 { "-" } else { "" };
        let magnitude = total.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Strict parse of the canonical form: an optional `-`, one or more
    /// digits, a dot, and exactly two digits. `12.5` is rejected, not read
    /// as 12 units and 5 hundredths.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = rest.split_once('.').ok_or_else(err)?;
        if whole.is_empty()
            || fraction.len() != 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let units: i64 = whole.parse().map_err(|_| err())?;
        let hundredths: i64 = fraction.parse().map_err(|_| err())?;

        // Grammar-valid digits can still name an amount the minor-unit
        // count can't hold; that is a parse failure like any other, so the
        // caller re-prompts instead of wrapping or panicking.
        let total = units
            .checked_mul(100)
            .and_then(|t| t.checked_add(hundredths))
            .ok_or_else(err)?;
        Ok(Self::from_hundredths(if negative { -total } else { total }))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[test]
fn test_new_enforces_sub_unit_range() {
    assert_eq!(Ok(Money::ZERO), Money::new(0, 0));
    assert!(Money::new(3, 99).is_ok());

    for (units, hundredths) in [(0, 100), (12, 250), (5, -1)] {
        assert_eq!(
            Err(MoneyError::InvalidAmount { units, hundredths }),
            Money::new(units, hundredths)
        );
    }
}

#[test]
fn test_new_rejects_units_outside_minor_unit_range() {
    // Representable in the two fields, but not as a single i64 minor-unit
    // count.
    for units in [i64::MAX, i64::MIN, i64::MAX / 100 + 1] {
        assert_eq!(
            Err(MoneyError::InvalidAmount {
                units,
                hundredths: 0
            }),
            Money::new(units, 0)
        );
    }

    // The largest representable whole-unit values are fine.
    assert!(Money::new(i64::MAX / 100 - 1, 99).is_ok());
    assert!(Money::new(i64::MIN / 100 + 1, 0).is_ok());
}

#[test]
fn test_from_hundredths_normalizes() {
    for (total, want_units, want_hundredths) in [
        (0, 0, 0),
        (250, 2, 50),
        (-10, -1, 90),
        (-250, -3, 50),
        (199, 1, 99),
    ] {
        let money = Money::from_hundredths(total);
        assert_eq!(Money::new(want_units, want_hundredths).unwrap(), money);
        assert_eq!(total, money.hundredths_total());
    }
}

#[test]
fn test_parse_ok() {
    for (input, want) in [
        ("0.00", 0),
        ("12.50", 1250),
        ("100.05", 10005),
        ("-0.10", -10),
        ("-3.50", -350),
        ("007.01", 701),
    ] {
        assert_eq!(Ok(Money::from_hundredths(want)), input.parse::<Money>());
    }
}

#[test]
fn test_parse_rejects_anything_but_two_fraction_digits() {
    for input in [
        "", "12", "12.", "12.5", "12.505", "1.2.3", ".50", "a.bc", "12,50", "12. 5", "--1.00",
        "1.-5",
    ] {
        assert_eq!(
            Err(ParseMoneyError(input.to_string())),
            input.parse::<Money>(),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_rejects_amounts_too_large_for_minor_units() {
    // All of these fit the x.xx grammar but overflow an i64 minor-unit
    // count; they must come back as parse errors (so interactive callers
    // re-prompt), not wrap or panic.
    for input in [
        "922337203685477580.00",
        "-922337203685477580.00",
        "92233720368547758.08",
        "99999999999999999999.99",
    ] {
        assert_eq!(
            Err(ParseMoneyError(input.to_string())),
            input.parse::<Money>(),
            "{input:?} should be rejected"
        );
    }

    // The extremes of the representable range still parse.
    assert_eq!(
        Ok(Money::from_hundredths(i64::MAX)),
        "92233720368547758.07".parse::<Money>()
    );
    assert_eq!(
        Ok(Money::from_hundredths(i64::MIN + 1)),
        "-92233720368547758.07".parse::<Money>()
    );
}

#[test]
fn test_display_parse_round_trip() {
    for total in [0, 1, 99, 100, 1250, -10, -100, -12345] {
        let money = Money::from_hundredths(total);
        assert_eq!(Ok(money), money.to_string().parse::<Money>());
    }
}

#[test]
fn test_display() {
    for (total, want) in [
        (0, "0.00"),
        (5, "0.05"),
        (1250, "12.50"),
        (-10, "-0.10"),
        (-1000, "-10.00"),
        (i64::MAX, "92233720368547758.07"),
        (i64::MIN, "-92233720368547758.08"),
    ] {
        assert_eq!(want, Money::from_hundredths(total).to_string());
    }
}

#[test]
fn test_arithmetic_is_exact() {
    let a = Money::from_hundredths(10);
    let b = Money::from_hundredths(20);
    assert_eq!(Money::from_hundredths(30), a + b);
    assert_eq!(Money::from_hundredths(-10), a - b);

    // The classic float trap: 0.10 + 0.20 == 0.30, exactly.
    assert_eq!("0.30", (a + b).to_string());
}

#[test]
fn test_compare() {
    use std::cmp::Ordering;

    for (left, right, want) in [
        (0, 0, Ordering::Equal),
        (99, 100, Ordering::Less),
        (100, 99, Ordering::Greater),
        (-1, 0, Ordering::Less),
    ] {
        assert_eq!(
            want,
            Money::from_hundredths(left).cmp(&Money::from_hundredths(right))
        );
    }
}
