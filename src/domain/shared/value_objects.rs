//! Shared value objects used across multiple capability modules

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::error::{MediaSpecError, Result};

/// Exact rational number
///
/// Always stored reduced with a positive denominator, so derived equality is
/// value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FractionRecord", into = "FractionRecord")]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

#[derive(Serialize, Deserialize)]
struct FractionRecord {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(MediaSpecError::InvalidArgument(
                "fraction denominator can not be zero".to_string(),
            ));
        }

        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
        let sign: i128 = if denominator < 0 { -1 } else { 1 };
        let reduced_numerator = sign * numerator as i128 / divisor;
        let reduced_denominator = sign * denominator as i128 / divisor;

        match (
            i64::try_from(reduced_numerator),
            i64::try_from(reduced_denominator),
        ) {
            (Ok(numerator), Ok(denominator)) => Ok(Self {
                numerator,
                denominator,
            }),
            _ => Err(MediaSpecError::InvalidArgument(format!(
                "fraction {}/{} is not representable",
                reduced_numerator, reduced_denominator
            ))),
        }
    }

    /// Whole number n/1
    pub fn from_integer(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    // gcd(0, 0) only happens for 0/0, which `new` rejects first
    a.max(1)
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl TryFrom<FractionRecord> for Fraction {
    type Error = MediaSpecError;

    fn try_from(record: FractionRecord) -> Result<Self> {
        Fraction::new(record.numerator, record.denominator)
    }
}

impl From<Fraction> for FractionRecord {
    fn from(fraction: Fraction) -> Self {
        Self {
            numerator: fraction.numerator,
            denominator: fraction.denominator,
        }
    }
}
