//! Angular momentum quantum numbers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use anyhow::{self, ensure, format_err};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};


// =======
// HalfInt
// =======

/// Structure to represent an integer or half-odd-integer quantum number, such as a spin, a total
/// angular momentum, or an isospin projection.
///
/// The value is stored internally as twice its actual value, so that all arithmetic stays exact.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct HalfInt {
    twice: i32,
}

impl HalfInt {
    /// Constructs a [`HalfInt`] from twice its value, *e.g.* `HalfInt::from_twice(3)` is $`3/2`$.
    #[must_use]
    pub const fn from_twice(twice: i32) -> Self {
        Self { twice }
    }

    /// Constructs a [`HalfInt`] from a numerator and a denominator, the latter of which must be
    /// either 1 or 2.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is neither 1 nor 2.
    #[must_use]
    pub fn new(numerator: i32, denominator: i32) -> Self {
        match denominator {
            1 => Self::from_twice(2 * numerator),
            2 => Self::from_twice(numerator),
            _ => panic!("Invalid denominator {denominator} for a `HalfInt`."),
        }
    }

    /// Constructs a [`HalfInt`] with an integral value, returning `None` if twice the value is
    /// not representable.
    pub fn checked_from_integer(value: i32) -> Option<Self> {
        value.checked_mul(2).map(Self::from_twice)
    }

    /// Returns twice the value of this quantum number.
    pub fn twice_value(&self) -> i32 {
        self.twice
    }

    /// Returns `true` if this quantum number has an integral value.
    pub fn is_integer(&self) -> bool {
        self.twice % 2 == 0
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_twice(self.twice.abs())
    }

    /// Returns the value as a floating-point number.
    pub fn to_f64(&self) -> f64 {
        f64::from(self.twice) / 2.0
    }
}

impl From<i32> for HalfInt {
    fn from(value: i32) -> Self {
        Self::from_twice(2 * value)
    }
}

impl PartialOrd for HalfInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HalfInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.twice.cmp(&other.twice)
    }
}

impl Add for HalfInt {
    type Output = HalfInt;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_twice(self.twice + rhs.twice)
    }
}

impl Sub for HalfInt {
    type Output = HalfInt;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_twice(self.twice - rhs.twice)
    }
}

impl Neg for HalfInt {
    type Output = HalfInt;

    fn neg(self) -> Self::Output {
        Self::from_twice(-self.twice)
    }
}

impl fmt::Display for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = if self.is_integer() {
            format!("{}", self.twice / 2)
        } else {
            format!("{}/2", self.twice)
        };
        f.pad(&s)
    }
}

impl fmt::Debug for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl From<HalfInt> for String {
    fn from(value: HalfInt) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for HalfInt {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accepts strings such as `"3/2"` in all formats, and plain integers in self-describing formats
/// such as YAML.
impl<'de> Deserialize<'de> for HalfInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HalfIntVisitor;

        impl<'de> Visitor<'de> for HalfIntVisitor {
            type Value = HalfInt;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an integer or a string such as `3/2`")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .ok()
                    .and_then(HalfInt::checked_from_integer)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .ok()
                    .and_then(HalfInt::checked_from_integer)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_any(HalfIntVisitor)
        } else {
            deserializer.deserialize_str(HalfIntVisitor)
        }
    }
}

impl std::str::FromStr for HalfInt {
    type Err = anyhow::Error;

    /// Parses strings of the form `3`, `-1`, `3/2`, or `-1/2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((num, den)) => {
                let num = num
                    .trim()
                    .parse::<i32>()
                    .map_err(|err| format_err!("Invalid numerator in `{s}`: {err}"))?;
                let den = den
                    .trim()
                    .parse::<i32>()
                    .map_err(|err| format_err!("Invalid denominator in `{s}`: {err}"))?;
                ensure!(
                    den == 1 || den == 2,
                    "Invalid denominator {den} in `{s}`: only 1 or 2 is allowed."
                );
                if den == 2 {
                    Ok(Self::from_twice(num))
                } else {
                    Self::checked_from_integer(num)
                        .ok_or_else(|| format_err!("Value `{s}` out of range for a `HalfInt`."))
                }
            }
            None => {
                let value = s
                    .parse::<i32>()
                    .map_err(|err| format_err!("Invalid integer `{s}`: {err}"))?;
                Self::checked_from_integer(value)
                    .ok_or_else(|| format_err!("Value `{s}` out of range for a `HalfInt`."))
            }
        }
    }
}

// =========
// Functions
// =========

/// Checks if three angular momenta satisfy the triangle condition,
/// $`\lvert j_1 - j_2 \rvert \le j_3 \le j_1 + j_2`$, together with the requirement that
/// $`j_1 + j_2 + j_3`$ be integral.
pub fn allowed_triangle(j1: HalfInt, j2: HalfInt, j3: HalfInt) -> bool {
    (j1 - j2).abs() <= j3 && j3 <= j1 + j2 && (j1 + j2 + j3).is_integer()
}
