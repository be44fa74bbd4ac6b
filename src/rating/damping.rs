use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BaselineError;

/// Bayesian mean damping term.
///
/// A damping of `d` behaves like `d` extra ratings at the coarser mean, so larger
/// values pull an item (or user) mean toward the global mean. Always finite and
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Damping(f64);

impl Damping {
    pub const NONE: Damping = Damping(0.0);

    pub fn new(value: f64) -> Result<Self, BaselineError> {
        Self::checked("mean", value)
    }

    pub fn item(value: f64) -> Result<Self, BaselineError> {
        Self::checked("item", value)
    }

    pub fn user(value: f64) -> Result<Self, BaselineError> {
        Self::checked("user", value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    fn checked(kind: &'static str, value: f64) -> Result<Self, BaselineError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(BaselineError::InvalidDamping { kind, value })
        }
    }
}

impl TryFrom<f64> for Damping {
    type Error = BaselineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Damping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|e| format!("'{}' is not a number: {}", s, e))?;
        Self::new(value).map_err(|e| e.to_string())
    }
}

impl<'de> Deserialize<'de> for Damping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Damping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
