//! Close-out conventions on default.

use std::fmt;
use std::str::FromStr;

use super::error::HypothecationError;

/// Which defaults close the portfolio out at its risk-free value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutScheme {
    /// Either party's default closes out; the debt leg is kept.
    #[default]
    Bilateral,
    /// Only the client's default is recognised; the debt leg is dropped.
    Unilateral,
}

impl CloseOutScheme {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            CloseOutScheme::Bilateral => "bilateral",
            CloseOutScheme::Unilateral => "unilateral",
        }
    }

    /// Debt exposure recognised under this convention.
    #[inline]
    pub fn debt_exposure(&self, debt: f64) -> f64 {
        match self {
            CloseOutScheme::Bilateral => debt,
            CloseOutScheme::Unilateral => 0.0,
        }
    }
}

impl FromStr for CloseOutScheme {
    type Err = HypothecationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bilateral" => Ok(CloseOutScheme::Bilateral),
            "unilateral" => Ok(CloseOutScheme::Unilateral),
            _ => Err(HypothecationError::UnknownScheme {
                kind: "close-out",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CloseOutScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unilateral_drops_debt() {
        assert_eq!(CloseOutScheme::Bilateral.debt_exposure(-4.0), -4.0);
        assert_eq!(CloseOutScheme::Unilateral.debt_exposure(-4.0), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            " Unilateral ".parse::<CloseOutScheme>().unwrap(),
            CloseOutScheme::Unilateral
        );
        assert!("trilateral".parse::<CloseOutScheme>().is_err());
    }
}
