//! Broken-date scheme selection.

use std::fmt;
use std::str::FromStr;

use super::brownian_3p::Brownian3PInterpolator;
use super::error::InterpolationError;
use super::linear_time::LinearTimeInterpolator;
use super::sqrt_time::SquareRootOfTimeInterpolator;
use super::{BridgeAnchor, BrokenDateInterpolator};
use crate::types::Date;

/// Choice of broken-date interpolation for margin look-back dates.
///
/// # Codes
///
/// | Variant | Name | Code |
/// |---|---|---|
/// | `LinearTime` | `linear_time` | 1 |
/// | `SquareRootOfTime` | `square_root_of_time` | 2 |
/// | `ThreePointBrownianBridge` | `three_point_brownian_bridge` | 3 |
///
/// ```
/// use exposure_core::bridge::BrokenDateScheme;
///
/// let scheme: BrokenDateScheme = "square_root_of_time".parse().unwrap();
/// assert_eq!(scheme, BrokenDateScheme::SquareRootOfTime);
/// assert_eq!(BrokenDateScheme::try_from(3u8).unwrap(), BrokenDateScheme::ThreePointBrownianBridge);
/// assert!(BrokenDateScheme::try_from(9u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrokenDateScheme {
    /// Linear in elapsed time between the two most recent vertices.
    #[default]
    LinearTime,
    /// Square root of elapsed time between the two most recent vertices.
    SquareRootOfTime,
    /// Brownian bridge through the three most recent vertices.
    ThreePointBrownianBridge,
}

impl BrokenDateScheme {
    /// All schemes in code order.
    pub const ALL: [BrokenDateScheme; 3] = [
        BrokenDateScheme::LinearTime,
        BrokenDateScheme::SquareRootOfTime,
        BrokenDateScheme::ThreePointBrownianBridge,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            BrokenDateScheme::LinearTime => "linear_time",
            BrokenDateScheme::SquareRootOfTime => "square_root_of_time",
            BrokenDateScheme::ThreePointBrownianBridge => "three_point_brownian_bridge",
        }
    }

    /// Numeric code.
    pub fn code(&self) -> u8 {
        match self {
            BrokenDateScheme::LinearTime => 1,
            BrokenDateScheme::SquareRootOfTime => 2,
            BrokenDateScheme::ThreePointBrownianBridge => 3,
        }
    }

    /// Number of anchors the scheme interpolates through.
    pub fn anchor_count(&self) -> usize {
        match self {
            BrokenDateScheme::LinearTime | BrokenDateScheme::SquareRootOfTime => 2,
            BrokenDateScheme::ThreePointBrownianBridge => 3,
        }
    }

    /// Builds the interpolator ending at vertex `index` of `history`.
    ///
    /// Returns `Ok(None)` when the vertex has too little history for the
    /// scheme (vertex 0 for two-point schemes, vertices 0 and 1 for the
    /// Brownian bridge). Callers treat that as no collateral movement.
    ///
    /// # Errors
    ///
    /// - `InterpolationError::InsufficientAnchors` if `index` is past the end of `history`
    /// - any anchor validation failure
    pub fn bridge(
        &self,
        history: &[BridgeAnchor],
        index: usize,
    ) -> Result<Option<BrokenDateBridge>, InterpolationError> {
        let need = self.anchor_count();
        if index + 1 < need {
            return Ok(None);
        }
        if index >= history.len() {
            return Err(InterpolationError::InsufficientAnchors {
                got: history.len(),
                need: index + 1,
            });
        }
        let window = &history[index + 1 - need..=index];
        let bridge = match self {
            BrokenDateScheme::LinearTime => BrokenDateBridge::LinearTime(
                LinearTimeInterpolator::new(window[0].clone(), window[1].clone())?,
            ),
            BrokenDateScheme::SquareRootOfTime => BrokenDateBridge::SquareRootOfTime(
                SquareRootOfTimeInterpolator::new(window[0].clone(), window[1].clone())?,
            ),
            BrokenDateScheme::ThreePointBrownianBridge => {
                BrokenDateBridge::Brownian3P(Brownian3PInterpolator::new([
                    window[0].clone(),
                    window[1].clone(),
                    window[2].clone(),
                ])?)
            }
        };
        Ok(Some(bridge))
    }
}

impl FromStr for BrokenDateScheme {
    type Err = InterpolationError;

    /// Parses a scheme name (case-insensitive; `-`, `_` and spaces ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "lineartime" | "linear" => Ok(BrokenDateScheme::LinearTime),
            "squarerootoftime" | "sqrttime" | "sqrt" => Ok(BrokenDateScheme::SquareRootOfTime),
            "threepointbrownianbridge" | "brownian3p" | "brownianbridge" => {
                Ok(BrokenDateScheme::ThreePointBrownianBridge)
            }
            _ => Err(InterpolationError::UnknownScheme(s.to_string())),
        }
    }
}

impl TryFrom<u8> for BrokenDateScheme {
    type Error = InterpolationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        BrokenDateScheme::ALL
            .into_iter()
            .find(|scheme| scheme.code() == code)
            .ok_or_else(|| InterpolationError::UnknownScheme(code.to_string()))
    }
}

impl fmt::Display for BrokenDateScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::BrokenDateScheme;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BrokenDateScheme {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for BrokenDateScheme {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        }
    }
}

/// A built broken-date interpolator, one variant per scheme.
#[derive(Clone, Debug, PartialEq)]
pub enum BrokenDateBridge {
    /// Linear-in-time bridge.
    LinearTime(LinearTimeInterpolator),
    /// Square-root-of-time bridge.
    SquareRootOfTime(SquareRootOfTimeInterpolator),
    /// Three-point Brownian bridge.
    Brownian3P(Brownian3PInterpolator),
}

impl BrokenDateBridge {
    fn inner(&self) -> &dyn BrokenDateInterpolator {
        match self {
            BrokenDateBridge::LinearTime(i) => i,
            BrokenDateBridge::SquareRootOfTime(i) => i,
            BrokenDateBridge::Brownian3P(i) => i,
        }
    }
}

impl BrokenDateInterpolator for BrokenDateBridge {
    fn interpolate(&self, date: Date) -> Result<Vec<f64>, InterpolationError> {
        self.inner().interpolate(date)
    }

    fn earliest(&self) -> Date {
        self.inner().earliest()
    }

    fn latest(&self) -> Date {
        self.inner().latest()
    }

    fn lanes(&self) -> usize {
        self.inner().lanes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<BridgeAnchor> {
        let t0 = Date::from_ymd(2024, 1, 1).unwrap();
        (0..4)
            .map(|i| {
                BridgeAnchor::new(t0.add_days(30 * i).unwrap(), vec![i as f64, -(i as f64)])
            })
            .collect()
    }

    #[test]
    fn test_undefined_without_history() {
        let history = history();
        assert!(BrokenDateScheme::LinearTime.bridge(&history, 0).unwrap().is_none());
        assert!(BrokenDateScheme::SquareRootOfTime.bridge(&history, 0).unwrap().is_none());
        for index in [0, 1] {
            assert!(BrokenDateScheme::ThreePointBrownianBridge
                .bridge(&history, index)
                .unwrap()
                .is_none());
        }
    }

    #[test]
    fn test_bridge_brackets_most_recent_vertices() {
        let history = history();
        let linear = BrokenDateScheme::LinearTime.bridge(&history, 3).unwrap().unwrap();
        assert_eq!(linear.earliest(), history[2].date());
        assert_eq!(linear.latest(), history[3].date());
        assert_eq!(linear.lanes(), 2);

        let brownian = BrokenDateScheme::ThreePointBrownianBridge
            .bridge(&history, 2)
            .unwrap()
            .unwrap();
        assert_eq!(brownian.earliest(), history[0].date());
        assert_eq!(brownian.interpolate(history[1].date()).unwrap(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_index_past_history_fails() {
        assert!(BrokenDateScheme::LinearTime.bridge(&history(), 4).is_err());
    }

    #[test]
    fn test_names_and_codes_round_trip() {
        for scheme in BrokenDateScheme::ALL {
            assert_eq!(scheme.name().parse::<BrokenDateScheme>().unwrap(), scheme);
            assert_eq!(BrokenDateScheme::try_from(scheme.code()).unwrap(), scheme);
        }
        assert!(matches!(
            "cubic".parse::<BrokenDateScheme>(),
            Err(InterpolationError::UnknownScheme(_))
        ));
    }
}
