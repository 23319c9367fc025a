//! Identifier types for groups and segments.
//!
//! Newtypes keep position-group, segment and specification identifiers
//! from being mixed up.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a position group.
    ///
    /// ```
    /// use exposure_xva::specification::PositionGroupId;
    ///
    /// let id = PositionGroupId::new("PG001");
    /// assert_eq!(id.as_str(), "PG001");
    /// ```
    PositionGroupId
);

string_id!(
    /// Identifier of a funding segment (groups sharing a funding account).
    FundingSegmentId
);

string_id!(
    /// Identifier of a netting segment (groups netted on default).
    NettingSegmentId
);

string_id!(
    /// Identifier of a collateral group specification.
    CollateralGroupId
);

string_id!(
    /// Identifier of a counterparty group specification.
    CounterpartyGroupId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_and_convert() {
        let id: FundingSegmentId = "FS-1".into();
        assert_eq!(id.to_string(), "FS-1");
        assert_eq!(NettingSegmentId::from(String::from("NS")), NettingSegmentId::new("NS"));
    }
}
