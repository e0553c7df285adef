//! Strongly-typed ID wrappers for pantry records
//!
//! Newtype wrappers keep household ids from being passed where a donation or
//! distribution id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse a full UUID, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Whether `s` names this id, either as a full UUID or as the
            /// short form produced by `Display`
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                self.to_string().eq_ignore_ascii_case(s)
                    || Self::parse(s).map(|id| id == *self).unwrap_or(false)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(DonationId, "don-");
define_id!(HouseholdId, "hh-");
define_id!(DistributionId, "dist-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = HouseholdId::new();
        let display = id.to_string();
        assert!(display.starts_with("hh-"));
        assert_eq!(display.len(), 11); // "hh-" + 8 chars
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain = DonationId::parse(uuid_str).unwrap();
        let prefixed: DonationId = format!("don-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = HouseholdId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(!id.matches("hh-00000000"));
        assert!(!id.matches("Smith"));
    }

    #[test]
    fn test_id_serialization() {
        let id = DistributionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let deserialized: DistributionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
