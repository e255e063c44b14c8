//! Typed snowflake wrappers for compile-time type safety.
//!
//! Discord identifies users, roles, channels and messages with 64-bit
//! snowflakes. `Id<T>` wraps the raw `u64` so that a `RoleId` can never be
//! passed where a `UserId` was expected.
//!
//! # Example
//!
//! ```rust
//! use quest_core::common::{RoleId, UserId};
//!
//! let user = UserId::new(1360583634481975327);
//! let role: RoleId = "1368302479841693786".parse().unwrap();
//!
//! // This would be a compile error:
//! // let wrong: RoleId = user;
//! assert_eq!(user.mention(), "<@1360583634481975327>");
//! # let _ = role;
//! ```
//!
//! On the wire snowflakes are JSON strings, so serde goes through the decimal
//! string form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

/// A typed wrapper around a `u64` snowflake.
///
/// The type parameter `T` is a marker for the entity the id belongs to.
#[repr(transparent)]
pub struct Id<T>(u64, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw, PhantomData)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses an `Id` from its decimal string form.
    ///
    /// Also accepts mention syntax (`<@123>`, `<@!123>`, `<@&123>`, `<#123>`),
    /// as older ledger rows recorded submitters.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        let trimmed = s
            .trim()
            .trim_start_matches('<')
            .trim_start_matches(['@', '#', '!', '&'])
            .trim_end_matches('>');
        Ok(Self::new(trimmed.parse()?))
    }
}

impl Id<super::entity_ids::User> {
    /// `<@id>` mention syntax.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("?");
        write!(f, "Id<{}>({})", name, self.0)
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<u64> for Id<T> {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl<T> From<Id<T>> for u64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{RoleId, UserId};

    #[test]
    fn test_parse_and_display_roundtrip() {
        let id = UserId::new(1360583634481975327);
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_accepts_mentions() {
        assert_eq!(UserId::parse("<@42>").unwrap().get(), 42);
        assert_eq!(UserId::parse("<@!42>").unwrap().get(), 42);
        assert_eq!(RoleId::parse("<@&7>").unwrap().get(), 7);
        assert_eq!(RoleId::parse(" 7 ").unwrap().get(), 7);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RoleId::parse("not-a-role").is_err());
        assert!(RoleId::parse("").is_err());
    }

    #[test]
    fn test_serde_uses_strings() {
        let id = RoleId::new(9007199254740993);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"9007199254740993\"");
        let parsed: RoleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_debug_includes_type_name() {
        let debug = format!("{:?}", UserId::new(5));
        assert!(debug.contains("User"));
    }
}
