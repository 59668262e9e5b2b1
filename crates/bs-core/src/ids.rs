//! Strongly typed identifier wrappers.
//!
//! Transit feeds name everything with short strings (`"R001"`, `"S004"`,
//! `"DL1PC1234"`), so the IDs wrap a `String` rather than an integer index.
//! Each kind gets its own type so a `StopId` can never be passed where a
//! `RouteId` is expected.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around an owned string.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` for the empty default ID (never assigned).
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            #[inline]
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            #[inline]
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Identifier of a stop.  Unique within a route; may be shared between
    /// routes that call at the same physical stop.
    pub struct StopId;
}

string_id! {
    /// Identifier of a route.
    pub struct RouteId;
}

string_id! {
    /// Identifier of a bus (typically its registration plate).
    pub struct BusId;
}

string_id! {
    /// Identifier of a driver.
    pub struct DriverId;
}
