//! Type-safe, efficient identifiers for stations, ports and map features.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <String as serde::Deserialize>::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

impl_identifier!(StationIdentifier);
impl_identifier!(PortIdentifier);
impl_identifier!(FeatureIdentifier);

impl FeatureIdentifier {
    /// Identifier of a station's center polygon feature.
    ///
    /// Pure function of the station id: rebuilding features for an unchanged
    /// station always yields bit-for-bit identical identifiers.
    pub fn center(station: &StationIdentifier) -> Self {
        Self::new(format!("center:{station}"))
    }

    /// Identifier of the perimeter segment at sorted-port position `index`.
    ///
    /// `index` is the position of the port in the sorted-port-key ordering,
    /// not the port's own identifier. This is what lets a status event
    /// addressed by port id resolve to a pre-built segment.
    pub fn segment(station: &StationIdentifier, index: usize) -> Self {
        Self::new(format!("seg:{station}:{index}"))
    }
}
