use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Server-assigned key, kept in whatever JSON form the backend used
/// (number or string) so it goes back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RawId {
    type Err = Infallible;

    /// Numeric text becomes `Int`, anything else stays text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(RawId::Int)
            .unwrap_or_else(|_| RawId::Text(s.to_string())))
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub RawId);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                RawId::from_str(s).map($name)
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                $name(RawId::Int(n))
            }
        }
    };
}

opaque_id!(
    /// Key of a student in the teacher's roster.
    StudentId
);
opaque_id!(
    /// Persisted identifier of a report. Stable across renames of the
    /// teacher-chosen report identifier.
    ReportId
);
opaque_id!(TeacherId);
opaque_id!(UserId);
