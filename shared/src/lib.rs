use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod date;
mod dining;
mod housing;
mod identity;
pub mod protocol;

pub use dining::*;
pub use housing::*;
pub use identity::*;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// Role carried by a session. Anything the backends send besides these two is
/// treated as "no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Student];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treats an explicit JSON `null` like a missing field.
///
/// Go encodes nil slices as `null`, which a plain `#[serde(default)]` rejects.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
