//! User entity

use crate::{impl_entity, impl_identity_eq};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered user.
///
/// Partner status lives in the partners list, not in the user record, so
/// `is_partner` is never written to or read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub id: i32,
    #[serde(skip)]
    pub is_partner: bool,
}

impl_entity!(User, "user", named);
impl_identity_eq!(User);

impl User {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            is_partner: false,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User [name={}, id={}]", self.name, self.id)
    }
}
