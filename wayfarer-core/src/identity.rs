use std::fmt;

use serde::{Deserialize, Serialize};

/// Access tier attached to every identity and session. Checks are exact
/// matches; neither role implies the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Tourist,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Tourist => write!(f, "Tourist"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// A registered account. The password hash never crosses the wire;
/// wire-facing code works with [`IdentityView`].
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub contact_no: String,
    pub address: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub contact_no: String,
    pub address: String,
    pub role: Role,
}

/// Public projection of an identity for login and whoami responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityView {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub contact_no: String,
    pub address: String,
    pub role: Role,
}

impl From<Identity> for IdentityView {
    fn from(identity: Identity) -> Self {
        IdentityView {
            id: identity.id,
            full_name: identity.full_name,
            email: identity.email,
            contact_no: identity.contact_no,
            address: identity.address,
            role: identity.role,
        }
    }
}
