use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::identity::{Identity, IdentityView, NewIdentity, Role};
use crate::repository::IdentityRepository;
use crate::{Error, Result};

/// Produce a PHC-format Argon2 hash over a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| Error::Internal(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::Internal(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(e.to_string()))?;
    Ok(hash.to_string())
}

/// True when `hash` parses as a PHC string and verifies against `password`.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub contact_no: String,
    pub address: String,
}

/// Registration and profile access over the identity store.
pub struct Credentials {
    identities: Arc<dyn IdentityRepository>,
}

impl Credentials {
    pub fn new(identities: Arc<dyn IdentityRepository>) -> Self {
        Self { identities }
    }

    /// Create a tourist account. Email uniqueness is enforced by the store:
    /// a duplicate registration fails with `Conflict` and writes nothing.
    pub async fn register(&self, registration: Registration) -> Result<Identity> {
        if registration.email.trim().is_empty() || registration.password.is_empty() {
            return Err(Error::InvalidInput("email and password required".into()));
        }
        let password_hash = hash_password(&registration.password)?;
        let identity = self
            .identities
            .insert(NewIdentity {
                full_name: registration.full_name,
                email: registration.email,
                password_hash,
                contact_no: registration.contact_no,
                address: registration.address,
                role: Role::Tourist,
            })
            .await?;
        tracing::info!(identity = identity.id, "tourist registered");
        Ok(identity)
    }

    pub async fn profile(&self, id: i64) -> Result<Option<IdentityView>> {
        Ok(self.identities.find_by_id(id).await?.map(IdentityView::from))
    }

    /// Seed the administrator account at startup. Safe to call on every
    /// boot; an existing row, or a concurrent seed, leaves the store as-is.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<()> {
        if self.identities.find_by_email(email).await?.is_some() {
            return Ok(());
        }
        let password_hash = hash_password(password)?;
        let seeded = self
            .identities
            .insert(NewIdentity {
                full_name: "Administrator".into(),
                email: email.into(),
                password_hash,
                contact_no: String::new(),
                address: String::new(),
                role: Role::Admin,
            })
            .await;
        match seeded {
            Ok(identity) => {
                tracing::info!(identity = identity.id, "administrator account seeded");
                Ok(())
            }
            Err(Error::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
