use async_trait::async_trait;

use crate::booking::{Booking, NewBooking};
use crate::identity::{Identity, NewIdentity};
use crate::package::{NewPackage, Package};
use crate::session::Session;
use crate::Result;

/// Repository trait for identity records. `insert` must serialize its
/// email uniqueness check with the write and fail with `Conflict` on a
/// duplicate, leaving the store untouched.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn insert(&self, new: NewIdentity) -> Result<Identity>;

    /// Lookup by email, compared case-insensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>>;

    async fn update_password_hash(&self, id: i64, hash: &str) -> Result<()>;
}

/// Repository trait for package records.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn insert(&self, new: NewPackage) -> Result<Package>;

    async fn get(&self, id: i64) -> Result<Option<Package>>;

    /// All packages, id descending.
    async fn list(&self) -> Result<Vec<Package>>;

    /// Idempotent; removing an absent id succeeds.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Repository trait for booking records. Listings come back id descending.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, new: NewBooking) -> Result<Booking>;

    async fn list_all(&self) -> Result<Vec<Booking>>;

    async fn list_for_tourist(&self, tourist_id: i64) -> Result<Vec<Booking>>;
}

/// Key-value store for live sessions, keyed by opaque token. Lookups are
/// O(1); expiry is the session authority's concern, not the store's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session: Session) -> Result<()>;

    async fn get(&self, token: &str) -> Result<Option<Session>>;

    async fn remove(&self, token: &str) -> Result<()>;
}
