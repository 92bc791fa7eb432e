use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use wayfarer_core::booking::{Booking, NewBooking};
use wayfarer_core::identity::{Identity, NewIdentity};
use wayfarer_core::package::{NewPackage, Package};
use wayfarer_core::repository::{
    BookingRepository, IdentityRepository, PackageRepository, SessionStore,
};
use wayfarer_core::session::Session;
use wayfarer_core::{Error, Result};

/// Rows keyed by a store-assigned, monotonically increasing id, so "newest
/// first" listings are exactly id-descending.
struct Table<T> {
    next_id: i64,
    rows: HashMap<i64, T>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: HashMap::new(),
        }
    }

    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Identity rows. The write lock serializes the email uniqueness check
/// with the insert that depends on it.
pub struct MemoryIdentityRepository {
    inner: RwLock<Table<Identity>>,
}

impl MemoryIdentityRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

impl Default for MemoryIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for MemoryIdentityRepository {
    async fn insert(&self, new: NewIdentity) -> Result<Identity> {
        let mut table = self.inner.write().await;
        if table
            .rows
            .values()
            .any(|row| row.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(Error::Conflict(format!(
                "email {} already registered",
                new.email
            )));
        }
        let id = table.allocate();
        let identity = Identity {
            id,
            full_name: new.full_name,
            email: new.email,
            password_hash: new.password_hash,
            contact_no: new.contact_no,
            address: new.address,
            role: new.role,
        };
        table.rows.insert(id, identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        let table = self.inner.read().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn update_password_hash(&self, id: i64, hash: &str) -> Result<()> {
        let mut table = self.inner.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("identity {id}")))?;
        row.password_hash = hash.to_owned();
        Ok(())
    }
}

pub struct MemoryPackageRepository {
    inner: RwLock<Table<Package>>,
}

impl MemoryPackageRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryPackageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageRepository for MemoryPackageRepository {
    async fn insert(&self, new: NewPackage) -> Result<Package> {
        let mut table = self.inner.write().await;
        let id = table.allocate();
        let package = Package {
            id,
            name: new.name,
            destination: new.destination,
            duration_days: new.duration_days,
            unit_cost: new.unit_cost,
            description: new.description,
        };
        table.rows.insert(id, package.clone());
        Ok(package)
    }

    async fn get(&self, id: i64) -> Result<Option<Package>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Package>> {
        let table = self.inner.read().await;
        let mut rows: Vec<Package> = table.rows.values().cloned().collect();
        rows.sort_by_key(|package| std::cmp::Reverse(package.id));
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}

pub struct MemoryBookingRepository {
    inner: RwLock<Table<Booking>>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn insert(&self, new: NewBooking) -> Result<Booking> {
        let mut table = self.inner.write().await;
        let id = table.allocate();
        let booking = Booking {
            id,
            tourist_id: new.tourist_id,
            package_id: new.package_id,
            party_size: new.party_size,
            total_cost: new.total_cost,
            status: new.status,
            created_at: Utc::now(),
        };
        table.rows.insert(id, booking.clone());
        Ok(booking)
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        let table = self.inner.read().await;
        let mut rows: Vec<Booking> = table.rows.values().cloned().collect();
        rows.sort_by_key(|booking| std::cmp::Reverse(booking.id));
        Ok(rows)
    }

    async fn list_for_tourist(&self, tourist_id: i64) -> Result<Vec<Booking>> {
        let table = self.inner.read().await;
        let mut rows: Vec<Booking> = table
            .rows
            .values()
            .filter(|booking| booking.tourist_id == tourist_id)
            .cloned()
            .collect();
        rows.sort_by_key(|booking| std::cmp::Reverse(booking.id));
        Ok(rows)
    }
}

/// O(1) token lookup. Entries live until revoked or reaped by the session
/// authority's lazy expiry.
pub struct MemorySessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: Session) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.inner.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<()> {
        self.inner.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use wayfarer_core::booking::BookingStatus;
    use wayfarer_core::identity::Role;
    use wayfarer_core::money::Money;

    fn identity(email: &str) -> NewIdentity {
        NewIdentity {
            full_name: "Asha Rao".into(),
            email: email.into(),
            password_hash: "hash".into(),
            contact_no: String::new(),
            address: String::new(),
            role: Role::Tourist,
        }
    }

    fn package(name: &str) -> NewPackage {
        NewPackage {
            name: name.into(),
            destination: "Galle".into(),
            duration_days: 3,
            unit_cost: Money::from_cents(10_000),
            description: "Coastal circuit".into(),
        }
    }

    fn booking(tourist_id: i64) -> NewBooking {
        NewBooking {
            tourist_id,
            package_id: 1,
            party_size: 2,
            total_cost: Money::from_cents(20_000),
            status: BookingStatus::Pending,
        }
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_insensitive() {
        let repo = MemoryIdentityRepository::new();
        repo.insert(identity("Asha@Example.com")).await.unwrap();

        let duplicate = repo.insert(identity("asha@example.COM")).await;
        assert!(matches!(duplicate, Err(Error::Conflict(_))));
        assert_eq!(repo.len().await, 1);

        let found = repo.find_by_email("ASHA@EXAMPLE.COM").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn password_hash_updates_in_place() {
        let repo = MemoryIdentityRepository::new();
        let stored = repo.insert(identity("asha@example.com")).await.unwrap();

        repo.update_password_hash(stored.id, "new-hash").await.unwrap();
        let reread = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(reread.password_hash, "new-hash");

        let missing = repo.update_password_hash(999, "x").await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn package_ids_ascend_and_listing_descends() {
        let repo = MemoryPackageRepository::new();
        let first = repo.insert(package("Hills")).await.unwrap();
        let second = repo.insert(package("Coast")).await.unwrap();
        assert!(second.id > first.id);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        repo.delete(999).await.unwrap();
        repo.delete(first.id).await.unwrap();
        repo.delete(first.id).await.unwrap();
        assert!(repo.get(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn booking_listings_filter_by_tourist() {
        let repo = MemoryBookingRepository::new();
        repo.insert(booking(1)).await.unwrap();
        repo.insert(booking(2)).await.unwrap();
        repo.insert(booking(1)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].id > all[1].id && all[1].id > all[2].id);

        let own = repo.list_for_tourist(1).await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|row| row.tourist_id == 1));
    }

    #[tokio::test]
    async fn session_store_round_trip() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        let session = Session {
            token: "tok".into(),
            identity_id: 1,
            role: Role::Tourist,
            created_at: now,
            expires_at: now + Duration::hours(1),
        };

        store.put(session.clone()).await.unwrap();
        assert!(store.get("tok").await.unwrap().is_some());
        store.remove("tok").await.unwrap();
        assert!(store.get("tok").await.unwrap().is_none());
        // removing an absent token is fine
        store.remove("tok").await.unwrap();
    }
}
