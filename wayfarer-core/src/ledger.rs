use std::sync::Arc;

use crate::booking::{Booking, BookingStatus, BookingView, NewBooking};
use crate::identity::Role;
use crate::repository::{BookingRepository, IdentityRepository, PackageRepository};
use crate::session::Session;
use crate::{Error, Result};

/// Owns creation and role-scoped retrieval of booking records.
pub struct BookingLedger {
    bookings: Arc<dyn BookingRepository>,
    packages: Arc<dyn PackageRepository>,
    identities: Arc<dyn IdentityRepository>,
}

impl BookingLedger {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        packages: Arc<dyn PackageRepository>,
        identities: Arc<dyn IdentityRepository>,
    ) -> Self {
        Self {
            bookings,
            packages,
            identities,
        }
    }

    /// Record a booking for the session's identity. The total is derived
    /// here from the package's unit cost; callers cannot supply it.
    pub async fn book(&self, session: &Session, package_id: i64, party_size: u32) -> Result<Booking> {
        if party_size == 0 {
            return Err(Error::InvalidInput("party size must be at least 1".into()));
        }
        let package = self
            .packages
            .get(package_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("package {package_id}")))?;
        // A package deleted between this read and the insert below still
        // books at the price just read; see DESIGN.md.
        let total_cost = package
            .unit_cost
            .checked_mul(party_size)
            .ok_or_else(|| Error::InvalidInput("total cost out of range".into()))?;
        let booking = self
            .bookings
            .insert(NewBooking {
                tourist_id: session.identity_id,
                package_id,
                party_size,
                total_cost,
                status: BookingStatus::Pending,
            })
            .await?;
        tracing::info!(
            booking = booking.id,
            tourist = session.identity_id,
            total = %booking.total_cost,
            "booking recorded"
        );
        Ok(booking)
    }

    /// Admins see every booking with the purchasing tourist joined in;
    /// tourists see their own rows only, with no identity fields at all.
    pub async fn list(&self, session: &Session) -> Result<Vec<BookingView>> {
        let rows = match session.role {
            Role::Admin => self.bookings.list_all().await?,
            Role::Tourist => self.bookings.list_for_tourist(session.identity_id).await?,
        };
        let mut views = Vec::with_capacity(rows.len());
        for booking in rows {
            // Inner-join semantics: rows whose package has been deleted
            // drop out of the listing.
            let Some(package) = self.packages.get(booking.package_id).await? else {
                continue;
            };
            let (tourist_name, tourist_email) = match session.role {
                Role::Admin => {
                    let Some(tourist) = self.identities.find_by_id(booking.tourist_id).await? else {
                        continue;
                    };
                    (Some(tourist.full_name), Some(tourist.email))
                }
                Role::Tourist => (None, None),
            };
            views.push(BookingView {
                booking_id: booking.id,
                created_at: booking.created_at,
                party_size: booking.party_size,
                total_cost: booking.total_cost,
                status: booking.status,
                package_name: package.name,
                destination: package.destination,
                tourist_name,
                tourist_email,
            });
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{NewIdentity, Role};
    use crate::money::Money;
    use crate::package::NewPackage;
    use crate::repository::PackageRepository;
    use chrono::{Duration, Utc};
    use wayfarer_store::{
        MemoryBookingRepository, MemoryIdentityRepository, MemoryPackageRepository,
    };

    struct Harness {
        ledger: BookingLedger,
        packages: Arc<MemoryPackageRepository>,
        identities: Arc<MemoryIdentityRepository>,
    }

    fn harness() -> Harness {
        let packages = Arc::new(MemoryPackageRepository::new());
        let identities = Arc::new(MemoryIdentityRepository::new());
        let ledger = BookingLedger::new(
            Arc::new(MemoryBookingRepository::new()),
            packages.clone(),
            identities.clone(),
        );
        Harness {
            ledger,
            packages,
            identities,
        }
    }

    fn session_for(identity_id: i64, role: Role) -> Session {
        let now = Utc::now();
        Session {
            token: format!("tok-{identity_id}"),
            identity_id,
            role,
            created_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    async fn seed_tourist(h: &Harness, full_name: &str, email: &str) -> i64 {
        h.identities
            .insert(NewIdentity {
                full_name: full_name.into(),
                email: email.into(),
                password_hash: "x".into(),
                contact_no: String::new(),
                address: String::new(),
                role: Role::Tourist,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_package(h: &Harness, name: &str, cost: &str) -> i64 {
        h.packages
            .insert(NewPackage {
                name: name.into(),
                destination: "Galle".into(),
                duration_days: 4,
                unit_cost: cost.parse().unwrap(),
                description: "Coastal circuit".into(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn total_cost_is_unit_cost_times_party_size() {
        let h = harness();
        let tourist = seed_tourist(&h, "Asha Rao", "asha@example.com").await;
        let package = seed_package(&h, "Hills", "15000.00").await;

        let booking = h
            .ledger
            .book(&session_for(tourist, Role::Tourist), package, 3)
            .await
            .unwrap();
        assert_eq!(booking.total_cost, Money::from_cents(4_500_000));
        assert_eq!(booking.total_cost.to_string(), "45000.00");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.party_size, 3);
    }

    #[tokio::test]
    async fn ownership_comes_from_the_session() {
        let h = harness();
        let tourist = seed_tourist(&h, "Asha Rao", "asha@example.com").await;
        let package = seed_package(&h, "Hills", "100.00").await;

        let booking = h
            .ledger
            .book(&session_for(tourist, Role::Tourist), package, 2)
            .await
            .unwrap();
        assert_eq!(booking.tourist_id, tourist);
    }

    #[tokio::test]
    async fn invalid_bookings_are_rejected_without_writes() {
        let h = harness();
        let tourist = seed_tourist(&h, "Asha Rao", "asha@example.com").await;
        let package = seed_package(&h, "Hills", "100.00").await;
        let session = session_for(tourist, Role::Tourist);

        let zero_party = h.ledger.book(&session, package, 0).await;
        assert!(matches!(zero_party, Err(Error::InvalidInput(_))));

        let missing_package = h.ledger.book(&session, 999, 2).await;
        assert!(matches!(missing_package, Err(Error::NotFound(_))));

        assert!(h.ledger.list(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_scoped_by_role() {
        let h = harness();
        let asha = seed_tourist(&h, "Asha Rao", "asha@example.com").await;
        let bela = seed_tourist(&h, "Bela Fernando", "bela@example.com").await;
        let package = seed_package(&h, "Hills", "100.00").await;

        h.ledger.book(&session_for(asha, Role::Tourist), package, 1).await.unwrap();
        h.ledger.book(&session_for(bela, Role::Tourist), package, 2).await.unwrap();

        let admin_view = h.ledger.list(&session_for(99, Role::Admin)).await.unwrap();
        assert_eq!(admin_view.len(), 2);
        assert!(admin_view.iter().all(|view| view.tourist_email.is_some()));
        // newest first
        assert!(admin_view[0].booking_id > admin_view[1].booking_id);

        let asha_view = h.ledger.list(&session_for(asha, Role::Tourist)).await.unwrap();
        assert_eq!(asha_view.len(), 1);
        assert!(asha_view[0].tourist_name.is_none());
        assert!(asha_view[0].tourist_email.is_none());

        // the tourist's listing is a subset of the admin's
        let admin_ids: Vec<i64> = admin_view.iter().map(|view| view.booking_id).collect();
        assert!(asha_view.iter().all(|view| admin_ids.contains(&view.booking_id)));
    }

    #[tokio::test]
    async fn bookings_for_deleted_packages_drop_out_of_listings() {
        let h = harness();
        let tourist = seed_tourist(&h, "Asha Rao", "asha@example.com").await;
        let package = seed_package(&h, "Hills", "100.00").await;

        h.ledger.book(&session_for(tourist, Role::Tourist), package, 1).await.unwrap();
        h.packages.delete(package).await.unwrap();

        assert!(h.ledger.list(&session_for(99, Role::Admin)).await.unwrap().is_empty());
        assert!(h.ledger.list(&session_for(tourist, Role::Tourist)).await.unwrap().is_empty());
    }
}
