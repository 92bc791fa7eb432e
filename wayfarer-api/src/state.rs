use std::sync::Arc;

use chrono::Duration;
use wayfarer_core::catalog::PackageCatalog;
use wayfarer_core::credentials::Credentials;
use wayfarer_core::gate::AccessGate;
use wayfarer_core::ledger::BookingLedger;
use wayfarer_core::repository::{
    BookingRepository, IdentityRepository, PackageRepository, SessionStore,
};
use wayfarer_core::session::SessionAuthority;
use wayfarer_store::{
    MemoryBookingRepository, MemoryIdentityRepository, MemoryPackageRepository,
    MemorySessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub authority: Arc<SessionAuthority>,
    pub gate: Arc<AccessGate>,
    pub catalog: Arc<PackageCatalog>,
    pub ledger: Arc<BookingLedger>,
}

impl AppState {
    /// Wire every component against fresh in-process stores.
    pub fn in_memory(session_ttl: Duration) -> Self {
        let identities: Arc<dyn IdentityRepository> = Arc::new(MemoryIdentityRepository::new());
        let packages: Arc<dyn PackageRepository> = Arc::new(MemoryPackageRepository::new());
        let bookings: Arc<dyn BookingRepository> = Arc::new(MemoryBookingRepository::new());
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

        let authority = Arc::new(SessionAuthority::new(
            Arc::clone(&identities),
            sessions,
            session_ttl,
        ));
        AppState {
            credentials: Arc::new(Credentials::new(Arc::clone(&identities))),
            gate: Arc::new(AccessGate::new(Arc::clone(&authority))),
            catalog: Arc::new(PackageCatalog::new(Arc::clone(&packages))),
            ledger: Arc::new(BookingLedger::new(bookings, packages, identities)),
            authority,
        }
    }
}
