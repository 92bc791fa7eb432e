use std::sync::Arc;

use crate::gate::require_role;
use crate::identity::Role;
use crate::money::Money;
use crate::package::{NewPackage, Package, PackageDraft};
use crate::repository::PackageRepository;
use crate::session::Session;
use crate::{Error, Result};

/// Admin-curated inventory of bookable packages. Reads are open; every
/// mutation is gated on the Admin role.
pub struct PackageCatalog {
    packages: Arc<dyn PackageRepository>,
}

impl PackageCatalog {
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }

    /// All packages, newest first.
    pub async fn list(&self) -> Result<Vec<Package>> {
        self.packages.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Package> {
        self.packages
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("package {id}")))
    }

    pub async fn create(&self, session: &Session, draft: PackageDraft) -> Result<Package> {
        require_role(session, Role::Admin)?;
        if draft.name.trim().is_empty()
            || draft.destination.trim().is_empty()
            || draft.description.trim().is_empty()
        {
            return Err(Error::InvalidInput(
                "name, destination and description are required".into(),
            ));
        }
        if draft.duration_days == 0 {
            return Err(Error::InvalidInput("duration is required".into()));
        }
        let unit_cost: Money = draft.cost.trim().parse()?;
        let package = self
            .packages
            .insert(NewPackage {
                name: draft.name,
                destination: draft.destination,
                duration_days: draft.duration_days,
                unit_cost,
                description: draft.description,
            })
            .await?;
        tracing::info!(package = package.id, "package added to catalog");
        Ok(package)
    }

    /// Idempotent removal; deleting an unknown id succeeds. Bookings that
    /// reference the package keep their rows (no cascade).
    pub async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        require_role(session, Role::Admin)?;
        self.packages.delete(id).await?;
        tracing::info!(package = id, "package deleted");
        Ok(())
    }
}
