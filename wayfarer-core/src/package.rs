use serde::{Deserialize, Serialize};

use crate::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub duration_days: u32,
    pub unit_cost: Money,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewPackage {
    pub name: String,
    pub destination: String,
    pub duration_days: u32,
    pub unit_cost: Money,
    pub description: String,
}

/// Package fields as submitted by an administrator. `cost` stays textual
/// until the catalog validates and parses it.
#[derive(Debug, Clone)]
pub struct PackageDraft {
    pub name: String,
    pub destination: String,
    pub duration_days: u32,
    pub cost: String,
    pub description: String,
}
