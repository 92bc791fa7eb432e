pub mod app_config;
pub mod memory;

pub use memory::{
    MemoryBookingRepository, MemoryIdentityRepository, MemoryPackageRepository,
    MemorySessionStore,
};
