mod version_store;

pub use version_store::VersionStore;
