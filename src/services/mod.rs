pub mod pagination;
mod retention_service_impl;
mod version_listing_service_impl;

pub use pagination::version_pages;
pub use retention_service_impl::RetentionServiceImpl;
pub use version_listing_service_impl::VersionListingServiceImpl;
