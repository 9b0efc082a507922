//! Configuration module

mod site;

pub use site::Fallback;
pub use site::SiteConfig;
pub use site::StoreBackend;
pub use site::StoreConfig;
