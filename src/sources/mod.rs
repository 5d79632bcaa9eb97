//! Remote collaborators of the catalog

pub mod cdn;
pub mod http;
pub mod registry;

pub use cdn::CdnResolver;
pub use http::HttpTransport;
pub use registry::RegistryVersionLookup;
