pub mod api;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod traits;

pub use client::HttpBackend;
pub use error::SyncError;
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryBackend;
pub use traits::CatalogBackend;
