//! Api management: repository contract, reference backends and the
//! application service built on them.

pub mod repository;
pub mod store;
pub mod memory;
pub mod file;
pub mod service;

pub use repository::{ApiDescriptorRepository, ApiRepository, LegacyPolicyRepository};
pub use memory::InMemoryApiRepository;
pub use file::FileApiRepository;
pub use service::ApiService;
