pub mod errors;
pub mod api;
pub mod policy;

pub use api::{Api, LifecycleState, Owner, OwnerKind, Visibility};
pub use policy::PolicyConfiguration;
