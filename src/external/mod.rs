pub mod identity;

pub use identity::{IdentityService, IdentityUser};
