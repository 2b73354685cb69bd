pub mod allocation;
pub mod analytics;
pub mod distribution;
pub mod item;
pub mod notification;
pub mod user;

pub use allocation::*;
pub use analytics::*;
pub use distribution::*;
pub use item::*;
pub use notification::*;
pub use user::*;
