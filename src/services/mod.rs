pub mod allocation_service;
pub mod analytics_service;
pub mod distribution_service;
pub mod item_service;
pub mod notification_service;
pub mod user_service;

pub use allocation_service::*;
pub use analytics_service::*;
pub use distribution_service::*;
pub use item_service::*;
pub use notification_service::*;
pub use user_service::*;
