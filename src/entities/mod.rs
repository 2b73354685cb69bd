pub mod distributions;
pub mod item_allocations;
pub mod items;
pub mod notifications;
pub mod users;

pub use distributions as distribution_entity;
pub use item_allocations as item_allocation_entity;
pub use items as item_entity;
pub use notifications as notification_entity;
pub use users as user_entity;
