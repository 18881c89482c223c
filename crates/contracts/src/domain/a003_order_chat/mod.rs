pub mod aggregate;
pub mod grouping;

pub use aggregate::{OrderChatSummary, OrderStatus};
pub use grouping::{group_orders_by_client, ClientOrderGroup};
