use crate::domain::common::{ClientId, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Статус заказа. Переходы выполняет API, клиент только отображает
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
    Completed,
    Cancelled,
    Disputed,
}

impl OrderStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_progress" => Ok(OrderStatus::InProgress),
            "delivered" => Ok(OrderStatus::Delivered),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "disputed" => Ok(OrderStatus::Disputed),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Disputed => "disputed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Ожидает",
            OrderStatus::InProgress => "В работе",
            OrderStatus::Delivered => "Сдан",
            OrderStatus::Completed => "Завершён",
            OrderStatus::Cancelled => "Отменён",
            OrderStatus::Disputed => "Спор",
        }
    }

    /// Заказ ещё требует переписки
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::InProgress
                | OrderStatus::Delivered
                | OrderStatus::Disputed
        )
    }
}

/// Строка списка чатов: один заказ и последняя активность по нему
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderChatSummary {
    pub order_id: OrderId,
    pub client_id: ClientId,
    pub client_name: String,
    pub title: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
}
