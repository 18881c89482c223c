//! Группировка заказов по клиенту для списка чатов

use super::aggregate::OrderChatSummary;
use crate::domain::common::ClientId;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Все заказы одного клиента
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOrderGroup {
    pub client_id: ClientId,
    pub client_name: String,
    /// От последней активности к ранней, заказы без сообщений в конце
    pub orders: Vec<OrderChatSummary>,
    pub total_unread: u32,
}

impl ClientOrderGroup {
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.orders.iter().filter_map(|o| o.last_message_at).max()
    }

    pub fn has_unread(&self) -> bool {
        self.total_unread > 0
    }
}

/// Сгруппировать заказы по `client_id`.
///
/// Группы упорядочены по последней активности (новые сверху), при равенстве
/// по первому появлению клиента во входном списке.
pub fn group_orders_by_client(orders: &[OrderChatSummary]) -> Vec<ClientOrderGroup> {
    let mut index: HashMap<&ClientId, usize> = HashMap::new();
    let mut groups: Vec<ClientOrderGroup> = Vec::new();

    for order in orders {
        let position = *index.entry(&order.client_id).or_insert_with(|| {
            groups.push(ClientOrderGroup {
                client_id: order.client_id.clone(),
                client_name: order.client_name.clone(),
                orders: Vec::new(),
                total_unread: 0,
            });
            groups.len() - 1
        });
        let group = &mut groups[position];
        group.total_unread += order.unread_count;
        group.orders.push(order.clone());
    }

    for group in &mut groups {
        // None < Some, поэтому после Reverse заказы без даты уходят в конец
        group.orders.sort_by_key(|o| Reverse(o.last_message_at));
    }
    groups.sort_by_key(|g| Reverse(g.last_activity()));
    groups
}
