//! Order chats - API functions

use crate::shared::api_utils::{api_url, response_error};
use contracts::domain::a003_order_chat::OrderChatSummary;
use gloo_net::http::Request;

/// Заказы текущего продавца с последней активностью в чате
pub async fn fetch_order_chats() -> Result<Vec<OrderChatSummary>, String> {
    let response = Request::get(&api_url("/api/chats/orders"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to fetch order chats").await);
    }

    response
        .json::<Vec<OrderChatSummary>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
