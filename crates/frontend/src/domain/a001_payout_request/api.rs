//! Payout requests - API functions

use crate::shared::api_utils::{api_base, api_url, path_segment, response_error};
use contracts::domain::a001_payout_request::{PayoutDecision, PayoutRequest, ReviewPayoutDto};
use contracts::domain::common::{OrderId, PayoutRequestId};
use gloo_net::http::Request;

/// Все заявки на выплату по заказу
pub async fn fetch_order_payouts(order_id: &OrderId) -> Result<Vec<PayoutRequest>, String> {
    let url = format!(
        "{}/api/orders/{}/payouts",
        api_base(),
        path_segment(order_id.as_str())
    );
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to fetch payouts").await);
    }

    response
        .json::<Vec<PayoutRequest>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Запросить выплату по заказу.
///
/// Сумму считает API по эскроу заказа. Повторная отправка с тем же
/// `idempotency_key` возвращает уже созданную заявку.
pub async fn request_payout(
    order_id: &OrderId,
    idempotency_key: &str,
) -> Result<PayoutRequest, String> {
    let url = format!(
        "{}/api/orders/{}/request-payout",
        api_base(),
        path_segment(order_id.as_str())
    );
    let response = Request::post(&url)
        .header("Accept", "application/json")
        .header("Idempotency-Key", idempotency_key)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to request payout").await);
    }

    response
        .json::<PayoutRequest>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Все заявки для админки
pub async fn fetch_all_payouts() -> Result<Vec<PayoutRequest>, String> {
    let response = Request::get(&api_url("/api/admin/payouts"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to fetch payouts").await);
    }

    response
        .json::<Vec<PayoutRequest>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Одобрить или отклонить заявку; возвращает обновлённую запись
pub async fn review_payout(
    id: &PayoutRequestId,
    decision: PayoutDecision,
    dto: &ReviewPayoutDto,
) -> Result<PayoutRequest, String> {
    let url = format!(
        "{}/api/admin/payouts/{}/{}",
        api_base(),
        path_segment(id.as_str()),
        decision.path_segment()
    );
    let response = Request::post(&url)
        .header("Accept", "application/json")
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let action = match decision {
            PayoutDecision::Approve => "Failed to approve payout",
            PayoutDecision::Reject => "Failed to reject payout",
        };
        return Err(response_error(response, action).await);
    }

    response
        .json::<PayoutRequest>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
