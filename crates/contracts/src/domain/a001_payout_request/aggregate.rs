use crate::domain::common::{OrderId, PayoutRequestId};
use crate::shared::{ContractError, ContractResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Сколько отклонённых заявок допускается по одному заказу
pub const MAX_PAYOUT_ATTEMPTS: usize = 3;

/// Максимальная длина комментария администратора
pub const MAX_ADMIN_NOTES_LEN: usize = 1000;

/// Статус заявки на выплату
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Approved,
    Rejected,
}

impl PayoutStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(PayoutStatus::Pending),
            "approved" => Ok(PayoutStatus::Approved),
            "rejected" => Ok(PayoutStatus::Rejected),
            _ => Err(format!("Unknown payout status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Approved => "approved",
            PayoutStatus::Rejected => "rejected",
        }
    }

    /// Подпись для UI
    pub fn label(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "На рассмотрении",
            PayoutStatus::Approved => "Одобрена",
            PayoutStatus::Rejected => "Отклонена",
        }
    }

    pub fn all() -> [PayoutStatus; 3] {
        [
            PayoutStatus::Pending,
            PayoutStatus::Approved,
            PayoutStatus::Rejected,
        ]
    }
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Заявка на выплату по заказу
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    #[serde(alias = "_id")]
    pub id: PayoutRequestId,
    pub order_id: OrderId,
    pub amount: f64,
    pub status: PayoutStatus,
    pub requested_at: DateTime<Utc>,
    /// Заполняется, когда заявка покидает статус pending
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Номер транзакции PayPal, заполняется при одобрении
    #[serde(default)]
    pub paypal_payout_id: Option<String>,
}

impl PayoutRequest {
    /// Новая заявка в статусе pending
    pub fn new_pending(
        id: PayoutRequestId,
        order_id: OrderId,
        amount: f64,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            amount,
            status: PayoutStatus::Pending,
            requested_at,
            processed_at: None,
            admin_notes: None,
            paypal_payout_id: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PayoutStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.status == PayoutStatus::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.status == PayoutStatus::Rejected
    }
}

/// Решение администратора по заявке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutDecision {
    Approve,
    Reject,
}

impl PayoutDecision {
    /// Сегмент пути в API (`/api/admin/payouts/{id}/approve`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            PayoutDecision::Approve => "approve",
            PayoutDecision::Reject => "reject",
        }
    }
}

/// DTO для одобрения или отклонения заявки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayoutDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal_payout_id: Option<String>,
}

impl ReviewPayoutDto {
    /// Собрать DTO из полей формы, пустые строки превращаются в `None`
    pub fn from_form(admin_notes: &str, paypal_payout_id: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Self {
            admin_notes: non_empty(admin_notes),
            paypal_payout_id: non_empty(paypal_payout_id),
        }
    }

    /// Проверка формы перед отправкой решения
    pub fn validate(&self, decision: PayoutDecision) -> ContractResult<()> {
        if let Some(notes) = &self.admin_notes {
            if notes.chars().count() > MAX_ADMIN_NOTES_LEN {
                return Err(ContractError::validation(format!(
                    "Комментарий длиннее {} символов",
                    MAX_ADMIN_NOTES_LEN
                ))
                .with_details("adminNotes"));
            }
        }
        match decision {
            PayoutDecision::Reject if self.admin_notes.is_none() => Err(
                ContractError::validation("Укажите причину отклонения").with_details("adminNotes"),
            ),
            PayoutDecision::Reject if self.paypal_payout_id.is_some() => Err(
                ContractError::validation("У отклонённой заявки не может быть транзакции PayPal")
                    .with_details("paypalPayoutId"),
            ),
            _ => Ok(()),
        }
    }
}
