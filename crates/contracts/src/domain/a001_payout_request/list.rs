//! Список заявок для админки: фильтр по статусу, поиск, итоги

use super::aggregate::{PayoutRequest, PayoutStatus};
use crate::domain::common::EntityId;
use crate::shared::search::matches_any;

/// Фильтр списка заявок по статусу
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayoutStatusFilter {
    #[default]
    All,
    Only(PayoutStatus),
}

impl PayoutStatusFilter {
    pub fn matches(&self, request: &PayoutRequest) -> bool {
        match self {
            PayoutStatusFilter::All => true,
            PayoutStatusFilter::Only(status) => request.status == *status,
        }
    }

    /// Значение для `<select>`
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatusFilter::All => "all",
            PayoutStatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        PayoutStatus::from_str(s)
            .map(PayoutStatusFilter::Only)
            .unwrap_or(PayoutStatusFilter::All)
    }
}

/// Отфильтровать заявки по статусу и строке поиска.
///
/// Поиск идёт по ID заявки, ID заказа, номеру транзакции PayPal и комментарию.
/// Порядок заявок сохраняется.
pub fn filter_payouts(
    requests: &[PayoutRequest],
    status: PayoutStatusFilter,
    search: &str,
) -> Vec<PayoutRequest> {
    requests
        .iter()
        .filter(|r| status.matches(r))
        .filter(|r| {
            let id = r.id.as_string();
            let order_id = r.order_id.as_string();
            let fields = [
                id.as_str(),
                order_id.as_str(),
                r.paypal_payout_id.as_deref().unwrap_or_default(),
                r.admin_notes.as_deref().unwrap_or_default(),
            ];
            matches_any(fields, search)
        })
        .cloned()
        .collect()
}

/// Заменить заявку с тем же ID подтверждённой версией из API или добавить в конец
pub fn upsert_request(requests: &mut Vec<PayoutRequest>, confirmed: PayoutRequest) {
    match requests.iter_mut().find(|r| r.id == confirmed.id) {
        Some(existing) => *existing = confirmed,
        None => requests.push(confirmed),
    }
}

/// Количество и сумма заявок по статусам
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayoutTotals {
    pub pending_count: usize,
    pub pending_amount: f64,
    pub approved_count: usize,
    pub approved_amount: f64,
    pub rejected_count: usize,
    pub rejected_amount: f64,
}

impl PayoutTotals {
    pub fn from_requests(requests: &[PayoutRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                PayoutStatus::Pending => {
                    acc.pending_count += 1;
                    acc.pending_amount += r.amount;
                }
                PayoutStatus::Approved => {
                    acc.approved_count += 1;
                    acc.approved_amount += r.amount;
                }
                PayoutStatus::Rejected => {
                    acc.rejected_count += 1;
                    acc.rejected_amount += r.amount;
                }
            }
            acc
        })
    }

    pub fn total_count(&self) -> usize {
        self.pending_count + self.approved_count + self.rejected_count
    }
}
