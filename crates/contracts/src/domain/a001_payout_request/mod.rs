//! Заявки на выплату по заказам
//!
//! Продавец запрашивает вывод своей доли средств заказа, администратор
//! одобряет или отклоняет заявку на стороне API. Клиент только отражает
//! эти переходы: см. [`derive_payout_state`].

pub mod aggregate;
pub mod list;
pub mod state;

pub use aggregate::{
    PayoutDecision, PayoutRequest, PayoutStatus, ReviewPayoutDto, MAX_PAYOUT_ATTEMPTS,
};
pub use list::{filter_payouts, upsert_request, PayoutStatusFilter, PayoutTotals};
pub use state::{derive_payout_state, PayoutAction, PayoutAttempts, PayoutState};
