//! Payout panel - View Model

use crate::domain::a001_payout_request::api::{fetch_order_payouts, request_payout};
use crate::shared::idempotency::IdempotencyKey;
use contracts::domain::a001_payout_request::{
    derive_payout_state, list::upsert_request, PayoutAction, PayoutRequest, PayoutState,
};
use contracts::domain::common::OrderId;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PayoutPanelVm {
    pub order_id: StoredValue<OrderId>,
    pub requests: RwSignal<Vec<PayoutRequest>>,
    pub is_loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// Ключ неподтверждённой заявки, переживает ошибку отправки
    pub idempotency_key: StoredValue<IdempotencyKey>,
}

impl PayoutPanelVm {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id: StoredValue::new(order_id),
            requests: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            error: RwSignal::new(None),
            idempotency_key: StoredValue::new(IdempotencyKey::new()),
        }
    }

    /// Текущее состояние выплаты, пересчитывается при каждом изменении списка
    pub fn state(&self) -> PayoutState {
        self.requests.with(|requests| derive_payout_state(requests))
    }

    pub fn load(self) {
        let order_id = self.order_id.get_value();
        self.is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_order_payouts(&order_id).await {
                Ok(requests) => {
                    log::debug!("Loaded {} payout requests for order {}", requests.len(), order_id);
                    // заявка с потерянным ответом дошла до API: ключ больше не нужен
                    if matches!(
                        derive_payout_state(&requests),
                        PayoutState::Pending { .. } | PayoutState::Approved { .. }
                    ) {
                        self.idempotency_key.update_value(IdempotencyKey::confirm);
                    }
                    self.requests.set(requests);
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load payouts for order {}: {}", order_id, e);
                    self.error.set(Some(e));
                }
            }
            self.is_loading.set(false);
        });
    }

    /// Отправить заявку (первую или повторную).
    ///
    /// Локальный список меняется только после ответа API.
    pub fn submit(self) {
        if self.is_submitting.get_untracked() {
            return;
        }
        let allowed = matches!(
            self.requests
                .with_untracked(|requests| derive_payout_state(requests))
                .primary_action(),
            PayoutAction::RequestPayout | PayoutAction::Retry { .. }
        );
        if !allowed {
            return;
        }

        let order_id = self.order_id.get_value();
        let mut key = String::new();
        self.idempotency_key.update_value(|k| key = k.get_or_create());
        self.is_submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match request_payout(&order_id, &key).await {
                Ok(created) => {
                    log::info!("Payout requested for order {}: {}", order_id, created.id);
                    self.idempotency_key.update_value(IdempotencyKey::confirm);
                    self.requests.update(|requests| upsert_request(requests, created));
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!(
                        "Payout request for order {} failed (key {}): {}",
                        order_id,
                        key,
                        e
                    );
                    self.error.set(Some(e));
                }
            }
            self.is_submitting.set(false);
        });
    }
}
