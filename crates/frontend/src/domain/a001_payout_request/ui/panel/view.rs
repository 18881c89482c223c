//! Payout panel - View Component
//!
//! Блок выплаты на странице заказа: статус последней заявки и одна кнопка,
//! выбранная по [`PayoutState::primary_action`].

use super::view_model::PayoutPanelVm;
use crate::shared::components::ErrorBanner;
use crate::shared::date_utils::{format_amount, format_datetime, format_datetime_opt};
use crate::shared::icons::icon;
use contracts::domain::a001_payout_request::{PayoutAction, PayoutRequest, PayoutState};
use contracts::domain::common::OrderId;
use leptos::prelude::*;
use thaw::*;

/// Адрес страницы поддержки для исчерпанного лимита заявок
const SUPPORT_PATH: &str = "/support?topic=payout";

#[component]
#[allow(non_snake_case)]
pub fn PayoutPanel(order_id: OrderId) -> impl IntoView {
    let vm = PayoutPanelVm::new(order_id);
    vm.load();

    let state = Memo::new(move |_| vm.state());

    view! {
        <div class="payout-panel">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 class="payout-panel__title">
                    {icon("payout")}
                    {move || state.get().title()}
                </h3>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.load()
                    disabled=Signal::derive(move || vm.is_loading.get())
                >
                    {icon("refresh")}
                </Button>
            </Flex>

            <ErrorBanner error=vm.error />

            {move || state.get().current_request().cloned().map(render_request_details)}

            {move || render_action(vm, state.get().primary_action())}
        </div>
    }
}

fn render_request_details(request: PayoutRequest) -> impl IntoView {
    view! {
        <dl class="payout-panel__details">
            <dt>"Сумма"</dt>
            <dd>{format_amount(request.amount)}</dd>
            <dt>"Запрошено"</dt>
            <dd>{format_datetime(&request.requested_at)}</dd>
            <dt>"Обработано"</dt>
            <dd>{format_datetime_opt(request.processed_at.as_ref())}</dd>
            {request.paypal_payout_id.map(|id| view! {
                <dt>"Транзакция PayPal"</dt>
                <dd>{id}</dd>
            })}
            {request.admin_notes.map(|notes| view! {
                <dt>"Комментарий администратора"</dt>
                <dd>{notes}</dd>
            })}
        </dl>
    }
}

fn render_action(vm: PayoutPanelVm, action: PayoutAction) -> AnyView {
    let submitting = Signal::derive(move || vm.is_submitting.get());
    match action {
        PayoutAction::RequestPayout => view! {
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.submit()
                disabled=submitting
            >
                {move || if submitting.get() { "Отправка..." } else { "Запросить выплату" }}
            </Button>
        }
        .into_any(),
        PayoutAction::Retry { attempt, of } => view! {
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.submit()
                disabled=submitting
            >
                {move || {
                    if submitting.get() {
                        "Отправка...".to_string()
                    } else {
                        format!("Запросить повторно (попытка {} из {})", attempt, of)
                    }
                }}
            </Button>
        }
        .into_any(),
        PayoutAction::ContactSupport => view! {
            <a class="button button--secondary" href=SUPPORT_PATH>
                "Связаться с поддержкой"
            </a>
        }
        .into_any(),
        PayoutAction::NoAction => match vm.state() {
            PayoutState::Pending { .. } => view! {
                <p class="payout-panel__hint">"Заявка ожидает решения администратора."</p>
            }
            .into_any(),
            _ => view! { <></> }.into_any(),
        },
    }
}
