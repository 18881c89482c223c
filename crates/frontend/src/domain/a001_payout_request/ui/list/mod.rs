//! Админка: все заявки на выплату с фильтром, поиском и решением по заявке

use crate::domain::a001_payout_request::api::{fetch_all_payouts, review_payout};
use crate::shared::components::{ErrorBanner, PageHeader, PaginationControls, StatCard};
use crate::shared::date_utils::{format_amount, format_datetime, format_datetime_opt};
use crate::shared::icons::icon;
use crate::shared::list_utils::{paginate, DEFAULT_PAGE_SIZE};
use contracts::domain::a001_payout_request::{
    filter_payouts, upsert_request, PayoutDecision, PayoutRequest, PayoutStatus,
    PayoutStatusFilter, PayoutTotals, ReviewPayoutDto,
};
use contracts::domain::common::PayoutRequestId;
use leptos::prelude::*;
use thaw::*;

/// Открытая форма решения по заявке
#[derive(Debug, Clone, PartialEq)]
struct ReviewDraft {
    id: PayoutRequestId,
    decision: PayoutDecision,
}

#[component]
#[allow(non_snake_case)]
pub fn PayoutAdminList() -> impl IntoView {
    let requests = RwSignal::new(Vec::<PayoutRequest>::new());
    let error = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);
    let status_filter = RwSignal::new(PayoutStatusFilter::Only(PayoutStatus::Pending));
    let search_query = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(DEFAULT_PAGE_SIZE);

    let review = RwSignal::new(None::<ReviewDraft>);
    let admin_notes = RwSignal::new(String::new());
    let paypal_payout_id = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);

    let fetch = move || {
        is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_all_payouts().await {
                Ok(v) => {
                    requests.set(v);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load payouts: {}", e);
                    error.set(Some(e));
                }
            }
            is_loading.set(false);
        });
    };

    // фильтр или поиск поменялся: возвращаемся на первую страницу
    Effect::new(move |_| {
        status_filter.track();
        search_query.track();
        page.set(0);
    });

    let filtered = Memo::new(move |_| {
        requests.with(|list| filter_payouts(list, status_filter.get(), &search_query.get()))
    });
    let current_page = Memo::new(move |_| {
        filtered.with(|list| paginate(list, page.get(), page_size.get()))
    });
    let totals = Memo::new(move |_| requests.with(|list| PayoutTotals::from_requests(list)));

    let open_review = move |id: PayoutRequestId, decision: PayoutDecision| {
        admin_notes.set(String::new());
        paypal_payout_id.set(String::new());
        review.set(Some(ReviewDraft { id, decision }));
    };

    let submit_review = move || {
        let Some(draft) = review.get_untracked() else {
            return;
        };
        let dto = ReviewPayoutDto::from_form(&admin_notes.get_untracked(), &paypal_payout_id.get_untracked());
        if let Err(e) = dto.validate(draft.decision) {
            error.set(Some(e.message));
            return;
        }

        is_saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match review_payout(&draft.id, draft.decision, &dto).await {
                Ok(updated) => {
                    log::info!(
                        "Payout {} {}",
                        updated.id,
                        updated.status.as_str()
                    );
                    requests.update(|list| upsert_request(list, updated));
                    review.set(None);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Payout review failed for {}: {}", draft.id, e);
                    error.set(Some(e));
                }
            }
            is_saving.set(false);
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader
                title="Заявки на выплату"
                subtitle="Одобрение и отклонение выплат продавцам"
                count=Signal::derive(move || Some(filtered.with(|list| list.len())))
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    " Обновить"
                </Button>
            </PageHeader>

            <div class="stat-cards">
                <StatCard
                    label="На рассмотрении"
                    icon_name="payout"
                    value=Signal::derive(move || totals.get().pending_count.to_string())
                    hint=Signal::derive(move || Some(format_amount(totals.get().pending_amount)))
                />
                <StatCard
                    label="Одобрено"
                    icon_name="check"
                    value=Signal::derive(move || totals.get().approved_count.to_string())
                    hint=Signal::derive(move || Some(format_amount(totals.get().approved_amount)))
                />
                <StatCard
                    label="Отклонено"
                    icon_name="x"
                    value=Signal::derive(move || totals.get().rejected_count.to_string())
                    hint=Signal::derive(move || Some(format_amount(totals.get().rejected_amount)))
                />
            </div>

            <div class="filter-panel">
                <select
                    class="filter-panel__select"
                    prop:value=move || status_filter.get().as_str()
                    on:change=move |ev| status_filter.set(PayoutStatusFilter::from_str(&event_target_value(&ev)))
                >
                    <option value="all">"Все статусы"</option>
                    {PayoutStatus::all().into_iter().map(|status| view! {
                        <option value=status.as_str()>{status.label()}</option>
                    }).collect_view()}
                </select>
                <div style="width: 320px;">
                    <Input value=search_query placeholder="Заказ, заявка, PayPal или комментарий..." />
                </div>
            </div>

            <ErrorBanner error=error />

            {move || review.get().map(|draft| {
                let title = match draft.decision {
                    PayoutDecision::Approve => format!("Одобрить заявку {}", draft.id),
                    PayoutDecision::Reject => format!("Отклонить заявку {}", draft.id),
                };
                let is_approve = draft.decision == PayoutDecision::Approve;
                view! {
                    <div class="review-form">
                        <h3 class="review-form__title">{title}</h3>
                        <Textarea value=admin_notes placeholder="Комментарий администратора" />
                        <Show when=move || is_approve>
                            <Input value=paypal_payout_id placeholder="Номер транзакции PayPal" />
                        </Show>
                        <Space>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| submit_review()
                                disabled=Signal::derive(move || is_saving.get())
                            >
                                {move || if is_saving.get() { "Сохранение..." } else { "Подтвердить" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| review.set(None)
                                disabled=Signal::derive(move || is_saving.get())
                            >
                                "Отменить"
                            </Button>
                        </Space>
                    </div>
                }
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Заявка"</th>
                            <th class="table__header-cell">"Заказ"</th>
                            <th class="table__header-cell">"Сумма"</th>
                            <th class="table__header-cell">"Статус"</th>
                            <th class="table__header-cell">"Запрошено"</th>
                            <th class="table__header-cell">"Обработано"</th>
                            <th class="table__header-cell">"Комментарий"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || current_page.get().items.into_iter().map(|row| {
                            let is_pending = row.is_pending();
                            let id_for_approve = row.id.clone();
                            let id_for_reject = row.id.clone();
                            view! {
                                <tr class="table__row">
                                    <td class="table__cell">{row.id.to_string()}</td>
                                    <td class="table__cell">{row.order_id.to_string()}</td>
                                    <td class="table__cell table__cell--money">{format_amount(row.amount)}</td>
                                    <td class="table__cell">{status_badge(row.status)}</td>
                                    <td class="table__cell">{format_datetime(&row.requested_at)}</td>
                                    <td class="table__cell">{format_datetime_opt(row.processed_at.as_ref())}</td>
                                    <td class="table__cell">{row.admin_notes.unwrap_or_default()}</td>
                                    <td class="table__cell">
                                        <Show when=move || is_pending>
                                            {
                                            let id_for_approve = id_for_approve.clone();
                                            let id_for_reject = id_for_reject.clone();
                                            view! {
                                            <Space gap=SpaceGap::Small>
                                                <Button
                                                    appearance=ButtonAppearance::Primary
                                                    on_click={
                                                        let id = id_for_approve.clone();
                                                        move |_| open_review(id.clone(), PayoutDecision::Approve)
                                                    }
                                                >
                                                    {icon("check")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    on_click={
                                                        let id = id_for_reject.clone();
                                                        move |_| open_review(id.clone(), PayoutDecision::Reject)
                                                    }
                                                >
                                                    {icon("x")}
                                                </Button>
                                            </Space>
                                            }
                                            }
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || current_page.get().page)
                total_pages=Signal::derive(move || current_page.get().total_pages)
                total_count=Signal::derive(move || current_page.get().total_count)
                page_size=page_size
                on_page_change=Callback::new(move |p| page.set(p))
                on_page_size_change=Callback::new(move |size| {
                    page_size.set(size);
                    page.set(0);
                })
            />
        </div>
    }
}

fn status_badge(status: PayoutStatus) -> impl IntoView {
    let color = match status {
        PayoutStatus::Pending => BadgeColor::Warning,
        PayoutStatus::Approved => BadgeColor::Success,
        PayoutStatus::Rejected => BadgeColor::Danger,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {status.label()}
        </Badge>
    }
}
