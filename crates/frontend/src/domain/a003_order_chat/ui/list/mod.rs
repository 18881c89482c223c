//! Список чатов по заказам, сгруппированный по клиентам

use crate::domain::a003_order_chat::api::fetch_order_chats;
use crate::shared::components::ErrorBanner;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use contracts::domain::a003_order_chat::{group_orders_by_client, ClientOrderGroup, OrderChatSummary};
use contracts::domain::common::{EntityId, OrderId};
use contracts::shared::search::matches_any;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn OrderChatList(
    /// Выбран заказ
    on_select: Callback<OrderId>,
    /// Подсветка выбранного заказа
    #[prop(optional, into)]
    selected: MaybeProp<OrderId>,
) -> impl IntoView {
    let orders = RwSignal::new(Vec::<OrderChatSummary>::new());
    let error = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);
    let search_query = RwSignal::new(String::new());
    let active_only = RwSignal::new(true);

    let fetch = move || {
        is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_order_chats().await {
                Ok(v) => {
                    log::debug!("Loaded {} order chats", v.len());
                    orders.set(v);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load order chats: {}", e);
                    error.set(Some(e));
                }
            }
            is_loading.set(false);
        });
    };

    let groups = Memo::new(move |_| {
        let query = search_query.get();
        let only_active = active_only.get();
        orders.with(|list| {
            let visible: Vec<OrderChatSummary> = list
                .iter()
                .filter(|o| !only_active || o.status.is_active())
                .filter(|o| {
                    let order_id = o.order_id.as_string();
                    matches_any([o.client_name.as_str(), o.title.as_str(), order_id.as_str()], &query)
                })
                .cloned()
                .collect();
            group_orders_by_client(&visible)
        })
    });

    fetch();

    view! {
        <aside class="order-chats">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 class="order-chats__title">{icon("message")}" Чаты"</h3>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch()>
                    {icon("refresh")}
                </Button>
            </Flex>

            <Input value=search_query placeholder="Клиент, заказ..." />
            <label class="order-chats__toggle">
                <input
                    type="checkbox"
                    prop:checked=move || active_only.get()
                    on:change=move |ev| active_only.set(event_target_checked(&ev))
                />
                " Только активные"
            </label>

            <ErrorBanner error=error />

            {move || {
                if is_loading.get() && orders.with(|o| o.is_empty()) {
                    return view! { <Spinner /> }.into_any();
                }
                let groups = groups.get();
                if groups.is_empty() {
                    return view! { <p class="order-chats__empty">"Нет заказов"</p> }.into_any();
                }
                groups
                    .into_iter()
                    .map(|group| render_group(group, on_select, selected))
                    .collect_view()
                    .into_any()
            }}
        </aside>
    }
}

fn render_group(
    group: ClientOrderGroup,
    on_select: Callback<OrderId>,
    selected: MaybeProp<OrderId>,
) -> impl IntoView {
    let unread = group.has_unread().then_some(group.total_unread);
    view! {
        <div class="order-chats__group">
            <div class="order-chats__client">
                <span>{group.client_name}</span>
                {unread.map(|n| view! {
                    <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>{n.to_string()}</Badge>
                })}
            </div>
            {group.orders.into_iter().map(|order| {
                let order_id = order.order_id.clone();
                let is_selected = {
                    let order_id = order_id.clone();
                    move || selected.get().as_ref() == Some(&order_id)
                };
                view! {
                    <button
                        class="order-chats__order"
                        class:order-chats__order--selected=is_selected
                        on:click=move |_| on_select.run(order_id.clone())
                    >
                        <span class="order-chats__order-title">{order.title}</span>
                        <span class="order-chats__order-status">{order.status.label()}</span>
                        <span class="order-chats__order-date">{format_datetime_opt(order.last_message_at.as_ref())}</span>
                        {(order.unread_count > 0).then(|| view! {
                            <span class="order-chats__order-unread">{order.unread_count.to_string()}</span>
                        })}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
