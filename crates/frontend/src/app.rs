use crate::domain::a001_payout_request::ui::list::PayoutAdminList;
use crate::domain::a001_payout_request::ui::panel::PayoutPanel;
use crate::domain::a002_comment::ui::thread::CommentThread;
use crate::domain::a003_order_chat::ui::list::OrderChatList;
use crate::shared::api_utils::query_param;
use contracts::domain::common::{OrderId, PostId};
use leptos::prelude::*;

/// Публикация для обсуждения, если в адресе нет `?post=`
const DEFAULT_POST_ID: &str = "general";

/// Раздел приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Orders,
    AdminPayouts,
    Comments,
}

impl Section {
    fn title(&self) -> &'static str {
        match self {
            Section::Orders => "Заказы",
            Section::AdminPayouts => "Выплаты",
            Section::Comments => "Обсуждение",
        }
    }

    fn all() -> [Section; 3] {
        [Section::Orders, Section::AdminPayouts, Section::Comments]
    }
}

#[component]
pub fn App() -> impl IntoView {
    let section = RwSignal::new(Section::Orders);
    let selected_order = RwSignal::new(None::<OrderId>);
    let post_id = query_param("post")
        .map(PostId::new)
        .unwrap_or_else(|| PostId::new(DEFAULT_POST_ID));
    let can_moderate = query_param("moderate").is_some();

    view! {
        <div class="app">
            <nav class="app__nav">
                {Section::all().into_iter().map(|s| view! {
                    <button
                        class="app__nav-item"
                        class:app__nav-item--active=move || section.get() == s
                        on:click=move |_| section.set(s)
                    >
                        {s.title()}
                    </button>
                }).collect_view()}
            </nav>

            <main class="app__content">
                {move || match section.get() {
                    Section::Orders => view! {
                        <div class="orders-layout">
                            <OrderChatList
                                on_select=Callback::new(move |id| selected_order.set(Some(id)))
                                selected=Signal::derive(move || selected_order.get())
                            />
                            <div class="orders-layout__detail">
                                {move || match selected_order.get() {
                                    Some(order_id) => view! { <PayoutPanel order_id=order_id /> }.into_any(),
                                    None => view! {
                                        <p class="orders-layout__hint">"Выберите заказ слева"</p>
                                    }.into_any(),
                                }}
                            </div>
                        </div>
                    }.into_any(),
                    Section::AdminPayouts => view! { <PayoutAdminList /> }.into_any(),
                    Section::Comments => {
                        let post_id = post_id.clone();
                        view! { <CommentThread post_id=post_id can_moderate=can_moderate /> }.into_any()
                    }
                }}
            </main>
        </div>
    }
}
