use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка с одним показателем (количество и сумма)
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Formatted primary value
    #[prop(into)]
    value: Signal<String>,
    /// Secondary line under the value
    #[prop(optional, into)]
    hint: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(&icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{move || value.get()}</div>
            {move || hint.get().map(|h| view! { <div class="stat-card__hint">{h}</div> })}
        </div>
    }
}
