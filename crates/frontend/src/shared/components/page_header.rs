use leptos::prelude::*;

/// Заголовок страницы со счётчиком строк и кнопками справа
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    /// Сколько строк видно после фильтров; не показывается, пока `None`
    #[prop(optional, into)]
    count: MaybeProp<usize>,
    children: Children,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">
                    {title}
                    {move || count.get().map(|n| view! {
                        <span class="page-header__count">{n.to_string()}</span>
                    })}
                </h1>
                {move || subtitle.get().map(|s| view! {
                    <p class="page-header__subtitle">{s}</p>
                })}
            </div>
            <div class="page-header__actions">{children()}</div>
        </header>
    }
}
