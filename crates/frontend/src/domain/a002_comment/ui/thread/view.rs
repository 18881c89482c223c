//! Comment thread - View Component

use super::view_model::CommentThreadVm;
use crate::shared::components::ErrorBanner;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use contracts::domain::a002_comment::MAX_MESSAGE_LEN;
use contracts::domain::common::{CommentId, PostId};
use leptos::prelude::*;
use thaw::*;

/// Обсуждение публикации с ответами любой вложенности.
///
/// `can_moderate` показывает кнопку удаления; права проверяет API.
#[component]
#[allow(non_snake_case)]
pub fn CommentThread(
    post_id: PostId,
    #[prop(optional)] can_moderate: bool,
) -> impl IntoView {
    let vm = CommentThreadVm::new(post_id);
    vm.load();

    let count = Memo::new(move |_| vm.arena.with(|a| a.len()));

    view! {
        <section class="comment-thread">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 class="comment-thread__title">
                    {icon("message")}
                    {move || format!(" Комментарии ({})", count.get())}
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

            <div class="comment-form">
                <Input value=vm.author_name placeholder="Ваше имя" />
                <Textarea value=vm.root_draft placeholder="Написать комментарий..." />
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <span class="comment-form__counter">
                        {move || format!("{} / {}", vm.root_draft.with(|d| d.chars().count()), MAX_MESSAGE_LEN)}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit_root()
                        disabled=Signal::derive(move || vm.is_submitting.get())
                    >
                        "Отправить"
                    </Button>
                </Flex>
            </div>

            <Show
                when=move || (!vm.is_loading.get() || count.get() > 0)
                fallback=|| view! { <Spinner /> }
            >
                <div class="comment-thread__list">
                    {move || {
                        let roots = vm.arena.with(|a| a.roots().to_vec());
                        if roots.is_empty() {
                            view! { <p class="comment-thread__empty">"Комментариев пока нет"</p> }.into_any()
                        } else {
                            roots
                                .into_iter()
                                .map(|id| render_comment(vm, id, can_moderate))
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </section>
    }
}

/// Комментарий и, рекурсивно, все ответы на него
fn render_comment(vm: CommentThreadVm, id: CommentId, can_moderate: bool) -> AnyView {
    let Some(comment) = vm.arena.with_untracked(|a| a.get(&id).cloned()) else {
        return ().into_any();
    };
    let children = vm.arena.with_untracked(|a| a.children(&id).to_vec());

    let id_for_reply = id.clone();
    let id_for_delete = id.clone();
    let id_for_form = id.clone();
    let is_deleting = {
        let id = id.clone();
        Signal::derive(move || vm.deleting.with(|d| d.as_ref() == Some(&id)))
    };

    view! {
        <article class="comment" class:comment--admin=comment.is_admin>
            <header class="comment__header">
                <span class="comment__author">{comment.name}</span>
                {comment.is_admin.then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"Админ"</Badge>
                })}
                <span class="comment__date">{format_datetime(&comment.created_at)}</span>
            </header>
            <p class="comment__message">{comment.message}</p>
            <Space gap=SpaceGap::Small>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.open_reply(id_for_reply.clone())
                >
                    {icon("reply")}
                    " Ответить"
                </Button>
                <Show when=move || can_moderate>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click={
                            let id = id_for_delete.clone();
                            move |_| vm.delete(id.clone())
                        }
                        disabled=is_deleting
                    >
                        {icon("delete")}
                        " Удалить"
                    </Button>
                </Show>
            </Space>

            <Show when={
                let id = id_for_form.clone();
                move || vm.reply_to.with(|r| r.as_ref() == Some(&id))
            }>
                <div class="comment-form comment-form--reply">
                    <Textarea value=vm.reply_draft placeholder="Ваш ответ..." />
                    <Space gap=SpaceGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.submit_reply()
                            disabled=Signal::derive(move || vm.is_submitting.get())
                        >
                            "Ответить"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.cancel_reply()
                        >
                            "Отменить"
                        </Button>
                    </Space>
                </div>
            </Show>

            <div class="comment__replies">
                {children
                    .into_iter()
                    .map(|child| render_comment(vm, child, can_moderate))
                    .collect_view()}
            </div>
        </article>
    }
    .into_any()
}
