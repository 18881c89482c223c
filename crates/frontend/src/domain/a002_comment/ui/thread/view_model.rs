//! Comment thread - View Model
//!
//! Дерево хранится в [`CommentArena`]: ответ вставляется под родителя без
//! копирования всего дерева. Арена меняется только после ответа API.

use crate::domain::a002_comment::api::{create_comment, delete_comment, fetch_comments};
use contracts::domain::a002_comment::{CommentArena, CreateCommentDto};
use contracts::domain::common::{CommentId, PostId};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CommentThreadVm {
    pub post_id: StoredValue<PostId>,
    pub arena: RwSignal<CommentArena>,
    /// Комментарий, под которым открыта форма ответа
    pub reply_to: RwSignal<Option<CommentId>>,
    pub author_name: RwSignal<String>,
    pub root_draft: RwSignal<String>,
    pub reply_draft: RwSignal<String>,
    pub is_loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    /// Комментарий, удаление которого ещё не подтверждено
    pub deleting: RwSignal<Option<CommentId>>,
    pub error: RwSignal<Option<String>>,
}

impl CommentThreadVm {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id: StoredValue::new(post_id),
            arena: RwSignal::new(CommentArena::new()),
            reply_to: RwSignal::new(None),
            author_name: RwSignal::new(String::new()),
            root_draft: RwSignal::new(String::new()),
            reply_draft: RwSignal::new(String::new()),
            is_loading: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            deleting: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }

    pub fn load(self) {
        let post_id = self.post_id.get_value();
        self.is_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_comments(&post_id).await {
                Ok(tree) => {
                    self.arena.update(|arena| arena.rehydrate(&tree));
                    log::debug!(
                        "Loaded {} comments for post {}",
                        self.arena.with_untracked(|a| a.len()),
                        post_id
                    );
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load comments for post {}: {}", post_id, e);
                    self.error.set(Some(e));
                }
            }
            self.is_loading.set(false);
        });
    }

    pub fn open_reply(&self, parent_id: CommentId) {
        self.reply_draft.set(String::new());
        self.reply_to.set(Some(parent_id));
    }

    pub fn cancel_reply(&self) {
        self.reply_to.set(None);
    }

    /// Новый комментарий верхнего уровня
    pub fn submit_root(self) {
        let message = self.root_draft.get_untracked();
        self.submit(None, message);
    }

    /// Ответ на комментарий из `reply_to`
    pub fn submit_reply(self) {
        let Some(parent_id) = self.reply_to.get_untracked() else {
            return;
        };
        let message = self.reply_draft.get_untracked();
        self.submit(Some(parent_id), message);
    }

    fn submit(self, parent_id: Option<CommentId>, message: String) {
        if self.is_submitting.get_untracked() {
            return;
        }
        let dto = CreateCommentDto::new(&self.author_name.get_untracked(), &message, parent_id);
        if let Err(e) = dto.validate() {
            self.error.set(Some(e.message));
            return;
        }

        let post_id = self.post_id.get_value();
        self.is_submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match create_comment(&post_id, &dto).await {
                Ok(created) => {
                    let created_id = created.id.clone();
                    let inserted = self.arena.try_update(|arena| match &dto.parent_id {
                        Some(parent_id) => arena.insert_reply(parent_id, created),
                        None => arena.push_root(created),
                    });
                    if inserted == Some(true) {
                        log::info!("Comment {} added to post {}", created_id, post_id);
                    } else {
                        // родителя уже нет локально: берём дерево с сервера
                        log::warn!("Comment {} has no local parent, reloading", created_id);
                        self.load();
                    }
                    match dto.parent_id {
                        Some(_) => {
                            self.reply_draft.set(String::new());
                            self.reply_to.set(None);
                        }
                        None => self.root_draft.set(String::new()),
                    }
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to post comment to {}: {}", post_id, e);
                    self.error.set(Some(e));
                }
            }
            self.is_submitting.set(false);
        });
    }

    /// Удалить комментарий вместе с ответами
    pub fn delete(self, id: CommentId) {
        if self.deleting.get_untracked().is_some() {
            return;
        }
        self.deleting.set(Some(id.clone()));
        wasm_bindgen_futures::spawn_local(async move {
            match delete_comment(&id).await {
                Ok(()) => {
                    let removed = self
                        .arena
                        .try_update(|arena| arena.remove(&id))
                        .unwrap_or(false);
                    if removed {
                        log::info!("Comment {} deleted", id);
                    } else {
                        log::debug!("Comment {} was already gone locally", id);
                    }
                    // форма ответа могла быть открыта внутри удалённого поддерева
                    let reply_gone = self.reply_to.with_untracked(|target| {
                        target
                            .as_ref()
                            .is_some_and(|t| !self.arena.with_untracked(|a| a.contains(t)))
                    });
                    if reply_gone {
                        self.reply_to.set(None);
                    }
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to delete comment {}: {}", id, e);
                    self.error.set(Some(e));
                }
            }
            self.deleting.set(None);
        });
    }
}
