//! Дерево комментариев в виде арены: узлы по ID и явные списки детей.
//!
//! Вставка ответа и отсоединение узла не копируют дерево. Для отрисовки и
//! сравнения с ответом API арена разворачивается обратно в `Vec<Comment>`.

use super::aggregate::Comment;
use crate::domain::common::CommentId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct CommentNode {
    /// Комментарий без ответов: они хранятся в `children`
    comment: Comment,
    parent: Option<CommentId>,
    children: Vec<CommentId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentArena {
    nodes: HashMap<CommentId, CommentNode>,
    roots: Vec<CommentId>,
}

impl CommentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собрать арену из дерева API.
    ///
    /// При повторяющихся ID остаётся первый узел в порядке обхода в глубину,
    /// повторы пропускаются вместе с поддеревом.
    pub fn from_tree(tree: &[Comment]) -> Self {
        let mut arena = Self::new();
        for comment in tree {
            arena.absorb(None, comment.clone());
        }
        arena
    }

    /// Заменить содержимое каноническим деревом с сервера
    pub fn rehydrate(&mut self, tree: &[Comment]) {
        *self = Self::from_tree(tree);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &CommentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn roots(&self) -> &[CommentId] {
        &self.roots
    }

    /// Комментарий по ID; поле `replies` у него всегда пустое, дети в [`Self::children`]
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.nodes.get(id).map(|node| &node.comment)
    }

    pub fn children(&self, id: &CommentId) -> &[CommentId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: &CommentId) -> Option<&CommentId> {
        self.nodes.get(id).and_then(|node| node.parent.as_ref())
    }

    /// Глубина узла: 0 для комментариев верхнего уровня
    pub fn depth(&self, id: &CommentId) -> Option<usize> {
        let mut current = self.nodes.get(id)?;
        let mut depth = 0;
        while let Some(parent_id) = &current.parent {
            current = self.nodes.get(parent_id)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Добавить комментарий верхнего уровня
    pub fn push_root(&mut self, comment: Comment) -> bool {
        self.absorb(None, comment)
    }

    /// Добавить ответ в конец списка детей `parent_id`.
    ///
    /// `false`, если родителя нет или комментарий с таким ID уже есть.
    pub fn insert_reply(&mut self, parent_id: &CommentId, reply: Comment) -> bool {
        if !self.nodes.contains_key(parent_id) {
            return false;
        }
        self.absorb(Some(parent_id.clone()), reply)
    }

    /// Удалить узел и всё его поддерево
    pub fn remove(&mut self, target_id: &CommentId) -> bool {
        let Some(node) = self.nodes.get(target_id) else {
            return false;
        };

        match node.parent.clone() {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|id| id != target_id);
                }
            }
            None => self.roots.retain(|id| id != target_id),
        }

        let mut stack = vec![target_id.clone()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Развернуть арену в дерево в порядке отображения
    pub fn to_tree(&self) -> Vec<Comment> {
        self.roots.iter().filter_map(|id| self.build(id)).collect()
    }

    fn build(&self, id: &CommentId) -> Option<Comment> {
        let node = self.nodes.get(id)?;
        let mut comment = node.comment.clone();
        comment.replies = node
            .children
            .iter()
            .filter_map(|child| self.build(child))
            .collect();
        Some(comment)
    }

    fn absorb(&mut self, parent: Option<CommentId>, mut comment: Comment) -> bool {
        if self.nodes.contains_key(&comment.id) {
            return false;
        }

        let id = comment.id.clone();
        let replies = std::mem::take(&mut comment.replies);

        match &parent {
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(parent_node) => parent_node.children.push(id.clone()),
                None => return false,
            },
            None => self.roots.push(id.clone()),
        }

        self.nodes.insert(
            id.clone(),
            CommentNode {
                comment,
                parent,
                children: Vec::new(),
            },
        );

        for reply in replies {
            self.absorb(Some(id.clone()), reply);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_comment::tree::{insert_reply, remove_node};
    use chrono::{TimeZone, Utc};

    fn comment(id: &str) -> Comment {
        Comment::new(
            CommentId::new(id),
            "Admin",
            format!("text {}", id),
            true,
            Utc.with_ymd_and_hms(2025, 4, 2, 15, 30, 0).unwrap(),
        )
    }

    fn id(s: &str) -> CommentId {
        CommentId::new(s)
    }

    fn sample_tree() -> Vec<Comment> {
        vec![
            comment("c1").with_replies(vec![
                comment("c2").with_replies(vec![comment("c4")]),
                comment("c3"),
            ]),
            comment("c5"),
        ]
    }

    #[test]
    fn test_round_trip() {
        let arena = CommentArena::from_tree(&sample_tree());
        assert_eq!(arena.len(), 5);
        assert_eq!(arena.to_tree(), sample_tree());
        assert_eq!(arena.roots(), &[id("c1"), id("c5")]);
        assert_eq!(arena.children(&id("c1")), &[id("c2"), id("c3")]);
        assert!(arena.get(&id("c1")).unwrap().replies.is_empty());
    }

    #[test]
    fn test_depth_and_parent() {
        let arena = CommentArena::from_tree(&sample_tree());
        assert_eq!(arena.depth(&id("c1")), Some(0));
        assert_eq!(arena.depth(&id("c4")), Some(2));
        assert_eq!(arena.depth(&id("missing")), None);
        assert_eq!(arena.parent(&id("c4")), Some(&id("c2")));
        assert_eq!(arena.parent(&id("c5")), None);
    }

    #[test]
    fn test_insert_matches_tree_function() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        assert!(arena.insert_reply(&id("c2"), comment("new")));
        assert_eq!(
            arena.to_tree(),
            insert_reply(&sample_tree(), &id("c2"), comment("new"))
        );
        assert_eq!(arena.depth(&id("new")), Some(2));
    }

    #[test]
    fn test_insert_reply_with_nested_replies() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        let reply = comment("r1").with_replies(vec![comment("r2")]);
        assert!(arena.insert_reply(&id("c5"), reply));
        assert_eq!(arena.len(), 7);
        assert_eq!(arena.parent(&id("r2")), Some(&id("r1")));
    }

    #[test]
    fn test_insert_rejects_unknown_parent_and_duplicate_id() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        assert!(!arena.insert_reply(&id("nonexistent"), comment("r")));
        assert!(!arena.insert_reply(&id("c1"), comment("c4")));
        assert_eq!(arena.to_tree(), sample_tree());
    }

    #[test]
    fn test_push_root() {
        let mut arena = CommentArena::new();
        assert!(arena.is_empty());
        assert!(arena.push_root(comment("a")));
        assert!(arena.push_root(comment("b")));
        assert!(!arena.push_root(comment("a")));
        let ids: Vec<_> = arena.to_tree().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![id("a"), id("b")]);
    }

    #[test]
    fn test_remove_subtree() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        assert!(arena.remove(&id("c2")));
        assert_eq!(arena.len(), 3);
        assert!(!arena.contains(&id("c4")));
        assert_eq!(arena.children(&id("c1")), &[id("c3")]);
        assert_eq!(arena.to_tree(), remove_node(&sample_tree(), &id("c2")));
    }

    #[test]
    fn test_remove_root_and_missing() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        assert!(arena.remove(&id("c1")));
        assert_eq!(arena.roots(), &[id("c5")]);
        assert_eq!(arena.len(), 1);

        assert!(!arena.remove(&id("c1")));
        assert!(!arena.remove(&id("nonexistent")));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let tree = vec![
            comment("a").with_replies(vec![comment("dup")]),
            comment("dup").with_replies(vec![comment("lost")]),
        ];
        let arena = CommentArena::from_tree(&tree);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.parent(&id("dup")), Some(&id("a")));
        assert!(!arena.contains(&id("lost")));
    }

    #[test]
    fn test_rehydrate_replaces_local_state() {
        let mut arena = CommentArena::from_tree(&sample_tree());
        arena.insert_reply(&id("c3"), comment("optimistic"));
        arena.rehydrate(&sample_tree());
        assert!(!arena.contains(&id("optimistic")));
        assert_eq!(arena.to_tree(), sample_tree());
    }
}
