//! Правка дерева комментариев, полученного из API.
//!
//! Обход всегда в глубину (pre-order): узел, затем его ответы, затем соседи.
//! Несуществующий ID ни для вставки, ни для удаления не является ошибкой:
//! дерево возвращается без изменений.

use super::aggregate::Comment;
use crate::domain::common::CommentId;

/// Первый комментарий с данным ID
pub fn find_comment<'a>(tree: &'a [Comment], id: &CommentId) -> Option<&'a Comment> {
    for node in tree {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find_comment(&node.replies, id) {
            return Some(found);
        }
    }
    None
}

fn find_comment_mut<'a>(tree: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
    for node in tree.iter_mut() {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find_comment_mut(&mut node.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Всего комментариев в дереве на всех уровнях
pub fn count_comments(tree: &[Comment]) -> usize {
    tree.iter().map(Comment::subtree_len).sum()
}

/// Добавить ответ в конец `replies` первого найденного родителя.
///
/// Возвращает `false`, если родителя нет (дерево не меняется).
pub fn insert_reply_in_place(tree: &mut [Comment], parent_id: &CommentId, reply: Comment) -> bool {
    match find_comment_mut(tree, parent_id) {
        Some(parent) => {
            parent.replies.push(reply);
            true
        }
        None => false,
    }
}

/// Новое дерево с ответом, добавленным под `parent_id`
pub fn insert_reply(tree: &[Comment], parent_id: &CommentId, reply: Comment) -> Vec<Comment> {
    let mut next = tree.to_vec();
    insert_reply_in_place(&mut next, parent_id, reply);
    next
}

/// Удалить все узлы с `target_id` вместе с поддеревьями.
///
/// Возвращает `true`, если что-то было удалено.
pub fn remove_node_in_place(tree: &mut Vec<Comment>, target_id: &CommentId) -> bool {
    let before = tree.len();
    tree.retain(|node| node.id != *target_id);
    let mut removed = tree.len() != before;
    for node in tree.iter_mut() {
        removed |= remove_node_in_place(&mut node.replies, target_id);
    }
    removed
}

/// Новое дерево без узла `target_id` и его поддерева
pub fn remove_node(tree: &[Comment], target_id: &CommentId) -> Vec<Comment> {
    let mut next = tree.to_vec();
    remove_node_in_place(&mut next, target_id);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn comment(id: &str) -> Comment {
        Comment::new(
            CommentId::new(id),
            "Ann",
            format!("message {}", id),
            false,
            Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap(),
        )
    }

    /// c1
    /// ├── c2
    /// │   └── c4
    /// └── c3
    /// c5
    fn sample_tree() -> Vec<Comment> {
        vec![
            comment("c1").with_replies(vec![
                comment("c2").with_replies(vec![comment("c4")]),
                comment("c3"),
            ]),
            comment("c5"),
        ]
    }

    fn all_ids(tree: &[Comment]) -> Vec<String> {
        let mut ids = Vec::new();
        for node in tree {
            ids.push(node.id.as_str().to_string());
            ids.extend(all_ids(&node.replies));
        }
        ids
    }

    #[test]
    fn test_insert_reply_appends_at_depth() {
        let tree = sample_tree();
        let next = insert_reply(&tree, &CommentId::new("c2"), comment("new"));

        let parent = find_comment(&next, &CommentId::new("c2")).unwrap();
        let ids: Vec<_> = parent.replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c4", "new"]);

        // исходное дерево не изменилось
        assert_eq!(tree, sample_tree());
        assert_eq!(count_comments(&next), count_comments(&tree) + 1);
    }

    #[test]
    fn test_insert_reply_into_leaf_and_root() {
        let next = insert_reply(&sample_tree(), &CommentId::new("c5"), comment("r"));
        assert_eq!(next[1].replies.len(), 1);

        let next = insert_reply(&next, &CommentId::new("c1"), comment("r2"));
        assert_eq!(next[0].replies.last().unwrap().id.as_str(), "r2");
        assert_eq!(next[0].replies[0].id.as_str(), "c2");
        assert_eq!(next[0].replies[1].id.as_str(), "c3");
    }

    #[test]
    fn test_insert_reply_only_first_match() {
        // дубликат ID: ответ получает первый узел в порядке обхода в глубину
        let tree = vec![
            comment("a").with_replies(vec![comment("dup")]),
            comment("dup"),
        ];
        let next = insert_reply(&tree, &CommentId::new("dup"), comment("r"));
        assert_eq!(next[0].replies[0].replies.len(), 1);
        assert!(next[1].replies.is_empty());
    }

    #[test]
    fn test_missing_parent_is_noop() {
        let tree = sample_tree();
        assert_eq!(
            insert_reply(&tree, &CommentId::new("nonexistent"), comment("r")),
            tree
        );

        let mut in_place = sample_tree();
        assert!(!insert_reply_in_place(
            &mut in_place,
            &CommentId::new("nonexistent"),
            comment("r")
        ));
        assert_eq!(in_place, tree);
    }

    #[test]
    fn test_remove_node_drops_subtree() {
        let next = remove_node(&sample_tree(), &CommentId::new("c2"));
        assert_eq!(all_ids(&next), vec!["c1", "c3", "c5"]);
        assert!(find_comment(&next, &CommentId::new("c4")).is_none());
    }

    #[test]
    fn test_remove_top_level_node() {
        let next = remove_node(&sample_tree(), &CommentId::new("c1"));
        assert_eq!(all_ids(&next), vec!["c5"]);
    }

    #[test]
    fn test_remove_node_removes_every_match() {
        let tree = vec![
            comment("a").with_replies(vec![comment("dup").with_replies(vec![comment("x")])]),
            comment("dup"),
        ];
        let next = remove_node(&tree, &CommentId::new("dup"));
        assert_eq!(all_ids(&next), vec!["a"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        for id in ["c1", "c2", "c3", "c4", "c5", "nonexistent"] {
            let id = CommentId::new(id);
            let once = remove_node(&sample_tree(), &id);
            let twice = remove_node(&once, &id);
            assert_eq!(once, twice);
            assert!(find_comment(&once, &id).is_none());
        }
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let tree = sample_tree();
        assert_eq!(remove_node(&tree, &CommentId::new("nonexistent")), tree);
    }

    #[test]
    fn test_remove_in_place_reports_match() {
        let mut tree = sample_tree();
        assert!(remove_node_in_place(&mut tree, &CommentId::new("c4")));
        assert!(!remove_node_in_place(&mut tree, &CommentId::new("c4")));
        assert_eq!(tree, remove_node(&sample_tree(), &CommentId::new("c4")));
    }

    #[test]
    fn test_remove_node_keeps_surviving_comments_intact() {
        let mut admin = comment("c2");
        admin.is_admin = true;
        admin.message = "Ответ модератора".to_string();
        let tree = vec![comment("c1").with_replies(vec![admin.clone(), comment("c3")])];

        let next = remove_node(&tree, &CommentId::new("c3"));
        assert_eq!(next[0].replies, vec![admin]);
        assert_eq!(next[0].name, tree[0].name);
        assert_eq!(next[0].created_at, tree[0].created_at);
    }
}
