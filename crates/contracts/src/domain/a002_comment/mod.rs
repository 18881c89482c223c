//! Ветка комментариев к посту
//!
//! Дерево приходит из API целиком; после подтверждения создания или удаления
//! клиент правит его локально, не перезагружая ветку.

pub mod aggregate;
pub mod arena;
pub mod tree;

pub use aggregate::{Comment, CreateCommentDto, MAX_MESSAGE_LEN};
pub use arena::CommentArena;
pub use tree::{
    count_comments, find_comment, insert_reply, insert_reply_in_place, remove_node,
    remove_node_in_place,
};
