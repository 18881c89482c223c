use crate::domain::common::{null_as_default, CommentId};
use crate::shared::{ContractError, ContractResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Максимальная длина текста комментария
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Комментарий с вложенными ответами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: CommentId,
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    /// Ответы в порядке отображения; `null` из API читается как пустой список
    #[serde(default, deserialize_with = "null_as_default")]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        name: impl Into<String>,
        message: impl Into<String>,
        is_admin: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            message: message.into(),
            is_admin,
            created_at,
            replies: Vec::new(),
        }
    }

    pub fn with_replies(mut self, replies: Vec<Comment>) -> Self {
        self.replies = replies;
        self
    }

    /// Число комментариев в поддереве, включая сам комментарий
    pub fn subtree_len(&self) -> usize {
        1 + self.replies.iter().map(Comment::subtree_len).sum::<usize>()
    }
}

/// DTO для создания комментария или ответа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentDto {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

impl CreateCommentDto {
    pub fn new(name: &str, message: &str, parent_id: Option<CommentId>) -> Self {
        Self {
            name: name.trim().to_string(),
            message: message.trim().to_string(),
            parent_id,
        }
    }

    pub fn validate(&self) -> ContractResult<()> {
        if self.name.is_empty() {
            return Err(ContractError::validation("Имя не может быть пустым").with_details("name"));
        }
        if self.message.is_empty() {
            return Err(
                ContractError::validation("Сообщение не может быть пустым").with_details("message")
            );
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ContractError::validation(format!(
                "Сообщение длиннее {} символов",
                MAX_MESSAGE_LEN
            ))
            .with_details("message"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_missing_replies_become_empty() {
        let with_null = r#"{"_id":"c1","name":"Ann","message":"Hi","isAdmin":false,
            "createdAt":"2025-01-05T10:00:00Z","replies":null}"#;
        let comment: Comment = serde_json::from_str(with_null).unwrap();
        assert!(comment.replies.is_empty());

        let missing = r#"{"id":"c2","name":"Bob","message":"Hey",
            "createdAt":"2025-01-05T10:00:00Z"}"#;
        let comment: Comment = serde_json::from_str(missing).unwrap();
        assert!(comment.replies.is_empty());
        assert!(!comment.is_admin);
    }

    #[test]
    fn test_nested_replies_are_parsed_in_order() {
        let json = r#"{"id":"c1","name":"Ann","message":"Q","createdAt":"2025-01-05T10:00:00Z",
            "replies":[
                {"id":"c2","name":"Admin","message":"A1","isAdmin":true,"createdAt":"2025-01-05T11:00:00Z","replies":[]},
                {"id":"c3","name":"Ann","message":"A2","createdAt":"2025-01-05T12:00:00Z"}
            ]}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = comment.replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);
        assert!(comment.replies[0].is_admin);
        assert_eq!(comment.subtree_len(), 3);
    }

    #[test]
    fn test_create_dto_validation() {
        assert!(CreateCommentDto::new("Ann", "  ", None).validate().is_err());
        assert!(CreateCommentDto::new(" ", "text", None).validate().is_err());
        assert!(CreateCommentDto::new("Ann", &"x".repeat(MAX_MESSAGE_LEN + 1), None)
            .validate()
            .is_err());

        let dto = CreateCommentDto::new(" Ann ", " Thanks! ", Some(CommentId::new("c1")));
        assert!(dto.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"name":"Ann","message":"Thanks!","parentId":"c1"}"#
        );
    }
}
