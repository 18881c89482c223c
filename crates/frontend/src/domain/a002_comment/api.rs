//! Comments - API functions

use crate::shared::api_utils::{api_base, path_segment, response_error};
use contracts::domain::a002_comment::{Comment, CreateCommentDto};
use contracts::domain::common::{CommentId, PostId};
use gloo_net::http::Request;

/// Дерево комментариев к публикации
pub async fn fetch_comments(post_id: &PostId) -> Result<Vec<Comment>, String> {
    let url = format!(
        "{}/api/comments/{}",
        api_base(),
        path_segment(post_id.as_str())
    );
    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to fetch comments").await);
    }

    response
        .json::<Vec<Comment>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Создать комментарий или ответ (`parent_id` в DTO); возвращает запись с ID от сервера
pub async fn create_comment(post_id: &PostId, dto: &CreateCommentDto) -> Result<Comment, String> {
    let url = format!(
        "{}/api/comments/{}",
        api_base(),
        path_segment(post_id.as_str())
    );
    let response = Request::post(&url)
        .header("Accept", "application/json")
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to post comment").await);
    }

    response
        .json::<Comment>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Удалить комментарий; сервер удаляет и все ответы на него
pub async fn delete_comment(id: &CommentId) -> Result<(), String> {
    let url = format!(
        "{}/api/comments/{}",
        api_base(),
        path_segment(id.as_str())
    );
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(response_error(response, "Failed to delete comment").await);
    }

    Ok(())
}
