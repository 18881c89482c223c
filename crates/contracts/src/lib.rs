//! Общие контракты фронтенда и внешнего API маркетплейса.
//!
//! Здесь живут DTO, идентификаторы и чистая клиентская логика:
//! состояние выплат, редактирование дерева комментариев, группировка чатов.

pub mod domain;
pub mod shared;
