//! Ключ идемпотентности для отправки формы
//!
//! Один ключ живёт от первой отправки до ответа API с созданной записью.
//! Повтор после сетевой ошибки уходит с тем же ключом, и API не создаёт
//! вторую заявку, если первая всё-таки дошла.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdempotencyKey {
    key: Option<String>,
}

impl IdempotencyKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ключ текущей отправки; новый UUID v4, если отправки ещё не было
    pub fn get_or_create(&mut self) -> String {
        self.get_or_create_with(|| uuid::Uuid::new_v4().to_string())
    }

    pub fn get_or_create_with(&mut self, make: impl FnOnce() -> String) -> String {
        self.key.get_or_insert_with(make).clone()
    }

    pub fn current(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// API подтвердил запись: следующая отправка получит новый ключ
    pub fn confirm(&mut self) {
        self.key = None;
    }
}
