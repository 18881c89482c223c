use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов сущностей
///
/// Идентификаторы выдаёт внешний API (строки вида ObjectId/UUID),
/// клиент их не интерпретирует и не генерирует.
pub trait EntityId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Объявляет строковый newtype-идентификатор с реализацией [`EntityId`]
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl EntityId for $name {
            fn as_string(&self) -> String {
                self.0.clone()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(format!("Invalid {}: empty string", stringify!($name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// ID заявки на выплату
    PayoutRequestId
);
string_id!(
    /// ID заказа
    OrderId
);
string_id!(
    /// ID комментария
    CommentId
);
string_id!(
    /// ID поста (вакансии или объявления), к которому привязана ветка комментариев
    PostId
);
string_id!(
    /// ID клиента (покупателя)
    ClientId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_trims_and_rejects_empty() {
        assert_eq!(
            OrderId::from_string("  ord-1 ").unwrap(),
            OrderId::new("ord-1")
        );
        assert!(CommentId::from_string("   ").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = PayoutRequestId::new("65f0c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f0c0ffee\"");
        let back: PayoutRequestId = serde_json::from_str("\"65f0c0ffee\"").unwrap();
        assert_eq!(back, id);
    }
}
