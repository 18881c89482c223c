use serde::{Deserialize, Deserializer};

/// Десериализует `null` как значение по умолчанию.
///
/// Вместе с `#[serde(default)]` покрывает и отсутствующее поле, и явный `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
