//! Поиск по небольшим спискам в памяти

/// Минимальная длина строки поиска, с которой фильтр включается
pub const MIN_SEARCH_LEN: usize = 3;

/// Активен ли фильтр для данной строки поиска
pub fn is_search_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_SEARCH_LEN
}

/// Проверяет, содержит ли хотя бы одно из полей строку поиска (без учёта регистра).
///
/// Неактивный фильтр пропускает всё.
pub fn matches_any<'a>(fields: impl IntoIterator<Item = &'a str>, filter: &str) -> bool {
    if !is_search_active(filter) {
        return true;
    }
    let needle = filter.trim().to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_filter_is_inactive() {
        assert!(!is_search_active("ab"));
        assert!(!is_search_active("  ab  "));
        assert!(is_search_active("abc"));
        assert!(is_search_active("вак"));
    }

    #[test]
    fn test_matches_any_case_insensitive() {
        assert!(matches_any(["Logo Design", "ord-17"], "DESIGN"));
        assert!(!matches_any(["Logo Design", "ord-17"], "backend"));
        assert!(matches_any(["Logo Design"], "xy"));
    }
}
