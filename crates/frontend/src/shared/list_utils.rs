/// Утилиты для списков в памяти: постраничный вывод
///
/// Поиск по строке живёт в `contracts::shared::search`, чтобы им пользовались
/// и чистые фильтры домена.

/// Размеры страницы, доступные в списках
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Размер страницы по умолчанию
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Одна страница списка
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Номер страницы (0-based), уже ограниченный последней страницей
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Вырезать страницу `page` размером `page_size`.
///
/// Номер за пределами списка прижимается к последней странице,
/// `page_size == 0` означает «всё на одной странице».
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageSlice<T> {
    let total_count = items.len();
    if page_size == 0 {
        return PageSlice {
            items: items.to_vec(),
            page: 0,
            total_pages: 1,
            total_count,
        };
    }

    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total_count);

    PageSlice {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_and_last_page() {
        let items: Vec<u32> = (1..=23).collect();

        let second = paginate(&items, 1, 10);
        assert_eq!(second.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(second.total_pages, 3);
        assert_eq!(second.total_count, 23);

        let last = paginate(&items, 2, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, 7, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![5]);
    }

    #[test]
    fn test_paginate_empty_and_unbounded() {
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 3, 10);
        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());

        let all = paginate(&[1, 2, 3], 4, 0);
        assert_eq!(all.items, vec![1, 2, 3]);
        assert_eq!(all.total_pages, 1);
    }
}
