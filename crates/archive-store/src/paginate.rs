/// Split `items` into consecutive pages of at most `page_size` items.
///
/// Order is preserved and only the last page may be short. An empty input
/// yields no pages at all. A `page_size` of 0 is treated as 1.
pub fn paginate<T, I>(items: I, page_size: usize) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
{
    let page_size = page_size.max(1);
    let mut pages = Vec::new();
    let mut current = Vec::new();

    for item in items {
        current.push(item);
        if current.len() == page_size {
            pages.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }

    pages
}

/// Number of pages `paginate` would produce for `len` items.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// The 1-based page `number`, or an empty list past the last page.
pub fn page<T, I>(items: I, page_size: usize, number: usize) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    if number == 0 {
        return Vec::new();
    }
    paginate(items, page_size)
        .into_iter()
        .nth(number - 1)
        .unwrap_or_default()
}
