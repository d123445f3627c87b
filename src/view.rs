use serde::Serialize;

/// Filter
///
/// The predicate half of a collection view. Implemented by every list page's filter state.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Accepts everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;

impl<T> Filter<T> for NoFilter {
    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// An empty term matches everything.
pub fn matches_term(term: &str, fields: &[&str]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// ResetPolicy
///
/// What happens to the page index when the filter changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Jump back to page 1 whenever the filter actually changes.
    #[default]
    ResetOnFilterChange,
    /// Keep the page index. A narrowed filter can leave it past the last page,
    /// which renders as an empty page.
    KeepPage,
}

/// PageMarker
///
/// One slot of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageMarker {
    Number(usize),
    Ellipsis,
}

/// Most page numbers the pagination bar shows before collapsing into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// page_window
///
/// The pagination bar for `current` of `total` pages. Empty when there is at most
/// one page.
pub fn page_window(current: usize, total: usize) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Number};

    if total <= 1 {
        return Vec::new();
    }
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(Number).collect();
    }
    if current <= 3 {
        vec![Number(1), Number(2), Number(3), Number(4), Ellipsis, Number(total)]
    } else if current >= total - 2 {
        vec![
            Number(1),
            Ellipsis,
            Number(total - 3),
            Number(total - 2),
            Number(total - 1),
            Number(total),
        ]
    } else {
        vec![
            Number(1),
            Ellipsis,
            Number(current - 1),
            Number(current),
            Number(current + 1),
            Ellipsis,
            Number(total),
        ]
    }
}

/// Page
///
/// The slice of filtered records visible right now.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    /// 1-based page index.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Position of the first row within the filtered set, for row numbering.
    pub offset: usize,
    pub items: Vec<&'a T>,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// CollectionView
///
/// A fully fetched collection seen through a filter and a fixed page size. All list
/// pages are built on this one type.
#[derive(Debug, Clone)]
pub struct CollectionView<T, F> {
    items: Vec<T>,
    filter: F,
    page_size: usize,
    page: usize,
    policy: ResetPolicy,
}

impl<T, F> CollectionView<T, F>
where
    F: Filter<T> + PartialEq,
{
    /// `page_size` of zero is treated as one.
    pub fn new(filter: F, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            filter,
            page_size: page_size.max(1),
            page: 1,
            policy: ResetPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Replaces the collection with a fresh fetch. The page index is left alone.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    pub fn set_filter(&mut self, filter: F) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        if self.policy == ResetPolicy::ResetOnFilterChange {
            self.page = 1;
        }
    }

    /// Edits the filter in place; the reset policy applies as with `set_filter`.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut F))
    where
        F: Clone,
    {
        let mut next = self.filter.clone();
        edit(&mut next);
        self.set_filter(next);
    }

    /// Filtered records in original order.
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| self.filter.matches(item))
            .count()
    }

    /// `ceil(filtered_count / page_size)`; zero for an empty result.
    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// True when the page index points past the last page of the filtered set.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages().max(1)
    }

    pub fn current_page(&self) -> Page<'_, T> {
        let filtered = self.filtered();
        let total_items = filtered.len();
        let offset = (self.page - 1) * self.page_size;
        let items = filtered
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();

        Page {
            number: self.page,
            total_pages: total_items.div_ceil(self.page_size),
            total_items,
            offset,
            items,
        }
    }

    pub fn page_window(&self) -> Vec<PageMarker> {
        page_window(self.page, self.total_pages())
    }
}
