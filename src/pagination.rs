//! Page slicing and prev/next enablement over an already-fetched result set.

// Page size is fixed by the controller
pub const PAGE_SIZE: usize = 10;

/// Which navigation buttons are clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Current page over a result set of `total_count` items.
///
/// `1 <= page <= max(1, total_pages)` holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
    total_count: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(1, 0)
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1))
}

/// Half-open window `[(page-1)*size, min(page*size, len))` of `items`.
pub fn compute_slice<'a, T>(items: &'a [T], state: &PageState) -> &'a [T] {
    let start = (state.page - 1).saturating_mul(state.page_size).min(items.len());
    let end = state.page.saturating_mul(state.page_size).min(items.len());
    &items[start..end]
}

pub fn compute_nav_state(total_count: usize, page: usize, page_size: usize) -> NavState {
    NavState {
        prev_enabled: page > 1,
        next_enabled: page < total_pages(total_count, page_size),
    }
}

impl PageState {
    /// Builds a state with the default page size, pulling `page` into range.
    pub fn new(page: usize, total_count: usize) -> Self {
        PageState::with_page_size(page, PAGE_SIZE, total_count)
    }

    pub fn with_page_size(page: usize, page_size: usize, total_count: usize) -> Self {
        let page_size = page_size.max(1);
        let last = total_pages(total_count, page_size).max(1);
        PageState {
            page: page.clamp(1, last),
            page_size,
            total_count,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    pub fn nav(&self) -> NavState {
        compute_nav_state(self.total_count, self.page, self.page_size)
    }

    /// Steps back one page. Returns false (and changes nothing) on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.nav().prev_enabled {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Steps forward one page. Returns false (and changes nothing) on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.nav().next_enabled {
            return false;
        }
        self.page += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_twenty_five_items_into_three_pages() {
        let items: Vec<usize> = (0..25).collect();
        let page = |n| compute_slice(&items, &PageState::new(n, items.len())).to_vec();

        assert_eq!(page(1), (0..10).collect::<Vec<_>>());
        assert_eq!(page(2), (10..20).collect::<Vec<_>>());
        assert_eq!(page(3), (20..25).collect::<Vec<_>>());
    }

    #[test]
    fn nav_state_matches_bounds_for_all_sizes() {
        for total in 0..=55 {
            let last = total_pages(total, PAGE_SIZE);
            for page in 1..=last.max(1) {
                let nav = compute_nav_state(total, page, PAGE_SIZE);
                assert_eq!(nav.prev_enabled, page != 1, "total={total} page={page}");
                assert_eq!(nav.next_enabled, page < last, "total={total} page={page}");
            }
        }
    }

    #[test]
    fn empty_set_disables_both_buttons() {
        let state = PageState::new(1, 0);
        assert_eq!(state.total_pages(), 0);
        assert_eq!(
            state.nav(),
            NavState {
                prev_enabled: false,
                next_enabled: false
            }
        );
        assert!(compute_slice::<u8>(&[], &state).is_empty());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        assert_eq!(PageState::new(0, 25).page(), 1);
        assert_eq!(PageState::new(9, 25).page(), 3);
        assert_eq!(PageState::new(4, 0).page(), 1);
    }

    #[test]
    fn page_moves_are_noops_at_the_edges() {
        let mut state = PageState::new(1, 12);
        assert!(!state.prev_page());
        assert_eq!(state.page(), 1);

        assert!(state.next_page());
        assert_eq!(state.page(), 2);
        assert!(!state.next_page());
        assert_eq!(state.page(), 2);

        assert!(state.prev_page());
        assert_eq!(state.page(), 1);
    }
}
