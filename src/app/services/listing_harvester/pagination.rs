//! Pagination state of a harvest run
//!
//! Page 0 is always requested first because it carries the result count and
//! the pagination control. From page 0 the walk jumps by the page increment;
//! every later page advances by one. The walk ends once the next page index
//! exceeds the total page count resolved from page 0.

use super::page_parser::LastPage;
use tracing::warn;

/// Cursor and counters of one harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page about to be requested
    pub page: u32,
    /// Last page index, resolved once from page 0
    pub total_pages: u32,
    /// Results reported by the portal on page 0
    pub total_results: u64,
    /// Records parsed since the start of the run
    pub global_count: u64,
    /// Records parsed on the most recent page
    pub local_count: usize,
    /// Offset applied to the first page transition only
    pub page_increment: u32,
    resolved: bool,
}

impl PaginationState {
    /// Start a walk at page 0
    pub fn new(page_increment: u32) -> Self {
        Self {
            page: 0,
            total_pages: 0,
            total_results: 0,
            global_count: 0,
            local_count: 0,
            page_increment,
            resolved: false,
        }
    }

    /// Whether the total page count has been resolved
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Fix the result and page totals from the first response
    ///
    /// Later calls are ignored: the totals never change within a run. A
    /// malformed pagination control is logged and leaves the last known
    /// total in place.
    pub fn resolve(&mut self, total_results: Option<u64>, last_page: &LastPage) {
        if self.resolved {
            return;
        }
        self.resolved = true;
        self.total_results = total_results.unwrap_or_else(|| {
            warn!("Result count not found on the first page");
            0
        });

        match last_page {
            LastPage::Found(n) => self.total_pages = *n,
            LastPage::Absent => self.total_pages = 0,
            LastPage::Malformed(markup) => {
                warn!("Could not read the last page index from {}", markup);
            }
        }
    }

    /// Account for the records parsed on the current page
    pub fn record_page(&mut self, records: usize) {
        self.local_count = records;
        self.global_count += records as u64;
    }

    /// Whether records of the current page belong in the listing
    ///
    /// Page 0 only counts as a real result page in a plain sequential walk.
    pub fn keeps_current_page(&self) -> bool {
        self.page != 0 || self.page_increment == 1
    }

    /// Move to the next page
    ///
    /// Returns the new page index, or `None` when it exceeds the total and
    /// the walk is over.
    pub fn advance(&mut self) -> Option<u32> {
        self.page = if self.page == 0 {
            self.page.saturating_add(self.page_increment)
        } else {
            self.page.saturating_add(1)
        };

        if self.page > self.total_pages {
            None
        } else {
            Some(self.page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(state: &mut PaginationState) -> Vec<u32> {
        let mut pages = vec![state.page];
        while let Some(page) = state.advance() {
            pages.push(page);
        }
        pages
    }

    #[test]
    fn test_sequential_walk_visits_every_page() {
        let mut state = PaginationState::new(1);
        state.resolve(Some(100), &LastPage::Found(4));
        assert_eq!(walk(&mut state), vec![0, 1, 2, 3, 4]);
        assert_eq!(state.page, 5);
    }

    #[test]
    fn test_increment_applies_to_first_transition_only() {
        let mut state = PaginationState::new(3);
        state.resolve(Some(100), &LastPage::Found(5));
        assert_eq!(walk(&mut state), vec![0, 3, 4, 5]);
    }

    #[test]
    fn test_increment_beyond_total_ends_walk() {
        let mut state = PaginationState::new(10);
        state.resolve(Some(5), &LastPage::Found(2));
        assert_eq!(walk(&mut state), vec![0]);
    }

    #[test]
    fn test_single_page_without_pagination() {
        let mut state = PaginationState::new(1);
        state.resolve(Some(3), &LastPage::Absent);
        assert_eq!(state.total_pages, 0);
        assert_eq!(walk(&mut state), vec![0]);
    }

    #[test]
    fn test_totals_resolved_once() {
        let mut state = PaginationState::new(1);
        state.resolve(Some(40), &LastPage::Found(3));
        state.resolve(Some(999), &LastPage::Found(50));
        assert!(state.is_resolved());
        assert_eq!(state.total_results, 40);
        assert_eq!(state.total_pages, 3);
    }

    #[test]
    fn test_malformed_indicator_keeps_last_known_total() {
        let mut state = PaginationState::new(1);
        state.resolve(None, &LastPage::Malformed("<li></li>".to_string()));
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.total_results, 0);
        assert!(state.is_resolved());
    }

    #[test]
    fn test_counters() {
        let mut state = PaginationState::new(1);
        state.record_page(20);
        state.record_page(7);
        assert_eq!(state.local_count, 7);
        assert_eq!(state.global_count, 27);
    }

    #[test]
    fn test_page_zero_kept_only_in_sequential_walk() {
        assert!(PaginationState::new(1).keeps_current_page());
        let mut state = PaginationState::new(3);
        assert!(!state.keeps_current_page());
        state.resolve(Some(100), &LastPage::Found(5));
        state.advance();
        assert!(state.keeps_current_page());
    }
}
