use crate::catalog::{Catalog, CatalogEntry};
use crate::FolioError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn step(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerState {
    pub current_year: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub is_open: bool,
    pub is_loading: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current_year: None,
            current_page: 1,
            total_pages: 0,
            is_open: false,
            is_loading: false,
        }
    }
}

/// Identity of one triggered page load. Only the most recent ticket may
/// complete a load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub year: String,
    pub page: u32,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigateOutcome {
    Moved(LoadTicket),
    Busy,
    AtStart,
    AtEnd,
    Closed,
}

impl NavigateOutcome {
    pub fn ticket(self) -> Option<LoadTicket> {
        match self {
            NavigateOutcome::Moved(ticket) => Some(ticket),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub year: String,
    pub page: u32,
    pub total_pages: u32,
    pub title: String,
    pub indicator: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug)]
pub struct Navigator {
    catalog: Catalog,
    entry: Option<&'static CatalogEntry>,
    state: ViewerState,
    generation: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Navigator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            entry: None,
            state: ViewerState::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn open(&mut self, year: &str) -> Result<LoadTicket, FolioError> {
        let entry = self
            .catalog
            .get(year)
            .ok_or_else(|| FolioError::UnknownYear(year.trim().to_string()))?;
        if entry.page_count == 0 {
            return Err(FolioError::EmptyProject(entry.year.to_string()));
        }
        log::debug!(
            "open year={} total_pages={}",
            entry.year,
            entry.page_count
        );
        self.entry = Some(entry);
        self.state = ViewerState {
            current_year: Some(entry.year.to_string()),
            current_page: 1,
            total_pages: entry.page_count,
            is_open: true,
            is_loading: false,
        };
        Ok(self.begin_load())
    }

    pub fn navigate(&mut self, direction: Direction) -> NavigateOutcome {
        if !self.state.is_open {
            return NavigateOutcome::Closed;
        }
        if self.state.is_loading {
            log::debug!("navigation blocked: page {} still loading", self.state.current_page);
            return NavigateOutcome::Busy;
        }
        let target = i64::from(self.state.current_page) + direction.step();
        if target < 1 {
            return NavigateOutcome::AtStart;
        }
        if target > i64::from(self.state.total_pages) {
            return NavigateOutcome::AtEnd;
        }
        log::debug!(
            "navigate from page {} to {target}",
            self.state.current_page
        );
        self.state.current_page = target as u32;
        NavigateOutcome::Moved(self.begin_load())
    }

    /// Returns whether the viewer was open. Any outstanding ticket becomes stale.
    pub fn close(&mut self) -> bool {
        let was_open = self.state.is_open;
        self.entry = None;
        self.state = ViewerState::default();
        self.generation += 1;
        was_open
    }

    /// Clears the loading flag for the current ticket. Returns false when the
    /// ticket is stale and its result must not be displayed.
    pub fn finish_load(&mut self, ticket: &LoadTicket) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "discarding stale load year={} page={} generation={}",
                ticket.year,
                ticket.page,
                ticket.generation
            );
            return false;
        }
        self.state.is_loading = false;
        true
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.state.is_open && ticket.generation == self.generation
    }

    pub fn view(&self) -> Option<PageView> {
        let entry = self.entry.filter(|_| self.state.is_open)?;
        let page = self.state.current_page;
        let total = self.state.total_pages;
        Some(PageView {
            year: entry.year.to_string(),
            page,
            total_pages: total,
            title: format!("{} - Page {page} of {total}", entry.title),
            indicator: format!("Page {page} of {total}"),
            prev_disabled: page == 1,
            next_disabled: page == total,
        })
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state.is_loading = true;
        LoadTicket {
            year: self.state.current_year.clone().unwrap_or_default(),
            page: self.state.current_page,
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(year: &str) -> (Navigator, LoadTicket) {
        let mut navigator = Navigator::default();
        let ticket = navigator.open(year).expect("known year");
        (navigator, ticket)
    }

    #[test]
    fn open_starts_at_first_page_for_every_year() {
        for entry in Catalog::builtin().entries() {
            let (navigator, ticket) = opened(entry.year);
            let state = navigator.state();
            assert_eq!(state.current_page, 1);
            assert_eq!(state.total_pages, entry.page_count);
            assert!(state.is_open);
            assert!(state.is_loading);
            assert_eq!(ticket.page, 1);
            assert_eq!(ticket.year, entry.year);
        }
    }

    #[test]
    fn open_unknown_year_leaves_state_untouched() {
        let mut navigator = Navigator::default();
        let err = navigator.open("1999").unwrap_err();
        assert_eq!(err.to_string(), "Project data not found for year 1999");
        assert_eq!(navigator.state(), &ViewerState::default());
    }

    #[test]
    fn navigation_is_blocked_while_loading() {
        let (mut navigator, _ticket) = opened("2018");
        assert_eq!(navigator.navigate(Direction::Next), NavigateOutcome::Busy);
        assert_eq!(navigator.state().current_page, 1);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let (mut navigator, ticket) = opened("2025");
        assert!(navigator.finish_load(&ticket));
        assert_eq!(navigator.navigate(Direction::Previous), NavigateOutcome::AtStart);

        for expected in 2..=6 {
            let ticket = navigator.navigate(Direction::Next).ticket().expect("moved");
            assert_eq!(ticket.page, expected);
            assert!(navigator.finish_load(&ticket));
        }
        assert_eq!(navigator.navigate(Direction::Next), NavigateOutcome::AtEnd);
        assert_eq!(navigator.state().current_page, 6);
    }

    #[test]
    fn stale_ticket_does_not_clear_loading() {
        let (mut navigator, first) = opened("2018");
        let second = navigator.open("2019").unwrap();
        assert!(!navigator.finish_load(&first));
        assert!(navigator.is_loading());
        assert!(navigator.finish_load(&second));
        assert!(!navigator.is_loading());
    }

    #[test]
    fn close_resets_and_invalidates_tickets() {
        let (mut navigator, ticket) = opened("2022");
        assert!(navigator.close());
        assert_eq!(navigator.state(), &ViewerState::default());
        assert!(!navigator.finish_load(&ticket));
        assert!(!navigator.close());
        assert_eq!(navigator.navigate(Direction::Next), NavigateOutcome::Closed);
    }

    #[test]
    fn view_reports_button_states() {
        let (mut navigator, ticket) = opened("2023");
        let view = navigator.view().unwrap();
        assert_eq!(view.title, "Accountancy Project 2023 - Page 1 of 8");
        assert_eq!(view.indicator, "Page 1 of 8");
        assert!(view.prev_disabled);
        assert!(!view.next_disabled);

        navigator.finish_load(&ticket);
        navigator.navigate(Direction::Next);
        let view = navigator.view().unwrap();
        assert!(!view.prev_disabled);
        assert_eq!(view.page, 2);
    }

    #[test]
    fn project_without_pages_cannot_be_opened() {
        const EMPTY: &[CatalogEntry] = &[CatalogEntry {
            year: "2030",
            page_count: 0,
            title: "Accountancy Project 2030",
        }];
        let mut navigator = Navigator::new(Catalog::new(EMPTY));
        let err = navigator.open("2030").unwrap_err();
        assert!(matches!(err, FolioError::EmptyProject(ref year) if year == "2030"));
        assert!(!navigator.is_open());
        assert!(navigator.view().is_none());
        assert_eq!(navigator.navigate(Direction::Next), NavigateOutcome::Closed);
    }
}
