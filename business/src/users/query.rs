//! Filter, search, sort and pagination state for the users list.
//!
//! Everything that decides *which* page of users is on screen lives here.
//! Committed changes mark the query dirty; the page orchestrator drains the
//! dirty flag once per frame and dispatches exactly one fetch for it.

use std::any::Any;

use chrono::{DateTime, Duration, Utc};
use tablero_states::{State, state_assign_impl};

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const SEARCH_DEBOUNCE_MS: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Username,
    Status,
}

impl SortField {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The single active sort entry. Multi-column sort is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Wire value; `All` is omitted from the request entirely.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Active => Some("active"),
            Self::Inactive => Some("inactive"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    value: String,
    deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryState {
    /// 0-based locally; the wire is 1-based (`to_query_params` adds one).
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<UserSort>,
    pub status_filter: StatusFilter,
    committed_search: String,
    pending_search: Option<PendingSearch>,
    dirty: bool,
}

impl Default for ListQueryState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 10,
            sort: None,
            status_filter: StatusFilter::All,
            committed_search: String::new(),
            pending_search: None,
            dirty: false,
        }
    }
}

impl ListQueryState {
    pub fn set_page(&mut self, page: usize) {
        if self.page != page {
            self.page = page;
            self.dirty = true;
        }
    }

    /// Page index is intentionally NOT reset; the backend clamps or returns an
    /// empty page and the user can navigate back.
    pub fn set_page_size(&mut self, page_size: usize) {
        if self.page_size != page_size && PAGE_SIZE_OPTIONS.contains(&page_size) {
            self.page_size = page_size;
            self.dirty = true;
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        if self.status_filter != filter {
            self.status_filter = filter;
            self.dirty = true;
        }
    }

    /// Cycle a column header click: unsorted -> asc -> desc -> unsorted.
    /// Clicking a different column starts at asc.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = match self.sort {
            Some(UserSort {
                field: current,
                direction: SortDirection::Asc,
            }) if current == field => Some(UserSort {
                field,
                direction: SortDirection::Desc,
            }),
            Some(UserSort { field: current, .. }) if current == field => None,
            _ => Some(UserSort {
                field,
                direction: SortDirection::Asc,
            }),
        };
        self.dirty = true;
    }

    /// Record a keystroke. The value only commits after the debounce window
    /// passes without another edit; every keystroke restarts the timer.
    pub fn edit_search(&mut self, value: impl Into<String>, now: DateTime<Utc>) {
        self.pending_search = Some(PendingSearch {
            value: value.into(),
            deadline: now + Duration::milliseconds(SEARCH_DEBOUNCE_MS),
        });
    }

    /// Commit the pending search once its deadline has passed. Called once
    /// per frame with the injected clock.
    pub fn poll_search(&mut self, now: DateTime<Utc>) {
        let Some(pending) = &self.pending_search else {
            return;
        };
        if now < pending.deadline {
            return;
        }
        let value = self.pending_search.take().map(|p| p.value).unwrap_or_default();
        if value != self.committed_search {
            self.committed_search = value;
            self.dirty = true;
        }
    }

    pub fn committed_search(&self) -> &str {
        &self.committed_search
    }

    /// What the search box should display: the not-yet-committed text wins.
    pub fn search_display(&self) -> &str {
        match &self.pending_search {
            Some(pending) => &pending.value,
            None => &self.committed_search,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drain the dirty flag. Each committed change yields exactly one fetch.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Request parameters for `GET /users`. The wire page is 1-based; the
    /// search is always sent (empty allowed); `status` is omitted for All.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), (self.page + 1).to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(sort) = self.sort {
            params.push(("orderBy".to_string(), sort.field.as_param().to_string()));
            params.push(("orderDir".to_string(), sort.direction.as_param().to_string()));
        }
        params.push(("search".to_string(), self.committed_search.clone()));
        if let Some(status) = self.status_filter.as_param() {
            params.push(("status".to_string(), status.to_string()));
        }
        params
    }
}

impl State for ListQueryState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
