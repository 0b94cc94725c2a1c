//! In-memory grid state over the fetched job command set. The backend list
//! is fetched once per reload; paging, sorting, filtering, and selection are
//! all client-side over the cached rows.

use std::collections::BTreeSet;

use shared::domain::{CmdId, JobCommand, PageInfo};

use client_core::JobCommandPage;

/// Fixed chrome (navigation, margins) to the left of the grid; the grid takes
/// the rest of the window.
pub const GRID_CHROME_WIDTH: f32 = 223.0;
pub const MIN_GRID_WIDTH: f32 = 320.0;

pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 20, 30, 50];
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    CmdId,
    Type,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Column schema: title, sort key (if sortable), and whether the column is
/// carried in the data but not displayed.
pub struct ColumnSpec {
    pub title: &'static str,
    pub sort: Option<SortColumn>,
    pub hidden: bool,
}

pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        title: "Command ID",
        sort: Some(SortColumn::CmdId),
        hidden: true,
    },
    ColumnSpec {
        title: "Command Type",
        sort: Some(SortColumn::Type),
        hidden: false,
    },
    ColumnSpec {
        title: "Name",
        sort: Some(SortColumn::Name),
        hidden: false,
    },
    ColumnSpec {
        title: "SubName",
        sort: None,
        hidden: false,
    },
    ColumnSpec {
        title: "Short Description",
        sort: None,
        hidden: true,
    },
    ColumnSpec {
        title: "Long Description",
        sort: None,
        hidden: true,
    },
    ColumnSpec {
        title: "Path",
        sort: None,
        hidden: true,
    },
    ColumnSpec {
        title: "Arguments",
        sort: None,
        hidden: true,
    },
];

/// Per-column contains filters, case-insensitive, over the visible columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    pub cmd_type: String,
    pub name: String,
    pub sub_name: String,
}

impl ColumnFilters {
    fn field_matches(filter: &str, value: &str) -> bool {
        filter.is_empty()
            || value
                .to_ascii_lowercase()
                .contains(&filter.to_ascii_lowercase())
    }

    fn matches(&self, row: &JobCommand) -> bool {
        Self::field_matches(&self.cmd_type, &row.cmd_type)
            && Self::field_matches(&self.name, &row.name)
            && Self::field_matches(&self.sub_name, &row.sub_name)
    }
}

pub struct GridState {
    rows: Vec<JobCommand>,
    selection: BTreeSet<CmdId>,
    sort_column: SortColumn,
    sort_order: SortOrder,
    pub filters: ColumnFilters,
    page: usize,
    page_size: usize,
    pub page_info: PageInfo,
}

impl GridState {
    /// Load-time sort policy configures broad relevance first; callers then
    /// stabilize on identity order via [`Self::stabilize_identity_order`].
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selection: BTreeSet::new(),
            sort_column: SortColumn::Type,
            sort_order: SortOrder::Descending,
            filters: ColumnFilters::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            page_info: PageInfo::default(),
        }
    }

    /// Second initialization step: re-sort on the identity column ascending.
    pub fn stabilize_identity_order(&mut self) {
        self.sort_column = SortColumn::CmdId;
        self.sort_order = SortOrder::Ascending;
    }

    pub fn sort_key(&self) -> (SortColumn, SortOrder) {
        (self.sort_column, self.sort_order)
    }

    /// Header click: same column toggles direction, a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_column = column;
            self.sort_order = SortOrder::Ascending;
        }
    }

    /// Replace the cached rows after a reload. The reload invalidates row
    /// identity, so the selection is dropped and the page is clamped back
    /// into range.
    pub fn set_rows(&mut self, page: JobCommandPage) {
        self.rows = page.commands;
        self.page_info = page.page_info;
        self.selection.clear();
        self.clamp_page();
    }

    pub fn rows(&self) -> &[JobCommand] {
        &self.rows
    }

    pub fn row(&self, cmd_id: CmdId) -> Option<&JobCommand> {
        self.rows.iter().find(|row| row.cmd_id == cmd_id)
    }

    fn filtered_sorted(&self) -> Vec<&JobCommand> {
        let mut rows: Vec<&JobCommand> =
            self.rows.iter().filter(|r| self.filters.matches(r)).collect();
        rows.sort_by(|a, b| {
            let ordering = match self.sort_column {
                SortColumn::CmdId => a.cmd_id.cmp(&b.cmd_id),
                SortColumn::Type => a
                    .cmd_type
                    .to_ascii_lowercase()
                    .cmp(&b.cmd_type.to_ascii_lowercase()),
                SortColumn::Name => a
                    .name
                    .to_ascii_lowercase()
                    .cmp(&b.name.to_ascii_lowercase()),
            };
            match self.sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        rows
    }

    pub fn total_filtered(&self) -> usize {
        self.rows.iter().filter(|r| self.filters.matches(r)).count()
    }

    pub fn total_pages(&self) -> usize {
        self.total_filtered().div_ceil(self.page_size).max(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages() - 1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.total_pages() - 1);
    }

    /// The slice of filtered, sorted rows on the current page.
    pub fn visible_rows(&self) -> Vec<&JobCommand> {
        self.filtered_sorted()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn selection(&self) -> Vec<CmdId> {
        self.selection.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, cmd_id: CmdId) -> bool {
        self.selection.contains(&cmd_id)
    }

    pub fn toggle_selected(&mut self, cmd_id: CmdId) {
        if !self.selection.remove(&cmd_id) {
            self.selection.insert(cmd_id);
        }
    }

    /// Context-menu selection repair: menu actions must operate on the row
    /// under the cursor, so an unselected right-clicked row joins the
    /// selection before the menu shows.
    pub fn ensure_row_selected(&mut self, cmd_id: CmdId) {
        self.selection.insert(cmd_id);
    }

    pub fn selected_commands(&self) -> Vec<&JobCommand> {
        self.rows
            .iter()
            .filter(|row| self.selection.contains(&row.cmd_id))
            .collect()
    }

    /// Optimistic removal: rows leave the local cache before any backend
    /// delete request resolves.
    pub fn remove_rows(&mut self, cmd_ids: &[CmdId]) {
        self.rows.retain(|row| !cmd_ids.contains(&row.cmd_id));
        for cmd_id in cmd_ids {
            self.selection.remove(cmd_id);
        }
        self.clamp_page();
    }

    /// Responsive width: window width minus the fixed chrome offset.
    pub fn width_for_window(window_width: f32) -> f32 {
        (window_width - GRID_CHROME_WIDTH).max(MIN_GRID_WIDTH)
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}
