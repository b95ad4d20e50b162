//! Display state derived from a listing query.
//!
//! Nothing here is stored: sort buttons, the page strip and panel
//! visibility are recomputed from the query and the last known page count
//! whenever they are rendered.

use super::query::{Sort, SortDirection, SortField};

/// Pages shown either side of the current page in the page strip.
pub const PAGE_STRIP_RADIUS: u32 = 3;

/// Which sort buttons a column header shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortButtons {
    /// Button that clears the sort.
    pub neutral: bool,
    /// Button that sorts ascending.
    pub ascending: bool,
    /// Button that sorts descending.
    pub descending: bool,
}

impl SortButtons {
    const NEUTRAL: Self = Self {
        neutral: true,
        ascending: false,
        descending: false,
    };
    const DESCENDING: Self = Self {
        neutral: false,
        ascending: false,
        descending: true,
    };

    /// Returns the buttons for a column whose active direction is `active`.
    ///
    /// A sorted column shows the button for its next cycle state; every
    /// other column shows only the neutral button.
    #[must_use]
    pub const fn for_state(active: Option<SortDirection>) -> Self {
        match active {
            None => Self::NEUTRAL,
            Some(SortDirection::Ascending) => Self::DESCENDING,
            Some(SortDirection::Descending) => Self::NEUTRAL,
        }
    }
}

/// Sort state of one column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortHeader {
    /// Column the header belongs to.
    pub field: SortField,
    /// Direction when this column carries the active sort.
    pub active: Option<SortDirection>,
    /// Visible buttons.
    pub buttons: SortButtons,
}

/// Builds one header per sortable column, in column order.
#[must_use]
pub fn sort_headers(sort: Option<Sort>) -> Vec<SortHeader> {
    SortField::ALL
        .into_iter()
        .map(|field| {
            let active = sort
                .filter(|current| current.field == field)
                .map(|current| current.direction);
            SortHeader {
                field,
                active,
                buttons: SortButtons::for_state(active),
            }
        })
        .collect()
}

/// One numbered button in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    /// Page the button jumps to.
    pub number: u32,
    /// True for the page being displayed.
    pub current: bool,
}

/// Page navigation affordances for the admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNavigation {
    /// "First page" is usable.
    pub first_enabled: bool,
    /// "Previous page" is usable.
    pub previous_enabled: bool,
    /// "Next page" is usable.
    pub next_enabled: bool,
    /// "Last page" is usable.
    pub last_enabled: bool,
    /// Numbered buttons around the current page.
    pub pages: Vec<PageButton>,
}

impl PageNavigation {
    /// Derives navigation for `current` out of `total_pages`.
    ///
    /// `total_pages` below 1 is treated as 1 and `current` is clipped into
    /// range before deriving the strip.
    #[must_use]
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total = total_pages.max(1);
        let page = current.clamp(1, total);
        let first_strip = page.saturating_sub(PAGE_STRIP_RADIUS).max(1);
        let last_strip = page.saturating_add(PAGE_STRIP_RADIUS).min(total);

        Self {
            first_enabled: page > 1,
            previous_enabled: page > 1,
            next_enabled: page < total,
            last_enabled: page < total,
            pages: (first_strip..=last_strip)
                .map(|number| PageButton {
                    number,
                    current: number == page,
                })
                .collect(),
        }
    }

    /// Returns the page marked current.
    #[must_use]
    pub fn current_page(&self) -> Option<u32> {
        self.pages
            .iter()
            .find(|button| button.current)
            .map(|button| button.number)
    }
}

/// Modal panel currently open over the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenPanel {
    /// Only the listing is shown.
    #[default]
    None,
    /// The add-certificate form.
    AddItem,
    /// Details of one certificate.
    ViewItem(u64),
    /// The edit form of one certificate.
    EditItem(u64),
    /// Delete confirmation for one certificate.
    DeleteItem(u64),
    /// The error log.
    ErrorLog,
}

/// Visibility flags for each panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelVisibility {
    /// Add form is shown.
    pub add: bool,
    /// Detail view is shown.
    pub view: bool,
    /// Edit form is shown.
    pub edit: bool,
    /// Delete confirmation is shown.
    pub delete: bool,
    /// Error log is shown.
    pub error_log: bool,
}

impl PanelVisibility {
    /// Returns how many panels are visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        [self.add, self.view, self.edit, self.delete, self.error_log]
            .into_iter()
            .filter(|visible| *visible)
            .count()
    }
}

impl OpenPanel {
    /// Derives visibility flags; at most one flag is set.
    #[must_use]
    pub const fn visibility(self) -> PanelVisibility {
        let hidden = PanelVisibility {
            add: false,
            view: false,
            edit: false,
            delete: false,
            error_log: false,
        };
        match self {
            Self::None => hidden,
            Self::AddItem => PanelVisibility { add: true, ..hidden },
            Self::ViewItem(_) => PanelVisibility {
                view: true,
                ..hidden
            },
            Self::EditItem(_) => PanelVisibility {
                edit: true,
                ..hidden
            },
            Self::DeleteItem(_) => PanelVisibility {
                delete: true,
                ..hidden
            },
            Self::ErrorLog => PanelVisibility {
                error_log: true,
                ..hidden
            },
        }
    }

    /// Returns the certificate the panel refers to, if any.
    #[must_use]
    pub const fn item_id(self) -> Option<u64> {
        match self {
            Self::ViewItem(id) | Self::EditItem(id) | Self::DeleteItem(id) => Some(id),
            Self::None | Self::AddItem | Self::ErrorLog => None,
        }
    }
}
