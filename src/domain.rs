use std::fmt;
use std::io::Error;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;

pub const HELP_TEXT: &str = "\
Home
  Enter        Go to dashboard
  q            Quit

Dashboard
  j/k, ↓/↑     Move row cursor
  h/l, ←/→     Focus column
  Space        Toggle row selection
  a            Toggle selection of all rows on the page
  x            Clear selection
  s / S        Sort focused column (S adds to the sort)
  r            Clear sorting
  c / C        Hide focused column / show all columns
  /            Search title and keyword
  f / F        Filter focused column / clear column filters
  n/p, PgDn/PgUp  Next / previous page
  g / G        First / last page
  + / -        More / fewer articles per page
  Tab/S-Tab    Switch article tab
  b            Collapse sidebar
  o            Open/close the Articles group
  t            Switch team
  Enter        View article
  y            Copy selected rows
  Esc          Close popup / back to home
  q            Quit";

#[derive(Debug)]
pub enum DashError {
    IoError(Error),
    PolarsError(PolarsError),
    JsonError(serde_json::Error),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
}

impl fmt::Display for DashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashError::IoError(e) => write!(f, "io error: {e}"),
            DashError::PolarsError(e) => write!(f, "could not read data file: {e}"),
            DashError::JsonError(e) => write!(f, "invalid article data: {e}"),
            DashError::LoadingFailed(reason) => write!(f, "loading failed: {reason}"),
            DashError::FileNotFound => write!(f, "data file not found"),
            DashError::PermissionDenied => write!(f, "permission denied"),
            DashError::UnknownFileType => write!(f, "unknown data file type"),
        }
    }
}

impl std::error::Error for DashError {}

impl From<Error> for DashError {
    fn from(err: Error) -> Self {
        DashError::IoError(err)
    }
}

impl From<PolarsError> for DashError {
    fn from(err: PolarsError) -> Self {
        DashError::PolarsError(err)
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::JsonError(err)
    }
}

#[derive(Debug, Clone, Setters)]
pub struct DashConfig {
    pub event_poll_time: u64,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub loading_delay_ms: u64,
    pub skeleton_rows: usize,
    pub max_column_width: usize,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            page_size: 10,
            page_size_options: vec![10, 20, 30, 40, 50],
            loading_delay_ms: 1500,
            skeleton_rows: 10,
            max_column_width: 48,
        }
    }
}

/// What the command line input is currently editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Search,
    ColumnFilter,
}

#[derive(Debug)]
pub enum Message {
    Quit,
    Exit,
    Enter,
    Help,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    PageSizeUp,
    PageSizeDown,
    Sort,
    SortMulti,
    ToggleColumn,
    ResetColumns,
    ToggleRow,
    TogglePageRows,
    ClearSelection,
    Search,
    Filter,
    ClearFilters,
    ClearSorting,
    NextTab,
    PreviousTab,
    ToggleSidebar,
    ToggleNavGroup,
    NextTeam,
    CopyRows,
    RawKey(KeyEvent),
}
