use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

use crate::columns::ColumnId;
use crate::domain::{DashConfig, DashError, InputMode, Message};
use crate::inputter::{InputResult, Inputter};
use crate::navigation::Sidebar;
use crate::record::Record;
use crate::table_state::DataTable;
use crate::timer::OneShot;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Home,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    PAGE,
    POPUP,
    CMDINPUT,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArticleTab {
    Generated,
    Published,
    Scheduled,
    Archived,
}

impl ArticleTab {
    pub const ALL: [ArticleTab; 4] = [
        ArticleTab::Generated,
        ArticleTab::Published,
        ArticleTab::Scheduled,
        ArticleTab::Archived,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArticleTab::Generated => "Generated Articles",
            ArticleTab::Published => "Published Articles",
            ArticleTab::Scheduled => "Scheduled Articles",
            ArticleTab::Archived => "Archived Articles",
        }
    }

    pub fn index(self) -> usize {
        ArticleTab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn step(self, forward: bool) -> Self {
        let len = ArticleTab::ALL.len();
        let idx = if forward {
            (self.index() + 1) % len
        } else {
            (self.index() + len - 1) % len
        };
        ArticleTab::ALL[idx]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Help,
    Article(u64),
}

/// Everything that lives as long as the dashboard page is shown.
pub struct Dashboard {
    pub table: DataTable,
    pub sidebar: Sidebar,
    pub tab: ArticleTab,
    pub cursor_row: usize,
    pub cursor_column: usize,
    loading: OneShot,
    is_loading: bool,
}

impl Dashboard {
    pub fn mount(records: Arc<Vec<Record>>, config: &DashConfig, now: Instant) -> Self {
        debug!("Mounting dashboard with {} articles", records.len());
        Self {
            table: DataTable::new(records, config.page_size),
            sidebar: Sidebar::default(),
            tab: ArticleTab::Generated,
            cursor_row: 0,
            cursor_column: 1,
            loading: OneShot::schedule(now, Duration::from_millis(config.loading_delay_ms)),
            is_loading: true,
        }
    }

    pub fn unmount(&mut self) {
        self.loading.cancel();
        debug!("Unmounted dashboard, loading timer {:?}", self.loading.state());
    }

    /// Returns true when the loading placeholder was just replaced.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.loading.poll(now) {
            self.is_loading = false;
            trace!("Loading simulation finished");
            return true;
        }
        false
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn focused_column(&self) -> ColumnId {
        let columns = self.table.visible_columns();
        columns
            .get(self.cursor_column)
            .copied()
            .unwrap_or(ColumnId::Select)
    }

    /// The record under the cursor, none while the placeholder is shown.
    pub fn cursor_record(&self) -> Option<&Record> {
        if self.is_loading {
            return None;
        }
        self.table.page_rows().get(self.cursor_row).copied()
    }

    fn clamp_cursor(&mut self) {
        let rows = self.table.page_rows().len();
        self.cursor_row = std::cmp::min(self.cursor_row, rows.saturating_sub(1));
        let columns = self.table.visible_columns().len();
        self.cursor_column = std::cmp::min(self.cursor_column, columns.saturating_sub(1));
    }
}

pub struct Model {
    config: DashConfig,
    pub status: Status,
    records: Arc<Vec<Record>>,
    route: Route,
    dashboard: Option<Dashboard>,
    modus: Modus,
    previous_modus: Modus,
    popup: Option<Popup>,
    input: Inputter,
    input_mode: Option<InputMode>,
    last_input: InputResult,
    status_message: String,
    last_status_message_update: Instant,
    clipboard: Option<Clipboard>,
}

impl Model {
    pub fn init(config: &DashConfig, records: Vec<Record>, route: Route) -> Self {
        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            records: Arc::new(records),
            route: Route::Home,
            dashboard: None,
            modus: Modus::PAGE,
            previous_modus: Modus::PAGE,
            popup: None,
            input: Inputter::default(),
            input_mode: None,
            last_input: InputResult::default(),
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            clipboard: None,
        };
        model.set_status_message(format!("Loaded {} articles", model.records.len()));
        model.navigate(route, Instant::now());
        model
    }

    // ----------------------------- Accessors ------------------------------ //

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        self.input_mode
    }

    pub fn last_input(&self) -> &InputResult {
        &self.last_input
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn skeleton_rows(&self) -> usize {
        self.config.skeleton_rows
    }

    pub fn max_column_width(&self) -> usize {
        self.config.max_column_width
    }

    pub fn record(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Whether key events go to the command line input unmapped.
    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::CMDINPUT
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    pub fn status_message_age(&self) -> Duration {
        self.last_status_message_update.elapsed()
    }

    // ----------------------------- Lifecycle ------------------------------ //

    fn navigate(&mut self, route: Route, now: Instant) {
        if let Some(mut dashboard) = self.dashboard.take() {
            dashboard.unmount();
        }
        if route == Route::Dashboard {
            self.dashboard = Some(Dashboard::mount(
                Arc::clone(&self.records),
                &self.config,
                now,
            ));
        }
        info!("Navigated to {:?}", route);
        self.route = route;
    }

    /// Drives the loading timer, called once per event loop iteration.
    pub fn tick(&mut self, now: Instant) {
        let loaded = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard.tick(now),
            None => false,
        };
        if loaded {
            self.set_status_message(format!("Showing {} articles", self.records.len()));
        }
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), DashError> {
        let Some(msg) = message else {
            return Ok(());
        };
        trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);

        match self.modus {
            Modus::CMDINPUT => {
                if let Message::RawKey(key) = msg {
                    self.raw_input(key)
                }
            }
            Modus::POPUP => match msg {
                Message::Quit => self.quit(),
                Message::Exit | Message::Enter | Message::Help => self.close_popup(),
                _ => (),
            },
            Modus::PAGE => match self.route {
                Route::Home => match msg {
                    Message::Quit => self.quit(),
                    Message::Enter => self.navigate(Route::Dashboard, Instant::now()),
                    Message::Help => self.show_popup(Popup::Help),
                    _ => (),
                },
                Route::Dashboard => self.update_dashboard(msg),
            },
        }
        Ok(())
    }

    fn update_dashboard(&mut self, msg: Message) {
        match msg {
            Message::Quit => return self.quit(),
            Message::Exit => return self.navigate(Route::Home, Instant::now()),
            Message::Help => return self.show_popup(Popup::Help),
            _ => (),
        }

        let options = self.config.page_size_options.clone();
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        match msg {
            Message::NextTab => dashboard.tab = dashboard.tab.step(true),
            Message::PreviousTab => dashboard.tab = dashboard.tab.step(false),
            Message::ToggleSidebar => dashboard.sidebar.toggle_collapsed(),
            Message::ToggleNavGroup => dashboard.sidebar.toggle_group(),
            Message::NextTeam => dashboard.sidebar.next_team(),
            _ if dashboard.tab != ArticleTab::Generated => (),
            Message::MoveUp => dashboard.cursor_row = dashboard.cursor_row.saturating_sub(1),
            Message::MoveDown => dashboard.cursor_row += 1,
            Message::MoveLeft => {
                dashboard.cursor_column = dashboard.cursor_column.saturating_sub(1)
            }
            Message::MoveRight => dashboard.cursor_column += 1,
            Message::NextPage => dashboard.table.next_page(),
            Message::PreviousPage => dashboard.table.previous_page(),
            Message::FirstPage => dashboard.table.first_page(),
            Message::LastPage => dashboard.table.last_page(),
            Message::PageSizeUp => dashboard.table.cycle_page_size(&options, true),
            Message::PageSizeDown => dashboard.table.cycle_page_size(&options, false),
            Message::Sort | Message::SortMulti => {
                let column = dashboard.focused_column();
                dashboard
                    .table
                    .toggle_sorting(column, matches!(msg, Message::SortMulti));
            }
            Message::ToggleColumn => {
                let column = dashboard.focused_column();
                dashboard.table.toggle_column_visibility(column);
            }
            Message::ResetColumns => dashboard.table.reset_column_visibility(),
            Message::ToggleRow => {
                if let Some(id) = dashboard.cursor_record().map(|r| r.id) {
                    dashboard.table.toggle_row_selected(id);
                    trace!("Selected ids {:?}", dashboard.table.selected_ids());
                }
            }
            Message::TogglePageRows => dashboard.table.toggle_all_page_rows_selected(),
            Message::ClearSelection => dashboard.table.clear_selection(),
            Message::ClearFilters => dashboard.table.clear_column_filters(),
            Message::ClearSorting => dashboard.table.clear_sorting(),
            Message::Enter => {
                if let Some(id) = dashboard.cursor_record().map(|r| r.id) {
                    self.show_popup(Popup::Article(id));
                }
            }
            Message::Search => self.enter_cmd_mode(InputMode::Search),
            Message::Filter => self.enter_cmd_mode(InputMode::ColumnFilter),
            Message::CopyRows => self.copy_selected_rows(),
            _ => (),
        }

        if let Some(dashboard) = self.dashboard.as_mut() {
            dashboard.clamp_cursor();
        }
    }

    // ---------------------------- Popups ---------------------------------- //

    fn show_popup(&mut self, popup: Popup) {
        trace!("Show popup {:?}", popup);
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
        self.popup = Some(popup);
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::POPUP;
        self.popup = None;
    }

    // --------------------------- Command input ---------------------------- //

    fn enter_cmd_mode(&mut self, mode: InputMode) {
        let Some(dashboard) = self.dashboard.as_ref() else {
            return;
        };
        let current = match mode {
            InputMode::Search => dashboard.table.query().to_string(),
            InputMode::ColumnFilter => {
                let column = dashboard.focused_column();
                if !column.has_accessor() {
                    self.set_status_message(format!("Column \"{}\" can not be filtered", column.header()));
                    return;
                }
                dashboard
                    .table
                    .column_filters()
                    .iter()
                    .find(|f| f.column == column)
                    .map(|f| f.value.clone())
                    .unwrap_or_default()
            }
        };
        trace!("Entering command mode {:?} ...", mode);

        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.input_mode = Some(mode);
        self.input.set(&current);
        self.last_input = self.input.get();
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        if self.input_mode == Some(InputMode::Search) {
            let query = self.last_input.input.clone();
            if let Some(dashboard) = self.dashboard.as_mut() {
                dashboard.table.set_query(&query);
                dashboard.clamp_cursor();
            }
        }
        if self.last_input.finished {
            self.handle_cmd_input();
        }
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle cmd input {:?}", self.last_input);
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;

        let input = self.last_input.input.clone();
        let canceled = self.last_input.canceled;
        let message = match (self.input_mode.take(), self.dashboard.as_mut()) {
            (Some(InputMode::Search), Some(dashboard)) => {
                let count = dashboard.table.filtered_row_count();
                let total = dashboard.table.total_row_count();
                if input.trim().is_empty() {
                    Some("Search cleared".to_string())
                } else {
                    Some(format!("{count} of {total} articles match \"{input}\""))
                }
            }
            (Some(InputMode::ColumnFilter), Some(dashboard)) if !canceled => {
                let column = dashboard.focused_column();
                dashboard.table.set_column_filter(column, &input);
                dashboard.clamp_cursor();
                let count = dashboard.table.filtered_row_count();
                Some(format!(
                    "Filtered \"{}\" by \"{input}\": {count} rows",
                    column.header()
                ))
            }
            (mode, _) => {
                debug!("Input for {:?} ignored", mode);
                None
            }
        };
        if let Some(message) = message {
            self.set_status_message(message);
        }
        self.input.clear();
    }

    // ---------------------------- Clipboard ------------------------------- //

    fn wrap_cell_content(c: &str) -> String {
        let needs_wrapping = c.chars().any(|c| matches!(c, '"' | ',' | '\r' | '\n'));
        if needs_wrapping {
            format!("\"{}\"", c.replace('"', "\"\""))
        } else {
            c.to_string()
        }
    }

    fn rows_as_csv(records: &[&Record]) -> String {
        let mut lines = vec!["id,title,keyword,traffic,words,createdOn".to_string()];
        for r in records {
            let created = r.created_on.map(|c| c.to_rfc3339()).unwrap_or_default();
            lines.push(
                [
                    r.id.to_string(),
                    Model::wrap_cell_content(&r.title),
                    Model::wrap_cell_content(&r.keyword),
                    r.traffic.to_string(),
                    r.words.to_string(),
                    created,
                ]
                .join(","),
            );
        }
        lines.join("\n")
    }

    fn copy_selected_rows(&mut self) {
        let Some(dashboard) = self.dashboard.as_ref() else {
            return;
        };
        let rows = dashboard.table.filtered_selected_rows();
        if rows.is_empty() {
            self.set_status_message("No rows selected");
            return;
        }
        let count = rows.len();
        let content = Model::rows_as_csv(&rows);

        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(c) => self.clipboard = Some(c),
                Err(e) => {
                    warn!("Clipboard unavailable: {:?}", e);
                    self.set_status_message("Clipboard unavailable");
                    return;
                }
            }
        }
        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(content),
            None => return,
        };
        match result {
            Ok(_) => {
                trace!("Copied {count} rows to clipboard.");
                self.set_status_message(format!("Copied {count} rows"));
            }
            Err(e) => {
                warn!("Error copying to clipboard: {:?}", e);
                self.set_status_message("Copy failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn articles(n: u64) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let mut r = Record::new(i, &format!("Article {i}"), "kw");
                r.words = i * 10;
                r
            })
            .collect()
    }

    fn config() -> DashConfig {
        DashConfig::default().loading_delay_ms(0)
    }

    fn dashboard_model(n: u64) -> Model {
        let mut model = Model::init(&config(), articles(n), Route::Dashboard);
        model.tick(Instant::now());
        model
    }

    fn send(model: &mut Model, msg: Message) {
        model.update(Some(msg)).unwrap();
    }

    fn type_keys(model: &mut Model, s: &str) {
        for c in s.chars() {
            send(
                model,
                Message::RawKey(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
    }

    fn press(model: &mut Model, code: KeyCode) {
        send(model, Message::RawKey(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn starts_on_home_without_dashboard() {
        let model = Model::init(&config(), articles(3), Route::Home);
        assert_eq!(model.route(), Route::Home);
        assert!(model.dashboard().is_none());
    }

    #[test]
    fn enter_on_home_mounts_dashboard() {
        let mut model = Model::init(&config(), articles(3), Route::Home);
        send(&mut model, Message::Enter);
        assert_eq!(model.route(), Route::Dashboard);
        assert!(model.dashboard().unwrap().is_loading());
        model.tick(Instant::now());
        assert!(!model.dashboard().unwrap().is_loading());
    }

    #[test]
    fn loading_waits_for_delay() {
        let cfg = DashConfig::default().loading_delay_ms(1500);
        let mut model = Model::init(&cfg, articles(3), Route::Dashboard);
        model.tick(Instant::now());
        assert!(model.dashboard().unwrap().is_loading());
        model.tick(Instant::now() + Duration::from_millis(1600));
        assert!(!model.dashboard().unwrap().is_loading());
    }

    #[test]
    fn leaving_dashboard_resets_view_state() {
        let mut model = dashboard_model(30);
        send(&mut model, Message::ToggleRow);
        send(&mut model, Message::NextPage);
        send(&mut model, Message::Exit);
        assert_eq!(model.route(), Route::Home);
        assert!(model.dashboard().is_none());

        send(&mut model, Message::Enter);
        let dashboard = model.dashboard().unwrap();
        assert!(dashboard.is_loading());
        assert!(dashboard.table.selected_ids().is_empty());
        assert_eq!(dashboard.table.pagination().page_index, 0);
    }

    #[test]
    fn search_updates_on_every_keystroke() {
        let mut model = dashboard_model(12);
        send(&mut model, Message::Search);
        assert!(model.raw_keyevents());
        type_keys(&mut model, "Article 1");
        assert_eq!(model.dashboard().unwrap().table.filtered_row_count(), 4);
        type_keys(&mut model, "1");
        assert_eq!(model.dashboard().unwrap().table.filtered_row_count(), 1);
        press(&mut model, KeyCode::Enter);
        assert!(!model.raw_keyevents());
        assert_eq!(model.dashboard().unwrap().table.query(), "Article 11");
    }

    #[test]
    fn escape_clears_search() {
        let mut model = dashboard_model(12);
        send(&mut model, Message::Search);
        type_keys(&mut model, "Article 5");
        press(&mut model, KeyCode::Esc);
        let table = &model.dashboard().unwrap().table;
        assert_eq!(table.query(), "");
        assert_eq!(table.filtered_row_count(), 12);
    }

    #[test]
    fn selection_follows_record_after_sort() {
        let mut model = dashboard_model(5);
        send(&mut model, Message::ToggleRow);
        let selected = model.dashboard().unwrap().table.selected_ids().clone();
        assert_eq!(selected.iter().copied().collect::<Vec<_>>(), vec![1]);

        // focus the Words column and sort descending
        send(&mut model, Message::MoveRight);
        send(&mut model, Message::MoveRight);
        assert_eq!(model.dashboard().unwrap().focused_column(), ColumnId::Words);
        send(&mut model, Message::Sort);
        let dashboard = model.dashboard().unwrap();
        assert_eq!(dashboard.table.page_rows()[0].id, 5);
        assert!(dashboard.table.is_selected(1));
        assert!(!dashboard.table.is_selected(5));
    }

    #[test]
    fn column_filter_applies_on_enter() {
        let mut model = dashboard_model(12);
        send(&mut model, Message::Filter);
        type_keys(&mut model, "Article 1");
        assert_eq!(model.dashboard().unwrap().table.filtered_row_count(), 12);
        press(&mut model, KeyCode::Enter);
        assert_eq!(model.dashboard().unwrap().table.filtered_row_count(), 4);
        send(&mut model, Message::ClearFilters);
        assert_eq!(model.dashboard().unwrap().table.filtered_row_count(), 12);
    }

    #[test]
    fn select_column_can_not_be_filtered() {
        let mut model = dashboard_model(3);
        send(&mut model, Message::MoveLeft);
        send(&mut model, Message::Filter);
        assert!(!model.raw_keyevents());
        assert!(model.status_message().contains("can not be filtered"));
    }

    #[test]
    fn cursor_stays_on_page() {
        let mut model = dashboard_model(25);
        for _ in 0..20 {
            send(&mut model, Message::MoveDown);
        }
        assert_eq!(model.dashboard().unwrap().cursor_row, 9);
        send(&mut model, Message::LastPage);
        assert_eq!(model.dashboard().unwrap().cursor_row, 4);
        for _ in 0..20 {
            send(&mut model, Message::MoveRight);
        }
        assert_eq!(model.dashboard().unwrap().focused_column(), ColumnId::Publish);
    }

    #[test]
    fn enter_opens_article_popup_and_exit_closes_it() {
        let mut model = dashboard_model(3);
        send(&mut model, Message::MoveDown);
        send(&mut model, Message::Enter);
        assert_eq!(model.popup(), Some(&Popup::Article(2)));
        send(&mut model, Message::NextPage);
        send(&mut model, Message::Exit);
        assert!(model.popup().is_none());
        assert_eq!(model.route(), Route::Dashboard);
    }

    #[test]
    fn other_tabs_ignore_table_messages() {
        let mut model = dashboard_model(3);
        send(&mut model, Message::NextTab);
        assert_eq!(model.dashboard().unwrap().tab, ArticleTab::Published);
        send(&mut model, Message::ToggleRow);
        assert!(model.dashboard().unwrap().table.selected_ids().is_empty());
        send(&mut model, Message::PreviousTab);
        send(&mut model, Message::PreviousTab);
        assert_eq!(model.dashboard().unwrap().tab, ArticleTab::Archived);
    }

    #[test]
    fn page_size_keys_cycle_options() {
        let mut model = dashboard_model(60);
        send(&mut model, Message::PageSizeUp);
        assert_eq!(model.dashboard().unwrap().table.pagination().page_size, 20);
        send(&mut model, Message::PageSizeDown);
        send(&mut model, Message::PageSizeDown);
        assert_eq!(model.dashboard().unwrap().table.pagination().page_size, 10);
    }

    #[test]
    fn copy_without_selection_reports() {
        let mut model = dashboard_model(3);
        send(&mut model, Message::CopyRows);
        assert_eq!(model.status_message(), "No rows selected");
    }

    #[test]
    fn csv_rows_are_quoted() {
        let mut r = Record::new(1, "Say \"hi\", world", "kw");
        r.traffic = 5;
        let csv = Model::rows_as_csv(&[&r]);
        assert_eq!(
            csv,
            "id,title,keyword,traffic,words,createdOn\n1,\"Say \"\"hi\"\", world\",kw,5,0,"
        );
    }

    #[test]
    fn csv_quotes_fields_with_quotes_or_newlines() {
        let quoted = Record::new(1, "\"Quoted\"", "kw");
        assert_eq!(
            Model::rows_as_csv(&[&quoted]).lines().nth(1),
            Some("1,\"\"\"Quoted\"\"\",kw,0,0,")
        );
        assert_eq!(Model::wrap_cell_content("two\nlines"), "\"two\nlines\"");
        assert_eq!(Model::wrap_cell_content("plain words"), "plain words");
    }

    #[test]
    fn rows_are_not_actionable_while_loading() {
        let cfg = DashConfig::default().loading_delay_ms(1500);
        let mut model = Model::init(&cfg, articles(3), Route::Dashboard);
        send(&mut model, Message::ToggleRow);
        send(&mut model, Message::Enter);
        let dashboard = model.dashboard().unwrap();
        assert!(dashboard.is_loading());
        assert!(dashboard.table.selected_ids().is_empty());
        assert!(model.popup().is_none());
    }

    #[test]
    fn finished_loading_updates_status() {
        let cfg = DashConfig::default().loading_delay_ms(10);
        let start = Instant::now();
        let mut model = Model::init(&cfg, articles(3), Route::Dashboard);
        model.tick(start + Duration::from_millis(20));
        assert_eq!(model.status_message(), "Showing 3 articles");
    }

    #[test]
    fn quit_from_any_page() {
        let mut model = Model::init(&config(), articles(1), Route::Home);
        send(&mut model, Message::Quit);
        assert_eq!(model.status, Status::QUITTING);
    }
}
