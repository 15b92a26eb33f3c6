use chrono::Utc;
use std::time::Duration;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap},
};

use crate::columns::{ColumnId, checkbox};
use crate::domain::{HELP_TEXT, InputMode};
use crate::model::{ArticleTab, Dashboard, Model, Popup, Route};
use crate::navigation::SidebarLine;
use crate::relative_time::{MISSING_TIMESTAMP, relative_label};

pub const CMDLINE_HEIGH: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;
pub const SEARCH_HEIGHT: u16 = 3;
pub const PAGE_HEADER_HEIGHT: u16 = 3;
pub const SIDEBAR_WIDTH: u16 = 32;
pub const SIDEBAR_WIDTH_COLLAPSED: u16 = 5;
const SKELETON: &str = "░░░░░░";
const KEYWORD_WIDTH: u16 = 24;
const STATUS_FADE: Duration = Duration::from_secs(5);
const ACCENT: Color = Color::Blue;

#[derive(Debug, Default)]
pub struct AppUI {}

impl AppUI {
    pub fn new() -> Self {
        Self {}
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let [page_area, cmdline_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(CMDLINE_HEIGH),
        ])
        .areas(frame.area());

        match (model.route(), model.dashboard()) {
            (Route::Dashboard, Some(dashboard)) => {
                self.draw_dashboard(model, dashboard, frame, page_area)
            }
            _ => self.draw_home(frame, page_area),
        }
        self.draw_cmdline(model, frame, cmdline_area);

        if let Some(popup) = model.popup() {
            self.draw_popup(model, popup, frame);
        }
    }

    // ------------------------------ Home ---------------------------------- //

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let text = Text::from(vec![
            Line::from(vec![
                "Welcome to ".bold(),
                Span::styled("Article Dashboard", Style::new().fg(ACCENT).bold()),
            ]),
            Line::from(""),
            Line::from("Manage generated articles from your terminal, built with"),
            Line::from(vec![
                "Rust".bold(),
                ", ".into(),
                "ratatui".bold(),
                " and ".into(),
                "crossterm".bold(),
                ". This starter layout gives you clean structure,".into(),
            ]),
            Line::from("a searchable article table and blazing-fast performance."),
            Line::from(""),
            Line::from(Span::styled(
                "  Go to Dashboard  ",
                Style::new().fg(Color::White).bg(ACCENT).bold(),
            )),
            Line::from(""),
            Line::from(vec!["<Enter>".blue().bold(), " open  ".into(), "<q>".blue().bold(), " quit".into()]),
        ]);

        let block = Block::bordered().border_set(border::ROUNDED);
        let inner = centered_rect(70, 60, area);
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, inner);
    }

    // ---------------------------- Dashboard ------------------------------- //

    fn draw_dashboard(&self, model: &Model, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
        let sidebar_width = if dashboard.sidebar.is_collapsed() {
            SIDEBAR_WIDTH_COLLAPSED
        } else {
            SIDEBAR_WIDTH
        };
        let [sidebar_area, main_area] = Layout::horizontal([
            Constraint::Length(sidebar_width),
            Constraint::Min(0),
        ])
        .areas(area);
        self.draw_sidebar(dashboard, frame, sidebar_area);

        let [header_area, tabs_area, search_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(PAGE_HEADER_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(main_area);

        let paragraph = Paragraph::new(Line::from("Articles".bold()))
            .alignment(Alignment::Center)
            .block(Block::new().borders(Borders::BOTTOM));

        frame.render_widget(paragraph, header_area);

        let titles = ArticleTab::ALL.iter().map(|t| t.label());
        frame.render_widget(
            Tabs::new(titles)
                .select(dashboard.tab.index())
                .highlight_style(Style::new().fg(ACCENT).bold()),
            tabs_area,
        );

        self.draw_search(model, dashboard, frame, search_area);

        if dashboard.tab == ArticleTab::Generated {
            self.draw_table(model, dashboard, frame, table_area);
            self.draw_footer(dashboard, frame, footer_area);
        } else {
            frame.render_widget(
                Block::bordered()
                    .border_style(Style::new().fg(Color::DarkGray))
                    .border_set(border::PLAIN),
                table_area,
            );
        }
    }

    fn draw_sidebar(&self, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = dashboard
            .sidebar
            .lines()
            .into_iter()
            .map(|line| match line {
                SidebarLine::Team { logo, name, plan } => Line::from(vec![
                    Span::styled(format!(" {logo} "), Style::new().fg(Color::White).bg(ACCENT)),
                    format!(" {name} ").bold(),
                    Span::styled(plan, Style::new().fg(Color::DarkGray)),
                    " ▾".into(),
                ]),
                SidebarLine::Entry { icon, title, open } => {
                    let marker = match open {
                        Some(true) => " ▾",
                        Some(false) => " ▸",
                        None => "",
                    };
                    Line::from(vec![
                        Span::styled(format!(" {icon} "), Style::new().fg(ACCENT)),
                        Span::raw(title),
                        Span::raw(marker),
                    ])
                }
                SidebarLine::SubItem { title, active } => {
                    let style = if active {
                        Style::new().fg(ACCENT).bold()
                    } else {
                        Style::new()
                    };
                    Line::from(vec![Span::raw("   │ "), Span::styled(title, style)])
                }
                SidebarLine::Separator => Line::from(""),
                SidebarLine::Icon(icon) => {
                    Line::from(Span::styled(format!(" {icon}"), Style::new().fg(ACCENT)))
                }
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::new().borders(Borders::RIGHT));

        frame.render_widget(paragraph, area);
    }

    fn draw_search(&self, model: &Model, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
        let editing = model.input_mode() == Some(InputMode::Search);
        let query = dashboard.table.query();
        let line = if query.is_empty() && !editing {
            Line::from(Span::styled(
                "Search for Title and Keyword",
                Style::new().fg(Color::DarkGray),
            ))
        } else {
            Line::from(query.to_string())
        };
        let border_style = if editing {
            Style::new().fg(ACCENT)
        } else {
            Style::new()
        };
        let width = std::cmp::min(area.width, 40);
        let search_area = Rect { width, ..area };
        let paragraph = Paragraph::new(line)
            .block(Block::bordered().border_style(border_style));
        frame.render_widget(paragraph, search_area);
    }

    fn draw_table(&self, model: &Model, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
        let table = &dashboard.table;
        let columns = table.visible_columns();
        let focused = dashboard.focused_column();
        let widths: Vec<Constraint> = columns
            .iter()
            .map(|&c| column_width(c))
            .collect();

        let header = Row::new(columns.iter().map(|&c| {
            let mut label = if c == ColumnId::Select {
                checkbox(table.page_selection()).to_string()
            } else {
                c.header().to_string()
            };
            match table.sort_direction(c) {
                Some(true) => label.push_str(" ▼"),
                Some(false) => label.push_str(" ▲"),
                None => {}
            }
            // rank of the column in a multi sort
            let sorting = table.sorting();
            if sorting.len() > 1
                && let Some(pos) = sorting.iter().position(|s| s.column == c)
            {
                label.push_str(&(pos + 1).to_string());
            }
            let mut style = Style::new().add_modifier(Modifier::BOLD);
            if c == focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(label).style(style)
        }))
        .bottom_margin(1);

        let mut empty = false;
        let rows: Vec<Row> = if dashboard.is_loading() {
            (0..model.skeleton_rows())
                .map(|_| {
                    Row::new(columns.iter().map(|_| {
                        Cell::from(SKELETON).style(Style::new().fg(Color::DarkGray))
                    }))
                })
                .collect()
        } else {
            let now = Utc::now();
            let page = table.page_rows();
            empty = page.is_empty();
            page.iter()
                .enumerate()
                .map(|(ridx, record)| {
                    let selected = table.is_selected(record.id);
                    let cells = columns.iter().map(|&c| {
                        let text = truncate(&c.cell(record, selected, now), model.max_column_width());
                        match c {
                            ColumnId::Action => Cell::from(text).style(Style::new().fg(Color::Green)),
                            ColumnId::Publish => Cell::from(text).style(Style::new().fg(ACCENT)),
                            _ => Cell::from(text),
                        }
                    });
                    let mut style = Style::new();
                    if selected {
                        style = style.bg(Color::Rgb(30, 40, 70));
                    }
                    if ridx == dashboard.cursor_row {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Row::new(cells).style(style)
                })
                .collect()
        };

        frame.render_widget(
            Table::new(rows, widths)
                .header(header)
                .column_spacing(1)
                .block(Block::bordered().border_set(border::ROUNDED)),
            area,
        );

        // header line plus its margin sit below the top border
        if empty && area.height > 4 {
            let message_area = Rect {
                x: area.x + 1,
                y: area.y + 3,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            let paragraph = Paragraph::new("No results.").alignment(Alignment::Center);
            frame.render_widget(paragraph, message_area);
        }
    }

    fn draw_footer(&self, dashboard: &Dashboard, frame: &mut Frame, area: Rect) {
        let table = &dashboard.table;
        let pagination = table.pagination();
        let control = |label: &'static str, enabled: bool| {
            if enabled {
                Span::styled(label, Style::new().bold())
            } else {
                Span::styled(label, Style::new().fg(Color::DarkGray))
            }
        };

        let [selected_area, paging_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(58)]).areas(area);

        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(
                "{} of {} row(s) selected.",
                table.filtered_selected_row_count(),
                table.filtered_row_count()
            ),
            Style::new().fg(Color::DarkGray),
        )));
        frame.render_widget(paragraph, selected_area);

        let paragraph = Paragraph::new(Line::from(vec![
            format!("Articles per page {}   ", pagination.page_size).bold(),
            format!(
                "Page {} of {}   ",
                pagination.page_index + 1,
                table.page_count()
            )
            .bold(),
            control(" « ", table.can_previous_page()),
            control(" ‹ ", table.can_previous_page()),
            control(" › ", table.can_next_page()),
            control(" » ", table.can_next_page()),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(paragraph, paging_area);
    }

    // ---------------------------- Cmdline --------------------------------- //

    fn draw_cmdline(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let line = match model.input_mode() {
            Some(mode) => {
                let prompt = match mode {
                    InputMode::Search => "Search for Title and Keyword: ".to_string(),
                    InputMode::ColumnFilter => format!(
                        "Filter {}: ",
                        model
                            .dashboard()
                            .map(|d| d.focused_column().header())
                            .unwrap_or_default()
                    ),
                };
                let input = &model.last_input().input;
                let cursor = model.last_input().curser_pos;
                let (before, after): (String, String) = (
                    input.chars().take(cursor).collect(),
                    input.chars().skip(cursor).collect(),
                );
                Line::from(vec![
                    prompt.blue().bold(),
                    before.into(),
                    Span::styled("█", Style::new().fg(ACCENT)),
                    after.into(),
                ])
            }
            None => {
                let style = if model.status_message_age() > STATUS_FADE {
                    Style::new().fg(Color::DarkGray)
                } else {
                    Style::new()
                };
                Line::from(vec![
                    Span::styled(model.status_message().to_string(), style),
                    "  <?> help".dark_gray(),
                ])
            }
        };
        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }

    // ----------------------------- Popup ---------------------------------- //

    fn draw_popup(&self, model: &Model, popup: &Popup, frame: &mut Frame) {
        let (title, text) = match popup {
            Popup::Help => (" Help ", Text::from(HELP_TEXT)),
            Popup::Article(id) => (" Article ", article_text(model, *id)),
        };
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(Line::from(title.bold()).centered())
                    .title_bottom(Line::from(vec![" Close ".into(), "<Esc> ".blue().bold()]).centered())
                    .border_set(border::THICK),
            );
        frame.render_widget(paragraph, area);
    }
}

fn article_text(model: &Model, id: u64) -> Text<'static> {
    let Some(record) = model.record(id) else {
        return Text::from(format!("Article {id} not found"));
    };
    let created = record
        .created_on
        .map(|c| format!("{} ({})", c.to_rfc3339(), relative_label(Some(c), Utc::now())))
        .unwrap_or_else(|| MISSING_TIMESTAMP.to_string());
    let field = |name: &str, value: String| {
        Line::from(vec![Span::styled(format!("{name:>10}: "), Style::new().bold()), Span::raw(value)])
    };
    Text::from(vec![
        field("Id", record.id.to_string()),
        field("Title", record.title.clone()),
        field("Keyword", record.keyword.clone()),
        field("Traffic", record.traffic.to_string()),
        field("Words", record.words.to_string()),
        field("Created", created),
    ])
}

fn column_width(column: ColumnId) -> Constraint {
    match column {
        ColumnId::Select => Constraint::Length(3),
        ColumnId::Title => Constraint::Fill(1),
        ColumnId::Keyword => Constraint::Length(KEYWORD_WIDTH),
        ColumnId::Words => Constraint::Length(9),
        ColumnId::CreatedOn => Constraint::Length(18),
        ColumnId::Action => Constraint::Length(8),
        ColumnId::Publish => Constraint::Length(13),
    }
}

/// Cuts `text` to `max` chars, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
