//! # AssetTable Component
//!
//! The current page of records as a table with a checkbox column. The header
//! checkbox reflects whether every row on the page is selected.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AssetTableState` lives in `TuiState` and owns the row cursor
//! - `AssetTable` is created each frame with borrowed records and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::core::record::{AssetRecord, format_price};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Persistent cursor over the visible page.
#[derive(Default)]
pub struct AssetTableState {
    pub cursor: usize,
    pub table_state: TableState,
}

impl AssetTableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, row_count: usize) {
        if row_count > 0 {
            self.cursor = (self.cursor + 1).min(row_count - 1);
        }
    }

    /// Keep the cursor on a real row after the page changes under it.
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

pub struct AssetTable<'a> {
    rows: &'a [AssetRecord],
    checked: Vec<bool>,
    page_fully_selected: bool,
    /// Display number of the first row (1-based, across pages).
    first_number: usize,
    palette: Palette,
    state: &'a mut AssetTableState,
}

impl<'a> AssetTable<'a> {
    pub fn new(
        rows: &'a [AssetRecord],
        checked: Vec<bool>,
        page_fully_selected: bool,
        first_number: usize,
        palette: Palette,
        state: &'a mut AssetTableState,
    ) -> Self {
        Self {
            rows,
            checked,
            page_fully_selected,
            first_number,
            palette,
            state,
        }
    }
}

impl Component for AssetTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(" รายการครุภัณฑ์ ")
            .style(self.palette.base());

        if self.rows.is_empty() {
            let empty = Paragraph::new("ยังไม่มีรายการ กด n เพื่อเพิ่ม")
                .style(Style::default().fg(self.palette.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from(checkbox(self.page_fully_selected)),
            Cell::from("ลำดับ"),
            Cell::from("ชื่อครุภัณฑ์"),
            Cell::from("รหัส"),
            Cell::from("ประเภท"),
            Cell::from("ที่ตั้ง"),
            Cell::from(Line::from("ราคา").alignment(Alignment::Right)),
        ])
        .style(
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        );

        let rows = self.rows.iter().enumerate().map(|(i, record)| {
            let checked = self.checked.get(i).copied().unwrap_or(false);
            Row::new(vec![
                Cell::from(checkbox(checked)),
                Cell::from((self.first_number + i).to_string()),
                Cell::from(record.name.as_str()),
                Cell::from(record.article_code.as_str()),
                Cell::from(record.category.as_str()),
                Cell::from(record.location.as_str()),
                Cell::from(Line::from(format_price(record.unit_price)).alignment(Alignment::Right)),
            ])
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(14),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(self.palette.selected_row())
            .column_spacing(1);

        self.state.clamp(self.rows.len());
        self.state.table_state.select(Some(self.state.cursor));
        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}
