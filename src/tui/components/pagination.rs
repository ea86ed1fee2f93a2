//! Page strip under the table: every page number, the current one
//! highlighted, plus a short key legend.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Page numbers shown before the strip collapses to a window around the
/// current page.
const MAX_LISTED_PAGES: usize = 9;

pub struct PaginationBar {
    pub current_page: usize,
    pub total_pages: usize,
    pub palette: Palette,
}

impl PaginationBar {
    pub fn new(current_page: usize, total_pages: usize, palette: Palette) -> Self {
        Self {
            current_page,
            total_pages,
            palette,
        }
    }

    /// Page numbers to list. `None` marks a gap.
    fn listed_pages(&self) -> Vec<Option<usize>> {
        let total = self.total_pages;
        if total <= MAX_LISTED_PAGES {
            return (1..=total).map(Some).collect();
        }
        let half = MAX_LISTED_PAGES / 2 - 1;
        let start = self.current_page.saturating_sub(half).max(2);
        let end = (start + 2 * half).min(total - 1);
        let start = end.saturating_sub(2 * half).max(2);

        let mut pages = vec![Some(1)];
        if start > 2 {
            pages.push(None);
        }
        pages.extend((start..=end).map(Some));
        if end < total - 1 {
            pages.push(None);
        }
        pages.push(Some(total));
        pages
    }
}

impl Component for PaginationBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.total_pages == 0 {
            frame.render_widget(
                Paragraph::new("ไม่มีข้อมูล").style(Style::default().fg(self.palette.muted)),
                area,
            );
            return;
        }

        let mut spans = vec![Span::raw("หน้า ")];
        for page in self.listed_pages() {
            match page {
                Some(p) if p == self.current_page => spans.push(Span::styled(
                    format!("[{p}]"),
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Some(p) => spans.push(Span::raw(format!(" {p} "))),
                None => spans.push(Span::styled(" … ", Style::default().fg(self.palette.muted))),
            }
        }
        spans.push(Span::styled(
            format!("  ({}/{})", self.current_page, self.total_pages),
            Style::default().fg(self.palette.muted),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(self.palette.base()), area);
    }
}
