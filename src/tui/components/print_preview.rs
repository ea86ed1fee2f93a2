//! # Print Preview Overlay
//!
//! Shows the composed report as plain text before it is sent to the print
//! host. Enter or `p` confirms, Esc closes without printing.
//!
//! The document is composed once when the overlay opens. The overlay
//! captures all input while open, so the register cannot change under it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::export::PrintDocument;
use crate::tui::component::{EventHandler, centered_rect, truncate_to_width};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub struct PrintPreviewState {
    pub document: PrintDocument,
    pub scroll_state: ScrollViewState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEvent {
    Confirm,
    Dismiss,
}

impl PrintPreviewState {
    pub fn new(document: PrintDocument) -> Self {
        Self {
            document,
            scroll_state: ScrollViewState::default(),
        }
    }
}

impl EventHandler for PrintPreviewState {
    type Event = PreviewEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PreviewEvent> {
        match event {
            TuiEvent::Submit | TuiEvent::InputChar('p') => return Some(PreviewEvent::Confirm),
            TuiEvent::Escape | TuiEvent::InputChar('q') => return Some(PreviewEvent::Dismiss),
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::Home => self.scroll_state.scroll_to_top(),
            TuiEvent::End => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

pub struct PrintPreview<'a> {
    state: &'a mut PrintPreviewState,
    palette: Palette,
}

impl<'a> PrintPreview<'a> {
    pub fn new(state: &'a mut PrintPreviewState, palette: Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 85, area);
        frame.render_widget(Clear, overlay);

        let title = format!(
            " ตัวอย่างก่อนพิมพ์ ({} รายการ) ",
            self.state.document.entries.len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(truncate_to_width(&title, overlay.width.saturating_sub(4) as usize))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter/p พิมพ์  ↑↓ เลื่อน  Esc ปิด ").centered())
            .style(self.palette.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let content_width = inner.width.saturating_sub(1);
        let lines: Vec<Line> = self
            .state
            .document
            .preview_lines()
            .into_iter()
            .map(Line::raw)
            .collect();
        let paragraph = Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
