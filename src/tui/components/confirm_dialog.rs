//! Yes/no gate in front of record deletion.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::record::RecordId;
use crate::tui::component::{EventHandler, centered_rect};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub struct ConfirmDeleteState {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm(RecordId),
    Cancel,
}

impl ConfirmDeleteState {
    pub fn new(id: RecordId, name: String) -> Self {
        Self { id, name }
    }
}

impl EventHandler for ConfirmDeleteState {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::InputChar('y' | 'Y') => Some(ConfirmEvent::Confirm(self.id.clone())),
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(ConfirmEvent::Cancel),
            _ => None,
        }
    }
}

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDeleteState,
    palette: Palette,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDeleteState, palette: Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 25, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(self.palette.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .title(" ลบรายการ ")
            .title_bottom(Line::from(" y ลบ  n/Esc ยกเลิก ").centered())
            .style(self.palette.base());

        let body = Paragraph::new(format!("ต้องการลบ \"{}\" หรือไม่?", self.state.name))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}
