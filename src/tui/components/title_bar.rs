//! # TitleBar Component
//!
//! Top status line: application name, record and selection counts, the
//! active theme, and the current notice if there is one.
//!
//! Stateless. Every value arrives as a prop:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.record_count(),
//!     app.selection_count(),
//!     app.theme(),
//!     app.notice().cloned(),
//!     palette,
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! The notice is placed last so narrow terminals cut it first; the counts
//! stay visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Notice;
use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const APP_TITLE: &str = "ทะเบียนครุภัณฑ์";

pub struct TitleBar {
    pub record_count: usize,
    pub selection_count: usize,
    pub theme: Theme,
    pub notice: Option<Notice>,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(
        record_count: usize,
        selection_count: usize,
        theme: Theme,
        notice: Option<Notice>,
        palette: Palette,
    ) -> Self {
        Self {
            record_count,
            selection_count,
            theme,
            notice,
            palette,
        }
    }

    fn summary(&self) -> String {
        format!(
            " | {} รายการ | เลือก {} | theme: {}",
            self.record_count, self.selection_count, self.theme
        )
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.summary()),
        ];
        if let Some(notice) = &self.notice {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                notice.message.clone(),
                self.palette.notice(notice.level),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(self.palette.base()),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_shows_counts_and_theme() {
        let mut title_bar =
            TitleBar::new(12, 3, Theme::Dark, None, Palette::for_theme(Theme::Dark));
        let text = render_text(&mut title_bar);

        assert!(text.contains("12"));
        assert!(text.contains("theme: dark"));
        assert!(!text.contains("กรุณา"));
    }

    #[test]
    fn test_title_bar_shows_notice() {
        let mut title_bar = TitleBar::new(
            0,
            0,
            Theme::Light,
            Some(Notice::warning("print unavailable")),
            Palette::for_theme(Theme::Light),
        );
        let text = render_text(&mut title_bar);
        assert!(text.contains("print unavailable"));
    }

    #[test]
    fn test_title_bar_props_are_mutable() {
        let mut title_bar =
            TitleBar::new(1, 0, Theme::Light, None, Palette::for_theme(Theme::Light));
        title_bar.selection_count = 4;
        title_bar.notice = Some(Notice::info("saved"));
        assert_eq!(title_bar.selection_count, 4);
        assert!(title_bar.notice.is_some());
    }
}
