use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    AssetTable, ConfirmDialog, PaginationBar, PrintPreview, RecordDetail, RecordForm, TitleBar,
};
use crate::tui::palette::Palette;
use crate::tui::{Overlay, TuiState};

const HELP_TEXT: &str = " ↑↓ เลื่อน  Space เลือก  a ทั้งหน้า  ←→ หน้า  n เพิ่ม  e แก้ไข  Enter ดู  d ลบ  p พิมพ์  t ธีม  q ออก ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let palette = Palette::for_theme(app.theme());

    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(1)]);
    let [title_area, table_area, pages_area, help_area] = layout.areas(frame.area());

    TitleBar::new(
        app.record_count(),
        app.selection_count(),
        app.theme(),
        app.notice().cloned(),
        palette,
    )
    .render(frame, title_area);

    let rows = app.visible_records();
    let checked = rows.iter().map(|r| app.is_selected(&r.id)).collect();
    let first_number = app.current_page().saturating_sub(1) * app.page_size() + 1;
    AssetTable::new(
        rows,
        checked,
        app.page_fully_selected(),
        first_number,
        palette,
        &mut tui.table,
    )
    .render(frame, table_area);

    PaginationBar::new(app.current_page(), app.total_pages(), palette).render(frame, pages_area);

    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(palette.muted)),
        help_area,
    );

    match &mut tui.overlay {
        Some(Overlay::Form(state)) => RecordForm::new(state, palette).render(frame, frame.area()),
        Some(Overlay::Detail(id)) => {
            if let Some(record) = app.record(id) {
                RecordDetail::new(record, palette).render(frame, frame.area());
            }
        }
        Some(Overlay::Preview(state)) => {
            PrintPreview::new(state, palette).render(frame, frame.area())
        }
        Some(Overlay::ConfirmDelete(state)) => {
            ConfirmDialog::new(state, palette).render(frame, frame.area())
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::AssetForm;
    use crate::test_support::app_with_records;
    use crate::tui::components::RecordFormState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_last_page_after_inserts() {
        let app = app_with_records(7, 5);
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);

        assert!(text.contains("name-rec-5"));
        assert!(text.contains("name-rec-6"));
        assert!(!text.contains("name-rec-0"));
        assert!(text.contains("(2/2)"));
    }

    #[test]
    fn test_draw_ui_empty_register() {
        let app = app_with_records(0, 5);
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(!text.contains("[x]"));
    }

    #[test]
    fn test_draw_ui_with_form_overlay() {
        let app = app_with_records(2, 5);
        let mut tui = TuiState::new();
        tui.overlay = Some(Overlay::Form(RecordFormState::new(AssetForm::create_for_year(2024))));
        let text = screen(&app, &mut tui);
        assert!(text.contains("Ctrl+S"));
    }
}
