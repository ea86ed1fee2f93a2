//! # Record Form Overlay
//!
//! Create/edit form over an `AssetForm` draft. Opened with `n` (new) or `e`
//! (edit the row under the cursor).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecordFormState` lives in `TuiState` while the overlay is open
//! - `RecordForm` is created each frame with borrowed state
//!
//! ## Keys
//!
//! | Key            | Text field   | Choice field | Images field          |
//! |----------------|--------------|--------------|-----------------------|
//! | chars / paste  | append       | -            | append to path list   |
//! | Backspace      | delete char  | -            | delete path char      |
//! | ← / →          | -            | cycle option | -                     |
//! | Enter          | next field   | next field   | attach listed paths   |
//! | Delete         | -            | -            | remove image N / last |
//! | Tab / ↑ / ↓    | move focus   | move focus   | move focus            |
//! | Ctrl+S         | submit       | submit       | submit                |
//! | Esc            | cancel       | cancel       | cancel                |
//!
//! Attached images are listed as `[1] jpeg [2] png`. Typing a number in the
//! path buffer and pressing Delete removes that image; with an empty buffer
//! Delete removes the last one.
//!
//! Reading image files is I/O, so the overlay only emits
//! `FormEvent::AttachImages`; the event loop reads them and hands the
//! payloads back through `attach`.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::form::{AssetForm, Field, FieldEdit, FieldKind};
use crate::core::record::{AssetRecord, ImagePayload};
use crate::core::state::NoticeLevel;
use crate::platform::image::parse_path_list;
use crate::tui::component::{EventHandler, centered_rect};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub struct RecordFormState {
    pub form: AssetForm,
    pub focus: usize,
    pub path_input: String,
    pub error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum FormEvent {
    Submit(AssetRecord),
    AttachImages(Vec<PathBuf>),
    Cancel,
}

impl RecordFormState {
    pub fn new(form: AssetForm) -> Self {
        Self {
            form,
            focus: 0,
            path_input: String::new(),
            error: None,
        }
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus]
    }

    /// Result of reading the files from the last `AttachImages`.
    pub fn attach(&mut self, batch: Vec<ImagePayload>) {
        if let Err(e) = self.form.attach_images(batch) {
            self.error = Some(e.to_string());
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn move_focus(&mut self, forward: bool) {
        let len = Field::ALL.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    fn edit_text(&mut self, field: Field, edit: impl FnOnce(&mut String)) {
        let mut value = self.form.value(field);
        edit(&mut value);
        if let Some(edit) = FieldEdit::set(field, value) {
            self.form.apply(edit);
        }
    }

    fn handle_text(&mut self, field: Field, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::InputChar(c) => self.edit_text(field, |v| v.push(*c)),
            TuiEvent::Paste(text) => {
                let text = if field == Field::Remarks {
                    text.clone()
                } else {
                    text.replace(['\r', '\n'], " ")
                };
                self.edit_text(field, |v| v.push_str(&text));
            }
            TuiEvent::Backspace => self.edit_text(field, |v| {
                v.pop();
            }),
            TuiEvent::Submit => self.move_focus(true),
            _ => {}
        }
        None
    }

    fn handle_choice(&mut self, field: Field, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::CursorLeft => self.form.cycle_choice(field, false),
            TuiEvent::CursorRight | TuiEvent::InputChar(' ') => self.form.cycle_choice(field, true),
            TuiEvent::Submit => self.move_focus(true),
            _ => {}
        }
        None
    }

    fn handle_images(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::InputChar(c) => self.path_input.push(*c),
            TuiEvent::Paste(text) => self.path_input.push_str(&text.replace(['\r', '\n'], " ")),
            TuiEvent::Backspace => {
                self.path_input.pop();
            }
            TuiEvent::Delete => self.remove_image(),
            TuiEvent::Submit => {
                let paths = parse_path_list(&self.path_input);
                if paths.is_empty() {
                    return None;
                }
                if let Err(e) = self.form.ensure_capacity(paths.len()) {
                    self.error = Some(e.to_string());
                    return None;
                }
                self.path_input.clear();
                return Some(FormEvent::AttachImages(paths));
            }
            _ => {}
        }
        None
    }
}

impl RecordFormState {
    /// Remove the image numbered in the path buffer (1-based), or the last one.
    fn remove_image(&mut self) {
        let count = self.form.images().len();
        let input = self.path_input.trim();
        let index = if input.is_empty() {
            count.checked_sub(1)
        } else {
            input
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=count).contains(n))
                .map(|n| n - 1)
        };
        match index {
            Some(index) => {
                self.form.remove_image(index);
                self.path_input.clear();
            }
            None if !input.is_empty() => {
                self.error = Some(format!("ไม่มีรูปลำดับที่ {input}"));
            }
            None => {}
        }
    }
}

impl EventHandler for RecordFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Save => {
                return match self.form.submit() {
                    Ok(record) => Some(FormEvent::Submit(record)),
                    Err(e) => {
                        self.error = Some(e.to_string());
                        None
                    }
                };
            }
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.move_focus(true);
                return None;
            }
            TuiEvent::PreviousField | TuiEvent::CursorUp => {
                self.move_focus(false);
                return None;
            }
            _ => {}
        }

        self.error = None;
        let field = self.focused_field();
        match field.kind() {
            FieldKind::Text => self.handle_text(field, event),
            FieldKind::Choice => self.handle_choice(field, event),
            FieldKind::Images => self.handle_images(event),
        }
    }
}

/// Transient render wrapper for the form overlay.
pub struct RecordForm<'a> {
    state: &'a RecordFormState,
    palette: Palette,
}

impl<'a> RecordForm<'a> {
    pub fn new(state: &'a RecordFormState, palette: Palette) -> Self {
        Self { state, palette }
    }

    fn field_line(&self, index: usize, field: Field) -> Line<'static> {
        let focused = index == self.state.focus;
        let label_style = if focused {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.muted)
        };
        let marker = if focused { "▸ " } else { "  " };

        let value = match field.kind() {
            FieldKind::Choice => format!("◂ {} ▸", self.state.form.value(field)),
            FieldKind::Text if focused => format!("{}▏", self.state.form.value(field)),
            FieldKind::Text => self.state.form.value(field),
            FieldKind::Images => {
                let listed: Vec<String> = self
                    .state
                    .form
                    .images()
                    .iter()
                    .enumerate()
                    .map(|(i, image)| format!("[{}] {}", i + 1, image.kind()))
                    .collect();
                let mut text = self.state.form.value(field);
                if !listed.is_empty() {
                    text.push_str(&format!(" {}", listed.join(" ")));
                }
                if focused {
                    text.push_str(&format!("  ไฟล์: {}▏", self.state.path_input));
                }
                text
            }
        };

        Line::from(vec![
            Span::styled(format!("{marker}{}: ", field.label()), label_style),
            Span::styled(value, Style::default().fg(self.palette.text)),
        ])
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 90, area);
        frame.render_widget(Clear, overlay);

        let title = if self.state.form.is_edit() {
            " แก้ไขรายการ "
        } else {
            " เพิ่มรายการ "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(
                Line::from(" Tab เลื่อน  ←→ เลือก  Enter แนบรูป  เลข+Del ลบรูป  Ctrl+S บันทึก  Esc ยกเลิก ")
                    .centered(),
            )
            .padding(Padding::horizontal(1))
            .style(self.palette.base());

        let mut lines: Vec<Line> = Field::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| self.field_line(i, *field))
            .collect();
        if let Some(error) = &self.state.error {
            lines.push(Line::default());
            lines.push(Line::styled(error.clone(), self.palette.notice(NoticeLevel::Warning)));
        }

        // Keep the focused field in view on short terminals
        let inner_height = overlay.height.saturating_sub(2) as usize;
        let scroll = (self.state.focus + 1).saturating_sub(inner_height);

        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((scroll as u16, 0)),
            overlay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::FormError;
    use crate::core::record::MAX_IMAGES;
    use crate::core::theme::Theme;
    use crate::test_support::record;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn focus_on(state: &mut RecordFormState, field: Field) {
        state.focus = Field::ALL.iter().position(|f| *f == field).unwrap();
    }

    fn type_text(state: &mut RecordFormState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn payloads(n: usize) -> Vec<ImagePayload> {
        (0..n).map(|i| ImagePayload::new(format!("data:image/gif;base64,{i}"))).collect()
    }

    #[test]
    fn test_typing_edits_focused_text_field() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        focus_on(&mut state, Field::Name);
        type_text(&mut state, "โต๊ะ");
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.form.value(Field::Name), "โต๊");
    }

    #[test]
    fn test_focus_wraps() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        state.handle_event(&TuiEvent::PreviousField);
        assert_eq!(state.focused_field(), Field::Images);
        state.handle_event(&TuiEvent::NextField);
        assert_eq!(state.focused_field(), Field::Category);
    }

    #[test]
    fn test_arrows_cycle_choice_fields() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        focus_on(&mut state, Field::Month);
        let before = state.form.value(Field::Month);
        state.handle_event(&TuiEvent::CursorRight);
        assert_ne!(state.form.value(Field::Month), before);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.form.value(Field::Month), before);
    }

    #[test]
    fn test_save_with_missing_name_sets_error() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        assert_eq!(state.handle_event(&TuiEvent::Save), None);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_save_edit_keeps_id() {
        let original = record("keep");
        let mut state = RecordFormState::new(AssetForm::edit(&original));
        focus_on(&mut state, Field::Location);
        type_text(&mut state, "2");

        match state.handle_event(&TuiEvent::Save) {
            Some(FormEvent::Submit(saved)) => {
                assert_eq!(saved.id, original.id);
                assert_eq!(saved.location, "room-keep2");
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_on_images_emits_paths() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        focus_on(&mut state, Field::Images);
        type_text(&mut state, "a.png b.jpg");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(FormEvent::AttachImages(vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]))
        );
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn test_too_many_paths_rejected_before_reading() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        state.attach(payloads(2));
        focus_on(&mut state, Field::Images);
        type_text(&mut state, "a.png b.png");

        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(
            state.error,
            Some(FormError::TooManyImages { existing: 2, incoming: 2 }.to_string())
        );
        assert_eq!(state.form.images().len(), 2);
    }

    #[test]
    fn test_delete_removes_last_image() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        state.attach(payloads(MAX_IMAGES));
        focus_on(&mut state, Field::Images);
        state.handle_event(&TuiEvent::Delete);
        assert_eq!(state.form.images().len(), MAX_IMAGES - 1);
    }

    #[test]
    fn test_delete_removes_numbered_image() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        state.attach(payloads(MAX_IMAGES));
        focus_on(&mut state, Field::Images);
        type_text(&mut state, "1");
        state.handle_event(&TuiEvent::Delete);

        let left: Vec<&str> = state.form.images().iter().map(ImagePayload::as_str).collect();
        assert_eq!(left, vec!["data:image/gif;base64,1", "data:image/gif;base64,2"]);
        assert!(state.path_input.is_empty());
    }

    #[test]
    fn test_delete_with_unknown_number_keeps_images() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        state.attach(payloads(2));
        focus_on(&mut state, Field::Images);
        type_text(&mut state, "3");
        state.handle_event(&TuiEvent::Delete);

        assert_eq!(state.form.images().len(), 2);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_arrows_leave_acquisition_method_text_alone() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        focus_on(&mut state, Field::AcquisitionMethod);
        type_text(&mut state, "ซื้อ");
        state.handle_event(&TuiEvent::CursorRight);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.form.value(Field::AcquisitionMethod), "ซื้อ");
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = RecordFormState::new(AssetForm::create_for_year(2024));
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancel));
    }

    #[test]
    fn test_render_form() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = RecordFormState::new(AssetForm::edit(&record("r")));
        state.attach(payloads(2));
        focus_on(&mut state, Field::Images);
        state.set_error("broken");
        terminal
            .draw(|f| {
                RecordForm::new(&state, Palette::for_theme(Theme::Dark)).render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("name-r"));
        assert!(text.contains("[1] gif [2] gif"));
        assert!(text.contains("broken"));
    }
}
