//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It also
//! carries out the `Effect`s returned by `update()`: persisting the theme,
//! opening the print preview, dispatching to the print host.
//!
//! ## Input Routing
//!
//! ```text
//! TuiEvent ─┬─ Ctrl+C ───────────────→ Action::Quit
//!           ├─ overlay open? ────────→ overlay.handle_event() → FormEvent / PreviewEvent / ...
//!           └─ otherwise ────────────→ table keys → Action
//! ```
//!
//! An open overlay captures every key until it closes.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms in `poll` and only
//! redraws after an event arrived.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::PrintSettings;
use crate::core::export::PrintDocument;
use crate::core::form::AssetForm;
use crate::core::record::RecordId;
use crate::core::state::{App, Notice};
use crate::platform::image;
use crate::platform::preferences::{PreferenceStore, save_theme};
use crate::platform::print::{self, PrintHost};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AssetTableState, ConfirmDeleteState, ConfirmEvent, FormEvent, PreviewEvent,
    PrintPreviewState, RecordFormState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub const PRINT_UNAVAILABLE: &str = "ไม่สามารถเปิดหน้าต่างสำหรับพิมพ์ได้";
pub const PRINT_STARTED: &str = "กำลังส่งรายงานไปพิมพ์";

/// The modal surface currently on top of the table, if any.
pub enum Overlay {
    Form(RecordFormState),
    Detail(RecordId),
    Preview(PrintPreviewState),
    ConfirmDelete(ConfirmDeleteState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub table: AssetTableState,
    pub overlay: Option<Overlay>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            table: AssetTableState::new(),
            overlay: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform collaborators the event loop drives.
pub struct Services {
    pub print_host: Arc<dyn PrintHost>,
    pub print_settings: PrintSettings,
    pub preferences: Box<dyn PreferenceStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (bracketed paste, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
    }
}

pub fn run(mut app: App, mut services: Services) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &mut services, event) == Flow::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down with {} record(s)", app.record_count());
    ratatui::restore();
    Ok(())
}

fn handle_event(app: &mut App, tui: &mut TuiState, services: &mut Services, event: TuiEvent) -> Flow {
    match event {
        TuiEvent::Resize => return Flow::Continue,
        TuiEvent::ForceQuit => return apply(app, tui, services, Action::Quit),
        _ => {}
    }

    match tui.overlay.take() {
        Some(overlay) => handle_overlay_event(app, tui, services, overlay, event),
        None => handle_table_event(app, tui, services, event),
    }
}

/// Run an action through the reducer and carry out its effect.
fn apply(app: &mut App, tui: &mut TuiState, services: &mut Services, action: Action) -> Flow {
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => return Flow::Quit,
        Effect::PersistTheme(theme) => {
            if let Err(e) = save_theme(services.preferences.as_mut(), theme) {
                warn!("Failed to persist theme: {}", e);
            }
        }
        Effect::ShowPrintPreview(document) => {
            tui.overlay = Some(Overlay::Preview(PrintPreviewState::new(document)));
        }
    }
    tui.table.clamp(app.visible_records().len());
    Flow::Continue
}

fn cursor_record(app: &App, tui: &TuiState) -> Option<RecordId> {
    app.visible_records()
        .get(tui.table.cursor)
        .map(|record| record.id.clone())
}

fn handle_table_event(app: &mut App, tui: &mut TuiState, services: &mut Services, event: TuiEvent) -> Flow {
    let page_before = app.current_page();
    let flow = match event {
        TuiEvent::CursorUp => {
            tui.table.move_up();
            Flow::Continue
        }
        TuiEvent::CursorDown => {
            tui.table.move_down(app.visible_records().len());
            Flow::Continue
        }
        TuiEvent::InputChar(' ') => match cursor_record(app, tui) {
            Some(id) => apply(app, tui, services, Action::ToggleSelection(id)),
            None => Flow::Continue,
        },
        TuiEvent::InputChar('a') => apply(app, tui, services, Action::TogglePageSelection),
        TuiEvent::CursorLeft | TuiEvent::PageUp => apply(app, tui, services, Action::PreviousPage),
        TuiEvent::CursorRight | TuiEvent::PageDown => apply(app, tui, services, Action::NextPage),
        TuiEvent::Home => apply(app, tui, services, Action::ChangePage(1)),
        TuiEvent::End => {
            let last = app.total_pages();
            apply(app, tui, services, Action::ChangePage(last))
        }
        TuiEvent::InputChar(c @ '1'..='9') => {
            let page = c.to_digit(10).map(|d| d as usize).unwrap_or(1);
            apply(app, tui, services, Action::ChangePage(page))
        }
        TuiEvent::InputChar('n') => {
            tui.overlay = Some(Overlay::Form(RecordFormState::new(AssetForm::create())));
            Flow::Continue
        }
        TuiEvent::InputChar('e') => {
            let id = cursor_record(app, tui);
            open_edit_form(app, tui, id);
            Flow::Continue
        }
        TuiEvent::Submit => {
            if let Some(id) = cursor_record(app, tui) {
                tui.overlay = Some(Overlay::Detail(id));
            }
            Flow::Continue
        }
        TuiEvent::InputChar('d') | TuiEvent::Delete => {
            if let Some(id) = cursor_record(app, tui)
                && let Some(record) = app.record(&id)
            {
                let name = record.name.clone();
                tui.overlay = Some(Overlay::ConfirmDelete(ConfirmDeleteState::new(id, name)));
            }
            Flow::Continue
        }
        TuiEvent::InputChar('p') => apply(app, tui, services, Action::RequestExport),
        TuiEvent::InputChar('t') => apply(app, tui, services, Action::ToggleTheme),
        TuiEvent::Escape if app.notice().is_some() => {
            apply(app, tui, services, Action::DismissNotice)
        }
        TuiEvent::Escape | TuiEvent::InputChar('q') => apply(app, tui, services, Action::Quit),
        _ => Flow::Continue,
    };
    if app.current_page() != page_before {
        tui.table.reset();
    }
    flow
}

fn open_edit_form(app: &App, tui: &mut TuiState, id: Option<RecordId>) {
    if let Some(record) = id.and_then(|id| app.record(&id)) {
        tui.overlay = Some(Overlay::Form(RecordFormState::new(AssetForm::edit(record))));
    }
}

fn handle_overlay_event(
    app: &mut App,
    tui: &mut TuiState,
    services: &mut Services,
    overlay: Overlay,
    event: TuiEvent,
) -> Flow {
    match overlay {
        Overlay::Form(mut state) => match state.handle_event(&event) {
            Some(FormEvent::Submit(record)) => {
                if state.form.is_edit() {
                    return apply(app, tui, services, Action::UpdateRecord(record));
                }
                let flow = apply(app, tui, services, Action::AddRecord(record));
                // New records land on the last page; put the cursor on them
                tui.table.cursor = app.visible_records().len().saturating_sub(1);
                return flow;
            }
            Some(FormEvent::AttachImages(paths)) => {
                match image::read_images(&paths) {
                    Ok(batch) => state.attach(batch),
                    Err(e) => {
                        warn!("Image attach failed: {}", e);
                        state.set_error(e.to_string());
                    }
                }
                tui.overlay = Some(Overlay::Form(state));
            }
            Some(FormEvent::Cancel) => {}
            None => tui.overlay = Some(Overlay::Form(state)),
        },
        Overlay::Detail(id) => match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::InputChar('q') => {}
            TuiEvent::InputChar('e') => open_edit_form(app, tui, Some(id)),
            _ => tui.overlay = Some(Overlay::Detail(id)),
        },
        Overlay::Preview(mut state) => match state.handle_event(&event) {
            Some(PreviewEvent::Confirm) => start_print(app, services, &state.document),
            Some(PreviewEvent::Dismiss) => {}
            None => tui.overlay = Some(Overlay::Preview(state)),
        },
        Overlay::ConfirmDelete(mut state) => match state.handle_event(&event) {
            Some(ConfirmEvent::Confirm(id)) => {
                return apply(app, tui, services, Action::DeleteRecord(id));
            }
            Some(ConfirmEvent::Cancel) => {}
            None => tui.overlay = Some(Overlay::ConfirmDelete(state)),
        },
    }
    Flow::Continue
}

/// Hand the document to the print host. The dispatch task runs on its own;
/// the loop does not wait for it.
fn start_print(app: &mut App, services: &Services, document: &PrintDocument) {
    let notice = match print::dispatch(
        services.print_host.as_ref(),
        document,
        &services.print_settings,
    ) {
        Some(_handle) => Notice::info(PRINT_STARTED),
        None => Notice::warning(PRINT_UNAVAILABLE),
    };
    update(app, Action::Notify(notice));
}
