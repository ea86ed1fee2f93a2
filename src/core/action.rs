//! # Actions
//!
//! Everything that can happen to the register becomes an `Action`.
//! User ticks a checkbox? That's `Action::ToggleSelection(id)`.
//! User confirms a deletion? That's `Action::DeleteRecord(id)`.
//!
//! `update()` applies an action to the `App` and returns an `Effect` that
//! tells the adapter what I/O to perform (persist the theme, open the print
//! preview, quit). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::export::PrintDocument;
use crate::core::record::{AssetRecord, RecordId};
use crate::core::state::{App, Notice};
use crate::core::theme::Theme;

#[derive(Debug, Clone)]
pub enum Action {
    /// A new record submitted from the form.
    AddRecord(AssetRecord),
    /// An edited record submitted from the form; replaces by id.
    UpdateRecord(AssetRecord),
    /// Issued only after the user confirmed the deletion.
    DeleteRecord(RecordId),
    ToggleSelection(RecordId),
    /// The current page's "select all" checkbox.
    TogglePageSelection,
    ChangePage(usize),
    NextPage,
    PreviousPage,
    RequestExport,
    ToggleTheme,
    Notify(Notice),
    DismissNotice,
    Quit,
}

/// I/O the adapter has to carry out after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    PersistTheme(Theme),
    ShowPrintPreview(PrintDocument),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action_name(&action));
    match action {
        Action::AddRecord(record) => {
            let name = record.name.clone();
            if app.add_record(record) {
                app.set_notice(Notice::info(format!("เพิ่มรายการ {name} แล้ว")));
            }
            Effect::None
        }
        Action::UpdateRecord(record) => {
            let name = record.name.clone();
            if app.update_record(record) {
                app.set_notice(Notice::info(format!("บันทึกการเปลี่ยนแปลง {name} แล้ว")));
            }
            Effect::None
        }
        Action::DeleteRecord(id) => {
            if let Some(removed) = app.delete_record(&id) {
                app.set_notice(Notice::info(format!("ลบรายการ {} แล้ว", removed.name)));
            }
            Effect::None
        }
        Action::ToggleSelection(id) => {
            app.toggle_selection(&id);
            Effect::None
        }
        Action::TogglePageSelection => {
            app.toggle_page_selection();
            Effect::None
        }
        Action::ChangePage(page) => {
            app.change_page(page);
            Effect::None
        }
        Action::NextPage => {
            app.next_page();
            Effect::None
        }
        Action::PreviousPage => {
            app.previous_page();
            Effect::None
        }
        Action::RequestExport => match app.compose_export() {
            Ok(document) => {
                info!("Composed report with {} entries", document.entries.len());
                Effect::ShowPrintPreview(document)
            }
            Err(e) => {
                app.set_notice(Notice::warning(e.to_string()));
                Effect::None
            }
        },
        Action::ToggleTheme => Effect::PersistTheme(app.toggle_theme()),
        Action::Notify(notice) => {
            app.set_notice(notice);
            Effect::None
        }
        Action::DismissNotice => {
            app.clear_notice();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Short label for logging; records carry image payloads too large to dump.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::AddRecord(_) => "AddRecord",
        Action::UpdateRecord(_) => "UpdateRecord",
        Action::DeleteRecord(_) => "DeleteRecord",
        Action::ToggleSelection(_) => "ToggleSelection",
        Action::TogglePageSelection => "TogglePageSelection",
        Action::ChangePage(_) => "ChangePage",
        Action::NextPage => "NextPage",
        Action::PreviousPage => "PreviousPage",
        Action::RequestExport => "RequestExport",
        Action::ToggleTheme => "ToggleTheme",
        Action::Notify(_) => "Notify",
        Action::DismissNotice => "DismissNotice",
        Action::Quit => "Quit",
    }
}
