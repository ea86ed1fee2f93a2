//! # TUI Components
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: top line with counts, theme and the current notice
//! - `PaginationBar`: page strip under the table
//! - `RecordDetail`: read-only view of one record
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it to
//! render each frame:
//! - `AssetTable` / `AssetTableState`: the current page with checkboxes
//! - `RecordForm` / `RecordFormState`: create and edit overlay
//! - `PrintPreview` / `PrintPreviewState`: scrollable report preview
//! - `ConfirmDialog` / `ConfirmDeleteState`: delete gate
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! PaginationBar::new(app.current_page(), app.total_pages(), palette).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! PaginationBar::render(frame, area); // reads from App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (top status line)
//! ├── asset_table.rs     (page of records)
//! ├── pagination.rs      (page strip)
//! ├── record_form.rs     (create/edit overlay)
//! ├── record_detail.rs   (detail overlay)
//! ├── print_preview.rs   (report preview overlay)
//! └── confirm_dialog.rs  (delete confirmation)
//! ```

pub mod asset_table;
pub mod confirm_dialog;
pub mod pagination;
pub mod print_preview;
pub mod record_detail;
pub mod record_form;
mod title_bar;

pub use asset_table::{AssetTable, AssetTableState};
pub use confirm_dialog::{ConfirmDeleteState, ConfirmDialog, ConfirmEvent};
pub use pagination::PaginationBar;
pub use print_preview::{PreviewEvent, PrintPreview, PrintPreviewState};
pub use record_detail::RecordDetail;
pub use record_form::{FormEvent, RecordForm, RecordFormState};
pub use title_bar::TitleBar;
