//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::record::{AcquisitionDate, AssetRecord, RecordId};
use crate::core::state::App;
use crate::core::theme::Theme;

/// A fully populated record whose text fields are derived from `id`.
pub fn record(id: &str) -> AssetRecord {
    let mut record = AssetRecord::blank(RecordId::from(id));
    record.category = format!("category-{id}");
    record.name = format!("name-{id}");
    record.acquisition_date = AcquisitionDate::new("15", "มกราคม", "2567");
    record.article_code = format!("code-{id}");
    record.brand_model = format!("brand-{id}");
    record.registration_number = format!("reg-{id}");
    record.acquisition_method = "purchase".to_string();
    record.acquisition_doc_number = format!("DOC-{id}");
    record.location = format!("room-{id}");
    record.change_log = "none".to_string();
    record.change_doc_number = "-".to_string();
    record
}

/// An app holding `count` records (`rec-0`, `rec-1`, ...) added through the
/// normal insert path, so the page ends up on the last page.
pub fn app_with_records(count: usize, page_size: usize) -> App {
    let mut app = App::new(page_size, Theme::Light);
    for i in 0..count {
        app.add_record(record(&format!("rec-{i}")));
    }
    app
}
