//! # Export Composer
//!
//! Turns the current selection into a self-contained printable document.
//!
//! ```text
//! RecordStore ──┐
//!               ├─ compose() ─→ PrintDocument ─┬─ preview_lines()  (in-session preview)
//! SelectionSet ─┘                              └─ to_html()        (print context)
//! ```
//!
//! Composition is pure. Handing the HTML to a print surface happens in
//! `platform::print`.

use std::fmt;

use crate::core::record::{AssetRecord, ImagePayload, format_price};
use crate::core::selection::SelectionSet;
use crate::core::store::RecordStore;

pub const DEFAULT_REPORT_TITLE: &str = "รายงานทะเบียนครุภัณฑ์";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing is selected, so there is nothing to print.
    EmptySelection,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptySelection => write!(f, "กรุณาเลือกอย่างน้อยหนึ่งรายการเพื่อพิมพ์"),
        }
    }
}

impl std::error::Error for ExportError {}

// ============================================================================
// Page geometry
// ============================================================================

/// Physical page setup applied through the document's `@page` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGeometry {
    /// CSS page size keyword, e.g. `A4`.
    pub paper: String,
    pub margin_mm: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper: "A4".to_string(),
            margin_mm: 20,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// One numbered block in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEntry {
    pub number: usize,
    pub category: String,
    pub name: String,
    pub article_code: String,
    pub brand_model: String,
    pub acquisition_date: String,
    pub price: String,
    pub location: String,
    pub registration_number: String,
    pub acquisition_method: String,
    pub acquisition_doc_number: String,
    pub change_log: String,
    pub change_doc_number: String,
    pub images: Vec<ImagePayload>,
}

impl ExportEntry {
    fn from_record(number: usize, record: &AssetRecord) -> Self {
        Self {
            number,
            category: record.category.clone(),
            name: record.name.clone(),
            article_code: record.article_code.clone(),
            brand_model: record.brand_model.clone(),
            acquisition_date: record.acquisition_date.to_string(),
            price: format_price(record.unit_price),
            location: record.location.clone(),
            registration_number: record.registration_number.clone(),
            acquisition_method: record.acquisition_method.clone(),
            acquisition_doc_number: record.acquisition_doc_number.clone(),
            change_log: record.change_log.clone(),
            change_doc_number: record.change_doc_number.clone(),
            images: record.images.iter().cloned().collect(),
        }
    }

    fn heading(&self) -> String {
        format!("{}. {} (รหัส: {})", self.number, self.name, self.article_code)
    }

    fn price_with_unit(&self) -> String {
        if self.price == "-" {
            self.price.clone()
        } else {
            format!("{} บาท", self.price)
        }
    }

    /// Label/value pairs in display order.
    fn fields(&self) -> [(&'static str, String); 8] {
        [
            ("ประเภท", self.category.clone()),
            ("ยี่ห้อ/ชนิด", self.brand_model.clone()),
            ("วันที่ได้มา", self.acquisition_date.clone()),
            ("ราคา", self.price_with_unit()),
            ("ที่ตั้ง", self.location.clone()),
            ("เลขทะเบียน", self.registration_number.clone()),
            (
                "วิธีการได้มา",
                format!("{} (เอกสารเลขที่ {})", self.acquisition_method, self.acquisition_doc_number),
            ),
            (
                "รายการเปลี่ยนแปลง",
                format!("{} (เอกสารเลขที่ {})", self.change_log, self.change_doc_number),
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub title: String,
    pub entries: Vec<ExportEntry>,
}

/// Selected records in store order (not the order they were ticked).
pub fn selected_records<'a>(store: &'a RecordStore, selection: &SelectionSet) -> Vec<&'a AssetRecord> {
    store
        .records()
        .iter()
        .filter(|record| selection.is_selected(&record.id))
        .collect()
}

/// Build the report for the current selection. Fails fast when nothing is
/// selected so callers never open an empty print surface.
pub fn compose(
    store: &RecordStore,
    selection: &SelectionSet,
    title: &str,
) -> Result<PrintDocument, ExportError> {
    let records = selected_records(store, selection);
    if records.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let entries = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| ExportEntry::from_record(i + 1, record))
        .collect();

    Ok(PrintDocument {
        title: title.to_string(),
        entries,
    })
}

impl PrintDocument {
    /// Standalone HTML with print page geometry and inline images.
    pub fn to_html(&self, geometry: &PageGeometry) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
        html.push_str(&format!("<title>{}</title>", escape_html(&self.title)));
        html.push_str(&format!(
            "<style>@page {{ size: {}; margin: {}mm; }} \
             body {{ -webkit-print-color-adjust: exact; font-family: \"Sarabun\", sans-serif; }} \
             .entry {{ border: 1px solid #ccc; border-radius: 8px; padding: 12px; margin-bottom: 12px; break-inside: avoid; }} \
             .entry h2 {{ font-size: 1.1em; border-bottom: 1px solid #ccc; padding-bottom: 6px; }} \
             .gallery {{ display: flex; gap: 12px; }} \
             .gallery img {{ max-width: 30%; border: 1px solid #ccc; border-radius: 4px; }}</style>",
            escape_html(&geometry.paper),
            geometry.margin_mm
        ));
        html.push_str("</head><body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.title)));

        for entry in &self.entries {
            html.push_str("<section class=\"entry\">\n");
            html.push_str(&format!("<h2>{}</h2>\n<div class=\"fields\">\n", escape_html(&entry.heading())));
            for (label, value) in entry.fields() {
                html.push_str(&format!(
                    "<div><strong>{}:</strong> {}</div>\n",
                    label,
                    escape_html(&value)
                ));
            }
            html.push_str("</div>\n");

            if !entry.images.is_empty() {
                html.push_str("<h3>รูปภาพประกอบ:</h3>\n<div class=\"gallery\">");
                for (i, image) in entry.images.iter().enumerate() {
                    html.push_str(&format!(
                        "<img src=\"{}\" alt=\"Image {}\">",
                        escape_html(image.as_str()),
                        i + 1
                    ));
                }
                html.push_str("</div>\n");
            }
            html.push_str("</section>\n");
        }

        html.push_str("</body></html>\n");
        html
    }

    /// Plain-text rendering of the same content for the preview surface.
    pub fn preview_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), String::new()];
        for entry in &self.entries {
            lines.push(entry.heading());
            for (label, value) in entry.fields() {
                lines.push(format!("  {label}: {value}"));
            }
            if !entry.images.is_empty() {
                let kinds: Vec<&str> = entry.images.iter().map(ImagePayload::kind).collect();
                lines.push(format!("  รูปภาพประกอบ: {} ({})", entry.images.len(), kinds.join(", ")));
            }
            lines.push(String::new());
        }
        lines
    }
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{ImageSet, RecordId, UnitPrice};
    use crate::test_support::record;

    fn store_abc() -> RecordStore {
        RecordStore::from_records(vec![record("a"), record("b"), record("c")])
    }

    #[test]
    fn test_empty_selection_fails_fast() {
        let store = store_abc();
        let selection = SelectionSet::new();
        assert_eq!(
            compose(&store, &selection, DEFAULT_REPORT_TITLE),
            Err(ExportError::EmptySelection)
        );
    }

    #[test]
    fn test_entries_follow_store_order() {
        let store = store_abc();
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("c"));
        selection.toggle(&RecordId::from("a"));

        let doc = compose(&store, &selection, DEFAULT_REPORT_TITLE).unwrap();
        let names: Vec<&str> = doc.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["name-a", "name-c"]);
        assert_eq!(doc.entries[0].number, 1);
        assert_eq!(doc.entries[1].number, 2);
    }

    #[test]
    fn test_entry_fields_are_rendered() {
        let mut rec = record("a");
        rec.unit_price = Some(UnitPrice::new(5500.0).unwrap());
        rec.images = ImageSet::try_from(vec![
            ImagePayload::new("data:image/png;base64,AAAA"),
            ImagePayload::new("data:image/gif;base64,BBBB"),
        ])
        .unwrap();
        let store = RecordStore::from_records(vec![rec]);
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("a"));

        let doc = compose(&store, &selection, "Report").unwrap();
        let entry = &doc.entries[0];
        assert_eq!(entry.acquisition_date, "15 มกราคม 2567");
        assert_eq!(entry.price, "5,500.00");

        let html = doc.to_html(&PageGeometry::default());
        assert!(html.contains("@page { size: A4; margin: 20mm; }"));
        assert!(html.contains("<title>Report</title>"));
        assert!(html.contains("1. name-a (รหัส: code-a)"));
        assert!(html.contains("5,500.00 บาท"));
        assert!(html.contains("purchase (เอกสารเลขที่ DOC-a)"));
        assert!(html.contains("<img src=\"data:image/png;base64,AAAA\" alt=\"Image 1\">"));
        assert!(html.contains("<img src=\"data:image/gif;base64,BBBB\" alt=\"Image 2\">"));
    }

    #[test]
    fn test_unset_price_renders_dash() {
        let store = store_abc();
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("b"));
        let doc = compose(&store, &selection, "Report").unwrap();
        assert_eq!(doc.entries[0].price, "-");
        assert!(doc.to_html(&PageGeometry::default()).contains("<strong>ราคา:</strong> -</div>"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut rec = record("a");
        rec.name = "<script>alert(\"x\")</script>".to_string();
        let store = RecordStore::from_records(vec![rec]);
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("a"));

        let html = compose(&store, &selection, "R&D").unwrap().to_html(&PageGeometry::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(html.contains("<title>R&amp;D</title>"));
    }

    #[test]
    fn test_records_without_images_have_no_gallery() {
        let store = store_abc();
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("a"));
        let doc = compose(&store, &selection, "Report").unwrap();
        assert!(!doc.to_html(&PageGeometry::default()).contains("class=\"gallery\""));
    }

    #[test]
    fn test_preview_lines_mirror_document() {
        let store = store_abc();
        let mut selection = SelectionSet::new();
        selection.select_all(&[RecordId::from("a"), RecordId::from("b")]);
        let lines = compose(&store, &selection, "Report").unwrap().preview_lines();
        assert_eq!(lines[0], "Report");
        assert!(lines.iter().any(|l| l == "1. name-a (รหัส: code-a)"));
        assert!(lines.iter().any(|l| l == "2. name-b (รหัส: code-b)"));
        assert!(lines.iter().any(|l| l == "  วันที่ได้มา: 15 มกราคม 2567"));
    }

    #[test]
    fn test_custom_geometry() {
        let store = store_abc();
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("a"));
        let geometry = PageGeometry {
            paper: "Letter".to_string(),
            margin_mm: 10,
        };
        let html = compose(&store, &selection, "Report").unwrap().to_html(&geometry);
        assert!(html.contains("@page { size: Letter; margin: 10mm; }"));
    }
}
