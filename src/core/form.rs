//! # Record Form
//!
//! Draft state for creating or editing one record.
//!
//! Every edit is a typed [`FieldEdit`] variant. The price is kept as the raw
//! text the user typed so that a blank field stays "unset" instead of
//! collapsing to zero; it is only parsed on submit.

use chrono::Datelike;
use std::fmt;

use crate::core::record::{
    AcquisitionDate, AssetRecord, ImagePayload, ImageSet, MAX_IMAGES, RecordId, THAI_MONTHS,
    UnitPrice,
};

/// Gregorian → Buddhist era.
pub fn buddhist_year(gregorian: i32) -> i32 {
    gregorian + 543
}

/// Year choices for the form: ten years back to ten years ahead, newest first.
pub fn year_options(current_buddhist: i32) -> Vec<String> {
    (current_buddhist - 9..=current_buddhist + 10)
        .rev()
        .map(|y| y.to_string())
        .collect()
}

pub fn day_options() -> Vec<String> {
    (1..=31).map(|d: u8| d.to_string()).collect()
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// The batch would push the record past the image cap. Nothing was added.
    TooManyImages { existing: usize, incoming: usize },
    /// The price text is not a finite, non-negative number.
    InvalidPrice(String),
    /// A required field is blank.
    MissingField(&'static str),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::TooManyImages { existing, incoming } => write!(
                f,
                "สามารถอัปโหลดรูปภาพได้สูงสุด {MAX_IMAGES} รูป (มีอยู่ {existing}, เพิ่ม {incoming})"
            ),
            FormError::InvalidPrice(text) => write!(f, "ราคาไม่ถูกต้อง: {text}"),
            FormError::MissingField(label) => write!(f, "กรุณากรอก {label}"),
        }
    }
}

impl std::error::Error for FormError {}

// ============================================================================
// Fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Name,
    Day,
    Month,
    Year,
    ArticleCode,
    BrandModel,
    RegistrationNumber,
    UnitPrice,
    AcquisitionMethod,
    AcquisitionDocNumber,
    Location,
    DisbursementProof,
    ChangeLog,
    ChangeDocNumber,
    Remarks,
    Images,
}

/// How the presentation layer should edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice,
    Images,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::Category,
        Field::Name,
        Field::Day,
        Field::Month,
        Field::Year,
        Field::ArticleCode,
        Field::BrandModel,
        Field::RegistrationNumber,
        Field::UnitPrice,
        Field::AcquisitionMethod,
        Field::AcquisitionDocNumber,
        Field::Location,
        Field::DisbursementProof,
        Field::ChangeLog,
        Field::ChangeDocNumber,
        Field::Remarks,
        Field::Images,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Category => "ประเภทครุภัณฑ์",
            Field::Name => "ชื่อชนิดครุภัณฑ์",
            Field::Day => "วันที่ได้มา",
            Field::Month => "เดือนที่ได้มา",
            Field::Year => "ปีที่ได้มา",
            Field::ArticleCode => "เลขที่รหัสครุภัณฑ์",
            Field::BrandModel => "ยี่ห้อ, ชนิด",
            Field::RegistrationNumber => "หมายเลขทะเบียน",
            Field::UnitPrice => "ราคาต่อหน่วย (บาท)",
            Field::AcquisitionMethod => "วิธีการได้มา",
            Field::AcquisitionDocNumber => "เลขที่เอกสาร (การได้มา)",
            Field::Location => "จุดที่ตั้ง",
            Field::DisbursementProof => "หลักฐานการจ่าย",
            Field::ChangeLog => "รายการเปลี่ยนแปลง",
            Field::ChangeDocNumber => "เลขที่เอกสาร (การเปลี่ยนแปลง)",
            Field::Remarks => "หมายเหตุ",
            Field::Images => "ภาพถ่าย (สูงสุด 3 รูป)",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Day | Field::Month | Field::Year => FieldKind::Choice,
            Field::Images => FieldKind::Images,
            _ => FieldKind::Text,
        }
    }
}

/// A single typed edit to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Category(String),
    Name(String),
    Day(String),
    Month(String),
    Year(String),
    ArticleCode(String),
    BrandModel(String),
    RegistrationNumber(String),
    UnitPrice(String),
    AcquisitionMethod(String),
    AcquisitionDocNumber(String),
    Location(String),
    DisbursementProof(String),
    ChangeLog(String),
    ChangeDocNumber(String),
    Remarks(String),
}

impl FieldEdit {
    /// Build the edit that sets `field` to `value`. `None` for the image list,
    /// which is edited through [`AssetForm::attach_images`] instead.
    pub fn set(field: Field, value: String) -> Option<Self> {
        let edit = match field {
            Field::Category => FieldEdit::Category(value),
            Field::Name => FieldEdit::Name(value),
            Field::Day => FieldEdit::Day(value),
            Field::Month => FieldEdit::Month(value),
            Field::Year => FieldEdit::Year(value),
            Field::ArticleCode => FieldEdit::ArticleCode(value),
            Field::BrandModel => FieldEdit::BrandModel(value),
            Field::RegistrationNumber => FieldEdit::RegistrationNumber(value),
            Field::UnitPrice => FieldEdit::UnitPrice(value),
            Field::AcquisitionMethod => FieldEdit::AcquisitionMethod(value),
            Field::AcquisitionDocNumber => FieldEdit::AcquisitionDocNumber(value),
            Field::Location => FieldEdit::Location(value),
            Field::DisbursementProof => FieldEdit::DisbursementProof(value),
            Field::ChangeLog => FieldEdit::ChangeLog(value),
            Field::ChangeDocNumber => FieldEdit::ChangeDocNumber(value),
            Field::Remarks => FieldEdit::Remarks(value),
            Field::Images => return None,
        };
        Some(edit)
    }
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone)]
pub struct AssetForm {
    mode: FormMode,
    draft: AssetRecord,
    price_text: String,
    year_choices: Vec<String>,
}

impl AssetForm {
    /// A blank draft dated for the current Buddhist-era year.
    pub fn create() -> Self {
        Self::create_for_year(chrono::Local::now().year())
    }

    /// A blank draft defaulting to day 1, the first month, and next year.
    pub fn create_for_year(gregorian_year: i32) -> Self {
        let current = buddhist_year(gregorian_year);
        let mut draft = AssetRecord::blank(RecordId::from(""));
        draft.acquisition_date =
            AcquisitionDate::new("1", THAI_MONTHS[0], (current + 1).to_string());
        Self {
            mode: FormMode::Create,
            draft,
            price_text: String::new(),
            year_choices: year_options(current),
        }
    }

    /// A draft pre-filled from an existing record.
    pub fn edit(record: &AssetRecord) -> Self {
        let current = buddhist_year(chrono::Local::now().year());
        Self {
            mode: FormMode::Edit(record.id.clone()),
            draft: record.clone(),
            price_text: record
                .unit_price
                .map(|p| p.value().to_string())
                .unwrap_or_default(),
            year_choices: year_options(current),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        let draft = &mut self.draft;
        match edit {
            FieldEdit::Category(v) => draft.category = v,
            FieldEdit::Name(v) => draft.name = v,
            FieldEdit::Day(v) => draft.acquisition_date.day = v,
            FieldEdit::Month(v) => draft.acquisition_date.month = v,
            FieldEdit::Year(v) => draft.acquisition_date.year = v,
            FieldEdit::ArticleCode(v) => draft.article_code = v,
            FieldEdit::BrandModel(v) => draft.brand_model = v,
            FieldEdit::RegistrationNumber(v) => draft.registration_number = v,
            FieldEdit::UnitPrice(v) => self.price_text = v,
            FieldEdit::AcquisitionMethod(v) => draft.acquisition_method = v,
            FieldEdit::AcquisitionDocNumber(v) => draft.acquisition_doc_number = v,
            FieldEdit::Location(v) => draft.location = v,
            FieldEdit::DisbursementProof(v) => draft.disbursement_proof = v,
            FieldEdit::ChangeLog(v) => draft.change_log = v,
            FieldEdit::ChangeDocNumber(v) => draft.change_doc_number = v,
            FieldEdit::Remarks(v) => draft.remarks = v,
        }
    }

    /// Current text of a field, as the form displays it.
    pub fn value(&self, field: Field) -> String {
        let draft = &self.draft;
        match field {
            Field::Category => draft.category.clone(),
            Field::Name => draft.name.clone(),
            Field::Day => draft.acquisition_date.day.clone(),
            Field::Month => draft.acquisition_date.month.clone(),
            Field::Year => draft.acquisition_date.year.clone(),
            Field::ArticleCode => draft.article_code.clone(),
            Field::BrandModel => draft.brand_model.clone(),
            Field::RegistrationNumber => draft.registration_number.clone(),
            Field::UnitPrice => self.price_text.clone(),
            Field::AcquisitionMethod => draft.acquisition_method.clone(),
            Field::AcquisitionDocNumber => draft.acquisition_doc_number.clone(),
            Field::Location => draft.location.clone(),
            Field::DisbursementProof => draft.disbursement_proof.clone(),
            Field::ChangeLog => draft.change_log.clone(),
            Field::ChangeDocNumber => draft.change_doc_number.clone(),
            Field::Remarks => draft.remarks.clone(),
            Field::Images => format!("{}/{MAX_IMAGES}", draft.images.len()),
        }
    }

    /// Options for a choice field; empty for anything else.
    pub fn choices(&self, field: Field) -> Vec<String> {
        match field {
            Field::Day => day_options(),
            Field::Month => THAI_MONTHS.iter().map(|m| m.to_string()).collect(),
            Field::Year => self.year_choices.clone(),
            _ => Vec::new(),
        }
    }

    /// Step a choice field forward or backward, wrapping at the ends. A value
    /// outside the option list (e.g. an old year on an edited record) steps
    /// to the first option.
    pub fn cycle_choice(&mut self, field: Field, forward: bool) {
        let options = self.choices(field);
        if options.is_empty() {
            return;
        }
        let current = self.value(field);
        let next = match options.iter().position(|o| *o == current) {
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => (i + options.len() - 1) % options.len(),
            None => 0,
        };
        if let Some(edit) = FieldEdit::set(field, options[next].clone()) {
            self.apply(edit);
        }
    }

    pub fn images(&self) -> &ImageSet {
        &self.draft.images
    }

    /// Would `incoming` more images fit? Checked before any file is read.
    pub fn ensure_capacity(&self, incoming: usize) -> Result<(), FormError> {
        let existing = self.draft.images.len();
        if existing + incoming > MAX_IMAGES {
            Err(FormError::TooManyImages { existing, incoming })
        } else {
            Ok(())
        }
    }

    /// Attach a batch of images. Over the cap, the whole batch is dropped.
    pub fn attach_images(&mut self, batch: Vec<ImagePayload>) -> Result<(), FormError> {
        self.draft
            .images
            .try_extend(batch)
            .map_err(|e| FormError::TooManyImages {
                existing: e.existing,
                incoming: e.incoming,
            })
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        self.draft.images.remove(index).is_some()
    }

    /// Parse the price text: blank is unset.
    pub fn parsed_price(&self) -> Result<Option<UnitPrice>, FormError> {
        let text = self.price_text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let value: f64 = text
            .replace(',', "")
            .parse()
            .map_err(|_| FormError::InvalidPrice(text.to_string()))?;
        UnitPrice::new(value)
            .map(Some)
            .map_err(|_| FormError::InvalidPrice(text.to_string()))
    }

    /// Validate and produce the finished record. Edits keep their id;
    /// new records get a freshly minted one.
    pub fn submit(&self) -> Result<AssetRecord, FormError> {
        if self.draft.category.trim().is_empty() {
            return Err(FormError::MissingField(Field::Category.label()));
        }
        if self.draft.name.trim().is_empty() {
            return Err(FormError::MissingField(Field::Name.label()));
        }

        let mut record = self.draft.clone();
        record.unit_price = self.parsed_price()?;
        record.id = match &self.mode {
            FormMode::Edit(id) => id.clone(),
            FormMode::Create => RecordId::mint(),
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn payloads(n: usize) -> Vec<ImagePayload> {
        (0..n)
            .map(|i| ImagePayload::new(format!("data:image/png;base64,{i}")))
            .collect()
    }

    fn filled_form() -> AssetForm {
        let mut form = AssetForm::create_for_year(2024);
        form.apply(FieldEdit::Category("ครุภัณฑ์สำนักงาน".to_string()));
        form.apply(FieldEdit::Name("โต๊ะทำงาน".to_string()));
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = AssetForm::create_for_year(2024);
        assert_eq!(form.value(Field::Day), "1");
        assert_eq!(form.value(Field::Month), "มกราคม");
        assert_eq!(form.value(Field::Year), "2568");
        assert!(!form.is_edit());
    }

    #[test]
    fn test_year_options_span_and_order() {
        let years = year_options(2567);
        assert_eq!(years.first().map(String::as_str), Some("2577"));
        assert_eq!(years.last().map(String::as_str), Some("2558"));
        assert_eq!(years.len(), 20);
    }

    #[test]
    fn test_blank_price_submits_as_unset() {
        let record = filled_form().submit().unwrap();
        assert_eq!(record.unit_price, None);
    }

    #[test]
    fn test_price_parsing() {
        let mut form = filled_form();
        form.apply(FieldEdit::UnitPrice("25,000.5".to_string()));
        assert_eq!(form.submit().unwrap().unit_price.map(UnitPrice::value), Some(25000.5));

        form.apply(FieldEdit::UnitPrice("abc".to_string()));
        assert_eq!(form.submit(), Err(FormError::InvalidPrice("abc".to_string())));

        form.apply(FieldEdit::UnitPrice("-5".to_string()));
        assert!(matches!(form.submit(), Err(FormError::InvalidPrice(_))));

        form.apply(FieldEdit::UnitPrice("inf".to_string()));
        assert!(matches!(form.submit(), Err(FormError::InvalidPrice(_))));
    }

    #[test]
    fn test_required_fields() {
        let form = AssetForm::create_for_year(2024);
        assert_eq!(
            form.submit(),
            Err(FormError::MissingField(Field::Category.label()))
        );
    }

    #[test]
    fn test_create_mints_id_and_edit_keeps_it() {
        let created = filled_form().submit().unwrap();
        assert!(!created.id.as_str().is_empty());

        let existing = record("keep-me");
        let mut form = AssetForm::edit(&existing);
        form.apply(FieldEdit::Remarks("changed".to_string()));
        let edited = form.submit().unwrap();
        assert_eq!(edited.id, existing.id);
        assert_eq!(edited.remarks, "changed");
    }

    #[test]
    fn test_fourth_image_is_rejected_outright() {
        let mut form = filled_form();
        form.attach_images(payloads(3)).unwrap();
        let err = form.attach_images(payloads(1)).unwrap_err();
        assert_eq!(err, FormError::TooManyImages { existing: 3, incoming: 1 });
        assert_eq!(form.images().len(), 3);
    }

    #[test]
    fn test_batch_over_cap_is_dropped_entirely() {
        let mut form = filled_form();
        form.attach_images(payloads(2)).unwrap();
        assert!(form.attach_images(payloads(2)).is_err());
        assert_eq!(form.images().len(), 2);
    }

    #[test]
    fn test_ensure_capacity_counts_existing() {
        let mut form = filled_form();
        assert!(form.ensure_capacity(3).is_ok());
        form.attach_images(payloads(1)).unwrap();
        assert!(form.ensure_capacity(2).is_ok());
        assert_eq!(
            form.ensure_capacity(3),
            Err(FormError::TooManyImages { existing: 1, incoming: 3 })
        );
    }

    #[test]
    fn test_remove_image() {
        let mut form = filled_form();
        form.attach_images(payloads(2)).unwrap();
        assert!(form.remove_image(0));
        assert!(!form.remove_image(5));
        assert_eq!(form.images().len(), 1);
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let mut form = AssetForm::create_for_year(2024);
        form.cycle_choice(Field::Month, false);
        assert_eq!(form.value(Field::Month), "ธันวาคม");
        form.cycle_choice(Field::Month, true);
        assert_eq!(form.value(Field::Month), "มกราคม");
        form.cycle_choice(Field::Day, true);
        assert_eq!(form.value(Field::Day), "2");
    }

    #[test]
    fn test_cycle_choice_unknown_value_resets() {
        let mut form = AssetForm::create_for_year(2024);
        form.apply(FieldEdit::Year("2400".to_string()));
        form.cycle_choice(Field::Year, true);
        assert_eq!(form.value(Field::Year), "2577");
    }

    #[test]
    fn test_edit_prefills_price_text() {
        let mut existing = record("p");
        existing.unit_price = Some(UnitPrice::new(5500.0).unwrap());
        let form = AssetForm::edit(&existing);
        assert_eq!(form.value(Field::UnitPrice), "5500");
    }

    #[test]
    fn test_field_edit_set_skips_images() {
        assert!(FieldEdit::set(Field::Images, "x".to_string()).is_none());
        assert_eq!(
            FieldEdit::set(Field::Location, "room".to_string()),
            Some(FieldEdit::Location("room".to_string()))
        );
    }
}
