//! # Asset Records
//!
//! The data model for one durable asset entry.
//!
//! ```text
//! AssetRecord
//! ├── id: RecordId                  // UUID v4, minted once
//! ├── category, name, ...: String   // free text fields
//! ├── acquisition_date              // day / month / year tokens
//! ├── unit_price: Option<UnitPrice> // None = unset, not zero
//! └── images: ImageSet              // 0..=3 inline payloads
//! ```
//!
//! The acquisition date is three opaque tokens on purpose. The register uses
//! Thai month names and Buddhist-era years, so nothing here parses them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of images a record can carry.
pub const MAX_IMAGES: usize = 3;

/// Month names offered by the form, in calendar order.
pub const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

// ============================================================================
// Identity
// ============================================================================

/// Globally unique record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Mint a fresh UUID v4 identifier.
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Acquisition date
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionDate {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl AcquisitionDate {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }
}

/// Day, month and year joined by single spaces.
impl fmt::Display for AcquisitionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month, self.year)
    }
}

// ============================================================================
// Unit price
// ============================================================================

/// A finite, non-negative price. "Unset" is modelled as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitPrice(f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidPrice(pub f64);

impl fmt::Display for InvalidPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "price must be a finite non-negative number, got {}", self.0)
    }
}

impl std::error::Error for InvalidPrice {}

impl UnitPrice {
    pub fn new(value: f64) -> Result<Self, InvalidPrice> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidPrice(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UnitPrice {
    type Error = InvalidPrice;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitPrice> for f64 {
    fn from(price: UnitPrice) -> Self {
        price.0
    }
}

/// Two decimals with comma thousands grouping, e.g. `25,000.00`.
impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.0);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped}.{frac_part}")
    }
}

/// Render an optional price, using `-` for the unset state.
pub fn format_price(price: Option<UnitPrice>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

// ============================================================================
// Images
// ============================================================================

/// One inline-encoded image (usually a `data:` URL). Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The MIME type of a `data:` payload, or `"link"` for anything else.
    pub fn kind(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .filter(|mime| !mime.is_empty())
            .unwrap_or("link")
    }
}

/// Returned when a batch of images would push a record past [`MAX_IMAGES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub existing: usize,
    pub incoming: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot add {} image(s) to {} existing: at most {MAX_IMAGES} allowed",
            self.incoming, self.existing
        )
    }
}

impl std::error::Error for CapacityExceeded {}

/// Ordered image list that never holds more than [`MAX_IMAGES`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ImagePayload>", into = "Vec<ImagePayload>")]
pub struct ImageSet(Vec<ImagePayload>);

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch atomically: either every payload is added or none is.
    pub fn try_extend(&mut self, batch: Vec<ImagePayload>) -> Result<(), CapacityExceeded> {
        if self.0.len() + batch.len() > MAX_IMAGES {
            return Err(CapacityExceeded {
                existing: self.0.len(),
                incoming: batch.len(),
            });
        }
        self.0.extend(batch);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<ImagePayload> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_IMAGES
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImagePayload> {
        self.0.iter()
    }
}

impl TryFrom<Vec<ImagePayload>> for ImageSet {
    type Error = CapacityExceeded;

    fn try_from(images: Vec<ImagePayload>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        set.try_extend(images)?;
        Ok(set)
    }
}

impl From<ImageSet> for Vec<ImagePayload> {
    fn from(set: ImageSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImagePayload;
    type IntoIter = std::slice::Iter<'a, ImagePayload>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: RecordId,
    pub category: String,
    pub name: String,
    pub acquisition_date: AcquisitionDate,
    pub article_code: String,
    pub brand_model: String,
    pub registration_number: String,
    #[serde(default)]
    pub unit_price: Option<UnitPrice>,
    pub acquisition_method: String,
    pub acquisition_doc_number: String,
    pub location: String,
    pub disbursement_proof: String,
    pub change_log: String,
    pub change_doc_number: String,
    pub remarks: String,
    #[serde(default)]
    pub images: ImageSet,
}

impl AssetRecord {
    /// An empty record with the given identity.
    pub fn blank(id: RecordId) -> Self {
        Self {
            id,
            category: String::new(),
            name: String::new(),
            acquisition_date: AcquisitionDate::default(),
            article_code: String::new(),
            brand_model: String::new(),
            registration_number: String::new(),
            unit_price: None,
            acquisition_method: String::new(),
            acquisition_doc_number: String::new(),
            location: String::new(),
            disbursement_proof: String::new(),
            change_log: String::new(),
            change_doc_number: String::new(),
            remarks: String::new(),
            images: ImageSet::new(),
        }
    }
}
