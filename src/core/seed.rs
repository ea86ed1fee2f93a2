//! Sample records bundled with the binary, loaded when seeding is enabled.

use log::warn;

use crate::core::record::AssetRecord;

const SAMPLE_RECORDS: &str = include_str!("../../assets/sample_records.json");

/// Parse the bundled samples. A malformed bundle logs and yields nothing.
pub fn sample_records() -> Vec<AssetRecord> {
    parse_records(SAMPLE_RECORDS).unwrap_or_else(|e| {
        warn!("Failed to parse bundled sample records: {}", e);
        Vec::new()
    })
}

pub fn parse_records(json: &str) -> Result<Vec<AssetRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_samples_parse() {
        let records = sample_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "โต๊ะทำงาน");
        assert_eq!(records[0].images.len(), 2);
        assert_eq!(records[1].unit_price.map(|p| p.value()), Some(25000.0));
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let json = r#"[{
            "id": "x", "category": "c", "name": "n",
            "acquisition_date": {"day": "1", "month": "m", "year": "2567"},
            "article_code": "", "brand_model": "", "registration_number": "",
            "unit_price": -3.0,
            "acquisition_method": "", "acquisition_doc_number": "", "location": "",
            "disbursement_proof": "", "change_log": "", "change_doc_number": "", "remarks": ""
        }]"#;
        assert!(parse_records(json).is_err());
    }
}
