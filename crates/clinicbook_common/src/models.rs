// --- File: crates/clinicbook_common/src/models.rs ---

use serde::{Deserialize, Serialize};

/// A contact handed to the spreadsheet relay: one row, `[name, phone]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactRecord {
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "(555) 123-4567"))]
    pub phone: String,
}

impl ContactRecord {
    /// Builds a record if both fields are non-empty. Whitespace counts as
    /// content.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let phone = phone.into();
        if name.is_empty() || phone.is_empty() {
            return None;
        }
        Some(Self { name, phone })
    }

    /// The row appended to the sheet.
    pub fn as_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.phone.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_both_fields() {
        assert!(ContactRecord::new("", "1").is_none());
        assert!(ContactRecord::new("A", "").is_none());
        assert!(ContactRecord::new(" ", "  ").is_some());
        let record = ContactRecord::new("A", "1").expect("valid record");
        assert_eq!(record.as_row(), vec!["A".to_string(), "1".to_string()]);
    }
}
