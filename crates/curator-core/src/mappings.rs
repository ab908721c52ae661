use serde::{Deserialize, Serialize};

pub type MappingId = i64;

/// A seller-supplied category path paired with the canonical category a
/// curator settled on. `ml_suggested_category` is static reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapping {
    pub id: MappingId,
    pub serial_number: i64,
    pub incoming_seller_category: Vec<String>,
    pub ml_suggested_category: String,
    pub selected_category: String,
}

impl CategoryMapping {
    /// `true` when the curator kept the suggested category.
    #[must_use]
    pub fn accepts_suggestion(&self) -> bool {
        self.selected_category == self.ml_suggested_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mapping = CategoryMapping {
            id: 1,
            serial_number: 1,
            incoming_seller_category: vec!["Mobile".to_string(), "Smartphone".to_string()],
            ml_suggested_category: "Mobile phones".to_string(),
            selected_category: "Mobile phones".to_string(),
        };
        let json = serde_json::to_value(&mapping).expect("serialize");
        assert_eq!(json["incomingSellerCategory"][1], "Smartphone");
        assert_eq!(json["selectedCategory"], "Mobile phones");
        assert!(mapping.accepts_suggestion());
    }
}
