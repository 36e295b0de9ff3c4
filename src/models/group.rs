use std::collections::BTreeMap;

use serde::Serialize;

/// Result record for one address group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResult {
    pub group_id: String,
    pub addresses: Vec<String>,
    /// Every extracted place, resolved or not, in first-seen order.
    pub places: Vec<String>,
    /// Chosen country per place that resolved to at least one country.
    pub country_map: BTreeMap<String, String>,
    /// Distinct values of `country_map`.
    pub countries: Vec<String>,
    /// Lookup failures for this group's places.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lookup_errors: Vec<String>,
}

impl GroupResult {
    /// Places the lookup returned no countries for.
    pub fn unresolved_places(&self) -> impl Iterator<Item = &str> {
        self.places
            .iter()
            .filter(|place| !self.country_map.contains_key(place.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GroupResult {
        GroupResult {
            group_id: "d1".to_string(),
            addresses: vec!["Pune, Atlantis".to_string()],
            places: vec!["Pune".to_string(), "Atlantis".to_string()],
            country_map: BTreeMap::from([("Pune".to_string(), "India".to_string())]),
            countries: vec!["India".to_string()],
            lookup_errors: Vec::new(),
        }
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["groupId"], "d1");
        assert_eq!(json["countryMap"]["Pune"], "India");
        assert_eq!(json["countries"][0], "India");
        assert_eq!(json["places"].as_array().unwrap().len(), 2);
        assert!(json.get("lookupErrors").is_none());
    }

    #[test]
    fn test_unresolved_places() {
        let result = sample();
        assert_eq!(result.unresolved_places().collect::<Vec<_>>(), vec!["Atlantis"]);
    }
}
