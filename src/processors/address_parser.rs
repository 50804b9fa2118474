use regex::Regex;

use crate::error::{ProcessingError, Result};
use crate::models::District;

/// Extracts the district token that follows the province name in a road
/// address, e.g. `대구광역시 수성구 달구벌대로 2423` → `수성구`.
#[derive(Debug, Clone)]
pub struct AddressParser {
    pattern: Regex,
}

impl AddressParser {
    pub fn new(region: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"{}\s*(\S+)", regex::escape(region)))
            .map_err(|e| ProcessingError::Config(format!("Invalid region pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    pub fn parse(&self, address: &str) -> Option<District> {
        self.pattern
            .captures(address)
            .and_then(|caps| caps.get(1))
            .map(|m| District::new(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> AddressParser {
        AddressParser::new("대구광역시").unwrap()
    }

    #[test]
    fn test_parse_district() {
        assert_eq!(
            parser().parse("대구광역시 수성구 달구벌대로 2423"),
            Some(District::new("수성구"))
        );
        assert_eq!(
            parser().parse("대구광역시   달성군 다사읍 123"),
            Some(District::new("달성군"))
        );
    }

    #[test]
    fn test_parse_without_region_prefix() {
        assert_eq!(parser().parse("서울특별시 중구 세종대로 110"), None);
        assert_eq!(parser().parse("대구 수성구 달구벌대로"), None);
        assert_eq!(parser().parse(""), None);
    }

    #[test]
    fn test_parse_region_at_end_of_address() {
        assert_eq!(parser().parse("대구광역시"), None);
        assert_eq!(parser().parse("대구광역시   "), None);
    }

    #[test]
    fn test_region_is_matched_literally() {
        let parser = AddressParser::new("A.B").unwrap();
        assert_eq!(parser.parse("A.B east 1"), Some(District::new("east")));
        assert_eq!(parser.parse("AxB east 1"), None);
    }
}
