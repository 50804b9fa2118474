use tracing::debug;

use crate::readers::{RawChargerRow, RawSupportRow};
use crate::settings::Settings;

/// Restricts national datasets to the configured region
#[derive(Debug, Clone)]
pub struct RegionScope {
    region: String,
    keyword: String,
}

impl RegionScope {
    pub fn new(region: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            keyword: keyword.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.region.as_str(), settings.region_keyword.as_str())
    }

    /// Keep chargers whose province equals the region name
    pub fn chargers(&self, rows: Vec<RawChargerRow>) -> Vec<RawChargerRow> {
        let total = rows.len();
        let scoped: Vec<_> = rows
            .into_iter()
            .filter(|row| row.province.as_deref() == Some(self.region.as_str()))
            .collect();
        debug!(total, scoped = scoped.len(), region = %self.region, "Scoped charger rows");
        scoped
    }

    /// Keep support centers whose address mentions the region keyword
    pub fn support_centers(&self, rows: Vec<RawSupportRow>) -> Vec<RawSupportRow> {
        let total = rows.len();
        let scoped: Vec<_> = rows
            .into_iter()
            .filter(|row| {
                row.address
                    .as_deref()
                    .is_some_and(|address| address.contains(self.keyword.as_str()))
            })
            .collect();
        debug!(total, scoped = scoped.len(), keyword = %self.keyword, "Scoped support rows");
        scoped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charger(province: Option<&str>) -> RawChargerRow {
        RawChargerRow {
            province: province.map(str::to_string),
            ..RawChargerRow::default()
        }
    }

    fn center(address: Option<&str>) -> RawSupportRow {
        RawSupportRow {
            address: address.map(str::to_string),
            ..RawSupportRow::default()
        }
    }

    #[test]
    fn test_scope_chargers_by_exact_province() {
        let scope = RegionScope::new("대구광역시", "대구");
        let rows = vec![
            charger(Some("대구광역시")),
            charger(Some("대구")),
            charger(Some("부산광역시")),
            charger(None),
        ];

        let scoped = scope.chargers(rows);
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].province.as_deref(), Some("대구광역시"));
    }

    #[test]
    fn test_scope_support_centers_by_keyword() {
        let scope = RegionScope::new("대구광역시", "대구");
        let rows = vec![
            center(Some("대구광역시 동구 동촌로 1")),
            center(Some("경상북도 경산시 대구대로 33")),
            center(Some("서울특별시 중구 세종대로 110")),
            center(None),
        ];

        // keyword matching mirrors the dataset filter, so road names match too
        assert_eq!(scope.support_centers(rows).len(), 2);
    }
}
