use serde::{Deserialize, Serialize};

use crate::models::District;

/// A normalized transport-support center row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportCenterRecord {
    pub name: String,
    pub address: String,
    /// Parsed from the address; `None` when the address does not name a district
    pub district: Option<District>,
    pub vehicles: Option<u32>,
    pub slope_vehicles: Option<u32>,
    pub lift_vehicles: Option<u32>,
}

impl SupportCenterRecord {
    pub fn new(address: impl Into<String>, district: Option<District>) -> Self {
        Self {
            name: String::new(),
            address: address.into(),
            district,
            vehicles: None,
            slope_vehicles: None,
            lift_vehicles: None,
        }
    }
}

