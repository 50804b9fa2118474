use serde::{Deserialize, Serialize};

/// A normalized wheelchair fast-charger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerRecord {
    pub facility_name: String,

    pub province: String,

    pub district: String,

    pub address: String,

    pub simultaneous_capacity: u32,

    /// Weekday operation starts at 00:00
    pub operates_24h: bool,

    pub air_pump: bool,

    pub phone_charge: bool,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl ChargerRecord {
    /// Minimal record for a district, with every optional attribute at its default
    pub fn new(district: impl Into<String>) -> Self {
        Self {
            facility_name: String::new(),
            province: String::new(),
            district: district.into(),
            address: String::new(),
            simultaneous_capacity: 0,
            operates_24h: false,
            air_pump: false,
            phone_charge: false,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.simultaneous_capacity = capacity;
        self
    }

    pub fn with_features(mut self, operates_24h: bool, air_pump: bool, phone_charge: bool) -> Self {
        self.operates_24h = operates_24h;
        self.air_pump = air_pump;
        self.phone_charge = phone_charge;
        self
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Offers 24h operation, air pump and phone charging together
    pub fn is_fully_featured(&self) -> bool {
        self.operates_24h && self.air_pump && self.phone_charge
    }
}
