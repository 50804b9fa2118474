pub mod charger;
pub mod district;
pub mod support_center;

pub use charger::ChargerRecord;
pub use district::{AccessibilityTier, District, DistrictAccessibility};
pub use support_center::SupportCenterRecord;
