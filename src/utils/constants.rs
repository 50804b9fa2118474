/// Target region
pub const DEFAULT_REGION: &str = "대구광역시";
pub const DEFAULT_REGION_KEYWORD: &str = "대구";

/// Districts of the target region, in reporting order
pub const DEFAULT_DISTRICTS: [&str; 9] = [
    "중구", "동구", "서구", "남구", "북구", "수성구", "달서구", "달성군", "군위군",
];

/// Districts treated as rural for group comparisons
pub const DEFAULT_RURAL_DISTRICTS: [&str; 2] = ["달성군", "군위군"];

/// Composite score weights
pub const WEIGHT_PER_CHARGER: f64 = 10.0;
pub const WEIGHT_PER_SUPPORT_CENTER: f64 = 50.0;
pub const WEIGHT_ALL_DAY: f64 = 20.0;
pub const WEIGHT_AIR_PUMP: f64 = 15.0;
pub const WEIGHT_PHONE_CHARGE: f64 = 10.0;
pub const WEIGHT_CAPACITY: f64 = 5.0;

/// Tier bin lower edges
pub const TIER_MEDIUM_MIN: f64 = 200.0;
pub const TIER_HIGH_MIN: f64 = 400.0;
pub const TIER_VERY_HIGH_MIN: f64 = 600.0;

/// Field values
pub const ALL_DAY_START_TIME: &str = "00:00";
pub const FLAG_AVAILABLE: &str = "Y";

/// Fast-charger dataset headers (전국전동휠체어급속충전기표준데이터)
pub const CHARGER_FACILITY_NAME_HEADER: &str = "시설명";
pub const CHARGER_PROVINCE_HEADER: &str = "시도명";
pub const CHARGER_DISTRICT_HEADER: &str = "시군구명";
pub const CHARGER_ADDRESS_HEADER: &str = "소재지도로명주소";
pub const CHARGER_CAPACITY_HEADER: &str = "동시사용가능대수";
pub const CHARGER_WEEKDAY_START_HEADER: &str = "평일운영시작시각";
pub const CHARGER_AIR_PUMP_HEADER: &str = "공기주입가능여부";
pub const CHARGER_PHONE_CHARGE_HEADER: &str = "휴대전화충전가능여부";
pub const CHARGER_LATITUDE_HEADER: &str = "위도";
pub const CHARGER_LONGITUDE_HEADER: &str = "경도";

/// Transport-support center dataset headers (전국교통약자이동지원센터정보표준데이터)
pub const SUPPORT_NAME_HEADER: &str = "이동지원센터명";
pub const SUPPORT_ADDRESS_HEADER: &str = "소재지도로명주소";
pub const SUPPORT_VEHICLES_HEADER: &str = "보유차량대수";
pub const SUPPORT_SLOPE_VEHICLES_HEADER: &str = "슬로프형휠체어차량대수";
pub const SUPPORT_LIFT_VEHICLES_HEADER: &str = "리프트형휠체어차량대수";

/// Korean geographic bounds
pub const KR_MIN_LAT: f64 = 33.0;
pub const KR_MAX_LAT: f64 = 39.0;
pub const KR_MIN_LON: f64 = 124.0;
pub const KR_MAX_LON: f64 = 132.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_TOP_N: usize = 3;

/// Environment prefix for settings overrides
pub const SETTINGS_ENV_PREFIX: &str = "ACCESS";
