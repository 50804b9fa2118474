pub mod charger_reader;
pub mod csv_table;
pub mod encoding;
pub mod support_reader;

pub use charger_reader::{ChargerReader, RawChargerRow, CHARGER_DATASET};
pub use csv_table::CsvTable;
pub use encoding::decode_text;
pub use support_reader::{RawSupportRow, SupportCenterReader, SUPPORT_DATASET};
