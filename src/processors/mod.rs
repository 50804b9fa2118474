pub mod address_parser;
pub mod dataset_loader;
pub mod normalizer;
pub mod region_scope;
pub mod scorer;

pub use address_parser::AddressParser;
pub use dataset_loader::{DatasetLoader, LoadedDatasets};
pub use normalizer::{FieldCoercions, NormalizationReport, NormalizedField, Normalizer};
pub use region_scope::RegionScope;
pub use scorer::DistrictAccessibilityScorer;
