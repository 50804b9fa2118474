use crate::error::{ProcessingError, Result};
use crate::utils::constants::{KR_MAX_LAT, KR_MAX_LON, KR_MIN_LAT, KR_MIN_LON};

/// Parse a decimal coordinate, rejecting values outside `[-limit, limit]`
///
/// # Examples
/// ```
/// use accessibility_processor::utils::parse_coordinate;
///
/// let lat = parse_coordinate(" 35.8714 ", 90.0).unwrap();
/// assert!((lat - 35.8714).abs() < 0.000001);
/// ```
pub fn parse_coordinate(coord_str: &str, limit: f64) -> Result<f64> {
    let trimmed = coord_str.trim();

    let value = trimmed.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidFormat(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    if !value.is_finite() || !(-limit..=limit).contains(&value) {
        return Err(ProcessingError::InvalidFormat(format!(
            "Coordinate {} is outside [-{}, {}]",
            value, limit, limit
        )));
    }

    Ok(value)
}

/// Check that a point lies within the Korean peninsula bounding box
pub fn is_within_korea_bounds(latitude: f64, longitude: f64) -> bool {
    (KR_MIN_LAT..=KR_MAX_LAT).contains(&latitude) && (KR_MIN_LON..=KR_MAX_LON).contains(&longitude)
}

/// Bounding box and mean center of a set of points
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub center_lat: f64,
    pub center_lon: f64,
}

impl GeographicBounds {
    /// Returns `None` when no points are given
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (lat, lon) = iter.next()?;

        let mut bounds = Self {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
            center_lat: 0.0,
            center_lon: 0.0,
        };
        let mut lat_sum = lat;
        let mut lon_sum = lon;
        let mut count = 1usize;

        for (lat, lon) in iter {
            bounds.min_lat = bounds.min_lat.min(lat);
            bounds.max_lat = bounds.max_lat.max(lat);
            bounds.min_lon = bounds.min_lon.min(lon);
            bounds.max_lon = bounds.max_lon.max(lon);
            lat_sum += lat;
            lon_sum += lon;
            count += 1;
        }

        bounds.center_lat = lat_sum / count as f64;
        bounds.center_lon = lon_sum / count as f64;
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("35.8714", 90.0).unwrap() - 35.8714).abs() < 0.000001);
        assert!((parse_coordinate(" 128.6014 ", 180.0).unwrap() - 128.6014).abs() < 0.000001);
        assert!(parse_coordinate("", 90.0).is_err());
        assert!(parse_coordinate("abc", 90.0).is_err());
        assert!(parse_coordinate("91.0", 90.0).is_err());
        assert!(parse_coordinate("NaN", 90.0).is_err());
    }

    #[test]
    fn test_korea_bounds() {
        assert!(is_within_korea_bounds(35.8714, 128.6014)); // Daegu
        assert!(!is_within_korea_bounds(51.5074, -0.1278)); // London
        assert!(!is_within_korea_bounds(128.6, 35.87)); // Swapped columns
    }

    #[test]
    fn test_geographic_bounds() {
        assert!(GeographicBounds::from_points(Vec::new()).is_none());

        let bounds =
            GeographicBounds::from_points(vec![(35.80, 128.50), (35.90, 128.70)]).unwrap();
        assert_eq!(bounds.min_lat, 35.80);
        assert_eq!(bounds.max_lon, 128.70);
        assert!((bounds.center_lat - 35.85).abs() < 1e-9);
        assert!((bounds.center_lon - 128.60).abs() < 1e-9);
    }
}
