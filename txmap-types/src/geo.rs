//! Points in geographic coordinates (latitude and longitude in degrees).

use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

/// A point on the surface of the Earth.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Returns true if latitude is within `[-90, 90]` and longitude within `[-180, 180]`.
    fn is_valid(&self) -> bool {
        let lat_limit: Option<Self::Num> = NumCast::from(90.0);
        let lon_limit: Option<Self::Num> = NumCast::from(180.0);
        match (lat_limit, lon_limit) {
            (Some(lat_limit), Some(lon_limit)) => {
                self.lat().abs() <= lat_limit && self.lon().abs() <= lon_limit
            }
            _ => false,
        }
    }
}

/// Constructor for geographic points.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude, in the order GeoJSON positions use.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point with `f64` coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a new point from another one.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use txmap_types::geo::GeoPoint;
/// use txmap_types::latlon;
///
/// let point = latlon!(35.95, 139.99);
/// assert_eq!(point.lat(), 35.95);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <::txmap_types::geo::GeoPoint2d as ::txmap_types::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}
