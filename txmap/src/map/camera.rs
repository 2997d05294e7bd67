use txmap_types::geo::{GeoPoint, GeoPoint2d};

use crate::error::TxMapError;

/// Largest zoom level the camera accepts.
pub const MAX_ZOOM: f64 = 24.0;

/// Initial view of the map: the center point and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    center: GeoPoint2d,
    zoom: f64,
}

impl Camera {
    /// Creates a camera.
    ///
    /// Fails with [`TxMapError::InvalidCamera`] if the center is not a valid geographic point or
    /// the zoom is not within `0..=24`.
    pub fn new(center: impl GeoPoint<Num = f64>, zoom: f64) -> Result<Self, TxMapError> {
        if !center.is_valid() {
            return Err(TxMapError::InvalidCamera(format!(
                "center ({}, {}) is out of range",
                center.lat(),
                center.lon()
            )));
        }

        if !(0.0..=MAX_ZOOM).contains(&zoom) {
            return Err(TxMapError::InvalidCamera(format!(
                "zoom {zoom} is not within 0..={MAX_ZOOM}"
            )));
        }

        Ok(Self {
            center: GeoPoint2d::from(&center),
            zoom,
        })
    }

    /// Center of the view.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Zoom level of the view.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use txmap_types::latlon;

    use super::*;

    #[test]
    fn keeps_exact_center() {
        let camera = Camera::new(latlon!(35.894930906699322, 139.937432307518321), 9.2).unwrap();
        assert_relative_eq!(camera.center().lat(), 35.894930906699322);
        assert_relative_eq!(camera.center().lon(), 139.937432307518321);
        assert_relative_eq!(camera.zoom(), 9.2);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_matches!(
            Camera::new(latlon!(139.9, 35.9), 10.0),
            Err(TxMapError::InvalidCamera(_))
        );
        assert_matches!(
            Camera::new(latlon!(35.9, 139.9), -1.0),
            Err(TxMapError::InvalidCamera(_))
        );
        assert_matches!(
            Camera::new(latlon!(35.9, 139.9), 25.0),
            Err(TxMapError::InvalidCamera(_))
        );
        assert_matches!(
            Camera::new(latlon!(35.9, 139.9), f64::NAN),
            Err(TxMapError::InvalidCamera(_))
        );
    }
}
