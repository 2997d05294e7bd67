//! Polylines: [`Contour`] and [`ClosedContour`].

use serde::{Deserialize, Serialize};

/// A sequence of points connected by straight segments. If `is_closed` is set, the last point
/// is connected back to the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour<Point> {
    /// Vertices of the contour.
    pub points: Vec<Point>,
    /// Whether the contour forms a ring.
    pub is_closed: bool,
}

impl<Point> Contour<Point> {
    /// Creates a new contour.
    pub fn new(points: Vec<Point>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    /// Creates an open contour.
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: false,
        }
    }

    /// Creates a closed contour.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            is_closed: true,
        }
    }

    /// Converts the contour into a [`ClosedContour`], or returns `None` if it is open.
    pub fn into_closed(self) -> Option<ClosedContour<Point>> {
        if self.is_closed {
            Some(ClosedContour {
                points: self.points,
            })
        } else {
            None
        }
    }

    /// Iterates over the segments of the contour, including the closing one.
    pub fn iter_segments(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        let closing = if self.is_closed && self.points.len() > 1 {
            self.points.last().zip(self.points.first())
        } else {
            None
        };

        self.points
            .windows(2)
            .map(|pair| (&pair[0], &pair[1]))
            .chain(closing)
    }
}

/// A ring of points. The closing segment between the last and the first point is implied, so
/// the first point is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedContour<Point> {
    /// Vertices of the ring.
    pub points: Vec<Point>,
}

impl<Point> ClosedContour<Point> {
    /// Creates a new ring.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl<Point> From<ClosedContour<Point>> for Contour<Point> {
    fn from(value: ClosedContour<Point>) -> Self {
        Self::closed(value.points)
    }
}
