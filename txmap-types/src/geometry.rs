//! See [`Geom`].

use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::polygon::Polygon;

/// Any of the supported geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom<P> {
    /// Single point.
    Point(P),
    /// Set of points.
    MultiPoint(Vec<P>),
    /// Polyline.
    Contour(Contour<P>),
    /// Set of polylines.
    MultiContour(Vec<Contour<P>>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Set of polygons.
    MultiPolygon(Vec<Polygon<P>>),
    /// Heterogeneous set of geometries.
    Collection(Vec<Geom<P>>),
}

/// Dimension of a geometry, as far as style layers are concerned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Points and multipoints.
    Point,
    /// Contours and multicontours.
    Line,
    /// Polygons and multipolygons.
    Polygon,
    /// A collection of geometries of different kinds (or an empty collection).
    Mixed,
}

impl<P> Geom<P> {
    /// Kind of the geometry. A collection has the kind of its members if they all agree.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geom::Point(_) | Geom::MultiPoint(_) => GeometryKind::Point,
            Geom::Contour(_) | Geom::MultiContour(_) => GeometryKind::Line,
            Geom::Polygon(_) | Geom::MultiPolygon(_) => GeometryKind::Polygon,
            Geom::Collection(members) => {
                let mut kinds = members.iter().map(Geom::kind);
                match kinds.next() {
                    Some(first) if kinds.all(|kind| kind == first) => first,
                    _ => GeometryKind::Mixed,
                }
            }
        }
    }

    /// Iterates over all points of the geometry, in storage order.
    pub fn iter_points(&self) -> Box<dyn Iterator<Item = &P> + '_> {
        match self {
            Geom::Point(p) => Box::new(std::iter::once(p)),
            Geom::MultiPoint(points) => Box::new(points.iter()),
            Geom::Contour(contour) => Box::new(contour.points.iter()),
            Geom::MultiContour(contours) => Box::new(contours.iter().flat_map(|c| c.points.iter())),
            Geom::Polygon(polygon) => {
                Box::new(polygon.iter_contours().flat_map(|c| c.points.iter()))
            }
            Geom::MultiPolygon(polygons) => Box::new(
                polygons
                    .iter()
                    .flat_map(|p| p.iter_contours())
                    .flat_map(|c| c.points.iter()),
            ),
            Geom::Collection(members) => Box::new(members.iter().flat_map(|m| m.iter_points())),
        }
    }

    /// Returns all point members of the geometry (including points inside collections).
    pub fn points(&self) -> Vec<&P> {
        match self {
            Geom::Point(p) => vec![p],
            Geom::MultiPoint(points) => points.iter().collect(),
            Geom::Collection(members) => members.iter().flat_map(|m| m.points()).collect(),
            _ => vec![],
        }
    }
}

impl<P> From<P> for Geom<P> {
    fn from(value: P) -> Self {
        Self::Point(value)
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Self::Contour(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::ClosedContour;

    #[test]
    fn geometry_kinds() {
        assert_eq!(Geom::Point(1).kind(), GeometryKind::Point);
        assert_eq!(
            Geom::Contour(Contour::open(vec![1, 2])).kind(),
            GeometryKind::Line
        );
        assert_eq!(
            Geom::Polygon(Polygon::from(ClosedContour::new(vec![1, 2, 3]))).kind(),
            GeometryKind::Polygon
        );
        assert_eq!(
            Geom::Collection(vec![Geom::Point(1), Geom::MultiPoint(vec![2, 3])]).kind(),
            GeometryKind::Point
        );
        assert_eq!(
            Geom::Collection(vec![Geom::Point(1), Geom::Contour(Contour::open(vec![2, 3]))])
                .kind(),
            GeometryKind::Mixed
        );
        assert_eq!(Geom::<i32>::Collection(vec![]).kind(), GeometryKind::Mixed);
    }

    #[test]
    fn points_of_collection() {
        let geom = Geom::Collection(vec![
            Geom::Point(1),
            Geom::Contour(Contour::open(vec![2, 3])),
            Geom::MultiPoint(vec![4]),
        ]);
        assert_eq!(geom.points(), vec![&1, &4]);
        assert_eq!(geom.iter_points().count(), 4);
    }
}
