use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A simple polygon in (lat, lng) space that gates facility placement.
///
/// The vertex list may repeat the first vertex at the end or leave the ring
/// implicitly closed; both describe the same region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LatLng>", into = "Vec<LatLng>")]
pub struct Region {
    vertices: Vec<LatLng>,
}

impl Region {
    pub fn new(vertices: Vec<LatLng>) -> Result<Self, Error> {
        let mut distinct = vertices.len();
        if distinct > 1 && vertices.first() == vertices.last() {
            distinct -= 1;
        }
        if distinct < 3 {
            return Err(Error::InvalidRegion { vertices: distinct });
        }
        Ok(Self { vertices })
    }

    /// Ray-casting parity test with the ray running towards increasing
    /// longitude at the point's latitude.
    ///
    /// Boundary points follow the half-open edge rule: points on the
    /// southern or western boundary count as inside, points on the northern
    /// or eastern boundary count as outside. The answer for a given point
    /// never changes between calls.
    pub fn contains(&self, point: LatLng) -> bool {
        let (x, y) = (point.lng, point.lat);
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.vertices[i].lng, self.vertices[i].lat);
            let (xj, yj) = (self.vertices[j].lng, self.vertices[j].lat);
            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl TryFrom<Vec<LatLng>> for Region {
    type Error = Error;

    fn try_from(vertices: Vec<LatLng>) -> Result<Self, Self::Error> {
        Region::new(vertices)
    }
}

impl From<Region> for Vec<LatLng> {
    fn from(region: Region) -> Self {
        region.vertices
    }
}

pub fn is_inside(point: LatLng, region: &Region) -> bool {
    region.contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Region {
        Region::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 10.0),
            LatLng::new(10.0, 10.0),
            LatLng::new(10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_point_inside_square() {
        assert!(is_inside(LatLng::new(5.0, 5.0), &square()));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!is_inside(LatLng::new(15.0, 15.0), &square()));
        assert!(!is_inside(LatLng::new(-1.0, 5.0), &square()));
        assert!(!is_inside(LatLng::new(5.0, 10.5), &square()));
    }

    #[test]
    fn test_boundary_points_are_consistent() {
        let region = square();
        let south_edge = LatLng::new(0.0, 5.0);
        let first = is_inside(south_edge, &region);
        for _ in 0..10 {
            assert_eq!(is_inside(south_edge, &region), first);
        }
        assert!(first);

        assert!(is_inside(LatLng::new(5.0, 0.0), &region));
        assert!(!is_inside(LatLng::new(10.0, 5.0), &region));
        assert!(!is_inside(LatLng::new(5.0, 10.0), &region));
    }

    #[test]
    fn test_explicitly_closed_ring_matches_open_ring() {
        let closed = Region::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 10.0),
            LatLng::new(10.0, 10.0),
            LatLng::new(10.0, 0.0),
            LatLng::new(0.0, 0.0),
        ])
        .unwrap();
        let open = square();
        for point in [(5.0, 5.0), (0.0, 5.0), (10.0, 5.0), (15.0, 15.0), (9.9, 0.1)] {
            let point = LatLng::from(point);
            assert_eq!(closed.contains(point), open.contains(point));
        }
    }

    #[test]
    fn test_concave_region() {
        // U shape opening to the north.
        let region = Region::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 9.0),
            LatLng::new(9.0, 9.0),
            LatLng::new(9.0, 6.0),
            LatLng::new(3.0, 6.0),
            LatLng::new(3.0, 3.0),
            LatLng::new(9.0, 3.0),
            LatLng::new(9.0, 0.0),
        ])
        .unwrap();
        assert!(region.contains(LatLng::new(6.0, 1.5)));
        assert!(region.contains(LatLng::new(6.0, 7.5)));
        assert!(!region.contains(LatLng::new(6.0, 4.5)));
        assert!(region.contains(LatLng::new(1.5, 4.5)));
    }

    #[test]
    fn test_degenerate_region_rejected() {
        assert!(matches!(
            Region::new(vec![]),
            Err(Error::InvalidRegion { vertices: 0 })
        ));
        let err = Region::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(0.0, 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { vertices: 2 }));
    }

    #[test]
    fn test_region_deserializes_from_vertex_list() {
        let region: Region = serde_json::from_str(
            r#"[{"lat":0,"lng":0},{"lat":0,"lng":10},{"lat":10,"lng":10},{"lat":10,"lng":0}]"#,
        )
        .unwrap();
        assert_eq!(region, square());

        let bad = serde_json::from_str::<Region>(r#"[{"lat":0,"lng":0}]"#);
        assert!(bad.is_err());
    }
}
