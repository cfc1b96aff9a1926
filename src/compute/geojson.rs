//! GeoJSON input and output for the spatial part of a box.

use crate::compute::validation::ensure_has_x;
use crate::error::{Result, StboxError};
use crate::stbox::STBox;
use geojson::{GeoJson, Geometry, Value};
use stbox_types::temporal::Timestamp;

/// Running bounds over every position of a GeoJSON document.
#[derive(Debug)]
struct Extent {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    zmin: f64,
    zmax: f64,
    positions: usize,
    positions_3d: usize,
}

impl Extent {
    fn new() -> Self {
        Self {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
            zmin: f64::INFINITY,
            zmax: f64::NEG_INFINITY,
            positions: 0,
            positions_3d: 0,
        }
    }

    fn add(&mut self, position: &[f64]) -> Result<()> {
        if position.len() < 2 {
            return Err(StboxError::MalformedInput(
                "Coordinate must have at least 2 values".to_string(),
            ));
        }
        if position.iter().any(|v| !v.is_finite()) {
            return Err(StboxError::MalformedInput(
                "Coordinate values must be finite".to_string(),
            ));
        }
        self.xmin = self.xmin.min(position[0]);
        self.xmax = self.xmax.max(position[0]);
        self.ymin = self.ymin.min(position[1]);
        self.ymax = self.ymax.max(position[1]);
        if let Some(&z) = position.get(2) {
            self.zmin = self.zmin.min(z);
            self.zmax = self.zmax.max(z);
            self.positions_3d += 1;
        }
        self.positions += 1;
        Ok(())
    }

    fn add_all<'a, I>(&mut self, positions: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Vec<f64>>,
    {
        positions.into_iter().try_for_each(|p| self.add(p))
    }

    fn add_geometry(&mut self, geometry: &Geometry) -> Result<()> {
        match &geometry.value {
            Value::Point(p) => self.add(p),
            Value::MultiPoint(points) | Value::LineString(points) => self.add_all(points),
            Value::MultiLineString(lines) | Value::Polygon(lines) => {
                lines.iter().try_for_each(|line| self.add_all(line))
            }
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .try_for_each(|ring| self.add_all(ring)),
            Value::GeometryCollection(members) => {
                members.iter().try_for_each(|g| self.add_geometry(g))
            }
        }
    }

    fn into_box(self, srid: i32) -> Result<STBox> {
        if self.positions == 0 {
            return Err(StboxError::EmptyGeometry);
        }
        // Z is kept only when every position carries it
        let has_z = self.positions_3d == self.positions;
        let (zmin, zmax) = if has_z { (self.zmin, self.zmax) } else { (0.0, 0.0) };
        Ok(STBox::make(
            true,
            has_z,
            false,
            false,
            srid,
            self.xmin,
            self.xmax,
            self.ymin,
            self.ymax,
            zmin,
            zmax,
            Timestamp::EPOCH,
            Timestamp::EPOCH,
        ))
    }
}

impl STBox {
    /// Spatial box of a GeoJSON geometry, feature or feature collection.
    ///
    /// The result has Z when every position has an altitude. Documents
    /// without any position fail with [`StboxError::EmptyGeometry`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stbox::STBox;
    ///
    /// let json = r#"{"type":"LineString","coordinates":[[0.0,1.0],[4.0,-2.0]]}"#;
    /// let b = STBox::from_geojson(json, 3857)?;
    /// assert_eq!(b, STBox::xy(0.0, -2.0, 4.0, 1.0).with_srid(3857));
    /// # Ok::<(), stbox::StboxError>(())
    /// ```
    pub fn from_geojson(geojson: &str, srid: i32) -> Result<STBox> {
        let document: GeoJson = geojson
            .parse()
            .map_err(|e| StboxError::MalformedInput(format!("Failed to parse GeoJSON: {}", e)))?;

        let mut extent = Extent::new();
        match &document {
            GeoJson::Geometry(geometry) => extent.add_geometry(geometry)?,
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    extent.add_geometry(geometry)?;
                }
            }
            GeoJson::FeatureCollection(collection) => {
                for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
                    extent.add_geometry(geometry)?;
                }
            }
        }
        log::trace!("GeoJSON document has {} positions", extent.positions);
        extent.into_box(srid)
    }

    /// The X/Y extent as a GeoJSON polygon.
    pub fn to_geojson(&self) -> Result<String> {
        ensure_has_x(self)?;
        let ring = vec![
            vec![self.xmin, self.ymin],
            vec![self.xmax, self.ymin],
            vec![self.xmax, self.ymax],
            vec![self.xmin, self.ymax],
            vec![self.xmin, self.ymin],
        ];
        let geometry = Geometry::new(Value::Polygon(vec![ring]));

        serde_json::to_string(&geometry)
            .map_err(|e| StboxError::Serialization(format!("Failed to serialize box: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_and_polygon() {
        let b = STBox::from_geojson(r#"{"type":"Point","coordinates":[1.5,2.5]}"#, 0).unwrap();
        assert_eq!(b, STBox::xy(1.5, 2.5, 1.5, 2.5));

        let polygon = r#"{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,5],[0,5],[0,0]]]}"#;
        let b = STBox::from_geojson(polygon, 4326).unwrap();
        assert_eq!(b, STBox::xy(0.0, 0.0, 10.0, 5.0).with_srid(4326));
    }

    #[test]
    fn test_altitude_gives_z() {
        let json = r#"{"type":"MultiPoint","coordinates":[[0,0,5],[1,1,-5]]}"#;
        let b = STBox::from_geojson(json, 0).unwrap();
        assert!(b.has_z());
        assert_eq!(b.zmin(), Some(-5.0));
        assert_eq!(b.zmax(), Some(5.0));

        let mixed = r#"{"type":"MultiPoint","coordinates":[[0,0,5],[1,1]]}"#;
        assert!(!STBox::from_geojson(mixed, 0).unwrap().has_z());
    }

    #[test]
    fn test_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[0,0]}},
                {"type":"Feature","properties":{},"geometry":null},
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[3,4]}}
            ]
        }"#;
        let b = STBox::from_geojson(json, 0).unwrap();
        assert_eq!(b, STBox::xy(0.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn test_empty_and_malformed() {
        let empty = r#"{"type":"GeometryCollection","geometries":[]}"#;
        let err = STBox::from_geojson(empty, 0).unwrap_err();
        assert_eq!(err, StboxError::EmptyGeometry);
        assert!(err.is_recoverable());

        assert!(matches!(
            STBox::from_geojson("not json", 0),
            Err(StboxError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_to_geojson() {
        let json = STBox::xy(0.0, 0.0, 2.0, 1.0).to_geojson().unwrap();
        assert!(json.contains("Polygon"));
        assert_eq!(
            STBox::from_geojson(&json, 0).unwrap(),
            STBox::xy(0.0, 0.0, 2.0, 1.0)
        );

        let t = STBox::t(Timestamp::EPOCH, Timestamp::EPOCH);
        assert!(matches!(
            t.to_geojson(),
            Err(StboxError::DimensionMissing(_))
        ));
    }
}
