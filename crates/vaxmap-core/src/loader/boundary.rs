// crates/vaxmap-core/src/loader/boundary.rs
use crate::config::BoundaryFields;
use crate::error::{Result, VaxError};
use geo::MultiPolygon;
use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, warn};

/// One region outline as read from the boundary source.
#[derive(Debug, Clone)]
pub struct Boundary {
    pub code: u32,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// Reads a GeoJSON `FeatureCollection` into boundaries, keeping source order.
///
/// Features without a usable code, name or areal geometry are dropped with a
/// warning; a code seen twice is fatal.
pub fn read_boundaries<R: Read>(reader: R, fields: &BoundaryFields) -> Result<Vec<Boundary>> {
    // Parse the GeoJSON. Loads the whole document into memory.
    let geojson = GeoJson::from_reader(reader)?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(VaxError::InvalidData(
                "Boundary GeoJSON must be a FeatureCollection".into(),
            ))
        }
    };

    let mut seen = HashSet::new();
    let mut boundaries = Vec::with_capacity(collection.features.len());

    for (i, feature) in collection.features.into_iter().enumerate() {
        let Some(boundary) = boundary_from_feature(feature, fields, i)? else {
            continue;
        };
        if !seen.insert(boundary.code) {
            return Err(VaxError::DuplicateRegionCode(boundary.code));
        }
        boundaries.push(boundary);
    }

    debug!(count = boundaries.len(), "boundaries parsed");
    Ok(boundaries)
}

fn boundary_from_feature(
    feature: Feature,
    fields: &BoundaryFields,
    index: usize,
) -> Result<Option<Boundary>> {
    let props = feature.properties.as_ref();

    let Some(code) = props.and_then(|p| p.get(&fields.code)).and_then(code_from_json) else {
        warn!(feature = index, field = %fields.code, "boundary feature has no usable region code, skipping");
        return Ok(None);
    };

    let name = match props.and_then(|p| p.get(&fields.name)) {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => {
            warn!(feature = index, code, field = %fields.name, "boundary feature has no name, skipping");
            return Ok(None);
        }
    };

    let Some(geometry) = feature.geometry else {
        warn!(code, %name, "boundary feature has no geometry, skipping");
        return Ok(None);
    };

    let geometry: geo::Geometry<f64> = geometry.value.try_into()?;
    let geometry = match geometry {
        geo::Geometry::MultiPolygon(mp) => mp,
        geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
        _ => {
            warn!(code, %name, "boundary geometry is not areal, skipping");
            return Ok(None);
        }
    };

    Ok(Some(Boundary {
        code,
        name,
        geometry,
    }))
}

fn code_from_json(value: &JsonValue) -> Option<u32> {
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| n.as_f64().and_then(|f| super::parse_code(&f.to_string()))),
        JsonValue::String(s) => super::parse_code(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64) -> String {
        format!(
            "[[[{x},{y}],[{x1},{y}],[{x1},{y1}],[{x},{y1}],[{x},{y}]]]",
            x1 = x + 1.0,
            y1 = y + 1.0
        )
    }

    fn feature(props: &str, geometry: &str) -> String {
        format!(r#"{{"type":"Feature","properties":{props},"geometry":{geometry}}}"#)
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    fn polygon(x: f64, y: f64) -> String {
        format!(r#"{{"type":"Polygon","coordinates":{}}}"#, square(x, y))
    }

    #[test]
    fn reads_codes_names_and_polygons_in_order() {
        let doc = collection(&[
            feature(r#"{"reg_istat_code_num":12,"reg_name":"Lazio"}"#, &polygon(12.0, 41.0)),
            feature(r#"{"reg_istat_code_num":"3","reg_name":"Lombardia"}"#, &polygon(9.0, 45.0)),
        ]);
        let b = read_boundaries(doc.as_bytes(), &BoundaryFields::default()).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!((b[0].code, b[0].name.as_str()), (12, "Lazio"));
        assert_eq!((b[1].code, b[1].name.as_str()), (3, "Lombardia"));
        assert_eq!(b[0].geometry.0.len(), 1);
    }

    #[test]
    fn multipolygons_are_kept_whole() {
        let mp = format!(
            r#"{{"type":"MultiPolygon","coordinates":[{},{}]}}"#,
            square(8.0, 39.0),
            square(10.0, 39.0)
        );
        let doc = collection(&[feature(r#"{"reg_istat_code_num":20,"reg_name":"Sardegna"}"#, &mp)]);
        let b = read_boundaries(doc.as_bytes(), &BoundaryFields::default()).unwrap();
        assert_eq!(b[0].geometry.0.len(), 2);
    }

    #[test]
    fn features_without_code_or_area_are_dropped() {
        let point = r#"{"type":"Point","coordinates":[1.0,2.0]}"#;
        let doc = collection(&[
            feature(r#"{"reg_name":"Nowhere"}"#, &polygon(0.0, 0.0)),
            feature(r#"{"reg_istat_code_num":4,"reg_name":"Dot"}"#, point),
            feature(r#"{"reg_istat_code_num":5}"#, &polygon(0.0, 0.0)),
            feature(r#"{"reg_istat_code_num":6,"reg_name":"Kept"}"#, &polygon(0.0, 0.0)),
        ]);
        let b = read_boundaries(doc.as_bytes(), &BoundaryFields::default()).unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].name, "Kept");
    }

    #[test]
    fn duplicate_codes_are_fatal() {
        let doc = collection(&[
            feature(r#"{"reg_istat_code_num":1,"reg_name":"A"}"#, &polygon(0.0, 0.0)),
            feature(r#"{"reg_istat_code_num":1,"reg_name":"B"}"#, &polygon(2.0, 0.0)),
        ]);
        let err = read_boundaries(doc.as_bytes(), &BoundaryFields::default()).unwrap_err();
        assert!(matches!(err, VaxError::DuplicateRegionCode(1)));
    }

    #[test]
    fn custom_field_names_are_honoured() {
        let fields = BoundaryFields {
            code: "id".into(),
            name: "label".into(),
        };
        let doc = collection(&[feature(r#"{"id":7.0,"label":"Custom"}"#, &polygon(0.0, 0.0))]);
        let b = read_boundaries(doc.as_bytes(), &fields).unwrap();
        assert_eq!(b[0].code, 7);
    }

    #[test]
    fn bare_geometry_is_rejected() {
        let err = read_boundaries(polygon(0.0, 0.0).as_bytes(), &BoundaryFields::default())
            .unwrap_err();
        assert!(matches!(err, VaxError::InvalidData(_)));
    }
}
