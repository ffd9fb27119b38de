use crate::config::in_coord_bounds;
use crate::error::{EditError, EditResult};
use crate::model::{Column, GroupData, Point};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub freq_mhz: i64,
    pub voltage_mv: i64,
}

impl From<&Point> for PointRecord {
    fn from(p: &Point) -> Self { PointRecord { freq_mhz: p.freq_mhz(), voltage_mv: p.voltage_mv() } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub group_name: String,
    pub data: Vec<Vec<PointRecord>>,
}

pub fn to_records(data: &GroupData) -> Vec<Vec<PointRecord>> {
    data.curves().iter().map(|c| c.points().iter().map(PointRecord::from).collect()).collect()
}

fn compact<T: Serialize>(v: &T) -> String {
    match serde_json::to_string(v) {
        Ok(s) => s,
        Err(e) => {
            warn!("serialization failed: {}", e);
            String::from("[]")
        }
    }
}

/// Compact text of a group: `[[{"freq_mhz":..,"voltage_mv":..},..],..]`.
pub fn export_text(data: &GroupData) -> String { compact(&to_records(data)) }

pub fn export_session_text(records: &[SessionRecord]) -> String { compact(&records) }

pub fn parse_point_lists(text: &str, expected: usize, max_points: usize) -> EditResult<Vec<Vec<Point>>> {
    let raw = text.trim();
    if raw.is_empty() {
        return Err(EditError::MalformedImport("input text is empty".into()));
    }
    let v: Value = serde_json::from_str(raw).map_err(|e| EditError::MalformedImport(format!("invalid JSON: {}", e)))?;
    parse_point_lists_value(&v, Some(expected), max_points)
}

/// Validate the whole structure before returning anything; any bad field
/// rejects everything. `expected` of None accepts any curve count.
pub fn parse_point_lists_value(v: &Value, expected: Option<usize>, max_points: usize) -> EditResult<Vec<Vec<Point>>> {
    let Some(curves) = v.as_array() else {
        return Err(EditError::MalformedImport("root element must be a list, e.g. [[...],[...]]".into()));
    };
    if let Some(expected) = expected {
        if curves.len() != expected {
            return Err(EditError::ShapeMismatch { expected, got: curves.len() });
        }
    }
    let mut out = Vec::with_capacity(curves.len());
    for (ci, c) in curves.iter().enumerate() {
        let Some(records) = c.as_array() else {
            return Err(EditError::MalformedImport(format!("curve {} must be a list of points", ci)));
        };
        if records.len() > max_points {
            return Err(EditError::MalformedImport(format!("curve {} has {} points, limit is {}", ci, records.len(), max_points)));
        }
        let mut pts = Vec::with_capacity(records.len());
        for (pi, r) in records.iter().enumerate() {
            let Some(obj) = r.as_object() else {
                return Err(EditError::MalformedImport(format!("curve {} point {} must be an object", ci, pi)));
            };
            let field = |col: Column| -> EditResult<i64> {
                let key = col.key();
                let v = obj.get(key).ok_or_else(|| EditError::MalformedImport(format!("curve {} point {}: missing '{}'", ci, pi, key)))?;
                coerce_int(v).ok_or_else(|| EditError::MalformedImport(format!("curve {} point {}: '{}' is not an integer", ci, pi, key)))
            };
            let x = field(Column::FreqMhz)?;
            let y = field(Column::VoltageMv)?;
            pts.push(Point::from_ints(x, y));
        }
        out.push(pts);
    }
    Ok(out)
}

/// Integers pass through; finite floats and numeric strings are rounded.
pub fn coerce_int(v: &Value) -> Option<i64> {
    let f = match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return in_coord_bounds(i as f64).then_some(i);
            }
            n.as_f64()?
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !in_coord_bounds(f) { return None; }
    Some(f.round() as i64)
}

pub fn parse_session(text: &str, max_points: usize) -> EditResult<Vec<(String, Vec<Vec<Point>>)>> {
    let v: Value = serde_json::from_str(text.trim()).map_err(|e| EditError::MalformedImport(format!("invalid JSON: {}", e)))?;
    let Some(groups) = v.as_array() else {
        return Err(EditError::MalformedImport("session root must be a list".into()));
    };
    let mut out = Vec::with_capacity(groups.len());
    for (gi, g) in groups.iter().enumerate() {
        let name = g.get("group_name").and_then(|n| n.as_str())
            .ok_or_else(|| EditError::MalformedImport(format!("group {} has no 'group_name'", gi)))?;
        let data = g.get("data").ok_or_else(|| EditError::MalformedImport(format!("group '{}' has no 'data'", name)))?;
        out.push((name.to_string(), parse_point_lists_value(data, None, max_points)?));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_is_compact_and_rounded() {
        let data = GroupData::new(vec![
            ("Curve A".into(), vec![Point::new(500.0, 650.0), Point::new(510.4, 651.6)]),
            ("Curve B".into(), vec![]),
        ]).unwrap();
        assert_eq!(export_text(&data), r#"[[{"freq_mhz":500,"voltage_mv":650},{"freq_mhz":510,"voltage_mv":652}],[]]"#);
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(coerce_int(&json!(510)), Some(510));
        assert_eq!(coerce_int(&json!(510.6)), Some(511));
        assert_eq!(coerce_int(&json!(" 42 ")), Some(42));
        assert_eq!(coerce_int(&json!("abc")), None);
        assert_eq!(coerce_int(&json!(true)), None);
        assert_eq!(coerce_int(&json!(null)), None);
        assert_eq!(coerce_int(&json!(1.0e30)), None);
    }

    #[test]
    fn shape_checked_before_fields() {
        let v = json!([[], [], [{"freq_mhz": "x"}]]);
        assert_eq!(parse_point_lists_value(&v, Some(2), 100), Err(EditError::ShapeMismatch { expected: 2, got: 3 }));
    }

    #[test]
    fn rejects_non_list_root_and_bad_records() {
        assert!(matches!(parse_point_lists("{\"a\":1}", 1, 100), Err(EditError::MalformedImport(_))));
        assert!(matches!(parse_point_lists("   ", 1, 100), Err(EditError::MalformedImport(_))));
        assert!(matches!(parse_point_lists("[[1,2]]", 1, 100), Err(EditError::MalformedImport(_))));
        assert!(matches!(parse_point_lists(r#"[[{"freq_mhz":1}]]"#, 1, 100), Err(EditError::MalformedImport(_))));
        assert!(matches!(parse_point_lists(r#"[{"freq_mhz":1}]"#, 1, 100), Err(EditError::MalformedImport(_))));
    }

    #[test]
    fn per_curve_cap() {
        let pts: Vec<_> = (0..5).map(|i| json!({"freq_mhz": i, "voltage_mv": i})).collect();
        assert!(parse_point_lists_value(&json!([pts]), Some(1), 4).is_err());
        assert!(parse_point_lists_value(&json!([pts]), Some(1), 5).is_ok());
    }

    #[test]
    fn session_parse() {
        let text = r#"[{"group_name":"G","data":[[{"freq_mhz":1,"voltage_mv":2}],[]]}]"#;
        let s = parse_session(text, 100).unwrap();
        assert_eq!(s, vec![("G".to_string(), vec![vec![Point::from_ints(1, 2)], vec![]])]);
        assert!(parse_session(r#"[{"data":[]}]"#, 100).is_err());
    }
}
