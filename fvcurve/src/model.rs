use crate::error::{EditError, EditResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One calibration point: x is frequency (MHz), y is voltage (mV).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self { Point { x, y } }
    pub fn from_ints(x: i64, y: i64) -> Self { Point { x: x as f64, y: y as f64 } }
    pub fn rounded(self) -> Self { Point { x: self.x.round(), y: self.y.round() } }
    pub fn freq_mhz(&self) -> i64 { self.x.round() as i64 }
    pub fn voltage_mv(&self) -> i64 { self.y.round() as i64 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    FreqMhz = 0,
    VoltageMv = 1,
}

impl Column {
    pub fn from_index(i: usize) -> Option<Column> {
        match i {
            0 => Some(Column::FreqMhz),
            1 => Some(Column::VoltageMv),
            _ => None,
        }
    }
    pub fn key(&self) -> &'static str {
        match self {
            Column::FreqMhz => "freq_mhz",
            Column::VoltageMv => "voltage_mv",
        }
    }
}

/// Ordered points of one curve. Order is row order, never sorted by x.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self { PointSet { points } }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn get(&self, index: usize) -> Option<Point> { self.points.get(index).copied() }
    pub fn iter(&self) -> impl Iterator<Item = &Point> { self.points.iter() }
    pub fn as_slice(&self) -> &[Point] { &self.points }

    pub fn check_insert(&self, index: usize) -> EditResult<()> {
        if index > self.points.len() {
            return Err(EditError::IndexOutOfRange { index, len: self.points.len() });
        }
        Ok(())
    }
    pub fn check_index(&self, index: usize) -> EditResult<()> {
        if index >= self.points.len() {
            return Err(EditError::IndexOutOfRange { index, len: self.points.len() });
        }
        Ok(())
    }

    pub fn insert_at(&mut self, index: usize, p: Point) -> EditResult<()> {
        self.check_insert(index)?;
        self.points.insert(index, p);
        Ok(())
    }
    pub fn remove_at(&mut self, index: usize) -> EditResult<Point> {
        self.check_index(index)?;
        Ok(self.points.remove(index))
    }
    pub fn set_at(&mut self, index: usize, p: Point) -> EditResult<()> {
        self.check_index(index)?;
        self.points[index] = p;
        Ok(())
    }
    pub fn replace_all(&mut self, points: Vec<Point>) { self.points = points; }
}

/// A named curve. The name is fixed for the life of its group.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    name: String,
    pub(crate) points: PointSet,
}

impl Curve {
    pub fn name(&self) -> &str { &self.name }
    pub fn points(&self) -> &PointSet { &self.points }
}

/// Full curve data of one group, curves in registration order.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupData {
    curves: Vec<Curve>,
}

impl GroupData {
    pub fn new(curves: Vec<(String, Vec<Point>)>) -> EditResult<Self> {
        let mut seen = HashSet::new();
        for (name, _) in &curves {
            if !seen.insert(name.as_str()) {
                return Err(EditError::DuplicateName(name.clone()));
            }
        }
        Ok(GroupData {
            curves: curves
                .into_iter()
                .map(|(name, pts)| Curve { name, points: PointSet::new(pts) })
                .collect(),
        })
    }

    pub fn with_empty_curves<I, S>(names: I) -> EditResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|n| (n.into(), Vec::new())).collect())
    }

    pub fn len(&self) -> usize { self.curves.len() }
    pub fn is_empty(&self) -> bool { self.curves.is_empty() }
    pub fn curves(&self) -> &[Curve] { &self.curves }
    pub fn curve(&self, index: usize) -> Option<&Curve> { self.curves.get(index) }
    pub(crate) fn curve_mut(&mut self, index: usize) -> Option<&mut Curve> { self.curves.get_mut(index) }
    pub fn curve_index(&self, name: &str) -> Option<usize> { self.curves.iter().position(|c| c.name == name) }
    pub fn curve_names(&self) -> Vec<&str> { self.curves.iter().map(|c| c.name.as_str()).collect() }

    /// Point lists in curve order, the shape of the import/export text.
    pub fn point_lists(&self) -> Vec<Vec<Point>> {
        self.curves.iter().map(|c| c.points.as_slice().to_vec()).collect()
    }

    /// Swap every curve's points for `lists`; caller has checked the length.
    pub(crate) fn replace_points(&mut self, lists: Vec<Vec<Point>>) {
        for (curve, pts) in self.curves.iter_mut().zip(lists) {
            curve.points.replace_all(pts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_set_bounds() {
        let mut ps = PointSet::default();
        assert!(ps.insert_at(0, Point::from_ints(1, 2)).is_ok());
        assert!(ps.insert_at(1, Point::from_ints(3, 4)).is_ok());
        assert_eq!(ps.insert_at(3, Point::from_ints(0, 0)), Err(EditError::IndexOutOfRange { index: 3, len: 2 }));
        assert_eq!(ps.set_at(2, Point::from_ints(0, 0)), Err(EditError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(ps.remove_at(5), Err(EditError::IndexOutOfRange { index: 5, len: 2 }));
        assert_eq!(ps.remove_at(0).unwrap(), Point::from_ints(1, 2));
        assert_eq!(ps.as_slice(), &[Point::from_ints(3, 4)]);
    }

    #[test]
    fn order_is_preserved_not_sorted() {
        let mut ps = PointSet::new(vec![Point::from_ints(900, 1), Point::from_ints(100, 2)]);
        ps.insert_at(1, Point::from_ints(50, 3)).unwrap();
        let xs: Vec<f64> = ps.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![900.0, 50.0, 100.0]);
    }

    #[test]
    fn duplicate_curve_names_rejected() {
        let r = GroupData::with_empty_curves(["Curve A", "Curve A"]);
        assert_eq!(r, Err(EditError::DuplicateName("Curve A".into())));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let p = Point::new(510.5, -0.5).rounded();
        assert_eq!(p, Point::new(511.0, -1.0));
        assert_eq!(Point::new(649.6, 0.0).freq_mhz(), 650);
    }
}
