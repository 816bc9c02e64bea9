//! Unit groups

use std::fmt;

use super::point::Point;
use super::translation::LocalizedString;
use super::types::Position;
use super::unit::Unit;
use crate::error::{Error, Result};
use crate::formats::lua::Table;

/// Group category, as used for the per-country group lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupCategory {
    Vehicle,
    Plane,
    Static,
}

impl GroupCategory {
    pub const ALL: [GroupCategory; 3] = [
        GroupCategory::Vehicle,
        GroupCategory::Plane,
        GroupCategory::Static,
    ];

    /// Key of the category table under a country.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            GroupCategory::Vehicle => "vehicle",
            GroupCategory::Plane => "plane",
            GroupCategory::Static => "static",
        }
    }
}

impl fmt::Display for GroupCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Radio settings of a moving group. Plane groups always carry one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radio {
    /// MHz.
    pub frequency: f64,
    /// 0 = AM, 1 = FM.
    pub modulation: i64,
    pub communication: bool,
}

impl Default for Radio {
    fn default() -> Self {
        Self {
            frequency: 251.0,
            modulation: 0,
            communication: true,
        }
    }
}

/// Attributes shared by vehicle and plane groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    /// Main task label, e.g. `Ground Nothing` or `CAP`.
    pub task: String,
    pub start_time: i64,
}

impl Movement {
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            start_time: 0,
        }
    }
}

/// Kind-specific group attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKind {
    Vehicle {
        movement: Movement,
        radio: Option<Radio>,
    },
    Plane {
        movement: Movement,
        radio: Radio,
        uncontrolled: bool,
    },
    Static {
        dead: bool,
        heading: f64,
    },
}

/// A named collection of units of one kind sharing a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: LocalizedString,
    pub hidden: bool,
    pub visible: bool,
    pub kind: GroupKind,
    units: Vec<Unit>,
    points: Vec<Point>,
    /// Span markers, kept as found.
    spans: Vec<Table>,
}

impl Group {
    pub(crate) fn with_kind(id: i64, name: LocalizedString, kind: GroupKind) -> Self {
        Self {
            id,
            name,
            hidden: false,
            visible: false,
            kind,
            units: Vec::new(),
            points: Vec::new(),
            spans: Vec::new(),
        }
    }

    #[must_use]
    pub fn vehicle(id: i64, name: LocalizedString, task: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            name,
            GroupKind::Vehicle {
                movement: Movement::new(task),
                radio: Some(Radio::default()),
            },
        )
    }

    #[must_use]
    pub fn plane(id: i64, name: LocalizedString, task: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            name,
            GroupKind::Plane {
                movement: Movement::new(task),
                radio: Radio::default(),
                uncontrolled: false,
            },
        )
    }

    #[must_use]
    pub fn static_group(id: i64, name: LocalizedString) -> Self {
        Self::with_kind(
            id,
            name,
            GroupKind::Static {
                dead: false,
                heading: 0.0,
            },
        )
    }

    #[must_use]
    pub fn category(&self) -> GroupCategory {
        match self.kind {
            GroupKind::Vehicle { .. } => GroupCategory::Vehicle,
            GroupKind::Plane { .. } => GroupCategory::Plane,
            GroupKind::Static { .. } => GroupCategory::Static,
        }
    }

    /// Task and start time, for vehicle and plane groups.
    #[must_use]
    pub fn movement(&self) -> Option<&Movement> {
        match &self.kind {
            GroupKind::Vehicle { movement, .. } | GroupKind::Plane { movement, .. } => {
                Some(movement)
            }
            GroupKind::Static { .. } => None,
        }
    }

    pub fn movement_mut(&mut self) -> Option<&mut Movement> {
        match &mut self.kind {
            GroupKind::Vehicle { movement, .. } | GroupKind::Plane { movement, .. } => {
                Some(movement)
            }
            GroupKind::Static { .. } => None,
        }
    }

    /// Radio settings, if the group has any.
    #[must_use]
    pub fn radio(&self) -> Option<&Radio> {
        match &self.kind {
            GroupKind::Vehicle { radio, .. } => radio.as_ref(),
            GroupKind::Plane { radio, .. } => Some(radio),
            GroupKind::Static { .. } => None,
        }
    }

    /// Append a unit.
    ///
    /// # Errors
    /// Returns [`Error::KindMismatch`] if the unit's kind differs from the group's.
    pub fn add_unit(&mut self, unit: Unit) -> Result<&mut Unit> {
        let expected = self.category();
        let found = unit.category();
        if expected != found {
            return Err(Error::KindMismatch {
                expected: expected.key(),
                found: found.key(),
            });
        }
        self.units.push(unit);
        let last = self.units.len() - 1;
        Ok(&mut self.units[last])
    }

    /// Append a route point.
    pub fn add_point(&mut self, point: Point) -> &mut Point {
        self.points.push(point);
        let last = self.points.len() - 1;
        &mut self.points[last]
    }

    /// Append a span marker at `position`.
    pub fn add_span(&mut self, position: Position) {
        let mut span = Table::new();
        span.insert("x", position.x);
        span.insert("y", position.y);
        self.spans.push(span);
    }

    pub(crate) fn push_span(&mut self, span: Table) {
        self.spans.push(span);
    }

    /// Position of the first unit. Groups store no position of their own.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.units.first().map(|unit| unit.position)
    }

    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    #[must_use]
    pub fn spans(&self) -> &[Table] {
        &self.spans
    }

    /// Remove and return the unit at `index`, shifting later units down.
    pub fn remove_unit(&mut self, index: usize) -> Option<Unit> {
        (index < self.units.len()).then(|| self.units.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::unit::UnitKind;

    fn name() -> LocalizedString {
        LocalizedString::default()
    }

    #[test]
    fn test_add_unit_rejects_other_kind() {
        let mut group = Group::vehicle(1, name(), "Ground Nothing");
        let err = group.add_unit(Unit::plane(1, name(), "F-16C_50")).unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch { expected: "vehicle", found: "plane" }
        ));
        assert!(group.units().is_empty());
    }

    #[test]
    fn test_position_follows_first_unit() {
        let mut group = Group::vehicle(1, name(), "Ground Nothing");
        assert_eq!(group.position(), None);
        group
            .add_unit(Unit::vehicle(1, name(), "T-72B").at(Position::new(10.0, 20.0)))
            .unwrap();
        group
            .add_unit(Unit::vehicle(2, name(), "T-72B").at(Position::new(99.0, 99.0)))
            .unwrap();
        assert_eq!(group.position(), Some(Position::new(10.0, 20.0)));

        group.units_mut()[0].position = Position::new(1.0, 2.0);
        assert_eq!(group.position(), Some(Position::new(1.0, 2.0)));
    }

    #[test]
    fn test_add_returns_the_new_element() {
        let mut group = Group::plane(3, name(), "CAP");
        let unit = group.add_unit(Unit::plane(7, name(), "F-16C_50")).unwrap();
        if let UnitKind::Plane(plane) = &mut unit.kind {
            plane.alt = 2000.0;
        }
        assert_eq!(group.units()[0].as_plane().map(|p| p.alt), Some(2000.0));

        group.add_point(Point::new(Position::new(1.0, 1.0))).speed = 150.0;
        assert_eq!(group.points()[0].speed, 150.0);
    }

    #[test]
    fn test_radio_by_kind() {
        let mut vehicles = Group::vehicle(1, name(), "Ground Nothing");
        assert_eq!(vehicles.radio(), Some(&Radio::default()));
        if let GroupKind::Vehicle { radio, .. } = &mut vehicles.kind {
            *radio = None;
        }
        assert_eq!(vehicles.radio(), None);

        let planes = Group::plane(2, name(), "CAP");
        assert_eq!(planes.radio().map(|r| r.frequency), Some(251.0));
        assert_eq!(Group::static_group(3, name()).radio(), None);
    }

    #[test]
    fn test_remove_unit() {
        let mut group = Group::static_group(1, name());
        group.add_unit(Unit::static_unit(1, name(), "Tank")).unwrap();
        group.add_unit(Unit::static_unit(2, name(), "Tank")).unwrap();
        assert_eq!(group.remove_unit(0).map(|u| u.id), Some(1));
        assert_eq!(group.remove_unit(5), None);
        assert_eq!(group.units()[0].id, 2);
    }
}
