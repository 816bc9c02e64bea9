//! Units and their kind-specific data

use std::collections::BTreeMap;

use super::group::GroupCategory;
use super::translation::LocalizedString;
use super::types::{AltitudeType, Position, Skill};
use crate::formats::lua::Table;

/// A single vehicle, aircraft or static object.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub name: LocalizedString,
    /// Type name from the game database, e.g. `M-1 Abrams`.
    pub unit_type: String,
    pub position: Position,
    pub heading: f64,
    pub skill: Skill,
    pub kind: UnitKind,
}

/// Kind-specific unit attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitKind {
    Vehicle(VehicleData),
    Plane(Box<PlaneData>),
    Static(StaticData),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleData {
    pub player_can_drive: bool,
    pub transportable: Transportable,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transportable {
    pub random_transportable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneData {
    pub alt: f64,
    pub alt_type: AltitudeType,
    /// Heading in the editor's own convention, written alongside `heading`.
    pub psi: f64,
    pub speed: f64,
    pub livery_id: String,
    pub onboard_num: String,
    pub payload: Payload,
    pub callsign: Callsign,
}

impl Default for PlaneData {
    fn default() -> Self {
        Self {
            alt: 0.0,
            alt_type: AltitudeType::Baro,
            psi: 0.0,
            speed: 0.0,
            livery_id: String::new(),
            onboard_num: String::from("010"),
            payload: Payload::default(),
            callsign: Callsign::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticData {
    /// Static object category, e.g. `Warehouses` or `Fortifications`.
    pub category: String,
    pub can_cargo: bool,
}

impl Default for StaticData {
    fn default() -> Self {
        Self {
            category: String::from("Warehouses"),
            can_cargo: false,
        }
    }
}

/// Fuel, countermeasures and stores of an aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub fuel: f64,
    pub gun: f64,
    pub flare: i64,
    pub chaff: i64,
    pub ammo_type: Option<i64>,
    /// Stations keyed by pylon number.
    pub pylons: BTreeMap<i64, Pylon>,
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            fuel: 0.0,
            gun: 100.0,
            flare: 0,
            chaff: 0,
            ammo_type: None,
            pylons: BTreeMap::new(),
        }
    }
}

/// A store hung on one station.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pylon {
    /// Store class id, e.g. `{6CEB49FC-DED8-4DED-B053-E1F033FF72D3}`.
    pub clsid: String,
    /// Per-store settings, carried through untouched.
    pub settings: Option<Table>,
}

impl Pylon {
    #[must_use]
    pub fn new(clsid: impl Into<String>) -> Self {
        Self {
            clsid: clsid.into(),
            settings: None,
        }
    }
}

/// Radio callsign of an aircraft.
#[derive(Debug, Clone, PartialEq)]
pub enum Callsign {
    /// Western style: name plus group/flight/element digits, e.g. `Enfield11`.
    Named {
        name: String,
        group: i64,
        flight: i64,
        element: i64,
    },
    /// Eastern style numeric callsign.
    Numeric(i64),
}

impl Default for Callsign {
    fn default() -> Self {
        Callsign::Named {
            name: String::from("Enfield11"),
            group: 1,
            flight: 1,
            element: 1,
        }
    }
}

impl Unit {
    fn base(id: i64, name: LocalizedString, unit_type: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id,
            name,
            unit_type: unit_type.into(),
            position: Position::default(),
            heading: 0.0,
            skill: Skill::Average,
            kind,
        }
    }

    #[must_use]
    pub fn vehicle(id: i64, name: LocalizedString, unit_type: impl Into<String>) -> Self {
        Self::base(id, name, unit_type, UnitKind::Vehicle(VehicleData::default()))
    }

    #[must_use]
    pub fn plane(id: i64, name: LocalizedString, unit_type: impl Into<String>) -> Self {
        Self::base(id, name, unit_type, UnitKind::Plane(Box::default()))
    }

    #[must_use]
    pub fn static_unit(id: i64, name: LocalizedString, unit_type: impl Into<String>) -> Self {
        Self::base(id, name, unit_type, UnitKind::Static(StaticData::default()))
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    /// The group category this unit belongs in.
    #[must_use]
    pub fn category(&self) -> GroupCategory {
        match self.kind {
            UnitKind::Vehicle(_) => GroupCategory::Vehicle,
            UnitKind::Plane(_) => GroupCategory::Plane,
            UnitKind::Static(_) => GroupCategory::Static,
        }
    }

    #[must_use]
    pub fn as_vehicle(&self) -> Option<&VehicleData> {
        match &self.kind {
            UnitKind::Vehicle(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_vehicle_mut(&mut self) -> Option<&mut VehicleData> {
        match &mut self.kind {
            UnitKind::Vehicle(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_plane(&self) -> Option<&PlaneData> {
        match &self.kind {
            UnitKind::Plane(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_plane_mut(&mut self) -> Option<&mut PlaneData> {
        match &mut self.kind {
            UnitKind::Plane(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_static(&self) -> Option<&StaticData> {
        match &self.kind {
            UnitKind::Static(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_static_mut(&mut self) -> Option<&mut StaticData> {
        match &mut self.kind {
            UnitKind::Static(data) => Some(data),
            _ => None,
        }
    }
}
