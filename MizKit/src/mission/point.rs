//! Route points

use super::translation::LocalizedString;
use super::types::{AltitudeType, PointAction, Position};
use crate::formats::lua::Table;

/// One waypoint of a group's route.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Position,
    pub alt: f64,
    pub alt_type: AltitudeType,
    /// Editor point type, e.g. `Turning Point` or `TakeOff`.
    pub point_type: String,
    pub name: LocalizedString,
    pub eta: f64,
    pub eta_locked: bool,
    pub speed: f64,
    pub speed_locked: bool,
    pub formation_template: String,
    pub action: PointAction,
    /// Task descriptor, carried through untouched.
    pub task: Table,
}

impl Point {
    /// A turning point at `position` with editor defaults.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            alt: 0.0,
            alt_type: AltitudeType::Baro,
            point_type: String::from("Turning Point"),
            name: LocalizedString::default(),
            eta: 0.0,
            eta_locked: true,
            speed: 0.0,
            speed_locked: true,
            formation_template: String::new(),
            action: PointAction::OffRoad,
            task: Table::new(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: PointAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self, alt: f64, alt_type: AltitudeType) -> Self {
        self.alt = alt;
        self.alt_type = alt_type;
        self
    }
}
