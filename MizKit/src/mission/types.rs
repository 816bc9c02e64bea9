//! Small value types shared by units, groups and route points

use std::fmt;

/// A 2D map coordinate in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Enumerations stored as editor strings. Unknown strings are kept verbatim
/// in `Other` so they survive a round trip.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this crate does not know, kept as written.
            Other(String),
        }

        impl $name {
            /// The string the editor writes for this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(text) => text,
                }
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                match text {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// AI skill level, or a human slot.
    Skill {
        #[default]
        Average => "Average",
        Good => "Good",
        High => "High",
        Excellent => "Excellent",
        Random => "Random",
        Player => "Player",
        Client => "Client",
    }
}

string_enum! {
    /// What a unit does on reaching a route point.
    PointAction {
        TurningPoint => "Turning Point",
        FlyOverPoint => "Fly Over Point",
        FromRunway => "From Runway",
        FromParkingArea => "From Parking Area",
        FromParkingAreaHot => "From Parking Area Hot",
        FromGroundArea => "From Ground Area",
        FromGroundAreaHot => "From Ground Area Hot",
        Landing => "Landing",
        #[default]
        OffRoad => "Off Road",
        OnRoad => "On Road",
    }
}

/// Altitude reference: above sea level or above ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AltitudeType {
    #[default]
    Baro,
    Radio,
}

impl AltitudeType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AltitudeType::Baro => "BARO",
            AltitudeType::Radio => "RADIO",
        }
    }

    /// Parse the editor string. Anything but `BARO`/`RADIO` is rejected.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "BARO" => Some(AltitudeType::Baro),
            "RADIO" => Some(AltitudeType::Radio),
            _ => None,
        }
    }
}

impl fmt::Display for AltitudeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_strings_map_to_variants() {
        assert_eq!(Skill::from("Excellent"), Skill::Excellent);
        assert_eq!(PointAction::from("Off Road"), PointAction::OffRoad);
        assert_eq!(PointAction::TurningPoint.as_str(), "Turning Point");
    }

    #[test]
    fn test_unknown_strings_survive() {
        let action = PointAction::from("Cone");
        assert_eq!(action, PointAction::Other("Cone".into()));
        assert_eq!(action.as_str(), "Cone");
    }

    #[test]
    fn test_altitude_type_is_closed() {
        assert_eq!(AltitudeType::parse("RADIO"), Some(AltitudeType::Radio));
        assert_eq!(AltitudeType::parse("radio"), None);
        assert_eq!(AltitudeType::default().to_string(), "BARO");
    }
}
