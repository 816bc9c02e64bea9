//! Weather settings
//!
//! Only the settings the editor exposes on its weather page are modeled.
//! Any other keys found under `weather` are kept in [`Weather::extra`].

use crate::formats::lua::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub name: String,
    pub atmosphere_type: i64,
    pub type_weather: i64,
    /// Pressure at sea level, mmHg.
    pub qnh: f64,
    pub season: Season,
    pub wind: Wind,
    /// Turbulence per altitude band, in the editor's units.
    pub turbulence: Layers<f64>,
    pub enable_fog: bool,
    pub fog: Fog,
    /// Visibility distance in meters.
    pub visibility: f64,
    pub clouds: Clouds,
    /// Cyclone definitions for dynamic weather, carried through untouched.
    pub cyclones: Table,
    /// Unmodeled keys, re-emitted as found.
    pub extra: Table,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            name: String::from("Summer, clean sky"),
            atmosphere_type: 0,
            type_weather: 0,
            qnh: 760.0,
            season: Season::default(),
            wind: Wind::default(),
            turbulence: Layers::default(),
            enable_fog: false,
            fog: Fog::default(),
            visibility: 80_000.0,
            clouds: Clouds::default(),
            cyclones: Table::new(),
            extra: Table::new(),
        }
    }
}

/// One value per standard altitude band: ground, 2000 m and 8000 m.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layers<T> {
    pub at_ground: T,
    pub at_2000: T,
    pub at_8000: T,
}

/// Wind as speed (m/s) and direction (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindLayer {
    pub speed: f64,
    pub dir: f64,
}

pub type Wind = Layers<WindLayer>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Season {
    pub iseason: i64,
    /// Temperature at sea level, Celsius.
    pub temperature: f64,
}

impl Default for Season {
    fn default() -> Self {
        Self {
            iseason: 1,
            temperature: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub thickness: f64,
    pub visibility: f64,
    pub density: f64,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            visibility: 25.0,
            density: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clouds {
    pub thickness: f64,
    pub density: f64,
    pub base: f64,
    /// Precipitation type.
    pub iprecptns: i64,
}

impl Default for Clouds {
    fn default() -> Self {
        Self {
            thickness: 200.0,
            density: 0.0,
            base: 300.0,
            iprecptns: 0,
        }
    }
}
