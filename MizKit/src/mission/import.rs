//! Decoded archive tables to mission model
//!
//! Import is all-or-nothing: the mission is assembled from locals and only
//! returned once every table has been read.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::Mission;
use super::coalition::{COALITION_NAMES, Coalition, Country};
use super::group::{Group, GroupCategory, GroupKind, Movement, Radio};
use super::node::Node;
use super::point::Point;
use super::translation::{LocalizedString, Translation};
use super::types::{AltitudeType, PointAction, Position, Skill};
use super::unit::{
    Callsign, Payload, PlaneData, Pylon, StaticData, Transportable, Unit, UnitKind, VehicleData,
};
use super::weather::{Layers, Weather, WindLayer};
use crate::error::{Error, Result};
use crate::formats::lua::{Table, Value};
use crate::formats::miz::{DEFAULT_LANG, MizTables};

/// Import settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Fail on the first unsupported item instead of recording it.
    pub strict: bool,
}

impl ImportOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Source content the model does not represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    /// Where it was found, e.g. `mission.trigrules`.
    pub path: String,
    pub feature: String,
}

/// Top-level mission keys that are not modeled, with a description.
const UNMODELED_KEYS: [(&str, &str); 7] = [
    ("trig", "trigger functions"),
    ("triggers", "trigger zones"),
    ("trigrules", "trigger rules"),
    ("result", "mission result scoring"),
    ("groundControl", "ground control roles"),
    ("resourceCounter", "resource counters"),
    ("drawings", "map drawings"),
];

/// Group categories a country may carry that are not modeled.
const UNMODELED_CATEGORIES: [&str; 2] = ["helicopter", "ship"];

/// Weather keys read into [`Weather`] fields. Everything else goes to `extra`.
const WEATHER_KEYS: [&str; 12] = [
    "name",
    "atmosphere_type",
    "type_weather",
    "qnh",
    "season",
    "wind",
    "turbulence",
    "enable_fog",
    "fog",
    "visibility",
    "clouds",
    "cyclones",
];

impl Mission {
    /// Build a mission from decoded archive tables.
    ///
    /// # Errors
    /// Returns [`Error::StructuralMismatch`] for a missing or malformed
    /// required key, or [`Error::UnsupportedFeature`] for unmodeled content
    /// when `options.strict` is set. No mission is produced on error.
    pub fn import_tables(tables: &MizTables, options: ImportOptions) -> Result<Self> {
        let translation = Translation::from_dictionary(&tables.dictionary, DEFAULT_LANG)?;
        let mut importer = Importer {
            translation: &translation,
            options,
            unsupported: Vec::new(),
        };
        let root = Node::new(&tables.mission, "mission");

        let version = root.i64("version")?;
        let max_dict_id = root.opt_i64("maxDictId", 0)?;
        translation.note_dict_id(u64::try_from(max_dict_id).unwrap_or(0));

        importer.classify_unmodeled(&root, tables)?;

        let description_text = importer.localized_or_new(&root, "descriptionText")?;
        let description_blue_task = importer.localized_or_new(&root, "descriptionBlueTask")?;
        let description_red_task = importer.localized_or_new(&root, "descriptionRedTask")?;
        let sortie = importer.localized_or_new(&root, "sortie")?;

        let weather = match root.opt_child("weather")? {
            Some((table, path)) => import_weather(&Node::new(table, &path))?,
            None => Weather::default(),
        };
        let coalitions = importer.coalitions(&root)?;
        let unsupported = importer.unsupported;

        let mission = Mission {
            version,
            current_key: root.opt_i64("currentKey", 0)?,
            start_time: root.opt_i64("start_time", 0)?,
            theatre: root.opt_str("theatre", "Caucasus")?,
            sortie,
            description_text,
            description_blue_task,
            description_red_task,
            picture_file_name_r: picture_file(&root, "pictureFileNameR"),
            picture_file_name_b: picture_file(&root, "pictureFileNameB"),
            used_modules: used_modules(&root)?,
            options: tables.options.clone(),
            weather,
            goals: root.opt_table("goals")?.unwrap_or_default(),
            map: root.opt_table("map")?.unwrap_or_default(),
            forced_options: root.opt_table("forcedOptions")?.unwrap_or_default(),
            failures: root.opt_table("failures")?.unwrap_or_default(),
            need_modules: root.opt_table("needModules")?.unwrap_or_default(),
            coalitions,
            unsupported,
            translation,
        };

        let (groups, units) = mission.counts();
        info!(
            "Imported mission on {} with {} coalitions, {groups} groups, {units} units",
            mission.theatre,
            mission.coalitions.len()
        );
        Ok(mission)
    }
}

struct Importer<'t> {
    translation: &'t Translation,
    options: ImportOptions,
    unsupported: Vec<Unsupported>,
}

impl Importer<'_> {
    /// Record unmodeled content, or fail on it in strict mode.
    fn classify(&mut self, path: impl Into<String>, feature: &str) -> Result<()> {
        let path = path.into();
        if self.options.strict {
            return Err(Error::UnsupportedFeature {
                path,
                feature: feature.to_string(),
            });
        }
        warn!("Ignoring unsupported {feature} at {path}");
        self.unsupported.push(Unsupported {
            path,
            feature: feature.to_string(),
        });
        Ok(())
    }

    fn classify_unmodeled(&mut self, root: &Node, tables: &MizTables) -> Result<()> {
        for (key, feature) in UNMODELED_KEYS {
            if root.opt(key).is_some_and(|value| !is_blank(value)) {
                self.classify(root.child_path(key), feature)?;
            }
        }
        if !is_blank_table(&tables.warehouses) {
            self.classify("warehouses", "warehouse contents")?;
        }
        for lang in &tables.other_languages {
            self.classify(format!("l10n/{lang}/dictionary"), "non-DEFAULT localization")?;
        }
        Ok(())
    }

    fn localized(&self, node: &Node, key: &str) -> Result<LocalizedString> {
        Ok(self.translation.get_string(node.str(key)?, DEFAULT_LANG))
    }

    /// Reference under `key`, or a fresh empty string when the key is absent.
    fn localized_or_new(&self, node: &Node, key: &str) -> Result<LocalizedString> {
        if node.has(key) {
            self.localized(node, key)
        } else {
            Ok(self.translation.create_string(key, ""))
        }
    }

    fn coalitions(&mut self, root: &Node) -> Result<BTreeMap<String, Coalition>> {
        let mut coalitions = BTreeMap::new();
        let Some((table, path)) = root.opt_child("coalition")? else {
            return Ok(coalitions);
        };
        let node = Node::new(table, &path);
        for name in COALITION_NAMES {
            if let Some((table, path)) = node.opt_child(name)? {
                let coalition = self.coalition(name, &Node::new(table, &path))?;
                coalitions.insert(name.to_string(), coalition);
            }
        }
        Ok(coalitions)
    }

    fn coalition(&mut self, name: &str, node: &Node) -> Result<Coalition> {
        let mut coalition = Coalition::new(name);
        coalition.bullseye = node.opt_table("bullseye")?;
        coalition.nav_points = node.opt_table("nav_points")?.unwrap_or_default();

        let (countries, path) = node.child("country")?;
        for (table, path) in Node::new(countries, &path).items()? {
            let country = self.country(&Node::new(table, &path))?;
            coalition.add_country(country);
        }
        debug!(
            "Imported coalition {name} with {} countries",
            coalition.countries().len()
        );
        Ok(coalition)
    }

    fn country(&mut self, node: &Node) -> Result<Country> {
        let mut country = Country::new(node.i64("id")?, node.string("name")?);
        for category in GroupCategory::ALL {
            let Some((table, path)) = node.opt_child(category.key())? else {
                continue;
            };
            let (groups, path) = Node::new(table, &path).child("group")?;
            for (table, path) in Node::new(groups, &path).items()? {
                let group = self.group(category, &Node::new(table, &path))?;
                country.add_group(group);
            }
        }
        for key in UNMODELED_CATEGORIES {
            if node.opt(key).is_some_and(|value| !is_blank(value)) {
                self.classify(node.child_path(key), &format!("{key} groups"))?;
            }
        }
        Ok(country)
    }

    fn group(&self, category: GroupCategory, node: &Node) -> Result<Group> {
        let kind = match category {
            GroupCategory::Vehicle => GroupKind::Vehicle {
                movement: movement(node)?,
                radio: node.has("frequency").then(|| radio(node)).transpose()?,
            },
            GroupCategory::Plane => GroupKind::Plane {
                movement: movement(node)?,
                radio: radio(node)?,
                uncontrolled: node.opt_bool("uncontrolled", false)?,
            },
            GroupCategory::Static => GroupKind::Static {
                dead: node.opt_bool("dead", false)?,
                heading: node.opt_f64("heading", 0.0)?,
            },
        };
        let mut group = Group::with_kind(node.i64("groupId")?, self.localized(node, "name")?, kind);
        group.hidden = node.opt_bool("hidden", false)?;
        group.visible = node.opt_bool("visible", false)?;

        if let Some((table, path)) = node.opt_child("route")? {
            let route = Node::new(table, &path);
            if let Some((points, path)) = route.opt_child("points")? {
                for (table, path) in Node::new(points, &path).items()? {
                    group.add_point(self.point(&Node::new(table, &path))?);
                }
            }
            if let Some((spans, path)) = route.opt_child("spans")? {
                for (table, _) in Node::new(spans, &path).items()? {
                    group.push_span(table.clone());
                }
            }
        }

        let (units, path) = node.child("units")?;
        for (table, path) in Node::new(units, &path).items()? {
            group.add_unit(self.unit(category, &Node::new(table, &path))?)?;
        }
        debug!(
            "Imported {category} group {} with {} units",
            group.id,
            group.units().len()
        );
        Ok(group)
    }

    fn point(&self, node: &Node) -> Result<Point> {
        let name = if node.has("name") {
            self.localized(node, "name")?
        } else {
            LocalizedString::default()
        };
        Ok(Point {
            position: Position::new(node.f64("x")?, node.f64("y")?),
            alt: node.f64("alt")?,
            alt_type: alt_type(node)?,
            point_type: node.string("type")?,
            name,
            eta: node.opt_f64("ETA", 0.0)?,
            eta_locked: node.opt_bool("ETA_locked", true)?,
            speed: node.f64("speed")?,
            speed_locked: node.opt_bool("speed_locked", true)?,
            formation_template: node.opt_str("formation_template", "")?,
            action: PointAction::from(node.str("action")?),
            task: node.opt_table("task")?.unwrap_or_default(),
        })
    }

    fn unit(&self, category: GroupCategory, node: &Node) -> Result<Unit> {
        let kind = match category {
            GroupCategory::Vehicle => UnitKind::Vehicle(VehicleData {
                player_can_drive: node.opt_bool("playerCanDrive", false)?,
                transportable: transportable(node)?,
            }),
            GroupCategory::Plane => UnitKind::Plane(Box::new(plane_data(node)?)),
            GroupCategory::Static => {
                let defaults = StaticData::default();
                UnitKind::Static(StaticData {
                    category: node.opt_str("category", &defaults.category)?,
                    can_cargo: node.opt_bool("canCargo", defaults.can_cargo)?,
                })
            }
        };
        let skill = if node.has("skill") {
            Skill::from(node.str("skill")?)
        } else {
            Skill::default()
        };
        Ok(Unit {
            id: node.i64("unitId")?,
            name: self.localized(node, "name")?,
            unit_type: node.string("type")?,
            position: Position::new(node.f64("x")?, node.f64("y")?),
            heading: node.opt_f64("heading", 0.0)?,
            skill,
            kind,
        })
    }
}

/// True for a table holding nothing but (recursively) empty tables.
fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Table(table) if is_blank_table(table))
}

fn is_blank_table(table: &Table) -> bool {
    table.iter().all(|(_, value)| is_blank(value))
}

fn picture_file(root: &Node, key: &str) -> Value {
    root.opt(key)
        .cloned()
        .unwrap_or_else(|| Value::Str(String::new()))
}

fn used_modules(root: &Node) -> Result<BTreeMap<String, bool>> {
    let Some((table, path)) = root.opt_child("usedModules")? else {
        return Ok(BTreeMap::new());
    };
    let node = Node::new(table, &path);
    table
        .keys()
        .map(|key| {
            let name = key.to_string();
            node.bool(&name).map(|enabled| (name, enabled))
        })
        .collect()
}

fn alt_type(node: &Node) -> Result<AltitudeType> {
    let text = node.str("alt_type")?;
    AltitudeType::parse(text).ok_or_else(|| {
        Error::structural(
            node.child_path("alt_type"),
            format!("unknown altitude type '{text}'"),
        )
    })
}

fn movement(node: &Node) -> Result<Movement> {
    Ok(Movement {
        task: node.string("task")?,
        start_time: node.i64("start_time")?,
    })
}

fn radio(node: &Node) -> Result<Radio> {
    let defaults = Radio::default();
    Ok(Radio {
        frequency: node.f64("frequency")?,
        modulation: node.opt_i64("modulation", defaults.modulation)?,
        communication: node.opt_bool("communication", defaults.communication)?,
    })
}

fn transportable(node: &Node) -> Result<Transportable> {
    let Some((table, path)) = node.opt_child("transportable")? else {
        return Ok(Transportable::default());
    };
    Ok(Transportable {
        random_transportable: Node::new(table, &path).opt_bool("randomTransportable", false)?,
    })
}

fn plane_data(node: &Node) -> Result<PlaneData> {
    let (payload, path) = node.child("payload")?;
    let defaults = PlaneData::default();
    Ok(PlaneData {
        alt: node.f64("alt")?,
        alt_type: alt_type(node)?,
        psi: node.opt_f64("psi", defaults.psi)?,
        speed: node.f64("speed")?,
        livery_id: node.opt_str("livery_id", &defaults.livery_id)?,
        onboard_num: onboard_num(node, &defaults.onboard_num)?,
        payload: payload_data(&Node::new(payload, &path))?,
        callsign: callsign(node)?,
    })
}

/// Tail numbers are usually strings, but some missions store plain numbers.
fn onboard_num(node: &Node, default: &str) -> Result<String> {
    match node.opt("onboard_num") {
        None => Ok(default.to_string()),
        Some(Value::Int(number)) => Ok(number.to_string()),
        Some(_) => node.string("onboard_num"),
    }
}

fn payload_data(node: &Node) -> Result<Payload> {
    let defaults = Payload::default();
    // Older missions store fuel as a numeric string
    let fuel = match node.value("fuel")? {
        Value::Str(text) => text.trim().parse::<f64>().map_err(|_| {
            Error::structural(node.child_path("fuel"), format!("expected number, found '{text}'"))
        })?,
        _ => node.f64("fuel")?,
    };
    let ammo_type = if node.has("ammo_type") {
        Some(node.i64("ammo_type")?)
    } else {
        None
    };

    let mut pylons = BTreeMap::new();
    if let Some((table, path)) = node.opt_child("pylons")? {
        let stations = Node::new(table, &path);
        for (station, value) in stations.int_entries()? {
            let path = stations.child_path(station);
            let table = value.as_table().ok_or_else(|| {
                Error::structural(&path, format!("expected table, found {}", value.type_name()))
            })?;
            let pylon = Node::new(table, &path);
            pylons.insert(
                station,
                Pylon {
                    clsid: pylon.string("CLSID")?,
                    settings: pylon.opt_table("settings")?,
                },
            );
        }
    }

    Ok(Payload {
        fuel,
        gun: node.opt_f64("gun", defaults.gun)?,
        flare: node.opt_i64("flare", defaults.flare)?,
        chaff: node.opt_i64("chaff", defaults.chaff)?,
        ammo_type,
        pylons,
    })
}

fn callsign(node: &Node) -> Result<Callsign> {
    match node.value("callsign")? {
        Value::Table(table) => {
            let path = node.child_path("callsign");
            let callsign = Node::new(table, &path);
            Ok(Callsign::Named {
                name: callsign.string("name")?,
                group: callsign.i64_at(1)?,
                flight: callsign.i64_at(2)?,
                element: callsign.i64_at(3)?,
            })
        }
        _ => node.i64("callsign").map(Callsign::Numeric),
    }
}

fn import_weather(node: &Node) -> Result<Weather> {
    let mut weather = Weather::default();
    weather.name = node.opt_str("name", &weather.name)?;
    weather.atmosphere_type = node.opt_i64("atmosphere_type", weather.atmosphere_type)?;
    weather.type_weather = node.opt_i64("type_weather", weather.type_weather)?;
    weather.qnh = node.opt_f64("qnh", weather.qnh)?;
    weather.enable_fog = node.opt_bool("enable_fog", weather.enable_fog)?;
    weather.cyclones = node.opt_table("cyclones")?.unwrap_or_default();

    if let Some((table, path)) = node.opt_child("season")? {
        let season = Node::new(table, &path);
        weather.season.iseason = season.opt_i64("iseason", weather.season.iseason)?;
        weather.season.temperature = season.opt_f64("temperature", weather.season.temperature)?;
    }
    if let Some((table, path)) = node.opt_child("wind")? {
        let wind = Node::new(table, &path);
        weather.wind = Layers {
            at_ground: wind_layer(&wind, "atGround")?,
            at_2000: wind_layer(&wind, "at2000")?,
            at_8000: wind_layer(&wind, "at8000")?,
        };
    }
    if let Some((table, path)) = node.opt_child("turbulence")? {
        let turbulence = Node::new(table, &path);
        weather.turbulence = Layers {
            at_ground: turbulence.opt_f64("atGround", 0.0)?,
            at_2000: turbulence.opt_f64("at2000", 0.0)?,
            at_8000: turbulence.opt_f64("at8000", 0.0)?,
        };
    }
    if let Some((table, path)) = node.opt_child("fog")? {
        let fog = Node::new(table, &path);
        weather.fog.thickness = fog.opt_f64("thickness", weather.fog.thickness)?;
        weather.fog.visibility = fog.opt_f64("visibility", weather.fog.visibility)?;
        weather.fog.density = fog.opt_f64("density", weather.fog.density)?;
    }
    if let Some((table, path)) = node.opt_child("visibility")? {
        weather.visibility = Node::new(table, &path).opt_f64("distance", weather.visibility)?;
    }
    if let Some((table, path)) = node.opt_child("clouds")? {
        let clouds = Node::new(table, &path);
        weather.clouds.thickness = clouds.opt_f64("thickness", weather.clouds.thickness)?;
        weather.clouds.density = clouds.opt_f64("density", weather.clouds.density)?;
        weather.clouds.base = clouds.opt_f64("base", weather.clouds.base)?;
        weather.clouds.iprecptns = clouds.opt_i64("iprecptns", weather.clouds.iprecptns)?;
    }

    weather.extra = node
        .table()
        .iter()
        .filter(|(key, _)| !WEATHER_KEYS.contains(&key.to_string().as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(weather)
}

fn wind_layer(wind: &Node, key: &str) -> Result<WindLayer> {
    let Some((table, path)) = wind.opt_child(key)? else {
        return Ok(WindLayer::default());
    };
    let layer = Node::new(table, &path);
    Ok(WindLayer {
        speed: layer.opt_f64("speed", 0.0)?,
        dir: layer.opt_f64("dir", 0.0)?,
    })
}
