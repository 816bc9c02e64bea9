//! Mission model to archive tables
//!
//! Sequences are numbered from 1 in their current order, strings are
//! written as dictionary ids and group positions are taken from the first
//! unit. Nothing is validated.

use tracing::{debug, warn};

use super::Mission;
use super::coalition::{Coalition, Country};
use super::group::{Group, GroupCategory, GroupKind, Movement, Radio};
use super::point::Point;
use super::unit::{Callsign, Payload, Unit, UnitKind};
use super::weather::{Layers, Weather, WindLayer};
use crate::formats::lua::{Key, Table, Value};
use crate::formats::miz::{DEFAULT_LANG, MizTables};

/// Unmodeled mission keys, written empty so the archive has its usual shape.
const PLACEHOLDER_KEYS: [&str; 6] = [
    "trig",
    "triggers",
    "trigrules",
    "result",
    "groundControl",
    "resourceCounter",
];

impl Mission {
    /// Export the mission as the four archive tables.
    #[must_use]
    pub fn export_tables(&self) -> MizTables {
        let mut mission = Table::new();
        for key in PLACEHOLDER_KEYS {
            mission.insert(key, Table::new());
        }

        mission.insert("version", self.version);
        mission.insert("currentKey", self.current_key);
        mission.insert("start_time", self.start_time);
        mission.insert("theatre", self.theatre.as_str());
        mission.insert("sortie", self.sortie.id());
        mission.insert("descriptionText", self.description_text.id());
        mission.insert("descriptionBlueTask", self.description_blue_task.id());
        mission.insert("descriptionRedTask", self.description_red_task.id());
        mission.insert("pictureFileNameR", self.picture_file_name_r.clone());
        mission.insert("pictureFileNameB", self.picture_file_name_b.clone());
        mission.insert(
            "usedModules",
            self.used_modules
                .iter()
                .map(|(name, enabled)| (Key::from(name.as_str()), Value::Bool(*enabled)))
                .collect::<Table>(),
        );
        mission.insert("weather", export_weather(&self.weather));
        mission.insert("needModules", self.need_modules.clone());
        mission.insert("map", self.map.clone());
        mission.insert("goals", self.goals.clone());
        mission.insert("forcedOptions", self.forced_options.clone());
        mission.insert("failures", self.failures.clone());

        let mut coalition = Table::new();
        let mut coalitions = Table::new();
        for (name, entry) in self.coalitions() {
            coalition.insert(name, export_coalition(entry));
            coalitions.insert(
                name,
                Table::sequence(entry.countries().iter().map(|country| country.id)),
            );
        }
        mission.insert("coalition", coalition);
        mission.insert("coalitions", coalitions);
        mission.insert(
            "maxDictId",
            i64::try_from(self.translation().max_dict_id()).unwrap_or(i64::MAX),
        );

        let mut warehouses = Table::new();
        warehouses.insert("airports", Table::new());
        warehouses.insert("warehouses", Table::new());

        let other_languages: Vec<String> = self
            .translation()
            .languages()
            .into_iter()
            .filter(|lang| lang != DEFAULT_LANG)
            .collect();
        for lang in &other_languages {
            warn!(
                "{} {lang} strings are not exported; only the {DEFAULT_LANG} dictionary is written",
                self.translation().len(lang)
            );
        }

        MizTables {
            mission,
            options: self.options.clone(),
            warehouses,
            dictionary: self.translation().to_dictionary(DEFAULT_LANG),
            other_languages,
        }
    }
}

fn export_coalition(coalition: &Coalition) -> Table {
    let mut table = Table::new();
    table.insert("name", coalition.name.as_str());
    if let Some(bullseye) = &coalition.bullseye {
        table.insert("bullseye", bullseye.clone());
    }
    table.insert("nav_points", coalition.nav_points.clone());
    table.insert(
        "country",
        Table::sequence(coalition.countries().iter().map(export_country)),
    );
    table
}

fn export_country(country: &Country) -> Table {
    let mut table = Table::new();
    table.insert("id", country.id);
    table.insert("name", country.name.as_str());
    for category in GroupCategory::ALL {
        let groups = country.groups(category);
        if groups.is_empty() {
            continue;
        }
        let mut list = Table::new();
        list.insert("group", Table::sequence(groups.iter().map(export_group)));
        table.insert(category.key(), list);
    }
    debug!("Exported country {} ({} units)", country.name, country.unit_count());
    table
}

fn export_group(group: &Group) -> Table {
    let mut table = Table::new();
    table.insert("groupId", group.id);
    table.insert("name", group.name.id());
    table.insert("hidden", group.hidden);
    table.insert("visible", group.visible);
    if let Some(position) = group.position() {
        table.insert("x", position.x);
        table.insert("y", position.y);
    }

    match &group.kind {
        GroupKind::Vehicle { movement, radio } => {
            export_movement(&mut table, movement);
            if let Some(radio) = radio {
                export_radio(&mut table, radio);
            }
        }
        GroupKind::Plane {
            movement,
            radio,
            uncontrolled,
        } => {
            export_movement(&mut table, movement);
            export_radio(&mut table, radio);
            table.insert("uncontrolled", *uncontrolled);
        }
        GroupKind::Static { dead, heading } => {
            table.insert("dead", *dead);
            table.insert("heading", *heading);
        }
    }

    let mut route = Table::new();
    route.insert("points", Table::sequence(group.points().iter().map(export_point)));
    route.insert("spans", Table::sequence(group.spans().iter().cloned()));
    table.insert("route", route);
    table.insert("units", Table::sequence(group.units().iter().map(export_unit)));
    table
}

fn export_movement(table: &mut Table, movement: &Movement) {
    table.insert("task", movement.task.as_str());
    table.insert("start_time", movement.start_time);
}

fn export_radio(table: &mut Table, radio: &Radio) {
    table.insert("frequency", radio.frequency);
    table.insert("modulation", radio.modulation);
    table.insert("communication", radio.communication);
}

fn export_point(point: &Point) -> Table {
    let mut table = Table::new();
    table.insert("x", point.position.x);
    table.insert("y", point.position.y);
    table.insert("alt", point.alt);
    table.insert("alt_type", point.alt_type.as_str());
    table.insert("type", point.point_type.as_str());
    table.insert("name", point.name.id());
    table.insert("ETA", point.eta);
    table.insert("ETA_locked", point.eta_locked);
    table.insert("speed", point.speed);
    table.insert("speed_locked", point.speed_locked);
    table.insert("formation_template", point.formation_template.as_str());
    table.insert("action", point.action.as_str());
    table.insert("task", point.task.clone());
    table
}

fn export_unit(unit: &Unit) -> Table {
    let mut table = Table::new();
    table.insert("unitId", unit.id);
    table.insert("name", unit.name.id());
    table.insert("type", unit.unit_type.as_str());
    table.insert("x", unit.position.x);
    table.insert("y", unit.position.y);
    table.insert("heading", unit.heading);
    table.insert("skill", unit.skill.as_str());

    match &unit.kind {
        UnitKind::Vehicle(vehicle) => {
            table.insert("playerCanDrive", vehicle.player_can_drive);
            let mut transportable = Table::new();
            transportable.insert(
                "randomTransportable",
                vehicle.transportable.random_transportable,
            );
            table.insert("transportable", transportable);
        }
        UnitKind::Plane(plane) => {
            table.insert("alt", plane.alt);
            table.insert("alt_type", plane.alt_type.as_str());
            table.insert("psi", plane.psi);
            table.insert("speed", plane.speed);
            table.insert("livery_id", plane.livery_id.as_str());
            table.insert("onboard_num", plane.onboard_num.as_str());
            table.insert("payload", export_payload(&plane.payload));
            table.insert("callsign", export_callsign(&plane.callsign));
        }
        UnitKind::Static(data) => {
            table.insert("category", data.category.as_str());
            table.insert("canCargo", data.can_cargo);
        }
    }
    table
}

fn export_payload(payload: &Payload) -> Table {
    let mut table = Table::new();
    table.insert("fuel", payload.fuel);
    table.insert("gun", payload.gun);
    table.insert("flare", payload.flare);
    table.insert("chaff", payload.chaff);
    if let Some(ammo_type) = payload.ammo_type {
        table.insert("ammo_type", ammo_type);
    }
    let pylons: Table = payload
        .pylons
        .iter()
        .map(|(station, pylon)| {
            let mut entry = Table::new();
            entry.insert("CLSID", pylon.clsid.as_str());
            if let Some(settings) = &pylon.settings {
                entry.insert("settings", settings.clone());
            }
            (Key::Int(*station), Value::Table(entry))
        })
        .collect();
    table.insert("pylons", pylons);
    table
}

fn export_callsign(callsign: &Callsign) -> Value {
    match callsign {
        Callsign::Named {
            name,
            group,
            flight,
            element,
        } => {
            let mut table = Table::new();
            table.insert(1, *group);
            table.insert(2, *flight);
            table.insert(3, *element);
            table.insert("name", name.as_str());
            Value::Table(table)
        }
        Callsign::Numeric(code) => Value::Int(*code),
    }
}

fn export_weather(weather: &Weather) -> Table {
    let mut table = weather.extra.clone();
    table.insert("name", weather.name.as_str());
    table.insert("atmosphere_type", weather.atmosphere_type);
    table.insert("type_weather", weather.type_weather);
    table.insert("qnh", weather.qnh);
    table.insert("enable_fog", weather.enable_fog);
    table.insert("cyclones", weather.cyclones.clone());

    let mut season = Table::new();
    season.insert("iseason", weather.season.iseason);
    season.insert("temperature", weather.season.temperature);
    table.insert("season", season);

    table.insert("wind", layers(&weather.wind, |layer: &WindLayer| {
        let mut wind = Table::new();
        wind.insert("speed", layer.speed);
        wind.insert("dir", layer.dir);
        Value::Table(wind)
    }));
    table.insert("turbulence", layers(&weather.turbulence, |value: &f64| Value::Float(*value)));

    let mut fog = Table::new();
    fog.insert("thickness", weather.fog.thickness);
    fog.insert("visibility", weather.fog.visibility);
    fog.insert("density", weather.fog.density);
    table.insert("fog", fog);

    let mut visibility = Table::new();
    visibility.insert("distance", weather.visibility);
    table.insert("visibility", visibility);

    let mut clouds = Table::new();
    clouds.insert("thickness", weather.clouds.thickness);
    clouds.insert("density", weather.clouds.density);
    clouds.insert("base", weather.clouds.base);
    clouds.insert("iprecptns", weather.clouds.iprecptns);
    table.insert("clouds", clouds);
    table
}

fn layers<T>(layers: &Layers<T>, to_value: impl Fn(&T) -> Value) -> Table {
    let mut table = Table::new();
    table.insert("atGround", to_value(&layers.at_ground));
    table.insert("at2000", to_value(&layers.at_2000));
    table.insert("at8000", to_value(&layers.at_8000));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::{
        Callsign, Coalition, Country, ImportOptions, LocalizedString, Point, PointAction,
        Position, Pylon, Unit,
    };
    use pretty_assertions::assert_eq;

    fn table<'a>(value: Option<&'a Value>) -> &'a Table {
        value.and_then(Value::as_table).unwrap()
    }

    fn keys(table: &Table) -> Vec<String> {
        table.keys().map(ToString::to_string).collect()
    }

    #[test]
    fn test_sequences_are_dense_in_call_order() {
        let name = LocalizedString::default();
        let mut group = Group::vehicle(1, name.clone(), "Ground Nothing");
        for id in [30, 10, 20] {
            group.add_unit(Unit::vehicle(id, name.clone(), "T-72B")).unwrap();
        }
        group.add_point(Point::new(Position::new(0.0, 0.0)));
        group.add_point(Point::new(Position::new(5.0, 5.0)));
        group.add_span(Position::new(1.0, 1.0));
        group.remove_unit(1);

        let exported = export_group(&group);
        let units = table(exported.get("units"));
        assert_eq!(keys(units), ["1", "2"]);
        let ids: Vec<i64> = units
            .dense_values()
            .unwrap()
            .into_iter()
            .filter_map(|unit| unit.as_table()?.get("unitId")?.as_i64())
            .collect();
        assert_eq!(ids, [30, 20]);

        let route = table(exported.get("route"));
        assert_eq!(keys(table(route.get("points"))), ["1", "2"]);
        assert_eq!(keys(table(route.get("spans"))), ["1"]);
    }

    #[test]
    fn test_group_position_comes_from_first_unit() {
        let name = LocalizedString::default();
        let mut group = Group::vehicle(1, name.clone(), "Ground Nothing");
        group
            .add_unit(Unit::vehicle(1, name.clone(), "T-72B").at(Position::new(100.0, 200.0)))
            .unwrap();
        group
            .add_unit(Unit::vehicle(2, name, "T-72B").at(Position::new(-5.0, 7.5)))
            .unwrap();

        let exported = export_group(&group);
        assert_eq!(exported.get("x"), Some(&Value::Float(100.0)));
        assert_eq!(exported.get("y"), Some(&Value::Float(200.0)));

        let empty = export_group(&Group::vehicle(2, LocalizedString::default(), "x"));
        assert!(empty.get("x").is_none());
    }

    #[test]
    fn test_variant_fields_are_disjoint() {
        let name = LocalizedString::default();
        let vehicle = export_unit(&Unit::vehicle(1, name.clone(), "T-72B"));
        assert!(vehicle.contains_key("transportable"));
        assert!(!vehicle.contains_key("payload"));
        assert!(!vehicle.contains_key("callsign"));

        let plane = export_unit(&Unit::plane(2, name.clone(), "F-16C_50"));
        assert!(plane.contains_key("payload"));
        assert!(plane.contains_key("callsign"));
        assert!(!plane.contains_key("transportable"));
        assert!(!plane.contains_key("playerCanDrive"));

        let fixed = export_unit(&Unit::static_unit(3, name, ".Ammunition depot"));
        assert!(!fixed.contains_key("payload"));
        assert!(!fixed.contains_key("transportable"));
        assert_eq!(fixed.get("category"), Some(&Value::from("Warehouses")));
    }

    #[test]
    fn test_named_callsign_layout() {
        let value = export_callsign(&Callsign::Named {
            name: "Enfield11".into(),
            group: 1,
            flight: 1,
            element: 2,
        });
        let callsign = value.as_table().unwrap();
        assert_eq!(callsign.get(3), Some(&Value::Int(2)));
        assert_eq!(callsign.get("name"), Some(&Value::from("Enfield11")));
        assert_eq!(export_callsign(&Callsign::Numeric(101)), Value::Int(101));
    }

    #[test]
    fn test_absent_coalitions_are_omitted() {
        let mut mission = Mission::new();
        mission.add_coalition(Coalition::new("blue")).unwrap();
        mission.add_coalition(Coalition::new("red")).unwrap();
        let tables = mission.export_tables();
        let coalition = table(tables.mission.get("coalition"));
        assert_eq!(keys(coalition), ["blue", "red"]);
        for key in PLACEHOLDER_KEYS {
            assert!(tables.mission.get(key).is_some_and(Value::is_empty_table));
        }
    }

    #[test]
    fn test_scenario_reexport() {
        let mut mission = Mission::new();
        mission.sortie.set("Hello").unwrap();
        mission
            .add_coalition(Coalition::new("blue"))
            .unwrap()
            .add_country(Country::new(2, "USA"));

        let tables = mission.export_tables();
        let blue = table(table(tables.mission.get("coalition")).get("blue"));
        let usa = table(table(blue.get("country")).get(1));
        assert_eq!(usa.get("id"), Some(&Value::Int(2)));
        assert_eq!(keys(usa), ["id", "name"]);
        assert_eq!(
            tables.dictionary.get(mission.sortie.id()),
            Some(&Value::from("Hello"))
        );
    }

    #[test]
    fn test_builder_mission_round_trips() {
        let mut mission = Mission::new();
        mission.theatre = String::from("PersianGulf");
        mission.weather.wind.at_2000 = WindLayer { speed: 6.0, dir: 270.0 };
        mission.weather.extra.insert("dust_density", 0);

        let group_name = mission.create_string("GroupName", "Viper 1");
        let unit_name = mission.create_string("UnitName", "Viper 1-1");
        let wp_name = mission.create_string("WptName", "IP");
        let armor_name = mission.create_string("GroupName", "Armor");
        let tank_name = mission.create_string("UnitName", "Armor-1");

        let blue = mission.add_coalition(Coalition::new("blue")).unwrap();
        let mut bullseye = Table::new();
        bullseye.insert("x", 1234.5);
        bullseye.insert("y", -99.25);
        blue.bullseye = Some(bullseye);
        let usa = blue.add_country(Country::new(2, "USA"));

        let flight = usa.add_plane_group(Group::plane(1, group_name, "CAP")).unwrap();
        let plane = flight
            .add_unit(Unit::plane(1, unit_name, "F-16C_50").at(Position::new(10.5, 20.25)))
            .unwrap();
        if let Some(data) = plane.as_plane_mut() {
            data.alt = 6000.0;
            data.speed = 220.5;
            data.payload.ammo_type = Some(1);
            data.payload.pylons.insert(4, Pylon::new("{AIM-120C}"));
            data.callsign = Callsign::Numeric(101);
        }
        let mut point = Point::new(Position::new(1.0, 2.0)).with_action(PointAction::TurningPoint);
        point.name = wp_name;
        flight.add_point(point);

        let armor = usa
            .add_vehicle_group(Group::vehicle(2, armor_name, "Ground Nothing"))
            .unwrap();
        armor.add_unit(Unit::vehicle(2, tank_name, "M-1 Abrams")).unwrap();
        armor.add_span(Position::new(3.0, 4.0));
        if let GroupKind::Vehicle { radio, .. } = &mut armor.kind {
            *radio = None;
        }

        mission
            .add_coalition(Coalition::new("red"))
            .unwrap()
            .add_country(Country::new(0, "Russia"));

        let back = Mission::import_tables(&mission.export_tables(), ImportOptions::strict())
            .unwrap();
        assert_eq!(back, mission);
        assert_eq!(
            back.country_by_name("USA").unwrap().groups(GroupCategory::Plane)[0].units()[0]
                .name
                .text()
                .unwrap(),
            "Viper 1-1"
        );
    }

    #[test]
    fn test_other_language_strings_are_reported() {
        let mission = Mission::new();
        mission.sortie.set("Hello").unwrap();
        mission
            .translation()
            .set_string(mission.sortie.id(), "Privet", "RU");

        let tables = mission.export_tables();
        assert_eq!(tables.other_languages, ["RU"]);
        assert!(tables.dictionary.get(mission.sortie.id()).is_some());

        let back = Mission::import_tables(&tables, ImportOptions::default()).unwrap();
        let paths: Vec<&str> = back.unsupported().iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, ["l10n/RU/dictionary"]);
        assert_eq!(back.sortie.text().unwrap(), "Hello");
    }

    #[test]
    fn test_plane_radio_round_trips() {
        let mut mission = Mission::new();
        let group_name = mission.create_string("GroupName", "Uzi 1");
        let usa = mission
            .add_coalition(Coalition::new("blue"))
            .unwrap()
            .add_country(Country::new(2, "USA"));
        let flight = usa.add_plane_group(Group::plane(1, group_name, "CAP")).unwrap();
        if let GroupKind::Plane { radio, .. } = &mut flight.kind {
            radio.frequency = 305.5;
            radio.communication = false;
        }

        let tables = mission.export_tables();
        let back = Mission::import_tables(&tables, ImportOptions::strict()).unwrap();
        let group = &back.country_by_name("USA").unwrap().groups(GroupCategory::Plane)[0];
        assert_eq!(
            group.radio(),
            Some(&Radio {
                frequency: 305.5,
                modulation: 0,
                communication: false,
            })
        );
        assert_eq!(back, mission);
    }
}
