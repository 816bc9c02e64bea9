use mizkit::prelude::*;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::tempdir;

fn scenario_tables() -> MizTables {
    let mut usa = Table::new();
    usa.insert("id", 2);
    usa.insert("name", "USA");

    let mut blue = Table::new();
    blue.insert("name", "blue");
    blue.insert("country", Table::sequence([Value::from(usa)]));

    let mut coalition = Table::new();
    coalition.insert("blue", blue);

    let mut tables = MizTables::default();
    tables.mission.insert("version", 9);
    tables.mission.insert("sortie", "DictKey_1");
    tables.mission.insert("coalition", coalition);
    tables.dictionary.insert("DictKey_1", "Hello");
    tables
}

fn write_scenario(path: &Path) {
    write_miz(path, &scenario_tables()).unwrap();
}

#[test]
fn test_scenario_loads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.miz");
    write_scenario(&path);

    let mission = Mission::load_file(&path, ImportOptions::strict()).unwrap();
    assert_eq!(mission.version, 9);
    assert_eq!(mission.sortie.text().unwrap(), "Hello");

    let blue = mission.coalition("blue").unwrap();
    assert_eq!(blue.countries().len(), 1);
    assert_eq!(blue.countries()[0].id, 2);
    assert_eq!(blue.countries()[0].name, "USA");
    assert!(mission.coalition("red").is_none());
    assert!(mission.unsupported().is_empty());
}

#[test]
fn test_scenario_resave_keeps_structure() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.miz");
    let destination = dir.path().join("destination.miz");
    write_scenario(&source);

    let mission = Mission::load_file(&source, ImportOptions::default()).unwrap();
    mission.save(&destination).unwrap();

    let tables = read_miz(&destination).unwrap();
    let usa = tables
        .mission
        .get("coalition")
        .and_then(Value::as_table)
        .and_then(|c| c.get("blue"))
        .and_then(Value::as_table)
        .and_then(|b| b.get("country"))
        .and_then(Value::as_table)
        .and_then(|c| c.get(1))
        .and_then(Value::as_table)
        .unwrap();
    assert_eq!(usa.get("id"), Some(&Value::Int(2)));
    for key in ["vehicle", "plane", "static"] {
        assert!(!usa.contains_key(key), "unexpected {key} key");
    }
    assert_eq!(tables.dictionary.get("DictKey_1"), Some(&Value::from("Hello")));

    let reloaded = Mission::load_file(&destination, ImportOptions::strict()).unwrap();
    assert_eq!(reloaded, mission);
}

#[test]
fn test_missing_version_fails_import() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.miz");
    let mut tables = scenario_tables();
    tables.mission.remove("version");
    write_miz(&path, &tables).unwrap();

    let err = Mission::load_file(&path, ImportOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::StructuralMismatch { ref path, .. } if path == "mission.version"
    ));
}

#[test]
fn test_strings_alias_through_the_mission() {
    let mission = Mission::import_tables(&scenario_tables(), ImportOptions::default()).unwrap();
    let other = mission.get_string("DictKey_1");

    other.set("Goodbye").unwrap();
    assert_eq!(mission.sortie.text().unwrap(), "Goodbye");
    assert_eq!(mission.export_tables().dictionary.get("DictKey_1"), Some(&Value::from("Goodbye")));
}

#[test]
fn test_edited_mission_survives_disk_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("edited.miz");

    let mut mission = Mission::new();
    let group_name = mission.create_string("GroupName", "Armor");
    let unit_name = mission.create_string("UnitName", "Armor-1");
    let wp_name = mission.create_string("WptName", "");

    let usa = mission
        .add_coalition(Coalition::new("blue"))
        .unwrap()
        .add_country(Country::new(2, "USA"));
    let group = usa
        .add_vehicle_group(Group::vehicle(1, group_name, "Ground Nothing"))
        .unwrap();
    group
        .add_unit(
            Unit::vehicle(1, unit_name, "M-1 Abrams")
                .at(Position::new(-281_000.5, 647_000.25))
                .with_heading(1.5)
                .with_skill(Skill::Excellent),
        )
        .unwrap();
    let mut point = Point::new(Position::new(-281_000.5, 647_000.25)).with_speed(5.5);
    point.name = wp_name;
    group.add_point(point);

    mission.save(&path).unwrap();
    let back = Mission::load_file(&path, ImportOptions::strict()).unwrap();
    assert_eq!(back, mission);

    let (groups, units) = back.counts();
    assert_eq!((groups, units), (1, 1));
    let usa = back.country_by_name("USA").unwrap();
    let group = &usa.groups(GroupCategory::Vehicle)[0];
    assert_eq!(group.name.text().unwrap(), "Armor");
    assert_eq!(group.position(), Some(Position::new(-281_000.5, 647_000.25)));
    assert_eq!(group.units()[0].name.text().unwrap(), "Armor-1");
}

#[test]
fn test_save_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mission.miz");
    write_scenario(&path);

    let mut mission = Mission::load_file(&path, ImportOptions::default()).unwrap();
    mission.theatre = String::from("Nevada");
    mission.save(&path).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let back = Mission::load_file(&path, ImportOptions::default()).unwrap();
    assert_eq!(back.theatre, "Nevada");
}

#[test]
fn test_dump_text_decodes_again() {
    let tables = scenario_tables();
    let text = mizkit::formats::lua::encode_table(&tables.mission, "mission");
    assert!(text.starts_with("mission = "));
    let back = mizkit::formats::lua::decode(&text).unwrap();
    assert_eq!(back.get("mission"), Some(&Value::from(tables.mission)));
}
