//! Coalitions and countries

use super::group::{Group, GroupCategory};
use crate::error::{Error, Result};
use crate::formats::lua::Table;

/// Coalition names, in the order the editor lists them.
pub const COALITION_NAMES: [&str; 3] = ["blue", "red", "neutral"];

/// A faction within a coalition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Country {
    pub id: i64,
    pub name: String,
    vehicle_groups: Vec<Group>,
    plane_groups: Vec<Group>,
    static_groups: Vec<Group>,
}

impl Country {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Groups of one category, in order.
    #[must_use]
    pub fn groups(&self, category: GroupCategory) -> &[Group] {
        match category {
            GroupCategory::Vehicle => &self.vehicle_groups,
            GroupCategory::Plane => &self.plane_groups,
            GroupCategory::Static => &self.static_groups,
        }
    }

    pub fn groups_mut(&mut self, category: GroupCategory) -> &mut [Group] {
        self.list_mut(category)
    }

    fn list_mut(&mut self, category: GroupCategory) -> &mut Vec<Group> {
        match category {
            GroupCategory::Vehicle => &mut self.vehicle_groups,
            GroupCategory::Plane => &mut self.plane_groups,
            GroupCategory::Static => &mut self.static_groups,
        }
    }

    /// Every group of every category.
    pub fn all_groups(&self) -> impl Iterator<Item = &Group> {
        GroupCategory::ALL
            .into_iter()
            .flat_map(|category| self.groups(category))
    }

    pub fn all_groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.vehicle_groups
            .iter_mut()
            .chain(self.plane_groups.iter_mut())
            .chain(self.static_groups.iter_mut())
    }

    /// Append a group to the list matching its kind.
    pub fn add_group(&mut self, group: Group) -> &mut Group {
        let groups = self.list_mut(group.category());
        groups.push(group);
        let last = groups.len() - 1;
        &mut groups[last]
    }

    /// # Errors
    /// Returns [`Error::KindMismatch`] unless `group` is a vehicle group.
    pub fn add_vehicle_group(&mut self, group: Group) -> Result<&mut Group> {
        self.add_group_of(GroupCategory::Vehicle, group)
    }

    /// # Errors
    /// Returns [`Error::KindMismatch`] unless `group` is a plane group.
    pub fn add_plane_group(&mut self, group: Group) -> Result<&mut Group> {
        self.add_group_of(GroupCategory::Plane, group)
    }

    /// # Errors
    /// Returns [`Error::KindMismatch`] unless `group` is a static group.
    pub fn add_static_group(&mut self, group: Group) -> Result<&mut Group> {
        self.add_group_of(GroupCategory::Static, group)
    }

    fn add_group_of(&mut self, expected: GroupCategory, group: Group) -> Result<&mut Group> {
        let found = group.category();
        if found != expected {
            return Err(Error::KindMismatch {
                expected: expected.key(),
                found: found.key(),
            });
        }
        Ok(self.add_group(group))
    }

    /// Find a group by id across all categories.
    #[must_use]
    pub fn group_by_id(&self, id: i64) -> Option<&Group> {
        self.all_groups().find(|group| group.id == id)
    }

    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.all_groups().map(|group| group.units().len()).sum()
    }
}

/// One of the blue, red or neutral alliances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coalition {
    pub name: String,
    /// Bullseye reference point, carried through untouched.
    pub bullseye: Option<Table>,
    /// Navigation points, carried through untouched.
    pub nav_points: Table,
    countries: Vec<Country>,
}

impl Coalition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn countries_mut(&mut self) -> &mut [Country] {
        &mut self.countries
    }

    /// Append a country.
    pub fn add_country(&mut self, country: Country) -> &mut Country {
        self.countries.push(country);
        let last = self.countries.len() - 1;
        &mut self.countries[last]
    }

    /// Remove the first country named `name` and return it.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no country has that name.
    pub fn remove_country(&mut self, name: &str) -> Result<Country> {
        let index = self
            .countries
            .iter()
            .position(|country| country.name == name)
            .ok_or_else(|| Error::NotFound {
                what: "country",
                name: name.to_string(),
            })?;
        Ok(self.countries.remove(index))
    }

    #[must_use]
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.name == name)
    }

    pub fn country_mut(&mut self, name: &str) -> Option<&mut Country> {
        self.countries.iter_mut().find(|country| country.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::translation::LocalizedString;

    #[test]
    fn test_remove_country_by_name() {
        let mut coalition = Coalition::new("blue");
        coalition.add_country(Country::new(2, "USA"));
        coalition.add_country(Country::new(16, "Georgia"));
        coalition.add_country(Country::new(2, "USA"));

        let removed = coalition.remove_country("Georgia").unwrap();
        assert_eq!(removed.id, 16);
        let names: Vec<&str> = coalition.countries().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["USA", "USA"]);

        assert!(coalition.remove_country("USA").is_ok());
        assert_eq!(coalition.countries().len(), 1);
    }

    #[test]
    fn test_remove_missing_country_fails() {
        let mut coalition = Coalition::new("red");
        coalition.add_country(Country::new(0, "Russia"));
        let err = coalition.remove_country("Ukraine").unwrap_err();
        assert!(matches!(err, Error::NotFound { what: "country", ref name } if name == "Ukraine"));
        assert_eq!(coalition.countries().len(), 1);
    }

    #[test]
    fn test_groups_are_categorized() {
        let mut country = Country::new(2, "USA");
        let name = LocalizedString::default();
        country.add_vehicle_group(Group::vehicle(1, name.clone(), "Ground Nothing")).unwrap();
        country.add_plane_group(Group::plane(2, name.clone(), "CAP")).unwrap();
        country.add_group(Group::static_group(3, name.clone()));

        assert_eq!(country.groups(GroupCategory::Vehicle).len(), 1);
        assert_eq!(country.groups(GroupCategory::Plane)[0].id, 2);
        assert_eq!(country.group_by_id(3).map(Group::category), Some(GroupCategory::Static));

        let err = country.add_static_group(Group::vehicle(4, name, "x")).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { expected: "static", found: "vehicle" }));
    }
}
