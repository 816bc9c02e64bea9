//! Mission string externalization
//!
//! Every user-visible string in a mission lives in the dictionary and is
//! referred to by id. [`Translation`] owns the dictionary; a
//! [`LocalizedString`] is a cheap handle (id + language) that resolves
//! through it. Handles sharing an id alias the same text.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::formats::lua::{Table, Value};
use crate::formats::miz::DEFAULT_LANG;

/// Prefix of dictionary ids written by the mission editor.
const DICT_KEY_PREFIX: &str = "DictKey_";

#[derive(Debug, Default, PartialEq)]
struct StringTable {
    /// language -> id -> text
    strings: BTreeMap<String, BTreeMap<String, String>>,
    max_dict_id: u64,
}

impl StringTable {
    /// Store `text`, raising `max_dict_id` past editor-style ids.
    fn insert(&mut self, id: &str, lang: &str, text: String) {
        self.strings
            .entry(lang.to_string())
            .or_default()
            .insert(id.to_string(), text);
        if let Some(n) = dict_key_number(id) {
            self.max_dict_id = self.max_dict_id.max(n);
        }
    }

    fn contains_any(&self, id: &str) -> bool {
        self.strings.values().any(|strings| strings.contains_key(id))
    }
}

/// The translation table of one mission.
///
/// Deliberately not `Clone`: the mission is its only owner, handles hold a
/// weak reference.
#[derive(Default)]
pub struct Translation {
    table: Rc<RefCell<StringTable>>,
}

impl Translation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from a decoded dictionary.
    ///
    /// `max_dict_id` starts at the highest numeric suffix among the ids.
    pub fn from_dictionary(dictionary: &Table, lang: &str) -> Result<Self> {
        let translation = Translation::new();
        for (key, value) in dictionary {
            let id = key.to_string();
            let Some(text) = value.as_str() else {
                return Err(Error::structural(
                    format!("dictionary.{id}"),
                    format!("expected string, found {}", value.type_name()),
                ));
            };
            translation.set_string(&id, text, lang);
        }
        Ok(translation)
    }

    /// Insert or overwrite a string. Visible through every existing handle.
    ///
    /// Editor-style ids (`DictKey_..._N`) raise [`Self::max_dict_id`] so later
    /// allocations never reuse `N`.
    pub fn set_string(&self, id: &str, text: impl Into<String>, lang: &str) -> String {
        self.table.borrow_mut().insert(id, lang, text.into());
        id.to_string()
    }

    /// A handle for `id`. The id does not need to exist yet.
    pub fn get_string(&self, id: &str, lang: &str) -> LocalizedString {
        LocalizedString {
            id: id.to_string(),
            lang: lang.to_string(),
            table: Rc::downgrade(&self.table),
        }
    }

    /// Store `text` under a freshly allocated `DictKey_<kind>_<n>` id.
    pub fn create_string(&self, kind: &str, text: impl Into<String>) -> LocalizedString {
        let id = self.allocate_id(kind);
        self.set_string(&id, text, DEFAULT_LANG);
        self.get_string(&id, DEFAULT_LANG)
    }

    /// Allocate the next unused dictionary id for `kind`.
    ///
    /// Skips ids already present in any language, even ones whose number
    /// was never noted.
    pub fn allocate_id(&self, kind: &str) -> String {
        let mut table = self.table.borrow_mut();
        loop {
            table.max_dict_id += 1;
            let id = format!("{DICT_KEY_PREFIX}{kind}_{}", table.max_dict_id);
            if !table.contains_any(&id) {
                return id;
            }
        }
    }

    /// Text for `id`, if present.
    pub fn text(&self, id: &str, lang: &str) -> Option<String> {
        self.table
            .borrow()
            .strings
            .get(lang)
            .and_then(|strings| strings.get(id))
            .cloned()
    }

    pub fn contains(&self, id: &str, lang: &str) -> bool {
        self.table
            .borrow()
            .strings
            .get(lang)
            .is_some_and(|strings| strings.contains_key(id))
    }

    pub fn max_dict_id(&self) -> u64 {
        self.table.borrow().max_dict_id
    }

    pub fn set_max_dict_id(&self, dict_id: u64) {
        self.table.borrow_mut().max_dict_id = dict_id;
    }

    /// Raise `max_dict_id` to at least `dict_id`.
    pub fn note_dict_id(&self, dict_id: u64) {
        let mut table = self.table.borrow_mut();
        table.max_dict_id = table.max_dict_id.max(dict_id);
    }

    /// Languages with at least one string.
    pub fn languages(&self) -> Vec<String> {
        self.table.borrow().strings.keys().cloned().collect()
    }

    /// Number of strings stored for `lang`.
    pub fn len(&self, lang: &str) -> usize {
        self.table.borrow().strings.get(lang).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().strings.values().all(BTreeMap::is_empty)
    }

    /// `(id, text)` pairs for `lang`, sorted by id.
    pub fn entries(&self, lang: &str) -> Vec<(String, String)> {
        self.table
            .borrow()
            .strings
            .get(lang)
            .map(|strings| {
                strings
                    .iter()
                    .map(|(id, text)| (id.clone(), text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The dictionary table for `lang`, ready for export.
    pub fn to_dictionary(&self, lang: &str) -> Table {
        self.entries(lang)
            .into_iter()
            .map(|(id, text)| (id.into(), Value::Str(text)))
            .collect()
    }
}

impl PartialEq for Translation {
    fn eq(&self, other: &Self) -> bool {
        *self.table.borrow() == *other.table.borrow()
    }
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("Translation")
            .field("strings", &table.strings)
            .field("max_dict_id", &table.max_dict_id)
            .finish()
    }
}

/// Numeric suffix of an editor-style id: `DictKey_sortie_5` -> 5, `DictKey_5` -> 5.
fn dict_key_number(id: &str) -> Option<u64> {
    let rest = id.strip_prefix(DICT_KEY_PREFIX)?;
    rest.rsplit('_').next()?.parse().ok()
}

/// A reference to a dictionary string.
///
/// Holds only the id, the language and a weak handle to the owning table,
/// so it never keeps text of its own.
#[derive(Clone)]
pub struct LocalizedString {
    id: String,
    lang: String,
    table: Weak<RefCell<StringTable>>,
}

/// An unset reference: empty id, DEFAULT language, no owning table.
impl Default for LocalizedString {
    fn default() -> Self {
        Self {
            id: String::new(),
            lang: DEFAULT_LANG.to_string(),
            table: Weak::new(),
        }
    }
}

impl LocalizedString {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Resolve the text.
    ///
    /// # Errors
    /// Returns [`Error::MissingTranslation`] if the id has no entry for this
    /// language, or the owning mission is gone.
    pub fn text(&self) -> Result<String> {
        self.table
            .upgrade()
            .and_then(|table| {
                table
                    .borrow()
                    .strings
                    .get(&self.lang)
                    .and_then(|strings| strings.get(&self.id))
                    .cloned()
            })
            .ok_or_else(|| self.missing())
    }

    /// Overwrite the text in the owning table, with the same id bookkeeping
    /// as [`Translation::set_string`].
    ///
    /// # Errors
    /// Returns [`Error::MissingTranslation`] if the owning mission is gone.
    pub fn set(&self, text: impl Into<String>) -> Result<()> {
        let table = self.table.upgrade().ok_or_else(|| self.missing())?;
        table.borrow_mut().insert(&self.id, &self.lang, text.into());
        Ok(())
    }

    fn missing(&self) -> Error {
        Error::MissingTranslation {
            id: self.id.clone(),
            lang: self.lang.clone(),
        }
    }
}

impl PartialEq for LocalizedString {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.lang == other.lang
    }
}

impl fmt::Debug for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.id)
    }
}
