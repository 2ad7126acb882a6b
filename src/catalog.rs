//! Reference data for the comparison page: units, weapons and skills.
//!
//! The server renders these as JSON arrays into the page. A `Catalog` is
//! built once from them and then shared read-only (`Rc<Catalog>`) with the
//! renderer, the page controller and every tooltip binding. Each collection
//! may be missing on its own; callers treat a missing collection as
//! "not initialized yet" rather than as an error.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// A hero record with base stats and trait lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Unit {
    pub name: String,
    pub hp: i32,
    pub atk: i32,
    pub spd: i32,
    pub defense: i32,
    pub res: i32,
    /// Movement category (Infantry, Armored, Cavalry, Flying).
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub weapon_type: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub superboons: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub superbanes: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub exclusive_skills: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Unit {
    /// The portrait URL, if one is set and not blank.
    pub fn portrait(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub might: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub range: Option<i32>,
    #[serde(default)]
    pub weapon_type: Option<String>,
    #[serde(default)]
    pub effective_against: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Slot the skill goes into: A, B, C, Seal, Special, X, Assist.
    #[serde(default)]
    pub skill_type: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub movement_restrictions: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub weapon_restrictions: Vec<String>,
    #[serde(default)]
    pub refinable: bool,
}

impl Skill {
    /// Whether a unit with this movement and weapon type may equip the skill.
    /// An empty restriction list allows everything; names match exactly.
    pub fn is_usable_by(&self, movement: Option<&str>, weapon_type: Option<&str>) -> bool {
        if !self.movement_restrictions.is_empty()
            && !movement.is_some_and(|m| self.movement_restrictions.iter().any(|r| r == m))
        {
            return false;
        }
        if !self.weapon_restrictions.is_empty()
            && !weapon_type.is_some_and(|w| self.weapon_restrictions.iter().any(|r| r == w))
        {
            return false;
        }
        true
    }

    pub fn is_slot(&self, slot: &str) -> bool {
        self.skill_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(slot))
    }
}

/// Lists arrive either as JSON arrays or, straight from the sqlite rows,
/// as comma-separated text. `null` means empty.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::List(items)) => items,
        Some(Raw::Csv(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    })
}

/// Records keyed by their unique name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Unit {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Weapon {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Skill {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An ordered collection with a name index. When two records share a name
/// the first one wins.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    by_name: HashMap<String, usize>,
}

impl<T: Named> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        let mut by_name = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            by_name.entry(record.name().to_string()).or_insert(i);
        }
        Self { records, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which collection a dropdown draws its descriptions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Weapon,
    Skill,
}

impl LookupKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weapon" => Some(Self::Weapon),
            "skill" => Some(Self::Skill),
            _ => None,
        }
    }
}

/// JSON payload carrying all three collections at once.
#[derive(Debug, Default, Deserialize)]
struct Bundle {
    #[serde(default)]
    units: Option<Vec<Unit>>,
    #[serde(default)]
    weapons: Option<Vec<Weapon>>,
    #[serde(default)]
    skills: Option<Vec<Skill>>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    units: Option<Collection<Unit>>,
    weapons: Option<Collection<Weapon>>,
    skills: Option<Collection<Skill>>,
}

impl Catalog {
    pub fn new(
        units: Option<Vec<Unit>>,
        weapons: Option<Vec<Weapon>>,
        skills: Option<Vec<Skill>>,
    ) -> Self {
        Self {
            units: units.map(Collection::new),
            weapons: weapons.map(Collection::new),
            skills: skills.map(Collection::new),
        }
    }

    /// Build from three JSON arrays. An empty (or whitespace) string leaves
    /// that collection absent.
    pub fn from_json(units: &str, weapons: &str, skills: &str) -> Result<Self, String> {
        Ok(Self::new(
            parse_collection(units, "units")?,
            parse_collection(weapons, "weapons")?,
            parse_collection(skills, "skills")?,
        ))
    }

    /// Build from a `{"units": [...], "weapons": [...], "skills": [...]}` object.
    pub fn from_bundle_json(json: &str) -> Result<Self, String> {
        let bundle: Bundle =
            serde_json::from_str(json).map_err(|e| format!("Invalid catalog JSON: {}", e))?;
        Ok(Self::new(bundle.units, bundle.weapons, bundle.skills))
    }

    pub fn units(&self) -> Option<&Collection<Unit>> {
        self.units.as_ref()
    }

    pub fn weapons(&self) -> Option<&Collection<Weapon>> {
        self.weapons.as_ref()
    }

    pub fn skills(&self) -> Option<&Collection<Skill>> {
        self.skills.as_ref()
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.as_ref()?.get(name)
    }

    /// Tooltips are only wired when both description sources are loaded.
    pub fn has_descriptions(&self) -> bool {
        self.weapons.is_some() && self.skills.is_some()
    }

    /// Non-empty description for a weapon or skill name.
    pub fn describe(&self, kind: LookupKind, name: &str) -> Option<&str> {
        let description = match kind {
            LookupKind::Weapon => self.weapons.as_ref()?.get(name)?.description.as_deref(),
            LookupKind::Skill => self.skills.as_ref()?.get(name)?.description.as_deref(),
        };
        description.filter(|d| !d.is_empty())
    }
}

fn parse_collection<T>(json: &str, what: &str) -> Result<Option<Vec<T>>, String>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(json)
        .map(Some)
        .map_err(|e| format!("Invalid {} JSON: {}", what, e))
}
