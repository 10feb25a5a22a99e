//! Families and platforms - the nodes of the classification graph.
//!
//! A [`Family`] is a named classification ("unix", "linux"); a [`Platform`]
//! is a concrete target kind ("ubuntu"). Both are owned by a
//! [`Registry`](crate::core::Registry) and referred to by typed ids.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Detected platform attributes (`name`, `release`, `arch`, ...).
pub type Attributes = BTreeMap<String, Value>;

/// Opaque predicate attached to an entity or membership.
///
/// The core never interprets conditions; they are carried for
/// backend-specific matching logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(BTreeMap<String, Value>);

impl Condition {
    /// Create an empty condition.
    pub fn new() -> Self {
        Condition(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl Deref for Condition {
    type Target = BTreeMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Condition {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(String, Value)> for Condition {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Condition(iter.into_iter().collect())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Handle to a platform in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(pub(crate) NodeIndex);

/// Handle to a family in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FamilyId(pub(crate) NodeIndex);

/// Handle to either kind of entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Platform(PlatformId),
    Family(FamilyId),
}

impl EntityId {
    pub(crate) fn node(self) -> NodeIndex {
        match self {
            EntityId::Platform(id) => id.0,
            EntityId::Family(id) => id.0,
        }
    }

    /// The kind of entity this id refers to.
    pub fn kind(self) -> EntityKind {
        match self {
            EntityId::Platform(_) => EntityKind::Platform,
            EntityId::Family(_) => EntityKind::Family,
        }
    }
}

impl From<PlatformId> for EntityId {
    fn from(id: PlatformId) -> Self {
        EntityId::Platform(id)
    }
}

impl From<FamilyId> for EntityId {
    fn from(id: FamilyId) -> Self {
        EntityId::Family(id)
    }
}

/// Entity kind, used as the label in hierarchy listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Platform,
    Family,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Platform => write!(f, "Platform"),
            EntityKind::Family => write!(f, "Family"),
        }
    }
}

/// A named classification grouping platforms and other families.
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    name: String,
    title: String,
    pub(crate) condition: Condition,
}

impl Family {
    pub(crate) fn new(name: &str, condition: Condition) -> Self {
        Family {
            name: name.to_string(),
            title: format!("{} Family", capitalize(name)),
            condition,
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title, `"<Name> Family"` unless overridden.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Override the display title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Current condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

/// A concrete target kind.
///
/// Besides its registry identity, a platform carries the attributes that
/// detection logic fills in, and the family hierarchy computed by the last
/// capability projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    name: String,
    title: Option<String>,
    pub(crate) condition: Condition,
    attributes: Attributes,
    pub(crate) family_hierarchy: Vec<String>,
    pub(crate) capabilities: BTreeMap<String, bool>,
    /// Set by the first projection; the registry keeps projected
    /// platforms current as the family graph changes
    pub(crate) projected: bool,
}

impl Platform {
    pub(crate) fn new(name: &str, condition: Condition) -> Self {
        Platform {
            name: name.to_string(),
            title: None,
            condition,
            attributes: Attributes::new(),
            family_hierarchy: Vec::new(),
            capabilities: BTreeMap::new(),
            projected: false,
        }
    }

    /// Registry name. Unaffected by a detected `name` attribute.
    pub fn registry_name(&self) -> &str {
        &self.name
    }

    /// Effective name: the detected `name` attribute, else the registry name.
    pub fn name(&self) -> &str {
        self.attribute_str("name").unwrap_or(&self.name)
    }

    /// Display title: explicit title, detected `title` attribute, or the
    /// capitalized registry name.
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match self.attribute_str("title") {
            Some(title) => title.to_string(),
            None => capitalize(&self.name),
        }
    }

    /// Override the display title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Current condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Name normalized for use as an identifier: lowercase, spaces become
    /// `_`, anything else outside `[a-z0-9_]` is dropped.
    ///
    /// Computed from [`name`](Self::name) on every call.
    pub fn clean_name(&self) -> String {
        self.name()
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('_'),
                'a'..='z' | '0'..='9' | '_' => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Detected family, falling back to the nearest projected ancestor.
    pub fn family(&self) -> Option<&str> {
        self.attribute_str("family")
            .or_else(|| self.family_hierarchy.first().map(String::as_str))
    }

    /// Detected release.
    pub fn release(&self) -> Option<&str> {
        self.attribute_str("release")
    }

    /// Detected architecture.
    pub fn arch(&self) -> Option<&str> {
        self.attribute_str("arch")
    }

    /// Look up an attribute as it is right now.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// All attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutable access for detection logic.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Set one attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Projected ancestor families, nearest first.
    pub fn family_hierarchy(&self) -> &[String] {
        &self.family_hierarchy
    }

    /// Whether the platform belongs (transitively) to `family`.
    ///
    /// Answers from the projected hierarchy, which the registry keeps in
    /// step with the family graph; a platform that was never projected
    /// belongs to no family.
    pub fn has_family(&self, family: &str) -> bool {
        self.family_hierarchy.iter().any(|f| f == family)
    }

    /// Projected capability flags, one per family in the registry.
    pub fn capabilities(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.capabilities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Shorthand for `has_family("windows")`.
    pub fn is_windows(&self) -> bool {
        self.has_family("windows")
    }

    /// Shorthand for `has_family("unix")`.
    pub fn is_unix(&self) -> bool {
        self.has_family("unix")
    }

    /// Attributes as a map, for serialization.
    pub fn to_map(&self) -> Attributes {
        self.attributes.clone()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
