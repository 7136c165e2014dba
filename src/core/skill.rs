//! Skill vocabulary

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A skill definition.
///
/// Identity is the `id` alone: two records with the same id are the same
/// skill no matter how their name or description drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill ID
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

impl Skill {
    /// Create a new skill with the given ID and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the vocabulary entry for a free-text keyword.
    ///
    /// The id is the normalized keyword; the name keeps the keyword as written.
    pub fn from_keyword(keyword: &str) -> Self {
        Self::new(normalize_keyword(keyword), keyword.trim())
    }
}

impl PartialEq for Skill {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Skill {}

impl Hash for Skill {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Normalize a free-text keyword into a skill id: trimmed, inner whitespace
/// collapsed, lower-cased.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lookup table from skill id to its vocabulary entry.
#[derive(Debug, Clone, Default)]
pub struct SkillVocabulary {
    skills: HashMap<String, Skill>,
}

impl SkillVocabulary {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self {
            skills: skills
                .into_iter()
                .map(|skill| (skill.id.clone(), skill))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
