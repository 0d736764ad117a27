use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::{BlockKind, PARAGRAPH_KIND};
use crate::error::RegistryError;

/// One selectable block kind, as listed by the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSpec {
    pub id: String,
    pub tag: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl KindSpec {
    pub fn new(id: impl Into<String>, tag: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            title: title.into(),
            description: String::new(),
            icon: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn kind(&self) -> BlockKind {
        BlockKind::new(self.id.clone(), self.tag.clone())
    }
}

/// Ordered kind registry. Entries are addressed by their 1-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KindRegistry {
    kinds: Vec<KindSpec>,
}

impl KindRegistry {
    pub fn new(kinds: impl IntoIterator<Item = KindSpec>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for spec in kinds {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    pub fn standard() -> Self {
        Self::new([
            KindSpec::new("heading", "h1", "Heading 1")
                .description("Shortcut: type # + space")
                .icon("bx-text"),
            KindSpec::new("expandable-heading", "h2", "Expandable Heading 1")
                .description("Shortcut: type >># + space")
                .icon("bx-text"),
        ])
        .expect("standard registry must be valid")
    }

    pub fn from_json_str(s: &str) -> Result<Self, RegistryError> {
        let kinds: Vec<KindSpec> = serde_json::from_str(s)?;
        Self::new(kinds)
    }

    pub fn register(&mut self, spec: KindSpec) -> Result<(), RegistryError> {
        if spec.id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if spec.tag.trim().is_empty() {
            return Err(RegistryError::EmptyTag { id: spec.id });
        }
        if spec.id == PARAGRAPH_KIND {
            return Err(RegistryError::Reserved(spec.id));
        }
        let seen: HashSet<&str> = self.kinds.iter().map(|k| k.id.as_str()).collect();
        if seen.contains(spec.id.as_str()) {
            return Err(RegistryError::DuplicateKind(spec.id));
        }
        self.kinds.push(spec);
        Ok(())
    }

    pub fn kinds(&self) -> &[KindSpec] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Looks up an entry by its 1-based position.
    pub fn resolve(&self, index: usize) -> Option<&KindSpec> {
        index.checked_sub(1).and_then(|ix| self.kinds.get(ix))
    }

    pub fn get(&self, id: &str) -> Option<&KindSpec> {
        self.kinds.iter().find(|k| k.id == id)
    }
}
