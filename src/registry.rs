use indexmap::IndexMap;

use crate::definition::ConcreteDefinition;

/// Insertion-ordered store of concrete definitions keyed by name.
///
/// Owned by whoever runs an expansion; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    entries: IndexMap<String, ConcreteDefinition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: IndexMap::with_capacity(capacity) }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ConcreteDefinition> {
        self.entries.get(name)
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn set(&mut self, definition: ConcreteDefinition) {
        self.entries.insert(definition.name.clone(), definition);
    }

    /// First wins: returns `false` and drops `definition` if the name is taken.
    pub fn insert_if_absent(&mut self, definition: ConcreteDefinition) -> bool {
        if self.entries.contains_key(&definition.name) {
            return false;
        }
        self.entries.insert(definition.name.clone(), definition);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_definitions(self) -> Vec<ConcreteDefinition> {
        self.entries.into_values().collect()
    }
}
