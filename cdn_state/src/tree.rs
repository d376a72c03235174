//! Aggregation tree used while extracting: groups hold blocks, blocks hold
//! their content.
//!
//! The tree keeps insertion order while it is being built so log output
//! follows field declaration order. [`Parents::dump`] renders the grouped
//! shape the state store expects: `{group: {block: Set([content])}}`.

use crate::value::{Map, Value};

/// One block inside a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    content: Option<Value>,
}

impl Field {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            content: None,
        }
    }

    /// Block key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content attached so far, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    /// Attaches content to the block. The first content wins; later calls
    /// return `false` and leave the block unchanged.
    pub fn set_content(&mut self, content: Value) -> bool {
        if self.content.is_some() {
            return false;
        }
        self.content = Some(content);
        true
    }
}

/// A group of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Parent {
    name: String,
    fields: Vec<Field>,
}

impl Parent {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            fields: Vec::new(),
        }
    }

    /// Group key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Adds a block named `name`.
    ///
    /// Returns `None` when the group already holds a block with that name;
    /// the existing block is kept.
    pub fn get_or_create_field(&mut self, name: &str) -> Option<&mut Field> {
        if self.fields.iter().any(|field| field.name == name) {
            return None;
        }
        self.fields.push(Field::new(name));
        self.fields.last_mut()
    }

    fn dump(&self) -> Map {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .content
                    .clone()
                    .map(|content| (field.name.clone(), Value::set_of_one(content)))
            })
            .collect()
    }
}

/// Root of the aggregation tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parents {
    groups: Vec<Parent>,
}

impl Parents {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Groups in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[Parent] {
        &self.groups
    }

    /// Returns the group named `name`, creating it on first use.
    #[expect(
        clippy::indexing_slicing,
        reason = "index is either an existing position or the slot just pushed"
    )]
    pub fn get_or_create_parent(&mut self, name: &str) -> &mut Parent {
        let position = self.groups.iter().position(|parent| parent.name == name);
        let index = position.unwrap_or_else(|| {
            self.groups.push(Parent::new(name));
            self.groups.len() - 1
        });
        &mut self.groups[index]
    }

    /// Renders the tree as the external grouped map.
    ///
    /// Blocks without content and groups without blocks are omitted.
    #[must_use]
    pub fn dump(&self) -> Map {
        self.groups
            .iter()
            .filter_map(|parent| {
                let blocks = parent.dump();
                (!blocks.is_empty()).then(|| (parent.name.clone(), Value::Record(blocks)))
            })
            .collect()
    }
}
