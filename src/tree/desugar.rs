// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapping desugaring.
//!
//! A mapping arrives as two parallel node lists (`keys`, `values`). Desugaring zips them into
//! one field per entry, `"{index}_key"`, holding the key node with the value node attached under
//! the entry field. Afterwards a mapping is traversed like any other node: field by field.
//!
//! Keys that already hold a scalar under the entry field (`Constant { value: "a" }`) keep it
//! under the displaced field, so the key still has something to be labelled by.

use std::fmt;

use smol_str::SmolStr;

use crate::config::ConfigError;
use crate::model::{FieldValue, TaggedNode, TypeTag};

/// Field carrying the entry name as a [`FieldValue::Marker`] on every desugared key node.
pub const ENTRY_MARKER_FIELD: &str = "entry";

#[derive(Debug, Clone)]
pub struct MappingDesugarer {
    keys_field: SmolStr,
    values_field: SmolStr,
    entry_field: SmolStr,
    displaced_field: SmolStr,
}

impl Default for MappingDesugarer {
    fn default() -> Self {
        Self {
            keys_field: SmolStr::new_static("keys"),
            values_field: SmolStr::new_static("values"),
            entry_field: SmolStr::new_static("value"),
            displaced_field: SmolStr::new_static("key"),
        }
    }
}

impl MappingDesugarer {
    pub fn new(
        keys_field: &str,
        values_field: &str,
        entry_field: &str,
        displaced_field: &str,
    ) -> Result<Self, ConfigError> {
        let fields = [keys_field, values_field, entry_field, displaced_field];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ConfigError::EmptyName { list: "mapping fields" });
        }
        for (idx, field) in fields.iter().enumerate() {
            if fields[idx + 1..].contains(field) || *field == ENTRY_MARKER_FIELD {
                return Err(ConfigError::DuplicateMappingFields { field: (*field).to_owned() });
            }
        }
        Ok(Self {
            keys_field: SmolStr::new(keys_field),
            values_field: SmolStr::new(values_field),
            entry_field: SmolStr::new(entry_field),
            displaced_field: SmolStr::new(displaced_field),
        })
    }

    /// Zips the key/value lists of a mapping node into per-entry fields.
    ///
    /// Entries keep their original order and are appended after the node's remaining fields.
    /// A node carrying neither list is returned unchanged, which makes the pass idempotent.
    pub fn desugar(&self, node: TaggedNode) -> Result<TaggedNode, DesugarError> {
        let keys_len = self.list_len(&node, &self.keys_field)?;
        let values_len = self.list_len(&node, &self.values_field)?;
        let (keys_len, values_len) = match (keys_len, values_len) {
            (None, None) => return Ok(node),
            (Some(keys), Some(values)) => (keys, values),
            (Some(_), None) => return Err(self.missing(&node, &self.values_field)),
            (None, Some(_)) => return Err(self.missing(&node, &self.keys_field)),
        };
        if keys_len != values_len {
            return Err(DesugarError::LengthMismatch {
                type_tag: node.type_tag().clone(),
                keys: keys_len,
                values: values_len,
            });
        }

        let (type_tag, fields) = node.into_parts();
        let mut out = TaggedNode::new(type_tag);
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for (name, value) in fields {
            match value {
                FieldValue::NodeList(nodes) if name == self.keys_field => keys = nodes,
                FieldValue::NodeList(nodes) if name == self.values_field => values = nodes,
                value => {
                    out.insert_field(name, value);
                }
            }
        }

        let mut index_buf = itoa::Buffer::new();
        for (index, (mut key, value)) in keys.into_iter().zip(values).enumerate() {
            let mut entry = String::with_capacity(8);
            entry.push_str(index_buf.format(index));
            entry.push_str("_key");
            let entry = SmolStr::from(entry);

            if let Some(FieldValue::Scalar(own)) = key.insert_field(self.entry_field.clone(), value)
            {
                if !own.is_null() {
                    key.insert_field(self.displaced_field.clone(), own);
                }
            }
            key.insert_field(ENTRY_MARKER_FIELD, FieldValue::Marker(entry.clone()));
            out.insert_field(entry, key);
        }
        Ok(out)
    }

    fn list_len(&self, node: &TaggedNode, field: &SmolStr) -> Result<Option<usize>, DesugarError> {
        match node.field(field) {
            Some(FieldValue::NodeList(nodes)) => Ok(Some(nodes.len())),
            Some(other) => Err(DesugarError::NotAList {
                type_tag: node.type_tag().clone(),
                field: field.clone(),
                found: other.kind_name(),
            }),
            None => Ok(None),
        }
    }

    fn missing(&self, node: &TaggedNode, field: &SmolStr) -> DesugarError {
        DesugarError::MissingField {
            type_tag: node.type_tag().clone(),
            field: field.clone(),
        }
    }
}

/// Desugars with the default `keys`/`values`/`value`/`key` field names.
pub fn desugar_mapping(node: TaggedNode) -> Result<TaggedNode, DesugarError> {
    MappingDesugarer::default().desugar(node)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesugarError {
    MissingField {
        type_tag: TypeTag,
        field: SmolStr,
    },
    NotAList {
        type_tag: TypeTag,
        field: SmolStr,
        found: &'static str,
    },
    LengthMismatch {
        type_tag: TypeTag,
        keys: usize,
        values: usize,
    },
}

impl DesugarError {
    pub fn type_tag(&self) -> &TypeTag {
        match self {
            Self::MissingField { type_tag, .. }
            | Self::NotAList { type_tag, .. }
            | Self::LengthMismatch { type_tag, .. } => type_tag,
        }
    }
}

impl fmt::Display for DesugarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { type_tag, field } => {
                write!(f, "{type_tag} mapping is missing its '{field}' list")
            }
            Self::NotAList {
                type_tag,
                field,
                found,
            } => write!(f, "{type_tag} mapping field '{field}' must be a node list, found {found}"),
            Self::LengthMismatch {
                type_tag,
                keys,
                values,
            } => write!(
                f,
                "{type_tag} mapping has {keys} keys but {values} values"
            ),
        }
    }
}

impl std::error::Error for DesugarError {}
