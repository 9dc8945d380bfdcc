// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smol_str::SmolStr;

use super::ids::TypeTag;

/// A terminal value carried by a field. Scalars never expand into graph nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Bytes(Vec<u8>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
            Self::Bytes(value) => f.write_str(&String::from_utf8_lossy(value)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The value stored under one field name of a [`TaggedNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Scalar),
    Node(TaggedNode),
    /// Equal-depth siblings sharing one field name, kept in source order.
    NodeList(Vec<TaggedNode>),
    /// Structural bookkeeping inserted by normalization passes; never drawn.
    Marker(SmolStr),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&TaggedNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_list(&self) -> Option<&[TaggedNode]> {
        match self {
            Self::NodeList(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Node(_) => "node",
            Self::NodeList(_) => "node list",
            Self::Marker(_) => "marker",
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<TaggedNode> for FieldValue {
    fn from(value: TaggedNode) -> Self {
        Self::Node(value)
    }
}

impl From<Vec<TaggedNode>> for FieldValue {
    fn from(value: Vec<TaggedNode>) -> Self {
        Self::NodeList(value)
    }
}

/// The canonical unit of the data model: a type tag plus ordered, uniquely named fields.
///
/// Field order reflects source order and is preserved by every operation in this crate.
/// Inserting an existing field name replaces the value in place instead of moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedNode {
    type_tag: TypeTag,
    fields: Vec<(SmolStr, FieldValue)>,
}

impl TaggedNode {
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<SmolStr>, value: impl Into<FieldValue>) -> Self {
        self.insert_field(name, value);
        self
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn fields(&self) -> impl DoubleEndedIterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(field, _)| field == name).map(|(_, value)| value)
    }

    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.field(name).and_then(FieldValue::as_scalar)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn insert_field(
        &mut self,
        name: impl Into<SmolStr>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn into_parts(self) -> (TypeTag, Vec<(SmolStr, FieldValue)>) {
        (self.type_tag, self.fields)
    }

    pub fn from_parts(type_tag: TypeTag, fields: Vec<(SmolStr, FieldValue)>) -> Self {
        let mut node = Self::new(type_tag);
        for (name, value) in fields {
            node.insert_field(name, value);
        }
        node
    }
}
