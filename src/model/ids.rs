// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;

/// A validated, cheaply clonable string identifier.
///
/// Ids end up quoted inside exported graph documents, so besides being non-empty they must not
/// contain `"` or control characters. Anything else (including `-` from UUIDs) is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id(value)?;
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value.into()
    }

    // Callers guarantee `value` already satisfies `validate_id`.
    pub(crate) fn from_trusted(value: SmolStr) -> Self {
        debug_assert!(validate_id(&value).is_ok());
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> TryFrom<&str> for Id<T> {
    type Error = IdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsQuote,
    ContainsControl { ch: char },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsQuote => f.write_str("id must not contain '\"'"),
            Self::ContainsControl { ch } => {
                write!(f, "id must not contain control character {ch:?}")
            }
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('"') {
        return Err(IdError::ContainsQuote);
    }
    if let Some(ch) = value.chars().find(|c| c.is_control()) {
        return Err(IdError::ContainsControl { ch });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTagKind {}
/// The structural category of a [`TaggedNode`](super::TaggedNode), e.g. `List` or `Dict`.
pub type TypeTag = Id<TypeTagKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdKind {}
/// Identity of one emitted graph node.
pub type NodeId = Id<NodeIdKind>;

pub const ROOT_NODE_ID: &str = "__init__";

impl Id<NodeIdKind> {
    /// The default synthetic root identity every build hangs off.
    pub fn root() -> Self {
        Self::from_trusted(SmolStr::new_static(ROOT_NODE_ID))
    }
}
