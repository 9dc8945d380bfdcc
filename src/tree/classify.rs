// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::config::{ConfigError, DEFAULT_EXPAND_TAGS, DEFAULT_SKIP_TAGS};
use crate::model::TaggedNode;

/// Structural category of an expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sequence,
    Mapping,
    Set,
    Pair,
    Wrapped,
    Leaf,
}

/// What the builder does with a node of a given tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Syntactic wrapper: no node is drawn, children attach to the current parent.
    Skip,
    /// Drawn as a node (after desugaring, for mappings) and its children visited.
    Expand(ShapeKind),
    /// Unrecognized: the node and its whole subtree are dropped.
    Opaque,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    classes: HashMap<SmolStr, Classification>,
}

impl Default for Classifier {
    fn default() -> Self {
        let skip = DEFAULT_SKIP_TAGS.iter().map(|tag| (*tag, Classification::Skip));
        let expand =
            DEFAULT_EXPAND_TAGS.iter().map(|(tag, kind)| (*tag, Classification::Expand(*kind)));
        Self {
            classes: skip
                .chain(expand)
                .map(|(tag, class)| (SmolStr::new_static(tag), class))
                .collect(),
        }
    }
}

impl Classifier {
    pub fn new(
        skip_tags: &[String],
        expand_tags: &BTreeMap<String, ShapeKind>,
    ) -> Result<Self, ConfigError> {
        let mut classes = HashMap::with_capacity(skip_tags.len() + expand_tags.len());
        for tag in skip_tags {
            if tag.is_empty() {
                return Err(ConfigError::EmptyName { list: "skip_tags" });
            }
            classes.insert(SmolStr::new(tag), Classification::Skip);
        }
        for (tag, kind) in expand_tags {
            if tag.is_empty() {
                return Err(ConfigError::EmptyName { list: "expand_tags" });
            }
            if classes.insert(SmolStr::new(tag), Classification::Expand(*kind)).is_some() {
                return Err(ConfigError::ConflictingTag { tag: tag.clone() });
            }
        }
        Ok(Self { classes })
    }

    pub fn classify(&self, node: &TaggedNode) -> Classification {
        self.classify_tag(node.type_tag().as_str())
    }

    pub fn classify_tag(&self, tag: &str) -> Classification {
        self.classes.get(tag).copied().unwrap_or(Classification::Opaque)
    }
}
