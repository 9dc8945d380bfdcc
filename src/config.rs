// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tree-building configuration.
//!
//! [`TreeConfig`] is plain data: every table the engine consults (tag classes, label detail
//! fields, sanitizer limits) can be overridden by the caller, either in code or from JSON.
//! [`TreeConfig::compile`] validates it into [`Rules`], which the builder borrows for a run.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tree::classify::{Classifier, ShapeKind};
use crate::tree::desugar::MappingDesugarer;
use crate::tree::label::LabelExtractor;
use crate::tree::sanitize::Sanitizer;

pub const DEFAULT_LABEL_CEILING: usize = 2500;
pub const DEFAULT_ELIDED_PLACEHOLDER: &str = "~~~DOCS: too long to fit on graph~~~";
pub const DEFAULT_ILLEGAL_PATTERN: &str = r"[,\\/]$";
pub const DEFAULT_MAX_DEPTH: usize = 512;

pub const DEFAULT_SKIP_TAGS: &[&str] = &["Expr", "Module", "Attribute", "Interactive", "Expression"];
pub const DEFAULT_EXPAND_TAGS: &[(&str, ShapeKind)] = &[
    ("List", ShapeKind::Sequence),
    ("Tuple", ShapeKind::Pair),
    ("Dict", ShapeKind::Mapping),
    ("Set", ShapeKind::Set),
    ("Starred", ShapeKind::Wrapped),
    ("Num", ShapeKind::Leaf),
    ("Str", ShapeKind::Leaf),
    ("Bytes", ShapeKind::Leaf),
    ("Name", ShapeKind::Leaf),
    ("NameConstant", ShapeKind::Leaf),
    ("Constant", ShapeKind::Leaf),
];
pub const DEFAULT_DETAIL_FIELDS: &[&str] =
    &["module", "n", "s", "id", "name", "attr", "arg", "value", "key"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    /// Wrapper tags that are passed through; their children attach to the current parent.
    pub skip_tags: Vec<String>,
    /// Tags that become graph nodes, with the structural shape they represent.
    pub expand_tags: BTreeMap<String, ShapeKind>,
    /// Label detail fields, highest priority first.
    pub detail_fields: Vec<String>,
    pub mapping_keys_field: String,
    pub mapping_values_field: String,
    /// Field of each desugared key node that receives the matching value node.
    pub mapping_entry_field: String,
    /// Field that keeps a key's own scalar when `mapping_entry_field` would overwrite it.
    pub mapping_displaced_field: String,
    /// Labels longer than this many characters are replaced by `elided_placeholder`.
    pub label_ceiling: usize,
    pub elided_placeholder: String,
    /// Regex matching characters a caption must not end with.
    pub illegal_pattern: String,
    pub illegal_replacement: String,
    /// Labels that collide with renderer keywords; they get a `_` prefix.
    pub reserved_labels: Vec<String>,
    /// Nesting depth past which subtrees are cut off.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|tag| (*tag).to_owned()).collect(),
            expand_tags: DEFAULT_EXPAND_TAGS
                .iter()
                .map(|(tag, kind)| ((*tag).to_owned(), *kind))
                .collect(),
            detail_fields: DEFAULT_DETAIL_FIELDS.iter().map(|field| (*field).to_owned()).collect(),
            mapping_keys_field: "keys".to_owned(),
            mapping_values_field: "values".to_owned(),
            mapping_entry_field: "value".to_owned(),
            mapping_displaced_field: "key".to_owned(),
            label_ceiling: DEFAULT_LABEL_CEILING,
            elided_placeholder: DEFAULT_ELIDED_PLACEHOLDER.to_owned(),
            illegal_pattern: DEFAULT_ILLEGAL_PATTERN.to_owned(),
            illegal_replacement: "*".to_owned(),
            reserved_labels: vec!["node".to_owned()],
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeConfig {
    /// Parses overrides from JSON; keys that are not present keep their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|source| ConfigError::Json { source })
    }

    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(TreeConfig).to_value()
    }

    pub fn compile(&self) -> Result<Rules, ConfigError> {
        if self.label_ceiling == 0 {
            return Err(ConfigError::ZeroLabelCeiling);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }

        let classifier = Classifier::new(&self.skip_tags, &self.expand_tags)?;
        let labels = LabelExtractor::new(&self.detail_fields)?;
        let desugarer = MappingDesugarer::new(
            &self.mapping_keys_field,
            &self.mapping_values_field,
            &self.mapping_entry_field,
            &self.mapping_displaced_field,
        )?;
        let sanitizer = Sanitizer::new(
            &self.illegal_pattern,
            &self.illegal_replacement,
            &self.reserved_labels,
            self.label_ceiling,
            &self.elided_placeholder,
        )?;

        Ok(Rules {
            classifier,
            labels,
            desugarer,
            sanitizer,
            max_depth: self.max_depth,
        })
    }
}

/// Validated, ready-to-use form of a [`TreeConfig`].
#[derive(Debug, Clone)]
pub struct Rules {
    classifier: Classifier,
    labels: LabelExtractor,
    desugarer: MappingDesugarer,
    sanitizer: Sanitizer,
    max_depth: usize,
}

impl Rules {
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn labels(&self) -> &LabelExtractor {
        &self.labels
    }

    pub fn desugarer(&self) -> &MappingDesugarer {
        &self.desugarer
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Same rules as `TreeConfig::default().compile()`, built without the validation step.
impl Default for Rules {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            labels: LabelExtractor::default(),
            desugarer: MappingDesugarer::default(),
            sanitizer: Sanitizer::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json {
        source: serde_json::Error,
    },
    EmptyName {
        list: &'static str,
    },
    ConflictingTag {
        tag: String,
    },
    DuplicateMappingFields {
        field: String,
    },
    InvalidPattern {
        pattern: String,
        source: Box<regex::Error>,
    },
    ZeroLabelCeiling,
    ZeroMaxDepth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid tree config JSON: {source}"),
            Self::EmptyName { list } => write!(f, "{list} must not contain empty names"),
            Self::ConflictingTag { tag } => {
                write!(f, "tag '{tag}' is listed both as skipped and as expanded")
            }
            Self::DuplicateMappingFields { field } => write!(
                f,
                "mapping fields must all be different (duplicate '{field}')"
            ),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid illegal-character pattern {pattern:?}: {source}")
            }
            Self::ZeroLabelCeiling => f.write_str("label_ceiling must be greater than zero"),
            Self::ZeroMaxDepth => f.write_str("max_depth must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
