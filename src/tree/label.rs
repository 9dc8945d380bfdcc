// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::config::{ConfigError, DEFAULT_DETAIL_FIELDS};
use crate::model::{Scalar, TaggedNode};

/// Picks a human-readable caption for a node from a fixed priority list of detail fields.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    detail_fields: Vec<SmolStr>,
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self {
            detail_fields: DEFAULT_DETAIL_FIELDS
                .iter()
                .map(|field| SmolStr::new_static(*field))
                .collect(),
        }
    }
}

impl LabelExtractor {
    pub fn new(detail_fields: &[String]) -> Result<Self, ConfigError> {
        if detail_fields.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyName { list: "detail_fields" });
        }
        Ok(Self {
            detail_fields: detail_fields.iter().map(SmolStr::new).collect(),
        })
    }

    pub fn detail_fields(&self) -> &[SmolStr] {
        &self.detail_fields
    }

    /// Returns `"{field}: {value}"` for the first detail field (in priority order, not field
    /// order) that holds a non-null scalar; the bare type tag otherwise.
    pub fn extract(&self, node: &TaggedNode) -> String {
        self.detail(node)
            .map(|(field, value)| format!("{field}: {value}"))
            .unwrap_or_else(|| node.type_tag().as_str().to_owned())
    }

    fn detail<'a>(&'a self, node: &'a TaggedNode) -> Option<(&'a str, &'a Scalar)> {
        self.detail_fields.iter().find_map(|field| {
            node.scalar(field)
                .filter(|value| !value.is_null())
                .map(|value| (field.as_str(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::LabelExtractor;
    use crate::config::TreeConfig;
    use crate::model::fixtures::{num, str_node, tag};
    use crate::model::{Scalar, TaggedNode};

    fn default_labels() -> LabelExtractor {
        LabelExtractor::new(&TreeConfig::default().detail_fields).expect("labels")
    }

    #[rstest]
    #[case(num(1), "n: 1")]
    #[case(str_node("hello"), "s: hello")]
    #[case(TaggedNode::new(tag("Name")).with_field("id", Scalar::from("x")), "id: x")]
    #[case(TaggedNode::new(tag("Constant")).with_field("value", Scalar::Float(2.5)), "value: 2.5")]
    #[case(TaggedNode::new(tag("NameConstant")).with_field("value", Scalar::Bool(true)), "value: true")]
    #[case(TaggedNode::new(tag("List")), "List")]
    fn default_priority_labels(#[case] node: TaggedNode, #[case] expected: &str) {
        assert_eq!(default_labels().extract(&node), expected);
    }

    #[test]
    fn priority_follows_list_order_not_field_order() {
        let node = TaggedNode::new(tag("Thing"))
            .with_field("name", Scalar::from("by-name"))
            .with_field("id", Scalar::from("by-id"));

        let id_first = LabelExtractor::new(&["id".to_owned(), "name".to_owned()]).expect("labels");
        assert_eq!(id_first.extract(&node), "id: by-id");

        let name_first =
            LabelExtractor::new(&["name".to_owned(), "id".to_owned()]).expect("labels");
        assert_eq!(name_first.extract(&node), "name: by-name");
    }

    #[test]
    fn null_and_structured_details_are_ignored() {
        let node = TaggedNode::new(tag("Constant"))
            .with_field("value", num(7))
            .with_field("kind", Scalar::Null)
            .with_field("s", Scalar::Null);
        assert_eq!(default_labels().extract(&node), "Constant");
    }

    #[test]
    fn falsy_scalars_still_label() {
        let node = TaggedNode::new(tag("Num")).with_field("n", Scalar::Int(0));
        assert_eq!(default_labels().extract(&node), "n: 0");

        let node = TaggedNode::new(tag("Str")).with_field("s", Scalar::from(""));
        assert_eq!(default_labels().extract(&node), "s: ");
    }

    #[test]
    fn bytes_render_lossily() {
        let node = TaggedNode::new(tag("Bytes")).with_field("s", Scalar::Bytes(b"ab\xffc".to_vec()));
        assert_eq!(default_labels().extract(&node), "s: ab\u{fffd}c");
    }
}
