// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON-AST interchange for [`TaggedNode`].
//!
//! Each node is an object whose `_PyType` key holds the type tag; every other key is a field:
//!
//! ```json
//! { "_PyType": "List", "elts": [ { "_PyType": "Num", "n": 1 } ], "ctx": { "_PyType": "Load" } }
//! ```
//!
//! Objects become [`FieldValue::Node`], arrays of objects become [`FieldValue::NodeList`], and
//! anything else is a [`Scalar`]. Arrays holding non-objects cannot be traversed; they are kept
//! as a descriptive string scalar. Key order is preserved exactly as read.
//!
//! Input may nest up to [`MAX_JSON_NESTING`] objects and arrays deep. Parsing grows the stack on
//! demand, so that limit rather than the call stack decides what is accepted; how much of a deep
//! tree is drawn is left to the builder's depth limit.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::model::{FieldValue, Scalar, TaggedNode, TypeTag};

pub const TYPE_TAG_KEY: &str = "_PyType";

/// Deepest object/array nesting accepted by the readers in this module.
pub const MAX_JSON_NESTING: usize = 4_096;

pub fn parse_json_ast(input: &str) -> Result<TaggedNode, JsonAstError> {
    from_str_unbounded(input)
}

/// `serde_json::from_str` without the fixed recursion limit, bounded by [`MAX_JSON_NESTING`].
pub(crate) fn from_str_unbounded<T: DeserializeOwned>(input: &str) -> Result<T, JsonAstError> {
    check_nesting(input)?;
    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(|source| JsonAstError::Parse { source })?;
    de.end().map_err(|source| JsonAstError::Parse { source })?;
    Ok(value)
}

// Malformed text passes through; the parser reports it.
fn check_nesting(input: &str) -> Result<(), JsonAstError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &byte in input.as_bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > MAX_JSON_NESTING {
                    return Err(JsonAstError::TooDeep {
                        limit: MAX_JSON_NESTING,
                    });
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

pub fn to_json_ast(node: &TaggedNode) -> Result<String, JsonAstError> {
    serde_json::to_string_pretty(node).map_err(|source| JsonAstError::Serialize { source })
}

#[derive(Debug)]
pub enum JsonAstError {
    Parse { source: serde_json::Error },
    TooDeep { limit: usize },
    Serialize { source: serde_json::Error },
}

impl fmt::Display for JsonAstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { source } => write!(f, "invalid JSON-AST input: {source}"),
            Self::Serialize { source } => write!(f, "failed to write JSON-AST: {source}"),
            Self::TooDeep { limit } => {
                write!(f, "JSON input nests more than {limit} objects or arrays deep")
            }
        }
    }
}

impl std::error::Error for JsonAstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source } | Self::Serialize { source } => Some(source),
            Self::TooDeep { .. } => None,
        }
    }
}

impl<'de> Deserialize<'de> for TaggedNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TaggedNodeVisitor)
    }
}

struct TaggedNodeVisitor;

impl<'de> Visitor<'de> for TaggedNodeVisitor {
    type Value = TaggedNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a JSON-AST object with a \"{TYPE_TAG_KEY}\" key")
    }

    fn visit_map<M>(self, mut map: M) -> Result<TaggedNode, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut type_tag: Option<TypeTag> = None;
        let mut fields = Vec::<(SmolStr, FieldValue)>::new();

        while let Some(key) = map.next_key::<SmolStr>()? {
            if key == TYPE_TAG_KEY {
                if type_tag.is_some() {
                    return Err(de::Error::duplicate_field(TYPE_TAG_KEY));
                }
                let raw: String = map.next_value()?;
                let tag = TypeTag::new(&raw).map_err(|err| {
                    de::Error::custom(format_args!("invalid {TYPE_TAG_KEY} {raw:?}: {err}"))
                })?;
                type_tag = Some(tag);
            } else {
                let value: FieldValue = map.next_value()?;
                fields.push((key, value));
            }
        }

        let type_tag = type_tag.ok_or_else(|| de::Error::missing_field(TYPE_TAG_KEY))?;
        Ok(TaggedNode::from_parts(type_tag, fields))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-AST node, a list of nodes, or a scalar")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(match i64::try_from(v) {
            Ok(v) => Scalar::Int(v),
            Err(_) => Scalar::Float(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Str(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Str(v)))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Bytes(v.to_vec())))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
        Ok(FieldValue::Scalar(Scalar::Null))
    }

    fn visit_map<M>(self, map: M) -> Result<FieldValue, M::Error>
    where
        M: MapAccess<'de>,
    {
        TaggedNodeVisitor.visit_map(map).map(FieldValue::Node)
    }

    fn visit_seq<S>(self, mut seq: S) -> Result<FieldValue, S::Error>
    where
        S: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<FieldValue>()? {
            items.push(item);
        }

        if items.iter().all(|item| matches!(item, FieldValue::Node(_))) {
            let nodes = items
                .into_iter()
                .filter_map(|item| match item {
                    FieldValue::Node(node) => Some(node),
                    _ => None,
                })
                .collect();
            return Ok(FieldValue::NodeList(nodes));
        }

        let mut text = String::from("[");
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                text.push_str(", ");
            }
            describe(item, &mut text);
        }
        text.push(']');
        Ok(FieldValue::Scalar(Scalar::Str(text)))
    }
}

fn describe(value: &FieldValue, out: &mut String) {
    use std::fmt::Write as _;

    match value {
        FieldValue::Scalar(Scalar::Str(text)) => {
            let _ = write!(out, "{text:?}");
        }
        FieldValue::Scalar(scalar) => {
            let _ = write!(out, "{scalar}");
        }
        FieldValue::Node(node) => out.push_str(node.type_tag().as_str()),
        FieldValue::NodeList(nodes) => {
            out.push('[');
            for (idx, node) in nodes.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(node.type_tag().as_str());
            }
            out.push(']');
        }
        FieldValue::Marker(marker) => out.push_str(marker),
    }
}

impl Serialize for TaggedNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.field_count() + 1))?;
        map.serialize_entry(TYPE_TAG_KEY, self.type_tag().as_str())?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Markers are written as plain strings; they read back as string scalars.
impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Scalar(Scalar::Str(text)) => serializer.serialize_str(text),
            Self::Scalar(Scalar::Int(v)) => serializer.serialize_i64(*v),
            Self::Scalar(Scalar::Float(v)) => serializer.serialize_f64(*v),
            Self::Scalar(Scalar::Bool(v)) => serializer.serialize_bool(*v),
            Self::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Self::Scalar(Scalar::Bytes(bytes)) => {
                serializer.serialize_str(&String::from_utf8_lossy(bytes))
            }
            Self::Node(node) => node.serialize(serializer),
            Self::NodeList(nodes) => {
                let mut seq = serializer.serialize_seq(Some(nodes.len()))?;
                for node in nodes {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
            Self::Marker(marker) => serializer.serialize_str(marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_json_ast, to_json_ast, JsonAstError, MAX_JSON_NESTING};
    use crate::model::{FieldValue, Scalar};

    const LIST_OF_NUMBERS: &str = r#"{
        "_PyType": "Module",
        "body": [
            { "_PyType": "Expr", "value": {
                "_PyType": "List",
                "elts": [
                    { "_PyType": "Num", "n": 1 },
                    { "_PyType": "Num", "n": 2.5 },
                    { "_PyType": "Str", "s": "three" }
                ],
                "ctx": { "_PyType": "Load" }
            } }
        ]
    }"#;

    #[test]
    fn parses_nested_nodes_in_order() {
        let module = parse_json_ast(LIST_OF_NUMBERS).expect("parse");
        assert_eq!(module.type_tag().as_str(), "Module");

        let body = module.field("body").and_then(FieldValue::as_node_list).expect("body");
        let list = body[0].field("value").and_then(FieldValue::as_node).expect("list");
        let names = list.fields().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["elts", "ctx"]);

        let elts = list.field("elts").and_then(FieldValue::as_node_list).expect("elts");
        assert_eq!(elts.len(), 3);
        assert_eq!(elts[0].scalar("n"), Some(&Scalar::Int(1)));
        assert_eq!(elts[1].scalar("n"), Some(&Scalar::Float(2.5)));
        assert_eq!(elts[2].scalar("s"), Some(&Scalar::from("three")));
    }

    #[test]
    fn tag_key_may_appear_anywhere() {
        let node = parse_json_ast(r#"{ "id": "x", "_PyType": "Name" }"#).expect("parse");
        assert_eq!(node.type_tag().as_str(), "Name");
        assert_eq!(node.scalar("id"), Some(&Scalar::from("x")));
    }

    #[test]
    fn scalars_and_empty_lists() {
        let node = parse_json_ast(
            r#"{ "_PyType": "Thing", "a": null, "b": true, "c": -3, "d": [], "e": 18446744073709551615 }"#,
        )
        .expect("parse");
        assert_eq!(node.scalar("a"), Some(&Scalar::Null));
        assert_eq!(node.scalar("b"), Some(&Scalar::Bool(true)));
        assert_eq!(node.scalar("c"), Some(&Scalar::Int(-3)));
        assert_eq!(node.field("d"), Some(&FieldValue::NodeList(Vec::new())));
        assert!(matches!(node.scalar("e"), Some(Scalar::Float(_))));
    }

    #[test]
    fn non_node_arrays_become_descriptive_scalars() {
        let node = parse_json_ast(
            r#"{ "_PyType": "Dict", "keys": [null, { "_PyType": "Str", "s": "a" }], "names": ["x", 1] }"#,
        )
        .expect("parse");
        assert_eq!(node.scalar("keys"), Some(&Scalar::from("[null, Str]")));
        assert_eq!(node.scalar("names"), Some(&Scalar::from(r#"["x", 1]"#)));
    }

    #[test]
    fn rejects_missing_or_invalid_tags() {
        let err = parse_json_ast(r#"{ "n": 1 }"#).unwrap_err();
        assert!(matches!(err, JsonAstError::Parse { .. }));
        assert!(err.to_string().contains("_PyType"));

        let err = parse_json_ast(r#"{ "_PyType": "" }"#).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));

        let err = parse_json_ast(r#"{ "_PyType": "A", "_PyType": "B" }"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field"));

        parse_json_ast(r#"[1, 2]"#).unwrap_err();
    }

    #[test]
    fn writes_tag_first_and_reads_back() {
        let module = parse_json_ast(LIST_OF_NUMBERS).expect("parse");
        let text = to_json_ast(&module).expect("write");
        assert!(text.trim_start().starts_with("{\n  \"_PyType\": \"Module\""));
        assert_eq!(parse_json_ast(&text).expect("reparse"), module);
    }

    fn nested_lists(depth: usize) -> String {
        let open = r#"{ "_PyType": "List", "elts": ["#;
        let leaf = r#"{ "_PyType": "Num", "n": 1 }"#;
        format!("{}{leaf}{}", open.repeat(depth), "] }".repeat(depth))
    }

    #[test]
    fn parses_nesting_past_the_default_serde_json_limit() {
        let mut node = &parse_json_ast(&nested_lists(300)).expect("parse");
        for _ in 0..300 {
            assert_eq!(node.type_tag().as_str(), "List");
            node = &node.field("elts").and_then(FieldValue::as_node_list).expect("elts")[0];
        }
        assert_eq!(node.scalar("n"), Some(&Scalar::Int(1)));
    }

    #[test]
    fn rejects_nesting_past_the_limit() {
        let err = parse_json_ast(&nested_lists(MAX_JSON_NESTING)).unwrap_err();
        assert!(matches!(err, JsonAstError::TooDeep { limit: MAX_JSON_NESTING }));

        let too_deep = MAX_JSON_NESTING + 1;
        let text = format!("{}{}", "[".repeat(too_deep), "]".repeat(too_deep));
        assert!(matches!(parse_json_ast(&text), Err(JsonAstError::TooDeep { .. })));
    }

    #[test]
    fn brackets_inside_strings_do_not_count_as_nesting() {
        let text = format!(
            r#"{{ "_PyType": "Str", "s": "{}\"{}" }}"#,
            "[".repeat(MAX_JSON_NESTING + 1),
            "{".repeat(8)
        );
        let node = parse_json_ast(&text).expect("parse");
        assert!(matches!(node.scalar("s"), Some(Scalar::Str(s)) if s.ends_with("\"{{{{{{{{")));
    }
}
