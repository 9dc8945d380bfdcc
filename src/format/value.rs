// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lowers plain JSON data into the tagged shape the default rules understand.
//!
//! Objects become `Dict` nodes with parallel `keys`/`values` lists, arrays become `List` nodes,
//! strings `Str`, numbers `Num`, and `true`/`false`/`null` become `NameConstant`.

use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::format::json_ast::{from_str_unbounded, JsonAstError};
use crate::model::{Scalar, TaggedNode, TypeTag};

fn tag(name: &'static str) -> TypeTag {
    TypeTag::from_trusted(SmolStr::new_static(name))
}

fn str_node(text: &str) -> TaggedNode {
    TaggedNode::new(tag("Str")).with_field("s", Scalar::from(text))
}

pub fn lower_json_str(input: &str) -> Result<TaggedNode, JsonAstError> {
    let value: Value = from_str_unbounded(input)?;
    Ok(lower_json_value(&value))
}

enum Step<'a> {
    Enter(&'a Value),
    Object(&'a Map<String, Value>),
    Array(usize),
}

/// Lowers `value` bottom-up with an explicit stack, so nesting depth never touches the call
/// stack.
pub fn lower_json_value(value: &Value) -> TaggedNode {
    let mut steps = vec![Step::Enter(value)];
    let mut done: Vec<TaggedNode> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(Value::Object(map)) => {
                steps.push(Step::Object(map));
                steps.extend(map.values().rev().map(Step::Enter));
            }
            Step::Enter(Value::Array(items)) => {
                steps.push(Step::Array(items.len()));
                steps.extend(items.iter().rev().map(Step::Enter));
            }
            Step::Enter(Value::String(text)) => done.push(str_node(text)),
            Step::Enter(Value::Number(number)) => {
                let scalar = match number.as_i64() {
                    Some(int) => Scalar::Int(int),
                    None => Scalar::Float(number.as_f64().unwrap_or(f64::NAN)),
                };
                done.push(TaggedNode::new(tag("Num")).with_field("n", scalar));
            }
            Step::Enter(Value::Bool(flag)) => done.push(
                TaggedNode::new(tag("NameConstant")).with_field("value", Scalar::Bool(*flag)),
            ),
            Step::Enter(Value::Null) => done.push(
                TaggedNode::new(tag("NameConstant")).with_field("value", Scalar::from("null")),
            ),
            Step::Object(map) => {
                let values = done.split_off(done.len() - map.len());
                let keys = map.keys().map(|key| str_node(key)).collect::<Vec<_>>();
                done.push(
                    TaggedNode::new(tag("Dict"))
                        .with_field("keys", keys)
                        .with_field("values", values),
                );
            }
            Step::Array(len) => {
                let elts = done.split_off(done.len() - len);
                done.push(TaggedNode::new(tag("List")).with_field("elts", elts));
            }
        }
    }

    match done.pop() {
        Some(node) => node,
        None => unreachable!("every entered value lowers to one node"),
    }
}
