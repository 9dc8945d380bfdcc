// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::TypeTag;
use super::tagged::{Scalar, TaggedNode};

pub(crate) fn tag(value: &str) -> TypeTag {
    TypeTag::new(value).expect("type tag")
}

pub(crate) fn load() -> TaggedNode {
    TaggedNode::new(tag("Load"))
}

pub(crate) fn num(value: i64) -> TaggedNode {
    TaggedNode::new(tag("Num")).with_field("n", Scalar::Int(value))
}

pub(crate) fn str_node(value: &str) -> TaggedNode {
    TaggedNode::new(tag("Str")).with_field("s", Scalar::from(value))
}

/// Literal in the single-node shape newer parsers emit for every constant.
pub(crate) fn constant(value: Scalar) -> TaggedNode {
    TaggedNode::new(tag("Constant"))
        .with_field("value", value)
        .with_field("kind", Scalar::Null)
}

pub(crate) fn name(id: &str) -> TaggedNode {
    TaggedNode::new(tag("Name"))
        .with_field("id", Scalar::from(id))
        .with_field("ctx", load())
}

pub(crate) fn list_node(elts: Vec<TaggedNode>) -> TaggedNode {
    TaggedNode::new(tag("List")).with_field("elts", elts).with_field("ctx", load())
}

pub(crate) fn tuple_node(elts: Vec<TaggedNode>) -> TaggedNode {
    TaggedNode::new(tag("Tuple")).with_field("elts", elts).with_field("ctx", load())
}

pub(crate) fn set_node(elts: Vec<TaggedNode>) -> TaggedNode {
    TaggedNode::new(tag("Set")).with_field("elts", elts)
}

pub(crate) fn dict_node(entries: Vec<(TaggedNode, TaggedNode)>) -> TaggedNode {
    let (keys, values): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
    TaggedNode::new(tag("Dict")).with_field("keys", keys).with_field("values", values)
}

/// `Module(body=[Expr(value=<value>)])`, the shape a parser gives a single expression.
pub(crate) fn module(value: TaggedNode) -> TaggedNode {
    let expr = TaggedNode::new(tag("Expr")).with_field("value", value);
    TaggedNode::new(tag("Module"))
        .with_field("body", vec![expr])
        .with_field("type_ignores", Vec::<TaggedNode>::new())
}

/// `['ira', 'nanna', 'ghost', [1, 2, 3], {'a', 'b', 'c'}, ('do', 're', 'mi')]`
pub(crate) fn mixed_list() -> TaggedNode {
    list_node(vec![
        str_node("ira"),
        str_node("nanna"),
        str_node("ghost"),
        list_node(vec![num(1), num(2), num(3)]),
        set_node(vec![str_node("a"), str_node("b"), str_node("c")]),
        tuple_node(vec![str_node("do"), str_node("re"), str_node("mi")]),
    ])
}
