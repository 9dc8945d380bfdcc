// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use dtree::model::{Scalar, TaggedNode, TypeTag};
use dtree::BuildOutput;

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

fn tag(value: &str) -> TypeTag {
    TypeTag::new(value).expect("valid type tag")
}

pub fn checksum_output(output: &BuildOutput) -> u64 {
    let mut acc = 0u64;
    for edge in output.edges() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.parent_label().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.child_label().len() as u64);
    }
    acc.wrapping_mul(131).wrapping_add(output.issues().len() as u64)
}

pub mod tree {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub depth: usize,
        pub fanout: usize,
        /// Every n-th container is a `Dict` instead of a `List`; `0` disables dicts.
        pub dict_every: usize,
        pub label_len: usize,
    }

    impl Params {
        pub const fn new(depth: usize, fanout: usize, dict_every: usize, label_len: usize) -> Self {
            Self {
                depth,
                fanout,
                dict_every,
                label_len,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        WideShallow,
        DeepDicts,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::WideShallow => "wide_shallow",
                Self::DeepDicts => "deep_dicts",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(3, 4, 3, 12),
                Self::WideShallow => Params::new(2, 120, 0, 24),
                Self::DeepDicts => Params::new(7, 4, 2, 64),
            }
        }
    }

    fn leaf(index: usize, label_len: usize) -> TaggedNode {
        if index % 2 == 0 {
            TaggedNode::new(tag("Num")).with_field("n", Scalar::Int(index as i64))
        } else {
            let text = ascii_repeat_to_len(&format!("leaf_{index:06}_"), 'x', label_len);
            TaggedNode::new(tag("Str")).with_field("s", Scalar::Str(text))
        }
    }

    /// Deterministic nested container generator.
    ///
    /// Containers alternate between `List` and `Dict` per `dict_every`; the whole tree is wrapped
    /// in `Module`/`Expr` the way parsed source arrives.
    pub fn nested(params: Params) -> TaggedNode {
        assert!(params.depth >= 1, "depth must be >= 1");
        assert!(params.fanout >= 1, "fanout must be >= 1");

        let mut counter = 0usize;
        let value = container(params, params.depth, &mut counter);
        let expr = TaggedNode::new(tag("Expr")).with_field("value", value);
        TaggedNode::new(tag("Module")).with_field("body", vec![expr])
    }

    fn container(params: Params, depth: usize, counter: &mut usize) -> TaggedNode {
        *counter += 1;
        let index = *counter;
        let mut children = Vec::with_capacity(params.fanout);
        for _ in 0..params.fanout {
            if depth <= 1 {
                *counter += 1;
                children.push(leaf(*counter, params.label_len));
            } else {
                children.push(container(params, depth - 1, counter));
            }
        }

        if params.dict_every > 0 && index % params.dict_every == 0 {
            let keys = (0..children.len())
                .map(|k| leaf(index * 1000 + k * 2 + 1, params.label_len))
                .collect::<Vec<_>>();
            TaggedNode::new(tag("Dict")).with_field("keys", keys).with_field("values", children)
        } else {
            TaggedNode::new(tag("List")).with_field("elts", children)
        }
    }

    pub fn fixture(case: Case) -> TaggedNode {
        nested(case.params())
    }
}
