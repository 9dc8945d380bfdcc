// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dtree: render nested data structures as labeled trees.
//!
//! A serializer hands over a [`model::TaggedNode`] tree (see [`format::json_ast`] for the JSON
//! interchange shape, or [`format::value`] to lower plain JSON data). [`tree::GraphBuilder`] walks
//! it and emits `(parent, child)` edges into a [`model::GraphSink`]; [`format::dot`] and
//! [`format::mermaid`] turn the collected [`model::TreeGraph`] into renderer input.

pub mod config;
pub mod format;
pub mod model;
pub mod tree;

pub use config::{ConfigError, Rules, TreeConfig};
pub use tree::{build_graph, BuildIssue, BuildOutput, GraphBuilder};
