// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The normalization-and-traversal engine.
//!
//! [`classify`] decides what a tag means, [`desugar`] normalizes mappings, [`label`] and
//! [`sanitize`] produce captions, and [`builder`] walks a tree and emits edges.

pub mod builder;
pub mod classify;
pub mod desugar;
pub mod label;
pub mod sanitize;

pub use builder::{build_graph, BuildIssue, BuildOutput, GraphBuilder};
pub use classify::{Classification, Classifier, ShapeKind};
pub use desugar::{desugar_mapping, DesugarError, MappingDesugarer, ENTRY_MARKER_FIELD};
pub use label::LabelExtractor;
pub use sanitize::Sanitizer;
