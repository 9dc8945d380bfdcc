// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Input decoding and graph export.
//!
//! `json_ast` and `value` turn JSON text into [`crate::model::TaggedNode`] trees; `dot` and
//! `mermaid` render a finished [`crate::model::TreeGraph`].

pub mod dot;
pub mod json_ast;
pub mod mermaid;
pub mod value;
