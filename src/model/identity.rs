// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Identity generation for emitted graph nodes.
//!
//! Identities are never derived from content: two structurally identical values always get
//! distinct nodes. Generators take `&self` and are `Send + Sync` so independent subtrees can be
//! built in parallel against one generator.

use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::SmolStr;

use super::ids::NodeId;

/// Source of node identities.
///
/// A build redraws whenever the generator hands out the build's root identity, and gives up
/// after a few consecutive draws with `BuildIssue::IdentityExhausted`. Generators must therefore
/// keep producing identities other than the root.
pub trait IdentityGenerator: Send + Sync {
    /// Returns a fresh identity that this generator has never returned before.
    fn next_id(&self) -> NodeId;
}

/// Random v4 UUID identities. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdentityGenerator for UuidIds {
    fn next_id(&self) -> NodeId {
        let mut buf = uuid::Uuid::encode_buffer();
        let text = uuid::Uuid::new_v4().hyphenated().encode_lower(&mut buf);
        NodeId::from_trusted(SmolStr::new(text))
    }
}

/// Deterministic identities `<prefix>0`, `<prefix>1`, ... for tests and reproducible exports.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: SmolStr,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::with_prefix("n")
    }

    /// Prefixes that would make an invalid [`NodeId`] fall back to `n`.
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = if prefix.is_empty() || NodeId::new(prefix).is_err() {
            SmolStr::new_static("n")
        } else {
            SmolStr::new(prefix)
        };
        Self {
            prefix,
            next: AtomicU64::new(0),
        }
    }

    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityGenerator for SequentialIds {
    fn next_id(&self) -> NodeId {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        let mut buf = itoa::Buffer::new();
        let mut value = String::with_capacity(self.prefix.len() + 4);
        value.push_str(&self.prefix);
        value.push_str(buf.format(index));
        NodeId::from_trusted(SmolStr::from(value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rayon::prelude::*;

    use super::{IdentityGenerator, SequentialIds, UuidIds};

    #[test]
    fn sequential_ids_count_up_from_zero() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id().as_str(), "n0");
        assert_eq!(ids.next_id().as_str(), "n1");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn sequential_ids_fall_back_on_invalid_prefix() {
        let ids = SequentialIds::with_prefix("bad\"prefix");
        assert_eq!(ids.next_id().as_str(), "n0");

        let ids = SequentialIds::with_prefix("leaf_");
        assert_eq!(ids.next_id().as_str(), "leaf_0");
    }

    #[test]
    fn sequential_ids_are_unique_across_threads() {
        let ids = SequentialIds::new();
        let issued = (0..4_000).into_par_iter().map(|_| ids.next_id()).collect::<Vec<_>>();
        let unique = issued.iter().collect::<BTreeSet<_>>();
        assert_eq!(unique.len(), 4_000);
    }

    #[test]
    fn uuid_ids_are_fresh() {
        let ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }
}
