// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;

use regex::{NoExpand, Regex};

use crate::config::{
    ConfigError, DEFAULT_ELIDED_PLACEHOLDER, DEFAULT_ILLEGAL_PATTERN, DEFAULT_LABEL_CEILING,
};

/// Makes a label safe to use as a node caption.
///
/// Steps, in order: reserved keywords get a `_` prefix, illegal trailing characters are replaced,
/// and anything longer than the ceiling is swapped for the placeholder as a whole. An empty
/// result means "do not draw this node".
#[derive(Debug, Clone)]
pub struct Sanitizer {
    illegal: TrailingRule,
    replacement: String,
    reserved: Vec<String>,
    ceiling: usize,
    placeholder: String,
}

/// How illegal trailing characters are found.
#[derive(Debug, Clone)]
enum TrailingRule {
    /// `DEFAULT_ILLEGAL_PATTERN` without a regex: one trailing `,`, `\` or `/`.
    Builtin,
    Pattern(Regex),
}

impl TrailingRule {
    fn compile(pattern: &str) -> Result<Self, ConfigError> {
        if pattern == DEFAULT_ILLEGAL_PATTERN {
            return Ok(Self::Builtin);
        }
        Regex::new(pattern).map(Self::Pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })
    }

    fn apply<'a>(&self, label: &'a str, replacement: &str) -> Cow<'a, str> {
        match self {
            Self::Builtin => match label.strip_suffix([',', '\\', '/']) {
                Some(rest) => Cow::Owned(format!("{rest}{replacement}")),
                None => Cow::Borrowed(label),
            },
            Self::Pattern(regex) => regex.replace_all(label, NoExpand(replacement)),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            illegal: TrailingRule::Builtin,
            replacement: "*".to_owned(),
            reserved: vec!["node".to_owned()],
            ceiling: DEFAULT_LABEL_CEILING,
            placeholder: DEFAULT_ELIDED_PLACEHOLDER.to_owned(),
        }
    }
}

impl Sanitizer {
    pub fn new(
        illegal_pattern: &str,
        replacement: &str,
        reserved: &[String],
        ceiling: usize,
        placeholder: &str,
    ) -> Result<Self, ConfigError> {
        if ceiling == 0 {
            return Err(ConfigError::ZeroLabelCeiling);
        }
        let illegal = TrailingRule::compile(illegal_pattern)?;
        Ok(Self {
            illegal,
            replacement: replacement.to_owned(),
            reserved: reserved.to_vec(),
            ceiling,
            placeholder: placeholder.to_owned(),
        })
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn sanitize(&self, label: &str) -> String {
        let label: Cow<'_, str> = if self.reserved.iter().any(|word| word == label) {
            Cow::Owned(format!("_{label}"))
        } else {
            Cow::Borrowed(label)
        };
        let label = self.illegal.apply(&label, &self.replacement);

        if exceeds(&label, self.ceiling) {
            return self.placeholder.clone();
        }
        label.into_owned()
    }
}

fn exceeds(text: &str, ceiling: usize) -> bool {
    // Byte length bounds the char count from above.
    text.len() > ceiling && text.chars().count() > ceiling
}
