// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Environment variable scanning.

use crate::types::Container;

/// One occurrence of the target variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPathMatch {
    pub container: Option<String>,
    pub value: String,
}

/// Collect every env var of `container` named exactly `env_key`, in declared order.
/// Entries without a name are skipped; an absent value counts as empty.
pub fn scan_container(container: &Container, env_key: &str) -> Vec<LogPathMatch> {
    container
        .env_vars()
        .iter()
        .filter(|env| env.name.as_deref() == Some(env_key))
        .map(|env| LogPathMatch {
            container: container.name.clone(),
            value: env.value.clone().unwrap_or_default(),
        })
        .collect()
}
