// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Container scoping policies.

use super::scan::{scan_container, LogPathMatch};
use crate::settings::{format_with_index, Settings};
use crate::types::Container;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which containers are scanned and how matches turn into annotation keys
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopePolicy {
    /// Scan only the first container, flat keys
    FirstContainer,
    /// Scan all containers, flat keys indexed across the whole template
    AllContainers,
    /// Scan all containers, keys prefixed with `<container>/` and indexed per container
    #[default]
    PerContainer,
}

impl ScopePolicy {
    /// Ordered `(key, value)` pairs derived from `containers`
    pub fn keyed_matches(
        self,
        containers: &[Container],
        settings: &Settings,
    ) -> Vec<(String, String)> {
        match self {
            ScopePolicy::FirstContainer => {
                let Some(first) = containers.first() else {
                    return Vec::new();
                };
                let matches = scan_container(first, &settings.env_key);
                if first.name.is_none() && !matches.is_empty() {
                    debug!("First container has no name, dropping {} matches", matches.len());
                    return Vec::new();
                }
                flat_keys(matches, settings)
            }
            ScopePolicy::AllContainers => {
                let matches = containers
                    .iter()
                    .flat_map(|c| scan_container(c, &settings.env_key))
                    .collect();
                flat_keys(matches, settings)
            }
            ScopePolicy::PerContainer => containers
                .iter()
                .flat_map(|c| {
                    let matches = scan_container(c, &settings.env_key);
                    match c.name.as_deref() {
                        Some(name) => qualified_keys(name, matches, settings),
                        None => {
                            if !matches.is_empty() {
                                let dropped = matches.len();
                                debug!("Container has no name, dropping {} matches", dropped);
                            }
                            Vec::new()
                        }
                    }
                })
                .collect(),
        }
    }
}

/// Key for the `index`-th match: the base for 0, the ext format afterwards
pub fn annotation_key(settings: &Settings, index: usize) -> String {
    if index == 0 {
        settings.annotation_base.clone()
    } else {
        format_with_index(&settings.annotation_ext_format, index)
    }
}

fn flat_keys(matches: Vec<LogPathMatch>, settings: &Settings) -> Vec<(String, String)> {
    matches
        .into_iter()
        .enumerate()
        .map(|(i, m)| (annotation_key(settings, i), m.value))
        .collect()
}

fn qualified_keys(
    container: &str,
    matches: Vec<LogPathMatch>,
    settings: &Settings,
) -> Vec<(String, String)> {
    matches
        .into_iter()
        .enumerate()
        .map(|(i, m)| (format!("{}/{}", container, annotation_key(settings, i)), m.value))
        .collect()
}
