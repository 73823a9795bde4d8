// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Policy settings and their validation.

pub mod format;
pub mod value;

pub use format::{format_with_index, placeholder_count};
pub use value::AnnotationValue;

use crate::mapper::ScopePolicy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Settings validation failures, checked in declaration order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("env_key cannot be empty")]
    EmptyEnvKey,

    #[error("annotation_base cannot be empty")]
    EmptyAnnotationBase,

    #[error("annotation_ext_format cannot be empty")]
    EmptyAnnotationExtFormat,

    #[error("annotation_ext_format must contain %d placeholder")]
    MissingPlaceholder,
}

/// Settings as provided by the policy host
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Environment variable whose values become annotations
    #[serde(deserialize_with = "null_as_empty")]
    pub env_key: String,
    /// Annotation key used for the first match
    #[serde(deserialize_with = "null_as_empty")]
    pub annotation_base: String,
    /// Annotation key template for every following match, e.g. `log_path_ext_%d`
    #[serde(deserialize_with = "null_as_empty")]
    pub annotation_ext_format: String,
    /// Static annotations merged into the pod template on every mutation pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_annotations: Option<BTreeMap<String, AnnotationValue>>,
    /// Which containers are scanned and how the keys are scoped
    pub scope: ScopePolicy,
}

/// A `null` string field is treated like an absent one
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.env_key.is_empty() {
            return Err(SettingsError::EmptyEnvKey);
        }
        if self.annotation_base.is_empty() {
            return Err(SettingsError::EmptyAnnotationBase);
        }
        if self.annotation_ext_format.is_empty() {
            return Err(SettingsError::EmptyAnnotationExtFormat);
        }
        if placeholder_count(&self.annotation_ext_format) != 1 {
            return Err(SettingsError::MissingPlaceholder);
        }
        Ok(())
    }

    pub fn into_validated(self) -> Result<ValidatedSettings, SettingsError> {
        self.validate()?;
        Ok(ValidatedSettings(self))
    }
}

/// Settings that passed [`Settings::validate`]; the only input the mapper accepts
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSettings(Settings);

impl ValidatedSettings {
    pub fn settings(&self) -> &Settings {
        &self.0
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

impl TryFrom<Settings> for ValidatedSettings {
    type Error = SettingsError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        settings.into_validated()
    }
}
