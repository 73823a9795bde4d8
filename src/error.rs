// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidSettings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;
