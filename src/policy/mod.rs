// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Policy host adapter: request decoding, settings gate and responses.

pub mod handler;
pub mod protocol;

pub use handler::PolicyHandler;
pub use protocol::{
    AdmissionRequest, GroupVersionKind, SettingsValidationResponse, ValidationRequest,
    ValidationResponse,
};
