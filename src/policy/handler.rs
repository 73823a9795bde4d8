// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Entry points invoked by the policy host.

use super::protocol::{SettingsValidationResponse, ValidationRequest, ValidationResponse};
use crate::constants::{DEPLOYMENT_KIND, REJECT_CODE};
use crate::error::Result;
use crate::mapper::AnnotationMapper;
use crate::settings::{Settings, ValidatedSettings};
use crate::types::Workload;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Stateless request handler. Each call decodes its own settings; the optional
/// defaults are used only when a request carries no settings document.
#[derive(Debug, Clone, Default)]
pub struct PolicyHandler {
    default_settings: Option<ValidatedSettings>,
}

impl PolicyHandler {
    pub fn new(default_settings: Option<ValidatedSettings>) -> Self {
        Self { default_settings }
    }

    /// Decide accept, mutate or reject for one validation request
    #[instrument(skip_all)]
    pub fn validate(&self, payload: &[u8]) -> ValidationResponse {
        match self.evaluate(payload) {
            Ok(response) => response,
            Err(e) => {
                warn!("Rejecting request: {}", e);
                ValidationResponse::reject(e.to_string(), REJECT_CODE)
            }
        }
    }

    /// Settings validation hook, called by the host before any request
    #[instrument(skip_all)]
    pub fn validate_settings(&self, payload: &[u8]) -> SettingsValidationResponse {
        info!("Validating settings");

        let result = serde_json::from_slice::<Settings>(payload)
            .map_err(|e| e.to_string())
            .and_then(|s| s.validate().map_err(|e| e.to_string()));

        match result {
            Ok(()) => SettingsValidationResponse::accept(),
            Err(reason) => {
                warn!("Rejecting settings: {}", reason);
                SettingsValidationResponse::reject(format!(
                    "Provided settings are not valid: {}",
                    reason
                ))
            }
        }
    }

    fn evaluate(&self, payload: &[u8]) -> Result<ValidationResponse> {
        let request: ValidationRequest = serde_json::from_slice(payload)?;

        let kind = &request.request.kind.kind;
        if kind != DEPLOYMENT_KIND {
            debug!("Accepting {} without inspection", kind);
            return Ok(ValidationResponse::accept());
        }

        let settings = self.resolve_settings(request.settings)?;

        let mut workload: Workload = serde_json::from_value(request.request.object)?;
        if !AnnotationMapper::new(&settings).apply(&mut workload) {
            return Ok(ValidationResponse::accept());
        }

        Ok(ValidationResponse::mutate(serde_json::to_value(&workload)?))
    }

    fn resolve_settings(&self, raw: Value) -> Result<ValidatedSettings> {
        let settings: Settings = match (raw, &self.default_settings) {
            (Value::Null, Some(defaults)) => return Ok(defaults.clone()),
            (Value::Null, None) => Settings::default(),
            (raw, _) => serde_json::from_value(raw)?,
        };
        Ok(settings.into_validated()?)
    }
}
