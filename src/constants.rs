// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The only admission object kind the annotator mutates
pub const DEPLOYMENT_KIND: &str = "Deployment";

/// Code attached to every request rejection
pub const REJECT_CODE: u16 = 400;

/// Placeholder substituted with the match index in `annotation_ext_format`
pub const INDEX_PLACEHOLDER: &str = "%d";

/// Environment variables read at startup
pub mod env {
    pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
    pub const SETTINGS_FILE: &str = "POLICY_SETTINGS_FILE";
}

/// HTTP server defaults and routes
pub mod server {
    pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
    pub const VALIDATE_PATH: &str = "/validate";
    pub const VALIDATE_SETTINGS_PATH: &str = "/validate_settings";
    pub const HEALTH_PATH: &str = "/healthz";
    /// Largest request body the server buffers
    pub const MAX_BODY_BYTES: usize = 3 * 1024 * 1024;
}
