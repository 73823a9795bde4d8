// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod mapper;
pub mod policy;
pub mod server;
pub mod settings;
pub mod types;

pub use mapper::{AnnotationEdit, AnnotationMapper, ScopePolicy};
pub use policy::PolicyHandler;
pub use settings::{Settings, SettingsError, ValidatedSettings};
pub use types::Workload;
