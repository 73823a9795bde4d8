// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment-shaped workload model.

pub mod workload;

pub use workload::{Container, EnvVar, PodSpec, PodTemplate, Workload, WorkloadSpec};
