// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Maps env var occurrences onto pod template annotations.

pub mod scan;
pub mod scope;

pub use scan::{scan_container, LogPathMatch};
pub use scope::{annotation_key, ScopePolicy};

use crate::settings::ValidatedSettings;
use crate::types::Workload;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Annotations computed by one mapping pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationEdit(BTreeMap<String, String>);

impl AnnotationEdit {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write every entry into `annotations`, replacing values of existing keys
    pub fn merge_into(self, annotations: &mut BTreeMap<String, String>) {
        annotations.extend(self.0);
    }
}

pub struct AnnotationMapper<'a> {
    settings: &'a ValidatedSettings,
}

impl<'a> AnnotationMapper<'a> {
    pub fn new(settings: &'a ValidatedSettings) -> Self {
        Self { settings }
    }

    /// Compute the edit for `workload` without touching it.
    /// Additional annotations are applied last and win over scan-derived keys.
    pub fn edits(&self, workload: &Workload) -> AnnotationEdit {
        let settings = self.settings.settings();
        let mut edit = AnnotationEdit::default();

        for (key, value) in settings.scope.keyed_matches(workload.containers(), settings) {
            edit.insert(key, value);
        }

        if let Some(additional) = &settings.additional_annotations {
            for (key, value) in additional {
                edit.insert(key.clone(), value.to_string());
            }
        }

        edit
    }

    /// Merge the edit into the pod template annotations.
    /// Returns whether any key was written; when false the workload is left as it was.
    pub fn apply(&self, workload: &mut Workload) -> bool {
        let edit = self.edits(workload);
        if edit.is_empty() {
            debug!("No annotations to write for workload '{}'", workload.name());
            return false;
        }

        info!(
            "Writing {} annotations to workload '{}'",
            edit.len(),
            workload.name()
        );
        edit.merge_into(workload.template_annotations_mut());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AnnotationValue, Settings};
    use crate::types::{Container, EnvVar, PodSpec, PodTemplate, WorkloadSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn make_settings(scope: ScopePolicy) -> ValidatedSettings {
        Settings {
            env_key: "LOG".to_string(),
            annotation_base: "log.path".to_string(),
            annotation_ext_format: "log.path.%d".to_string(),
            scope,
            ..Default::default()
        }
        .into_validated()
        .unwrap()
    }

    fn make_container(name: &str, env: &[(&str, &str)]) -> Container {
        Container {
            name: Some(name.to_string()),
            env: Some(
                env.iter()
                    .map(|(n, v)| EnvVar {
                        name: Some(n.to_string()),
                        value: Some(v.to_string()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn make_workload(
        containers: Vec<Container>,
        template_annotations: Option<BTreeMap<String, String>>,
    ) -> Workload {
        Workload {
            metadata: Some(ObjectMeta {
                name: Some("web".to_string()),
                annotations: Some(BTreeMap::from([(
                    "existing_annotation".to_string(),
                    "value".to_string(),
                )])),
                ..Default::default()
            }),
            spec: Some(WorkloadSpec {
                template: Some(PodTemplate {
                    metadata: template_annotations.map(|a| ObjectMeta {
                        annotations: Some(a),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers,
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn annotations(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_match_uses_base_then_ext_format() {
        let settings = make_settings(ScopePolicy::FirstContainer);
        let mut workload = make_workload(
            vec![make_container("app", &[("LOG", "/a"), ("LOG", "/b"), ("OTHER", "z")])],
            None,
        );

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[("log.path", "/a"), ("log.path.1", "/b")])
        );
    }

    #[test]
    fn test_no_match_leaves_workload_untouched() {
        let settings = make_settings(ScopePolicy::PerContainer);
        let mut workload = make_workload(vec![make_container("app", &[("OTHER", "z")])], None);
        let before = workload.clone();

        assert!(!AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(workload, before);
        assert!(workload.spec.unwrap().template.unwrap().metadata.is_none());
    }

    #[test]
    fn test_existing_annotations_are_kept_and_conflicts_overwritten() {
        let settings = make_settings(ScopePolicy::PerContainer);
        let mut workload = make_workload(
            vec![make_container("app", &[("LOG", "/new")])],
            Some(annotations(&[
                ("existing_template_annotation", "template_value"),
                ("app/log.path", "/old"),
            ])),
        );

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[
                ("existing_template_annotation", "template_value"),
                ("app/log.path", "/new"),
            ])
        );
        assert_eq!(
            workload.annotations().unwrap(),
            &annotations(&[("existing_annotation", "value")])
        );
    }

    #[test]
    fn test_per_container_keys() {
        let settings = make_settings(ScopePolicy::PerContainer);
        let mut workload = make_workload(
            vec![
                make_container("container1", &[("LOG", "/var/log/app1.log")]),
                make_container("container2", &[("LOG", "/var/log/app2.log")]),
            ],
            None,
        );

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[
                ("container1/log.path", "/var/log/app1.log"),
                ("container2/log.path", "/var/log/app2.log"),
            ])
        );
    }

    #[test]
    fn test_all_containers_flat_keys() {
        let settings = make_settings(ScopePolicy::AllContainers);
        let mut workload = make_workload(
            vec![
                make_container("c1", &[("LOG", "/1")]),
                make_container("c2", &[("LOG", "/2")]),
            ],
            None,
        );

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[("log.path", "/1"), ("log.path.1", "/2")])
        );
    }

    #[test]
    fn test_second_pass_rewrites_identical_values() {
        let settings = make_settings(ScopePolicy::PerContainer);
        let mut workload = make_workload(
            vec![make_container("app", &[("LOG", "/a"), ("LOG", "/b")])],
            None,
        );
        let mapper = AnnotationMapper::new(&settings);

        assert!(mapper.apply(&mut workload));
        let first = workload.clone();
        assert!(mapper.apply(&mut workload));
        assert_eq!(workload, first);
    }

    #[test]
    fn test_additional_annotations_are_coerced_and_win() {
        let settings = Settings {
            env_key: "LOG".to_string(),
            annotation_base: "log.path".to_string(),
            annotation_ext_format: "log.path.%d".to_string(),
            scope: ScopePolicy::FirstContainer,
            additional_annotations: Some(BTreeMap::from([
                ("enabled".to_string(), AnnotationValue::Bool(true)),
                ("replicas".to_string(), AnnotationValue::Integer(3)),
                ("ratio".to_string(), AnnotationValue::Float(2.5)),
                ("log.path".to_string(), AnnotationValue::String("/fixed".to_string())),
            ])),
        }
        .into_validated()
        .unwrap();
        let mut workload = make_workload(vec![make_container("app", &[("LOG", "/a")])], None);

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[
                ("enabled", "true"),
                ("replicas", "3"),
                ("ratio", "2.500000"),
                ("log.path", "/fixed"),
            ])
        );
    }

    #[test]
    fn test_additional_annotations_alone_count_as_mutation() {
        let settings = Settings {
            additional_annotations: Some(BTreeMap::from([(
                "existing_template_annotation".to_string(),
                AnnotationValue::String("template_value".to_string()),
            )])),
            ..make_settings(ScopePolicy::PerContainer).into_inner()
        }
        .into_validated()
        .unwrap();
        let mut workload = make_workload(
            vec![make_container("app", &[("OTHER", "z")])],
            Some(annotations(&[("existing_template_annotation", "template_value")])),
        );

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
    }

    #[test]
    fn test_empty_additional_annotations_is_no_mutation() {
        let settings = Settings {
            additional_annotations: Some(BTreeMap::new()),
            ..make_settings(ScopePolicy::PerContainer).into_inner()
        }
        .into_validated()
        .unwrap();
        let mut workload = make_workload(vec![], None);

        assert!(!AnnotationMapper::new(&settings).apply(&mut workload));
    }

    #[test]
    fn test_edits_do_not_modify_workload() {
        let settings = make_settings(ScopePolicy::PerContainer);
        let workload = make_workload(vec![make_container("app", &[("LOG", "/a")])], None);

        let edit = AnnotationMapper::new(&settings).edits(&workload);
        assert_eq!(edit.get("app/log.path"), Some("/a"));
        assert_eq!(edit.len(), 1);
        assert!(workload.template_annotations().is_none());
    }

    #[test]
    fn test_workload_without_spec_gets_template_for_additional_annotations() {
        let settings = Settings {
            additional_annotations: Some(BTreeMap::from([(
                "team".to_string(),
                AnnotationValue::String("core".to_string()),
            )])),
            ..make_settings(ScopePolicy::PerContainer).into_inner()
        }
        .into_validated()
        .unwrap();
        let mut workload = Workload::default();

        assert!(AnnotationMapper::new(&settings).apply(&mut workload));
        assert_eq!(
            workload.template_annotations().unwrap(),
            &annotations(&[("team", "core")])
        );
    }
}
