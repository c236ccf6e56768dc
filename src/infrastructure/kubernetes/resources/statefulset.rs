// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::config::{Component, Options};
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::labels::{
    common_labels, member_list_labels, merge, Labels,
};
use crate::shared::error::Result;
use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec, StatefulSetUpdateStrategy};
use k8s_openapi::api::core::v1::{
    Affinity, Capabilities, ConfigMapVolumeSource, Container, ContainerPort, EmptyDirVolumeSource,
    HTTPGetAction, KeyToPath, PersistentVolumeClaim, PersistentVolumeClaimSpec, PodAffinityTerm,
    PodAntiAffinity, PodSecurityContext, PodSpec, PodTemplateSpec, Probe, ResourceRequirements,
    SecurityContext, Volume, VolumeMount, VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// StatefulSet for one Loki role.
pub struct StatefulSetBuilder<'a> {
    options: &'a Options,
    component: Component,
    args: Vec<String>,
}

impl<'a> StatefulSetBuilder<'a> {
    pub fn new(options: &'a Options, component: Component, args: Vec<String>) -> Self {
        Self {
            options,
            component,
            args,
        }
    }

    pub fn build(&self) -> Result<StatefulSet> {
        let pod_labels = self.get_labels();

        let metadata = ObjectMeta {
            name: Some(self.options.component_name(self.component)),
            namespace: Some(self.options.namespace().to_string()),
            labels: Some(pod_labels.clone()),
            ..Default::default()
        };

        let stateful_set = StatefulSet {
            metadata,
            spec: Some(StatefulSetSpec {
                replicas: Some(COMPONENT_REPLICAS),
                service_name: self.options.headless_service_name(self.component),
                selector: LabelSelector {
                    match_labels: Some(self.get_selector_labels()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(pod_labels),
                        ..Default::default()
                    }),
                    spec: Some(self.build_pod_spec()?),
                },
                volume_claim_templates: Some(self.build_volume_claim_templates()?),
                update_strategy: Some(StatefulSetUpdateStrategy {
                    type_: Some(STRATEGY_TYPE_ROLLING_UPDATE.to_string()),
                    ..Default::default()
                }),
                pod_management_policy: Some(POD_MANAGEMENT_POLICY_PARALLEL.to_string()),
                revision_history_limit: Some(REVISION_HISTORY_LIMIT),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(stateful_set)
    }

    fn build_pod_spec(&self) -> Result<PodSpec> {
        Ok(PodSpec {
            service_account_name: Some(self.options.service_account_name()),
            automount_service_account_token: Some(true),
            enable_service_links: Some(true),
            termination_grace_period_seconds: Some(TERMINATION_GRACE_PERIOD_SECONDS),
            security_context: Some(PodSecurityContext {
                fs_group: Some(LOKI_UID),
                run_as_group: Some(LOKI_UID),
                run_as_non_root: Some(true),
                run_as_user: Some(LOKI_UID),
                ..Default::default()
            }),
            containers: vec![self.build_container()?],
            affinity: Some(self.build_affinity()),
            volumes: Some(self.build_volumes()),
            ..Default::default()
        })
    }

    pub fn build_container(&self) -> Result<Container> {
        let stack = &self.options.stack;

        let ports = [
            (PORT_NAME_HTTP, stack.http_port),
            (PORT_NAME_GRPC, stack.grpc_port),
            (PORT_NAME_MEMBERLIST, stack.memberlist_port),
        ]
        .into_iter()
        .map(|(name, port)| ContainerPort {
            name: Some(name.to_string()),
            container_port: port,
            protocol: Some(PROTOCOL_TCP.to_string()),
            ..Default::default()
        })
        .collect();

        Ok(Container {
            name: CONTAINER_NAME_LOKI.to_string(),
            image: Some(stack.image.clone()),
            image_pull_policy: Some(stack.image_pull_policy.clone()),
            args: Some(self.args.clone()),
            ports: Some(ports),
            security_context: Some(SecurityContext {
                allow_privilege_escalation: Some(false),
                capabilities: Some(Capabilities {
                    drop: Some(vec!["ALL".to_string()]),
                    ..Default::default()
                }),
                read_only_root_filesystem: Some(true),
                ..Default::default()
            }),
            readiness_probe: Some(Probe {
                http_get: Some(HTTPGetAction {
                    path: Some(READINESS_PATH.to_string()),
                    port: IntOrString::Int(stack.http_port),
                    ..Default::default()
                }),
                initial_delay_seconds: Some(READINESS_INITIAL_DELAY),
                timeout_seconds: Some(READINESS_TIMEOUT),
                ..Default::default()
            }),
            resources: self.build_resources(),
            volume_mounts: Some(self.build_volume_mounts()),
            ..Default::default()
        })
    }

    /// Container requests and limits, `None` when the role sets neither.
    fn build_resources(&self) -> Option<ResourceRequirements> {
        let resources = self.options.resources.for_component(self.component);
        if resources.limits.is_empty() && resources.requests.is_empty() {
            return None;
        }

        let to_quantities = |values: &BTreeMap<String, String>| {
            if values.is_empty() {
                None
            } else {
                Some(
                    values
                        .iter()
                        .map(|(k, v)| (k.clone(), Quantity(v.clone())))
                        .collect::<BTreeMap<_, _>>(),
                )
            }
        };

        Some(ResourceRequirements {
            limits: to_quantities(&resources.limits),
            requests: to_quantities(&resources.requests),
            ..Default::default()
        })
    }

    /// At most one pod of a role per node.
    fn build_affinity(&self) -> Affinity {
        let mut match_labels = BTreeMap::new();
        match_labels.insert(
            LABEL_COMPONENT.to_string(),
            self.component.as_str().to_string(),
        );

        Affinity {
            pod_anti_affinity: Some(PodAntiAffinity {
                required_during_scheduling_ignored_during_execution: Some(vec![PodAffinityTerm {
                    label_selector: Some(LabelSelector {
                        match_labels: Some(match_labels),
                        ..Default::default()
                    }),
                    topology_key: TOPOLOGY_KEY_HOSTNAME.to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn build_volumes(&self) -> Vec<Volume> {
        vec![
            Volume {
                name: VOLUME_NAME_CONFIG.to_string(),
                config_map: Some(ConfigMapVolumeSource {
                    name: self.options.config_map_name(),
                    items: Some(vec![KeyToPath {
                        key: CONFIG_FILE_NAME.to_string(),
                        path: CONFIG_FILE_NAME.to_string(),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Volume {
                name: VOLUME_NAME_RUNTIME_CONFIG.to_string(),
                config_map: Some(ConfigMapVolumeSource {
                    name: self.options.runtime_config_map_name(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Volume {
                name: VOLUME_NAME_TMP.to_string(),
                empty_dir: Some(EmptyDirVolumeSource::default()),
                ..Default::default()
            },
        ]
    }

    pub fn build_volume_mounts(&self) -> Vec<VolumeMount> {
        [
            (VOLUME_NAME_CONFIG, MOUNT_PATH_CONFIG),
            (VOLUME_NAME_RUNTIME_CONFIG, MOUNT_PATH_RUNTIME_CONFIG),
            (VOLUME_NAME_TMP, MOUNT_PATH_TMP),
            (VOLUME_NAME_DATA, MOUNT_PATH_DATA),
        ]
        .into_iter()
        .map(|(name, path)| VolumeMount {
            name: name.to_string(),
            mount_path: path.to_string(),
            ..Default::default()
        })
        .collect()
    }

    pub fn build_volume_claim_templates(&self) -> Result<Vec<PersistentVolumeClaim>> {
        let resources = self.options.resources.for_component(self.component);

        let mut requests = BTreeMap::new();
        requests.insert(
            "storage".to_string(),
            Quantity(resources.pvc_size.clone()),
        );

        Ok(vec![PersistentVolumeClaim {
            metadata: ObjectMeta {
                name: Some(VOLUME_NAME_DATA.to_string()),
                ..Default::default()
            },
            spec: Some(PersistentVolumeClaimSpec {
                access_modes: Some(vec![DEFAULT_ACCESS_MODE.to_string()]),
                storage_class_name: resources.storage_class.clone(),
                resources: Some(VolumeResourceRequirements {
                    requests: Some(requests),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            status: None,
        }])
    }

    pub fn get_selector_labels(&self) -> Labels {
        common_labels(&self.options.name, self.component.as_str())
    }

    pub fn get_labels(&self) -> Labels {
        merge(&member_list_labels(), &self.get_selector_labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(options: &Options, component: Component) -> StatefulSet {
        StatefulSetBuilder::new(options, component, vec!["-target=write".to_string()])
            .build()
            .unwrap()
    }

    #[test]
    fn test_workload_policy() {
        let options = Options::default();
        let sts = build(&options, Component::Write);
        let spec = sts.spec.unwrap();

        assert_eq!(sts.metadata.name.as_deref(), Some("loki-write"));
        assert_eq!(spec.replicas, Some(3));
        assert_eq!(spec.service_name, "loki-write-headless");
        assert_eq!(spec.pod_management_policy.as_deref(), Some("Parallel"));
        assert_eq!(spec.revision_history_limit, Some(10));
        assert_eq!(
            spec.update_strategy.and_then(|s| s.type_).as_deref(),
            Some("RollingUpdate")
        );
    }

    #[test]
    fn test_pod_security() {
        let options = Options::default();
        let pod = build(&options, Component::Read).spec.unwrap().template.spec.unwrap();

        let security = pod.security_context.unwrap();
        assert_eq!(security.run_as_user, Some(10001));
        assert_eq!(security.fs_group, Some(10001));
        assert_eq!(security.run_as_non_root, Some(true));
        assert_eq!(pod.termination_grace_period_seconds, Some(300));
        assert_eq!(pod.service_account_name.as_deref(), Some("loki"));

        let container = &pod.containers[0];
        let container_security = container.security_context.as_ref().unwrap();
        assert_eq!(container_security.read_only_root_filesystem, Some(true));
        assert_eq!(container_security.allow_privilege_escalation, Some(false));
        assert_eq!(
            container_security
                .capabilities
                .as_ref()
                .and_then(|c| c.drop.clone()),
            Some(vec!["ALL".to_string()])
        );
    }

    #[test]
    fn test_resources_from_options() {
        let mut options = Options::default();
        let sts = build(&options, Component::Backend);
        let pod = sts.spec.unwrap().template.spec.unwrap();
        assert!(pod.containers[0].resources.is_none());

        options
            .resources
            .backend
            .requests
            .insert("memory".to_string(), "512Mi".to_string());
        let sts = build(&options, Component::Backend);
        let resources = sts.spec.unwrap().template.spec.unwrap().containers[0]
            .resources
            .clone()
            .unwrap();
        assert_eq!(
            resources.requests.unwrap().get("memory"),
            Some(&Quantity("512Mi".to_string()))
        );
        assert!(resources.limits.is_none());
    }

    #[test]
    fn test_storage_class() {
        let mut options = Options::default();
        options.resources.write.storage_class = Some("fast-ssd".to_string());
        let claims = build(&options, Component::Write)
            .spec
            .unwrap()
            .volume_claim_templates
            .unwrap();
        assert_eq!(
            claims[0].spec.as_ref().unwrap().storage_class_name.as_deref(),
            Some("fast-ssd")
        );
    }
}
