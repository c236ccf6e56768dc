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

//! Inputs for the manifest builders
//!
//! `Options` carries everything the builders need that is not part of the
//! Loki configuration itself: the instance name, the stack-wide defaults
//! (image, namespace, ports) and per-component resources.

use crate::domain::crd::SsdLoki;
use crate::infrastructure::constants::*;
use crate::shared::error::{LokiError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::read_to_string;
use std::path::Path;

/// Longest instance name that keeps `<name>-backend` within 52 characters,
/// the StatefulSet name limit imposed by the `controller-revision-hash` pod label.
const MAX_INSTANCE_NAME_LEN: usize = 44;

/// The three roles of a simple scalable Loki deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Write,
    Read,
    Backend,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Write, Component::Read, Component::Backend];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Write => "write",
            Component::Read => "read",
            Component::Backend => "backend",
        }
    }

    /// Value passed to Loki's `-target` flag.
    pub fn target(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Component {
    type Err = LokiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "write" => Ok(Component::Write),
            "read" => Ok(Component::Read),
            "backend" => Ok(Component::Backend),
            _ => Err(LokiError::ConfigError(format!("Invalid component: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub name: String,
    pub stack: StackDefaults,
    pub resources: ComponentResources,
    pub minio: Option<MinioCredentials>,
    pub runtime_config: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: DEFAULT_INSTANCE_NAME.to_string(),
            stack: StackDefaults::default(),
            resources: ComponentResources::default(),
            minio: None,
            runtime_config: DEFAULT_RUNTIME_CONFIG.to_string(),
        }
    }
}

/// Values that used to be process-wide literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackDefaults {
    pub image: String,
    pub image_pull_policy: String,
    pub namespace: String,
    pub cluster_domain: String,
    pub http_port: i32,
    pub grpc_port: i32,
    pub memberlist_port: i32,
}

impl Default for StackDefaults {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            image_pull_policy: DEFAULT_IMAGE_PULL_POLICY.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            cluster_domain: POD_CLUSTER_DOMAIN.to_string(),
            http_port: HTTP_PORT,
            grpc_port: GRPC_PORT,
            memberlist_port: MEMBERLIST_PORT,
        }
    }
}

/// Requests/limits and storage per component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentResources {
    pub backend: ResourceRequirements,
    pub read: ResourceRequirements,
    pub write: ResourceRequirements,
}

impl ComponentResources {
    pub fn for_component(&self, component: Component) -> &ResourceRequirements {
        match component {
            Component::Write => &self.write,
            Component::Read => &self.read,
            Component::Backend => &self.backend,
        }
    }

    pub fn for_component_mut(&mut self, component: Component) -> &mut ResourceRequirements {
        match component {
            Component::Write => &mut self.write,
            Component::Read => &mut self.read,
            Component::Backend => &mut self.backend,
        }
    }
}

/// CPU, memory and PVC requirements for a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequirements {
    pub limits: BTreeMap<String, String>,
    pub requests: BTreeMap<String, String>,
    pub pvc_size: String,
    pub storage_class: Option<String>,
}

impl Default for ResourceRequirements {
    fn default() -> Self {
        Self {
            limits: BTreeMap::new(),
            requests: BTreeMap::new(),
            pvc_size: DEFAULT_PVC_SIZE.to_string(),
            storage_class: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinioCredentials {
    pub root_user: String,
    pub root_password: String,
}

impl Default for MinioCredentials {
    fn default() -> Self {
        Self {
            root_user: DEFAULT_MINIO_ROOT_USER.to_string(),
            root_password: DEFAULT_MINIO_ROOT_PASSWORD.to_string(),
        }
    }
}

impl Options {
    /// Load options from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            LokiError::ConfigError(format!(
                "Failed to read options file {}: {}",
                path.display(),
                e
            ))
        })?;

        let options: Self = toml::from_str(&content)?;
        Ok(options)
    }

    /// Take instance name and namespace from the custom resource's metadata.
    pub fn for_resource(mut self, resource: &SsdLoki) -> Self {
        if let Some(name) = resource.metadata.name.as_ref() {
            self.name = name.clone();
        }
        if let Some(namespace) = resource.metadata.namespace.as_ref() {
            self.stack.namespace = namespace.clone();
        }
        self
    }

    pub fn namespace(&self) -> &str {
        &self.stack.namespace
    }

    pub fn component_name(&self, component: Component) -> String {
        format!("{}-{}", self.name, component)
    }

    pub fn headless_service_name(&self, component: Component) -> String {
        format!("{}-{}{}", self.name, component, SUFFIX_HEADLESS)
    }

    pub fn memberlist_service_name(&self) -> String {
        format!("{}{}", self.name, SUFFIX_MEMBERLIST)
    }

    pub fn config_map_name(&self) -> String {
        self.name.clone()
    }

    pub fn runtime_config_map_name(&self) -> String {
        format!("{}{}", self.name, SUFFIX_RUNTIME)
    }

    pub fn service_account_name(&self) -> String {
        self.name.clone()
    }

    pub fn minio_name(&self) -> String {
        format!("{}{}", self.name, SUFFIX_MINIO)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_k8s_name(&self.name) {
            return Err(LokiError::config_error(format!(
                "Invalid instance name: {}",
                self.name
            )));
        }

        if self.name.len() > MAX_INSTANCE_NAME_LEN {
            return Err(LokiError::config_error(format!(
                "instance name too long (max {} chars): {}",
                MAX_INSTANCE_NAME_LEN, self.name
            )));
        }

        if !is_valid_k8s_name(&self.stack.namespace) {
            return Err(LokiError::config_error(format!(
                "Invalid namespace: {}",
                self.stack.namespace
            )));
        }

        if self.stack.image.trim().is_empty() {
            return Err(LokiError::config_error("image must not be empty"));
        }

        let valid_policies = ["Always", "IfNotPresent", "Never"];
        if !valid_policies.contains(&self.stack.image_pull_policy.as_str()) {
            return Err(LokiError::config_error(format!(
                "Invalid image_pull_policy: {}",
                self.stack.image_pull_policy
            )));
        }

        let ports = [
            ("http_port", self.stack.http_port),
            ("grpc_port", self.stack.grpc_port),
            ("memberlist_port", self.stack.memberlist_port),
        ];
        for (field, port) in ports {
            if !(1..=65535).contains(&port) {
                return Err(LokiError::validation(format!(
                    "{} out of range: {}",
                    field, port
                )));
            }
        }
        if self.stack.http_port == self.stack.grpc_port
            || self.stack.http_port == self.stack.memberlist_port
            || self.stack.grpc_port == self.stack.memberlist_port
        {
            return Err(LokiError::validation(
                "http, grpc and memberlist ports must be distinct",
            ));
        }

        for component in Component::ALL {
            let resources = self.resources.for_component(component);
            validate_quantity(&format!("{}.pvc_size", component), &resources.pvc_size)?;
            for (key, value) in &resources.requests {
                validate_quantity(&format!("{}.requests.{}", component, key), value)?;
            }
            for (key, value) in &resources.limits {
                validate_quantity(&format!("{}.limits.{}", component, key), value)?;
            }
        }

        if let Some(minio) = &self.minio {
            if minio.root_user.is_empty() || minio.root_password.is_empty() {
                return Err(LokiError::validation(
                    "minio credentials must not be empty",
                ));
            }
        }

        Ok(())
    }
}

pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Accepts the Kubernetes quantity forms used for cpu, memory and storage
/// (`500m`, `1.5`, `10Gi`, `1e3`).
pub fn is_valid_quantity(value: &str) -> bool {
    match Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)(Ki|Mi|Gi|Ti|Pi|Ei|n|u|m|k|M|G|T|P|E|[eE][+-]?[0-9]+)?$") {
        Ok(re) => re.is_match(value),
        Err(_) => false,
    }
}

fn validate_quantity(field: &str, value: &str) -> Result<()> {
    if is_valid_quantity(value) {
        Ok(())
    } else {
        Err(LokiError::invalid_quantity(field, value))
    }
}
