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

use crate::domain::config::options::{Component, MinioCredentials, Options};
use std::collections::HashMap;

pub fn apply_to_options(configs: &HashMap<String, String>, options: &mut Options) {
    if let Some(name) = configs.get("loki.name") {
        options.name = name.clone();
    }

    if let Some(namespace) = configs.get("loki.namespace") {
        options.stack.namespace = namespace.clone();
    }

    if let Some(image) = configs.get("loki.image") {
        options.stack.image = image.clone();
    }

    if let Some(policy) = configs.get("loki.image.pull-policy") {
        options.stack.image_pull_policy = policy.clone();
    }

    if let Some(domain) = configs.get("loki.cluster.domain") {
        options.stack.cluster_domain = domain.clone();
    }

    if let Some(port) = parse_port(configs, "loki.port.http") {
        options.stack.http_port = port;
    }

    if let Some(port) = parse_port(configs, "loki.port.grpc") {
        options.stack.grpc_port = port;
    }

    if let Some(port) = parse_port(configs, "loki.port.memberlist") {
        options.stack.memberlist_port = port;
    }

    for component in Component::ALL {
        apply_component(configs, component, options);
    }

    let root_user = configs.get("loki.minio.root-user");
    let root_password = configs.get("loki.minio.root-password");
    if root_user.is_some() || root_password.is_some() {
        let minio = options.minio.get_or_insert_with(MinioCredentials::default);
        if let Some(user) = root_user {
            minio.root_user = user.clone();
        }
        if let Some(password) = root_password {
            minio.root_password = password.clone();
        }
    }
}

fn apply_component(configs: &HashMap<String, String>, component: Component, options: &mut Options) {
    let prefix = format!("loki.{}", component);
    let resources = options.resources.for_component_mut(component);

    if let Some(size) = configs.get(&format!("{}.pvc-size", prefix)) {
        resources.pvc_size = size.clone();
    }

    if let Some(storage_class) = configs.get(&format!("{}.storage-class", prefix)) {
        resources.storage_class = Some(storage_class.clone());
    }

    let cpu_key = format!("{}.cpu", prefix);
    if let Some(cpu_str) = configs.get(&cpu_key) {
        match cpu_str.parse::<f64>() {
            Ok(cpu_float) => {
                let cpu_milli = (cpu_float * 1000.0) as i64;
                let cpu_quantity = format!("{}m", cpu_milli);
                resources
                    .requests
                    .insert("cpu".to_string(), cpu_quantity.clone());
                resources.limits.insert("cpu".to_string(), cpu_quantity);
            }
            Err(_) => {
                tracing::warn!(key = %cpu_key, value = %cpu_str, "ignoring non-numeric cpu override");
            }
        }
    }

    if let Some(mem_str) = configs.get(&format!("{}.memory", prefix)) {
        resources
            .requests
            .insert("memory".to_string(), mem_str.clone());
        resources.limits.insert("memory".to_string(), mem_str.clone());
    }
}

fn parse_port(configs: &HashMap<String, String>, key: &str) -> Option<i32> {
    let value = configs.get(key)?;
    match value.parse::<i32>() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!(key = %key, value = %value, "ignoring invalid port override");
            None
        }
    }
}

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>, String> {
    let mut map = HashMap::new();

    for config in configs {
        let parts: Vec<&str> = config.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ));
        }

        let key = parts[0].trim();
        let value = parts[1].trim();

        if key.is_empty() {
            return Err(format!("Empty key in config: '{}'", config));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}
