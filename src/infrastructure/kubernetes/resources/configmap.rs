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

use crate::domain::config::{LokiConfigBuilder, Options};
use crate::domain::crd::SsdLokiSpec;
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::labels::{instance_labels, Labels};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// The Loki configuration and runtime overrides ConfigMaps.
pub struct ConfigMapBuilder<'a> {
    options: &'a Options,
    spec: &'a SsdLokiSpec,
}

impl<'a> ConfigMapBuilder<'a> {
    pub fn new(options: &'a Options, spec: &'a SsdLokiSpec) -> Self {
        Self { options, spec }
    }

    /// ConfigMap `<name>` holding `config.yaml`.
    pub fn build(&self) -> Result<ConfigMap> {
        let config = LokiConfigBuilder::new(self.spec).build()?;
        Ok(self.config_map(
            self.options.config_map_name(),
            CONFIG_FILE_NAME,
            config,
        ))
    }

    /// ConfigMap `<name>-runtime` holding `runtime-config.yaml`.
    pub fn build_runtime(&self) -> Result<ConfigMap> {
        Ok(self.config_map(
            self.options.runtime_config_map_name(),
            RUNTIME_CONFIG_FILE_NAME,
            self.options.runtime_config.clone(),
        ))
    }

    fn config_map(&self, name: String, key: &str, content: String) -> ConfigMap {
        let mut data = BTreeMap::new();
        data.insert(key.to_string(), content);

        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name),
                namespace: Some(self.options.namespace().to_string()),
                labels: Some(self.get_labels()),
                ..Default::default()
            },
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn get_labels(&self) -> Labels {
        instance_labels(&self.options.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_map() {
        let options = Options::default();
        let spec = SsdLokiSpec {
            auth_enabled: true,
            ..Default::default()
        };
        let builder = ConfigMapBuilder::new(&options, &spec);

        let config = builder.build().unwrap();
        assert_eq!(config.metadata.name.as_deref(), Some("loki"));
        let data = config.data.unwrap();
        assert!(data["config.yaml"].contains("auth_enabled: true"));

        let runtime = builder.build_runtime().unwrap();
        assert_eq!(runtime.metadata.name.as_deref(), Some("loki-runtime"));
        assert_eq!(runtime.data.unwrap()["runtime-config.yaml"], "overrides: {}\n");
    }
}
