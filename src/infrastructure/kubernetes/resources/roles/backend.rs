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
use crate::infrastructure::constants::LEGACY_READ_MODE_ARG;
use crate::infrastructure::kubernetes::resources::roles::LokiComponentBuilder;
use crate::infrastructure::kubernetes::resources::LokiObject;
use crate::shared::error::Result;

/// Compactor, index gateway, query scheduler and ruler.
pub struct BackendBuilder {
    options: Options,
}

impl BackendBuilder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl LokiComponentBuilder for BackendBuilder {
    fn component(&self) -> Component {
        Component::Backend
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn extra_args(&self) -> Vec<String> {
        vec![LEGACY_READ_MODE_ARG.to_string()]
    }
}

pub fn build_backend(options: &Options) -> Result<Vec<LokiObject>> {
    BackendBuilder::new(options.clone()).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_args() {
        let args = BackendBuilder::new(Options::default()).args();
        assert_eq!(
            args,
            vec![
                "-config.file=/etc/loki/config/config.yaml".to_string(),
                "-target=backend".to_string(),
                "-legacy-read-mode=false".to_string(),
            ]
        );
    }

    #[test]
    fn test_backend_objects() {
        let objects = build_backend(&Options::default()).unwrap();
        let names: Vec<(&str, &str)> = objects.iter().map(|o| (o.kind(), o.name())).collect();
        assert_eq!(
            names,
            vec![
                ("StatefulSet", "loki-backend"),
                ("Service", "loki-backend"),
                ("Service", "loki-backend-headless"),
                ("PodDisruptionBudget", "loki-backend"),
            ]
        );
    }
}
