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
use crate::infrastructure::kubernetes::resources::labels::fqdn;
use crate::infrastructure::kubernetes::resources::roles::LokiComponentBuilder;
use crate::infrastructure::kubernetes::resources::LokiObject;
use crate::shared::error::Result;

/// Query path: query frontends and queriers.
pub struct ReadBuilder {
    options: Options,
}

impl ReadBuilder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// gRPC address of the compactor, which runs in the backend role.
    pub fn compactor_grpc_address(&self) -> String {
        let backend = fqdn(
            &self.options.component_name(Component::Backend),
            self.options.namespace(),
            &self.options.stack.cluster_domain,
        );
        format!("{}:{}", backend, self.options.stack.grpc_port)
    }
}

impl LokiComponentBuilder for ReadBuilder {
    fn component(&self) -> Component {
        Component::Read
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn extra_args(&self) -> Vec<String> {
        vec![
            LEGACY_READ_MODE_ARG.to_string(),
            format!(
                "-common.compactor-grpc-address={}",
                self.compactor_grpc_address()
            ),
        ]
    }
}

pub fn build_read(options: &Options) -> Result<Vec<LokiObject>> {
    ReadBuilder::new(options.clone()).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compactor_address_follows_options() {
        let builder = ReadBuilder::new(Options::default());
        assert_eq!(
            builder.compactor_grpc_address(),
            "loki-backend.default.svc.cluster.local:9095"
        );

        let mut options = Options::default();
        options.name = "logs".to_string();
        options.stack.namespace = "observability".to_string();
        options.stack.cluster_domain = "k8s.internal".to_string();
        options.stack.grpc_port = 9096;
        let builder = ReadBuilder::new(options);
        assert_eq!(
            builder.compactor_grpc_address(),
            "logs-backend.observability.svc.k8s.internal:9096"
        );
    }

    #[test]
    fn test_read_args() {
        let args = ReadBuilder::new(Options::default()).args();
        assert_eq!(args[1], "-target=read");
        assert_eq!(args[2], "-legacy-read-mode=false");
        assert!(args[3].starts_with("-common.compactor-grpc-address="));
    }
}
