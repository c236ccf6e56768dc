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

use crate::domain::config::Options;
use crate::infrastructure::kubernetes::resources::labels::instance_labels;
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub struct ServiceAccountBuilder<'a> {
    options: &'a Options,
}

impl<'a> ServiceAccountBuilder<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Account the Loki pods run as.
    pub fn build(&self) -> Result<ServiceAccount> {
        Ok(ServiceAccount {
            metadata: ObjectMeta {
                name: Some(self.options.service_account_name()),
                namespace: Some(self.options.namespace().to_string()),
                labels: Some(instance_labels(&self.options.name)),
                ..Default::default()
            },
            automount_service_account_token: Some(true),
            ..Default::default()
        })
    }

    pub fn build_minio(&self) -> Result<ServiceAccount> {
        Ok(ServiceAccount {
            metadata: ObjectMeta {
                name: Some(self.options.minio_name()),
                namespace: Some(self.options.namespace().to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::constants::{LABEL_INSTANCE, LABEL_NAME};

    #[test]
    fn test_service_accounts() {
        let mut options = Options::default();
        options.stack.namespace = "logging".to_string();
        let builder = ServiceAccountBuilder::new(&options);

        let sa = builder.build().unwrap();
        assert_eq!(sa.metadata.name.as_deref(), Some("loki"));
        assert_eq!(sa.metadata.namespace.as_deref(), Some("logging"));
        assert_eq!(sa.automount_service_account_token, Some(true));
        let labels = sa.metadata.labels.unwrap();
        assert_eq!(labels[LABEL_NAME], "loki");
        assert_eq!(labels[LABEL_INSTANCE], "loki");

        let minio = builder.build_minio().unwrap();
        assert_eq!(minio.metadata.name.as_deref(), Some("loki-minio"));
        assert!(minio.automount_service_account_token.is_none());
    }
}
