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

use crate::domain::config::{MinioCredentials, Options};
use crate::infrastructure::constants::*;
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use std::collections::BTreeMap;

/// Root credentials for the bundled MinIO object store.
pub struct MinioSecretBuilder<'a> {
    options: &'a Options,
    credentials: &'a MinioCredentials,
}

impl<'a> MinioSecretBuilder<'a> {
    pub fn new(options: &'a Options, credentials: &'a MinioCredentials) -> Self {
        Self {
            options,
            credentials,
        }
    }

    pub fn build(&self) -> Result<Secret> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), LABEL_APP_MINIO.to_string());

        let mut data = BTreeMap::new();
        data.insert(
            MINIO_ROOT_USER_KEY.to_string(),
            ByteString(self.credentials.root_user.as_bytes().to_vec()),
        );
        data.insert(
            MINIO_ROOT_PASSWORD_KEY.to_string(),
            ByteString(self.credentials.root_password.as_bytes().to_vec()),
        );

        Ok(Secret {
            metadata: ObjectMeta {
                name: Some(self.options.minio_name()),
                namespace: Some(self.options.namespace().to_string()),
                labels: Some(labels),
                ..Default::default()
            },
            type_: Some(SECRET_TYPE_OPAQUE.to_string()),
            data: Some(data),
            ..Default::default()
        })
    }
}
