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

//! Whole-instance rendering: shared objects followed by the three roles.

use crate::domain::config::Options;
use crate::domain::crd::SsdLokiSpec;
use crate::infrastructure::kubernetes::resources::roles::{build_backend, build_read, build_write};
use crate::infrastructure::kubernetes::resources::{
    ConfigMapBuilder, LokiObject, MemberlistServiceBuilder, MinioSecretBuilder,
    ServiceAccountBuilder,
};
use crate::shared::error::Result;

/// Objects every role depends on.
///
/// Order: ServiceAccount, Loki ConfigMap, runtime ConfigMap, then the MinIO
/// Secret and ServiceAccount when credentials are set, then the memberlist
/// Service.
pub fn build_shared(options: &Options, spec: &SsdLokiSpec) -> Result<Vec<LokiObject>> {
    let service_accounts = ServiceAccountBuilder::new(options);
    let config_maps = ConfigMapBuilder::new(options, spec);

    let mut objects: Vec<LokiObject> = vec![
        service_accounts.build()?.into(),
        config_maps.build()?.into(),
        config_maps.build_runtime()?.into(),
    ];

    if let Some(credentials) = &options.minio {
        objects.push(MinioSecretBuilder::new(options, credentials).build()?.into());
        objects.push(service_accounts.build_minio()?.into());
    }

    objects.push(MemberlistServiceBuilder::new(options).build()?.into());

    Ok(objects)
}

pub fn build_stack(options: &Options, spec: &SsdLokiSpec) -> Result<Vec<LokiObject>> {
    let mut objects = build_shared(options, spec)?;
    objects.extend(build_write(options)?);
    objects.extend(build_read(options)?);
    objects.extend(build_backend(options)?);

    tracing::debug!(
        instance = %options.name,
        namespace = %options.namespace(),
        count = objects.len(),
        "rendered loki stack"
    );

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::MinioCredentials;

    fn kinds(objects: &[LokiObject]) -> Vec<String> {
        objects
            .iter()
            .map(|o| format!("{}/{}", o.kind(), o.name()))
            .collect()
    }

    #[test]
    fn test_shared_without_minio() {
        let objects = build_shared(&Options::default(), &SsdLokiSpec::default()).unwrap();
        assert_eq!(
            kinds(&objects),
            vec![
                "ServiceAccount/loki",
                "ConfigMap/loki",
                "ConfigMap/loki-runtime",
                "Service/loki-memberlist",
            ]
        );
    }

    #[test]
    fn test_shared_with_minio() {
        let mut options = Options::default();
        options.minio = Some(MinioCredentials::default());
        let objects = build_shared(&options, &SsdLokiSpec::default()).unwrap();
        assert_eq!(
            kinds(&objects),
            vec![
                "ServiceAccount/loki",
                "ConfigMap/loki",
                "ConfigMap/loki-runtime",
                "Secret/loki-minio",
                "ServiceAccount/loki-minio",
                "Service/loki-memberlist",
            ]
        );
    }

    #[test]
    fn test_stack_order() {
        let objects = build_stack(&Options::default(), &SsdLokiSpec::default()).unwrap();
        assert_eq!(objects.len(), 4 + 12);
        assert_eq!(objects[4].name(), "loki-write");
        assert_eq!(objects[8].name(), "loki-read");
        assert_eq!(objects[12].name(), "loki-backend");
        assert!(objects.iter().all(|o| o.namespace() == Some("default")));
    }
}
