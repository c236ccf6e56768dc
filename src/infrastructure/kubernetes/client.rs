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

use crate::domain::crd::SsdLoki;
use crate::infrastructure::constants::FIELD_MANAGER;
use crate::infrastructure::kubernetes::resources::LokiObject;
use crate::shared::error::{LokiError, Result};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, CustomResourceExt, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

#[derive(Debug)]
pub enum ApplyOutcome {
    Applied,
    Failed(LokiError),
    Skipped,
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

/// One-shot server-side apply of rendered objects.
#[async_trait::async_trait]
pub trait LokiKubeClient: Send + Sync {
    async fn apply(&self, object: &LokiObject) -> Result<()>;

    /// Apply objects in order. After the first failure the remaining
    /// objects are reported as skipped; one outcome per input object.
    async fn apply_all(&self, objects: &[LokiObject]) -> Vec<ApplyOutcome> {
        let mut outcomes = Vec::with_capacity(objects.len());
        let mut failed = false;
        for object in objects {
            if failed {
                outcomes.push(ApplyOutcome::Skipped);
                continue;
            }
            match self.apply(object).await {
                Ok(()) => outcomes.push(ApplyOutcome::Applied),
                Err(e) => {
                    failed = true;
                    outcomes.push(ApplyOutcome::Failed(e));
                }
            }
        }
        outcomes
    }

    async fn apply_crd(&self) -> Result<()>;
}

pub struct LokiKubeClientImpl {
    client: Client,
    namespace: String,
}

impl LokiKubeClientImpl {
    pub async fn new(namespace: String) -> Result<Self> {
        let client = Client::try_default().await.map_err(|e| {
            LokiError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }

    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| LokiError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| LokiError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                LokiError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            LokiError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn apply_namespaced<K>(&self, object: &K) -> Result<()>
    where
        K: Resource<Scope = NamespaceResourceScope>
            + Clone
            + Debug
            + DeserializeOwned
            + Serialize
            + Send
            + Sync,
        K::DynamicType: Default,
    {
        let meta = object.meta();
        let name = meta
            .name
            .as_deref()
            .ok_or_else(|| LokiError::InvalidResource("object name is required".to_string()))?;
        let namespace = meta.namespace.as_deref().unwrap_or(&self.namespace);

        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let patch_params = PatchParams::apply(FIELD_MANAGER).force();
        api.patch(name, &patch_params, &Patch::Apply(object)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl LokiKubeClient for LokiKubeClientImpl {
    async fn apply(&self, object: &LokiObject) -> Result<()> {
        let applied = match object {
            LokiObject::StatefulSet(o) => self.apply_namespaced(o).await,
            LokiObject::Service(o) => self.apply_namespaced(o).await,
            LokiObject::PodDisruptionBudget(o) => self.apply_namespaced(o).await,
            LokiObject::ConfigMap(o) => self.apply_namespaced(o).await,
            LokiObject::Secret(o) => self.apply_namespaced(o).await,
            LokiObject::ServiceAccount(o) => self.apply_namespaced(o).await,
        };
        applied.map_err(|e| {
            LokiError::KubeError(format!(
                "Failed to apply {} {}: {}",
                object.kind(),
                object.name(),
                e
            ))
        })?;

        tracing::info!(
            kind = object.kind(),
            name = object.name(),
            namespace = object.namespace().unwrap_or(&self.namespace),
            "applied"
        );
        Ok(())
    }

    async fn apply_crd(&self) -> Result<()> {
        let crd = SsdLoki::crd();
        let name = crd
            .metadata
            .name
            .clone()
            .ok_or_else(|| LokiError::InvalidResource("CRD name is required".to_string()))?;

        let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let patch_params = PatchParams::apply(FIELD_MANAGER).force();
        api.patch(&name, &patch_params, &Patch::Apply(&crd)).await?;

        tracing::info!(name = %name, "applied custom resource definition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::sync::Mutex;

    struct RecordingClient {
        fail_on: &'static str,
        applied: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl LokiKubeClient for RecordingClient {
        async fn apply(&self, object: &LokiObject) -> Result<()> {
            if object.name() == self.fail_on {
                return Err(LokiError::KubeError("forbidden".to_string()));
            }
            self.applied.lock().unwrap().push(object.name().to_string());
            Ok(())
        }

        async fn apply_crd(&self) -> Result<()> {
            Ok(())
        }
    }

    fn config_map(name: &str) -> LokiObject {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
        .into()
    }

    #[tokio::test]
    async fn test_apply_all_stops_at_first_failure() {
        let client = RecordingClient {
            fail_on: "b",
            applied: Mutex::new(Vec::new()),
        };
        let objects = vec![config_map("a"), config_map("b"), config_map("c")];

        let outcomes = client.apply_all(&objects).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_applied());
        assert!(matches!(outcomes[1], ApplyOutcome::Failed(LokiError::KubeError(_))));
        assert!(matches!(outcomes[2], ApplyOutcome::Skipped));
        assert_eq!(*client.applied.lock().unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_apply_all_success() {
        let client = RecordingClient {
            fail_on: "",
            applied: Mutex::new(Vec::new()),
        };
        let objects = vec![config_map("a"), config_map("b")];

        let outcomes = client.apply_all(&objects).await;
        assert!(outcomes.iter().all(ApplyOutcome::is_applied));
        assert_eq!(client.applied.lock().unwrap().len(), 2);
    }
}
