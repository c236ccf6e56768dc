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

use crate::shared::error::Result;
use k8s_openapi::api::apps::v1::StatefulSet;
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service, ServiceAccount};
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::Resource;
use serde::Serialize;

/// One rendered Kubernetes object.
///
/// Serializes as the wrapped object, so the output carries its own
/// `apiVersion` and `kind`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LokiObject {
    StatefulSet(StatefulSet),
    Service(Service),
    PodDisruptionBudget(PodDisruptionBudget),
    ConfigMap(ConfigMap),
    Secret(Secret),
    ServiceAccount(ServiceAccount),
}

impl LokiObject {
    pub fn kind(&self) -> &'static str {
        match self {
            LokiObject::StatefulSet(_) => StatefulSet::KIND,
            LokiObject::Service(_) => Service::KIND,
            LokiObject::PodDisruptionBudget(_) => PodDisruptionBudget::KIND,
            LokiObject::ConfigMap(_) => ConfigMap::KIND,
            LokiObject::Secret(_) => Secret::KIND,
            LokiObject::ServiceAccount(_) => ServiceAccount::KIND,
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            LokiObject::StatefulSet(_) => StatefulSet::API_VERSION,
            LokiObject::Service(_) => Service::API_VERSION,
            LokiObject::PodDisruptionBudget(_) => PodDisruptionBudget::API_VERSION,
            LokiObject::ConfigMap(_) => ConfigMap::API_VERSION,
            LokiObject::Secret(_) => Secret::API_VERSION,
            LokiObject::ServiceAccount(_) => ServiceAccount::API_VERSION,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            LokiObject::StatefulSet(o) => &o.metadata,
            LokiObject::Service(o) => &o.metadata,
            LokiObject::PodDisruptionBudget(o) => &o.metadata,
            LokiObject::ConfigMap(o) => &o.metadata,
            LokiObject::Secret(o) => &o.metadata,
            LokiObject::ServiceAccount(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn as_stateful_set(&self) -> Option<&StatefulSet> {
        match self {
            LokiObject::StatefulSet(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&Service> {
        match self {
            LokiObject::Service(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_pod_disruption_budget(&self) -> Option<&PodDisruptionBudget> {
        match self {
            LokiObject::PodDisruptionBudget(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_config_map(&self) -> Option<&ConfigMap> {
        match self {
            LokiObject::ConfigMap(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_secret(&self) -> Option<&Secret> {
        match self {
            LokiObject::Secret(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_service_account(&self) -> Option<&ServiceAccount> {
        match self {
            LokiObject::ServiceAccount(o) => Some(o),
            _ => None,
        }
    }
}

macro_rules! impl_from_object {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for LokiObject {
                fn from(object: $kind) -> Self {
                    LokiObject::$kind(object)
                }
            }
        )*
    };
}

impl_from_object!(
    StatefulSet,
    Service,
    PodDisruptionBudget,
    ConfigMap,
    Secret,
    ServiceAccount,
);

/// Multi-document YAML, one `---` separated document per object.
pub fn to_yaml_stream(objects: &[LokiObject]) -> Result<String> {
    let mut out = String::new();
    for object in objects {
        out.push_str("---\n");
        out.push_str(&object.to_yaml()?);
    }
    Ok(out)
}
