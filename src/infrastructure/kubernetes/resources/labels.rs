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

//! Label sets and DNS names shared by every builder
//!
//! Selectors of the StatefulSet, its Services and its PodDisruptionBudget are
//! all `common_labels(instance, component)`. Pod templates carry that set
//! plus `member_list_labels()`, so every selector matches its pods.

use crate::infrastructure::constants::*;
use std::collections::BTreeMap;

pub type Labels = BTreeMap<String, String>;

pub fn common_labels(instance: &str, component: &str) -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_NAME.to_string(), LABEL_NAME_VALUE.to_string());
    labels.insert(LABEL_INSTANCE.to_string(), instance.to_string());
    labels.insert(LABEL_COMPONENT.to_string(), component.to_string());
    labels
}

/// Labels for objects that belong to the instance but not to a single role.
pub fn instance_labels(instance: &str) -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_NAME.to_string(), LABEL_NAME_VALUE.to_string());
    labels.insert(LABEL_INSTANCE.to_string(), instance.to_string());
    labels
}

pub fn member_list_labels() -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(
        LABEL_PART_OF.to_string(),
        LABEL_PART_OF_MEMBERLIST.to_string(),
    );
    labels
}

pub fn headless_service_labels() -> Labels {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_VARIANT.to_string(), "headless".to_string());
    labels.insert(LABEL_SERVICE_MONITOR.to_string(), "false".to_string());
    labels
}

/// Union of both sets. Keys present in both take the value from `b`.
pub fn merge(a: &Labels, b: &Labels) -> Labels {
    let mut merged = a.clone();
    for (k, v) in b {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

pub fn fqdn(service: &str, namespace: &str, cluster_domain: &str) -> String {
    format!("{}.{}.svc.{}", service, namespace, cluster_domain)
}
