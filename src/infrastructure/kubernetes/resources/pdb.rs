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
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::labels::{common_labels, Labels};
use crate::shared::error::Result;
use k8s_openapi::api::policy::v1::{PodDisruptionBudget, PodDisruptionBudgetSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

pub struct PodDisruptionBudgetBuilder<'a> {
    options: &'a Options,
    component: Component,
}

impl<'a> PodDisruptionBudgetBuilder<'a> {
    pub fn new(options: &'a Options, component: Component) -> Self {
        Self { options, component }
    }

    pub fn build(&self) -> Result<PodDisruptionBudget> {
        let labels = self.get_labels();

        Ok(PodDisruptionBudget {
            metadata: ObjectMeta {
                name: Some(self.options.component_name(self.component)),
                namespace: Some(self.options.namespace().to_string()),
                labels: Some(labels.clone()),
                ..Default::default()
            },
            spec: Some(PodDisruptionBudgetSpec {
                selector: Some(LabelSelector {
                    match_labels: Some(labels),
                    ..Default::default()
                }),
                max_unavailable: Some(IntOrString::Int(PDB_MAX_UNAVAILABLE)),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    pub fn get_labels(&self) -> Labels {
        common_labels(&self.options.name, self.component.as_str())
    }
}
