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
use crate::infrastructure::constants::CONFIG_FILE_ARG;
use crate::infrastructure::kubernetes::resources::{
    HeadlessServiceBuilder, LokiObject, PodDisruptionBudgetBuilder, ServiceBuilder,
    StatefulSetBuilder,
};
use crate::shared::error::Result;

/// A Loki role rendered as StatefulSet, ClusterIP Service, headless Service
/// and PodDisruptionBudget, in that order.
pub trait LokiComponentBuilder {
    fn component(&self) -> Component;

    fn options(&self) -> &Options;

    /// Role specific flags appended after `-config.file` and `-target`.
    fn extra_args(&self) -> Vec<String> {
        Vec::new()
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            CONFIG_FILE_ARG.to_string(),
            format!("-target={}", self.component().target()),
        ];
        args.extend(self.extra_args());
        args
    }

    fn build(&self) -> Result<Vec<LokiObject>> {
        let options = self.options();
        let component = self.component();

        let objects: Vec<LokiObject> = vec![
            StatefulSetBuilder::new(options, component, self.args())
                .build()?
                .into(),
            ServiceBuilder::new(options, component).build()?.into(),
            HeadlessServiceBuilder::new(options, component)
                .build()?
                .into(),
            PodDisruptionBudgetBuilder::new(options, component)
                .build()?
                .into(),
        ];

        for object in &objects {
            tracing::debug!(
                component = %component,
                kind = object.kind(),
                name = object.name(),
                "built object"
            );
        }

        Ok(objects)
    }
}
