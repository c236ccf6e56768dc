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

//! Rendering of Loki's `config.yaml` from an `SsdLokiSpec`
//!
//! The custom resource uses camelCase keys while Loki expects snake_case.
//! Sections missing from the resource are left out so Loki falls back to its
//! own defaults.

use crate::domain::crd::SsdLokiSpec;
use crate::shared::error::Result;
use serde_json::{Map, Value};

/// Keys whose Loki spelling is not the plain snake_case of the CRD field.
const KEY_OVERRIDES: &[(&str, &str)] = &[("s3ForcePathStyle", "s3forcepathstyle")];

pub struct LokiConfigBuilder<'a> {
    spec: &'a SsdLokiSpec,
}

impl<'a> LokiConfigBuilder<'a> {
    pub fn new(spec: &'a SsdLokiSpec) -> Self {
        Self { spec }
    }

    /// Loki configuration as a YAML document.
    pub fn build(&self) -> Result<String> {
        let value = self.build_value()?;
        Ok(serde_yaml::to_string(&value)?)
    }

    pub fn build_value(&self) -> Result<Value> {
        let value = serde_json::to_value(self.spec)?;
        Ok(to_loki_keys(value))
    }
}

fn to_loki_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, inner) in map {
                converted.insert(loki_key(&key), to_loki_keys(inner));
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(to_loki_keys).collect()),
        other => other,
    }
}

fn loki_key(key: &str) -> String {
    if let Some((_, loki)) = KEY_OVERRIDES.iter().find(|(crd, _)| *crd == key) {
        return loki.to_string();
    }

    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
