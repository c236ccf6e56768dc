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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, LokiError>;

#[derive(Error, Debug)]
pub enum LokiError {
    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid quantity for {field}: '{value}'")]
    InvalidQuantity { field: String, value: String },

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for LokiError {
    fn from(err: kube::Error) -> Self {
        LokiError::KubeError(err.to_string())
    }
}

impl LokiError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn validation(context: impl Into<String>) -> Self {
        Self::ValidationError(context.into())
    }

    pub fn invalid_quantity(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            field: field.into(),
            value: value.into(),
        }
    }
}
