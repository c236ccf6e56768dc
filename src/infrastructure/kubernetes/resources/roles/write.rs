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
use crate::infrastructure::kubernetes::resources::roles::LokiComponentBuilder;
use crate::infrastructure::kubernetes::resources::LokiObject;
use crate::shared::error::Result;

/// Ingest path: distributors and ingesters.
pub struct WriteBuilder {
    options: Options,
}

impl WriteBuilder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl LokiComponentBuilder for WriteBuilder {
    fn component(&self) -> Component {
        Component::Write
    }

    fn options(&self) -> &Options {
        &self.options
    }
}

pub fn build_write(options: &Options) -> Result<Vec<LokiObject>> {
    WriteBuilder::new(options.clone()).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_args() {
        let builder = WriteBuilder::new(Options::default());
        assert_eq!(
            builder.args(),
            vec![
                "-config.file=/etc/loki/config/config.yaml".to_string(),
                "-target=write".to_string(),
            ]
        );
    }
}
