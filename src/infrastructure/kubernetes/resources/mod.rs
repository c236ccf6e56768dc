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

pub mod configmap;
pub mod headless_service;
pub mod labels;
pub mod object;
pub mod pdb;
pub mod roles;
pub mod secret;
pub mod service;
pub mod service_account;
pub mod stack;
pub mod statefulset;

pub use self::configmap::ConfigMapBuilder;
pub use self::headless_service::{HeadlessServiceBuilder, MemberlistServiceBuilder};
pub use self::object::{to_yaml_stream, LokiObject};
pub use self::pdb::PodDisruptionBudgetBuilder;
pub use self::roles::{
    build_backend, build_read, build_write, BackendBuilder, LokiComponentBuilder, ReadBuilder,
    WriteBuilder,
};
pub use self::secret::MinioSecretBuilder;
pub use self::service::ServiceBuilder;
pub use self::service_account::ServiceAccountBuilder;
pub use self::stack::{build_shared, build_stack};
pub use self::statefulset::StatefulSetBuilder;
