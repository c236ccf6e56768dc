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
use crate::infrastructure::kubernetes::resources::labels::{
    common_labels, headless_service_labels, instance_labels, member_list_labels, merge, Labels,
};
use crate::infrastructure::kubernetes::resources::service::{
    component_service_ports, create_service_port,
};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Service, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Headless Service governing a role's StatefulSet.
pub struct HeadlessServiceBuilder<'a> {
    options: &'a Options,
    component: Component,
}

impl<'a> HeadlessServiceBuilder<'a> {
    pub fn new(options: &'a Options, component: Component) -> Self {
        Self { options, component }
    }

    pub fn build(&self) -> Result<Service> {
        let metadata = ObjectMeta {
            name: Some(self.options.headless_service_name(self.component)),
            namespace: Some(self.options.namespace().to_string()),
            labels: Some(self.get_labels()),
            ..Default::default()
        };

        let service = Service {
            metadata,
            spec: Some(ServiceSpec {
                cluster_ip: Some(HEADLESS_CLUSTER_IP.to_string()),
                type_: Some(SERVICE_TYPE_CLUSTER_IP.to_string()),
                ports: Some(component_service_ports(self.options)),
                selector: Some(self.get_selector_labels()),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(service)
    }

    pub fn get_selector_labels(&self) -> Labels {
        common_labels(&self.options.name, self.component.as_str())
    }

    pub fn get_labels(&self) -> Labels {
        merge(&self.get_selector_labels(), &headless_service_labels())
    }
}

/// Gossip endpoint shared by all roles of an instance.
pub struct MemberlistServiceBuilder<'a> {
    options: &'a Options,
}

impl<'a> MemberlistServiceBuilder<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    pub fn build(&self) -> Result<Service> {
        let metadata = ObjectMeta {
            name: Some(self.options.memberlist_service_name()),
            namespace: Some(self.options.namespace().to_string()),
            labels: Some(merge(
                &instance_labels(&self.options.name),
                &headless_service_labels(),
            )),
            ..Default::default()
        };

        let service = Service {
            metadata,
            spec: Some(ServiceSpec {
                cluster_ip: Some(HEADLESS_CLUSTER_IP.to_string()),
                type_: Some(SERVICE_TYPE_CLUSTER_IP.to_string()),
                ports: Some(vec![create_service_port(
                    PORT_NAME_MEMBERLIST,
                    self.options.stack.memberlist_port,
                )]),
                selector: Some(self.get_selector_labels()),
                publish_not_ready_addresses: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(service)
    }

    pub fn get_selector_labels(&self) -> Labels {
        merge(&instance_labels(&self.options.name), &member_list_labels())
    }
}
