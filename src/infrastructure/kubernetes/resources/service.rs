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
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// ClusterIP Service in front of one role.
pub struct ServiceBuilder<'a> {
    options: &'a Options,
    component: Component,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(options: &'a Options, component: Component) -> Self {
        Self { options, component }
    }

    pub fn build(&self) -> Result<Service> {
        let metadata = ObjectMeta {
            name: Some(self.options.component_name(self.component)),
            namespace: Some(self.options.namespace().to_string()),
            labels: Some(self.get_labels()),
            ..Default::default()
        };

        let service = Service {
            metadata,
            spec: Some(ServiceSpec {
                type_: Some(SERVICE_TYPE_CLUSTER_IP.to_string()),
                ports: Some(component_service_ports(self.options)),
                selector: Some(self.get_labels()),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(service)
    }

    pub fn get_labels(&self) -> Labels {
        common_labels(&self.options.name, self.component.as_str())
    }
}

/// HTTP and gRPC ports, targeting the container ports by name.
pub(crate) fn component_service_ports(options: &Options) -> Vec<ServicePort> {
    vec![
        create_service_port(PORT_NAME_HTTP, options.stack.http_port),
        create_service_port(PORT_NAME_GRPC, options.stack.grpc_port),
    ]
}

pub(crate) fn create_service_port(name: &str, port: i32) -> ServicePort {
    ServicePort {
        name: Some(name.to_string()),
        port,
        target_port: Some(IntOrString::String(name.to_string())),
        protocol: Some(PROTOCOL_TCP.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service() {
        let options = Options::default();
        let service = ServiceBuilder::new(&options, Component::Read).build().unwrap();
        assert_eq!(service.metadata.name.as_deref(), Some("loki-read"));
        assert_eq!(service.metadata.namespace.as_deref(), Some("default"));

        let spec = service.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
        assert!(spec.cluster_ip.is_none());
        assert_eq!(
            spec.selector,
            Some(common_labels("loki", "read"))
        );

        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name.as_deref(), Some("http-metrics"));
        assert_eq!(ports[0].port, 3100);
        assert_eq!(
            ports[0].target_port,
            Some(IntOrString::String("http-metrics".to_string()))
        );
        assert_eq!(ports[1].port, 9095);
    }
}
