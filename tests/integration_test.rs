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

#[cfg(test)]
mod tests {
    use ssd_loki_kube::*;
    use std::io::Write;

    const SAMPLE_OPTIONS: &str = r#"
name = "logs"
runtime_config = "overrides:\n  tenant-a:\n    ingestion_rate_mb: 10\n"

[stack]
namespace = "observability"
image = "docker.io/grafana/loki:3.2.0"

[resources.write]
pvc_size = "20Gi"
requests = { cpu = "500m", memory = "1Gi" }

[minio]
root_user = "admin"
root_password = "changeme"
"#;

    fn create_test_options() -> Options {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE_OPTIONS.as_bytes()).expect("write options");
        Options::from_file(file.path()).expect("Failed to load options")
    }

    #[test]
    fn test_options_from_file() {
        let options = create_test_options();
        assert_eq!(options.name, "logs");
        assert_eq!(options.namespace(), "observability");
        assert_eq!(options.stack.image, "docker.io/grafana/loki:3.2.0");
        assert_eq!(options.stack.http_port, 3100);
        assert_eq!(options.resources.write.pvc_size, "20Gi");
        assert_eq!(options.resources.read.pvc_size, "10Gi");
        assert_eq!(
            options.minio.as_ref().map(|m| m.root_user.as_str()),
            Some("admin")
        );
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_missing_options_file() {
        let result = Options::from_file("/nonexistent/options.toml");
        assert!(matches!(result, Err(LokiError::ConfigError(_))));
    }

    #[test]
    fn test_render_from_manifest() {
        let manifest = r#"
apiVersion: loki.ssd.io/v1
kind: SsdLoki
metadata:
  name: logs
spec:
  authEnabled: false
  common:
    compactorAddress: http://logs-backend:3100
    pathPrefix: /var/loki
    replicationFactor: 3
    storage:
      s3:
        accessKeyId: minio
        secretAccessKey: minio123
        bucketnames: chunks
        endpoint: logs-minio:9000
        insecure: true
        s3ForcePathStyle: true
"#;
        let resource: SsdLoki = serde_yaml::from_str(manifest).expect("parse SsdLoki");
        let options = create_test_options().for_resource(&resource);
        let objects = build_stack(&options, &resource.spec).expect("render stack");

        let config = objects
            .iter()
            .find(|o| o.kind() == "ConfigMap" && o.name() == "logs")
            .and_then(|o| o.as_config_map())
            .and_then(|c| c.data.clone())
            .expect("loki ConfigMap");
        let rendered: serde_yaml::Value =
            serde_yaml::from_str(&config["config.yaml"]).expect("config.yaml is YAML");
        assert_eq!(rendered["common"]["path_prefix"], "/var/loki");
        assert_eq!(rendered["common"]["replication_factor"], 3);
        assert_eq!(rendered["common"]["storage"]["s3"]["bucketnames"], "chunks");
        assert_eq!(rendered["common"]["storage"]["s3"]["s3forcepathstyle"], true);

        let runtime = objects
            .iter()
            .find(|o| o.name() == "logs-runtime")
            .and_then(|o| o.as_config_map())
            .and_then(|c| c.data.clone())
            .expect("runtime ConfigMap");
        assert!(runtime["runtime-config.yaml"].contains("tenant-a"));

        let write = objects
            .iter()
            .find(|o| o.kind() == "StatefulSet" && o.name() == "logs-write")
            .and_then(|o| o.as_stateful_set())
            .expect("write StatefulSet");
        let container = &write
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .expect("pod spec")
            .containers[0];
        assert_eq!(
            container.image.as_deref(),
            Some("docker.io/grafana/loki:3.2.0")
        );
        assert!(container
            .resources
            .as_ref()
            .and_then(|r| r.requests.as_ref())
            .is_some_and(|r| r.contains_key("cpu")));
    }

    #[test]
    fn test_crd_yaml() {
        use kube::CustomResourceExt;

        let crd = serde_yaml::to_string(&SsdLoki::crd()).expect("serialize CRD");
        assert!(crd.contains("name: ssdlokis.loki.ssd.io"));
        assert!(crd.contains("kind: SsdLoki"));
        assert!(crd.contains("scope: Namespaced"));
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_apply_crd() {
        let client = LokiKubeClientImpl::new("default".to_string())
            .await
            .expect("Failed to create client");
        client.apply_crd().await.expect("Failed to apply CRD");
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_apply_stack() {
        let options = Options::default();
        let objects = build_stack(&options, &SsdLokiSpec::default()).expect("render stack");

        let client = LokiKubeClientImpl::new(options.namespace().to_string())
            .await
            .expect("Failed to create client");
        let outcomes = client.apply_all(&objects).await;
        assert!(outcomes.iter().all(ApplyOutcome::is_applied), "{:?}", outcomes);

        // Server-side apply is idempotent
        let outcomes = client.apply_all(&objects).await;
        assert!(outcomes.iter().all(ApplyOutcome::is_applied), "{:?}", outcomes);
    }
}
