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

//! SsdLoki custom resource
//!
//! Every leaf mirrors one key of Loki's own YAML configuration. Optional
//! sections mean "configure this subsystem"; a missing section leaves the
//! upstream Loki default in place. Inside a present section every
//! non-optional leaf is required.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SSD_LOKI_GROUP: &str = "loki.ssd.io";
pub const SSD_LOKI_VERSION: &str = "v1";

/// Desired state of a simple scalable Loki deployment.
///
/// Example:
/// ```yaml
/// apiVersion: loki.ssd.io/v1
/// kind: SsdLoki
/// metadata:
///   name: loki
/// spec:
///   authEnabled: false
///   common:
///     compactorAddress: http://loki-backend:3100
///     pathPrefix: /var/loki
///     replicationFactor: 3
/// ```
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "loki.ssd.io",
    version = "v1",
    kind = "SsdLoki",
    plural = "ssdlokis",
    status = "SsdLokiStatus",
    namespaced,
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Auth", "type":"boolean", "jsonPath":".spec.authEnabled"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct SsdLokiSpec {
    pub auth_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_build: Option<BloomBuild>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_gateway: Option<BloomGateway>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_store_config: Option<ChunkStoreConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<FrontendConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_worker: Option<FrontendWorkerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_gateway: Option<IndexGatewayConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingester: Option<IngesterConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits_config: Option<LimitsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberlist: Option<MemberlistConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_ingester: Option<PatternIngesterConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub querier: Option<QuerierConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_range: Option<QueryRangeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruler: Option<RulerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_config: Option<RuntimeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_config: Option<SchemaConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_config: Option<StorageConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<TracingConfig>,
}

// ============================================================================
// Bloom filters
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomBuild {
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BloomBuildBuilder>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomBuildBuilder {
    pub planner_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomGateway {
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<BloomGatewayClient>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomGatewayClient {
    pub addresses: String,
}

// ============================================================================
// Caching
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChunkStoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_cache_config: Option<ChunkCacheConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChunkCacheConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<CacheBackgroundConfig>,

    pub default_validity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memcached: Option<MemcachedConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memcached_client: Option<MemcachedClientConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheBackgroundConfig {
    pub writeback_buffer: i64,
    pub writeback_goroutines: i64,
    pub writeback_size_limit: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemcachedConfig {
    pub batch_size: i64,
    pub parallelism: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemcachedClientConfig {
    pub addresses: String,
    pub consistent_hash: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_idle_conns: Option<i64>,

    pub timeout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<String>,
}

// ============================================================================
// Common / storage backend
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonConfig {
    pub compactor_address: String,
    pub path_prefix: String,
    pub replication_factor: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<CommonStorage>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Config>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(rename = "bucketnames")]
    pub bucket_names: String,
    pub endpoint: String,
    pub insecure: bool,
    pub s3_force_path_style: bool,
}

// ============================================================================
// Query path
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrontendConfig {
    pub scheduler_address: String,
    pub tail_proxy_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrontendWorkerConfig {
    pub scheduler_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexGatewayConfig {
    pub mode: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngesterConfig {
    pub chunk_encoding: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LimitsConfig {
    pub max_cache_freshness_per_query: String,
    pub query_timeout: String,
    pub reject_old_samples: bool,
    pub reject_old_samples_max_age: String,
    pub split_queries_by_interval: String,
    pub volume_enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberlistConfig {
    pub join_members: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatternIngesterConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuerierConfig {
    pub max_concurrent: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRangeConfig {
    pub align_queries_with_step: bool,
    pub cache_results: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_cache: Option<ResultsCacheConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultsCacheConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<CacheBackgroundConfig>,

    pub default_validity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memcached_client: Option<MemcachedClientConfig>,
}

// ============================================================================
// Ruler, runtime overrides, schema
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RulerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<RulerStorageConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RulerStorageConfig {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<RulerS3Config>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RulerS3Config {
    #[serde(rename = "bucketnames")]
    pub bucket_names: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub file: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    pub configs: Vec<SchemaConfigEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfigEntry {
    pub from: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<SchemaConfigIndex>,

    pub object_store: String,
    pub schema: String,
    pub store: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfigIndex {
    pub period: String,
    pub prefix: String,
}

// ============================================================================
// Server, storage, tracing
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub grpc_listen_port: i32,
    pub http_listen_port: i32,
    pub http_server_read_timeout: String,
    pub http_server_write_timeout: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_shipper: Option<BloomShipperConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boltdb_shipper: Option<BoltDbShipperConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedging: Option<HedgingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsdb_shipper: Option<TsdbShipperConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomShipperConfig {
    pub working_directory: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoltDbShipperConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_gateway_client: Option<IndexGatewayClientConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexGatewayClientConfig {
    pub server_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HedgingConfig {
    pub at: String,
    pub max_per_second: i64,
    pub up_to: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TsdbShipperConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_gateway_client: Option<IndexGatewayClientConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TracingConfig {
    pub enabled: bool,
}

// ============================================================================
// Status
// ============================================================================

/// Observed state of an SsdLoki. Populated by whatever controller manages
/// the resource; this crate only defines the wire format.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SsdLokiStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_statuses: Option<ComponentStatuses>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentStatuses {
    pub ingester: ComponentStatus,
    pub querier: ComponentStatus,
    pub distributor: ComponentStatus,
    pub query_frontend: ComponentStatus,
    pub ruler: ComponentStatus,
    pub compactor: ComponentStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentStatus {
    pub ready_replicas: i32,
    pub updated_replicas: i32,
    pub desired_replicas: i32,
    pub available_replicas: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::JSONSchemaProps;
    use kube::CustomResourceExt;

    fn spec_schema() -> JSONSchemaProps {
        let crd = SsdLoki::crd();
        let root = crd.spec.versions[0]
            .schema
            .clone()
            .and_then(|s| s.open_api_v3_schema)
            .unwrap();
        property(&root, "spec")
    }

    fn property(schema: &JSONSchemaProps, name: &str) -> JSONSchemaProps {
        schema.properties.as_ref().unwrap()[name].clone()
    }

    fn required(schema: &JSONSchemaProps) -> Vec<String> {
        schema.required.clone().unwrap_or_default()
    }

    const SAMPLE: &str = r#"
apiVersion: loki.ssd.io/v1
kind: SsdLoki
metadata:
  name: loki
  namespace: logging
spec:
  authEnabled: false
  common:
    compactorAddress: http://loki-backend:3100
    pathPrefix: /var/loki
    replicationFactor: 3
    storage:
      s3:
        accessKeyId: minio
        secretAccessKey: minio123
        bucketnames: chunks
        endpoint: loki-minio.default.svc:9000
        insecure: true
        s3ForcePathStyle: true
  ruler:
    storage:
      type: s3
      s3:
        bucketnames: ruler
  schemaConfig:
    configs:
      - from: "2024-04-01"
        objectStore: s3
        schema: v13
        store: tsdb
        index:
          period: 24h
          prefix: index_
"#;

    #[test]
    fn test_parse_manifest() {
        let loki: SsdLoki = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(loki.metadata.name.as_deref(), Some("loki"));
        assert!(!loki.spec.auth_enabled);

        let s3 = loki.spec.common.as_ref().unwrap().storage.as_ref().unwrap().s3.as_ref().unwrap();
        assert_eq!(s3.bucket_names, "chunks");
        assert!(s3.s3_force_path_style);

        let ruler = loki.spec.ruler.as_ref().unwrap().storage.as_ref().unwrap();
        assert_eq!(ruler.type_, "s3");

        let schema = &loki.spec.schema_config.as_ref().unwrap().configs[0];
        assert_eq!(schema.object_store, "s3");
        assert_eq!(schema.index.as_ref().unwrap().prefix, "index_");
        assert!(loki.spec.tracing.is_none());
    }

    #[test]
    fn test_wire_names() {
        let loki: SsdLoki = serde_yaml::from_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&loki.spec).unwrap();

        assert_eq!(value["authEnabled"], false);
        assert_eq!(value["common"]["storage"]["s3"]["bucketnames"], "chunks");
        assert_eq!(value["common"]["storage"]["s3"]["s3ForcePathStyle"], true);
        assert_eq!(value["ruler"]["storage"]["type"], "s3");
        assert!(value.get("bloomBuild").is_none());
    }

    #[test]
    fn test_crd_definition() {
        let crd = SsdLoki::crd();
        assert_eq!(crd.metadata.name.as_deref(), Some("ssdlokis.loki.ssd.io"));
        assert_eq!(crd.spec.group, SSD_LOKI_GROUP);
        assert_eq!(crd.spec.names.kind, "SsdLoki");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions[0].name, SSD_LOKI_VERSION);
        assert!(crd.spec.versions[0]
            .subresources
            .as_ref()
            .and_then(|s| s.status.as_ref())
            .is_some());
    }

    #[test]
    fn test_crd_required_fields() {
        let spec = spec_schema();
        assert_eq!(required(&spec), vec!["authEnabled".to_string()]);

        let common = required(&property(&spec, "common"));
        for field in ["compactorAddress", "pathPrefix", "replicationFactor"] {
            assert!(common.contains(&field.to_string()), "common.{} not required", field);
        }
        assert!(!common.contains(&"storage".to_string()));

        let server = required(&property(&spec, "server"));
        assert_eq!(server.len(), 4);
        assert!(server.contains(&"grpcListenPort".to_string()));

        let memcached_client = required(&property(
            &property(&property(&spec, "chunkStoreConfig"), "chunkCacheConfig"),
            "memcachedClient",
        ));
        assert!(memcached_client.contains(&"timeout".to_string()));
        assert!(!memcached_client.contains(&"maxIdleConns".to_string()));
        assert!(!memcached_client.contains(&"updateInterval".to_string()));
    }

    #[test]
    fn test_crd_print_columns() {
        let crd = SsdLoki::crd();
        let columns = crd.spec.versions[0]
            .additional_printer_columns
            .clone()
            .unwrap_or_default();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Phase", "Auth", "Age"]);
        assert_eq!(columns[1].json_path, ".spec.authEnabled");
        assert_eq!(columns[1].type_, "boolean");
    }

    #[test]
    fn test_partial_section_rejected() {
        let partial = r#"
apiVersion: loki.ssd.io/v1
kind: SsdLoki
metadata:
  name: loki
spec:
  authEnabled: false
  common:
    pathPrefix: /var/loki
"#;
        assert!(serde_yaml::from_str::<SsdLoki>(partial).is_err());

        let empty = r#"
apiVersion: loki.ssd.io/v1
kind: SsdLoki
metadata:
  name: loki
spec: {}
"#;
        assert!(serde_yaml::from_str::<SsdLoki>(empty).is_err());
    }
}
