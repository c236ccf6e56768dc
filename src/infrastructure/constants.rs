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

/// Stack defaults
pub const DEFAULT_INSTANCE_NAME: &str = "loki";
pub const DEFAULT_IMAGE: &str = "docker.io/grafana/loki:3.1.1";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";
pub const POD_CLUSTER_DOMAIN: &str = "cluster.local";

/// Loki ports
pub const HTTP_PORT: i32 = 3100;
pub const GRPC_PORT: i32 = 9095;
pub const MEMBERLIST_PORT: i32 = 7946;
pub const PROTOCOL_TCP: &str = "TCP";

/// Port names
pub const PORT_NAME_HTTP: &str = "http-metrics";
pub const PORT_NAME_GRPC: &str = "grpc";
pub const PORT_NAME_MEMBERLIST: &str = "http-memberlist";

/// Workload policy shared by every role
pub const COMPONENT_REPLICAS: i32 = 3;
pub const PDB_MAX_UNAVAILABLE: i32 = 1;
pub const REVISION_HISTORY_LIMIT: i32 = 10;
pub const TERMINATION_GRACE_PERIOD_SECONDS: i64 = 300;
pub const POD_MANAGEMENT_POLICY_PARALLEL: &str = "Parallel";
pub const STRATEGY_TYPE_ROLLING_UPDATE: &str = "RollingUpdate";

/// Readiness probe
pub const READINESS_PATH: &str = "/ready";
pub const READINESS_INITIAL_DELAY: i32 = 30;
pub const READINESS_TIMEOUT: i32 = 1;

/// Security context
pub const LOKI_UID: i64 = 10001;

/// Container
pub const CONTAINER_NAME_LOKI: &str = "loki";
pub const CONFIG_FILE_ARG: &str = "-config.file=/etc/loki/config/config.yaml";
pub const LEGACY_READ_MODE_ARG: &str = "-legacy-read-mode=false";

/// Volume and VolumeMount names
pub const VOLUME_NAME_CONFIG: &str = "config";
pub const VOLUME_NAME_RUNTIME_CONFIG: &str = "runtime-config";
pub const VOLUME_NAME_TMP: &str = "tmp";
pub const VOLUME_NAME_DATA: &str = "data";

/// Mount paths
pub const MOUNT_PATH_CONFIG: &str = "/etc/loki/config";
pub const MOUNT_PATH_RUNTIME_CONFIG: &str = "/etc/loki/runtime-config";
pub const MOUNT_PATH_TMP: &str = "/tmp";
pub const MOUNT_PATH_DATA: &str = "/var/loki";

/// ConfigMap keys and suffixes
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const RUNTIME_CONFIG_FILE_NAME: &str = "runtime-config.yaml";
pub const SUFFIX_RUNTIME: &str = "-runtime";
pub const SUFFIX_HEADLESS: &str = "-headless";
pub const SUFFIX_MEMBERLIST: &str = "-memberlist";
pub const SUFFIX_MINIO: &str = "-minio";

/// Default resource settings
pub const DEFAULT_PVC_SIZE: &str = "10Gi";
pub const DEFAULT_ACCESS_MODE: &str = "ReadWriteOnce";
pub const DEFAULT_RUNTIME_CONFIG: &str = "overrides: {}\n";

/// MinIO
pub const MINIO_ROOT_USER_KEY: &str = "rootUser";
pub const MINIO_ROOT_PASSWORD_KEY: &str = "rootPassword";
pub const DEFAULT_MINIO_ROOT_USER: &str = "minio";
pub const DEFAULT_MINIO_ROOT_PASSWORD: &str = "minio123";
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Resource labels
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
pub const LABEL_PART_OF: &str = "app.kubernetes.io/part-of";
pub const LABEL_NAME_VALUE: &str = "loki";
pub const LABEL_PART_OF_MEMBERLIST: &str = "memberlist";
pub const LABEL_VARIANT: &str = "variant";
pub const LABEL_SERVICE_MONITOR: &str = "prometheus.io/service-monitor";
pub const LABEL_APP: &str = "app";
pub const LABEL_APP_MINIO: &str = "minio";

/// Service settings
pub const SERVICE_TYPE_CLUSTER_IP: &str = "ClusterIP";
pub const HEADLESS_CLUSTER_IP: &str = "None";

/// Affinity topology key
pub const TOPOLOGY_KEY_HOSTNAME: &str = "kubernetes.io/hostname";

/// Server-side apply field manager
pub const FIELD_MANAGER: &str = "ssd-loki-kube";
