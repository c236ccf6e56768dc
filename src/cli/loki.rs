//! Render and apply commands

use crate::cli::display::{ApplyStatus, ObjectRow, TableRenderer};
use crate::domain::config::{apply_to_options, parse_dynamic_configs, Options};
use crate::domain::crd::SsdLoki;
use crate::infrastructure::kubernetes::resources::{build_stack, to_yaml_stream, LokiObject};
use crate::infrastructure::kubernetes::{ApplyOutcome, LokiKubeClient, LokiKubeClientImpl};
use clap::Parser;
use kube::CustomResourceExt;
use std::fs;

/// Inputs shared by render and apply
#[derive(Parser, Debug, Clone)]
pub struct StackArgs {
    /// SsdLoki manifest (YAML)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    /// Builder options file (TOML)
    /// If not provided, defaults are used and name/namespace come from the manifest
    #[arg(long, value_name = "PATH")]
    pub options: Option<String>,

    /// Dynamic configuration properties to override any option (-D key=value)
    ///
    /// Basic: loki.name, loki.namespace, loki.cluster.domain
    /// Image: loki.image, loki.image.pull-policy
    /// Ports: loki.port.http, loki.port.grpc, loki.port.memberlist
    /// Per role (write, read, backend): loki.<role>.cpu, loki.<role>.memory,
    ///   loki.<role>.pvc-size, loki.<role>.storage-class
    /// MinIO: loki.minio.root-user, loki.minio.root-password
    ///
    /// Example: -Dloki.read.pvc-size=50Gi -Dloki.write.cpu=1.5
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl StackArgs {
    /// Load the resource and resolve options: file, then resource metadata, then -D.
    pub fn load(&self) -> anyhow::Result<(SsdLoki, Options)> {
        let content = fs::read_to_string(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", self.file, e))?;
        let resource: SsdLoki = serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse SsdLoki from {}: {}", self.file, e))?;

        let options = match self.options.as_ref() {
            Some(path) => Options::from_file(path)?,
            None => Options::default(),
        };
        let mut options = options.for_resource(&resource);

        if !self.properties.is_empty() {
            let dynamic_configs = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_options(&dynamic_configs, &mut options);
        }

        options
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid options: {}", e))?;

        Ok((resource, options))
    }

    pub fn render(&self) -> anyhow::Result<(Options, Vec<LokiObject>)> {
        let (resource, options) = self.load()?;
        let objects = build_stack(&options, &resource.spec)?;
        Ok((options, objects))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<String>,

    /// Print a summary table instead of YAML
    #[arg(long)]
    pub summary: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyCommand {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,

    /// Apply the SsdLoki CustomResourceDefinition first
    #[arg(long)]
    pub install_crd: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CrdCommand {
    /// Write output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<String>,
}

impl RenderCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (options, objects) = self.stack.render()?;

        let output = if self.summary {
            let rows: Vec<ObjectRow> = objects.iter().map(ObjectRow::from_object).collect();
            TableRenderer::new().render_objects(&options.name, &rows)
        } else {
            to_yaml_stream(&objects)?
        };

        write_output(self.output.as_deref(), &output)
    }
}

impl ApplyCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let (options, objects) = self.stack.render()?;

        let client = LokiKubeClientImpl::new_with_config(
            options.namespace().to_string(),
            self.kubeconfig.clone(),
            self.context.clone(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;

        if self.install_crd {
            client.apply_crd().await?;
        }

        let outcomes = client.apply_all(&objects).await;

        let mut report = Vec::with_capacity(objects.len());
        let mut failure = None;
        for (object, outcome) in objects.iter().zip(outcomes) {
            let status = match outcome {
                ApplyOutcome::Applied => ApplyStatus::Applied,
                ApplyOutcome::Skipped => ApplyStatus::Skipped,
                ApplyOutcome::Failed(e) => {
                    failure = Some(e);
                    ApplyStatus::Failed
                }
            };
            report.push((ObjectRow::from_object(object), status));
        }

        println!(
            "{}",
            TableRenderer::new().render_apply_report(&options.name, &report)
        );

        match failure {
            Some(e) => Err(anyhow::anyhow!("Apply failed: {}", e)),
            None => {
                println!("Loki {} applied successfully!", options.name);
                Ok(())
            }
        }
    }
}

impl CrdCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let crd = serde_yaml::to_string(&SsdLoki::crd())?;
        write_output(self.output.as_deref(), &crd)
    }
}

fn write_output(path: Option<&str>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
            println!("✓ Wrote {}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}
