//! Table rendering for CLI output

use super::{ApplyStatus, ColorTheme, StatusIcon};
use crate::infrastructure::kubernetes::resources::LokiObject;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// One rendered object, reduced to what the summary shows
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRow {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub detail: String,
}

impl ObjectRow {
    pub fn from_object(object: &LokiObject) -> Self {
        Self {
            kind: object.kind().to_string(),
            name: object.name().to_string(),
            namespace: object.namespace().unwrap_or("-").to_string(),
            detail: describe(object),
        }
    }
}

fn describe(object: &LokiObject) -> String {
    match object {
        LokiObject::StatefulSet(sts) => {
            let Some(spec) = sts.spec.as_ref() else {
                return String::new();
            };
            let storage = spec
                .volume_claim_templates
                .as_ref()
                .and_then(|claims| claims.first())
                .and_then(|claim| claim.spec.as_ref())
                .and_then(|spec| spec.resources.as_ref())
                .and_then(|resources| resources.requests.as_ref())
                .and_then(|requests| requests.get("storage"))
                .map(|quantity| quantity.0.clone())
                .unwrap_or_else(|| "-".to_string());
            format!("replicas {}, data {}", spec.replicas.unwrap_or(1), storage)
        }
        LokiObject::Service(svc) => {
            let Some(spec) = svc.spec.as_ref() else {
                return String::new();
            };
            let ports = spec
                .ports
                .iter()
                .flatten()
                .map(|p| format!("{}:{}", p.name.as_deref().unwrap_or("-"), p.port))
                .collect::<Vec<_>>()
                .join(",");
            let kind = if spec.cluster_ip.as_deref() == Some("None") {
                "headless"
            } else {
                spec.type_.as_deref().unwrap_or("ClusterIP")
            };
            format!("{} {}", kind, ports)
        }
        LokiObject::PodDisruptionBudget(pdb) => {
            match pdb.spec.as_ref().and_then(|s| s.max_unavailable.as_ref()) {
                Some(IntOrString::Int(n)) => format!("maxUnavailable {}", n),
                Some(IntOrString::String(s)) => format!("maxUnavailable {}", s),
                None => String::new(),
            }
        }
        LokiObject::ConfigMap(cm) => cm
            .data
            .iter()
            .flat_map(|data| data.keys().cloned())
            .collect::<Vec<_>>()
            .join(","),
        LokiObject::Secret(secret) => format!(
            "{}, {} keys",
            secret.type_.as_deref().unwrap_or("Opaque"),
            secret.data.as_ref().map(|d| d.len()).unwrap_or(0)
        ),
        LokiObject::ServiceAccount(sa) => {
            if sa.automount_service_account_token == Some(true) {
                "automount token".to_string()
            } else {
                String::new()
            }
        }
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render rendered objects as a formatted table
    pub fn render_objects(&self, instance: &str, rows: &[ObjectRow]) -> String {
        if rows.is_empty() {
            return "No objects rendered".to_string();
        }

        let mut table = Self::base_table(vec!["KIND", "NAME", "NAMESPACE", "DETAIL"]);
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.kind).fg(self.theme.get_kind_color(&row.kind)),
                Cell::new(&row.name),
                Cell::new(&row.namespace),
                Cell::new(&row.detail),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Loki {} {} ─╮\n",
            instance,
            format!("[{} objects]", rows.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Render the outcome of an apply, one row per object
    pub fn render_apply_report(&self, instance: &str, rows: &[(ObjectRow, ApplyStatus)]) -> String {
        let mut table = Self::base_table(vec!["KIND", "NAME", "NAMESPACE", "STATUS"]);
        for (row, status) in rows {
            table.add_row(vec![
                Cell::new(&row.kind).fg(self.theme.get_kind_color(&row.kind)),
                Cell::new(&row.name),
                Cell::new(&row.namespace),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_apply_icon(*status),
                    StatusIcon::get_status_text(*status)
                ))
                .fg(self.theme.get_apply_color(*status))
                .set_alignment(CellAlignment::Center),
            ]);
        }

        let applied = rows
            .iter()
            .filter(|(_, status)| *status == ApplyStatus::Applied)
            .count();

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Loki {} {} ─╮\n",
            instance,
            format!("[{}/{} applied]", applied, rows.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Applied  {} Failed  {} Skipped\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::ERROR.red(),
            StatusIcon::PENDING.bright_black()
        ));
        output
    }

    fn base_table(header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                header
                    .into_iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Options;
    use crate::infrastructure::kubernetes::resources::build_read;

    #[test]
    fn test_render_empty() {
        let renderer = TableRenderer::new();
        let output = renderer.render_objects("loki", &[]);
        assert!(output.contains("No objects rendered"));
    }

    #[test]
    fn test_rows_for_read_role() {
        let objects = build_read(&Options::default()).unwrap();
        let rows: Vec<ObjectRow> = objects.iter().map(ObjectRow::from_object).collect();

        assert_eq!(rows[0].kind, "StatefulSet");
        assert_eq!(rows[0].detail, "replicas 3, data 10Gi");
        assert_eq!(rows[1].detail, "ClusterIP http-metrics:3100,grpc:9095");
        assert_eq!(rows[2].detail, "headless http-metrics:3100,grpc:9095");
        assert_eq!(rows[3].detail, "maxUnavailable 1");

        let output = TableRenderer::new().render_objects("loki", &rows);
        assert!(output.contains("loki-read-headless"));
        assert!(output.contains("PodDisruptionBudget"));
    }

    #[test]
    fn test_render_apply_report() {
        let objects = build_read(&Options::default()).unwrap();
        let rows = vec![
            (ObjectRow::from_object(&objects[0]), ApplyStatus::Applied),
            (ObjectRow::from_object(&objects[1]), ApplyStatus::Failed),
            (ObjectRow::from_object(&objects[2]), ApplyStatus::Skipped),
        ];
        let output = TableRenderer::new().render_apply_report("loki", &rows);
        assert!(output.contains("Applied"));
        assert!(output.contains("Failed"));
        assert!(output.contains("Skipped"));
    }
}
