//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable sweep report.
//!
//! 机器可读的扫描报告。

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::models::SweepReport;
use crate::infra::fs::write_atomically;

/// Serializes the report as pretty-printed JSON.
pub fn render_json_report(report: &SweepReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize sweep report")
}

/// Writes the JSON report to `output_path`.
/// 将 JSON 报告写入 `output_path`。
pub fn generate_json_report(report: &SweepReport, output_path: &Path) -> Result<()> {
    let json = render_json_report(report)?;
    write_atomically(output_path, &json)
}
