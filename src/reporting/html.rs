//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML benchmark reports.
//! It creates a standalone styled HTML file with the run parameters and
//! a table of per-worker-count timings.
//!
//! 此模块处理 HTML 基准测试报告的生成。
//! 它创建一个独立的样式化 HTML 文件，包含运行参数和每个工作者数量的计时表格。

use anyhow::Result;
use std::path::Path;

use crate::core::models::{SweepReport, SweepStatus};
use crate::infra::fs::write_atomically;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = "\
body{font-family:-apple-system,Segoe UI,Helvetica,Arial,sans-serif;margin:2em;color:#222}\
h1{font-size:1.6em}\
.summary-container{display:flex;gap:1.5em;margin:1em 0 2em}\
.summary-item{display:flex;flex-direction:column;padding:.8em 1.2em;border-radius:6px;background:#f3f5f7}\
.summary-item .count{font-size:1.3em;font-weight:600}\
.summary-item .label{font-size:.85em;color:#666}\
table{border-collapse:collapse;min-width:32em}\
th,td{padding:.45em .9em;border-bottom:1px solid #ddd;text-align:right}\
th{background:#fafafa}\
tr.fastest td{background:#e8f7ec;font-weight:600}\
.interrupted{color:#b26a00}";

/// Renders the report as a complete HTML document.
///
/// 将报告渲染为完整的 HTML 文档。
pub fn render_html_report(report: &SweepReport, locale: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        escape_html(&t!("html_report_title", locale = locale))
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style></head><body>");
    html.push_str(&format!(
        "<h1>{}</h1>",
        escape_html(&t!("html_report_title", locale = locale))
    ));

    if report.status == SweepStatus::Interrupted {
        html.push_str(&format!(
            "<p class='interrupted'>{}</p>",
            escape_html(&t!("html_report_interrupted", locale = locale))
        ));
    }

    let summary = [
        (report.size.to_string(), t!("html_report_size", locale = locale)),
        (report.seed.to_string(), t!("html_report_seed", locale = locale)),
        (
            format!("{:e}", report.base_determinant),
            t!("html_report_det", locale = locale),
        ),
        (
            report.detected_cores.to_string(),
            t!("html_report_cores", locale = locale),
        ),
        (
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            t!("html_report_started", locale = locale),
        ),
    ];
    html.push_str("<div class='summary-container'>");
    for (value, label) in &summary {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count'>{}</span><span class='label'>{}</span></div>",
            escape_html(value),
            escape_html(label)
        ));
    }
    html.push_str("</div>");

    html.push_str("<table><thead><tr>");
    let headers = [
        t!("col_workers", locale = locale),
        t!("col_time", locale = locale),
        t!("col_speedup", locale = locale),
        t!("col_efficiency", locale = locale),
    ];
    for header in &headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead><tbody>");

    let fastest = report.fastest().map(|r| r.worker_count);
    for row in &report.records {
        let class = if Some(row.worker_count) == fastest {
            " class='fastest'"
        } else {
            ""
        };
        let speedup = row
            .speedup
            .map(|s| format!("{s:.2}x"))
            .unwrap_or_else(|| "N/A".to_string());
        let efficiency = row
            .efficiency
            .map(|e| format!("{:.1}%", e * 100.0))
            .unwrap_or_else(|| "N/A".to_string());
        html.push_str(&format!(
            "<tr{}><td>{}</td><td>{:.4}</td><td>{}</td><td>{}</td></tr>",
            class, row.worker_count, row.elapsed_seconds, speedup, efficiency
        ));
    }

    html.push_str("</tbody></table></body></html>");
    html
}

/// Generates the HTML report at `output_path`.
///
/// # Errors / 错误
/// This function will return an error if the output file cannot be written.
/// 如果无法写入输出文件，此函数将返回错误。
pub fn generate_html_report(report: &SweepReport, output_path: &Path, locale: &str) -> Result<()> {
    let html = render_html_report(report, locale);
    write_atomically(output_path, &html)
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
