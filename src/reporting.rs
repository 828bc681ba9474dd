//! # Reporting Module / 报告模块
//!
//! This module handles the display and persistence of benchmark reports in multiple formats.
//! It provides colorful progress and summary output in the console, plus optional
//! JSON and HTML reports, all with internationalization support.
//!
//! 此模块处理多种格式的基准测试报告的显示和保存。
//! 它提供控制台中的彩色进度和摘要输出，以及可选的 JSON 和 HTML 报告，均支持国际化。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::print_summary;
pub use html::generate_html_report;
pub use json::generate_json_report;
