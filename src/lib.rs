//! # Cramer Bench Library / Cramer Bench 库
//!
//! This library provides the core functionality for the `cramer-bench` tool,
//! which times a Cramer's Rule solve while the column determinants are spread
//! over an increasing number of parallel workers.
//!
//! 此库为 `cramer-bench` 工具提供核心功能，
//! 它在将列行列式分配给越来越多的并行工作者时，对克莱姆法则求解进行计时。
//!
//! ## Modules / 模块
//!
//! - `core` - Matrix, determinant engine, partition planner, workers and the sweep orchestrator
//! - `infra` - Infrastructure services like results-file output and host probing
//! - `reporting` - Console, JSON and HTML reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 矩阵、行列式引擎、划分计划器、工作者和扫描编排器
//! - `infra` - 基础设施服务，如结果文件输出和主机探测
//! - `reporting` - 控制台、JSON 和 HTML 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::execution;
pub use core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Returns the locales bundled with the binary.
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}

/// Maps a requested locale onto a bundled one.
///
/// The full tag is tried first (e.g., "zh-CN"), then just the language code
/// (e.g., "en" from "en-US"), and finally the default language ("en").
///
/// 将请求的语言区域映射到内置的语言区域。
/// 首先尝试完整标签（例如 "zh-CN"），然后仅尝试语言代码（例如从 "en-US" 取 "en"），
/// 最后回退到默认语言（"en"）。
pub fn resolve_locale(requested: &str) -> String {
    let available = available_locales();

    if available.iter().any(|candidate| *candidate == requested) {
        return requested.to_string();
    }

    requested
        .split(['-', '_'])
        .next()
        .and_then(|lang| {
            available
                .iter()
                .find(|candidate| {
                    **candidate == lang
                        || candidate
                            .split('-')
                            .next()
                            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(lang))
                })
                .copied()
        })
        .unwrap_or("en")
        .to_string()
}

/// Detects the system locale and resolves it against the bundled locales.
/// Falls back to "en" if detection fails.
///
/// 检测系统语言区域并将其与内置语言区域匹配。检测失败时回退到 "en"。
pub fn system_locale() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    resolve_locale(&locale)
}
