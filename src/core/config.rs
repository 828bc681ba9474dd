//! # Configuration Module / 配置模块
//!
//! The benchmark configuration, loaded from an optional `Cramer.toml` and then
//! overridden by command-line flags.
//!
//! 基准测试配置，从可选的 `Cramer.toml` 加载，然后由命令行参数覆盖。

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::core::error::BenchError;

/// Default configuration file name looked up in the working directory.
/// 在工作目录中查找的默认配置文件名。
pub const DEFAULT_CONFIG_FILE: &str = "Cramer.toml";

/// Half-open interval `[low, high)` that random entries are drawn from.
/// 随机元素取值的半开区间 `[low, high)`。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Represents the whole benchmark configuration.
/// 代表整个基准测试配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BenchConfig {
    /// The language for output messages (e.g., "en", "zh-CN").
    /// 输出消息的语言（例如 "en", "zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,

    /// Dimension `n` of the `n`×`n` coefficient matrix.
    /// `n`×`n` 系数矩阵的维度 `n`。
    #[serde(default = "default_size")]
    pub size: usize,

    /// First worker count of the sweep.
    /// 扫描的起始工作者数量。
    #[serde(default = "default_start_workers")]
    pub start_workers: usize,

    /// Last worker count of the sweep, inclusive. When absent, the number of
    /// logical cores detected on this machine is used.
    ///
    /// 扫描的最后一个工作者数量（包含）。未指定时使用本机检测到的逻辑核心数。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_workers: Option<usize>,

    /// Seed for the random generator. When absent, a fresh seed is drawn and
    /// reported so the run can be reproduced.
    ///
    /// 随机数生成器的种子。未指定时会生成新的种子并报告，以便复现运行。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Path of the results stream file.
    /// 结果流文件的路径。
    #[serde(default = "default_output")]
    pub output: String,

    /// Range of the coefficient matrix entries.
    /// 系数矩阵元素的取值范围。
    #[serde(default = "default_matrix_range")]
    pub matrix_range: ValueRange,

    /// Range of the right-hand-side vector entries.
    /// 右端向量元素的取值范围。
    #[serde(default = "default_vector_range")]
    pub vector_range: ValueRange,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            size: default_size(),
            start_workers: default_start_workers(),
            end_workers: None,
            seed: None,
            output: default_output(),
            matrix_range: default_matrix_range(),
            vector_range: default_vector_range(),
        }
    }
}

impl BenchConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The inclusive worker-count range, falling back to `detected_cores` for the upper end.
    /// 包含端点的工作者数量范围，上限缺省时使用 `detected_cores`。
    pub fn worker_range(&self, detected_cores: usize) -> RangeInclusive<usize> {
        self.start_workers..=self.end_workers.unwrap_or(detected_cores.max(1))
    }

    /// Rejects configurations that cannot produce a valid sweep.
    ///
    /// 拒绝无法产生有效扫描的配置。
    ///
    /// # Errors
    /// `InvalidInput` for a zero size, a zero start, an end below the start,
    /// or an empty value range.
    pub fn validate(&self, detected_cores: usize) -> Result<(), BenchError> {
        if self.size == 0 {
            return Err(BenchError::invalid("matrix size must be at least 1"));
        }
        if self.start_workers == 0 {
            return Err(BenchError::invalid("start worker count must be at least 1"));
        }
        let range = self.worker_range(detected_cores);
        if range.is_empty() {
            return Err(BenchError::invalid(format!(
                "worker range {}..={} is empty",
                range.start(),
                range.end()
            )));
        }
        for (name, r) in [
            ("matrix_range", self.matrix_range),
            ("vector_range", self.vector_range),
        ] {
            if !(r.low.is_finite() && r.high.is_finite() && r.low < r.high) {
                return Err(BenchError::invalid(format!(
                    "{name} [{}, {}) is empty or not finite",
                    r.low, r.high
                )));
            }
        }
        Ok(())
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_size() -> usize {
    300
}

fn default_start_workers() -> usize {
    1
}

fn default_output() -> String {
    "cramer_results.txt".to_string()
}

fn default_matrix_range() -> ValueRange {
    ValueRange::new(-5.0, 5.0)
}

fn default_vector_range() -> ValueRange {
    ValueRange::new(0.0, 10.0)
}
