//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures that flow out of a sweep: per-column
//! determinants produced by workers, the per-iteration timing record, and the
//! summary of a whole sweep used by the reporters.
//!
//! 此模块定义了扫描产生的数据结构：工作者产生的每列行列式、
//! 每次迭代的计时记录，以及报告器使用的整个扫描摘要。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Determinant of the coefficient matrix with column `column` replaced by B.
/// 将第 `column` 列替换为 B 后系数矩阵的行列式。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnResult {
    pub column: usize,
    pub determinant: f64,
}

/// One timed iteration of the worker-count sweep.
/// 工作者数量扫描中一次计时的迭代。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Number of parallel workers used / 使用的并行工作者数量
    pub worker_count: usize,
    /// Wall-clock seconds of the dispatch+join window / 分发+汇合窗口的墙钟秒数
    pub elapsed_seconds: f64,
}

impl BenchmarkRecord {
    pub fn new(worker_count: usize, elapsed: Duration) -> Self {
        Self {
            worker_count,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    /// `baseline / self`; `None` when this record took no measurable time.
    pub fn speedup_over(&self, baseline: &BenchmarkRecord) -> Option<f64> {
        (self.elapsed_seconds > 0.0).then(|| baseline.elapsed_seconds / self.elapsed_seconds)
    }

    /// Speed-up divided by worker count.
    pub fn efficiency_over(&self, baseline: &BenchmarkRecord) -> Option<f64> {
        self.speedup_over(baseline)
            .map(|s| s / self.worker_count as f64)
    }
}

/// Everything one iteration produced: its timing record plus the column
/// results collected from all sinks, sorted by column index.
///
/// 一次迭代产生的全部内容：计时记录以及从所有通道收集并按列索引排序的列结果。
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    pub record: BenchmarkRecord,
    pub columns: Vec<ColumnResult>,
}

/// How a sweep ended.
/// 扫描的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepStatus {
    /// Every worker count in the range was run.
    /// 范围内的每个工作者数量都已运行。
    Completed,
    /// Stopped by a shutdown signal after finishing the in-flight iteration.
    /// 在完成当前迭代后被关闭信号停止。
    Interrupted,
}

/// A record enriched with speed-up and efficiency against the first record of the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub worker_count: usize,
    pub elapsed_seconds: f64,
    pub speedup: Option<f64>,
    pub efficiency: Option<f64>,
}

/// Summary of a completed or interrupted sweep, consumed by the console,
/// JSON and HTML reporters.
///
/// 已完成或被中断的扫描的摘要，供控制台、JSON 和 HTML 报告器使用。
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub size: usize,
    pub seed: u64,
    pub base_determinant: f64,
    pub detected_cores: usize,
    pub started_at: DateTime<Utc>,
    pub status: SweepStatus,
    pub records: Vec<RecordRow>,
}

impl SweepReport {
    pub fn new(
        size: usize,
        seed: u64,
        base_determinant: f64,
        detected_cores: usize,
        started_at: DateTime<Utc>,
        status: SweepStatus,
        records: &[BenchmarkRecord],
    ) -> Self {
        let baseline = records.first().copied();
        let records = records
            .iter()
            .map(|r| RecordRow {
                worker_count: r.worker_count,
                elapsed_seconds: r.elapsed_seconds,
                speedup: baseline.and_then(|b| r.speedup_over(&b)),
                efficiency: baseline.and_then(|b| r.efficiency_over(&b)),
            })
            .collect();

        Self {
            size,
            seed,
            base_determinant,
            detected_cores,
            started_at,
            status,
            records,
        }
    }

    /// The row with the lowest elapsed time, if any.
    pub fn fastest(&self) -> Option<&RecordRow> {
        self.records
            .iter()
            .min_by(|a, b| a.elapsed_seconds.total_cmp(&b.elapsed_seconds))
    }
}
