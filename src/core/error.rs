//! # Error Taxonomy Module / 错误分类模块
//!
//! Typed failures of the benchmark engine. The CLI layer wraps these in
//! `anyhow` with context; the engine itself only ever returns `BenchError`.
//!
//! 基准测试引擎的类型化错误。CLI 层使用 `anyhow` 添加上下文，
//! 引擎本身只返回 `BenchError`。

use thiserror::Error;

use crate::core::sink::SinkKey;

/// Every way a sweep can fail. All of them are fatal to the enclosing sweep.
/// 扫描可能失败的所有方式。它们对所在的扫描都是致命的。
#[derive(Debug, Error)]
pub enum BenchError {
    /// The base determinant is within epsilon of zero, so the system has no unique solution.
    /// 基础行列式在 epsilon 范围内接近零，方程组没有唯一解。
    #[error("coefficient matrix is singular (det(A) = {determinant:e}); no unique solution")]
    SingularMatrix { determinant: f64 },

    /// Storage for an `size`×`size` matrix could not be obtained.
    /// 无法为 `size`×`size` 矩阵分配存储。
    #[error("failed to allocate a {size}x{size} matrix")]
    Allocation { size: usize },

    /// Rejected at Setup: zero matrix size, zero workers, inverted ranges.
    /// 在初始化阶段被拒绝：矩阵大小为零、工作者为零、范围颠倒。
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A worker task returned an error or panicked.
    /// 工作任务返回错误或发生 panic。
    #[error("worker {worker_index} of {worker_count} failed: {reason}")]
    WorkerFailed {
        worker_count: usize,
        worker_index: usize,
        reason: String,
    },

    /// The drained sinks did not report every column exactly once.
    /// `missing` counts columns nobody reported; `duplicate_or_unknown` counts
    /// results for a column already seen or outside `0..expected`.
    ///
    /// 汇总的结果通道没有恰好报告每一列一次。
    /// `missing` 统计无人报告的列数；`duplicate_or_unknown` 统计重复或超出 `0..expected` 的结果数。
    #[error(
        "iteration with {worker_count} workers is incomplete: {missing} of {expected} columns missing, \
         {duplicate_or_unknown} duplicate or out-of-range results"
    )]
    IncompleteIteration {
        worker_count: usize,
        expected: usize,
        missing: usize,
        duplicate_or_unknown: usize,
    },

    #[error("result sink {0} was closed before the worker finished publishing")]
    SinkClosed(SinkKey),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Convenience constructor for `InvalidInput`.
    pub fn invalid(message: impl Into<String>) -> Self {
        BenchError::InvalidInput(message.into())
    }
}
