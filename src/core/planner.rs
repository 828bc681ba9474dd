//! # Column Partition Planner Module / 列划分计划模块
//!
//! Splits the `n` columns of the coefficient matrix into contiguous chunks,
//! one per worker. Chunks are `ceil(n / W)` wide, so when `W` does not divide
//! `n` the trailing workers get shorter, possibly empty, ranges.
//!
//! 将系数矩阵的 `n` 列划分为连续的块，每个工作者一块。
//! 块宽为 `ceil(n / W)`，因此当 `W` 不能整除 `n` 时，
//! 靠后的工作者会得到更短甚至为空的范围。

use std::fmt;
use std::ops::Range;

use crate::core::error::BenchError;

/// Half-open column range `[start, end)` assigned to one worker.
/// 分配给一个工作者的半开列范围 `[start, end)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The columns as an iterator-friendly range. Empty when `start >= end`.
    pub fn columns(&self) -> Range<usize> {
        self.start..self.end.max(self.start)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Returns the column range of worker `worker_index` out of `worker_count`.
///
/// `chunk = ceil(n / W)`, `start = p * chunk`, `end = min((p + 1) * chunk, n)`.
/// When `W > n` some trailing workers receive an empty range; that is a
/// valid no-op assignment, not an error.
///
/// 返回 `worker_count` 个工作者中第 `worker_index` 个的列范围。
/// 当 `W > n` 时，部分靠后的工作者会得到空范围；这是合法的空操作分配，而不是错误。
///
/// # Errors
/// `InvalidInput` if `n` or `worker_count` is zero, or `worker_index >= worker_count`.
pub fn partition(
    n: usize,
    worker_count: usize,
    worker_index: usize,
) -> Result<ColumnRange, BenchError> {
    if n == 0 {
        return Err(BenchError::invalid("matrix size must be at least 1"));
    }
    if worker_count == 0 {
        return Err(BenchError::invalid("worker count must be at least 1"));
    }
    if worker_index >= worker_count {
        return Err(BenchError::invalid(format!(
            "worker index {worker_index} is out of range for {worker_count} workers"
        )));
    }

    let chunk = n.div_ceil(worker_count);
    let start = (worker_index * chunk).min(n);
    let end = ((worker_index + 1) * chunk).min(n);
    Ok(ColumnRange { start, end })
}

/// Plans the ranges of every worker for one iteration, in worker-index order.
/// 为一次迭代规划所有工作者的范围，按工作者索引排序。
pub fn plan_partitions(n: usize, worker_count: usize) -> Result<Vec<ColumnRange>, BenchError> {
    if worker_count == 0 {
        return Err(BenchError::invalid("worker count must be at least 1"));
    }
    (0..worker_count)
        .map(|p| partition(n, worker_count, p))
        .collect()
}
