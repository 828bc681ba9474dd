//! # Worker Task Module / 工作任务模块
//!
//! One worker computes the Cramer's Rule numerators for its column range.
//! It works on a private deep copy of A, substituting B into one column at a
//! time and restoring that column before moving on.
//!
//! 一个工作者为其列范围计算克莱姆法则的分子。
//! 它在 A 的私有深拷贝上工作，每次把 B 代入一列，并在继续之前恢复该列。

use crate::core::determinant::determinant;
use crate::core::error::BenchError;
use crate::core::matrix::Matrix;
use crate::core::models::ColumnResult;
use crate::core::planner::ColumnRange;
use crate::core::sink::ResultSink;

/// Runs one worker to completion and returns how many columns it published.
///
/// An empty `range` is a valid assignment: nothing is copied or published.
/// The private copy is dropped before returning, on success and on error.
///
/// 运行一个工作者直到完成，返回它发布的列数。
/// 空的 `range` 是合法的分配：不会复制或发布任何内容。
/// 无论成功还是出错，私有副本都会在返回前被释放。
///
/// # Errors
/// * `Allocation` if the private copy cannot be allocated
/// * `SinkClosed` if the orchestrator dropped the receiving end early
pub fn run_worker(
    matrix: &Matrix,
    rhs: &[f64],
    range: ColumnRange,
    sink: &ResultSink,
) -> Result<usize, BenchError> {
    if range.is_empty() {
        return Ok(0);
    }
    if rhs.len() != matrix.size() || range.end > matrix.size() {
        return Err(BenchError::invalid(format!(
            "range {} with vector of length {} does not fit a {}x{} matrix",
            range,
            rhs.len(),
            matrix.size(),
            matrix.size()
        )));
    }

    let mut local = matrix.try_clone()?;
    let mut saved = Vec::with_capacity(local.size());

    for column in range.columns() {
        local.read_column(column, &mut saved);
        local.replace_column(rhs, column);
        let value = determinant(&local);
        local.replace_column(&saved, column);

        sink.publish(ColumnResult {
            column,
            determinant: value,
        })?;
    }

    Ok(range.len())
}
