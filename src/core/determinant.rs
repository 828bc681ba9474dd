//! # Determinant Engine Module / 行列式引擎模块
//!
//! Determinant by Gaussian elimination with partial pivoting, O(n³) time and
//! O(n²) extra space for the private working copy.
//!
//! 基于部分主元高斯消元的行列式计算，时间复杂度 O(n³)，
//! 私有工作副本需要 O(n²) 额外空间。

use crate::core::matrix::Matrix;

/// Magnitude a candidate pivot must exceed. Only applied during pivot search;
/// the returned product is never clamped.
///
/// 候选主元必须超过的绝对值阈值。仅在主元搜索时使用，返回的乘积不会被截断。
pub const PIVOT_EPSILON: f64 = 1e-9;

/// Computes `det(m)` on a private copy; `m` is never mutated.
///
/// For each pivot column `i` the first row at or below `i` whose entry exceeds
/// [`PIVOT_EPSILON`] is swapped into place (flipping the sign), multiplied into
/// the running product, and used to eliminate column `i` from the rows below.
/// When no such row exists the matrix is singular and `0.0` is returned at once.
///
/// 在私有副本上计算 `det(m)`；`m` 永远不会被修改。
/// 对每个主元列 `i`，将第 `i` 行及其以下第一个绝对值超过 [`PIVOT_EPSILON`] 的行
/// 交换到位（翻转符号），乘入累积乘积，并用它消去下方各行的第 `i` 列。
/// 若不存在这样的行，则矩阵奇异，立即返回 `0.0`。
pub fn determinant(m: &Matrix) -> f64 {
    let mut rows = m.clone().into_rows();
    let n = rows.len();
    let mut det = 1.0;

    for i in 0..n {
        let Some(pivot) = (i..n).find(|&r| rows[r][i].abs() > PIVOT_EPSILON) else {
            return 0.0;
        };

        if pivot != i {
            rows.swap(i, pivot);
            det = -det;
        }

        det *= rows[i][i];

        let (upper, lower) = rows.split_at_mut(i + 1);
        let pivot_row = &upper[i];
        for row in lower.iter_mut() {
            let factor = row[i] / pivot_row[i];
            // Columns left of i are already zero.
            for (value, &p) in row[i..].iter_mut().zip(&pivot_row[i..]) {
                *value -= factor * p;
            }
        }
    }

    det
}
