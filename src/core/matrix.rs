//! # Matrix Module / 矩阵模块
//!
//! A square, row-owned grid of `f64` values. Each row is its own heap
//! allocation so elimination can swap rows by moving the `Vec` handles
//! instead of copying elements.
//!
//! 一个方形的、按行持有的 `f64` 网格。每一行都是独立的堆分配，
//! 因此消元时可以通过移动 `Vec` 句柄来交换行，而无需复制元素。

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::core::error::BenchError;

/// A dense `size`×`size` matrix. Dropping it releases every row.
/// 一个稠密的 `size`×`size` 矩阵。drop 时释放所有行。
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Allocates a zero-filled `size`×`size` matrix.
    ///
    /// Allocation is fallible: running out of memory is reported as
    /// `BenchError::Allocation` instead of aborting the process.
    ///
    /// 分配一个全零的 `size`×`size` 矩阵。
    /// 分配是可失败的：内存不足会报告为 `BenchError::Allocation`，而不是中止进程。
    pub fn allocate(size: usize) -> Result<Self, BenchError> {
        if size == 0 {
            return Err(BenchError::invalid("matrix size must be at least 1"));
        }

        let mut rows = Vec::new();
        rows.try_reserve_exact(size)
            .map_err(|_| BenchError::Allocation { size })?;

        for _ in 0..size {
            let mut row = Vec::new();
            row.try_reserve_exact(size)
                .map_err(|_| BenchError::Allocation { size })?;
            row.resize(size, 0.0);
            rows.push(row);
        }

        Ok(Self { rows })
    }

    /// Builds a matrix from explicit rows. Every row must have as many entries as there are rows.
    /// 从显式给出的行构建矩阵。每行的元素个数必须等于行数。
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, BenchError> {
        if rows.is_empty() {
            return Err(BenchError::invalid("matrix size must be at least 1"));
        }
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(BenchError::invalid(format!(
                "row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }
        Ok(Self { rows })
    }

    pub fn identity(size: usize) -> Result<Self, BenchError> {
        let mut m = Self::allocate(size)?;
        for (i, row) in m.rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Ok(m)
    }

    /// Overwrites every entry with an independent uniform draw from `[low, high)`.
    ///
    /// The generator is owned by the caller and passed in explicitly; there is no
    /// process-wide random state.
    ///
    /// 用来自 `[low, high)` 的独立均匀采样覆盖每个元素。
    /// 随机数生成器由调用者持有并显式传入；不存在进程级的全局随机状态。
    pub fn fill_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        low: f64,
        high: f64,
    ) -> Result<(), BenchError> {
        let dist = uniform(low, high)?;
        for row in &mut self.rows {
            for value in row.iter_mut() {
                *value = dist.sample(rng);
            }
        }
        Ok(())
    }

    /// Deep copy with fresh row storage, using fallible allocation.
    /// 使用可失败分配的深拷贝，行存储全部重新分配。
    pub fn try_clone(&self) -> Result<Self, BenchError> {
        let mut copy = Self::allocate(self.size())?;
        for (dst, src) in copy.rows.iter_mut().zip(&self.rows) {
            dst.copy_from_slice(src);
        }
        Ok(copy)
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.rows[row][col] = value;
    }

    /// Swaps two rows by exchanging their storage handles.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Copies column `col` into `out`, reusing its buffer.
    /// 将第 `col` 列复制到 `out` 中，复用其缓冲区。
    pub fn read_column(&self, col: usize, out: &mut Vec<f64>) {
        out.clear();
        out.extend(self.rows.iter().map(|row| row[col]));
    }

    /// Overwrites column `col` with `values`, in row order.
    ///
    /// The caller bounds-checks: `values.len()` must equal `size()` and
    /// `col` must be below `size()`; violating either panics on the index.
    ///
    /// 按行顺序用 `values` 覆盖第 `col` 列。
    /// 由调用者负责边界检查：`values.len()` 必须等于 `size()`，且 `col` 必须小于 `size()`。
    pub fn replace_column(&mut self, values: &[f64], col: usize) {
        debug_assert_eq!(values.len(), self.size());
        for (row, &value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

/// Allocates a length-`len` vector filled uniformly from `[low, high)`.
/// 分配一个长度为 `len` 的向量，并用 `[low, high)` 上的均匀分布填充。
pub fn random_vector<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    low: f64,
    high: f64,
) -> Result<Vec<f64>, BenchError> {
    if len == 0 {
        return Err(BenchError::invalid("vector length must be at least 1"));
    }
    let dist = uniform(low, high)?;
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| BenchError::Allocation { size: len })?;
    values.extend((0..len).map(|_| dist.sample(rng)));
    Ok(values)
}

fn uniform(low: f64, high: f64) -> Result<Uniform<f64>, BenchError> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(BenchError::invalid(format!(
            "value range [{low}, {high}) is empty or not finite"
        )));
    }
    Ok(Uniform::new(low, high))
}
