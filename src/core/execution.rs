//! # Benchmark Orchestration Module / 基准测试编排模块
//!
//! This module drives the worker-count sweep. For every worker count it fans
//! the columns out to freshly spawned blocking tasks, waits on a full join
//! barrier, drains the per-worker sinks, and times the dispatch+join window.
//!
//! 此模块驱动工作者数量扫描。对每个工作者数量，它将各列分发给新创建的阻塞任务，
//! 在完整的汇合屏障上等待，读取每个工作者的结果通道，并对分发+汇合窗口计时。
//!
//! ## Lifecycle / 生命周期
//!
//! - **Setup**: build A and B, compute det(A), reject a singular system
//! - **Iterate**: dispatch, join, record, cleanup for each worker count
//! - **Teardown**: dropping the [`Sweep`] releases A and B
//!
//! - **初始化**：构建 A 和 B，计算 det(A)，拒绝奇异方程组
//! - **迭代**：对每个工作者数量执行分发、汇合、记录、清理
//! - **收尾**：drop [`Sweep`] 即释放 A 和 B

use futures::future::join_all;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::core::{
    config::BenchConfig,
    determinant::{PIVOT_EPSILON, determinant},
    error::BenchError,
    matrix::{Matrix, random_vector},
    models::{BenchmarkRecord, ColumnResult, IterationOutcome, SweepStatus},
    planner::{ColumnRange, plan_partitions},
    sink::{self, ResultSink, SinkKey, SinkReceiver, next_run_id},
    worker::run_worker,
};

/// Signature of the per-worker task body. [`run_worker`] unless replaced with
/// [`Sweep::with_worker`].
pub type WorkerFn = fn(&Matrix, &[f64], ColumnRange, &ResultSink) -> Result<usize, BenchError>;

/// Receives progress from [`Sweep::run`]. Returning an error from
/// `on_iteration_end` aborts the sweep.
///
/// 接收来自 [`Sweep::run`] 的进度。`on_iteration_end` 返回错误会中止扫描。
pub trait SweepObserver {
    fn on_iteration_start(&mut self, _worker_count: usize) {}

    fn on_iteration_end(&mut self, outcome: &IterationOutcome) -> Result<(), BenchError>;
}

/// Observer that only keeps the records, in sweep order.
#[derive(Debug, Default)]
pub struct RecordCollector {
    pub records: Vec<BenchmarkRecord>,
}

impl SweepObserver for RecordCollector {
    fn on_iteration_end(&mut self, outcome: &IterationOutcome) -> Result<(), BenchError> {
        self.records.push(outcome.record);
        Ok(())
    }
}

/// The state owned by the orchestrator for the lifetime of one sweep:
/// read-only A and B shared with workers, plus the base determinant.
///
/// 编排器在一次扫描生命周期内持有的状态：与工作者共享的只读 A 和 B，以及基础行列式。
#[derive(Debug)]
pub struct Sweep {
    run_id: u64,
    matrix: Arc<Matrix>,
    rhs: Arc<[f64]>,
    base_determinant: f64,
    work: WorkerFn,
}

impl Sweep {
    /// Setup: fills A and B from `rng` using the configured ranges, then
    /// computes and checks the base determinant.
    ///
    /// 初始化：使用配置的范围从 `rng` 填充 A 和 B，然后计算并检查基础行列式。
    pub fn setup<R: Rng + ?Sized>(config: &BenchConfig, rng: &mut R) -> Result<Self, BenchError> {
        let mut matrix = Matrix::allocate(config.size)?;
        matrix.fill_random(rng, config.matrix_range.low, config.matrix_range.high)?;
        let rhs = random_vector(
            rng,
            config.size,
            config.vector_range.low,
            config.vector_range.high,
        )?;
        Self::from_parts(matrix, rhs)
    }

    /// Setup from an explicit system `A x = B`.
    ///
    /// # Errors
    /// * `InvalidInput` if `rhs` does not match the matrix size
    /// * `SingularMatrix` if `|det(A)| <= PIVOT_EPSILON`
    pub fn from_parts(matrix: Matrix, rhs: Vec<f64>) -> Result<Self, BenchError> {
        if rhs.len() != matrix.size() {
            return Err(BenchError::invalid(format!(
                "right-hand side has {} entries, expected {}",
                rhs.len(),
                matrix.size()
            )));
        }

        let base_determinant = determinant(&matrix);
        if base_determinant.abs() <= PIVOT_EPSILON {
            return Err(BenchError::SingularMatrix {
                determinant: base_determinant,
            });
        }

        Ok(Self {
            run_id: next_run_id(),
            matrix: Arc::new(matrix),
            rhs: rhs.into(),
            base_determinant,
            work: run_worker,
        })
    }

    /// Replaces the task body run by every worker.
    /// 替换每个工作者运行的任务体。
    pub fn with_worker(mut self, work: WorkerFn) -> Self {
        self.work = work;
        self
    }

    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    pub fn base_determinant(&self) -> f64 {
        self.base_determinant
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Runs one iteration with `worker_count` workers.
    ///
    /// All workers are spawned before any is awaited. The join is all-or-nothing:
    /// every task is awaited even when an earlier one failed, so no task of this
    /// iteration outlives the call. Sinks are drained only after the join and
    /// dropped before returning.
    ///
    /// 使用 `worker_count` 个工作者运行一次迭代。
    /// 所有工作者在等待之前全部创建。汇合是全有或全无的：即使前面的任务失败，
    /// 也会等待每一个任务，因此本次迭代的任务不会在调用结束后继续存活。
    /// 结果通道只在汇合之后读取，并在返回前释放。
    ///
    /// # Errors
    /// * `InvalidInput` if `worker_count` is zero
    /// * `WorkerFailed` for the lowest-indexed worker that errored or panicked
    /// * `IncompleteIteration` if the sinks do not cover every column exactly once
    pub async fn run_iteration(&self, worker_count: usize) -> Result<IterationOutcome, BenchError> {
        let n = self.size();
        let ranges = plan_partitions(n, worker_count)?;

        let mut receivers = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);

        let started = Instant::now();
        for (worker_index, range) in ranges.into_iter().enumerate() {
            let (sink, receiver) = sink::open(SinkKey {
                run_id: self.run_id,
                worker_count,
                worker_index,
            });
            receivers.push(receiver);

            let matrix = Arc::clone(&self.matrix);
            let rhs = Arc::clone(&self.rhs);
            let work = self.work;
            handles.push(tokio::task::spawn_blocking(move || {
                work(&matrix, &rhs, range, &sink)
            }));
        }

        let joined = join_all(handles).await;
        let elapsed = started.elapsed();

        inspect_joined(worker_count, joined)?;
        let columns = collect_columns(n, worker_count, receivers)?;

        Ok(IterationOutcome {
            record: BenchmarkRecord::new(worker_count, elapsed),
            columns,
        })
    }

    /// Runs the sweep over `workers` in ascending order, one iteration at a time.
    ///
    /// `stop` is checked before each iteration only; an iteration in flight is
    /// always finished and reported before the sweep returns `Interrupted`.
    ///
    /// 按升序逐个运行 `workers` 范围内的扫描。
    /// 只在每次迭代之前检查 `stop`；正在进行的迭代总会完成并报告，然后扫描才返回 `Interrupted`。
    pub async fn run<O: SweepObserver + ?Sized>(
        &self,
        workers: RangeInclusive<usize>,
        stop: &CancellationToken,
        observer: &mut O,
    ) -> Result<SweepStatus, BenchError> {
        if *workers.start() == 0 {
            return Err(BenchError::invalid("worker count must be at least 1"));
        }
        if workers.is_empty() {
            return Err(BenchError::invalid(format!(
                "worker range {}..={} is empty",
                workers.start(),
                workers.end()
            )));
        }

        for worker_count in workers {
            if stop.is_cancelled() {
                return Ok(SweepStatus::Interrupted);
            }
            observer.on_iteration_start(worker_count);
            let outcome = self.run_iteration(worker_count).await?;
            observer.on_iteration_end(&outcome)?;
        }

        Ok(SweepStatus::Completed)
    }
}

/// Checks the joined worker outcomes, given in worker-index order.
///
/// Every outcome has already been awaited; the first failure by index is
/// reported, whether the worker returned an error or panicked.
///
/// 检查按工作者索引排序的汇合结果。所有结果都已等待完毕；
/// 按索引报告第一个失败，无论工作者是返回错误还是发生 panic。
pub fn inspect_joined(
    worker_count: usize,
    joined: Vec<Result<Result<usize, BenchError>, JoinError>>,
) -> Result<(), BenchError> {
    for (worker_index, outcome) in joined.into_iter().enumerate() {
        let reason = match outcome {
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => e.to_string(),
            Err(e) if e.is_panic() => format!("task panicked: {e}"),
            Err(e) => format!("task did not complete: {e}"),
        };
        return Err(BenchError::WorkerFailed {
            worker_count,
            worker_index,
            reason,
        });
    }
    Ok(())
}

/// Drains every sink and checks that columns `0..n` were each reported exactly once.
/// The result is ordered by column index regardless of which worker produced it.
///
/// 读取所有结果通道，并检查列 `0..n` 各被报告恰好一次。
/// 结果按列索引排序，与产生它的工作者无关。
pub fn collect_columns(
    n: usize,
    worker_count: usize,
    receivers: Vec<SinkReceiver>,
) -> Result<Vec<ColumnResult>, BenchError> {
    let mut slots: Vec<Option<f64>> = vec![None; n];
    let mut duplicate_or_unknown = 0;

    for receiver in receivers {
        for result in receiver.drain() {
            match slots.get_mut(result.column) {
                Some(slot) if slot.is_none() => *slot = Some(result.determinant),
                _ => duplicate_or_unknown += 1,
            }
        }
    }

    let missing = slots.iter().filter(|slot| slot.is_none()).count();
    if missing > 0 || duplicate_or_unknown > 0 {
        return Err(BenchError::IncompleteIteration {
            worker_count,
            expected: n,
            missing,
            duplicate_or_unknown,
        });
    }

    Ok(slots
        .into_iter()
        .enumerate()
        .filter_map(|(column, value)| {
            value.map(|determinant| ColumnResult {
                column,
                determinant,
            })
        })
        .collect())
}
