//! # Sweep Integration Tests / 扫描集成测试
//!
//! These tests drive the orchestrator end to end: setup, per-iteration
//! dispatch and join, result collection across worker counts, cancellation
//! between iterations and failure propagation.
//!
//! 这些测试端到端地驱动编排器：初始化、每次迭代的分发与汇合、
//! 跨工作者数量的结果收集、迭代之间的取消以及失败传播。

mod common;

use common::{EXAMPLE_COLUMN_DETS, EXAMPLE_DET, assert_close};
use cramer_bench::core::config::{BenchConfig, ValueRange};
use cramer_bench::core::error::BenchError;
use cramer_bench::core::execution::{
    RecordCollector, Sweep, SweepObserver, collect_columns, inspect_joined,
};
use cramer_bench::core::matrix::Matrix;
use cramer_bench::core::models::{ColumnResult, IterationOutcome, SweepStatus};
use cramer_bench::core::planner::ColumnRange;
use cramer_bench::core::sink::{self, ResultSink, SinkKey, SinkReceiver};
use cramer_bench::core::worker::run_worker;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

fn example_sweep() -> Sweep {
    let (a, b) = common::example_system();
    Sweep::from_parts(a, b).unwrap()
}

fn random_sweep(n: usize, seed: u64) -> Sweep {
    let config = BenchConfig {
        size: n,
        ..BenchConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    Sweep::setup(&config, &mut rng).unwrap()
}

#[cfg(test)]
mod setup_tests {
    use super::*;

    #[test]
    fn test_example_base_determinant() {
        let sweep = example_sweep();
        assert_eq!(sweep.size(), 3);
        assert_close(sweep.base_determinant(), EXAMPLE_DET);
    }

    #[test]
    fn test_all_zero_matrix_is_singular() {
        let result = Sweep::from_parts(Matrix::allocate(4).unwrap(), vec![1.0; 4]);
        assert!(matches!(
            result,
            Err(BenchError::SingularMatrix { determinant }) if determinant == 0.0
        ));
    }

    #[test]
    fn test_tiny_entries_are_singular() {
        let config = BenchConfig {
            size: 4,
            matrix_range: ValueRange::new(0.0, 1e-12),
            ..BenchConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Sweep::setup(&config, &mut rng),
            Err(BenchError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_mismatched_rhs_is_rejected() {
        let (a, _) = common::example_system();
        assert!(matches!(
            Sweep::from_parts(a, vec![1.0]),
            Err(BenchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_same_seed_same_system() {
        let a = random_sweep(12, 77);
        let b = random_sweep(12, 77);
        assert_eq!(a.base_determinant(), b.base_determinant());
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = example_sweep();
        let b = example_sweep();
        assert_ne!(a.run_id(), b.run_id());
    }
}

#[cfg(test)]
mod iteration_tests {
    use super::*;

    #[tokio::test]
    async fn test_example_columns_are_identical_for_any_worker_count() {
        let sweep = example_sweep();
        for worker_count in [1, 2, 3, 5] {
            let outcome = sweep.run_iteration(worker_count).await.unwrap();
            assert_eq!(outcome.record.worker_count, worker_count);
            assert!(outcome.record.elapsed_seconds >= 0.0);

            let columns: Vec<usize> = outcome.columns.iter().map(|c| c.column).collect();
            assert_eq!(columns, vec![0, 1, 2]);
            for c in &outcome.columns {
                assert_close(c.determinant, EXAMPLE_COLUMN_DETS[c.column]);
            }
        }
    }

    #[tokio::test]
    async fn test_solution_is_recovered_from_columns() {
        let sweep = example_sweep();
        let outcome = sweep.run_iteration(2).await.unwrap();
        let x: Vec<f64> = outcome
            .columns
            .iter()
            .map(|c| c.determinant / sweep.base_determinant())
            .collect();

        for (xi, expected) in x.iter().zip([6.0, 15.0, -23.0]) {
            assert_close(*xi, expected);
        }
    }

    #[tokio::test]
    async fn test_results_do_not_depend_on_worker_count() {
        let sweep = random_sweep(17, 3);
        let baseline = sweep.run_iteration(1).await.unwrap();

        for worker_count in 2..=20 {
            let outcome = sweep.run_iteration(worker_count).await.unwrap();
            assert_eq!(outcome.columns.len(), 17);
            for (a, b) in baseline.columns.iter().zip(&outcome.columns) {
                assert_eq!(a.column, b.column);
                assert_eq!(a.determinant, b.determinant, "W = {worker_count}");
            }
        }
    }

    #[tokio::test]
    async fn test_one_by_one_system() {
        let sweep =
            Sweep::from_parts(Matrix::from_rows(vec![vec![4.0]]).unwrap(), vec![2.0]).unwrap();
        let outcome = sweep.run_iteration(3).await.unwrap();
        assert_eq!(outcome.columns.len(), 1);
        assert_eq!(outcome.columns[0].determinant, 2.0);
    }

    #[tokio::test]
    async fn test_zero_workers_is_rejected() {
        let sweep = example_sweep();
        assert!(matches!(
            sweep.run_iteration(0).await,
            Err(BenchError::InvalidInput(_))
        ));
    }
}

#[cfg(test)]
mod sweep_tests {
    use super::*;

    /// Cancels the token once `after` iterations have been reported.
    struct CancelAfter {
        token: CancellationToken,
        after: usize,
        seen: Vec<usize>,
    }

    impl SweepObserver for CancelAfter {
        fn on_iteration_end(&mut self, outcome: &IterationOutcome) -> Result<(), BenchError> {
            self.seen.push(outcome.record.worker_count);
            if self.seen.len() >= self.after {
                self.token.cancel();
            }
            Ok(())
        }
    }

    /// Fails on the given worker count.
    struct FailOn(usize);

    impl SweepObserver for FailOn {
        fn on_iteration_end(&mut self, outcome: &IterationOutcome) -> Result<(), BenchError> {
            if outcome.record.worker_count == self.0 {
                return Err(BenchError::invalid("observer refused the record"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_records_are_ascending_and_complete() {
        let sweep = random_sweep(10, 11);
        let mut collector = RecordCollector::default();

        let status = sweep
            .run(1..=4, &CancellationToken::new(), &mut collector)
            .await
            .unwrap();

        assert_eq!(status, SweepStatus::Completed);
        let counts: Vec<usize> = collector.records.iter().map(|r| r.worker_count).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        assert!(collector.records.iter().all(|r| r.elapsed_seconds >= 0.0));
    }

    #[tokio::test]
    async fn test_range_not_starting_at_one() {
        let sweep = example_sweep();
        let mut collector = RecordCollector::default();

        sweep
            .run(3..=5, &CancellationToken::new(), &mut collector)
            .await
            .unwrap();

        let counts: Vec<usize> = collector.records.iter().map(|r| r.worker_count).collect();
        assert_eq!(counts, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_cancel_before_start_runs_nothing() {
        let sweep = example_sweep();
        let token = CancellationToken::new();
        token.cancel();
        let mut collector = RecordCollector::default();

        let status = sweep.run(1..=4, &token, &mut collector).await.unwrap();

        assert_eq!(status, SweepStatus::Interrupted);
        assert!(collector.records.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_between_iterations_keeps_finished_records() {
        let sweep = example_sweep();
        let token = CancellationToken::new();
        let mut observer = CancelAfter {
            token: token.clone(),
            after: 2,
            seen: Vec::new(),
        };

        let status = sweep.run(1..=6, &token, &mut observer).await.unwrap();

        assert_eq!(status, SweepStatus::Interrupted);
        assert_eq!(observer.seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_cancel_after_last_iteration_still_completes() {
        let sweep = example_sweep();
        let token = CancellationToken::new();
        let mut observer = CancelAfter {
            token: token.clone(),
            after: 3,
            seen: Vec::new(),
        };

        let status = sweep.run(1..=3, &token, &mut observer).await.unwrap();

        assert_eq!(status, SweepStatus::Completed);
        assert_eq!(observer.seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_observer_error_aborts_sweep() {
        let sweep = example_sweep();
        let result = sweep
            .run(1..=5, &CancellationToken::new(), &mut FailOn(2))
            .await;
        assert!(matches!(result, Err(BenchError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_ranges_are_rejected() {
        let sweep = example_sweep();
        let token = CancellationToken::new();
        let mut collector = RecordCollector::default();

        assert!(sweep.run(0..=2, &token, &mut collector).await.is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 4..=2;
        assert!(sweep.run(empty, &token, &mut collector).await.is_err());
        assert!(collector.records.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_iterations_do_not_leak_results() {
        let sweep = example_sweep();
        for _ in 0..5 {
            let outcome = sweep.run_iteration(3).await.unwrap();
            assert_eq!(outcome.columns.len(), 3);
        }
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FAULTY_STARTED: AtomicUsize = AtomicUsize::new(0);

    /// Column 1 panics, column 2 errors, column 0 succeeds. Every call is counted.
    fn faulty_worker(
        matrix: &Matrix,
        rhs: &[f64],
        range: ColumnRange,
        sink: &ResultSink,
    ) -> Result<usize, BenchError> {
        FAULTY_STARTED.fetch_add(1, Ordering::SeqCst);
        match range.start {
            1 => panic!("worker for column 1 blew up"),
            2 => Err(BenchError::invalid("worker for column 2 gave up")),
            _ => run_worker(matrix, rhs, range, sink),
        }
    }

    /// Computes its range but never publishes the last column.
    fn forgetful_worker(
        matrix: &Matrix,
        rhs: &[f64],
        range: ColumnRange,
        sink: &ResultSink,
    ) -> Result<usize, BenchError> {
        let shortened = ColumnRange {
            start: range.start,
            end: range.end.saturating_sub(1).max(range.start),
        };
        run_worker(matrix, rhs, shortened, sink)
    }

    /// Publishes every column of its range twice.
    fn repeating_worker(
        matrix: &Matrix,
        rhs: &[f64],
        range: ColumnRange,
        sink: &ResultSink,
    ) -> Result<usize, BenchError> {
        Ok(run_worker(matrix, rhs, range, sink)? + run_worker(matrix, rhs, range, sink)?)
    }

    fn open_sinks(count: usize) -> (Vec<ResultSink>, Vec<SinkReceiver>) {
        (0..count)
            .map(|worker_index| {
                sink::open(SinkKey {
                    run_id: 0,
                    worker_count: count,
                    worker_index,
                })
            })
            .unzip()
    }

    fn publish(sink: &ResultSink, column: usize) {
        sink.publish(ColumnResult {
            column,
            determinant: column as f64,
        })
        .unwrap();
    }

    #[tokio::test]
    async fn test_lowest_failing_worker_is_reported_after_all_joined() {
        let sweep = example_sweep().with_worker(faulty_worker);
        let mut collector = RecordCollector::default();

        let err = sweep
            .run(3..=3, &CancellationToken::new(), &mut collector)
            .await
            .unwrap_err();

        match err {
            BenchError::WorkerFailed {
                worker_count,
                worker_index,
                reason,
            } => {
                assert_eq!(worker_count, 3);
                assert_eq!(worker_index, 1);
                assert!(reason.contains("panicked"), "reason: {reason}");
            }
            other => panic!("expected WorkerFailed, got {other:?}"),
        }
        assert_eq!(FAULTY_STARTED.load(Ordering::SeqCst), 3);
        assert!(collector.records.is_empty());
    }

    #[tokio::test]
    async fn test_unpublished_column_fails_iteration() {
        let sweep = example_sweep().with_worker(forgetful_worker);
        let err = sweep.run_iteration(2).await.unwrap_err();
        assert!(matches!(
            err,
            BenchError::IncompleteIteration {
                worker_count: 2,
                expected: 3,
                missing: 2,
                duplicate_or_unknown: 0,
            }
        ));
    }

    #[tokio::test]
    async fn test_double_published_columns_fail_iteration() {
        let sweep = example_sweep().with_worker(repeating_worker);
        let mut collector = RecordCollector::default();

        let result = sweep
            .run(1..=2, &CancellationToken::new(), &mut collector)
            .await;

        assert!(matches!(
            result,
            Err(BenchError::IncompleteIteration {
                worker_count: 1,
                missing: 0,
                duplicate_or_unknown: 3,
                ..
            })
        ));
        assert!(collector.records.is_empty());
    }

    #[test]
    fn test_inspect_joined_reports_lowest_error() {
        let joined = vec![
            Ok(Ok(2)),
            Ok(Err(BenchError::invalid("second"))),
            Ok(Err(BenchError::invalid("third"))),
        ];
        match inspect_joined(3, joined).unwrap_err() {
            BenchError::WorkerFailed {
                worker_index,
                reason,
                ..
            } => {
                assert_eq!(worker_index, 1);
                assert!(reason.contains("second"));
            }
            other => panic!("expected WorkerFailed, got {other:?}"),
        }
        assert!(inspect_joined(2, vec![Ok(Ok(1)), Ok(Ok(0))]).is_ok());
    }

    #[test]
    fn test_collect_sorts_results_from_all_sinks() {
        let (sinks, receivers) = open_sinks(2);
        publish(&sinks[1], 2);
        publish(&sinks[0], 1);
        publish(&sinks[1], 0);
        drop(sinks);

        let columns: Vec<usize> = collect_columns(3, 2, receivers)
            .unwrap()
            .iter()
            .map(|c| c.column)
            .collect();
        assert_eq!(columns, vec![0, 1, 2]);
    }

    #[test]
    fn test_collect_rejects_duplicate_column() {
        let (sinks, receivers) = open_sinks(2);
        publish(&sinks[0], 0);
        publish(&sinks[0], 1);
        publish(&sinks[1], 1);
        publish(&sinks[1], 2);

        assert!(matches!(
            collect_columns(3, 2, receivers),
            Err(BenchError::IncompleteIteration {
                missing: 0,
                duplicate_or_unknown: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_collect_rejects_out_of_range_column() {
        let (sinks, receivers) = open_sinks(1);
        for column in [0, 1, 2, 3] {
            publish(&sinks[0], column);
        }

        let err = collect_columns(3, 1, receivers).unwrap_err();
        assert!(matches!(
            err,
            BenchError::IncompleteIteration {
                expected: 3,
                missing: 0,
                duplicate_or_unknown: 1,
                ..
            }
        ));
        let message = err.to_string();
        assert!(message.contains("0 of 3 columns missing"), "{message}");
        assert!(message.contains("1 duplicate or out-of-range"), "{message}");
    }

    #[test]
    fn test_collect_rejects_missing_column() {
        let (sinks, receivers) = open_sinks(2);
        publish(&sinks[0], 0);
        publish(&sinks[1], 2);

        assert!(matches!(
            collect_columns(3, 2, receivers),
            Err(BenchError::IncompleteIteration {
                worker_count: 2,
                expected: 3,
                missing: 1,
                duplicate_or_unknown: 0,
            })
        ));
    }

    /// A missing column plus a stray one still shows both counts.
    #[test]
    fn test_collect_counts_missing_and_stray_together() {
        let (sinks, receivers) = open_sinks(1);
        publish(&sinks[0], 0);
        publish(&sinks[0], 5);

        assert!(matches!(
            collect_columns(2, 1, receivers),
            Err(BenchError::IncompleteIteration {
                missing: 1,
                duplicate_or_unknown: 1,
                ..
            })
        ));
    }
}
