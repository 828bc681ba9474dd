//! # Result Sink Module / 结果通道模块
//!
//! Each worker publishes its column results into its own channel, identified
//! by a [`SinkKey`]. The orchestrator keeps the matching [`SinkReceiver`]s and
//! drains them only after the join barrier. Dropping the receivers at the end
//! of an iteration is the cleanup step, so nothing leaks into the next one.
//!
//! 每个工作者将其列结果发布到自己的通道中，由 [`SinkKey`] 标识。
//! 编排器持有对应的 [`SinkReceiver`]，并且只在汇合屏障之后才读取。
//! 在迭代结束时 drop 接收端即完成清理，因此不会泄漏到下一次迭代。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use crate::core::error::BenchError;
use crate::core::models::ColumnResult;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a run id unique within this process, so concurrent sweeps never share a sink key.
/// 分配一个在本进程内唯一的运行 ID，使并发的扫描永远不会共享通道键。
pub fn next_run_id() -> u64 {
    NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed)
}

/// Unique identity of one worker's result sink.
/// 单个工作者结果通道的唯一标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkKey {
    pub run_id: u64,
    pub worker_count: usize,
    pub worker_index: usize,
}

impl fmt::Display for SinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run{}/w{}/p{}",
            self.run_id, self.worker_count, self.worker_index
        )
    }
}

/// Write half, moved into the worker task.
#[derive(Debug)]
pub struct ResultSink {
    key: SinkKey,
    tx: mpsc::UnboundedSender<ColumnResult>,
}

/// Read half, kept by the orchestrator.
#[derive(Debug)]
pub struct SinkReceiver {
    rx: mpsc::UnboundedReceiver<ColumnResult>,
}

/// Opens a fresh sink for `key`.
/// 为 `key` 打开一个新的结果通道。
pub fn open(key: SinkKey) -> (ResultSink, SinkReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResultSink { key, tx }, SinkReceiver { rx })
}

impl ResultSink {
    pub fn publish(&self, result: ColumnResult) -> Result<(), BenchError> {
        self.tx
            .send(result)
            .map_err(|_| BenchError::SinkClosed(self.key))
    }
}

impl SinkReceiver {
    /// Takes everything the worker published. Call only after the worker has been joined;
    /// consumes the receiver so the sink cannot be read twice.
    ///
    /// 取出工作者发布的全部结果。只能在工作者被汇合之后调用；
    /// 该方法消耗接收端，因此通道不能被读取两次。
    pub fn drain(mut self) -> Vec<ColumnResult> {
        self.rx.close();
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }
}
