//! # Core Module / 核心模块
//!
//! This module contains the parallel determinant engine: the matrix type, the
//! elimination-based determinant, the column partition planner, the worker task,
//! per-worker result sinks and the sweep orchestrator.
//!
//! 此模块包含并行行列式引擎：矩阵类型、基于消元的行列式、列划分计划器、
//! 工作任务、每个工作者的结果通道以及扫描编排器。

pub mod config;
pub mod determinant;
pub mod error;
pub mod execution;
pub mod matrix;
pub mod models;
pub mod planner;
pub mod sink;
pub mod worker;

// Re-exports
pub use config::BenchConfig;
pub use determinant::determinant;
pub use error::BenchError;
pub use execution::Sweep;
pub use matrix::Matrix;
pub use planner::partition;
