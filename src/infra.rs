//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the benchmark,
//! including the results-stream file writer, host probing, and i18n support.
//!
//! 此模块为基准测试提供基础设施服务，
//! 包括结果流文件写入、主机探测和国际化支持。

pub mod fs;
pub mod system;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
