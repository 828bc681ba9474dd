//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles progress output and the final summary in the console.
//! It provides functionality for printing colorful, formatted lines with
//! internationalization support.
//!
//! 此模块处理控制台中的进度输出和最终摘要。
//! 它提供打印彩色格式化行的功能，支持国际化。

use colored::*;
use std::io::{self, Write};

use crate::core::models::{BenchmarkRecord, SweepReport, SweepStatus};
use crate::infra::t;

const RULE_WIDTH: usize = 42;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Prints the run parameters before Setup starts.
/// 在初始化开始前打印运行参数。
pub fn print_header(size: usize, seed: u64, cores: usize, locale: &str) {
    println!("{}", t!("bench_banner", locale = locale).cyan().bold());
    println!("{}", t!("matrix_size", locale = locale, size = size));
    println!("{}", t!("detected_cores", locale = locale, cores = cores));
    println!("{}", t!("random_seed", locale = locale, seed = seed));
}

pub fn print_precomputing(locale: &str) {
    println!("\n{}", t!("precomputing_det", locale = locale));
}

pub fn print_base_determinant(determinant: f64, locale: &str) {
    println!(
        "{}",
        t!("base_determinant", locale = locale, det = format!("{determinant:e}")).dimmed()
    );
}

pub fn print_sweep_start(start: usize, end: usize, locale: &str) {
    println!(
        "\n{}",
        t!("sweep_start", locale = locale, start = start, end = end).bold()
    );
    println!("{}", rule());
}

/// Prints the left half of a progress line; the time is appended on the same
/// line once the iteration finishes.
///
/// 打印进度行的左半部分；迭代完成后在同一行追加时间。
pub fn print_iteration_start(worker_count: usize, locale: &str) {
    print!(
        "{} ",
        t!("running_with_workers", locale = locale, count = worker_count)
    );
    // Progress must be visible while the workers run.
    let _ = io::stdout().flush();
}

pub fn print_iteration_end(record: &BenchmarkRecord, locale: &str) {
    println!(
        "{}",
        t!(
            "iteration_time",
            locale = locale,
            secs = format!("{:.4}", record.elapsed_seconds)
        )
        .green()
    );
}

/// Prints a formatted summary of the sweep.
/// Displays a table with worker count, time, speed-up and efficiency,
/// highlighting the fastest row.
///
/// 在控制台打印格式化的扫描摘要。
/// 显示包含工作者数量、时间、加速比和效率的表格，并突出显示最快的一行。
///
/// # Output Format / 输出格式
/// ```text
/// --- Benchmark Summary ---
///   Workers |   Time (s) |  Speed-up | Efficiency
///         1 |     1.2345 |     1.00x |     100.0%
///         2 |     0.6500 |     1.90x |      95.0%
/// ```
pub fn print_summary(report: &SweepReport, locale: &str) {
    println!("{}", rule());
    println!("\n{}", t!("summary_banner", locale = locale).bold());

    if report.records.is_empty() {
        println!("  {}", t!("no_records", locale = locale).dimmed());
        return;
    }

    println!(
        "  {:>7} | {:>10} | {:>9} | {:>10}",
        t!("col_workers", locale = locale),
        t!("col_time", locale = locale),
        t!("col_speedup", locale = locale),
        t!("col_efficiency", locale = locale)
    );

    let fastest = report.fastest().map(|r| r.worker_count);
    for row in &report.records {
        let speedup = row
            .speedup
            .map(|s| format!("{s:.2}x"))
            .unwrap_or_else(|| "N/A".to_string());
        let efficiency = row
            .efficiency
            .map(|e| format!("{:.1}%", e * 100.0))
            .unwrap_or_else(|| "N/A".to_string());
        let line = format!(
            "  {:>7} | {:>10.4} | {:>9} | {:>10}",
            row.worker_count, row.elapsed_seconds, speedup, efficiency
        );
        if Some(row.worker_count) == fastest {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }

    if let Some(best) = report.fastest() {
        println!(
            "\n{}",
            t!(
                "fastest_run",
                locale = locale,
                count = best.worker_count,
                secs = format!("{:.4}", best.elapsed_seconds)
            )
            .cyan()
        );
    }
}

/// Prints the closing line for the sweep and where the results were saved.
pub fn print_completion(report: &SweepReport, saved_to: &str, locale: &str) {
    match report.status {
        SweepStatus::Completed => println!(
            "\n{}",
            t!("bench_complete", locale = locale, path = saved_to).green().bold()
        ),
        SweepStatus::Interrupted => println!(
            "\n{}",
            t!(
                "bench_interrupted",
                locale = locale,
                count = report.records.len(),
                path = saved_to
            )
            .yellow()
            .bold()
        ),
    }
}
