//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which sets up the linear system,
//! sweeps the worker count and saves the timings.
//!
//! 此模块实现了 `run` 命令，它建立线性方程组、扫描工作者数量并保存计时结果。

use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{fs, path::Path, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{BenchConfig, DEFAULT_CONFIG_FILE},
        error::BenchError,
        execution::{Sweep, SweepObserver},
        models::{BenchmarkRecord, IterationOutcome, SweepReport},
    },
    infra::{
        fs::{ResultsWriter, expand_path},
        system, t,
    },
    reporting::{
        console,
        html::generate_html_report,
        json::generate_json_report,
    },
};

/// Options collected from the command line. `None` leaves the config file value in place.
/// 从命令行收集的选项。`None` 表示保留配置文件中的值。
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub size: Option<usize>,
    pub start_workers: Option<usize>,
    pub end_workers: Option<usize>,
    pub seed: Option<u64>,
    pub output: Option<String>,
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub language: Option<String>,
}

/// Prints progress and appends each finished iteration to the results stream.
struct ProgressObserver<'a> {
    writer: ResultsWriter,
    records: Vec<BenchmarkRecord>,
    locale: &'a str,
}

impl SweepObserver for ProgressObserver<'_> {
    fn on_iteration_start(&mut self, worker_count: usize) {
        console::print_iteration_start(worker_count, self.locale);
    }

    fn on_iteration_end(&mut self, outcome: &IterationOutcome) -> Result<(), BenchError> {
        console::print_iteration_end(&outcome.record, self.locale);
        self.writer.append(&outcome.record)?;
        self.records.push(outcome.record);
        Ok(())
    }
}

/// Executes the run command with the provided options.
///
/// # Returns
/// `Ok` when the sweep completed or was interrupted cleanly; an error naming the
/// failing condition otherwise. On error no results file is written.
pub async fn execute(options: RunOptions) -> Result<()> {
    let (mut config, config_path) = load_config(options.config.as_deref())?;
    apply_overrides(&mut config, &options);

    let locale = crate::resolve_locale(options.language.as_deref().unwrap_or(&config.language));
    rust_i18n::set_locale(&locale);

    if let Some(path) = &config_path {
        println!(
            "{}",
            t!("loading_config", locale = locale, path = path.display())
        );
    }

    let cores = system::logical_cores();
    config
        .validate(cores)
        .with_context(|| t!("config_invalid", locale = locale))?;
    let workers = config.worker_range(cores);

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    console::print_header(config.size, seed, cores, &locale);
    console::print_precomputing(&locale);

    let sweep = match Sweep::setup(&config, &mut rng) {
        Ok(sweep) => sweep,
        Err(e @ BenchError::SingularMatrix { .. }) => {
            println!("{}", t!("singular_matrix", locale = locale).red().bold());
            return Err(e.into());
        }
        Err(e) => return Err(e).context(t!("setup_failed", locale = locale)),
    };
    console::print_base_determinant(sweep.base_determinant(), &locale);

    let output_path = expand_path(&config.output)?;
    let writer = ResultsWriter::create(&output_path)?;

    let stop_token = setup_signal_handler(&locale);
    let started_at = Utc::now();

    console::print_sweep_start(*workers.start(), *workers.end(), &locale);

    let mut observer = ProgressObserver {
        writer,
        records: Vec::new(),
        locale: &locale,
    };
    let status = sweep
        .run(workers, &stop_token, &mut observer)
        .await
        .with_context(|| t!("sweep_failed", locale = locale))?;

    let ProgressObserver {
        writer, records, ..
    } = observer;
    let saved_to = writer.finish()?;

    let report = SweepReport::new(
        sweep.size(),
        seed,
        sweep.base_determinant(),
        cores,
        started_at,
        status,
        &records,
    );

    console::print_summary(&report, &locale);

    if let Some(json_path) = &options.json {
        println!(
            "\n{}",
            t!("generating_json", locale = locale, path = json_path.display())
        );
        if let Err(e) = generate_json_report(&report, json_path) {
            eprintln!("{} {:#}", t!("report_failed", locale = locale).red(), e);
        }
    }

    if let Some(html_path) = &options.html {
        println!(
            "\n{}",
            t!("generating_html", locale = locale, path = html_path.display())
        );
        if let Err(e) = generate_html_report(&report, html_path, &locale) {
            eprintln!("{} {:#}", t!("report_failed", locale = locale).red(), e);
        }
    }

    console::print_completion(&report, &saved_to.display().to_string(), &locale);
    Ok(())
}

/// Loads the configuration file.
///
/// An explicitly requested file must exist. Without one, `Cramer.toml` in the
/// working directory is used when present, and built-in defaults otherwise.
///
/// 加载配置文件。
/// 显式指定的文件必须存在。未指定时，如果工作目录中存在 `Cramer.toml` 则使用它，否则使用内置默认值。
pub fn load_config(explicit: Option<&Path>) -> Result<(BenchConfig, Option<PathBuf>)> {
    // For config parsing, we don't have the locale yet. Use English as a default.
    let locale = "en";

    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.is_file() {
                return Ok((BenchConfig::default(), None));
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| t!("config_read_failed", locale = locale, path = path.display()))?;
    let config = BenchConfig::from_toml(&content)
        .with_context(|| t!("config_parse_failed", locale = locale, path = path.display()))?;

    Ok((config, Some(path)))
}

/// Applies command-line overrides on top of the file configuration.
pub fn apply_overrides(config: &mut BenchConfig, options: &RunOptions) {
    if let Some(size) = options.size {
        config.size = size;
    }
    if let Some(start) = options.start_workers {
        config.start_workers = start;
    }
    if options.end_workers.is_some() {
        config.end_workers = options.end_workers;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if let Some(output) = &options.output {
        config.output = output.clone();
    }
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}
