//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides functionality for creating a new `Cramer.toml`
//! through an interactive command-line wizard, or with defaults when run
//! non-interactively.
//!
//! 此模块通过交互式命令行向导创建新的 `Cramer.toml`，
//! 或在非交互模式下使用默认值创建。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for matrix size, worker range, seed and output path
//! - **Core Detection**: Offers the detected logical core count as the default upper bound
//! - **Overwrite Protection**: Confirmation prompts before overwriting an existing configuration
//!
//! - **交互式向导**: 提示输入矩阵大小、工作者范围、种子和输出路径
//! - **核心检测**: 以检测到的逻辑核心数作为默认上限
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::BenchConfig;
use crate::infra::{system, t};

/// Runs the wizard that writes a benchmark configuration to `config_path`.
///
/// 运行将基准测试配置写入 `config_path` 的向导。
pub fn run_init_wizard(language: &str, non_interactive: bool, config_path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    if non_interactive {
        let config = BenchConfig {
            language: language.to_string(),
            ..BenchConfig::default()
        };
        return write_config(config_path, &config, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = BenchConfig::default();
    let cores = system::logical_cores();
    println!(
        "{}",
        t!("detected_cores", locale = language, cores = cores).green()
    );

    let size: usize = Input::with_theme(&theme)
        .with_prompt(t!("init_size_prompt", locale = language))
        .default(defaults.size)
        .validate_with(|n: &usize| -> Result<(), String> {
            if *n >= 1 {
                Ok(())
            } else {
                Err(t!("init_positive_required", locale = language).to_string())
            }
        })
        .interact_text()?;

    let start_workers: usize = Input::with_theme(&theme)
        .with_prompt(t!("init_start_prompt", locale = language))
        .default(defaults.start_workers)
        .validate_with(|n: &usize| -> Result<(), String> {
            if *n >= 1 {
                Ok(())
            } else {
                Err(t!("init_positive_required", locale = language).to_string())
            }
        })
        .interact_text()?;

    let end_workers: usize = Input::with_theme(&theme)
        .with_prompt(t!("init_end_prompt", locale = language))
        .default(cores.max(start_workers))
        .validate_with(|n: &usize| -> Result<(), String> {
            if *n >= start_workers {
                Ok(())
            } else {
                Err(t!("init_end_below_start", locale = language, start = start_workers).to_string())
            }
        })
        .interact_text()?;

    let seed: String = Input::with_theme(&theme)
        .with_prompt(t!("init_seed_prompt", locale = language))
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), String> {
            if s.trim().is_empty() || s.trim().parse::<u64>().is_ok() {
                Ok(())
            } else {
                Err(t!("init_seed_invalid", locale = language).to_string())
            }
        })
        .interact_text()?;

    let output: String = Input::with_theme(&theme)
        .with_prompt(t!("init_output_prompt", locale = language))
        .default(defaults.output.clone())
        .interact_text()?;

    let config = BenchConfig {
        language: language.to_string(),
        size,
        start_workers,
        // Unset means "detected cores" at run time.
        end_workers: (end_workers != cores).then_some(end_workers),
        seed: seed.trim().parse().ok(),
        output,
        ..defaults
    };

    write_config(config_path, &config, language)
}

fn write_config(path: &Path, config: &BenchConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
