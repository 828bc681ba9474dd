//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations: path expansion
//! and atomic writes of the results stream and reports. Files are staged in a
//! temporary file next to their destination and only renamed into place once
//! complete, so a failed sweep never leaves a half-written file behind.
//!
//! 此模块提供文件系统操作的实用功能：路径展开以及结果流和报告的原子写入。
//! 文件先写入目标位置旁边的临时文件，完成后才重命名到位，
//! 因此失败的扫描永远不会留下写了一半的文件。

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::core::models::BenchmarkRecord;

/// Header line of the results stream.
pub const RESULTS_HEADER: &str = "Procs Time";

/// Expands `~` and environment variables in a user-supplied path.
///
/// # Arguments
/// * `raw` - Path as written in the config file or on the command line
///
/// # Returns
/// The expanded path, or an error naming the variable that could not be resolved
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Mode given to published files; staging files start out owner-only.
#[cfg(unix)]
const PUBLISHED_MODE: u32 = 0o644;

/// Creates a temporary file in the directory that will hold `target`.
fn staging_file(target: &Path) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    tempfile::Builder::new()
        .prefix(".cramer_bench_")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create staging file in {}", dir.display()))
}

/// Relaxes the staging file's permissions to those of an ordinary output file.
#[cfg(unix)]
fn publish_permissions(staged: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    staged
        .as_file()
        .set_permissions(fs::Permissions::from_mode(PUBLISHED_MODE))
}

#[cfg(not(unix))]
fn publish_permissions(_staged: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

/// Writer for the two-column results stream (`Procs Time`).
///
/// Records are appended and flushed as iterations complete. The file appears at
/// its destination only after [`ResultsWriter::finish`]; dropping the writer
/// without finishing discards everything.
///
/// 两列结果流（`Procs Time`）的写入器。
/// 每完成一次迭代就追加并刷新记录。只有在调用 [`ResultsWriter::finish`] 之后文件才会出现在目标位置；
/// 未完成就 drop 写入器会丢弃所有内容。
#[derive(Debug)]
pub struct ResultsWriter {
    target: PathBuf,
    staged: NamedTempFile,
}

impl ResultsWriter {
    pub fn create(target: &Path) -> Result<Self> {
        let mut staged = staging_file(target)?;
        writeln!(staged, "{RESULTS_HEADER}").context("Failed to write results header")?;

        Ok(Self {
            target: target.to_path_buf(),
            staged,
        })
    }

    pub fn append(&mut self, record: &BenchmarkRecord) -> io::Result<()> {
        writeln!(
            self.staged,
            "{} {:.4}",
            record.worker_count, record.elapsed_seconds
        )?;
        self.staged.flush()
    }

    /// Syncs the staged file and moves it over the destination.
    pub fn finish(self) -> Result<PathBuf> {
        self.staged
            .as_file()
            .sync_all()
            .context("Failed to sync results file")?;
        publish_permissions(&self.staged).context("Failed to set results file permissions")?;
        self.staged
            .persist(&self.target)
            .with_context(|| format!("Failed to save results to {}", self.target.display()))?;
        Ok(self.target)
    }
}

/// Writes `content` to `target` through a staging file.
pub fn write_atomically(target: &Path, content: &str) -> Result<()> {
    let mut staged = staging_file(target)?;
    staged
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", target.display()))?;
    publish_permissions(&staged)
        .with_context(|| format!("Failed to set permissions of {}", target.display()))?;
    staged
        .persist(target)
        .with_context(|| format!("Failed to save {}", target.display()))?;
    Ok(())
}

/// Parses a results stream back into records. Used to inspect previous runs.
/// 将结果流解析回记录。用于检查之前的运行。
pub fn read_results(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;

    let mut lines = content.lines();
    match lines.next() {
        Some(header) if header.trim() == RESULTS_HEADER => {}
        _ => anyhow::bail!("{} is not a results file (missing header)", path.display()),
    }

    lines
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            let mut fields = line.split_whitespace();
            let parsed = match (fields.next(), fields.next(), fields.next()) {
                (Some(w), Some(t), None) => w.parse::<usize>().ok().zip(t.parse::<f64>().ok()),
                _ => None,
            };
            let (worker_count, elapsed_seconds) = parsed.with_context(|| {
                format!("Malformed record on line {} of {}: {line}", i + 2, path.display())
            })?;
            Ok(BenchmarkRecord {
                worker_count,
                elapsed_seconds,
            })
        })
        .collect()
}
