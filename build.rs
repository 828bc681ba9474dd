//! # Build Script for Locale Validation / 语言文件校验构建脚本
//!
//! This build script checks the translation files under `locales/` before the
//! crate is compiled. Every locale must define exactly the keys of the base
//! language file (`en.toml`), and every `%{var}` placeholder used by a base
//! message must also appear in its translation. A missing or stray key fails
//! the build instead of surfacing as a raw key at run time.
//!
//! 此构建脚本在编译 crate 之前检查 `locales/` 下的翻译文件。
//! 每个语言文件必须恰好定义基础语言文件（`en.toml`）中的键，
//! 并且基础消息中使用的每个 `%{var}` 占位符也必须出现在其翻译中。
//! 缺失或多余的键会导致构建失败，而不是在运行时显示为原始键。

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the structure of a translation file.
/// Maps translation keys to their localized strings.
///
/// 表示翻译文件的结构。
/// 将翻译键映射到其本地化字符串。
#[derive(Debug, Deserialize)]
struct Translations(BTreeMap<String, String>);

/// Extracts the `%{name}` placeholders of a message.
///
/// 提取消息中的 `%{name}` 占位符。
fn placeholders(message: &str) -> BTreeSet<&str> {
    let mut found = BTreeSet::new();
    let mut rest = message;
    while let Some(start) = rest.find("%{") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                found.insert(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    found
}

fn load(path: &Path) -> Translations {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    toml::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

fn main() {
    let locales_dir = Path::new("locales");
    println!("cargo:rerun-if-changed=locales/");

    // 1. 读取基础语言文件 (en.toml)
    let base = load(&locales_dir.join("en.toml"));

    // 2. 收集所有其他语言文件
    let mut lang_files: Vec<PathBuf> = fs::read_dir(locales_dir)
        .expect("Failed to read locales directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml"))
        .filter(|path| path.file_stem().and_then(|s| s.to_str()) != Some("en"))
        .collect();
    lang_files.sort();

    // 3. 逐个比对键和占位符
    let mut problems = Vec::new();
    for path in &lang_files {
        let translations = load(path);
        let name = path.display();

        for (key, message) in &base.0 {
            match translations.0.get(key) {
                None => problems.push(format!("{name}: missing key '{key}'")),
                Some(translated) => {
                    let expected = placeholders(message);
                    let actual = placeholders(translated);
                    if expected != actual {
                        problems.push(format!(
                            "{name}: key '{key}' uses placeholders {actual:?}, expected {expected:?}"
                        ));
                    }
                }
            }
        }

        for key in translations.0.keys().filter(|k| !base.0.contains_key(*k)) {
            problems.push(format!("{name}: key '{key}' is not defined in en.toml"));
        }
    }

    if !problems.is_empty() {
        panic!("Locale files are inconsistent:\n  {}", problems.join("\n  "));
    }
}
