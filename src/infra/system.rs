//! Host probing.

/// Number of logical cores, never less than 1.
/// 逻辑核心数，最小为 1。
pub fn logical_cores() -> usize {
    num_cpus::get().max(1)
}
