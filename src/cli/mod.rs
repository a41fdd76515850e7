//! 命令行工具支持
//!
//! 文本导入与结果打印，供 `digraph-cli` 使用

mod loader;
mod printer;

pub use loader::{load_path, load_triples, parse_rename, LoadStats, Loaded};
pub use printer::{PrintMode, Printer};
