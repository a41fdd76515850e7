//! 文本导入
//!
//! 每行一条 `src dst weight` 三元组，或只有一个节点名的孤立节点；
//! 空行和以 `#` 开头的行被忽略

use crate::error::{Error, Result};
use crate::graph::Graph;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// 读取的行数（含注释和空行）
    pub lines_read: usize,
    /// 新建的节点数
    pub nodes_created: usize,
    /// 新建的边数
    pub edges_loaded: usize,
    /// 重复而被忽略的三元组数
    pub duplicates: usize,
}

/// 导入结果
#[derive(Debug)]
pub struct Loaded {
    pub graph: Graph<String, i64>,
    pub stats: LoadStats,
}

/// 从任意行读取器导入
pub fn load_triples<R: BufRead>(reader: R) -> Result<Loaded> {
    let mut graph: Graph<String, i64> = Graph::new();
    let mut stats = LoadStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        stats.lines_read = line_no;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            [node] => {
                if graph.insert_node(node.to_string()) {
                    stats.nodes_created += 1;
                }
            }
            [src, dst, weight] => {
                let weight: i64 = weight.parse().map_err(|e| Error::ParseError {
                    line: line_no,
                    reason: format!("invalid weight `{}`: {}", weight, e),
                })?;
                for node in [src, dst] {
                    if graph.insert_node(node.to_string()) {
                        stats.nodes_created += 1;
                    }
                }
                if graph.insert_edge(&src.to_string(), &dst.to_string(), weight)? {
                    stats.edges_loaded += 1;
                } else {
                    stats.duplicates += 1;
                }
            }
            _ => {
                return Err(Error::ParseError {
                    line: line_no,
                    reason: format!(
                        "expected `src dst weight` or a single node, found {} fields",
                        tokens.len()
                    ),
                });
            }
        }
    }

    debug!(
        lines = stats.lines_read,
        nodes = stats.nodes_created,
        edges = stats.edges_loaded,
        duplicates = stats.duplicates,
        "input loaded"
    );
    Ok(Loaded { graph, stats })
}

/// 从文件导入
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Loaded> {
    let file = File::open(path)?;
    load_triples(BufReader::new(file))
}

/// 解析 `OLD=NEW` 形式的重命名参数
pub fn parse_rename(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => {
            Ok((old.to_string(), new.to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got `{}`", arg)),
    }
}
