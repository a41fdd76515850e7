//! 结果打印器
//!
//! 提供规范文本、表格和逆序三种图输出格式

use crate::cli::LoadStats;
use crate::graph::Graph;
use crate::metrics::MetricsSnapshot;
use prettytable::{format, row, Cell, Row, Table};
use std::fmt::Display;

/// 打印模式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PrintMode {
    /// 规范文本格式
    #[default]
    Text,
    /// 边表格
    Table,
    /// 按全局顺序逆序列出边
    Reverse,
}

/// 结果打印器
#[derive(Default)]
pub struct Printer {
    mode: PrintMode,
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印图
    pub fn print_graph<N, E>(&self, graph: &Graph<N, E>) -> String
    where
        N: Ord + Clone + Display,
        E: Ord + Clone + Display,
    {
        match self.mode {
            PrintMode::Text => graph.to_string(),
            PrintMode::Table => self.format_table(graph),
            PrintMode::Reverse => self.format_reverse(graph),
        }
    }

    /// 表格格式
    fn format_table<N, E>(&self, graph: &Graph<N, E>) -> String
    where
        N: Ord + Clone + Display,
        E: Ord + Clone + Display,
    {
        if graph.edge_count() == 0 {
            return format!("Empty set ({} node(s))\n", graph.node_count());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Src", "Dst", "Weight"]);

        for (src, dst, weight) in graph {
            table.add_row(Row::new(vec![
                Cell::new(&src.to_string()),
                Cell::new(&dst.to_string()),
                Cell::new(&weight.to_string()),
            ]));
        }

        format!("{}\n{} edge(s) in set\n", table, graph.edge_count())
    }

    /// 逆序格式
    fn format_reverse<N, E>(&self, graph: &Graph<N, E>) -> String
    where
        N: Ord + Clone + Display,
        E: Ord + Clone + Display,
    {
        graph
            .iter()
            .rev()
            .map(|(src, dst, weight)| format!("{} -> {} | {}\n", src, dst, weight))
            .collect()
    }

    /// 打印统计信息
    pub fn print_stats(&self, metrics: &MetricsSnapshot) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Node Count", metrics.node_count.to_string()]);
        table.add_row(row!["Edge Count", metrics.edge_count.to_string()]);
        table.add_row(row!["Nodes Removed", metrics.nodes_removed.to_string()]);
        table.add_row(row!["Edges Removed", metrics.edges_removed.to_string()]);
        table.add_row(row!["Replaces", metrics.replaces.to_string()]);
        table.add_row(row!["Merges", metrics.merges.to_string()]);
        table.add_row(row![
            "Merge Duplicates Dropped",
            metrics.merge_duplicates_dropped.to_string()
        ]);
        table.to_string()
    }

    /// 打印导入统计
    pub fn print_load_stats(&self, stats: &LoadStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Input", "Value"]);
        table.add_row(row!["Lines Read", stats.lines_read.to_string()]);
        table.add_row(row!["Nodes Created", stats.nodes_created.to_string()]);
        table.add_row(row!["Edges Loaded", stats.edges_loaded.to_string()]);
        table.add_row(row!["Duplicates Ignored", stats.duplicates.to_string()]);
        table.to_string()
    }
}
