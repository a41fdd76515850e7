//! 图操作指标模块
//!
//! 每个图实例持有一组计数器，记录结构变更与查询次数，可导出快照与 Prometheus 文本

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 图操作计数器
#[derive(Debug, Default)]
pub struct Metrics {
    /// 节点插入数
    nodes_inserted: AtomicU64,
    /// 节点删除数（含合并时删除的旧节点）
    nodes_removed: AtomicU64,
    /// 边插入数
    edges_inserted: AtomicU64,
    /// 边删除数（含级联删除）
    edges_removed: AtomicU64,
    /// 节点重命名次数
    replaces: AtomicU64,
    /// 节点合并次数
    merges: AtomicU64,
    /// 合并时因重复而丢弃的边数
    merge_duplicates_dropped: AtomicU64,
    /// 查询次数
    lookups: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 结构指标
    pub node_count: u64,
    pub edge_count: u64,

    // 变更指标
    pub nodes_inserted: u64,
    pub nodes_removed: u64,
    pub edges_inserted: u64,
    pub edges_removed: u64,
    pub replaces: u64,
    pub merges: u64,
    pub merge_duplicates_dropped: u64,

    // 查询指标
    pub lookups: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录节点插入
    pub fn record_node_insert(&self) {
        self.nodes_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录节点删除
    pub fn record_node_remove(&self) {
        self.nodes_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边插入
    pub fn record_edge_insert(&self) {
        self.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边删除
    pub fn record_edge_remove(&self) {
        self.edges_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录节点重命名
    pub fn record_replace(&self) {
        self.replaces.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录节点合并
    pub fn record_merge(&self, duplicates_dropped: u64) {
        self.merges.fetch_add(1, Ordering::Relaxed);
        self.merge_duplicates_dropped
            .fetch_add(duplicates_dropped, Ordering::Relaxed);
    }

    /// 记录查询
    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self, node_count: usize, edge_count: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            node_count: node_count as u64,
            edge_count: edge_count as u64,
            nodes_inserted: self.nodes_inserted.load(Ordering::Relaxed),
            nodes_removed: self.nodes_removed.load(Ordering::Relaxed),
            edges_inserted: self.edges_inserted.load(Ordering::Relaxed),
            edges_removed: self.edges_removed.load(Ordering::Relaxed),
            replaces: self.replaces.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            merge_duplicates_dropped: self.merge_duplicates_dropped.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
        }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.nodes_inserted.store(0, Ordering::Relaxed);
        self.nodes_removed.store(0, Ordering::Relaxed);
        self.edges_inserted.store(0, Ordering::Relaxed);
        self.edges_removed.store(0, Ordering::Relaxed);
        self.replaces.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.merge_duplicates_dropped.store(0, Ordering::Relaxed);
        self.lookups.store(0, Ordering::Relaxed);
    }
}

impl Clone for Metrics {
    fn clone(&self) -> Self {
        let copy = |counter: &AtomicU64| AtomicU64::new(counter.load(Ordering::Relaxed));
        Self {
            nodes_inserted: copy(&self.nodes_inserted),
            nodes_removed: copy(&self.nodes_removed),
            edges_inserted: copy(&self.edges_inserted),
            edges_removed: copy(&self.edges_removed),
            replaces: copy(&self.replaces),
            merges: copy(&self.merges),
            merge_duplicates_dropped: copy(&self.merge_duplicates_dropped),
            lookups: copy(&self.lookups),
        }
    }
}

impl MetricsSnapshot {
    /// 导出为 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let mut content = String::new();
        let mut push = |name: &str, kind: &str, help: &str, value: u64| {
            content.push_str(&format!("# HELP digraph_{} {}\n", name, help));
            content.push_str(&format!("# TYPE digraph_{} {}\n", name, kind));
            content.push_str(&format!("digraph_{} {}\n", name, value));
        };

        // 结构指标
        push("nodes", "gauge", "Current number of nodes", self.node_count);
        push("edges", "gauge", "Current number of edges", self.edge_count);

        // 变更指标
        push("nodes_inserted_total", "counter", "Total nodes inserted", self.nodes_inserted);
        push("nodes_removed_total", "counter", "Total nodes removed", self.nodes_removed);
        push("edges_inserted_total", "counter", "Total edges inserted", self.edges_inserted);
        push("edges_removed_total", "counter", "Total edges removed", self.edges_removed);
        push("replaces_total", "counter", "Total node relabels", self.replaces);
        push("merges_total", "counter", "Total node merges", self.merges);
        push(
            "merge_duplicates_dropped_total",
            "counter",
            "Edges discarded as duplicates during merges",
            self.merge_duplicates_dropped,
        );

        // 查询指标
        push("lookups_total", "counter", "Total read queries", self.lookups);

        PrometheusMetrics { content }
    }
}
