//! weighted-digraph - 泛型有向带权多重图容器
//!
//! 节点值与边权重只需满足全序即可使用，提供：
//! - 按 (源, 目标, 权重) 全局有序、可双向移动的边遍历
//! - 节点重命名与合并，合并时自动去除重复边
//! - 连通性、后继、前驱与权重查询
//! - 操作指标与文本导入工具

pub mod cli;
pub mod error;
pub mod graph;
pub mod metrics;

// 重导出常用类型
pub use error::{Error, Result};
pub use graph::{Cursor, CursorMut, EdgeId, Edges, Graph, NodeId};
pub use metrics::{Metrics, MetricsSnapshot, PrometheusMetrics};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
