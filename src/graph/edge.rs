//! 边定义
//!
//! 有向带权边：通过句柄引用两个端点，自身只保存权重

use crate::graph::node::NodeId;

slotmap::new_key_type! {
    /// 边句柄（带代数校验，删除后自动失效）
    pub struct EdgeId;
}

/// 边记录
#[derive(Debug, Clone)]
pub(crate) struct Edge<E> {
    /// 源节点
    src: NodeId,
    /// 目标节点
    dst: NodeId,
    /// 权重
    weight: E,
}

impl<E> Edge<E> {
    /// 创建新边
    pub(crate) fn new(src: NodeId, dst: NodeId, weight: E) -> Self {
        Self { src, dst, weight }
    }

    /// 获取源节点句柄
    pub(crate) fn src(&self) -> NodeId {
        self.src
    }

    /// 获取目标节点句柄
    pub(crate) fn dst(&self) -> NodeId {
        self.dst
    }

    /// 获取权重
    pub(crate) fn weight(&self) -> &E {
        &self.weight
    }

    /// 把等于 `from` 的端点改指向 `to`
    pub(crate) fn repoint(&mut self, from: NodeId, to: NodeId) {
        if self.src == from {
            self.src = to;
        }
        if self.dst == from {
            self.dst = to;
        }
    }
}
