//! 图索引
//!
//! 节点注册表与边注册表：记录由 SlotMap 持有，按自然键排序的 BTreeMap
//! 提供查找与全局顺序

use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use slotmap::SlotMap;
use std::collections::BTreeMap;
use std::ops::RangeBounds;

/// 边的自然键：(源值, 目标值, 权重)
pub(crate) type EdgeKey<N, E> = (N, N, E);

/// 节点注册表
#[derive(Debug, Clone)]
pub(crate) struct NodeRegistry<N, E> {
    /// 节点记录
    records: SlotMap<NodeId, Node<N, E>>,
    /// 值到节点句柄的映射（升序）
    by_value: BTreeMap<N, NodeId>,
}

impl<N: Ord + Clone, E> NodeRegistry<N, E> {
    /// 创建空注册表
    pub(crate) fn new() -> Self {
        Self {
            records: SlotMap::with_key(),
            by_value: BTreeMap::new(),
        }
    }

    /// 插入节点；值已存在时返回 None
    pub(crate) fn insert(&mut self, value: N) -> Option<NodeId> {
        if self.by_value.contains_key(&value) {
            return None;
        }
        let id = self.records.insert(Node::new(value.clone()));
        self.by_value.insert(value, id);
        Some(id)
    }

    /// 通过值查找句柄
    pub(crate) fn id_of(&self, value: &N) -> Option<NodeId> {
        self.by_value.get(value).copied()
    }

    /// 是否存在该值
    pub(crate) fn contains(&self, value: &N) -> bool {
        self.by_value.contains_key(value)
    }

    /// 获取节点记录
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<N, E>> {
        self.records.get(id)
    }

    /// 获取可变节点记录
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<N, E>> {
        self.records.get_mut(id)
    }

    /// 通过值获取节点记录
    pub(crate) fn get_by_value(&self, value: &N) -> Option<&Node<N, E>> {
        self.id_of(value).and_then(|id| self.records.get(id))
    }

    /// 修改节点值并更新值索引，返回旧值
    pub(crate) fn rekey(&mut self, id: NodeId, value: N) -> Option<N> {
        let node = self.records.get_mut(id)?;
        let old = node.relabel(value.clone());
        self.by_value.remove(&old);
        self.by_value.insert(value, id);
        Some(old)
    }

    /// 移除节点
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<N, E>> {
        let node = self.records.remove(id)?;
        self.by_value.remove(node.value());
        Some(node)
    }

    /// 按值升序遍历指定范围内的节点
    pub(crate) fn range<R>(&self, range: R) -> impl DoubleEndedIterator<Item = &Node<N, E>> + '_
    where
        R: RangeBounds<N>,
    {
        self.by_value
            .range::<N, R>(range)
            .filter_map(move |(_, &id)| self.records.get(id))
    }

    /// 按值升序遍历所有节点
    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &Node<N, E>> + '_ {
        self.range::<std::ops::RangeFull>(..)
    }

    /// 节点值（升序）
    pub(crate) fn values(&self) -> impl DoubleEndedIterator<Item = &N> + '_ {
        self.by_value.keys()
    }

    /// 节点数量
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// 清空
    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.by_value.clear();
    }
}

impl<N: Ord + Clone, E> Default for NodeRegistry<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// 边注册表
#[derive(Debug, Clone)]
pub(crate) struct EdgeRegistry<N, E> {
    /// 边记录（唯一所有者）
    records: SlotMap<EdgeId, Edge<E>>,
    /// (源值, 目标值, 权重) 到边句柄的映射，即全局边顺序
    by_key: BTreeMap<EdgeKey<N, E>, EdgeId>,
}

impl<N: Ord + Clone, E: Ord + Clone> EdgeRegistry<N, E> {
    /// 创建空注册表
    pub(crate) fn new() -> Self {
        Self {
            records: SlotMap::with_key(),
            by_key: BTreeMap::new(),
        }
    }

    /// 保存边记录，尚未登记键
    pub(crate) fn insert_record(&mut self, edge: Edge<E>) -> EdgeId {
        self.records.insert(edge)
    }

    /// 登记边的自然键；键已被占用时返回 false
    pub(crate) fn register(&mut self, key: EdgeKey<N, E>, id: EdgeId) -> bool {
        if self.by_key.contains_key(&key) {
            return false;
        }
        self.by_key.insert(key, id);
        true
    }

    /// 注销边的自然键
    pub(crate) fn unregister(&mut self, key: &EdgeKey<N, E>) -> Option<EdgeId> {
        self.by_key.remove(key)
    }

    /// 获取边记录
    pub(crate) fn get(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.records.get(id)
    }

    /// 获取可变边记录
    pub(crate) fn get_mut(&mut self, id: EdgeId) -> Option<&mut Edge<E>> {
        self.records.get_mut(id)
    }

    /// 移除边记录
    pub(crate) fn remove_record(&mut self, id: EdgeId) -> Option<Edge<E>> {
        self.records.remove(id)
    }

    /// 按全局顺序遍历边键
    pub(crate) fn keys(&self) -> impl DoubleEndedIterator<Item = &EdgeKey<N, E>> + '_ {
        self.by_key.keys()
    }

    /// 边数量
    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    /// 清空
    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.by_key.clear();
    }
}

impl<N: Ord + Clone, E: Ord + Clone> Default for EdgeRegistry<N, E> {
    fn default() -> Self {
        Self::new()
    }
}
