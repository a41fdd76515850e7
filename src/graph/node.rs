//! 节点定义
//!
//! 节点按值唯一，持有入边与出边的有序关联集

use crate::graph::edge::EdgeId;
use std::collections::BTreeMap;
use std::ops::Bound::{self, Excluded, Unbounded};

slotmap::new_key_type! {
    /// 节点句柄（带代数校验，删除后自动失效）
    pub struct NodeId;
}

/// 关联集中的一个位置：(对端值, 权重, 边句柄)
pub(crate) type Slot<'a, N, E> = (&'a N, &'a E, EdgeId);

/// 关联集
///
/// 按 (对端值, 权重) 升序保存边句柄。出边集的对端是目标节点，入边集的对端是源节点。
/// 内层映射永不为空：最后一条边移除时连同对端键一起删除。
#[derive(Debug, Clone)]
pub(crate) struct Incidence<N, E> {
    by_peer: BTreeMap<N, BTreeMap<E, EdgeId>>,
    len: usize,
}

impl<N, E> Incidence<N, E> {
    pub(crate) fn new() -> Self {
        Self {
            by_peer: BTreeMap::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 不同对端值（升序）
    pub(crate) fn peers(&self) -> impl DoubleEndedIterator<Item = &N> + '_ {
        self.by_peer.keys()
    }

    /// 所有位置（升序）
    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = Slot<'_, N, E>> + '_ {
        self.by_peer
            .iter()
            .flat_map(|(peer, weights)| weights.iter().map(move |(w, &id)| (peer, w, id)))
    }

    /// 所有边句柄
    pub(crate) fn ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.by_peer.values().flat_map(|weights| weights.values().copied())
    }

    /// 第一个位置
    pub(crate) fn first(&self) -> Option<Slot<'_, N, E>> {
        let (peer, weights) = self.by_peer.iter().next()?;
        let (w, &id) = weights.iter().next()?;
        Some((peer, w, id))
    }

    /// 最后一个位置
    pub(crate) fn last(&self) -> Option<Slot<'_, N, E>> {
        let (peer, weights) = self.by_peer.iter().next_back()?;
        let (w, &id) = weights.iter().next_back()?;
        Some((peer, w, id))
    }
}

impl<N: Ord, E: Ord> Incidence<N, E> {
    /// 插入位置；已存在时返回 false
    pub(crate) fn insert(&mut self, peer: N, weight: E, id: EdgeId) -> bool {
        let weights = self.by_peer.entry(peer).or_default();
        if weights.contains_key(&weight) {
            return false;
        }
        weights.insert(weight, id);
        self.len += 1;
        true
    }

    /// 移除位置
    pub(crate) fn remove(&mut self, peer: &N, weight: &E) -> Option<EdgeId> {
        let weights = self.by_peer.get_mut(peer)?;
        let id = weights.remove(weight)?;
        if weights.is_empty() {
            self.by_peer.remove(peer);
        }
        self.len -= 1;
        Some(id)
    }

    /// 精确查找位置
    pub(crate) fn get(&self, peer: &N, weight: &E) -> Option<Slot<'_, N, E>> {
        let (peer, weights) = self.by_peer.get_key_value(peer)?;
        let (w, &id) = weights.get_key_value(weight)?;
        Some((peer, w, id))
    }

    /// 是否存在到该对端的边
    pub(crate) fn contains_peer(&self, peer: &N) -> bool {
        self.by_peer.contains_key(peer)
    }

    /// 到该对端的所有权重（升序）
    pub(crate) fn weights(&self, peer: &N) -> impl DoubleEndedIterator<Item = &E> + '_ {
        self.by_peer.get(peer).into_iter().flat_map(|weights| weights.keys())
    }

    /// 严格位于 (peer, weight) 之后的第一个位置
    pub(crate) fn next_after(&self, peer: &N, weight: &E) -> Option<Slot<'_, N, E>> {
        if let Some((p, weights)) = self.by_peer.get_key_value(peer) {
            let after: (Bound<&E>, Bound<&E>) = (Excluded(weight), Unbounded);
            if let Some((w, &id)) = weights.range(after).next() {
                return Some((p, w, id));
            }
        }
        let later: (Bound<&N>, Bound<&N>) = (Excluded(peer), Unbounded);
        let (p, weights) = self.by_peer.range(later).next()?;
        let (w, &id) = weights.iter().next()?;
        Some((p, w, id))
    }

    /// 严格位于 (peer, weight) 之前的最后一个位置
    pub(crate) fn prev_before(&self, peer: &N, weight: &E) -> Option<Slot<'_, N, E>> {
        if let Some((p, weights)) = self.by_peer.get_key_value(peer) {
            let before: (Bound<&E>, Bound<&E>) = (Unbounded, Excluded(weight));
            if let Some((w, &id)) = weights.range(before).next_back() {
                return Some((p, w, id));
            }
        }
        let earlier: (Bound<&N>, Bound<&N>) = (Unbounded, Excluded(peer));
        let (p, weights) = self.by_peer.range(earlier).next_back()?;
        let (w, &id) = weights.iter().next_back()?;
        Some((p, w, id))
    }
}

impl<N, E> Default for Incidence<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// 节点记录
#[derive(Debug, Clone)]
pub(crate) struct Node<N, E> {
    value: N,
    /// 出边，对端为目标节点值
    pub(crate) outgoing: Incidence<N, E>,
    /// 入边，对端为源节点值
    pub(crate) incoming: Incidence<N, E>,
}

impl<N, E> Node<N, E> {
    /// 创建新节点
    pub(crate) fn new(value: N) -> Self {
        Self {
            value,
            outgoing: Incidence::new(),
            incoming: Incidence::new(),
        }
    }

    /// 获取节点值
    pub(crate) fn value(&self) -> &N {
        &self.value
    }

    /// 重新设置节点值，返回旧值
    ///
    /// 调用方负责先解除所有关联边的索引，再重新建立。
    pub(crate) fn relabel(&mut self, value: N) -> N {
        std::mem::replace(&mut self.value, value)
    }

    /// 所有关联边（自环只出现一次）
    pub(crate) fn incident_edges(&self) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self.outgoing.ids().chain(self.incoming.ids()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
