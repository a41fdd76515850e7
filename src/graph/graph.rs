//! 图数据结构
//!
//! 泛型有向带权多重图：节点注册表、边注册表与每个节点的关联集共同维护

use super::cursor::{Cursor, CursorMut, Edges};
use super::edge::{Edge, EdgeId};
use super::index::{EdgeKey, EdgeRegistry, NodeRegistry};
use super::node::{Node, NodeId};
use crate::error::{Error, Result};
use crate::metrics::{Metrics, MetricsSnapshot};
use std::fmt;
use tracing::{debug, trace};

/// 有向带权图
///
/// 节点按值 `N` 唯一，边按 (源值, 目标值, 权重) 唯一。遍历顺序即全局边顺序：
/// 先按源值，再按目标值，最后按权重升序。
///
/// ```
/// use weighted_digraph::Graph;
///
/// let mut g: Graph<&str, i32> = Graph::from(["a", "b"]);
/// g.insert_edge(&"a", &"b", 3).unwrap();
/// assert!(g.is_connected(&"a", &"b").unwrap());
/// assert_eq!(g.iter().next(), Some((&"a", &"b", &3)));
/// ```
#[derive(Clone)]
pub struct Graph<N, E> {
    /// 节点注册表
    pub(crate) nodes: NodeRegistry<N, E>,
    /// 边注册表
    pub(crate) edges: EdgeRegistry<N, E>,
    /// 操作计数
    metrics: Metrics,
}

impl<N: Ord + Clone, E: Ord + Clone> Graph<N, E> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            nodes: NodeRegistry::new(),
            edges: EdgeRegistry::new(),
            metrics: Metrics::new(),
        }
    }

    /// 由节点值序列构建，重复值合并
    pub fn from_nodes<I: IntoIterator<Item = N>>(values: I) -> Self {
        let mut graph = Self::new();
        for value in values {
            graph.insert_node(value);
        }
        graph
    }

    /// 由 (源, 目标, 权重) 序列构建
    ///
    /// 缺失的端点会被自动插入，重复的三元组被忽略。
    pub fn from_edges<I: IntoIterator<Item = (N, N, E)>>(triples: I) -> Self {
        let mut graph = Self::new();
        graph.extend(triples);
        graph
    }

    // ==================== 节点操作 ====================

    /// 插入节点；值已存在时返回 false
    pub fn insert_node(&mut self, value: N) -> bool {
        if self.nodes.insert(value).is_none() {
            return false;
        }
        self.metrics.record_node_insert();
        debug!(nodes = self.nodes.len(), "node inserted");
        true
    }

    /// 删除节点及其所有关联边；节点不存在时返回 false
    pub fn delete_node(&mut self, value: &N) -> bool {
        let Some(id) = self.nodes.id_of(value) else {
            return false;
        };

        // 先收集，再删除边，最后删除节点
        let doomed = self
            .nodes
            .get(id)
            .map(Node::incident_edges)
            .unwrap_or_default();
        let cascaded = doomed.len();
        for edge_id in doomed {
            self.remove_edge(edge_id);
            trace!(?edge_id, "incident edge removed");
        }

        self.nodes.remove(id);
        self.metrics.record_node_remove();
        debug!(cascaded, nodes = self.nodes.len(), "node deleted");
        true
    }

    /// 将节点 `old` 重命名为 `new`
    ///
    /// `new` 已存在时返回 `Ok(false)` 且不做任何修改；需要合并时请使用
    /// [`Graph::merge_replace`]。
    pub fn replace(&mut self, old: &N, new: N) -> Result<bool> {
        let id = self.nodes.id_of(old).ok_or(Error::ReplaceMissingNode)?;
        if self.nodes.contains(&new) {
            return Ok(false);
        }

        // 所有嵌入旧值的键都要重建
        let incident = self
            .nodes
            .get(id)
            .map(Node::incident_edges)
            .unwrap_or_default();
        for &edge_id in &incident {
            self.unlink(edge_id);
        }
        self.nodes.rekey(id, new);
        for &edge_id in &incident {
            self.link(edge_id);
        }

        self.metrics.record_replace();
        debug!(relinked = incident.len(), "node replaced");
        Ok(true)
    }

    /// 把节点 `old` 合并进 `new`
    ///
    /// `old` 的每条关联边改为指向 `new`；改写后与已有边重复的三元组被丢弃，
    /// 最后删除 `old`。
    pub fn merge_replace(&mut self, old: &N, new: &N) -> Result<()> {
        let (Some(old_id), Some(new_id)) = (self.nodes.id_of(old), self.nodes.id_of(new)) else {
            return Err(Error::MergeReplaceMissingNode);
        };
        if old_id == new_id {
            return Ok(());
        }

        let incident = self
            .nodes
            .get(old_id)
            .map(Node::incident_edges)
            .unwrap_or_default();
        let mut dropped = 0u64;
        for edge_id in incident {
            self.unlink(edge_id);
            if let Some(edge) = self.edges.get_mut(edge_id) {
                edge.repoint(old_id, new_id);
            }
            if !self.link(edge_id) {
                self.edges.remove_record(edge_id);
                self.metrics.record_edge_remove();
                dropped += 1;
                trace!(?edge_id, "duplicate edge dropped during merge");
            }
        }

        self.nodes.remove(old_id);
        self.metrics.record_node_remove();
        self.metrics.record_merge(dropped);
        debug!(dropped, nodes = self.nodes.len(), "node merged");
        Ok(())
    }

    /// 清空所有节点和边
    pub fn clear(&mut self) {
        self.edges.clear();
        self.nodes.clear();
        debug!("graph cleared");
    }

    /// 节点是否存在
    pub fn is_node(&self, value: &N) -> bool {
        self.metrics.record_lookup();
        self.nodes.contains(value)
    }

    /// 所有节点值（升序）
    pub fn get_nodes(&self) -> Vec<N> {
        self.nodes.values().cloned().collect()
    }

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 节点的出度；节点不存在时返回 None
    pub fn out_degree(&self, value: &N) -> Option<usize> {
        self.nodes.get_by_value(value).map(|n| n.outgoing.len())
    }

    /// 节点的入度；节点不存在时返回 None
    pub fn in_degree(&self, value: &N) -> Option<usize> {
        self.nodes.get_by_value(value).map(|n| n.incoming.len())
    }

    // ==================== 边操作 ====================

    /// 插入边
    ///
    /// 任一端点不存在时返回错误；三元组已存在时返回 `Ok(false)`。
    pub fn insert_edge(&mut self, src: &N, dst: &N, weight: E) -> Result<bool> {
        let (Some(src_id), Some(dst_id)) = (self.nodes.id_of(src), self.nodes.id_of(dst)) else {
            return Err(Error::InsertEdgeMissingNode);
        };
        if self.contains_edge(src, dst, &weight) {
            return Ok(false);
        }

        let edge_id = self.edges.insert_record(Edge::new(src_id, dst_id, weight));
        self.link(edge_id);
        self.metrics.record_edge_insert();
        debug!(edges = self.edges.len(), "edge inserted");
        Ok(true)
    }

    /// 删除指定三元组的边；不存在时返回 false
    pub fn erase(&mut self, src: &N, dst: &N, weight: &E) -> bool {
        let Some(edge_id) = self.edge_id_of(src, dst, weight) else {
            return false;
        };
        self.remove_edge(edge_id).is_some()
    }

    /// 三元组是否存在
    pub fn contains_edge(&self, src: &N, dst: &N, weight: &E) -> bool {
        self.edge_id_of(src, dst, weight).is_some()
    }

    /// 是否存在 src -> dst 的边（任意权重）
    pub fn is_connected(&self, src: &N, dst: &N) -> Result<bool> {
        self.metrics.record_lookup();
        let node = self
            .nodes
            .get_by_value(src)
            .ok_or(Error::IsConnectedMissingNode)?;
        if !self.nodes.contains(dst) {
            return Err(Error::IsConnectedMissingNode);
        }
        Ok(node.outgoing.contains_peer(dst))
    }

    /// src 出边指向的不同目标值（升序）
    pub fn get_connected(&self, src: &N) -> Result<Vec<N>> {
        self.metrics.record_lookup();
        let node = self
            .nodes
            .get_by_value(src)
            .ok_or(Error::GetConnectedMissingNode)?;
        Ok(node.outgoing.peers().cloned().collect())
    }

    /// dst 入边来自的不同源值（升序）
    pub fn get_predecessors(&self, dst: &N) -> Result<Vec<N>> {
        self.metrics.record_lookup();
        let node = self
            .nodes
            .get_by_value(dst)
            .ok_or(Error::GetPredecessorsMissingNode)?;
        Ok(node.incoming.peers().cloned().collect())
    }

    /// src -> dst 所有边的权重（升序）
    pub fn get_weights(&self, src: &N, dst: &N) -> Result<Vec<E>> {
        self.metrics.record_lookup();
        let node = self
            .nodes
            .get_by_value(src)
            .ok_or(Error::GetWeightsMissingNode)?;
        if !self.nodes.contains(dst) {
            return Err(Error::GetWeightsMissingNode);
        }
        Ok(node.outgoing.weights(dst).cloned().collect())
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 是否没有任何节点
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    // ==================== 遍历与查找 ====================

    /// 按全局顺序遍历所有边
    pub fn iter(&self) -> Edges<'_, N, E> {
        Edges::new(self)
    }

    /// 指向第一条边的游标（无边时为结束位置）
    pub fn cursor_front(&self) -> Cursor<'_, N, E> {
        Cursor::front(self)
    }

    /// 结束位置游标
    pub fn cursor_end(&self) -> Cursor<'_, N, E> {
        Cursor::end(self)
    }

    /// 指向第一条边的可变游标
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, N, E> {
        let first = Cursor::front(self).edge_id();
        CursorMut::new(self, first)
    }

    /// 查找三元组；不存在时返回结束位置游标
    pub fn find(&self, src: &N, dst: &N, weight: &E) -> Cursor<'_, N, E> {
        self.metrics.record_lookup();
        let Some(node) = self.nodes.get_by_value(src) else {
            return Cursor::end(self);
        };
        match node.outgoing.get(dst, weight) {
            Some(slot) => Cursor::at(self, node, slot),
            None => Cursor::end(self),
        }
    }

    /// 查找三元组并返回可变游标；不存在时位于结束位置
    pub fn find_mut(&mut self, src: &N, dst: &N, weight: &E) -> CursorMut<'_, N, E> {
        self.metrics.record_lookup();
        let edge_id = self.edge_id_of(src, dst, weight);
        CursorMut::new(self, edge_id)
    }

    /// 指标快照
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.node_count(), self.edge_count())
    }

    // ==================== 内部维护 ====================

    fn edge_id_of(&self, src: &N, dst: &N, weight: &E) -> Option<EdgeId> {
        let node = self.nodes.get_by_value(src)?;
        node.outgoing.get(dst, weight).map(|(_, _, id)| id)
    }

    /// 由当前端点值计算边的自然键
    fn edge_key(&self, edge_id: EdgeId) -> Option<(NodeId, NodeId, EdgeKey<N, E>)> {
        let edge = self.edges.get(edge_id)?;
        let src = self.nodes.get(edge.src())?.value().clone();
        let dst = self.nodes.get(edge.dst())?.value().clone();
        Some((edge.src(), edge.dst(), (src, dst, edge.weight().clone())))
    }

    /// 把边登记到边注册表和两端的关联集
    ///
    /// 键已被其他边占用时不做任何修改并返回 false。
    fn link(&mut self, edge_id: EdgeId) -> bool {
        let Some((src_id, dst_id, key)) = self.edge_key(edge_id) else {
            return false;
        };
        if !self.edges.register(key.clone(), edge_id) {
            return false;
        }
        let (src, dst, weight) = key;
        if let Some(node) = self.nodes.get_mut(src_id) {
            node.outgoing.insert(dst, weight.clone(), edge_id);
        }
        if let Some(node) = self.nodes.get_mut(dst_id) {
            node.incoming.insert(src, weight, edge_id);
        }
        true
    }

    /// 从边注册表和两端的关联集中注销边，记录本身保留
    fn unlink(&mut self, edge_id: EdgeId) -> Option<EdgeKey<N, E>> {
        let (src_id, dst_id, key) = self.edge_key(edge_id)?;
        self.edges.unregister(&key);
        let (src, dst, weight) = &key;
        if let Some(node) = self.nodes.get_mut(src_id) {
            node.outgoing.remove(dst, weight);
        }
        if let Some(node) = self.nodes.get_mut(dst_id) {
            node.incoming.remove(src, weight);
        }
        Some(key)
    }

    /// 注销并销毁边，返回其三元组
    pub(crate) fn remove_edge(&mut self, edge_id: EdgeId) -> Option<EdgeKey<N, E>> {
        let key = self.unlink(edge_id)?;
        self.edges.remove_record(edge_id);
        self.metrics.record_edge_remove();
        Some(key)
    }

    /// 解析边句柄为 (源值, 目标值, 权重) 引用
    pub(crate) fn resolve(&self, edge_id: EdgeId) -> Option<(&N, &N, &E)> {
        let edge = self.edges.get(edge_id)?;
        let src = self.nodes.get(edge.src())?.value();
        let dst = self.nodes.get(edge.dst())?.value();
        Some((src, dst, edge.weight()))
    }
}

impl<N: Ord + Clone, E: Ord + Clone> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Ord + Clone, E: Ord + Clone> Extend<(N, N, E)> for Graph<N, E> {
    fn extend<I: IntoIterator<Item = (N, N, E)>>(&mut self, triples: I) {
        for (src, dst, weight) in triples {
            self.insert_node(src.clone());
            self.insert_node(dst.clone());
            // 两端刚刚保证存在
            let _ = self.insert_edge(&src, &dst, weight);
        }
    }
}

impl<N: Ord + Clone, E: Ord + Clone> FromIterator<(N, N, E)> for Graph<N, E> {
    fn from_iter<I: IntoIterator<Item = (N, N, E)>>(triples: I) -> Self {
        Self::from_edges(triples)
    }
}

impl<N: Ord + Clone, E: Ord + Clone, const K: usize> From<[N; K]> for Graph<N, E> {
    fn from(values: [N; K]) -> Self {
        Self::from_nodes(values)
    }
}

impl<'a, N: Ord + Clone, E: Ord + Clone> IntoIterator for &'a Graph<N, E> {
    type Item = (&'a N, &'a N, &'a E);
    type IntoIter = Edges<'a, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Ord + Clone, E: Ord + Clone> PartialEq for Graph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.values().eq(other.nodes.values()) && self.edges.keys().eq(other.edges.keys())
    }
}

impl<N: Ord + Clone, E: Ord + Clone> Eq for Graph<N, E> {}

impl<N: Ord + Clone + fmt::Display, E: Ord + Clone + fmt::Display> fmt::Display for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.iter() {
            writeln!(f, "{} (", node.value())?;
            for (dst, weight, _) in node.outgoing.iter() {
                writeln!(f, "  {} | {}", dst, weight)?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

impl<N: Ord + Clone + fmt::Debug, E: Ord + Clone + fmt::Debug> fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.values().collect::<Vec<_>>())
            .field("edges", &self.edges.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn triples<N: Clone, E: Clone>(g: &Graph<N, E>) -> Vec<(N, N, E)>
    where
        N: Ord,
        E: Ord,
    {
        g.iter()
            .map(|(s, d, w)| (s.clone(), d.clone(), w.clone()))
            .collect()
    }

    /// 校验注册表与关联集互相一致
    fn assert_consistent<N: Ord + Clone + fmt::Debug, E: Ord + Clone + fmt::Debug>(
        g: &Graph<N, E>,
    ) {
        let registry: Vec<(N, N, E)> = g.edges.keys().cloned().collect();
        assert_eq!(triples(g), registry);

        let mut incoming = Vec::new();
        for node in g.nodes.iter() {
            for (src, weight, id) in node.incoming.iter() {
                let (s, d, w) = g.resolve(id).expect("live incoming edge");
                assert_eq!((s, d, w), (src, node.value(), weight));
                incoming.push((s.clone(), d.clone(), w.clone()));
            }
        }
        incoming.sort();
        assert_eq!(incoming, registry);
    }

    fn sample() -> Graph<f64_key::Key, i32> {
        use f64_key::Key;
        Graph::from_edges([
            (Key(1.1), Key(1.1), 1),
            (Key(2.2), Key(1.1), 1),
            (Key(1.1), Key(2.2), 2),
        ])
    }

    /// 测试用的可排序浮点键
    mod f64_key {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct Key(pub f64);

        impl Eq for Key {}

        impl PartialOrd for Key {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for Key {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl std::fmt::Display for Key {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    }

    #[test]
    fn test_insert_node() {
        let mut g: Graph<String, f64_key::Key> = Graph::new();
        assert!(g.insert_node("Hello".to_string()));
        assert!(g.insert_node("how".to_string()));
        assert!(!g.insert_node("Hello".to_string()));
        assert_eq!(g.get_nodes(), vec!["Hello".to_string(), "how".to_string()]);
        assert!(g.is_node(&"how".to_string()));
        assert!(!g.is_node(&"are".to_string()));
    }

    #[test]
    fn test_insert_edge() {
        let mut g: Graph<&str, i32> = Graph::from(["Hello", "how", "are", "you"]);
        assert!(g.insert_edge(&"Hello", &"how", 1).unwrap());
        assert!(g.insert_edge(&"how", &"are", 2).unwrap());
        assert!(!g.insert_edge(&"Hello", &"how", 1).unwrap());
        assert!(g.insert_edge(&"Hello", &"how", 5).unwrap());
        assert_eq!(g.edge_count(), 3);

        let err = g.insert_edge(&"Hello", &"missing", 1).unwrap_err();
        assert!(matches!(err, Error::InsertEdgeMissingNode));
        assert_eq!(
            err.to_string(),
            "Cannot call Graph::insert_edge when either src or dst node does not exist"
        );
        assert_consistent(&g);
    }

    #[test]
    fn test_construction() {
        let from_nodes: Graph<char, i32> = Graph::from_nodes(vec!['b', 'a', 'b']);
        assert_eq!(from_nodes.get_nodes(), vec!['a', 'b']);
        assert_eq!(from_nodes.edge_count(), 0);

        let from_edges: Graph<i32, i32> = vec![(6, 2, 5), (6, 7, 5), (4, 6, 7), (6, 2, 5)]
            .into_iter()
            .collect();
        assert_eq!(from_edges.get_nodes(), vec![2, 4, 6, 7]);
        assert_eq!(from_edges.edge_count(), 3);

        let literal: Graph<char, String> = Graph::from(['x', 'b', 'a']);
        assert_eq!(literal.get_nodes(), vec!['a', 'b', 'x']);

        let empty: Graph<i32, i32> = Graph::default();
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_iteration_order() {
        use f64_key::Key;
        let g = sample();
        let forward = triples(&g);
        assert_eq!(
            forward,
            vec![
                (Key(1.1), Key(1.1), 1),
                (Key(1.1), Key(2.2), 2),
                (Key(2.2), Key(1.1), 1),
            ]
        );

        let backward: Vec<_> = g.iter().rev().map(|(s, d, w)| (*s, *d, *w)).collect();
        let mut expected = forward.clone();
        expected.reverse();
        assert_eq!(backward, expected);
        assert_eq!(g.iter().len(), 3);
    }

    #[test]
    fn test_delete_node_cascade() {
        let mut g: Graph<i32, i32> = Graph::from_edges([
            (42, 11, 101),
            (42, 43, 101),
            (11, 42, 101),
            (43, 42, 101),
            (42, 42, 7),
            (11, 43, 1),
        ]);
        assert!(g.delete_node(&42));
        assert!(!g.delete_node(&42));
        assert!(!g.is_node(&42));
        assert_eq!(triples(&g), vec![(11, 43, 1)]);
        assert!(g.find(&42, &11, &101).is_end());
        assert!(g.find(&11, &42, &101).is_end());
        assert!(g.find(&42, &42, &7).is_end());
        assert_eq!(g.in_degree(&43), Some(1));
        assert_consistent(&g);
    }

    #[test]
    fn test_replace() {
        use f64_key::Key;
        let mut g: Graph<Key, i32> = Graph::from_edges([
            (Key(1.1), Key(1.1), 1),
            (Key(2.2), Key(1.1), 1),
            (Key(2.2), Key(2.2), 2),
            (Key(3.3), Key(2.2), 3),
            (Key(2.2), Key(4.4), 8),
        ]);

        assert!(g.replace(&Key(2.2), Key(99.9)).unwrap());
        assert!(!g.is_node(&Key(2.2)));
        assert_eq!(
            triples(&g),
            vec![
                (Key(1.1), Key(1.1), 1),
                (Key(3.3), Key(99.9), 3),
                (Key(99.9), Key(1.1), 1),
                (Key(99.9), Key(4.4), 8),
                (Key(99.9), Key(99.9), 2),
            ]
        );
        assert_consistent(&g);

        assert!(!g.replace(&Key(99.9), Key(1.1)).unwrap());
        assert!(!g.replace(&Key(99.9), Key(99.9)).unwrap());
        assert!(matches!(
            g.replace(&Key(2.2), Key(5.5)),
            Err(Error::ReplaceMissingNode)
        ));
    }

    #[test]
    fn test_merge_replace_incoming() {
        let mut g: Graph<char, i32> = Graph::from(['a', 'b', 'c', 'd']);
        g.insert_edge(&'a', &'b', 3).unwrap();
        g.insert_edge(&'c', &'b', 2).unwrap();
        g.insert_edge(&'d', &'b', 4).unwrap();

        g.merge_replace(&'b', &'a').unwrap();
        assert_eq!(g.get_nodes(), vec!['a', 'c', 'd']);
        assert_eq!(triples(&g), vec![('a', 'a', 3), ('c', 'a', 2), ('d', 'a', 4)]);
        assert_consistent(&g);
    }

    #[test]
    fn test_merge_replace_outgoing_and_self_loop() {
        let mut g: Graph<char, i32> = Graph::from(['a', 'b', 'c', 'd']);
        g.insert_edge(&'b', &'a', 3).unwrap();
        g.insert_edge(&'b', &'b', 6).unwrap();
        g.insert_edge(&'b', &'c', 2).unwrap();
        g.insert_edge(&'b', &'d', 4).unwrap();

        g.merge_replace(&'b', &'a').unwrap();
        assert_eq!(
            triples(&g),
            vec![('a', 'a', 3), ('a', 'a', 6), ('a', 'c', 2), ('a', 'd', 4)]
        );
        assert_consistent(&g);
    }

    #[test]
    fn test_merge_replace_dedup() {
        let mut g: Graph<char, i32> = Graph::from(['a', 'b', 'c']);
        g.insert_edge(&'a', &'c', 1).unwrap();
        g.insert_edge(&'b', &'c', 1).unwrap();
        g.insert_edge(&'b', &'c', 2).unwrap();
        g.insert_edge(&'a', &'b', 5).unwrap();
        g.insert_edge(&'a', &'a', 5).unwrap();

        g.merge_replace(&'b', &'a').unwrap();
        assert_eq!(
            triples(&g),
            vec![('a', 'a', 5), ('a', 'c', 1), ('a', 'c', 2)]
        );
        assert_eq!(g.get_weights(&'a', &'c').unwrap(), vec![1, 2]);
        assert_eq!(g.metrics().merge_duplicates_dropped, 2);
        assert_consistent(&g);

        assert!(matches!(
            g.merge_replace(&'b', &'a'),
            Err(Error::MergeReplaceMissingNode)
        ));
        assert!(matches!(
            g.merge_replace(&'a', &'z'),
            Err(Error::MergeReplaceMissingNode)
        ));

        let before = g.clone();
        g.merge_replace(&'a', &'a').unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn test_clear_and_reinsert() {
        let mut g = sample();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.cursor_front().is_end());

        assert!(g.insert_node(f64_key::Key(1.1)));
        assert!(g
            .insert_edge(&f64_key::Key(1.1), &f64_key::Key(1.1), 1)
            .unwrap());
        assert_eq!(g.edge_count(), 1);
        assert_consistent(&g);
    }

    #[test]
    fn test_connectivity_queries() {
        let mut g: Graph<char, String> = Graph::from(['x', 'b', 'a', 'c', 'z', 'y', 'd']);
        for (s, d, w) in [
            ('x', 'b', "aaa"),
            ('b', 'a', "bob"),
            ('a', 'c', "bbb"),
            ('a', 'c', "aaa"),
            ('b', 'x', "aaa"),
            ('b', 'x', "Aaa"),
            ('a', 'b', "ccc"),
            ('a', 'd', "z"),
        ] {
            g.insert_edge(&s, &d, w.to_string()).unwrap();
        }

        assert!(g.is_connected(&'a', &'c').unwrap());
        assert!(!g.is_connected(&'c', &'a').unwrap());
        assert!(matches!(
            g.is_connected(&'a', &'q'),
            Err(Error::IsConnectedMissingNode)
        ));

        assert_eq!(g.get_connected(&'a').unwrap(), vec!['b', 'c', 'd']);
        assert_eq!(g.get_connected(&'z').unwrap(), Vec::<char>::new());
        assert!(matches!(
            g.get_connected(&'q'),
            Err(Error::GetConnectedMissingNode)
        ));

        assert_eq!(
            g.get_weights(&'a', &'c').unwrap(),
            vec!["aaa".to_string(), "bbb".to_string()]
        );
        assert_eq!(
            g.get_weights(&'b', &'x').unwrap(),
            vec!["Aaa".to_string(), "aaa".to_string()]
        );
        assert!(g.get_weights(&'c', &'a').unwrap().is_empty());
        assert!(matches!(
            g.get_weights(&'q', &'a'),
            Err(Error::GetWeightsMissingNode)
        ));

        assert_eq!(g.get_predecessors(&'x').unwrap(), vec!['b']);
        assert_eq!(g.get_predecessors(&'b').unwrap(), vec!['a', 'x']);
        assert_eq!(g.out_degree(&'b'), Some(3));
        assert_eq!(g.in_degree(&'c'), Some(2));
        assert_eq!(g.out_degree(&'q'), None);
    }

    #[test]
    fn test_find_and_erase() {
        let mut g: Graph<String, i32> = Graph::new();
        let (e, i) = ("e".to_string(), "i".to_string());
        assert!(g.find(&e, &i, &8) == g.cursor_end());

        g.insert_node(e.clone());
        g.insert_node(i.clone());
        g.insert_edge(&e, &i, 8).unwrap();
        let found = g.find(&e, &i, &8);
        assert!(found != g.cursor_end());
        assert_eq!(found.current(), Some((&e, &i, &8)));
        assert!(g.find(&e, &i, &9).is_end());

        assert!(!g.erase(&e, &i, &9));
        assert!(g.erase(&e, &i, &8));
        assert!(!g.erase(&e, &i, &8));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.out_degree(&e), Some(0));
        assert_eq!(g.in_degree(&i), Some(0));
        assert_consistent(&g);
    }

    #[test]
    fn test_equality_and_copy() {
        let original: Graph<i32, i32> = Graph::from_edges([(6, 2, 5), (4, 2, 3), (1, 1, 1)]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.insert_edge(&1, &4, 9).unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.edge_count(), 3);

        copy.erase(&1, &4, &9);
        assert_eq!(copy, original);
        copy.insert_node(100);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_move_leaves_empty() {
        let mut source: Graph<i32, i32> = Graph::from_edges([(1, 2, 3)]);
        let moved = std::mem::take(&mut source);
        assert!(source.is_empty());
        assert_eq!(source.iter().count(), 0);
        assert_eq!(triples(&moved), vec![(1, 2, 3)]);
    }

    #[test]
    fn test_display() {
        let mut g: Graph<char, i32> = Graph::from(['a', 'b', 'c']);
        g.insert_edge(&'a', &'b', 3).unwrap();
        g.insert_edge(&'a', &'a', 1).unwrap();
        g.insert_edge(&'c', &'b', 2).unwrap();

        assert_eq!(
            g.to_string(),
            "a (\n  a | 1\n  b | 3\n)\nb (\n)\nc (\n  b | 2\n)\n"
        );
        assert_eq!(Graph::<char, i32>::new().to_string(), "");
    }

    #[test]
    fn test_debug() {
        let g: Graph<i32, i32> = Graph::from_edges([(1, 2, 3)]);
        assert_eq!(
            format!("{:?}", g),
            "Graph { nodes: [1, 2], edges: [(1, 2, 3)] }"
        );
    }

    #[test]
    fn test_metrics_counts() {
        let mut g: Graph<i32, i32> = Graph::from_edges([(1, 2, 3), (2, 3, 4)]);
        g.delete_node(&2);
        let snapshot = g.metrics();
        assert_eq!(snapshot.nodes_inserted, 3);
        assert_eq!(snapshot.edges_inserted, 2);
        assert_eq!(snapshot.edges_removed, 2);
        assert_eq!(snapshot.nodes_removed, 1);
        assert_eq!(snapshot.node_count, 2);
        assert_eq!(snapshot.edge_count, 0);
    }

    #[test]
    fn test_random_operations_against_model() {
        let mut rng = StdRng::seed_from_u64(6771);
        let mut g: Graph<u8, u8> = Graph::new();
        let mut nodes: BTreeSet<u8> = BTreeSet::new();
        let mut edges: BTreeSet<(u8, u8, u8)> = BTreeSet::new();

        for _ in 0..2000 {
            let a = rng.gen_range(0..12u8);
            let b = rng.gen_range(0..12u8);
            let w = rng.gen_range(0..4u8);
            match rng.gen_range(0..10) {
                0..=2 => {
                    assert_eq!(g.insert_node(a), nodes.insert(a));
                }
                3..=5 => {
                    let result = g.insert_edge(&a, &b, w);
                    if nodes.contains(&a) && nodes.contains(&b) {
                        assert_eq!(result.unwrap(), edges.insert((a, b, w)));
                    } else {
                        assert!(result.is_err());
                    }
                }
                6 => {
                    assert_eq!(g.erase(&a, &b, &w), edges.remove(&(a, b, w)));
                }
                7 => {
                    assert_eq!(g.delete_node(&a), nodes.remove(&a));
                    edges.retain(|&(s, d, _)| s != a && d != a);
                }
                8 => {
                    let result = g.replace(&a, b);
                    if !nodes.contains(&a) {
                        assert!(result.is_err());
                    } else if nodes.contains(&b) {
                        assert!(!result.unwrap());
                    } else {
                        assert!(result.unwrap());
                        nodes.remove(&a);
                        nodes.insert(b);
                        let relabel = |v: u8| if v == a { b } else { v };
                        edges = edges
                            .iter()
                            .map(|&(s, d, w)| (relabel(s), relabel(d), w))
                            .collect();
                    }
                }
                _ => {
                    let result = g.merge_replace(&a, &b);
                    if nodes.contains(&a) && nodes.contains(&b) {
                        result.unwrap();
                        if a != b {
                            nodes.remove(&a);
                            let relabel = |v: u8| if v == a { b } else { v };
                            edges = edges
                                .iter()
                                .map(|&(s, d, w)| (relabel(s), relabel(d), w))
                                .collect();
                        }
                    } else {
                        assert!(result.is_err());
                    }
                }
            }

            assert_eq!(g.get_nodes(), nodes.iter().copied().collect::<Vec<_>>());
            assert_eq!(triples(&g), edges.iter().copied().collect::<Vec<_>>());
            assert_eq!(g.iter().rev().count(), edges.len());
            assert_consistent(&g);
        }
    }
}
