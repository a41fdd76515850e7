//! 边游标与遍历器
//!
//! 把 "节点 -> 出边" 两层结构线性化为一个按全局边顺序排列的双向序列。
//! 外层游标按值升序走节点，内层游标走当前节点的出边集。

use super::edge::EdgeId;
use super::graph::Graph;
use super::node::{Node, Slot};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Bound::{self, Excluded, Unbounded};

/// 只读双向游标
///
/// 外层为 `None` 时表示结束位置，此时内层没有意义。
pub struct Cursor<'a, N, E> {
    graph: &'a Graph<N, E>,
    outer: Option<&'a Node<N, E>>,
    inner: Option<Slot<'a, N, E>>,
}

impl<'a, N: Ord + Clone, E: Ord + Clone> Cursor<'a, N, E> {
    /// 第一条边；没有边时为结束位置
    pub(crate) fn front(graph: &'a Graph<N, E>) -> Self {
        let outer = graph.nodes.iter().find(|node| !node.outgoing.is_empty());
        let inner = outer.and_then(|node| node.outgoing.first());
        Self {
            graph,
            outer,
            inner,
        }
    }

    /// 结束位置
    pub(crate) fn end(graph: &'a Graph<N, E>) -> Self {
        Self {
            graph,
            outer: None,
            inner: None,
        }
    }

    /// 指定节点出边集中的某个位置
    pub(crate) fn at(graph: &'a Graph<N, E>, node: &'a Node<N, E>, slot: Slot<'a, N, E>) -> Self {
        Self {
            graph,
            outer: Some(node),
            inner: Some(slot),
        }
    }

    /// 由边句柄重建游标；句柄失效时为结束位置
    pub(crate) fn from_edge(graph: &'a Graph<N, E>, edge_id: Option<EdgeId>) -> Self {
        let located = edge_id.and_then(|id| {
            let edge = graph.edges.get(id)?;
            let node = graph.nodes.get(edge.src())?;
            let dst = graph.nodes.get(edge.dst())?.value();
            let slot = node.outgoing.get(dst, edge.weight())?;
            Some((node, slot))
        });
        match located {
            Some((node, slot)) => Self::at(graph, node, slot),
            None => Self::end(graph),
        }
    }

    /// 当前边 (源值, 目标值, 权重)；结束位置返回 None
    pub fn current(&self) -> Option<(&'a N, &'a N, &'a E)> {
        let (_, _, edge_id) = self.inner?;
        self.graph.resolve(edge_id)
    }

    /// 是否位于结束位置
    pub fn is_end(&self) -> bool {
        self.outer.is_none()
    }

    pub(crate) fn edge_id(&self) -> Option<EdgeId> {
        self.outer?;
        self.inner.map(|(_, _, id)| id)
    }

    /// 前进一条边；已在结束位置时不动
    pub fn move_next(&mut self) {
        let (Some(node), Some((dst, weight, _))) = (self.outer, self.inner) else {
            return;
        };
        if let Some(slot) = node.outgoing.next_after(dst, weight) {
            self.inner = Some(slot);
            return;
        }

        // 当前节点的出边走完，跳到下一个出边集非空的节点
        let after: (Bound<&N>, Bound<&N>) = (Excluded(node.value()), Unbounded);
        self.outer = self
            .graph
            .nodes
            .range(after)
            .find(|next| !next.outgoing.is_empty());
        self.inner = self.outer.and_then(|next| next.outgoing.first());
    }

    /// 后退一条边
    ///
    /// 在结束位置时移到最后一条边；已在第一条边时不动。
    pub fn move_prev(&mut self) {
        if let (Some(node), Some((dst, weight, _))) = (self.outer, self.inner) {
            if let Some(slot) = node.outgoing.prev_before(dst, weight) {
                self.inner = Some(slot);
                return;
            }
        }

        let upper: Bound<&N> = match self.outer {
            Some(node) => Excluded(node.value()),
            None => Unbounded,
        };
        let prev = self
            .graph
            .nodes
            .range((Bound::<&N>::Unbounded, upper))
            .rev()
            .find(|prev| !prev.outgoing.is_empty());
        if let Some(prev) = prev {
            self.outer = Some(prev);
            self.inner = prev.outgoing.last();
        }
    }
}

impl<N, E> Clone for Cursor<'_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for Cursor<'_, N, E> {}

impl<N: Ord, E> PartialEq for Cursor<'_, N, E> {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.graph, other.graph) {
            return false;
        }
        match (self.outer, other.outer) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.value() == b.value()
                    && self.inner.map(|(_, _, id)| id) == other.inner.map(|(_, _, id)| id)
            }
            _ => false,
        }
    }
}

impl<N: Ord, E> Eq for Cursor<'_, N, E> {}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for Cursor<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.outer, self.inner) {
            (Some(node), Some((dst, weight, _))) => f
                .debug_tuple("Cursor")
                .field(node.value())
                .field(dst)
                .field(weight)
                .finish(),
            _ => f.write_str("Cursor(end)"),
        }
    }
}

/// 全局有序的边遍历器
///
/// 由前后两个游标夹逼，支持 `rev()`。
pub struct Edges<'a, N, E> {
    front: Cursor<'a, N, E>,
    back: Cursor<'a, N, E>,
    remaining: usize,
}

impl<'a, N: Ord + Clone, E: Ord + Clone> Edges<'a, N, E> {
    pub(crate) fn new(graph: &'a Graph<N, E>) -> Self {
        Self {
            front: Cursor::front(graph),
            back: Cursor::end(graph),
            remaining: graph.edge_count(),
        }
    }
}

impl<'a, N: Ord + Clone, E: Ord + Clone> Iterator for Edges<'a, N, E> {
    type Item = (&'a N, &'a N, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.front.current()?;
        self.front.move_next();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: Ord + Clone, E: Ord + Clone> DoubleEndedIterator for Edges<'_, N, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.move_prev();
        let item = self.back.current()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<N: Ord + Clone, E: Ord + Clone> ExactSizeIterator for Edges<'_, N, E> {}

impl<N: Ord + Clone, E: Ord + Clone> FusedIterator for Edges<'_, N, E> {}

impl<N, E> Clone for Edges<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// 可变游标
///
/// 持有图的独占借用，可以删除当前边并停在其后继上。位置以边句柄表示，
/// 删除其他边不会使其失效。
pub struct CursorMut<'a, N, E> {
    graph: &'a mut Graph<N, E>,
    current: Option<EdgeId>,
}

impl<'a, N: Ord + Clone, E: Ord + Clone> CursorMut<'a, N, E> {
    pub(crate) fn new(graph: &'a mut Graph<N, E>, current: Option<EdgeId>) -> Self {
        Self { graph, current }
    }

    /// 当前边；结束位置返回 None
    pub fn current(&self) -> Option<(&N, &N, &E)> {
        self.graph.resolve(self.current?)
    }

    /// 是否位于结束位置
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// 前进一条边
    pub fn move_next(&mut self) {
        let mut cursor = self.as_cursor();
        cursor.move_next();
        self.current = cursor.edge_id();
    }

    /// 后退一条边
    pub fn move_prev(&mut self) {
        let mut cursor = self.as_cursor();
        cursor.move_prev();
        self.current = cursor.edge_id();
    }

    /// 删除当前边，游标移到其后继（可能是结束位置）
    ///
    /// 返回被删除的三元组；在结束位置调用时返回 None 且不做修改。
    pub fn remove_current(&mut self) -> Option<(N, N, E)> {
        let edge_id = self.current?;
        // 先算后继，再删除
        let mut successor = self.as_cursor();
        successor.move_next();
        let next = successor.edge_id();

        let removed = self.graph.remove_edge(edge_id);
        self.current = next;
        removed
    }

    /// 以只读游标查看当前位置
    pub fn as_cursor(&self) -> Cursor<'_, N, E> {
        Cursor::from_edge(self.graph, self.current)
    }

    /// 放弃可变借用，转换为只读游标
    pub fn into_cursor(self) -> Cursor<'a, N, E> {
        let graph: &'a Graph<N, E> = self.graph;
        Cursor::from_edge(graph, self.current)
    }
}
