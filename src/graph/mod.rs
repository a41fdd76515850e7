//! 图核心模块
//!
//! 定义节点、边、图以及沿全局边顺序移动的游标

mod cursor;
mod edge;
mod graph;
mod index;
mod node;

pub use cursor::{Cursor, CursorMut, Edges};
pub use edge::EdgeId;
pub use graph::Graph;
pub use node::NodeId;
