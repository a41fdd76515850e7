//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot call Graph::insert_edge when either src or dst node does not exist")]
    InsertEdgeMissingNode,

    #[error("Cannot call Graph::replace on a node that doesn't exist")]
    ReplaceMissingNode,

    #[error("Cannot call Graph::merge_replace on old or new data if they don't exist in the graph")]
    MergeReplaceMissingNode,

    #[error("Cannot call Graph::is_connected if src or dst node don't exist in the graph")]
    IsConnectedMissingNode,

    #[error("Cannot call Graph::get_connected if src doesn't exist in the graph")]
    GetConnectedMissingNode,

    #[error("Cannot call Graph::get_weights if src or dst node don't exist in the graph")]
    GetWeightsMissingNode,

    #[error("Cannot call Graph::get_predecessors if dst doesn't exist in the graph")]
    GetPredecessorsMissingNode,

    #[error("parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
