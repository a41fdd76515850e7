//! weighted-digraph 命令行工具
//!
//! 从文本导入图，依次执行重命名、合并与删除，然后输出结果

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use weighted_digraph::cli::{load_path, load_triples, parse_rename, PrintMode, Printer};

#[derive(Parser, Debug)]
#[command(name = "digraph-cli")]
#[command(about = "有向带权图命令行工具", version)]
struct Args {
    /// 输入文件路径（默认读取标准输入）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 重命名节点: OLD=NEW（可重复）
    #[arg(long, value_name = "OLD=NEW", value_parser = parse_rename)]
    replace: Vec<(String, String)>,

    /// 合并节点: OLD=NEW（可重复）
    #[arg(long, value_name = "OLD=NEW", value_parser = parse_rename)]
    merge: Vec<(String, String)>,

    /// 删除节点（可重复）
    #[arg(short, long, value_name = "NODE")]
    delete: Vec<String>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = PrintMode::Text)]
    format: PrintMode,

    /// 输出统计信息
    #[arg(long)]
    stats: bool,

    /// 以 JSON 输出指标快照
    #[arg(long)]
    metrics_json: bool,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let loaded = match &args.input {
        Some(path) => load_path(path).with_context(|| format!("读取输入失败: {:?}", path))?,
        None => load_triples(BufReader::new(io::stdin().lock())).context("读取标准输入失败")?,
    };
    let mut graph = loaded.graph;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    for (old, new) in &args.replace {
        let renamed = graph
            .replace(old, new.clone())
            .with_context(|| format!("无法重命名 {} -> {}", old, new))?;
        if !renamed {
            eprintln!("跳过重命名 {} -> {}: 目标节点已存在", old, new);
        }
    }

    for (old, new) in &args.merge {
        graph
            .merge_replace(old, new)
            .with_context(|| format!("无法合并 {} -> {}", old, new))?;
    }

    for node in &args.delete {
        if !graph.delete_node(node) {
            eprintln!("跳过删除 {}: 节点不存在", node);
        }
    }

    let printer = Printer::new(args.format);
    print!("{}", printer.print_graph(&graph));

    if args.stats {
        println!("{}", printer.print_load_stats(&loaded.stats));
        println!("{}", printer.print_stats(&graph.metrics()));
    }

    if args.metrics_json {
        println!("{}", graph.metrics().to_json()?);
    }

    Ok(())
}
