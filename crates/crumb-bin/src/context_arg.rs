//! `--context Kind:name@line:col` parsing.

use anyhow::{Context as _, Result, anyhow};
use core_model::{ContextNode, Position, SymbolKind};

/// Parse one context node. `@line:col` is optional and defaults to `1:0`;
/// the name may itself contain `:` (e.g. `Method:Engine::tick@9:8`).
pub fn parse(arg: &str) -> Result<ContextNode> {
    let (kind, rest) = arg
        .split_once(':')
        .ok_or_else(|| anyhow!("expected Kind:name[@line:col], got `{arg}`"))?;
    let kind = SymbolKind::from_name(kind).ok_or_else(|| anyhow!("unknown symbol kind `{kind}`"))?;

    let (name, position) = match rest.rsplit_once('@') {
        Some((name, pos)) => (name, parse_position(pos)?),
        None => (rest, Position::start()),
    };
    if name.is_empty() {
        return Err(anyhow!("context name is empty in `{arg}`"));
    }
    Ok(ContextNode::new(name, kind, position))
}

fn parse_position(pos: &str) -> Result<Position> {
    let (line, column) = pos.split_once(':').unwrap_or((pos, "0"));
    let line: usize = line.parse().with_context(|| format!("invalid line `{line}`"))?;
    let column: usize = column.parse().with_context(|| format!("invalid column `{column}`"))?;
    if line == 0 {
        return Err(anyhow!("lines are 1-based"));
    }
    Ok(Position::new(line, column))
}
