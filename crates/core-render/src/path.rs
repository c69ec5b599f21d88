//! Path modifier directives (`:~:.`, `:h`, `:t`, ...).
//!
//! A directive is a sequence of `:x` items applied left to right to a
//! `/`-separated path string:
//!
//! | item | effect |
//! |------|--------|
//! | `p`  | make absolute against the working directory (expands a leading `~`) |
//! | `~`  | replace the home directory prefix with `~` |
//! | `.`  | make relative to the working directory (`.` when equal) |
//! | `h`  | head: drop the last component (`.` if none, `/` for root files) |
//! | `t`  | tail: keep only the last component |
//! | `r`  | drop the last extension of the tail |
//! | `e`  | keep only the last extension |
//!
//! Unknown items are ignored. Paths with a URI scheme (`s3://bucket/key`)
//! are left alone by `p`, `~` and `.`, and `h` never cuts into `scheme://`.

use core_model::PathContext;

pub fn apply_modifiers(path: &str, directive: &str, ctx: &PathContext) -> String {
    let mut current = path.to_string();
    for item in directive.split(':').filter(|s| !s.is_empty()) {
        current = match item {
            "p" => absolute(&current, ctx),
            "~" => home_relative(&current, ctx),
            "." => cwd_relative(&current, ctx),
            "h" => head(&current).to_string(),
            "t" => tail(&current).to_string(),
            "r" => drop_extension(&current).to_string(),
            "e" => extension(&current).to_string(),
            other => {
                tracing::trace!(target: "render.path", item = other, "unknown_modifier_ignored");
                current
            }
        };
    }
    current
}

/// Length of a leading `scheme://` prefix, if any.
pub fn scheme_len(path: &str) -> Option<usize> {
    let idx = path.find("://")?;
    let scheme = &path[..idx];
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(idx + 3)
}

fn expand_home(path: &str, ctx: &PathContext) -> Option<String> {
    let home = ctx.home.as_deref()?;
    if path == "~" {
        return Some(home.to_string());
    }
    path.strip_prefix("~/")
        .map(|rest| format!("{}/{}", home.trim_end_matches('/'), rest))
}

fn absolute(path: &str, ctx: &PathContext) -> String {
    if scheme_len(path).is_some() || path.starts_with('/') {
        return path.to_string();
    }
    if let Some(expanded) = expand_home(path, ctx) {
        return expanded;
    }
    match ctx.cwd.as_deref() {
        Some(cwd) if !path.is_empty() => {
            let rel = path.strip_prefix("./").unwrap_or(path);
            format!("{}/{}", cwd.trim_end_matches('/'), rel)
        }
        _ => path.to_string(),
    }
}

fn home_relative(path: &str, ctx: &PathContext) -> String {
    let Some(home) = ctx.home.as_deref().map(|h| h.trim_end_matches('/')) else {
        return path.to_string();
    };
    if home.is_empty() || scheme_len(path).is_some() {
        return path.to_string();
    }
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

fn cwd_relative(path: &str, ctx: &PathContext) -> String {
    let Some(cwd) = ctx.cwd.as_deref().map(|c| c.trim_end_matches('/')) else {
        return path.to_string();
    };
    if cwd.is_empty() || scheme_len(path).is_some() {
        return path.to_string();
    }
    // Compare on the expanded form so `:~:.` still relativizes paths under cwd.
    let expanded = expand_home(path, ctx);
    let full = expanded.as_deref().unwrap_or(path);
    if full == cwd {
        return ".".to_string();
    }
    match full.strip_prefix(cwd) {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        _ => path.to_string(),
    }
}

fn head(path: &str) -> &str {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    let floor = scheme_len(trimmed).unwrap_or(0);
    match trimmed.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(idx) if idx < floor => &trimmed[..floor],
        Some(idx) => {
            let head = trimmed[..idx].trim_end_matches('/');
            if head.len() < floor {
                &trimmed[..floor]
            } else if head.is_empty() {
                "/"
            } else {
                head
            }
        }
    }
}

fn tail(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Byte index of the extension dot in the tail, ignoring a leading dot (dotfiles).
fn extension_dot(path: &str) -> Option<usize> {
    let tail_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[tail_start..];
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(tail_start + dot),
    }
}

fn drop_extension(path: &str) -> &str {
    match extension_dot(path) {
        Some(dot) => &path[..dot],
        None => path,
    }
}

fn extension(path: &str) -> &str {
    match extension_dot(path) {
        Some(dot) => &path[dot + 1..],
        None => "",
    }
}
