//! crumbline entrypoint: render one buffer's breadcrumb to the terminal.
use anyhow::Result;
use clap::Parser;
use core_model::{ContextNode, PathContext};
use core_render::paint;
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod context_arg;
mod interactive;
mod terminal;

use app::{App, Request};

const FALLBACK_WIDTH: usize = 80;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "crumbline", version, about = "Breadcrumb line for editor windows")]
struct Args {
    /// Buffer path (absolute, relative, `~/...` or `scheme://...`). Empty for an unnamed buffer.
    #[arg(default_value = "")]
    path: String,
    /// Surface width in cells (defaults to the terminal width).
    #[arg(long)]
    width: Option<usize>,
    /// File type tag (defaults to one inferred from the extension).
    #[arg(long)]
    filetype: Option<String>,
    /// Mark the buffer as having unsaved changes.
    #[arg(long)]
    modified: bool,
    /// Context node `Kind:name@line:col`, outermost first; repeatable.
    #[arg(long = "context", value_parser = parse_context)]
    context: Vec<ContextNode>,
    /// Print unstyled text instead of terminal escapes.
    #[arg(long)]
    plain: bool,
    /// Keep the line on screen and react to mouse/keyboard input.
    #[arg(long, short)]
    interactive: bool,
    /// Configuration file path (overrides discovery of `crumbline.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn parse_context(arg: &str) -> Result<ContextNode> {
    context_arg::parse(arg)
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("crumbline.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "crumbline.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn path_context() -> PathContext {
    PathContext {
        cwd: std::env::current_dir()
            .ok()
            .map(|p| p.to_string_lossy().into_owned()),
        home: dirs::home_dir().map(|p| p.to_string_lossy().into_owned()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", interactive = args.interactive, plain = args.plain, "startup");

    let config = core_config::load_from(args.config.clone())?;
    let width = args.width.unwrap_or_else(|| {
        crossterm::terminal::size()
            .map(|(w, _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH)
    });
    let request = Request {
        path: args.path.clone(),
        file_type: args.filetype.clone(),
        modified: args.modified,
        context: args.context.clone(),
        width,
    };
    let mut app = App::new(config, &request, path_context());

    if args.interactive {
        interactive::run(&mut app)?;
        info!(target: "runtime", "shutdown");
        return Ok(());
    }

    app.tick();
    let mut out = stdout();
    match app.line() {
        Some(line) if !args.plain => {
            paint(&mut out, line, width, &app.theme)?;
            writeln!(out)?;
        }
        _ => writeln!(out, "{}", app.plain())?,
    }
    out.flush()?;
    info!(target: "runtime", "shutdown");
    Ok(())
}
