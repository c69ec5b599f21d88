//! One in-memory editor window showing one buffer, wired to a surface controller.

use core_config::Config;
use core_events::EditorEvent;
use core_model::{
    BufferId, ContextNode, EditorHost, MemoryHost, PathContext, StyledLine, SurfaceDisplay, WindowId,
};
use core_provider::{StaticContextProvider, TableIconProvider};
use core_render::{BuiltinThemes, StyleMap, ThemeResolver};
use core_surface::{SurfaceController, Visibility};
use std::rc::Rc;
use tracing::{debug, info};

/// What the binary was asked to show.
#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub file_type: Option<String>,
    pub modified: bool,
    pub context: Vec<ContextNode>,
    pub width: usize,
}

pub struct App {
    pub host: MemoryHost,
    pub controller: SurfaceController,
    pub window: WindowId,
    pub buffer: BufferId,
    pub theme: StyleMap,
}

impl App {
    pub fn new(config: Config, request: &Request, path_context: PathContext) -> Self {
        let theme = BuiltinThemes.resolve(&config.file.theme);
        let mut host = MemoryHost::new().with_path_context(path_context);
        let file_type = request
            .file_type
            .clone()
            .unwrap_or_else(|| infer_file_type(&request.path).to_string());
        let buffer = host.add_buffer(request.path.as_str(), file_type);
        host.set_modified(buffer, request.modified);
        let window = host.add_window(buffer, request.width);
        // What the surface shows when the breadcrumb steps aside.
        seed_display(&mut host, window, &request.path);

        let context = Rc::new(StaticContextProvider::new());
        if !request.context.is_empty() {
            context.set(buffer, request.context.clone());
        }
        let controller = SurfaceController::new(
            Rc::new(config),
            Rc::new(Visibility::default()),
            Box::new(context),
            Box::new(TableIconProvider::default()),
        );
        info!(
            target: "runtime",
            %window,
            %buffer,
            width = request.width,
            context_nodes = request.context.len(),
            "app_ready"
        );
        let mut app = Self {
            host,
            controller,
            window,
            buffer,
            theme,
        };
        app.controller.handle_event(
            &app.host,
            EditorEvent::BufferEntered {
                window: app.window,
                buffer: app.buffer,
            },
        );
        app
    }

    /// Drain deferred renders.
    pub fn tick(&mut self) -> usize {
        self.controller.run_pending(&mut self.host)
    }

    pub fn width(&self) -> usize {
        self.host.window_width(self.window).unwrap_or(0)
    }

    pub fn resize(&mut self, width: usize) {
        self.host.set_window_width(self.window, width);
        self.controller
            .handle_event(&self.host, EditorEvent::WindowResized { window: self.window });
    }

    pub fn line(&self) -> Option<&StyledLine> {
        self.controller.line(self.window)
    }

    /// Current surface content as unstyled text, exactly `width` cells wide.
    pub fn plain(&self) -> String {
        let width = self.width();
        match self.host.display(self.window) {
            Some(SurfaceDisplay::Breadcrumb(line)) => line.to_plain(width),
            Some(SurfaceDisplay::Plain(text)) => {
                let (clipped, used) = core_text::clip_to_width(&text, width);
                let mut out = clipped.to_string();
                out.extend(std::iter::repeat_n(' ', width - used));
                out
            }
            None => String::new(),
        }
    }
}

/// Put plain text on `window`; a stale window is logged, not fatal.
pub fn seed_display(host: &mut dyn EditorHost, window: WindowId, text: &str) -> bool {
    match host.set_display(window, SurfaceDisplay::Plain(text.to_string())) {
        Ok(()) => true,
        Err(e) => {
            debug!(target: "runtime", %window, error = %e, "initial_display_failed");
            false
        }
    }
}

/// File type from the extension, for when `--filetype` is not given.
pub fn infer_file_type(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("rs") => "rust",
        Some("md") => "markdown",
        Some("py") => "python",
        Some("js") => "javascript",
        Some("ts") => "typescript",
        Some(ext) => ext,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::parse;
    use core_model::{Position, SymbolKind};
    use pretty_assertions::assert_eq;

    fn request(path: &str, width: usize) -> Request {
        Request {
            path: path.to_string(),
            file_type: None,
            modified: false,
            context: vec![ContextNode::new("run", SymbolKind::Function, Position::new(4, 0))],
            width,
        }
    }

    fn plain_config() -> Config {
        parse("kinds = false\n[modifiers]\ndirname = \"\"\n[symbols]\nseparator = \">\"\n").unwrap()
    }

    #[test]
    fn file_types_from_extension() {
        assert_eq!(infer_file_type("/a/main.rs"), "rust");
        assert_eq!(infer_file_type("notes.md"), "markdown");
        assert_eq!(infer_file_type("Cargo.toml"), "toml");
        assert_eq!(infer_file_type("/a.d/Makefile"), "");
    }

    #[test]
    fn seeding_a_closed_window_is_reported() {
        let mut host = MemoryHost::new();
        let buffer = host.add_buffer("/a.rs", "rust");
        let window = host.add_window(buffer, 10);
        assert!(seed_display(&mut host, window, "/a.rs"));
        assert_eq!(host.display(window), Some(SurfaceDisplay::Plain("/a.rs".into())));
        host.close_window(window);
        assert!(!seed_display(&mut host, window, "/a.rs"));
    }

    #[test]
    fn first_tick_renders_breadcrumb() {
        let mut app = App::new(plain_config(), &request("/srv/app.rs", 30), PathContext::default());
        assert_eq!(app.plain(), format!("{:<30}", "/srv/app.rs"));
        assert_eq!(app.tick(), 1);
        assert_eq!(app.plain(), format!("{:<30}", " / > srv > \u{e7a8} app.rs > run"));
    }

    #[test]
    fn toggle_shows_previous_plain_content() {
        let mut app = App::new(plain_config(), &request("/srv/app.rs", 30), PathContext::default());
        app.tick();
        app.controller.toggle(&app.host);
        app.tick();
        assert_eq!(app.plain().trim_end(), "/srv/app.rs");
    }

    #[test]
    fn resize_rerenders_at_new_width() {
        let mut app = App::new(plain_config(), &request("/srv/deep/tree/app.rs", 60), PathContext::default());
        app.tick();
        app.resize(20);
        app.tick();
        let line = app.line().unwrap();
        assert!(line.left_width() + line.right_width() <= 20);
        assert_eq!(app.plain().chars().count(), 20);
    }
}
