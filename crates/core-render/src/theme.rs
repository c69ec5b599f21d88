//! Style tag -> terminal colors.
//!
//! The renderer only ever deals in `StyleTag`s. A `ThemeResolver` turns a
//! theme name into a `StyleMap`, and painters ask the map for a concrete
//! `Highlight`. Lookups never fail: per-kind context styles fall back to the
//! generic context style, and anything still unknown falls back to `Normal`.
//! Every stored highlight is merged over `Normal` at insertion time, so a
//! style that only sets a foreground inherits the line's background.

use ahash::AHashMap;
use core_model::{StyleTag, SymbolKind};
use crossterm::style::{Attribute, Color, ContentStyle};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl Highlight {
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Fill unset fields from `base`.
    pub fn merged_over(self, base: Highlight) -> Highlight {
        Highlight {
            fg: self.fg.or(base.fg),
            bg: self.bg.or(base.bg),
            bold: self.bold || base.bold,
            italic: self.italic || base.italic,
        }
    }

    pub fn to_content_style(self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg;
        style.background_color = self.bg;
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.italic {
            style.attributes.set(Attribute::Italic);
        }
        style
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    normal: Highlight,
    styles: AHashMap<StyleTag, Highlight>,
}

impl StyleMap {
    pub fn new(normal: Highlight) -> Self {
        Self {
            normal,
            styles: AHashMap::new(),
        }
    }

    pub fn set(&mut self, tag: StyleTag, highlight: Highlight) {
        if tag == StyleTag::Normal {
            self.normal = highlight;
            return;
        }
        self.styles.insert(tag, highlight.merged_over(self.normal));
    }

    pub fn normal(&self) -> Highlight {
        self.normal
    }

    pub fn resolve(&self, tag: &StyleTag) -> Highlight {
        if let Some(found) = self.styles.get(tag) {
            return *found;
        }
        match tag {
            StyleTag::ContextKind(_) => self
                .styles
                .get(&StyleTag::Context)
                .copied()
                .unwrap_or(self.normal),
            _ => self.normal,
        }
    }
}

/// Source of named themes.
pub trait ThemeResolver {
    fn resolve(&self, name: &str) -> StyleMap;
}

/// Themes compiled into the binary: `auto`/`default` (colored) and `mono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinThemes;

impl BuiltinThemes {
    fn colored() -> StyleMap {
        let mut map = StyleMap::new(Highlight::default());
        map.set(StyleTag::Dirname, Highlight::fg(Color::DarkGrey));
        map.set(StyleTag::Basename, Highlight::fg(Color::White).bold());
        map.set(StyleTag::Context, Highlight::fg(Color::Grey));
        map.set(StyleTag::Modified, Highlight::fg(Color::Yellow));
        map.set(StyleTag::Ellipsis, Highlight::fg(Color::DarkGrey));
        map.set(StyleTag::Separator, Highlight::fg(Color::DarkGrey));
        map.set(StyleTag::External("DevIconRs".into()), Highlight::fg(Color::DarkYellow));
        for (kind, color) in [
            (SymbolKind::Module, Color::Magenta),
            (SymbolKind::Namespace, Color::Magenta),
            (SymbolKind::Class, Color::Yellow),
            (SymbolKind::Struct, Color::Yellow),
            (SymbolKind::Enum, Color::Yellow),
            (SymbolKind::Interface, Color::Cyan),
            (SymbolKind::Function, Color::Blue),
            (SymbolKind::Method, Color::Blue),
            (SymbolKind::Constructor, Color::Blue),
            (SymbolKind::Field, Color::Cyan),
            (SymbolKind::Variable, Color::Cyan),
            (SymbolKind::Constant, Color::DarkYellow),
        ] {
            map.set(StyleTag::ContextKind(kind), Highlight::fg(color));
        }
        map
    }

    fn mono() -> StyleMap {
        let mut map = StyleMap::new(Highlight::default());
        map.set(StyleTag::Basename, Highlight::default().bold());
        map
    }
}

impl ThemeResolver for BuiltinThemes {
    fn resolve(&self, name: &str) -> StyleMap {
        match name {
            "auto" | "default" => Self::colored(),
            "mono" => Self::mono(),
            other => {
                warn!(target: "render.theme", theme = other, "unknown_theme_using_default");
                Self::colored()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_styles_fall_back_to_context_then_normal() {
        let map = BuiltinThemes.resolve("auto");
        assert_eq!(
            map.resolve(&StyleTag::ContextKind(SymbolKind::Function)),
            Highlight::fg(Color::Blue)
        );
        assert_eq!(
            map.resolve(&StyleTag::ContextKind(SymbolKind::Event)),
            Highlight::fg(Color::Grey)
        );
        assert_eq!(map.resolve(&StyleTag::External("Nope".into())), Highlight::default());
    }

    #[test]
    fn styles_merge_over_normal() {
        let mut map = StyleMap::new(Highlight {
            bg: Some(Color::Black),
            ..Highlight::default()
        });
        map.set(StyleTag::Dirname, Highlight::fg(Color::Red));
        let dir = map.resolve(&StyleTag::Dirname);
        assert_eq!(dir.fg, Some(Color::Red));
        assert_eq!(dir.bg, Some(Color::Black));
    }

    #[test]
    fn unknown_theme_is_default() {
        let auto = BuiltinThemes.resolve("auto");
        let other = BuiltinThemes.resolve("does-not-exist");
        assert_eq!(
            auto.resolve(&StyleTag::Basename),
            other.resolve(&StyleTag::Basename)
        );
        assert!(!BuiltinThemes.resolve("mono").resolve(&StyleTag::Dirname).bold);
    }

    #[test]
    fn content_style_carries_attributes() {
        let style = Highlight::fg(Color::Blue).bold().to_content_style();
        assert_eq!(style.foreground_color, Some(Color::Blue));
        assert!(style.attributes.has(Attribute::Bold));
    }
}
