//! Output formatting for command results.
//!
//! Text and rich output reuse the library renderer; JSON output serialises
//! the library types directly. Plain text is colored unless `NO_COLOR` is set
//! or `TERM` is `dumb`.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use georoute_lib::{render_plan, EntitySet, RoutePlan, RouteRenderMode};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// ANSI sequences applied by [`style_text`]. Every field is empty when color
/// is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl Palette {
    pub const ANSI: Self = Self {
        reset: "\x1b[0m",
        bold: "\x1b[1;97m",
        green: "\x1b[32m",
        red: "\x1b[31m",
    };

    pub const PLAIN: Self = Self {
        reset: "",
        bold: "",
        green: "",
        red: "",
    };

    /// Palette for the current process environment.
    pub fn detect() -> Self {
        let term = std::env::var("TERM").ok();
        Self::for_terminal(std::env::var_os("NO_COLOR").is_some(), term.as_deref())
    }

    fn for_terminal(no_color: bool, term: Option<&str>) -> Self {
        let dumb = term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        if no_color || dumb {
            Self::PLAIN
        } else {
            Self::ANSI
        }
    }
}

/// Write a planned route, tree or distance table in the requested format.
pub fn write_plan<W: Write>(
    out: &mut W,
    entities: &EntitySet,
    plan: &RoutePlan,
    format: OutputFormat,
    palette: Palette,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let text = render_plan(entities, plan, RouteRenderMode::PlainText);
            write!(out, "{}", style_text(&text, palette))
        }
        OutputFormat::Rich => write!(
            out,
            "{}",
            render_plan(entities, plan, RouteRenderMode::RichText)
        ),
        OutputFormat::Json => write_json(out, plan),
    }
}

/// Serialise `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    writeln!(out)
}

/// Apply the palette to plain text output: the heading is bold, totals green
/// and anything unreachable red.
pub fn style_text(text: &str, palette: Palette) -> String {
    let mut styled = String::with_capacity(text.len());
    for (index, line) in text.lines().enumerate() {
        let color = if line.starts_with("No path found")
            || line.starts_with("Negative cycle")
            || line.ends_with("unreachable")
        {
            palette.red
        } else if line.starts_with("Total:") {
            palette.green
        } else if index == 0 {
            palette.bold
        } else {
            ""
        };
        if color.is_empty() {
            styled.push_str(line);
        } else {
            styled.push_str(color);
            styled.push_str(line);
            styled.push_str(palette.reset);
        }
        styled.push('\n');
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_leaves_text_untouched() {
        let text = "Route: a -> b\n  0: a (a)\nTotal: 1.0 km\n";
        assert_eq!(style_text(text, Palette::PLAIN), text);
    }

    #[test]
    fn colored_palette_highlights_heading_and_total() {
        let palette = Palette::ANSI;
        let styled = style_text("Route: a -> b\nTotal: 1.0 km\n", palette);
        assert!(styled.starts_with(palette.bold));
        assert!(styled.contains(&format!("{}Total: 1.0 km{}", palette.green, palette.reset)));
    }

    #[test]
    fn unreachable_lines_are_red() {
        let palette = Palette::ANSI;
        let styled = style_text("No path found (algorithm: bfs)\n", palette);
        assert!(styled.starts_with(palette.red));
    }

    #[test]
    fn no_color_or_dumb_terminal_disables_styling() {
        assert_eq!(Palette::for_terminal(true, Some("xterm-256color")), Palette::PLAIN);
        assert_eq!(Palette::for_terminal(false, Some("DUMB")), Palette::PLAIN);
        assert_eq!(Palette::for_terminal(false, Some("xterm-256color")), Palette::ANSI);
        assert_eq!(Palette::for_terminal(false, None), Palette::ANSI);
    }

    #[test]
    fn json_output_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &serde_json::json!({"a": 1})).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
    }
}
