//! SQL syntax highlighting for the result viewer and history list.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";
const PLAIN: Color = Color::White;

/// One `Line` per source line. Falls back to plain text if SQL isn't
/// available in the bundled syntax set.
pub fn highlight(sql: &str) -> Vec<Line<'static>> {
    // ratatui renders \t as zero-width
    let sql = sql.replace('\t', "    ");

    let (Some(syntax), Some(theme)) = (SYNTAX_SET.find_syntax_by_token("sql"), THEME_SET.themes.get(THEME))
    else {
        return plain(&sql);
    };
    let mut highlighter = HighlightLines::new(syntax, theme);

    let mut lines = Vec::new();
    for line in LinesWithEndings::from(sql.as_str()) {
        let Ok(ranges) = highlighter.highlight_line(line, &SYNTAX_SET) else {
            lines.push(Line::styled(line.trim_end_matches('\n').to_owned(), PLAIN));
            continue;
        };
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(hl_style, frag)| {
                let content = frag.trim_end_matches(['\r', '\n']);
                if content.is_empty() {
                    return None;
                }
                let fg = Color::Rgb(hl_style.foreground.r, hl_style.foreground.g, hl_style.foreground.b);
                Some(Span::styled(content.to_owned(), Style::default().fg(fg)))
            })
            .collect();
        // Blank lines stay, they separate statements
        lines.push(Line::from(spans));
    }
    lines
}

fn plain(sql: &str) -> Vec<Line<'static>> {
    sql.lines().map(|l| Line::styled(l.to_owned(), PLAIN)).collect()
}
