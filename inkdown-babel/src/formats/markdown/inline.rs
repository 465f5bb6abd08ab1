//! Inline Markdown → HTML rendering.
//!
//! Rendering runs in two phases. A scanner first walks the text, HTML-escapes
//! it and replaces opaque segments (code spans, backslash escapes) with
//! placeholder tokens. Regex rules then rewrite images and links on the
//! tokenized string, emphasis is resolved by matching delimiter runs, and the
//! placeholders are finally restored. Because code spans are tokens by the
//! time emphasis is matched, `*` inside backticks is never read as emphasis.
//!
//! Rule order:
//!
//! 1. images `![alt](src)` (before links, so the `!` is never left behind)
//! 2. links `[text](href)`
//! 3. emphasis: `*` runs (italic, bold, bold+italic) and `~~` runs (strikethrough)
//!
//! Emphasis follows the CommonMark delimiter-run rules, simplified: a run can
//! open when it is not followed by whitespace and close when it is not
//! preceded by whitespace. Each closer pairs with the nearest compatible
//! opener, taking delimiters from the inner edge of both runs, so the output
//! is always properly nested. `*a***b**` is italic `a` then bold `b`, and
//! `***a** b*` is italic around a bold `a`. A triple run closing a triple run
//! is bold around italic.

use crate::common::escape::escape_html;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]*)\)").unwrap());

/// Opaque segments pulled out of the text before the regex rules run.
///
/// Each entry keeps its HTML rendering and the escaped plain text used when
/// the segment ends up inside an attribute value.
#[derive(Default)]
struct Stash {
    entries: Vec<(String, String)>,
}

impl Stash {
    fn push(&mut self, html: String, plain: String) -> String {
        let token = format!("{OPEN}{}{CLOSE}", self.entries.len());
        self.entries.push((html, plain));
        token
    }

    fn restore(&self, text: &str, plain: bool) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.entries.get(index))
                    .map(|(html, text)| if plain { text.clone() } else { html.clone() })
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn attribute(&self, text: &str) -> String {
        self.restore(text, true).replace('"', "&quot;")
    }
}

/// Render one block's worth of inline Markdown to HTML.
///
/// Newlines inside the text become `<br>`.
pub fn render_inline(text: &str) -> String {
    let mut stash = Stash::default();
    let tokenized = tokenize(text, &mut stash);

    let with_images = IMAGE.replace_all(&tokenized, |caps: &Captures| {
        let tag = format!(
            "<img src=\"{}\" alt=\"{}\">",
            stash.attribute(&caps[2]),
            stash.attribute(&caps[1])
        );
        stash.push(tag, String::new())
    });
    let with_links = LINK.replace_all(&with_images, |caps: &Captures| {
        let open = format!("<a href=\"{}\">", stash.attribute(&caps[2]));
        let open = stash.push(open, String::new());
        format!("{open}{}</a>", &caps[1])
    });

    let html = emphasis(&with_links).replace('\n', "<br>");

    stash.restore(&html, false)
}

/// Escape HTML, and swap code spans and backslash escapes for placeholders.
fn tokenize(text: &str, stash: &mut Stash) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' if chars.get(i + 1).is_some_and(char::is_ascii_punctuation) => {
                let literal = escape_html(&chars[i + 1].to_string());
                out.push_str(&stash.push(literal.clone(), literal));
                i += 2;
            }
            '`' => {
                let run = run_length(&chars, i, '`');
                match find_closing_run(&chars, i + run, run) {
                    Some(close) => {
                        let content: String = chars[i + run..close].iter().collect();
                        let content = escape_html(&code_span_content(&content));
                        let html = format!("<code>{content}</code>");
                        out.push_str(&stash.push(html, content));
                        i = close + run;
                    }
                    None => {
                        out.extend(&chars[i..i + run]);
                        i += run;
                    }
                }
            }
            '&' => {
                out.push_str("&amp;");
                i += 1;
            }
            '<' => {
                out.push_str("&lt;");
                i += 1;
            }
            '>' => {
                out.push_str("&gt;");
                i += 1;
            }
            OPEN | CLOSE => {
                // Literal sentinel characters must not be mistaken for tokens.
                out.push_str(&stash.push(c.to_string(), c.to_string()));
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// A run of `*` delimiters, or a `~~` pair, in the tokenized text.
struct Run {
    ch: char,
    len: usize,
    /// Delimiters not yet paired.
    count: usize,
    can_open: bool,
    can_close: bool,
    active: bool,
    opens: Vec<&'static str>,
    closes: Vec<&'static str>,
}

impl Run {
    fn new(ch: char, len: usize, before: Option<char>, after: Option<char>) -> Self {
        Self {
            ch,
            len,
            count: len,
            can_open: after.is_some_and(|c| !c.is_whitespace()),
            can_close: before.is_some_and(|c| !c.is_whitespace()),
            active: true,
            opens: Vec::new(),
            closes: Vec::new(),
        }
    }

    fn can_pair_with(&self, closer: &Run) -> bool {
        if !self.active || self.ch != closer.ch || self.count == 0 || !self.can_open {
            return false;
        }
        // A run that could go either way must not split a multiple of three.
        let either_way = self.can_close || closer.can_open;
        let sum = self.len + closer.len;
        !(self.ch == '*'
            && either_way
            && sum % 3 == 0
            && !(self.len % 3 == 0 && closer.len % 3 == 0))
    }

    fn render(&self, out: &mut String) {
        out.extend(self.closes.iter().copied());
        out.extend(std::iter::repeat(self.ch).take(self.count));
        out.extend(self.opens.iter().rev().copied());
    }
}

enum Piece {
    Text(String),
    Run(usize),
}

/// Resolve `*` and `~~` delimiter runs into `em`, `strong` and `s` tags.
fn emphasis(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut runs: Vec<Run> = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '*' && c != '~' {
            literal.push(c);
            i += 1;
            continue;
        }
        let len = run_length(&chars, i, c);
        if c == '*' || len == 2 {
            let before = i.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i + len).copied();
            pieces.push(Piece::Text(std::mem::take(&mut literal)));
            pieces.push(Piece::Run(runs.len()));
            runs.push(Run::new(c, len, before, after));
        } else {
            literal.extend(&chars[i..i + len]);
        }
        i += len;
    }
    pieces.push(Piece::Text(literal));

    for closer in 0..runs.len() {
        if !runs[closer].can_close {
            continue;
        }
        while runs[closer].count > 0 {
            let Some(opener) = (0..closer)
                .rev()
                .find(|&o| runs[o].can_pair_with(&runs[closer]))
            else {
                break;
            };
            let used = delimiters_used(&runs[opener], &runs[closer]);
            let (open, close) = tags(runs[closer].ch, used);
            runs[opener].count -= used;
            runs[opener].opens.push(open);
            runs[closer].count -= used;
            runs[closer].closes.push(close);
            for run in &mut runs[opener + 1..closer] {
                run.active = false;
            }
        }
    }

    let mut out = String::with_capacity(text.len());
    for piece in &pieces {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Run(index) => runs[*index].render(&mut out),
        }
    }
    out
}

fn delimiters_used(opener: &Run, closer: &Run) -> usize {
    if opener.ch == '~' {
        2
    } else if opener.count >= 3 && closer.count >= 3 {
        3
    } else if opener.count >= 2 && closer.count >= 2 {
        2
    } else {
        1
    }
}

fn tags(ch: char, used: usize) -> (&'static str, &'static str) {
    match (ch, used) {
        ('~', _) => ("<s>", "</s>"),
        (_, 1) => ("<em>", "</em>"),
        (_, 2) => ("<strong>", "</strong>"),
        _ => ("<strong><em>", "</em></strong>"),
    }
}

fn run_length(chars: &[char], start: usize, c: char) -> usize {
    chars[start..].iter().take_while(|&&x| x == c).count()
}

/// Index of the next backtick run of exactly `len` characters.
fn find_closing_run(chars: &[char], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '`' {
            let run = run_length(chars, i, '`');
            if run == len {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}

/// Line endings become spaces; one padding space is stripped from each side
/// when both are present and the span is not all spaces.
fn code_span_content(raw: &str) -> String {
    let content = raw.replace('\n', " ");
    if content.len() >= 2
        && content.starts_with(' ')
        && content.ends_with(' ')
        && !content.chars().all(|c| c == ' ')
    {
        content[1..content.len() - 1].to_string()
    } else {
        content
    }
}
