use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Text normalizer seam.
///
/// Implementations must be deterministic, order-preserving, free of shared
/// mutable state, and idempotent on already-normalized input. The engine
/// lowercases revision text before calling any of these.
pub trait Segmenter {
    /// Split revision text into paragraph strings, in reading order.
    fn paragraphs(&self, text: &str) -> Vec<String>;

    /// Split one paragraph into sentence strings, in reading order.
    fn sentences(&self, paragraph: &str) -> Vec<String>;

    /// Split one sentence into word tokens, in reading order.
    fn tokens(&self, sentence: &str) -> Vec<String>;
}

/// Sentence boundary marker, a private-use codepoint so it cannot collide
/// with document text.
const BREAK: &str = "\u{f8ff}";

static DOT_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s.=][^\s.=][^\s.=]\.) ").expect("valid dot boundary regex"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(http.*?://.*?[ \|<>\n\r])").expect("valid url regex"));

/// Symbol characters split off as standalone tokens.
static SYMBOLS: Lazy<HashSet<char>> = Lazy::new(|| {
    [
        '.', ',', ';', ':', '?', '!', '-', '_', '/', '\\', '(', ')', '[', ']', '{', '}', '*',
        '#', '@', '&', '=', '+', '%', '~', '$', '^', '<', '>', '"', '\'', '´', '`', '¸', '˛',
        '’', '¤', '₳', '฿', '₵', '¢', '₡', '₢', '₫', '₯', '֏', '₠', '€', 'ƒ', '₣', '₲', '₴',
        '₭', '₺', '₾', 'ℳ', '₥', '₦', '₧', '₱', '₰', '£', '៛', '₽', '₹', '₨', '₪', '৳', '₸',
        '₮', '₩', '¥', '§', '‖', '¦', '⟨', '⟩', '–', '—', '¯', '»', '«', '”', '÷', '×', '′',
        '″', '‴', '¡', '¿', '©', '℗', '®', '℠', '™', '|',
    ]
    .into_iter()
    .collect()
});

/// Character groups kept whole even though their members are symbols.
const GROUPS: [&str; 6] = ["<!--", "-->", "[[", "]]", "{{", "}}"];

/// Rule-based segmentation for wiki-style markup text.
///
/// Paragraphs break on blank lines, with table markup isolated onto its own
/// paragraphs. Sentences break after sentence punctuation, comments,
/// references, and URLs. Tokens are maximal runs of non-symbol characters,
/// with each symbol character emitted as its own token.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSegmenter;

impl Segmenter for DefaultSegmenter {
    fn paragraphs(&self, text: &str) -> Vec<String> {
        let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
        // html table syntax
        text = text.replace("<table>", "\n\n<table>").replace("</table>", "</table>\n\n");
        text = text.replace("<tr>", "\n\n<tr>").replace("</tr>", "</tr>\n\n");
        // wiki table syntax
        text = text.replace("{|", "\n\n{|").replace("|}", "|}\n\n");
        text = text.replace("|-\n", "\n\n|-\n");

        text.split("\n\n").map(str::to_string).collect()
    }

    fn sentences(&self, paragraph: &str) -> Vec<String> {
        let mut text = paragraph.replace('\n', &format!("\n{BREAK}"));
        text = DOT_BOUNDARY_RE.replace_all(&text, format!("${{1}}{BREAK}")).into_owned();
        for punct in ["; ", "? ", "! ", ": "] {
            text = text.replace(punct, &format!("{}{BREAK}", &punct[..1]));
        }
        text = text.replace('\t', &format!("\t{BREAK}"));
        // comments and references form their own sentences
        text = text.replace("<!--", &format!("{BREAK}<!--"));
        text = text.replace("-->", &format!("-->{BREAK}"));
        text = text.replace("<ref", &format!("{BREAK}<ref"));
        text = text.replace("/ref>", &format!("/ref>{BREAK}"));
        // urls form their own sentences
        text = URL_RE
            .replace_all(&text, format!("{BREAK}${{1}}{BREAK}"))
            .into_owned();

        let doubled = format!("{BREAK}{BREAK}");
        while text.contains(&doubled) {
            text = text.replace(&doubled, BREAK);
        }
        text.split(BREAK).map(str::to_string).collect()
    }

    fn tokens(&self, sentence: &str) -> Vec<String> {
        let chars: Vec<char> = sentence.chars().collect();
        let mut tokens = Vec::new();
        let mut run = String::new();
        let mut i = 0;

        'outer: while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                flush(&mut run, &mut tokens);
                i += 1;
                continue;
            }
            if SYMBOLS.contains(&c) {
                flush(&mut run, &mut tokens);
                for group in GROUPS {
                    if chars[i..].starts_with(&group.chars().collect::<Vec<_>>()[..]) {
                        tokens.push(group.to_string());
                        i += group.chars().count();
                        continue 'outer;
                    }
                }
                tokens.push(c.to_string());
                i += 1;
                continue;
            }
            run.push(c);
            i += 1;
        }
        flush(&mut run, &mut tokens);
        tokens
    }
}

fn flush(run: &mut String, tokens: &mut Vec<String>) {
    if !run.is_empty() {
        tokens.push(std::mem::take(run));
    }
}
