// Line-oriented extraction of offers from free-form model output
use crate::analyzer::rank_offers;
use crate::model::OfferRecord;
use regex::Regex;
use std::sync::LazyLock;

/// One offer per line:
///
/// ```text
/// STORE: <name> | PRICE: <value> | CURRENCY: <code> | LINK: <url> | NOTES: <text>
/// ```
///
/// Labels are case-insensitive and anything before `STORE:` is ignored. A value
/// ends only where the next `| LABEL:` starts, so bare pipes inside a value are
/// kept. `\|` and `\\` are decoded to a pipe and a backslash; an escaped pipe
/// never ends a value. NOTES runs to the end of the line.
static OFFER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let field = r"((?:\\.|[^\\])*?)";
    let pattern = format!(
        r"(?i)STORE:\s*{field}\s*\|\s*PRICE:\s*{field}\s*\|\s*CURRENCY:\s*{field}\s*\|\s*LINK:\s*{field}\s*\|\s*NOTES:\s*(.*)"
    );
    Regex::new(&pattern).expect("valid regex")
});

pub trait ResponseParser {
    fn parse(&self, text: &str) -> Vec<OfferRecord>;
}

pub struct OfferLineParser;

impl OfferLineParser {
    pub fn new() -> Self {
        Self
    }

    /// Matches a single line. Returns `None` for anything not in the offer format.
    pub fn parse_line(&self, line: &str) -> Option<OfferRecord> {
        let caps = OFFER_LINE_RE.captures(line)?;
        let field = |i: usize| {
            caps.get(i)
                .map(|m| unescape_field(m.as_str().trim()))
                .unwrap_or_default()
        };

        Some(OfferRecord {
            store_name: field(1),
            price: field(2),
            currency: field(3),
            url: field(4),
            notes: field(5),
            is_cheapest: false,
        })
    }
}

impl Default for OfferLineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser for OfferLineParser {
    /// Extracts every well-formed line and ranks the result. Lines that do not
    /// match are skipped; an empty result means "show the raw text instead".
    fn parse(&self, text: &str) -> Vec<OfferRecord> {
        let mut offers: Vec<OfferRecord> = text
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect();

        rank_offers(&mut offers);
        offers
    }
}

/// Decodes `\|` and `\\`. Other backslash sequences stay as written.
fn unescape_field(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&(next @ ('|' | '\\'))) = chars.peek()
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// Escapes a value so it survives a round trip through the offer line format.
pub fn escape_field(value: &str) -> String {
    value.replace('\\', r"\\").replace('|', r"\|")
}
