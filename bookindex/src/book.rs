use lazy_static::lazy_static;
use regex::{Captures, Regex};
use search_core::{Indexable, SearchHit};
use serde::Deserialize;
use std::borrow::Cow;

lazy_static! {
    static ref EXTRA_SPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref SPECIAL_CHARS: Regex = Regex::new(r#"[.?!:;(){}"\[\]$-]+|,+"#).expect("valid regex");
}

pub const NO_RESULTS_MESSAGE: &str = "Sorry, no results.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
}

/// One `.jsonl` catalog line.
#[derive(Debug, Deserialize)]
pub struct InputBook {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
}

impl Book {
    pub fn new(id: &str, title: &str, author: &str) -> Self {
        Self { id: id.trim().to_string(), title: clean_field(title), author: clean_field(author) }
    }
}

impl From<InputBook> for Book {
    fn from(input: InputBook) -> Self {
        Book::new(&input.id, &input.title, &input.author)
    }
}

impl Indexable for Book {
    type Id = String;

    fn id(&self) -> &String { &self.id }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.title, self.author))
    }
}

/// Replace punctuation runs with a space, then collapse whitespace. Commas
/// between two digits ("1,000") are kept.
fn clean_field(field: &str) -> String {
    let replaced = SPECIAL_CHARS.replace_all(field, |caps: &Captures<'_>| {
        let Some(m) = caps.get(0) else { return String::new() };
        let digit_before = field[..m.start()].chars().next_back().is_some_and(|c| c.is_ascii_digit());
        let digit_after = field[m.end()..].chars().next().is_some_and(|c| c.is_ascii_digit());
        if m.as_str().starts_with(',') && digit_before && digit_after {
            m.as_str().to_string()
        } else {
            " ".to_string()
        }
    });
    EXTRA_SPACE.replace_all(replaced.trim(), " ").trim().to_string()
}

/// One line per hit, or the no-results message.
pub fn render_hits(hits: &[SearchHit<'_, Book>]) -> String {
    if hits.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }
    hits.iter()
        .map(|hit| format!("score: {:.6}, id: {}, title: {}, author: {}", hit.score, hit.id(), hit.document.title, hit.document.author))
        .collect::<Vec<_>>()
        .join("\n")
}
