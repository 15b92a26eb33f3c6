use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::record::Record;
use crate::relative_time::{MISSING_TIMESTAMP, long_date, relative_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Select,
    Title,
    Keyword,
    Words,
    CreatedOn,
    Action,
    Publish,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(u64),
    Time(Option<i64>),
}

impl SortKey {
    /// Text keys compare in natural order, "article 2" before "article 10".
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => natural_cmp(a, b),
            (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

// Splits into runs of digits and non digits.
fn chunks(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut last_digit = None;
    for (idx, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if last_digit.is_some_and(|d| d != digit) {
            out.push(&s[start..idx]);
            start = idx;
        }
        last_digit = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    for (x, y) in ca.iter().zip(cb.iter()) {
        let numeric = x.starts_with(|c: char| c.is_ascii_digit())
            && y.starts_with(|c: char| c.is_ascii_digit());
        let ord = if numeric {
            // compare digit runs by value without overflowing
            let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        } else {
            x.cmp(y)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len())
}

impl ColumnId {
    pub const ALL: [ColumnId; 7] = [
        ColumnId::Select,
        ColumnId::Title,
        ColumnId::Keyword,
        ColumnId::Words,
        ColumnId::CreatedOn,
        ColumnId::Action,
        ColumnId::Publish,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ColumnId::Select => "",
            ColumnId::Title => "Article Title",
            ColumnId::Keyword => "Keyword[traffic]",
            ColumnId::Words => "Words",
            ColumnId::CreatedOn => "Created On",
            ColumnId::Action => "Action",
            ColumnId::Publish => "Publish",
        }
    }

    /// Only columns backed by a record field can be sorted or filtered.
    pub fn has_accessor(self) -> bool {
        matches!(
            self,
            ColumnId::Title | ColumnId::Keyword | ColumnId::Words | ColumnId::CreatedOn
        )
    }

    pub fn can_sort(self) -> bool {
        self.has_accessor()
    }

    pub fn can_hide(self) -> bool {
        self != ColumnId::Select
    }

    // Text and date columns start ascending, numbers descending.
    pub fn sort_desc_first(self) -> bool {
        self == ColumnId::Words
    }

    pub fn sort_key(self, record: &Record) -> Option<SortKey> {
        match self {
            ColumnId::Title => Some(SortKey::Text(record.title.to_lowercase())),
            ColumnId::Keyword => Some(SortKey::Text(record.keyword.to_lowercase())),
            ColumnId::Words => Some(SortKey::Number(record.words)),
            ColumnId::CreatedOn => Some(SortKey::Time(
                record.created_on.map(|c| c.timestamp_millis()),
            )),
            ColumnId::Select | ColumnId::Action | ColumnId::Publish => None,
        }
    }

    pub fn cell(self, record: &Record, selected: bool, now: DateTime<Utc>) -> String {
        match self {
            ColumnId::Select => checkbox(if selected { Check::All } else { Check::None }).into(),
            ColumnId::Title => record.title.clone(),
            ColumnId::Keyword => format!("{}[{}]", record.keyword, record.traffic),
            ColumnId::Words => record.words.to_string(),
            ColumnId::CreatedOn => relative_label(record.created_on, now),
            ColumnId::Action => "[ View ]".into(),
            ColumnId::Publish => "WordPress ▾".into(),
        }
    }

    /// Text a column filter matches against. Dates use the long form so a
    /// filter keeps matching the same rows as time passes.
    pub fn filter_text(self, record: &Record) -> String {
        match self {
            ColumnId::Title => record.title.clone(),
            ColumnId::Keyword => format!("{}[{}]", record.keyword, record.traffic),
            ColumnId::Words => record.words.to_string(),
            ColumnId::CreatedOn => record
                .created_on
                .map(long_date)
                .unwrap_or_else(|| MISSING_TIMESTAMP.to_string()),
            ColumnId::Select | ColumnId::Action | ColumnId::Publish => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    None,
    Some,
    All,
}

pub fn checkbox(check: Check) -> &'static str {
    match check {
        Check::None => "[ ]",
        Check::Some => "[-]",
        Check::All => "[x]",
    }
}
