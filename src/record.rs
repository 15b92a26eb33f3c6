use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One article row of the dashboard table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub keyword: String,
    #[serde(default)]
    pub traffic: u64,
    #[serde(default)]
    pub words: u64,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub publish: String,
}

#[cfg(test)]
impl Record {
    pub fn new(id: u64, title: &str, keyword: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            keyword: keyword.to_string(),
            traffic: 0,
            words: 0,
            created_on: None,
            action: String::new(),
            publish: String::new(),
        }
    }
}
