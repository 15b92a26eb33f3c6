use crate::record::Record;

/// Indices of the records whose title or keyword contains `query`,
/// ignoring case. A blank query keeps every record.
pub fn filter_records(records: &[Record], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..records.len()).collect();
    }
    let lower = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_query(r, &lower))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_query(record: &Record, lower: &str) -> bool {
    record.title.to_lowercase().contains(lower) || record.keyword.to_lowercase().contains(lower)
}
