use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::columns::{Check, ColumnId, SortKey};
use crate::filter::filter_records;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSpec {
    pub column: ColumnId,
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub column: ColumnId,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

/// Client side state of the articles grid.
///
/// `source` is never reordered. The free text query selects `filtered`
/// (indices into `source`), column filters and sorting turn that into `rows`,
/// pagination slices `rows` into the visible page.
pub struct DataTable {
    source: Arc<Vec<Record>>,
    query: String,
    filtered: Vec<usize>,
    sorting: Vec<SortSpec>,
    visibility: BTreeMap<ColumnId, bool>,
    selection: BTreeSet<u64>,
    column_filters: Vec<ColumnFilter>,
    pagination: Pagination,
    rows: Vec<usize>,
}

impl DataTable {
    pub fn new(source: Arc<Vec<Record>>, page_size: usize) -> Self {
        let mut table = DataTable {
            filtered: filter_records(&source, ""),
            source,
            query: String::new(),
            sorting: Vec::new(),
            visibility: BTreeMap::new(),
            selection: BTreeSet::new(),
            column_filters: Vec::new(),
            pagination: Pagination {
                page_index: 0,
                page_size: page_size.max(1),
            },
            rows: Vec::new(),
        };
        table.rebuild_rows();
        table
    }

    // ------------------------------ Query -------------------------------- //

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.filtered = filter_records(&self.source, &self.query);
        trace!(
            "Query \"{}\" matches {} of {} articles",
            self.query,
            self.filtered.len(),
            self.source.len()
        );
        self.rebuild_rows();
    }

    // ------------------------------ Rows --------------------------------- //

    fn rebuild_rows(&mut self) {
        let source = &self.source;
        let filters: Vec<(ColumnId, String)> = self
            .column_filters
            .iter()
            .map(|f| (f.column, f.value.to_lowercase()))
            .collect();

        let mut rows: Vec<usize> = self
            .filtered
            .iter()
            .copied()
            .filter(|&idx| {
                filters.iter().all(|(column, value)| {
                    column
                        .filter_text(&source[idx])
                        .to_lowercase()
                        .contains(value.as_str())
                })
            })
            .collect();

        if !self.sorting.is_empty() {
            let sorting = &self.sorting;
            // sort_by is stable, equal keys keep their source order
            rows.sort_by(|&a, &b| compare_records(&source[a], &source[b], sorting));
        }
        self.rows = rows;
        self.clamp_page_index();
    }

    pub fn total_row_count(&self) -> usize {
        self.source.len()
    }

    pub fn filtered_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filtered_selected_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|&&idx| self.selection.contains(&self.source[idx].id))
            .count()
    }

    /// Records in their filtered and sorted order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|&idx| &self.source[idx])
    }

    pub fn page_rows(&self) -> Vec<&Record> {
        let begin = self.pagination.page_index * self.pagination.page_size;
        let end = std::cmp::min(begin + self.pagination.page_size, self.rows.len());
        if begin >= end {
            return Vec::new();
        }
        self.rows[begin..end]
            .iter()
            .map(|&idx| &self.source[idx])
            .collect()
    }

    // ---------------------------- Sorting -------------------------------- //

    pub fn sorting(&self) -> &[SortSpec] {
        &self.sorting
    }

    /// Direction a column is sorted in, `Some(true)` for descending.
    pub fn sort_direction(&self, column: ColumnId) -> Option<bool> {
        self.sorting
            .iter()
            .find(|s| s.column == column)
            .map(|s| s.desc)
    }

    /// Cycles a column through first direction, reversed, unsorted.
    /// With `multi` the column is added to the existing sort instead of
    /// replacing it.
    pub fn toggle_sorting(&mut self, column: ColumnId, multi: bool) {
        if !column.can_sort() {
            return;
        }
        let first_desc = column.sort_desc_first();
        let next = match self.sort_direction(column) {
            None => Some(first_desc),
            Some(desc) if desc == first_desc => Some(!first_desc),
            Some(_) => None,
        };

        if multi {
            match (self.sorting.iter().position(|s| s.column == column), next) {
                (Some(pos), Some(desc)) => self.sorting[pos].desc = desc,
                (Some(pos), None) => {
                    self.sorting.remove(pos);
                }
                (None, Some(desc)) => self.sorting.push(SortSpec { column, desc }),
                (None, None) => {}
            }
        } else {
            self.sorting = next
                .map(|desc| vec![SortSpec { column, desc }])
                .unwrap_or_default();
        }
        debug!("Sorting is now {:?}", self.sorting);
        self.rebuild_rows();
    }

    pub fn clear_sorting(&mut self) {
        self.sorting.clear();
        self.rebuild_rows();
    }

    // --------------------------- Visibility ------------------------------ //

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.visibility.get(&column).copied().unwrap_or(true)
    }

    pub fn visible_columns(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .filter(|&c| self.is_visible(c))
            .collect()
    }

    pub fn toggle_column_visibility(&mut self, column: ColumnId) {
        if !column.can_hide() {
            return;
        }
        let visible = self.is_visible(column);
        self.visibility.insert(column, !visible);
    }

    pub fn reset_column_visibility(&mut self) {
        self.visibility.clear();
    }

    // --------------------------- Selection ------------------------------- //

    pub fn is_selected(&self, id: u64) -> bool {
        self.selection.contains(&id)
    }

    pub fn toggle_row_selected(&mut self, id: u64) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Selects every row on the current page, or clears them when all of
    /// them already are selected.
    pub fn toggle_all_page_rows_selected(&mut self) {
        let ids: Vec<u64> = self.page_rows().iter().map(|r| r.id).collect();
        let select = self.page_selection() != Check::All;
        for id in ids {
            if select {
                self.selection.insert(id);
            } else {
                self.selection.remove(&id);
            }
        }
    }

    pub fn page_selection(&self) -> Check {
        let page = self.page_rows();
        let selected = page.iter().filter(|r| self.is_selected(r.id)).count();
        if page.is_empty() || selected == 0 {
            Check::None
        } else if selected == page.len() {
            Check::All
        } else {
            Check::Some
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> &BTreeSet<u64> {
        &self.selection
    }

    pub fn filtered_selected_rows(&self) -> Vec<&Record> {
        self.filtered_rows()
            .filter(|r| self.is_selected(r.id))
            .collect()
    }

    // ------------------------- Column filters ---------------------------- //

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    /// Sets the filter of a column, an empty value removes it.
    pub fn set_column_filter(&mut self, column: ColumnId, value: &str) {
        if !column.has_accessor() {
            return;
        }
        self.column_filters.retain(|f| f.column != column);
        if !value.is_empty() {
            self.column_filters.push(ColumnFilter {
                column,
                value: value.to_string(),
            });
        }
        self.rebuild_rows();
    }

    pub fn clear_column_filters(&mut self) {
        self.column_filters.clear();
        self.rebuild_rows();
    }

    // --------------------------- Pagination ------------------------------ //

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_count(&self) -> usize {
        std::cmp::max(1, self.rows.len().div_ceil(self.pagination.page_size))
    }

    fn clamp_page_index(&mut self) {
        let last = self.page_count() - 1;
        if self.pagination.page_index > last {
            trace!(
                "Page index {} out of range, snapping to {}",
                self.pagination.page_index, last
            );
            self.pagination.page_index = last;
        }
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.page_index = index;
        self.clamp_page_index();
    }

    /// Changes the page size keeping the first row of the current page visible.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        let top_row = self.pagination.page_index * self.pagination.page_size;
        self.pagination.page_size = size;
        self.pagination.page_index = top_row / size;
        self.clamp_page_index();
    }

    /// Moves to the next (or previous) entry of `options`, staying at the ends.
    pub fn cycle_page_size(&mut self, options: &[usize], forward: bool) {
        let current = self.pagination.page_size;
        let next = if forward {
            options.iter().copied().find(|&o| o > current)
        } else {
            options.iter().rev().copied().find(|&o| o < current)
        };
        if let Some(size) = next {
            self.set_page_size(size);
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count()
    }

    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn previous_page(&mut self) {
        self.set_page_index(self.pagination.page_index.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.set_page_index(self.pagination.page_index + 1);
        }
    }

    pub fn last_page(&mut self) {
        self.set_page_index(self.page_count() - 1);
    }
}

fn compare_records(a: &Record, b: &Record, sorting: &[SortSpec]) -> Ordering {
    for spec in sorting {
        let (Some(ka), Some(kb)) = (spec.column.sort_key(a), spec.column.sort_key(b)) else {
            continue;
        };
        // Missing timestamps go last in either direction
        let ord = match (ka == SortKey::Time(None), kb == SortKey::Time(None)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = ka.compare(&kb);
                if spec.desc { ord.reverse() } else { ord }
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn article(id: u64, title: &str, keyword: &str, words: u64) -> Record {
        let mut r = Record::new(id, title, keyword);
        r.words = words;
        r
    }

    fn numbered(n: u64) -> Arc<Vec<Record>> {
        Arc::new(
            (1..=n)
                .map(|i| article(i, &format!("Article {i}"), "kw", i * 100))
                .collect(),
        )
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    fn all_ids(table: &DataTable) -> Vec<u64> {
        table.filtered_rows().map(|r| r.id).collect()
    }

    #[test]
    fn defaults_on_mount() {
        let table = DataTable::new(numbered(3), 10);
        assert_eq!(table.query(), "");
        assert!(table.sorting().is_empty());
        assert_eq!(table.visible_columns(), ColumnId::ALL.to_vec());
        assert!(table.selected_ids().is_empty());
        assert!(table.column_filters().is_empty());
        assert_eq!(
            table.pagination(),
            Pagination {
                page_index: 0,
                page_size: 10
            }
        );
    }

    #[test]
    fn page_count_is_ceil_with_minimum_one() {
        for (n, size, expected) in [(0, 10, 1), (1, 10, 1), (10, 10, 1), (11, 10, 2), (25, 10, 3)] {
            let table = DataTable::new(numbered(n), size);
            assert_eq!(table.page_count(), expected, "n={n} size={size}");
        }
    }

    #[test]
    fn last_page_holds_remaining_rows() {
        let mut table = DataTable::new(numbered(25), 10);
        table.last_page();
        assert_eq!(table.pagination().page_index, 2);
        assert_eq!(ids(&table.page_rows()), vec![21, 22, 23, 24, 25]);
        assert!(!table.can_next_page());
        assert!(table.can_previous_page());
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let table = DataTable::new(numbered(0), 10);
        assert_eq!(table.page_count(), 1);
        assert!(table.page_rows().is_empty());
        assert!(!table.can_next_page());
        assert!(!table.can_previous_page());
    }

    #[test]
    fn narrowing_filter_snaps_page_index() {
        let mut records: Vec<Record> = (1..=25)
            .map(|i| article(i, &format!("Article {i}"), "kw", 0))
            .collect();
        for r in records.iter_mut().take(5) {
            r.keyword = "seo".into();
        }
        let mut table = DataTable::new(Arc::new(records), 10);
        assert_eq!(table.page_count(), 3);
        table.set_page_index(2);
        assert_eq!(table.pagination().page_index, 2);

        table.set_query("seo");
        assert_eq!(table.filtered_row_count(), 5);
        assert_eq!(table.pagination().page_index, 0);
        assert_eq!(table.page_rows().len(), 5);
    }

    #[test]
    fn page_index_is_clamped() {
        let mut table = DataTable::new(numbered(25), 10);
        table.set_page_index(99);
        assert_eq!(table.pagination().page_index, 2);
        table.next_page();
        assert_eq!(table.pagination().page_index, 2);
        table.first_page();
        table.previous_page();
        assert_eq!(table.pagination().page_index, 0);
    }

    #[test]
    fn page_size_change_keeps_top_row() {
        let mut table = DataTable::new(numbered(50), 10);
        table.set_page_index(3);
        table.set_page_size(20);
        assert_eq!(table.pagination().page_index, 1);
        assert_eq!(table.page_rows()[0].id, 21);

        table.set_page_size(50);
        assert_eq!(table.pagination().page_index, 0);
    }

    #[test]
    fn cycling_page_size_stops_at_the_ends() {
        let options = [10, 20, 30, 40, 50];
        let mut table = DataTable::new(numbered(5), 10);
        table.cycle_page_size(&options, false);
        assert_eq!(table.pagination().page_size, 10);
        table.cycle_page_size(&options, true);
        assert_eq!(table.pagination().page_size, 20);
        for _ in 0..10 {
            table.cycle_page_size(&options, true);
        }
        assert_eq!(table.pagination().page_size, 50);
    }

    #[test]
    fn sort_toggle_cycles_directions() {
        let mut table = DataTable::new(numbered(3), 10);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(table.sort_direction(ColumnId::Words), Some(true));
        assert_eq!(all_ids(&table), vec![3, 2, 1]);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(table.sort_direction(ColumnId::Words), Some(false));
        assert_eq!(all_ids(&table), vec![1, 2, 3]);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(table.sort_direction(ColumnId::Words), None);

        table.toggle_sorting(ColumnId::Title, false);
        assert_eq!(table.sort_direction(ColumnId::Title), Some(false));
    }

    #[test]
    fn unsortable_columns_are_ignored() {
        let mut table = DataTable::new(numbered(3), 10);
        table.toggle_sorting(ColumnId::Action, false);
        table.toggle_sorting(ColumnId::Select, true);
        assert!(table.sorting().is_empty());
    }

    #[test]
    fn single_sort_replaces_multi_sort_appends() {
        let mut table = DataTable::new(numbered(3), 10);
        table.toggle_sorting(ColumnId::Keyword, false);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(table.sorting().len(), 1);
        table.toggle_sorting(ColumnId::Keyword, true);
        assert_eq!(
            table.sorting(),
            &[
                SortSpec {
                    column: ColumnId::Words,
                    desc: true
                },
                SortSpec {
                    column: ColumnId::Keyword,
                    desc: false
                },
            ]
        );
        table.toggle_sorting(ColumnId::Words, true);
        table.toggle_sorting(ColumnId::Words, true);
        assert_eq!(table.sorting().len(), 1);
    }

    #[test]
    fn sorting_is_stable_for_equal_keys() {
        let records = vec![
            article(1, "b", "same", 5),
            article(2, "a", "same", 5),
            article(3, "c", "other", 1),
            article(4, "d", "same", 5),
        ];
        let mut table = DataTable::new(Arc::new(records), 10);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(all_ids(&table), vec![1, 2, 4, 3]);
        table.toggle_sorting(ColumnId::Words, false);
        assert_eq!(all_ids(&table), vec![3, 1, 2, 4]);
    }

    #[test]
    fn multi_sort_breaks_ties_with_second_key() {
        let records = vec![
            article(1, "b", "x", 5),
            article(2, "a", "x", 5),
            article(3, "c", "x", 9),
        ];
        let mut table = DataTable::new(Arc::new(records), 10);
        table.toggle_sorting(ColumnId::Words, false);
        table.toggle_sorting(ColumnId::Title, true);
        assert_eq!(all_ids(&table), vec![3, 2, 1]);
    }

    #[test]
    fn missing_timestamps_sort_last() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut records = vec![
            article(1, "a", "", 0),
            article(2, "b", "", 0),
            article(3, "c", "", 0),
        ];
        records[1].created_on = Some(base);
        records[2].created_on = Some(base + Duration::days(1));
        let mut table = DataTable::new(Arc::new(records), 10);
        table.toggle_sorting(ColumnId::CreatedOn, false);
        assert_eq!(table.sort_direction(ColumnId::CreatedOn), Some(false));
        assert_eq!(all_ids(&table), vec![2, 3, 1]);
        table.toggle_sorting(ColumnId::CreatedOn, false);
        assert_eq!(all_ids(&table), vec![3, 2, 1]);
    }

    #[test]
    fn titles_sort_in_natural_order() {
        let mut table = DataTable::new(numbered(12), 20);
        table.toggle_sorting(ColumnId::Title, false);
        assert_eq!(all_ids(&table), (1..=12).collect::<Vec<u64>>());
        table.toggle_sorting(ColumnId::Title, false);
        assert_eq!(all_ids(&table), (1..=12).rev().collect::<Vec<u64>>());
    }

    #[test]
    fn created_on_filter_matches_long_date() {
        let mut records = vec![article(1, "a", "", 0), article(2, "b", "", 0)];
        records[0].created_on = Some(Utc::now());
        let mut table = DataTable::new(Arc::new(records), 10);
        table.set_column_filter(ColumnId::CreatedOn, "ago");
        assert_eq!(table.filtered_row_count(), 0);
        table.set_column_filter(ColumnId::CreatedOn, "--");
        assert_eq!(all_ids(&table), vec![2]);
    }

    #[test]
    fn selection_survives_sort_and_filter() {
        let mut table = DataTable::new(numbered(12), 10);
        table.toggle_row_selected(2);
        table.toggle_sorting(ColumnId::Words, false);
        assert!(table.is_selected(2));
        assert_eq!(table.filtered_selected_row_count(), 1);

        table.set_query("Article 1");
        assert!(table.is_selected(2));
        assert_eq!(table.filtered_selected_row_count(), 0);

        table.set_query("");
        assert_eq!(table.filtered_selected_row_count(), 1);
        assert_eq!(table.sort_direction(ColumnId::Words), Some(true));
    }

    #[test]
    fn query_keeps_sort_visibility_and_selection() {
        let mut table = DataTable::new(numbered(5), 10);
        table.toggle_sorting(ColumnId::Title, false);
        table.toggle_column_visibility(ColumnId::Publish);
        table.toggle_row_selected(4);
        table.set_query("3");
        assert_eq!(table.sorting().len(), 1);
        assert!(!table.is_visible(ColumnId::Publish));
        assert!(table.is_selected(4));
        assert_eq!(all_ids(&table), vec![3]);
    }

    #[test]
    fn toggle_all_page_rows() {
        let mut table = DataTable::new(numbered(15), 10);
        assert_eq!(table.page_selection(), Check::None);
        table.toggle_row_selected(1);
        assert_eq!(table.page_selection(), Check::Some);
        table.toggle_all_page_rows_selected();
        assert_eq!(table.page_selection(), Check::All);
        assert_eq!(table.selected_ids().len(), 10);
        assert!(!table.is_selected(11));

        table.toggle_all_page_rows_selected();
        assert_eq!(table.page_selection(), Check::None);
        assert!(table.selected_ids().is_empty());
    }

    #[test]
    fn select_column_cannot_be_hidden() {
        let mut table = DataTable::new(numbered(1), 10);
        table.toggle_column_visibility(ColumnId::Select);
        table.toggle_column_visibility(ColumnId::Words);
        assert!(table.is_visible(ColumnId::Select));
        assert!(!table.visible_columns().contains(&ColumnId::Words));
        table.reset_column_visibility();
        assert!(table.is_visible(ColumnId::Words));
    }

    #[test]
    fn column_filters_narrow_rows() {
        let records = vec![
            article(1, "SEO Guide", "seo", 100),
            article(2, "Cooking Tips", "recipes", 200),
            article(3, "SEO Audit", "audit", 300),
        ];
        let mut table = DataTable::new(Arc::new(records), 10);
        table.set_column_filter(ColumnId::Title, "seo");
        assert_eq!(all_ids(&table), vec![1, 3]);
        table.set_column_filter(ColumnId::Words, "300");
        assert_eq!(all_ids(&table), vec![3]);
        table.set_column_filter(ColumnId::Words, "");
        assert_eq!(table.column_filters().len(), 1);
        table.set_column_filter(ColumnId::Action, "view");
        assert_eq!(table.column_filters().len(), 1);
        table.clear_column_filters();
        assert_eq!(table.filtered_row_count(), 3);
    }

    #[test]
    fn source_order_is_never_changed() {
        let source = numbered(4);
        let mut table = DataTable::new(Arc::clone(&source), 10);
        table.toggle_sorting(ColumnId::Words, false);
        table.set_query("Article");
        let source_ids: Vec<u64> = source.iter().map(|r| r.id).collect();
        assert_eq!(source_ids, vec![1, 2, 3, 4]);
        assert_eq!(table.total_row_count(), 4);
    }
}
