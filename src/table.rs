//! Table search, sort and pagination over in-memory rows.

use std::cmp::Ordering;

/// Rows-per-page choices offered by the pager.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// A row the pipeline can search and sort.
pub trait TableRow {
    /// Text value of the field with the given key, `None` when null or absent.
    fn cell(&self, key: &str) -> Option<&str>;

    /// Every non-null field value, in a stable order. Searched by the filter.
    fn values(&self) -> Vec<&str>;
}

/// Column descriptor: display header and field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, key: &'static str) -> Self {
        Self { header, key }
    }
}

/// Columns of the employee table.
pub const EMPLOYEE_COLUMNS: [Column; 9] = [
    Column::new("First Name", "firstName"),
    Column::new("Last Name", "lastName"),
    Column::new("Email", "email"),
    Column::new("Phone Number", "phoneNumber"),
    Column::new("Employee ID", "employeeID"),
    Column::new("City", "city"),
    Column::new("Country", "country"),
    Column::new("Latitude", "latitude"),
    Column::new("Longitude", "longitude"),
];

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// Search, sort and paging state owned by the table view.
///
/// Changing the search term or the page size always returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewState {
    search_term: String,
    sort: Option<SortState>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self::new(PAGE_SIZE_OPTIONS[0])
    }
}

impl TableViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page_index = 0;
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page_index = 0;
    }

    /// Handle a click on a column's sort control.
    ///
    /// The active column flips direction; any other column starts ascending.
    pub fn request_sort(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortState {
                key: current.key,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Direction of `key` if it is the active sort column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.sort.as_ref().filter(|s| s.key == key).map(|s| s.direction)
    }

    /// Jump to a page, clamped to the pages available for `total` rows.
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page_index = page.min(page_count(total, self.page_size).saturating_sub(1));
    }

    pub fn next_page(&mut self, total: usize) {
        self.set_page(self.page_index + 1, total);
    }

    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Reset to the first page if the current one no longer exists.
    pub fn clamp_to(&mut self, total: usize) {
        if self.page_index * self.page_size >= total {
            self.page_index = 0;
        }
    }
}

/// Why a page has no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emptiness {
    /// There are rows to show.
    NotEmpty,
    /// The data set itself is empty.
    NoData,
    /// Rows exist but none match the search term.
    NoResults(String),
}

/// One rendered page of the table.
#[derive(Debug)]
pub struct TablePage<'a, R> {
    pub rows: Vec<&'a R>,
    /// Number of rows matching the search term.
    pub total: usize,
    /// Page actually shown after out-of-range pages fall back to 0.
    pub page_index: usize,
    pub page_count: usize,
    pub emptiness: Emptiness,
}

impl<R> TablePage<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.emptiness != Emptiness::NotEmpty
    }
}

fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Case-insensitive substring match against every non-null field.
pub fn matches_search<R: TableRow>(row: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    row.values().iter().any(|v| v.to_lowercase().contains(&needle))
}

/// Sort key of a cell. Absent values order first, then numbers, then text.
#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Absent,
    Number(f64),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(value: Option<&'a str>) -> Self {
        match value {
            None => SortKey::Absent,
            Some(text) => match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => SortKey::Number(n),
                _ => SortKey::Text(text),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Absent => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Total order over cell values: absent first, then numbers by value, then
/// text lexicographically.
pub fn compare_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    SortKey::of(a).total_cmp(&SortKey::of(b))
}

/// Stable sort by one column. Equal keys keep their input order in both directions.
pub fn sort_rows<'a, R: TableRow>(rows: &mut [&'a R], sort: &SortState) {
    let mut keyed: Vec<(SortKey<'a>, &'a R)> = rows
        .iter()
        .map(|&row| (SortKey::of(row.cell(&sort.key)), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.total_cmp(b);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }
}

/// Filter then sort, without paging. Used for the page view and for export.
pub fn filter_and_sort<'a, R: TableRow>(rows: &'a [R], state: &TableViewState) -> Vec<&'a R> {
    let mut visible: Vec<&R> = rows
        .iter()
        .filter(|row| matches_search(*row, &state.search_term))
        .collect();

    if let Some(sort) = &state.sort {
        sort_rows(&mut visible, sort);
    }
    visible
}

/// Produce the visible page for `state`.
pub fn compute_page<'a, R: TableRow>(rows: &'a [R], state: &TableViewState) -> TablePage<'a, R> {
    let visible = filter_and_sort(rows, state);
    let total = visible.len();
    let page_size = state.page_size.max(1);

    let page_index = if state.page_index * page_size >= total {
        0
    } else {
        state.page_index
    };

    let emptiness = if rows.is_empty() {
        Emptiness::NoData
    } else if total == 0 {
        Emptiness::NoResults(state.search_term.clone())
    } else {
        Emptiness::NotEmpty
    };

    let rows = visible.into_iter().skip(page_index * page_size).take(page_size).collect();

    TablePage {
        rows,
        total,
        page_index,
        page_count: page_count(total, page_size),
        emptiness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        age: Option<&'static str>,
        team: &'static str,
    }

    impl TableRow for Row {
        fn cell(&self, key: &str) -> Option<&str> {
            match key {
                "name" => Some(self.name),
                "age" => self.age,
                "team" => Some(self.team),
                _ => None,
            }
        }

        fn values(&self) -> Vec<&str> {
            [Some(self.name), self.age, Some(self.team)].into_iter().flatten().collect()
        }
    }

    fn row(name: &'static str, age: Option<&'static str>, team: &'static str) -> Row {
        Row { name, age, team }
    }

    fn names<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter().map(|r| r.name).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Carol", Some("9"), "blue"),
            row("alice", Some("10"), "red"),
            row("Bob", None, "blue"),
            row("dave", Some("10"), "green"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let rows = sample();
        let mut state = TableViewState::new(10);

        state.set_search("ALI");
        assert_eq!(names(&compute_page(&rows, &state).rows), vec!["alice"]);

        // Matches a field that is not the name
        state.set_search("Blue");
        assert_eq!(names(&compute_page(&rows, &state).rows), vec!["Carol", "Bob"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let rows = sample();
        let page = compute_page(&rows, &TableViewState::new(10));
        assert_eq!(page.total, 4);
        assert_eq!(page.emptiness, Emptiness::NotEmpty);
    }

    #[test]
    fn test_numeric_sort_when_both_numeric() {
        let rows = sample();
        let mut state = TableViewState::new(10);
        state.request_sort("age");

        // "9" < "10" numerically; absent first; equal ages keep input order
        assert_eq!(
            names(&compute_page(&rows, &state).rows),
            vec!["Bob", "Carol", "alice", "dave"]
        );
    }

    #[test]
    fn test_lexicographic_sort() {
        let rows = sample();
        let mut state = TableViewState::new(10);
        state.request_sort("name");

        assert_eq!(
            names(&compute_page(&rows, &state).rows),
            vec!["Bob", "Carol", "alice", "dave"]
        );
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let rows = vec![
            row("a", None, "x"),
            row("b", None, "y"),
            row("c", None, "x"),
            row("d", None, "y"),
        ];
        let mut state = TableViewState::new(10);

        state.request_sort("team");
        assert_eq!(names(&compute_page(&rows, &state).rows), vec!["a", "c", "b", "d"]);

        state.request_sort("team");
        assert_eq!(state.direction_for("team"), Some(SortDirection::Descending));
        assert_eq!(names(&compute_page(&rows, &state).rows), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_request_sort_transitions() {
        let mut state = TableViewState::new(10);

        state.request_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Ascending));

        state.request_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Descending));

        // A different column always starts ascending
        state.request_sort("age");
        assert_eq!(state.direction_for("age"), Some(SortDirection::Ascending));
        assert_eq!(state.direction_for("name"), None);

        state.request_sort("age");
        state.request_sort("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_pagination_slices() {
        let rows: Vec<Row> = ["a", "b", "c", "d", "e"].into_iter().map(|n| row(n, None, "t")).collect();
        let mut state = TableViewState::new(2);

        state.set_page(1, rows.len());
        let page = compute_page(&rows, &state);
        assert_eq!(names(&page.rows), vec!["c", "d"]);
        assert_eq!(page.page_count, 3);

        state.next_page(rows.len());
        assert_eq!(names(&compute_page(&rows, &state).rows), vec!["e"]);

        // Clamped at the last page
        state.next_page(rows.len());
        assert_eq!(state.page_index(), 2);

        state.prev_page();
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn test_search_and_page_size_reset_page() {
        let rows: Vec<Row> = (0..30).map(|_| row("x", None, "t")).collect();
        let mut state = TableViewState::new(10);

        state.set_page(2, rows.len());
        assert_eq!(state.page_index(), 2);
        state.set_search("x");
        assert_eq!(state.page_index(), 0);

        state.set_page(1, rows.len());
        state.set_page_size(25);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_out_of_range_page_falls_back_to_first() {
        let rows = sample();
        let mut state = TableViewState::new(2);
        state.set_page(1, rows.len());

        // Manually shrink the result set without going through set_search
        let shrunk = &rows[..1];
        let page = compute_page(shrunk, &state);
        assert_eq!(page.page_index, 0);
        assert_eq!(names(&page.rows), vec!["Carol"]);

        state.clamp_to(page.total);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_emptiness_distinguishes_no_data_from_no_results() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(compute_page(&empty, &TableViewState::new(10)).emptiness, Emptiness::NoData);

        let rows = sample();
        let mut state = TableViewState::new(10);
        state.set_search("zzz");
        let page = compute_page(&rows, &state);
        assert!(page.is_empty());
        assert_eq!(page.emptiness, Emptiness::NoResults("zzz".to_string()));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let rows = sample();
        let mut state = TableViewState::new(2);
        state.set_search("a");
        state.request_sort("age");
        state.request_sort("age");

        let first = names(&compute_page(&rows, &state).rows);
        let second = names(&compute_page(&rows, &state).rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(Some("2"), Some("10")), Ordering::Less);
        assert_eq!(compare_values(Some("b"), Some("10")), Ordering::Greater);
        assert_eq!(compare_values(None, Some("a")), Ordering::Less);
        assert_eq!(compare_values(Some("-1.5"), Some("-1.50")), Ordering::Equal);
        // Numbers order before all text, so mixed columns cannot form a cycle
        assert_eq!(compare_values(Some("10"), Some("1a")), Ordering::Less);
        assert_eq!(compare_values(Some("2"), Some("1a")), Ordering::Less);
        assert_eq!(compare_values(Some("NaN"), Some("1")), Ordering::Greater);
    }

    #[test]
    fn test_mixed_numeric_and_text_sort_both_directions() {
        let values = ["2", "10", "1a", "3", "20", "2b", "100", "1", "9z", "05"];
        // Enough rows to go past the small-slice sort path
        let rows: Vec<Row> = (0..600).map(|i| row(values[(i * 7 + i / 3) % values.len()], None, "t")).collect();
        let mut state = TableViewState::new(rows.len());

        state.request_sort("name");
        let ascending = names(&compute_page(&rows, &state).rows);
        assert_eq!(ascending.len(), rows.len());
        let first_text = ascending.iter().position(|n| n.parse::<f64>().is_err()).unwrap();
        assert!(ascending[..first_text].windows(2).all(|w| {
            w[0].parse::<f64>().unwrap() <= w[1].parse::<f64>().unwrap()
        }));
        assert!(ascending[first_text..].iter().all(|n| n.parse::<f64>().is_err()));
        assert!(ascending[first_text..].windows(2).all(|w| w[0] <= w[1]));

        state.request_sort("name");
        let descending = names(&compute_page(&rows, &state).rows);
        assert_eq!(descending.first(), Some(&"9z"));
        assert_eq!(descending.last(), Some(&"1"));
    }

    #[test]
    fn test_mixed_sort_keeps_input_order_for_equal_keys() {
        let rows = vec![
            row("1a", Some("first"), "t"),
            row("10", None, "t"),
            row("1a", Some("second"), "t"),
            row("2", None, "t"),
        ];
        let mut state = TableViewState::new(10);
        state.request_sort("name");
        let page = compute_page(&rows, &state);
        let ages: Vec<_> = page.rows.iter().map(|r| r.age).collect();
        assert_eq!(names(&page.rows), vec!["2", "10", "1a", "1a"]);
        assert_eq!(ages[2..], [Some("first"), Some("second")]);

        state.request_sort("name");
        let page = compute_page(&rows, &state);
        let ages: Vec<_> = page.rows.iter().map(|r| r.age).collect();
        assert_eq!(names(&page.rows), vec!["1a", "1a", "10", "2"]);
        assert_eq!(ages[..2], [Some("first"), Some("second")]);
    }
}
