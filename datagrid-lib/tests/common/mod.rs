#![allow(dead_code)]

use std::sync::Once;

use datagrid_lib::TableView;
use datagrid_lib::filter::Operator;
use datagrid_lib::model::Column;
use datagrid_lib::model::Row;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TestLogger;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

/// Twelve test cases: `(id, title, suite, status, priority)`.
///
/// Suites: api = 1,3,6,9,12; ui = 2,5,8,11; db = 4,7,10.
/// Status 1 (open) = 1,3,5,7,8,10,12; status 2 (closed) = 2,4,6,9,11.
pub fn cases() -> Vec<Row> {
    [
        (1, "Login works", "api", 1, 3),
        (2, "logout", "ui", 2, 1),
        (3, "Checkout", "api", 1, 2),
        (4, "search", "db", 2, 3),
        (5, "Profile", "ui", 1, 1),
        (6, "cart", "api", 2, 2),
        (7, "Billing", "db", 1, 3),
        (8, "export", "ui", 1, 2),
        (9, "Import", "api", 2, 1),
        (10, "settings", "db", 1, 2),
        (11, "Reports", "ui", 2, 3),
        (12, "admin", "api", 1, 1),
    ]
    .into_iter()
    .map(|(id, title, suite, status, priority)| {
        Row::new()
            .set("id", id as i64)
            .set("title", title)
            .set("suite", suite)
            .set("status", status as i32)
            .set("priority", priority as i64)
    })
    .collect()
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID").sortable(),
        Column::new("title", "Title").sortable().filterable(),
        Column::new("suite", "Suite")
            .filterable()
            .select_from(["api", "ui", "db"]),
        Column::new("status", "Status")
            .sortable()
            .filterable()
            .operators([Operator::Eq, Operator::Neq])
            .select_from([("1", "Open"), ("2", "Closed")]),
        Column::new("priority", "Priority").sortable().filterable(),
    ]
}

/// Ids of the rendered page, in display order.
pub fn page_ids<R>(view: &TableView<'_, R>) -> Vec<String> {
    view.rows.iter().map(|r| r.id.to_string()).collect()
}

pub fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
