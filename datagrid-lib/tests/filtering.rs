mod common;

use common::*;
use datagrid_lib::Mutation;
use datagrid_lib::Table;
use datagrid_lib::TableOptions;
use datagrid_lib::error::ComparatorError;
use datagrid_lib::filter::FilterRule;
use datagrid_lib::filter::FilterSet;
use datagrid_lib::filter::Logic;
use datagrid_lib::filter::Operator;
use datagrid_lib::model::Column;
use datagrid_lib::model::Row;
use datagrid_lib::pipeline::filter_indices;

fn wide() -> TableOptions {
    TableOptions::default().with_page_size(50)
}

fn filtered(filters: FilterSet) -> Vec<String> {
    let rows = cases();
    let table = Table::configure(&rows, columns(), wide().with_filters(filters));
    page_ids(&table.view(&table.initial_state()))
}

#[test]
fn test_empty_filter_set_matches_everything() {
    init_logger();
    assert_eq!(filtered(FilterSet::new()).len(), 12);
}

#[test]
fn test_and_requires_every_rule() {
    init_logger();
    let filters = FilterSet::all([FilterRule::eq("suite", "api"), FilterRule::eq("status", "1")]);
    assert_eq!(filtered(filters), strings(&["1", "3", "12"]));
}

#[test]
fn test_or_accepts_any_rule() {
    init_logger();
    let filters = FilterSet::any([FilterRule::eq("suite", "api"), FilterRule::eq("status", "1")]);
    assert_eq!(
        filtered(filters),
        strings(&["1", "3", "5", "6", "7", "8", "9", "10", "12"])
    );
}

#[test]
fn test_switching_logic_reevaluates() {
    init_logger();
    let rows = cases();
    let table = Table::configure(&rows, columns(), wide());
    let state = table.apply(
        &table.initial_state(),
        Mutation::AddRule(FilterRule::eq("suite", "db")),
    );
    let state = table.apply(&state, Mutation::AddRule(FilterRule::eq("status", "2")));
    assert_eq!(page_ids(&table.view(&state)), strings(&["4"]));

    let state = table.apply(&state, Mutation::SetLogic(Logic::Or));
    assert_eq!(
        page_ids(&table.view(&state)),
        strings(&["2", "4", "6", "7", "9", "10", "11"])
    );
}

#[test]
fn test_gte_treats_non_numeric_as_incomparable() {
    init_logger();
    let rows = vec![
        Row::new().set("id", "a").set("v", 5i64),
        Row::new().set("id", "b").set("v", 10i64),
        Row::new().set("id", "c").set("v", "abc"),
    ];
    let columns = vec![Column::new("v", "V").filterable()];
    let options = TableOptions::default()
        .with_filters(FilterSet::all([FilterRule::new("v", Operator::Gte, "10")]));
    let table = Table::configure(&rows, columns, options);
    assert_eq!(page_ids(&table.view(&table.initial_state())), strings(&["b"]));
}

#[test]
fn test_lt_and_lte_are_negations_of_greater() {
    init_logger();
    let rows = vec![
        Row::new().set("id", "a").set("v", 5i64),
        Row::new().set("id", "b").set("v", 10i64),
        Row::new().set("id", "c").set("v", "abc"),
    ];
    let columns = vec![Column::new("v", "V").filterable()];
    let run = |operator: Operator| {
        let options = TableOptions::default()
            .with_filters(FilterSet::all([FilterRule::new("v", operator, "10")]));
        let table = Table::configure(&rows, columns.clone(), options);
        page_ids(&table.view(&table.initial_state()))
    };
    // "abc" is neither greater than nor equal to 10.
    assert_eq!(run(Operator::Lt), strings(&["a", "c"]));
    assert_eq!(run(Operator::Lte), strings(&["a", "b", "c"]));
    assert_eq!(run(Operator::Gt), Vec::<String>::new());
}

#[test]
fn test_equality_is_loose() {
    init_logger();
    // status is stored as an integer, the operand is the string "2".
    assert_eq!(
        filtered(FilterSet::all([FilterRule::eq("status", "2")])),
        strings(&["2", "4", "6", "9", "11"])
    );
    assert_eq!(
        filtered(FilterSet::all([FilterRule::new("status", Operator::Neq, "2")])).len(),
        7
    );
}

#[test]
fn test_contains_is_case_sensitive() {
    init_logger();
    assert_eq!(
        filtered(FilterSet::all([FilterRule::contains("title", "o")])),
        strings(&["1", "2", "3", "5", "8", "9", "11"])
    );
    assert_eq!(
        filtered(FilterSet::all([FilterRule::contains("title", "L")])),
        strings(&["1"])
    );
    assert_eq!(
        filtered(FilterSet::all([FilterRule::new("title", Operator::NotContains, "o")])),
        strings(&["4", "6", "7", "10", "12"])
    );
}

#[test]
fn test_unknown_operator_never_excludes() {
    init_logger();
    let filters = FilterSet::all([
        FilterRule::new("suite", "regex", "^zzz$"),
        FilterRule::eq("suite", "ui"),
    ]);
    assert_eq!(filtered(filters), strings(&["2", "5", "8", "11"]));
}

#[test]
fn test_missing_field_reads_as_empty() {
    init_logger();
    assert_eq!(filtered(FilterSet::all([FilterRule::eq("owner", "")])).len(), 12);
    assert!(filtered(FilterSet::all([FilterRule::eq("owner", "alice")])).is_empty());
}

#[test]
fn test_filtering_is_idempotent() {
    init_logger();
    let rows = cases();
    let columns = columns();
    let filters = FilterSet::any([
        FilterRule::contains("title", "e"),
        FilterRule::eq("status", "2"),
    ]);
    let order: Vec<usize> = (0..rows.len()).collect();

    let once = filter_indices(&rows, &order, &filters, &columns);
    let twice = filter_indices(&rows, &once.indices, &filters, &columns);
    assert_eq!(once.indices, twice.indices);
    assert!(once.fault.is_none());
}

#[test]
fn test_column_override_replaces_default() {
    init_logger();
    let rows = cases();
    let mut columns = columns();
    columns[1] = Column::new("title", "Title").equal_with(|cell, operand| {
        Ok(cell.to_text().eq_ignore_ascii_case(&operand.to_text()))
    });
    let options = wide().with_filters(FilterSet::all([FilterRule::eq("title", "LOGOUT")]));
    let table = Table::configure(&rows, columns, options);
    assert_eq!(page_ids(&table.view(&table.initial_state())), strings(&["2"]));
}

fn fragile_columns() -> Vec<Column> {
    let mut columns = columns();
    columns[1] = Column::new("title", "Title").equal_with(|cell, operand| {
        let text = cell.to_text();
        if text.starts_with(|c: char| c.is_uppercase()) {
            return Err(ComparatorError::new("capitalized titles are not supported"));
        }
        Ok(text == operand.to_text())
    });
    columns
}

#[test]
fn test_comparator_fault_is_contained() {
    init_logger();
    let rows = cases();
    let options = wide().with_filters(FilterSet::all([FilterRule::eq("title", "cart")]));
    let table = Table::configure(&rows, fragile_columns(), options);
    let view = table.view(&table.initial_state());

    assert_eq!(page_ids(&view), strings(&["6"]));
    let fault = view.fault.expect("fault reported");
    assert_eq!(fault.column_name(), "Title");
    assert_eq!(fault.rows, 6);
    assert_eq!(
        fault.to_string(),
        "Filter on \"Title\" failed for 6 rows: capitalized titles are not supported"
    );
}

#[test]
fn test_failing_rule_only_excludes_itself() {
    init_logger();
    let rows = cases();
    let options = wide().with_filters(FilterSet::any([
        FilterRule::eq("title", "cart"),
        FilterRule::eq("suite", "db"),
    ]));
    let table = Table::configure(&rows, fragile_columns(), options);
    let view = table.view(&table.initial_state());
    // Row 7 ("Billing") fails the title rule but still matches on suite.
    assert_eq!(page_ids(&view), strings(&["4", "6", "7", "10"]));
    assert!(view.fault.is_some());
}

#[test]
fn test_rule_editing() {
    init_logger();
    let rows = cases();
    let table = Table::configure(&rows, columns(), wide());
    let state = table.apply(&table.initial_state(), Mutation::AddRuleFor("status".into()));
    assert_eq!(state.filters.rules, vec![FilterRule::eq("status", "1")]);
    assert_eq!(table.view(&state).stats.filtered, 7);

    let state = table.apply(
        &state,
        Mutation::UpdateRule {
            index: 0,
            rule: FilterRule::eq("status", "2"),
        },
    );
    assert_eq!(table.view(&state).stats.filtered, 5);

    let untouched = table.apply(&state, Mutation::RemoveRule(5));
    assert_eq!(untouched, state);

    let state = table.apply(&state, Mutation::RemoveRule(0));
    assert!(state.filters.is_empty());

    let state = table.apply(&state, Mutation::AddRuleFor("missing".into()));
    assert!(state.filters.is_empty());
}

#[test]
fn test_rule_for_free_text_column_starts_blank() {
    init_logger();
    let rows = cases();
    let table = Table::configure(&rows, columns(), wide());
    let state = table.apply(&table.initial_state(), Mutation::AddRuleFor("title".into()));
    assert_eq!(state.filters.rules[0], FilterRule::new("title", Operator::Eq, ""));
}

#[test]
fn test_clear_rules_keeps_logic() {
    init_logger();
    let rows = cases();
    let table = Table::configure(&rows, columns(), wide());
    let state = table.apply(
        &table.initial_state(),
        Mutation::ReplaceFilters(FilterSet::any([FilterRule::eq("suite", "ui")])),
    );
    let state = table.apply(&state, Mutation::ClearRules);
    assert!(state.filters.is_empty());
    assert_eq!(state.filters.logic, Logic::Or);
    assert_eq!(table.view(&state).stats.filtered, 12);
}
