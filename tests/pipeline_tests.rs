//! Integration tests for the data pipeline
//!
//! Whole filter -> sort -> paginate runs over dynamic JSON rows,
//! covering kind-gated filters, comparator fallbacks and the paging
//! modes together rather than stage by stage.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use dyntable::pipeline::{compute, PageRequest};
use dyntable::{ColumnDef, ColumnSet, FilterKind, FilterModel, SortDirection, SortState};
use serde_json::{json, Value};

fn columns() -> ColumnSet<Value> {
    ColumnSet::new(vec![
        ColumnDef::new("name", "Name").filter(FilterKind::Text),
        ColumnDef::new("dept", "Department").filter(FilterKind::Select),
        ColumnDef::new("salary", "Salary").filter(FilterKind::Number),
        ColumnDef::new("hired", "Hired").filter(FilterKind::Date),
    ])
    .unwrap()
}

fn staff() -> Vec<Value> {
    vec![
        json!({ "name": "Ada",   "dept": "eng",   "salary": 120, "hired": "2021-04-01" }),
        json!({ "name": "Grace", "dept": "eng",   "salary": 140, "hired": "2020-06-15" }),
        json!({ "name": "alan",  "dept": "ops",   "salary": 120, "hired": "2021-04-01" }),
        json!({ "name": "Edsger","dept": "ops",   "salary": 110, "hired": "2019-01-10" }),
        json!({ "name": "Barbara","dept": "eng",  "salary": 130, "hired": "2022-09-30" }),
    ]
}

fn unpaged() -> PageRequest {
    PageRequest {
        enabled: false,
        page: 1,
        page_size: 10,
        external_total: None,
        block_mode: false,
    }
}

#[test]
fn filter_then_sort_then_page() {
    let rows = staff();
    let mut model = FilterModel::new();
    model.set("dept", Some("eng".into()));
    let request = PageRequest {
        enabled: true,
        page: 1,
        page_size: 2,
        external_total: None,
        block_mode: false,
    };
    let out = compute(
        &rows,
        &columns(),
        &model,
        &SortState::new("salary", SortDirection::Desc),
        &request,
    );
    assert_eq!(out.filtered, vec![0, 1, 4]);
    assert_eq!(out.sorted, vec![1, 4, 0]);
    assert_eq!(out.displayed, vec![1, 4]);
    assert_eq!(out.page.total_count, 3);
    assert_eq!(out.page.total_pages, 2);
    assert_eq!((out.page.start_row, out.page.end_row), (1, 2));
}

#[test]
fn multiple_filters_intersect() {
    let rows = staff();
    let mut model = FilterModel::new();
    model.set("salary", Some(120.0.into()));
    model.set("hired", Some("2021-04-01".into()));
    let out = compute(&rows, &columns(), &model, &SortState::default(), &unpaged());
    assert_eq!(out.displayed, vec![0, 2]);

    model.set("dept", Some("ops".into()));
    let out = compute(&rows, &columns(), &model, &SortState::default(), &unpaged());
    assert_eq!(out.displayed, vec![2]);
}

#[test]
fn string_sort_is_case_insensitive_and_stable() {
    let rows = staff();
    let out = compute(
        &rows,
        &columns(),
        &FilterModel::new(),
        &SortState::new("name", SortDirection::Asc),
        &unpaged(),
    );
    // Ada, alan, Barbara, Edsger, Grace regardless of case.
    assert_eq!(out.displayed, vec![0, 2, 4, 3, 1]);
}

#[test]
fn numeric_ties_keep_input_order() {
    let rows = staff();
    let out = compute(
        &rows,
        &columns(),
        &FilterModel::new(),
        &SortState::new("salary", SortDirection::Asc),
        &unpaged(),
    );
    // 110, then the two 120s in input order, 130, 140.
    assert_eq!(out.displayed, vec![3, 0, 2, 4, 1]);
}

#[test]
fn unknown_sort_and_filter_ids_are_inert() {
    let rows = staff();
    let mut model = FilterModel::new();
    model.set("ghost", Some("x".into()));
    let out = compute(
        &rows,
        &columns(),
        &model,
        &SortState::new("ghost", SortDirection::Asc),
        &unpaged(),
    );
    assert_eq!(out.displayed, vec![0, 1, 2, 3, 4]);
}

#[test]
fn server_mode_trusts_the_external_total() {
    let rows = staff();
    let request = PageRequest {
        enabled: true,
        page: 4,
        page_size: 5,
        external_total: Some(42),
        block_mode: false,
    };
    let out = compute(&rows, &columns(), &FilterModel::new(), &SortState::default(), &request);
    // The host delivered one page; it is displayed as-is.
    assert_eq!(out.displayed.len(), 5);
    assert_eq!(out.page.total_count, 42);
    assert_eq!(out.page.total_pages, 9);
    assert_eq!((out.page.start_row, out.page.end_row), (16, 20));
    assert!(!out.deficient);
}

#[test]
fn block_mode_slices_and_reports_deficiency() {
    let rows = staff();
    let request = PageRequest {
        enabled: true,
        page: 2,
        page_size: 3,
        external_total: Some(12),
        block_mode: true,
    };
    let out = compute(&rows, &columns(), &FilterModel::new(), &SortState::default(), &request);
    // 5 rows delivered, page 2 needs 6.
    assert!(out.deficient);
    assert_eq!(out.displayed, vec![3, 4]);
    assert_eq!(out.page.total_pages, 4);
}

#[test]
fn filtering_shrinks_pages_but_not_block_accounting() {
    let rows = staff();
    let mut model = FilterModel::new();
    model.set("dept", Some("eng".into()));
    let request = PageRequest {
        enabled: true,
        page: 1,
        page_size: 5,
        external_total: Some(12),
        block_mode: true,
    };
    let out = compute(&rows, &columns(), &model, &SortState::default(), &request);
    // Deficiency compares delivered rows (5) against the page (5), not
    // the filtered remainder (3).
    assert!(!out.deficient);
    assert_eq!(out.displayed, vec![0, 1, 4]);
}
