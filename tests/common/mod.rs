#![allow(dead_code)]

use openings::{
    CatalogError, Executor, QueryResult, Result, RowLabeled, Statement, Value, stream,
};
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Scripted stand-in for a storage backend: records every statement it is
/// given and plays back one canned result batch per call, in order.
pub struct MockExecutor {
    pub statements: Vec<Statement>,
    scripts: VecDeque<Vec<QueryResult>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            scripts: VecDeque::new(),
        }
    }

    pub fn expect(mut self, results: Vec<QueryResult>) -> Self {
        self.scripts.push_back(results);
        self
    }
}

impl Executor for MockExecutor {
    fn run(&mut self, statement: Statement) -> impl stream::Stream<Item = Result<QueryResult>> + Send {
        self.statements.push(statement);
        let batch = self.scripts.pop_front().unwrap_or_default();
        stream::iter(batch.into_iter().map(Ok))
    }
}

pub fn row(labels: &[&str], values: Vec<Value>) -> QueryResult {
    RowLabeled::new(
        labels
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .into(),
        values.into_boxed_slice(),
    )
    .into()
}

pub fn company_row(
    handle: &str,
    name: &str,
    description: &str,
    num_employees: Option<i32>,
    logo_url: Option<&str>,
) -> QueryResult {
    row(
        &["handle", "name", "description", "num_employees", "logo_url"],
        vec![
            handle.into(),
            name.into(),
            description.into(),
            num_employees.into(),
            logo_url.map(str::to_string).into(),
        ],
    )
}

pub fn job_row(
    id: i32,
    title: &str,
    salary: Option<i32>,
    equity: Option<Decimal>,
    company_handle: &str,
) -> QueryResult {
    row(
        &["id", "title", "salary", "equity", "company_handle"],
        vec![
            id.into(),
            title.into(),
            salary.into(),
            equity.into(),
            company_handle.into(),
        ],
    )
}

pub fn handle_row(handle: &str) -> QueryResult {
    row(&["handle"], vec![handle.into()])
}

pub fn catalog_error(error: &openings::Error) -> &CatalogError {
    error
        .downcast_ref()
        .expect("expected a CatalogError in the chain")
}
