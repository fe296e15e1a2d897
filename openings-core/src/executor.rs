use crate::{
    QueryResult, Result, RowLabeled, RowsAffected, Statement,
    stream::{Stream, StreamExt, TryStreamExt},
};
use futures::FutureExt;
use std::{future::Future, pin::pin};

/// The seam between the catalog core and a storage backend.
///
/// A backend only has to implement [`run`](Executor::run); the row and
/// modify adapters are derived from it. Each core operation is a single
/// statement and at most one round trip; atomicity across statements is
/// the storage engine's concern, not this trait's.
pub trait Executor: Send {
    /// Send a statement and stream back every result item (rows and modify
    /// counts interleaved, in backend order).
    fn run(&mut self, statement: Statement)
    -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the statement and stream the labeled rows.
    fn fetch(&mut self, statement: Statement) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(statement).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the statement and collect all rows.
    fn fetch_all(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<RowLabeled>>> + Send {
        self.fetch(statement).try_collect()
    }

    /// Execute the statement and return the first row, if any.
    fn fetch_optional(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<Option<RowLabeled>>> + Send {
        let stream = self.fetch(statement);
        async move { pin!(stream).into_future().map(|(v, _)| v).await.transpose() }
    }

    /// Execute the statement and return the total number of rows affected.
    fn execute(
        &mut self,
        statement: Statement,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(statement)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}
