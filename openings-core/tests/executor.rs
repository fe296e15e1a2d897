#[cfg(test)]
mod tests {
    use openings_core::{
        Executor, QueryResult, Result, RowLabeled, RowsAffected, Statement, Value, stream,
    };

    struct Canned {
        results: Vec<Vec<QueryResult>>,
    }

    impl Executor for Canned {
        fn run(
            &mut self,
            _statement: Statement,
        ) -> impl stream::Stream<Item = Result<QueryResult>> + Send {
            let batch = if self.results.is_empty() {
                Vec::new()
            } else {
                self.results.remove(0)
            };
            stream::iter(batch.into_iter().map(Ok))
        }
    }

    fn row(n: i32) -> RowLabeled {
        RowLabeled::new(
            vec!["n".to_string()].into(),
            vec![Value::Int32(Some(n))].into_boxed_slice(),
        )
    }

    #[tokio::test]
    async fn fetch_filters_out_modify_results() {
        let mut executor = Canned {
            results: vec![vec![
                row(1).into(),
                RowsAffected { rows_affected: 1 }.into(),
                row(2).into(),
            ]],
        };
        let rows = executor.fetch_all("SELECT n FROM t".into()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get::<i32>("n").unwrap(), 1);
        assert_eq!(rows[1].get::<i32>("n").unwrap(), 2);
    }

    #[tokio::test]
    async fn fetch_optional_returns_the_first_row() {
        let mut executor = Canned {
            results: vec![vec![row(7).into(), row(8).into()], vec![]],
        };
        let first = executor
            .fetch_optional("SELECT n FROM t".into())
            .await
            .unwrap();
        assert_eq!(first.unwrap().get::<i32>("n").unwrap(), 7);
        let none = executor
            .fetch_optional("SELECT n FROM t".into())
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn execute_accumulates_affected_counts() {
        let mut executor = Canned {
            results: vec![vec![
                RowsAffected { rows_affected: 2 }.into(),
                row(1).into(),
                RowsAffected { rows_affected: 3 }.into(),
            ]],
        };
        let affected = executor.execute("DELETE FROM t".into()).await.unwrap();
        assert_eq!(affected.rows_affected, 5);
    }

    #[test]
    fn a_row_shorter_than_its_labels_is_an_error() {
        let row = RowLabeled::new(
            vec!["id".to_string(), "title".to_string()].into(),
            vec![Value::Int32(Some(1))].into_boxed_slice(),
        );
        assert_eq!(row.get::<i32>("id").unwrap(), 1);
        assert!(row.get_column("title").is_none());
        assert!(row.get::<String>("title").is_err());
    }

    #[test]
    fn row_decode_failures_surface_as_errors() {
        let row = RowLabeled::new(
            vec!["salary".to_string()].into(),
            vec![Value::Varchar(Some("lots".into()))].into_boxed_slice(),
        );
        assert!(row.get::<i32>("salary").is_err());
        assert!(row.get::<i32>("missing").is_err());
    }
}
