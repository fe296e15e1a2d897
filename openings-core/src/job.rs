use crate::{CatalogError, Executor, FieldMap, Patch, Result, RowLabeled, Statement, parse_bound};
use anyhow::Context;
use indoc::formatdoc;
use rust_decimal::Decimal;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Mutable job fields. `id` and `company_handle` are absent on purpose:
/// the primary key is immutable and a job never moves between companies.
pub const JOB_PATCH_FIELDS: FieldMap = &[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Caller-supplied job data for creation; the id is system-generated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Optional job search criteria, string-valued as decoded from a query
/// string. `has_equity` is a two-valued string enumeration; anything other
/// than `"true"` or `"false"` is a domain violation.
#[derive(Default, Debug, Clone)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<String>,
    pub has_equity: Option<String>,
}

/// A resolved filter: the statement to run plus the branch's empty-result
/// policy. The targeted branches (title and salary searches) historically
/// treat zero matches as a failure, the equity screens as a valid empty
/// answer; the policy travels with the plan so the split stays explicit.
struct SearchPlan {
    statement: Statement,
    not_found_when_empty: bool,
}

impl SearchPlan {
    fn targeted(statement: Statement) -> Self {
        Self {
            statement,
            not_found_when_empty: true,
        }
    }

    fn screening(statement: Statement) -> Self {
        Self {
            statement,
            not_found_when_empty: false,
        }
    }
}

impl JobFilter {
    /// Resolve the criteria through the ordered branch table, first match
    /// wins:
    ///
    /// 1. title and minSalary: exact title, salary floor
    /// 2. title alone: case-insensitive substring
    /// 3. minSalary with hasEquity "true": salary floor, equity holders
    /// 4. minSalary alone: salary floor
    /// 5. hasEquity "true": equity holders, largest stake first
    /// 6. hasEquity "false": zero or unset equity
    /// 7. anything else fails validation
    fn plan(&self) -> Result<SearchPlan> {
        let min_salary = self
            .min_salary
            .as_deref()
            .map(|v| parse_bound("minSalary", v))
            .transpose()?;
        if let Some(title) = self.title.as_deref() {
            if let Some(min) = min_salary {
                return Ok(SearchPlan::targeted(
                    Statement::new(formatdoc! {"
                        SELECT {JOB_COLUMNS}
                        FROM jobs
                        WHERE salary >= $1 AND title = $2
                        ORDER BY salary"})
                    .bind(min)
                    .bind(title),
                ));
            }
            return Ok(SearchPlan::targeted(
                Statement::new(formatdoc! {"
                    SELECT {JOB_COLUMNS}
                    FROM jobs
                    WHERE title ILIKE $1"})
                .bind(format!("%{title}%")),
            ));
        }
        match (min_salary, self.has_equity.as_deref()) {
            (Some(min), Some("true")) => Ok(SearchPlan::targeted(
                Statement::new(formatdoc! {"
                    SELECT {JOB_COLUMNS}
                    FROM jobs
                    WHERE salary >= $1 AND equity > 0
                    ORDER BY salary"})
                .bind(min),
            )),
            (Some(min), _) => Ok(SearchPlan::targeted(
                Statement::new(formatdoc! {"
                    SELECT {JOB_COLUMNS}
                    FROM jobs
                    WHERE salary >= $1
                    ORDER BY salary"})
                .bind(min),
            )),
            (None, Some("true")) => Ok(SearchPlan::screening(Statement::new(formatdoc! {"
                SELECT {JOB_COLUMNS}
                FROM jobs
                WHERE equity > 0
                ORDER BY equity DESC"}))),
            // Unset equity never compares equal to zero under three-valued
            // logic, hence the explicit null check.
            (None, Some("false")) => Ok(SearchPlan::screening(Statement::new(formatdoc! {"
                SELECT {JOB_COLUMNS}
                FROM jobs
                WHERE equity = 0 OR equity IS NULL"}))),
            _ => Err(CatalogError::validation(
                "hasEquity must be either true or false",
            )),
        }
    }
}

impl Job {
    pub(crate) fn from_row(row: &RowLabeled) -> Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            salary: row.get("salary")?,
            equity: row.get("equity")?,
            company_handle: row.get("company_handle")?,
        })
    }

    /// Insert a job and return the stored row, id included. Referential
    /// integrity of the company handle is the storage engine's concern.
    pub async fn create<E: Executor>(executor: &mut E, job: &NewJob) -> Result<Job> {
        let statement = Statement::new(formatdoc! {"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_COLUMNS}"})
        .bind(job.title.as_str())
        .bind(job.salary)
        .bind(job.equity)
        .bind(job.company_handle.as_str());
        log::debug!("{statement}");
        let row = executor
            .fetch_optional(statement)
            .await?
            .with_context(|| format!("INSERT returned no row for job `{}`", job.title))?;
        Self::from_row(&row)
    }

    pub async fn find_all<E: Executor>(executor: &mut E) -> Result<Vec<Job>> {
        let statement = Statement::new(formatdoc! {"
            SELECT {JOB_COLUMNS}
            FROM jobs"});
        let rows = executor.fetch_all(statement).await?;
        rows.iter().map(Self::from_row).collect()
    }

    /// Jobs matching the filter criteria. Whether zero matches is an error
    /// or a valid empty answer is decided per branch by the plan.
    pub async fn search<E: Executor>(executor: &mut E, filter: &JobFilter) -> Result<Vec<Job>> {
        let plan = filter.plan()?;
        log::debug!("{}", plan.statement);
        let rows = executor.fetch_all(plan.statement).await?;
        if rows.is_empty() && plan.not_found_when_empty {
            return Err(CatalogError::not_found("No jobs match the given filters"));
        }
        rows.iter().map(Self::from_row).collect()
    }

    pub async fn get<E: Executor>(executor: &mut E, id: i32) -> Result<Job> {
        let row = executor
            .fetch_optional(
                Statement::new(formatdoc! {"
                    SELECT {JOB_COLUMNS}
                    FROM jobs
                    WHERE id = $1"})
                .bind(id),
            )
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("No job with id: {id}")))?;
        Self::from_row(&row)
    }

    /// Jobs owned by a company, in storage order.
    pub(crate) async fn for_company<E: Executor>(
        executor: &mut E,
        handle: &str,
    ) -> Result<Vec<Job>> {
        let statement = Statement::new(formatdoc! {"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE company_handle = $1"})
        .bind(handle);
        let rows = executor.fetch_all(statement).await?;
        rows.iter().map(Self::from_row).collect()
    }

    /// Apply a sparse update to the job and return the stored row. Only
    /// the fields in [`JOB_PATCH_FIELDS`] may appear in the patch.
    pub async fn update<E: Executor>(executor: &mut E, id: i32, patch: &Patch) -> Result<Job> {
        patch.ensure_allowed(JOB_PATCH_FIELDS)?;
        let set = patch.compile(JOB_PATCH_FIELDS)?;
        let statement = Statement {
            sql: formatdoc! {"
                UPDATE jobs
                SET {assignments}
                WHERE id = ${key}
                RETURNING {JOB_COLUMNS}",
                assignments = set.assignments,
                key = set.next_placeholder(),
            },
            values: set.values,
        }
        .bind(id);
        log::debug!("{statement}");
        let row = executor
            .fetch_optional(statement)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("No job with id: {id}")))?;
        Self::from_row(&row)
    }

    /// Delete a job by id.
    pub async fn remove<E: Executor>(executor: &mut E, id: i32) -> Result<()> {
        let row = executor
            .fetch_optional(Statement::new("DELETE FROM jobs WHERE id = $1 RETURNING id").bind(id))
            .await?;
        if row.is_none() {
            return Err(CatalogError::not_found(format!("No job with id: {id}")));
        }
        Ok(())
    }
}
