use crate::{
    CatalogError, Executor, FieldMap, Job, Patch, Result, RowLabeled, Statement, parse_bound,
};
use anyhow::Context;
use indoc::formatdoc;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Mutable company fields, external name to column identifier. Doubles as
/// the strict allow-list for sparse updates; `handle` is deliberately
/// absent because the primary key never mutates.
pub const COMPANY_PATCH_FIELDS: FieldMap = &[
    ("name", "name"),
    ("description", "description"),
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it owns, as returned by
/// [`Company::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetail {
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Optional, mutually exclusive company search criteria, string-valued as
/// decoded from a query string.
#[derive(Default, Debug, Clone)]
pub struct CompanyFilter {
    pub min_employees: Option<String>,
    pub max_employees: Option<String>,
    pub name_like: Option<String>,
}

impl CompanyFilter {
    /// Resolve the criteria into a single-predicate statement.
    ///
    /// The branches form an ordered table, first match wins: min only, max
    /// only, both bounds, name substring. Inverted bounds fail regardless
    /// of which branch would have matched, and criteria that match no
    /// branch fail instead of yielding an undefined result.
    fn plan(&self) -> Result<Statement> {
        let min = self
            .min_employees
            .as_deref()
            .map(|v| parse_bound("minEmployees", v))
            .transpose()?;
        let max = self
            .max_employees
            .as_deref()
            .map(|v| parse_bound("maxEmployees", v))
            .transpose()?;
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(CatalogError::validation(
                "minEmployees must be smaller than maxEmployees",
            ));
        }
        Ok(match (min, max, self.name_like.as_deref()) {
            (Some(min), None, _) => Statement::new(formatdoc! {"
                SELECT {COMPANY_COLUMNS}
                FROM companies
                WHERE num_employees >= $1
                ORDER BY name"})
            .bind(min),
            (None, Some(max), _) => Statement::new(formatdoc! {"
                SELECT {COMPANY_COLUMNS}
                FROM companies
                WHERE num_employees <= $1
                ORDER BY name"})
            .bind(max),
            (Some(min), Some(max), _) => Statement::new(formatdoc! {"
                SELECT {COMPANY_COLUMNS}
                FROM companies
                WHERE num_employees BETWEEN $1 AND $2
                ORDER BY name"})
            .bind(min)
            .bind(max),
            (None, None, Some(name)) => Statement::new(formatdoc! {"
                SELECT {COMPANY_COLUMNS}
                FROM companies
                WHERE name ILIKE $1
                ORDER BY name"})
            .bind(format!("%{name}%")),
            (None, None, None) => {
                return Err(CatalogError::validation("no recognized filter criteria"));
            }
        })
    }
}

impl Company {
    fn from_row(row: &RowLabeled) -> Result<Self> {
        Ok(Self {
            handle: row.get("handle")?,
            name: row.get("name")?,
            description: row.get("description")?,
            num_employees: row.get("num_employees")?,
            logo_url: row.get("logo_url")?,
        })
    }

    /// Insert a company and return the stored row. A handle already in use
    /// is a validation failure, checked with a preliminary round trip.
    pub async fn create<E: Executor>(executor: &mut E, company: &Company) -> Result<Company> {
        let duplicate = executor
            .fetch_optional(
                Statement::new("SELECT handle FROM companies WHERE handle = $1")
                    .bind(company.handle.as_str()),
            )
            .await?;
        if duplicate.is_some() {
            return Err(CatalogError::validation(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }
        let statement = Statement::new(formatdoc! {"
            INSERT INTO companies (handle, name, description, num_employees, logo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COMPANY_COLUMNS}"})
        .bind(company.handle.as_str())
        .bind(company.name.as_str())
        .bind(company.description.as_str())
        .bind(company.num_employees)
        .bind(company.logo_url.clone());
        log::debug!("{statement}");
        let row = executor
            .fetch_optional(statement)
            .await?
            .with_context(|| format!("INSERT returned no row for company {}", company.handle))?;
        Self::from_row(&row)
    }

    /// All companies, ascending by name.
    pub async fn find_all<E: Executor>(executor: &mut E) -> Result<Vec<Company>> {
        let statement = Statement::new(formatdoc! {"
            SELECT {COMPANY_COLUMNS}
            FROM companies
            ORDER BY name"});
        let rows = executor.fetch_all(statement).await?;
        rows.iter().map(Self::from_row).collect()
    }

    /// Companies matching the filter criteria, ascending by name. Zero
    /// matches is a valid empty answer.
    pub async fn search<E: Executor>(
        executor: &mut E,
        filter: &CompanyFilter,
    ) -> Result<Vec<Company>> {
        let statement = filter.plan()?;
        log::debug!("{statement}");
        let rows = executor.fetch_all(statement).await?;
        rows.iter().map(Self::from_row).collect()
    }

    /// A company and its jobs. Two independent sequential round trips, not
    /// a transaction; a concurrent writer may interleave between them.
    pub async fn get<E: Executor>(executor: &mut E, handle: &str) -> Result<CompanyDetail> {
        let row = executor
            .fetch_optional(
                Statement::new(formatdoc! {"
                    SELECT {COMPANY_COLUMNS}
                    FROM companies
                    WHERE handle = $1"})
                .bind(handle),
            )
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("No company: {handle}")))?;
        let company = Self::from_row(&row)?;
        let jobs = Job::for_company(executor, handle).await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a sparse update to the company and return the stored row.
    /// Only the fields in [`COMPANY_PATCH_FIELDS`] may appear in the
    /// patch; the handle itself is immutable and travels only in the key
    /// predicate.
    pub async fn update<E: Executor>(
        executor: &mut E,
        handle: &str,
        patch: &Patch,
    ) -> Result<Company> {
        patch.ensure_allowed(COMPANY_PATCH_FIELDS)?;
        let set = patch.compile(COMPANY_PATCH_FIELDS)?;
        let statement = Statement {
            sql: formatdoc! {"
                UPDATE companies
                SET {assignments}
                WHERE handle = ${key}
                RETURNING {COMPANY_COLUMNS}",
                assignments = set.assignments,
                key = set.next_placeholder(),
            },
            values: set.values,
        }
        .bind(handle);
        log::debug!("{statement}");
        let row = executor
            .fetch_optional(statement)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("No company: {handle}")))?;
        Self::from_row(&row)
    }

    /// Delete a company by handle.
    pub async fn remove<E: Executor>(executor: &mut E, handle: &str) -> Result<()> {
        let row = executor
            .fetch_optional(
                Statement::new("DELETE FROM companies WHERE handle = $1 RETURNING handle")
                    .bind(handle),
            )
            .await?;
        if row.is_none() {
            return Err(CatalogError::not_found(format!("No company: {handle}")));
        }
        Ok(())
    }
}
