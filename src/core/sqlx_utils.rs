use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    Postgres,
};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub enum SqlxBinds {
    String(String),
    Uuid(Uuid),
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val),
            SqlxBinds::Uuid(val) => q.bind(val),
        };
    }
    q
}

/// Builds `SELECT .. FROM .. WHERE .. ORDER BY .. LIMIT .. OFFSET ..`.
/// Filters are joined with AND and must reference binds as `$n`.
pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> String {
    let mut stmt = format!(
        "SELECT {} FROM {}",
        select.unwrap_or("*".to_string()),
        table_name
    );
    if !wheres.is_empty() {
        stmt.push_str(" WHERE ");
        stmt.push_str(&wheres.join(" AND "));
    }
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY ");
        stmt.push_str(&order_by.join(", "));
    }
    if let Some(limit) = limit {
        stmt.push_str(&format!(" LIMIT {}", limit));
    }
    if let Some(offset) = offset {
        stmt.push_str(&format!(" OFFSET {}", offset));
    }
    stmt
}
