use rust_decimal::Decimal;

use crate::error::ApiError;

/// Physical column name for an entity field. Implemented by a per-entity
/// enum so a typo in a column name is a compile error, not runtime SQL.
pub trait SqlColumn: Copy {
    fn column_name(self) -> &'static str;
}

/// A value destined for a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    Decimal(Decimal),
}

/// How a filter compares its column against its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Case-insensitive substring match; text values are wrapped as %value%
    Pattern,
    GreaterOrEqual,
    GreaterThan,
}

impl FilterOp {
    fn sql(self) -> &'static str {
        match self {
            FilterOp::Pattern => "ILIKE",
            FilterOp::GreaterOrEqual => ">=",
            FilterOp::GreaterThan => ">",
        }
    }
}

/// One search criterion: column, comparison, value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec<C: SqlColumn> {
    pub column: C,
    pub op: FilterOp,
    pub value: SqlParam,
}

/// A piece of a statement plus the values for its placeholders, in
/// placeholder order.
#[derive(Debug, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Build the SET clause for a partial update.
///
/// Each assignment becomes `"column"=$n`, positions assigned in slice order
/// starting at $1, joined with `, `. The returned params are in the same
/// order, ready for positional binding.
///
/// An empty assignment list is a caller error, not a no-op.
pub fn build_update_fragment<C: SqlColumn>(
    assignments: Vec<(C, SqlParam)>,
) -> Result<SqlFragment, ApiError> {
    if assignments.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let mut clauses = Vec::with_capacity(assignments.len());
    let mut params = Vec::with_capacity(assignments.len());

    for (idx, (column, value)) in assignments.into_iter().enumerate() {
        clauses.push(format!("\"{}\"=${}", column.column_name(), idx + 1));
        params.push(value);
    }

    Ok(SqlFragment {
        sql: clauses.join(", "),
        params,
    })
}

/// Build the WHERE predicate for a filtered search.
///
/// Each filter becomes `column OP $n`, positions assigned in slice order
/// starting at $1, joined with ` AND `. Pattern filters wrap their text
/// value as `%value%`; comparison filters pass the value through unchanged.
///
/// No filters selects all rows: the predicate is the tautology `1=1` with
/// no params.
pub fn build_filter_fragment<C: SqlColumn>(filters: Vec<FilterSpec<C>>) -> SqlFragment {
    if filters.is_empty() {
        return SqlFragment {
            sql: "1=1".to_string(),
            params: Vec::new(),
        };
    }

    let mut predicates = Vec::with_capacity(filters.len());
    let mut params = Vec::with_capacity(filters.len());

    for (idx, filter) in filters.into_iter().enumerate() {
        predicates.push(format!(
            "{} {} ${}",
            filter.column.column_name(),
            filter.op.sql(),
            idx + 1
        ));
        params.push(match (filter.op, filter.value) {
            (FilterOp::Pattern, SqlParam::Text(v)) => SqlParam::Text(format!("%{}%", v)),
            (_, value) => value,
        });
    }

    SqlFragment {
        sql: predicates.join(" AND "),
        params,
    }
}
