use sea_orm::Value;
use serde::Deserialize;

/// List parameters shared by every listing endpoint. Empty strings are
/// treated the same as absent parameters, since the dashboard sends
/// `?filter=&search=&sort=` when nothing is selected.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Per-table description of how list parameters translate to SQL. Column
/// expressions are static, so user input only ever reaches the query through
/// bound parameters.
pub struct ListSpec {
    /// Columns compared for equality against `filter`; OR-ed together when
    /// the table carries more than one status-like column.
    pub status_columns: &'static [&'static str],
    /// Column expressions matched with ILIKE against `search`.
    pub search_columns: &'static [&'static str],
    /// The one recognized type-specific sort keyword and its column.
    pub keyword_sort: Option<(&'static str, &'static str)>,
    pub created_column: &'static str,
    pub id_column: &'static str,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/**
 * Translate the filter and search parameters into WHERE conditions.
 *
 * # Arguments
 * @param spec: &ListSpec - The table description
 * @param query: &ListQuery - The caller-supplied list parameters
 *
 * # Returns
 * @return (Vec<String>, Vec<Value>) - AND-able condition fragments with $n
 * placeholders, and the values bound to them
 */
pub fn conditions(spec: &ListSpec, query: &ListQuery) -> (Vec<String>, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(filter) = present(query.filter.as_deref()) {
        values.push(filter.into());
        let position = values.len();
        let equals: Vec<String> = spec
            .status_columns
            .iter()
            .map(|column| format!("{} = ${}", column, position))
            .collect();
        clauses.push(format!("({})", equals.join(" OR ")));
    }

    if let Some(search) = present(query.search.as_deref()) {
        values.push(format!("%{}%", search).into());
        let position = values.len();
        let likes: Vec<String> = spec
            .search_columns
            .iter()
            .map(|column| format!("{} ILIKE ${}", column, position))
            .collect();
        clauses.push(format!("({})", likes.join(" OR ")));
    }

    (clauses, values)
}

/**
 * Translate the sort parameter into an ORDER BY expression.
 *
 * `new` and `old` order by creation time, the table's own keyword orders by
 * its column ascending, and anything else falls back to newest row first.
 *
 * # Arguments
 * @param spec: &ListSpec - The table description
 * @param query: &ListQuery - The caller-supplied list parameters
 *
 * # Returns
 * @return String - The ORDER BY expression, without the keyword itself
 */
pub fn order_by(spec: &ListSpec, query: &ListQuery) -> String {
    match present(query.sort.as_deref()) {
        Some("new") => format!("{} DESC", spec.created_column),
        Some("old") => format!("{} ASC", spec.created_column),
        Some(keyword) => match spec.keyword_sort {
            Some((name, column)) if keyword == name => format!("{} ASC", column),
            _ => format!("{} DESC", spec.id_column),
        },
        None => format!("{} DESC", spec.id_column),
    }
}

/**
 * Build the full WHERE/ORDER BY suffix for a listing query.
 *
 * # Arguments
 * @param spec: &ListSpec - The table description
 * @param query: &ListQuery - The caller-supplied list parameters
 *
 * # Returns
 * @return (String, Vec<Value>) - The SQL suffix (leading space included) and
 * the bound values
 */
pub fn build_clauses(spec: &ListSpec, query: &ListQuery) -> (String, Vec<Value>) {
    let (clauses, values) = conditions(spec, query);
    let mut sql = String::new();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&order_by(spec, query));
    (sql, values)
}
