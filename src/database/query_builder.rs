use std::fmt;

use crate::database::store::StoreError;

/// PostgREST query for a single table: `select`, `eq` filters, `order`, `limit`.
///
/// Produces the `(key, value)` pairs that go on the query string; values are
/// left unescaped and encoded by the HTTP client.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table_name: String,
    select_columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<(String, bool)>,
    limit: Option<u32>,
}

impl QueryBuilder {
    pub fn new(table_name: impl Into<String>) -> Result<Self, StoreError> {
        let name = table_name.into();
        if !is_valid_identifier(&name) {
            return Err(StoreError::InvalidTable(name));
        }
        Ok(Self {
            table_name: name,
            select_columns: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select_columns = Some(columns.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push((column.into(), format!("eq.{}", value)));
        self
    }

    /// Same shape as the Supabase client's `order(column, { ascending })`
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push((column.into(), ascending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in PostgREST syntax
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(columns) = &self.select_columns {
            params.push(("select".to_string(), columns.clone()));
        }
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(col, ascending)| format!("{}.{}", col, if *ascending { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
