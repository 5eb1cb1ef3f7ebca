/// Shared types used across the codebase

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle states of a diamond tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiamanteStatus {
    /// Currently in use, eligible to be returned
    #[serde(rename = "em_uso")]
    EmUso,
    /// Sent back for sharpening
    #[serde(rename = "afiando")]
    Afiando,
}

impl DiamanteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiamanteStatus::EmUso => "em_uso",
            DiamanteStatus::Afiando => "afiando",
        }
    }
}

impl fmt::Display for DiamanteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row identifier. Supabase tables may use bigint or text/uuid keys, so both
/// are accepted and echoed back in their original JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiamanteId {
    Int(i64),
    Text(String),
}

impl DiamanteId {
    /// Form submissions carry the id as text; compare on the textual form.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            DiamanteId::Int(n) => raw.trim().parse::<i64>().map_or(false, |v| v == *n),
            DiamanteId::Text(s) => s == raw,
        }
    }
}

impl fmt::Display for DiamanteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiamanteId::Int(n) => write!(f, "{}", n),
            DiamanteId::Text(s) => f.write_str(s),
        }
    }
}

/// A row of the `diamantes` table.
///
/// Columns other than `id`, `codigo` and `status` are kept in `extra` so the
/// loader hands the page everything `select *` returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diamante {
    pub id: DiamanteId,
    #[serde(default)]
    pub codigo: Value,
    pub status: DiamanteStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Diamante {
    pub fn new(id: impl Into<DiamanteId>, codigo: impl Into<Value>, status: DiamanteStatus) -> Self {
        Self {
            id: id.into(),
            codigo: codigo.into(),
            status,
            extra: Map::new(),
        }
    }
}

impl From<i64> for DiamanteId {
    fn from(n: i64) -> Self {
        DiamanteId::Int(n)
    }
}

impl From<&str> for DiamanteId {
    fn from(s: &str) -> Self {
        DiamanteId::Text(s.to_string())
    }
}

impl From<String> for DiamanteId {
    fn from(s: String) -> Self {
        DiamanteId::Text(s)
    }
}

/// Ascending order over `codigo` values, approximating how Postgres sorts the
/// column: numbers numerically, text by byte order, NULLs last. Mixed types
/// compare by their JSON text. The remote side sorts by its collation, so
/// non-ASCII or mixed-type codes may come back in a different order there;
/// only the in-memory store relies on this.
pub fn compare_codigo(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(DiamanteStatus::EmUso).unwrap(), json!("em_uso"));
        assert_eq!(serde_json::to_value(DiamanteStatus::Afiando).unwrap(), json!("afiando"));
        assert!(serde_json::from_value::<DiamanteStatus>(json!("quebrado")).is_err());
    }

    #[test]
    fn test_row_keeps_extra_columns() {
        let row: Diamante = serde_json::from_value(json!({
            "id": 7,
            "codigo": "D-07",
            "status": "em_uso",
            "descricao": "Diamante 12mm"
        }))
        .unwrap();

        assert_eq!(row.id, DiamanteId::Int(7));
        assert_eq!(row.extra.get("descricao"), Some(&json!("Diamante 12mm")));

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["id"], json!(7));
        assert_eq!(back["descricao"], json!("Diamante 12mm"));
    }

    #[test]
    fn test_id_matches_form_text() {
        assert!(DiamanteId::Int(42).matches("42"));
        assert!(!DiamanteId::Int(42).matches("4"));
        assert!(DiamanteId::Text("a1b2".into()).matches("a1b2"));
        assert!(!DiamanteId::Text("a1b2".into()).matches("A1B2"));
    }

    #[test]
    fn test_codigo_order_puts_nulls_last() {
        assert_eq!(compare_codigo(&json!("A"), &json!("B")), Ordering::Less);
        assert_eq!(compare_codigo(&json!(10), &json!(9)), Ordering::Greater);
        assert_eq!(compare_codigo(&Value::Null, &json!("A")), Ordering::Greater);
    }

    #[test]
    fn test_codigo_mixed_types_use_json_text() {
        // A string renders with its quote, which sorts before any digit
        assert_eq!(compare_codigo(&json!(10), &json!("9")), Ordering::Greater);
        // Byte order: uppercase sorts before lowercase
        assert_eq!(compare_codigo(&json!("Z"), &json!("a")), Ordering::Less);
    }
}
