use serde_json::{Number, Value};

use crate::sheet::Cell;

/// Convert a cell to the value persisted in an extract row.
///
/// Dates keep only the day, decimals keep their exact digits as a string,
/// whole-valued floats become integers (workbooks store every number as a
/// float), and non-finite floats become `null` because JSON has no encoding
/// for them.
pub fn normalize(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        Cell::DateTime(dt) => Value::String(dt.date().format("%Y-%m-%d").to_string()),
        Cell::Decimal(d) => Value::String(d.to_string()),
        Cell::Int(i) => Value::from(*i),
        Cell::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Value::from(*f as i64),
        Cell::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Cell::Bool(b) => Value::Bool(*b),
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Error(e) => Value::String(e.clone()),
    }
}
