//! Conversion from engine cell values to [`kg2_core::Value`].

use duckdb::types::Value as DuckValue;
use kg2_core::Value;

/// Convert one engine cell into a plain value.
///
/// Integer types wider than `i64` fall back to their decimal text when out
/// of range. Types with no plain counterpart (dates, intervals, structs)
/// are rendered through their debug form so nothing is silently dropped.
pub fn from_duckdb(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Bool(b),
        DuckValue::TinyInt(n) => Value::Int(i64::from(n)),
        DuckValue::SmallInt(n) => Value::Int(i64::from(n)),
        DuckValue::Int(n) => Value::Int(i64::from(n)),
        DuckValue::BigInt(n) => Value::Int(n),
        DuckValue::HugeInt(n) => i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Int),
        DuckValue::UTinyInt(n) => Value::Int(i64::from(n)),
        DuckValue::USmallInt(n) => Value::Int(i64::from(n)),
        DuckValue::UInt(n) => Value::Int(i64::from(n)),
        DuckValue::UBigInt(n) => i64::try_from(n).map_or_else(|_| Value::String(n.to_string()), Value::Int),
        DuckValue::Float(f) => Value::Float(f64::from(f)),
        DuckValue::Double(f) => Value::Float(f),
        DuckValue::Text(s) | DuckValue::Enum(s) => Value::String(s),
        DuckValue::Blob(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        DuckValue::List(items) | DuckValue::Array(items) => {
            Value::List(items.into_iter().map(from_duckdb).collect())
        }
        other => Value::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DuckValue::Null, Value::Null)]
    #[case(DuckValue::Boolean(true), Value::Bool(true))]
    #[case(DuckValue::TinyInt(-3), Value::Int(-3))]
    #[case(DuckValue::Int(7), Value::Int(7))]
    #[case(DuckValue::UInt(7), Value::Int(7))]
    #[case(DuckValue::BigInt(19_799_062), Value::Int(19_799_062))]
    #[case(DuckValue::Double(0.5), Value::Float(0.5))]
    #[case(DuckValue::Text("Down syndrome".into()), Value::from("Down syndrome"))]
    #[case(DuckValue::Blob(b"raw".to_vec()), Value::from("raw"))]
    fn scalars_convert(#[case] cell: DuckValue, #[case] expected: Value) {
        assert_eq!(from_duckdb(cell), expected);
    }

    #[test]
    fn out_of_range_unsigned_becomes_text() {
        assert_eq!(
            from_duckdb(DuckValue::UBigInt(u64::MAX)),
            Value::String(u64::MAX.to_string())
        );
    }

    #[test]
    fn lists_convert_recursively() {
        let list = DuckValue::List(vec![
            DuckValue::Text("biolink:Disease".into()),
            DuckValue::Text("biolink:NamedThing".into()),
        ]);
        assert_eq!(
            from_duckdb(list),
            Value::List(vec!["biolink:Disease".into(), "biolink:NamedThing".into()])
        );
    }
}
