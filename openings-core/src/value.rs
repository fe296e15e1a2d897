use rust_decimal::Decimal;

/// Dynamically typed value bound to a positional statement parameter or
/// decoded from a result row.
///
/// Each variant wraps an `Option` so that a typed NULL (`Varchar(None)`)
/// can be distinguished from the untyped `Null`. Both bind as SQL NULL; a
/// sparse update that sets a column to NULL carries one of these, while an
/// untouched column simply does not appear in the patch.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
}

impl Value {
    /// Whether the value binds as SQL NULL, regardless of the variant type.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::Decimal(None)
                | Value::Varchar(None)
        )
    }
}
