#[cfg(test)]
mod tests {
    use openings_core::{AsValue, Value};
    use rust_decimal::Decimal;

    #[test]
    fn value_null() {
        assert_eq!(Value::Null, Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
        assert_ne!(Value::Int32(Some(1)), Value::Null);
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        let var: bool = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, true);
        assert!(bool::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_i32() {
        let val: Value = 42.into();
        assert_eq!(val, Value::Int32(Some(42)));
        let var: i32 = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, 42);
        assert_eq!(i32::try_from_value(Value::Int64(Some(77))).unwrap(), 77);
        assert!(i32::try_from_value(Value::Int64(Some(i64::MAX))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("42".into()))).is_err());
    }

    #[test]
    fn value_i64() {
        let val: Value = 9223372036854775807i64.into();
        let var: i64 = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, 9223372036854775807);
        assert_eq!(i64::try_from_value(Value::Int32(Some(-31))).unwrap(), -31);
        assert!(i64::try_from_value(Value::Boolean(Some(true))).is_err());
    }

    #[test]
    fn value_decimal() {
        let equity = Decimal::new(5, 2);
        let val: Value = equity.into();
        assert_eq!(val, Value::Decimal(Some(equity)));
        let var: Decimal = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, equity);
        assert_eq!(
            Decimal::try_from_value(Value::Int32(Some(3))).unwrap(),
            Decimal::from(3)
        );
        assert!(Decimal::try_from_value(Value::Varchar(Some("0.05".into()))).is_err());
    }

    #[test]
    fn value_string() {
        let val: Value = String::from("acme").into();
        assert_eq!(val, Value::Varchar(Some("acme".into())));
        let var: String = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, "acme");
        assert_eq!(Value::from("acme"), Value::Varchar(Some("acme".into())));
        assert!(String::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_option() {
        let val: Value = Option::<i32>::None.into();
        assert_eq!(val, Value::Int32(None));
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Varchar(None)).unwrap(),
            None
        );
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int32(Some(7))).unwrap(),
            Some(7)
        );
        assert!(Option::<i32>::try_from_value(Value::Varchar(Some("x".into()))).is_err());
        assert_eq!(Some(5i32).as_value(), Value::Int32(Some(5)));
    }
}
