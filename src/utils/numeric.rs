use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::Value;
use std::str::FromStr;

/// 将 JSON Value 解析为 BigDecimal
///
/// 前端表单把数字字段序列化成 Number 或 String 都有可能，
/// 两种都接受，其他类型视为非法。
pub fn coerce_decimal(v: &Value) -> Option<BigDecimal> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| BigDecimal::from_str(&f.to_string()).ok()),
        Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

pub fn decimal_from_f64(v: f64) -> BigDecimal {
    BigDecimal::from_str(&v.to_string()).unwrap_or_else(|_| BigDecimal::from(0))
}

/// 统计口径统一用 f64，入口处转换一次
pub fn decimal_to_f64(v: &BigDecimal) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_strings() {
        assert_eq!(coerce_decimal(&json!(4.5)), Some(decimal_from_f64(4.5)));
        assert_eq!(coerce_decimal(&json!("-300")), Some(BigDecimal::from(-300)));
        assert_eq!(coerce_decimal(&json!(" 2.0 ")), Some(decimal_from_f64(2.0)));
        assert_eq!(coerce_decimal(&json!(0)), Some(BigDecimal::from(0)));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(coerce_decimal(&json!("abc")), None);
        assert_eq!(coerce_decimal(&json!(null)), None);
        assert_eq!(coerce_decimal(&json!(true)), None);
        assert_eq!(coerce_decimal(&json!([1])), None);
    }

    #[test]
    fn round_trips_through_f64() {
        let d = coerce_decimal(&json!("123.45")).unwrap();
        assert!((decimal_to_f64(&d) - 123.45).abs() < 1e-9);
    }
}
