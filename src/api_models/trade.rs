use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{NewTrade, Trade, UpdateTrade};
use crate::utils::numeric::coerce_decimal;

/// 校验失败只报告第一个出错的字段，和前端表单逐字段提示的约定一致
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub id: i32,
    pub asset: String,
    pub strategy: String,
    pub session: String,
    pub condition: String,
    pub bias: String,
    pub outcome: String,
    pub r_achieved: BigDecimal,
    pub pl_amt: BigDecimal,
    #[serde(rename = "contextTF")]
    pub context_tf: Option<String>,
    #[serde(rename = "entryTF")]
    pub entry_tf: Option<String>,
    #[serde(rename = "analysisTF")]
    pub analysis_tf: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub planned_entry: Option<BigDecimal>,
    pub planned_stop: Option<BigDecimal>,
    pub planned_target: Option<BigDecimal>,
    pub actual_entry: Option<BigDecimal>,
    pub actual_stop: Option<BigDecimal>,
    pub actual_target: Option<BigDecimal>,
    pub risk_percent: Option<BigDecimal>,
    #[serde(rename = "plannedRR")]
    pub planned_rr: Option<BigDecimal>,
    #[serde(rename = "achievedRR")]
    pub achieved_rr: Option<BigDecimal>,
    pub pips: Option<BigDecimal>,
    pub lot_size: Option<BigDecimal>,
    pub order_type: Option<String>,
    pub entry_method: Option<String>,
    pub exit_strategy: Option<String>,
    pub break_even_applied: Option<bool>,
    pub market_alignment: Option<i32>,
    pub setup_clarity: Option<i32>,
    pub entry_precision: Option<i32>,
    pub confluence: Option<i32>,
    pub timing_quality: Option<i32>,
    pub confidence: Option<i32>,
    pub focus: Option<i32>,
    pub stress: Option<i32>,
    pub emotional_state: Option<String>,
    pub rules_followed: Option<i32>,
    pub forced_trade: Option<bool>,
    pub missed_setup: Option<bool>,
    pub overtraded: Option<bool>,
    pub documented: Option<bool>,
    pub worth_repeating: Option<bool>,
    pub what_worked: Option<String>,
    pub what_failed: Option<String>,
    pub adjustments: Option<String>,
    pub image_url: Option<String>,
}

impl From<Trade> for TradeResponse {
    fn from(t: Trade) -> Self {
        Self {
            id: t.id,
            asset: t.asset,
            strategy: t.strategy,
            session: t.session,
            condition: t.condition,
            bias: t.bias,
            outcome: t.outcome,
            r_achieved: t.r_achieved,
            pl_amt: t.pl_amt,
            context_tf: t.context_tf,
            entry_tf: t.entry_tf,
            analysis_tf: t.analysis_tf,
            date: t.date,
            planned_entry: t.planned_entry,
            planned_stop: t.planned_stop,
            planned_target: t.planned_target,
            actual_entry: t.actual_entry,
            actual_stop: t.actual_stop,
            actual_target: t.actual_target,
            risk_percent: t.risk_percent,
            planned_rr: t.planned_rr,
            achieved_rr: t.achieved_rr,
            pips: t.pips,
            lot_size: t.lot_size,
            order_type: t.order_type,
            entry_method: t.entry_method,
            exit_strategy: t.exit_strategy,
            break_even_applied: t.break_even_applied,
            market_alignment: t.market_alignment,
            setup_clarity: t.setup_clarity,
            entry_precision: t.entry_precision,
            confluence: t.confluence,
            timing_quality: t.timing_quality,
            confidence: t.confidence,
            focus: t.focus,
            stress: t.stress,
            emotional_state: t.emotional_state,
            rules_followed: t.rules_followed,
            forced_trade: t.forced_trade,
            missed_setup: t.missed_setup,
            overtraded: t.overtraded,
            documented: t.documented,
            worth_repeating: t.worth_repeating,
            what_worked: t.what_worked,
            what_failed: t.what_failed,
            adjustments: t.adjustments,
            image_url: t.image_url,
        }
    }
}

fn body_object(body: &Value) -> Result<&Map<String, Value>, FieldError> {
    body.as_object()
        .ok_or_else(|| FieldError::new("body", "Expected a JSON object"))
}

fn required_text(map: &Map<String, Value>, key: &'static str) -> Result<String, FieldError> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(FieldError::new(key, "Must not be empty")),
        Some(Value::Null) | None => Err(FieldError::new(key, "Required")),
        Some(_) => Err(FieldError::new(key, "Expected string")),
    }
}

fn required_decimal(map: &Map<String, Value>, key: &'static str) -> Result<BigDecimal, FieldError> {
    match map.get(key) {
        Some(Value::Null) | None => Err(FieldError::new(key, "Required")),
        Some(v) => {
            coerce_decimal(v).ok_or_else(|| FieldError::new(key, "Expected number or numeric string"))
        }
    }
}

fn opt_text(map: &Map<String, Value>, key: &'static str) -> Result<Option<String>, FieldError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(FieldError::new(key, "Expected string")),
    }
}

fn opt_decimal(map: &Map<String, Value>, key: &'static str) -> Result<Option<BigDecimal>, FieldError> {
    match map.get(key) {
        Some(Value::Null) | None => Ok(None),
        Some(v) => coerce_decimal(v)
            .map(Some)
            .ok_or_else(|| FieldError::new(key, "Expected number or numeric string")),
    }
}

fn opt_bool(map: &Map<String, Value>, key: &'static str) -> Result<Option<bool>, FieldError> {
    match map.get(key) {
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(FieldError::new(key, "Expected boolean")),
    }
}

fn opt_int_range(
    map: &Map<String, Value>,
    key: &'static str,
    min: i64,
    max: i64,
) -> Result<Option<i32>, FieldError> {
    match map.get(key) {
        Some(Value::Null) | None => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) if (min..=max).contains(&i) => Ok(Some(i as i32)),
            _ => Err(FieldError::new(
                key,
                format!("Expected integer between {} and {}", min, max),
            )),
        },
        Some(_) => Err(FieldError::new(
            key,
            format!("Expected integer between {} and {}", min, max),
        )),
    }
}

/// 1-5 的主观评分
fn opt_score(map: &Map<String, Value>, key: &'static str) -> Result<Option<i32>, FieldError> {
    opt_int_range(map, key, 1, 5)
}

/// 解析并校验 POST /api/trades 的请求体。
///
/// 必填字段缺失或类型不符时返回第一个出错字段，
/// outcome 与 plAmt/rAchieved 的正负号不做交叉校验（录入端的既有约定）。
pub fn parse_new_trade(body: &Value) -> Result<NewTrade, FieldError> {
    let map = body_object(body)?;

    Ok(NewTrade {
        asset: required_text(map, "asset")?,
        strategy: required_text(map, "strategy")?,
        session: required_text(map, "session")?,
        condition: required_text(map, "condition")?,
        bias: required_text(map, "bias")?,
        outcome: required_text(map, "outcome")?,
        r_achieved: required_decimal(map, "rAchieved")?,
        pl_amt: required_decimal(map, "plAmt")?,
        context_tf: Some(opt_text(map, "contextTF")?.unwrap_or_else(|| "D1".to_string())),
        entry_tf: Some(opt_text(map, "entryTF")?.unwrap_or_else(|| "M5".to_string())),
        analysis_tf: Some(opt_text(map, "analysisTF")?.unwrap_or_else(|| "H1".to_string())),
        // 时间戳由服务端生成，客户端不可指定
        date: Some(chrono::Utc::now().naive_utc()),
        planned_entry: opt_decimal(map, "plannedEntry")?,
        planned_stop: opt_decimal(map, "plannedStop")?,
        planned_target: opt_decimal(map, "plannedTarget")?,
        actual_entry: opt_decimal(map, "actualEntry")?,
        actual_stop: opt_decimal(map, "actualStop")?,
        actual_target: opt_decimal(map, "actualTarget")?,
        risk_percent: opt_decimal(map, "riskPercent")?,
        planned_rr: opt_decimal(map, "plannedRR")?,
        achieved_rr: opt_decimal(map, "achievedRR")?,
        pips: opt_decimal(map, "pips")?,
        lot_size: opt_decimal(map, "lotSize")?,
        order_type: opt_text(map, "orderType")?,
        entry_method: opt_text(map, "entryMethod")?,
        exit_strategy: opt_text(map, "exitStrategy")?,
        break_even_applied: opt_bool(map, "breakEvenApplied")?,
        market_alignment: opt_score(map, "marketAlignment")?,
        setup_clarity: opt_score(map, "setupClarity")?,
        entry_precision: opt_score(map, "entryPrecision")?,
        confluence: opt_score(map, "confluence")?,
        timing_quality: opt_score(map, "timingQuality")?,
        confidence: opt_score(map, "confidence")?,
        focus: opt_score(map, "focus")?,
        stress: opt_score(map, "stress")?,
        emotional_state: opt_text(map, "emotionalState")?,
        rules_followed: opt_int_range(map, "rulesFollowed", 0, 100)?,
        forced_trade: opt_bool(map, "forcedTrade")?,
        missed_setup: opt_bool(map, "missedSetup")?,
        overtraded: opt_bool(map, "overtraded")?,
        documented: opt_bool(map, "documented")?,
        worth_repeating: opt_bool(map, "worthRepeating")?,
        what_worked: opt_text(map, "whatWorked")?,
        what_failed: opt_text(map, "whatFailed")?,
        adjustments: opt_text(map, "adjustments")?,
        image_url: opt_text(map, "imageUrl")?,
    })
}

/// 解析 PATCH /api/trades/:id 的部分更新体。
///
/// 只校验出现的键，未知键忽略；必填字段在 PATCH 里也只在出现时校验。
pub fn parse_trade_patch(body: &Value) -> Result<UpdateTrade, FieldError> {
    let map = body_object(body)?;

    let text_if_present = |key: &'static str| -> Result<Option<String>, FieldError> {
        if map.contains_key(key) {
            required_text(map, key).map(Some)
        } else {
            Ok(None)
        }
    };
    let decimal_if_present = |key: &'static str| -> Result<Option<BigDecimal>, FieldError> {
        if map.contains_key(key) {
            required_decimal(map, key).map(Some)
        } else {
            Ok(None)
        }
    };

    Ok(UpdateTrade {
        asset: text_if_present("asset")?,
        strategy: text_if_present("strategy")?,
        session: text_if_present("session")?,
        condition: text_if_present("condition")?,
        bias: text_if_present("bias")?,
        outcome: text_if_present("outcome")?,
        r_achieved: decimal_if_present("rAchieved")?,
        pl_amt: decimal_if_present("plAmt")?,
        context_tf: opt_text(map, "contextTF")?,
        entry_tf: opt_text(map, "entryTF")?,
        analysis_tf: opt_text(map, "analysisTF")?,
        planned_entry: opt_decimal(map, "plannedEntry")?,
        planned_stop: opt_decimal(map, "plannedStop")?,
        planned_target: opt_decimal(map, "plannedTarget")?,
        actual_entry: opt_decimal(map, "actualEntry")?,
        actual_stop: opt_decimal(map, "actualStop")?,
        actual_target: opt_decimal(map, "actualTarget")?,
        risk_percent: opt_decimal(map, "riskPercent")?,
        planned_rr: opt_decimal(map, "plannedRR")?,
        achieved_rr: opt_decimal(map, "achievedRR")?,
        pips: opt_decimal(map, "pips")?,
        lot_size: opt_decimal(map, "lotSize")?,
        order_type: opt_text(map, "orderType")?,
        entry_method: opt_text(map, "entryMethod")?,
        exit_strategy: opt_text(map, "exitStrategy")?,
        break_even_applied: opt_bool(map, "breakEvenApplied")?,
        market_alignment: opt_score(map, "marketAlignment")?,
        setup_clarity: opt_score(map, "setupClarity")?,
        entry_precision: opt_score(map, "entryPrecision")?,
        confluence: opt_score(map, "confluence")?,
        timing_quality: opt_score(map, "timingQuality")?,
        confidence: opt_score(map, "confidence")?,
        focus: opt_score(map, "focus")?,
        stress: opt_score(map, "stress")?,
        emotional_state: opt_text(map, "emotionalState")?,
        rules_followed: opt_int_range(map, "rulesFollowed", 0, 100)?,
        forced_trade: opt_bool(map, "forcedTrade")?,
        missed_setup: opt_bool(map, "missedSetup")?,
        overtraded: opt_bool(map, "overtraded")?,
        documented: opt_bool(map, "documented")?,
        worth_repeating: opt_bool(map, "worthRepeating")?,
        what_worked: opt_text(map, "whatWorked")?,
        what_failed: opt_text(map, "whatFailed")?,
        adjustments: opt_text(map, "adjustments")?,
        image_url: opt_text(map, "imageUrl")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn parses_minimal_create_payload() {
        let body = json!({
            "asset": "EURUSD",
            "strategy": "SMC Breaker",
            "session": "London",
            "condition": "Trending",
            "bias": "Bullish",
            "outcome": "Win",
            "rAchieved": 2,
            "plAmt": 500
        });
        let t = parse_new_trade(&body).unwrap();
        assert_eq!(t.asset, "EURUSD");
        assert_eq!(t.r_achieved, BigDecimal::from(2));
        assert_eq!(t.pl_amt, BigDecimal::from(500));
        assert_eq!(t.context_tf.as_deref(), Some("D1"));
        assert_eq!(t.entry_tf.as_deref(), Some("M5"));
        assert!(t.date.is_some());
    }

    #[test]
    fn coerces_string_numerics() {
        let body = json!({
            "asset": "NAS100",
            "strategy": "Silver Bullet",
            "session": "New York",
            "condition": "Trending",
            "bias": "Bearish",
            "outcome": "Loss",
            "rAchieved": "-1",
            "plAmt": "-300.50"
        });
        let t = parse_new_trade(&body).unwrap();
        assert_eq!(t.r_achieved, BigDecimal::from(-1));
        assert_eq!(t.pl_amt, BigDecimal::from_str("-300.50").unwrap());
    }

    #[test]
    fn missing_required_field_reports_field_name() {
        let body = json!({
            "asset": "EURUSD",
            "strategy": "SMC Breaker",
            "session": "London",
            "condition": "Trending",
            "bias": "Bullish",
            "outcome": "Win",
            "rAchieved": 2
        });
        let err = parse_new_trade(&body).unwrap_err();
        assert_eq!(err.field, "plAmt");
        assert_eq!(err.message, "Required");
    }

    #[test]
    fn non_numeric_pl_is_rejected() {
        let body = json!({
            "asset": "EURUSD",
            "strategy": "SMC Breaker",
            "session": "London",
            "condition": "Trending",
            "bias": "Bullish",
            "outcome": "Win",
            "rAchieved": 2,
            "plAmt": "five hundred"
        });
        let err = parse_new_trade(&body).unwrap_err();
        assert_eq!(err.field, "plAmt");
    }

    #[test]
    fn win_with_negative_pl_is_accepted() {
        // 录入端从不交叉校验 outcome 与盈亏符号
        let body = json!({
            "asset": "EURUSD",
            "strategy": "SMC Breaker",
            "session": "London",
            "condition": "Trending",
            "bias": "Bullish",
            "outcome": "Win",
            "rAchieved": -1,
            "plAmt": -250
        });
        assert!(parse_new_trade(&body).is_ok());
    }

    #[test]
    fn score_out_of_range_is_rejected() {
        let body = json!({
            "asset": "EURUSD",
            "strategy": "SMC Breaker",
            "session": "London",
            "condition": "Trending",
            "bias": "Bullish",
            "outcome": "Win",
            "rAchieved": 1,
            "plAmt": 100,
            "setupClarity": 6
        });
        let err = parse_new_trade(&body).unwrap_err();
        assert_eq!(err.field, "setupClarity");
    }

    #[test]
    fn patch_validates_only_present_keys() {
        let patch = parse_trade_patch(&json!({ "outcome": "Loss", "plAmt": "-120" })).unwrap();
        assert_eq!(patch.outcome.as_deref(), Some("Loss"));
        assert_eq!(patch.pl_amt, Some(BigDecimal::from(-120)));
        assert!(patch.asset.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_rejects_bad_value_for_present_key() {
        let err = parse_trade_patch(&json!({ "rAchieved": false })).unwrap_err();
        assert_eq!(err.field, "rAchieved");
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch = parse_trade_patch(&json!({ "unknownKey": 1 })).unwrap();
        assert!(patch.is_empty());
    }
}
