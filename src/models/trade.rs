use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::trades;

/// 交易日志主表的一行记录
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trades)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Trade {
    pub id: i32,
    pub asset: String,
    pub strategy: String,
    pub session: String,
    pub condition: String,
    pub bias: String,
    pub outcome: String,
    pub r_achieved: BigDecimal,
    pub pl_amt: BigDecimal,
    pub context_tf: Option<String>,
    pub entry_tf: Option<String>,
    pub analysis_tf: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub planned_entry: Option<BigDecimal>,
    pub planned_stop: Option<BigDecimal>,
    pub planned_target: Option<BigDecimal>,
    pub actual_entry: Option<BigDecimal>,
    pub actual_stop: Option<BigDecimal>,
    pub actual_target: Option<BigDecimal>,
    pub risk_percent: Option<BigDecimal>,
    pub planned_rr: Option<BigDecimal>,
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

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = trades)]
pub struct NewTrade {
    pub asset: String,
    pub strategy: String,
    pub session: String,
    pub condition: String,
    pub bias: String,
    pub outcome: String,
    pub r_achieved: BigDecimal,
    pub pl_amt: BigDecimal,
    pub context_tf: Option<String>,
    pub entry_tf: Option<String>,
    pub analysis_tf: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub planned_entry: Option<BigDecimal>,
    pub planned_stop: Option<BigDecimal>,
    pub planned_target: Option<BigDecimal>,
    pub actual_entry: Option<BigDecimal>,
    pub actual_stop: Option<BigDecimal>,
    pub actual_target: Option<BigDecimal>,
    pub risk_percent: Option<BigDecimal>,
    pub planned_rr: Option<BigDecimal>,
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

/// 部分更新：None 字段保持不变
#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = trades)]
pub struct UpdateTrade {
    pub asset: Option<String>,
    pub strategy: Option<String>,
    pub session: Option<String>,
    pub condition: Option<String>,
    pub bias: Option<String>,
    pub outcome: Option<String>,
    pub r_achieved: Option<BigDecimal>,
    pub pl_amt: Option<BigDecimal>,
    pub context_tf: Option<String>,
    pub entry_tf: Option<String>,
    pub analysis_tf: Option<String>,
    pub planned_entry: Option<BigDecimal>,
    pub planned_stop: Option<BigDecimal>,
    pub planned_target: Option<BigDecimal>,
    pub actual_entry: Option<BigDecimal>,
    pub actual_stop: Option<BigDecimal>,
    pub actual_target: Option<BigDecimal>,
    pub risk_percent: Option<BigDecimal>,
    pub planned_rr: Option<BigDecimal>,
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

impl UpdateTrade {
    /// PATCH 不允许空操作，diesel 对空 changeset 会直接报错
    pub fn is_empty(&self) -> bool {
        self.asset.is_none()
            && self.strategy.is_none()
            && self.session.is_none()
            && self.condition.is_none()
            && self.bias.is_none()
            && self.outcome.is_none()
            && self.r_achieved.is_none()
            && self.pl_amt.is_none()
            && self.context_tf.is_none()
            && self.entry_tf.is_none()
            && self.analysis_tf.is_none()
            && self.planned_entry.is_none()
            && self.planned_stop.is_none()
            && self.planned_target.is_none()
            && self.actual_entry.is_none()
            && self.actual_stop.is_none()
            && self.actual_target.is_none()
            && self.risk_percent.is_none()
            && self.planned_rr.is_none()
            && self.achieved_rr.is_none()
            && self.pips.is_none()
            && self.lot_size.is_none()
            && self.order_type.is_none()
            && self.entry_method.is_none()
            && self.exit_strategy.is_none()
            && self.break_even_applied.is_none()
            && self.market_alignment.is_none()
            && self.setup_clarity.is_none()
            && self.entry_precision.is_none()
            && self.confluence.is_none()
            && self.timing_quality.is_none()
            && self.confidence.is_none()
            && self.focus.is_none()
            && self.stress.is_none()
            && self.emotional_state.is_none()
            && self.rules_followed.is_none()
            && self.forced_trade.is_none()
            && self.missed_setup.is_none()
            && self.overtraded.is_none()
            && self.documented.is_none()
            && self.worth_repeating.is_none()
            && self.what_worked.is_none()
            && self.what_failed.is_none()
            && self.adjustments.is_none()
            && self.image_url.is_none()
    }
}
