//! Derived statistics over the full trade history.
//!
//! Every function here is a pure scan over the in-memory trade list and is
//! re-run on each request; nothing is cached or incrementally updated. All
//! divisors are guarded so empty input yields zeros, never NaN.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::models::Trade;
use crate::utils::numeric::decimal_to_f64;

/// 名义起始资金，真实本金没有记录，固定十万作为回撤基准
pub const BASE_BALANCE: f64 = 100_000.0;

fn pl(t: &Trade) -> f64 {
    decimal_to_f64(&t.pl_amt)
}

fn r_multiple(t: &Trade) -> f64 {
    decimal_to_f64(&t.r_achieved)
}

// Undated trades sort to the start of history (epoch 0), matching the
// journal's long-standing ordering behavior.
fn trade_time(t: &Trade) -> NaiveDateTime {
    t.date.unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}

fn chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| trade_time(t));
    sorted
}

/// Peak-to-valley walk over a chronologically sorted subset.
fn max_drawdown(sorted: &[&Trade]) -> f64 {
    let mut balance = BASE_BALANCE;
    let mut peak = BASE_BALANCE;
    let mut max_dd = 0.0;
    for t in sorted {
        balance += pl(t);
        if balance > peak {
            peak = balance;
        }
        let dd = peak - balance;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub net: f64,
    pub win_rate: u32,
    pub expectancy: f64,
    pub profit_factor: f64,
    pub trade_count: usize,
}

pub fn summary(trades: &[Trade]) -> Summary {
    let total = trades.len();
    let net = trades.iter().map(|t| pl(t)).sum::<f64>();
    let wins = trades.iter().filter(|t| t.outcome == "Win").count();
    let expectancy = if total == 0 {
        0.0
    } else {
        round2(trades.iter().map(|t| r_multiple(t)).sum::<f64>() / total as f64)
    };

    let gross_win: f64 = trades.iter().map(|t| pl(t)).filter(|v| *v > 0.0).sum();
    let gross_loss: f64 = trades
        .iter()
        .map(|t| pl(t))
        .filter(|v| *v < 0.0)
        .sum::<f64>()
        .abs();
    // 没有亏损时沿用毛利，避免除零
    let profit_factor = if gross_loss > 0.0 {
        round2(gross_win / gross_loss)
    } else {
        round2(gross_win)
    };

    Summary {
        net,
        win_rate: percent(wins, total),
        expectancy,
        profit_factor,
        trade_count: total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Asset,
    Session,
    Strategy,
    EntryTf,
    Condition,
}

impl Dimension {
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Asset => "asset",
            Dimension::Session => "session",
            Dimension::Strategy => "strategy",
            Dimension::EntryTf => "entryTF",
            Dimension::Condition => "condition",
        }
    }

    fn key(self, t: &Trade) -> String {
        match self {
            Dimension::Asset => t.asset.clone(),
            Dimension::Session => t.session.clone(),
            Dimension::Strategy => t.strategy.clone(),
            Dimension::EntryTf => t.entry_tf.clone().unwrap_or_else(|| "Unknown".to_string()),
            Dimension::Condition => t.condition.clone(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub dimension: String,
    pub max_drawdown: f64,
    pub drawdown_percent: f64,
    pub total_pl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: u32,
}

fn group_stats(key: String, members: Vec<&Trade>) -> GroupStats {
    let mut sorted = members;
    sorted.sort_by_key(|t| trade_time(t));

    let total_pl = sorted.iter().map(|t| pl(t)).sum::<f64>();
    let wins = sorted.iter().filter(|t| t.outcome == "Win").count();
    let losses = sorted.iter().filter(|t| t.outcome == "Loss").count();
    let max_dd = max_drawdown(&sorted);

    GroupStats {
        dimension: key,
        max_drawdown: max_dd,
        drawdown_percent: round2(max_dd / BASE_BALANCE * 100.0),
        total_pl,
        trades: sorted.len(),
        wins,
        losses,
        win_rate: percent(wins, sorted.len()),
    }
}

/// 按单一维度分桶后分别跑回撤走查，按最大回撤从大到小排序
pub fn drawdown_by_dimension(trades: &[Trade], dim: Dimension) -> Vec<GroupStats> {
    let mut buckets: HashMap<String, Vec<&Trade>> = HashMap::new();
    for t in trades {
        buckets.entry(dim.key(t)).or_default().push(t);
    }

    let mut out: Vec<GroupStats> = buckets
        .into_iter()
        .map(|(key, members)| group_stats(key, members))
        .collect();
    out.sort_by(|a, b| {
        b.max_drawdown
            .partial_cmp(&a.max_drawdown)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub month: String,
    pub max_drawdown: f64,
    pub drawdown_percent: f64,
    pub total_pl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: u32,
}

/// 按日历月分桶（"Jan 2024" 这样的键），时间顺序输出。
/// 无日期的交易跟随 epoch 回退，会落进 "Jan 1970"。
pub fn monthly_breakdown(trades: &[Trade]) -> Vec<MonthlyStats> {
    let mut buckets: HashMap<(i32, u32), Vec<&Trade>> = HashMap::new();
    for t in trades {
        let ts = trade_time(t);
        buckets.entry((ts.year(), ts.month())).or_default().push(t);
    }

    let mut keys: Vec<(i32, u32)> = buckets.keys().copied().collect();
    keys.sort_unstable();

    keys.into_iter()
        .map(|key| {
            let members = buckets.remove(&key).unwrap_or_default();
            let label = trade_time(members[0]).format("%b %Y").to_string();
            let g = group_stats(label, members);
            MonthlyStats {
                month: g.dimension,
                max_drawdown: g.max_drawdown,
                drawdown_percent: g.drawdown_percent,
                total_pl: g.total_pl,
                trades: g.trades,
                wins: g.wins,
                losses: g.losses,
                win_rate: g.win_rate,
            }
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AfterLoss {
    pub sample: usize,
    pub wins: usize,
    pub win_rate: u32,
}

/// 亏损后的下一笔表现：统计前一笔为 Loss 的交易里有多少笔赢了
pub fn performance_after_loss(trades: &[Trade]) -> AfterLoss {
    let sorted = chronological(trades);
    let mut sample = 0;
    let mut wins = 0;
    for pair in sorted.windows(2) {
        if pair[0].outcome == "Loss" {
            sample += 1;
            if pair[1].outcome == "Win" {
                wins += 1;
            }
        }
    }
    AfterLoss {
        sample,
        wins,
        win_rate: percent(wins, sample),
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Streaks {
    pub current_outcome: Option<String>,
    pub current_length: u32,
    pub longest_win: u32,
    pub longest_loss: u32,
}

pub fn streaks(trades: &[Trade]) -> Streaks {
    let sorted = chronological(trades);
    let mut longest_win = 0u32;
    let mut longest_loss = 0u32;
    let mut run_outcome: Option<&str> = None;
    let mut run_len = 0u32;

    for t in &sorted {
        if run_outcome == Some(t.outcome.as_str()) {
            run_len += 1;
        } else {
            run_outcome = Some(t.outcome.as_str());
            run_len = 1;
        }
        match t.outcome.as_str() {
            "Win" if run_len > longest_win => longest_win = run_len,
            "Loss" if run_len > longest_loss => longest_loss = run_len,
            _ => {}
        }
    }

    Streaks {
        current_outcome: run_outcome.map(|o| o.to_string()),
        current_length: run_len,
        longest_win,
        longest_loss,
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub score: u32,
    pub expectancy: f64,
    pub rule_stability: f64,
    pub execution_adherence: f64,
    pub friction_impact: f64,
    pub max_drawdown_percent: f64,
    pub sample_size: usize,
}

// 摩擦成本没有单独记录，沿用仪表盘的固定估计值
const FRICTION_IMPACT: f64 = 8.0;

/// 展示用的综合评分，不是统计学意义上的指标。
///
/// 公式形状保持不变：期望值项、规则稳定性/执行一致性/摩擦稳健性的
/// 加权和、回撤生存项，再乘以样本量置信系数，封顶 100。
pub fn audit_score(trades: &[Trade]) -> AuditReport {
    if trades.is_empty() {
        return AuditReport {
            score: 0,
            expectancy: 0.0,
            rule_stability: 0.0,
            execution_adherence: 0.0,
            friction_impact: FRICTION_IMPACT,
            max_drawdown_percent: 0.0,
            sample_size: 0,
        };
    }

    let n = trades.len();
    let expectancy = round2(trades.iter().map(|t| r_multiple(t)).sum::<f64>() / n as f64);

    let rules: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.rules_followed.map(|v| v as f64))
        .collect();
    let rule_stability = if rules.is_empty() {
        100.0
    } else {
        rules.iter().sum::<f64>() / rules.len() as f64
    };

    // 入场精度评分 1-5 换算成百分比，缺省按 80 分
    let precision: Vec<f64> = trades
        .iter()
        .filter_map(|t| t.entry_precision.map(|v| v as f64 * 20.0))
        .collect();
    let execution_adherence = if precision.is_empty() {
        80.0
    } else {
        precision.iter().sum::<f64>() / precision.len() as f64
    };

    let sorted = chronological(trades);
    let dd_percent = round2(max_drawdown(&sorted) / BASE_BALANCE * 100.0);

    let math = if expectancy > 0.0 { expectancy * 45.0 } else { 0.0 };
    let robustness = rule_stability * 0.4
        + execution_adherence * 0.4
        + (100.0 - FRICTION_IMPACT) * 0.2;
    let survival = (100.0 - dd_percent * 4.0).max(0.0);
    let sample_factor = (n as f64 / 500.0).min(1.0);

    let score = ((math * 0.4 + robustness * 0.3 + survival * 0.3)
        * (0.85 + 0.15 * sample_factor))
        .round()
        .min(100.0) as u32;

    AuditReport {
        score,
        expectancy,
        rule_stability: round2(rule_stability),
        execution_adherence: round2(execution_adherence),
        friction_impact: FRICTION_IMPACT,
        max_drawdown_percent: dd_percent,
        sample_size: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::decimal_from_f64;
    use chrono::NaiveDate;

    fn trade_on(day: u32, outcome: &str, r: f64, pl: f64) -> Trade {
        Trade {
            id: day as i32,
            asset: "EURUSD".to_string(),
            strategy: "SMC Breaker".to_string(),
            session: "London".to_string(),
            condition: "Trending".to_string(),
            bias: "Bullish".to_string(),
            outcome: outcome.to_string(),
            r_achieved: decimal_from_f64(r),
            pl_amt: decimal_from_f64(pl),
            context_tf: Some("D1".to_string()),
            entry_tf: Some("M5".to_string()),
            analysis_tf: Some("H1".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            planned_entry: None,
            planned_stop: None,
            planned_target: None,
            actual_entry: None,
            actual_stop: None,
            actual_target: None,
            risk_percent: None,
            planned_rr: None,
            achieved_rr: None,
            pips: None,
            lot_size: None,
            order_type: None,
            entry_method: None,
            exit_strategy: None,
            break_even_applied: None,
            market_alignment: None,
            setup_clarity: None,
            entry_precision: None,
            confluence: None,
            timing_quality: None,
            confidence: None,
            focus: None,
            stress: None,
            emotional_state: None,
            rules_followed: None,
            forced_trade: None,
            missed_setup: None,
            overtraded: None,
            documented: None,
            worth_repeating: None,
            what_worked: None,
            what_failed: None,
            adjustments: None,
            image_url: None,
        }
    }

    #[test]
    fn empty_input_yields_zeros() {
        let s = summary(&[]);
        assert_eq!(s.net, 0.0);
        assert_eq!(s.win_rate, 0);
        assert_eq!(s.expectancy, 0.0);
        assert_eq!(s.profit_factor, 0.0);
        assert_eq!(s.trade_count, 0);
        assert!(drawdown_by_dimension(&[], Dimension::Session).is_empty());
        assert!(monthly_breakdown(&[]).is_empty());
        assert_eq!(performance_after_loss(&[]).win_rate, 0);
        assert_eq!(audit_score(&[]).score, 0);
    }

    #[test]
    fn win_rate_is_rounded_ratio() {
        let trades = vec![
            trade_on(1, "Win", 2.0, 400.0),
            trade_on(2, "Loss", -1.0, -200.0),
            trade_on(3, "Loss", -1.0, -200.0),
        ];
        let s = summary(&trades);
        // round(100 * 1/3) = 33
        assert_eq!(s.win_rate, 33);
        assert!(s.win_rate <= 100);
    }

    #[test]
    fn expectancy_is_mean_r_two_decimals() {
        let trades = vec![
            trade_on(1, "Win", 4.5, 900.0),
            trade_on(2, "Win", 5.0, 1500.0),
            trade_on(3, "Loss", -1.0, -300.0),
        ];
        let s = summary(&trades);
        assert_eq!(s.expectancy, 2.83); // (4.5 + 5.0 - 1.0) / 3
        assert_eq!(s.net, 2100.0);
    }

    #[test]
    fn profit_factor_with_and_without_losses() {
        let trades = vec![
            trade_on(1, "Win", 2.0, 1000.0),
            trade_on(2, "Loss", -1.0, -400.0),
        ];
        assert_eq!(summary(&trades).profit_factor, 2.5);

        let no_losses = vec![trade_on(1, "Win", 2.0, 1000.0)];
        assert_eq!(summary(&no_losses).profit_factor, 1000.0);
    }

    #[test]
    fn drawdown_walk_gain_loss_gain() {
        // +500, -800, +200 from a 100k base:
        // peak 100500 -> balance 99700 (dd 800) -> 99900 (dd still 800)
        let trades = vec![
            trade_on(1, "Win", 1.0, 500.0),
            trade_on(5, "Loss", -1.6, -800.0),
            trade_on(10, "Win", 0.4, 200.0),
        ];
        let groups = drawdown_by_dimension(&trades, Dimension::Asset);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].max_drawdown, 800.0);
        assert_eq!(groups[0].drawdown_percent, 0.8);
    }

    #[test]
    fn drawdown_grows_through_losing_streak_and_peak_resets_upward() {
        let trades = vec![
            trade_on(1, "Loss", -1.0, -100.0),
            trade_on(2, "Loss", -1.0, -200.0),
            trade_on(3, "Loss", -1.0, -300.0),
        ];
        let g = &drawdown_by_dimension(&trades, Dimension::Asset)[0];
        assert_eq!(g.max_drawdown, 600.0);

        // recovering above the old peak moves the peak up, and a later
        // smaller dip does not shrink the recorded max drawdown
        let trades = vec![
            trade_on(1, "Loss", -1.0, -500.0),
            trade_on(2, "Win", 3.0, 1500.0),
            trade_on(3, "Loss", -1.0, -200.0),
        ];
        let g = &drawdown_by_dimension(&trades, Dimension::Asset)[0];
        assert_eq!(g.max_drawdown, 500.0);
    }

    #[test]
    fn dimension_grouping_splits_and_sorts_by_drawdown() {
        let mut ny = trade_on(1, "Loss", -2.0, -900.0);
        ny.session = "New York".to_string();
        let trades = vec![
            trade_on(2, "Win", 2.0, 400.0),
            trade_on(3, "Loss", -1.0, -100.0),
            ny,
        ];
        let groups = drawdown_by_dimension(&trades, Dimension::Session);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].dimension, "New York");
        assert_eq!(groups[0].max_drawdown, 900.0);
        assert_eq!(groups[1].dimension, "London");
        assert_eq!(groups[1].wins, 1);
        assert_eq!(groups[1].losses, 1);
        assert_eq!(groups[1].win_rate, 50);
    }

    #[test]
    fn missing_entry_tf_buckets_as_unknown() {
        let mut t = trade_on(1, "Win", 1.0, 100.0);
        t.entry_tf = None;
        let groups = drawdown_by_dimension(&[t], Dimension::EntryTf);
        assert_eq!(groups[0].dimension, "Unknown");
    }

    #[test]
    fn monthly_buckets_are_chronological() {
        let mut feb = trade_on(3, "Win", 1.0, 250.0);
        feb.date = NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0);
        let trades = vec![feb, trade_on(1, "Win", 2.0, 500.0)];
        let months = monthly_breakdown(&trades);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "Jan 2024");
        assert_eq!(months[1].month, "Feb 2024");
        assert_eq!(months[0].total_pl, 500.0);
    }

    #[test]
    fn undated_trades_fall_back_to_epoch_bucket() {
        let mut t = trade_on(1, "Win", 1.0, 100.0);
        t.date = None;
        let months = monthly_breakdown(&[t, trade_on(2, "Loss", -1.0, -50.0)]);
        assert_eq!(months[0].month, "Jan 1970");
        assert_eq!(months[1].month, "Jan 2024");
    }

    #[test]
    fn after_loss_counts_conditioned_subsequence() {
        let trades = vec![
            trade_on(1, "Win", 1.0, 100.0),
            trade_on(2, "Loss", -1.0, -100.0),
            trade_on(3, "Win", 1.0, 100.0),
            trade_on(4, "Loss", -1.0, -100.0),
            trade_on(5, "Loss", -1.0, -100.0),
            trade_on(6, "Win", 1.0, 100.0),
        ];
        let after = performance_after_loss(&trades);
        assert_eq!(after.sample, 3);
        assert_eq!(after.wins, 2);
        assert_eq!(after.win_rate, 67);
    }

    #[test]
    fn streak_tracking() {
        let trades = vec![
            trade_on(1, "Win", 1.0, 100.0),
            trade_on(2, "Win", 1.0, 100.0),
            trade_on(3, "Loss", -1.0, -100.0),
        ];
        let s = streaks(&trades);
        assert_eq!(s.current_outcome.as_deref(), Some("Loss"));
        assert_eq!(s.current_length, 1);
        assert_eq!(s.longest_win, 2);
        assert_eq!(s.longest_loss, 1);
    }

    #[test]
    fn audit_score_is_capped_and_uses_sample_confidence() {
        let mut trades = Vec::new();
        for day in 1..=28 {
            let mut t = trade_on(day, "Win", 3.0, 600.0);
            t.rules_followed = Some(95);
            t.entry_precision = Some(4);
            trades.push(t);
        }
        let report = audit_score(&trades);
        assert!(report.score <= 100);
        assert!(report.score > 0);
        assert_eq!(report.expectancy, 3.0);
        assert_eq!(report.rule_stability, 95.0);
        assert_eq!(report.execution_adherence, 80.0);
        assert_eq!(report.sample_size, 28);
    }

    #[test]
    fn negative_expectancy_zeroes_the_math_term() {
        let a = audit_score(&[trade_on(1, "Loss", -1.0, -100.0)]);
        let b = audit_score(&[trade_on(1, "Win", 2.0, 100.0)]);
        assert!(a.score < b.score);
    }
}
