use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::DbPool;
use crate::models::NewTrade;
use crate::repositories::trade;
use crate::utils::numeric::decimal_from_f64;

fn seed_row(
    asset: &str,
    strategy: &str,
    session: &str,
    bias: &str,
    outcome: &str,
    r: f64,
    pl: f64,
    context_tf: &str,
    entry_tf: &str,
) -> NewTrade {
    NewTrade {
        asset: asset.to_string(),
        strategy: strategy.to_string(),
        session: session.to_string(),
        condition: "Trending".to_string(),
        bias: bias.to_string(),
        outcome: outcome.to_string(),
        r_achieved: decimal_from_f64(r),
        pl_amt: decimal_from_f64(pl),
        context_tf: Some(context_tf.to_string()),
        entry_tf: Some(entry_tf.to_string()),
        analysis_tf: Some("H1".to_string()),
        date: Some(Utc::now().naive_utc()),
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

/// 仅当 trades 表为空时写入演示数据，避免首屏空白
pub fn seed_if_empty(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().context("failed to get DB connection for seeding")?;

    if trade::count(&mut conn)? > 0 {
        return Ok(());
    }

    tracing::info!("Seeding database with initial trades...");
    let rows = vec![
        seed_row("EURUSD", "SMC Breaker", "London", "Bullish", "Win", 4.5, 900.0, "D1", "M5"),
        seed_row("NAS100", "Silver Bullet", "New York", "Bearish", "Win", 5.0, 1500.0, "H4", "M1"),
        seed_row("NAS100", "Silver Bullet", "New York", "Bearish", "Loss", -1.0, -300.0, "H4", "M1"),
    ];
    let inserted = trade::insert_batch(&mut conn, &rows)?;
    tracing::info!("Seeded {} trades", inserted);
    Ok(())
}
