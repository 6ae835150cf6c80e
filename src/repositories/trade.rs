use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::models::{NewTrade, Trade, UpdateTrade};
use crate::schema::trades::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

/// 全量返回，不分页也不过滤，筛选都在调用方内存里做
pub fn list_all(conn: &mut PgPoolConn) -> Result<Vec<Trade>, diesel::result::Error> {
    trades.order(id.asc()).load(conn)
}

pub fn create(conn: &mut PgPoolConn, new_trade: &NewTrade) -> Result<Trade, diesel::result::Error> {
    diesel::insert_into(trades)
        .values(new_trade)
        .get_result(conn)
}

pub fn update_by_id(
    conn: &mut PgPoolConn,
    trade_id: i32,
    changes: &UpdateTrade,
) -> Result<Trade, diesel::result::Error> {
    diesel::update(trades.filter(id.eq(trade_id)))
        .set(changes)
        .get_result(conn)
}

pub fn find_by_id(
    conn: &mut PgPoolConn,
    trade_id: i32,
) -> Result<Option<Trade>, diesel::result::Error> {
    trades
        .filter(id.eq(trade_id))
        .first::<Trade>(conn)
        .optional()
}

/// 无条件删除，目标不存在也算成功
pub fn delete_by_id(conn: &mut PgPoolConn, trade_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(trades.filter(id.eq(trade_id))).execute(conn)
}

pub fn count(conn: &mut PgPoolConn) -> Result<i64, diesel::result::Error> {
    trades.count().get_result(conn)
}

pub fn insert_batch(
    conn: &mut PgPoolConn,
    rows: &[NewTrade],
) -> Result<usize, diesel::result::Error> {
    if rows.is_empty() {
        return Ok(0);
    }
    diesel::insert_into(trades).values(rows).execute(conn)
}
