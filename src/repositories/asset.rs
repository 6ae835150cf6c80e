use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::models::{Asset, NewAsset};
use crate::schema::assets::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn list_all(conn: &mut PgPoolConn) -> Result<Vec<Asset>, diesel::result::Error> {
    assets.order(created_at.desc()).load(conn)
}

pub fn create(conn: &mut PgPoolConn, new_asset: &NewAsset) -> Result<Asset, diesel::result::Error> {
    diesel::insert_into(assets)
        .values(new_asset)
        .get_result(conn)
}

pub fn delete_by_id(conn: &mut PgPoolConn, asset_id: i32) -> Result<usize, diesel::result::Error> {
    diesel::delete(assets.filter(id.eq(asset_id))).execute(conn)
}
