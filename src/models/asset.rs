use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::assets;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Asset {
    pub id: i32,
    pub name: String,
    pub type_: String,
    pub url: String,
    pub size: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = assets)]
pub struct NewAsset {
    pub name: String,
    pub type_: String,
    pub url: String,
    pub size: String,
    pub created_at: Option<NaiveDateTime>,
}
