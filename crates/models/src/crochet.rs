use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "wip")]
    Wip,
    #[sea_orm(string_value = "done")]
    Done,
}

impl Status {
    /// wip <-> done
    pub fn toggled(self) -> Self {
        match self {
            Status::Wip => Status::Done,
            Status::Done => Status::Wip,
        }
    }
}

impl Default for Status {
    fn default() -> Self { Status::Wip }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "crochet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub notes: String,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}
