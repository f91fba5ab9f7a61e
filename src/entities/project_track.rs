use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "project_track")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_no: i32,
    pub entry_date: Option<String>,
    pub client: Option<String>,
    pub project_name: Option<String>,
    pub category: Option<String>,
    pub scanned_by: Option<String>,
    pub target_delivery_date: Option<String>,
    pub actual_delivery_date: Option<String>,
    pub description: Option<String>,
    pub levels: Option<String>,
    pub dwg: Option<String>,
    pub template: Option<String>,
    pub revit_version: Option<String>,
    pub arch_emd: Option<String>,
    pub google_earth_link: Option<String>,
    pub mep_emd_tier: Option<String>,
    pub comments: Option<String>,
    pub file_sharing: Option<String>,
    pub scanning_date: Option<String>,
    pub pdf: Option<String>,
    pub attachments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
