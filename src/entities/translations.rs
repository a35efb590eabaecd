//! `SeaORM` Entity for the translations table
//!
//! One row per translation job submitted to the provider.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Source text as submitted, trimmed (max 500 chars)
    pub original_string: String,
    /// Provider result; empty until the job completes
    pub translated_string: String,
    /// One of "requested", "pending", "translated"
    pub status: String,
    /// Language code captured at request time (e.g. "en")
    pub source_language: String,
    pub target_language: String,
    /// Provider-assigned job identifier
    #[sea_orm(unique)]
    pub uid: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
