//! Persistence for translation records
//!
//! Every function commits on its own; nothing here spans multiple records in
//! one transaction.

use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{prelude::*, translations};
use crate::error::TranslationError;
use crate::models::translation::TranslationStatus;

/// Insert a freshly submitted translation with status "requested" and no result yet
pub async fn insert_request<C: ConnectionTrait>(
    db: &C,
    original_string: &str,
    uid: &str,
    source_language: &str,
    target_language: &str,
) -> Result<translations::Model, TranslationError> {
    let now = Utc::now().naive_utc();

    let record = translations::ActiveModel {
        original_string: Set(original_string.to_string()),
        translated_string: Set(String::new()),
        status: Set(TranslationStatus::Requested.to_string()),
        source_language: Set(source_language.to_string()),
        target_language: Set(target_language.to_string()),
        uid: Set(uid.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let inserted = record.insert(db).await?;

    tracing::debug!(uid = %inserted.uid, id = inserted.id, "Stored translation request");
    Ok(inserted)
}

pub async fn find_by_uid<C: ConnectionTrait>(
    db: &C,
    uid: &str,
) -> Result<translations::Model, TranslationError> {
    Translations::find()
        .filter(translations::Column::Uid.eq(uid))
        .one(db)
        .await?
        .ok_or_else(|| TranslationError::NotFound(uid.to_string()))
}

/// All translations, longest translated text first
pub async fn list_all<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<translations::Model>, TranslationError> {
    let translated_length: SimpleExpr = Func::cust(Alias::new("LENGTH"))
        .arg(Expr::col(translations::Column::TranslatedString))
        .into();

    let records = Translations::find()
        .order_by(translated_length, Order::Desc)
        .order_by(translations::Column::Id, Order::Asc)
        .all(db)
        .await?;

    Ok(records)
}

/// Translations the provider has not finished yet (status other than "translated")
pub async fn list_non_terminal<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<translations::Model>, TranslationError> {
    let records = Translations::find()
        .filter(translations::Column::Status.ne(TranslationStatus::Translated.to_string()))
        .order_by(translations::Column::Id, Order::Asc)
        .all(db)
        .await?;

    Ok(records)
}

/// Set the status, and the translated text when given, of the translation with `uid`
pub async fn update_translation<C: ConnectionTrait>(
    db: &C,
    uid: &str,
    status: TranslationStatus,
    translated_string: Option<&str>,
) -> Result<(), TranslationError> {
    let mut update = Translations::update_many()
        .col_expr(translations::Column::Status, Expr::value(status.to_string()))
        .col_expr(
            translations::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        );

    if let Some(text) = translated_string {
        update = update.col_expr(translations::Column::TranslatedString, Expr::value(text));
    }

    let result = update
        .filter(translations::Column::Uid.eq(uid))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(TranslationError::NotFound(uid.to_string()));
    }

    Ok(())
}

pub async fn delete_by_uid<C: ConnectionTrait>(db: &C, uid: &str) -> Result<(), TranslationError> {
    let result = Translations::delete_many()
        .filter(translations::Column::Uid.eq(uid))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(TranslationError::NotFound(uid.to_string()));
    }

    tracing::info!(uid = %uid, "Deleted translation");
    Ok(())
}
