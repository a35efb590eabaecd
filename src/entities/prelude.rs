//! `SeaORM` Entity prelude

pub use super::translations::Entity as Translations;
