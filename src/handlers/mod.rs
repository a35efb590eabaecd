pub mod language;
pub mod translation;

pub async fn health() -> &'static str {
    "Translation tracker is running"
}
