//! The endpoint for listing the fixed spending categories.

use axum::Json;

use crate::models::Category;

/// List the fixed categories that transactions and budgets can use.
pub async fn get_categories() -> Json<&'static [Category]> {
    Json(Category::all())
}
