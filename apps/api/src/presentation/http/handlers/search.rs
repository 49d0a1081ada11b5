use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    application::search_product::dto::SearchRequest,
    domain::{analysis::value_objects::SearchQuery, product::entity::ProductInfo},
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn search_product(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ProductInfo>, AppError> {
    request.validate()?;
    let query = SearchQuery::new(&request.search_query)
        .ok_or_else(|| AppError::ValidationError("searchQuery must not be blank".into()))?;

    let info = state.pipeline.search.execute(&query).await?;
    Ok(Json(info))
}
