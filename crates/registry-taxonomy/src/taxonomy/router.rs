use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Dimension, EntityId, NamedEntityDraft, ProfessionDraft, QualificationDraft};
use super::error::TaxonomyError;
use super::notify::NotificationSink;
use super::service::TaxonomyService;

/// `?q=` filter accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
}

/// Router builder exposing the taxonomy editors over HTTP.
pub fn taxonomy_router<N>(service: Arc<TaxonomyService<N>>) -> Router
where
    N: NotificationSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/taxonomy/dimensions/:dimension",
            get(list_entities_handler::<N>).post(create_entity_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/dimensions/:dimension/:id",
            get(get_entity_handler::<N>)
                .put(update_entity_handler::<N>)
                .delete(remove_entity_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/dimensions/:dimension/:id/toggle",
            post(toggle_entity_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/mappings/:category_id",
            get(linked_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/mappings/:category_id/:subcategory_id/toggle",
            post(toggle_link_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/professions",
            get(list_professions_handler::<N>).post(create_profession_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/professions/options/:category_id",
            get(profession_options_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/professions/:id",
            put(update_profession_handler::<N>).delete(remove_profession_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/professions/:id/toggle",
            post(toggle_profession_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/qualifications",
            get(list_qualifications_handler::<N>).post(create_qualification_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/qualifications/:id",
            put(update_qualification_handler::<N>).delete(remove_qualification_handler::<N>),
        )
        .route(
            "/api/v1/taxonomy/qualifications/:id/toggle",
            post(toggle_qualification_handler::<N>),
        )
        .with_state(service)
}

fn unknown_dimension(slug: &str) -> Response {
    let payload = json!({
        "error": format!("unknown dimension `{slug}`"),
        "dimensions": Dimension::ALL.map(Dimension::slug),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, TaxonomyError>) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(error) => error.into_response(),
    }
}

fn respond_deleted<T>(result: Result<T, TaxonomyError>) -> Response {
    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_entities_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    let records = service.list_entities(dimension, &query.q);
    (StatusCode::OK, Json(records)).into_response()
}

pub(crate) async fn get_entity_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path((slug, id)): Path<(String, u64)>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    respond(StatusCode::OK, service.get_entity(dimension, EntityId(id)))
}

pub(crate) async fn create_entity_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(slug): Path<String>,
    Json(draft): Json<NamedEntityDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    respond(StatusCode::CREATED, service.create_entity(dimension, &draft))
}

pub(crate) async fn update_entity_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path((slug, id)): Path<(String, u64)>,
    Json(draft): Json<NamedEntityDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    respond(
        StatusCode::OK,
        service.update_entity(dimension, EntityId(id), &draft),
    )
}

pub(crate) async fn remove_entity_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path((slug, id)): Path<(String, u64)>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    respond_deleted(service.remove_entity(dimension, EntityId(id)))
}

pub(crate) async fn toggle_entity_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path((slug, id)): Path<(String, u64)>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let Some(dimension) = Dimension::from_slug(&slug) else {
        return unknown_dimension(&slug);
    };
    respond(StatusCode::OK, service.toggle_entity(dimension, EntityId(id)))
}

pub(crate) async fn linked_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(category_id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let category_id = EntityId(category_id);
    let payload = json!({
        "category_id": category_id,
        "subcategory_ids": service.linked(category_id),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn toggle_link_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path((category_id, subcategory_id)): Path<(u64, u64)>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let category_id = EntityId(category_id);
    match service.toggle_link(category_id, EntityId(subcategory_id)) {
        Ok(linked) => {
            let payload = json!({
                "category_id": category_id,
                "subcategory_ids": linked,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn list_professions_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    N: NotificationSink + 'static,
{
    (StatusCode::OK, Json(service.list_professions(&query.q))).into_response()
}

pub(crate) async fn profession_options_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(category_id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    let options = service.profession_options(EntityId(category_id));
    (StatusCode::OK, Json(options)).into_response()
}

pub(crate) async fn create_profession_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Json(draft): Json<ProfessionDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(StatusCode::CREATED, service.create_profession(&draft))
}

pub(crate) async fn update_profession_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
    Json(draft): Json<ProfessionDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(StatusCode::OK, service.update_profession(EntityId(id), &draft))
}

pub(crate) async fn remove_profession_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond_deleted(service.remove_profession(EntityId(id)))
}

pub(crate) async fn toggle_profession_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(StatusCode::OK, service.toggle_profession(EntityId(id)))
}

pub(crate) async fn list_qualifications_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    N: NotificationSink + 'static,
{
    (StatusCode::OK, Json(service.list_qualifications(&query.q))).into_response()
}

pub(crate) async fn create_qualification_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Json(draft): Json<QualificationDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(StatusCode::CREATED, service.create_qualification(&draft))
}

pub(crate) async fn update_qualification_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
    Json(draft): Json<QualificationDraft>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(
        StatusCode::OK,
        service.update_qualification(EntityId(id), &draft),
    )
}

pub(crate) async fn remove_qualification_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond_deleted(service.remove_qualification(EntityId(id)))
}

pub(crate) async fn toggle_qualification_handler<N>(
    State(service): State<Arc<TaxonomyService<N>>>,
    Path(id): Path<u64>,
) -> Response
where
    N: NotificationSink + 'static,
{
    respond(StatusCode::OK, service.toggle_qualification(EntityId(id)))
}
