#![deny(missing_docs)]

//! # Pet Store Sample
//!
//! A small Actix Web service that documents its own routes with `apidocs-core`.

use actix_web::{get, web, HttpResponse, Responder};
use apidocs_core::{
    created, no_content, not_found, ok, ApiDocs, ApiDocsBuilder, AppResult, DocsConfig,
    DocumentConfig, Example, HttpMethod, Information, Metadata, Resource,
};
use serde_json::json;
use std::sync::{Mutex, PoisonError};

/// Wire types and their catalog.
pub mod models;

use models::{NewPet, Page, Pet, PetPath, PetStatus, PetsQuery, RequestHeaders};

/// In-memory pet storage.
#[derive(Debug, Default)]
pub struct PetStore {
    pets: Mutex<Vec<Pet>>,
}

impl PetStore {
    fn with_pets<R>(&self, f: impl FnOnce(&mut Vec<Pet>) -> R) -> R {
        let mut pets = self.pets.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut pets)
    }
}

/// A simple health check handler.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn list_pets(store: web::Data<PetStore>, query: web::Query<PetsQuery>) -> HttpResponse {
    let limit = query.limit.unwrap_or(20).max(0) as usize;
    let page = store.with_pets(|pets| {
        let matching: Vec<Pet> = pets
            .iter()
            .filter(|p| query.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        Page {
            total: matching.len() as i64,
            items: matching.into_iter().take(limit).collect(),
        }
    });
    HttpResponse::Ok().json(page)
}

async fn create_pet(store: web::Data<PetStore>, body: web::Json<NewPet>) -> HttpResponse {
    let NewPet { name, status } = body.into_inner();
    let pet = store.with_pets(|pets| {
        let pet = Pet {
            id: pets.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            name,
            status: status.unwrap_or(PetStatus::Available),
            tags: Vec::new(),
        };
        pets.push(pet.clone());
        pet
    });
    tracing::info!(id = pet.id, "Pet created.");
    HttpResponse::Created().json(pet)
}

async fn get_pet(store: web::Data<PetStore>, path: web::Path<PetPath>) -> HttpResponse {
    match store.with_pets(|pets| pets.iter().find(|p| p.id == path.id).cloned()) {
        Some(pet) => HttpResponse::Ok().json(pet),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn delete_pet(store: web::Data<PetStore>, path: web::Path<PetPath>) -> HttpResponse {
    let removed = store.with_pets(|pets| {
        let before = pets.len();
        pets.retain(|p| p.id != path.id);
        before != pets.len()
    });
    if removed {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

/// Docs settings used by the binary: both dialects, mounted under `/apidocs`.
pub fn default_config() -> DocsConfig {
    let info = Information::new("Pet Store", "1.0.0")
        .with_description("Sample service documenting itself at startup");
    DocsConfig::default()
        .with_swagger(DocumentConfig::new(info.clone()))
        .with_openapi(DocumentConfig::new(info))
}

/// Registers every pet route and freezes the documents.
pub fn api_docs(config: DocsConfig) -> AppResult<ApiDocs> {
    docs_builder(config)?.build()
}

/// Registers every pet route, leaving the builder open for further settings.
pub fn docs_builder(config: DocsConfig) -> AppResult<ApiDocsBuilder> {
    let mut builder = ApiDocsBuilder::new(config, models::catalog()?)?;

    builder.route(
        HttpMethod::Get,
        Resource::of::<PetsQuery>("/pets").with_group("pets"),
        Metadata::summary("List pets")
            .operation_id("listPets")
            .header::<RequestHeaders>()
            .responds(ok::<Page<Pet>>()),
    )?;
    builder.route_with_body::<NewPet>(
        HttpMethod::Post,
        Resource::of::<()>("/pets").with_group("pets"),
        Metadata::summary("Create a pet")
            .operation_id("createPet")
            .example("rex", Example::new(json!({ "name": "Rex" })).with_summary("Minimal"))
            .responds(created::<Pet>()),
    )?;
    builder.route(
        HttpMethod::Get,
        Resource::of::<PetPath>("/pets/{id}").with_group("pets"),
        Metadata::summary("Find a pet")
            .operation_id("getPet")
            .responds(ok::<Pet>())
            .responds(not_found()),
    )?;
    builder.route(
        HttpMethod::Delete,
        Resource::of::<PetPath>("/pets/{id}").with_group("pets"),
        Metadata::summary("Delete a pet")
            .operation_id("deletePet")
            .responds(no_content())
            .responds(not_found()),
    )?;

    Ok(builder)
}

/// Mounts the pet routes and the docs endpoint.
pub fn configure(
    cfg: &mut web::ServiceConfig,
    store: web::Data<PetStore>,
    docs: web::Data<ApiDocs>,
) {
    cfg.app_data(store)
        .service(health_check)
        .route("/pets", web::get().to(list_pets))
        .route("/pets", web::post().to(create_pet))
        .route("/pets/{id}", web::get().to(get_pet))
        .route("/pets/{id}", web::delete().to(delete_pet));
    apidocs_core::actix::configure(cfg, docs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[::core::prelude::v1::test]
    fn test_api_docs_builds() {
        let docs = api_docs(default_config()).unwrap();
        let openapi = docs.openapi().unwrap();
        assert!(openapi["components"]["schemas"]["PageOfPet"].is_object());
        assert_eq!(
            openapi["paths"]["/pets/{id}"]["delete"]["operationId"],
            "deletePet"
        );
    }

    #[actix_web::test]
    async fn test_create_then_fetch() {
        let store = web::Data::new(PetStore::default());
        let docs = web::Data::new(api_docs(default_config()).unwrap());
        let app = test::init_service(
            App::new().configure(|cfg| configure(cfg, store.clone(), docs.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/pets")
            .set_json(json!({ "name": "Rex" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/pets/1").to_request();
        let pet: Pet = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.status, PetStatus::Available);

        let req = test::TestRequest::delete().uri("/pets/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
