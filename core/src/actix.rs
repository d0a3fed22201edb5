#![deny(missing_docs)]

//! # Actix Web Integration
//!
//! Mounts a frozen [`ApiDocs`] onto an Actix `ServiceConfig`.
//!
//! ```no_run
//! use actix_web::{web, App};
//! # fn docs() -> apidocs_core::ApiDocs { unimplemented!() }
//! let docs = web::Data::new(docs());
//! let app = App::new().configure(|cfg| apidocs_core::actix::configure(cfg, docs.clone()));
//! ```

use crate::serve::{ApiDocs, Served};
use actix_web::http::header;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

/// A per-request CSP nonce. Middleware inserts it into the request extensions; the
/// docs handler stamps it into `index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspNonce(pub String);

/// Registers the docs routes.
pub fn configure(cfg: &mut web::ServiceConfig, docs: web::Data<ApiDocs>) {
    let base = format!("/{}", docs.path());

    if docs.forward_root() {
        cfg.route("/", web::get().to(handle));
    }
    cfg.app_data(docs.clone())
        .route(&base, web::get().to(handle))
        .route(&format!("{}/", base), web::get().to(handle))
        .route(&format!("{}/{{file:.*}}", base), web::get().to(handle));
}

/// Asset sources may read from disk, so lookups run on the blocking thread pool.
async fn handle(req: HttpRequest, docs: web::Data<ApiDocs>) -> HttpResponse {
    let nonce = req.extensions().get::<CspNonce>().map(|n| n.0.clone());
    let path = req.path().to_string();

    match web::block(move || docs.route(&path, nonce.as_deref())).await {
        Ok(served) => into_response(served),
        Err(e) => {
            tracing::warn!(error = %e, "Docs lookup was cancelled.");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Converts a serving outcome into an HTTP response.
pub fn into_response(served: Served) -> HttpResponse {
    match served {
        Served::Redirect(location) => HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish(),
        Served::Json(document) => HttpResponse::Ok().json(document.as_ref()),
        Served::Asset { content_type, body } => {
            HttpResponse::Ok().content_type(content_type).body(body)
        }
        Served::NotFound => HttpResponse::NotFound().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocsConfig, DocumentConfig, Information};
    use crate::route::{ok, HttpMethod, Metadata, Resource};
    use crate::support::ApiDocsBuilder;
    use crate::types::TypeCatalog;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn docs() -> web::Data<ApiDocs> {
        let config = DocsConfig::default()
            .with_forward_root(true)
            .with_openapi(DocumentConfig::new(Information::new("Pets", "1.0")));
        let mut builder = ApiDocsBuilder::new(config, TypeCatalog::new()).unwrap();
        builder
            .route(
                HttpMethod::Get,
                Resource::of::<()>("/ping"),
                Metadata::summary("ping").responds(ok::<String>()),
            )
            .unwrap();
        web::Data::new(builder.build().unwrap())
    }

    #[actix_web::test]
    async fn test_serves_document() {
        let docs = docs();
        let app =
            test::init_service(App::new().configure(|cfg| configure(cfg, docs.clone()))).await;

        let req = test::TestRequest::get().uri("/apidocs/openapi.json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["openapi"], "3.0.0");
        assert_eq!(body["paths"]["/ping"]["get"]["summary"], "ping");
    }

    #[actix_web::test]
    async fn test_redirects_to_index() {
        let docs = docs();
        let app =
            test::init_service(App::new().configure(|cfg| configure(cfg, docs.clone()))).await;

        for uri in ["/", "/apidocs", "/apidocs/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(
                resp.headers().get(header::LOCATION).unwrap(),
                "/apidocs/index.html"
            );
        }
    }

    #[actix_web::test]
    async fn test_missing_asset() {
        let docs = docs();
        let app =
            test::init_service(App::new().configure(|cfg| configure(cfg, docs.clone()))).await;

        let req = test::TestRequest::get().uri("/apidocs/swagger.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
