#![deny(missing_docs)]

//! # Pet Store Binary
//!
//! Entry point for the sample Actix Web server.

use actix_web::{web, App, HttpServer};
use apidocs_core::{ApiDocs, DirectoryAssets, DocsConfig};
use apidocs_sample::{configure, default_config, docs_builder, PetStore};
use std::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn build_server(
    listener: TcpListener,
    docs: web::Data<ApiDocs>,
) -> std::io::Result<actix_web::dev::Server> {
    let store = web::Data::new(PetStore::default());
    Ok(HttpServer::new(move || {
        App::new().configure(|cfg| configure(cfg, store.clone(), docs.clone()))
    })
    .listen(listener)?
    .run())
}

fn resolve_bind_addr() -> String {
    std::env::var("APIDOCS_SAMPLE_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

fn load_docs() -> std::io::Result<ApiDocs> {
    let config = match std::env::var("APIDOCS_SAMPLE_CONFIG") {
        Ok(path) => DocsConfig::from_path(path).map_err(std::io::Error::other)?,
        Err(_) => default_config(),
    };

    let mut builder = docs_builder(config).map_err(std::io::Error::other)?;
    if let Ok(dir) = std::env::var("APIDOCS_SAMPLE_UI_DIR") {
        tracing::info!(%dir, "Serving UI assets from disk.");
        builder = builder.with_assets(DirectoryAssets::new(dir));
    }
    builder.build().map_err(std::io::Error::other)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let docs = load_docs()?;

    let bind_addr = resolve_bind_addr();
    let listener = TcpListener::bind(&bind_addr)?;
    tracing::info!(%bind_addr, "Listening.");
    let server = build_server(listener, web::Data::new(docs))?;

    if std::env::var("APIDOCS_SAMPLE_ONESHOT").is_ok() {
        server.handle().stop(true).await;
    }

    server.await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_oneshot() {
        std::env::set_var("APIDOCS_SAMPLE_BIND", "127.0.0.1:0");
        std::env::set_var("APIDOCS_SAMPLE_ONESHOT", "1");

        let res = main();

        std::env::remove_var("APIDOCS_SAMPLE_BIND");
        std::env::remove_var("APIDOCS_SAMPLE_ONESHOT");

        assert!(res.is_ok());
    }

    #[actix_web::test]
    async fn test_build_server_start_stop() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let docs = web::Data::new(load_docs().unwrap());
        let server = build_server(listener, docs).unwrap();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(true).await;
    }
}
