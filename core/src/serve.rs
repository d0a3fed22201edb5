#![deny(missing_docs)]

//! # Serving
//!
//! The frozen, read-only documentation endpoint. Documents are rendered once when the
//! builder freezes; requests only read them. UI assets come from an [`AssetSource`] and
//! are patched on the way out (document URL in the initializer, nonces in `index.html`).

use crate::error::AppResult;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// URL the stock UI initializer points at.
const PETSTORE_URL: &str = "https://petstore.swagger.io/v2/swagger.json";

/// The initializer script the default document URL is patched into.
const INITIALIZER: &str = "swagger-initializer.js";

/// Most missing asset names remembered. Further misses are still answered, just not cached.
pub const MAX_CACHED_MISSES: usize = 256;

fn nonce_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(rel="stylesheet"|script src="[^"]*")"#).expect("Invalid regex")
    })
}

/// Where UI assets are read from.
pub trait AssetSource {
    /// Loads an asset by relative name. `Ok(None)` means it does not exist.
    fn load(&self, name: &str) -> AppResult<Option<Vec<u8>>>;
}

/// Serves no UI assets at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load(&self, _name: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(None)
    }
}

/// Serves UI assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Serves files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str) -> AppResult<Option<Vec<u8>>> {
        if name.is_empty() || name.starts_with('/') || name.split('/').any(|seg| seg == "..") {
            return Ok(None);
        }
        match std::fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// The outcome of a documentation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Served {
    /// Redirect to the given location.
    Redirect(String),
    /// A rendered document.
    Json(Arc<Value>),
    /// A UI asset.
    Asset {
        /// MIME type guessed from the extension.
        content_type: &'static str,
        /// Asset bytes after rewriting.
        body: Vec<u8>,
    },
    /// Nothing under that name.
    NotFound,
}

/// Mount settings carried into the frozen endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MountSettings {
    pub(crate) path: String,
    pub(crate) forward_root: bool,
    pub(crate) provide_ui: bool,
    pub(crate) default_file: &'static str,
}

/// The frozen documentation endpoint.
pub struct ApiDocs {
    settings: MountSettings,
    swagger: Option<Arc<Value>>,
    openapi: Option<Arc<Value>>,
    assets: Box<dyn AssetSource + Send + Sync>,
    not_found: Mutex<HashSet<String>>,
}

impl std::fmt::Debug for ApiDocs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiDocs")
            .field("settings", &self.settings)
            .field("swagger", &self.swagger.is_some())
            .field("openapi", &self.openapi.is_some())
            .finish()
    }
}

impl ApiDocs {
    pub(crate) fn new(
        settings: MountSettings,
        swagger: Option<Value>,
        openapi: Option<Value>,
        assets: Box<dyn AssetSource + Send + Sync>,
    ) -> Self {
        Self {
            settings,
            swagger: swagger.map(Arc::new),
            openapi: openapi.map(Arc::new),
            assets,
            not_found: Mutex::new(HashSet::new()),
        }
    }

    /// The rendered Swagger 2.0 document.
    pub fn swagger(&self) -> Option<&Value> {
        self.swagger.as_deref()
    }

    /// The rendered OpenAPI 3.0 document.
    pub fn openapi(&self) -> Option<&Value> {
        self.openapi.as_deref()
    }

    /// Mount path without slashes.
    pub fn path(&self) -> &str {
        &self.settings.path
    }

    /// Whether `/` redirects to the UI.
    pub fn forward_root(&self) -> bool {
        self.settings.forward_root
    }

    /// The document the UI loads by default.
    pub fn default_file(&self) -> &'static str {
        self.settings.default_file
    }

    /// Where the UI entry page lives.
    pub fn index_location(&self) -> String {
        format!("/{}/index.html", self.settings.path)
    }

    /// Resolves a full request path.
    pub fn route(&self, request_path: &str, nonce: Option<&str>) -> Served {
        let base = format!("/{}", self.settings.path);
        if request_path == base
            || request_path == format!("{}/", base)
            || (self.settings.forward_root && request_path == "/")
        {
            return Served::Redirect(self.index_location());
        }

        match request_path.strip_prefix(&format!("{}/", base)) {
            Some(file) => self.serve(file, nonce),
            None => Served::NotFound,
        }
    }

    /// Resolves a file name relative to the mount path.
    pub fn serve(&self, file: &str, nonce: Option<&str>) -> Served {
        match file {
            "swagger.json" => self.swagger.clone().map_or(Served::NotFound, Served::Json),
            "openapi.json" => self.openapi.clone().map_or(Served::NotFound, Served::Json),
            _ if self.settings.provide_ui => self.asset(file, nonce),
            _ => Served::NotFound,
        }
    }

    fn asset(&self, file: &str, nonce: Option<&str>) -> Served {
        if self.not_found().contains(file) {
            return Served::NotFound;
        }

        // Loading runs unlocked; it may block on disk.
        match self.assets.load(file) {
            Ok(Some(bytes)) => Served::Asset {
                content_type: content_type(file),
                body: self.rewrite(file, bytes, nonce),
            },
            Ok(None) => {
                let mut not_found = self.not_found();
                if not_found.len() < MAX_CACHED_MISSES {
                    tracing::debug!(%file, "Asset not found, caching miss.");
                    not_found.insert(file.to_string());
                } else {
                    tracing::debug!(%file, "Asset not found, miss cache full.");
                }
                Served::NotFound
            }
            Err(e) => {
                tracing::warn!(%file, error = %e, "Failed to load asset.");
                Served::NotFound
            }
        }
    }

    fn not_found(&self) -> MutexGuard<'_, HashSet<String>> {
        self.not_found.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rewrite(&self, file: &str, bytes: Vec<u8>, nonce: Option<&str>) -> Vec<u8> {
        if file == INITIALIZER {
            return match String::from_utf8(bytes) {
                Ok(text) => text
                    .replace(PETSTORE_URL, self.settings.default_file)
                    .into_bytes(),
                Err(e) => e.into_bytes(),
            };
        }

        match (file, nonce) {
            ("index.html", Some(nonce)) => match String::from_utf8(bytes) {
                Ok(text) => add_nonce(&text, nonce).into_bytes(),
                Err(e) => e.into_bytes(),
            },
            _ => bytes,
        }
    }
}

/// Appends ` nonce="…"` to stylesheet links and script tags.
pub fn add_nonce(html: &str, nonce: &str) -> String {
    nonce_regex()
        .replace_all(html, |caps: &Captures| {
            format!("{} nonce=\"{}\"", &caps[1], nonce)
        })
        .into_owned()
}

/// MIME type for a file name, by extension.
pub fn content_type(file: &str) -> &'static str {
    match file.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("map") => "application/json",
        _ => "text/html",
    }
}
