//! Request handlers behind the connection dispatcher.
//!
//! `Site` routes a parsed request by method:
//!
//! - GET/HEAD: file under the document root (or the admin page)
//! - POST: parameter report, delete-parameter action, otherwise as GET
//! - TRACE: echo of the raw request
//! - OPTIONS/DELETE/PATCH/PUT: 501
//! - anything else: 400

pub mod files;
pub mod pages;

use std::path::PathBuf;

use crate::config::StaticFilesConfig;
use crate::http::mime::content_type_for;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::params::ParameterStore;

pub const PARAMS_REPORT_PATH: &str = "/params_info.html";
pub const ADMIN_PATH: &str = "/bonus.html";
pub const DELETE_PARAMETER_PATH: &str = "/bonus.html/delete-parameter";

const TRACE_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    default_page: String,
    store: ParameterStore,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, default_page: impl Into<String>, store: ParameterStore) -> Self {
        Self {
            root: root.into(),
            default_page: default_page.into(),
            store,
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig, store: ParameterStore) -> Self {
        Self::new(cfg.root.clone(), cfg.default_page.clone(), store)
    }

    pub fn default_page(&self) -> &str {
        &self.default_page
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub async fn handle(&self, request: &Request) -> Response {
        match &request.method {
            Method::GET | Method::HEAD => self.serve_file(request).await,
            Method::POST => self.handle_post(request).await,
            Method::TRACE => {
                Response::ok(TRACE_CONTENT_TYPE, request.full_text.as_bytes().to_vec())
            }
            m if m.is_unimplemented() => Response::not_implemented(),
            _ => Response::bad_request(),
        }
    }

    async fn handle_post(&self, request: &Request) -> Response {
        match request.path.as_str() {
            PARAMS_REPORT_PATH => {
                let html = pages::refresh_params_report(&self.root, &self.store).await;
                Response::ok("text/html", html)
            }
            DELETE_PARAMETER_PATH => self.delete_parameter(request).await,
            _ => self.serve_file(request).await,
        }
    }

    async fn delete_parameter(&self, request: &Request) -> Response {
        let Some(key) = request.param("paramToDelete") else {
            return Response::html(StatusCode::BadRequest, pages::render_missing_parameter());
        };

        self.store.remove(key).await;
        pages::refresh_params_report(&self.root, &self.store).await;

        self.admin_page().await
    }

    async fn admin_page(&self) -> Response {
        let entries = self.store.snapshot().await;
        Response::ok("text/html", pages::render_admin_page(&entries))
    }

    async fn serve_file(&self, request: &Request) -> Response {
        if request.path == ADMIN_PATH {
            return self.admin_page().await;
        }

        match files::read_file(&self.root, &request.path).await {
            Ok(Some(bytes)) => Response::ok(content_type_for(&request.path), bytes),
            Ok(None) => {
                tracing::info!(path = %request.path, "File not found");
                Response::not_found()
            }
            Err(e) => {
                tracing::error!(path = %request.path, error = %e, "Failed to read file");
                Response::internal_error()
            }
        }
    }
}
