//! Paramserve - minimal HTTP/1.x file server
//!
//! Serves files from a document root, records submitted form parameters in a
//! shared store and renders them back on report pages.

pub mod config;
pub mod http;
pub mod params;
pub mod server;
pub mod site;
