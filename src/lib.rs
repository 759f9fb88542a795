pub mod api_docs;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod scheduling;
pub mod state;
pub mod utils;
pub mod validation;
