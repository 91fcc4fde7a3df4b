//! Gateway layer for the todo services.
//!
//! This module provides the abstraction the UI uses to reach a backend, the
//! HTTP implementation, and the wire schema validated at the boundary.
//!
//! # Modules
//!
//! - `backend`: [`TodoGateway`] trait implemented per backend
//! - `http`: HTTP implementation over `reqwest`
//! - `models`: request bodies and response decoding

pub mod backend;
pub mod http;
pub mod models;

pub use backend::TodoGateway;
pub use http::HttpGateway;

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use crate::domain::{Backend, Result};

/// One gateway per [`Backend`] variant, selected by tag.
///
/// Call sites ask for the gateway of the currently selected backend instead of
/// branching on backend names themselves.
#[derive(Clone)]
pub struct Gateways {
    go: Arc<dyn TodoGateway>,
    java: Arc<dyn TodoGateway>,
}

impl Gateways {
    /// Builds a set from explicit gateway implementations.
    #[must_use]
    pub fn new(go: Arc<dyn TodoGateway>, java: Arc<dyn TodoGateway>) -> Self {
        Self { go, java }
    }

    /// Builds HTTP gateways for both backends under `origin`, sharing `client`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `origin` is not an http(s) URL.
    pub fn http(client: &Client, origin: &Url) -> Result<Self> {
        Ok(Self {
            go: Arc::new(HttpGateway::new(client.clone(), origin, Backend::Go)?),
            java: Arc::new(HttpGateway::new(client.clone(), origin, Backend::Java)?),
        })
    }

    /// Returns the gateway for `backend`.
    #[must_use]
    pub fn get(&self, backend: Backend) -> &dyn TodoGateway {
        match backend {
            Backend::Go => self.go.as_ref(),
            Backend::Java => self.java.as_ref(),
        }
    }
}

impl std::fmt::Debug for Gateways {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateways")
            .field("go", &self.go.backend())
            .field("java", &self.java.backend())
            .finish()
    }
}
