//! Typed endpoint groups
//!
//! Thin wrappers that pair a static [`Endpoint`] with an options struct and
//! run it through a [`Session`]. Option fields left as `None` are not sent;
//! whatever an options struct serializes is still filtered against the
//! endpoint's parameter lists.

mod cellular_gateway;
mod insight;

pub use cellular_gateway::{
    CellularGateway, ConnectivityMonitoringDestinationsOptions, DhcpOptions, LanOptions,
    PortForwardingRulesOptions, SubnetPoolOptions, UplinkOptions, UplinkStatusesOptions,
};
pub use insight::{
    ApplicationHealthOptions, CreateMonitoredMediaServer, Insight, UpdateMonitoredMediaServer,
};

use crate::config::Settings;
use crate::error::Result;
use crate::http::Session;
use crate::request::Endpoint;
use crate::types::{Direction, JsonValue, TotalPages};
use serde::Serialize;

/// A session plus accessors for each endpoint group
#[derive(Debug, Clone)]
pub struct DashboardApi {
    session: Session,
}

impl DashboardApi {
    /// Wrap an existing session
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Session with default settings and a bearer API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Session::with_api_key(api_key)?))
    }

    /// Session built from settings
    pub fn from_settings(settings: Settings) -> Result<Self> {
        Ok(Self::new(settings.into_session()?))
    }

    /// The underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Insight endpoints
    pub fn insight(&self) -> Insight<'_> {
        Insight::new(&self.session)
    }

    /// Cellular gateway (MG) endpoints
    pub fn cellular_gateway(&self) -> CellularGateway<'_> {
        CellularGateway::new(&self.session)
    }
}

/// Run a single-call endpoint and return its body
async fn call<T: Serialize + ?Sized>(
    session: &Session,
    endpoint: &Endpoint,
    path_args: &[(&str, &str)],
    options: &T,
) -> Result<JsonValue> {
    let request = endpoint.request(path_args, options)?;
    Ok(session.execute(&request).await?.into_body())
}

/// Run a list endpoint across pages
async fn call_pages<T: Serialize + ?Sized>(
    session: &Session,
    endpoint: &Endpoint,
    path_args: &[(&str, &str)],
    options: &T,
    total_pages: TotalPages,
    direction: Direction,
) -> Result<Vec<JsonValue>> {
    let request = endpoint.request(path_args, options)?;
    session
        .execute_paginated(&request, total_pages, direction)
        .await
}
