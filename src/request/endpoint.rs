//! Static endpoint metadata

use super::descriptor::{Metadata, RequestDescriptor};
use crate::error::Result;
use crate::params::{body_params, query_params, to_candidates};
use crate::path::render_path;
use crate::types::Method;
use serde::Serialize;

/// Declaration of one API operation
///
/// Endpoints are `const` values; building a request only borrows them.
///
/// ```
/// use meraki_dashboard::request::Endpoint;
/// use meraki_dashboard::types::Method;
///
/// const LAN: Endpoint = Endpoint {
///     operation: "getDeviceCellularGatewayLan",
///     tags: &["cellularGateway", "configure", "lan"],
///     method: Method::GET,
///     path: "/devices/{serial}/cellularGateway/lan",
///     query_params: &[],
///     body_params: &[],
///     array_params: &[],
/// };
///
/// let request = LAN.request(&[("serial", "Q2XX-1")], &()).unwrap();
/// assert_eq!(request.path(), "/devices/Q2XX-1/cellularGateway/lan");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name
    pub operation: &'static str,
    /// Catalog tags
    pub tags: &'static [&'static str],
    /// HTTP method
    pub method: Method,
    /// Path template with `{name}` placeholders
    pub path: &'static str,
    /// Accepted query parameter names
    pub query_params: &'static [&'static str],
    /// Accepted body parameter names
    pub body_params: &'static [&'static str],
    /// Query parameters sent as `name[]` lists
    pub array_params: &'static [&'static str],
}

impl Endpoint {
    /// Operation metadata for this endpoint
    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.operation).with_tags(self.tags.iter().copied())
    }

    /// Build a request descriptor
    ///
    /// `path_args` fill the path template. `options` is any serializable set
    /// of named arguments; only names this endpoint declares are forwarded.
    pub fn request<T: Serialize + ?Sized>(
        &self,
        path_args: &[(&str, &str)],
        options: &T,
    ) -> Result<RequestDescriptor> {
        let path = render_path(self.path, path_args)?;
        let candidates = to_candidates(options)?;

        let mut request = RequestDescriptor::new(self.method, path, self.metadata())
            .with_query(query_params(
                &candidates,
                self.query_params,
                self.array_params,
            ));
        if let Some(body) = body_params(&candidates, self.body_params) {
            request = request.with_body(body);
        }

        Ok(request)
    }
}
