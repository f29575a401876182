//! Insight endpoints

use super::call;
use crate::error::Result;
use crate::http::Session;
use crate::request::Endpoint;
use crate::types::{JsonValue, Method};
use serde::Serialize;

const TAGS_APPLICATIONS: &[&str] = &["insight", "configure", "applications"];
const TAGS_MEDIA_SERVERS: &[&str] = &["insight", "configure", "monitoredMediaServers"];
const MEDIA_SERVER_BODY: &[&str] = &["name", "address", "bestEffortMonitoringEnabled"];
const MEDIA_SERVERS_PATH: &str = "/organizations/{organizationId}/insight/monitoredMediaServers";
const MEDIA_SERVER_PATH: &str =
    "/organizations/{organizationId}/insight/monitoredMediaServers/{monitoredMediaServerId}";

const GET_APPLICATION_HEALTH_BY_TIME: Endpoint = Endpoint {
    operation: "getNetworkInsightApplicationHealthByTime",
    tags: &["insight", "monitor", "applications", "healthByTime"],
    method: Method::GET,
    path: "/networks/{networkId}/insight/applications/{applicationId}/healthByTime",
    query_params: &["t0", "t1", "timespan", "resolution"],
    body_params: &[],
    array_params: &[],
};

const GET_APPLICATIONS: Endpoint = Endpoint {
    operation: "getOrganizationInsightApplications",
    tags: TAGS_APPLICATIONS,
    method: Method::GET,
    path: "/organizations/{organizationId}/insight/applications",
    query_params: &[],
    body_params: &[],
    array_params: &[],
};

const GET_MEDIA_SERVERS: Endpoint = Endpoint {
    operation: "getOrganizationInsightMonitoredMediaServers",
    tags: TAGS_MEDIA_SERVERS,
    method: Method::GET,
    path: MEDIA_SERVERS_PATH,
    query_params: &[],
    body_params: &[],
    array_params: &[],
};

const CREATE_MEDIA_SERVER: Endpoint = Endpoint {
    operation: "createOrganizationInsightMonitoredMediaServer",
    tags: TAGS_MEDIA_SERVERS,
    method: Method::POST,
    path: MEDIA_SERVERS_PATH,
    query_params: &[],
    body_params: MEDIA_SERVER_BODY,
    array_params: &[],
};

const GET_MEDIA_SERVER: Endpoint = Endpoint {
    operation: "getOrganizationInsightMonitoredMediaServer",
    tags: TAGS_MEDIA_SERVERS,
    method: Method::GET,
    path: MEDIA_SERVER_PATH,
    query_params: &[],
    body_params: &[],
    array_params: &[],
};

const UPDATE_MEDIA_SERVER: Endpoint = Endpoint {
    operation: "updateOrganizationInsightMonitoredMediaServer",
    tags: TAGS_MEDIA_SERVERS,
    method: Method::PUT,
    path: MEDIA_SERVER_PATH,
    query_params: &[],
    body_params: MEDIA_SERVER_BODY,
    array_params: &[],
};

const DELETE_MEDIA_SERVER: Endpoint = Endpoint {
    operation: "deleteOrganizationInsightMonitoredMediaServer",
    tags: TAGS_MEDIA_SERVERS,
    method: Method::DELETE,
    path: MEDIA_SERVER_PATH,
    query_params: &[],
    body_params: &[],
    array_params: &[],
};

/// Query options for application health by time
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHealthOptions {
    /// Start of the timespan (ISO 8601); at most 7 days back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t0: Option<String>,
    /// End of the timespan; at most 7 days after `t0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t1: Option<String>,
    /// Timespan in seconds, instead of `t0`/`t1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timespan: Option<u32>,
    /// Resolution in seconds: 60, 300, 3600 or 86400
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<u32>,
}

/// Body for adding a monitored media server
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMonitoredMediaServer {
    /// Name of the VoIP provider
    pub name: String,
    /// IPv4 address or hostname of the media server
    pub address: String,
    /// Fall back to the nearest hop when the server ignores ICMP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_effort_monitoring_enabled: Option<bool>,
}

impl CreateMonitoredMediaServer {
    /// Media server with the required fields
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            best_effort_monitoring_enabled: None,
        }
    }
}

/// Body for updating a monitored media server
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMonitoredMediaServer {
    /// Name of the VoIP provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// IPv4 address or hostname of the media server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Fall back to the nearest hop when the server ignores ICMP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_effort_monitoring_enabled: Option<bool>,
}

/// Insight endpoint group
#[derive(Debug, Clone, Copy)]
pub struct Insight<'a> {
    session: &'a Session,
}

impl<'a> Insight<'a> {
    /// Endpoints bound to `session`
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Application health by time
    pub async fn get_network_insight_application_health_by_time(
        &self,
        network_id: &str,
        application_id: &str,
        options: &ApplicationHealthOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_APPLICATION_HEALTH_BY_TIME,
            &[("networkId", network_id), ("applicationId", application_id)],
            options,
        )
        .await
    }

    /// All Insight applications of an organization
    pub async fn get_organization_insight_applications(
        &self,
        organization_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_APPLICATIONS,
            &[("organizationId", organization_id)],
            &(),
        )
        .await
    }

    /// Monitored media servers of an organization
    pub async fn get_organization_insight_monitored_media_servers(
        &self,
        organization_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_MEDIA_SERVERS,
            &[("organizationId", organization_id)],
            &(),
        )
        .await
    }

    /// Add a media server to be monitored
    pub async fn create_organization_insight_monitored_media_server(
        &self,
        organization_id: &str,
        server: &CreateMonitoredMediaServer,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &CREATE_MEDIA_SERVER,
            &[("organizationId", organization_id)],
            server,
        )
        .await
    }

    /// One monitored media server
    pub async fn get_organization_insight_monitored_media_server(
        &self,
        organization_id: &str,
        monitored_media_server_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_MEDIA_SERVER,
            &[
                ("organizationId", organization_id),
                ("monitoredMediaServerId", monitored_media_server_id),
            ],
            &(),
        )
        .await
    }

    /// Update a monitored media server
    pub async fn update_organization_insight_monitored_media_server(
        &self,
        organization_id: &str,
        monitored_media_server_id: &str,
        update: &UpdateMonitoredMediaServer,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_MEDIA_SERVER,
            &[
                ("organizationId", organization_id),
                ("monitoredMediaServerId", monitored_media_server_id),
            ],
            update,
        )
        .await
    }

    /// Stop monitoring a media server
    pub async fn delete_organization_insight_monitored_media_server(
        &self,
        organization_id: &str,
        monitored_media_server_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &DELETE_MEDIA_SERVER,
            &[
                ("organizationId", organization_id),
                ("monitoredMediaServerId", monitored_media_server_id),
            ],
            &(),
        )
        .await
    }
}
