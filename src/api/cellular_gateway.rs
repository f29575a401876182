//! Cellular gateway (MG) endpoints

use super::{call, call_pages};
use crate::error::Result;
use crate::http::Session;
use crate::request::Endpoint;
use crate::types::{Direction, JsonValue, Method, TotalPages};
use serde::Serialize;

const LAN_PATH: &str = "/devices/{serial}/cellularGateway/lan";
const PORT_FORWARDING_PATH: &str = "/devices/{serial}/cellularGateway/portForwardingRules";
const DESTINATIONS_PATH: &str =
    "/networks/{networkId}/cellularGateway/connectivityMonitoringDestinations";
const DHCP_PATH: &str = "/networks/{networkId}/cellularGateway/dhcp";
const SUBNET_POOL_PATH: &str = "/networks/{networkId}/cellularGateway/subnetPool";
const UPLINK_PATH: &str = "/networks/{networkId}/cellularGateway/uplink";

const fn configure(
    operation: &'static str,
    tags: &'static [&'static str],
    method: Method,
    path: &'static str,
    body_params: &'static [&'static str],
) -> Endpoint {
    Endpoint {
        operation,
        tags,
        method,
        path,
        query_params: &[],
        body_params,
        array_params: &[],
    }
}

const GET_LAN: Endpoint = configure(
    "getDeviceCellularGatewayLan",
    &["cellularGateway", "configure", "lan"],
    Method::GET,
    LAN_PATH,
    &[],
);

const UPDATE_LAN: Endpoint = configure(
    "updateDeviceCellularGatewayLan",
    &["cellularGateway", "configure", "lan"],
    Method::PUT,
    LAN_PATH,
    &["reservedIpRanges", "fixedIpAssignments"],
);

const GET_PORT_FORWARDING_RULES: Endpoint = configure(
    "getDeviceCellularGatewayPortForwardingRules",
    &["cellularGateway", "configure", "portForwardingRules"],
    Method::GET,
    PORT_FORWARDING_PATH,
    &[],
);

const UPDATE_PORT_FORWARDING_RULES: Endpoint = configure(
    "updateDeviceCellularGatewayPortForwardingRules",
    &["cellularGateway", "configure", "portForwardingRules"],
    Method::PUT,
    PORT_FORWARDING_PATH,
    &["rules"],
);

const GET_DESTINATIONS: Endpoint = configure(
    "getNetworkCellularGatewayConnectivityMonitoringDestinations",
    &["cellularGateway", "configure", "connectivityMonitoringDestinations"],
    Method::GET,
    DESTINATIONS_PATH,
    &[],
);

const UPDATE_DESTINATIONS: Endpoint = configure(
    "updateNetworkCellularGatewayConnectivityMonitoringDestinations",
    &["cellularGateway", "configure", "connectivityMonitoringDestinations"],
    Method::PUT,
    DESTINATIONS_PATH,
    &["destinations"],
);

const GET_DHCP: Endpoint = configure(
    "getNetworkCellularGatewayDhcp",
    &["cellularGateway", "configure", "dhcp"],
    Method::GET,
    DHCP_PATH,
    &[],
);

const UPDATE_DHCP: Endpoint = configure(
    "updateNetworkCellularGatewayDhcp",
    &["cellularGateway", "configure", "dhcp"],
    Method::PUT,
    DHCP_PATH,
    &["dhcpLeaseTime", "dnsNameservers", "dnsCustomNameservers"],
);

const GET_SUBNET_POOL: Endpoint = configure(
    "getNetworkCellularGatewaySubnetPool",
    &["cellularGateway", "configure", "subnetPool"],
    Method::GET,
    SUBNET_POOL_PATH,
    &[],
);

const UPDATE_SUBNET_POOL: Endpoint = configure(
    "updateNetworkCellularGatewaySubnetPool",
    &["cellularGateway", "configure", "subnetPool"],
    Method::PUT,
    SUBNET_POOL_PATH,
    &["mask", "cidr"],
);

const GET_UPLINK: Endpoint = configure(
    "getNetworkCellularGatewayUplink",
    &["cellularGateway", "configure", "uplink"],
    Method::GET,
    UPLINK_PATH,
    &[],
);

const UPDATE_UPLINK: Endpoint = configure(
    "updateNetworkCellularGatewayUplink",
    &["cellularGateway", "configure", "uplink"],
    Method::PUT,
    UPLINK_PATH,
    &["bandwidthLimits"],
);

const GET_UPLINK_STATUSES: Endpoint = Endpoint {
    operation: "getOrganizationCellularGatewayUplinkStatuses",
    tags: &["cellularGateway", "monitor", "uplink", "statuses"],
    method: Method::GET,
    path: "/organizations/{organizationId}/cellularGateway/uplink/statuses",
    query_params: &[
        "perPage",
        "startingAfter",
        "endingBefore",
        "networkIds",
        "serials",
        "iccids",
    ],
    body_params: &[],
    array_params: &["networkIds", "serials", "iccids"],
};

/// LAN settings of one MG
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanOptions {
    /// Reserved IP ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_ip_ranges: Option<Vec<JsonValue>>,
    /// Fixed IP assignments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ip_assignments: Option<Vec<JsonValue>>,
}

/// Port forwarding rules of one MG
#[derive(Debug, Clone, Default, Serialize)]
pub struct PortForwardingRulesOptions {
    /// Forwarding rules; replaces the current list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<JsonValue>>,
}

/// Connectivity testing destinations of an MG network
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectivityMonitoringDestinationsOptions {
    /// Destinations; replaces the current list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<JsonValue>>,
}

/// Common DHCP settings of an MG network
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpOptions {
    /// `30 minutes`, `1 hour`, `4 hours`, `12 hours`, `1 day` or `1 week`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhcp_lease_time: Option<String>,
    /// `upstream_dns`, `google_dns`, `opendns` or `custom`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_nameservers: Option<String>,
    /// Name servers used when `dns_nameservers` is `custom`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_custom_nameservers: Option<Vec<String>>,
}

/// Subnet pool of an MG network
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubnetPoolOptions {
    /// Mask of each MG subnet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<u32>,
    /// CIDR of the pool the subnets are taken from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

/// Uplink settings of an MG network
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkOptions {
    /// Bandwidth settings for the cellular uplink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limits: Option<JsonValue>,
}

/// Filters for organization-wide uplink statuses
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkStatusesOptions {
    /// Entries per page, 3 to 1000
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Server cursor; normally set by the pager
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Server cursor; normally set by the pager
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    /// Only these networks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_ids: Option<Vec<String>>,
    /// Only these serials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serials: Option<Vec<String>>,
    /// Only these ICCIDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iccids: Option<Vec<String>>,
}

/// Cellular gateway endpoint group
#[derive(Debug, Clone, Copy)]
pub struct CellularGateway<'a> {
    session: &'a Session,
}

impl<'a> CellularGateway<'a> {
    /// Endpoints bound to `session`
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// LAN settings of an MG
    pub async fn get_device_cellular_gateway_lan(&self, serial: &str) -> Result<JsonValue> {
        call(self.session, &GET_LAN, &[("serial", serial)], &()).await
    }

    /// Update LAN settings of an MG
    pub async fn update_device_cellular_gateway_lan(
        &self,
        serial: &str,
        options: &LanOptions,
    ) -> Result<JsonValue> {
        call(self.session, &UPDATE_LAN, &[("serial", serial)], options).await
    }

    /// Port forwarding rules of an MG
    pub async fn get_device_cellular_gateway_port_forwarding_rules(
        &self,
        serial: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_PORT_FORWARDING_RULES,
            &[("serial", serial)],
            &(),
        )
        .await
    }

    /// Replace port forwarding rules of an MG
    pub async fn update_device_cellular_gateway_port_forwarding_rules(
        &self,
        serial: &str,
        options: &PortForwardingRulesOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_PORT_FORWARDING_RULES,
            &[("serial", serial)],
            options,
        )
        .await
    }

    /// Connectivity testing destinations of an MG network
    pub async fn get_network_cellular_gateway_connectivity_monitoring_destinations(
        &self,
        network_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_DESTINATIONS,
            &[("networkId", network_id)],
            &(),
        )
        .await
    }

    /// Replace connectivity testing destinations of an MG network
    pub async fn update_network_cellular_gateway_connectivity_monitoring_destinations(
        &self,
        network_id: &str,
        options: &ConnectivityMonitoringDestinationsOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_DESTINATIONS,
            &[("networkId", network_id)],
            options,
        )
        .await
    }

    /// Common DHCP settings of an MG network
    pub async fn get_network_cellular_gateway_dhcp(&self, network_id: &str) -> Result<JsonValue> {
        call(self.session, &GET_DHCP, &[("networkId", network_id)], &()).await
    }

    /// Update common DHCP settings of an MG network
    pub async fn update_network_cellular_gateway_dhcp(
        &self,
        network_id: &str,
        options: &DhcpOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_DHCP,
            &[("networkId", network_id)],
            options,
        )
        .await
    }

    /// Subnet pool of an MG network
    pub async fn get_network_cellular_gateway_subnet_pool(
        &self,
        network_id: &str,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &GET_SUBNET_POOL,
            &[("networkId", network_id)],
            &(),
        )
        .await
    }

    /// Update the subnet pool of an MG network
    pub async fn update_network_cellular_gateway_subnet_pool(
        &self,
        network_id: &str,
        options: &SubnetPoolOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_SUBNET_POOL,
            &[("networkId", network_id)],
            options,
        )
        .await
    }

    /// Uplink settings of an MG network
    pub async fn get_network_cellular_gateway_uplink(&self, network_id: &str) -> Result<JsonValue> {
        call(self.session, &GET_UPLINK, &[("networkId", network_id)], &()).await
    }

    /// Update uplink settings of an MG network
    pub async fn update_network_cellular_gateway_uplink(
        &self,
        network_id: &str,
        options: &UplinkOptions,
    ) -> Result<JsonValue> {
        call(
            self.session,
            &UPDATE_UPLINK,
            &[("networkId", network_id)],
            options,
        )
        .await
    }

    /// Uplink status of every MG in an organization, across pages
    pub async fn get_organization_cellular_gateway_uplink_statuses(
        &self,
        organization_id: &str,
        options: &UplinkStatusesOptions,
        total_pages: TotalPages,
        direction: Direction,
    ) -> Result<Vec<JsonValue>> {
        call_pages(
            self.session,
            &GET_UPLINK_STATUSES,
            &[("organizationId", organization_id)],
            options,
            total_pages,
            direction,
        )
        .await
    }
}
