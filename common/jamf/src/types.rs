use serde::Deserialize;

/// One page of `GET /api/v1/computers-inventory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerInventoryPage {
    pub total_count: u64,
    pub results: Vec<Computer>,
}

/// A computer inventory record. Only the general section is requested;
/// everything else the API returns is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Computer {
    pub id: String,
    #[serde(default)]
    pub general: ComputerGeneral,
}

impl Computer {
    pub fn is_managed(&self) -> bool {
        self.general.remote_management.managed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerGeneral {
    #[serde(default)]
    pub remote_management: RemoteManagement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteManagement {
    #[serde(default)]
    pub managed: bool,
}

/// Envelope of `GET /JSSResource/mobiledevices`.
#[derive(Debug, Clone, Deserialize)]
pub struct MobileDeviceListResponse {
    pub mobile_devices: Vec<MobileDevice>,
}

/// A mobile device list record from the Classic API. Classic IDs are
/// integers on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MobileDevice {
    pub id: i64,
    #[serde(default)]
    pub managed: bool,
}

/// Envelope of `GET /JSSResource/computergroups/id/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerGroupResponse {
    pub computer_group: ComputerGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComputerGroup {
    pub id: i64,
    #[serde(default)]
    pub computers: Vec<GroupMember>,
}

/// Envelope of `GET /JSSResource/mobiledevicegroups/id/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MobileDeviceGroupResponse {
    pub mobile_device_group: MobileDeviceGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MobileDeviceGroup {
    pub id: i64,
    #[serde(default)]
    pub mobile_devices: Vec<GroupMember>,
}

/// A static group member; groups only carry IDs we care about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupMember {
    pub id: i64,
}

/// Envelope of `GET /JSSResource/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAccount {
    pub id: i64,
}
