use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::types::{Computer, ComputerGroup, MobileDevice, MobileDeviceGroup, UserAccount};
use crate::{JamfClient, JamfError};

#[derive(Clone)]
pub struct MockJamfClient {
    computers_ret: Option<Result<Vec<Computer>, JamfError>>,
    mobile_devices_ret: Option<Result<Vec<MobileDevice>, JamfError>>,
    computer_group_ret: HashMap<String, Result<ComputerGroup, JamfError>>,
    mobile_device_group_ret: HashMap<String, Result<MobileDeviceGroup, JamfError>>,
    users_ret: Option<Result<Vec<UserAccount>, JamfError>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockJamfClient {
    fn default() -> Self {
        Self {
            computers_ret: None,
            mobile_devices_ret: None,
            computer_group_ret: HashMap::new(),
            mobile_device_group_ret: HashMap::new(),
            users_ret: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockJamfClient {
    pub fn new() -> Self {
        Self::default()
    }

    // Helper method to safely lock the calls mutex
    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn computers_ret(&mut self, ret: Result<Vec<Computer>, JamfError>) -> Self {
        self.computers_ret = Some(ret);
        self.clone()
    }

    pub fn mobile_devices_ret(&mut self, ret: Result<Vec<MobileDevice>, JamfError>) -> Self {
        self.mobile_devices_ret = Some(ret);
        self.clone()
    }

    pub fn computer_group_ret(
        &mut self,
        group_id: &str,
        ret: Result<ComputerGroup, JamfError>,
    ) -> Self {
        self.computer_group_ret.insert(group_id.to_owned(), ret);
        self.clone()
    }

    pub fn mobile_device_group_ret(
        &mut self,
        group_id: &str,
        ret: Result<MobileDeviceGroup, JamfError>,
    ) -> Self {
        self.mobile_device_group_ret
            .insert(group_id.to_owned(), ret);
        self.clone()
    }

    pub fn users_ret(&mut self, ret: Result<Vec<UserAccount>, JamfError>) -> Self {
        self.users_ret = Some(ret);
        self.clone()
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.lock_calls().clone()
    }
}

fn unconfigured(op: &str) -> JamfError {
    JamfError::Request(format!("no mock response configured for {op}"))
}

#[async_trait]
impl JamfClient for MockJamfClient {
    async fn list_computers(&self) -> Result<Vec<Computer>, JamfError> {
        self.lock_calls().push("list_computers".to_string());
        match &self.computers_ret {
            Some(ret) => ret.clone(),
            None => Err(unconfigured("list_computers")),
        }
    }

    async fn list_mobile_devices(&self) -> Result<Vec<MobileDevice>, JamfError> {
        self.lock_calls().push("list_mobile_devices".to_string());
        match &self.mobile_devices_ret {
            Some(ret) => ret.clone(),
            None => Err(unconfigured("list_mobile_devices")),
        }
    }

    async fn get_computer_group(&self, group_id: &str) -> Result<ComputerGroup, JamfError> {
        self.lock_calls()
            .push(format!("get_computer_group:{group_id}"));
        match self.computer_group_ret.get(group_id) {
            Some(ret) => ret.clone(),
            None => Err(unconfigured("get_computer_group")),
        }
    }

    async fn get_mobile_device_group(
        &self,
        group_id: &str,
    ) -> Result<MobileDeviceGroup, JamfError> {
        self.lock_calls()
            .push(format!("get_mobile_device_group:{group_id}"));
        match self.mobile_device_group_ret.get(group_id) {
            Some(ret) => ret.clone(),
            None => Err(unconfigured("get_mobile_device_group")),
        }
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, JamfError> {
        self.lock_calls().push("list_users".to_string());
        match &self.users_ret {
            Some(ret) => ret.clone(),
            None => Err(unconfigured("list_users")),
        }
    }
}
