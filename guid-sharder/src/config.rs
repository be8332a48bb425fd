use envconfig::Envconfig;
use std::net::SocketAddr;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(default = "127.0.0.1:3400")]
    pub address: SocketAddr,

    pub jamf_base_url: String,

    pub jamf_api_token: String,

    // Bulk inventory listings can take minutes on large fleets.
    #[envconfig(default = "180")]
    pub upstream_timeout_secs: u64,

    #[envconfig(default = "200")]
    pub inventory_page_size: u32,
}
