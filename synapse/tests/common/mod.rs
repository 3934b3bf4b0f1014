#![allow(dead_code)]

use synapse::{Client, ClientCredentials, SynapseConfig};
use url::Url;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "client_id_abc";
pub const CLIENT_SECRET: &str = "client_secret_xyz";
pub const FINGERPRINT: &str = "fp123";
pub const IP_ADDRESS: &str = "127.0.0.1";

/// A client pointed at the mock server's `/v3.1` root.
pub fn client_for(server: &MockServer) -> Client {
    let base_url = Url::parse(&format!("{}/v3.1", server.uri())).unwrap();
    let credentials = ClientCredentials::new(CLIENT_ID, CLIENT_SECRET, FINGERPRINT, IP_ADDRESS);
    let config = SynapseConfig::builder(credentials)
        .base_url(base_url)
        .build()
        .unwrap();
    Client::new(config).unwrap()
}
