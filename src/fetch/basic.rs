use std::time::Duration;

use super::client::HttpClient;

/// Plain blocking client with connect and overall timeouts.
pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }
}

impl HttpClient for BasicClient {
    fn execute(
        &self,
        req: reqwest::blocking::Request,
    ) -> reqwest::Result<reqwest::blocking::Response> {
        self.0.execute(req)
    }
}
