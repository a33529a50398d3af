use reqwest::blocking::{Request, Response};

/// Executes a prepared HTTP request. The seam lets callers swap transports.
pub trait HttpClient {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
