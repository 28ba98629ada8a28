//! One async function per backend operation.
//!
//! Every function takes the shared [`ApiClient`](crate::client::ApiClient)
//! by reference, issues exactly one request, and resolves to the parsed JSON
//! body unchanged. Failures are logged by the client and returned as-is.

pub mod dashboard;
pub mod endpoint;
pub mod projects;
pub mod reference;
pub mod summary;

pub use endpoint::Endpoint;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::MockServer;

    use crate::client::ApiClient;

    pub async fn server_and_client() -> (MockServer, ApiClient) {
        let server = MockServer::start().await;
        let client = ApiClient::builder(format!("{}/api/", server.uri()))
            .build()
            .unwrap();
        (server, client)
    }
}
