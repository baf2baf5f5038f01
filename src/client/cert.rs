// File: ./src/client/cert.rs
// TLS connector construction
use crate::error::{Error, Result};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, warn};

/// Builds an HTTP/1 connector trusting the platform's native roots.
///
/// Plain `http://` stays usable when no roots load; `require_roots` turns an
/// empty store into an error for `https://` endpoints.
pub fn https_connector(require_roots: bool) -> Result<HttpsConnector<HttpConnector>> {
    let mut root_store = rustls::RootCertStore::empty();
    let result = rustls_native_certs::load_native_certs();
    for err in &result.errors {
        warn!(error = %err, "skipping unreadable system certificate");
    }
    let (added, ignored) = root_store.add_parsable_certificates(result.certs);
    debug!(added, ignored, "loaded native root certificates");

    if root_store.is_empty() && require_roots {
        return Err(Error::Connection("No valid system certificates found.".to_string()));
    }

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .build())
}
