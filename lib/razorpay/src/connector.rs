//! HTTPS connector using rustls.

use std::path::Path;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::pki_types::{CertificateDer, pem::PemObject};

use crate::{ClientConfig, Error, Result};

/// Create an HTTPS connector with rustls.
///
/// Trust roots are the Mozilla set from `webpki-roots`, plus every
/// certificate of the configured CA bundle. Plain `http://` URLs are allowed
/// so the client can talk to local mock servers.
///
/// # Errors
///
/// Returns a TLS error if the CA bundle cannot be read or parsed, or holds
/// no certificates.
pub fn https_connector(config: &ClientConfig) -> Result<HttpsConnector<HttpConnector>> {
    let mut root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    if let Some(path) = &config.ca_bundle {
        add_ca_bundle(&mut root_store, path)?;
    }

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(config.connect_timeout));

    Ok(HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http))
}

fn add_ca_bundle(root_store: &mut rustls::RootCertStore, path: &Path) -> Result<()> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::tls(format!("cannot read CA bundle {}: {e}", path.display())))?;

    let mut added = 0_usize;
    for cert in CertificateDer::pem_slice_iter(&pem) {
        let cert = cert
            .map_err(|e| Error::tls(format!("invalid CA bundle {}: {e}", path.display())))?;
        root_store
            .add(cert)
            .map_err(|e| Error::tls(format!("rejected CA certificate: {e}")))?;
        added += 1;
    }

    // Non-PEM input yields no items at all.
    if added == 0 {
        let message = format!("CA bundle {} contains no certificates", path.display());
        return Err(Error::tls(message));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const TEST_CA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test-ca.pem");

    fn bundle_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("razorpay-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write bundle");
        path
    }

    fn with_bundle(path: PathBuf) -> ClientConfig {
        ClientConfig::builder().ca_bundle(path).build()
    }

    #[test]
    fn creates_connector() {
        assert!(https_connector(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn pem_ca_bundle_is_trusted() {
        let mut root_store = rustls::RootCertStore::empty();

        add_ca_bundle(&mut root_store, Path::new(TEST_CA)).expect("bundle");

        assert_eq!(root_store.len(), 1);
        assert!(https_connector(&with_bundle(PathBuf::from(TEST_CA))).is_ok());
    }

    #[test]
    fn ca_bundle_without_certificates_is_tls_error() {
        let cases = [
            ("garbage.pem", b"this is not a certificate\n".as_slice()),
            ("empty.pem", b"".as_slice()),
        ];

        for (name, contents) in cases {
            let path = bundle_file(name, contents);
            let result = https_connector(&with_bundle(path.clone()));
            std::fs::remove_file(&path).expect("remove bundle");

            let err = result.err().expect("empty bundle");
            assert!(matches!(err, Error::Tls(_)), "{name}: {err}");
            assert!(err.to_string().contains("no certificates"), "{name}: {err}");
        }
    }

    #[test]
    fn missing_ca_bundle_is_tls_error() {
        let config = ClientConfig::builder()
            .ca_bundle(PathBuf::from("/nonexistent/ca-bundle.crt"))
            .build();

        let err = https_connector(&config).err().expect("missing bundle");
        assert!(matches!(err, Error::Tls(_)), "{err}");
    }
}
