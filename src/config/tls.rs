//! TLS configuration for secure connections.

use std::path::PathBuf;

/// Configuration for TLS connections.
///
/// By default the SDK uses system root certificates and validates server
/// certificates. Self-hosted Stargate deployments often sit behind a private
/// CA; this configuration lets you trust it.
///
/// ## Example: Custom CA
///
/// ```rust
/// use stargate::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/path/to/ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Custom CA certificate file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Custom CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used against a local
    /// Stargate container with a self-signed certificate.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates an insecure TLS config that skips verification.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TlsConfig::default();
        assert!(config.ca_cert_file.is_none());
        assert!(!config.skip_verification);
        assert!(!config.has_custom_ca());
    }

    #[test]
    fn test_ca_cert_file() {
        let config = TlsConfig::builder().ca_cert_file("/path/to/ca.crt").build();
        assert!(config.has_custom_ca());
        assert_eq!(config.ca_cert_file, Some(PathBuf::from("/path/to/ca.crt")));
    }

    #[test]
    fn test_ca_cert_pem() {
        let config = TlsConfig::builder()
            .ca_cert_pem("-----BEGIN CERTIFICATE-----")
            .build();
        assert!(config.has_custom_ca());
    }

    #[test]
    fn test_insecure() {
        assert!(TlsConfig::insecure().skip_verification);
    }
}
