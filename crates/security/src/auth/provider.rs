use super::security_header::SecurityHeader;
use cmis_core::SessionContext;
use std::collections::BTreeMap;

/// Header name to values; a name may repeat
pub type HttpHeaders = BTreeMap<String, Vec<String>>;

/// Produces the authentication data for a binding session.
///
/// Implementations read credentials from the session on every call, so a
/// change to the session takes effect on the next request. Missing
/// credentials are never an error; the provider simply contributes nothing.
pub trait AuthenticationProvider: Send + Sync {
    /// Headers for an HTTP request to `url`
    fn http_headers(&self, _session: &SessionContext, _url: &str) -> HttpHeaders {
        HttpHeaders::new()
    }

    /// Security header for a SOAP request on `port`
    fn soap_headers(&self, _session: &SessionContext, _port: &str) -> Option<SecurityHeader> {
        None
    }
}
