use super::credentials::Credentials;
use super::provider::{AuthenticationProvider, HttpHeaders};
use super::security_header::SecurityHeader;
use cmis_core::constants::{
    AUTH_HTTP_BASIC, AUTH_SOAP_USERNAMETOKEN, HEADER_PREFIX, PASSWORD, PROXY_PASSWORD, PROXY_USER,
    USER,
};
use cmis_core::{SessionContext, SessionEntries};
use tracing::{trace, warn};

pub const AUTHORIZATION: &str = "Authorization";
pub const PROXY_AUTHORIZATION: &str = "Proxy-Authorization";

/// HTTP Basic and WS-Security UsernameToken authentication driven by the
/// session's `cmis.binding.auth.*` toggles.
///
/// Besides the credentials it forwards proxy credentials and every
/// `cmis.binding.header.<N>` entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAuthenticationProvider;

impl StandardAuthenticationProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AuthenticationProvider for StandardAuthenticationProvider {
    fn http_headers(&self, session: &SessionContext, url: &str) -> HttpHeaders {
        let entries = session.read();
        let mut headers = HttpHeaders::new();

        if entries.get_bool(AUTH_HTTP_BASIC, false) {
            match Credentials::from_entries(&entries, USER, PASSWORD) {
                Some(credentials) => {
                    headers.insert(
                        AUTHORIZATION.to_string(),
                        vec![credentials.basic_authorization()],
                    );
                }
                None => trace!("No user configured, sending {} unauthenticated", url),
            }
        }

        if let Some(proxy) = Credentials::from_entries(&entries, PROXY_USER, PROXY_PASSWORD) {
            headers.insert(
                PROXY_AUTHORIZATION.to_string(),
                vec![proxy.basic_authorization()],
            );
        }

        add_custom_headers(&entries, &mut headers);
        headers
    }

    fn soap_headers(&self, session: &SessionContext, port: &str) -> Option<SecurityHeader> {
        let entries = session.read();
        if !entries.get_bool(AUTH_SOAP_USERNAMETOKEN, false) {
            return None;
        }
        let Some(credentials) = Credentials::from_entries(&entries, USER, PASSWORD) else {
            trace!("No user configured, no security header for {}", port);
            return None;
        };
        Some(SecurityHeader::new(credentials.user(), credentials.password()))
    }
}

/// Append `cmis.binding.header.0`, `.1`, ... until the first gap
fn add_custom_headers(entries: &SessionEntries, headers: &mut HttpHeaders) {
    for index in 0.. {
        let Some(raw) = entries.get_str(&format!("{HEADER_PREFIX}{index}")) else {
            break;
        };
        let Some((name, value)) = raw.split_once(':') else {
            warn!("Ignoring malformed header entry {}{}: '{}'", HEADER_PREFIX, index, raw);
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            warn!("Ignoring header entry {}{} without a name", HEADER_PREFIX, index);
            continue;
        }
        headers
            .entry(name.to_string())
            .or_default()
            .push(value.trim().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(entries: &[(&str, &str)]) -> SessionContext {
        SessionContext::from_parameters(entries.iter().copied())
    }

    #[test]
    fn test_basic_header() {
        let session = session(&[
            (AUTH_HTTP_BASIC, "true"),
            (USER, "user"),
            (PASSWORD, "password"),
        ]);
        let headers = StandardAuthenticationProvider.http_headers(&session, "http://h/");

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers[AUTHORIZATION],
            vec!["Basic dXNlcjpwYXNzd29yZA==".to_string()]
        );
    }

    #[test]
    fn test_basic_toggle_off_or_no_user() {
        let provider = StandardAuthenticationProvider::new();
        let off = session(&[(USER, "user"), (PASSWORD, "password")]);
        assert!(provider.http_headers(&off, "u").is_empty());

        let no_user = session(&[(AUTH_HTTP_BASIC, "true"), (PASSWORD, "password")]);
        assert!(provider.http_headers(&no_user, "u").is_empty());
    }

    #[test]
    fn test_proxy_and_custom_headers() {
        let session = session(&[
            (PROXY_USER, "proxy"),
            (PROXY_PASSWORD, "pw"),
            ("cmis.binding.header.0", "X-Trace : abc"),
            ("cmis.binding.header.1", "malformed"),
            ("cmis.binding.header.2", "X-Trace:def"),
            ("cmis.binding.header.4", "X-Skipped:gap"),
        ]);
        let headers = StandardAuthenticationProvider.http_headers(&session, "u");

        assert_eq!(headers[PROXY_AUTHORIZATION], vec!["Basic cHJveHk6cHc=".to_string()]);
        assert_eq!(headers["X-Trace"], vec!["abc".to_string(), "def".to_string()]);
        assert!(!headers.contains_key("X-Skipped"));
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_soap_header() {
        let provider = StandardAuthenticationProvider;
        let enabled = session(&[
            (AUTH_SOAP_USERNAMETOKEN, "true"),
            (USER, "user"),
            (PASSWORD, "password"),
        ]);
        let header = provider.soap_headers(&enabled, "RepositoryServicePort").unwrap();
        assert_eq!(header.username_token.username, "user");
        assert_eq!(header.username_token.password, "password");

        let disabled = session(&[(USER, "user")]);
        assert!(provider.soap_headers(&disabled, "port").is_none());

        let no_user = session(&[(AUTH_SOAP_USERNAMETOKEN, "true")]);
        assert!(provider.soap_headers(&no_user, "port").is_none());
    }
}
