//! The string-keyed configuration map an application fills in before asking
//! the binding factory for a binding.

use crate::format::{format_entries, parse_entries};
use cmis_core::constants as keys;
use cmis_core::{BindingType, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Web Services endpoint keys paired with the service name used to derive
/// their URL from a base address
const WEBSERVICES_SERVICE_NAMES: &[(&str, &str)] = &[
    (keys::WEBSERVICES_REPOSITORY_SERVICE, "RepositoryService"),
    (keys::WEBSERVICES_NAVIGATION_SERVICE, "NavigationService"),
    (keys::WEBSERVICES_OBJECT_SERVICE, "ObjectService"),
    (keys::WEBSERVICES_VERSIONING_SERVICE, "VersioningService"),
    (keys::WEBSERVICES_DISCOVERY_SERVICE, "DiscoveryService"),
    (keys::WEBSERVICES_MULTIFILING_SERVICE, "MultiFilingService"),
    (keys::WEBSERVICES_RELATIONSHIP_SERVICE, "RelationshipService"),
    (keys::WEBSERVICES_POLICY_SERVICE, "PolicyService"),
    (keys::WEBSERVICES_ACL_SERVICE, "ACLService"),
];

/// Session parameters, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionParameters {
    entries: IndexMap<String, String>,
}

impl SessionParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of `key` unless it is absent or only whitespace
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            _ => default,
        }
    }

    /// Integer value of `key`; absent or non-numeric values give `default`
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Set a value only if the key is not present yet. Returns whether the
    /// value was stored.
    pub fn put_if_absent(&mut self, key: &str, value: impl Into<String>) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.into());
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // Structured setters

    /// HTTP basic authentication, WS-UsernameToken off
    pub fn set_basic_authentication(&mut self, user: &str, password: &str) -> &mut Self {
        self.set(keys::USER, user);
        self.set(keys::PASSWORD, password);
        self.set(keys::AUTH_HTTP_BASIC, "true");
        self.set(keys::AUTH_SOAP_USERNAMETOKEN, "false");
        self
    }

    /// WS-UsernameToken authentication, optionally with HTTP basic as well
    pub fn set_username_token_authentication(
        &mut self,
        user: &str,
        password: &str,
        also_basic: bool,
    ) -> &mut Self {
        self.set(keys::USER, user);
        self.set(keys::PASSWORD, password);
        self.set(keys::AUTH_HTTP_BASIC, also_basic.to_string());
        self.set(keys::AUTH_SOAP_USERNAMETOKEN, "true");
        self
    }

    pub fn set_no_authentication(&mut self) -> &mut Self {
        self.remove(keys::USER);
        self.remove(keys::PASSWORD);
        self.set(keys::AUTH_HTTP_BASIC, "false");
        self.set(keys::AUTH_SOAP_USERNAMETOKEN, "false");
        self
    }

    pub fn set_proxy_credentials(&mut self, user: &str, password: &str) -> &mut Self {
        self.set(keys::PROXY_USER, user);
        self.set(keys::PROXY_PASSWORD, password);
        self
    }

    pub fn set_atompub_binding(&mut self, url: &str) -> &mut Self {
        self.set(keys::BINDING_TYPE, BindingType::AtomPub.as_str());
        self.set(keys::ATOMPUB_URL, url);
        self
    }

    pub fn set_browser_binding(&mut self, url: &str) -> &mut Self {
        self.set(keys::BINDING_TYPE, BindingType::Browser.as_str());
        self.set(keys::BROWSER_URL, url);
        self
    }

    pub fn set_local_binding(&mut self, factory: &str) -> &mut Self {
        self.set(keys::BINDING_TYPE, BindingType::Local.as_str());
        self.set(keys::LOCAL_FACTORY, factory);
        self
    }

    /// Derive all nine Web Services endpoints as `<base>/<Service>?wsdl`
    pub fn set_webservices_binding(&mut self, base_url: &str) -> &mut Self {
        let base = base_url.trim_end_matches('/');
        self.set(keys::BINDING_TYPE, BindingType::WebServices.as_str());
        for (key, service) in WEBSERVICES_SERVICE_NAMES {
            self.set(*key, format!("{base}/{service}?wsdl"));
        }
        self
    }

    pub fn set_repository_id(&mut self, repository_id: &str) -> &mut Self {
        self.set(keys::REPOSITORY_ID, repository_id);
        self
    }

    pub fn set_locale(&mut self, language: &str, country: &str) -> &mut Self {
        self.set(keys::LOCALE_ISO639_LANGUAGE, language);
        self.set(keys::LOCALE_ISO3166_COUNTRY, country);
        self
    }

    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.set(keys::COMPRESSION, enabled.to_string());
        self
    }

    pub fn set_client_compression(&mut self, enabled: bool) -> &mut Self {
        self.set(keys::CLIENT_COMPRESSION, enabled.to_string());
        self
    }

    pub fn set_cookies(&mut self, enabled: bool) -> &mut Self {
        self.set(keys::COOKIES, enabled.to_string());
        self
    }

    /// Timeouts in milliseconds
    pub fn set_timeouts(&mut self, connect_ms: u64, read_ms: u64) -> &mut Self {
        self.set(keys::CONNECT_TIMEOUT, connect_ms.to_string());
        self.set(keys::READ_TIMEOUT, read_ms.to_string());
        self
    }

    /// Add an outbound header at the next free `header.<N>` index
    pub fn add_header(&mut self, name: &str, value: &str) -> &mut Self {
        let index = (0..)
            .find(|i| !self.contains_key(&format!("{}{i}", keys::HEADER_PREFIX)))
            .unwrap_or_default();
        self.set(format!("{}{index}", keys::HEADER_PREFIX), format!("{name}:{value}"));
        self
    }

    /// Render as `key=value` lines, see [`crate::format`]
    #[must_use]
    pub fn format(&self) -> String {
        format_entries(self.iter())
    }

    /// Parse the `key=value` text form
    ///
    /// # Errors
    ///
    /// `Configuration` on a malformed escape sequence.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            entries: parse_entries(text)?,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for SessionParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for SessionParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl IntoIterator for SessionParameters {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authentication_expands_to_four_entries() {
        let mut parameters = SessionParameters::new();
        parameters.set_basic_authentication("user", "password");

        assert_eq!(parameters.len(), 4);
        assert_eq!(parameters.get(keys::USER), Some("user"));
        assert_eq!(parameters.get(keys::PASSWORD), Some("password"));
        assert!(parameters.get_bool(keys::AUTH_HTTP_BASIC, false));
        assert!(!parameters.get_bool(keys::AUTH_SOAP_USERNAMETOKEN, true));
    }

    #[test]
    fn test_no_authentication_clears_credentials() {
        let mut parameters = SessionParameters::new();
        parameters
            .set_username_token_authentication("user", "password", true)
            .set_no_authentication();

        assert!(!parameters.contains_key(keys::USER));
        assert!(!parameters.contains_key(keys::PASSWORD));
        assert!(!parameters.get_bool(keys::AUTH_HTTP_BASIC, true));
        assert!(!parameters.get_bool(keys::AUTH_SOAP_USERNAMETOKEN, true));
    }

    #[test]
    fn test_webservices_binding_sets_nine_endpoints() {
        let mut parameters = SessionParameters::new();
        parameters.set_webservices_binding("http://localhost:8080/cmis/services/");

        for key in keys::WEBSERVICES_ENDPOINTS {
            assert!(parameters.get_non_blank(key).is_some(), "missing {key}");
        }
        assert_eq!(
            parameters.get(keys::WEBSERVICES_ACL_SERVICE),
            Some("http://localhost:8080/cmis/services/ACLService?wsdl")
        );
        assert_eq!(parameters.get(keys::BINDING_TYPE), Some("webservices"));
    }

    #[test]
    fn test_add_header_uses_next_free_index() {
        let mut parameters = SessionParameters::new();
        parameters
            .add_header("X-Trace", "abc")
            .add_header("X-Tenant", "acme");

        assert_eq!(parameters.get("cmis.binding.header.0"), Some("X-Trace:abc"));
        assert_eq!(parameters.get("cmis.binding.header.1"), Some("X-Tenant:acme"));
    }

    #[test]
    fn test_put_if_absent_keeps_caller_value() {
        let mut parameters = SessionParameters::new();
        parameters.set(keys::CACHE_SIZE_TYPES, "5");

        assert!(!parameters.put_if_absent(keys::CACHE_SIZE_TYPES, "100"));
        assert!(parameters.put_if_absent(keys::CACHE_SIZE_LINKS, "400"));
        assert_eq!(parameters.get_int(keys::CACHE_SIZE_TYPES, 0), 5);
        assert_eq!(parameters.get_int(keys::CACHE_SIZE_LINKS, 0), 400);
    }

    #[test]
    fn test_get_non_blank() {
        let parameters: SessionParameters =
            [("empty", ""), ("spaces", "   "), ("set", "x")].into_iter().collect();
        assert_eq!(parameters.get_non_blank("empty"), None);
        assert_eq!(parameters.get_non_blank("spaces"), None);
        assert_eq!(parameters.get_non_blank("set"), Some("x"));
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let mut parameters = SessionParameters::new();
        parameters
            .set_atompub_binding("http://localhost:8080/cmis/atom11")
            .set_basic_authentication("user", "p=ss:word ")
            .set_locale("en", "US")
            .add_header("Accept", "application/json");

        let reparsed = SessionParameters::parse(&parameters.format()).unwrap();
        assert_eq!(reparsed, parameters);
    }

    #[test]
    fn test_serde_is_a_flat_object() {
        let parameters: SessionParameters = [("a", "1"), ("b", "2")].into_iter().collect();
        let json = serde_json::to_value(&parameters).unwrap();
        assert_eq!(json, serde_json::json!({ "a": "1", "b": "2" }));
        let back: SessionParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, parameters);
    }
}
