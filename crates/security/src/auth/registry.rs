use super::provider::AuthenticationProvider;
use super::standard::StandardAuthenticationProvider;
use cmis_core::constants::STANDARD_AUTHENTICATION_PROVIDER;
use cmis_core::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a provider instance
pub type AuthProviderConstructor =
    Arc<dyn Fn() -> Arc<dyn AuthenticationProvider> + Send + Sync>;

/// Maps `cmis.binding.auth.provider` identifiers to providers
#[derive(Clone)]
pub struct AuthProviderRegistry {
    constructors: HashMap<String, AuthProviderConstructor>,
}

impl AuthProviderRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry holding the standard provider
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(STANDARD_AUTHENTICATION_PROVIDER, || {
            Arc::new(StandardAuthenticationProvider) as Arc<dyn AuthenticationProvider>
        });
        registry
    }

    pub fn register<F>(&mut self, id: &str, constructor: F)
    where
        F: Fn() -> Arc<dyn AuthenticationProvider> + Send + Sync + 'static,
    {
        self.constructors.insert(id.to_string(), Arc::new(constructor));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Instantiate the provider registered as `id`
    ///
    /// # Errors
    ///
    /// `Configuration` if nothing is registered under `id`.
    pub fn create(&self, id: &str) -> Result<Arc<dyn AuthenticationProvider>> {
        self.constructors
            .get(id)
            .map(|constructor| constructor())
            .ok_or_else(|| {
                Error::configuration(format!("unknown authentication provider: {id}"))
            })
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for AuthProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for AuthProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HttpHeaders;
    use cmis_core::SessionContext;

    struct Fixed;

    impl AuthenticationProvider for Fixed {
        fn http_headers(&self, _session: &SessionContext, _url: &str) -> HttpHeaders {
            HttpHeaders::from([("X-Key".to_string(), vec!["k".to_string()])])
        }
    }

    #[test]
    fn test_standard_provider_registered() {
        let registry = AuthProviderRegistry::default();
        assert!(registry.contains(STANDARD_AUTHENTICATION_PROVIDER));
        assert!(registry.create(STANDARD_AUTHENTICATION_PROVIDER).is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let registry = AuthProviderRegistry::with_defaults();
        let err = registry.create("com.example.Missing").err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_custom_provider() {
        let mut registry = AuthProviderRegistry::empty();
        registry.register("fixed", || Arc::new(Fixed) as Arc<dyn AuthenticationProvider>);
        let provider = registry.create("fixed").unwrap();
        let headers = provider.http_headers(&SessionContext::new(), "u");
        assert_eq!(headers["X-Key"], vec!["k".to_string()]);
        assert!(provider.soap_headers(&SessionContext::new(), "p").is_none());
    }
}
