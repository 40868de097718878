//! Binding construction
//!
//! The factory turns a [`SessionParameters`] map into a [`CmisBinding`]:
//! it fills in defaults the caller left out, checks the mandatory keys of
//! the requested binding kind, resolves the SPI and authentication provider
//! identifiers and builds the session. Nothing touches the network here.

use crate::binding::CmisBinding;
use crate::descriptor::{self, BindingDescriptor};
use crate::session::BindingSession;
use crate::spi::{CmisSpi, SpiRegistry};
use crate::transport::{DetachedTransport, Transport};
use cmis_config::SessionParameters;
use cmis_core::constants::{
    AUTHENTICATION_PROVIDER, AUTH_HTTP_BASIC, AUTH_SOAP_USERNAMETOKEN, BINDING_SPI, BINDING_TYPE,
    CACHE_SIZE_LINKS, CACHE_SIZE_REPOSITORIES, CACHE_SIZE_TYPES, DEFAULT_CACHE_SIZE_LINKS,
    DEFAULT_CACHE_SIZE_REPOSITORIES, DEFAULT_CACHE_SIZE_TYPES,
};
use cmis_core::{BindingType, Error, Result};
use cmis_security::{AuthProviderRegistry, AuthenticationProvider};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Creates bindings from session parameters
pub struct BindingFactory {
    spis: SpiRegistry,
    providers: AuthProviderRegistry,
    transport: Arc<dyn Transport>,
}

impl BindingFactory {
    /// A factory with the built-in SPIs and provider and no transport;
    /// bindings it creates fail every service call
    pub fn new() -> Self {
        Self::with_transport(Arc::new(DetachedTransport))
    }

    /// A factory whose bindings send their calls through `transport`
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            spis: SpiRegistry::with_defaults(),
            providers: AuthProviderRegistry::with_defaults(),
            transport,
        }
    }

    /// Make an SPI available under `id` for `cmis.binding.spi`
    pub fn register_spi<F>(&mut self, id: &str, constructor: F)
    where
        F: Fn(Arc<BindingSession>) -> Result<Box<dyn CmisSpi>> + Send + Sync + 'static,
    {
        self.spis.register(id, constructor);
    }

    /// Make a provider available under `id` for
    /// `cmis.binding.auth.provider`
    pub fn register_authentication_provider<F>(&mut self, id: &str, constructor: F)
    where
        F: Fn() -> Arc<dyn AuthenticationProvider> + Send + Sync + 'static,
    {
        self.providers.register(id, constructor);
    }

    pub fn spi_registry(&self) -> &SpiRegistry {
        &self.spis
    }

    pub fn authentication_providers(&self) -> &AuthProviderRegistry {
        &self.providers
    }

    /// Create a binding for whatever SPI `cmis.binding.spi` names
    ///
    /// # Errors
    ///
    /// `Configuration` if the SPI identifier is missing or unknown, or any
    /// other parameter is invalid.
    pub fn create_binding(
        &self,
        mut parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        if parameters.get_non_blank(BINDING_SPI).is_none() {
            return Err(Error::configuration("SPI class entry missing"));
        }
        add_global_defaults(&mut parameters);
        self.build(parameters, authentication_provider)
    }

    /// # Errors
    ///
    /// `Configuration` if `cmis.binding.atompub.url` is missing or not a URL.
    pub fn create_atompub_binding(
        &self,
        parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        self.create_for(&descriptor::ATOMPUB, parameters, authentication_provider)
    }

    /// # Errors
    ///
    /// `Configuration` if one of the nine service URLs is missing or not a
    /// URL.
    pub fn create_webservices_binding(
        &self,
        parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        self.create_for(&descriptor::WEBSERVICES, parameters, authentication_provider)
    }

    /// # Errors
    ///
    /// `Configuration` if `cmis.binding.browser.url` is missing or not a URL.
    pub fn create_browser_binding(
        &self,
        parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        self.create_for(&descriptor::BROWSER, parameters, authentication_provider)
    }

    /// # Errors
    ///
    /// `Configuration` if `cmis.binding.local.factory` is missing.
    pub fn create_local_binding(
        &self,
        parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        self.create_for(&descriptor::LOCAL, parameters, authentication_provider)
    }

    fn create_for(
        &self,
        descriptor: &BindingDescriptor,
        mut parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        parameters.set(BINDING_SPI, descriptor.spi);
        parameters.set(BINDING_TYPE, descriptor.binding_type.as_str());
        if authentication_provider.is_none() {
            parameters.put_if_absent(AUTHENTICATION_PROVIDER, descriptor.authentication_provider);
        }
        parameters.put_if_absent(AUTH_HTTP_BASIC, descriptor.http_basic.to_string());
        parameters.put_if_absent(
            AUTH_SOAP_USERNAMETOKEN,
            descriptor.soap_username_token.to_string(),
        );
        add_global_defaults(&mut parameters);
        check_mandatory(descriptor, &parameters)?;

        self.build(parameters, authentication_provider)
    }

    fn build(
        &self,
        parameters: SessionParameters,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<CmisBinding> {
        let spi_id = parameters
            .get_non_blank(BINDING_SPI)
            .ok_or_else(|| Error::configuration("SPI class entry missing"))?;
        let constructor = self.spis.resolve(spi_id)?;

        let binding_type = match parameters.get_non_blank(BINDING_TYPE) {
            Some(raw) => raw.parse()?,
            None => BindingType::Custom,
        };

        let provider = match authentication_provider {
            Some(provider) => Some(provider),
            None => parameters
                .get_non_blank(AUTHENTICATION_PROVIDER)
                .map(|id| self.providers.create(id))
                .transpose()?,
        };

        debug!(
            "Creating {} binding with SPI '{}' ({} parameters)",
            binding_type,
            spi_id,
            parameters.len()
        );

        let session = Arc::new(BindingSession::new(
            &parameters,
            Arc::clone(&self.transport),
            provider,
        )?);
        let spi = constructor(Arc::clone(&session))?;
        Ok(CmisBinding::new(binding_type, parameters, session, spi))
    }
}

/// Cache sizes every binding gets unless the caller chose them
fn add_global_defaults(parameters: &mut SessionParameters) {
    parameters.put_if_absent(
        CACHE_SIZE_REPOSITORIES,
        DEFAULT_CACHE_SIZE_REPOSITORIES.to_string(),
    );
    parameters.put_if_absent(CACHE_SIZE_TYPES, DEFAULT_CACHE_SIZE_TYPES.to_string());
    parameters.put_if_absent(CACHE_SIZE_LINKS, DEFAULT_CACHE_SIZE_LINKS.to_string());
}

fn check_mandatory(descriptor: &BindingDescriptor, parameters: &SessionParameters) -> Result<()> {
    for key in descriptor.mandatory {
        let value = parameters
            .get_non_blank(key)
            .ok_or_else(|| Error::missing_parameter(key))?;
        if descriptor.mandatory_urls {
            Url::parse(value.trim()).map_err(|err| {
                Error::configuration(format!("parameter '{key}' is not a valid URL: {err}"))
            })?;
        }
    }
    Ok(())
}

impl Default for BindingFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BindingFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingFactory")
            .field("spis", &self.spis)
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}
