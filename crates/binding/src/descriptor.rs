//! Static defaults of the built-in binding kinds

use cmis_core::constants::{
    ATOMPUB_URL, BROWSER_URL, LOCAL_FACTORY, SPI_ATOMPUB, SPI_BROWSER, SPI_LOCAL,
    SPI_WEBSERVICES, STANDARD_AUTHENTICATION_PROVIDER, WEBSERVICES_ENDPOINTS,
};
use cmis_core::BindingType;

/// What the factory fills in and checks for one binding kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub binding_type: BindingType,
    pub spi: &'static str,
    pub authentication_provider: &'static str,
    pub http_basic: bool,
    pub soap_username_token: bool,
    /// Keys that must be present and non-blank, checked in order
    pub mandatory: &'static [&'static str],
    /// Whether the mandatory keys hold URLs
    pub mandatory_urls: bool,
}

pub const ATOMPUB: BindingDescriptor = BindingDescriptor {
    binding_type: BindingType::AtomPub,
    spi: SPI_ATOMPUB,
    authentication_provider: STANDARD_AUTHENTICATION_PROVIDER,
    http_basic: true,
    soap_username_token: false,
    mandatory: &[ATOMPUB_URL],
    mandatory_urls: true,
};

pub const WEBSERVICES: BindingDescriptor = BindingDescriptor {
    binding_type: BindingType::WebServices,
    spi: SPI_WEBSERVICES,
    authentication_provider: STANDARD_AUTHENTICATION_PROVIDER,
    http_basic: true,
    soap_username_token: true,
    mandatory: WEBSERVICES_ENDPOINTS,
    mandatory_urls: true,
};

pub const BROWSER: BindingDescriptor = BindingDescriptor {
    binding_type: BindingType::Browser,
    spi: SPI_BROWSER,
    authentication_provider: STANDARD_AUTHENTICATION_PROVIDER,
    http_basic: true,
    soap_username_token: false,
    mandatory: &[BROWSER_URL],
    mandatory_urls: true,
};

pub const LOCAL: BindingDescriptor = BindingDescriptor {
    binding_type: BindingType::Local,
    spi: SPI_LOCAL,
    authentication_provider: STANDARD_AUTHENTICATION_PROVIDER,
    http_basic: false,
    soap_username_token: false,
    mandatory: &[LOCAL_FACTORY],
    mandatory_urls: false,
};

impl BindingDescriptor {
    /// Descriptor of a built-in kind; `Custom` bindings have none
    pub fn for_type(binding_type: BindingType) -> Option<&'static BindingDescriptor> {
        match binding_type {
            BindingType::AtomPub => Some(&ATOMPUB),
            BindingType::WebServices => Some(&WEBSERVICES),
            BindingType::Browser => Some(&BROWSER),
            BindingType::Local => Some(&LOCAL),
            BindingType::Custom => None,
        }
    }
}
