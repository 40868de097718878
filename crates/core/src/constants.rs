/// Constants used throughout the binding layer
// Binding selection
pub const BINDING_TYPE: &str = "cmis.binding.type";
pub const BINDING_SPI: &str = "cmis.binding.spi";

// Endpoints
pub const ATOMPUB_URL: &str = "cmis.binding.atompub.url";
pub const BROWSER_URL: &str = "cmis.binding.browser.url";
pub const LOCAL_FACTORY: &str = "cmis.binding.local.factory";

pub const WEBSERVICES_REPOSITORY_SERVICE: &str = "cmis.binding.webservices.repository.url";
pub const WEBSERVICES_NAVIGATION_SERVICE: &str = "cmis.binding.webservices.navigation.url";
pub const WEBSERVICES_OBJECT_SERVICE: &str = "cmis.binding.webservices.object.url";
pub const WEBSERVICES_VERSIONING_SERVICE: &str = "cmis.binding.webservices.versioning.url";
pub const WEBSERVICES_DISCOVERY_SERVICE: &str = "cmis.binding.webservices.discovery.url";
pub const WEBSERVICES_MULTIFILING_SERVICE: &str = "cmis.binding.webservices.multifiling.url";
pub const WEBSERVICES_RELATIONSHIP_SERVICE: &str = "cmis.binding.webservices.relationship.url";
pub const WEBSERVICES_POLICY_SERVICE: &str = "cmis.binding.webservices.policy.url";
pub const WEBSERVICES_ACL_SERVICE: &str = "cmis.binding.webservices.acl.url";

/// The nine Web Services endpoints in validation order
pub const WEBSERVICES_ENDPOINTS: &[&str] = &[
    WEBSERVICES_REPOSITORY_SERVICE,
    WEBSERVICES_NAVIGATION_SERVICE,
    WEBSERVICES_OBJECT_SERVICE,
    WEBSERVICES_VERSIONING_SERVICE,
    WEBSERVICES_DISCOVERY_SERVICE,
    WEBSERVICES_MULTIFILING_SERVICE,
    WEBSERVICES_RELATIONSHIP_SERVICE,
    WEBSERVICES_POLICY_SERVICE,
    WEBSERVICES_ACL_SERVICE,
];

// Authentication
pub const USER: &str = "cmis.user";
pub const PASSWORD: &str = "cmis.password";
pub const PROXY_USER: &str = "cmis.proxy.user";
pub const PROXY_PASSWORD: &str = "cmis.proxy.password";
pub const AUTHENTICATION_PROVIDER: &str = "cmis.binding.auth.provider";
pub const AUTH_HTTP_BASIC: &str = "cmis.binding.auth.http.basic";
pub const AUTH_SOAP_USERNAMETOKEN: &str = "cmis.binding.auth.soap.usernametoken";

// Cache sizing
pub const CACHE_SIZE_REPOSITORIES: &str = "cmis.cache.size.repositories";
pub const CACHE_SIZE_TYPES: &str = "cmis.cache.size.types";
pub const CACHE_SIZE_LINKS: &str = "cmis.cache.size.links";
pub const CACHE_SIZE_OBJECTS: &str = "cmis.cache.size.objects";
pub const CACHE_SIZE_PATHTOID: &str = "cmis.cache.size.pathtoid";
pub const CACHE_TTL_OBJECTS: &str = "cmis.cache.ttl.objects";
pub const CACHE_TTL_PATHTOID: &str = "cmis.cache.ttl.pathtoid";

pub const DEFAULT_CACHE_SIZE_REPOSITORIES: usize = 10;
pub const DEFAULT_CACHE_SIZE_TYPES: usize = 100;
pub const DEFAULT_CACHE_SIZE_LINKS: usize = 400;
pub const DEFAULT_CACHE_SIZE_OBJECTS: usize = 1000;
pub const DEFAULT_CACHE_SIZE_PATHTOID: usize = 1000;
/// Milliseconds
pub const DEFAULT_CACHE_TTL_OBJECTS: u64 = 2 * 60 * 60 * 1000;
/// Milliseconds
pub const DEFAULT_CACHE_TTL_PATHTOID: u64 = 30 * 60 * 1000;

// Locale
pub const LOCALE_ISO639_LANGUAGE: &str = "cmis.locale.iso639.language";
pub const LOCALE_ISO3166_COUNTRY: &str = "cmis.locale.iso3166.country";

// Repository
pub const REPOSITORY_ID: &str = "cmis.repository.id";

// Transport pass-through, never interpreted by the binding layer
pub const COOKIES: &str = "cmis.binding.cookies";
pub const COMPRESSION: &str = "cmis.binding.compression";
pub const CLIENT_COMPRESSION: &str = "cmis.binding.clientcompression";
pub const CONNECT_TIMEOUT: &str = "cmis.binding.connecttimeout";
pub const READ_TIMEOUT: &str = "cmis.binding.readtimeout";

/// Prefix of the repeatable outbound header entries, `<prefix><N>` = `name:value`
pub const HEADER_PREFIX: &str = "cmis.binding.header.";

// Built-in plugin identifiers
pub const SPI_ATOMPUB: &str = "cmis.spi.atompub";
pub const SPI_WEBSERVICES: &str = "cmis.spi.webservices";
pub const SPI_BROWSER: &str = "cmis.spi.browser";
pub const SPI_LOCAL: &str = "cmis.spi.local";
pub const STANDARD_AUTHENTICATION_PROVIDER: &str = "cmis.auth.standard";

// Cache level strategy identifiers
pub const LEVEL_BOUNDED: &str = "bounded";
pub const LEVEL_LRU: &str = "lru";
pub const LEVEL_PARAM_CAPACITY: &str = "capacity";
pub const LEVEL_PARAM_MAX_ENTRIES: &str = "max_entries";
