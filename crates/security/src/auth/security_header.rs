//! WS-Security header block for SOAP requests

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

const WSSE_NAMESPACE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const WSU_NAMESPACE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
const PASSWORD_TEXT_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// How long a generated header stays valid
const HEADER_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamp {
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Username token with a clear-text password
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct UsernameToken {
    pub id: String,
    pub username: String,
    pub password: String,
    #[zeroize(skip)]
    pub created: DateTime<Utc>,
}

impl fmt::Debug for UsernameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsernameToken")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"***")
            .field("created", &self.created)
            .finish()
    }
}

/// The `wsse:Security` element sent with every SOAP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityHeader {
    pub timestamp: Timestamp,
    pub username_token: UsernameToken,
}

impl SecurityHeader {
    /// A header created now that expires in 24 hours
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::created_at(Utc::now(), username, password)
    }

    pub fn created_at(
        created: DateTime<Utc>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp {
                created,
                expires: created + Duration::hours(HEADER_LIFETIME_HOURS),
            },
            username_token: UsernameToken {
                id: format!("UsernameToken-{}", Uuid::new_v4()),
                username: username.into(),
                password: password.into(),
                created,
            },
        }
    }

    /// Render the header as XML
    pub fn to_xml(&self) -> String {
        let token = &self.username_token;
        let mut xml = String::new();
        let _ = write!(
            xml,
            "<wsse:Security xmlns:wsse=\"{WSSE_NAMESPACE}\" xmlns:wsu=\"{WSU_NAMESPACE}\">\
             <wsu:Timestamp><wsu:Created>{}</wsu:Created><wsu:Expires>{}</wsu:Expires></wsu:Timestamp>\
             <wsse:UsernameToken wsu:Id=\"{}\">\
             <wsse:Username>{}</wsse:Username>\
             <wsse:Password Type=\"{PASSWORD_TEXT_TYPE}\">{}</wsse:Password>\
             <wsu:Created>{}</wsu:Created>\
             </wsse:UsernameToken></wsse:Security>",
            format_time(&self.timestamp.created),
            format_time(&self.timestamp.expires),
            escape_xml(&token.id),
            escape_xml(&token.username),
            escape_xml(&token.password),
            format_time(&token.created),
        );
        xml
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expires_one_day_after_creation() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let header = SecurityHeader::created_at(created, "alice", "secret");
        assert_eq!(
            header.timestamp.expires,
            Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()
        );
        assert_eq!(header.username_token.created, created);
        assert!(header.username_token.id.starts_with("UsernameToken-"));
    }

    #[test]
    fn test_xml_rendering() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let header = SecurityHeader::created_at(created, "alice", "p<&>ss");
        let xml = header.to_xml();

        assert!(xml.starts_with("<wsse:Security"));
        assert!(xml.contains("<wsu:Created>2024-03-01T12:00:00.000Z</wsu:Created>"));
        assert!(xml.contains("<wsu:Expires>2024-03-02T12:00:00.000Z</wsu:Expires>"));
        assert!(xml.contains("<wsse:Username>alice</wsse:Username>"));
        assert!(xml.contains("#PasswordText\">p&lt;&amp;&gt;ss</wsse:Password>"));
        assert!(xml.ends_with("</wsse:Security>"));
    }

    #[test]
    fn test_debug_hides_password() {
        let header = SecurityHeader::new("alice", "secret");
        assert!(!format!("{header:?}").contains("secret"));
    }
}
