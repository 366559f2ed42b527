//! Decomposition and recomposition of `vless://` share links.
//!
//! A link has the shape `vless://<identity>@<authority>[path][?query][#remark]`.
//! Only the host is ever rewritten; every other part is carried over as-is.

use serde::Serialize;
use thiserror::Error;
use url::{Host, Url};

pub const SCHEME_PREFIX: &str = "vless://";

// Non-special scheme: the url crate keeps explicit ports such as :80 and :443.
const LOCATOR_SCHEME: &str = "relink://";

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link does not start with 'vless://'")]
    MissingScheme,
    #[error("link has no '@' separating identity from address")]
    MissingSeparator,
    #[error("malformed address segment: {0}")]
    Authority(#[from] url::ParseError),
    #[error("invalid port: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLink {
    pub identity: String,
    /// Host of the original link. Never written back by [`ParsedLink::with_host`].
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: String,
    pub remark: String,
}

impl ParsedLink {
    pub fn parse(link: &str) -> Result<Self, LinkError> {
        let rest = link
            .strip_prefix(SCHEME_PREFIX)
            .ok_or(LinkError::MissingScheme)?;
        let (identity, authority) = rest.split_once('@').ok_or(LinkError::MissingSeparator)?;

        // First '#' anywhere in the segment wins, even inside the query region.
        let (locator, remark) = authority.split_once('#').unwrap_or((authority, ""));
        let (locator, query) = locator.split_once('?').unwrap_or((locator, ""));
        let (netloc, path) = match locator.find('/') {
            Some(i) => locator.split_at(i),
            None => (locator, ""),
        };

        let (host, port) = parse_netloc(netloc)?;

        Ok(Self {
            identity: identity.to_string(),
            host,
            port,
            path: path.to_string(),
            query: query.to_string(),
            remark: remark.to_string(),
        })
    }

    /// Rebuild the link with `new_host` in place of the original host.
    ///
    /// `new_host` is not validated. Anything with two or more `:` is taken
    /// to be an IPv6 literal and bracketed.
    pub fn with_host(&self, new_host: &str) -> String {
        let mut out = format!("{SCHEME_PREFIX}{}@", self.identity);

        if new_host.matches(':').count() > 1 {
            out.push('[');
            out.push_str(new_host);
            out.push(']');
        } else {
            out.push_str(new_host);
        }

        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }

        out.push_str(&self.path);

        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.remark.is_empty() {
            out.push('#');
            out.push_str(&self.remark);
        }

        out
    }
}

/// Host and port of `[userinfo@]host[:port]`. Path and query never pass
/// through the url crate, so they keep their original bytes.
fn parse_netloc(netloc: &str) -> Result<(String, Option<u16>), LinkError> {
    let host_port = netloc.rsplit_once('@').map_or(netloc, |(_, hp)| hp);

    // The url crate rejects an empty host; the host is never written back,
    // so only the port matters here.
    if host_port.is_empty() || host_port.starts_with(':') {
        let port = match host_port.strip_prefix(':') {
            Some(p) if !p.is_empty() => Some(
                p.parse::<u16>()
                    .map_err(|_| LinkError::InvalidPort(p.to_string()))?,
            ),
            _ => None,
        };
        return Ok((String::new(), port));
    }

    let locator = Url::parse(&format!("{LOCATOR_SCHEME}{netloc}"))?;
    let host = match locator.host() {
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Domain(domain)) => domain.to_lowercase(),
        None => String::new(),
    };

    Ok((host, locator.port()))
}
