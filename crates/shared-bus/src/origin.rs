//! # Origin Validation
//!
//! Decides whether a message's sender origin may be trusted by a bus that
//! was built with a merchant URL.
//!
//! A sender is trusted if it is the merchant's own origin, or if it belongs
//! to the processor's domain family:
//!
//! ```text
//! https://  [label.]*  (braintreepayments|braintreegateway|braintree-api)  .(com|cn)  [:port]
//! ```
//!
//! Known limitation: for merchant URLs whose scheme is neither `http` nor
//! `https`, the raw host including any port is kept as the origin.

/// Second-level domains owned by the processor.
pub const TRUSTED_SECOND_LEVEL_DOMAINS: [&str; 3] =
    ["braintreepayments", "braintreegateway", "braintree-api"];

/// Top-level domains the processor domains are served under.
pub const TRUSTED_TOP_LEVEL_DOMAINS: [&str; 2] = ["com", "cn"];

/// Pure origin check.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginValidator;

impl OriginValidator {
    /// Whether a message from `sender_origin` may reach a bus bound to
    /// `merchant_url`.
    #[must_use]
    pub fn is_trusted(sender_origin: &str, merchant_url: &str) -> bool {
        merchant_origin(merchant_url).is_some_and(|origin| origin == sender_origin)
            || is_processor_origin(sender_origin)
    }
}

/// Derive the origin (`scheme://host[:port]`) of a URL.
///
/// The default port of the scheme is dropped (`:443` for https, `:80` for
/// http). Path, query, fragment and userinfo are discarded. Returns `None`
/// when the URL has no `scheme://` prefix or no host.
#[must_use]
pub fn merchant_origin(url: &str) -> Option<String> {
    let (scheme, rest) = url.trim().split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    let scheme = scheme.to_ascii_lowercase();

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
        .to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    let host = match scheme.as_str() {
        "https" => host.strip_suffix(":443").unwrap_or(&host),
        "http" => host.strip_suffix(":80").unwrap_or(&host),
        _ => host.as_str(),
    };

    Some(format!("{scheme}://{host}"))
}

/// Whether `origin` belongs to the processor's own domain family.
#[must_use]
pub fn is_processor_origin(origin: &str) -> bool {
    let Some(authority) = origin.strip_prefix("https://") else {
        return false;
    };

    let host = match authority.rsplit_once(':') {
        Some((host, port)) => {
            if !is_valid_port(port) {
                return false;
            }
            host
        }
        None => authority,
    };

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    let sld = labels[labels.len() - 2];
    TRUSTED_SECOND_LEVEL_DOMAINS.contains(&sld) && TRUSTED_TOP_LEVEL_DOMAINS.contains(&tld)
}

fn is_valid_port(port: &str) -> bool {
    (1..=5).contains(&port.len()) && port.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
