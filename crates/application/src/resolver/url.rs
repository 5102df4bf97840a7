//! URL decomposition for the `url` modifier.

use envres_domain::{Mapping, Value};
use url::Url;

/// Splits an absolute URL into `scheme`, `host`, `port`, `user`, `pass`,
/// `path`, `query` and `fragment`.
///
/// The path loses its leading `/`. Missing components are `Null`, except the
/// path which is empty. A port written out in the URL is kept even when it is
/// the scheme default.
///
/// # Errors
///
/// Returns the reason the URL was rejected.
pub fn decompose_url(text: &str) -> Result<Mapping, &'static str> {
    let url = Url::parse(text).map_err(|_| "Invalid URL in env var")?;

    let host = url.host_str().filter(|host| !host.is_empty());
    let Some(host) = host else {
        return Err("Invalid URL in env var: scheme and host expected");
    };

    if has_backslash_before_query(text) && !(cfg!(windows) && url.scheme() == "file") {
        return Err("Invalid URL in env var: backslashes are not allowed");
    }

    if has_forbidden_whitespace(text) {
        return Err(
            "Invalid URL in env var: leading/trailing ASCII control characters or whitespaces are not allowed",
        );
    }

    let user = match (url.username(), url.password()) {
        ("", None) => Value::Null,
        (user, _) => Value::String(percent_decode(user)),
    };
    let pass = url
        .password()
        .map_or(Value::Null, |pass| Value::String(percent_decode(pass)));

    let mut parts = Mapping::new();
    parts.insert("scheme".to_string(), Value::from(url.scheme()));
    parts.insert("host".to_string(), Value::from(host));
    parts.insert(
        "port".to_string(),
        explicit_port(&url, text).map_or(Value::Null, |port| Value::Int(i64::from(port))),
    );
    parts.insert("user".to_string(), user);
    parts.insert("pass".to_string(), pass);
    parts.insert(
        "path".to_string(),
        Value::from(url.path().strip_prefix('/').unwrap_or(url.path())),
    );
    parts.insert("query".to_string(), optional(url.query()));
    parts.insert("fragment".to_string(), optional(url.fragment()));

    Ok(parts)
}

fn optional(component: Option<&str>) -> Value {
    component.map_or(Value::Null, Value::from)
}

fn percent_decode(text: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(text.as_bytes())).into_owned()
}

/// `Url::port` elides the scheme default, so a non-empty port in the raw
/// authority falls back to the known default.
fn explicit_port(url: &Url, text: &str) -> Option<u16> {
    url.port().or_else(|| {
        let after_scheme = text.split_once("://").map_or(text, |(_, rest)| rest);
        let authority = after_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
        let port_start = host_port.rfind(']').unwrap_or(0);
        let written = host_port[port_start..]
            .rsplit_once(':')
            .is_some_and(|(_, port)| !port.is_empty());
        if written { url.port_or_known_default() } else { None }
    })
}

fn has_backslash_before_query(text: &str) -> bool {
    let authority_and_path = text.split(['?', '#']).next().unwrap_or_default();
    authority_and_path.contains('\\')
}

fn has_forbidden_whitespace(text: &str) -> bool {
    let bytes = text.as_bytes();
    let edge_is_control = |b: Option<&u8>| b.is_some_and(|b| *b <= b' ');
    edge_is_control(bytes.first())
        || edge_is_control(bytes.last())
        || bytes.iter().any(|b| matches!(b, b'\r' | b'\n' | b'\t'))
}
