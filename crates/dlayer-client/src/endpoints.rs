//! Endpoint URLs for the translation layer API
//!
//! All routes live under `translation-layer/` relative to the configured base
//! URL. Node ids and event names are arbitrary strings from the backend, so
//! they are percent-encoded as single path segments.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use dlayer_core::prelude::*;

/// Characters that must not appear raw inside one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const PREFIX: &str = "translation-layer";

/// A route relative to the translation layer prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Status,
    SupportedTypes,
    ComponentTree,
    Extensions,
    ExtensionCompatibility(&'a str),
    Component(&'a str),
    ComponentValue(&'a str),
    ComponentEvent(&'a str, &'a str),
    ExtensionValues,
    Clear,
}

impl Endpoint<'_> {
    /// Path relative to the base URL, with dynamic segments encoded
    pub fn path(&self) -> String {
        match self {
            Endpoint::Status => format!("{PREFIX}/status"),
            Endpoint::SupportedTypes => format!("{PREFIX}/supported-types"),
            Endpoint::ComponentTree => format!("{PREFIX}/component-tree"),
            Endpoint::Extensions => format!("{PREFIX}/extensions"),
            Endpoint::ExtensionCompatibility(name) => {
                format!("{PREFIX}/extensions/{}/compatibility", encode(name))
            }
            Endpoint::Component(id) => format!("{PREFIX}/component/{}", encode(id)),
            Endpoint::ComponentValue(id) => format!("{PREFIX}/component/{}/value", encode(id)),
            Endpoint::ComponentEvent(id, event) => {
                format!("{PREFIX}/component/{}/event/{}", encode(id), encode(event))
            }
            Endpoint::ExtensionValues => format!("{PREFIX}/extension-values"),
            Endpoint::Clear => format!("{PREFIX}/clear"),
        }
    }

    /// Absolute URL under `base`
    pub fn url(&self, base: &Url) -> Result<Url> {
        base.join(&self.path())
            .map_err(|e| Error::invalid_url(base.as_str(), e.to_string()))
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Parse a user-supplied base URL.
///
/// Only http(s) is accepted. A trailing slash is added so that relative joins
/// keep any path prefix (e.g. a reverse-proxy mount point).
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| Error::invalid_url(raw, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::invalid_url(
                raw,
                format!("unsupported scheme '{other}'"),
            ))
        }
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
