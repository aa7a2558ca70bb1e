//! Live-reload protocol: the dev server's two signals and the page-side
//! helpers they drive.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::error::DomainError;

/// Query parameter appended to stylesheet URLs to defeat caching.
pub const CACHE_OVERRIDE_PARAM: &str = "_cacheOverride";

static CACHE_OVERRIDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(&|\?)_cacheOverride=\d+").expect("cache override pattern compiles")
});

// ── ReloadCommand ────────────────────────────────────────────────────────────

/// A recognized live-reload message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReloadCommand {
    /// Reload the whole page.
    Reload,
    /// Re-fetch every stylesheet.
    RefreshCss,
}

impl ReloadCommand {
    /// Recognize a text payload. Anything but the two exact keywords is
    /// ignored.
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "reload" => Some(Self::Reload),
            "refreshcss" => Some(Self::RefreshCss),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::RefreshCss => "refreshcss",
        }
    }
}

impl fmt::Display for ReloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Endpoint ─────────────────────────────────────────────────────────────────

/// Derive the socket endpoint for a page: `<ws|wss>://<host><path>/ws`.
///
/// Plain `http` pages use `ws`; every other scheme uses `wss`.
pub fn endpoint_for(page_url: &str) -> Result<Url, DomainError> {
    let invalid = |reason: String| DomainError::InvalidUrl {
        url: page_url.to_string(),
        reason,
    };

    let page = Url::parse(page_url).map_err(|e| invalid(e.to_string()))?;
    let host = page
        .host_str()
        .ok_or_else(|| invalid("page URL has no host".into()))?;

    let scheme = if page.scheme() == "http" { "ws" } else { "wss" };
    let authority = match page.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Url::parse(&format!("{scheme}://{authority}{}/ws", page.path()))
        .map_err(|e| invalid(e.to_string()))
}

// ── Stylesheets ──────────────────────────────────────────────────────────────

/// A `<link>` element as far as stylesheet refresh cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetLink {
    pub rel: String,
    pub href: Option<String>,
}

impl StylesheetLink {
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self {
            rel: "stylesheet".into(),
            href: Some(href.into()),
        }
    }

    /// Links with an empty `rel` or `rel="stylesheet"` are refreshed. A
    /// missing href counts as empty.
    pub fn is_refreshable(&self) -> bool {
        self.rel.is_empty() || self.rel.eq_ignore_ascii_case("stylesheet")
    }
}

/// Replace any previous cache override in `href` with one stamped `stamp`.
pub fn cache_bust(href: &str, stamp: i64) -> String {
    let url = CACHE_OVERRIDE_RE.replace(href, "");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{CACHE_OVERRIDE_PARAM}={stamp}")
}

/// Detach and reattach every link in order, re-stamping refreshable ones.
///
/// Returns how many links were re-stamped.
pub fn refresh_stylesheets(links: &mut Vec<StylesheetLink>, stamp: i64) -> usize {
    let mut refreshed = 0;
    let detached = std::mem::take(links);
    for mut link in detached {
        if link.is_refreshable() {
            let href = link.href.as_deref().unwrap_or_default();
            link.href = Some(cache_bust(href, stamp));
            refreshed += 1;
        }
        links.push(link);
    }
    refreshed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_exact_keywords() {
        assert_eq!(ReloadCommand::parse("reload"), Some(ReloadCommand::Reload));
        assert_eq!(
            ReloadCommand::parse("refreshcss"),
            Some(ReloadCommand::RefreshCss)
        );
        assert_eq!(ReloadCommand::parse("Reload"), None);
        assert_eq!(ReloadCommand::parse(" reload"), None);
        assert_eq!(ReloadCommand::parse("ping"), None);
    }

    #[test]
    fn http_page_uses_ws() {
        let url = endpoint_for("http://127.0.0.1:5500/index.html").unwrap();
        assert_eq!(url.as_str(), "ws://127.0.0.1:5500/index.html/ws");
    }

    #[test]
    fn https_page_uses_wss() {
        let url = endpoint_for("https://example.com/app").unwrap();
        assert_eq!(url.as_str(), "wss://example.com/app/ws");
    }

    #[test]
    fn root_page_keeps_double_slash() {
        let url = endpoint_for("http://localhost:8080/").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8080//ws");
    }

    #[test]
    fn page_without_host_is_rejected() {
        assert!(matches!(
            endpoint_for("file:///tmp/index.html"),
            Err(DomainError::InvalidUrl { .. })
        ));
        assert!(endpoint_for("not a url").is_err());
    }

    #[test]
    fn cache_bust_appends_query() {
        assert_eq!(cache_bust("style.css", 42), "style.css?_cacheOverride=42");
        assert_eq!(
            cache_bust("style.css?v=2", 42),
            "style.css?v=2&_cacheOverride=42"
        );
    }

    #[test]
    fn cache_bust_replaces_previous_stamp() {
        assert_eq!(
            cache_bust("style.css?_cacheOverride=1", 2),
            "style.css?_cacheOverride=2"
        );
        assert_eq!(
            cache_bust("style.css?v=2&_cacheOverride=1", 2),
            "style.css?v=2&_cacheOverride=2"
        );
    }

    #[test]
    fn refresh_skips_non_stylesheets_and_stamps_missing_href() {
        let mut links = vec![
            StylesheetLink::stylesheet("a.css"),
            StylesheetLink {
                rel: "icon".into(),
                href: Some("favicon.ico".into()),
            },
            StylesheetLink {
                rel: String::new(),
                href: Some("b.css".into()),
            },
            StylesheetLink {
                rel: "STYLESHEET".into(),
                href: None,
            },
        ];
        assert_eq!(refresh_stylesheets(&mut links, 7), 3);
        assert_eq!(links[0].href.as_deref(), Some("a.css?_cacheOverride=7"));
        assert_eq!(links[1].href.as_deref(), Some("favicon.ico"));
        assert_eq!(links[2].href.as_deref(), Some("b.css?_cacheOverride=7"));
        assert_eq!(links[3].href.as_deref(), Some("?_cacheOverride=7"));
    }
}
