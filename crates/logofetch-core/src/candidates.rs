//! Candidate CDN URLs for an identifier.
//!
//! Four variants are tried in a fixed order: the SVG symbol, the SVG logo,
//! then the untyped symbol and logo (whatever raster the CDN has).

use std::fmt;
use thiserror::Error;
use url::Url;

/// Path between the identifier and the variant suffix.
const THEME_PATH: [&str; 4] = ["theme", "dark", "fallback", "404"];

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("invalid CDN base URL {url:?}: {source}")]
    InvalidBase {
        url: String,
        source: url::ParseError,
    },
    #[error("CDN base URL {0:?} cannot carry path segments")]
    CannotBeABase(String),
    #[error("identifier {0:?} is a relative path segment and cannot name a brand")]
    DotSegment(String),
}

/// One of the four asset variants, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    SymbolSvg,
    LogoSvg,
    Symbol,
    Logo,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::SymbolSvg,
        Variant::LogoSvg,
        Variant::Symbol,
        Variant::Logo,
    ];

    /// Last path segment requested from the CDN.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::SymbolSvg => "symbol.svg",
            Variant::LogoSvg => "logo.svg",
            Variant::Symbol => "symbol",
            Variant::Logo => "logo",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Variant::SymbolSvg => "symbol (svg)",
            Variant::LogoSvg => "logo (svg)",
            Variant::Symbol => "symbol",
            Variant::Logo => "logo",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A URL to try together with the variant it requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub variant: Variant,
}

/// Builds the four candidate URLs for `identifier`, in priority order.
///
/// The identifier is inserted as one percent-encoded path segment, so `/` or
/// `?` inside it cannot alter the request path or query. `.` and `..` (also
/// spelled with `%2e`) would be dropped from the path by URL normalization,
/// so they are rejected.
pub fn build_candidates(
    base_url: &str,
    identifier: &str,
    client_id: &str,
) -> Result<Vec<Candidate>, CandidateError> {
    if is_dot_segment(identifier) {
        return Err(CandidateError::DotSegment(identifier.to_string()));
    }
    let base = Url::parse(base_url).map_err(|source| CandidateError::InvalidBase {
        url: base_url.to_string(),
        source,
    })?;

    Variant::ALL
        .iter()
        .map(|&variant| -> Result<Candidate, CandidateError> {
            let mut url = base.clone();
            {
                let mut segments = url
                    .path_segments_mut()
                    .map_err(|_| CandidateError::CannotBeABase(base_url.to_string()))?;
                segments.pop_if_empty();
                segments.push(identifier);
                segments.extend(THEME_PATH);
                segments.push(variant.suffix());
            }
            url.set_query(None);
            url.query_pairs_mut().append_pair("c", client_id);
            Ok(Candidate {
                url: url.into(),
                variant,
            })
        })
        .collect()
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_candidates_in_priority_order() {
        let c = build_candidates("https://cdn.example.com", "carrefour.com", "tok").unwrap();
        let urls: Vec<&str> = c.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://cdn.example.com/carrefour.com/theme/dark/fallback/404/symbol.svg?c=tok",
                "https://cdn.example.com/carrefour.com/theme/dark/fallback/404/logo.svg?c=tok",
                "https://cdn.example.com/carrefour.com/theme/dark/fallback/404/symbol?c=tok",
                "https://cdn.example.com/carrefour.com/theme/dark/fallback/404/logo?c=tok",
            ]
        );
        let variants: Vec<Variant> = c.iter().map(|c| c.variant).collect();
        assert_eq!(variants, Variant::ALL);
    }

    #[test]
    fn base_with_trailing_slash_and_path() {
        let c = build_candidates("http://127.0.0.1:8080/cdn/", "AAPL", "").unwrap();
        assert_eq!(
            c[0].url,
            "http://127.0.0.1:8080/cdn/AAPL/theme/dark/fallback/404/symbol.svg?c="
        );
    }

    #[test]
    fn identifier_is_one_encoded_segment() {
        let c = build_candidates("https://cdn.example.com", "a/b?x", "t").unwrap();
        assert!(c[0].url.starts_with("https://cdn.example.com/a%2Fb%3Fx/theme/"));
        assert!(c[0].url.ends_with("symbol.svg?c=t"));
    }

    #[test]
    fn invalid_base_is_an_error() {
        assert!(matches!(
            build_candidates("not a url", "x", "t"),
            Err(CandidateError::InvalidBase { .. })
        ));
        assert!(matches!(
            build_candidates("mailto:someone@example.com", "x", "t"),
            Err(CandidateError::CannotBeABase(_))
        ));
    }

    #[test]
    fn labels_distinguish_typed_variants() {
        assert_eq!(Variant::Symbol.label(), "symbol");
        assert_ne!(Variant::SymbolSvg.label(), Variant::Symbol.label());
    }

    #[test]
    fn dot_segments_are_rejected() {
        for id in [".", "..", "%2e", ".%2E", "%2e%2e"] {
            assert!(
                matches!(
                    build_candidates("https://cdn.example.com", id, "t"),
                    Err(CandidateError::DotSegment(_))
                ),
                "{id} should be rejected"
            );
        }
        let c = build_candidates("https://cdn.example.com", "...", "t").unwrap();
        assert!(c[0].url.starts_with("https://cdn.example.com/.../theme/"));
    }
}
