//! URL deriver.
//!
//! A URL is composed from several sub-derivations: the scheme and TLD are
//! picked by the key path itself, host and path are strings derived under
//! `keys + ["host"]` and `keys + ["path"]`.

use url::Url;

use crate::derivers::numeric::uint;
use crate::derivers::text::string;
use crate::error::KeygenError;

const SCHEMES: [&str; 2] = ["https", "http"];
const TLDS: [&str; 3] = [".com", ".org", ".net"];

fn extend<S: AsRef<str>>(keys: &[S], segment: &str) -> Vec<String> {
    keys.iter()
        .map(|k| k.as_ref().to_string())
        .chain(std::iter::once(segment.to_string()))
        .collect()
}

/// Compose the URL text for a key path, before parsing.
pub fn compose<S: AsRef<str>>(keys: &[S]) -> String {
    let selector = uint(keys);
    format!(
        "{}://{}{}/{}",
        SCHEMES[selector % SCHEMES.len()],
        string(&extend(keys, "host")),
        TLDS[selector % TLDS.len()],
        string(&extend(keys, "path")),
    )
}

/// Parse composed URL text.
pub fn parse(raw: String) -> Result<Url, KeygenError> {
    Url::parse(&raw).map_err(|source| KeygenError::InvalidUrl { url: raw, source })
}

/// Compose and parse the URL for a key path.
pub fn url<S: AsRef<str>>(keys: &[S]) -> Result<Url, KeygenError> {
    parse(compose(keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_components() {
        let keys = ["data", "1"];
        let u = url(&keys).unwrap();

        assert!(u.scheme() == "https" || u.scheme() == "http");
        let host = u.host_str().unwrap();
        assert!(TLDS.iter().any(|tld| host.ends_with(tld)));
        // Hosts are normalised to lower case by the parser.
        assert!(host.starts_with(&string(&extend(&keys, "host")).to_lowercase()));
        assert_eq!(u.path(), format!("/{}", string(&extend(&keys, "path"))));
    }

    #[test]
    fn test_url_picks_every_scheme_and_tld() {
        let urls: Vec<Url> = (0..200)
            .map(|i| url(&["site", i.to_string().as_str()]).unwrap())
            .collect();

        for scheme in SCHEMES {
            assert!(urls.iter().any(|u| u.scheme() == scheme));
        }
        for tld in TLDS {
            assert!(urls
                .iter()
                .any(|u| u.host_str().is_some_and(|h| h.ends_with(tld))));
        }
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        let err = parse("https://a b.com/path".to_string()).unwrap_err();
        assert!(matches!(
            err,
            KeygenError::InvalidUrl { ref url, .. } if url == "https://a b.com/path"
        ));

        let err = parse("https://".to_string()).unwrap_err();
        assert!(err.to_string().starts_with("invalid url \"https://\""));
    }

    #[test]
    fn test_url_parses_composition() {
        let keys = ["data", "7"];
        assert_eq!(url(&keys).unwrap(), Url::parse(&compose(&keys)).unwrap());
    }

    #[test]
    fn test_extend_does_not_touch_input() {
        let keys = vec!["a".to_string()];
        assert_eq!(extend(&keys, "host"), vec!["a", "host"]);
        assert_eq!(keys, vec!["a"]);
    }
}
