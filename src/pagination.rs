//! Pagination links embedded in a payload.
//!
//! Resource list responses carry a top-level `links` object whose members are either plain
//! strings or objects with an `href`. The inspector doesn't fetch anything itself; it only
//! surfaces the continuation so the caller can issue the next request.
use log::trace;
use url::Url;

use crate::JsonValue;

/// The link relations picked out of a payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub current: Option<Url>,
    pub first: Option<Url>,
    pub prev: Option<Url>,
    pub next: Option<Url>,
    pub last: Option<Url>,
}

impl PageLinks {
    /// Extract the links from a payload. Relative hrefs are resolved against `base` when one is
    /// given and dropped otherwise, as are hrefs that don't parse
    pub fn from_value(value: &JsonValue, base: Option<&Url>) -> Self {
        let links = match value.get("links") {
            Some(links) => links,
            None => return Self::default(),
        };
        let link = |relation: &str| links.get(relation).and_then(|l| resolve(l, base));
        Self {
            current: link("self"),
            first: link("first"),
            prev: link("prev"),
            next: link("next"),
            last: link("last"),
        }
    }

    /// The continuation, if there are more pages
    pub fn next(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Turn a single link member into an absolute URL
fn resolve(link: &JsonValue, base: Option<&Url>) -> Option<Url> {
    let href = match link {
        JsonValue::String(href) => &**href,
        JsonValue::Object(_) => link.get("href")?.as_str()?,
        _ => return None,
    };
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    match resolved {
        Ok(url) => Some(url),
        Err(err) => {
            trace!("ignoring unusable link {:?}: {}", href, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageLinks;
    use crate::parse_literal;
    use url::Url;

    #[test]
    fn object_and_string_links_should_both_be_read() {
        let value = parse_literal!(
            r#"{"data": [], "links": {
                "self": {"href": "https://cms.example.com/jsonapi/node/page"},
                "next": "https://cms.example.com/jsonapi/node/page?page%5Boffset%5D=50"
            }}"#
        );
        let links = PageLinks::from_value(&value, None);
        assert_eq!(
            links.current.unwrap().as_str(),
            "https://cms.example.com/jsonapi/node/page"
        );
        assert_eq!(
            links.next.unwrap().query(),
            Some("page%5Boffset%5D=50")
        );
        assert!(links.prev.is_none());
    }

    #[test]
    fn relative_links_should_need_a_base() {
        let value = parse_literal!(r#"{"links": {"next": "/jsonapi/node/page?page=2"}}"#);
        assert!(!PageLinks::from_value(&value, None).has_next());
        let base = Url::parse("https://cms.example.com/jsonapi/node/page").unwrap();
        let links = PageLinks::from_value(&value, Some(&base));
        assert_eq!(
            links.next().unwrap().as_str(),
            "https://cms.example.com/jsonapi/node/page?page=2"
        );
    }

    #[test]
    fn payloads_without_links_should_have_none() {
        for source in [r#"{"data": []}"#, r#"{"links": {"next": null}}"#, "[1, 2]"] {
            let value = parse_literal!(source);
            assert_eq!(PageLinks::from_value(&value, None), PageLinks::default());
        }
    }
}
