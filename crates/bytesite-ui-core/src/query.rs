use url::Url;

pub const DOMAIN_PARAM: &str = "domain";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("url is not absolute or could not be parsed: {0}")]
    InvalidUrl(String),
}

pub fn query_param(href: &str, name: &str) -> Result<Option<String>, QueryError> {
    let url = Url::parse(href).map_err(|error| QueryError::InvalidUrl(error.to_string()))?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned()))
}

/// Sets `name` to `value` the way `URLSearchParams.set` does: the first
/// occurrence is replaced in place, later duplicates are dropped, and the
/// pair is appended when absent. The fragment is kept.
pub fn with_query_param(href: &str, name: &str, value: &str) -> Result<String, QueryError> {
    let mut url = Url::parse(href).map_err(|error| QueryError::InvalidUrl(error.to_string()))?;
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, existing) in url.query_pairs() {
        if key == name {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
            continue;
        }
        pairs.push((key.into_owned(), existing.into_owned()));
    }
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url.to_string())
}

/// The in-page fragment an anchor targets, or `None` for a bare `#` or any
/// href that is not a fragment.
pub fn in_page_fragment(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() { None } else { Some(fragment) }
}
