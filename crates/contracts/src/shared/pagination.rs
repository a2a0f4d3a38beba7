//! List envelopes and derived page metadata.
//!
//! The API answers list endpoints either with a paginated envelope
//! `{count, next, previous, results}` or, for unpaginated resources, with a
//! bare JSON array. Both are normalized into [`Page`] at the API boundary.
//! The backend never tells us the current page number: it is inferred from
//! the page embedded in the `next` / `previous` links.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawList<T> {
    Paged {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

/// Normalized list envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: None,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawList::<T>::deserialize(deserializer)?;
        Ok(match raw {
            RawList::Paged {
                count,
                next,
                previous,
                results,
            } => Page {
                count,
                next,
                previous,
                results,
            },
            RawList::Bare(results) => Page {
                count: Some(results.len() as u64),
                next: None,
                previous: None,
                results,
            },
        })
    }
}

impl<T> Page<T> {
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

/// Page/page-size pair carried by a server pagination link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LinkParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Parse `page` / `page_size` out of a (possibly absolute) pagination link.
/// Unknown or malformed parameters are ignored.
pub fn link_params(link: &str) -> LinkParams {
    let query = match link.split_once('?') {
        Some((_, q)) => q,
        None => return LinkParams::default(),
    };
    let query = query.split('#').next().unwrap_or(query);

    // Only the two keys we care about are handed to serde_qs; the rest of the
    // query may contain bracketed keys it would reject.
    let relevant: Vec<&str> = query
        .split('&')
        .filter(|pair| pair.starts_with("page=") || pair.starts_with("page_size="))
        .collect();

    serde_qs::from_str::<LinkParams>(&relevant.join("&")).unwrap_or_default()
}

/// Page metadata consumed by pagination controls. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            count: 0,
            current_page: 1,
            total_pages: 1,
            page_size: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

/// `ceil(count / page_size)`, never below 1.
pub fn total_pages(count: Option<u64>, page_size: u32) -> u32 {
    let count = count.unwrap_or(0);
    if count == 0 || page_size == 0 {
        return 1;
    }
    let pages = count.div_ceil(page_size as u64);
    pages.clamp(1, u32::MAX as u64) as u32
}

/// Infer the current page from the links of a response.
///
/// `next` carries page N+1; `previous` carries page N-1, and for page 2 the
/// backend drops the `page` parameter entirely, which reads as page 1.
/// Assumes the page size did not change between the two requests.
pub fn current_page_from_links(next: Option<&str>, previous: Option<&str>) -> u32 {
    if let Some(next) = next {
        if let Some(page) = link_params(next).page {
            return page.saturating_sub(1).max(1);
        }
    }
    if let Some(previous) = previous {
        let page = link_params(previous).page.unwrap_or(1);
        return page.saturating_add(1);
    }
    1
}

/// Derive pagination metadata from an envelope.
///
/// `requested_page_size` is what the request asked for; a `page_size` echoed
/// in the links wins when present since that is what the server applied.
pub fn derive_page_meta<T>(page: &Page<T>, requested_page_size: u32) -> PageMeta {
    let echoed = page
        .next
        .as_deref()
        .or(page.previous.as_deref())
        .and_then(|link| link_params(link).page_size);
    let page_size = echoed.filter(|s| *s > 0).unwrap_or(requested_page_size);

    let total = total_pages(page.count, page_size);
    let current = current_page_from_links(page.next.as_deref(), page.previous.as_deref());

    PageMeta {
        count: page.count.unwrap_or(0),
        current_page: current.min(total).max(1),
        total_pages: total,
        page_size,
        has_next: page.next.is_some(),
        has_previous: page.previous.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(count: Option<u64>, next: Option<&str>, previous: Option<&str>) -> Page<u32> {
        Page {
            count,
            next: next.map(str::to_string),
            previous: previous.map(str::to_string),
            results: vec![],
        }
    }

    #[test]
    fn test_envelope_and_bare_array_normalize() {
        let paged: Page<u32> = serde_json::from_str(
            r#"{"count": 3, "next": null, "previous": null, "results": [1, 2, 3]}"#,
        )
        .unwrap();
        assert_eq!(paged.count, Some(3));
        assert_eq!(paged.results, vec![1, 2, 3]);

        let bare: Page<u32> = serde_json::from_str("[4, 5]").unwrap();
        assert_eq!(bare.count, Some(2));
        assert!(bare.next.is_none());
        assert_eq!(bare.results, vec![4, 5]);
    }

    #[test]
    fn test_middle_page_from_both_links() {
        let p = page(
            Some(47),
            Some("http://api.local/api/productos/?page=3&page_size=20"),
            Some("http://api.local/api/productos/?page=1&page_size=20"),
        );
        let meta = derive_page_meta(&p, 20);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.count, 47);
    }

    #[test]
    fn test_second_page_previous_without_page_param() {
        let p = page(
            Some(100),
            None,
            Some("http://api.local/api/productos/?page_size=50&search=trw"),
        );
        let meta = derive_page_meta(&p, 50);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_last_page_from_previous() {
        let p = page(Some(47), None, Some("/api/productos/?page=2&page_size=20"));
        assert_eq!(derive_page_meta(&p, 20).current_page, 3);
    }

    #[test]
    fn test_no_links_defaults_to_first_page() {
        let meta = derive_page_meta(&page(Some(5), None, None), 24);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_total_pages_is_ceiling_and_at_least_one() {
        assert_eq!(total_pages(Some(0), 20), 1);
        assert_eq!(total_pages(None, 20), 1);
        assert_eq!(total_pages(Some(1), 20), 1);
        assert_eq!(total_pages(Some(20), 20), 1);
        assert_eq!(total_pages(Some(21), 20), 2);
        assert_eq!(total_pages(Some(47), 20), 3);
        assert_eq!(total_pages(Some(1000), 24), 42);
        for count in 1..200u64 {
            for size in [1u32, 7, 12, 24, 48] {
                let expected = ((count as f64) / (size as f64)).ceil() as u32;
                assert_eq!(total_pages(Some(count), size), expected);
            }
        }
    }

    #[test]
    fn test_echoed_page_size_wins() {
        let p = page(Some(100), Some("/api/productos/?page=2&page_size=50"), None);
        let meta = derive_page_meta(&p, 24);
        assert_eq!(meta.page_size, 50);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_link_params_ignores_other_keys() {
        let params = link_params("https://x/api/productos/?marca%5B%5D=3&page=4&has_photo=false");
        assert_eq!(params.page, Some(4));
        assert_eq!(params.page_size, None);
        assert_eq!(link_params("no-query"), LinkParams::default());
        assert_eq!(link_params("/x/?page=abc").page, None);
    }
}
