use axum::http::Uri;
use url::form_urlencoded;

use crate::{model::api::PaginatedDto, server::model::pagination::Page};

/// Wrap a page into the paginated response body.
///
/// `next` and `previous` are relative links to the request path, keeping every query
/// parameter of the request except `page`. The link to the first page carries no `page`
/// parameter at all.
pub fn paginated<T>(page: Page<T>, uri: &Uri) -> PaginatedDto<T> {
    let current = page.request.page;

    let next = page.has_next().then(|| page_link(uri, current + 1));
    let previous = page.has_previous().then(|| page_link(uri, current - 1));

    PaginatedDto {
        count: page.count,
        next,
        previous,
        results: page.items,
    }
}

fn page_link(uri: &Uri, page: u64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    let params = form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes());
    for (key, value) in params.filter(|(key, _)| key != "page") {
        query.append_pair(&key, &value);
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }

    let query = query.finish();
    if query.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), query)
    }
}
