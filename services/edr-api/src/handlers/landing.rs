//! Landing page handler.

use axum::{extract::Extension, http::HeaderMap, response::Response};
use edr_protocol::{media_types, LandingPage};
use std::sync::Arc;

use super::{cached_json_response, record_request};
use crate::content_negotiation::check_metadata_accept;
use crate::state::AppState;

/// GET /edr - Landing page
pub async fn landing_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    record_request("landing");

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    cached_json_response(media_types::JSON, 300, &landing_page(&state))
}

fn landing_page(state: &AppState) -> LandingPage {
    let landing = &state.config.landing;
    let mut page = LandingPage::new(&landing.title, &landing.description, &state.base_url)
        .with_keywords(landing.keywords.clone());

    if let Some(provider) = &landing.provider {
        page = page.with_provider(provider.clone());
    }
    if let Some(contact) = &landing.contact {
        page = page.with_contact(contact.clone());
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdrConfig;
    use edr_protocol::Provider;
    use observations::Dataset;

    #[test]
    fn test_landing_page_from_config() {
        let mut config = EdrConfig::default();
        config.landing.provider = Some(Provider {
            name: Some("KNMI".to_string()),
            url: None,
        });
        let state = AppState::new(Dataset::builder().build().unwrap(), config, "http://localhost/edr/");

        let page = landing_page(&state);
        assert!(page.links.iter().any(|l| l.rel == "self" && l.href == "http://localhost/edr"));
        assert!(page.links.iter().any(|l| l.rel == "conformance"));
        assert!(page.links.iter().any(|l| l.rel == "data"));
        assert!(page.keywords.is_none());

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["provider"]["name"], "KNMI");
        assert!(json.get("contact").is_none());
    }
}
