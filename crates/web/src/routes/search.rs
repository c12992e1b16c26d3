//! Search screen route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use fashion_assistant_core::{Product, UserPreferences};
use serde::Deserialize;
use tracing::instrument;

use crate::assistant::{SearchOutcome, SearchState};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::SessionContextHandle;
use crate::state::AppState;

/// Search form submission.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

/// Preferences as shown in the summary control.
#[derive(Clone, Debug, Default)]
pub struct PreferencesView {
    pub gender: String,
    pub price: String,
    pub styles: Vec<String>,
}

impl From<UserPreferences> for PreferencesView {
    fn from(prefs: UserPreferences) -> Self {
        Self {
            gender: prefs.user_gender,
            price: prefs.user_price,
            styles: prefs.user_styles,
        }
    }
}

/// Product card display data. Empty strings are left out of the card.
#[derive(Clone, Debug)]
pub struct ProductCardView {
    pub title: String,
    pub image_url: String,
    pub store: String,
    pub rating: String,
    pub rating_count: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            image_url: product.primary_image().unwrap_or_default().to_string(),
            store: product.store.clone().unwrap_or_default(),
            rating: product
                .average_rating
                .map(|r| r.to_string())
                .unwrap_or_default(),
            rating_count: product
                .rating_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            price: product.display_price().unwrap_or_default().to_string(),
        }
    }
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query_text: String,
    pub is_loading: bool,
    pub products: Vec<ProductCardView>,
    pub use_preferences: bool,
    pub summary_open: bool,
    pub preferences: PreferencesView,
}

impl SearchTemplate {
    fn new(state: &SearchState, preferences: UserPreferences) -> Self {
        Self {
            query_text: state.query_text.clone(),
            is_loading: state.is_loading,
            products: state.results.iter().map(ProductCardView::from).collect(),
            use_preferences: state.use_preferences,
            summary_open: state.summary_open,
            preferences: preferences.into(),
        }
    }
}

/// Render the search screen.
#[instrument(skip_all, fields(session_id = %ctx.id()))]
pub async fn show(ctx: SessionContextHandle) -> Response {
    if !ctx.onboarding_complete() {
        return Redirect::to("/onboarding").into_response();
    }

    let state = ctx.search().snapshot();
    SearchTemplate::new(&state, ctx.preferences().get_preferences()).into_response()
}

/// Run a search and go back to the search screen.
///
/// Service failures are logged by the search screen and do not change the
/// response. Before onboarding is complete nothing is searched.
#[instrument(skip(state, ctx), fields(session_id = %ctx.id()))]
pub async fn submit(
    State(state): State<AppState>,
    ctx: SessionContextHandle,
    Form(form): Form<SearchForm>,
) -> Redirect {
    if !ctx.onboarding_complete() {
        return Redirect::to("/onboarding");
    }

    add_breadcrumb("search", "Submitted search", Some(&[("query", form.q.as_str())]));

    let outcome = ctx
        .search()
        .search(&form.q, ctx.preferences(), state.search())
        .await;
    if outcome == SearchOutcome::InFlight {
        tracing::debug!("Search already running");
    }

    Redirect::to("/search")
}
