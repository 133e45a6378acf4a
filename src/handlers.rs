use crate::forms::{self, FormError, FormKind, Notification};
use crate::language::{CookieStore, Language, LanguageSwitcher};
use crate::models::Page;
use crate::render;
use crate::AppState;
use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "handler_tests.rs"]
mod handler_tests;

#[derive(Debug, Default, serde::Deserialize)]
pub struct PageQuery {
    /// Language toggle, `en` or `sq`.
    pub lang: Option<String>,
    /// Project card to show in the detail lightbox.
    pub open: Option<String>,
    /// Product whose logo is shown in the image lightbox.
    pub view: Option<String>,
    /// Project gallery filter, a category name or `all`.
    pub category: Option<String>,
}

struct Submission {
    kind: FormKind,
    fields: HashMap<String, String>,
    result: Result<(), FormError>,
}

pub async fn get_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    render_page(&state, Page::Index, &headers, &query, None).await
}

pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    match Page::from_name(&name) {
        Some(page) => render_page(&state, page, &headers, &query, None).await,
        None => (StatusCode::NOT_FOUND, "Page not found").into_response(),
    }
}

pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    render_page(&state, Page::Contact, &headers, &query, None).await
}

pub async fn get_partner(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    render_page(&state, Page::Partner, &headers, &query, None).await
}

pub async fn post_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    submit(&state, FormKind::Contact, Page::Contact, &headers, &query, fields).await
}

pub async fn post_partner(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    submit(&state, FormKind::Partner, Page::Partner, &headers, &query, fields).await
}

pub async fn hero_pointer_enter(State(state): State<Arc<AppState>>) -> StatusCode {
    state.service.slider.pointer_enter();
    StatusCode::NO_CONTENT
}

pub async fn hero_pointer_leave(State(state): State<Arc<AppState>>) -> StatusCode {
    state.service.slider.pointer_leave();
    StatusCode::NO_CONTENT
}

async fn submit(
    state: &AppState,
    kind: FormKind,
    page: Page,
    headers: &HeaderMap,
    query: &PageQuery,
    fields: HashMap<String, String>,
) -> Response {
    let result = forms::validate(kind, &fields);
    match &result {
        // Submissions are not delivered anywhere yet.
        Ok(()) => tracing::info!("Accepted {:?} form with {} field(s)", kind, fields.len()),
        Err(e) => tracing::debug!("Rejected {:?} form: {}", kind, e),
    }
    let submission = Submission { kind, fields, result };
    render_page(state, page, headers, query, Some(submission)).await
}

async fn render_page(
    state: &AppState,
    page: Page,
    headers: &HeaderMap,
    query: &PageQuery,
    submission: Option<Submission>,
) -> Response {
    let mut doc = match state.templates.load(page).await {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!("Failed to load template: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load page").into_response();
        }
    };

    let mut store = CookieStore::from_headers(headers);
    let mut switcher = LanguageSwitcher::new();
    switcher.restore(&mut doc, &mut store);
    if let Some(code) = query.lang.as_deref() {
        match code.parse::<Language>() {
            Ok(lang) => {
                switcher.switch_language(&mut doc, lang, &mut store);
            }
            Err(e) => tracing::debug!("Ignoring language toggle: {}", e),
        }
    }
    let lang = switcher.current();

    let hydration = state.service.hydrate(page, &mut doc, lang).await;
    switcher.refresh(&mut doc);

    if let Some(filter) = query.category.as_deref() {
        let visible = render::apply_gallery_filter(&mut doc, filter);
        tracing::debug!("Gallery filter '{}' shows {} card(s)", filter, visible);
    }

    let i18n = &state.service.i18n;
    if let Some(key) = query.open.as_deref() {
        match hydration.projects.open(key) {
            Some(project) => {
                render::open_project_lightbox(&mut doc, project, lang, i18n);
            }
            None => tracing::debug!("No project card '{}' to open", key),
        }
    }
    if let Some(key) = query.view.as_deref() {
        match hydration.products.logo(key) {
            Some(logo) => {
                render::open_image_lightbox(&mut doc, logo);
            }
            None => tracing::debug!("No product image '{}' to view", key),
        }
    }

    if let Some(submission) = submission {
        if submission.result.is_err() {
            forms::refill(&mut doc, submission.kind, &submission.fields);
        }
        Notification::for_result(submission.kind, &submission.result, i18n, lang).show(&mut doc);
    }

    let html = match doc.to_html() {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to serialise {} page: {}", page.name(), e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response();
        }
    };

    let mut response = Html(html).into_response();
    if let Some(cookie) = store.set_cookie() {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid preference cookie: {}", e),
        }
    }
    response
}
