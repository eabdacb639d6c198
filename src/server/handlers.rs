//! HTTP handlers for the product catalog
//!
//! One free async function per route and method. Each handler parses its
//! input, talks to the [`ProductService`] and answers with a rendered page or
//! a redirect. Validation failures re-render the form with status 200; missing
//! products and pages become [`MarketError`] 404 responses.

use crate::core::search::SEARCH_MAX_LENGTH;
use crate::core::{
    Category, CategoryChoice, FormErrors, MarketError, Page, PageNumber, PaginationMeta, Product,
    ProductForm, ProductQuery, ProductService, SearchForm, PAGE_SIZE,
};
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::info;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ProductService>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(service: Arc<dyn ProductService>, templates: Tera) -> Self {
        Self {
            service,
            templates: Arc::new(templates),
        }
    }

    fn render(&self, template: &str, context: &Context) -> Result<Html<String>, MarketError> {
        Ok(Html(self.templates.render(template, context)?))
    }
}

/// Query parameters accepted by the listing pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub search: Option<String>,

    /// Older spelling of `search`
    pub name: Option<String>,

    pub page: Option<String>,
}

impl ListParams {
    fn search_form(&self) -> SearchForm {
        SearchForm {
            search: self.search.clone(),
            name: self.name.clone(),
        }
    }
}

/// A product as shown in templates
#[derive(Serialize)]
struct ProductView<'a> {
    #[serde(flatten)]
    product: &'a Product,
    category_label: &'static str,
}

impl<'a> From<&'a Product> for ProductView<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            product,
            category_label: product.category.label(),
        }
    }
}

/// Search box state as shown in templates
#[derive(Serialize)]
struct SearchView {
    /// What the user typed, shown back verbatim
    value: String,
    /// The term actually applied, carried into pagination links
    term: Option<String>,
    errors: FormErrors,
    max_length: usize,
}

impl From<&SearchForm> for SearchView {
    fn from(form: &SearchForm) -> Self {
        Self {
            value: form.raw_term().to_string(),
            term: form.term(),
            errors: form.errors(),
            max_length: SEARCH_MAX_LENGTH,
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, MarketError> {
    Uuid::parse_str(raw).map_err(|_| MarketError::not_found(raw))
}

async fn load_product(state: &AppState, raw_id: &str) -> Result<Product, MarketError> {
    let id = parse_id(raw_id)?;
    state
        .service
        .get(&id)
        .await?
        .ok_or_else(|| MarketError::not_found(id))
}

fn all_choices() -> Vec<CategoryChoice> {
    Category::choices()
}

fn listing_context(
    page: &Page<Product>,
    search: &SearchForm,
    categories: Vec<CategoryChoice>,
) -> Context {
    let products: Vec<ProductView<'_>> = page.items.iter().map(ProductView::from).collect();

    let mut context = Context::new();
    context.insert("products", &products);
    context.insert("pagination", &page.pagination);
    context.insert("search", &SearchView::from(search));
    context.insert("categories", &categories);
    context
}

fn form_context(form: &ProductForm, errors: &FormErrors) -> Context {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("categories", &all_choices());
    context
}

fn product_url(id: &Uuid) -> String {
    format!("/product/{}", id)
}

/// Main listing: every visible product, optionally searched
#[tracing::instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, MarketError> {
    let page_number = PageNumber::parse(params.page.as_deref())?;
    let search = params.search_form();
    let query = ProductQuery::all().with_term(search.term().as_deref());

    let page = state.service.search(&query, page_number, PAGE_SIZE).await?;
    let categories = state
        .service
        .categories_in_stock()
        .await?
        .into_iter()
        .map(CategoryChoice::from)
        .collect();

    state.render("index.html", &listing_context(&page, &search, categories))
}

/// Listing scoped to one category
///
/// An unknown code is not an error: it simply has no products.
#[tracing::instrument(skip(state))]
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, MarketError> {
    let page_number = PageNumber::parse(params.page.as_deref())?;
    let search = params.search_form();
    let category = Category::from_code(&code);

    let page = match category {
        Some(category) => {
            let query = ProductQuery::all()
                .in_category(category)
                .with_term(search.term().as_deref());
            state.service.search(&query, page_number, PAGE_SIZE).await?
        }
        None => {
            let page = page_number.resolve(0, PAGE_SIZE)?;
            Page {
                items: Vec::new(),
                pagination: PaginationMeta::new(page, PAGE_SIZE, 0),
            }
        }
    };

    let mut context = listing_context(&page, &search, all_choices());
    context.insert("category_code", &code);
    context.insert("category_label", category.map(Category::label).unwrap_or_default());

    state.render("products_by_category.html", &context)
}

#[tracing::instrument(skip(state))]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, MarketError> {
    let product = load_product(&state, &id).await?;

    let mut context = Context::new();
    context.insert("product", &ProductView::from(&product));
    context.insert("categories", &all_choices());
    state.render("product_detail.html", &context)
}

#[tracing::instrument(skip(state))]
pub async fn product_add_form(State(state): State<AppState>) -> Result<Html<String>, MarketError> {
    state.render(
        "product_create.html",
        &form_context(&ProductForm::new(), &FormErrors::new()),
    )
}

#[tracing::instrument(skip(state, form))]
pub async fn product_add(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response, MarketError> {
    let data = match form.clean() {
        Ok(data) => data,
        Err(errors) => {
            info!(fields = ?errors.fields().collect::<Vec<_>>(), "rejected product submission");
            let page = state.render("product_create.html", &form_context(&form, &errors))?;
            return Ok(page.into_response());
        }
    };

    let product = state.service.create(data).await?;
    info!(product_id = %product.id, name = %product.name, "product created");

    Ok(Redirect::to(&product_url(&product.id)).into_response())
}

#[tracing::instrument(skip(state))]
pub async fn product_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, MarketError> {
    let product = load_product(&state, &id).await?;

    let mut context = form_context(&ProductForm::from_product(&product), &FormErrors::new());
    context.insert("product", &ProductView::from(&product));
    state.render("product_update.html", &context)
}

#[tracing::instrument(skip(state, form))]
pub async fn product_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response, MarketError> {
    let product = load_product(&state, &id).await?;

    let data = match form.clean() {
        Ok(data) => data,
        Err(errors) => {
            info!(product_id = %product.id, fields = ?errors.fields().collect::<Vec<_>>(), "rejected product update");
            let mut context = form_context(&form, &errors);
            context.insert("product", &ProductView::from(&product));
            return Ok(state.render("product_update.html", &context)?.into_response());
        }
    };

    let updated = state
        .service
        .update(&product.id, data)
        .await?
        .ok_or_else(|| MarketError::not_found(product.id))?;
    info!(product_id = %updated.id, "product updated");

    Ok(Redirect::to(&product_url(&updated.id)).into_response())
}

#[tracing::instrument(skip(state))]
pub async fn product_delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, MarketError> {
    let product = load_product(&state, &id).await?;

    let mut context = Context::new();
    context.insert("product", &ProductView::from(&product));
    context.insert("categories", &all_choices());
    state.render("product_delete.html", &context)
}

#[tracing::instrument(skip(state))]
pub async fn product_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, MarketError> {
    let id = parse_id(&id)?;

    if !state.service.delete(&id).await? {
        return Err(MarketError::not_found(id));
    }
    info!(product_id = %id, "product deleted");

    Ok(Redirect::to("/"))
}
