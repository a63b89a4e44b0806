/**
 * Page Handlers
 *
 * Server-rendered page models, one handler per locale-prefixed route. A
 * handler gathers everything its page needs into a JSON model: the list
 * page for the route, the derived statistics, and the pagination window.
 *
 * List fetch failures degrade: the handler logs the error and returns the
 * page model with an empty list and zero counts instead of an error page.
 * Only a missing session (401) and a missing record on the edit pages
 * (404) terminate with an error response.
 */

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::actions::{todos as todo_actions, trips as trip_actions, ActionError};
use crate::listing::{
    operator_name, page_window, refine_todos, sort_todos, todo_stats, StatusFilter, TodoStats,
};
use crate::remote::filter::Filter;
use crate::remote::records::{
    ListResult, Locomotive, Target, TodoRecord, TripRecord, UserRecord, UserSummary,
};
use crate::server::error::ApiError;
use crate::server::middleware::CurrentSession;
use crate::server::state::AppState;

/// Items per page on the my-trips list
const TRIPS_PER_PAGE: u32 = 10;

/// Items per page on the all-trips table
const ALL_TRIPS_PER_PAGE: u32 = 20;

#[derive(Debug, Serialize)]
pub struct HomeModel {
    pub locale: String,
    pub authenticated: bool,
}

/// GET /{lng}
pub async fn home(
    Path(lng): Path<String>,
    CurrentSession(session): CurrentSession,
) -> Json<HomeModel> {
    Json(HomeModel {
        locale: lng,
        authenticated: session.is_some(),
    })
}

#[derive(Debug, Serialize)]
pub struct AboutModel {
    pub locale: String,
    pub name: &'static str,
    pub version: &'static str,
}

/// GET /{lng}/about
pub async fn about(Path(lng): Path<String>) -> Json<AboutModel> {
    Json(AboutModel {
        locale: lng,
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginModel {
    pub locale: String,
    /// Path to navigate to after a successful login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// GET /{lng}/login
pub async fn login(
    Path(lng): Path<String>,
    Query(query): Query<LoginQuery>,
) -> Json<LoginModel> {
    Json(LoginModel {
        locale: lng,
        redirect: query.redirect,
    })
}

#[derive(Debug, Serialize)]
pub struct RegisterModel {
    pub locale: String,
    pub min_name_length: usize,
}

/// GET /{lng}/register
pub async fn register(Path(lng): Path<String>) -> Json<RegisterModel> {
    Json(RegisterModel {
        locale: lng,
        min_name_length: crate::actions::auth::MIN_NAME_LENGTH,
    })
}

#[derive(Debug, Serialize)]
pub struct DashboardModel {
    pub locale: String,
    pub user: UserRecord,
    pub stats: TodoStats,
    /// Completed share of all todos, percent
    pub completion_rate: u8,
}

/// GET /{lng}/dashboard
pub async fn dashboard(
    Path(lng): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<DashboardModel>, ApiError> {
    let session = session.ok_or(ApiError::NotAuthenticated)?;

    let stats = match todo_actions::get_todos(&state.remote(), Some(&session), None, None).await
    {
        Ok(todos) => todo_stats(&todos.items, todos.total_items, chrono::Utc::now()),
        Err(ActionError::NotAuthenticated) => return Err(ApiError::NotAuthenticated),
        Err(e) => {
            tracing::error!("Failed to fetch todo stats: {}", e);
            TodoStats::default()
        }
    };

    Ok(Json(DashboardModel {
        locale: lng,
        user: session.user.clone(),
        completion_rate: stats.completion_rate(),
        stats,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TodosQuery {
    /// `active` or `completed`; anything else means all
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodosModel {
    pub locale: String,
    pub items: Vec<TodoRecord>,
    pub total_items: u64,
    pub stats: TodoStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// GET /{lng}/todos
pub async fn todos(
    Path(lng): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<TodosQuery>,
) -> Result<Json<TodosModel>, ApiError> {
    let session = session.ok_or(ApiError::NotAuthenticated)?;

    let status = StatusFilter::parse(query.filter.as_deref());
    let filter = todos_page_filter(status, query.search.as_deref());

    let fetched = match todo_actions::get_todos(
        &state.remote(),
        Some(&session),
        filter,
        query.sort.as_deref(),
    )
    .await
    {
        Ok(todos) => todos,
        Err(ActionError::NotAuthenticated) => return Err(ApiError::NotAuthenticated),
        Err(e) => {
            tracing::error!("Failed to fetch todos: {}", e);
            ListResult::empty(1, todo_actions::TODOS_PER_PAGE)
        }
    };

    let search = query.search.as_deref().unwrap_or("");
    let mut items = refine_todos(&fetched.items, search, status);
    sort_todos(&mut items, query.sort.as_deref());
    let stats = todo_stats(&fetched.items, fetched.total_items, chrono::Utc::now());

    Ok(Json(TodosModel {
        locale: lng,
        items,
        total_items: fetched.total_items,
        stats,
        filter: query.filter,
        sort: query.sort,
        search: query.search,
    }))
}

#[derive(Debug, Serialize)]
pub struct TodoNewModel {
    pub locale: String,
}

/// GET /{lng}/todos/new
pub async fn todo_new(
    Path(lng): Path<String>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TodoNewModel>, ApiError> {
    session.ok_or(ApiError::NotAuthenticated)?;
    Ok(Json(TodoNewModel { locale: lng }))
}

#[derive(Debug, Serialize)]
pub struct TodoEditModel {
    pub locale: String,
    pub todo: TodoRecord,
}

/// GET /{lng}/todos/{id}/edit
pub async fn todo_edit(
    Path((lng, id)): Path<(String, String)>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TodoEditModel>, ApiError> {
    let todo = todo_actions::get_todo(&state.remote(), session.as_ref(), &id)
        .await
        .map_err(edit_fetch_error)?;
    Ok(Json(TodoEditModel { locale: lng, todo }))
}

/// Trip record plus its operator's display name
#[derive(Debug, Serialize)]
pub struct TripView {
    #[serde(flatten)]
    pub trip: TripRecord,
    pub operator: String,
}

impl From<TripRecord> for TripView {
    fn from(trip: TripRecord) -> Self {
        let operator = operator_name(&trip);
        Self { trip, operator }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TripsQuery {
    pub target: Option<String>,
    pub locomotive: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TripsModel {
    pub locale: String,
    pub items: Vec<TripView>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    /// Page numbers for the pager window
    pub pages: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locomotive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// GET /{lng}/trips
pub async fn trips(
    Path(lng): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<TripsQuery>,
) -> Result<Json<TripsModel>, ApiError> {
    let session = session.ok_or(ApiError::NotAuthenticated)?;
    let page = query.page.unwrap_or(1).max(1);

    let filter = my_trips_filter(
        query.target.as_deref().and_then(Target::parse),
        query.locomotive.as_deref().and_then(Locomotive::parse),
        query.search.as_deref(),
    );

    let fetched = match trip_actions::get_trips(
        &state.remote(),
        Some(&session),
        filter,
        query.sort.as_deref(),
        page,
        TRIPS_PER_PAGE,
    )
    .await
    {
        Ok(trips) => trips,
        Err(ActionError::NotAuthenticated) => return Err(ApiError::NotAuthenticated),
        Err(e) => {
            tracing::error!("Failed to fetch trips: {}", e);
            ListResult::empty(page, TRIPS_PER_PAGE)
        }
    };

    Ok(Json(trips_model(lng, fetched, query)))
}

#[derive(Debug, Serialize)]
pub struct TripNewModel {
    pub locale: String,
    /// Choices for the trip form's operator selector
    pub operators: Vec<UserSummary>,
}

/// GET /{lng}/trips/new
pub async fn trip_new(
    Path(lng): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TripNewModel>, ApiError> {
    let session = session.ok_or(ApiError::NotAuthenticated)?;

    let operators = match trip_actions::get_all_users(&state.remote(), Some(&session)).await {
        Ok(users) => users.items,
        Err(ActionError::NotAuthenticated) => return Err(ApiError::NotAuthenticated),
        Err(e) => {
            tracing::error!("Failed to fetch operators: {}", e);
            Vec::new()
        }
    };

    Ok(Json(TripNewModel {
        locale: lng,
        operators,
    }))
}

#[derive(Debug, Serialize)]
pub struct TripEditModel {
    pub locale: String,
    pub trip: TripView,
}

/// GET /{lng}/trips/{id}/edit
pub async fn trip_edit(
    Path((lng, id)): Path<(String, String)>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TripEditModel>, ApiError> {
    let trip = trip_actions::get_trip(&state.remote(), session.as_ref(), &id)
        .await
        .map_err(edit_fetch_error)?;
    Ok(Json(TripEditModel {
        locale: lng,
        trip: trip.into(),
    }))
}

/// GET /{lng}/all-trips
pub async fn all_trips(
    Path(lng): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<TripsQuery>,
) -> Result<Json<TripsModel>, ApiError> {
    let session = session.ok_or(ApiError::NotAuthenticated)?;
    let page = query.page.unwrap_or(1).max(1);

    let fetched = match trip_actions::get_all_trips_with_filters(
        &state.remote(),
        Some(&session),
        page,
        ALL_TRIPS_PER_PAGE,
        query.sort.as_deref(),
        query.target.as_deref().and_then(Target::parse),
        query.locomotive.as_deref().and_then(Locomotive::parse),
        query.search.as_deref(),
    )
    .await
    {
        Ok(trips) => trips,
        Err(ActionError::NotAuthenticated) => return Err(ApiError::NotAuthenticated),
        Err(e) => {
            tracing::error!("Failed to fetch all trips: {}", e);
            ListResult::empty(page, ALL_TRIPS_PER_PAGE)
        }
    };

    Ok(Json(trips_model(lng, fetched, query)))
}

fn trips_model(locale: String, fetched: ListResult<TripRecord>, query: TripsQuery) -> TripsModel {
    TripsModel {
        locale,
        page: fetched.page,
        total_pages: fetched.total_pages,
        total_items: fetched.total_items,
        pages: page_window(fetched.page, fetched.total_pages),
        items: fetched.items.into_iter().map(TripView::from).collect(),
        target: query.target,
        locomotive: query.locomotive,
        search: query.search,
        sort: query.sort,
    }
}

/// Compose the todos page's backend filter from its query parameters
fn todos_page_filter(status: StatusFilter, search: Option<&str>) -> Option<Filter> {
    let mut filter = match status {
        StatusFilter::Active => Some(Filter::eq("completed", false)),
        StatusFilter::Completed => Some(Filter::eq("completed", true)),
        StatusFilter::All => None,
    };

    if let Some(term) = search.filter(|term| !term.is_empty()) {
        let matches = Filter::contains("title", term).or(Filter::contains("description", term));
        filter = Some(match filter {
            Some(existing) => existing.and(matches),
            None => matches,
        });
    }

    filter
}

/// Compose the my-trips page's backend filter
///
/// The search term also matches the operator's name and email through the
/// expanded relation, which the all-trips composition does not.
fn my_trips_filter(
    target: Option<Target>,
    locomotive: Option<Locomotive>,
    search: Option<&str>,
) -> Option<Filter> {
    let mut filter: Option<Filter> = None;

    if let Some(target) = target {
        filter = Some(Filter::eq("target", target.as_str()));
    }
    if let Some(locomotive) = locomotive {
        let eq = Filter::eq("locomotive", locomotive.as_str());
        filter = Some(match filter {
            Some(existing) => existing.and(eq),
            None => eq,
        });
    }
    if let Some(term) = search.filter(|term| !term.is_empty()) {
        let mut matches = Filter::contains("username.name", term)
            .or(Filter::contains("username.email", term));
        for field in ["station", "route", "train_number", "driver", "assistant_driver"] {
            matches = matches.or(Filter::contains(field, term));
        }
        filter = Some(match filter {
            Some(existing) => existing.and(matches),
            None => matches,
        });
    }

    filter
}

/// Edit pages treat every fetch failure short of a missing session as
/// absence
fn edit_fetch_error(error: ActionError) -> ApiError {
    match error {
        ActionError::NotAuthenticated => ApiError::NotAuthenticated,
        other => {
            if !other.is_not_found() {
                tracing::error!("Record fetch failed: {}", other);
            }
            ApiError::NotFound
        }
    }
}
