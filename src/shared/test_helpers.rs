//! In-memory repositories and fixtures for service and endpoint tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::types::Json;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::router::{api_routes, AppServices};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::dashboard::models::{CategoryLocationCount, DashboardTotals, QuickCounts};
use crate::features::dashboard::repositories::DashboardRepository;
use crate::features::locations::dtos::LocationFilter;
use crate::features::locations::models::{
    DataLog, DataLogDetail, Infrastructure, InfrastructureType, Location, LocationStatus,
    LogAction,
};
use crate::features::locations::repositories::LocationRepository;
use crate::features::reports::dtos::ReportFilter;
use crate::features::reports::models::{PublicReport, ReportStatus};
use crate::features::reports::repositories::ReportRepository;
use crate::features::users::models::{User, UserRole};
use crate::features::users::repositories::UserRepository;
use crate::shared::constants::{DEFAULT_ADMIN_USERNAME, LOCATION_TABLE};
use crate::shared::geometry::Geometry;
use crate::shared::search::matches_any;
use crate::shared::validation::slugify;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    infrastructures: Vec<Infrastructure>,
    reports: Vec<PublicReport>,
    data_logs: Vec<DataLog>,
}

impl Tables {
    fn log_detail(&self, log: &DataLog) -> DataLogDetail {
        let user = self.users.iter().find(|u| u.id == log.user_id);
        let location = log
            .location_id
            .and_then(|id| self.locations.iter().find(|l| l.id == id));

        DataLogDetail {
            log: log.clone(),
            username: user.map(|u| u.username.clone()),
            user_full_name: user.and_then(|u| u.full_name.clone()),
            location_name: location.map(|l| l.name.clone()),
        }
    }
}

/// Every repository trait backed by one set of in-memory tables.
/// Foreign keys are not enforced; the services check references themselves.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn page<T: Clone>(rows: &[T], offset: i64, limit: i64) -> Vec<T> {
    rows.iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

fn month_of(ts: DateTime<Utc>) -> NaiveDate {
    NaiveDate::from_ymd_opt(ts.year(), ts.month(), 1).unwrap()
}

fn group_by_month<'a>(
    timestamps: impl Iterator<Item = DateTime<Utc>> + 'a,
    since: DateTime<Utc>,
) -> Vec<(NaiveDate, i64)> {
    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for ts in timestamps.filter(|ts| *ts >= since) {
        *counts.entry(month_of(ts)).or_default() += 1;
    }
    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort();
    rows
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ========================================================================
    // Fixtures
    // ========================================================================

    pub async fn seed_user(&self, username: &str, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: format!("{}@desa.id", username),
            full_name: Some(format!("{} desa", username)),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.users.push(user.clone());
        user
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        let now = Utc::now();
        let category = Category {
            id: slugify(name),
            name: name.to_string(),
            icon: None,
            color: None,
            description: None,
            parent_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.categories.push(category.clone());
        category
    }

    pub async fn deactivate_category(&self, id: &str) {
        let mut tables = self.tables.lock().await;
        if let Some(c) = tables.categories.iter_mut().find(|c| c.id == id) {
            c.is_active = false;
        }
    }

    /// Insert a location directly, without an audit row
    pub async fn seed_location(
        &self,
        name: &str,
        category_id: &str,
        created_by: Uuid,
        geometry: Geometry,
    ) -> Location {
        let now = Utc::now();
        let location = Location {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: None,
            address: None,
            geometry: Json(geometry),
            properties: None,
            photos: None,
            status: LocationStatus::Active,
            category_id: category_id.to_string(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.locations.push(location.clone());
        location
    }

    pub async fn set_location_created_at(&self, id: Uuid, created_at: DateTime<Utc>) {
        let mut tables = self.tables.lock().await;
        if let Some(l) = tables.locations.iter_mut().find(|l| l.id == id) {
            l.created_at = created_at;
        }
    }

    pub async fn set_location_status(&self, id: Uuid, status: LocationStatus) {
        let mut tables = self.tables.lock().await;
        if let Some(l) = tables.locations.iter_mut().find(|l| l.id == id) {
            l.status = status;
        }
    }

    pub async fn seed_infrastructure(
        &self,
        location_id: Uuid,
        kind: InfrastructureType,
    ) -> Infrastructure {
        let now = Utc::now();
        let infrastructure = Infrastructure {
            id: Uuid::now_v7(),
            kind,
            condition: Some("BAIK".to_string()),
            length_km: Some(1.2),
            width_m: Some(4.0),
            construction_year: Some(2019),
            last_maintenance_year: None,
            geometry: Json(Geometry::LineString {
                coordinates: vec![[110.74, -6.71], [110.75, -6.72]],
            }),
            properties: None,
            location_id,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .await
            .infrastructures
            .push(infrastructure.clone());
        infrastructure
    }

    pub async fn seed_report(&self, title: &str, created_at: DateTime<Utc>) -> PublicReport {
        let report = PublicReport {
            id: Uuid::now_v7(),
            reporter_name: None,
            reporter_contact: None,
            title: title.to_string(),
            description: None,
            report_type: None,
            geometry: Json(Geometry::point(110.74, -6.71)),
            photos: None,
            status: ReportStatus::Open,
            assigned_to: None,
            created_at,
            updated_at: created_at,
        };
        self.tables.lock().await.reports.push(report.clone());
        report
    }

    /// Append an UPDATE audit row pointing at `location`
    pub async fn record_log(&self, location: &Location, user_id: Uuid) -> DataLog {
        let log = DataLog {
            id: Uuid::now_v7(),
            table_name: LOCATION_TABLE.to_string(),
            record_id: location.id,
            action: LogAction::Update,
            old_values: None,
            new_values: None,
            user_id,
            location_id: Some(location.id),
            created_at: Utc::now(),
        };
        self.tables.lock().await.data_logs.push(log.clone());
        log
    }

    pub async fn data_logs(&self) -> Vec<DataLog> {
        self.tables.lock().await.data_logs.clone()
    }
}

// ============================================================================
// Repository implementations
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_default(&self) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        let mut users: Vec<&User> = tables.users.iter().collect();
        users.sort_by_key(|u| {
            let admin_like = u.username == DEFAULT_ADMIN_USERNAME || u.role == UserRole::Admin;
            (!admin_like, u.created_at)
        });
        Ok(users.first().map(|u| (*u).clone()))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Category>> {
        let tables = self.tables.lock().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find(&self, id: &str) -> Result<Option<Category>> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables.lock().await;
        if tables.categories.iter().any(|c| c.id == category.id) {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                category.id
            )));
        }
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        match tables.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        match tables.categories.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                existing.is_active = false;
                existing.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn location_counts(&self) -> Result<HashMap<String, i64>> {
        let tables = self.tables.lock().await;
        let mut counts = HashMap::new();
        for location in &tables.locations {
            *counts.entry(location.category_id.clone()).or_default() += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list(
        &self,
        filter: &LocationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Location>, i64)> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Location> = tables
            .locations
            .iter()
            .filter(|l| {
                filter
                    .category_id
                    .as_ref()
                    .is_none_or(|c| *c == l.category_id)
            })
            .filter(|l| filter.status.is_none_or(|s| s == l.status))
            .filter(|l| {
                filter.search.as_deref().is_none_or(|needle| {
                    matches_any(
                        needle,
                        &[
                            Some(l.name.as_str()),
                            l.description.as_deref(),
                            l.address.as_deref(),
                        ],
                    )
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = rows.len() as i64;
        Ok((page(&rows, offset, limit), total))
    }

    async fn list_all(&self) -> Result<Vec<Location>> {
        Ok(self.tables.lock().await.locations.clone())
    }

    async fn list_by_category(&self, category_id: &str) -> Result<Vec<Location>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .locations
            .iter()
            .filter(|l| l.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Location>> {
        let tables = self.tables.lock().await;
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn history(&self, location_id: Uuid) -> Result<Vec<DataLogDetail>> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<&DataLog> = tables
            .data_logs
            .iter()
            .filter(|l| l.location_id == Some(location_id))
            .collect();
        logs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(logs.into_iter().map(|l| tables.log_detail(l)).collect())
    }

    async fn infrastructure(&self, location_id: Uuid) -> Result<Vec<Infrastructure>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .infrastructures
            .iter()
            .filter(|i| i.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, location: &Location, log: &DataLog) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.locations.push(location.clone());
        tables.data_logs.push(log.clone());
        Ok(())
    }

    async fn update(&self, location: &Location, log: &DataLog) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let Some(existing) = tables.locations.iter_mut().find(|l| l.id == location.id) else {
            return Ok(false);
        };
        *existing = location.clone();
        tables.data_logs.push(log.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid, log: &DataLog) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.locations.len();
        tables.locations.retain(|l| l.id != id);
        if tables.locations.len() == before {
            return Ok(false);
        }
        tables.infrastructures.retain(|i| i.location_id != id);
        tables.data_logs.push(log.clone());
        Ok(true)
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn list(
        &self,
        filter: &ReportFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<PublicReport>, i64)> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<PublicReport> = tables
            .reports
            .iter()
            .filter(|r| filter.status.is_none_or(|s| s == r.status))
            .filter(|r| {
                filter
                    .report_type
                    .as_ref()
                    .is_none_or(|t| r.report_type.as_ref() == Some(t))
            })
            .filter(|r| {
                filter.search.as_deref().is_none_or(|needle| {
                    matches_any(
                        needle,
                        &[
                            Some(r.title.as_str()),
                            r.description.as_deref(),
                            r.reporter_name.as_deref(),
                        ],
                    )
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = rows.len() as i64;
        Ok((page(&rows, offset, limit), total))
    }

    async fn find(&self, id: Uuid) -> Result<Option<PublicReport>> {
        let tables = self.tables.lock().await;
        Ok(tables.reports.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, report: &PublicReport) -> Result<()> {
        self.tables.lock().await.reports.push(report.clone());
        Ok(())
    }

    async fn update(&self, report: &PublicReport) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        match tables.reports.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => {
                *existing = report.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.reports.len();
        tables.reports.retain(|r| r.id != id);
        Ok(tables.reports.len() < before)
    }

    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>> {
        let tables = self.tables.lock().await;
        let mut counts = HashMap::new();
        for report in &tables.reports {
            *counts.entry(report.status).or_default() += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl DashboardRepository for MemoryStore {
    async fn totals(&self) -> Result<DashboardTotals> {
        let tables = self.tables.lock().await;
        Ok(DashboardTotals {
            locations: tables.locations.len() as i64,
            active_categories: tables.categories.iter().filter(|c| c.is_active).count() as i64,
            reports: tables.reports.len() as i64,
            infrastructure: tables.infrastructures.len() as i64,
        })
    }

    async fn recent_activities(&self, limit: i64) -> Result<Vec<DataLogDetail>> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<&DataLog> = tables.data_logs.iter().collect();
        logs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(logs
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|l| tables.log_detail(l))
            .collect())
    }

    async fn locations_per_category(&self) -> Result<Vec<CategoryLocationCount>> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<CategoryLocationCount> = tables
            .categories
            .iter()
            .filter(|c| c.is_active)
            .map(|c| CategoryLocationCount {
                category_name: c.name.clone(),
                color: c.color.clone(),
                count: tables
                    .locations
                    .iter()
                    .filter(|l| l.category_id == c.id)
                    .count() as i64,
            })
            .collect();
        rows.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(rows)
    }

    async fn quick_counts(&self, month_start: DateTime<Utc>) -> Result<QuickCounts> {
        let tables = self.tables.lock().await;
        Ok(QuickCounts {
            active_locations: tables
                .locations
                .iter()
                .filter(|l| l.status == LocationStatus::Active)
                .count() as i64,
            open_reports: tables
                .reports
                .iter()
                .filter(|r| r.status == ReportStatus::Open)
                .count() as i64,
            new_this_month: tables
                .locations
                .iter()
                .filter(|l| l.created_at >= month_start)
                .count() as i64,
        })
    }

    async fn location_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        let tables = self.tables.lock().await;
        Ok(group_by_month(
            tables.locations.iter().map(|l| l.created_at),
            since,
        ))
    }

    async fn report_creations_by_month(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, i64)>> {
        let tables = self.tables.lock().await;
        Ok(group_by_month(tables.reports.iter().map(|r| r.created_at), since))
    }
}

// ============================================================================
// App wiring
// ============================================================================

/// Services wired to a single in-memory store
pub fn memory_services(store: &Arc<MemoryStore>) -> AppServices {
    AppServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

/// HTTP test server over the full API router
pub fn test_server(store: &Arc<MemoryStore>) -> TestServer {
    TestServer::new(api_routes(&memory_services(store))).unwrap()
}
