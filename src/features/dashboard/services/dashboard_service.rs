use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::core::error::Result;
use crate::features::dashboard::dtos::{
    CategoryCountDto, ChartPointDto, DashboardStatsDto, QuickStatsDto, StatusCountDto,
};
use crate::features::dashboard::repositories::DashboardRepository;
use crate::features::locations::dtos::DataLogDto;
use crate::features::reports::models::ReportStatus;
use crate::features::reports::repositories::ReportRepository;
use crate::shared::constants::{CHART_MONTHS, MAX_RECENT_ACTIVITY_LIMIT, RECENT_ACTIVITY_LIMIT};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Service for dashboard aggregates. Nothing is cached.
pub struct DashboardService {
    dashboard: Arc<dyn DashboardRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl DashboardService {
    pub fn new(dashboard: Arc<dyn DashboardRepository>, reports: Arc<dyn ReportRepository>) -> Self {
        Self { dashboard, reports }
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub async fn stats(&self) -> Result<DashboardStatsDto> {
        let totals = self.dashboard.totals().await?;
        let recent = self.dashboard.recent_activities(RECENT_ACTIVITY_LIMIT).await?;
        let per_category = self.dashboard.locations_per_category().await?;
        let per_status = self.reports.count_by_status().await?;

        Ok(DashboardStatsDto {
            total_locations: totals.locations,
            total_categories: totals.active_categories,
            total_reports: totals.reports,
            total_infrastructure: totals.infrastructure,
            recent_activities: recent.into_iter().map(DataLogDto::from).collect(),
            location_by_category: per_category
                .into_iter()
                .map(CategoryCountDto::from)
                .collect(),
            reports_by_status: ReportStatus::ALL
                .iter()
                .map(|status| StatusCountDto {
                    status: *status,
                    count: per_status.get(status).copied().unwrap_or(0),
                })
                .collect(),
        })
    }

    pub async fn quick_stats(&self) -> Result<QuickStatsDto> {
        let month_start = start_of_day(first_of_month(Utc::now().date_naive()));
        let counts = self.dashboard.quick_counts(month_start).await?;

        Ok(QuickStatsDto {
            active_locations: counts.active_locations,
            open_reports: counts.open_reports,
            new_this_month: counts.new_this_month,
        })
    }

    /// Newest audit rows; `limit` is clamped to 1..=100
    pub async fn recent_activities(&self, limit: i64) -> Result<Vec<DataLogDto>> {
        let limit = limit.clamp(1, MAX_RECENT_ACTIVITY_LIMIT);
        let rows = self.dashboard.recent_activities(limit).await?;
        Ok(rows.into_iter().map(DataLogDto::from).collect())
    }

    // ========================================================================
    // Chart
    // ========================================================================

    pub async fn chart(&self) -> Result<Vec<ChartPointDto>> {
        self.chart_at(Utc::now().date_naive()).await
    }

    /// Trailing months ending with the month containing `today`, oldest first
    pub async fn chart_at(&self, today: NaiveDate) -> Result<Vec<ChartPointDto>> {
        let months = trailing_months(today, CHART_MONTHS);
        let Some(oldest) = months.first().copied() else {
            return Ok(Vec::new());
        };
        let since = start_of_day(oldest);

        let locations: HashMap<NaiveDate, i64> = self
            .dashboard
            .location_creations_by_month(since)
            .await?
            .into_iter()
            .collect();
        let reports: HashMap<NaiveDate, i64> = self
            .dashboard
            .report_creations_by_month(since)
            .await?
            .into_iter()
            .collect();

        Ok(months
            .into_iter()
            .map(|month| ChartPointDto {
                month: month.format("%Y-%m").to_string(),
                label: month_label(month),
                locations: locations.get(&month).copied().unwrap_or(0),
                reports: reports.get(&month).copied().unwrap_or(0),
            })
            .collect())
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// First day of each of the `count` months ending with `today`'s month, oldest first
fn trailing_months(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = first_of_month(today);
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

fn month_label(month: NaiveDate) -> String {
    format!("{} {}", MONTH_LABELS[month.month0() as usize], month.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locations::models::LocationStatus;
    use crate::features::users::models::UserRole;
    use crate::shared::geometry::Geometry;
    use crate::shared::test_helpers::MemoryStore;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(store: &Arc<MemoryStore>) -> DashboardService {
        DashboardService::new(store.clone(), store.clone())
    }

    #[test]
    fn test_trailing_months_crosses_year_boundary() {
        let months = trailing_months(ymd(2026, 2, 17), 6);
        assert_eq!(
            months,
            vec![
                ymd(2025, 9, 1),
                ymd(2025, 10, 1),
                ymd(2025, 11, 1),
                ymd(2025, 12, 1),
                ymd(2026, 1, 1),
                ymd(2026, 2, 1),
            ]
        );
    }

    #[test]
    fn test_month_label_is_indonesian() {
        assert_eq!(month_label(ymd(2026, 10, 1)), "Okt 2026");
        assert_eq!(month_label(ymd(2026, 5, 1)), "Mei 2026");
        assert_eq!(month_label(ymd(2025, 8, 1)), "Agu 2025");
    }

    #[tokio::test]
    async fn test_chart_has_six_buckets_with_zero_fill() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        store.seed_category("Umum").await;

        let location = store
            .seed_location("Balai", "umum", admin.id, Geometry::point(110.0, -6.0))
            .await;
        store
            .set_location_created_at(location.id, start_of_day(ymd(2026, 8, 14)))
            .await;
        let old = store
            .seed_location("Lama", "umum", admin.id, Geometry::point(110.0, -6.0))
            .await;
        store
            .set_location_created_at(old.id, start_of_day(ymd(2025, 1, 3)))
            .await;
        store
            .seed_report("Jalan rusak", start_of_day(ymd(2026, 10, 2)))
            .await;

        let chart = service(&store).chart_at(ymd(2026, 10, 19)).await.unwrap();
        assert_eq!(chart.len(), 6);
        assert_eq!(chart[0].month, "2026-05");
        assert_eq!(chart[5].month, "2026-10");
        assert_eq!(chart[5].label, "Okt 2026");

        let aug = chart.iter().find(|p| p.month == "2026-08").unwrap();
        assert_eq!((aug.locations, aug.reports), (1, 0));
        assert_eq!((chart[5].locations, chart[5].reports), (0, 1));
        assert_eq!(chart.iter().map(|p| p.locations).sum::<i64>(), 1);
    }

    #[tokio::test]
    async fn test_stats_aggregates() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        store.seed_category("Pendidikan").await;
        store.seed_category("Wisata").await;
        store.deactivate_category("wisata").await;

        let school = store
            .seed_location("SD", "pendidikan", admin.id, Geometry::point(110.0, -6.0))
            .await;
        store
            .seed_infrastructure(
                school.id,
                crate::features::locations::models::InfrastructureType::Jalan,
            )
            .await;
        store.seed_report("Banjir", Utc::now()).await;
        store.record_log(&school, admin.id).await;

        let stats = service(&store).stats().await.unwrap();
        assert_eq!(stats.total_locations, 1);
        assert_eq!(stats.total_categories, 1);
        assert_eq!(stats.total_reports, 1);
        assert_eq!(stats.total_infrastructure, 1);
        assert_eq!(stats.recent_activities.len(), 1);
        assert_eq!(stats.recent_activities[0].location_name.as_deref(), Some("SD"));
        assert_eq!(
            stats.location_by_category,
            vec![CategoryCountDto {
                category_name: "Pendidikan".to_string(),
                color: None,
                count: 1,
            }]
        );
        assert_eq!(stats.reports_by_status.len(), 3);
        assert_eq!(stats.reports_by_status[0].status, ReportStatus::Open);
        assert_eq!(stats.reports_by_status[0].count, 1);
    }

    #[tokio::test]
    async fn test_quick_stats() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        store.seed_category("Umum").await;

        store
            .seed_location("Aktif", "umum", admin.id, Geometry::point(110.0, -6.0))
            .await;
        let inactive = store
            .seed_location("Tutup", "umum", admin.id, Geometry::point(110.0, -6.0))
            .await;
        store
            .set_location_status(inactive.id, LocationStatus::Inactive)
            .await;
        store
            .set_location_created_at(inactive.id, start_of_day(ymd(2020, 1, 1)))
            .await;
        store.seed_report("Sampah", Utc::now()).await;

        let quick = service(&store).quick_stats().await.unwrap();
        assert_eq!(
            quick,
            QuickStatsDto {
                active_locations: 1,
                open_reports: 1,
                new_this_month: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_recent_activities_clamps_limit() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        store.seed_category("Umum").await;
        let location = store
            .seed_location("Balai", "umum", admin.id, Geometry::point(110.0, -6.0))
            .await;
        for _ in 0..3 {
            store.record_log(&location, admin.id).await;
        }

        let service = service(&store);
        assert_eq!(service.recent_activities(0).await.unwrap().len(), 1);
        assert_eq!(service.recent_activities(2).await.unwrap().len(), 2);
        assert_eq!(service.recent_activities(1000).await.unwrap().len(), 3);
    }
}
