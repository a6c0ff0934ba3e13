mod dashboard_service;

pub use dashboard_service::{
    DashboardCounts, DashboardError, DashboardOverview, DashboardService, DashboardUseCase,
};
