pub mod budget_service;
pub mod statistics_service;

pub use budget_service::BudgetService;
pub use statistics_service::{
    CategoryRow, CategoryTable, ReportWindow, StatisticsKind, StatisticsQuery, StatisticsReport,
    StatisticsService,
};
