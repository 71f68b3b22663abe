//! Reports module - read-only query façade over the ledger.

mod reports_service;

pub use reports_service::ReportsService;
