//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod meal_record_repo;
pub mod report_config_repo;
pub mod student_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use meal_record_repo::MealRecordRepo;
pub use report_config_repo::ReportConfigRepo;
pub use student_repo::StudentRepo;
