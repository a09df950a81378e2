pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod inventory_repo;
pub mod reservation_repo;

pub use app_config::Config;
pub use catalog_repo::PgCatalogRepository;
pub use database::DbClient;
pub use inventory_repo::PgInventoryLedger;
pub use reservation_repo::PgReservationRepository;
