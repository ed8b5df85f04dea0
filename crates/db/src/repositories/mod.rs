//! Repository layer: one zero-sized struct per table.
//!
//! Every method takes any [`sqlx::PgExecutor`], so callers pass the pool for
//! standalone reads and `&mut *tx` to compose several statements into one
//! transaction.

pub mod camera_repo;
pub mod chat_repo;
pub mod construction_site_repo;
pub mod document_repo;
pub mod final_document_repo;
pub mod message_repo;
pub mod project_repo;
pub mod stage_repo;
pub mod statistics_repo;

pub use camera_repo::CameraRepo;
pub use chat_repo::ChatRepo;
pub use construction_site_repo::ConstructionSiteRepo;
pub use document_repo::DocumentRepo;
pub use final_document_repo::FinalDocumentRepo;
pub use message_repo::MessageRepo;
pub use project_repo::ProjectRepo;
pub use stage_repo::StageRepo;
pub use statistics_repo::StatisticsRepo;
