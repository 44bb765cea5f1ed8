//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that are only ever one step of a larger unit of work take a
//! [`PgTx`]; read methods shared by both paths are generic over the
//! executor so they accept `&PgPool` and `&mut *tx` alike.

pub mod cat_repo;
pub mod cat_visit_repo;
pub mod goodie_repo;
pub mod inventory_repo;
pub mod spoon_repo;
pub mod user_repo;
pub mod yard_repo;

pub use cat_repo::CatRepo;
pub use cat_visit_repo::CatVisitRepo;
pub use goodie_repo::GoodieRepo;
pub use inventory_repo::InventoryRepo;
pub use spoon_repo::SpoonRepo;
pub use user_repo::UserRepo;
pub use yard_repo::YardRepo;

/// A PostgreSQL transaction borrowed for one unit of work.
pub type PgTx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
