//! Case repository for database operations.
//!
//! Cases are owned by the case-management collaborator; this crate only
//! reads them to anchor statements and report headers.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entities::cases;

/// Case repository.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    db: DatabaseConnection,
}

impl CaseRepository {
    /// Creates a new case repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a case by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<cases::Model>, DbErr> {
        cases::Entity::find_by_id(id).one(&self.db).await
    }
}
