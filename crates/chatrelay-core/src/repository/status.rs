//! Status check repository trait definition.

use chatrelay_types::error::RepositoryError;
use chatrelay_types::status::StatusCheck;

/// Repository trait for status check persistence.
pub trait StatusRepository: Send + Sync {
    /// Persist a status check.
    fn create_status_check(
        &self,
        check: &StatusCheck,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List status checks, oldest first.
    fn list_status_checks(
        &self,
        limit: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<StatusCheck>, RepositoryError>> + Send;
}
