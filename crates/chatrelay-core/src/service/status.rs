//! Status check service: a liveness ledger that clients write into.

use chatrelay_types::error::RepositoryError;
use chatrelay_types::status::StatusCheck;
use tracing::debug;

use crate::repository::MAX_LIST_LIMIT;
use crate::repository::status::StatusRepository;

pub struct StatusService<S: StatusRepository> {
    repo: S,
}

impl<S: StatusRepository> StatusService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Record a status check for `client_name`, stamped now.
    pub async fn record(&self, client_name: String) -> Result<StatusCheck, RepositoryError> {
        let check = StatusCheck::new(client_name);
        self.repo.create_status_check(&check).await?;
        debug!(client_name = %check.client_name, "Status check recorded");
        Ok(check)
    }

    /// Recorded checks, oldest first, capped at [`MAX_LIST_LIMIT`].
    pub async fn list(&self) -> Result<Vec<StatusCheck>, RepositoryError> {
        self.repo.list_status_checks(Some(MAX_LIST_LIMIT)).await
    }
}
