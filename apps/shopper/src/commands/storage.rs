//! # Storage Commands
//!
//! `storage_status`: whether the snapshot storage answers, how many
//! migrations are applied and which snapshots it holds.

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::{SessionState, StorageStatus};

pub async fn storage_status(session: &SessionState) -> Result<CommandResponse<StorageStatus>, ApiError> {
    let store = session.store().await;
    let status = store.sink().status().await?;
    Ok(CommandResponse::read(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{cart, testing};

    #[tokio::test]
    async fn test_status_lists_written_snapshot() {
        let session = testing::session().await;
        assert!(storage_status(&session).await.unwrap().data.snapshots.is_empty());

        cart::add_to_cart(&session, "1", None).await.unwrap();

        let status = storage_status(&session).await.unwrap().data;
        assert!(status.healthy);
        assert_eq!(status.snapshots, vec!["test-store"]);
    }
}
