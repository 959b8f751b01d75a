//! # User Commands
//!
//! The authentication flow lives outside this process; it hands the signed-in
//! user over with `sign_in` and clears it with `sign_out`.

use market_core::User;
use tracing::info;

use super::CommandResponse;
use crate::state::SessionState;

pub async fn get_user(session: &SessionState) -> CommandResponse<Option<User>> {
    let store = session.store().await;
    CommandResponse::read(store.state().user().cloned())
}

/// Replaces the current user. Cart, wishlist and history are kept.
pub async fn sign_in(session: &SessionState, user: User) -> CommandResponse<Option<User>> {
    info!(user_id = %user.id, "Signing in");

    let mut store = session.store().await;
    let persistence = store.set_user(Some(user)).await;
    CommandResponse::written(store.state().user().cloned(), persistence)
}

pub async fn sign_out(session: &SessionState) -> CommandResponse<Option<User>> {
    info!("Signing out");

    let mut store = session.store().await;
    let persistence = store.set_user(None).await;
    CommandResponse::written(None, persistence)
}
