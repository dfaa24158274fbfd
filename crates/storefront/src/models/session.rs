//! Session-stored shop state.
//!
//! Each visitor's [`ShopState`] (active view plus cart) is kept in their
//! session. A request loads it, dispatches a single action and writes it
//! back before responding.

use leaf_and_co_core::{Action, Outcome, ShopState};
use tower_sessions::Session;

/// Session keys for shop data.
pub mod keys {
    /// Key for the visitor's view and cart.
    pub const SHOP_STATE: &str = "shop_state";

    /// Key for a one-shot notice shown on the next page render.
    pub const NOTICE: &str = "notice";
}

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Load the visitor's shop state, or a fresh one if the session has none.
pub async fn load_shop(session: &Session) -> SessionResult<ShopState> {
    Ok(session
        .get::<ShopState>(keys::SHOP_STATE)
        .await?
        .unwrap_or_default())
}

/// Store the visitor's shop state.
pub async fn save_shop(session: &Session, shop: &ShopState) -> SessionResult<()> {
    session.insert(keys::SHOP_STATE, shop).await
}

/// Load, apply one action, and store.
pub async fn dispatch(session: &Session, action: Action) -> SessionResult<Outcome> {
    let mut shop = load_shop(session).await?;
    let outcome = shop.dispatch(action);
    save_shop(session, &shop).await?;
    Ok(outcome)
}

/// Queue a notice for the next render.
pub async fn set_notice(session: &Session, notice: &str) -> SessionResult<()> {
    session.insert(keys::NOTICE, notice).await
}

/// Take the pending notice, if any. It is shown once.
pub async fn take_notice(session: &Session) -> SessionResult<Option<String>> {
    session.remove::<String>(keys::NOTICE).await
}
