//! Turn engine
//!
//! One inbound message is handled end-to-end synchronously: read profile,
//! run one onboarding transition or menu dispatch, write profile, return
//! the reply segments. The engine is the outermost fault boundary: it
//! always produces conversational text, never an error.

use std::sync::Arc;
use tracing::error;

use crate::content::{FAULT_REPLY, STORE_UNAVAILABLE_REPLY};
use crate::dispatch::MenuDispatcher;
use crate::onboarding;
use crate::store::{ProfileStore, StoreError};

/// Per-turn failure taxonomy
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The bot's message-handling core
pub struct BotEngine {
    store: Arc<dyn ProfileStore>,
    dispatcher: MenuDispatcher,
}

impl BotEngine {
    pub fn new(store: Arc<dyn ProfileStore>, dispatcher: MenuDispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Handle one turn. Infallible by contract: failures collapse to the
    /// generic conversational replies from the error taxonomy.
    pub async fn handle_message(&self, identity: &str, text: &str) -> Vec<String> {
        match self.turn(identity, text).await {
            Ok(segments) => segments,
            Err(TurnError::Store(err)) => {
                error!("store unavailable for {identity}: {err}");
                vec![STORE_UNAVAILABLE_REPLY.to_string()]
            }
            Err(TurnError::Other(err)) => {
                error!("turn failed for {identity}: {err:#}");
                vec![FAULT_REPLY.to_string()]
            }
        }
    }

    async fn turn(&self, identity: &str, text: &str) -> Result<Vec<String>, TurnError> {
        let mut profile = self.store.fetch_or_create(identity).await?;
        profile.message_count += 1;

        if profile.state.is_ready() {
            let segments = self.dispatcher.dispatch(&mut profile, text).await;
            self.store.update(&profile).await?;
            Ok(segments)
        } else {
            let transition = onboarding::advance(profile, text);
            self.store.update(&transition.profile).await?;
            Ok(vec![transition.reply])
        }
    }
}
