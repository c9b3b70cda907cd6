//! Message processing: the TEA update cycle plus action dispatch.

use tokio::sync::mpsc;

use crate::message::Message;
use crate::state::AppState;
use crate::{actions, handler};
use ragmon_api::ControlClient;

/// Process a message through the TEA update function, dispatching any
/// resulting actions and chaining follow-up messages until the cycle
/// settles.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    client: &ControlClient,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            actions::handle_action(action, client.clone(), msg_tx.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
