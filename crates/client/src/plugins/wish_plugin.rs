//! Wish Plugin
//!
//! Bridges the async wish adapter into the state machine. Submission flips
//! the mode to `WishPending` synchronously and hands the request to a worker
//! thread with its own tokio runtime; the response (the adapter guarantees
//! one, fallback or not) comes back through a signal slot and flips the mode
//! to `WishGranted` on a later frame. No cancellation: while a request is
//! pending, further submissions are refused by the mode guard.

use bevy::prelude::*;
use evergreen_common::{GameMode, SignalSlot};
use evergreen_wish::client::quiet_spirits_fallback;
use evergreen_wish::{WishClient, WishConfig, WishResponse};

/// Wish text submitted from the overlay.
#[derive(Message)]
pub struct WishSubmitted(pub String);

/// Mailbox the worker thread drops the response into.
#[derive(Resource, Default)]
struct WishInbox(SignalSlot<WishResponse>);

/// The most recently granted wish, displayed by the overlay.
#[derive(Resource, Clone, Debug)]
pub struct GrantedWish(pub WishResponse);

pub struct WishPlugin;

impl Plugin for WishPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<WishSubmitted>()
            .init_resource::<WishInbox>()
            .add_systems(
                Update,
                (
                    handle_submissions,
                    poll_responses.run_if(in_state(GameMode::WishPending)),
                ),
            );
    }
}

fn handle_submissions(
    mut submissions: MessageReader<WishSubmitted>,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
    inbox: Res<WishInbox>,
) {
    let mut mode = *state.get();
    for WishSubmitted(text) in submissions.read() {
        let Some(accepted) = accept_submission(mode, text, &inbox.0) else {
            // Guard refused: empty text, or a request already in flight.
            continue;
        };
        mode = accepted;
        spawn_wish_request(text.clone(), inbox.0.clone());
    }
    if mode != *state.get() {
        next.set(mode);
    }
}

/// Mode guard plus inbox hygiene for one submission. An OPEN-gesture reset
/// while pending can leave that request's response undrained in the inbox
/// (`poll_responses` only runs while pending), so an accepted wish discards
/// whatever is in the slot before its own request is spawned.
fn accept_submission(
    mode: GameMode,
    text: &str,
    inbox: &SignalSlot<WishResponse>,
) -> Option<GameMode> {
    let accepted = mode.submit_wish(text);
    if accepted == mode {
        return None;
    }
    inbox.take();
    Some(accepted)
}

/// Run the request on a dedicated thread with a local runtime; every failure
/// inside still resolves to a fallback response in the inbox.
fn spawn_wish_request(text: String, inbox: SignalSlot<WishResponse>) {
    info!("Wish submitted, consulting the stars");
    std::thread::spawn(move || {
        let response = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(async {
                match WishClient::new(WishConfig::from_env()) {
                    Ok(client) => client.grant(&text).await,
                    Err(err) => {
                        warn!("Wish client unavailable: {err}");
                        quiet_spirits_fallback()
                    }
                }
            }),
            Err(err) => {
                warn!("Wish runtime unavailable: {err}");
                quiet_spirits_fallback()
            }
        };
        inbox.publish(response);
    });
}

fn poll_responses(
    mut commands: Commands,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
    inbox: Res<WishInbox>,
) {
    if let Some(response) = inbox.0.take() {
        info!(
            "Wish granted (resonance {})",
            response.magical_factor
        );
        commands.insert_resource(GrantedWish(response));
        next.set(state.get().grant_wish());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blessing(message: &str) -> WishResponse {
        WishResponse {
            message: message.to_string(),
            magical_factor: 90,
        }
    }

    #[test]
    fn test_accepted_wish_discards_orphaned_response() {
        // Scenario: wish1 pending, OPEN gesture resets to Intro, wish1's
        // response lands in the inbox with nothing draining it. The next
        // accepted wish must not be served wish1's blessing.
        let inbox = SignalSlot::new();
        inbox.publish(blessing("for the previous wish"));

        let mode = accept_submission(GameMode::Interactive, "a new wish", &inbox);
        assert_eq!(mode, Some(GameMode::WishPending));
        assert_eq!(inbox.take(), None);
    }

    #[test]
    fn test_refused_submission_leaves_inbox_intact() {
        // While a request is genuinely in flight its response must survive
        // a refused duplicate submission.
        let inbox = SignalSlot::new();
        inbox.publish(blessing("in flight"));

        assert_eq!(
            accept_submission(GameMode::WishPending, "again", &inbox),
            None
        );
        assert_eq!(inbox.take(), Some(blessing("in flight")));
    }

    #[test]
    fn test_empty_wish_refused_without_draining() {
        let inbox = SignalSlot::new();
        inbox.publish(blessing("kept"));

        assert_eq!(accept_submission(GameMode::Interactive, "   ", &inbox), None);
        assert!(inbox.take().is_some());
    }
}
