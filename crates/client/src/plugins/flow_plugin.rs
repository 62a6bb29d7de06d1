//! Game Flow Plugin
//!
//! Wires the pure `GameMode` transition logic into Bevy's `States`. Every
//! transition funnels through the guards in `evergreen_common::mode`;
//! systems here only collect inputs (UI commands, gestures, the forming
//! timer) and commit the resulting mode.

use bevy::prelude::*;
use evergreen_common::{GameMode, TreeStyle};

use super::hand_plugin::GestureMessage;

/// The overlay's "assemble the grand tree" command.
#[derive(Message)]
pub struct AssembleRequested;

/// The overlay dismissed a granted wish.
#[derive(Message)]
pub struct WishDismissed;

pub struct GameFlowPlugin;

impl Plugin for GameFlowPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AssembleRequested>()
            .add_message::<WishDismissed>()
            .add_systems(OnEnter(GameMode::Forming), arm_forming_timer)
            .add_systems(
                Update,
                (
                    apply_gestures,
                    handle_assemble_requests,
                    handle_dismissals,
                    tick_forming_timer.run_if(in_state(GameMode::Forming)),
                ),
            );
    }
}

/// Countdown from Forming to Interactive.
#[derive(Resource)]
struct FormingTimer(Timer);

fn arm_forming_timer(mut commands: Commands, style: Res<TreeStyle>) {
    commands.insert_resource(FormingTimer(Timer::from_seconds(
        style.forming_delay,
        TimerMode::Once,
    )));
}

fn tick_forming_timer(
    time: Res<Time>,
    mode: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
    mut timer: ResMut<FormingTimer>,
) {
    if timer.0.tick(time.delta()).just_finished() {
        next.set(mode.get().finish_forming());
    }
}

/// Fold every gesture of the frame through the transition table. OPEN is an
/// interrupt back to Intro; CLOSED assembles out of Intro/Forming; NONE and
/// invalid transitions fall through as no-ops.
fn apply_gestures(
    mut gestures: MessageReader<GestureMessage>,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
) {
    let mut mode = *state.get();
    for GestureMessage(gesture) in gestures.read() {
        mode = mode.apply_gesture(*gesture);
    }
    if mode != *state.get() {
        info!("Gesture moved mode to {mode:?}");
        next.set(mode);
    }
}

fn handle_assemble_requests(
    mut requests: MessageReader<AssembleRequested>,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
) {
    let mut mode = *state.get();
    for _ in requests.read() {
        mode = mode.begin_forming();
    }
    if mode != *state.get() {
        next.set(mode);
    }
}

fn handle_dismissals(
    mut dismissals: MessageReader<WishDismissed>,
    state: Res<State<GameMode>>,
    mut next: ResMut<NextState<GameMode>>,
) {
    let mut mode = *state.get();
    for _ in dismissals.read() {
        mode = mode.dismiss_wish();
    }
    if mode != *state.get() {
        next.set(mode);
    }
}
