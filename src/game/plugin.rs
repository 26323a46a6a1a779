//! Game plugin - rules state and move application
//!
//! Registers the bus channels, the [`ChessGame`] resource and the game
//! controller's subscriptions:
//!
//! - `MoveAttempted` -> ask the rules library; publish `MoveApplied` if legal
//! - `PieceLifted`   -> debug logging
//!
//! A new game is started once everything is built (`PostStartup`), which
//! makes the board view place the initial position.
//!
//! # Plugin Dependencies
//!
//! Must be added after [`crate::core::CorePlugin`] and before the board and
//! UI plugins, whose handlers subscribe to the channels created here.

use super::events::{add_game_channels, MoveAttempted, NewGame, PieceLifted};
use super::rules::ChessGame;
use crate::core::{EventBusCommandsExt, EventBusWorldExt};
use bevy::prelude::*;

/// Game plugin for Chessboy
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChessGame>();

        let world = app.world_mut();
        add_game_channels(world);
        world.subscribe(apply_attempted_move);
        world.subscribe(log_lifted_piece);

        app.add_systems(PostStartup, start_new_game);
    }
}

/// Reset the position and announce it
pub fn new_game(game: &mut ChessGame, commands: &mut Commands) {
    game.reset();
    info!("[GAME] New game");
    commands.publish(NewGame);
}

fn start_new_game(mut game: ResMut<ChessGame>, mut commands: Commands) {
    new_game(&mut game, &mut commands);
}

/// Bus handler: play a dragged move if the rules library accepts it
fn apply_attempted_move(
    In(attempt): In<MoveAttempted>,
    mut game: ResMut<ChessGame>,
    mut commands: Commands,
) {
    let candidate = attempt.candidate;
    match game.try_apply(candidate) {
        Some(applied) => {
            info!(
                "[GAME] {} played {} ({}), ply {}",
                applied.mover.name(),
                applied.san,
                applied.uci,
                applied.ply
            );
            commands.publish(applied);
        }
        None => {
            debug!("[GAME] Rejected illegal move {}", candidate);
        }
    }
}

fn log_lifted_piece(In(lifted): In<PieceLifted>) {
    debug!("[GAME] Lifted {:?} from {}", lifted.piece, lifted.square);
}
