//! Board view
//!
//! Owns the 64 square sprites and keeps the piece sprites in step with the
//! rules library. The view never moves pieces incrementally: every
//! `NewGame` and `MoveApplied` triggers a full resynchronization from
//! [`ChessGame::occupied`], drawing from the [`PiecePool`].
//!
//! After a resync the visible pool entries are exactly the occupied squares,
//! one entity per square; everything else in the pool is hidden.

use crate::assets::{exit_on_failed_board_image, load_board_assets, BoardAssets};
use crate::core::EventBusWorldExt;
use crate::game::events::{MoveApplied, NewGame, PieceCreated};
use crate::game::ChessGame;
use crate::input::drag::{on_piece_drag, on_piece_drag_end, on_piece_drag_start, PieceDrag};
use crate::rendering::camera::{fit_board_to_window, spawn_board_camera, BoardInsets};
use crate::rendering::pieces::PiecePool;
use crate::rendering::utils::{is_light_square, BoardLayout, BoardSquare, PIECE_Z, SQUARE_Z};
use bevy::ecs::system::SystemParam;
use bevy::picking::Pickable;
use bevy::prelude::*;
use shakmaty::Square;

/// Everything a resynchronization touches
#[derive(SystemParam)]
pub struct BoardSync<'w, 's> {
    game: Res<'w, ChessGame>,
    pool: ResMut<'w, PiecePool>,
    layout: Res<'w, BoardLayout>,
    commands: Commands<'w, 's>,
}

impl BoardSync<'_, '_> {
    /// Place one pooled piece on every occupied square and hide the rest
    pub fn resync(&mut self) {
        self.pool.clear();

        let mut placed = 0;
        for (square, kind) in self.game.occupied() {
            let entity = self.pool.get(kind, &mut self.commands);
            let at = self.layout.square_to_world(square).extend(PIECE_Z);
            self.commands
                .entity(entity)
                .insert((Transform::from_translation(at), Visibility::Visible));
            placed += 1;
        }

        for (_, entity) in self.pool.hidden() {
            self.commands.entity(entity).insert(Visibility::Hidden);
        }

        debug!(
            "[BOARD] Resynced {} pieces ({} pooled)",
            placed,
            self.pool.len()
        );
    }
}

fn resync_on_new_game(In(_): In<NewGame>, mut board: BoardSync) {
    board.resync();
}

fn resync_on_move_applied(In(_): In<MoveApplied>, mut board: BoardSync) {
    board.resync();
}

/// Give a freshly spawned piece its sprite and drag handling
fn dress_new_piece(
    In(created): In<PieceCreated>,
    assets: Res<BoardAssets>,
    layout: Res<BoardLayout>,
    mut commands: Commands,
) {
    commands
        .entity(created.piece)
        .insert((
            Sprite {
                image: assets.piece(created.kind),
                custom_size: Some(Vec2::splat(layout.tile_size)),
                ..default()
            },
            PieceDrag::default(),
            Pickable::default(),
        ))
        .observe(on_piece_drag_start)
        .observe(on_piece_drag)
        .observe(on_piece_drag_end);
}

/// Subscribe the board view to the bus
///
/// `PieceCreated` comes first so a piece created during a resync is dressed
/// before anything else sees it.
pub fn subscribe_board_view(world: &mut World) {
    world.subscribe(dress_new_piece);
    world.subscribe(resync_on_new_game);
    world.subscribe(resync_on_move_applied);
}

/// Spawn the 64 square sprites
pub(crate) fn create_board(
    mut commands: Commands,
    assets: Res<BoardAssets>,
    layout: Res<BoardLayout>,
) {
    let size = Some(Vec2::splat(layout.tile_size));
    let squares: Vec<_> = Square::ALL
        .into_iter()
        .map(|square| {
            (
                BoardSquare(square),
                Sprite {
                    image: assets.square(is_light_square(square)),
                    custom_size: size,
                    ..default()
                },
                Transform::from_translation(layout.square_to_world(square).extend(SQUARE_Z)),
                Pickable::IGNORE,
                Name::new(format!("Square {}", square)),
            )
        })
        .collect();

    commands.spawn_batch(squares);
    info!("[BOARD] Spawned 64 squares");
}

/// Board view plugin
///
/// Requires [`crate::game::GamePlugin`] (channels, [`ChessGame`]) and an
/// `AssetServer`. `BoardAssets` starts out empty so the bus handlers can
/// run before `PreStartup` has loaded the images.
pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardLayout>()
            .init_resource::<PiecePool>()
            .init_resource::<BoardInsets>()
            .init_resource::<BoardAssets>();

        subscribe_board_view(app.world_mut());

        app.add_systems(PreStartup, load_board_assets)
            .add_systems(Startup, (spawn_board_camera, create_board))
            .add_systems(Update, (fit_board_to_window, exit_on_failed_board_image));
    }
}
