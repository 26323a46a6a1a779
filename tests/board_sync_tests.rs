//! Integration tests for board resynchronization
//!
//! Builds a headless app with the game plugin and the board view's bus
//! handlers (no window, no asset server) and checks that the visible piece
//! entities always match the position held by the rules library.

use bevy::prelude::*;
use chessboy::assets::BoardAssets;
use chessboy::core::{Channel, EventBusWorldExt};
use chessboy::game::{CandidateMove, ChessGame, GamePlugin, MoveApplied, MoveAttempted, PieceCreated};
use chessboy::rendering::{subscribe_board_view, BoardLayout, Piece, PieceKind, PiecePool};
use shakmaty::Square;
use std::collections::BTreeMap;

fn board_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(GamePlugin)
        .init_resource::<BoardLayout>()
        .init_resource::<PiecePool>()
        .init_resource::<BoardAssets>();
    subscribe_board_view(app.world_mut());

    // PostStartup starts the first game
    app.update();
    app
}

/// Visible pieces keyed by the square they stand on
fn visible_pieces(world: &mut World) -> BTreeMap<u32, PieceKind> {
    let layout = *world.resource::<BoardLayout>();
    let mut query = world.query::<(&Piece, &Transform, &Visibility)>();
    let mut pieces = BTreeMap::new();
    for (piece, transform, visibility) in query.iter(world) {
        if *visibility != Visibility::Visible {
            continue;
        }
        let square = layout
            .world_to_square(transform.translation.truncate())
            .expect("visible piece off the board");
        let previous = pieces.insert(square as u32, piece.kind);
        assert!(previous.is_none(), "two visible pieces on {}", square);
    }
    pieces
}

fn occupied(world: &World) -> BTreeMap<u32, PieceKind> {
    world
        .resource::<ChessGame>()
        .occupied()
        .map(|(square, kind)| (square as u32, kind))
        .collect()
}

fn attempt(world: &mut World, from: Square, to: Square) {
    world
        .publish(MoveAttempted {
            candidate: CandidateMove::new(from, to),
        })
        .unwrap();
    world.flush();
}

#[test]
fn test_new_game_shows_initial_position() {
    let mut app = board_app();
    let world = app.world_mut();

    let visible = visible_pieces(world);
    assert_eq!(visible.len(), 32);
    assert_eq!(visible, occupied(world));
    assert_eq!(world.resource::<Channel<PieceCreated>>().published(), 32);
}

#[test]
fn test_capture_hides_one_piece_and_keeps_pool() {
    let mut app = board_app();
    let world = app.world_mut();

    attempt(world, Square::E2, Square::E4);
    attempt(world, Square::D7, Square::D5);
    attempt(world, Square::E4, Square::D5);

    assert_eq!(world.resource::<ChessGame>().ply(), 3);
    let visible = visible_pieces(world);
    assert_eq!(visible.len(), 31);
    assert_eq!(visible, occupied(world));

    // The captured pawn is hidden, not despawned
    let pool = world.resource::<PiecePool>();
    assert_eq!(pool.len(), 32);
    assert_eq!(pool.hidden().count(), 1);
    assert_eq!(world.resource::<Channel<PieceCreated>>().published(), 32);
}

#[test]
fn test_illegal_move_changes_nothing() {
    let mut app = board_app();
    let world = app.world_mut();
    let before = visible_pieces(world);

    attempt(world, Square::E2, Square::E5);

    assert_eq!(world.resource::<Channel<MoveApplied>>().published(), 0);
    assert_eq!(world.resource::<ChessGame>().ply(), 0);
    assert_eq!(visible_pieces(world), before);
}

#[test]
fn test_promotion_creates_a_queen() {
    use shakmaty::fen::Fen;
    use shakmaty::CastlingMode;

    let mut app = board_app();
    let world = app.world_mut();

    let fen: Fen = "7k/P7/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
    let position = fen.into_position(CastlingMode::Standard).unwrap();
    *world.resource_mut::<ChessGame>() = ChessGame::from_position(position);
    attempt(world, Square::A7, Square::A8);

    let visible = visible_pieces(world);
    assert_eq!(visible.len(), 3);
    assert_eq!(visible, occupied(world));
    assert_eq!(visible.get(&(Square::A8 as u32)).map(|kind| kind.symbol()), Some('Q'));
}

#[test]
fn test_second_new_game_reuses_entities() {
    let mut app = board_app();
    let world = app.world_mut();
    attempt(world, Square::G1, Square::F3);

    let mut game = world.resource::<ChessGame>().clone();
    game.reset();
    world.insert_resource(game);
    world.publish(chessboy::game::NewGame).unwrap();
    world.flush();

    let entities = world.query::<&Piece>().iter(world).count();
    assert_eq!(entities, 32);
    assert_eq!(visible_pieces(world), occupied(world));
}
