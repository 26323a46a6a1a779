//! Asset management module
//!
//! Loads the board images once at startup:
//! - 12 piece images, `imgs/<Type> <Color>.png`
//! - the light and dark square images, `imgs/Field Light.png` / `imgs/Field Dark.png`
//!
//! A board that cannot be drawn is useless, so any of these failing to load
//! is fatal: the failure is logged and the app exits with an error code.

use crate::rendering::pieces::PieceKind;
use bevy::app::AppExit;
use bevy::asset::AssetLoadFailedEvent;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

pub const LIGHT_SQUARE_PATH: &str = "imgs/Field Light.png";
pub const DARK_SQUARE_PATH: &str = "imgs/Field Dark.png";

/// Handles to every image the board uses
///
/// Holding the strong handles keeps the images loaded for the whole session.
#[derive(Resource, Default, Debug)]
pub struct BoardAssets {
    /// Indexed by [`PieceKind::index`]
    pub pieces: [Handle<Image>; PieceKind::COUNT],
    pub light_square: Handle<Image>,
    pub dark_square: Handle<Image>,
}

/// Start loading every board image
pub fn load_board_assets(mut commands: Commands, server: Res<AssetServer>) {
    let mut assets = BoardAssets {
        light_square: server.load(LIGHT_SQUARE_PATH),
        dark_square: server.load(DARK_SQUARE_PATH),
        ..default()
    };
    for kind in PieceKind::all() {
        assets.pieces[kind.index()] = server.load(kind.asset_path());
    }
    info!("[ASSETS] Loading {} board images", PieceKind::COUNT + 2);
    commands.insert_resource(assets);
}

impl BoardAssets {
    pub fn piece(&self, kind: PieceKind) -> Handle<Image> {
        self.pieces[kind.index()].clone()
    }

    pub fn square(&self, light: bool) -> Handle<Image> {
        if light {
            self.light_square.clone()
        } else {
            self.dark_square.clone()
        }
    }

    /// Whether `id` is one of the board images
    pub fn contains(&self, id: AssetId<Image>) -> bool {
        self.light_square.id() == id
            || self.dark_square.id() == id
            || self.pieces.iter().any(|handle| handle.id() == id)
    }
}

/// Exit with an error when a board image fails to load
pub fn exit_on_failed_board_image(
    assets: Res<BoardAssets>,
    mut failed: MessageReader<AssetLoadFailedEvent<Image>>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in failed.read() {
        if !assets.contains(event.id) {
            continue;
        }
        error!(
            "[ASSETS] Failed to load {}: {}",
            event.path.path().display(),
            event.error
        );
        exit.write(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assets_cover_every_kind() {
        let assets = BoardAssets::default();
        assert_eq!(assets.pieces.len(), PieceKind::COUNT);
        for kind in PieceKind::all() {
            assert_eq!(assets.piece(kind), Handle::default());
        }
    }

    #[test]
    fn test_square_handles_by_color() {
        let assets = BoardAssets::default();
        assert_eq!(assets.square(true), assets.light_square);
        assert_eq!(assets.square(false), assets.dark_square);
    }
}
