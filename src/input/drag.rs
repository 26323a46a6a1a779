//! Drag-and-drop of pieces
//!
//! Each piece entity carries a [`PieceDrag`] state machine and three picking
//! observers, attached when the pool creates it:
//!
//! ```text
//! Idle --DragStart--> Lifted { origin, rest } --DragEnd--> Idle
//!                        |  Drag: follow pointer
//! ```
//!
//! On release the piece always snaps back to where it was picked up. If it
//! was dropped on another square a `MoveAttempted` is published; the rules
//! library decides, and only an applied move resynchronizes the board.

use crate::core::EventBusCommandsExt;
use crate::game::events::{CandidateMove, MoveAttempted, PieceLifted};
use crate::rendering::camera::BoardCamera;
use crate::rendering::pieces::Piece;
use crate::rendering::utils::{BoardLayout, LIFTED_Z};
use bevy::ecs::system::SystemParam;
use bevy::picking::events::{Drag, DragEnd, DragStart, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use shakmaty::Square;

/// Scale applied to a piece while it is held
pub const LIFT_SCALE: f32 = 1.1;

/// Drag lifecycle of one piece
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub enum PieceDrag {
    #[default]
    Idle,
    Lifted {
        origin: Square,
        /// Translation to snap back to on release
        rest: Vec3,
    },
}

impl PieceDrag {
    pub fn lift(&mut self, origin: Square, rest: Vec3) {
        *self = PieceDrag::Lifted { origin, rest };
    }

    pub fn is_lifted(&self) -> bool {
        matches!(self, PieceDrag::Lifted { .. })
    }

    pub fn rest(&self) -> Option<Vec3> {
        match self {
            PieceDrag::Lifted { rest, .. } => Some(*rest),
            PieceDrag::Idle => None,
        }
    }

    /// Return to `Idle`, yielding a candidate move if the piece landed on a
    /// different square of the board
    pub fn release(&mut self, destination: Option<Square>) -> Option<CandidateMove> {
        let PieceDrag::Lifted { origin, .. } = std::mem::take(self) else {
            return None;
        };
        let destination = destination?;
        (destination != origin).then(|| CandidateMove::new(origin, destination))
    }
}

fn is_primary(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary)
}

/// Pieces and everything the drag handlers touch
#[derive(SystemParam)]
pub struct DragPieces<'w, 's> {
    layout: Res<'w, BoardLayout>,
    pieces: Query<'w, 's, (&'static mut PieceDrag, &'static mut Transform), With<Piece>>,
    commands: Commands<'w, 's>,
}

impl DragPieces<'_, '_> {
    /// Pick a piece up: remember where it stood and raise it above the others
    pub fn lift(&mut self, button: PointerButton, entity: Entity) {
        if !is_primary(button) {
            return;
        }
        let Ok((mut state, mut transform)) = self.pieces.get_mut(entity) else {
            return;
        };
        let Some(origin) = self.layout.world_to_square(transform.translation.truncate()) else {
            warn!("[DRAG] Piece {:?} is not on a board square", entity);
            return;
        };

        state.lift(origin, transform.translation);
        transform.translation.z = LIFTED_Z;
        transform.scale = Vec3::splat(LIFT_SCALE);

        debug!("[DRAG] Lifted {:?} from {}", entity, origin);
        self.commands.publish(PieceLifted {
            piece: entity,
            square: origin,
        });
    }

    /// Move a lifted piece to `position`, keeping its height
    pub fn follow(&mut self, button: PointerButton, entity: Entity, position: Vec2) {
        if !is_primary(button) {
            return;
        }
        let Ok((state, mut transform)) = self.pieces.get_mut(entity) else {
            return;
        };
        if !state.is_lifted() {
            return;
        }
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }

    /// Drop a piece: snap it back and propose the move if the square changed
    pub fn release(&mut self, button: PointerButton, entity: Entity) {
        if !is_primary(button) {
            return;
        }
        let Ok((mut state, mut transform)) = self.pieces.get_mut(entity) else {
            return;
        };
        let Some(rest) = state.rest() else {
            return;
        };

        let destination = self.layout.world_to_square(transform.translation.truncate());
        transform.translation = rest;
        transform.scale = Vec3::ONE;

        match state.release(destination) {
            Some(candidate) => {
                debug!("[DRAG] Dropped {:?}, trying {}", entity, candidate);
                self.commands.publish(MoveAttempted { candidate });
            }
            None => {
                debug!("[DRAG] Dropped {:?} without a move", entity);
            }
        }
    }
}

pub fn on_piece_drag_start(drag: On<Pointer<DragStart>>, mut pieces: DragPieces) {
    pieces.lift(drag.event.button, drag.entity);
}

/// Keep a lifted piece under the pointer
pub fn on_piece_drag(
    drag: On<Pointer<Drag>>,
    cameras: Query<(&Camera, &GlobalTransform), With<BoardCamera>>,
    mut pieces: DragPieces,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, drag.pointer_location.position) else {
        return;
    };
    pieces.follow(drag.event.button, drag.entity, world);
}

pub fn on_piece_drag_end(drag: On<Pointer<DragEnd>>, mut pieces: DragPieces) {
    pieces.release(drag.event.button, drag.entity);
}
