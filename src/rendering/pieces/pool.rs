//! Piece pool - reusable piece entities
//!
//! Every board resynchronization places pieces from scratch. Rather than
//! despawning and respawning up to 32 sprites per move, piece entities are
//! kept in a per-kind free list: [`PiecePool::clear`] hides everything and
//! [`PiecePool::get`] hands back a hidden entity of the requested kind,
//! spawning one only when none is free. Entities are never despawned, so the
//! pool only grows.

use super::pieces::{Piece, PieceKind};
use crate::core::EventBusCommandsExt;
use crate::game::events::PieceCreated;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy)]
struct PoolSlot {
    entity: Entity,
    visible: bool,
}

/// Result of [`PiecePool::acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquired {
    pub entity: Entity,
    /// `true` if the entity was spawned for this request
    pub created: bool,
}

/// Free lists of piece entities, one per [`PieceKind`]
#[derive(Resource, Debug, Default)]
pub struct PiecePool {
    slots: [Vec<PoolSlot>; PieceKind::COUNT],
}

impl PiecePool {
    /// Mark a hidden instance of `kind` visible, or call `spawn` to make a new one
    pub fn acquire(&mut self, kind: PieceKind, spawn: impl FnOnce() -> Entity) -> Acquired {
        let slots = &mut self.slots[kind.index()];
        if let Some(slot) = slots.iter_mut().find(|slot| !slot.visible) {
            slot.visible = true;
            return Acquired {
                entity: slot.entity,
                created: false,
            };
        }

        let entity = spawn();
        slots.push(PoolSlot {
            entity,
            visible: true,
        });
        Acquired {
            entity,
            created: true,
        }
    }

    /// Get a visible piece entity of `kind`, spawning it if needed
    ///
    /// A spawned entity carries only [`Piece`], `Transform`, `Visibility` and a
    /// name. Exactly one [`PieceCreated`] is published for it; subscribers give
    /// it a sprite and input handling.
    pub fn get(&mut self, kind: PieceKind, commands: &mut Commands) -> Entity {
        let acquired = self.acquire(kind, || {
            commands
                .spawn((
                    Piece { kind },
                    Transform::default(),
                    Visibility::Visible,
                    Name::new(format!("Piece {}", kind.symbol())),
                ))
                .id()
        });

        if acquired.created {
            debug!("[POOL] Spawned {:?} for {}", acquired.entity, kind.symbol());
            commands.publish(PieceCreated {
                piece: acquired.entity,
                kind,
            });
        }
        acquired.entity
    }

    /// Hide every pooled instance
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.visible = false;
        }
    }

    /// Visible instances with their kind
    pub fn visible(&self) -> impl Iterator<Item = (PieceKind, Entity)> + '_ {
        self.iter().filter(|(_, slot)| slot.visible).map(|(kind, slot)| (kind, slot.entity))
    }

    /// Hidden instances with their kind
    pub fn hidden(&self) -> impl Iterator<Item = (PieceKind, Entity)> + '_ {
        self.iter().filter(|(_, slot)| !slot.visible).map(|(kind, slot)| (kind, slot.entity))
    }

    pub fn is_visible(&self, entity: Entity) -> bool {
        self.iter().any(|(_, slot)| slot.entity == entity && slot.visible)
    }

    /// Number of instances of `kind`, visible or not
    pub fn count(&self, kind: PieceKind) -> usize {
        self.slots[kind.index()].len()
    }

    /// Total number of pooled instances
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> impl Iterator<Item = (PieceKind, &PoolSlot)> + '_ {
        PieceKind::all().flat_map(move |kind| self.slots[kind.index()].iter().map(move |slot| (kind, slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Channel, EventBusWorldExt};
    use crate::rendering::pieces::{PieceColor, PieceType};
    use bevy::ecs::system::RunSystemOnce;

    const WHITE_ROOK: PieceKind = PieceKind::new(PieceColor::White, PieceType::Rook);
    const BLACK_ROOK: PieceKind = PieceKind::new(PieceColor::Black, PieceType::Rook);

    #[test]
    fn test_acquire_spawns_only_when_no_hidden_instance() {
        let mut world = World::new();
        let mut pool = PiecePool::default();

        let first = pool.acquire(WHITE_ROOK, || world.spawn_empty().id());
        assert!(first.created);

        let second = pool.acquire(WHITE_ROOK, || world.spawn_empty().id());
        assert!(second.created);
        assert_ne!(first.entity, second.entity);

        pool.clear();
        let reused = pool.acquire(WHITE_ROOK, || panic!("should reuse a hidden rook"));
        assert!(!reused.created);
        assert_eq!(reused.entity, first.entity);
        assert_eq!(pool.count(WHITE_ROOK), 2);
    }

    #[test]
    fn test_kinds_do_not_share_instances() {
        let mut world = World::new();
        let mut pool = PiecePool::default();

        pool.acquire(WHITE_ROOK, || world.spawn_empty().id());
        pool.clear();
        let black = pool.acquire(BLACK_ROOK, || world.spawn_empty().id());

        assert!(black.created);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_clear_hides_everything_without_shrinking() {
        let mut world = World::new();
        let mut pool = PiecePool::default();
        for _ in 0..3 {
            pool.acquire(WHITE_ROOK, || world.spawn_empty().id());
        }
        assert_eq!(pool.visible().count(), 3);

        pool.clear();
        assert_eq!(pool.visible().count(), 0);
        assert_eq!(pool.hidden().count(), 3);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_get_publishes_exactly_one_creation_event() {
        let mut world = World::new();
        world.init_resource::<PiecePool>();
        world.add_channel::<PieceCreated>();

        let spawned = world
            .run_system_once(|mut pool: ResMut<PiecePool>, mut commands: Commands| {
                pool.get(WHITE_ROOK, &mut commands)
            })
            .unwrap();

        assert_eq!(world.resource::<Channel<PieceCreated>>().published(), 1);
        assert_eq!(world.get::<Piece>(spawned), Some(&Piece { kind: WHITE_ROOK }));

        world.resource_mut::<PiecePool>().clear();
        let reused = world
            .run_system_once(|mut pool: ResMut<PiecePool>, mut commands: Commands| {
                pool.get(WHITE_ROOK, &mut commands)
            })
            .unwrap();

        assert_eq!(reused, spawned);
        assert_eq!(world.resource::<Channel<PieceCreated>>().published(), 1);
    }
}
