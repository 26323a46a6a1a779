//! Synchronous publish/subscribe channels
//!
//! Panels and board systems talk to each other through named channels instead
//! of holding references to one another. Each channel is an ECS resource
//! ([`Channel<E>`]) stored in the app's `World`, so the dispatcher is an
//! explicit dependency of whoever publishes rather than process-wide state.
//!
//! # Semantics
//!
//! - Handlers are ordinary systems taking the event as input (`In<E>`).
//! - [`EventBusWorldExt::publish`] runs every subscriber immediately, in
//!   subscription order, each with its own clone of the event.
//! - No error isolation: the first handler that fails aborts the publish and
//!   the error is returned to the publisher.
//! - [`EventBusCommandsExt::publish`] defers the same call until the command
//!   queue is applied; failures then go to Bevy's error handler.
//!
//! ```rust,ignore
//! fn on_new_game(In(_): In<NewGame>, mut panel: ResMut<NotationPanel>) {
//!     panel.clear();
//! }
//!
//! let subscription = world.subscribe(on_new_game);
//! world.publish(NewGame)?;
//! world.unsubscribe(subscription);
//! ```
//!
//! Publishing a channel from inside one of its own handlers is not supported.

use bevy::ecs::system::SystemId;
use bevy::prelude::*;
use std::fmt;
use thiserror::Error;

/// An event type that can travel over the bus
///
/// The type itself selects the channel; [`BusEvent::CHANNEL`] names it for
/// logging and error reports.
pub trait BusEvent: Clone + Send + Sync + 'static {
    const CHANNEL: &'static str;
}

/// Errors surfaced by [`EventBusWorldExt::publish`]
#[derive(Error, Debug)]
pub enum BusError {
    /// A subscriber could not run or failed while running
    #[error("handler on channel `{channel}` failed: {message}")]
    Handler {
        channel: &'static str,
        message: String,
    },
}

/// Subscriber list of one channel
#[derive(Resource)]
pub struct Channel<E: BusEvent> {
    subscribers: Vec<SystemId<In<E>>>,
    published: u64,
}

impl<E: BusEvent> Default for Channel<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            published: 0,
        }
    }
}

impl<E: BusEvent> Channel<E> {
    /// Number of live subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// How many times this channel has been published since it was created
    pub fn published(&self) -> u64 {
        self.published
    }

    fn contains(&self, system: SystemId<In<E>>) -> bool {
        self.subscribers.contains(&system)
    }
}

/// Handle returned by [`EventBusWorldExt::subscribe`], used to unsubscribe
pub struct Subscription<E: BusEvent> {
    system: SystemId<In<E>>,
}

impl<E: BusEvent> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: BusEvent> Copy for Subscription<E> {}

impl<E: BusEvent> PartialEq for Subscription<E> {
    fn eq(&self, other: &Self) -> bool {
        self.system == other.system
    }
}

impl<E: BusEvent> Eq for Subscription<E> {}

impl<E: BusEvent> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &E::CHANNEL)
            .field("system", &self.system)
            .finish()
    }
}

/// Bus operations with direct `World` access
pub trait EventBusWorldExt {
    /// Create the channel resource if it does not exist yet
    fn add_channel<E: BusEvent>(&mut self);

    /// Register `handler` as the last subscriber of channel `E`
    fn subscribe<E: BusEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<E>, (), M> + 'static,
    ) -> Subscription<E>;

    /// Remove a subscriber. Returns `false` (and does nothing) if it was not subscribed.
    fn unsubscribe<E: BusEvent>(&mut self, subscription: Subscription<E>) -> bool;

    /// Deliver `event` to every subscriber of channel `E`, in subscription order
    fn publish<E: BusEvent>(&mut self, event: E) -> Result<(), BusError>;
}

impl EventBusWorldExt for World {
    fn add_channel<E: BusEvent>(&mut self) {
        if !self.contains_resource::<Channel<E>>() {
            self.insert_resource(Channel::<E>::default());
        }
    }

    fn subscribe<E: BusEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<E>, (), M> + 'static,
    ) -> Subscription<E> {
        let system = self.register_system(handler);
        self.get_resource_or_insert_with(Channel::<E>::default)
            .subscribers
            .push(system);
        debug!("[BUS] Subscribed {:?} to `{}`", system, E::CHANNEL);
        Subscription { system }
    }

    fn unsubscribe<E: BusEvent>(&mut self, subscription: Subscription<E>) -> bool {
        {
            let Some(mut channel) = self.get_resource_mut::<Channel<E>>() else {
                return false;
            };
            let Some(index) = channel
                .subscribers
                .iter()
                .position(|system| *system == subscription.system)
            else {
                return false;
            };
            channel.subscribers.remove(index);
        }

        if let Err(e) = self.unregister_system(subscription.system) {
            warn!("[BUS] Failed to unregister handler on `{}`: {}", E::CHANNEL, e);
        }
        debug!("[BUS] Unsubscribed {:?} from `{}`", subscription.system, E::CHANNEL);
        true
    }

    fn publish<E: BusEvent>(&mut self, event: E) -> Result<(), BusError> {
        let subscribers = {
            let mut channel = self.get_resource_or_insert_with(Channel::<E>::default);
            channel.published += 1;
            channel.subscribers.clone()
        };
        trace!("[BUS] Publishing `{}` to {} handler(s)", E::CHANNEL, subscribers.len());

        for system in subscribers {
            // An earlier handler may have unsubscribed this one
            let still_subscribed = self
                .get_resource::<Channel<E>>()
                .is_some_and(|channel| channel.contains(system));
            if !still_subscribed {
                continue;
            }

            self.run_system_with(system, event.clone())
                .map_err(|e| BusError::Handler {
                    channel: E::CHANNEL,
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Deferred publishing from inside systems and observers
pub trait EventBusCommandsExt {
    fn publish<E: BusEvent>(&mut self, event: E);
}

impl EventBusCommandsExt for Commands<'_, '_> {
    fn publish<E: BusEvent>(&mut self, event: E) {
        self.queue(move |world: &mut World| EventBusWorldExt::publish(world, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Ping(u32);

    impl BusEvent for Ping {
        const CHANNEL: &'static str = "ping";
    }

    #[derive(Resource, Default)]
    struct Log(Vec<String>);

    #[derive(Resource)]
    struct Missing;

    fn first(In(ping): In<Ping>, mut log: ResMut<Log>) {
        log.0.push(format!("first:{}", ping.0));
    }

    fn second(In(ping): In<Ping>, mut log: ResMut<Log>) {
        log.0.push(format!("second:{}", ping.0));
    }

    fn needs_missing(In(_): In<Ping>, _missing: Res<Missing>) {}

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<Log>();
        world.add_channel::<Ping>();
        world
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let mut world = world();
        world.subscribe(second);
        world.subscribe(first);

        world.publish(Ping(7)).unwrap();

        assert_eq!(world.resource::<Log>().0, vec!["second:7", "first:7"]);
        assert_eq!(world.resource::<Channel<Ping>>().published(), 1);
    }

    #[test]
    fn test_unsubscribed_handler_no_longer_runs() {
        let mut world = world();
        let sub = world.subscribe(first);
        world.subscribe(second);

        assert!(world.unsubscribe(sub));
        world.publish(Ping(1)).unwrap();

        assert_eq!(world.resource::<Log>().0, vec!["second:1"]);
        assert_eq!(world.resource::<Channel<Ping>>().len(), 1);
    }

    #[test]
    fn test_unsubscribe_twice_is_noop() {
        let mut world = world();
        let sub = world.subscribe(first);

        assert!(world.unsubscribe(sub));
        assert!(!world.unsubscribe(sub));
        assert!(world.resource::<Channel<Ping>>().is_empty());
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let mut world = World::new();
        world.publish(Ping(0)).unwrap();
        assert_eq!(world.resource::<Channel<Ping>>().published(), 1);
    }

    #[test]
    fn test_failing_handler_propagates_and_stops_delivery() {
        let mut world = world();
        world.subscribe(first);
        world.subscribe(needs_missing);
        world.subscribe(second);

        let result = world.publish(Ping(3));

        assert!(matches!(result, Err(BusError::Handler { channel: "ping", .. })));
        assert_eq!(world.resource::<Log>().0, vec!["first:3"]);
    }

    #[test]
    fn test_handler_can_unsubscribe_a_later_handler() {
        #[derive(Resource)]
        struct Victim(Subscription<Ping>);

        fn assassin(In(_): In<Ping>, world: &mut World) {
            let victim = world.resource::<Victim>().0;
            world.unsubscribe(victim);
        }

        let mut world = world();
        world.subscribe(assassin);
        let victim = world.subscribe(first);
        world.insert_resource(Victim(victim));

        world.publish(Ping(9)).unwrap();

        assert!(world.resource::<Log>().0.is_empty());
    }

    #[test]
    fn test_commands_publish_is_applied_on_flush() {
        let mut world = world();
        world.subscribe(first);

        world.commands().publish(Ping(5));
        assert!(world.resource::<Log>().0.is_empty());

        world.flush();
        assert_eq!(world.resource::<Log>().0, vec!["first:5"]);
    }
}
