//! Change notification for whole-collection replacement.
//!
//! Observers are told when [`crate::ConfigStore::replace_settings`] swaps
//! the settings collection for a different one.  Individual key writes do
//! not notify.
//!
//! Observers run synchronously on the caller's thread, in subscription
//! order, exactly once per replacement.  Each subscription is identified by
//! a [`SubscriptionId`] that can later be passed to `unsubscribe`.

use super::Settings;

/// Receives a borrow of the new collection after it has been installed.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsObserver: Send {
    fn settings_replaced(&self, settings: &Settings);
}

/// Adapter that lets a plain closure act as a [`SettingsObserver`].
struct FnObserver<F>(F);

impl<F> SettingsObserver for FnObserver<F>
where
    F: Fn(&Settings) + Send,
{
    fn settings_replaced(&self, settings: &Settings) {
        (self.0)(settings)
    }
}

/// Handle returned by `subscribe`; pass it to `unsubscribe` to detach.
///
/// Ids are unique within one registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of observers with id allocation.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Box<dyn SettingsObserver>)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer` and returns its handle.
    pub fn subscribe(&mut self, observer: Box<dyn SettingsObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.observers.push((id, observer));
        id
    }

    /// Wraps `callback` in an observer and subscribes it.
    pub fn subscribe_fn<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Settings) + Send + 'static,
    {
        self.subscribe(Box::new(FnObserver(callback)))
    }

    /// Removes the observer with `id`.  Returns `false` if it was not present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Invokes every observer once with `settings`.
    pub fn notify(&self, settings: &Settings) {
        for (_, observer) in &self.observers {
            observer.settings_replaced(settings);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
