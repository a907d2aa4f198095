//! Synchronous change-notification registry

/// Handle identifying a registered listener, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered registry of zero-argument change listeners.
///
/// Listeners are invoked synchronously and in registration order, once per
/// mutating console operation. By contract a listener must not mutate the
/// console it observes from inside its callback; the registry does not defend
/// against such re-entrancy.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns the handle needed to unsubscribe it.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Invoke every registered listener, in registration order.
    pub fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}
