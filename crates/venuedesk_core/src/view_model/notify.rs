//! Change notification between view-models and their observers.

use std::fmt::{Debug, Formatter};

/// Incremental change an observer can apply without a full reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    Inserted { row: usize },
    Removed { row: usize },
    Changed { row: usize },
    /// Cursor replaced wholesale; observers must re-read everything.
    Reset,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ModelEvent)>;

/// Observer list owned by one view-model.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ModelEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Delivers `event` to every observer in subscription order.
    pub fn emit(&mut self, event: ModelEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Debug for ChangeNotifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeNotifier, ModelEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_in_subscription_order_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        let first_seen = Rc::clone(&seen);
        let first = notifier.subscribe(move |event| first_seen.borrow_mut().push((1, *event)));
        let second_seen = Rc::clone(&seen);
        notifier.subscribe(move |event| second_seen.borrow_mut().push((2, *event)));

        notifier.emit(ModelEvent::Inserted { row: 0 });
        assert!(notifier.unsubscribe(first));
        assert!(!notifier.unsubscribe(first));
        notifier.emit(ModelEvent::Reset);

        assert_eq!(
            *seen.borrow(),
            vec![
                (1, ModelEvent::Inserted { row: 0 }),
                (2, ModelEvent::Inserted { row: 0 }),
                (2, ModelEvent::Reset),
            ]
        );
        assert_eq!(notifier.observer_count(), 1);
    }
}
