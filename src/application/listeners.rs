//! Owner-change listener registry shared by the tracker and the clipboard adapters

use std::cell::RefCell;

use crate::domain::event::OwnerChangeEvent;

/// Callback invoked for every owner change
pub type Listener = Box<dyn FnMut(&OwnerChangeEvent)>;

/// Ordered set of listeners that tolerates changes made from inside a listener.
///
/// Listeners are moved out of the list while they run, so one of them may
/// connect or disconnect listeners (or drop the owner of the list) without
/// re-borrowing it. A listener disconnected during delivery is not called
/// again, not even later in the same round.
#[derive(Default)]
pub struct ListenerList {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
    in_flight: Vec<u64>,
    removed: Vec<u64>,
    depth: usize,
}

impl ListenerList {
    /// Register `listener`, returning its id
    pub fn add(&mut self, listener: Listener) -> u64 {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    /// Remove a listener. Returns false when `id` is not registered.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        if self.entries.len() != before {
            return true;
        }

        if self.in_flight.contains(&id) && !self.removed.contains(&id) {
            self.removed.push(id);
            return true;
        }
        false
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        let in_flight = self
            .in_flight
            .iter()
            .filter(|id| !self.removed.contains(id))
            .count();
        self.entries.len() + in_flight
    }

    /// Deliver `event` to every listener, in registration order.
    pub fn emit(list: &RefCell<Self>, event: &OwnerChangeEvent) {
        let mut active = {
            let mut guard = list.borrow_mut();
            guard.depth += 1;
            let taken = std::mem::take(&mut guard.entries);
            guard.in_flight.extend(taken.iter().map(|(id, _)| *id));
            taken
        };

        for (id, listener) in active.iter_mut() {
            if list.borrow().removed.contains(id) {
                continue;
            }
            listener(event);
        }

        let mut guard = list.borrow_mut();
        guard.depth -= 1;
        for (id, _) in &active {
            if let Some(pos) = guard.in_flight.iter().position(|f| f == id) {
                guard.in_flight.swap_remove(pos);
            }
        }

        // Removals must outlive nested rounds until the outermost one ends
        let removed = if guard.depth == 0 {
            std::mem::take(&mut guard.removed)
        } else {
            guard.removed.clone()
        };
        active.retain(|(id, _)| !removed.contains(id));

        let added = std::mem::replace(&mut guard.entries, active);
        guard.entries.extend(added);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::domain::event::OwnerChangeReason;
    use crate::domain::selection::SelectionTarget;

    fn event() -> OwnerChangeEvent {
        OwnerChangeEvent::new(SelectionTarget::Clipboard, OwnerChangeReason::NewOwner)
    }

    fn recorder(seen: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Listener {
        let seen = Rc::clone(seen);
        Box::new(move |_: &OwnerChangeEvent| seen.borrow_mut().push(tag))
    }

    #[test]
    fn listeners_receive_events_in_order() {
        let list = RefCell::new(ListenerList::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        list.borrow_mut().add(recorder(&seen, 1));
        list.borrow_mut().add(recorder(&seen, 2));

        ListenerList::emit(&list, &event());
        ListenerList::emit(&list, &event());

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let list = RefCell::new(ListenerList::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = list.borrow_mut().add(recorder(&seen, 1));

        assert!(list.borrow_mut().remove(id));
        assert!(!list.borrow_mut().remove(id));
        ListenerList::emit(&list, &event());

        assert!(seen.borrow().is_empty());
        assert_eq!(list.borrow().len(), 0);
    }

    #[test]
    fn listener_can_remove_itself_while_emitting() {
        let list = Rc::new(RefCell::new(ListenerList::default()));
        let count = Rc::new(RefCell::new(0));
        let own_id = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&list);
        let counter = Rc::clone(&count);
        let slot = Rc::clone(&own_id);
        let id = list.borrow_mut().add(Box::new(move |_: &OwnerChangeEvent| {
            *counter.borrow_mut() += 1;
            if let Some(id) = *slot.borrow() {
                assert!(inner.borrow_mut().remove(id));
            }
        }));
        *own_id.borrow_mut() = Some(id);

        ListenerList::emit(&list, &event());
        ListenerList::emit(&list, &event());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(list.borrow().len(), 0);
    }

    #[test]
    fn later_listener_removed_mid_round_is_skipped() {
        let list = Rc::new(RefCell::new(ListenerList::default()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&list);
        let victim = Rc::new(RefCell::new(0));
        let target = Rc::clone(&victim);
        list.borrow_mut().add(Box::new(move |_: &OwnerChangeEvent| {
            let id = *target.borrow();
            inner.borrow_mut().remove(id);
        }));
        let id = list.borrow_mut().add(recorder(&seen, 2));
        *victim.borrow_mut() = id;

        ListenerList::emit(&list, &event());
        assert!(seen.borrow().is_empty());
        assert_eq!(list.borrow().len(), 1);
    }

    #[test]
    fn unknown_id_is_rejected_while_emitting() {
        let list = Rc::new(RefCell::new(ListenerList::default()));
        let result = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&list);
        let out = Rc::clone(&result);
        list.borrow_mut().add(Box::new(move |_: &OwnerChangeEvent| {
            *out.borrow_mut() = Some(inner.borrow_mut().remove(999));
        }));

        ListenerList::emit(&list, &event());
        assert_eq!(*result.borrow(), Some(false));
        assert_eq!(list.borrow().len(), 1);
    }

    #[test]
    fn removal_in_outer_round_survives_nested_emit() {
        let list = Rc::new(RefCell::new(ListenerList::default()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let victim = Rc::new(RefCell::new(0));
        let nested_done = Rc::new(RefCell::new(false));

        // First listener removes the third one, then triggers a nested round
        let inner = Rc::clone(&list);
        let target = Rc::clone(&victim);
        let done = Rc::clone(&nested_done);
        list.borrow_mut().add(Box::new(move |event: &OwnerChangeEvent| {
            if *done.borrow() {
                return;
            }
            *done.borrow_mut() = true;
            let id = *target.borrow();
            inner.borrow_mut().remove(id);
            ListenerList::emit(&inner, event);
        }));
        list.borrow_mut().add(recorder(&seen, 2));
        let id = list.borrow_mut().add(recorder(&seen, 3));
        *victim.borrow_mut() = id;

        ListenerList::emit(&list, &event());
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(list.borrow().len(), 2);

        ListenerList::emit(&list, &event());
        assert_eq!(*seen.borrow(), vec![2, 2]);
    }
}
