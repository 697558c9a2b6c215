use std::collections::HashMap;

use super::action::{DrinkAction, ReversibleAction};
use super::history::ActionHistory;
use crate::error::Result;

/// Routes actions to one independent history per input source.
///
/// Histories are created on first use and live for the whole session.
#[derive(Debug)]
pub struct Actor<A: ReversibleAction = DrinkAction> {
    histories: HashMap<String, ActionHistory<A>>,
}

impl<A: ReversibleAction> Default for Actor<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ReversibleAction> Actor<A> {
    pub fn new() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }

    fn history_mut(&mut self, id: &str) -> &mut ActionHistory<A> {
        self.histories.entry(id.to_string()).or_default()
    }

    pub fn add_action(&mut self, id: &str, action: A) -> Result<()> {
        self.history_mut(id).add_action(action)
    }

    pub fn undo(&mut self, id: &str) -> Result<bool> {
        self.history_mut(id).undo()
    }

    pub fn redo(&mut self, id: &str) -> Result<bool> {
        self.history_mut(id).redo()
    }

    pub fn history(&self, id: &str) -> Option<&ActionHistory<A>> {
        self.histories.get(id)
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = &str> {
        self.histories.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Tagged {
        tag: String,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ReversibleAction for Tagged {
        fn apply(&mut self) -> Result<()> {
            self.log.borrow_mut().push(format!("+{}", self.tag));
            Ok(())
        }

        fn revert(&mut self) -> Result<()> {
            self.log.borrow_mut().push(format!("-{}", self.tag));
            Ok(())
        }
    }

    fn tagged(tag: &str, log: &Rc<RefCell<Vec<String>>>) -> Tagged {
        Tagged {
            tag: tag.to_string(),
            log: log.clone(),
        }
    }

    #[test]
    fn test_actors_are_independent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        actor.add_action("a", tagged("a1", &log)).unwrap();
        actor.add_action("b", tagged("b1", &log)).unwrap();
        actor.add_action("a", tagged("a2", &log)).unwrap();

        assert!(actor.undo("b").unwrap());
        assert!(!actor.undo("b").unwrap());
        assert_eq!(log.borrow().last().map(String::as_str), Some("-b1"));
        assert_eq!(actor.history("a").unwrap().undo_depth(), 2);

        assert!(actor.undo("a").unwrap());
        assert_eq!(log.borrow().last().map(String::as_str), Some("-a2"));
    }

    #[test]
    fn test_unknown_actor_gets_empty_history() {
        let mut actor: Actor<Tagged> = Actor::new();
        assert!(!actor.undo("x").unwrap());
        assert!(!actor.redo("x").unwrap());

        let history = actor.history("x").unwrap();
        assert!(history.is_empty());
        assert_eq!(actor.actor_ids().count(), 1);
    }

    #[test]
    fn test_keyboard_actor_is_empty_id() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut actor = Actor::new();
        actor.add_action("", tagged("k", &log)).unwrap();
        assert!(actor.history("").is_some());
        assert!(actor.undo("").unwrap());
        assert!(actor.redo("").unwrap());
        assert_eq!(*log.borrow(), vec!["+k", "-k", "+k"]);
    }
}
