use super::action::{DrinkAction, ReversibleAction};
use crate::error::Result;

/// Arena index of the sentinel head.
pub const HEAD: usize = 0;

/// One entry of the history chain. The head carries no action.
#[derive(Debug)]
pub struct HistoryNode<A = DrinkAction> {
    pub action: Option<A>,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl<A> HistoryNode<A> {
    fn head() -> Self {
        Self {
            action: None,
            previous: None,
            next: None,
        }
    }

    pub fn is_head(&self) -> bool {
        self.action.is_none() || self.previous.is_none()
    }
}

/// Linear undo/redo log for a single actor.
///
/// Nodes are stored in chain order, so everything after `current` in the
/// arena is the redo tail and is dropped by the next [`add_action`].
///
/// [`add_action`]: ActionHistory::add_action
#[derive(Debug)]
pub struct ActionHistory<A: ReversibleAction = DrinkAction> {
    nodes: Vec<HistoryNode<A>>,
    current: usize,
}

impl<A: ReversibleAction> Default for ActionHistory<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ReversibleAction> ActionHistory<A> {
    pub fn new() -> Self {
        Self {
            nodes: vec![HistoryNode::head()],
            current: HEAD,
        }
    }

    /// Apply `action` and make it the current entry. Nothing changes when
    /// the action fails.
    pub fn add_action(&mut self, mut action: A) -> Result<()> {
        action.apply()?;

        self.nodes.truncate(self.current + 1);
        let index = self.nodes.len();
        self.nodes.push(HistoryNode {
            action: Some(action),
            previous: Some(self.current),
            next: None,
        });
        self.nodes[self.current].next = Some(index);
        self.current = index;
        Ok(())
    }

    /// Revert the current entry. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let node = &mut self.nodes[self.current];
        let (Some(action), Some(previous)) = (node.action.as_mut(), node.previous) else {
            return Ok(false);
        };

        action.revert()?;
        self.current = previous;
        Ok(true)
    }

    /// Re-apply the entry after the cursor. `Ok(false)` when there is none.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(next) = self.nodes[self.current].next else {
            return Ok(false);
        };
        let Some(action) = self.nodes[next].action.as_mut() else {
            return Ok(false);
        };

        action.apply()?;
        self.current = next;
        Ok(true)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_action(&self) -> Option<&A> {
        self.nodes[self.current].action.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.nodes[self.current].is_head()
    }

    pub fn can_redo(&self) -> bool {
        self.nodes[self.current].next.is_some()
    }

    /// Number of applied entries.
    pub fn undo_depth(&self) -> usize {
        self.current
    }

    pub fn redo_depth(&self) -> usize {
        self.nodes.len() - 1 - self.current
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
