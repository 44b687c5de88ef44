use crate::session::TurnAction;

/// Identifies the round and turn an action was scheduled for. Counters
/// only ever move forward, so tag equality means "still that exact turn".
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TurnTag {
    pub round: u32,
    pub turn: u32,
}

/// A deferred dealer decision tagged with the turn it belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub tag: TurnTag,
    pub action: TurnAction,
}

/// Single-slot queue for the dealer's deferred decision.
///
/// The scripted delay before the dealer acts is presentation; correctness
/// only requires that a decision scheduled for one turn never executes
/// against a later one. Callers schedule with the tag current at decision
/// time and take with the tag current at execution time; a mismatch drops
/// the action silently. Scheduling replaces any action still pending.
#[derive(Debug, Default)]
pub struct ActionQueue {
    pending: Option<PendingAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, tag: TurnTag, action: TurnAction) {
        self.pending = Some(PendingAction { tag, action });
    }

    /// Take the pending action if it was scheduled for `current`. A stale
    /// action is discarded either way.
    pub fn take_if_current(&mut self, current: TurnTag) -> Option<TurnAction> {
        let pending = self.pending.take()?;
        (pending.tag == current).then_some(pending.action)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
