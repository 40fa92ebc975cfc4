//! Input events, key bindings, and the subscription seam.

use std::collections::HashSet;

use crate::geo::GeoPoint;

/// One event from the host input stream.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary click, carrying the geographic point under the cursor.
    Click(GeoPoint),
    /// Raw key name, case-sensitive ("d" and "D" are different keys).
    Key(String),
}

/// Cardinal direction for nudging a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    South,
    East,
    West,
}

/// Which rectangle axis a resize acts on.
///
/// The first axis runs along the edge from corner 0 to corner 1; the
/// second is its in-plane perpendicular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowAxis {
    First,
    Second,
}

/// A decoded editor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    ToggleMode,
    RotateClockwise,
    RotateCounterClockwise,
    Nudge(Compass),
    Expand(GrowAxis),
    Shrink(GrowAxis),
    DeleteFocused,
    DumpLayout,
}

impl EditCommand {
    /// Decode a raw key name; unbound keys decode to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "." => Some(Self::ToggleMode),
            "ArrowRight" => Some(Self::RotateClockwise),
            "ArrowLeft" => Some(Self::RotateCounterClockwise),
            "w" => Some(Self::Nudge(Compass::North)),
            "a" => Some(Self::Nudge(Compass::West)),
            "s" => Some(Self::Nudge(Compass::South)),
            "d" => Some(Self::Nudge(Compass::East)),
            "1" => Some(Self::Expand(GrowAxis::First)),
            "2" => Some(Self::Shrink(GrowAxis::First)),
            "3" => Some(Self::Expand(GrowAxis::Second)),
            "4" => Some(Self::Shrink(GrowAxis::Second)),
            "D" => Some(Self::DeleteFocused),
            "P" => Some(Self::DumpLayout),
            _ => None,
        }
    }
}

/// Event classes a handler can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interest {
    PrimaryClick,
    Keyboard,
}

/// Everything an editing session listens for.
pub const HANDLER_SET: [Interest; 2] = [Interest::PrimaryClick, Interest::Keyboard];

/// Receipt for one subscription; hand it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// A host input stream the editor registers interest with.
pub trait InputSource {
    fn subscribe(&mut self, interest: Interest) -> SubscriptionToken;
    fn unsubscribe(&mut self, token: SubscriptionToken);
}

/// Input source that only does token bookkeeping, for tests and
/// hosts that poll events themselves.
#[derive(Debug, Default)]
pub struct TokenLedger {
    next_serial: u64,
    active: HashSet<SubscriptionToken>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions not yet released.
    pub fn active(&self) -> usize {
        self.active.len()
    }
}

impl InputSource for TokenLedger {
    fn subscribe(&mut self, _interest: Interest) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_serial);
        self.next_serial += 1;
        self.active.insert(token);
        token
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.active.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(EditCommand::from_key("."), Some(EditCommand::ToggleMode));
        assert_eq!(
            EditCommand::from_key("ArrowRight"),
            Some(EditCommand::RotateClockwise)
        );
        assert_eq!(
            EditCommand::from_key("ArrowLeft"),
            Some(EditCommand::RotateCounterClockwise)
        );
        assert_eq!(
            EditCommand::from_key("w"),
            Some(EditCommand::Nudge(Compass::North))
        );
        assert_eq!(
            EditCommand::from_key("a"),
            Some(EditCommand::Nudge(Compass::West))
        );
        assert_eq!(
            EditCommand::from_key("s"),
            Some(EditCommand::Nudge(Compass::South))
        );
        assert_eq!(
            EditCommand::from_key("1"),
            Some(EditCommand::Expand(GrowAxis::First))
        );
        assert_eq!(
            EditCommand::from_key("2"),
            Some(EditCommand::Shrink(GrowAxis::First))
        );
        assert_eq!(
            EditCommand::from_key("3"),
            Some(EditCommand::Expand(GrowAxis::Second))
        );
        assert_eq!(
            EditCommand::from_key("4"),
            Some(EditCommand::Shrink(GrowAxis::Second))
        );
        assert_eq!(EditCommand::from_key("P"), Some(EditCommand::DumpLayout));
    }

    #[test]
    fn test_key_bindings_are_case_sensitive() {
        // Lowercase d nudges, uppercase D deletes.
        assert_eq!(
            EditCommand::from_key("d"),
            Some(EditCommand::Nudge(Compass::East))
        );
        assert_eq!(EditCommand::from_key("D"), Some(EditCommand::DeleteFocused));
        assert_eq!(EditCommand::from_key("p"), None);
        assert_eq!(EditCommand::from_key("W"), None);
    }

    #[test]
    fn test_unbound_keys_decode_to_none() {
        assert_eq!(EditCommand::from_key("x"), None);
        assert_eq!(EditCommand::from_key("Escape"), None);
        assert_eq!(EditCommand::from_key(""), None);
    }

    #[test]
    fn test_token_ledger_tracks_active_subscriptions() {
        let mut ledger = TokenLedger::new();
        let first = ledger.subscribe(Interest::PrimaryClick);
        let second = ledger.subscribe(Interest::Keyboard);
        assert_ne!(first, second);
        assert_eq!(ledger.active(), 2);

        ledger.unsubscribe(first);
        assert_eq!(ledger.active(), 1);
        // Releasing the same token twice is harmless.
        ledger.unsubscribe(first);
        assert_eq!(ledger.active(), 1);

        ledger.unsubscribe(second);
        assert_eq!(ledger.active(), 0);
    }
}
