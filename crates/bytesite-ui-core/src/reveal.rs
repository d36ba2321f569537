//! One-shot entrance reveals.
//!
//! Elements start `Watching` once they are tagged with the reveal class and
//! observed. The first sufficiently visible intersection moves them to
//! `Revealed`; there is no way back, and revealed elements are unobserved.

use serde::Serialize;

pub const REVEAL_CLASS: &str = "reveal";
pub const REVEAL_IN_CLASS: &str = "reveal-in";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealGroup {
    pub selector: &'static str,
    pub stagger_ms: u32,
}

pub const REVEAL_GROUPS: [RevealGroup; 9] = [
    RevealGroup { selector: ".hero-content", stagger_ms: 0 },
    RevealGroup { selector: ".hero-visual", stagger_ms: 0 },
    RevealGroup { selector: ".pillar-card", stagger_ms: 60 },
    RevealGroup { selector: ".outcome-item", stagger_ms: 60 },
    RevealGroup { selector: ".program-card", stagger_ms: 80 },
    RevealGroup { selector: ".step-item", stagger_ms: 50 },
    RevealGroup { selector: ".pricing-card", stagger_ms: 80 },
    RevealGroup { selector: ".promise-card", stagger_ms: 0 },
    RevealGroup { selector: ".accordion-item", stagger_ms: 40 },
];

impl RevealGroup {
    /// Transition delay for the element at `index` within this group, or
    /// `None` when the group is not staggered.
    pub fn transition_delay_ms(&self, index: usize, cap_ms: u32) -> Option<u32> {
        if self.stagger_ms == 0 {
            return None;
        }
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Some(index.saturating_mul(self.stagger_ms).min(cap_ms))
    }
}

/// Flattens matched elements into reveal targets in first-match order. An
/// element matched by several groups is registered once; a later staggered
/// group overwrites the delay an earlier one assigned.
pub fn merge_reveal_targets<T: PartialEq>(
    groups: impl IntoIterator<Item = (RevealGroup, Vec<T>)>,
    cap_ms: u32,
) -> Vec<(T, Option<u32>)> {
    let mut targets: Vec<(T, Option<u32>)> = Vec::new();
    for (group, elements) in groups {
        for (index, element) in elements.into_iter().enumerate() {
            let delay = group.transition_delay_ms(index, cap_ms);
            match targets.iter_mut().find(|(existing, _)| *existing == element) {
                Some((_, existing_delay)) => {
                    if delay.is_some() {
                        *existing_delay = delay;
                    }
                }
                None => targets.push((element, delay)),
            }
        }
    }
    targets
}

pub fn transition_delay_css(delay_ms: u32) -> String {
    format!("{delay_ms}ms")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Pending,
    Watching,
    Revealed,
}

/// What the observer callback should do for one intersection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the reveal-in class and stop observing.
    RevealAndUnobserve,
    Ignore,
}

/// Tracks every registered element by the index it was registered under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealTracker {
    phases: Vec<RevealPhase>,
}

impl RevealTracker {
    pub fn register(&mut self) -> usize {
        self.phases.push(RevealPhase::Watching);
        self.phases.len() - 1
    }

    pub fn phase(&self, index: usize) -> RevealPhase {
        self.phases.get(index).copied().unwrap_or(RevealPhase::Pending)
    }

    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> RevealAction {
        let Some(phase) = self.phases.get_mut(index) else {
            return RevealAction::Ignore;
        };
        if !is_intersecting || *phase != RevealPhase::Watching {
            return RevealAction::Ignore;
        }
        *phase = RevealPhase::Revealed;
        RevealAction::RevealAndUnobserve
    }

    pub fn watched(&self) -> usize {
        self.count(RevealPhase::Watching)
    }

    pub fn revealed(&self) -> usize {
        self.count(RevealPhase::Revealed)
    }

    fn count(&self, phase: RevealPhase) -> usize {
        self.phases.iter().filter(|candidate| **candidate == phase).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn staggered_delays_are_linear_and_capped() {
        let program_cards = REVEAL_GROUPS[4];
        assert_eq!(program_cards.selector, ".program-card");
        assert_eq!(program_cards.transition_delay_ms(0, 400), Some(0));
        assert_eq!(program_cards.transition_delay_ms(3, 400), Some(240));
        assert_eq!(program_cards.transition_delay_ms(5, 400), Some(400));
        assert_eq!(program_cards.transition_delay_ms(50, 400), Some(400));
        assert_eq!(transition_delay_css(240), "240ms");
    }

    #[test]
    fn unstaggered_groups_leave_delay_untouched() {
        assert_eq!(REVEAL_GROUPS[0].transition_delay_ms(7, 400), None);
        assert_eq!(REVEAL_GROUPS[7].transition_delay_ms(1, 400), None);
    }

    #[test]
    fn overlapping_groups_keep_last_staggered_delay() {
        let pillars = RevealGroup { selector: ".pillar-card", stagger_ms: 60 };
        let programs = RevealGroup { selector: ".program-card", stagger_ms: 80 };
        let promises = RevealGroup { selector: ".promise-card", stagger_ms: 0 };

        let targets = merge_reveal_targets(
            [
                (pillars, vec!["a", "b"]),
                (programs, vec!["c", "b"]),
                (promises, vec!["b", "d"]),
            ],
            400,
        );

        assert_eq!(
            targets,
            vec![("a", Some(0)), ("b", Some(80)), ("c", Some(0)), ("d", None)]
        );
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut tracker = RevealTracker::default();
        let first = tracker.register();
        let second = tracker.register();

        assert_eq!(tracker.on_intersection(first, false), RevealAction::Ignore);
        assert_eq!(tracker.phase(first), RevealPhase::Watching);
        assert_eq!(
            tracker.on_intersection(first, true),
            RevealAction::RevealAndUnobserve
        );
        assert_eq!(tracker.on_intersection(first, true), RevealAction::Ignore);
        assert_eq!(tracker.on_intersection(first, false), RevealAction::Ignore);
        assert_eq!(tracker.phase(first), RevealPhase::Revealed);
        assert_eq!(tracker.phase(second), RevealPhase::Watching);
        assert_eq!((tracker.watched(), tracker.revealed()), (1, 1));
    }

    #[test]
    fn unknown_index_is_pending_and_ignored() {
        let mut tracker = RevealTracker::default();
        assert_eq!(tracker.phase(3), RevealPhase::Pending);
        assert_eq!(tracker.on_intersection(3, true), RevealAction::Ignore);
    }
}
