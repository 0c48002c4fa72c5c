use std::collections::{HashMap, HashSet};
use crate::zabbix::{Event, Problem};

/// Problems grouped by the trigger that raised them.
///
/// Trigger ids keep first-seen order and each trigger's problems keep
/// their upstream order; ties in the final sort fall back on field text,
/// but assembly order follows this index.
#[derive(Debug, Default)]
pub struct ProblemIndex {
    by_trigger: HashMap<u64, Vec<Problem>>,
    trigger_ids: Vec<u64>,
    event_ids: Vec<u64>,
}

impl ProblemIndex {
    pub fn build(problems: Vec<Problem>) -> Self {
        let mut by_trigger: HashMap<u64, Vec<Problem>> = HashMap::new();
        let mut trigger_ids = Vec::new();
        let mut event_ids = Vec::with_capacity(problems.len());
        let mut seen_events = HashSet::with_capacity(problems.len());

        for problem in problems {
            if seen_events.insert(problem.event_id) {
                event_ids.push(problem.event_id);
            }
            let slot = by_trigger.entry(problem.object_id).or_default();
            if slot.is_empty() {
                trigger_ids.push(problem.object_id);
            }
            slot.push(problem);
        }

        Self {
            by_trigger,
            trigger_ids,
            event_ids,
        }
    }

    /// Distinct trigger ids, first-seen order. Empty when there are no problems.
    pub fn trigger_ids(&self) -> &[u64] {
        &self.trigger_ids
    }

    /// Distinct event ids, first-seen order.
    pub fn event_ids(&self) -> &[u64] {
        &self.event_ids
    }

    pub fn problems_for(&self, trigger_id: u64) -> &[Problem] {
        self.by_trigger
            .get(&trigger_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.trigger_ids.is_empty()
    }
}

/// Event ids that have been acknowledged. Absence means not acknowledged.
#[derive(Debug, Default)]
pub struct AckSet(HashSet<u64>);

impl AckSet {
    pub fn build(events: &[Event]) -> Self {
        Self(
            events
                .iter()
                .filter(|e| e.acknowledged)
                .map(|e| e.event_id)
                .collect(),
        )
    }

    pub fn contains(&self, event_id: u64) -> bool {
        self.0.contains(&event_id)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(event_id: u64, object_id: u64, clock: u64) -> Problem {
        Problem {
            event_id,
            related_event_id: 0,
            object_id,
            clock,
            nanoseconds: 0,
            severity: 5,
            suppressed: false,
            name: String::new(),
        }
    }

    #[test]
    fn test_groups_by_trigger_in_order() {
        let index = ProblemIndex::build(vec![
            problem(1, 30, 100),
            problem(2, 10, 200),
            problem(3, 30, 300),
        ]);

        assert_eq!(index.trigger_ids(), &[30, 10]);
        assert_eq!(index.event_ids(), &[1, 2, 3]);
        let clocks: Vec<u64> = index.problems_for(30).iter().map(|p| p.clock).collect();
        assert_eq!(clocks, vec![100, 300]);
        assert!(index.problems_for(99).is_empty());
    }

    #[test]
    fn test_empty_problems() {
        let index = ProblemIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.trigger_ids().is_empty());
        assert!(index.event_ids().is_empty());
    }

    #[test]
    fn test_duplicate_event_ids_collapse() {
        let index = ProblemIndex::build(vec![problem(7, 1, 1), problem(7, 1, 1)]);
        assert_eq!(index.event_ids(), &[7]);
        assert_eq!(index.problems_for(1).len(), 2);
    }

    #[test]
    fn test_ack_set_keeps_only_acknowledged() {
        let acks = AckSet::build(&[
            Event { event_id: 1, acknowledged: true },
            Event { event_id: 2, acknowledged: false },
        ]);

        assert!(acks.contains(1));
        assert!(!acks.contains(2));
        assert!(!acks.contains(3));
        assert_eq!(acks.count(), 1);
    }
}
