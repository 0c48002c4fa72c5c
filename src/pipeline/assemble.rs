use crate::pipeline::index::{AckSet, ProblemIndex};
use crate::pipeline::row::AlertRow;
use crate::zabbix::Trigger;
use tracing::debug;

/// Expand triggers into one row per (trigger, enabled host, problem).
///
/// Disabled triggers and disabled hosts produce nothing. A problem counts
/// as suppressed when upstream says so or when its event is acknowledged.
pub fn assemble_rows(triggers: &[Trigger], index: &ProblemIndex, acks: &AckSet) -> Vec<AlertRow> {
    let expected: usize = triggers
        .iter()
        .filter(|t| !t.is_disabled())
        .map(|t| {
            let hosts = t.hosts.iter().filter(|h| !h.is_disabled()).count();
            hosts * index.problems_for(t.trigger_id).len()
        })
        .sum();
    let mut rows = Vec::with_capacity(expected);

    for trigger in triggers {
        if trigger.is_disabled() {
            debug!("Trigger {} is disabled, skipping", trigger.trigger_id);
            continue;
        }

        let problems = index.problems_for(trigger.trigger_id);
        if problems.is_empty() {
            debug!("Trigger {} has no indexed problems", trigger.trigger_id);
            continue;
        }

        for host in &trigger.hosts {
            if host.is_disabled() {
                debug!("Host {} on trigger {} is disabled, skipping", host.host_id, trigger.trigger_id);
                continue;
            }

            for problem in problems {
                let suppressed = problem.suppressed || acks.contains(problem.event_id);
                rows.push(AlertRow::new(problem.clock, problem.severity, suppressed, host.host_id));
            }
        }
    }

    rows
}
