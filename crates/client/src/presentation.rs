//! Plain-text rendering of session events.
use escape_runtime::{SessionEvent, TurnReport};

pub fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::AgentMoved(report) => format!("agent {report}"),
        SessionEvent::MoveRejected { reason, .. } => format!("move rejected: {reason}"),
        SessionEvent::PuzzleSolved {
            description,
            solution,
            stats,
            unlocked,
            ..
        } => {
            let opened: Vec<String> = unlocked.iter().map(ToString::to_string).collect();
            format!(
                "{description}\n  solved: {solution} ({} nodes, {} backtracks), unlocked {}",
                stats.nodes_expanded,
                stats.backtracks,
                opened.join(", ")
            )
        }
        SessionEvent::PuzzleUnsolved { difficulty, .. } => {
            format!("{difficulty} puzzle has no solution")
        }
        SessionEvent::NoLockedDoors { room } => format!("no locked doors in room {room}"),
        SessionEvent::Waited => "agent waits".to_owned(),
        SessionEvent::GuardMoved(step) => step.to_string(),
        SessionEvent::GuardAlert { distance } => {
            format!("alert: the guard can see the agent ({distance} rooms away)")
        }
        SessionEvent::SessionEnded { outcome } => format!("session ended: {outcome}"),
    }
}

pub fn render_turn(report: &TurnReport) -> String {
    let mut out = format!("[turn {:3}]", report.turn);
    for event in &report.events {
        out.push_str("\n  ");
        out.push_str(&describe(event).replace('\n', "\n  "));
    }
    out
}

#[cfg(test)]
mod tests {
    use escape_core::RoomId;
    use escape_runtime::Outcome;

    use super::*;

    #[test]
    fn turn_lines_are_indented() {
        let report = TurnReport {
            turn: 7,
            events: vec![
                SessionEvent::NoLockedDoors { room: RoomId(2) },
                SessionEvent::SessionEnded {
                    outcome: Outcome::TurnLimit,
                },
            ],
            outcome: Some(Outcome::TurnLimit),
        };
        assert_eq!(
            render_turn(&report),
            "[turn   7]\n  no locked doors in room #2\n  session ended: turn_limit"
        );
    }
}
