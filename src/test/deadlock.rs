use crate::safety::{DetectionOutcome, DetectionProcess, DetectionState, SafetyError, detect_deadlock};
use crate::sim::Pid;

fn state_with_requests(requests: [[i64; 3]; 5]) -> DetectionState {
    let allocation = [[0, 1, 0], [2, 0, 0], [3, 0, 3], [2, 1, 1], [0, 0, 2]];
    DetectionState {
        resource_names: Vec::new(),
        total: vec![7, 2, 6],
        processes: allocation
            .iter()
            .zip(requests.iter())
            .enumerate()
            .map(|(i, (a, r))| DetectionProcess {
                id: Pid(i as u32),
                allocation: a.to_vec(),
                request: r.to_vec(),
            })
            .collect(),
    }
}

#[test]
fn fully_reducible_state_has_no_deadlock() {
    let state = state_with_requests([[0, 0, 0], [2, 0, 2], [0, 0, 0], [1, 0, 0], [0, 0, 2]]);
    let r = detect_deadlock(&state).expect("detect");
    assert_eq!(r.outcome, DetectionOutcome::DeadlockFree);
    assert!(!r.has_deadlock());
    assert!(r.deadlocked.is_empty());
    assert_eq!(r.message, "No deadlock detected");

    // 初始 + 5 个回收步 + 结论
    assert_eq!(r.trace.len(), 7);
    assert_eq!(r.trace[0].work, vec![0, 0, 0]);
    let order: Vec<Option<Pid>> = r.trace[1..6].iter().map(|s| s.pid).collect();
    assert_eq!(
        order,
        vec![Some(Pid(0)), Some(Pid(2)), Some(Pid(3)), Some(Pid(4)), Some(Pid(1))]
    );
    let last = r.trace.last().expect("last");
    assert_eq!(last.work, vec![7, 2, 6]);
    assert_eq!(last.message, "All processes can complete - No deadlock");
}

#[test]
fn withheld_resources_deadlock_the_remaining_processes() {
    let state = state_with_requests([[0, 0, 0], [2, 0, 2], [0, 0, 1], [1, 0, 0], [0, 0, 2]]);
    let r = detect_deadlock(&state).expect("detect");
    assert!(r.has_deadlock());
    assert_eq!(r.deadlocked, vec![Pid(1), Pid(2), Pid(3), Pid(4)]);
    assert_eq!(
        r.message,
        "Deadlock detected involving processes: P1, P2, P3, P4"
    );
    let last = r.trace.last().expect("last");
    assert_eq!(last.message, "Deadlock detected with processes: P1, P2, P3, P4");
    assert_eq!(last.finish, vec![true, false, false, false, false]);
}

#[test]
fn processes_holding_nothing_start_finished() {
    let mut state = state_with_requests([[0, 0, 0], [2, 0, 2], [0, 0, 0], [1, 0, 0], [0, 0, 2]]);
    state.processes.push(DetectionProcess {
        id: Pid(5),
        allocation: vec![0, 0, 0],
        request: vec![9, 9, 9],
    });
    let r = detect_deadlock(&state).expect("detect");
    assert!(!r.has_deadlock());
    assert!(r.trace[0].finish[5]);
    assert!(r.trace.iter().all(|s| s.pid != Some(Pid(5))));
}

#[test]
fn over_allocated_totals_are_inconsistent() {
    let mut state = state_with_requests([[0; 3]; 5]);
    state.total = vec![1, 1, 1];
    let r = detect_deadlock(&state).expect("detect");
    assert_eq!(r.outcome, DetectionOutcome::InconsistentState);
    assert!(r.has_deadlock());
    assert!(r.trace.is_empty());
    assert!(r.deadlocked.is_empty());
    assert!(r.message.starts_with("Invalid state: negative available"));
}

#[test]
fn single_over_allocated_process_reports_deadlock() {
    let state = DetectionState {
        resource_names: Vec::new(),
        total: vec![1],
        processes: vec![DetectionProcess {
            id: Pid(0),
            allocation: vec![2],
            request: vec![0],
        }],
    };
    let r = detect_deadlock(&state).expect("detect");
    assert_eq!(r.outcome, DetectionOutcome::InconsistentState);
    assert!(r.has_deadlock());
    assert!(r.trace.is_empty());
}

#[test]
fn mismatched_request_vector_is_a_hard_error() {
    let mut state = state_with_requests([[0; 3]; 5]);
    state.processes[3].request = vec![0];
    let err = detect_deadlock(&state).expect_err("mismatch");
    assert!(matches!(
        err,
        SafetyError::DimensionMismatch {
            field: "request",
            ..
        }
    ));
}

#[test]
fn caller_state_is_untouched() {
    let state = state_with_requests([[0, 0, 0], [2, 0, 2], [0, 0, 1], [1, 0, 0], [0, 0, 2]]);
    let before = state.clone();
    let a = detect_deadlock(&state).expect("a");
    let b = detect_deadlock(&state).expect("b");
    assert_eq!(state, before);
    assert_eq!(a, b);
}
