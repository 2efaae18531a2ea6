use crate::sched::{
    PriorityOrder, Process, ScheduleResult, run_priority_preemptive, run_sjf_preemptive,
};
use crate::sim::Pid;

fn seg_tuples(r: &ScheduleResult) -> Vec<(u32, u64, u64)> {
    r.timeline
        .segments()
        .iter()
        .map(|s| (s.pid.0, s.start.0, s.end.0))
        .collect()
}

#[test]
fn sjf_preemptive_preempts_for_shorter_remaining_time() {
    let procs = vec![
        Process::new(1, 0, 8),
        Process::new(2, 1, 4),
        Process::new(3, 2, 9),
        Process::new(4, 3, 5),
    ];
    let r = run_sjf_preemptive(&procs).expect("sjfp");
    assert_eq!(
        seg_tuples(&r),
        vec![(1, 0, 1), (2, 1, 5), (4, 5, 10), (1, 10, 17), (3, 17, 26)]
    );

    let w: Vec<u64> = r.metrics.values().map(|m| m.waiting_time).collect();
    let rt: Vec<u64> = r.metrics.values().map(|m| m.response_time).collect();
    let tat: Vec<u64> = r.metrics.values().map(|m| m.turnaround_time).collect();
    assert_eq!(w, vec![9, 0, 15, 2]);
    assert_eq!(rt, vec![0, 0, 15, 2]);
    assert_eq!(tat, vec![17, 4, 24, 7]);
    assert_eq!(r.averages.waiting_time, 6.5);
}

#[test]
fn priority_preemptive_lower_first() {
    let procs = vec![
        Process::new(1, 0, 4).with_priority(2),
        Process::new(2, 1, 2).with_priority(1),
        Process::new(3, 2, 1).with_priority(3),
    ];
    let r = run_priority_preemptive(&procs, PriorityOrder::LowerFirst).expect("pp");
    assert_eq!(
        seg_tuples(&r),
        vec![(1, 0, 1), (2, 1, 3), (1, 3, 6), (3, 6, 7)]
    );
    let p1 = r.metrics_for(Pid(1)).expect("p1");
    assert_eq!((p1.waiting_time, p1.response_time, p1.turnaround_time), (2, 0, 6));
    let p3 = r.metrics_for(Pid(3)).expect("p3");
    assert_eq!((p3.waiting_time, p3.response_time, p3.turnaround_time), (4, 4, 5));
}

#[test]
fn priority_preemptive_higher_first() {
    let procs = vec![
        Process::new(1, 0, 4).with_priority(2),
        Process::new(2, 1, 2).with_priority(1),
        Process::new(3, 2, 1).with_priority(3),
    ];
    let r = run_priority_preemptive(&procs, PriorityOrder::HigherFirst).expect("pp");
    assert_eq!(
        seg_tuples(&r),
        vec![(1, 0, 2), (3, 2, 3), (1, 3, 5), (2, 5, 7)]
    );
    let w: Vec<u64> = r.metrics.values().map(|m| m.waiting_time).collect();
    assert_eq!(w, vec![1, 4, 0]);
}

#[test]
fn preemptive_jumps_to_next_arrival_when_idle() {
    let procs = vec![Process::new(1, 0, 1), Process::new(2, 1_000_000, 2)];
    let r = run_sjf_preemptive(&procs).expect("sjfp");
    assert_eq!(seg_tuples(&r), vec![(1, 0, 1), (2, 1_000_000, 1_000_002)]);
    assert!(r.metrics.values().all(|m| m.waiting_time == 0));
}

#[test]
fn preemptive_starts_at_earliest_arrival() {
    let procs = vec![Process::new(1, 4, 2)];
    let r = run_sjf_preemptive(&procs).expect("sjfp");
    assert_eq!(seg_tuples(&r), vec![(1, 4, 6)]);
    let m = r.metrics_for(Pid(1)).expect("p1");
    assert_eq!((m.waiting_time, m.response_time, m.turnaround_time), (0, 0, 2));
}

#[test]
fn sjf_preemptive_ties_go_to_lowest_id() {
    let procs = vec![Process::new(2, 0, 2), Process::new(1, 0, 2)];
    let r = run_sjf_preemptive(&procs).expect("sjfp");
    assert_eq!(seg_tuples(&r), vec![(1, 0, 2), (2, 2, 4)]);
}

#[test]
fn preemptive_empty_input() {
    let r = run_priority_preemptive(&[], PriorityOrder::LowerFirst).expect("pp");
    assert_eq!(r, ScheduleResult::empty());
}
