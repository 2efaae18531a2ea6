use crate::sim::SimTime;

#[test]
fn sim_time_plus_and_since() {
    assert_eq!(SimTime(3).plus(4), SimTime(7));
    assert_eq!(SimTime(7).since(SimTime(3)), 4);
}

#[test]
fn sim_time_arithmetic_saturates() {
    assert_eq!(SimTime(u64::MAX).plus(1), SimTime(u64::MAX));
    assert_eq!(SimTime(2).since(SimTime(5)), 0);
}

#[test]
fn sim_time_serializes_as_bare_number() {
    let raw = serde_json::to_string(&SimTime(12)).expect("serialize");
    assert_eq!(raw, "12");
    let t: SimTime = serde_json::from_str("5").expect("deserialize");
    assert_eq!(t, SimTime(5));
}
