use crate::sim::{Pid, PidAllocator};

#[test]
fn pid_allocator_hands_out_increasing_ids() {
    let mut alloc = PidAllocator::default();
    assert_eq!(alloc.peek(), Pid(1));
    assert_eq!(alloc.allocate(), Pid(1));
    assert_eq!(alloc.allocate(), Pid(2));
    assert_eq!(alloc.peek(), Pid(3));
}

#[test]
fn pid_displays_with_p_prefix() {
    assert_eq!(Pid(4).to_string(), "P4");
}
