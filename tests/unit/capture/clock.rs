use super::*;

#[test]
fn stepped_clock_advances_one_frame_per_wait() {
    let mut c = SteppedClock::with_step(Duration::from_millis(40));
    assert_eq!(c.now(), Duration::ZERO);
    c.wait_next_frame();
    c.wait_next_frame();
    assert_eq!(c.now(), Duration::from_millis(80));
}

#[test]
fn stepped_clock_from_fps() {
    let mut c = SteppedClock::new(Fps::new(25, 1).unwrap());
    c.wait_next_frame();
    assert_eq!(c.now(), Duration::from_millis(40));
}

#[test]
fn system_clock_paces_frames() {
    let mut c = SystemClock::new(Fps::new(100, 1).unwrap());
    let t0 = c.now();
    for _ in 0..5 {
        c.wait_next_frame();
    }
    let dt = c.now() - t0;
    assert!(dt >= Duration::from_millis(45), "{dt:?}");
}

#[test]
fn stepped_clock_always_moves_forward() {
    let mut c = SteppedClock::with_step(Duration::ZERO);
    c.wait_next_frame();
    assert!(c.now() > Duration::ZERO);

    let mut fastest = SteppedClock::new(Fps::new(Fps::MAX_FRAMES_PER_SEC, 1).unwrap());
    fastest.wait_next_frame();
    assert_eq!(fastest.now(), Duration::from_millis(1));
}
