use super::*;

fn two_scene() -> SceneTimeline {
    SceneTimeline::new(vec![
        SceneTiming::new(800, 800, 400),
        SceneTiming::new(500, 1500, 500),
    ])
    .unwrap()
}

#[test]
fn total_is_sum_of_scene_totals() {
    assert_eq!(two_scene().total_ms(), 4500);
    let builtin = SceneTimeline::smartygym();
    assert_eq!(builtin.len(), 8);
    let sum: u64 = builtin.scenes().iter().map(|s| s.total_ms()).sum();
    assert_eq!(builtin.total_ms(), sum);
}

#[test]
fn rejects_empty_and_zero_length_scenes() {
    assert!(SceneTimeline::new(vec![]).is_err());
    assert!(SceneTimeline::new(vec![SceneTiming::new(0, 0, 0)]).is_err());
    assert!(SceneTimeline::new(vec![SceneTiming::new(0, 10, 0)]).is_ok());
}

#[test]
fn hold_example_in_first_scene() {
    let pos = two_scene().resolve(900.0);
    assert_eq!(
        pos,
        PlaybackPosition {
            scene_index: 0,
            phase: Phase::Hold,
            phase_elapsed_ms: 100.0,
            phase_duration_ms: 800.0,
        }
    );
}

#[test]
fn in_example_in_second_scene() {
    let pos = two_scene().resolve(2100.0);
    assert_eq!(
        pos,
        PlaybackPosition {
            scene_index: 1,
            phase: Phase::In,
            phase_elapsed_ms: 100.0,
            phase_duration_ms: 500.0,
        }
    );
}

#[test]
fn phase_boundaries_are_exclusive_on_upper_edge() {
    let tl = two_scene();
    assert_eq!(tl.resolve(799.999).phase, Phase::In);
    let at_in = tl.resolve(800.0);
    assert_eq!(at_in.phase, Phase::Hold);
    assert_eq!(at_in.phase_elapsed_ms, 0.0);
    assert_eq!(tl.resolve(1600.0).phase, Phase::Out);
    let next = tl.resolve(2000.0);
    assert_eq!((next.scene_index, next.phase), (1, Phase::In));
}

#[test]
fn every_scene_is_covered_without_gaps() {
    let tl = SceneTimeline::smartygym();
    for (i, s) in tl.scenes().iter().enumerate() {
        let start = tl.scene_start_ms(i).unwrap();
        let mut in_n = 0u64;
        let mut hold_n = 0u64;
        let mut out_n = 0u64;
        for local in 0..s.total_ms() {
            let pos = tl.resolve((start + local) as f64);
            assert_eq!(pos.scene_index, i, "t={}", start + local);
            assert!(pos.phase_elapsed_ms >= 0.0);
            assert!(pos.phase_elapsed_ms <= pos.phase_duration_ms);
            match pos.phase {
                Phase::In => in_n += 1,
                Phase::Hold => hold_n += 1,
                Phase::Out => out_n += 1,
            }
        }
        assert_eq!((in_n, hold_n, out_n), (s.in_ms, s.hold_ms, s.out_ms));
    }
}

#[test]
fn past_the_end_resolves_to_last_scene() {
    let tl = two_scene();
    for t in [4500.0, 4500.0 + 10_000.0, f64::INFINITY] {
        let pos = tl.resolve(t);
        assert_eq!(pos.scene_index, 1);
        assert_eq!(pos.phase, Phase::Hold);
        assert_eq!(pos.phase_duration_ms, 1.0);
        assert!(pos.phase_elapsed_ms <= pos.phase_duration_ms);
    }
}

#[test]
fn negative_and_nan_clamp_to_start() {
    let tl = two_scene();
    for t in [-50.0, f64::NAN] {
        let pos = tl.resolve(t);
        assert_eq!((pos.scene_index, pos.phase), (0, Phase::In));
        assert_eq!(pos.phase_elapsed_ms, 0.0);
    }
}

#[test]
fn zero_length_phase_is_skipped() {
    let tl = SceneTimeline::new(vec![SceneTiming::new(0, 100, 0), SceneTiming::new(10, 0, 10)])
        .unwrap();
    assert_eq!(tl.resolve(0.0).phase, Phase::Hold);
    let pos = tl.resolve(110.0);
    assert_eq!((pos.scene_index, pos.phase), (1, Phase::Out));
    assert_eq!(pos.phase_elapsed_ms, 0.0);
}

#[test]
fn strict_resolution_rejects_out_of_range() {
    let tl = two_scene();
    assert!(tl.resolve_strict(4500.0).is_err());
    assert!(tl.resolve_strict(-1.0).is_err());
    assert_eq!(tl.resolve_strict(900.0).unwrap(), tl.resolve(900.0));
}

#[test]
fn scene_start_offsets() {
    let tl = two_scene();
    assert_eq!(tl.scene_start_ms(0), Some(0));
    assert_eq!(tl.scene_start_ms(1), Some(2000));
    assert_eq!(tl.scene_start_ms(2), None);
}

#[test]
fn json_round_trip_validates() {
    let json = serde_json::to_string(&two_scene()).unwrap();
    let back: SceneTimeline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, two_scene());
    assert!(serde_json::from_str::<SceneTimeline>("[]").is_err());
}
