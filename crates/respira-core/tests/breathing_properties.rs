//! Property tests for phase sequencing and target-size shape.

use proptest::prelude::*;
use respira_core::{
    BreathController, Clock, Event, ManualClock, MemoryStore, NoopHaptics, Phase, Timings, VisualSink,
    VisualState, EXPANDED_SIZE, RESTING_SIZE,
};

fn controller(clock: &ManualClock, timings: Timings) -> BreathController {
    BreathController::new(
        Box::new(clock.clone()),
        Box::new(MemoryStore::new()),
        Box::new(NoopHaptics),
        VisualState::default(),
    )
    .with_timings(timings)
}

proptest! {
    #[test]
    fn phases_cycle_in_order_with_configured_durations(
        inhale in 1u32..6,
        hold in 1u32..6,
        exhale in 1u32..6,
        steps in prop::collection::vec(1u64..700, 50..400),
    ) {
        let clock = ManualClock::new(0);
        let timings = Timings::new(inhale, hold, exhale);
        let mut c = controller(&clock, timings);
        c.start();

        let mut phase_started = 0u64;
        let mut cycles = 0u64;
        for step in steps {
            clock.advance_ms(step);
            if let Some(Event::PhaseChanged { from, to, cycle_count, .. }) = c.tick() {
                prop_assert_eq!(from.next(), Some(to));

                let lasted = clock.now_ms() - phase_started;
                let expected = timings.duration_secs(from) as u64 * 1000;
                prop_assert!(lasted >= expected);
                prop_assert!(lasted < expected + step);
                phase_started = clock.now_ms();

                if from == Phase::Exhale {
                    cycles += 1;
                }
                prop_assert_eq!(cycle_count, cycles);
            }
            prop_assert_eq!(c.cycle_count(), cycles);
        }
    }

    #[test]
    fn target_size_is_monotone_within_each_phase(
        steps in prop::collection::vec(1u64..900, 50..300),
    ) {
        let clock = ManualClock::new(0);
        let mut c = controller(&clock, Timings::new(3, 2, 5));
        c.start();

        let mut previous = c.target_size();
        for step in steps {
            clock.advance_ms(step);
            let phase = c.phase();
            c.tick();
            let size = c.target_size();
            prop_assert!((RESTING_SIZE..=EXPANDED_SIZE).contains(&size));
            match phase {
                Phase::Inhale => prop_assert!(size >= previous),
                Phase::Exhale => prop_assert!(size <= previous),
                Phase::Hold => prop_assert_eq!(size, previous),
                Phase::Idle => unreachable!("session is running"),
            }
            previous = size;
        }
    }

    #[test]
    fn smoothing_never_overshoots(target in 100.0f64..300.0, frames in 1usize..400) {
        let mut visual = VisualState::new(0.05);
        visual.target_size_changed(target);
        let mut distance = (target - visual.current_size()).abs();
        for _ in 0..frames {
            visual.frame();
            let now = (target - visual.current_size()).abs();
            prop_assert!(now <= distance);
            distance = now;
        }
    }
}

#[test]
fn inhale_example_sizes() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, Timings::default());
    c.start();
    let mut sizes = vec![];
    for _ in 0..4 {
        c.tick();
        sizes.push(c.target_size());
        assert_eq!(c.phase(), Phase::Inhale);
        clock.advance_secs(1.0);
    }
    c.tick();
    sizes.push(c.target_size());
    assert_eq!(c.phase(), Phase::Hold);
    assert_eq!(sizes, vec![100.0, 150.0, 200.0, 250.0, 300.0]);
}
