//! End-to-end countdown behaviour through the public API

use std::sync::{Arc, Mutex};

use phase_timer::{
    format_time,
    timer::{ManualScheduler, Phase, PhaseDurations, PhaseTimer},
};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Tick(String, Phase),
    Switch(Phase, String),
}

fn observed_timer() -> (PhaseTimer<ManualScheduler>, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let ticks = Arc::clone(&seen);
    let switches = Arc::clone(&seen);

    let timer = PhaseTimer::new(PhaseDurations::default(), ManualScheduler::new())
        .on_tick(move |time, phase| ticks.lock().unwrap().push(Seen::Tick(time.to_string(), phase)))
        .on_phase_switch(move |phase, time| {
            switches.lock().unwrap().push(Seen::Switch(phase, time.to_string()))
        });
    (timer, seen)
}

#[test]
fn work_phase_runs_into_break() {
    let (mut timer, seen) = observed_timer();
    timer.start();

    let id = timer.scheduler().active()[0];
    assert!(timer.fire(id));
    assert_eq!(seen.lock().unwrap()[0], Seen::Tick("24:59".to_string(), Phase::Work));

    for _ in 1..1500 {
        assert!(timer.fire(id));
    }

    let seen = seen.lock().unwrap();
    let switches: Vec<_> = seen.iter().filter(|s| matches!(s, Seen::Switch(..))).collect();
    assert_eq!(switches, vec![&Seen::Switch(Phase::Break, "05:00".to_string())]);
    assert!(!seen.contains(&Seen::Tick("00:00".to_string(), Phase::Work)));
    assert_eq!(seen.last(), Some(&Seen::Switch(Phase::Break, "05:00".to_string())));

    // The same schedule carries on into the break phase
    assert!(timer.is_running());
    assert_eq!(timer.scheduler().active(), &[id]);
    assert_eq!(timer.phase(), Phase::Break);
}

#[test]
fn break_phase_runs_back_into_work() {
    let (mut timer, seen) = observed_timer();
    timer.start();
    for _ in 0..1800 {
        timer.tick();
    }

    assert_eq!(timer.phase(), Phase::Work);
    assert_eq!(timer.remaining_seconds(), 1500);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&Seen::Switch(Phase::Work, "25:00".to_string())));
    assert!(!seen.contains(&Seen::Tick("00:00".to_string(), Phase::Break)));
}

#[test]
fn pause_reset_and_resume() {
    let (mut timer, seen) = observed_timer();
    timer.start();
    for _ in 0..90 {
        timer.tick();
    }
    timer.pause();
    assert_eq!(timer.formatted(), "23:30");

    timer.start();
    timer.tick();
    assert_eq!(timer.formatted(), "23:29");

    timer.reset();
    assert!(!timer.is_running());
    assert_eq!(timer.formatted(), "25:00");
    assert_eq!(seen.lock().unwrap().last(), Some(&Seen::Tick("25:00".to_string(), Phase::Work)));
    assert_eq!(timer.scheduler().started(), 2);
    assert_eq!(timer.scheduler().cancelled(), 2);
}

#[test]
fn format_time_reference_values() {
    assert_eq!(format_time(0), "00:00");
    assert_eq!(format_time(65), "01:05");
    assert_eq!(format_time(3599), "59:59");
}
