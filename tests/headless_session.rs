use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wordsprint::reconciler;
use wordsprint::runtime::{FixedTicker, Runner, SprintEvent, TestEventSource};
use wordsprint::sprint::{Phase, Sprint, EXTRA_WORDS, SESSION_MS, TICK_MS};
use wordsprint::stats::Tally;
use wordsprint::surface::{RecordingSurface, SurfaceCall};
use wordsprint::words::ScriptedWordSource;

// Headless integration using the internal runtime + core without a TTY.
// Drives full sessions through Runner/TestEventSource the way the binary does.

fn key(c: char) -> SprintEvent {
    SprintEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn dispatch(
    event: SprintEvent,
    sprint: &mut Sprint,
    words: &mut ScriptedWordSource,
    surface: &mut RecordingSurface,
) {
    match event {
        SprintEvent::Tick => sprint.on_tick(surface),
        SprintEvent::Resize => {}
        SprintEvent::Key(k) => match k.code {
            KeyCode::Char(' ') => reconciler::space(sprint, words, surface),
            KeyCode::Char(c) => reconciler::insert_char(sprint, c, surface),
            KeyCode::Backspace => reconciler::backspace(sprint, surface),
            _ => {}
        },
    }
}

#[test]
fn headless_sprint_flow_completes() {
    let mut sprint = Sprint::new();
    let mut words = ScriptedWordSource::new(["cat", "dog", "sun", "map", "fog"]);
    let mut surface = RecordingSurface::new();
    sprint.start(&mut words, &mut surface);

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let runner = Runner::new(es, ticker);

    // Two exact words; once the queue drains, every step times out into a tick.
    for c in "cat dog ".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..1_000u32 {
        let event = runner.step();
        dispatch(event, &mut sprint, &mut words, &mut surface);
        if sprint.has_ended() {
            break;
        }
    }

    assert!(
        sprint.has_ended(),
        "session should end once the clock is exhausted"
    );
    assert_eq!(
        sprint.tally,
        Tally {
            correct_words: 2,
            wrong_words: 0,
            chars_typed: 6
        }
    );

    let summary = sprint.summary();
    assert_eq!(summary.wpm, 2);
    assert_eq!(summary.cpm, 6);
    assert_eq!(summary.accuracy, Some(100));
}

#[test]
fn no_handler_survives_session_end() {
    let mut sprint = Sprint::new();
    let mut words = ScriptedWordSource::new(["cat", "dog"]);
    let mut surface = RecordingSurface::new();
    sprint.start(&mut words, &mut surface);

    reconciler::insert_char(&mut sprint, 'c', &mut surface);
    for _ in 0..(SESSION_MS / TICK_MS) {
        sprint.on_tick(&mut surface);
    }
    assert!(sprint.has_ended());
    assert!(surface.calls.contains(&SurfaceCall::EndState));

    let active_before = sprint.active;
    let typed_before = sprint.active_slot().unwrap().typed.clone();
    surface.clear();

    // Keys and ticks keep arriving; none may be processed any more.
    reconciler::insert_char(&mut sprint, 'a', &mut surface);
    reconciler::space(&mut sprint, &mut words, &mut surface);
    reconciler::backspace(&mut sprint, &mut surface);
    sprint.on_tick(&mut surface);

    assert!(
        surface.calls.is_empty(),
        "no event may be processed after the end state"
    );
    assert_eq!(sprint.active, active_before);
    assert_eq!(sprint.active_slot().unwrap().typed, typed_before);
    assert_eq!(sprint.phase, Phase::Ended);
}

#[test]
fn reset_after_end_starts_a_fresh_session() {
    let mut sprint = Sprint::new();
    let mut words = ScriptedWordSource::new(["cat", "dog", "sun", "map", "fog", "tin"]);
    let mut surface = RecordingSurface::new();
    sprint.start(&mut words, &mut surface);

    for c in "cat cap ".chars() {
        match c {
            ' ' => reconciler::space(&mut sprint, &mut words, &mut surface),
            c => reconciler::insert_char(&mut sprint, c, &mut surface),
        }
    }
    for _ in 0..(SESSION_MS / TICK_MS) {
        sprint.on_tick(&mut surface);
    }
    assert!(sprint.has_ended());
    assert_eq!(sprint.tally.correct_words, 1);
    assert_eq!(sprint.tally.wrong_words, 1);

    sprint.reset(&mut words, &mut surface);

    assert_eq!(sprint.phase, Phase::Armed);
    assert_eq!(sprint.time_remaining_ms, SESSION_MS);
    assert_eq!(sprint.tally, Tally::default());
    assert_eq!(sprint.active, 0);
    assert_eq!(sprint.slots.len(), EXTRA_WORDS);
    assert!(sprint.slots.iter().all(|s| s.typed.is_empty()));
}

#[test]
fn countdown_over_the_runner_takes_exactly_six_hundred_ticks() {
    let mut sprint = Sprint::new();
    let mut words = ScriptedWordSource::new(["the"]);
    let mut surface = RecordingSurface::new();
    sprint.start(&mut words, &mut surface);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    tx.send(key('t')).unwrap();

    let mut ticks = 0u64;
    while !sprint.has_ended() {
        match runner.step() {
            SprintEvent::Tick => {
                sprint.on_tick(&mut surface);
                ticks += 1;
            }
            event => dispatch(event, &mut sprint, &mut words, &mut surface),
        }
        assert!(ticks <= SESSION_MS / TICK_MS, "session overran its window");
    }

    assert_eq!(ticks, SESSION_MS / TICK_MS);
    assert_eq!(sprint.time_remaining_ms, 0);
}
