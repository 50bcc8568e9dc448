use super::*;
use crate::draw::{Canvas, Coordinate, Segment, SegmentKind};
use crate::error::{InvariantViolation, ResourceError};
use crate::input::{ButtonState, CursorPresenter, InputEvent, Key, MouseButton, StrategyKind};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(11);

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn create_session(initial: StrategyKind) -> (StrokeSession, Instant) {
    let now = Instant::now();
    let settings = SessionSettings {
        initial,
        ..SessionSettings::default()
    };
    (StrokeSession::new(settings, now).unwrap(), now)
}

/// Presses at `points[0]`, ticks once at each interior point and releases at
/// the last point. Returns the instant after the last tick.
fn drag(session: &mut StrokeSession, start: Instant, points: &[(i32, i32)]) -> Instant {
    let (first, rest) = points.split_first().unwrap();
    let (last, interior) = rest.split_last().unwrap();

    session
        .on_mouse_press(MouseButton::Left, (*first).into())
        .unwrap();
    let mut now = start;
    for point in interior {
        now += TICK;
        assert!(session.on_tick(now, &Coordinate::from(*point)).unwrap());
    }
    session
        .on_mouse_release(MouseButton::Left, (*last).into())
        .unwrap();
    now
}

const PATH: [(i32, i32); 5] = [(10, 10), (20, 10), (30, 10), (40, 10), (50, 10)];

#[test]
fn straight_stroke_collapses_to_one_segment() {
    let (mut session, t0) = create_session(StrategyKind::Straight);

    drag(&mut session, t0, &PATH);

    assert_eq!(
        session.history(),
        &[Segment::new(c(10, 10), c(50, 10), SegmentKind::Begin)]
    );
    assert_eq!(session.ledger().open_depth(), 0);
    assert!(session.needs_redraw);
}

#[test]
fn wavy_stroke_keeps_every_sample() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);

    drag(&mut session, t0, &PATH);

    assert_eq!(
        session.history(),
        &[
            Segment::new(c(10, 10), c(20, 10), SegmentKind::Begin),
            Segment::new(c(20, 10), c(30, 10), SegmentKind::Inter),
            Segment::new(c(30, 10), c(40, 10), SegmentKind::Inter),
            Segment::new(c(40, 10), c(50, 10), SegmentKind::Inter),
        ]
    );
}

#[test]
fn straight_stroke_leaves_earlier_strokes_alone() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);
    let t1 = drag(&mut session, t0, &[(0, 0), (5, 5), (10, 0)]);
    session.cycle_strategy().unwrap();
    let t2 = drag(&mut session, t1, &[(0, 20), (10, 20)]);
    let before = session.history().to_vec();

    drag(&mut session, t2, &PATH);

    assert_eq!(&session.history()[..before.len()], before.as_slice());
    assert_eq!(
        session.history().last(),
        Some(&Segment::new(c(10, 10), c(50, 10), SegmentKind::Begin))
    );
}

#[test]
fn press_release_without_ticks_is_a_single_segment() {
    for kind in [StrategyKind::Straight, StrategyKind::Wavy] {
        let (mut session, t0) = create_session(kind);
        drag(&mut session, t0, &[(3, 4), (7, 8)]);
        assert_eq!(
            session.history(),
            &[Segment::new(c(3, 4), c(7, 8), SegmentKind::Begin)]
        );
    }
}

#[test]
fn ticks_before_interval_do_nothing() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);
    session.on_mouse_press(MouseButton::Left, c(1, 1)).unwrap();

    let changed = session
        .on_tick(t0 + Duration::from_millis(10), &c(9, 9))
        .unwrap();

    assert!(!changed);
    assert!(session.history().is_empty());
    assert_eq!(session.ledger().open_depth(), 1);
}

#[test]
fn idle_ticks_never_touch_the_ledger() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);
    drag(&mut session, t0, &[(0, 0), (1, 1)]);
    let before = session.history().to_vec();
    session.needs_redraw = false;

    for i in 1..=5 {
        assert!(!session.on_tick(t0 + TICK * (10 * i), &c(99, 99)).unwrap());
    }

    assert_eq!(session.history(), before.as_slice());
    assert!(!session.needs_redraw);
    assert_eq!(session.time_until_next_tick(t0), None);
}

#[test]
fn straight_synthesis_can_be_skipped() {
    let now = Instant::now();
    let settings = SessionSettings {
        synthesize_straight: false,
        ..SessionSettings::default()
    };
    let mut session = StrokeSession::new(settings, now).unwrap();

    session.on_mouse_press(MouseButton::Left, c(10, 10)).unwrap();
    assert!(!session.on_tick(now + TICK, &c(20, 10)).unwrap());
    assert!(session.history().is_empty());
    session.on_mouse_release(MouseButton::Left, c(50, 10)).unwrap();

    assert_eq!(
        session.history(),
        &[Segment::new(c(10, 10), c(50, 10), SegmentKind::Begin)]
    );
}

/// Drags a zig-zag stroke, switching strategy after `cycle_after` ticks.
fn zigzag_with_cycle(
    initial: StrategyKind,
    synthesize_straight: bool,
    cycle_after: usize,
) -> Vec<Segment> {
    let t0 = Instant::now();
    let settings = SessionSettings {
        initial,
        synthesize_straight,
        ..SessionSettings::default()
    };
    let mut session = StrokeSession::new(settings, t0).unwrap();

    let samples = [c(20, 30), c(30, 10), c(40, 30)];
    session.on_mouse_press(MouseButton::Left, c(10, 10)).unwrap();
    let mut now = t0;
    for (i, sample) in samples.iter().enumerate() {
        if i == cycle_after {
            session.cycle_strategy().unwrap();
        }
        now += TICK;
        session.on_tick(now, sample).unwrap();
    }
    if cycle_after >= samples.len() {
        session.cycle_strategy().unwrap();
    }
    session.on_mouse_release(MouseButton::Left, c(50, 10)).unwrap();
    session.history().to_vec()
}

#[test]
fn skipping_straight_synthesis_survives_mid_stroke_cycle() {
    let expected_wavy = vec![
        Segment::new(c(10, 10), c(20, 30), SegmentKind::Begin),
        Segment::new(c(20, 30), c(30, 10), SegmentKind::Inter),
        Segment::new(c(30, 10), c(40, 30), SegmentKind::Inter),
        Segment::new(c(40, 30), c(50, 10), SegmentKind::Inter),
    ];

    for cycle_after in 0..=3 {
        let synthesized = zigzag_with_cycle(StrategyKind::Straight, true, cycle_after);
        let skipped = zigzag_with_cycle(StrategyKind::Straight, false, cycle_after);
        assert_eq!(synthesized, expected_wavy, "cycle after {cycle_after} ticks");
        assert_eq!(skipped, synthesized, "cycle after {cycle_after} ticks");
    }
}

#[test]
fn cycling_to_straight_mid_stroke_collapses_either_way() {
    let expected = vec![Segment::new(c(10, 10), c(50, 10), SegmentKind::Begin)];

    for cycle_after in 0..=3 {
        assert_eq!(zigzag_with_cycle(StrategyKind::Wavy, true, cycle_after), expected);
        assert_eq!(zigzag_with_cycle(StrategyKind::Wavy, false, cycle_after), expected);
    }
}

#[test]
fn release_without_stroke_is_ignored() {
    let (mut session, _) = create_session(StrategyKind::Straight);
    session.needs_redraw = false;

    session
        .on_mouse_release(MouseButton::Left, c(5, 5))
        .unwrap();

    assert!(session.history().is_empty());
    assert!(!session.needs_redraw);
}

#[test]
fn second_press_during_stroke_is_fatal() {
    let (mut session, _) = create_session(StrategyKind::Straight);
    session.on_mouse_press(MouseButton::Left, c(1, 1)).unwrap();

    let err = session
        .on_mouse_press(MouseButton::Left, c(2, 2))
        .unwrap_err();

    assert_eq!(
        err,
        InvariantViolation::SegmentAlreadyOpen {
            at: c(2, 2),
            open: c(1, 1)
        }
    );
}

#[test]
fn non_left_buttons_are_ignored() {
    let (mut session, _) = create_session(StrategyKind::Straight);

    session.on_mouse_press(MouseButton::Right, c(1, 1)).unwrap();
    session.on_mouse_press(MouseButton::Middle, c(1, 1)).unwrap();
    session
        .on_mouse_release(MouseButton::Right, c(2, 2))
        .unwrap();

    assert_eq!(session.ledger().open_depth(), 0);
    assert!(session.history().is_empty());
}

#[test]
fn space_cycles_strategy_and_queues_cursor() {
    let (mut session, _) = create_session(StrategyKind::Straight);
    assert_eq!(session.pending_cursor(), Some("crosshair"));

    session
        .handle_event(InputEvent::Key {
            key: Key::Space,
            state: ButtonState::Pressed,
        })
        .unwrap();
    assert_eq!(session.active_strategy().kind(), StrategyKind::Wavy);
    assert_eq!(session.pending_cursor(), Some("cell"));

    // Release does not cycle again.
    session
        .handle_event(InputEvent::Key {
            key: Key::Space,
            state: ButtonState::Released,
        })
        .unwrap();
    assert_eq!(session.active_strategy().kind(), StrategyKind::Wavy);
}

#[test]
fn cycling_strategy_count_times_restores_state() {
    let (mut session, _) = create_session(StrategyKind::Wavy);
    let original = session.active_strategy().clone();

    for _ in 0..session.strategy_count() {
        session.cycle_strategy().unwrap();
    }

    assert_eq!(session.active_strategy(), &original);
    assert_eq!(session.pending_cursor(), Some("cell"));
}

#[test]
fn modifiers_block_plain_bindings() {
    let (mut session, _) = create_session(StrategyKind::Straight);

    session.on_key_press(Key::Ctrl).unwrap();
    session.on_key_press(Key::Space).unwrap();
    assert_eq!(session.active_strategy().kind(), StrategyKind::Straight);

    session.on_key_release(Key::Ctrl);
    session.on_key_press(Key::Space).unwrap();
    assert_eq!(session.active_strategy().kind(), StrategyKind::Wavy);
}

#[test]
fn escape_and_quit_request_exit() {
    let (mut session, _) = create_session(StrategyKind::Straight);
    session
        .handle_event(InputEvent::Key {
            key: Key::Escape,
            state: ButtonState::Pressed,
        })
        .unwrap();
    assert!(session.should_exit);

    let (mut session, _) = create_session(StrategyKind::Straight);
    session.handle_event(InputEvent::Quit).unwrap();
    assert!(session.should_exit);
}

#[test]
fn unregistered_cursor_hint_is_rejected_at_startup() {
    let settings = SessionSettings {
        cursors: [("crosshair", "crosshair")].into_iter().collect(),
        ..SessionSettings::default()
    };

    let err = StrokeSession::new(settings, Instant::now()).err();
    assert_eq!(
        err,
        Some(InvariantViolation::UnregisteredCursor("pencil".into()))
    );
}

#[test]
fn empty_strategy_list_is_rejected() {
    let settings = SessionSettings {
        strategies: Vec::new(),
        ..SessionSettings::default()
    };
    assert_eq!(
        StrokeSession::new(settings, Instant::now()).err(),
        Some(InvariantViolation::NoStrategies)
    );
}

#[test]
fn discard_drops_unfinished_stroke() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);
    session.on_mouse_press(MouseButton::Left, c(0, 0)).unwrap();
    session.on_tick(t0 + TICK, &c(4, 4)).unwrap();

    session.discard_open_stroke();

    assert_eq!(session.ledger().open_depth(), 0);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.time_until_next_tick(t0), None);
}

struct FlakyPresenter {
    fail: bool,
    shown: Vec<String>,
}

impl CursorPresenter for FlakyPresenter {
    fn set_cursor_icon(&mut self, theme_icon: &str) -> Result<(), ResourceError> {
        if self.fail {
            return Err(ResourceError::Cursor("no pointer focus".into()));
        }
        self.shown.push(theme_icon.to_string());
        Ok(())
    }
}

#[test]
fn pending_cursor_survives_presenter_failure() {
    let (mut session, _) = create_session(StrategyKind::Straight);
    let mut presenter = FlakyPresenter {
        fail: true,
        shown: Vec::new(),
    };

    assert!(session.apply_pending_cursor(&mut presenter).is_err());
    assert_eq!(session.pending_cursor(), Some("crosshair"));

    presenter.fail = false;
    assert!(session.apply_pending_cursor(&mut presenter).unwrap());
    assert!(!session.apply_pending_cursor(&mut presenter).unwrap());
    assert_eq!(presenter.shown, vec!["crosshair".to_string()]);

    session.refresh_cursor().unwrap();
    assert_eq!(session.pending_cursor(), Some("crosshair"));
}

#[derive(Default)]
struct RecordingCanvas {
    cleared: usize,
    lines: Vec<(Coordinate, Coordinate)>,
    presented: usize,
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) -> Result<(), ResourceError> {
        self.cleared += 1;
        self.lines.clear();
        Ok(())
    }

    fn draw_segment(&mut self, begin: Coordinate, end: Coordinate) -> Result<(), ResourceError> {
        self.lines.push((begin, end));
        Ok(())
    }

    fn present(&mut self) -> Result<(), ResourceError> {
        self.presented += 1;
        Ok(())
    }
}

#[test]
fn redraw_renders_history_and_clears_flag() {
    let (mut session, t0) = create_session(StrategyKind::Wavy);
    session.on_mouse_press(MouseButton::Left, c(0, 0)).unwrap();
    session.on_tick(t0 + TICK, &c(5, 0)).unwrap();
    let mut canvas = RecordingCanvas::default();

    session.redraw(&mut canvas).unwrap();

    // The open segment from (5, 0) is not drawn until it closes.
    assert_eq!(canvas.lines, vec![(c(0, 0), c(5, 0))]);
    assert_eq!((canvas.cleared, canvas.presented), (1, 1));
    assert!(!session.needs_redraw);
}
