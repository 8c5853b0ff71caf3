use super::*;

const CELL: f64 = 50.0;

fn session(x: i64, y: i64) -> CursorSession {
    CursorSession {
        position: GridCoordinate::new(x, y),
        bounds: SessionBounds::new(10, 10),
    }
}

fn sequencer_at(x: i64, y: i64) -> Sequencer {
    let mut sequencer = Sequencer::new(GridMapping::new(CELL));
    sequencer.establish_session(session(x, y));
    sequencer
}

fn outcome(x: i64, y: i64, millis: u64) -> MoveOutcome {
    MoveOutcome {
        target: GridCoordinate::new(x, y),
        duration: Duration::from_millis(millis),
    }
}

fn px(x: i64, y: i64) -> PixelPosition {
    PixelPosition::new(x as f64 * CELL - CELL / 2.0, y as f64 * CELL - CELL / 2.0)
}

#[test]
fn starts_idle_and_focused_without_dispatching() {
    let mut sequencer = Sequencer::new(GridMapping::new(CELL));
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert!(sequencer.is_focused());

    sequencer.enqueue(Direction::Right);
    assert_eq!(sequencer.poll(), None, "no dispatch before the session exists");
    assert_eq!(sequencer.pending_commands(), 1);
}

#[test]
fn startup_session_sets_initial_pixel_position_and_bounds() {
    let sequencer = sequencer_at(1, 1);
    assert_eq!(sequencer.position(), PixelPosition::new(25.0, 25.0));
    assert_eq!(sequencer.bounds(), Some(SessionBounds::new(10, 10)));
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(1, 1)));
}

#[test]
fn move_animate_settle_then_focus_cycle() {
    let mut sequencer = sequencer_at(2, 2);
    sequencer.enqueue(Direction::Right);
    sequencer.enqueue(Direction::Right);

    let request = sequencer.poll().expect("move request");
    assert_eq!(
        request,
        RemoteRequest::Move(vec![Direction::Right, Direction::Right])
    );
    assert_eq!(sequencer.state(), MotionState::AwaitingMove);
    assert_eq!(sequencer.pending_commands(), 0);
    assert_eq!(sequencer.poll(), None, "only one request outstanding");

    let t0 = Instant::now();
    let disposition = sequencer
        .complete_move(Ok(outcome(4, 2, 500)), t0)
        .expect("move ok");
    assert_eq!(
        disposition,
        MoveDisposition::Animating {
            target: GridCoordinate::new(4, 2),
            duration: Duration::from_millis(500),
        }
    );
    assert_eq!(sequencer.state(), MotionState::Animating);
    assert_eq!(sequencer.indicator(), MarkerIndicator::Moving);

    let mid = sequencer
        .tick(t0 + Duration::from_millis(250))
        .expect("mid frame");
    assert!(!mid.done);
    assert_eq!(sequencer.position(), PixelPosition::new(125.0, 75.0));
    assert!(sequencer.visited().is_empty());

    let last = sequencer
        .tick(t0 + Duration::from_millis(500))
        .expect("final frame");
    assert!(last.done);
    assert_eq!(sequencer.position(), px(4, 2));
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(4, 2)));
    assert_eq!(sequencer.visited().entries(), &[GridCoordinate::new(3, 1)]);
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert!(!sequencer.is_focused());

    assert_eq!(sequencer.poll(), Some(RemoteRequest::Focus));
    assert_eq!(sequencer.indicator(), MarkerIndicator::Focusing);
    let focus = sequencer.complete_focus(Ok(())).expect("focus ok");
    assert_eq!(focus, FocusDisposition::Focused(GridCoordinate::new(3, 1)));
    assert!(sequencer.is_focused());
    assert_eq!(sequencer.focus_ledger().entries(), &[GridCoordinate::new(3, 1)]);
    assert!(sequencer.is_settled());
    assert_eq!(sequencer.poll(), None);
}

#[test]
fn unchanged_target_skips_animation_and_ledgers() {
    let mut sequencer = sequencer_at(1, 3);
    sequencer.enqueue(Direction::Left);
    sequencer.poll().expect("move request");

    let disposition = sequencer
        .complete_move(Ok(outcome(1, 3, 0)), Instant::now())
        .expect("move ok");
    assert_eq!(disposition, MoveDisposition::Unchanged);
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert!(sequencer.visited().is_empty());
    assert!(sequencer.is_focused(), "focused flag left as-is");
    assert_eq!(sequencer.poll(), None);
}

#[test]
fn move_failure_returns_to_idle_without_mutation() {
    let mut sequencer = sequencer_at(2, 2);
    sequencer.enqueue(Direction::Down);
    sequencer.poll().expect("move request");

    let err = sequencer
        .complete_move(Err(MotionError::network("connection refused")), Instant::now())
        .expect_err("failure surfaces");
    assert!(matches!(err, MotionError::Network(_)));
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(2, 2)));
    assert_eq!(sequencer.position(), px(2, 2));
    assert!(sequencer.visited().is_empty());
    assert_eq!(sequencer.poll(), None, "failed batch is not retried");
}

#[test]
fn out_of_bounds_target_is_a_protocol_mismatch() {
    let mut sequencer = sequencer_at(10, 10);
    sequencer.enqueue(Direction::Right);
    sequencer.poll().expect("move request");

    let err = sequencer
        .complete_move(Ok(outcome(11, 10, 300)), Instant::now())
        .expect_err("rejected");
    assert!(matches!(err, MotionError::Protocol(_)));
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(10, 10)));
}

#[test]
fn focus_failure_keeps_flag_false_and_retries_next_cycle() {
    let mut sequencer = sequencer_at(2, 2);
    sequencer.enqueue(Direction::Up);
    sequencer.poll().expect("move request");
    let t0 = Instant::now();
    sequencer
        .complete_move(Ok(outcome(2, 1, 0)), t0)
        .expect("move ok");
    sequencer.tick(t0).expect("settle");

    assert_eq!(sequencer.poll(), Some(RemoteRequest::Focus));
    let err = sequencer
        .complete_focus(Err(MotionError::TimedOut(Duration::from_secs(10))))
        .expect_err("focus failed");
    assert!(matches!(err, MotionError::TimedOut(_)));
    assert!(!sequencer.is_focused());
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert!(sequencer.focus_ledger().is_empty());

    assert_eq!(sequencer.poll(), Some(RemoteRequest::Focus));
    sequencer.complete_focus(Ok(())).expect("focus ok");
    assert_eq!(sequencer.focus_ledger().entries(), &[GridCoordinate::new(1, 0)]);
}

#[test]
fn pending_input_takes_priority_over_focus() {
    let mut sequencer = sequencer_at(3, 3);
    sequencer.enqueue(Direction::Right);
    sequencer.poll().expect("move request");
    let t0 = Instant::now();
    sequencer.complete_move(Ok(outcome(4, 3, 0)), t0).expect("ok");
    sequencer.tick(t0);

    sequencer.enqueue(Direction::Down);
    assert_eq!(
        sequencer.poll(),
        Some(RemoteRequest::Move(vec![Direction::Down]))
    );
}

#[test]
fn input_during_animation_queues_behind_it() {
    let mut sequencer = sequencer_at(1, 1);
    sequencer.enqueue(Direction::Right);
    sequencer.poll().expect("move request");
    let t0 = Instant::now();
    sequencer
        .complete_move(Ok(outcome(2, 1, 1000)), t0)
        .expect("ok");

    sequencer.enqueue(Direction::Down);
    sequencer.enqueue(Direction::Down);
    assert_eq!(sequencer.poll(), None);
    sequencer.tick(t0 + Duration::from_millis(400));
    assert_eq!(sequencer.state(), MotionState::Animating);

    sequencer.tick(t0 + Duration::from_millis(1000));
    assert_eq!(
        sequencer.poll(),
        Some(RemoteRequest::Move(vec![Direction::Down, Direction::Down]))
    );
}

#[test]
fn stray_results_are_ignored() {
    let mut sequencer = sequencer_at(2, 2);
    assert_eq!(
        sequencer
            .complete_move(Ok(outcome(5, 5, 10)), Instant::now())
            .expect("ignored"),
        MoveDisposition::Ignored
    );
    assert_eq!(
        sequencer.complete_focus(Ok(())).expect("ignored"),
        FocusDisposition::Ignored
    );
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert!(sequencer.focus_ledger().is_empty());
    assert_eq!(sequencer.tick(Instant::now()), None);
}

#[test]
fn re_establishing_session_cancels_animation() {
    let mut sequencer = sequencer_at(1, 1);
    sequencer.enqueue(Direction::Right);
    sequencer.poll().expect("move request");
    let t0 = Instant::now();
    sequencer
        .complete_move(Ok(outcome(3, 1, 1000)), t0)
        .expect("ok");

    sequencer.establish_session(session(5, 5));
    assert_eq!(sequencer.state(), MotionState::Idle);
    assert_eq!(sequencer.position(), px(5, 5));
    assert_eq!(sequencer.tick(t0 + Duration::from_secs(2)), None);
    assert!(sequencer.visited().is_empty());
}

#[test]
fn re_establishing_session_keeps_outstanding_move() {
    let mut sequencer = sequencer_at(2, 2);
    sequencer.enqueue(Direction::Right);
    assert_eq!(
        sequencer.poll(),
        Some(RemoteRequest::Move(vec![Direction::Right]))
    );

    sequencer.establish_session(session(2, 2));
    assert_eq!(sequencer.state(), MotionState::AwaitingMove);

    sequencer.enqueue(Direction::Down);
    assert_eq!(sequencer.poll(), None, "one request in flight at a time");

    let t0 = Instant::now();
    assert_eq!(
        sequencer.complete_move(Ok(outcome(3, 2, 100)), t0),
        Ok(MoveDisposition::Animating {
            target: GridCoordinate::new(3, 2),
            duration: Duration::from_millis(100),
        })
    );
    sequencer.tick(t0 + Duration::from_millis(100));
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(3, 2)));

    assert_eq!(
        sequencer.poll(),
        Some(RemoteRequest::Move(vec![Direction::Down]))
    );
    let t1 = t0 + Duration::from_millis(200);
    sequencer
        .complete_move(Ok(outcome(3, 3, 100)), t1)
        .expect("second move");
    sequencer.tick(t1 + Duration::from_millis(100));
    assert_eq!(sequencer.current_cell(), Some(GridCoordinate::new(3, 3)));
}

#[test]
fn re_establishing_session_keeps_outstanding_focus() {
    let mut sequencer = sequencer_at(1, 1);
    sequencer.enqueue(Direction::Right);
    sequencer.poll().expect("move request");
    let t0 = Instant::now();
    sequencer
        .complete_move(Ok(outcome(2, 1, 0)), t0)
        .expect("ok");
    sequencer.tick(t0);
    assert_eq!(sequencer.poll(), Some(RemoteRequest::Focus));

    sequencer.establish_session(session(2, 1));
    assert_eq!(sequencer.state(), MotionState::AwaitingFocus);
    assert_eq!(sequencer.poll(), None);

    assert_eq!(
        sequencer.complete_focus(Ok(())),
        Ok(FocusDisposition::Focused(GridCoordinate::new(1, 0)))
    );
    assert!(sequencer.is_settled());
}

#[test]
fn snapshot_exposes_render_state() {
    let mut sequencer = sequencer_at(2, 2);
    sequencer.enqueue(Direction::Left);
    sequencer.poll();
    let t0 = Instant::now();
    sequencer.complete_move(Ok(outcome(1, 2, 0)), t0).expect("ok");
    sequencer.tick(t0);

    let snapshot = sequencer.snapshot();
    assert_eq!(snapshot.position, px(1, 2));
    assert_eq!(snapshot.visited, &[GridCoordinate::new(0, 1)]);
    assert!(snapshot.focused_cells.is_empty());
    assert_eq!(snapshot.state, MotionState::Idle);
    assert_eq!(snapshot.indicator, MarkerIndicator::Idle);
    assert_eq!(snapshot.cell_size, CELL);
}
