// End-to-end close-up sessions driven through the public API with a fixed
// 16 ms step, matching what the browser loop does each animation frame.

mod common;

use common::{AllLoaded, STEP, SURFACE, enter_closeup, new_game};
use fish_pond::{Game, Mode, Outcome, Overlay};

/// Run frames until the session resolves, calling `hold` before each frame to
/// decide whether the finger is down. Returns the outcome and the affection
/// seen on the last running frame.
fn play(game: &mut Game, mut hold: impl FnMut(usize, f64) -> bool) -> (Outcome, f64) {
    let mut frame = 0;
    loop {
        let Mode::Closeup(session) = &game.state.mode else {
            panic!("session ended without an outcome");
        };
        let affection = session.affection;
        assert!((0.0..=100.0).contains(&affection));
        if hold(frame, affection) {
            game.touch_start(fish_pond::Point::new(-1.0, -1.0), SURFACE, &AllLoaded);
        } else {
            game.touch_end();
        }
        if let Some(outcome) = game.tick(STEP, SURFACE, &AllLoaded) {
            return (outcome, affection);
        }
        frame += 1;
        assert!(frame <= 625, "session outlived its timer");
    }
}

#[test]
fn holding_throughout_overshoots_and_fails() {
    let mut game = new_game(1);
    enter_closeup(&mut game);
    let (outcome, affection) = play(&mut game, |_, _| true);
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(affection, 100.0);
    assert!(game.state.mode.is_pond());
    assert_eq!(game.state.current_fish(), None);
    assert_eq!(game.state.fish_value, 0);
    assert_eq!(game.state.overlay, Overlay::None);
}

#[test]
fn never_holding_drains_and_fails() {
    let mut game = new_game(2);
    enter_closeup(&mut game);
    let (outcome, affection) = play(&mut game, |_, _| false);
    assert_eq!(outcome, Outcome::Failure);
    assert!(affection < 0.1);
    assert!(game.state.mode.is_pond());
    assert_eq!(game.state.fish_value, 0);
}

#[test]
fn staying_in_green_zone_wins_once() {
    let mut game = new_game(3);
    enter_closeup(&mut game);
    // Hold one frame in three: +0.16 then -0.08 twice keeps affection near 50.
    let (outcome, affection) = play(&mut game, |frame, _| frame % 3 == 0);
    assert_eq!(outcome, Outcome::Success);
    assert!((30.0..=70.0).contains(&affection));
    assert_eq!(game.state.fish_value, 1);
    assert_eq!(game.state.overlay, Overlay::SuccessPopup);
    assert!(game.state.mode.is_pond());

    // Further frames must not score again.
    for _ in 0..100 {
        assert_eq!(game.tick(STEP, SURFACE, &AllLoaded), None);
    }
    assert_eq!(game.state.fish_value, 1);
}

#[test]
fn session_lasts_exactly_625_frames() {
    let mut game = new_game(4);
    enter_closeup(&mut game);
    let mut frames = 0;
    while game.tick(STEP, SURFACE, &AllLoaded).is_none() {
        frames += 1;
    }
    assert_eq!(frames + 1, 625);
}

#[test]
fn reentering_closeup_resets_session() {
    let mut game = new_game(5);
    enter_closeup(&mut game);
    play(&mut game, |_, _| true);
    assert!(game.state.mode.is_pond());

    enter_closeup(&mut game);
    let Mode::Closeup(session) = &game.state.mode else {
        panic!("expected close-up");
    };
    assert_eq!(session.affection, 50.0);
    assert_eq!(session.timer_ms, 10_000.0);
    assert_eq!(session.scroll_position, 0.0);
}

#[test]
fn timer_never_negative_while_closeup() {
    let mut game = new_game(6);
    enter_closeup(&mut game);
    loop {
        if let Mode::Closeup(s) = &game.state.mode {
            assert!(s.timer_ms >= 0.0);
        }
        if game.tick(STEP, SURFACE, &AllLoaded).is_some() {
            break;
        }
    }
}
