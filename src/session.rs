//! Session driver
//!
//! The embedding application owns a [`Session`] and calls [`Session::update`]
//! once per frame with the elapsed wall time. The session runs the sim at a
//! fixed timestep behind an accumulator, drains sim events, and dispatches
//! them to the collaborators: score store, leaderboard, and the lifecycle
//! broadcasts. External signals (start button, touch input, round reset)
//! arrive through session methods as one-shot inputs consumed by the next
//! tick.

use crate::config::Config;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::scores::{Leaderboard, ScoreStore};
use crate::signals::Signal;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Session {
    state: GameState,
    cfg: Config,
    input: TickInput,
    accumulator: f32,
    scores: Box<dyn ScoreStore>,
    leaderboard: Box<dyn Leaderboard>,
    on_started: Signal,
    on_ended: Signal,
}

impl Session {
    pub fn new(
        seed: u64,
        cfg: Config,
        scores: Box<dyn ScoreStore>,
        leaderboard: Box<dyn Leaderboard>,
    ) -> Self {
        log::info!(
            "session start: seed {seed}, profile {}, best {}",
            cfg.profile.as_str(),
            scores.best_score()
        );
        Self {
            state: GameState::new(seed),
            cfg,
            input: TickInput::default(),
            accumulator: 0.0,
            scores,
            leaderboard,
            on_started: Signal::new(),
            on_ended: Signal::new(),
        }
    }

    /// Subscribe to the "game started" broadcast
    pub fn on_game_started<F: FnMut() + 'static>(&mut self, f: F) {
        self.on_started.subscribe(f);
    }

    /// Subscribe to the "game ended" broadcast
    pub fn on_game_ended<F: FnMut() + 'static>(&mut self, f: F) {
        self.on_ended.subscribe(f);
    }

    /// Start button pressed (consumed by the next tick)
    pub fn start(&mut self) {
        self.input.start = true;
    }

    /// Touch input (consumed by the next tick)
    pub fn touch(&mut self) {
        self.input.touch = true;
    }

    /// Let the demo pilot play
    pub fn set_autoplay(&mut self, on: bool) {
        self.input.autoplay = on;
    }

    /// External "reload the scene": back to Waiting for the next round
    pub fn reset_round(&mut self) {
        self.state.round_reset();
        self.input = TickInput {
            autoplay: self.input.autoplay,
            ..Default::default()
        };
        self.accumulator = 0.0;
    }

    /// Advance by one frame of wall time, running fixed sim steps
    pub fn update(&mut self, frame_dt: f32) {
        // Clamp long stalls so resume-from-background doesn't fast-forward
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            tick(&mut self.state, &input, &self.cfg, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs are consumed by the first substep
            self.input.start = false;
            self.input.touch = false;
        }

        self.pump_events();
    }

    /// Dispatch sim events to collaborators. The sim emits Started and
    /// GameOver at most once per round, which is what keeps the broadcasts
    /// and the score save idempotent.
    fn pump_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Started => {
                    self.on_started.emit();
                }
                GameEvent::Jump { to_left } => {
                    // Sound cue is the host's job; subscribers hear about it
                    // via the event stream if they poll state
                    log::trace!("jump {}", if to_left { "left" } else { "right" });
                }
                GameEvent::WallBounce { side, .. } => {
                    log::trace!("bounce off {side:?} wall, score {}", self.state.score);
                }
                GameEvent::GameOver { kind, score } => {
                    log::info!("round over on {kind:?}: {score} points");
                    // Broadcast first, then persist and report, matching the
                    // original game-over sequence
                    self.on_ended.emit();
                    self.scores.save_score(score);
                    self.leaderboard.report_score(score);
                }
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best_score()
    }

    pub fn lives(&self) -> u32 {
        self.scores.lives()
    }

    pub fn rounds_played(&self) -> u32 {
        self.scores.rounds_played()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::{LocalLeaderboard, MemoryScores};
    use crate::sim::GamePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(seed: u64) -> Session {
        Session::new(
            seed,
            Config::default(),
            Box::new(MemoryScores::new()),
            Box::new(LocalLeaderboard::new()),
        )
    }

    /// Step the session in whole frames until the predicate holds
    fn run_until(s: &mut Session, max_frames: u32, mut done: impl FnMut(&Session) -> bool) {
        for _ in 0..max_frames {
            if done(s) {
                return;
            }
            s.update(SIM_DT);
        }
    }

    #[test]
    fn test_start_fires_started_broadcast_once() {
        let mut s = session(1);
        let started = Rc::new(RefCell::new(0));
        let c = Rc::clone(&started);
        s.on_game_started(move || *c.borrow_mut() += 1);

        s.start();
        s.update(SIM_DT);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(*started.borrow(), 1);

        // A second start signal mid-round is a no-op
        s.start();
        s.update(SIM_DT);
        assert_eq!(*started.borrow(), 1);
    }

    #[test]
    fn test_game_over_saves_score_and_broadcasts_once() {
        let mut s = session(77);
        let ended = Rc::new(RefCell::new(0));
        let c = Rc::clone(&ended);
        s.on_game_ended(move || *c.borrow_mut() += 1);

        s.set_autoplay(true);
        s.start();
        run_until(&mut s, 60_000, |s| s.is_game_over());
        assert!(s.is_game_over(), "autoplay round should eventually end");

        assert_eq!(*ended.borrow(), 1);
        let final_score = s.score();
        assert_eq!(s.best_score(), final_score);
        assert_eq!(s.rounds_played(), 1);

        // Further frames after game over change nothing
        for _ in 0..30 {
            s.update(SIM_DT);
        }
        assert_eq!(*ended.borrow(), 1);
        assert_eq!(s.rounds_played(), 1);
    }

    #[test]
    fn test_reset_round_returns_to_waiting() {
        let mut s = session(77);
        s.set_autoplay(true);
        s.start();
        run_until(&mut s, 60_000, |s| s.is_game_over());
        let best = s.best_score();

        s.reset_round();
        assert_eq!(s.state().phase, GamePhase::Waiting);
        assert_eq!(s.score(), 0);
        assert_eq!(s.state().pool.active_count(), 0);
        // Best score survives the reset
        assert_eq!(s.best_score(), best);

        // A new round can start
        let started = Rc::new(RefCell::new(0));
        let c = Rc::clone(&started);
        s.on_game_started(move || *c.borrow_mut() += 1);
        s.start();
        s.update(SIM_DT);
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(*started.borrow(), 1);
    }

    #[test]
    fn test_best_score_updates_only_on_improvement() {
        let mut s = session(5);
        // Simulate a finished round through the store directly is cheating;
        // drive two real rounds and compare
        s.set_autoplay(true);
        s.start();
        run_until(&mut s, 60_000, |s| s.is_game_over());
        let first = s.score();
        assert_eq!(s.best_score(), first);

        s.reset_round();
        s.start();
        run_until(&mut s, 60_000, |s| s.is_game_over());
        let second = s.score();
        assert_eq!(s.best_score(), first.max(second));
        assert_eq!(s.rounds_played(), 2);
    }

    #[test]
    fn test_accumulator_caps_substeps() {
        let mut s = session(9);
        s.start();
        // A huge frame may not fast-forward more than MAX_SUBSTEPS ticks
        s.update(10.0);
        assert!(s.state().time_ticks <= MAX_SUBSTEPS as u64);
    }
}
