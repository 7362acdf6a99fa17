//! Gravity Ball demo entry point
//!
//! Runs a few autoplay rounds of the headless sim at a fixed rate and
//! prints the results. A real host embeds [`gravity_ball::Session`] in its
//! own frame loop and forwards touch input instead.

use gravity_ball::consts::SIM_DT;
use gravity_ball::{Config, FileScores, LocalLeaderboard, PlatformProfile, Session};

/// Rounds to play before exiting
const DEMO_ROUNDS: u32 = 3;
/// Safety cap per round (10 minutes of sim time)
const MAX_FRAMES_PER_ROUND: u32 = 60 * 600;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let profile = std::env::var("GRAVITY_BALL_PROFILE")
        .ok()
        .and_then(|s| PlatformProfile::from_str(&s))
        .unwrap_or_default();
    let cfg = Config::from_profile(profile);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let scores = FileScores::load("gravity_ball_scores.json");
    let leaderboard = LocalLeaderboard::new();
    let mut session = Session::new(seed, cfg, Box::new(scores), Box::new(leaderboard));

    session.on_game_started(|| println!("--- round started ---"));
    session.on_game_ended(|| println!("--- round over ---"));
    session.set_autoplay(true);

    for round in 1..=DEMO_ROUNDS {
        session.start();
        let mut frames = 0;
        while !session.is_game_over() && frames < MAX_FRAMES_PER_ROUND {
            session.update(SIM_DT);
            frames += 1;
        }

        println!(
            "round {round}: score {}, best {}, {:.1}s survived",
            session.score(),
            session.best_score(),
            frames as f32 * SIM_DT
        );
        session.reset_round();
    }

    println!(
        "played {} rounds total on this profile",
        session.rounds_played()
    );
}
