//! Native entry point: runs a headless autoplay session and prints the summary.
//! The browser build starts from `math_hammer::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use math_hammer::consts::TICK_MS;
    use math_hammer::feedback::LogFeedback;
    use math_hammer::persistence::MemoryStore;
    use math_hammer::sim::{Difficulty, GameMode, GameStatus, PlayMode, PowerUpKind};
    use math_hammer::{Game, format_clock, platform};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Chance the bot picks the right mole
    const ACCURACY: f64 = 0.9;
    /// Reaction time range in ticks
    const REACTION_TICKS: std::ops::RangeInclusive<u32> = 8..=40;
    /// Stop after this much simulated time even if the bot keeps going
    const MAX_TICKS: u32 = 20 * 60 * 20;

    pub fn run(seed: u64) {
        let mut game = Game::new(MemoryStore::new(), LogFeedback, seed);
        let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);

        game.start_session(GameMode::Mixed, Difficulty::Hard, PlayMode::TimeLimited);

        let mut wait = bot.random_range(REACTION_TICKS);
        let mut revived = false;
        for _ in 0..MAX_TICKS {
            game.update(TICK_MS as f64);

            match game.session().status {
                GameStatus::Playing => {}
                GameStatus::GameOver if !revived && game.session().can_revive() => {
                    revived = game.request_revive();
                    continue;
                }
                GameStatus::GameOver if game.session().is_watching_ad() => continue,
                _ => break,
            }

            // Spend on power-ups when rich
            let score = game.session().score;
            if score >= 200 && !game.session().is_power_up_active(PowerUpKind::IceCream) {
                game.activate_power_up(PowerUpKind::IceCream);
            } else if game.session().lives <= 1 && score >= 100 {
                game.activate_power_up(PowerUpKind::LifePotion);
            }

            if wait > 0 {
                wait -= 1;
                continue;
            }
            wait = bot.random_range(REACTION_TICKS);

            let board = &game.session().board;
            let target = if bot.random_bool(ACCURACY) {
                board.correct_index()
            } else {
                board
                    .cells
                    .iter()
                    .find(|c| c.active && !c.is_correct)
                    .map(|c| c.index)
            };
            if let Some(index) = target {
                match game.select_cell(index) {
                    Ok(outcome) => log::debug!("Hit {}: {:?}", index, outcome),
                    Err(e) => log::error!("Bad selection: {}", e),
                }
            }
        }

        let snap = game.snapshot();
        println!("Seed:        {}", seed);
        println!("Status:      {:?} ({:?})", snap.status, snap.end_reason);
        println!("Net score:   {}", snap.net_score);
        println!("Max combo:   {}", snap.max_combo);
        println!("Answered:    {}", snap.correct_count);
        println!(
            "Time left:   {}",
            snap.time_left.unwrap_or_else(|| format_clock(0))
        );
        if let Some(grade) = snap.grade {
            println!("Grade:       {} - {}", grade.title, grade.comment);
        }
        println!("High score:  {}", game.high_score());
    }

    pub fn seed_from_args() -> u64 {
        std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(platform::random_seed)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Hammer (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - build for wasm32 to play");
    autoplay::run(autoplay::seed_from_args());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
