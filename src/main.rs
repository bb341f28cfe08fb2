//! Duel Arena headless driver
//!
//! Runs one scripted bout through the engine and prints the final match
//! snapshot as JSON. Pass a settings file path as the first argument to
//! override seed, timestep or drop interval.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use duel_arena::sim::{Command, Engine, FrameClock, GamePhase};
    use duel_arena::{Settings, SettingsError};

    /// One scripted input
    struct Cue {
        at_s: f64,
        player: usize,
        command: Command,
    }

    impl Cue {
        fn new(at_s: f64, player: usize, command: Command) -> Self {
            Self {
                at_s,
                player,
                command,
            }
        }
    }

    /// Walk to the middle, trade blows, and crouch now and then to grab drops
    fn script(length_s: f64) -> Vec<Cue> {
        let mut cues = vec![
            Cue::new(0.0, 0, Command::MoveRightPressed),
            Cue::new(0.0, 1, Command::MoveLeftPressed),
            Cue::new(1.2, 0, Command::MoveRightReleased),
            Cue::new(1.2, 1, Command::MoveLeftReleased),
        ];

        let mut t = 1.6;
        while t < length_s {
            cues.push(Cue::new(t, 0, Command::AttackPressed));
            cues.push(Cue::new(t + 0.05, 1, Command::AttackPressed));
            t += 0.9;
        }

        let mut t = 3.5;
        while t < length_s {
            for player in 0..2 {
                cues.push(Cue::new(t, player, Command::CrouchPressed));
                cues.push(Cue::new(t + 0.2, player, Command::CrouchReleased));
            }
            t += 3.5;
        }

        cues.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
        cues
    }

    fn load_settings() -> Result<Settings, SettingsError> {
        match std::env::args().nth(1) {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = load_settings()?;
        settings.validate()?;

        let mut engine = Engine::with_settings(&settings);
        let mut clock = FrameClock::from_settings(&settings);
        engine.start();

        let mut cues = script(settings.demo_seconds).into_iter().peekable();
        let frame_dt = settings.fixed_dt;
        let mut elapsed = 0.0;

        while elapsed < settings.demo_seconds && engine.phase() != GamePhase::GameOver {
            while let Some(cue) = cues.next_if(|c| c.at_s <= elapsed) {
                engine.command(cue.player, cue.command);
            }
            clock.advance(&mut engine, frame_dt);
            elapsed += frame_dt;
        }

        let [one, two] = engine.players();
        match engine.winner() {
            Some(side) => log::info!("Player {} won after {:.1}s", side.number(), elapsed),
            None => log::info!(
                "No winner after {:.1}s (hp {} vs {})",
                elapsed,
                one.hp(),
                two.hp()
            ),
        }

        println!("{}", engine.snapshot().to_json()?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Duel Arena (headless) starting...");

    if let Err(e) = demo::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web; embed the library instead
}
