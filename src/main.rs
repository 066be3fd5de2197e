//! Flappy Drake headless driver
//!
//! Stands in for the windowing layer: feeds a 60 Hz tick and key events into
//! a session, logs the feedback events and prints the scoreboard when the
//! run ends. Keys come from a simple autopilot, or from a `--keys` script of
//! `FRAME:KEY` presses (each key is released on the following frame).
//!
//! Usage: `flappy-drake [--seed N] [--seconds N] [--settings PATH] [--keys SCRIPT] [--scores]`

use std::path::PathBuf;
use std::process::ExitCode;

use flappy_drake::sim::{GameEvent, SoundCue};
use flappy_drake::{Key, Phase, Scoreboard, Session, Settings};

/// Frame period of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 60.0;
const USAGE: &str =
    "usage: flappy-drake [--seed N] [--seconds N] [--settings PATH] [--keys SCRIPT] [--scores]";

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    seconds: Option<f32>,
    settings: Option<PathBuf>,
    keys: Vec<(u64, Key)>,
    scores_only: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("bad seed {value:?}: {e}"))?;
                args.seed = Some(seed);
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                let seconds = value
                    .parse::<f32>()
                    .map_err(|e| format!("bad seconds {value:?}: {e}"))?;
                args.seconds = Some(seconds);
            }
            "--settings" => {
                let value = iter.next().ok_or("--settings needs a path")?;
                args.settings = Some(PathBuf::from(value));
            }
            "--keys" => {
                let value = iter.next().ok_or("--keys needs a script")?;
                args.keys = parse_keys(&value)?;
            }
            "--scores" => args.scores_only = true,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}

/// Parse a key script like `30:space,90:r,150:esc` into frame-ordered presses
fn parse_keys(script: &str) -> Result<Vec<(u64, Key)>, String> {
    let mut presses = Vec::new();
    for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (frame, name) = entry
            .split_once(':')
            .ok_or_else(|| format!("bad key entry {entry:?}, expected FRAME:KEY"))?;
        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("bad frame in {entry:?}: {e}"))?;
        let key = Key::from_name(name.trim()).ok_or_else(|| format!("unknown key {name:?}"))?;
        presses.push((frame, key));
    }
    presses.sort_by_key(|&(frame, _)| frame);
    Ok(presses)
}

/// Press flap when the player sinks below the opening ahead, release otherwise
fn autopilot(session: &mut Session) {
    let player = session.player();
    let target = session
        .state()
        .active
        .front()
        .map(|pair| pair.center_y - pair.gap / 4.0)
        .unwrap_or(player.pos.y);

    if player.pos.y < target && player.vel.y <= 0.0 {
        session.on_key_press(Key::Space);
    } else {
        session.on_key_release(Key::Space);
    }
}

/// Drive `session` for up to `frames` frames. Returns the sound cues played,
/// which stays empty when `sound` is off.
fn play(session: &mut Session, frames: u64, script: &[(u64, Key)], sound: bool) -> Vec<SoundCue> {
    let mut cues = Vec::new();
    for frame in 0..frames {
        if script.is_empty() {
            autopilot(session);
        } else {
            for &(_, key) in script.iter().filter(|(at, _)| at + 1 == frame) {
                session.on_key_release(key);
            }
            for &(_, key) in script.iter().filter(|(at, _)| *at == frame) {
                session.on_key_press(key);
            }
        }
        session.on_update(FRAME_DT);

        for event in session.drain_events() {
            match event {
                GameEvent::Scored { score } => log::info!("Score: {}", score),
                GameEvent::Died { score } => log::info!("Crashed with {} points", score),
                other => log::debug!("{:?}", other),
            }
            if let Some(cue) = event.sound_cue().filter(|_| sound) {
                log::info!("Playing {:?} cue", cue);
                cues.push(cue);
            }
        }

        if session.exit_requested() {
            break;
        }
        // Without a script nobody presses restart, so the run ends here
        if script.is_empty() && session.phase() == Phase::GameOver {
            break;
        }
    }
    cues
}

fn print_scores(board: Option<&Scoreboard>) {
    let Some(board) = board else {
        println!("No scoreboard available");
        return;
    };
    match board.load() {
        Ok(scores) => match scores.top_score() {
            None => println!("Be the first one to score!"),
            Some(best) => {
                println!("Best score: {best}");
                println!("The best {} scores are", scores.len());
                for score in scores.entries() {
                    println!("{score}");
                }
            }
        },
        Err(e) => log::error!("{}", e),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load(args.settings.as_deref());
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let scoreboard = match &settings.scoreboard_path {
        Some(path) => Some(Scoreboard::at(path.clone())),
        None => Scoreboard::open_default()
            .inspect_err(|e| log::warn!("{}; scores will not be saved", e))
            .ok(),
    };

    if args.scores_only {
        print_scores(scoreboard.as_ref());
        return ExitCode::SUCCESS;
    }

    log::info!("Flappy Drake (headless) starting...");
    let mut session = Session::new(&settings, scoreboard);
    log::debug!("Tuning: {:?}", session.tuning());
    session.on_key_press(Key::S);

    let frames = (args.seconds.unwrap_or(DEFAULT_SECONDS).max(0.0) / FRAME_DT) as u64;
    play(&mut session, frames, &args.keys, settings.sound);

    let score = session.score();
    if session.phase() == Phase::Playing {
        log::info!("Time limit reached, quitting to menu");
        session.on_key_press(Key::Q);
    }

    println!("Seed {}: final score {}", session.seed(), score);
    if let Some(rank) = session.last_rank() {
        println!("New top score, rank #{rank}");
    }
    print_scores(session.scoreboard());

    ExitCode::SUCCESS
}
