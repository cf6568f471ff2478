//! Headless autoplay driver
//!
//! Runs one session with a scripted dodge policy at the fixed tick rate and
//! logs the outcome. Useful for balancing and for smoke-testing the
//! simulation without a renderer. Seed and difficulty come from the command
//! line: `drop-dodge [difficulty] [seed]`.

use std::time::{SystemTime, UNIX_EPOCH};

use drop_dodge::consts::SIM_DT;
use drop_dodge::sim::{
    AbilityKind, GameState, HazardCategory, MoveIntent, SessionConfig, SessionPhase, TickInput,
    tick,
};
use drop_dodge::{HighScores, Tuning};

/// Demo-mode policy: sidestep the most imminent hazard, pop the ability when
/// one gets close
fn autoplay(state: &GameState) -> TickInput {
    let actor = &state.actor;
    let threat_window = 5.0 * actor.rect.size.y;

    // Most imminent hazard: lowest object still above the actor whose column
    // overlaps ours (with a dodge margin)
    let margin = actor.rect.size.x;
    let threat = state
        .field
        .objects
        .iter()
        .filter(|o| o.rect.bottom() <= actor.rect.bottom())
        .filter(|o| o.rect.bottom() > actor.rect.top() - threat_window)
        .filter(|o| {
            o.rect.right() > actor.rect.left() - margin && o.rect.left() < actor.rect.right() + margin
        })
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

    match threat {
        Some(obj) => {
            // Step toward whichever side has more room
            let intent = if obj.rect.center_x() < actor.rect.center_x() {
                MoveIntent::Right
            } else {
                MoveIntent::Left
            };
            // Panic button once the hazard is nearly on top of us
            let close = obj.rect.bottom() > actor.rect.top() - 2.0 * actor.rect.size.y;
            TickInput {
                intent,
                trigger_ability: close,
            }
        }
        None => TickInput::default(),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(3);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let tuning = Tuning::default();
    let mut state = GameState::new(tuning);
    let config = SessionConfig {
        difficulty,
        categories: HazardCategory::ALL.to_vec(),
        actor_kind: AbilityKind::FieldSlow,
        seed,
    };
    if let Err(e) = state.start(&config) {
        log::error!("session setup failed: {e}");
        std::process::exit(1);
    }

    // Cap at ten simulated minutes so a lucky run terminates
    let max_ticks = (600.0 / SIM_DT) as u64;
    while state.phase == SessionPhase::Running && state.time_ticks < max_ticks {
        let input = autoplay(&state);
        tick(&mut state, &input, SIM_DT);
        if state.time_ticks % 3600 == 0 {
            log::info!(
                "t={:.0}s score={} hp={}",
                state.time_ticks as f32 * SIM_DT,
                state.score,
                state.actor.hp
            );
        }
    }

    println!(
        "seed {seed} difficulty {difficulty}: survived {:.1}s, score {}",
        state.time_ticks as f32 * SIM_DT,
        state.score
    );

    let path = std::path::Path::new(HighScores::FILE_NAME);
    let mut scores = HighScores::load(path);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    if let Some(rank) = scores.add(state.score, difficulty, now) {
        log::info!("new high score, rank {rank}");
        if let Err(e) = scores.save(path) {
            log::warn!("could not save high scores: {e}");
        }
    }
}
