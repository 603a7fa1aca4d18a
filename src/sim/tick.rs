//! Fixed timestep simulation tick and command handling
//!
//! Every state change goes through [`transition`]: one tick or one discrete
//! command in, the next session out.

use rand_pcg::Pcg32;

use super::distraction::{CatHeading, DistractionVisual, try_spawn_distraction};
use super::movement::{integrate, update_drive, update_pull};
use super::powerup::{apply_pickup, try_spawn_power_up};
use super::random::{RandomSource, seeded};
use super::resolve::resolve_option;
use super::snapshot::Snapshot;
use super::state::{Direction, DriveFactor, FlowMessage, MobileObstacle, Session, Status};
use crate::consts::*;
use crate::{Mode, Rules};

/// Everything the outside world can ask of the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Advance one fixed timestep
    Tick,
    /// Burst forward (blocked while a distraction is active)
    Dash,
    /// Press or release a movement key
    SetMovement { direction: Direction, pressed: bool },
    /// Release all movement keys
    ClearMovement,
    /// Play an option against the active distraction
    ChooseAction(String),
    /// Throw the session away and start over
    Restart,
}

/// Compute the session that follows `command`
pub fn transition(
    session: &Session,
    command: &Command,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> Session {
    if let Command::Restart = command {
        log::info!("Session restarted");
        return Session::restarted(rules);
    }
    if !session.is_playing() {
        return session.clone();
    }

    let mut next = session.clone();
    match command {
        Command::Tick => tick(&mut next, rules, rng),
        Command::Dash => dash(&mut next, rules),
        Command::SetMovement { direction, pressed } => next.movement.set(*direction, *pressed),
        Command::ClearMovement => next.movement = Default::default(),
        Command::ChooseAction(option_id) => {
            if let Some(outcome) = resolve_option(&mut next, option_id, rules, rng) {
                // Drive bias belongs to the distraction that just left
                if outcome.dismissed {
                    update_drive(&mut next, true, rules.tick_seconds(), rules, rng);
                }
                apply_pickup(&mut next, rules);
                check_goal(&mut next, rules);
            }
        }
        // Handled before the status check
        Command::Restart => {}
    }
    next
}

/// Advance the session by one fixed timestep
fn tick(session: &mut Session, rules: &Rules, rng: &mut dyn RandomSource) {
    let dt = rules.tick_seconds();
    let start_x = session.position.x;
    session.ticks += 1;
    session.time_left_ms = session.time_left_ms.saturating_sub(rules.tick_ms);

    if let Some(flow) = session.flow_message.as_mut() {
        flow.remaining_ms = flow.remaining_ms.saturating_sub(rules.tick_ms);
        if flow.remaining_ms == 0 {
            session.flow_message = None;
        }
    }

    let had_distraction = session.active_distraction.is_some();
    update_distraction(session, dt, rules, rng);
    session.active_power_up = try_spawn_power_up(
        session.active_power_up,
        session.progress,
        dt,
        rules,
        rng,
    );

    let context_changed = had_distraction != session.active_distraction.is_some();
    update_drive(session, context_changed, dt, rules, rng);
    session.pull_speed = update_pull(session.pull_speed, session.movement.is_pulling(), dt, rules);
    integrate(session, dt, rules);

    let forward = (session.position.x - start_x).max(0.0);
    session.score += forward * rules.score_per_forward_px;

    if let Some(narration) = session.active_distraction.as_ref().map(|d| d.narration.clone()) {
        session.add_stubbornness(rules.passive_stubbornness_per_second * dt, rules);
        if !had_distraction {
            session.message = format!("Distraction: {narration}");
        }
    }

    apply_pickup(session, rules);
    check_goal(session, rules);
}

/// Spawn, age, move and expire the distraction and its cat actor
fn update_distraction(session: &mut Session, dt: f32, rules: &Rules, rng: &mut dyn RandomSource) {
    let was_active = session.active_distraction.is_some();
    session.active_distraction = try_spawn_distraction(
        session.active_distraction.take(),
        dt,
        rules.distraction_chance_per_second,
        rng,
    );

    let Some((category, visual)) = session
        .active_distraction
        .as_ref()
        .map(|d| (d.category, d.visual))
    else {
        session.mobile_obstacle = None;
        session.distraction_age_ms = 0;
        return;
    };

    if was_active {
        session.distraction_age_ms += rules.tick_ms;
    } else {
        session.distraction_age_ms = 0;
        if category.has_obstacle() {
            let walking = match visual {
                DistractionVisual::CatWalk {
                    heading: CatHeading::Opposite,
                    ..
                } => Direction::Back,
                _ => Direction::Forward,
            };
            session.mobile_obstacle = Some(MobileObstacle::entering(walking, rules.obstacle_speed));
        }
    }

    if let Some(cat) = session.mobile_obstacle.as_mut() {
        cat.advance(dt);
        if cat.is_off_scene() {
            log::debug!("Cat left the scene");
            session.clear_distraction();
            session.message = "The cat ran off-screen.".to_string();
            return;
        }
    }

    if session.distraction_age_ms >= category.lifetime_ms() {
        log::debug!("{} distraction timed out", category.as_str());
        session.clear_distraction();
        session.message = category.timeout_text().to_string();
    }
}

fn dash(session: &mut Session, rules: &Rules) {
    if let Some(distraction) = &session.active_distraction {
        session.message = format!("Blocked: {}", distraction.narration);
        session.add_stubbornness(rules.blocked_dash_penalty, rules);
        check_goal(session, rules);
        return;
    }

    session.set_x(session.position.x + rules.dash_distance, rules);
    session.facing = Direction::Forward;
    session.score += rules.dash_score;
    session.message = "Dash! The shiba surges forward.".to_string();
    apply_pickup(session, rules);
    check_goal(session, rules);
}

/// Win, loss or lap evaluation
fn check_goal(session: &mut Session, rules: &Rules) {
    if !session.is_playing() {
        return;
    }

    if session.progress >= rules.target_progress {
        match rules.mode {
            Mode::Terminal => {
                session.status = Status::Won;
                session.message = format!(
                    "You made it to the park. The shiba is happy and proud. Final score: {}",
                    session.score.round()
                );
                log::info!("Session won with score {:.0}", session.score);
            }
            Mode::Continuous => complete_lap(session, rules),
        }
        return;
    }

    if rules.mode.has_loss()
        && (session.time_left_ms == 0 || session.stubbornness >= rules.max_stubbornness)
    {
        session.status = Status::Lost;
        session.message = "The shiba wins this round. Try a different strategy.".to_string();
        log::info!(
            "Session lost (time {} ms, stubbornness {:.0})",
            session.time_left_ms,
            session.stubbornness
        );
    }
}

/// Loop the walk in place, keeping score
fn complete_lap(session: &mut Session, rules: &Rules) {
    session.laps += 1;
    session.score += rules.lap_bonus;
    session.set_x(TRACK_START_X, rules);
    session.facing = Direction::Forward;
    session.drive_velocity = 0.0;
    session.pull_speed = rules.pull_ceiling;
    session.drive_factor = DriveFactor::default();

    let text = format!("Park reached! Lap {} complete, keep walking.", session.laps);
    session.message = text.clone();
    session.flow_message = Some(FlowMessage {
        text,
        remaining_ms: rules.flow_message_ms,
    });
    log::info!("Lap {} complete, score {:.0}", session.laps, session.score);
}

/// Owns one live session plus the rules and randomness driving it
///
/// The periodic driver calls [`Engine::tick`]; input handlers call the
/// command methods. Each returns the fresh snapshot.
#[derive(Debug, Clone)]
pub struct Engine<R: RandomSource = Pcg32> {
    session: Session,
    rules: Rules,
    rng: R,
}

impl Engine<Pcg32> {
    /// Create an engine with a seeded PCG stream
    pub fn new(seed: u64, rules: Rules) -> Self {
        log::info!("New {} session (seed {seed})", rules.mode.as_str());
        Self::with_rng(rules, seeded(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    /// Create an engine around any random source
    pub fn with_rng(rules: Rules, rng: R) -> Self {
        Self {
            session: Session::new(&rules),
            rules,
            rng,
        }
    }

    pub fn apply(&mut self, command: &Command) -> Snapshot {
        self.session = transition(&self.session, command, &self.rules, &mut self.rng);
        self.snapshot()
    }

    pub fn tick(&mut self) -> Snapshot {
        self.apply(&Command::Tick)
    }

    pub fn dash(&mut self) -> Snapshot {
        self.apply(&Command::Dash)
    }

    pub fn set_movement(&mut self, direction: Direction, pressed: bool) -> Snapshot {
        self.apply(&Command::SetMovement { direction, pressed })
    }

    pub fn clear_movement(&mut self) -> Snapshot {
        self.apply(&Command::ClearMovement)
    }

    pub fn choose_action(&mut self, option_id: &str) -> Snapshot {
        self.apply(&Command::ChooseAction(option_id.to_string()))
    }

    pub fn restart(&mut self) -> Snapshot {
        self.apply(&Command::Restart)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session, &self.rules)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct access for scripted setups (tests, demos)
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::distraction::{DistractionCategory, build_cat_walk, build_dog_walk, build_rain};
    use crate::sim::powerup::{PowerUp, PowerUpKind};
    use crate::sim::random::ScriptedRandom;
    use crate::sim::state::DriveSource;
    use glam::Vec2;

    /// Draws that never trigger a spawn or resample
    fn quiet_rng() -> ScriptedRandom {
        ScriptedRandom::constant(0.99)
    }

    fn terminal() -> Rules {
        Rules::with_mode(Mode::Terminal)
    }

    #[test]
    fn test_fresh_session() {
        let engine = Engine::new(1, terminal());
        let snap = engine.snapshot();
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.progress_pct, 0);
        assert_eq!(snap.time_left_seconds, 60);
        assert_eq!(snap.stubbornness, 10);
        assert!(snap.distraction.is_none());
    }

    #[test]
    fn test_dash_without_distraction() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.dash();
        let session = engine.session();

        let expected = crate::progress_from_x(TRACK_START_X + rules.dash_distance, 100.0);
        assert!((session.progress - expected).abs() < 1e-4);
        assert_eq!(session.score, rules.dash_score);
        assert_eq!(session.stubbornness, rules.start_stubbornness);
        assert_eq!(session.time_left_ms, rules.start_time_ms);

        engine.tick();
        assert_eq!(engine.session().time_left_ms, rules.start_time_ms - rules.tick_ms);
    }

    #[test]
    fn test_dash_blocked_by_distraction() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().active_distraction = Some(build_rain(&mut quiet_rng()));
        engine.dash();

        let session = engine.session();
        assert_eq!(session.position.x, TRACK_START_X);
        assert_eq!(session.score, 0.0);
        assert_eq!(session.stubbornness, rules.start_stubbornness + rules.blocked_dash_penalty);
        assert!(session.message.starts_with("Blocked:"));
    }

    #[test]
    fn test_forced_failure_applies_fail_effects() {
        let rules = terminal();
        let mut rng = quiet_rng();
        let mut session = Session::new(&rules);
        let mut dog = build_dog_walk(&mut ScriptedRandom::constant(0.5));
        dog.options[2].success_probability = 0.0;
        let option = dog.options[2].clone();
        session.active_distraction = Some(dog);

        for _ in 0..100 {
            let next = transition(&session, &Command::ChooseAction(option.id.clone()), &rules, &mut rng);
            assert_eq!(next.message, option.fail_text);
            let expected = session.stubbornness + option.fail_effects.stubbornness.unwrap();
            assert_eq!(next.stubbornness, expected);
            assert!(next.active_distraction.is_some());
        }
    }

    #[test]
    fn test_reaching_goal_wins_in_terminal_mode() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules, quiet_rng());
        engine.session_mut().set_x(TRACK_GOAL_X - 1.0, &terminal());
        engine.set_movement(Direction::Forward, true);
        let snap = engine.tick();
        assert_eq!(snap.status, Status::Won);
        assert_eq!(snap.progress_pct, 100);

        // Terminal: further input is ignored
        let before = engine.session().clone();
        engine.tick();
        engine.dash();
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn test_reaching_goal_loops_in_continuous_mode() {
        let rules = Rules::with_mode(Mode::Continuous);
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().set_x(TRACK_GOAL_X - 1.0, &rules);
        engine.session_mut().score = 40.0;
        engine.set_movement(Direction::Forward, true);
        let snap = engine.tick();

        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.progress_pct, 0);
        assert_eq!(snap.laps, 1);
        assert!(snap.score > 40 + rules.lap_bonus as i64 - 1);
        assert!(snap.flow_message.is_some());
        assert_eq!(engine.session().position.x, TRACK_START_X);

        // The banner counts down on its own
        let ticks = rules.flow_message_ms / rules.tick_ms;
        for _ in 0..ticks {
            engine.tick();
        }
        assert!(engine.session().flow_message.is_none());
    }

    #[test]
    fn test_running_out_of_time_loses() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().time_left_ms = rules.tick_ms;
        let snap = engine.tick();
        assert_eq!(snap.status, Status::Lost);
        assert_eq!(snap.time_left_seconds, 0);
    }

    #[test]
    fn test_max_stubbornness_loses() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().stubbornness = rules.max_stubbornness - 1.0;
        engine.session_mut().active_distraction = Some(build_rain(&mut quiet_rng()));
        engine.dash();
        assert_eq!(engine.session().status, Status::Lost);
    }

    #[test]
    fn test_continuous_mode_has_no_loss() {
        let rules = Rules::with_mode(Mode::Continuous);
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().time_left_ms = 0;
        engine.session_mut().stubbornness = rules.max_stubbornness;
        let snap = engine.tick();
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.time_left_seconds, 0);
    }

    #[test]
    fn test_restart_replaces_everything() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().time_left_ms = rules.tick_ms;
        engine.session_mut().active_power_up = Some(PowerUp {
            kind: PowerUpKind::TimeBonus,
            pos: Vec2::new(900.0, TRACK_Y - POWER_UP_LIFT),
        });
        engine.tick();
        assert_eq!(engine.session().status, Status::Lost);

        let snap = engine.restart();
        assert_eq!(snap.status, Status::Playing);
        assert!(snap.power_up.is_none());
        assert_eq!(snap.time_left_seconds, 60);
        assert_eq!(engine.session(), &Session::restarted(&rules));
    }

    #[test]
    fn test_movement_commands_only_touch_intent() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules, quiet_rng());
        let before = engine.session().clone();
        engine.set_movement(Direction::Back, true);
        assert!(engine.session().movement.back);
        engine.clear_movement();
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn test_distraction_times_out() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().active_distraction = Some(build_rain(&mut quiet_rng()));
        let lifetime = DistractionCategory::Rain.lifetime_ms();

        let mut ticks = 0;
        while engine.session().active_distraction.is_some() {
            engine.tick();
            ticks += 1;
            assert!(ticks <= lifetime / rules.tick_ms + 1);
        }
        assert_eq!(engine.session().message, DistractionCategory::Rain.timeout_text());
        assert_eq!(engine.session().distraction_age_ms, 0);
    }

    #[test]
    fn test_cat_spawns_with_actor_and_leaves() {
        let rules = terminal();
        // spawn, category=cat, heading=same, no flip, no chase, then quiet
        let mut draws = vec![0.0, 0.1, 0.1, 0.9, 0.9];
        draws.extend(std::iter::repeat_n(0.99, 400));
        let mut engine = Engine::with_rng(rules.clone(), ScriptedRandom::new(draws));

        let snap = engine.tick();
        let view = snap.distraction.expect("cat distraction");
        assert_eq!(view.category, DistractionCategory::CatWalk);
        let cat = snap.obstacle.expect("cat actor");
        assert!(cat.x < 0.0);
        assert!(snap.message.starts_with("Distraction:"));
        assert!(engine.session().stubbornness > rules.start_stubbornness);

        // Distraction and actor vanish together
        for _ in 0..100 {
            engine.tick();
            let session = engine.session();
            if session.active_distraction.is_none() {
                assert!(session.mobile_obstacle.is_none());
                return;
            }
            assert!(session.mobile_obstacle.is_some());
        }
        panic!("cat distraction never cleared");
    }

    #[test]
    fn test_oncoming_cat_enters_from_the_right() {
        let rules = terminal();
        // spawn, category=cat, heading=opposite, no flip, no chase, then quiet
        let mut draws = vec![0.0, 0.1, 0.9, 0.9, 0.9];
        draws.extend(std::iter::repeat_n(0.99, 50));
        let mut engine = Engine::with_rng(rules, ScriptedRandom::new(draws));

        engine.tick();
        let cat = engine.session().mobile_obstacle.expect("cat actor");
        assert!(cat.pos.x > SCENE_WIDTH);
        assert!(cat.vel_x < 0.0);
    }

    #[test]
    fn test_cat_leaving_clears_distraction() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        let cat = build_cat_walk(&mut ScriptedRandom::new(vec![0.1, 0.9, 0.9]));
        engine.session_mut().active_distraction = Some(cat);
        let mut actor = MobileObstacle::entering(Direction::Forward, rules.obstacle_speed);
        actor.pos.x = SCENE_WIDTH + OBSTACLE_CULL_MARGIN - 1.0;
        engine.session_mut().mobile_obstacle = Some(actor);

        engine.tick();
        let session = engine.session();
        assert!(session.active_distraction.is_none());
        assert!(session.mobile_obstacle.is_none());
        assert_eq!(session.message, "The cat ran off-screen.");
    }

    /// Cat sighting that has whipped the dog into a forward chase
    fn chasing_cat_session(rules: &Rules, success_probability: f32) -> Session {
        let mut session = Session::new(rules);
        let mut cat = build_cat_walk(&mut ScriptedRandom::new(vec![0.1, 0.9, 0.1]));
        for option in cat.options.iter_mut() {
            option.success_probability = success_probability;
        }
        session.active_distraction = Some(cat);
        session.drive_velocity = 240.0;
        session.drive_factor = DriveFactor::external("cat");
        session
    }

    #[test]
    fn test_dismissing_distraction_resamples_drive() {
        let rules = terminal();
        let mut rng = quiet_rng();
        let session = chasing_cat_session(&rules, 1.0);
        let option_id = session.active_distraction.as_ref().unwrap().options[0].id.clone();

        let next = transition(&session, &Command::ChooseAction(option_id), &rules, &mut rng);
        assert!(next.active_distraction.is_none());
        assert_eq!(next.drive_factor.source, DriveSource::Internal);
        assert_ne!(next.drive_velocity, 240.0);

        // Quiet tick keeps the calm drive
        let after = transition(&next, &Command::Tick, &rules, &mut rng);
        assert_eq!(after.drive_factor.source, DriveSource::Internal);
        assert_eq!(after.drive_velocity, next.drive_velocity);
    }

    #[test]
    fn test_failed_option_keeps_distraction_drive() {
        let rules = terminal();
        let mut rng = quiet_rng();
        let session = chasing_cat_session(&rules, 0.0);
        let option_id = session.active_distraction.as_ref().unwrap().options[0].id.clone();

        let next = transition(&session, &Command::ChooseAction(option_id), &rules, &mut rng);
        assert!(next.active_distraction.is_some());
        assert_eq!(next.drive_factor, DriveFactor::external("cat"));
        assert_eq!(next.drive_velocity, 240.0);
    }

    #[test]
    fn test_forward_movement_scores_per_pixel() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().drive_velocity = 100.0;
        engine.set_movement(Direction::Forward, true);
        engine.tick();

        // Pull fades 300 -> 294 before the step, flat ground, no distraction
        let session = engine.session();
        let dx = session.position.x - TRACK_START_X;
        assert!((dx - 39.4).abs() < 1e-3);
        assert!((session.score - dx * rules.score_per_forward_px).abs() < 1e-4);
    }

    #[test]
    fn test_backward_movement_scores_nothing() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().set_x(500.0, &rules);
        engine.session_mut().drive_velocity = -100.0;
        engine.tick();

        let session = engine.session();
        assert!((session.position.x - 490.0).abs() < 1e-3);
        assert_eq!(session.score, 0.0);
    }

    #[test]
    fn test_stubbornness_accrues_while_distracted() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.tick();
        assert_eq!(engine.session().stubbornness, rules.start_stubbornness);

        engine.session_mut().active_distraction = Some(build_rain(&mut quiet_rng()));
        let per_tick = rules.passive_stubbornness_per_second * rules.tick_seconds();
        for k in 1..=5 {
            engine.tick();
            let expected = rules.start_stubbornness + per_tick * k as f32;
            assert!((engine.session().stubbornness - expected).abs() < 1e-4);
        }
        assert!((per_tick - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_holding_both_keys_lets_pull_recover() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().pull_speed = 200.0;
        engine.set_movement(Direction::Forward, true);
        engine.set_movement(Direction::Back, true);
        engine.tick();

        let expected = 200.0 + rules.pull_recover_per_second * rules.tick_seconds();
        assert!((engine.session().pull_speed - expected).abs() < 1e-4);
        assert_eq!(engine.session().position.x, TRACK_START_X);
    }

    #[test]
    fn test_unknown_option_returns_same_session() {
        let rules = terminal();
        let mut rng = quiet_rng();
        let mut session = Session::new(&rules);
        session.active_distraction = Some(build_rain(&mut quiet_rng()));
        let next = transition(&session, &Command::ChooseAction("nope".into()), &rules, &mut rng);
        assert_eq!(next, session);
    }

    #[test]
    fn test_dash_collects_power_up() {
        let rules = terminal();
        let mut engine = Engine::with_rng(rules.clone(), quiet_rng());
        engine.session_mut().active_power_up = Some(PowerUp {
            kind: PowerUpKind::TimeBonus,
            pos: Vec2::new(TRACK_START_X + rules.dash_distance, TRACK_Y - POWER_UP_LIFT),
        });
        let snap = engine.dash();
        assert!(snap.power_up.is_none());
        assert_eq!(snap.time_left_seconds, 64);
        assert_eq!(snap.score, (rules.dash_score + rules.power_up_score) as i64);
    }

    #[test]
    fn test_determinism() {
        let commands = [
            Command::SetMovement {
                direction: Direction::Forward,
                pressed: true,
            },
            Command::Tick,
            Command::Dash,
            Command::Tick,
            Command::ChooseAction("rain_tree".into()),
            Command::Tick,
        ];

        let run = |seed: u64| {
            let mut engine = Engine::new(seed, terminal());
            let mut snaps = Vec::new();
            for _ in 0..50 {
                for command in &commands {
                    snaps.push(engine.apply(command));
                }
            }
            snaps
        };

        assert_eq!(run(99_999), run(99_999));
    }

    #[test]
    fn test_scripted_determinism() {
        let run = || {
            let mut engine = Engine::with_rng(terminal(), ScriptedRandom::new(vec![0.3, 0.01, 0.7, 0.5]));
            (0..200).map(|_| engine.tick()).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
