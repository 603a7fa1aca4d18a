//! Property tests over arbitrary command sequences

use proptest::prelude::*;

use super::random::seeded;
use super::state::{Direction, Session};
use super::tick::{Command, Engine, transition};
use crate::consts::*;
use crate::{Mode, Rules};

/// One player action; `Answer` plays the n-th option of whatever
/// distraction is active at that moment
#[derive(Debug, Clone)]
enum Step {
    Cmd(Command),
    Answer(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => Just(Step::Cmd(Command::Tick)),
        1 => Just(Step::Cmd(Command::Dash)),
        2 => (any::<bool>(), any::<bool>()).prop_map(|(forward, pressed)| {
            let direction = if forward { Direction::Forward } else { Direction::Back };
            Step::Cmd(Command::SetMovement { direction, pressed })
        }),
        1 => Just(Step::Cmd(Command::ClearMovement)),
        2 => (0usize..5).prop_map(Step::Answer),
        1 => Just(Step::Cmd(Command::ChooseAction("not_an_option".into()))),
        1 => Just(Step::Cmd(Command::Restart)),
    ]
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Terminal), Just(Mode::Continuous)]
}

fn to_command(step: &Step, session: &Session) -> Command {
    match step {
        Step::Cmd(command) => command.clone(),
        Step::Answer(index) => {
            let id = session
                .active_distraction
                .as_ref()
                .and_then(|d| d.options.get(*index))
                .map(|o| o.id.clone())
                .unwrap_or_default();
            Command::ChooseAction(id)
        }
    }
}

fn assert_invariants(session: &Session, rules: &Rules) {
    assert!((0.0..=rules.max_stubbornness).contains(&session.stubbornness));
    assert!((0.0..=rules.target_progress).contains(&session.progress));
    assert!((TRACK_START_X..=TRACK_GOAL_X).contains(&session.position.x));
    let derived = crate::progress_from_x(session.position.x, rules.target_progress);
    assert!((session.progress - derived).abs() < 1e-3);
    assert!(session.score >= 0.0);

    match &session.active_distraction {
        Some(d) => {
            if session.mobile_obstacle.is_some() {
                assert!(d.category.has_obstacle());
            }
            assert!(session.distraction_age_ms < d.category.lifetime_ms());
        }
        None => {
            assert!(session.mobile_obstacle.is_none());
            assert_eq!(session.distraction_age_ms, 0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold(
        seed in any::<u64>(),
        mode in mode(),
        steps in prop::collection::vec(step(), 1..600),
    ) {
        let rules = Rules::with_mode(mode);
        let mut rng = seeded(seed);
        let mut session = Session::new(&rules);
        assert_invariants(&session, &rules);

        for step in &steps {
            let command = to_command(step, &session);
            session = transition(&session, &command, &rules, &mut rng);
            assert_invariants(&session, &rules);
        }
    }

    #[test]
    fn prop_same_seed_same_snapshots(
        seed in any::<u64>(),
        mode in mode(),
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let run = || {
            let mut engine = Engine::new(seed, Rules::with_mode(mode));
            steps
                .iter()
                .map(|step| {
                    let command = to_command(step, engine.session());
                    engine.apply(&command)
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_finished_sessions_ignore_input(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..50),
    ) {
        let rules = Rules::with_mode(Mode::Terminal);
        let mut rng = seeded(seed);
        let mut session = Session::new(&rules);
        session.time_left_ms = 0;
        session = transition(&session, &Command::Tick, &rules, &mut rng);
        let finished = session.clone();
        prop_assert!(!finished.is_playing());

        for step in &steps {
            let command = to_command(step, &session);
            let next = transition(&session, &command, &rules, &mut rng);
            if command == Command::Restart {
                prop_assert!(next.is_playing());
            } else {
                prop_assert_eq!(&next, &finished);
            }
        }
    }

    #[test]
    fn prop_forward_never_passes_goal(seed in any::<u64>(), ticks in 1usize..3_000) {
        let rules = Rules::with_mode(Mode::Terminal);
        let mut rng = seeded(seed);
        let mut session = Session::new(&rules);
        session.time_left_ms = u32::MAX;
        session.movement.forward = true;

        for _ in 0..ticks {
            session = transition(&session, &Command::Tick, &rules, &mut rng);
            prop_assert!(session.position.x <= TRACK_GOAL_X);
            prop_assert!(session.progress <= rules.target_progress);
            if !session.is_playing() {
                break;
            }
        }
    }
}
