//! Resolving a player's response to the active distraction

use super::distraction::Effects;
use super::random::RandomSource;
use super::state::Session;
use crate::Rules;

/// What happened when an option was played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub option_id: String,
    pub succeeded: bool,
    pub dismissed: bool,
}

/// Apply an effect bundle, clamping every field it touches
pub fn apply_effects(session: &mut Session, effects: &Effects, rules: &Rules) {
    if let Some(points) = effects.progress.filter(|p| *p != 0.0) {
        let dx = crate::pixels_per_progress(rules.target_progress) * points;
        session.set_x(session.position.x + dx, rules);
        session.score = (session.score + points * rules.score_per_progress_point).max(0.0);
    }

    if let Some(points) = effects.stubbornness.filter(|p| *p != 0.0) {
        session.add_stubbornness(points, rules);
        if points < 0.0 {
            session.score += points.abs() * rules.score_per_stubbornness_point;
        }
    }

    if let Some(ms) = effects.time_ms.filter(|ms| *ms != 0) {
        session.add_time(ms as i64);
        if ms > 0 {
            session.score += ms as f32 / rules.time_ms_per_score;
        }
    }
}

/// Play `option_id` against the active distraction
///
/// Returns `None` (and leaves the session alone) when there is no active
/// distraction or it has no such option.
pub fn resolve_option(
    session: &mut Session,
    option_id: &str,
    rules: &Rules,
    rng: &mut dyn RandomSource,
) -> Option<Outcome> {
    let option = session.active_distraction.as_ref()?.option(option_id)?.clone();

    let succeeded = rng.chance(option.success_probability);
    let (text, effects) = if succeeded {
        (&option.success_text, &option.success_effects)
    } else {
        (&option.fail_text, &option.fail_effects)
    };
    session.message = text.clone();
    apply_effects(session, effects, rules);

    let dismissed =
        (succeeded && option.dismiss_on_success) || (!succeeded && option.dismiss_on_fail);
    if dismissed {
        session.clear_distraction();
    }

    log::debug!(
        "Option {} {} (p={:.2}){}",
        option.id,
        if succeeded { "succeeded" } else { "failed" },
        option.success_probability,
        if dismissed { ", distraction cleared" } else { "" }
    );

    Some(Outcome {
        option_id: option.id,
        succeeded,
        dismissed,
    })
}
