use crate::config::RaceConfig;
use crate::crash::crashed;
use crate::field::Field;
use crate::rng::RandomSource;
use crate::utils::analytics::RaceStats;
use tracing::{debug, info};

/// Result of a contested pair that ended without a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contest {
    SkillPass,
    Defended,
}

/// Runs one overtaking sweep over the field, back-markers attacking the car
/// directly ahead of them, from P2 down to the last car.
pub fn resolve_passes<R: RandomSource>(
    field: &mut Field,
    config: &RaceConfig,
    rng: &mut R,
    stats: &mut RaceStats,
) {
    let mut attacker = 1;
    while attacker < field.len() {
        attacker = resolve_pair(field, attacker, config, rng, stats);
    }
}

/// Resolves the attacker at `attacker` against the car directly ahead.
/// Returns the index of the next attacker to look at.
fn resolve_pair<R: RandomSource>(
    field: &mut Field,
    attacker: usize,
    config: &RaceConfig,
    rng: &mut R,
    stats: &mut RaceStats,
) -> usize {
    let defender = attacker - 1;
    let cars = field.cars();
    let (Some(defender_time), Some(attacker_time)) =
        (cars[defender].race_time, cars[attacker].race_time)
    else {
        return attacker + 1;
    };
    let gap = defender_time - attacker_time;

    if gap > config.pass_threshold {
        debug!(
            attacker = %cars[attacker].car_number,
            defender = %cars[defender].car_number,
            gap,
            "clean pass"
        );
        complete_pass(field, attacker, config, stats);
        return attacker + 1;
    }
    if gap < 0.0 {
        return attacker + 1;
    }

    if gap.abs() <= config.crash_threshold {
        let attacker_crashed = crashed(attacker_time, defender_time, config, rng);
        let defender_crashed = crashed(defender_time, attacker_time, config, rng);
        if attacker_crashed || defender_crashed {
            return resolve_crash(
                field,
                attacker,
                attacker_crashed,
                defender_crashed,
                rng,
                stats,
            );
        }
    }

    match contest(field, attacker, gap, config) {
        Contest::SkillPass => {
            debug!(
                attacker = %field.cars()[attacker].car_number,
                defender = %field.cars()[defender].car_number,
                gap,
                "pass on driver skill"
            );
            complete_pass(field, attacker, config, stats);
        }
        Contest::Defended => {
            let defender_time = defender_time + config.defender_penalty;
            field.car_mut(defender).race_time = Some(defender_time);
            // the attacker is placed relative to the defender's penalized time
            field.car_mut(attacker).race_time = Some(defender_time + config.attacker_penalty);
            stats.record_failed_passes(1);
            debug!(
                attacker = %field.cars()[attacker].car_number,
                defender = %field.cars()[defender].car_number,
                gap,
                "attack defended"
            );
        }
    }
    attacker + 1
}

fn contest(field: &Field, attacker: usize, gap: f64, config: &RaceConfig) -> Contest {
    let cars = field.cars();
    if gap < config.skill_threshold
        && cars[attacker].driver_skill > cars[attacker - 1].driver_skill
    {
        Contest::SkillPass
    } else {
        Contest::Defended
    }
}

/// Retires whoever crashed and tells the sweep where to continue, since the
/// retired cars drop to the back of the field.
fn resolve_crash<R: RandomSource>(
    field: &mut Field,
    attacker: usize,
    attacker_crashed: bool,
    defender_crashed: bool,
    rng: &mut R,
    stats: &mut RaceStats,
) -> usize {
    let defender = attacker - 1;
    let cars = field.cars();
    info!(
        attacker = %cars[attacker].car_number,
        defender = %cars[defender].car_number,
        attacker_crashed,
        defender_crashed,
        "crash while fighting for position"
    );

    let mut leader_out = false;
    match (attacker_crashed, defender_crashed) {
        (true, true) => {
            let attacker_number = cars[attacker].car_number.clone();
            leader_out |= field.retire(defender, rng);
            if let Some(index) = field.index_of(&attacker_number) {
                leader_out |= field.retire(index, rng);
            }
            stats.record_failed_passes(2);
        }
        (true, false) => {
            leader_out |= field.retire(attacker, rng);
            stats.record_failed_passes(1);
        }
        (false, true) => {
            leader_out |= field.retire(defender, rng);
            stats.record_failed_passes(1);
        }
        (false, false) => return attacker + 1,
    }
    stats.record_crash(leader_out);

    // the cars behind moved up, so the slot is looked at again with a new pair
    if defender_crashed {
        defender.max(1)
    } else {
        attacker
    }
}

/// Swaps the attacker forward and keeps it going while it is clearly
/// quicker than the next car ahead.
fn complete_pass(field: &mut Field, attacker: usize, config: &RaceConfig, stats: &mut RaceStats) {
    stats.record_pass(attacker == 1);
    field.swap_with_car_ahead(attacker);
    cascade(field, attacker - 1, config, stats);
}

fn cascade(field: &mut Field, mut index: usize, config: &RaceConfig, stats: &mut RaceStats) {
    while index > 0 {
        let cars = field.cars();
        let (Some(ahead_time), Some(own_time)) = (cars[index - 1].race_time, cars[index].race_time)
        else {
            return;
        };
        let gap = ahead_time - own_time;
        if gap > config.pass_threshold {
            debug!(
                attacker = %cars[index].car_number,
                defender = %cars[index - 1].car_number,
                gap,
                "pass carried on"
            );
            stats.record_pass(index == 1);
            field.swap_with_car_ahead(index);
            index -= 1;
            continue;
        }
        if (0.0..=config.pass_threshold).contains(&gap) {
            // near miss, the aggressive move costs time
            field.car_mut(index).add_time(config.skill_threshold);
        }
        return;
    }
}
