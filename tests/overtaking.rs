use race_weekend::car::{Car, ParkedCar};
use race_weekend::config::RaceConfig;
use race_weekend::field::Field;
use race_weekend::overtake::resolve_passes;
use race_weekend::rng::ScriptedSource;
use race_weekend::utils::analytics::RaceStats;

const EPSILON: f64 = 1e-9;

fn car_at(number: &str, position: usize, race_time: f64, driver_skill: f64) -> Car {
    let parked = ParkedCar::new(number, "Driver", "Team").with_driver_skill(driver_skill);
    let mut car = Car::from_parked_car(&parked, position, &RaceConfig::default());
    car.race_time = Some(race_time);
    car
}

fn no_crashes() -> RaceConfig {
    RaceConfig {
        crash_base_factor: 0.0,
        ..RaceConfig::default()
    }
}

fn numbers(field: &Field) -> Vec<&str> {
    field.cars().iter().map(|c| c.car_number.as_str()).collect()
}

fn time_of(field: &Field, number: &str) -> Option<f64> {
    field
        .cars()
        .iter()
        .find(|c| c.car_number == number)
        .and_then(|c| c.race_time)
}

#[test]
fn pass_carries_through_several_cars() {
    let mut field = Field::new(vec![
        car_at("1", 1, 10.5, 5.0),
        car_at("2", 2, 11.0, 5.0),
        car_at("3", 3, 12.0, 5.0),
        car_at("4", 4, 13.0, 5.0),
        car_at("5", 5, 10.3, 5.0),
    ])
    .unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["1", "5", "2", "3", "4"]);
    assert_eq!(field.cars()[1].position, 2);
    assert_eq!(stats.successful_passes, 3);
    assert_eq!(stats.lead_changes, 0);
    assert_eq!(stats.unsuccessful_passes, 0);

    // near miss against the leader costs the attacker, the leader is untouched
    let config = RaceConfig::default();
    assert!((time_of(&field, "5").unwrap() - (10.3 + config.skill_threshold)).abs() < EPSILON);
    assert!((time_of(&field, "1").unwrap() - 10.5).abs() < EPSILON);
    assert!((time_of(&field, "2").unwrap() - 11.0).abs() < EPSILON);
}

#[test]
fn cascade_without_near_miss_has_no_penalty() {
    let mut field = Field::new(vec![
        car_at("1", 1, 10.0, 5.0),
        car_at("2", 2, 11.0, 5.0),
        car_at("3", 3, 10.3, 5.0),
    ])
    .unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["1", "3", "2"]);
    assert!((time_of(&field, "3").unwrap() - 10.3).abs() < EPSILON);
    assert_eq!(stats.successful_passes, 1);
}

#[test]
fn clean_pass_for_the_lead_counts_a_lead_change() {
    let mut field = Field::new(vec![car_at("a", 1, 11.0, 5.0), car_at("b", 2, 10.0, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["b", "a"]);
    assert_eq!(stats.successful_passes, 1);
    assert_eq!(stats.lead_changes, 1);
}

#[test]
fn defender_holds_and_both_lose_time() {
    let config = no_crashes();
    let mut field = Field::new(vec![car_at("d", 1, 10.3, 5.0), car_at("a", 2, 10.0, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &config, &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["d", "a"]);
    let defender = time_of(&field, "d").unwrap();
    let attacker = time_of(&field, "a").unwrap();
    assert!((defender - (10.3 + config.defender_penalty)).abs() < EPSILON);
    // attacker lands behind the defender's penalized time
    assert!((attacker - (defender + config.attacker_penalty)).abs() < EPSILON);
    assert_eq!(stats.unsuccessful_passes, 1);
    assert_eq!(stats.successful_passes, 0);
}

#[test]
fn better_driver_passes_in_a_close_fight() {
    let mut field = Field::new(vec![car_at("d", 1, 10.05, 5.0), car_at("a", 2, 10.0, 8.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &no_crashes(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["a", "d"]);
    assert!((time_of(&field, "a").unwrap() - 10.0).abs() < EPSILON);
    assert!((time_of(&field, "d").unwrap() - 10.05).abs() < EPSILON);
    assert_eq!(stats.successful_passes, 1);
    assert_eq!(stats.lead_changes, 1);
    assert_eq!(stats.unsuccessful_passes, 0);
}

#[test]
fn weaker_driver_is_held_off_in_a_close_fight() {
    let mut field = Field::new(vec![car_at("d", 1, 10.05, 8.0), car_at("a", 2, 10.0, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &no_crashes(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["d", "a"]);
    assert_eq!(stats.unsuccessful_passes, 1);
}

#[test]
fn both_cars_can_crash_out() {
    let mut field = Field::new(vec![
        car_at("leader", 1, 9.0, 5.0),
        car_at("d", 2, 10.3, 5.0),
        car_at("a", 3, 10.05, 5.0),
    ])
    .unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::new([0, 0]), &mut stats);

    assert_eq!(field.cars()[0].car_number, "leader");
    assert_eq!(field.running(), 1);
    for car in &field.cars()[1..] {
        assert_eq!(car.health, 0);
        assert!(car.race_time.is_none());
    }
    assert_eq!(stats.unsuccessful_passes, 2);
    assert_eq!(stats.crashes, 1);
    assert_eq!(stats.lead_changes, 0);
}

#[test]
fn attacker_alone_crashes() {
    let mut field = Field::new(vec![car_at("d", 1, 10.3, 5.0), car_at("a", 2, 10.05, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::new([0, 99]), &mut stats);

    assert_eq!(numbers(&field), vec!["d", "a"]);
    assert!(time_of(&field, "d").is_some());
    assert!(time_of(&field, "a").is_none());
    assert_eq!(stats.unsuccessful_passes, 1);
    assert_eq!(stats.crashes, 1);
    assert_eq!(stats.lead_changes, 0);
}

#[test]
fn leader_crashing_hands_over_the_lead() {
    let mut field = Field::new(vec![car_at("d", 1, 10.3, 5.0), car_at("a", 2, 10.05, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::new([99, 0]), &mut stats);

    assert_eq!(numbers(&field), vec!["a", "d"]);
    assert!(time_of(&field, "d").is_none());
    assert_eq!(field.cars()[1].position, 2);
    assert_eq!(stats.crashes, 1);
    assert_eq!(stats.lead_changes, 1);
}

#[test]
fn car_already_behind_on_time_is_left_alone() {
    let mut field = Field::new(vec![car_at("a", 1, 10.0, 5.0), car_at("b", 2, 10.4, 9.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &RaceConfig::default(), &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["a", "b"]);
    assert!((time_of(&field, "a").unwrap() - 10.0).abs() < EPSILON);
    assert!((time_of(&field, "b").unwrap() - 10.4).abs() < EPSILON);
    assert_eq!(stats, RaceStats::default());
}

#[test]
fn gap_exactly_at_pass_threshold_is_a_fight() {
    let config = no_crashes();
    let mut field = Field::new(vec![car_at("d", 1, 10.5, 5.0), car_at("a", 2, 10.0, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &config, &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["d", "a"]);
    assert_eq!(stats.successful_passes, 0);
    assert_eq!(stats.unsuccessful_passes, 1);
    assert!((time_of(&field, "d").unwrap() - (10.5 + config.defender_penalty)).abs() < EPSILON);
}

#[test]
fn dead_heat_is_a_fight() {
    let config = no_crashes();
    let mut field = Field::new(vec![car_at("d", 1, 10.0, 5.0), car_at("a", 2, 10.0, 5.0)]).unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &config, &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["d", "a"]);
    assert_eq!(stats.unsuccessful_passes, 1);
    let defender = time_of(&field, "d").unwrap();
    assert!((defender - (10.0 + config.defender_penalty)).abs() < EPSILON);
    assert!((time_of(&field, "a").unwrap() - (defender + config.attacker_penalty)).abs() < EPSILON);
}

#[test]
fn cascade_stopping_exactly_at_pass_threshold_pays_the_near_miss() {
    let config = RaceConfig::default();
    let mut field = Field::new(vec![
        car_at("1", 1, 10.5, 5.0),
        car_at("2", 2, 11.0, 5.0),
        car_at("3", 3, 10.0, 5.0),
    ])
    .unwrap();
    let mut stats = RaceStats::new();

    resolve_passes(&mut field, &config, &mut ScriptedSource::default(), &mut stats);

    assert_eq!(numbers(&field), vec!["1", "3", "2"]);
    assert_eq!(stats.successful_passes, 1);
    assert!((time_of(&field, "3").unwrap() - (10.0 + config.skill_threshold)).abs() < EPSILON);
    assert!((time_of(&field, "1").unwrap() - 10.5).abs() < EPSILON);
}
