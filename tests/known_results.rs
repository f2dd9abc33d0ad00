use rustc_hash::FxHashSet;

use signal_phases::core::movement::{Movement, AHEADS};
use signal_phases::core::signal::SignalState::{MajorGreen, MinorGreen, Red};
use signal_phases::model::ConflictModel;
use signal_phases::rules::Validator;
use signal_phases::space::parallel::classify_all_parallel;
use signal_phases::space::{enumerate_all, partition, Classified};
use signal_phases::{classify, Phase, Verdict, PHASE_COUNT};

#[test]
fn enumeration_is_exhaustive_and_split_is_39_safe() {
    assert_eq!(PHASE_COUNT, 531_441);

    let mut seen: FxHashSet<Phase> = FxHashSet::default();
    let mut safe = 0usize;
    let mut unsafe_ = 0usize;
    for (expected_index, c) in enumerate_all().enumerate() {
        assert_eq!(c.index, expected_index);
        assert!(seen.insert(c.phase), "duplicate phase {}", c.phase);
        match c.verdict {
            Verdict::Safe => safe += 1,
            Verdict::Unsafe => unsafe_ += 1,
        }
    }
    assert_eq!(seen.len(), PHASE_COUNT);
    assert_eq!(safe + unsafe_, PHASE_COUNT);
    assert_eq!(safe, 39);
    assert_eq!(unsafe_, 531_402);

    let split = partition();
    assert_eq!(split.safe.len(), 39);
    assert_eq!(split.total(), PHASE_COUNT);
}

#[test]
fn enumeration_restarts_identically() {
    assert!(enumerate_all().eq(enumerate_all()));
}

#[test]
fn parallel_classification_matches_enumeration() {
    let par = classify_all_parallel(Validator::standard());
    let seq: Vec<Classified> = enumerate_all().collect();
    assert_eq!(par.len(), PHASE_COUNT);
    assert_eq!(par, seq);
}

#[test]
fn classify_is_deterministic() {
    for c in enumerate_all().step_by(997) {
        assert_eq!(classify(&c.phase), c.verdict);
        assert_eq!(classify(&c.phase), classify(&c.phase));
    }
}

#[test]
fn any_minor_green_through_is_unsafe() {
    for c in enumerate_all() {
        if AHEADS.iter().any(|&m| c.phase.state(m) == MinorGreen) {
            assert_eq!(c.verdict, Verdict::Unsafe, "{}", c.phase);
        }
    }
}

#[test]
fn shared_lane_mismatch_is_unsafe() {
    let model = ConflictModel::standard();
    for c in enumerate_all() {
        let mismatch = model
            .shared_lanes()
            .iter()
            .any(|&(right, ahead)| c.phase.is_active(right) != c.phase.is_active(ahead));
        if mismatch {
            assert_eq!(c.verdict, Verdict::Unsafe, "{}", c.phase);
        }
    }
}

#[test]
fn all_red_is_safe() {
    assert_eq!(classify(&Phase::ALL_RED), Verdict::Safe);
    assert_eq!(classify(&Phase::new([Red; 12])), Verdict::Safe);
}

#[test]
fn perpendicular_throughs_are_unsafe() {
    let p = Phase::from_assignments(&[
        (Movement::NorthSouth, MajorGreen),
        (Movement::EastWest, MajorGreen),
    ]);
    assert_eq!(classify(&p), Verdict::Unsafe);
}

#[test]
fn minor_left_depends_on_its_through() {
    let without: Phase = "rrrrrrrrgrrr".parse().unwrap();
    assert_eq!(without.state(Movement::SouthWest), MinorGreen);
    assert_eq!(classify(&without), Verdict::Unsafe);

    // S→N major green; its shared-lane right S→E must run with it.
    let with = without
        .with(Movement::SouthNorth, MajorGreen)
        .with(Movement::SouthEast, MajorGreen);
    assert_eq!(classify(&with), Verdict::Safe);

    let filtered_right = with.with(Movement::SouthEast, MinorGreen);
    assert_eq!(classify(&filtered_right), Verdict::Safe);
}

#[test]
fn opposing_throughs_with_their_rights_are_safe() {
    let p = Phase::from_assignments(&[
        (Movement::NorthSouth, MajorGreen),
        (Movement::SouthNorth, MajorGreen),
        (Movement::SouthEast, MajorGreen),
        (Movement::NorthWest, MinorGreen),
    ]);
    assert_eq!(p.encode(), "GrGrGrgrrrrr");
    assert_eq!(classify(&p), Verdict::Safe);

    // Adding either left turn puts it against the oncoming through.
    for left in [Movement::SouthWest, Movement::NorthEast] {
        for s in [MajorGreen, MinorGreen] {
            assert_eq!(classify(&p.with(left, s)), Verdict::Unsafe, "{left} {s:?}");
        }
    }
}

#[test]
fn safe_phases_show_at_most_one_green_per_departure_lane() {
    let validator = Validator::standard();
    let groups = validator.model().lane_groups();
    assert_eq!(groups.len(), 4);
    for c in enumerate_all().filter(|c| c.verdict.is_safe()) {
        for group in groups {
            let active = group
                .members
                .iter()
                .filter(|&&m| c.phase.is_active(m))
                .count();
            assert!(active <= 1, "{} lane {:?}", c.phase, group.arrival);
        }
        assert!(c.phase.active_movements().count() <= groups.len(), "{}", c.phase);
    }
}
