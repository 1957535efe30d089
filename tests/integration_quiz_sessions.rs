use std::collections::HashSet;

use assert_matches::assert_matches;
use rand::{rngs::StdRng, SeedableRng};

use ionquiz::{
    catalog::{Catalog, Tag},
    engine::{Phase, QuizEngine},
    error::QuizError,
    session::{Feedback, QuestionCount, QuizMode, QuizSession, SessionConfig},
};

fn engine(seed: u64) -> QuizEngine<StdRng> {
    QuizEngine::with_rng(Catalog::builtin().unwrap(), StdRng::seed_from_u64(seed))
}

#[test]
fn builtin_catalog_shape() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.len(), 35);
    assert_eq!(catalog.entries_by_tag(Tag::Cation).len(), 17);
    assert_eq!(catalog.entries_by_tag(Tag::Anion).len(), 18);
    assert_eq!(catalog.entries_by_tag(Tag::Compound).len(), 13);

    let formulas = catalog.all_formulas();
    assert_eq!(formulas.first(), Some(&"H^+"));
    assert_eq!(formulas.last(), Some(&"MnO_4^-"));

    for entry in catalog.entries() {
        assert!(!entry.accepted_names.is_empty(), "{}", entry.formula);
    }
}

#[test]
fn sessions_are_permutations_of_the_mode() {
    let catalog = Catalog::builtin().unwrap();
    for seed in 0..20 {
        let mut engine = engine(seed);
        for mode in [QuizMode::Cations, QuizMode::Anions, QuizMode::CompoundIons] {
            engine.select_mode(mode);
            let session = engine.session().unwrap();

            let asked: HashSet<&str> = session.questions().iter().map(String::as_str).collect();
            let expected: HashSet<&str> = mode.candidates(&catalog).into_iter().collect();
            assert_eq!(asked.len(), session.total(), "no repeats");
            assert_eq!(asked, expected);
        }
    }
}

#[test]
fn limited_all_ions_sessions_have_distinct_questions() {
    for seed in 0..20 {
        let mut engine = engine(seed);
        engine.select_mode(QuizMode::AllIons);
        engine
            .select_question_count(QuestionCount::Limit(10))
            .unwrap();

        let session = engine.session().unwrap();
        let asked: HashSet<&String> = session.questions().iter().collect();
        assert_eq!(asked.len(), 10);
        for formula in session.questions() {
            assert!(engine.catalog().lookup(formula).is_ok());
        }
    }
}

#[test]
fn oversized_count_is_clamped() {
    let mut engine = engine(1);
    engine.configure(SessionConfig::new(
        QuizMode::AllIons,
        QuestionCount::Limit(500),
    ));
    assert_eq!(engine.progress(), Some((0, 35)));
}

#[test]
fn every_accepted_name_is_correct() {
    let catalog = Catalog::builtin().unwrap();
    for entry in catalog.entries() {
        for name in &entry.accepted_names {
            let config = SessionConfig::new(QuizMode::AllIons, QuestionCount::All);
            let mut session = QuizSession::with_questions(config, vec![entry.formula.clone()]);

            let padded = format!("  {}  ", name.to_uppercase());
            let record = session.submit_answer(&catalog, &padded).unwrap().unwrap();
            assert!(record.is_correct, "{} / {}", entry.formula, name);
        }
    }
}

#[test]
fn permanganate_variants() {
    let catalog = Catalog::builtin().unwrap();
    let config = SessionConfig::new(QuizMode::CompoundIons, QuestionCount::All);

    for answer in ["permanganate", "Manganate(VII)", "manganate (vii)"] {
        let mut session = QuizSession::with_questions(config, vec!["MnO_4^-".to_string()]);
        let record = session.submit_answer(&catalog, answer).unwrap().unwrap();
        assert!(record.is_correct, "{answer}");
        assert_eq!(record.canonical_answer, "permanganate");
    }

    let mut session = QuizSession::with_questions(config, vec!["MnO_4^-".to_string()]);
    let record = session.submit_answer(&catalog, "manganate").unwrap().unwrap();
    assert!(!record.is_correct);
    assert_eq!(
        session.take_feedback(),
        Some(Feedback::Incorrect {
            formula: "MnO_4^-".to_string(),
            canonical: "permanganate".to_string(),
        })
    );
}

#[test]
fn score_matches_history() {
    let mut engine = engine(5);
    engine.select_mode(QuizMode::Anions);

    let mut turn = 0;
    while !engine.is_complete() {
        let answer = if turn % 2 == 0 {
            let formula = engine.current_formula().unwrap();
            engine
                .catalog()
                .lookup(formula)
                .unwrap()
                .canonical_name()
                .to_string()
        } else {
            "chloride-ish".to_string()
        };
        engine.submit_answer(&answer).unwrap();
        turn += 1;

        let correct = engine.history().iter().filter(|r| r.is_correct).count();
        assert_eq!(engine.score(), Some(correct));
        let (index, _) = engine.progress().unwrap();
        assert_eq!(index, engine.history().len());
    }

    let report = engine.report().unwrap();
    assert_eq!(report.total_questions, 18);
    assert_eq!(report.final_score, 9);
    assert_eq!(report.percentage, 50.0);
}

#[test]
fn zero_question_session_reports_zero_percent() {
    let mut engine = engine(2);
    engine.select_mode(QuizMode::AllIons);
    engine.select_question_count(QuestionCount::Limit(0)).unwrap();

    assert!(engine.is_complete());
    assert_eq!(engine.current_formula(), None);
    let report = engine.report().unwrap();
    assert_eq!((report.final_score, report.total_questions), (0, 0));
    assert_eq!(report.percentage, 0.0);
    assert_eq!(
        engine.submit_answer("sodium"),
        Err(QuizError::SessionComplete)
    );
}

#[test]
fn reset_then_new_mode() {
    let mut engine = engine(8);
    engine.select_mode(QuizMode::Cations);
    engine.submit_answer("hydrogen").unwrap();
    engine.reset();
    assert_matches!(engine.phase(), Phase::ModeSelection);

    engine.select_mode(QuizMode::CompoundIons);
    assert_eq!(engine.progress(), Some((0, 13)));
    assert!(engine.history().is_empty());
}
