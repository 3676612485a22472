use sanad_core::{CrisisDetector, CulturalValidator, Lexicon};
use sanad_eval::{
    crisis_cases, cultural_cases, run_crisis_accuracy, run_cultural_suite, scenarios,
    ScenarioSuite,
};
use std::sync::Arc;

#[test]
fn suites_share_one_lexicon() {
    let lexicon = Arc::new(Lexicon::omani());

    let accuracy = run_crisis_accuracy(&CrisisDetector::new(Arc::clone(&lexicon)), &crisis_cases());
    let cultural = run_cultural_suite(&CulturalValidator::new(Arc::clone(&lexicon)), &cultural_cases());
    let performance = ScenarioSuite::new(lexicon).run(&scenarios());

    assert_eq!(accuracy.metrics.false_negatives, 0);
    assert_eq!(cultural.summary.passed_tests, 4);
    assert_eq!(performance.summary.failed_tests, 0);
}

#[test]
fn narrower_lexicon_changes_the_outcome() {
    let lexicon = Arc::new(
        Lexicon::from_toml_str(
            r#"
crisis_keywords = ["أريد أموت"]

[expressions]
greetings = ["شلونك؟"]
"#,
        )
        .unwrap(),
    );

    let accuracy = run_crisis_accuracy(&CrisisDetector::new(Arc::clone(&lexicon)), &crisis_cases());
    assert_eq!(accuracy.metrics.false_positives, 0);
    assert!(accuracy.metrics.false_negatives > 0);

    let performance = ScenarioSuite::new(lexicon).run(&scenarios());
    assert_eq!(performance.crisis_routing.routed, 1);
}
