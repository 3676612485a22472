use super::*;

#[test]
fn test_omani_lexicon_is_valid() {
    let lexicon = Lexicon::omani();
    assert!(lexicon.validate().is_ok());
    assert_eq!(lexicon.crisis_keywords().len(), 25);
}

#[test]
fn test_short_forms_appended_after_full_list() {
    let lexicon = Lexicon::omani();
    let keywords = lexicon.crisis_keywords();

    assert_eq!(keywords[0], "انتحار");
    assert_eq!(keywords[23], "أموت");
    assert_eq!(keywords[24], "ما فيني أعيش");
}

#[test]
fn test_tier_table() {
    let lexicon = Lexicon::omani();

    assert_eq!(lexicon.tier_of("أبي أموت"), SeverityTier::VeryHigh);
    assert_eq!(lexicon.tier_of("أخلص من الحياة"), SeverityTier::High);
    assert_eq!(lexicon.tier_of("انتهيت"), SeverityTier::Medium);
    assert_eq!(lexicon.tier_of("خلاص تعبت"), SeverityTier::Low);
    assert_eq!(lexicon.tier_of("أموت"), SeverityTier::Low);
}

#[test]
fn test_tier_scores_are_ordered() {
    assert!(SeverityTier::VeryHigh > SeverityTier::High);
    assert!(SeverityTier::High > SeverityTier::Medium);
    assert!(SeverityTier::Medium > SeverityTier::Low);
    assert_eq!(SeverityTier::Low.score(), 4);
    assert_eq!(SeverityTier::VeryHigh.score(), 10);
}

#[test]
fn test_expression_hits_double_count_overlapping_categories() {
    let lexicon = Lexicon::omani();
    let hits = lexicon.expression_hits("بإذن الله");

    // supportive_expressions + religious_context
    assert_eq!(hits, vec!["بإذن الله", "بإذن الله"]);
    assert_eq!(lexicon.religious_hits("بإذن الله"), 1);
}

#[test]
fn test_inappropriate_hits() {
    let lexicon = Lexicon::omani();
    let hits = lexicon.inappropriate_hits("حرام عليك تحس كذا، هذا عيب منك");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].concern, ConcernGroup::ReligiousInsensitivity);
    assert_eq!(hits[1].phrase, "هذا عيب");
}

#[test]
fn test_from_toml() {
    let text = r#"
crisis_keywords = ["انتحار", "تعبانة"]

[[severity]]
keyword = "انتحار"
tier = "very_high"

[expressions]
greetings = ["هلا"]
religious_context = ["الحمد لله"]

[[inappropriate]]
phrase = "عندك اكتئاب"
concern = "medical_advice"
"#;

    let lexicon = Lexicon::from_toml_str(text).unwrap();
    assert_eq!(lexicon.crisis_keywords().len(), 2);
    assert_eq!(lexicon.tier_of("انتحار"), SeverityTier::VeryHigh);
    assert_eq!(lexicon.tier_of("تعبانة"), SeverityTier::Low);
    assert_eq!(lexicon.expressions(ExpressionCategory::Greetings), ["هلا"]);
    assert!(lexicon.expressions(ExpressionCategory::LocalTerms).is_empty());
    assert_eq!(lexicon.religious_hits("الحمد لله على كل حال"), 1);
}

#[test]
fn test_rejects_empty_keyword_list() {
    let err = Lexicon::from_toml_str("crisis_keywords = []").unwrap_err();
    assert!(matches!(err, Error::Lexicon(_)));
}

#[test]
fn test_rejects_duplicate_keyword() {
    let err = Lexicon::from_toml_str(r#"crisis_keywords = ["أموت", "أموت"]"#).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_rejects_rule_for_unknown_keyword() {
    let text = r#"
crisis_keywords = ["أموت"]

[[severity]]
keyword = "انتحار"
tier = "high"
"#;
    assert!(Lexicon::from_toml_str(text).is_err());
}

#[test]
fn test_rejects_duplicate_severity_rule() {
    let text = r#"
crisis_keywords = ["انتحار"]

[[severity]]
keyword = "انتحار"
tier = "low"

[[severity]]
keyword = "انتحار"
tier = "very_high"
"#;
    let err = Lexicon::from_toml_str(text).unwrap_err();
    assert!(err.to_string().contains("duplicate severity rule: انتحار"));
}

#[test]
fn test_loaded_rules_drive_tiers() {
    let text = r#"
crisis_keywords = ["انتحار", "أموت"]

[[severity]]
keyword = "انتحار"
tier = "very_high"
"#;
    let lexicon = Lexicon::from_toml_str(text).unwrap();

    assert_eq!(lexicon.tier_of("انتحار"), SeverityTier::VeryHigh);
    assert_eq!(lexicon.tier_of("أموت"), SeverityTier::Low);
}

#[test]
fn test_rejects_empty_phrase() {
    let text = r#"
crisis_keywords = ["أموت"]

[expressions]
greetings = [""]
"#;
    assert!(Lexicon::from_toml_str(text).is_err());
}

#[test]
fn test_load_missing_file() {
    let err = Lexicon::load("/nonexistent/lexicon.toml").unwrap_err();
    assert!(err.to_string().contains("lexicon.toml"));
}
