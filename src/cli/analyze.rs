//! One-shot detector and validator commands

use crate::config::{load_config, load_lexicon};
use anyhow::Result;
use sanad_core::{crisis_guidance, CrisisDetector, CulturalValidator, ValidationContext};

/// `sanad detect`
pub fn detect(text: &str, json: bool) -> Result<()> {
    let config = load_config()?;
    let detector = CrisisDetector::new(load_lexicon(&config.crisis)?);
    let result = detector.detect(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Crisis:     {}", if result.is_crisis { "yes" } else { "no" });
    println!("Severity:   {} ({})", result.severity_level, result.severity_score);
    println!("Confidence: {:.1}", result.confidence);
    if !result.detected_keywords.is_empty() {
        println!("Keywords:   {}", result.detected_keywords.join("، "));
        println!("\n{}", crisis_guidance(result.severity_level));
    }
    Ok(())
}

/// `sanad validate`
pub fn validate(text: &str, context: &str, json: bool) -> Result<()> {
    let config = load_config()?;
    let validator = CulturalValidator::new(load_lexicon(&config.crisis)?);
    let context = ValidationContext::from(context);
    let result = validator.validate(text, &context);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Context:       {}", context);
    println!("Overall:       {:.2}", result.overall_score);
    println!("Authenticity:  {:.2}", result.omani_authenticity);
    println!("Religious:     {:.2}", result.religious_sensitivity);
    println!(
        "Appropriate:   {}",
        if result.cultural_appropriateness { "yes" } else { "no" }
    );
    if !result.inappropriate_content.is_empty() {
        println!("Flagged:       {}", result.inappropriate_content.join("، "));
    }
    for rec in &result.recommendations {
        println!("  - {}", rec);
    }
    Ok(())
}
