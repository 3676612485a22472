use super::*;
use sanad_llm::{MessageRole, MockProvider};

fn session_with(provider: MockProvider) -> TherapistSession {
    TherapistSession::new(Arc::new(Lexicon::omani()), Arc::new(provider))
}

#[tokio::test]
async fn test_crisis_turn_skips_generator() {
    let provider = MockProvider::new();
    let mut session = session_with(provider.clone());

    let outcome = session.respond("والله تعبت من الحياة، أريد أموت").await;

    assert_eq!(outcome.response_type, ResponseType::Crisis);
    assert_eq!(outcome.reply, EMERGENCY_SCRIPT);
    assert!(outcome.detection.is_crisis);
    assert!(outcome.validation.is_none());
    assert_eq!(provider.call_count(), 0);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().turns()[0].response_type, ResponseType::Crisis);
}

#[tokio::test]
async fn test_normal_turn_is_generated_and_scored() {
    let provider = MockProvider::new();
    provider.add_response("  ما عليك، بإذن الله الأمور راح تتحسن. شنو اللي مضايقك؟  ");
    let mut session = session_with(provider.clone());

    let outcome = session.respond("أنا قلقان من الشغل").await;

    assert_eq!(outcome.response_type, ResponseType::Normal);
    assert_eq!(outcome.reply, "ما عليك، بإذن الله الأمور راح تتحسن. شنو اللي مضايقك؟");
    let validation = outcome.validation.unwrap();
    assert!(validation.cultural_appropriateness);
    assert!(validation.omani_authenticity > 0.9);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_request_carries_sampling_settings() {
    let provider = MockProvider::new();
    let mut session = session_with(provider.clone()).with_model("gemini-2.5-flash");

    session.respond("شلونك؟").await;

    let request = &provider.requests()[0];
    assert_eq!(request.model, "gemini-2.5-flash");
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.top_p, Some(0.8));
    assert_eq!(request.top_k, Some(40));
    assert_eq!(request.max_tokens, Some(200));
    assert_eq!(request.messages[0].role, MessageRole::System);
}

#[tokio::test]
async fn test_generator_failure_yields_fallback() {
    let mut session = session_with(MockProvider::failing());

    let outcome = session.respond("الشغل صاير ثقيل علي").await;

    assert_eq!(outcome.response_type, ResponseType::Error);
    assert_eq!(outcome.reply, FALLBACK_REPLY);
    assert!(outcome.validation.is_none());
    assert_eq!(session.history().turns()[0].assistant, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_prompt_uses_last_three_turns() {
    let provider = MockProvider::new();
    let mut session = session_with(provider.clone());

    for i in 0..4 {
        provider.add_response(format!("رد {i}"));
        session.respond(&format!("رسالة {i}")).await;
    }
    session.respond("آخر رسالة").await;

    let requests = provider.requests();
    let last = &requests[4].messages[1].content;
    assert!(!last.contains("رسالة 0"));
    assert!(last.contains("رسالة 1"));
    assert!(last.contains("رد 3"));
    assert!(last.contains("المستخدم الآن يقول: آخر رسالة"));
}

#[tokio::test]
async fn test_crisis_turns_still_enter_context() {
    let provider = MockProvider::new();
    let mut session = session_with(provider.clone());

    session.respond("ما عاد فيني أعيش").await;
    session.respond("شلونك؟").await;

    let content = &provider.requests()[0].messages[1].content;
    assert!(content.contains("ما عاد فيني أعيش"));
    assert!(content.contains("+968-2205-5555"));
}

#[tokio::test]
async fn test_custom_window_and_clear() {
    let provider = MockProvider::new();
    let mut session = session_with(provider.clone()).with_history_window(1);

    session.respond("أول").await;
    session.respond("ثاني").await;
    session.respond("ثالث").await;

    let content = &provider.requests()[2].messages[1].content;
    assert!(!content.contains("أول"));
    assert!(content.contains("ثاني"));

    session.clear_history();
    assert!(session.history().is_empty());
}
