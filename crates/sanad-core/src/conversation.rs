//! Conversation history and prompt assembly

use chrono::{DateTime, Utc};
use sanad_llm::Message;
use serde::{Deserialize, Serialize};

/// Number of past turns included in each prompt
pub const DEFAULT_HISTORY_WINDOW: usize = 3;

/// Reply used when generation fails
pub const FALLBACK_REPLY: &str =
    "عذراً، حدث خطأ تقني. بس أنا هنا معاك، حاول مرة أخرى وحكيلي شنو في بالك.";

/// System instructions sent with every generation request
pub const SYSTEM_PROMPT: &str = "\
أنت معالج نفسي محترف تتكلم باللهجة العمانية وتفهم الثقافة الخليجية. تتحدث مع شخص يحتاج دعم نفسي.

المهارات العلاجية:
- استمع بانتباه وأظهر التعاطف
- اطرح أسئلة مفتوحة تساعد على فهم المشاعر
- استخدم أساليب العلاج المعرفي السلوكي المناسبة ثقافياً
- قدم خطوات عملية للتأقلم
- اعكس المشاعر بكلماتك لتبين إنك فاهم

الحساسية الثقافية:
- استخدم تعبيرات عمانية أصيلة مثل: شلونك، ما عليك، بإذن الله
- احترم القيم الإسلامية والعائلية
- اذكر الدعاء والتوكل على الله عند المناسبة
- راعِ ديناميكيات الأسرة الخليجية والضغوط الاجتماعية

أسلوب التواصل:
- كن دافئاً ومطمئناً وهادئاً
- خلّ الرد قصير من جملتين إلى أربع جمل
- اختم كل رد بسؤال واحد يشجع على مواصلة الحديث

تجنب تماماً:
- التشخيص الطبي أو وصف الأدوية
- النصائح المباشرة قبل فهم السياق
- التقليل من مشاعر الشخص أو الحكم عليها
- الردود الطويلة أو المعقدة
- الادعاء بأنك بديل عن العلاج النفسي المتخصص";

const CONTEXT_HEADER: &str = "سياق المحادثة السابقة:";
const USER_LABEL: &str = "المستخدم";
const THERAPIST_LABEL: &str = "المعالج";
const CURRENT_LABEL: &str = "المستخدم الآن يقول";
const REPLY_CUE: &str =
    "رد عليه كمعالج نفسي محترف باللهجة العمانية، مع طرح سؤال مناسب لمواصلة العلاج:\nالمعالج:";

// ============================================================================
// History
// ============================================================================

/// How a reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Generated reply
    Normal,
    /// Emergency script
    Crisis,
    /// Fallback after a generation failure
    Error,
}

impl ResponseType {
    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Crisis => "crisis",
            Self::Error => "error",
        }
    }
}

/// One exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said
    pub user: String,
    /// What the assistant replied
    pub assistant: String,
    /// How the reply was produced
    pub response_type: ResponseType,
    /// When the turn completed
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped now
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        assistant: impl Into<String>,
        response_type: ResponseType,
    ) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            response_type,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, unbounded list of turns for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Up to the last `n` turns, oldest first
    #[must_use]
    pub fn recent(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// All turns, oldest first
    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget every turn
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

// ============================================================================
// Prompt Builder
// ============================================================================

/// Deterministic prompt assembly for generation requests
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_prompt: String,
    window: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl PromptBuilder {
    /// Builder using the built-in system prompt
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            window,
        }
    }

    /// Replace the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Number of past turns included
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Body of the user message: recent context, then the current utterance
    #[must_use]
    pub fn user_prompt(&self, history: &ConversationHistory, utterance: &str) -> String {
        let mut prompt = String::new();

        let recent = history.recent(self.window);
        if !recent.is_empty() {
            prompt.push_str(CONTEXT_HEADER);
            prompt.push('\n');
            for turn in recent {
                prompt.push_str(&format!("{USER_LABEL}: {}\n", turn.user));
                prompt.push_str(&format!("{THERAPIST_LABEL}: {}\n", turn.assistant));
            }
            prompt.push('\n');
        }

        prompt.push_str(&format!("{CURRENT_LABEL}: {utterance}\n\n"));
        prompt.push_str(REPLY_CUE);
        prompt
    }

    /// System message followed by the assembled user message
    #[must_use]
    pub fn build(&self, history: &ConversationHistory, utterance: &str) -> Vec<Message> {
        vec![
            Message::system(self.system_prompt.clone()),
            Message::user(self.user_prompt(history, utterance)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanad_llm::MessageRole;

    fn history_of(n: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        for i in 0..n {
            history.push(ConversationTurn::new(
                format!("سؤال {i}"),
                format!("جواب {i}"),
                ResponseType::Normal,
            ));
        }
        history
    }

    #[test]
    fn test_recent_window() {
        let history = history_of(5);
        let recent = history.recent(3);

        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].user, "سؤال 2");
        assert_eq!(history.recent(10).len(), 5);
    }

    #[test]
    fn test_clear() {
        let mut history = history_of(2);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_prompt_without_history() {
        let prompt = PromptBuilder::default().user_prompt(&ConversationHistory::new(), "شلونك؟");

        assert!(!prompt.contains(CONTEXT_HEADER));
        assert!(prompt.starts_with("المستخدم الآن يقول: شلونك؟\n\n"));
        assert!(prompt.ends_with("المعالج:"));
    }

    #[test]
    fn test_prompt_includes_only_last_three_turns() {
        let prompt = PromptBuilder::default().user_prompt(&history_of(5), "وبعدين؟");

        assert!(prompt.starts_with(CONTEXT_HEADER));
        assert!(!prompt.contains("سؤال 1"));
        assert!(prompt.contains("المستخدم: سؤال 2\nالمعالج: جواب 2\n"));
        assert!(prompt.contains("سؤال 4"));
        assert_eq!(prompt.matches("المعالج: جواب").count(), 3);
    }

    #[test]
    fn test_build_messages() {
        let messages = PromptBuilder::new(1)
            .with_system_prompt("sys")
            .build(&history_of(2), "hi");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system("sys"));
        assert_eq!(messages[1].role, MessageRole::User);
        assert!(messages[1].content.contains("سؤال 1"));
        assert!(!messages[1].content.contains("سؤال 0"));
    }

    #[test]
    fn test_response_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResponseType::Crisis).unwrap(),
            "\"crisis\""
        );
    }
}
