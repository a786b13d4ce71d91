use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

/// Instructions fixing the output budget and banning copy/lead-ins.
#[must_use]
pub fn system_instruction(max_length: usize, amplified: bool) -> String {
    let mut text = format!(
        "You write one-line summaries of blog posts. \
        ─────────────── RULES ─────────────── \
        1. The summary MUST be at most {max_length} characters long (count every character, \
           including punctuation; one CJK character counts as one). \
        2. Write in the same language as the article. \
        3. Paraphrase. Never copy a sentence or long phrase from the article verbatim. \
        4. Output ONLY the summary itself. Do not start with lead-ins such as \
           \"Summary:\", \"This article...\", \"The article states...\", \"In brief\", \
           \"摘要：\", \"本文介绍了\" or \"总之\". \
        5. Do not wrap the summary in quotation marks."
    );

    if amplified {
        text.push_str(
            " 6. Your previous answer copied the article word for word and was rejected. \
            Rephrase completely in your own words, using different vocabulary and sentence \
            structure from the source.",
        );
    }

    text
}

#[must_use]
pub fn build_prompt(content: &str, max_length: usize, amplified: bool) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(system_instruction(max_length, amplified)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(format!(
                "Summarize the following article in at most {max_length} characters:\n\n{content}"
            )),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_fixes_budget() {
        let text = system_instruction(42, false);
        assert!(text.contains("at most 42 characters"));
        assert!(!text.contains("previous answer"));
    }

    #[test]
    fn amplified_instruction_adds_rephrase_rule() {
        assert!(system_instruction(30, true).contains("previous answer copied"));
    }

    #[test]
    fn prompt_is_system_then_user_with_content() {
        let prompt = build_prompt("关于自卑与勇气", 30, false);
        assert_eq!(prompt.len(), 2);
        assert!(matches!(prompt[0].role, MessageRole::system));
        assert!(matches!(prompt[1].role, MessageRole::user));
        match &prompt[1].content {
            Content::Text(t) => assert!(t.ends_with("关于自卑与勇气")),
            Content::ImageUrl(_) => panic!("expected text content"),
        }
    }
}
