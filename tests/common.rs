use std::collections::{BTreeSet, VecDeque};
use std::sync::Mutex;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use smartissues::enums::ai_provider_error::AiProviderError;
use smartissues::enums::issue_state::IssueState;
use smartissues::enums::provider_kind::ProviderKind;
use smartissues::structs::issue::Issue;
use smartissues::traits::ai_provider::AiProvider;

pub fn issue(number: u64, updated_days_ago: i64) -> Issue {
    let now = Utc::now();
    Issue {
        number,
        title: format!("Issue number {}", number),
        body: format!("Body of issue {}", number),
        state: IssueState::Open,
        created_at: now - Duration::days(updated_days_ago + 10),
        updated_at: now - Duration::days(updated_days_ago),
        author: "octocat".to_string(),
        labels: BTreeSet::from(["bug".to_string()]),
        assignees: vec![],
        milestone: None,
        comments_count: 0,
        recent_comments: vec![],
        url: format!("https://github.com/octo/repo/issues/{}", number),
    }
}

/// Replays canned replies in order and records every user prompt it saw.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, AiProviderError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, AiProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for ScriptedProvider {
    async fn complete(&self, _system_prompt: &str, user_prompt: &str, _max_tokens: u32) -> Result<String, AiProviderError> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiProviderError::ApiError("script exhausted".to_string())))
    }

    async fn ping(&self) -> bool {
        true
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }
}

pub fn reply(category: &str, priority: &str, effort: &str) -> Result<String, AiProviderError> {
    Ok(serde_json::json!({
        "category": category,
        "priority": priority,
        "summary": format!("{} {} issue", priority, category),
        "suggested_labels": [category],
        "estimated_effort": effort,
        "key_points": ["point"],
        "related_topics": [],
        "action_items": ["do the thing"],
        "blockers": [],
    })
    .to_string())
}
