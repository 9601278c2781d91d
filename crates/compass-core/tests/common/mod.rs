#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use compass_core::{
    CompassError, GenerationRequest, PlanGenerator, PlanGeneratorBuilder, PlanService, Result,
    UserPreferences, ValidationMode,
};
use serde_json::json;

/// Fake generation backend that counts requests and replays canned replies.
#[derive(Default)]
pub struct CountingService {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl CountingService {
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|r| r.prompt.clone())
    }
}

#[async_trait]
impl PlanService for CountingService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(full_plan_json()))
    }
}

pub fn generator(service: Arc<CountingService>, validation: ValidationMode) -> Arc<PlanGenerator> {
    Arc::new(
        PlanGeneratorBuilder::new()
            .with_model("gemini-test")
            .with_validation(validation)
            .with_service(service)
            .build()
            .expect("Failed to build generator"),
    )
}

pub fn preferences() -> UserPreferences {
    UserPreferences::new("Maya", "Launch my pottery studio")
        .with_struggle("Too many side projects")
}

pub fn rejection() -> CompassError {
    CompassError::Api {
        status: 500,
        message: "internal".to_string(),
    }
}

/// A complete plan payload honouring every field of the response contract.
pub fn full_plan_json() -> String {
    let days: Vec<_> = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        .iter()
        .map(|day| json!({"day": day, "focus": "Studio", "keyTask": format!("{day} task")}))
        .collect();

    json!({
        "morningRoutine": [
            {"time": "6:30 AM", "activity": "Walk", "description": "Twenty minutes outside", "focus": "Body"}
        ],
        "afternoonRoutine": [
            {"time": "1:00 PM", "activity": "Throw pots", "description": "Three pieces", "focus": "Career"}
        ],
        "eveningRoutine": [
            {"time": "9:00 PM", "activity": "Journal", "description": "One page", "focus": "Mind"}
        ],
        "habits": [
            {"habit": "Single-tasking", "frequency": "Daily", "benefit": "Fewer open loops"}
        ],
        "weeklyGoals": ["Sign the lease", "Order a kiln", "List first pieces"],
        "growthMindsetTip": "Finished beats flawless.",
        "weeklySchedule": days,
    })
    .to_string()
}
