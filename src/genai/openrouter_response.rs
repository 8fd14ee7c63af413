use serde::{Deserialize, Serialize};

/**
Response of the OpenRouter chat completions endpoint (OpenAI schema).
Only the fields this crate reads are modeled; unknown fields are ignored.
*/
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: Option<i64>,
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_completion_payload() {
        let payload = r#"{
            "id": "gen-1",
            "model": "mistralai/mistral-7b-instruct",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "{\"tipo\": \"gasto\", \"monto\": 30, \"categoria\": \"transporte\"}"
                    },
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 25, "total_tokens": 145}
        }"#;

        let response: OpenRouterResponse = serde_json::from_str(payload).unwrap();
        assert!(response.choices[0].message.content.contains("transporte"));
    }
}
