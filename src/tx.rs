use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Broadcast or query response for a single transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub txhash: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<MessageLog>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Event {
    pub fn new<'a>(kind: &str, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            kind: kind.into(),
            attributes: attributes
                .into_iter()
                .map(|(key, value)| EventAttribute {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }
}

impl TxResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Top level events, falling back to the per-message log events
    pub fn into_events(self) -> Vec<Event> {
        if !self.events.is_empty() {
            self.events
        } else {
            self.logs.into_iter().flat_map(|log| log.events).collect()
        }
    }
}
