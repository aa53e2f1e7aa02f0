//! Action representation: a closed set of named moves per game.
//!
//! The transport hands the engine an action *name* and a JSON *payload*.
//! Each game declares its actions as one serde enum, adjacently tagged so
//! the wire form is `{"name": "...", "payload": ...}`; decoding rejects any
//! name outside the declared set.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::InvalidAction;
use super::player::PlayerId;

/// A game's closed action set.
pub trait GameAction: Clone + std::fmt::Debug + Serialize + DeserializeOwned {
    /// Every action name the game accepts.
    const NAMES: &'static [&'static str];

    /// The wire name of this action.
    fn name(&self) -> &'static str;

    /// Decode a transport submission into a typed action.
    fn decode(name: &str, payload: &Value) -> Result<Self, InvalidAction> {
        if !Self::NAMES.contains(&name) {
            return Err(InvalidAction::UnknownAction {
                name: name.to_string(),
            });
        }

        let mut envelope = Map::new();
        envelope.insert("name".to_string(), Value::String(name.to_string()));
        if !payload.is_null() {
            envelope.insert("payload".to_string(), payload.clone());
        }

        serde_json::from_value(Value::Object(envelope)).map_err(|e| {
            InvalidAction::MalformedPayload {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// An accepted action with metadata for the history log.
///
/// Used for:
/// - Auditing who did what, in which turn
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position in the game's sequence of accepted actions.
    pub sequence: u32,
}

impl<A> ActionRecord<A> {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: A, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "name", content = "payload", rename_all = "camelCase")]
    enum Probe {
        Knock,
        Point(usize),
        Say { words: String },
    }

    impl GameAction for Probe {
        const NAMES: &'static [&'static str] = &["knock", "point", "say"];

        fn name(&self) -> &'static str {
            match self {
                Probe::Knock => "knock",
                Probe::Point(_) => "point",
                Probe::Say { .. } => "say",
            }
        }
    }

    #[test]
    fn test_decode_unit_action() {
        assert_eq!(Probe::decode("knock", &Value::Null), Ok(Probe::Knock));
    }

    #[test]
    fn test_decode_newtype_payload() {
        assert_eq!(Probe::decode("point", &json!(4)), Ok(Probe::Point(4)));
    }

    #[test]
    fn test_decode_struct_payload() {
        assert_eq!(
            Probe::decode("say", &json!({ "words": "hi" })),
            Ok(Probe::Say { words: "hi".into() })
        );
    }

    #[test]
    fn test_decode_unknown_name() {
        assert_eq!(
            Probe::decode("shout", &Value::Null),
            Err(InvalidAction::UnknownAction { name: "shout".into() })
        );
    }

    #[test]
    fn test_decode_malformed_payload() {
        let err = Probe::decode("point", &json!("four")).unwrap_err();
        assert!(matches!(err, InvalidAction::MalformedPayload { ref name, .. } if name == "point"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_name_matches_declared_set() {
        for probe in [Probe::Knock, Probe::Point(0), Probe::Say { words: String::new() }] {
            assert!(Probe::NAMES.contains(&probe.name()));
        }
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(PlayerId::new("p1"), Probe::Point(2), 3, 7);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord<Probe> = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
