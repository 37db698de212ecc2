use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub ok: bool,
    pub message: String,
}

impl Health {
    pub fn up(message: impl Into<String>) -> Self {
        Self { ok: true, message: message.into() }
    }
}

/// Plain `{ "message": ... }` confirmation body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_as_single_field() {
        let v = serde_json::to_value(Message::new("hola")).unwrap();
        assert_eq!(v, serde_json::json!({"message": "hola"}));
    }

    #[test]
    fn health_serializes_ok_flag() {
        let v = serde_json::to_value(Health::up("arriba")).unwrap();
        assert_eq!(v["ok"], true);
        assert_eq!(v["message"], "arriba");
    }
}
