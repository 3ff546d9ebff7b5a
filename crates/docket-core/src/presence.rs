//! Presence State
//!
//! Reducer for the case-scoped realtime channel. Advisory only: no ordering,
//! delivery or reconnection guarantees.

use serde::{Deserialize, Serialize};

use crate::event_bus::DocketEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceUser {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PresenceUser {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.user_id)
    }

    /// Up to two initials for the avatar bubble
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

fn default_true() -> bool {
    true
}

/// Server -> client message, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SocketEvent {
    UserJoined {
        user: PresenceUser,
    },
    UserLeft {
        user_id: String,
    },
    #[serde(alias = "presence_snapshot")]
    PresenceUpdate {
        users: Vec<PresenceUser>,
    },
    DeadlineUpdated {
        deadline_id: String,
        #[serde(default)]
        data: serde_json::Value,
    },
    DocumentUpdated {
        document_id: String,
    },
    Typing {
        user_id: String,
        #[serde(default)]
        user_name: Option<String>,
        #[serde(default = "default_true")]
        is_typing: bool,
    },
    Error {
        message: String,
    },
    #[serde(other)]
    Unknown,
}

/// Client -> server message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Typing { is_typing: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Offline,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Offline => "Offline",
            ConnectionStatus::Connecting => "Connecting…",
            ConnectionStatus::Connected => "Live",
            ConnectionStatus::Error => "Connection error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypingEntry {
    pub user_id: String,
    pub user_name: String,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresenceState {
    pub case_id: String,
    pub status: ConnectionStatus,
    pub users: Vec<PresenceUser>,
    pub last_error: Option<String>,
    typing: Vec<TypingEntry>,
    typing_timeout_ms: u64,
}

impl PresenceState {
    pub fn new(case_id: impl Into<String>, typing_timeout_ms: u64) -> Self {
        Self {
            case_id: case_id.into(),
            status: ConnectionStatus::Offline,
            users: Vec::new(),
            last_error: None,
            typing: Vec::new(),
            typing_timeout_ms,
        }
    }

    /// Status transition; leaving the connected state drops presence
    pub fn set_status(&mut self, status: ConnectionStatus) -> Option<DocketEvent> {
        if self.status == status {
            return None;
        }
        self.status = status;
        if status != ConnectionStatus::Connected {
            self.users.clear();
            self.typing.clear();
        }
        Some(DocketEvent::ConnectionChanged {
            case_id: self.case_id.clone(),
            status,
        })
    }

    pub fn go_offline(&mut self) -> Option<DocketEvent> {
        self.set_status(ConnectionStatus::Offline)
    }

    fn presence_changed(&self) -> Option<DocketEvent> {
        Some(DocketEvent::PresenceChanged {
            case_id: self.case_id.clone(),
            online: self.users.len(),
        })
    }

    /// Fold one server message into the state; returns what to relay on the bus
    pub fn apply(&mut self, event: SocketEvent, now_ms: u64) -> Option<DocketEvent> {
        match event {
            SocketEvent::UserJoined { user } => {
                match self.users.iter_mut().find(|u| u.user_id == user.user_id) {
                    Some(existing) => *existing = user,
                    None => self.users.push(user),
                }
                self.presence_changed()
            }
            SocketEvent::UserLeft { user_id } => {
                self.users.retain(|u| u.user_id != user_id);
                self.typing.retain(|t| t.user_id != user_id);
                self.presence_changed()
            }
            SocketEvent::PresenceUpdate { users } => {
                self.users = users;
                let online = &self.users;
                self.typing.retain(|t| online.iter().any(|u| u.user_id == t.user_id));
                self.presence_changed()
            }
            SocketEvent::DeadlineUpdated { deadline_id, .. } => Some(DocketEvent::DeadlineUpdated {
                case_id: self.case_id.clone(),
                deadline_id,
            }),
            SocketEvent::DocumentUpdated { document_id } => Some(DocketEvent::DocumentUpdated {
                case_id: self.case_id.clone(),
                document_id,
            }),
            SocketEvent::Typing { user_id, user_name, is_typing } => {
                self.typing.retain(|t| t.user_id != user_id);
                if is_typing {
                    let user_name = user_name
                        .or_else(|| {
                            self.users
                                .iter()
                                .find(|u| u.user_id == user_id)
                                .map(|u| u.display_name().to_string())
                        })
                        .unwrap_or_else(|| "Someone".to_string());
                    self.typing.push(TypingEntry {
                        user_id,
                        user_name,
                        expires_at_ms: now_ms + self.typing_timeout_ms,
                    });
                }
                None
            }
            SocketEvent::Error { message } => {
                tracing::warn!(case_id = %self.case_id, %message, "realtime channel reported an error");
                self.last_error = Some(message.clone());
                Some(DocketEvent::RealtimeError {
                    case_id: self.case_id.clone(),
                    message,
                })
            }
            SocketEvent::Unknown => {
                tracing::debug!(case_id = %self.case_id, "ignoring unrecognised realtime message");
                None
            }
        }
    }

    /// Drop typing indicators whose timeout passed; true if anything expired
    pub fn prune(&mut self, now_ms: u64) -> bool {
        let before = self.typing.len();
        self.typing.retain(|t| t.expires_at_ms > now_ms);
        self.typing.len() != before
    }

    pub fn typing(&self) -> &[TypingEntry] {
        &self.typing
    }

    pub fn online_count(&self) -> usize {
        self.users.len()
    }

    /// "Ana is typing…", "Ana and Ben are typing…", "3 people are typing…"
    pub fn typing_line(&self) -> Option<String> {
        match self.typing.as_slice() {
            [] => None,
            [one] => Some(format!("{} is typing…", one.user_name)),
            [a, b] => Some(format!("{} and {} are typing…", a.user_name, b.user_name)),
            many => Some(format!("{} people are typing…", many.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> PresenceUser {
        PresenceUser {
            user_id: id.to_string(),
            name: Some(name.to_string()),
            email: None,
        }
    }

    fn connected() -> PresenceState {
        let mut state = PresenceState::new("case-1", 3_000);
        state.set_status(ConnectionStatus::Connected);
        state
    }

    #[test]
    fn test_decode_messages() {
        let joined: SocketEvent = serde_json::from_str(r#"{"type":"user_joined","user":{"user_id":"u1","name":"Ana Li"}}"#).unwrap();
        assert_eq!(joined, SocketEvent::UserJoined { user: user("u1", "Ana Li") });

        let snapshot: SocketEvent = serde_json::from_str(r#"{"type":"presence_snapshot","users":[]}"#).unwrap();
        assert_eq!(snapshot, SocketEvent::PresenceUpdate { users: vec![] });

        let typing: SocketEvent = serde_json::from_str(r#"{"type":"typing","user_id":"u1"}"#).unwrap();
        assert!(matches!(typing, SocketEvent::Typing { is_typing: true, .. }));

        let unknown: SocketEvent = serde_json::from_str(r#"{"type":"cursor_moved","x":4}"#).unwrap();
        assert_eq!(unknown, SocketEvent::Unknown);
    }

    #[test]
    fn test_encode_client_message() {
        let json = serde_json::to_string(&ClientMessage::Typing { is_typing: false }).unwrap();
        assert_eq!(json, r#"{"type":"typing","is_typing":false}"#);
    }

    #[test]
    fn test_join_leave_relays_presence() {
        let mut state = connected();
        let event = state.apply(SocketEvent::UserJoined { user: user("u1", "Ana") }, 0);
        assert_eq!(event, Some(DocketEvent::PresenceChanged { case_id: "case-1".into(), online: 1 }));

        // Rejoin replaces instead of duplicating
        state.apply(SocketEvent::UserJoined { user: user("u1", "Ana B") }, 0);
        assert_eq!(state.online_count(), 1);
        assert_eq!(state.users[0].display_name(), "Ana B");

        state.apply(SocketEvent::UserLeft { user_id: "u1".into() }, 0);
        assert_eq!(state.online_count(), 0);
    }

    #[test]
    fn test_typing_expires_without_stop() {
        let mut state = connected();
        state.apply(SocketEvent::UserJoined { user: user("u1", "Ana") }, 0);
        state.apply(SocketEvent::Typing { user_id: "u1".into(), user_name: None, is_typing: true }, 1_000);
        assert_eq!(state.typing_line().as_deref(), Some("Ana is typing…"));

        assert!(!state.prune(3_999));
        assert!(state.prune(4_000));
        assert!(state.typing_line().is_none());
    }

    #[test]
    fn test_typing_stop_and_refresh() {
        let mut state = connected();
        let typing = |id: &str, name: &str, on: bool| SocketEvent::Typing {
            user_id: id.into(),
            user_name: Some(name.into()),
            is_typing: on,
        };
        state.apply(typing("u1", "Ana", true), 0);
        state.apply(typing("u2", "Ben", true), 0);
        assert_eq!(state.typing_line().as_deref(), Some("Ana and Ben are typing…"));

        // Refresh pushes the expiry out
        state.apply(typing("u1", "Ana", true), 2_500);
        state.prune(3_000);
        assert_eq!(state.typing().len(), 1);

        state.apply(typing("u1", "Ana", false), 3_100);
        assert!(state.typing().is_empty());
    }

    #[test]
    fn test_offline_clears_presence() {
        let mut state = connected();
        state.apply(SocketEvent::PresenceUpdate { users: vec![user("u1", "Ana"), user("u2", "Ben")] }, 0);
        assert_eq!(state.online_count(), 2);

        let event = state.go_offline();
        assert_eq!(event, Some(DocketEvent::ConnectionChanged { case_id: "case-1".into(), status: ConnectionStatus::Offline }));
        assert!(state.users.is_empty());
        assert!(state.go_offline().is_none());
    }

    #[test]
    fn test_update_events_relay_with_case() {
        let mut state = connected();
        let relayed = state.apply(SocketEvent::DeadlineUpdated { deadline_id: "d9".into(), data: serde_json::Value::Null }, 0);
        assert_eq!(relayed, Some(DocketEvent::DeadlineUpdated { case_id: "case-1".into(), deadline_id: "d9".into() }));

        let relayed = state.apply(SocketEvent::Error { message: "boom".into() }, 0);
        assert!(matches!(relayed, Some(DocketEvent::RealtimeError { .. })));
        assert_eq!(state.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(user("u", "ana maria lopez").initials(), "AM");
        let anon = PresenceUser { user_id: "u7".into(), name: None, email: None };
        assert_eq!(anon.initials(), "U");
    }
}
