//! Quick-command mini-language
//!
//! `"201 202+1, 尊一-1"`: room codes separated by whitespace or commas,
//! each optionally followed by `+d` / `-d` to adjust extra guests.
//! Parsing is pure: it stages intents against the current rooms and
//! reports per-token successes and failures. Nothing is applied here.

use regex::Regex;
use shared::error::{AppError, ErrorCode};
use shared::models::{Room, RoomStatus};
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

use super::normalizer::normalize_room_code;
use super::registry;
use super::transition::{DEFAULT_GUEST_NAME, GuestFields, RoomIntent, clamp_extra_guests};

/// Non-greedy code, optional single-digit adjustment. `201+12` has no
/// valid adjustment suffix and is read as the code `201+12`.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)(?:([+-])(\d))?$").expect("valid token pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    CheckIn,
    CheckOut,
}

/// Staged result of a quick command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    /// `(room_id, intent)` in token order, one per room
    pub updates: Vec<(String, RoomIntent)>,
    pub successes: Vec<String>,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command is empty")]
    Empty,

    #[error("No applicable update: {}", failures.join(", "))]
    NothingToApply { failures: Vec<String> },
}

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Empty => AppError::new(ErrorCode::CommandEmpty),
            CommandError::NothingToApply { failures } => {
                AppError::with_message(ErrorCode::CommandNothingApplied, "No applicable update")
                    .with_detail("failures", failures)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjustment {
    Add(i32),
    Sub(i32),
}

impl Adjustment {
    fn render(&self) -> String {
        match self {
            Adjustment::Add(n) => format!("+{n}"),
            Adjustment::Sub(n) => format!("-{n}"),
        }
    }
}

/// Split one token into `(raw_code, adjustment)`
fn split_token(token: &str) -> Option<(&str, Option<Adjustment>)> {
    let caps = TOKEN_PATTERN.captures(token)?;
    let raw = caps.get(1)?.as_str();
    let adjustment = match (caps.get(2), caps.get(3)) {
        (Some(op), Some(digit)) => {
            let n: i32 = digit.as_str().parse().ok()?;
            Some(if op.as_str() == "+" {
                Adjustment::Add(n)
            } else {
                Adjustment::Sub(n)
            })
        }
        _ => None,
    };
    Some((raw, adjustment))
}

/// Parse a quick command against the current rooms.
///
/// Returns [`CommandError::NothingToApply`] when every token failed, so
/// the caller always knows whether anything is about to change.
pub fn parse_quick_command(
    rooms: &[Room],
    input: &str,
    mode: CommandMode,
) -> Result<CommandOutcome, CommandError> {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(CommandError::Empty);
    }

    let mut outcome = CommandOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for token in tokens {
        let Some((raw, adjustment)) = split_token(token) else {
            outcome.failures.push(format!("{token} (格式錯誤)"));
            continue;
        };

        let code = normalize_room_code(raw);
        let Some(room) = registry::find_by_code(rooms, &code) else {
            outcome.failures.push(format!("{raw} (無此房號)"));
            continue;
        };

        // first occurrence wins, later ones are silently dropped
        if seen.contains(&room.id) {
            continue;
        }

        match mode {
            CommandMode::CheckIn => {
                if !matches!(room.status, RoomStatus::Vacant | RoomStatus::Occupied) {
                    outcome
                        .failures
                        .push(format!("{code} (狀態: {}，無法入住)", room.status.label()));
                    continue;
                }

                let base = if room.is_occupied() {
                    i32::from(room.extra_guests)
                } else {
                    0
                };
                let extra = clamp_extra_guests(match adjustment {
                    Some(Adjustment::Add(n)) => base + n,
                    Some(Adjustment::Sub(n)) => base - n,
                    None => base,
                });
                let guest_name = room
                    .current_guest_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GUEST_NAME.to_string());

                let fields = GuestFields::named(guest_name).with_extra(i32::from(extra));
                outcome.updates.push((room.id.clone(), RoomIntent::CheckIn(fields)));
                let op = adjustment.map(|a| a.render()).unwrap_or_default();
                outcome.successes.push(format!("{code}{op} (加人:{extra})"));
            }
            CommandMode::CheckOut => {
                if !room.is_occupied() {
                    outcome.failures.push(format!("{code} (非入住中，無法退房)"));
                    continue;
                }
                outcome.updates.push((room.id.clone(), RoomIntent::AwaitStrip));
                outcome.successes.push(code.clone());
            }
        }
        seen.insert(room.id.clone());
    }

    if outcome.updates.is_empty() {
        tracing::warn!(failures = ?outcome.failures, "Quick command produced no update");
        return Err(CommandError::NothingToApply {
            failures: outcome.failures,
        });
    }
    Ok(outcome)
}
