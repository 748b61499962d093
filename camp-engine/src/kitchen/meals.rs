//! Meal statistics and dining list
//!
//! Derived from occupied rooms joined to members by exact guest name.

use serde::{Deserialize, Serialize};
use shared::models::{Member, Room};
use std::collections::BTreeMap;

use crate::members::find_by_name;

/// Keyword in room notes → diet tag
const NOTE_DIET_KEYWORDS: [(&str, &str); 2] = [("素", "素食"), ("牛", "不吃牛")];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealStats {
    pub breakfast: u32,
    pub dinner: u32,
    /// Diet tag → number of rooms
    pub diets: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningEntry {
    pub room_code: String,
    pub guest_name: Option<String>,
    pub people: u32,
    /// `"{adults}大{children}小"`, or `預設` when falling back to capacity
    pub breakdown: String,
    pub tags: Vec<String>,
    pub notes: String,
}

fn note_tags(room: &Room) -> impl Iterator<Item = &'static str> + '_ {
    NOTE_DIET_KEYWORDS
        .into_iter()
        .filter(|(keyword, _)| room.notes.contains(keyword))
        .map(|(_, tag)| tag)
}

fn guest_member<'a>(room: &Room, members: &'a [Member]) -> Option<&'a Member> {
    room.current_guest_name.as_deref().and_then(|name| find_by_name(members, name))
}

pub fn meal_stats(rooms: &[Room], members: &[Member]) -> MealStats {
    let mut stats = MealStats::default();
    for room in rooms.iter().filter(|r| r.is_occupied()) {
        let people = room.headcount();
        stats.breakfast += people;
        stats.dinner += people;

        let mut tags: Vec<String> = guest_member(room, members)
            .map(|m| m.dietary_restrictions.clone())
            .unwrap_or_default();
        tags.extend(note_tags(room).map(str::to_string));
        tags.sort();
        tags.dedup();
        for tag in tags {
            *stats.diets.entry(tag).or_default() += 1;
        }
    }
    stats
}

fn breakdown(room: &Room) -> String {
    let adults = room.actual_adults.unwrap_or(0);
    let children = room.actual_children.unwrap_or(0);
    if adults > 0 || children > 0 {
        format!("{adults}大{children}小")
    } else {
        "預設".to_string()
    }
}

/// Per-room dining list, filtered by room code, guest name or tag
pub fn dining_list(rooms: &[Room], members: &[Member], search: &str) -> Vec<DiningEntry> {
    let term = search.trim();
    rooms
        .iter()
        .filter(|r| r.is_occupied())
        .map(|room| {
            let mut tags: Vec<String> = guest_member(room, members)
                .map(|m| m.dietary_restrictions.clone())
                .unwrap_or_default();
            for tag in note_tags(room) {
                let tag = format!("{tag} (備註)");
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
            DiningEntry {
                room_code: room.code.clone(),
                guest_name: room.current_guest_name.clone(),
                people: room.headcount(),
                breakdown: breakdown(room),
                tags,
                notes: room.notes.clone(),
            }
        })
        .filter(|entry| {
            term.is_empty()
                || entry.room_code.contains(term)
                || entry.guest_name.as_deref().is_some_and(|n| n.contains(term))
                || entry.tags.iter().any(|t| t.contains(term))
        })
        .collect()
}
