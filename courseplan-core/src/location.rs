//! Picks the room a lesson row is held in on a given day.

use crate::schedule_text::parse_blocks;

/// Location of a lesson on `day`.
///
/// `schedule_text` and `rooms` are parallel `;`-separated lists. The rooms
/// of the blocks held on `day` are returned, deduplicated and joined with
/// `", "`. When no block can be tied to `day` every distinct room is listed.
pub fn format_location(schedule_text: &str, rooms: &str, day: u32) -> String {
    let blocks = parse_blocks(schedule_text);
    let rooms: Vec<&str> = rooms.split(';').map(str::trim).collect();

    let on_day: Vec<&str> = blocks
        .iter()
        .zip(rooms.iter())
        .filter(|(block, _)| block.as_ref().is_some_and(|b| b.day == day))
        .map(|(_, room)| *room)
        .collect();

    if on_day.iter().any(|room| !room.is_empty()) {
        join_distinct(on_day)
    } else {
        join_distinct(rooms)
    }
}

fn join_distinct<'a>(rooms: impl IntoIterator<Item = &'a str>) -> String {
    let mut distinct: Vec<&str> = Vec::new();
    for room in rooms {
        if !room.is_empty() && !distinct.contains(&room) {
            distinct.push(room);
        }
    }
    distinct.join(", ")
}
