//! Room code normalization
//!
//! Staff dictate or type codes with Chinese numerals (`尊一`, `水三`).
//! Each numeral character is replaced on its own: `一`..`九` become
//! `1`..`9` and `十` becomes `10`. There is no positional parsing, so
//! `十一` normalizes to `101`, not `11`.

/// Replace Chinese numerals with ASCII digits, character by character
pub fn normalize_room_code(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match numeral_digit(ch) {
            Some(digit) => out.push_str(digit),
            None => out.push(ch),
        }
    }
    out
}

fn numeral_digit(ch: char) -> Option<&'static str> {
    let digit = match ch {
        '一' => "1",
        '二' => "2",
        '三' => "3",
        '四' => "4",
        '五' => "5",
        '六' => "6",
        '七' => "7",
        '八' => "8",
        '九' => "9",
        '十' => "10",
        _ => return None,
    };
    Some(digit)
}
