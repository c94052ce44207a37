//! Parsing of the human readable schedule strings.
//!
//! The registrar publishes schedules as text such as
//! `星期一第1-2节{1-8(单),10周};星期三第3-4节{1-16周}`. The data pipeline turns
//! the week and period parts into bitmasks; the location formatter needs the
//! day of each block to pick the right room.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(星期[一二三四五六日天])\s*第?\s*([\d,~\-]+)\s*节\s*\{([^}]*)\}").unwrap()
});

static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:\s*[-~]\s*(\d+))?$").unwrap());

/// One `;`-separated block of a schedule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    /// 1 = Monday .. 7 = Sunday
    pub day: u32,
    /// Period part without the trailing `节`, e.g. `1-2`
    pub periods: String,
    /// Week part, e.g. `1-8(单),10周`
    pub weeks: String,
}

impl ScheduleBlock {
    pub fn week_mask(&self) -> u64 {
        week_mask(&self.weeks)
    }

    pub fn period_mask(&self) -> u64 {
        period_mask(&self.periods)
    }
}

/// `星期一` .. `星期日` to 1..7.
pub fn parse_day_name(name: &str) -> Option<u32> {
    let day = match name.trim().strip_prefix("星期")? {
        "一" => 1,
        "二" => 2,
        "三" => 3,
        "四" => 4,
        "五" => 5,
        "六" => 6,
        "日" | "天" => 7,
        _ => return None,
    };
    Some(day)
}

/// Parse one block. Returns None when it does not look like a schedule.
pub fn parse_block(text: &str) -> Option<ScheduleBlock> {
    let caps = BLOCK_REGEX.captures(text)?;
    Some(ScheduleBlock {
        day: parse_day_name(&caps[1])?,
        periods: caps[2].to_string(),
        weeks: caps[3].to_string(),
    })
}

/// Split a schedule string on `;`, keeping the position of unparsable blocks.
pub fn parse_blocks(text: &str) -> Vec<Option<ScheduleBlock>> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(';').map(parse_block).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    All,
    Odd,
    Even,
}

impl Parity {
    fn keeps(self, n: u32) -> bool {
        match self {
            Parity::All => true,
            Parity::Odd => n % 2 == 1,
            Parity::Even => n % 2 == 0,
        }
    }
}

/// Bitmask of a week list such as `1-4,7-10周` or `1-15(单)周`.
///
/// Bit 0 is week 1. `单` keeps the odd weeks of a range, `双` the even ones.
/// Parts that do not parse are ignored.
pub fn week_mask(text: &str) -> u64 {
    text.replace('周', "")
        .split(',')
        .map(|part| {
            let parity = if part.contains('单') {
                Parity::Odd
            } else if part.contains('双') {
                Parity::Even
            } else {
                Parity::All
            };
            range_mask(&strip_modifiers(part), parity)
        })
        .fold(0, |acc, bits| acc | bits)
}

/// Bitmask of a period list such as `1-3节`. Bit 0 is period 1.
pub fn period_mask(text: &str) -> u64 {
    text.replace('节', "")
        .split(',')
        .map(|part| range_mask(part, Parity::All))
        .fold(0, |acc, bits| acc | bits)
}

fn strip_modifiers(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut depth = 0usize;
    for c in part.chars() {
        match c {
            '(' | '（' => depth += 1,
            ')' | '）' => depth = depth.saturating_sub(1),
            '单' | '双' => {}
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn range_mask(part: &str, parity: Parity) -> u64 {
    let Some(caps) = RANGE_REGEX.captures(part.trim()) else {
        return 0;
    };
    let Ok(start) = caps[1].parse::<u32>() else {
        return 0;
    };
    let end = match caps.get(2) {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(end) => end,
            Err(_) => return 0,
        },
        None => start,
    };

    (start..=end)
        .filter(|n| (1..=64).contains(n) && parity.keeps(*n))
        .fold(0, |acc, n| acc | 1u64 << (n - 1))
}
