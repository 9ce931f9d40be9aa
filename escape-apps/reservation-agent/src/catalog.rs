//!  Escape Reservation Agent
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Site Catalogs
//!
//! Known theme, branch and time-slot ids of the supported booking sites, as
//! listed on their reservation pages. Ids not listed here are still accepted
//! by the adapters; the catalogs only resolve names and catch obvious mismatches.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroWorldTheme {
    pub name: &'static str,
    pub weekday_id: &'static str,
    pub weekend_id: &'static str,
}

/// Zero World prices weekday and weekend sessions as separate theme PKs.
pub const ZERO_WORLD_THEMES: &[ZeroWorldTheme] = &[
    ZeroWorldTheme { name: "ALIVE", weekday_id: "51", weekend_id: "52" },
    ZeroWorldTheme { name: "사랑하는감", weekday_id: "54", weekend_id: "55" },
    ZeroWorldTheme { name: "깜방탈출", weekday_id: "56", weekend_id: "57" },
    ZeroWorldTheme { name: "NOX", weekday_id: "58", weekend_id: "59" },
    ZeroWorldTheme { name: "층간소음", weekday_id: "50", weekend_id: "51" },
];

pub const ZERO_WORLD_SLOTS: &[&str] = &[
    "11:00:00", "12:30:00", "14:00:00", "15:30:00", "17:00:00", "18:30:00", "20:00:00", "21:30:00",
];

/// Weekend pricing starts Friday 17:00 and runs through Sunday.
pub fn is_weekend_slot(date: NaiveDate, time: NaiveTime) -> bool {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => true,
        Weekday::Fri => time.hour() >= 17,
        _ => false,
    }
}

/// Resolve a Zero World theme name to the PK valid for that session.
pub fn zero_world_theme_id(name: &str, date: NaiveDate, time: NaiveTime) -> Option<&'static str> {
    let name = name.trim();
    let theme = ZERO_WORLD_THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))?;
    if is_weekend_slot(date, time) {
        Some(theme.weekend_id)
    } else {
        Some(theme.weekday_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarthEscapeBranch {
    pub id: &'static str,
    pub name: &'static str,
}

pub const EARTH_ESCAPE_BRANCHES: &[EarthEscapeBranch] = &[
    EarthEscapeBranch { id: "1", name: "대구점" },
    EarthEscapeBranch { id: "2", name: "홍대어드벤처점" },
    EarthEscapeBranch { id: "4", name: "홍대라스트시티점" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarthEscapeTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub branch: &'static str,
}

pub const EARTH_ESCAPE_THEMES: &[EarthEscapeTheme] = &[
    EarthEscapeTheme { id: "20", name: "잉카", branch: "1" },
    EarthEscapeTheme { id: "11", name: "우리 아빠", branch: "1" },
    EarthEscapeTheme { id: "6", name: "사명 : 투쟁의 노래", branch: "1" },
    EarthEscapeTheme { id: "5", name: "펭귄키우기", branch: "1" },
    EarthEscapeTheme { id: "3", name: "너의 겨울은 가고, 봄은 온다", branch: "1" },
    EarthEscapeTheme { id: "2", name: "만월 <<꿈을 훔치는 요괴>>", branch: "1" },
    EarthEscapeTheme { id: "1", name: "단디해라", branch: "1" },
    EarthEscapeTheme { id: "25", name: "PINOCCHIO(피노키오)", branch: "2" },
    EarthEscapeTheme { id: "23", name: "잔향", branch: "2" },
    EarthEscapeTheme { id: "18", name: "아몬 : 새벽을 여는 소년", branch: "2" },
    EarthEscapeTheme { id: "17", name: "퀘스트 : 여정의 시작", branch: "2" },
    EarthEscapeTheme { id: "9", name: "지난날을 잊었다", branch: "2" },
    EarthEscapeTheme { id: "8", name: "미스터리", branch: "2" },
];

pub const EARTH_ESCAPE_SLOTS: &[&str] = &[
    "10:00", "11:30", "13:00", "14:30", "16:00", "17:30", "19:00", "20:30", "22:00",
];

/// Whether `time` is one of the session start times the site lists
pub fn is_listed_slot(slots: &[&str], time: &str) -> bool {
    let time = time.trim();
    slots.iter().any(|slot| *slot == time)
}

pub fn earth_escape_theme(id: &str) -> Option<&'static EarthEscapeTheme> {
    EARTH_ESCAPE_THEMES.iter().find(|t| t.id == id.trim())
}

pub fn earth_escape_branch(id: &str) -> Option<&'static EarthEscapeBranch> {
    EARTH_ESCAPE_BRANCHES.iter().find(|b| b.id == id.trim())
}
