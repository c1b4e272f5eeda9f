//! Reminder instant generation and matching.
//!
//! Everything here is pure minute-of-day arithmetic; the decision engine
//! turns the generated instants into actual notifications. An instant
//! "matches" an engine run when it has already passed, no more than the
//! lookback window ago, so a run delayed by a stalled scheduler still
//! picks up recently missed instants without backfilling the whole day.

use shared::time::{format_minute_of_day, wrap_minutes, wrapped_forward_diff, MINUTES_PER_DAY};

use crate::config::ExitWaveConfig;

/// One reminder instant for a scheduled entry time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryCandidate {
    pub minute_of_day: u32,
    /// True for the early reminder sent ahead of the entry time.
    pub is_lead: bool,
}

impl EntryCandidate {
    /// "HH:MM" label this candidate is logged under.
    pub fn label(&self) -> String {
        format_minute_of_day(self.minute_of_day)
    }
}

/// Reminder instants for an entry scheduled at `entry_minute`: one
/// `lead_minutes` ahead of time and one at the entry time itself.
///
/// The lead instant wraps through midnight (an 00:02 entry with a 5 minute
/// lead reminds at 23:57 the evening before). A zero lead collapses to the
/// single on-time instant.
pub fn entry_candidates(entry_minute: u32, lead_minutes: u32) -> Vec<EntryCandidate> {
    let entry_minute = entry_minute % MINUTES_PER_DAY;
    if lead_minutes == 0 {
        return vec![EntryCandidate {
            minute_of_day: entry_minute,
            is_lead: false,
        }];
    }
    vec![
        EntryCandidate {
            minute_of_day: wrap_minutes(i64::from(entry_minute) - i64::from(lead_minutes)),
            is_lead: true,
        },
        EntryCandidate {
            minute_of_day: entry_minute,
            is_lead: false,
        },
    ]
}

/// One exit reminder instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSlot {
    pub minute_of_day: u32,
    /// Civil-day shift of the wave this instant belongs to: -1 when the
    /// wave rolled past midnight, so the reminder is attributed to the
    /// originating day rather than the day it fires on.
    pub date_offset: i64,
}

impl ExitSlot {
    /// "HH:MM" label this slot is logged under.
    pub fn label(&self) -> String {
        format_minute_of_day(self.minute_of_day)
    }
}

/// A parsed exit wave: `repeats + 1` instants starting at `start_minute`,
/// spaced `interval_minutes` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitWave {
    pub start_minute: u32,
    pub interval_minutes: u32,
    pub repeats: u32,
}

impl ExitWave {
    /// Parse a configured wave. Returns None when the start time is not a
    /// valid "HH:MM", in which case the wave is skipped with a warning.
    pub fn from_config(config: &ExitWaveConfig) -> Option<ExitWave> {
        let start_minute = shared::time::parse_entry_minutes(&config.start)?;
        Some(ExitWave {
            start_minute,
            interval_minutes: config.interval_minutes,
            repeats: config.repeats,
        })
    }
}

/// Expand waves into their individual instants.
pub fn expand_exit_waves(waves: &[ExitWave]) -> Vec<ExitSlot> {
    let mut slots = Vec::new();
    for wave in waves {
        for k in 0..=wave.repeats {
            let raw = u64::from(wave.start_minute) + u64::from(k) * u64::from(wave.interval_minutes);
            slots.push(ExitSlot {
                minute_of_day: (raw % u64::from(MINUTES_PER_DAY)) as u32,
                date_offset: -((raw / u64::from(MINUTES_PER_DAY)) as i64),
            });
        }
    }
    slots
}

/// Whether a daily instant matches the current run: it has passed, and no
/// more than `lookback_minutes` ago.
pub fn slot_matches(now_minute: u32, slot_minute: u32, lookback_minutes: u32) -> bool {
    wrapped_forward_diff(now_minute, slot_minute) <= lookback_minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(start_minute: u32, interval: u32, repeats: u32) -> ExitWave {
        ExitWave {
            start_minute,
            interval_minutes: interval,
            repeats,
        }
    }

    #[test]
    fn test_entry_candidates_lead_and_on_time() {
        let candidates = entry_candidates(540, 5); // 09:00, 5 min lead
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].minute_of_day, 535);
        assert!(candidates[0].is_lead);
        assert_eq!(candidates[0].label(), "08:55");
        assert_eq!(candidates[1].minute_of_day, 540);
        assert!(!candidates[1].is_lead);
    }

    #[test]
    fn test_entry_candidates_zero_lead_collapses() {
        let candidates = entry_candidates(540, 0);
        assert_eq!(candidates.len(), 1);
        assert!(!candidates[0].is_lead);
    }

    #[test]
    fn test_entry_candidates_lead_wraps_midnight() {
        // 00:02 entry, 5 min lead -> 23:57 the previous evening.
        let candidates = entry_candidates(2, 5);
        assert_eq!(candidates[0].minute_of_day, 1437);
        assert_eq!(candidates[0].label(), "23:57");
    }

    #[test]
    fn test_exit_wave_expansion() {
        // 15:30 wave, every 30 min, 3 repeats: 15:30, 16:00, 16:30, 17:00.
        let slots = expand_exit_waves(&[wave(930, 30, 3)]);
        assert_eq!(
            slots.iter().map(|s| s.minute_of_day).collect::<Vec<_>>(),
            vec![930, 960, 990, 1020]
        );
        assert!(slots.iter().all(|s| s.date_offset == 0));
    }

    #[test]
    fn test_exit_wave_rolls_past_midnight() {
        // 22:30 wave with a long tail: 22:30, 23:30, 00:30(+1 day).
        let slots = expand_exit_waves(&[wave(1350, 60, 2)]);
        assert_eq!(slots[0], ExitSlot { minute_of_day: 1350, date_offset: 0 });
        assert_eq!(slots[1], ExitSlot { minute_of_day: 1410, date_offset: 0 });
        // The 00:30 instant fires on the next civil day but belongs to the
        // wave's originating day.
        assert_eq!(slots[2], ExitSlot { minute_of_day: 30, date_offset: -1 });
        assert_eq!(slots[2].label(), "00:30");
    }

    #[test]
    fn test_default_waves_cover_eight_instants() {
        let waves = [wave(930, 30, 3), wave(1350, 30, 3)];
        let slots = expand_exit_waves(&waves);
        assert_eq!(slots.len(), 8);
        // The 22:30 wave ends at 00:00, which wraps.
        let last = slots.last().unwrap();
        assert_eq!(last.minute_of_day, 0);
        assert_eq!(last.date_offset, -1);
    }

    #[test]
    fn test_exit_wave_from_config() {
        let parsed = ExitWave::from_config(&ExitWaveConfig {
            start: "22:30".to_string(),
            interval_minutes: 30,
            repeats: 3,
        });
        assert_eq!(parsed, Some(wave(1350, 30, 3)));

        let bad = ExitWave::from_config(&ExitWaveConfig {
            start: "25:99".to_string(),
            interval_minutes: 30,
            repeats: 3,
        });
        assert_eq!(bad, None);
    }

    #[test]
    fn test_slot_matches_window() {
        // Exactly on time and within the window.
        assert!(slot_matches(540, 540, 65));
        assert!(slot_matches(605, 540, 65));
        // One minute past the window.
        assert!(!slot_matches(606, 540, 65));
        // Not yet reached.
        assert!(!slot_matches(539, 540, 65));
    }

    #[test]
    fn test_slot_matches_across_midnight() {
        // 00:10 run matches a 23:30 slot from the evening before.
        assert!(slot_matches(10, 1410, 65));
        assert!(!slot_matches(80, 1410, 65));
    }
}
