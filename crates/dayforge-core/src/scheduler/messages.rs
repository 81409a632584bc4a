//! Tradeoff and warning text.
//!
//! Every message is derived from the allocation alone, so the text is as
//! deterministic as the block layout.

use super::allocation::{Allocation, RangePoint, TaskGroups};
use super::{LEISURE_MIN_BLOCK_MINUTES, PHONE_MIN_BLOCK_MINUTES, REDUCTION_BASELINE_MINUTES};
use crate::intensity::Intensity;
use crate::schedule::ScheduleConfig;

/// Format hours without a trailing ".0" ("2", "2.5", "2.25").
pub fn format_hours(hours: f64) -> String {
    let text = format!("{:.2}", hours);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn minutes_as_hours(minutes: i64) -> String {
    format_hours(minutes as f64 / 60.0)
}

pub(crate) fn tradeoffs(alloc: &Allocation<'_>, groups: &TaskGroups<'_>, config: &ScheduleConfig) -> Vec<String> {
    let intensity = config.intensity;
    let profile = intensity.profile();
    let mut out = Vec::new();

    for slot in &alloc.work {
        let Some((min, max, point)) = slot.range else {
            continue;
        };
        let (word, reason) = match point {
            RangePoint::Minimum => ("minimum", "low intensity keeps the day light"),
            RangePoint::Midpoint => ("midpoint", "medium intensity balances work and rest"),
            RangePoint::Maximum => ("maximum", "high intensity prioritizes output"),
        };
        out.push(format!(
            "\"{}\": {}h scheduled, the {} of your {}-{}h range ({}).",
            slot.task.title,
            minutes_as_hours(slot.minutes),
            word,
            format_hours(min),
            format_hours(max),
            reason
        ));
    }

    if alloc.breaks_shortened() {
        let mut changes: Vec<(i64, i64)> = Vec::new();
        for slot in alloc.breaks.iter().filter(|b| b.shrink() > 0) {
            if !changes.contains(&(slot.nominal_minutes, slot.minutes)) {
                changes.push((slot.nominal_minutes, slot.minutes));
            }
        }
        let work = minutes_as_hours(alloc.total_work_minutes());
        out.push(match changes.as_slice() {
            [(from, to)] => format!("Breaks shortened from {from} to {to} min each to fit {work}h of protected work."),
            _ => {
                let list: Vec<String> = changes.iter().map(|(from, to)| format!("{from} to {to}")).collect();
                format!("Breaks shortened ({} min) to fit {work}h of protected work.", list.join(", "))
            }
        });
    }

    if alloc.sleep_borrowed > 0 {
        let planned = config.nominal_sleep_minutes() - alloc.sleep_borrowed;
        out.push(format!(
            "Sleep pushed back {} min to protect work time (now {:.1}h, never below {:.1}h).",
            alloc.sleep_borrowed,
            planned as f64 / 60.0,
            profile.min_sleep_hours
        ));
    }

    if !groups.phone.is_empty() && alloc.phone_minutes < REDUCTION_BASELINE_MINUTES {
        out.push(if alloc.phone_minutes < PHONE_MIN_BLOCK_MINUTES {
            "Phone & social time dropped: no flexible time left today.".to_string()
        } else {
            format!(
                "Phone & social time trimmed to {} min ({} intensity allows up to {} min).",
                alloc.phone_minutes,
                intensity.label(),
                profile.max_phone_minutes
            )
        });
    }

    if !groups.leisure.is_empty() && alloc.leisure_minutes < REDUCTION_BASELINE_MINUTES {
        out.push(if alloc.leisure_minutes < LEISURE_MIN_BLOCK_MINUTES {
            "Leisure dropped: no flexible time left today.".to_string()
        } else {
            format!(
                "Leisure trimmed to {} min ({} intensity allows up to {} min).",
                alloc.leisure_minutes,
                intensity.label(),
                profile.max_leisure_minutes
            )
        });
    }

    for slot in &alloc.work {
        if slot.minutes > profile.break_frequency_minutes {
            out.push(format!(
                "\"{}\" runs {} min without a break; {} intensity suggests splitting blocks longer than {} min.",
                slot.task.title,
                slot.minutes,
                intensity.label(),
                profile.break_frequency_minutes
            ));
        }
    }

    out
}

pub(crate) fn shortfall_warning(alloc: &Allocation<'_>, intensity: Intensity) -> Option<String> {
    if alloc.shortfall_minutes <= 0 {
        return None;
    }
    let amount = if alloc.shortfall_minutes < 60 {
        format!("{} min", alloc.shortfall_minutes)
    } else {
        format!("{:.1}h", alloc.shortfall_minutes as f64 / 60.0)
    };
    let applied = match (alloc.breaks_shortened(), alloc.sleep_borrowed > 0) {
        (true, true) => Some("shortening breaks and borrowing sleep"),
        (true, false) => Some("shortening breaks"),
        (false, true) => Some("borrowing sleep"),
        (false, false) => None,
    };
    Some(match applied {
        Some(applied) => format!(
            "Over capacity by {} even after {} at {} intensity. Consider moving a task to another day.",
            amount, applied, intensity
        ),
        None => format!(
            "Over capacity by {}: work and essentials alone exceed the time before bed. Consider moving a task to another day.",
            amount
        ),
    })
}

pub(crate) fn overrun_warning(overrun_minutes: i64) -> String {
    format!(
        "Planned activities run {} min past tomorrow's wake time; no sleep could be scheduled.",
        overrun_minutes
    )
}
