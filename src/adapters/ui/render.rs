//! Render an agenda for the terminal.

use crate::domain::{Agenda, Priority};

/// Format the agenda into a readable daily view. The degraded notice is the
/// only place a reader learns a domain was served from fallback or missing.
pub fn render_agenda(agenda: &Agenda) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "📅 Daily Agenda for {}\n",
        agenda.date.format("%A, %B %d, %Y")
    ));
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    if let Some(weather) = &agenda.weather {
        out.push_str(&format!(
            "🌤️  Weather in {}: {}, {}°C\n\n",
            weather.location, weather.condition, weather.temperature
        ));
    }

    out.push_str("📆 Today's Schedule:\n");
    if agenda.events.is_empty() {
        out.push_str("  No scheduled events for today.\n");
    } else {
        for event in &agenda.events {
            let mut time_str = event.start.format("%I:%M %p").to_string();
            time_str.push_str(&format!(" - {}", event.end.format("%I:%M %p")));
            let loc_str = event
                .location
                .as_deref()
                .map(|l| format!(" at {}", l))
                .unwrap_or_default();
            out.push_str(&format!("  • {}: {}{}\n", time_str, event.title, loc_str));
        }
    }

    out.push_str("\n✅ To-Do List:\n");
    if agenda.tasks.is_empty() {
        out.push_str("  No pending tasks for today.\n");
    } else {
        for task in &agenda.tasks {
            let emoji = match task.priority {
                Priority::High => "🔴",
                Priority::Medium => "🟠",
                Priority::Low => "🟢",
            };
            out.push_str(&format!(
                "  {} {} (Due: {})\n",
                emoji, task.title, task.due_date
            ));
        }
    }

    if !agenda.degraded.is_empty() {
        let names: Vec<String> = agenda.degraded.iter().map(|d| d.to_string()).collect();
        out.push_str(&format!(
            "\n⚠️  Served with degraded data: {}\n",
            names.join(", ")
        ));
    }

    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push_str("\nHave a productive day! 🚀");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgendaDomain, Event, Task};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn empty_agenda() -> Agenda {
        Agenda {
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            weather: None,
            tasks: Vec::<Task>::new(),
            events: Vec::<Event>::new(),
            degraded: BTreeSet::new(),
        }
    }

    #[test]
    fn empty_agenda_renders_placeholders_without_degraded_notice() {
        let text = render_agenda(&empty_agenda());
        assert!(text.contains("No scheduled events"));
        assert!(text.contains("No pending tasks"));
        assert!(!text.contains("degraded"));
    }

    #[test]
    fn degraded_domains_are_named() {
        let mut agenda = empty_agenda();
        agenda.degraded.insert(AgendaDomain::Weather);
        agenda.degraded.insert(AgendaDomain::Calendar);

        let text = render_agenda(&agenda);
        assert!(text.contains("degraded data: weather, calendar"));
    }
}
