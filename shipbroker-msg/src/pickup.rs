//! Collection appointment for the carrier.

use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use chrono::{NaiveDate, NaiveTime};

/// When and how the carrier should collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupInfo {
    /// Collection day.
    pub date: NaiveDate,
    /// Earliest collection time.
    pub time_from: Option<NaiveTime>,
    /// Latest collection time.
    pub time_to: Option<NaiveTime>,
    /// Note for the driver.
    pub note: Option<String>,
}

impl PickupInfo {
    /// Collect any time on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            time_from: None,
            time_to: None,
            note: None,
        }
    }

    /// Restrict collection to a time window.
    pub fn between(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.time_from = Some(from);
        self.time_to = Some(to);
        self
    }

    /// Add a note for the driver.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Validate for PickupInfo {
    fn violations(&self) -> Vec<RuleViolation> {
        let mut rules = Rules::new();
        if let (Some(from), Some(to)) = (self.time_from, self.time_to) {
            rules.check(from < to, "time_to", "must be later than time_from");
        }
        rules
            .opt_max_len("note", self.note.as_deref(), 128)
            .opt_markup_text("note", self.note.as_deref())
            .finish()
    }
}

impl WireEntity for PickupInfo {
    const ENTITY_NAME: &'static str = "PickupInfo";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("pickup", |w| {
            w.display("date", self.date.format("%Y-%m-%d"))
                .opt_display("time_from", self.time_from.map(|t| t.format("%H:%M")))
                .opt_display("time_to", self.time_to.map(|t| t.format("%H:%M")))
                .opt_text("note", self.note.as_deref());
        });
    }
}
