/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::StatsConfig;
use crate::display::{DisplayError, SlotError, TextSlots};
use crate::shared::Stats;

/// Display strings for the three stats slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsText {
    pub served: String,
    pub wait: String,
    pub journey: String,
}

pub fn format_stats(stats: &Stats) -> StatsText {
    StatsText {
        served: stats.total_passengers_served.to_string(),
        wait: format!("{} s", one_decimal(stats.average_wait_time)),
        journey: format!("{} s", one_decimal(stats.average_journey_time)),
    }
}

/// One decimal place, exact ties rounded away from zero.
///
/// `{:.1}` rounds exact ties to even. The only values that sit exactly
/// halfway between two tenths are odd multiples of 0.25, and for those
/// `x * 10.0` is exact, so `round` settles them. Every other value goes
/// straight to the formatter.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/**
 * Writes the aggregate statistics into the host's three text slots.
 *
 * The slot identifiers are resolved once in `new`; a missing slot is a
 * startup failure, never a per-frame one.
 */
pub struct StatsUpdater<T: TextSlots> {
    slots: T,
    served_slot: String,
    wait_slot: String,
    journey_slot: String,
}

impl<T: TextSlots> StatsUpdater<T> {
    pub fn new(slots: T, config: &StatsConfig) -> Result<StatsUpdater<T>, SlotError> {
        for id in [&config.served_slot, &config.wait_slot, &config.journey_slot] {
            if !slots.has_slot(id) {
                return Err(SlotError::Missing(id.clone()));
            }
        }

        Ok(StatsUpdater {
            slots,
            served_slot: config.served_slot.clone(),
            wait_slot: config.wait_slot.clone(),
            journey_slot: config.journey_slot.clone(),
        })
    }

    /// Leaves the slots untouched when the snapshot carried no stats.
    pub fn update(&mut self, stats: Option<&Stats>) -> Result<(), DisplayError> {
        let stats = match stats {
            Some(stats) => stats,
            None => {
                debug!("Snapshot without stats, keeping displayed values");
                return Ok(());
            }
        };

        let text = format_stats(stats);
        self.slots.write_slot(&self.served_slot, &text.served)?;
        self.slots.write_slot(&self.wait_slot, &text.wait)?;
        self.slots.write_slot(&self.journey_slot, &text.journey)?;
        Ok(())
    }

    pub fn slots(&self) -> &T {
        &self.slots
    }
}
