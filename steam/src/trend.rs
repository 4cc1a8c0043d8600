//! Price trend reconciliation against the previous run.
//!
//! Each item carries a baseline (`old_price`) next to its last observed highest
//! buy order. Comparing the step observed last run (`previous - baseline`) with
//! the step observed now (`today - previous`) tells whether the price keeps
//! moving the same way or turned around:
//!
//! * continuing: `difference` is measured from the baseline, so a steady climb
//!   accumulates over several runs;
//! * reversed: `difference` falls back to the single last step.
//!
//! In both cases the baseline then moves to the previous observation.
use crate::item::EnrichedItem;
use std::collections::HashMap;

/// What the previous snapshot knows about an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendState {
    /// Not in the previous snapshot, or without a baseline or a price there
    Unseen,
    Tracking { baseline: i64, previous: i64 },
}

impl TrendState {
    pub fn of(prior: Option<&EnrichedItem>) -> Self {
        match prior
            .and_then(|p| Some((p.old_price?, p.highest_buy_order()?)))
            .filter(|(baseline, previous)| *baseline >= 0 && *previous >= 0)
        {
            Some((baseline, previous)) => TrendState::Tracking { baseline, previous },
            None => TrendState::Unseen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Started,
    Continuing,
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub signal: Signal,
    pub difference: i64,
    /// Baseline to persist with today's observation
    pub old_price: i64,
}

pub fn step(state: TrendState, today: i64) -> Trend {
    let started = Trend {
        signal: Signal::Started,
        difference: 0,
        old_price: today,
    };

    let TrendState::Tracking { baseline, previous } = state else {
        return started;
    };

    // Out of range baselines can only come from a foreign or edited snapshot.
    let (Some(old_diff), Some(new_diff), Some(cumulative)) = (
        previous.checked_sub(baseline),
        today.checked_sub(previous),
        today.checked_sub(baseline),
    ) else {
        log::warn!(
            "Price step overflows (baseline {baseline}, previous {previous}, today {today}), \
             restarting trend"
        );
        return started;
    };

    let continuing = (old_diff > 0 && new_diff > 0)
        || (old_diff < 0 && new_diff < 0)
        || old_diff == new_diff
        || new_diff == 0;

    if continuing {
        Trend {
            signal: Signal::Continuing,
            difference: cumulative,
            old_price: previous,
        }
    } else {
        Trend {
            signal: Signal::Reversed,
            difference: new_diff,
            old_price: previous,
        }
    }
}

/// Sets `difference` and `old_price` on every item of today's run.
///
/// Items are matched to `previous` by market hash name. An item without buy
/// orders today gets no baseline and a zero difference.
pub fn reconcile(items: &mut [EnrichedItem], previous: &[EnrichedItem]) {
    let index: HashMap<&str, &EnrichedItem> = previous
        .iter()
        .map(|item| (item.market_hash_name(), item))
        .collect();

    let (mut started, mut continuing, mut reversed) = (0, 0, 0);

    for item in items.iter_mut() {
        item.difference = 0;
        item.old_price = None;

        let Some(today) = item.highest_buy_order() else {
            continue;
        };

        let state = TrendState::of(index.get(item.market_hash_name()).copied());
        let trend = step(state, today);

        match trend.signal {
            Signal::Started => started += 1,
            Signal::Continuing => continuing += 1,
            Signal::Reversed => reversed += 1,
        }

        item.difference = trend.difference;
        item.old_price = Some(trend.old_price);
    }

    log::info!(
        "Reconciled {} items: {started} new, {continuing} continuing, {reversed} reversed",
        items.len()
    );
}
