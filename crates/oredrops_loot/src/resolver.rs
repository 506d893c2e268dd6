//! # Drop Resolution
//!
//! Turns the entries of one material plus an enchant level into granted
//! drops. Entries are rolled independently and in order; an entry whose
//! total quantity is zero is left out.

use oredrops_core::{roll_entry, roll_entry_with, DropMethod, DropRng, RollEvent};

use crate::diagnostics::Diagnostics;
use crate::entry::{DropEntry, GrantedDrop};

/// Rolls entries under one method.
#[derive(Clone, Copy, Debug)]
pub struct DropResolver<'a> {
    method: DropMethod,
    diagnostics: &'a Diagnostics,
}

impl<'a> DropResolver<'a> {
    /// Resolver for `method`, tracing rolls to `diagnostics` in debug mode.
    #[must_use]
    pub fn new(method: DropMethod, diagnostics: &'a Diagnostics) -> Self {
        Self {
            method,
            diagnostics,
        }
    }

    /// Method entries are rolled with.
    #[must_use]
    pub fn method(&self) -> DropMethod {
        self.method
    }

    /// Rolls every entry at `level`.
    pub fn resolve<R: DropRng>(&self, entries: &[DropEntry], level: u32, rng: &mut R) -> Vec<GrantedDrop> {
        let trace = self.diagnostics.debug_enabled();
        entries
            .iter()
            .filter_map(|entry| {
                let outcome = if trace {
                    roll_entry_with(
                        self.method,
                        entry.chance(),
                        entry.min_amount(),
                        entry.max_amount(),
                        level,
                        rng,
                        |event| self.trace_roll(entry, &event),
                    )
                } else {
                    roll_entry(
                        self.method,
                        entry.chance(),
                        entry.min_amount(),
                        entry.max_amount(),
                        level,
                        rng,
                    )
                };
                if trace && outcome.successes > 0 {
                    self.diagnostics.debug(format_args!(
                        "{}: {} successful roll(s), {} total",
                        entry.item_id(),
                        outcome.successes,
                        outcome.quantity
                    ));
                }
                outcome.granted().then(|| GrantedDrop {
                    item_id: entry.item_id().clone(),
                    quantity: outcome.quantity,
                })
            })
            .collect()
    }

    fn trace_roll(&self, entry: &DropEntry, event: &RollEvent) {
        match event.amount {
            Some(amount) => self.diagnostics.debug(format_args!(
                "roll {} for {}: {:.3} < {:.3} -> hit, +{amount}",
                event.index + 1,
                entry.item_id(),
                event.draw,
                event.chance
            )),
            None => self.diagnostics.debug(format_args!(
                "roll {} for {}: {:.3} >= {:.3} -> miss",
                event.index + 1,
                entry.item_id(),
                event.draw,
                event.chance
            )),
        }
    }
}
