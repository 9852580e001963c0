//! Task pool, sprint lifecycle, and kanban board bookkeeping.
//!
//! The board context owns the unassigned task pool and every sprint's three
//! columns. All operations are synchronous transitions over the
//! [`domain::BoardState`] aggregate; the instant used for status derivation
//! and the identifiers of new records are supplied by the caller, so the
//! aggregate never reads a clock or an id source itself.

pub mod domain;

#[cfg(test)]
mod tests;
