//! Level — the (next_fib, level_up) pair derived from a collection size
//!
//! Every counted collection carries this pair as a cached projection of its
//! length. `reconcile` is the load-time check: reject a stale pair in strict
//! mode, otherwise overwrite it.

use crate::error::{Result, SeedError};
use crate::fibonacci;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub next_fib: u64,
    pub level_up: bool,
}

impl Level {
    pub fn of(count: usize) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self {
            next_fib: fibonacci::next_fibonacci(count),
            level_up: fibonacci::is_fibonacci(count),
        }
    }
}

/// Where a level pair lives, for error messages.
pub(crate) struct LevelFields<'a> {
    pub next_fib: &'a str,
    pub level_up: &'a str,
    /// What is being counted, e.g. "descriptions"
    pub unit: &'a str,
}

/// Check a loaded pair against `count`, fixing it in place unless `strict`.
pub(crate) fn reconcile(
    fields: &LevelFields<'_>,
    count: usize,
    next_fib: &mut u64,
    level_up: &mut bool,
    strict: bool,
) -> Result<()> {
    let expected = Level::of(count);

    if *next_fib != expected.next_fib {
        if strict {
            return Err(SeedError::SeedValidation(format!(
                "invalid {}: {} for {} {}",
                fields.next_fib, next_fib, count, fields.unit
            )));
        }
        warn!(
            "Correcting {}: {} -> {} for {} {}",
            fields.next_fib, next_fib, expected.next_fib, count, fields.unit
        );
        *next_fib = expected.next_fib;
    }

    if *level_up != expected.level_up {
        if strict {
            return Err(SeedError::SeedValidation(format!(
                "invalid {}: {} for {} {}",
                fields.level_up, level_up, count, fields.unit
            )));
        }
        warn!(
            "Correcting {}: {} -> {} for {} {}",
            fields.level_up, level_up, expected.level_up, count, fields.unit
        );
        *level_up = expected.level_up;
    }

    Ok(())
}
