//! Fibonacci arithmetic behind every growth decision
//!
//! Collections grow in Fibonacci-sized rungs. All helpers are pure and take
//! signed input so that callers can pass values below zero without wrapping.

use crate::error::{Result, SeedError};

/// Largest index whose Fibonacci number still fits in a `u64`
pub const MAX_INDEX: i64 = 93;

/// The nth Fibonacci number, F(0) = 0, F(1) = 1
pub fn fibonacci(n: i64) -> Result<u64> {
    if n < 0 {
        return Err(SeedError::InvalidArgument(format!(
            "n must be a non-negative integer, got {n}"
        )));
    }
    if n > MAX_INDEX {
        return Err(SeedError::InvalidArgument(format!(
            "F({n}) does not fit in 64 bits"
        )));
    }

    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    Ok(a)
}

/// Whether `n` is a Fibonacci number.
///
/// Uses the identity that `n` is Fibonacci iff `5n² + 4` or `5n² - 4` is a
/// perfect square. 0 and 1 are both Fibonacci.
pub fn is_fibonacci(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    if n <= 1 {
        return true;
    }

    let n = n as u128;
    // 5n² only overflows u128 above F(92), where no further Fibonacci
    // number fits in an i64.
    let Some(base) = n.checked_mul(n).and_then(|sq| sq.checked_mul(5)) else {
        return false;
    };
    is_perfect_square(base + 4) || is_perfect_square(base - 4)
}

/// The Fibonacci number strictly after `n`.
///
/// The sequence is read as 1, 2, 3, 5, 8, ... so that the duplicated leading
/// 1 never stalls growth: `next_fibonacci(1) == 2`. Values that sit between
/// two rungs map to the upper rung.
pub fn next_fibonacci(n: i64) -> u64 {
    if n <= 0 {
        return 1;
    }
    if n == 1 {
        return 2;
    }

    let n = n as u64;
    let (mut a, mut b) = (0u64, 1u64);
    while b < n {
        let next = a + b;
        a = b;
        b = next;
    }

    if b == n {
        a + b
    } else {
        b
    }
}

/// The largest Fibonacci number strictly below `n`, 0 when `n <= 1`
pub fn prev_fibonacci(n: i64) -> u64 {
    if n <= 1 {
        return 0;
    }

    let n = n as u64;
    let (mut a, mut b) = (0u64, 1u64);
    while b < n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}

/// Number of whitespace-separated words in `text`.
///
/// Leading, trailing and repeated whitespace never produce empty words, so a
/// blank string counts as 0.
pub fn num_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_perfect_square(x: u128) -> bool {
    let root = isqrt(x);
    root * root == x
}

/// Integer square root by Newton iteration, seeded above the true root.
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let shift = (128 - n.leading_zeros() + 1) / 2;
    let mut x = 1u128 << shift;
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}
