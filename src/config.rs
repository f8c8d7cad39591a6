//! Tunable constants shared across the hash table, scanner, and hashing
//! routine (spec §3, §4.2, §4.1).

/// Smallest capacity a [`crate::table::Table`] grows to on its first insert.
pub const MIN_CAPACITY: usize = 8;

/// Above this load factor the table doubles before inserting (spec §4.2).
pub const TABLE_MAX_LOAD: f64 = 0.75;

/// Longest lexeme the scanner will accept before emitting an error token
/// (spec §4.1 edge cases).
pub const MAX_LEXEME_LEN: usize = 255;

pub const FNV_OFFSET_32: u32 = 0x811C_9DC5;
pub const FNV_PRIME_32: u32 = 0x0100_0193;

/// Doubles `old_capacity`, or returns [`MIN_CAPACITY`] if it was zero
/// (spec §4.2 "grow-by-doubling").
pub fn grow_capacity(old_capacity: usize) -> usize {
    if old_capacity < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        old_capacity * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_from_zero_to_minimum() {
        assert_eq!(grow_capacity(0), MIN_CAPACITY);
    }

    #[test]
    fn doubles_past_minimum() {
        assert_eq!(grow_capacity(MIN_CAPACITY), MIN_CAPACITY * 2);
        assert_eq!(grow_capacity(16), 32);
    }
}
