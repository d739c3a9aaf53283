pub const ARRAY_SIZE: usize = 20;
pub const MIN_VALUE: u32 = 25;
pub const MAX_VALUE: u32 = 500;

pub const MIN_SPEED: u16 = 1;
pub const MAX_SPEED: u16 = 1000;
pub const DEFAULT_SPEED: u16 = 900;

pub const BUCKETS: usize = 5;
pub const RADIX: u32 = 10;

// widest [min, max] span counting sort will allocate a table for
pub const MAX_COUNTING_RANGE: u32 = 1 << 20;

pub const DEFAULT_SEED: u64 = 12345;

const _: () = {
    assert!(MIN_VALUE > 0, "values must be positive");
    assert!(MIN_VALUE <= MAX_VALUE, "empty value range");
    assert!(MIN_SPEED >= 1 && MIN_SPEED < MAX_SPEED, "speed range must be non-empty");
    assert!(DEFAULT_SPEED >= MIN_SPEED && DEFAULT_SPEED <= MAX_SPEED);
    assert!(BUCKETS > 0, "bucket sort needs at least one bucket");
    assert!(RADIX >= 2, "radix must be at least 2");
    assert!((MAX_VALUE - MIN_VALUE + 1) <= MAX_COUNTING_RANGE);
};
