use std::ops::Range;

pub const DEFAULT_TREE_SIZE: usize = 15;
pub const DEFAULT_VALUE_SPACE: Range<i32> = 0..100;

/// Half-open range `[start, end)` random node values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpace {
    pub start: i32,
    pub end: i32,
}

impl ValueSpace {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn capacity(&self) -> usize {
        if self.end <= self.start {
            return 0;
        }

        (self.end as i64 - self.start as i64) as usize
    }

    pub fn contains(&self, value: i32) -> bool {
        self.start <= value && value < self.end
    }

    pub fn range(&self) -> Range<i32> {
        self.start..self.end
    }
}

impl Default for ValueSpace {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_SPACE.start, DEFAULT_VALUE_SPACE.end)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    pub value_space: ValueSpace,
    /// Fixed rng seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl TreeConfig {
    pub fn with_value_space(mut self, value_space: ValueSpace) -> Self {
        self.value_space = value_space;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
