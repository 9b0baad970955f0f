use crate::constants::{CLOCK_SPEED, PROGRAM_START, TIMER_FREQUENCY};

/// Switches between behaviours that differ across interpreters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6, 8XY7 and 8XYE read Vx and write their result to Vy, and 8XYE takes the flag
    /// from the least significant bit. When unset they write Vx and 8XYE flags the most
    /// significant bit, as most interpreters do.
    pub legacy_shift_roles: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            legacy_shift_roles: true,
        }
    }
}

impl Quirks {
    pub fn canonical() -> Self {
        Quirks {
            legacy_shift_roles: false,
        }
    }
}

/// # Config
/// Settings fixed for the lifetime of an interpreter.
///
/// The interpreter does not keep time itself; `clock_speed` and `timer_frequency` tell a
/// driver how often to call `step` and the tick methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second.
    pub clock_speed: u32,
    /// Timer ticks per second.
    pub timer_frequency: u32,
    /// Load address for ROMs and the initial program counter.
    pub program_start: u16,
    /// Maximum number of nested subroutine calls, unbounded when `None`.
    pub stack_limit: Option<usize>,
    /// How many past states are kept for `rewind`; 0 disables it.
    pub history_depth: usize,
    /// Seed for the CXNN random number generator; seeded from the OS when `None`.
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_frequency: TIMER_FREQUENCY,
            program_start: PROGRAM_START,
            stack_limit: None,
            history_depth: 0,
            seed: None,
            quirks: Quirks::default(),
        }
    }
}

impl Config {
    pub fn with_clock_speed(mut self, clock_speed: u32) -> Self {
        self.clock_speed = clock_speed;
        self
    }

    pub fn with_timer_frequency(mut self, timer_frequency: u32) -> Self {
        self.timer_frequency = timer_frequency;
        self
    }

    pub fn with_program_start(mut self, program_start: u16) -> Self {
        self.program_start = program_start;
        self
    }

    pub fn with_stack_limit(mut self, stack_limit: Option<usize>) -> Self {
        self.stack_limit = stack_limit;
        self
    }

    pub fn with_history_depth(mut self, history_depth: usize) -> Self {
        self.history_depth = history_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Instructions to execute between two timer ticks, never less than one.
    pub fn cycles_per_tick(&self) -> u32 {
        (self.clock_speed / self.timer_frequency.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.program_start, 0x200);
        assert_eq!(config.stack_limit, None);
        assert!(config.quirks.legacy_shift_roles);
        assert_eq!(config.cycles_per_tick(), 8);
    }

    #[test]
    fn test_cycles_per_tick_is_at_least_one() {
        let config = Config::default()
            .with_clock_speed(30)
            .with_timer_frequency(60);
        assert_eq!(config.cycles_per_tick(), 1);
        let config = config.with_timer_frequency(0);
        assert_eq!(config.cycles_per_tick(), 30);
    }
}
