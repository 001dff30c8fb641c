use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Which part of the itinerary is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(u32),
}

impl DayFilter {
    /// `0` selects every day, like the "All" button.
    pub fn from_index(day: u32) -> Self {
        match day {
            0 => Self::All,
            day => Self::Day(day),
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::All => 0,
            Self::Day(day) => day,
        }
    }

    pub fn includes(self, day: u32) -> bool {
        match self {
            Self::All => true,
            Self::Day(selected) => selected == day,
        }
    }
}

/// The current day filter, shared between the UI and running render passes.
///
/// Every selection bumps a generation counter. A render pass remembers the
/// generation it started under and drops its remaining work once the counter
/// has moved on.
#[derive(Debug, Default)]
pub struct FilterState {
    day: AtomicU32,
    generation: AtomicU64,
}

/// Snapshot taken when a render pass starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPass {
    generation: u64,
    filter: DayFilter,
}

impl RenderPass {
    pub fn filter(&self) -> DayFilter {
        self.filter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl FilterState {
    pub fn new(filter: DayFilter) -> Self {
        Self {
            day: AtomicU32::new(filter.index()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> DayFilter {
        DayFilter::from_index(self.day.load(Ordering::SeqCst))
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Selects `filter` and returns the new generation. Re-selecting the
    /// current filter still starts a new generation.
    pub fn select(&self, filter: DayFilter) -> u64 {
        self.day.store(filter.index(), Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn begin_pass(&self) -> RenderPass {
        let generation = self.generation();
        RenderPass {
            generation,
            filter: self.current(),
        }
    }

    pub fn is_current(&self, pass: RenderPass) -> bool {
        self.generation() == pass.generation
    }
}
