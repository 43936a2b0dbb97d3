//! Week-granular epochs and the bounded slicing of a checkpoint interval.

/// Length of an epoch, in seconds.
pub const WEEK: u64 = 604_800;

/// Upper bound on the slices integrated by a single checkpoint. Time past the
/// last processed slice is forgone.
pub const MAX_EPOCH_SLICES: usize = 500;

pub const fn epoch_of(timestamp: u64) -> u64 {
    timestamp / WEEK
}

pub const fn epoch_start(timestamp: u64) -> u64 {
    timestamp / WEEK * WEEK
}

/// Half-open interval `[start, end)` that never straddles a week boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochSlice {
    pub start: u64,
    pub end: u64,
}

impl EpochSlice {
    pub const fn duration(&self) -> u64 {
        self.end - self.start
    }

    pub const fn epoch(&self) -> u64 {
        epoch_of(self.start)
    }

    pub const fn week_start(&self) -> u64 {
        epoch_start(self.start)
    }
}

/// Lazily cuts `[from, to)` at every week boundary, yielding at most
/// `MAX_EPOCH_SLICES` slices.
#[derive(Debug, Clone)]
pub struct EpochSlices {
    cursor: u64,
    end: u64,
    remaining: usize,
}

impl Iterator for EpochSlices {
    type Item = EpochSlice;

    fn next(&mut self) -> Option<EpochSlice> {
        if self.cursor >= self.end || self.remaining == 0 {
            return None;
        }
        let boundary = epoch_start(self.cursor).saturating_add(WEEK);
        let end = core::cmp::min(boundary, self.end);
        let slice = EpochSlice {
            start: self.cursor,
            end,
        };
        self.cursor = end;
        self.remaining -= 1;
        Some(slice)
    }
}

pub fn slices(from: u64, to: u64) -> EpochSlices {
    EpochSlices {
        cursor: from,
        end: to,
        remaining: MAX_EPOCH_SLICES,
    }
}
