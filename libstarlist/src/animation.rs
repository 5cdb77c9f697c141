//! Staggered entrance animation for list rows
//!
//! Every row fades in (opacity 0 -> 1) and slides up (20px -> 0px) over
//! 500ms, starting 200ms x its position after it is first rendered.
//!
//! The module is split in two layers:
//! - [`progress`] and [`EntranceAnimation`] are pure functions of elapsed time.
//! - [`StaggerScheduler`] owns one animation per rendered row, identified by
//!   a [`RowId`], and tells the event loop whether another frame is needed.
//!
//! Nothing here knows about the terminal; the UI samples [`RowFrame`]s.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use libstarlist::animation::StaggerScheduler;
//!
//! let t0 = Instant::now();
//! let mut scheduler = StaggerScheduler::new();
//! scheduler.sync(&["1".to_string(), "2".to_string()], t0);
//!
//! // Second row has not started yet at 100ms
//! assert_eq!(scheduler.frame("2", t0 + Duration::from_millis(100)).progress, 0.0);
//! // Both rows are settled once the last one finished
//! assert!(!scheduler.needs_redraw(t0 + Duration::from_millis(700)));
//! ```

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Extra delay per row position
pub const STAGGER_INTERVAL_MS: u64 = 200;

/// Duration of a single row's entrance
pub const ENTRANCE_DURATION_MS: u64 = 500;

/// Vertical offset a row starts at, in pixels
pub const ENTRANCE_OFFSET_PX: f64 = 20.0;

/// Tween curve applied to linear time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear time `t` in [0, 1] to eased progress in [0, 1]
    ///
    /// Both curves are strictly increasing on [0, 1].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Eased progress of a delayed tween, in [0, 1]
///
/// - `0.0` for `elapsed_ms < delay_ms`
/// - strictly increasing on `[delay_ms, delay_ms + duration_ms]`
/// - `1.0` for `elapsed_ms >= delay_ms + duration_ms`
///
/// A zero duration steps from 0 to 1 at `delay_ms`.
pub fn progress(elapsed_ms: u64, delay_ms: u64, duration_ms: u64) -> f64 {
    progress_with(
        elapsed_ms as f64,
        delay_ms as f64,
        duration_ms as f64,
        Easing::default(),
    )
}

/// [`progress`] over fractional milliseconds with an explicit curve
pub fn progress_with(elapsed_ms: f64, delay_ms: f64, duration_ms: f64, easing: Easing) -> f64 {
    if elapsed_ms < delay_ms {
        return 0.0;
    }
    if duration_ms <= 0.0 || elapsed_ms >= delay_ms + duration_ms {
        return 1.0;
    }
    easing.apply((elapsed_ms - delay_ms) / duration_ms)
}

/// Lifecycle of one row's entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Waiting out the stagger delay
    Pending,
    Animating,
    /// Fully visible and untranslated; terminal
    Settled,
}

/// Timing of one row's entrance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceAnimation {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl EntranceAnimation {
    /// Animation for the row at zero-based `position`
    pub fn for_position(position: usize) -> Self {
        Self {
            delay: Duration::from_millis(STAGGER_INTERVAL_MS.saturating_mul(position as u64)),
            duration: Duration::from_millis(ENTRANCE_DURATION_MS),
            easing: Easing::default(),
        }
    }

    pub fn with_easing(self, easing: Easing) -> Self {
        Self { easing, ..self }
    }

    /// Time after mount at which the row is settled
    pub fn settles_after(&self) -> Duration {
        self.delay + self.duration
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        progress_with(
            millis(elapsed),
            millis(self.delay),
            millis(self.duration),
            self.easing,
        )
    }

    pub fn phase(&self, elapsed: Duration) -> AnimationPhase {
        if elapsed < self.delay {
            AnimationPhase::Pending
        } else if elapsed < self.settles_after() {
            AnimationPhase::Animating
        } else {
            AnimationPhase::Settled
        }
    }

    pub fn frame(&self, elapsed: Duration) -> RowFrame {
        RowFrame::from_progress(self.progress(elapsed), self.phase(elapsed))
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Sampled visual state of a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFrame {
    pub progress: f64,
    pub phase: AnimationPhase,
    /// Equal to progress
    pub opacity: f64,
    /// 20px at progress 0, 0px at progress 1
    pub offset_px: f64,
}

impl RowFrame {
    fn from_progress(progress: f64, phase: AnimationPhase) -> Self {
        Self {
            progress,
            phase,
            opacity: progress,
            offset_px: ENTRANCE_OFFSET_PX * (1.0 - progress),
        }
    }

    /// Frame of a row the scheduler has not mounted
    pub fn hidden() -> Self {
        Self::from_progress(0.0, AnimationPhase::Pending)
    }
}

#[derive(Debug, Clone)]
struct RowAnimation {
    position: usize,
    mounted_at: Instant,
    animation: EntranceAnimation,
}

impl RowAnimation {
    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.mounted_at)
    }
}

/// Identity of a rendered row: its list key plus how many earlier rows
/// share that key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowId {
    pub key: String,
    pub occurrence: usize,
}

impl RowId {
    /// The first row rendered with `key`
    pub fn first(key: &str) -> Self {
        Self {
            key: key.to_string(),
            occurrence: 0,
        }
    }
}

/// Row identities for `keys`, in order
///
/// Rows that share a key are told apart by occurrence, so each keeps the
/// delay of its own position.
pub fn row_ids(keys: &[String]) -> Vec<RowId> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(keys.len());
    keys.iter()
        .map(|key| {
            let count = counts.entry(key.as_str()).or_insert(0);
            let id = RowId {
                key: key.clone(),
                occurrence: *count,
            };
            *count += 1;
            id
        })
        .collect()
}

/// Per-screen driver of row entrance animations
///
/// Rows are identified by [`RowId`]. A row is mounted the first time
/// [`sync`](Self::sync) sees it and unmounted when it is gone. A row whose
/// position changes is remounted at the new position and replays its
/// entrance, since the delay derives from position only.
#[derive(Debug, Clone, Default)]
pub struct StaggerScheduler {
    rows: HashMap<RowId, RowAnimation>,
    easing: Easing,
}

impl StaggerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_easing(easing: Easing) -> Self {
        Self {
            rows: HashMap::new(),
            easing,
        }
    }

    /// Reconcile mounted rows with the keys currently rendered, in order
    pub fn sync(&mut self, keys: &[String], now: Instant) {
        let ids = row_ids(keys);

        for (position, id) in ids.iter().enumerate() {
            let unchanged = self
                .rows
                .get(id)
                .is_some_and(|row| row.position == position);
            if unchanged {
                continue;
            }

            tracing::trace!(key = %id.key, occurrence = id.occurrence, position, "Mounting row animation");
            self.rows.insert(
                id.clone(),
                RowAnimation {
                    position,
                    mounted_at: now,
                    animation: EntranceAnimation::for_position(position).with_easing(self.easing),
                },
            );
        }

        let live: HashSet<&RowId> = ids.iter().collect();
        self.rows.retain(|id, _| live.contains(id));
    }

    /// Sample the first row with `key` at `now`
    pub fn frame(&self, key: &str, now: Instant) -> RowFrame {
        self.frame_of(&RowId::first(key), now)
    }

    /// Sample the row `id` at `now`
    pub fn frame_of(&self, id: &RowId, now: Instant) -> RowFrame {
        match self.rows.get(id) {
            Some(row) => row.animation.frame(row.elapsed(now)),
            None => RowFrame::hidden(),
        }
    }

    pub fn phase(&self, key: &str, now: Instant) -> Option<AnimationPhase> {
        self.phase_of(&RowId::first(key), now)
    }

    pub fn phase_of(&self, id: &RowId, now: Instant) -> Option<AnimationPhase> {
        self.rows
            .get(id)
            .map(|row| row.animation.phase(row.elapsed(now)))
    }

    /// Whether any mounted row still changes after `now`
    pub fn needs_redraw(&self, now: Instant) -> bool {
        self.rows
            .values()
            .any(|row| row.animation.phase(row.elapsed(now)) != AnimationPhase::Settled)
    }

    /// Unmount every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
