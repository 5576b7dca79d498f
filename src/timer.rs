//! Periodic timer registry.
//!
//! Timers are plain data: a task value of type `K` (an enum naming what to do)
//! plus a period. The owner polls the registry with the current time and
//! dispatches the returned tasks itself, so there are no callbacks and no
//! user-data pointers.
//!
//! ```text
//! while let Some((handle, task)) = timers.take_due(now_ms) {
//!     match task { ... }
//! }
//! ```
//!
//! Due timers come out in registration order. A timer fires at most once per
//! `now_ms` value: when it fires its next deadline becomes `now_ms + period`,
//! so a late timer does not try to catch up on missed periods.

use core::fmt;

use heapless::Vec;

/// Registration handle, unique for the lifetime of a [`TimerService`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerHandle(u32);

/// What the dispatched task wants done with its own registration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerControl {
    /// Keep firing every period.
    Continue,
    /// Remove the registration.
    Cancel,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerError {
    /// Every timer slot is taken.
    Full,
    /// A zero period would fire on every poll.
    ZeroPeriod,
}

impl fmt::Display for TimerError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Full => f.write_str("no free timer slot"),
            Self::ZeroPeriod => f.write_str("timer period must be non-zero"),
        }
    }
}

impl core::error::Error for TimerError {}

struct Entry<K> {
    handle: TimerHandle,
    task: K,
    period_ms: u32,
    next_due_ms: u64,
}

/// Registry of up to `N` periodic timers carrying task values of type `K`.
pub struct TimerService<K, const N: usize> {
    /// Kept in registration order.
    entries: Vec<Entry<K>, N>,
    next_handle: u32,
}

impl<K: Copy, const N: usize> TimerService<K, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Register `task` to fire every `period_ms`, first at `now_ms + period_ms`.
    pub fn register(
        &mut self,
        task: K,
        period_ms: u32,
        now_ms: u64,
    ) -> Result<TimerHandle, TimerError> {
        if period_ms == 0 {
            return Err(TimerError::ZeroPeriod);
        }

        let handle = TimerHandle(self.next_handle);
        self.entries
            .push(Entry {
                handle,
                task,
                period_ms,
                next_due_ms: now_ms + u64::from(period_ms),
            })
            .map_err(|_| TimerError::Full)?;
        self.next_handle = self.next_handle.wrapping_add(1);

        debug!("timer: registered #{} every {} ms", handle.0, period_ms);
        Ok(handle)
    }

    /// Remove a registration. Returns false if it was not registered.
    pub fn cancel(
        &mut self,
        handle: TimerHandle,
    ) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(pos) => {
                self.entries.remove(pos);
                debug!("timer: cancelled #{}", handle.0);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(
        &self,
        handle: TimerHandle,
    ) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Take the first timer (in registration order) due at `now_ms`.
    ///
    /// The returned timer is rescheduled to `now_ms + period` before returning,
    /// so calling this in a loop drains every due timer exactly once.
    pub fn take_due(
        &mut self,
        now_ms: u64,
    ) -> Option<(TimerHandle, K)> {
        let entry = self.entries.iter_mut().find(|e| e.next_due_ms <= now_ms)?;
        entry.next_due_ms = now_ms + u64::from(entry.period_ms);
        Some((entry.handle, entry.task))
    }

    /// Earliest deadline among registered timers.
    pub fn next_deadline(&self) -> Option<u64> { self.entries.iter().map(|e| e.next_due_ms).min() }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<K: Copy, const N: usize> Default for TimerService<K, N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Job {
        Fast,
        Slow,
    }

    fn drain(
        timers: &mut TimerService<Job, 4>,
        now_ms: u64,
    ) -> std::vec::Vec<Job> {
        core::iter::from_fn(|| timers.take_due(now_ms)).map(|(_, job)| job).collect()
    }

    #[test]
    fn test_first_fire_after_one_period() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        timers.register(Job::Fast, 20, 1000).unwrap();

        assert!(drain(&mut timers, 1019).is_empty(), "Timer must not fire early");
        assert_eq!(drain(&mut timers, 1020), [Job::Fast]);
        assert!(drain(&mut timers, 1020).is_empty(), "Timer fires once per deadline");
        assert_eq!(drain(&mut timers, 1040), [Job::Fast]);
    }

    #[test]
    fn test_due_timers_in_registration_order() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        timers.register(Job::Slow, 100, 0).unwrap();
        timers.register(Job::Fast, 20, 0).unwrap();

        assert_eq!(drain(&mut timers, 100), [Job::Slow, Job::Fast]);
    }

    #[test]
    fn test_late_timer_does_not_catch_up() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        timers.register(Job::Fast, 20, 0).unwrap();

        assert_eq!(drain(&mut timers, 1000), [Job::Fast], "A late timer fires once");
        assert_eq!(timers.next_deadline(), Some(1020), "Period restarts from now");
    }

    #[test]
    fn test_cancel() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        let fast = timers.register(Job::Fast, 20, 0).unwrap();
        let slow = timers.register(Job::Slow, 50, 0).unwrap();

        assert!(timers.cancel(fast));
        assert!(!timers.cancel(fast), "Double cancel should report false");
        assert!(!timers.is_registered(fast));
        assert!(timers.is_registered(slow));
        assert_eq!(drain(&mut timers, 100), [Job::Slow]);
    }

    #[test]
    fn test_handles_not_reused() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        let first = timers.register(Job::Fast, 20, 0).unwrap();
        timers.cancel(first);
        let second = timers.register(Job::Fast, 20, 0).unwrap();

        assert_ne!(first, second);
        assert!(!timers.cancel(first), "Old handle must not cancel the new timer");
    }

    #[test]
    fn test_register_errors() {
        let mut timers: TimerService<Job, 1> = TimerService::new();
        assert_eq!(timers.register(Job::Fast, 0, 0), Err(TimerError::ZeroPeriod));
        timers.register(Job::Fast, 20, 0).unwrap();
        assert_eq!(timers.register(Job::Slow, 20, 0), Err(TimerError::Full));
    }

    #[test]
    fn test_next_deadline() {
        let mut timers: TimerService<Job, 4> = TimerService::new();
        assert_eq!(timers.next_deadline(), None);
        timers.register(Job::Slow, 60_000, 0).unwrap();
        timers.register(Job::Fast, 20, 0).unwrap();
        assert_eq!(timers.next_deadline(), Some(20));
    }
}
