//! Small timing and id helpers.

use std::time::Duration;

use tokio::time::Instant;
use ulid::Ulid;

/// Trailing-edge debounce: fires once `wait` has passed since the last poke.
#[derive(Debug, Clone)]
pub struct Debounce {
    /// Quiet period required before firing.
    wait: Duration,
    /// Deadline of the pending trigger.
    due: Option<Instant>,
}

impl Debounce {
    /// Debounce with a quiet period of `wait`.
    pub fn new(wait: Duration) -> Self {
        Self { wait, due: None }
    }

    /// Record activity at `now`, pushing the trigger back.
    pub fn poke(&mut self, now: Instant) {
        self.due = Some(now + self.wait);
    }

    /// Deadline of the pending trigger, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// True once per burst, when the quiet period has elapsed at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(at) if at <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Leading-edge throttle: at most one acquisition per `limit`.
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum spacing between acquisitions.
    limit: Duration,
    /// End of the current closed window.
    open_at: Option<Instant>,
}

impl Throttle {
    /// Throttle allowing one call per `limit`.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_at: None,
        }
    }

    /// Returns `true` and closes the window if it is open at `now`.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.open_at.is_some_and(|at| now < at) {
            return false;
        }
        self.open_at = Some(now + self.limit);
        true
    }
}

/// Characters used by [`random_string`].
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random alphanumeric string of `len` characters, e.g. for unique element
/// ids.
pub fn random_string(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        // 80 random bits per ulid; six bits per draw.
        let mut bits = Ulid::new().random();
        for _ in 0..13 {
            if out.len() == len {
                break;
            }
            if let Some(c) = alphanumeric(bits) {
                out.push(c);
            }
            bits >>= 6;
        }
    }
    out
}

/// Map the low six bits of `bits` onto [`ALPHANUMERIC`], rejecting the two
/// values past its end so every character is equally likely.
fn alphanumeric(bits: u128) -> Option<char> {
    let idx = usize::try_from(bits & 0x3f).ok()?;
    ALPHANUMERIC.get(idx).map(|&b| char::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_fires_after_quiet_period() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut d = Debounce::new(ms(100));
        d.poke(t0);
        d.poke(t0 + ms(50));
        assert!(!d.take_due(t0 + ms(120)));
        assert!(d.take_due(t0 + ms(150)));
        assert!(!d.take_due(t0 + ms(500)));
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn throttle_admits_leading_call_only() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut t = Throttle::new(ms(100));
        assert!(t.try_acquire(t0));
        assert!(!t.try_acquire(t0 + ms(99)));
        assert!(t.try_acquire(t0 + ms(100)));
    }

    #[test]
    fn random_strings_are_alphanumeric() {
        let s = random_string(40);
        assert_eq!(s.len(), 40);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(random_string(0), "");
        assert_ne!(random_string(16), random_string(16));
    }

    #[test]
    fn draws_past_the_alphabet_are_rejected() {
        assert_eq!(alphanumeric(0), Some('A'));
        assert_eq!(alphanumeric(61), Some('9'));
        assert_eq!(alphanumeric(62), None);
        assert_eq!(alphanumeric(63), None);
        // Only the low six bits count.
        assert_eq!(alphanumeric(64 + 25), Some('Z'));
    }
}
