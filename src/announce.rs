//! Screen-reader announcements.
//!
//! The calendar hands each [`Announcement`] to an [`Announcer`] and forgets
//! about it. How long a message stays visible to assistive technology is the
//! announcer's business; [`LiveRegion`] is an in-memory implementation that
//! mirrors a pair of ARIA live regions.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::consts::MONTH_ANNOUNCEMENT_TIMEOUT;
use crate::prelude::*;

/// Value of the `aria-live` attribute the message is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    #[display(fmt = "polite")]
    Polite,
    #[display(fmt = "assertive")]
    Assertive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Announcement {
    pub message: String,
    pub live: Politeness,
    #[serde(with = "millis")]
    pub timeout: Duration,
}

impl Announcement {
    pub fn new(message: impl Into<String>, live: Politeness) -> Self {
        Self {
            message: message.into(),
            live,
            timeout: MONTH_ANNOUNCEMENT_TIMEOUT,
        }
    }

    pub fn polite(message: impl Into<String>) -> Self {
        Self::new(message, Politeness::Polite)
    }

    pub fn assertive(message: impl Into<String>) -> Self {
        Self::new(message, Politeness::Assertive)
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Receives announcements; fire and forget
pub trait Announcer {
    fn announce(&mut self, announcement: Announcement);
}

/// Adapts a closure into an [`Announcer`]
pub struct FnAnnouncer<F>(F);

pub const fn from_fn<F>(f: F) -> FnAnnouncer<F>
where
    F: FnMut(Announcement),
{
    FnAnnouncer(f)
}

impl<F> Announcer for FnAnnouncer<F>
where
    F: FnMut(Announcement),
{
    fn announce(&mut self, announcement: Announcement) {
        (self.0)(announcement);
    }
}

/// Keeps every announcement, oldest first
impl Announcer for Vec<Announcement> {
    fn announce(&mut self, announcement: Announcement) {
        self.push(announcement);
    }
}

/// Lets the host keep a handle on an announcer the calendar owns
impl<A: Announcer + ?Sized> Announcer for Rc<RefCell<A>> {
    fn announce(&mut self, announcement: Announcement) {
        self.borrow_mut().announce(announcement);
    }
}

#[derive(Debug, Clone)]
struct LiveMessage {
    text: String,
    expires_at: Instant,
}

/// Two live regions, one per politeness level, whose messages expire.
///
/// Messages are appended in arrival order and dropped once their timeout has
/// elapsed; the host calls [`LiveRegion::expire`] from its own timer or render
/// loop and renders [`LiveRegion::messages`] into visually hidden nodes.
#[derive(Debug, Clone, Default)]
pub struct LiveRegion {
    polite: VecDeque<LiveMessage>,
    assertive: VecDeque<LiveMessage>,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `announcement` as if it arrived at `now`
    pub fn post_at(&mut self, announcement: Announcement, now: Instant) {
        let Announcement {
            message,
            live,
            timeout,
        } = announcement;
        log::trace!("live region ({live}) += {message:?} for {timeout:?}");
        self.queue_mut(live).push_back(LiveMessage {
            text: message,
            expires_at: now + timeout,
        });
    }

    /// Drops every message whose timeout has elapsed by `now`; returns how many went
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.len();
        for live in [Politeness::Polite, Politeness::Assertive] {
            self.queue_mut(live).retain(|m| m.expires_at > now);
        }
        before - self.len()
    }

    /// Current messages for one region, oldest first
    pub fn messages(&self, live: Politeness) -> impl Iterator<Item = &str> {
        self.queue(live).iter().map(|m| m.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.polite.len() + self.assertive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn queue(&self, live: Politeness) -> &VecDeque<LiveMessage> {
        match live {
            Politeness::Polite => &self.polite,
            Politeness::Assertive => &self.assertive,
        }
    }

    fn queue_mut(&mut self, live: Politeness) -> &mut VecDeque<LiveMessage> {
        match live {
            Politeness::Polite => &mut self.polite,
            Politeness::Assertive => &mut self.assertive,
        }
    }
}

impl Announcer for LiveRegion {
    fn announce(&mut self, announcement: Announcement) {
        self.post_at(announcement, Instant::now());
    }
}

/// Serializes a `Duration` as whole milliseconds
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
