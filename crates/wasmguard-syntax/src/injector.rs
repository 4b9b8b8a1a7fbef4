//! Guard insertion into a line buffer.
//!
//! Site lines refer to the original content. Each insertion pushes every
//! later line down by one, so the injector keeps a running offset and adds
//! it to each site's line. This only holds while sites arrive in ascending
//! order.

use crate::detector::GuardSite;
use crate::guard::{guard_line, is_guard_line};
use crate::text::{LineBuffer, leading_indent};

/// What happened to a single site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// A guard was inserted; the value is its zero-based index in the edited
    /// buffer.
    Inserted(usize),
    /// The line above the statement already carries a guard.
    AlreadyGuarded,
    /// The computed line index fell outside the buffer.
    OutOfBounds,
}

/// Applies guards to one file's lines.
#[derive(Debug)]
pub struct GuardInjector<'a> {
    source: &'a [u8],
    buffer: LineBuffer<'a>,
    offset: usize,
}

impl<'a> GuardInjector<'a> {
    /// Prepares to edit `source`, the content the sites were detected in.
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            buffer: LineBuffer::split(source),
            offset: 0,
        }
    }

    /// Inserts a guard above `site` unless one is already there.
    pub fn inject(&mut self, site: &GuardSite<'_>) -> SiteOutcome {
        let Some(index) = usize::try_from(site.line())
            .ok()
            .and_then(|line| line.checked_sub(1))
            .and_then(|line| line.checked_add(self.offset))
        else {
            return SiteOutcome::OutOfBounds;
        };
        let Some(target) = self.buffer.line(index) else {
            return SiteOutcome::OutOfBounds;
        };

        let previous = index.checked_sub(1).and_then(|above| self.buffer.line(above));
        if previous.is_some_and(is_guard_line) {
            return SiteOutcome::AlreadyGuarded;
        }

        let call = self.source.get(site.call_range()).unwrap_or_default();
        let guard = guard_line(leading_indent(target), call);
        if !self.buffer.insert(index, guard) {
            return SiteOutcome::OutOfBounds;
        }
        self.offset += 1;
        SiteOutcome::Inserted(index)
    }

    /// Number of guards inserted so far.
    #[must_use]
    pub const fn insertions(&self) -> usize {
        self.offset
    }

    /// Returns the edited content.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer.join()
    }
}

/// Result of injecting guards into one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    /// Edited content.
    pub output: Vec<u8>,
    /// Guards inserted.
    pub insertions: usize,
    /// Sites skipped because a guard was already present.
    pub already_guarded: usize,
}

/// Inserts a guard above every site in `sites`.
///
/// `sites` must be sorted by ascending line, as returned by
/// [`crate::detect_guard_sites`].
#[must_use]
pub fn inject_guards(source: &[u8], sites: &[GuardSite<'_>]) -> Injected {
    let mut injector = GuardInjector::new(source);
    let mut already_guarded = 0;
    for site in sites {
        match injector.inject(site) {
            SiteOutcome::Inserted(index) => {
                tracing::trace!(line = site.line(), index, primitive = site.primitive(), "inserted guard");
            }
            SiteOutcome::AlreadyGuarded => {
                already_guarded += 1;
                tracing::debug!(line = site.line(), primitive = site.primitive(), "site already guarded");
            }
            SiteOutcome::OutOfBounds => {
                tracing::debug!(line = site.line(), "site line outside buffer; skipped");
            }
        }
    }
    Injected {
        insertions: injector.insertions(),
        output: injector.finish(),
        already_guarded,
    }
}
