//! Keyed data join for animated marks
//!
//! Marks are matched to data by a string key. New keys enter from their
//! collapsed state, matched keys animate to the new attributes, and keys that
//! disappear either collapse and are pruned or vanish at once.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use super::transition::{Transition, Tween};

/// Visual attributes of a mark
pub trait MarkAttrs: Tween {
    /// The state a mark grows from on enter and shrinks to on exit
    fn collapsed(&self) -> Self;
}

/// Desired state of one mark after a join
#[derive(Debug, Clone)]
pub struct MarkTarget<A, D> {
    pub key: String,
    pub attrs: A,
    pub datum: D,
}

/// Transition durations of a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinTimings {
    pub enter: Duration,
    pub update: Duration,
    /// `None` removes exiting marks immediately
    pub exit: Option<Duration>,
}

/// Counts produced by one join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

#[derive(Debug, Clone)]
struct Mark<A: Tween, D> {
    attrs: Transition<A>,
    datum: D,
    exiting: bool,
}

/// One mark as it should be painted this frame
#[derive(Debug, Clone)]
pub struct MarkFrame<'a, A, D> {
    pub key: &'a str,
    pub attrs: A,
    pub datum: &'a D,
    pub exiting: bool,
}

/// The set of drawn marks of one chart, in insertion order
#[derive(Debug, Clone)]
pub struct MarkSet<A: MarkAttrs, D> {
    marks: IndexMap<String, Mark<A, D>>,
}

impl<A: MarkAttrs, D> Default for MarkSet<A, D> {
    fn default() -> Self {
        Self {
            marks: IndexMap::new(),
        }
    }
}

impl<A: MarkAttrs, D> MarkSet<A, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `targets` against the current marks
    ///
    /// Later targets repeating an earlier key are ignored, so the set never
    /// holds two marks for one key.
    pub fn join(
        &mut self,
        targets: Vec<MarkTarget<A, D>>,
        timings: JoinTimings,
        now: Instant,
    ) -> JoinSummary {
        self.prune(now);

        let mut summary = JoinSummary::default();
        let mut seen = HashSet::with_capacity(targets.len());

        for target in targets {
            if !seen.insert(target.key.clone()) {
                continue;
            }

            match self.marks.get_mut(&target.key) {
                Some(mark) => {
                    mark.attrs.retarget(target.attrs, now, timings.update);
                    mark.datum = target.datum;
                    mark.exiting = false;
                    summary.updated += 1;
                }
                None => {
                    let attrs = Transition::new(
                        target.attrs.collapsed(),
                        target.attrs,
                        now,
                        timings.enter,
                    );
                    self.marks.insert(
                        target.key,
                        Mark {
                            attrs,
                            datum: target.datum,
                            exiting: false,
                        },
                    );
                    summary.entered += 1;
                }
            }
        }

        let leaving: Vec<String> = self
            .marks
            .iter()
            .filter(|(key, mark)| !mark.exiting && !seen.contains(*key))
            .map(|(key, _)| key.clone())
            .collect();
        summary.exited = leaving.len();

        for key in leaving {
            match timings.exit {
                Some(duration) => {
                    if let Some(mark) = self.marks.get_mut(&key) {
                        let collapsed = mark.attrs.value_at(now).collapsed();
                        mark.attrs.retarget(collapsed, now, duration);
                        mark.exiting = true;
                    }
                }
                None => {
                    self.marks.shift_remove(&key);
                }
            }
        }

        summary
    }

    /// Drop exiting marks whose exit transition has finished
    pub fn prune(&mut self, now: Instant) {
        self.marks
            .retain(|_, mark| !(mark.exiting && mark.attrs.is_done(now)));
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Number of marks including those still exiting
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Keys bound to current data, in insertion order
    pub fn keys(&self) -> Vec<&str> {
        self.marks
            .iter()
            .filter(|(_, mark)| !mark.exiting)
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&D> {
        self.marks
            .get(key)
            .filter(|mark| !mark.exiting)
            .map(|mark| &mark.datum)
    }

    /// Final attributes of a live mark
    pub fn target(&self, key: &str) -> Option<&A> {
        self.marks
            .get(key)
            .filter(|mark| !mark.exiting)
            .map(|mark| mark.attrs.target())
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.marks.values().any(|mark| !mark.attrs.is_done(now))
    }

    /// Interpolated state of every mark at `now`
    pub fn frame(&self, now: Instant) -> Vec<MarkFrame<'_, A, D>> {
        self.marks
            .iter()
            .filter(|(_, mark)| !(mark.exiting && mark.attrs.is_done(now)))
            .map(|(key, mark)| MarkFrame {
                key: key.as_str(),
                attrs: mark.attrs.value_at(now),
                datum: &mark.datum,
                exiting: mark.exiting,
            })
            .collect()
    }
}
