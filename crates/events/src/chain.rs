//! Sequential, predicate-gated forwarding pipeline (chain of responsibility).
//!
//! A [`HandlerChain`] owns an ordered list of [`ChainLink`]s. Handling an event
//! starts at the head and walks strictly forward, one link at a time, until a
//! link stops the walk or the end is reached.
//!
//! ## Wiring policies
//!
//! Each link chooses how its `accepts` predicate gates the walk:
//!
//! | policy | `accepts` false | `accepts` true |
//! |---|---|---|
//! | [`LinkPolicy::GateThenForward`] | skip `process`, forward | `process`, then forward unless it halts |
//! | [`LinkPolicy::AcceptStopsChain`] | stop: the event is rejected | `process`, then forward unless it halts |
//!
//! Both policies can coexist in one chain (an auth check in front of
//! unconditional persistence and alerting links, for example).
//!
//! ## Successors
//!
//! Links never reference each other. A link's successor is simply the next
//! slot in the chain, so cycles cannot be built and every walk visits each
//! link at most once.

use std::sync::Arc;

use switchyard_core::Event;

use crate::snapshot::Snapshot;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Process only if accepted; always forward.
    #[default]
    GateThenForward,
    /// Refuse to forward anything that is not accepted.
    AcceptStopsChain,
}

/// What a link wants to happen after it processed an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Forward,
    Halt,
}

/// One stage in a sequential, gated forwarding pipeline.
///
/// Links are usable on their own: [`ChainLink::evaluate`] applies the link's
/// policy to an event without any chain around it.
pub trait ChainLink: Send + Sync {
    /// Stable name, reported in [`ChainReport`] trails.
    fn name(&self) -> &str;

    fn accepts(&self, event: &Event) -> bool;

    fn process(&self, event: &Event) -> Flow;

    fn policy(&self) -> LinkPolicy {
        LinkPolicy::GateThenForward
    }

    /// Apply this link's policy to `event`.
    fn evaluate(&self, event: &Event) -> Step {
        match (self.accepts(event), self.policy()) {
            (true, _) => Step::Processed(self.process(event)),
            (false, LinkPolicy::GateThenForward) => Step::Skipped,
            (false, LinkPolicy::AcceptStopsChain) => Step::Rejected,
        }
    }
}

/// Result of evaluating a single link.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// The link processed the event and asked for this flow.
    Processed(Flow),
    /// Gate closed; the event passes through untouched.
    Skipped,
    /// Gate closed on an accept-stops-chain link; the walk ends here.
    Rejected,
}

/// A link built from closures.
pub struct FnLink<A, P> {
    name: String,
    policy: LinkPolicy,
    accepts: A,
    process: P,
}

impl<A, P> FnLink<A, P>
where
    A: Fn(&Event) -> bool + Send + Sync,
    P: Fn(&Event) -> Flow + Send + Sync,
{
    pub fn new(name: impl Into<String>, accepts: A, process: P) -> Self {
        Self {
            name: name.into(),
            policy: LinkPolicy::default(),
            accepts,
            process,
        }
    }

    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<A, P> ChainLink for FnLink<A, P>
where
    A: Fn(&Event) -> bool + Send + Sync,
    P: Fn(&Event) -> Flow + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, event: &Event) -> bool {
        (self.accepts)(event)
    }

    fn process(&self, event: &Event) -> Flow {
        (self.process)(event)
    }

    fn policy(&self) -> LinkPolicy {
        self.policy
    }
}

impl<A, P> core::fmt::Debug for FnLink<A, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnLink")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// A link the walk reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkVisit {
    pub link: String,
    /// Whether `process` ran for this link.
    pub processed: bool,
}

/// Why a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStop {
    /// The chain has no links.
    Empty,
    /// Walked past the tail. Normal termination, not an error.
    Exhausted,
    /// A link processed the event and returned [`Flow::Halt`].
    Halted { link: String },
    /// An accept-stops-chain link refused the event.
    Rejected { link: String },
}

/// Trail and terminal outcome of one [`HandlerChain::handle`] call.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub trail: Vec<LinkVisit>,
    pub stop: ChainStop,
}

impl ChainReport {
    /// `true` if the walk was not refused and at least one link ran `process`.
    ///
    /// A walk that reaches the tail with every gate closed is `Exhausted` but
    /// not handled.
    pub fn is_handled(&self) -> bool {
        let refused = matches!(self.stop, ChainStop::Empty | ChainStop::Rejected { .. });
        !refused && self.trail.iter().any(|v| v.processed)
    }

    /// Names of the links that ran `process`, in order.
    pub fn processed(&self) -> Vec<&str> {
        self.trail
            .iter()
            .filter(|v| v.processed)
            .map(|v| v.link.as_str())
            .collect()
    }

    /// Names of every link the walk reached, in order.
    pub fn visited(&self) -> Vec<&str> {
        self.trail.iter().map(|v| v.link.as_str()).collect()
    }
}

/// Ordered sequence of gated links.
///
/// The first appended link is the head; each `append` makes the new link the
/// successor of the previous tail. `handle` runs against a snapshot, so links
/// appended while a walk is in progress take part from the next walk.
#[derive(Default)]
pub struct HandlerChain {
    links: Snapshot<Vec<Arc<dyn ChainLink>>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<L>(&self, link: L)
    where
        L: ChainLink + 'static,
    {
        self.append_arc(Arc::new(link));
    }

    /// Like [`HandlerChain::append`], for links that are already shared.
    pub fn append_arc(&self, link: Arc<dyn ChainLink>) {
        self.links.update(|links| links.push(link));
    }

    /// Builder-style [`HandlerChain::append`].
    pub fn with<L>(self, link: L) -> Self
    where
        L: ChainLink + 'static,
    {
        self.append(link);
        self
    }

    /// Walk the chain from its head.
    pub fn handle(&self, event: &Event) -> ChainReport {
        let links = self.links.load();
        let mut trail = Vec::with_capacity(links.len());

        if links.is_empty() {
            return ChainReport {
                trail,
                stop: ChainStop::Empty,
            };
        }

        for link in links.iter() {
            let name = link.name().to_string();
            match link.evaluate(event) {
                Step::Rejected => {
                    tracing::debug!("link '{}' rejected event '{}'", name, event.name());
                    trail.push(LinkVisit {
                        link: name.clone(),
                        processed: false,
                    });
                    return ChainReport {
                        trail,
                        stop: ChainStop::Rejected { link: name },
                    };
                }
                Step::Skipped => trail.push(LinkVisit {
                    link: name,
                    processed: false,
                }),
                Step::Processed(Flow::Forward) => trail.push(LinkVisit {
                    link: name,
                    processed: true,
                }),
                Step::Processed(Flow::Halt) => {
                    trail.push(LinkVisit {
                        link: name.clone(),
                        processed: true,
                    });
                    return ChainReport {
                        trail,
                        stop: ChainStop::Halted { link: name },
                    };
                }
            }
        }

        ChainReport {
            trail,
            stop: ChainStop::Exhausted,
        }
    }

    /// The head link, if any.
    pub fn head(&self) -> Option<Arc<dyn ChainLink>> {
        self.links.load().first().cloned()
    }

    /// Link names in walk order.
    pub fn names(&self) -> Vec<String> {
        self.links
            .load()
            .iter()
            .map(|l| l.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.links.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("links", &self.names())
            .finish()
    }
}
