//! Two-phase fragment delivery: buffer until a registry is installed

use tracing::{debug, warn};

use crate::fragment::Fragment;
use crate::registry::Registry;

/// The slot state: buffering deliveries, or live with an installed
/// registry.
#[derive(Debug)]
enum Slot {
    /// No registry yet; fragments accumulate in arrival order
    Buffering(Vec<Fragment>),

    /// Registry installed; deliveries merge synchronously
    Live(Registry),
}

/// The delivery channel fragments arrive through.
///
/// Fragments can be delivered before the registry exists. The channel
/// starts out buffering; once a registry is installed, the buffered
/// fragments are drained through the live merge path in arrival order,
/// and every later delivery merges synchronously. Both arrival orders
/// converge to the same merged state.
///
/// Exactly one of the two paths happens per delivery, and delivery
/// itself never fails — malformed records are the registry's concern.
///
/// # Example
///
/// ```
/// use traitdex::{DeliveryChannel, Fragment, ImplementorRecord};
///
/// let mut channel = DeliveryChannel::new();
///
/// // Delivered before any registry exists: buffered.
/// channel.deliver(Fragment::from_records(vec![
///     ImplementorRecord::new("Display", "Foo", "crate_x"),
/// ]));
/// assert!(!channel.is_live());
///
/// // Installation drains the buffer through the merge path.
/// channel.initialize();
/// let registry = channel.registry().unwrap();
/// assert_eq!(registry.implementors("Display").count(), 1);
/// ```
#[derive(Debug)]
pub struct DeliveryChannel {
    slot: Slot,
}

impl Default for DeliveryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryChannel {
    /// Create a channel with no registry installed.
    pub fn new() -> Self {
        Self {
            slot: Slot::Buffering(Vec::new()),
        }
    }

    /// Deliver a fragment.
    ///
    /// Merges synchronously when a registry is live; otherwise appends
    /// to the pending buffer for the drain at installation time.
    pub fn deliver(&mut self, fragment: Fragment) {
        match &mut self.slot {
            Slot::Live(registry) => registry.merge(&fragment),
            Slot::Buffering(pending) => pending.push(fragment),
        }
    }

    /// Install a registry as the live merge target.
    ///
    /// Drains any pending fragments in arrival order through the same
    /// merge path used for live delivery. A second installation is
    /// ignored; the slot is filled exactly once.
    pub fn install(&mut self, mut registry: Registry) {
        match std::mem::replace(&mut self.slot, Slot::Buffering(Vec::new())) {
            Slot::Live(existing) => {
                warn!("registry already installed; ignoring second install");
                self.slot = Slot::Live(existing);
            }
            Slot::Buffering(pending) => {
                debug!(pending = pending.len(), "draining buffered fragments");
                for fragment in pending {
                    registry.merge(&fragment);
                }
                self.slot = Slot::Live(registry);
            }
        }
    }

    /// Install a fresh empty registry. Equivalent to
    /// `install(Registry::new())`.
    pub fn initialize(&mut self) {
        self.install(Registry::new());
    }

    /// The live registry, for querying. `None` while still buffering.
    pub fn registry(&self) -> Option<&Registry> {
        match &self.slot {
            Slot::Live(registry) => Some(registry),
            Slot::Buffering(_) => None,
        }
    }

    /// Mutable access to the live registry. `None` while still
    /// buffering.
    pub fn registry_mut(&mut self) -> Option<&mut Registry> {
        match &mut self.slot {
            Slot::Live(registry) => Some(registry),
            Slot::Buffering(_) => None,
        }
    }

    /// Whether a registry has been installed.
    pub fn is_live(&self) -> bool {
        matches!(self.slot, Slot::Live(_))
    }

    /// Number of fragments waiting for installation. Zero once live.
    pub fn pending_len(&self) -> usize {
        match &self.slot {
            Slot::Buffering(pending) => pending.len(),
            Slot::Live(_) => 0,
        }
    }
}
