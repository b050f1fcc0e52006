use std::{fmt, sync::Arc};

use tokio::sync::watch;

use crate::SlotClosed;

/// Both slots live in one channel value, so a pair written together is
/// always read together. Each slot carries its own version so subscribers
/// can wait on one slot without waking for the other.
struct Slots<A, D> {
    adapter: Option<Arc<A>>,
    device: Option<Arc<D>>,
    adapter_version: u64,
    device_version: u64,
}

impl<A, D> Default for Slots<A, D> {
    fn default() -> Self {
        Self {
            adapter: None,
            device: None,
            adapter_version: 0,
            device_version: 0,
        }
    }
}

/// Owner of the "current adapter" and "current device" slots.
///
/// There is exactly one publisher per pair of slots. Writing requires
/// `&mut self`, so two initializations can never race on the same slots.
/// Readers obtain a [`GpuSubscriber`] through [`subscribe`](Self::subscribe).
pub struct GpuPublisher<A, D> {
    slots: watch::Sender<Slots<A, D>>,
}

impl<A, D> GpuPublisher<A, D> {
    /// Creates a new publisher with both slots empty.
    pub fn new() -> Self {
        let (slots, _) = watch::channel(Slots::default());

        Self { slots }
    }

    /// Returns a new read handle on both slots.
    pub fn subscribe(&self) -> GpuSubscriber<A, D> {
        let slots = self.slots.subscribe();
        let (adapter_seen, device_seen) = {
            let current = slots.borrow();
            (current.adapter_version, current.device_version)
        };

        GpuSubscriber {
            slots,
            adapter_seen,
            device_seen,
        }
    }

    /// The currently published adapter.
    pub fn adapter(&self) -> Option<Arc<A>> {
        self.slots.borrow().adapter.clone()
    }

    /// The currently published device.
    pub fn device(&self) -> Option<Arc<D>> {
        self.slots.borrow().device.clone()
    }

    /// Empties both slots in a single update.
    pub fn clear(&mut self) {
        self.slots.send_modify(|slots| {
            slots.adapter = None;
            slots.device = None;
            slots.adapter_version += 1;
            slots.device_version += 1;
        });
    }

    pub(super) fn publish_adapter(&mut self, adapter: Arc<A>) {
        self.slots.send_modify(|slots| {
            slots.adapter = Some(adapter);
            slots.adapter_version += 1;
        });
    }

    pub(super) fn publish_device(&mut self, device: Arc<D>) {
        self.slots.send_modify(|slots| {
            slots.device = Some(device);
            slots.device_version += 1;
        });
    }

    /// Replaces both slots in a single update. No subscriber can observe the
    /// new adapter next to the previous device.
    pub(super) fn publish(&mut self, adapter: Arc<A>, device: Arc<D>) {
        self.slots.send_modify(|slots| {
            slots.adapter = Some(adapter);
            slots.device = Some(device);
            slots.adapter_version += 1;
            slots.device_version += 1;
        });
    }
}

impl<A, D> Default for GpuPublisher<A, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, D> fmt::Debug for GpuPublisher<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        f.debug_struct("GpuPublisher")
            .field("adapter", &slots.adapter.is_some())
            .field("device", &slots.device.is_some())
            .finish()
    }
}

/// Read handle on the slots of a [`GpuPublisher`].
///
/// Each subscriber tracks which values it has already seen, so the
/// `*_changed` methods only resolve on publishes made after the last value
/// this subscriber observed.
pub struct GpuSubscriber<A, D> {
    slots: watch::Receiver<Slots<A, D>>,
    adapter_seen: u64,
    device_seen: u64,
}

impl<A, D> GpuSubscriber<A, D> {
    /// The currently published adapter.
    pub fn adapter(&self) -> Option<Arc<A>> {
        self.slots.borrow().adapter.clone()
    }

    /// The currently published device.
    pub fn device(&self) -> Option<Arc<D>> {
        self.slots.borrow().device.clone()
    }

    /// The currently published adapter and device, read in one go.
    pub fn snapshot(&self) -> (Option<Arc<A>>, Option<Arc<D>>) {
        let slots = self.slots.borrow();
        (slots.adapter.clone(), slots.device.clone())
    }

    /// Waits for the next adapter publish and returns the new value.
    pub async fn adapter_changed(&mut self) -> Result<Option<Arc<A>>, SlotClosed> {
        loop {
            {
                let slots = self.slots.borrow_and_update();
                if slots.adapter_version != self.adapter_seen {
                    self.adapter_seen = slots.adapter_version;
                    return Ok(slots.adapter.clone());
                }
            }
            self.slots.changed().await.map_err(|_| SlotClosed)?;
        }
    }

    /// Waits for the next device publish and returns the new value.
    pub async fn device_changed(&mut self) -> Result<Option<Arc<D>>, SlotClosed> {
        loop {
            {
                let slots = self.slots.borrow_and_update();
                if slots.device_version != self.device_seen {
                    self.device_seen = slots.device_version;
                    return Ok(slots.device.clone());
                }
            }
            self.slots.changed().await.map_err(|_| SlotClosed)?;
        }
    }

    /// Waits until a device is published, returning immediately if one
    /// already is.
    pub async fn wait_for_device(&mut self) -> Result<Arc<D>, SlotClosed> {
        loop {
            {
                let slots = self.slots.borrow_and_update();
                self.device_seen = slots.device_version;
                if let Some(device) = &slots.device {
                    return Ok(Arc::clone(device));
                }
            }
            self.slots.changed().await.map_err(|_| SlotClosed)?;
        }
    }
}

impl<A, D> Clone for GpuSubscriber<A, D> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            adapter_seen: self.adapter_seen,
            device_seen: self.device_seen,
        }
    }
}
