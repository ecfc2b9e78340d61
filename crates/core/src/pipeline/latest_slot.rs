use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};

/// Producer half of a single-slot channel where a newer value replaces an
/// unconsumed older one.
///
/// Keeps a receiver of its own so it can evict the stale value when the
/// slot is full; the consumer never sees more than the latest item.
pub struct SlotSender<T> {
    tx: Sender<T>,
    evict: Receiver<T>,
}

impl<T> Clone for SlotSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            evict: self.evict.clone(),
        }
    }
}

/// Creates a keep-only-latest channel.
pub fn latest_slot<T>() -> (SlotSender<T>, Receiver<T>) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let sender = SlotSender {
        tx,
        evict: rx.clone(),
    };
    (sender, rx)
}

impl<T> SlotSender<T> {
    /// Stores `item`, returning the value it displaced, if any.
    pub fn publish(&self, mut item: T) -> Option<T> {
        let mut evicted = None;
        loop {
            match self.tx.try_send(item) {
                Ok(()) => return evicted,
                Err(TrySendError::Full(back)) => {
                    item = back;
                    match self.evict.try_recv() {
                        Ok(stale) => evicted = Some(stale),
                        // The consumer took it first; retry.
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => return evicted,
                    }
                }
                // Unreachable while `evict` is alive, but never block on it.
                Err(TrySendError::Disconnected(_)) => return evicted,
            }
        }
    }

    /// Drops whatever is waiting in the slot. Returns how many items were removed.
    pub fn drain(&self) -> usize {
        self.evict.try_iter().count()
    }
}
