//! # edda-dispatch
//!
//! Named-channel callback dispatch for the Edda CMS engine.
//!
//! A [`Dispatcher`] holds ordered listener lists per channel name and fans
//! a payload out to them in one of two modes fixed at construction:
//!
//! - [`DispatchMode::Sequential`] ("event" semantics): handlers run in
//!   registration order on the calling thread, all borrowing the same
//!   mutable payload, so later handlers observe earlier handlers'
//!   mutations. This is the pipeline pattern controllers rely on.
//! - [`DispatchMode::Concurrent`] ("hook" semantics): one thread per
//!   handler, every handler body serialized through a single mutex, and
//!   the call joins all threads before returning. This trades parallel
//!   speedup for isolation; the tradeoff is deliberate and the join is
//!   part of the contract. There is no timeout: a hung handler hangs the
//!   call.
//!
//! Calling a channel nobody listens on is a silent no-op, not an error;
//! callers fire channels speculatively.

use edda_core::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, trace};

/// Payload handed to handlers; downcast to the concrete type inside
pub type Payload = dyn Any + Send;

/// Handler callback stored in a channel's listener list
pub type Handler = dyn Fn(&mut Payload) -> Result<()> + Send + Sync;

/// Execution discipline of a [`Dispatcher`], fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// In-order fan-out on the calling thread with a shared mutable payload
    Sequential,
    /// Thread-per-handler fan-out, serialized by a mutex, joined before return
    Concurrent,
}

/// Named-channel callback dispatcher
pub struct Dispatcher {
    mode: DispatchMode,
    channels: RwLock<HashMap<String, Vec<Arc<Handler>>>>,
}

impl Dispatcher {
    /// Create a dispatcher with the given mode
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            mode,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Create a sequential ("event") dispatcher
    pub fn sequential() -> Self {
        Self::new(DispatchMode::Sequential)
    }

    /// Create a concurrent ("hook") dispatcher
    pub fn concurrent() -> Self {
        Self::new(DispatchMode::Concurrent)
    }

    /// This dispatcher's execution mode
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Append a handler to a channel's listener list
    ///
    /// The channel is created on first use. Listening never replaces
    /// earlier handlers; lists grow until [`delete`](Self::delete).
    pub fn listen<F>(&self, channel: impl Into<String>, handler: F)
    where
        F: Fn(&mut Payload) -> Result<()> + Send + Sync + 'static,
    {
        let channel = channel.into();
        let mut channels = self.channels.write().unwrap();
        let listeners = channels.entry(channel.clone()).or_default();
        listeners.push(Arc::new(handler));
        debug!(
            "Added listener {} for channel '{}'",
            listeners.len(),
            channel
        );
    }

    /// Fan a payload out to every handler on a channel
    ///
    /// Unknown channels are a no-op. In sequential mode the first handler
    /// error aborts the remaining handlers; in concurrent mode every
    /// handler runs, all threads are joined, and the first error observed
    /// is then propagated.
    pub fn call(&self, channel: &str, payload: &mut Payload) -> Result<()> {
        let handlers: Vec<Arc<Handler>> = {
            let channels = self.channels.read().unwrap();
            match channels.get(channel) {
                Some(listeners) => listeners.clone(),
                None => {
                    trace!("No listeners for channel '{}', skipping", channel);
                    return Ok(());
                }
            }
        };

        debug!(
            "Dispatching channel '{}' to {} listener(s)",
            channel,
            handlers.len()
        );

        match self.mode {
            DispatchMode::Sequential => Self::call_sequential(channel, &handlers, payload),
            DispatchMode::Concurrent => Self::call_concurrent(channel, &handlers, payload),
        }
    }

    fn call_sequential(
        channel: &str,
        handlers: &[Arc<Handler>],
        payload: &mut Payload,
    ) -> Result<()> {
        for (index, handler) in handlers.iter().enumerate() {
            handler(&mut *payload)
                .map_err(|e| Error::handler_failed(channel, format!("listener {index}: {e}")))?;
        }
        Ok(())
    }

    fn call_concurrent(
        channel: &str,
        handlers: &[Arc<Handler>],
        payload: &mut Payload,
    ) -> Result<()> {
        // One mutex serializes every handler body; threads give isolation,
        // not parallelism. Handler panics resurface when the scope joins.
        let guarded = Mutex::new(payload);
        let first_error: Mutex<Option<Error>> = Mutex::new(None);

        std::thread::scope(|scope| {
            for (index, handler) in handlers.iter().enumerate() {
                let handler = Arc::clone(handler);
                let guarded = &guarded;
                let first_error = &first_error;

                scope.spawn(move || {
                    let mut payload = guarded.lock().unwrap();
                    if let Err(e) = handler(&mut **payload) {
                        let mut slot = first_error.lock().unwrap();
                        if slot.is_none() {
                            *slot = Some(Error::handler_failed(
                                channel,
                                format!("listener {index}: {e}"),
                            ));
                        }
                    }
                });
            }
        });

        match first_error.into_inner().unwrap() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Remove the entire listener list for each named channel
    ///
    /// Subsequent calls on a deleted channel are no-ops.
    pub fn delete(&self, channels: &[&str]) {
        let mut map = self.channels.write().unwrap();
        for channel in channels {
            if map.remove(*channel).is_some() {
                debug!("Deleted channel '{}'", channel);
            }
        }
    }

    /// Number of listeners on a channel (0 when the channel is unknown)
    pub fn channel_len(&self, channel: &str) -> usize {
        self.channels
            .read()
            .unwrap()
            .get(channel)
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }

    /// Names of all channels that have ever had a listener
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}
