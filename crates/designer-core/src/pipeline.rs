use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use designer_client::DesignClient;
use designer_types::{Attachment, Message};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::events::ExchangeEvent;
use crate::exchange::Exchange;
use crate::store::SharedThreadStore;

/// Scope of the "awaiting reply" flag that gates new submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwaitPolicy {
    /// Each thread may have one exchange in flight
    #[default]
    PerThread,
    /// One exchange in flight process-wide
    Global,
}

struct AwaitGate {
    policy: AwaitPolicy,
    /// Thread id → exchange currently holding it
    in_flight: HashMap<String, Uuid>,
}

impl AwaitGate {
    fn new(policy: AwaitPolicy) -> Self {
        Self {
            policy,
            in_flight: HashMap::new(),
        }
    }

    fn is_open_for(&self, thread_id: &str) -> bool {
        match self.policy {
            AwaitPolicy::PerThread => !self.in_flight.contains_key(thread_id),
            AwaitPolicy::Global => self.in_flight.is_empty(),
        }
    }

    /// Free the slot only if `exchange_id` still holds it
    fn release(&mut self, thread_id: &str, exchange_id: Uuid) {
        if self.in_flight.get(thread_id) == Some(&exchange_id) {
            self.in_flight.remove(thread_id);
        }
    }
}

/// Gate slot owned by an exchange from `begin` until it settles
///
/// Dropped unsettled (exchange discarded, future cancelled or task aborted), it
/// replaces the placeholder with the failure notice. Either way the slot is freed.
pub(crate) struct InFlight {
    store: SharedThreadStore,
    gate: Arc<Mutex<AwaitGate>>,
    exchange_id: Uuid,
    thread_id: String,
    settled: bool,
}

impl InFlight {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl fmt::Debug for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("exchange_id", &self.exchange_id)
            .field("thread_id", &self.thread_id)
            .field("settled", &self.settled)
            .finish()
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(
                exchange_id = %self.exchange_id,
                thread_id = %self.thread_id,
                "Exchange abandoned before settling"
            );
            self.store
                .lock()
                .settle_placeholder(&self.thread_id, Message::failure_notice());
        }
        self.gate.lock().release(&self.thread_id, self.exchange_id);
    }
}

/// Turns submissions into durable exchanges
///
/// `begin` appends the user message and the placeholder in one store step;
/// `complete` awaits the remote client and replaces the placeholder with the
/// reply or the failure notice. Failures never escape the pipeline.
#[derive(Clone)]
pub struct MessagePipeline {
    store: SharedThreadStore,
    client: Arc<dyn DesignClient>,
    gate: Arc<Mutex<AwaitGate>>,
}

impl MessagePipeline {
    pub fn new(store: SharedThreadStore, client: Arc<dyn DesignClient>) -> Self {
        Self::with_policy(store, client, AwaitPolicy::default())
    }

    pub fn with_policy(
        store: SharedThreadStore,
        client: Arc<dyn DesignClient>,
        policy: AwaitPolicy,
    ) -> Self {
        Self {
            store,
            client,
            gate: Arc::new(Mutex::new(AwaitGate::new(policy))),
        }
    }

    pub fn store(&self) -> &SharedThreadStore {
        &self.store
    }

    pub fn policy(&self) -> AwaitPolicy {
        self.gate.lock().policy
    }

    pub fn is_awaiting(&self, thread_id: &str) -> bool {
        self.gate.lock().in_flight.contains_key(thread_id)
    }

    pub fn is_awaiting_any(&self) -> bool {
        !self.gate.lock().in_flight.is_empty()
    }

    /// Whether a submission to the active thread would currently be accepted
    pub fn can_submit(&self) -> bool {
        let gate = self.gate.lock();
        let store = self.store.lock();
        gate.is_open_for(store.active_thread_id())
    }

    /// Validate a submission and record it against the active thread
    ///
    /// Returns `None` without touching any state when both the text and the
    /// attachments are empty, when the awaiting gate is closed, or when the
    /// active pointer no longer resolves to a thread.
    pub fn begin(&self, text: impl Into<String>, attachments: Vec<Attachment>) -> Option<Exchange> {
        let text = text.into();
        if text.trim().is_empty() && attachments.is_empty() {
            tracing::debug!("Rejected empty submission");
            return None;
        }

        let mut gate = self.gate.lock();
        let mut store = self.store.lock();
        let thread_id = store.active_thread_id().to_string();

        if !gate.is_open_for(&thread_id) {
            tracing::debug!(thread_id = %thread_id, "Rejected submission while awaiting a reply");
            return None;
        }

        let mut exchange = Exchange::new(thread_id.clone(), text, attachments);
        if !store.append_exchange(&thread_id, exchange.user_message(), Message::placeholder()) {
            tracing::warn!(thread_id = %thread_id, "Active thread vanished, submission dropped");
            return None;
        }
        exchange.mark_submitted();
        gate.in_flight.insert(thread_id.clone(), exchange.id());
        exchange.hold(InFlight {
            store: Arc::clone(&self.store),
            gate: Arc::clone(&self.gate),
            exchange_id: exchange.id(),
            thread_id,
            settled: false,
        });

        tracing::info!(
            exchange_id = %exchange.id(),
            thread_id = exchange.thread_id(),
            attachments = exchange.attachments().len(),
            "Exchange submitted"
        );
        Some(exchange)
    }

    /// Await the remote reply and settle the exchange
    ///
    /// The reply is routed to the thread captured at submission time. If that
    /// thread was deleted meanwhile, the reply is dropped silently. An exchange
    /// that already settled is returned unchanged.
    pub async fn complete(&self, mut exchange: Exchange) -> Exchange {
        let Some(in_flight) = exchange.take_in_flight() else {
            tracing::warn!(
                exchange_id = %exchange.id(),
                state = ?exchange.state(),
                "Exchange is not in flight, nothing to complete"
            );
            return exchange;
        };

        let span = tracing::info_span!(
            "exchange",
            id = %exchange.id(),
            thread_id = exchange.thread_id()
        );

        async {
            let request = exchange.start_awaiting();
            let reply = self.client.send_design_request(request).await;
            if let Err(e) = &reply {
                tracing::warn!(error = %e, "Remote design request failed");
            }

            let terminal = exchange.settle(reply);
            let replaced = self
                .store
                .lock()
                .settle_placeholder(exchange.thread_id(), terminal);
            in_flight.settle();

            if replaced {
                tracing::info!(state = ?exchange.state(), "Exchange settled");
            } else {
                tracing::debug!("Target thread no longer holds the placeholder, reply dropped");
            }
        }
        .instrument(span)
        .await;

        exchange
    }

    /// Submit and wait for the exchange to settle
    pub async fn submit(
        &self,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Option<Exchange> {
        let exchange = self.begin(text, attachments)?;
        Some(self.complete(exchange).await)
    }

    /// Submit and await the reply on a background task
    ///
    /// The submission itself is recorded before this returns. Outside a Tokio
    /// runtime the submission is rejected without touching any state.
    pub fn spawn_submit(
        &self,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Option<mpsc::Receiver<ExchangeEvent>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No Tokio runtime available, submission rejected");
            return None;
        };
        let exchange = self.begin(text, attachments)?;
        let (tx, rx) = mpsc::channel(4);
        let pipeline = self.clone();

        runtime.spawn(async move {
            let exchange_id = exchange.id().to_string();
            let thread_id = exchange.thread_id().to_string();
            let _ = tx
                .send(ExchangeEvent::Submitted {
                    exchange_id: exchange_id.clone(),
                    thread_id: thread_id.clone(),
                })
                .await;

            let exchange = pipeline.complete(exchange).await;
            if let Some(message) = exchange.terminal_message() {
                let _ = tx
                    .send(ExchangeEvent::Settled {
                        exchange_id,
                        thread_id,
                        state: exchange.state(),
                        message: message.clone(),
                    })
                    .await;
            }
        });

        Some(rx)
    }
}
