use crate::backend::{BlobStorageProvider, QueueService, RawMessage};
use crate::checkout::{CheckoutReceipt, CheckoutTable};
use crate::config::QueueProviderConfig;
use crate::error::ProviderError;
use crate::overflow::{self, OVERFLOW_CONTAINER};
use crate::poison::{self, PersistedMessageRecord, PersistedMessageSummary, PERSISTED_CONTAINER};
use crate::retry::{SlowInstantiation, TransientServerErrorBackoff};
use crate::serializer::Serializer;
use crate::wire::{MessageEnvelope, MessageWrapper};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::warn;

/// A typed, reliable messaging API layered over a primitive
/// [`QueueService`] and [`BlobStorageProvider`].
///
/// Wraps the two raw backends with four capabilities neither provides on
/// its own: transparent overflow of oversize payloads into blob storage,
/// poison quarantine of repeat-failing messages, in-flight tracking so
/// [`delete`](Self::delete)/[`abandon`](Self::abandon)/[`persist`](Self::persist)
/// take the decoded payload rather than a raw receipt, and a retry policy
/// that tells transient faults apart from terminal ones and from "not
/// found".
///
/// Cheap to share: every field is either `Arc`-wrapped or internally
/// synchronized, so a single `QueueProvider` is meant to be constructed
/// once and called concurrently from any number of tasks.
pub struct QueueProvider<Q, B, S> {
    queue: Arc<Q>,
    blob: Arc<B>,
    serializer: Arc<S>,
    config: QueueProviderConfig,
    checkout: CheckoutTable,
    retry: TransientServerErrorBackoff,
    instantiation: SlowInstantiation,
}

/// The outcome of decoding one raw message during [`get`](QueueProvider::get).
enum Intake<T> {
    /// Decoded straight into the caller's payload type.
    Typed(T),

    /// Decoded as an overflow wrapper; its blob still needs to be fetched
    /// outside the checkout lock, in a second pass.
    Wrapper {
        old_key: Vec<u8>,
        wrapper: MessageWrapper,
    },

    /// Diverted to the poison store (threshold exceeded or undecodable);
    /// nothing to return to the caller.
    Dropped,
}

impl<Q, B, S> QueueProvider<Q, B, S>
where
    Q: QueueService,
    B: BlobStorageProvider,
    S: Serializer<MessageEnvelope> + Serializer<MessageWrapper> + Serializer<PersistedMessageRecord>,
{
    /// Builds a new provider over the given backends, serializer, and
    /// tuning configuration.
    pub fn new(queue: Q, blob: B, serializer: S, config: QueueProviderConfig) -> Self {
        let retry =
            TransientServerErrorBackoff::new(config.retry_backoff().clone(), config.retry_max_attempts());
        let instantiation = SlowInstantiation::new(config.instantiation_backoff().clone());

        Self {
            queue: Arc::new(queue),
            blob: Arc::new(blob),
            serializer: Arc::new(serializer),
            checkout: CheckoutTable::new(),
            retry,
            instantiation,
            config,
        }
    }

    /// Exposes the configuration this provider was built with.
    pub fn config(&self) -> &QueueProviderConfig {
        &self.config
    }

    /// Lists the names of queues whose name starts with `prefix`.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, ProviderError> {
        self.retry
            .retry(|| self.queue.list_queues(prefix))
            .await
            .map_err(ProviderError::from_backend)
    }

    /// Returns an approximate count of messages currently on `queue_name`,
    /// or `0` if the queue does not exist.
    pub async fn approximate_count(&self, queue_name: &str) -> Result<u64, ProviderError> {
        match self.retry.retry(|| self.queue.approximate_count(queue_name)).await {
            Ok(count) => Ok(count),
            Err(error) if error.is_not_found() => Ok(0),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Returns an approximate age of the oldest visible message on
    /// `queue_name`, or `None` if the queue is empty, does not exist, or
    /// the backend cannot report it.
    pub async fn approximate_latency(&self, queue_name: &str) -> Result<Option<Duration>, ProviderError> {
        match self.retry.retry(|| self.queue.approximate_latency(queue_name)).await {
            Ok(latency) => Ok(latency),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Retrieves up to `count` messages from `queue_name`, hiding each for
    /// `visibility_timeout` and registering it in the checkout table.
    ///
    /// A message whose effective dequeue count (accumulated across prior
    /// [`abandon`](Self::abandon) cycles) exceeds `max_trials` is diverted
    /// to this provider's default poison store instead of being returned;
    /// likewise for a message whose bytes fail every decode attempt. The
    /// queue not existing is not an error: it yields an empty sequence.
    pub async fn get<T>(
        &self,
        queue_name: &str,
        count: usize,
        visibility_timeout: Duration,
        max_trials: u32,
    ) -> Result<Vec<T>, ProviderError>
    where
        S: Serializer<T>,
    {
        let raw_messages = match self
            .retry
            .retry(|| self.queue.get_messages(queue_name, count, visibility_timeout))
            .await
        {
            Ok(messages) => messages,
            Err(error) if error.is_not_found() => return Ok(Vec::new()),
            Err(error) => return Err(ProviderError::from_backend(error)),
        };

        let mut results = Vec::with_capacity(raw_messages.len());
        let mut deferred = Vec::new();

        for raw in raw_messages {
            match self.intake_one::<T>(queue_name, raw, max_trials).await? {
                Intake::Typed(value) => results.push(value),
                Intake::Wrapper { old_key, wrapper } => deferred.push((old_key, wrapper)),
                Intake::Dropped => {}
            }
        }

        for (old_key, wrapper) in deferred {
            if let Some(value) = self.resolve_wrapper::<T>(queue_name, old_key, wrapper).await? {
                results.push(value);
            }
        }

        Ok(results)
    }

    /// Adds `message` to `queue_name`, overflowing to a blob if it is too
    /// large for the queue service's per-message ceiling. Creates the
    /// queue (via a patient retry policy) if it does not yet exist.
    pub async fn put<T>(&self, queue_name: &str, message: T) -> Result<(), ProviderError>
    where
        S: Serializer<T>,
    {
        self.put_one(queue_name, &message).await
    }

    /// Adds every message in `messages` to `queue_name`, each handled
    /// independently (so one oversize message overflowing does not affect
    /// the others).
    pub async fn put_range<T>(&self, queue_name: &str, messages: &[T]) -> Result<(), ProviderError>
    where
        S: Serializer<T>,
    {
        for message in messages {
            self.put_one(queue_name, message).await?;
        }

        Ok(())
    }

    /// Deletes `message` (in-flight, i.e. previously returned by
    /// [`get`](Self::get)) and any overflow blob it referenced. Returns
    /// `false` if `message` is not currently checked out.
    pub async fn delete<T>(&self, message: &T) -> Result<bool, ProviderError>
    where
        S: Serializer<T>,
    {
        self.delete_one(message).await
    }

    /// Deletes every message in `messages` that is currently checked out,
    /// returning the number actually deleted.
    pub async fn delete_range<T>(&self, messages: &[T]) -> Result<usize, ProviderError>
    where
        S: Serializer<T>,
    {
        let mut deleted = 0;

        for message in messages {
            if self.delete_one(message).await? {
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Re-enqueues `message` wrapped in an envelope carrying its
    /// accumulated dequeue count, then deletes the original delivery.
    /// Returns `false` if `message` is not currently checked out.
    pub async fn abandon<T>(&self, message: &T) -> Result<bool, ProviderError>
    where
        S: Serializer<T>,
    {
        self.abandon_one(message).await
    }

    /// Abandons every message in `messages` that is currently checked out,
    /// returning the number actually abandoned.
    pub async fn abandon_range<T>(&self, messages: &[T]) -> Result<usize, ProviderError>
    where
        S: Serializer<T>,
    {
        let mut abandoned = 0;

        for message in messages {
            if self.abandon_one(message).await? {
                abandoned += 1;
            }
        }

        Ok(abandoned)
    }

    /// Moves `message` (in-flight) into `store`, annotated with `reason`,
    /// then deletes the original delivery. Returns `false` if `message` is
    /// not currently checked out.
    pub async fn persist<T>(
        &self,
        message: &T,
        store: &str,
        reason: impl Into<String>,
    ) -> Result<bool, ProviderError>
    where
        S: Serializer<T>,
    {
        let key = self.serializer.serialize(message).map_err(ProviderError::from_serde)?;

        let Some((receipt, dequeue_count)) = self.checkout.check_in(&key) else {
            return Ok(false);
        };

        let data = match &receipt.overflow {
            Some(wrapper) => self.serializer.serialize(wrapper).map_err(ProviderError::from_serde)?,
            None => key,
        };

        self.persist_bytes(
            store,
            &receipt.queue_name,
            receipt.insertion_time,
            dequeue_count,
            reason.into(),
            data,
        )
        .await?;

        self.delete_raw(&receipt.queue_name, &receipt.receipt).await?;

        Ok(true)
    }

    /// Lists the keys of every message persisted in `store`.
    pub async fn list_persisted(&self, store: &str) -> Result<Vec<String>, ProviderError> {
        let prefix = format!("{}/", store);

        let names = match self.retry.retry(|| self.blob.list(PERSISTED_CONTAINER, &prefix)).await {
            Ok(names) => names,
            Err(error) if error.is_not_found() => Vec::new(),
            Err(error) => return Err(ProviderError::from_backend(error)),
        };

        Ok(names
            .into_iter()
            .map(|name| name.trim_start_matches(&prefix).to_string())
            .collect())
    }

    /// Fetches the persisted record stored under `key` in `store`, or
    /// `None` if no such record exists.
    pub async fn get_persisted(
        &self,
        store: &str,
        key: &str,
    ) -> Result<Option<PersistedMessageSummary>, ProviderError> {
        let full_key = format!("{}/{}", store, key);

        let Some(bytes) = self.get_persisted_bytes(&full_key).await? else {
            return Ok(None);
        };

        let record: PersistedMessageRecord =
            self.serializer.deserialize(&bytes).map_err(ProviderError::from_serde)?;

        let restorable = self.is_restorable(&record).await?;

        Ok(Some(PersistedMessageSummary::new(key.to_string(), record, restorable)))
    }

    /// Deletes the persisted record stored under `key` in `store`,
    /// along with its overflow blob, if it wraps one.
    pub async fn delete_persisted(&self, store: &str, key: &str) -> Result<(), ProviderError> {
        let full_key = format!("{}/{}", store, key);

        if let Some(bytes) = self.get_persisted_bytes(&full_key).await? {
            let record: Result<PersistedMessageRecord, _> = self.serializer.deserialize(&bytes);

            if let Ok(record) = record {
                let wrapper: Result<MessageWrapper, _> = self.serializer.deserialize(record.data());

                if let Ok(wrapper) = wrapper {
                    self.delete_overflow_blob(&wrapper).await?;
                }
            }
        }

        match self.retry.retry(|| self.blob.delete(PERSISTED_CONTAINER, &full_key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.is_not_found() => Ok(()),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Puts the persisted record's raw bytes back onto its originating
    /// queue verbatim (no envelope), then deletes the record. Returns
    /// `false` if no such record exists.
    pub async fn restore_persisted(&self, store: &str, key: &str) -> Result<bool, ProviderError> {
        let full_key = format!("{}/{}", store, key);

        let Some(bytes) = self.get_persisted_bytes(&full_key).await? else {
            return Ok(false);
        };

        let record: PersistedMessageRecord =
            self.serializer.deserialize(&bytes).map_err(ProviderError::from_serde)?;

        self.add_message_with_create(record.queue_name(), record.data().to_vec())
            .await?;

        match self.retry.retry(|| self.blob.delete(PERSISTED_CONTAINER, &full_key)).await {
            Ok(()) => Ok(true),
            Err(error) if error.is_not_found() => Ok(true),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Deletes every message on `queue_name` and every overflow blob filed
    /// under it, deleting the blobs first so a concurrent reader never
    /// observes a wrapper pointing at a missing blob.
    pub async fn clear(&self, queue_name: &str) -> Result<(), ProviderError> {
        self.delete_overflow_blobs_for_queue(queue_name).await?;

        match self.retry.retry(|| self.queue.clear_queue(queue_name)).await {
            Ok(()) => Ok(()),
            Err(error) if error.is_not_found() => Ok(()),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Deletes `queue_name` itself, along with every overflow blob filed
    /// under it. Returns `false` if the queue did not exist.
    pub async fn delete_queue(&self, queue_name: &str) -> Result<bool, ProviderError> {
        self.delete_overflow_blobs_for_queue(queue_name).await?;

        match self.retry.retry(|| self.queue.delete_queue(queue_name)).await {
            Ok(()) => Ok(true),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    /// Best-effort abandons every message still checked out of this
    /// provider. Meant to be called once, as the last thing before the
    /// provider is dropped; safe to call more than once (a no-op once the
    /// checkout table has drained).
    pub async fn shutdown(&self) {
        for key in self.checkout.snapshot_keys() {
            let Some((receipt, dequeue_count)) = self.checkout.check_in(&key) else {
                continue;
            };

            if let Err(error) = self.requeue_as_abandoned(&receipt, dequeue_count, key).await {
                warn!(
                    alert = true,
                    queue = %receipt.queue_name,
                    ?error,
                    "failed to abandon an in-flight message during queue provider shutdown",
                );
            }
        }
    }

    // ---- internal helpers -------------------------------------------------

    async fn put_one<T>(&self, queue_name: &str, message: &T) -> Result<(), ProviderError>
    where
        S: Serializer<T>,
    {
        let bytes = self.serializer.serialize(message).map_err(ProviderError::from_serde)?;
        let threshold = self.config.message_size_threshold();

        let payload = if bytes.len() > threshold {
            self.overflow_wrap(queue_name, bytes).await?
        } else {
            bytes
        };

        self.add_message_with_create(queue_name, payload).await
    }

    async fn delete_one<T>(&self, message: &T) -> Result<bool, ProviderError>
    where
        S: Serializer<T>,
    {
        let key = self.serializer.serialize(message).map_err(ProviderError::from_serde)?;

        let Some((receipt, _)) = self.checkout.check_in(&key) else {
            return Ok(false);
        };

        if let Some(wrapper) = &receipt.overflow {
            self.delete_overflow_blob(wrapper).await?;
        }

        self.delete_raw(&receipt.queue_name, &receipt.receipt).await?;

        Ok(true)
    }

    async fn abandon_one<T>(&self, message: &T) -> Result<bool, ProviderError>
    where
        S: Serializer<T>,
    {
        let key = self.serializer.serialize(message).map_err(ProviderError::from_serde)?;

        let Some((receipt, dequeue_count)) = self.checkout.check_in(&key) else {
            return Ok(false);
        };

        self.requeue_as_abandoned(&receipt, dequeue_count, key).await?;

        Ok(true)
    }

    /// Re-enqueues `receipt`'s message wrapped in a dequeue-count-carrying
    /// envelope, taking the overflow path if the envelope itself would not
    /// fit under the message size threshold, then deletes the original
    /// delivery. Shared by [`abandon`](Self::abandon) and
    /// [`shutdown`](Self::shutdown), which both need to requeue a checked-out
    /// delivery without knowing its payload type `T` by this point.
    async fn requeue_as_abandoned(
        &self,
        receipt: &CheckoutReceipt,
        dequeue_count: u32,
        payload_bytes: Vec<u8>,
    ) -> Result<(), ProviderError> {
        let inner_bytes = match &receipt.overflow {
            Some(wrapper) => self.serializer.serialize(wrapper).map_err(ProviderError::from_serde)?,
            None => payload_bytes.clone(),
        };

        let envelope = MessageEnvelope::new(dequeue_count, inner_bytes);
        let envelope_bytes = self.serializer.serialize(&envelope).map_err(ProviderError::from_serde)?;

        let threshold = self.config.message_size_threshold();

        let final_bytes = if envelope_bytes.len() > threshold && receipt.overflow.is_none() {
            let wrapped = self.overflow_wrap(&receipt.queue_name, payload_bytes).await?;
            let envelope = MessageEnvelope::new(dequeue_count, wrapped);
            self.serializer.serialize(&envelope).map_err(ProviderError::from_serde)?
        } else {
            envelope_bytes
        };

        self.add_message_with_create(&receipt.queue_name, final_bytes).await?;
        self.delete_raw(&receipt.queue_name, &receipt.receipt).await
    }

    async fn intake_one<T>(
        &self,
        queue_name: &str,
        raw: RawMessage,
        max_trials: u32,
    ) -> Result<Intake<T>, ProviderError>
    where
        S: Serializer<T>,
    {
        let RawMessage {
            receipt,
            bytes,
            dequeue_count,
            insertion_time,
        } = raw;

        let envelope: Result<MessageEnvelope, _> = self.serializer.deserialize(&bytes);

        let (effective_dequeue_count, payload_bytes) = match envelope {
            Ok(envelope) => (envelope.dequeue_count() + dequeue_count, envelope.into_raw_message()),
            Err(_) => (dequeue_count, bytes),
        };

        if effective_dequeue_count > max_trials {
            let reason = format!(
                "dequeued {} times but failed each time",
                effective_dequeue_count - 1
            );

            self.persist_bytes(
                self.config.poison_store_name(),
                queue_name,
                insertion_time,
                effective_dequeue_count,
                reason,
                payload_bytes,
            )
            .await?;

            self.delete_raw(queue_name, &receipt).await?;

            return Ok(Intake::Dropped);
        }

        let typed: Result<T, _> = self.serializer.deserialize(&payload_bytes);

        if let Ok(value) = typed {
            let key = self.serializer.serialize(&value).map_err(ProviderError::from_serde)?;

            self.checkout.check_out(
                key,
                CheckoutReceipt {
                    queue_name: queue_name.to_string(),
                    receipt,
                    insertion_time,
                    overflow: None,
                },
                effective_dequeue_count,
            );

            return Ok(Intake::Typed(value));
        }

        let wrapper: Result<MessageWrapper, _> = self.serializer.deserialize(&payload_bytes);

        if let Ok(wrapper) = wrapper {
            let key = payload_bytes;

            self.checkout.check_out(
                key.clone(),
                CheckoutReceipt {
                    queue_name: queue_name.to_string(),
                    receipt,
                    insertion_time,
                    overflow: Some(wrapper.clone()),
                },
                effective_dequeue_count,
            );

            return Ok(Intake::Wrapper { old_key: key, wrapper });
        }

        self.persist_bytes(
            self.config.poison_store_name(),
            queue_name,
            insertion_time,
            effective_dequeue_count,
            "failed to deserialize (message matched neither the expected payload nor wrapper format)"
                .to_string(),
            payload_bytes,
        )
        .await?;

        self.delete_raw(queue_name, &receipt).await?;

        Ok(Intake::Dropped)
    }

    async fn resolve_wrapper<T>(
        &self,
        queue_name: &str,
        old_key: Vec<u8>,
        wrapper: MessageWrapper,
    ) -> Result<Option<T>, ProviderError>
    where
        S: Serializer<T>,
    {
        let blob = self
            .retry
            .retry(|| self.blob.get(wrapper.container_name(), wrapper.blob_name()))
            .await
            .map_err(ProviderError::from_backend)?;

        let Some(blob_bytes) = blob else {
            if let Some((receipt, _)) = self.checkout.check_in(&old_key) {
                warn!(
                    alert = true,
                    queue = queue_name,
                    container = wrapper.container_name(),
                    blob_name = wrapper.blob_name(),
                    "overflow blob missing for a checked-out message; dropping the orphaned wrapper",
                );

                self.delete_raw(queue_name, &receipt.receipt).await?;
            }

            return Ok(None);
        };

        let value: T = self.serializer.deserialize(&blob_bytes).map_err(ProviderError::from_serde)?;
        let new_key = self.serializer.serialize(&value).map_err(ProviderError::from_serde)?;

        self.checkout.relink(&old_key, new_key);

        Ok(Some(value))
    }

    async fn overflow_wrap(&self, queue_name: &str, bytes: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let blob_name = overflow::overflow_blob_name(queue_name);

        self.retry
            .retry(|| self.blob.put(OVERFLOW_CONTAINER, &blob_name, bytes.clone()))
            .await
            .map_err(ProviderError::from_backend)?;

        let wrapper = MessageWrapper::new(OVERFLOW_CONTAINER, blob_name);

        self.serializer.serialize(&wrapper).map_err(ProviderError::from_serde)
    }

    async fn delete_overflow_blob(&self, wrapper: &MessageWrapper) -> Result<(), ProviderError> {
        match self
            .retry
            .retry(|| self.blob.delete(wrapper.container_name(), wrapper.blob_name()))
            .await
        {
            Ok(()) => Ok(()),
            Err(error) if error.is_not_found() => Ok(()),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    async fn delete_overflow_blobs_for_queue(&self, queue_name: &str) -> Result<(), ProviderError> {
        let prefix = format!("{}/", queue_name);

        let names = match self.retry.retry(|| self.blob.list(OVERFLOW_CONTAINER, &prefix)).await {
            Ok(names) => names,
            Err(error) if error.is_not_found() => Vec::new(),
            Err(error) => return Err(ProviderError::from_backend(error)),
        };

        for name in names {
            match self.retry.retry(|| self.blob.delete(OVERFLOW_CONTAINER, &name)).await {
                Ok(()) => {}
                Err(error) if error.is_not_found() => {}
                Err(error) => return Err(ProviderError::from_backend(error)),
            }
        }

        Ok(())
    }

    async fn add_message_with_create(&self, queue_name: &str, bytes: Vec<u8>) -> Result<(), ProviderError> {
        match self.retry.retry(|| self.queue.add_message(queue_name, bytes.clone())).await {
            Ok(()) => Ok(()),
            Err(error) if error.is_not_found() => {
                self.instantiation
                    .retry(|| self.queue.create_queue(queue_name))
                    .await
                    .map_err(ProviderError::from_backend)?;

                self.retry
                    .retry(|| self.queue.add_message(queue_name, bytes.clone()))
                    .await
                    .map_err(ProviderError::from_backend)
            }
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    async fn delete_raw(&self, queue_name: &str, receipt: &str) -> Result<(), ProviderError> {
        match self.retry.retry(|| self.queue.delete_message(queue_name, receipt)).await {
            Ok(()) => Ok(()),
            Err(error) if error.is_not_found() => Ok(()),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    async fn persist_bytes(
        &self,
        store: &str,
        queue_name: &str,
        insertion_time: SystemTime,
        dequeue_count: u32,
        reason: String,
        data: Vec<u8>,
    ) -> Result<(), ProviderError> {
        let record = PersistedMessageRecord {
            queue_name: queue_name.to_string(),
            insertion_time,
            persistence_time: SystemTime::now(),
            dequeue_count,
            reason,
            data,
        };

        let bytes = self.serializer.serialize(&record).map_err(ProviderError::from_serde)?;
        let key = poison::persisted_record_key(store);

        self.retry
            .retry(|| self.blob.put(PERSISTED_CONTAINER, &key, bytes.clone()))
            .await
            .map_err(ProviderError::from_backend)
    }

    async fn get_persisted_bytes(&self, full_key: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        match self.retry.retry(|| self.blob.get(PERSISTED_CONTAINER, full_key)).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(ProviderError::from_backend(error)),
        }
    }

    async fn is_restorable(&self, record: &PersistedMessageRecord) -> Result<bool, ProviderError> {
        let wrapper: Result<MessageWrapper, _> = self.serializer.deserialize(record.data());

        match wrapper {
            Ok(wrapper) => match self
                .retry
                .retry(|| self.blob.get(wrapper.container_name(), wrapper.blob_name()))
                .await
            {
                Ok(blob) => Ok(blob.is_some()),
                Err(error) if error.is_not_found() => Ok(false),
                Err(error) => Err(ProviderError::from_backend(error)),
            },
            Err(_) => Ok(true),
        }
    }
}
