//! Command handling infrastructure.

use std::marker::PhantomData;

use snapshot_store::{SaveOptions, Snapshot, SnapshotStore, Version};

use crate::aggregate::Aggregate;
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate, T> {
    /// The aggregate after the command.
    pub aggregate: A,

    /// What the command produced besides the new state (e.g. the created record).
    pub output: T,

    /// The version the aggregate is stored at after the command.
    pub new_version: Version,
}

/// Handler for executing commands against a snapshot-persisted aggregate.
///
/// The handler is responsible for:
/// 1. Loading the current snapshot and its version
/// 2. Running the command to produce the next state
/// 3. Saving the next state with optimistic concurrency
///
/// Running steps 1-3 without interleaving is the caller's concern; a stale
/// save is rejected by the store rather than overwriting a newer snapshot.
pub struct CommandHandler<S, A>
where
    S: SnapshotStore,
    A: Aggregate,
{
    store: S,
    _phantom: PhantomData<A>,
}

impl<S, A> CommandHandler<S, A>
where
    S: SnapshotStore,
    A: Aggregate,
{
    /// Creates a new command handler with the given snapshot store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Loads the aggregate.
    ///
    /// If nothing has been stored yet, returns a default instance.
    pub async fn load(&self) -> Result<A, DomainError> {
        let (aggregate, _) = self.load_versioned().await?;
        Ok(aggregate)
    }

    /// Loads the aggregate together with the version it was stored at.
    pub async fn load_versioned(&self) -> Result<(A, Version), DomainError> {
        let snapshot = self
            .store
            .load()
            .await
            .map_err(|source| DomainError::Persistence {
                operation: "load snapshot",
                source,
            })?;

        match snapshot {
            Some(snapshot) => {
                let version = snapshot.version;
                let aggregate: A = snapshot.into_state()?;
                aggregate.check_invariants()?;
                Ok((aggregate, version))
            }
            None => Ok((A::default(), Version::initial())),
        }
    }

    /// Executes a command and persists the resulting state.
    ///
    /// The command function receives the current aggregate and returns either
    /// the next aggregate plus an output value, or an error. A rejected
    /// command stores nothing. A command that returns an unchanged aggregate
    /// stores nothing either.
    pub async fn execute<F, T>(
        &self,
        operation: &'static str,
        command_fn: F,
    ) -> Result<CommandResult<A, T>, DomainError>
    where
        F: FnOnce(&A) -> Result<(A, T), A::Error>,
        DomainError: From<A::Error>,
    {
        let (current, current_version) = self.load_versioned().await?;

        let (aggregate, output) = command_fn(&current)?;

        if aggregate == current {
            return Ok(CommandResult {
                aggregate,
                output,
                new_version: current_version,
            });
        }

        aggregate
            .check_invariants()
            .map_err(|source| DomainError::InvariantBroken { operation, source })?;

        let snapshot = Snapshot::from_state(current_version.next(), &aggregate)?;

        // Persist with optimistic concurrency
        let options = if current_version == Version::initial() {
            SaveOptions::expect_new()
        } else {
            SaveOptions::expect_version(current_version)
        };

        let new_version = self
            .store
            .save(snapshot, options)
            .await
            .map_err(|source| DomainError::Persistence { operation, source })?;

        metrics::counter!("guest_list_snapshot_saves_total").increment(1);
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            operation,
            %new_version,
            "saved snapshot"
        );

        Ok(CommandResult {
            aggregate,
            output,
            new_version,
        })
    }
}
