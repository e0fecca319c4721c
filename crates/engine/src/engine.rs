//! The collaborator surface: every operation a UI layer may call.

use std::sync::Arc;

use contractflow_model::{Blueprint, Contract, ContractStatus, FieldValue, FieldValues};
use contractflow_storage::{ContractStore, JsonFileStore, StorageError};

use crate::blueprint::{
    assign_field_ids, build_blueprint, validate_blueprint_request, BlueprintDraft, NewField,
};
use crate::clock::{timestamp, timestamp_after, Clock, SystemClock};
use crate::config::EngineConfig;
use crate::draft::{DraftContract, FieldSchema};
use crate::error::EngineError;
use crate::ids::{
    IdGenerator, RandomIds, BLUEPRINT_ID_LEN, BLUEPRINT_ID_PREFIX, CONTRACT_ID_LEN,
    CONTRACT_ID_PREFIX,
};
use crate::lifecycle;
use crate::report::{self, ContractRow, GroupCounts, GroupFilter};

/// Blueprint and contract operations over a [`ContractStore`].
///
/// Every operation either completes or fails with an [`EngineError`];
/// a refused operation writes nothing.
pub struct Engine<S> {
    store: S,
    ids: Box<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl Engine<JsonFileStore> {
    /// Open a file-backed engine at `config.storage.data_dir`.
    pub async fn open(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let store = JsonFileStore::open(config.storage.data_dir.clone()).await?;
        Ok(Engine::new(store).with_config(config))
    }
}

impl<S: ContractStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: Box::new(RandomIds),
            clock: Arc::new(SystemClock),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn now(&self) -> Result<String, EngineError> {
        Ok(timestamp(self.clock.as_ref())?)
    }

    /// Stamp for a commit over a contract last stamped `base`.
    fn stamp_after(&self, base: &str) -> Result<String, EngineError> {
        Ok(timestamp_after(self.clock.as_ref(), base)?)
    }

    fn max_attempts(&self) -> u32 {
        self.config.ids.max_attempts.max(1)
    }

    // ── Blueprints ───────────────────────────────────────────────────────────

    /// Validate, assign ids, stamp and append a new blueprint.
    ///
    /// Refused with `Validation` before any write for an empty name, an
    /// empty field list or an unlabeled field.
    pub async fn create_blueprint(
        &self,
        name: &str,
        description: &str,
        fields: Vec<NewField>,
    ) -> Result<Blueprint, EngineError> {
        if let Err(e) = validate_blueprint_request(name, &fields) {
            tracing::warn!(name, error = %e, "blueprint creation refused");
            return Err(e);
        }
        let fields = assign_field_ids(fields, self.ids.as_ref(), self.max_attempts())?;
        let created_at = self.now()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let id = self.ids.generate(BLUEPRINT_ID_PREFIX, BLUEPRINT_ID_LEN);
            let blueprint = build_blueprint(id, name, description, fields.clone(), created_at.clone());
            match self.store.append_blueprint(blueprint.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        blueprint_id = %blueprint.id,
                        name = %blueprint.name,
                        fields = blueprint.fields.len(),
                        "created blueprint"
                    );
                    return Ok(blueprint);
                }
                Err(StorageError::DuplicateId { id, .. }) if attempt < self.max_attempts() => {
                    tracing::warn!(id = %id, attempt, "blueprint id collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Create a blueprint from a draft assembled field by field.
    pub async fn publish_blueprint(&self, draft: BlueprintDraft) -> Result<Blueprint, EngineError> {
        let (name, description, fields) = draft.into_parts();
        self.create_blueprint(&name, &description, fields).await
    }

    pub async fn list_blueprints(&self) -> Result<Vec<Blueprint>, EngineError> {
        Ok(self.store.list_blueprints().await?)
    }

    pub async fn get_blueprint(&self, id: &str) -> Result<Blueprint, EngineError> {
        self.store
            .get_blueprint(id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: "blueprint",
                id: id.to_string(),
            })
    }

    // ── Contracts ────────────────────────────────────────────────────────────

    /// Instantiate a blueprint as a CREATED contract with no field values.
    pub async fn create_contract(
        &self,
        blueprint_id: &str,
        name: &str,
    ) -> Result<Contract, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::validation("contract name must not be empty"));
        }
        if blueprint_id.trim().is_empty() {
            return Err(EngineError::validation("no blueprint selected"));
        }
        let blueprint = self.get_blueprint(blueprint_id).await?;
        let created_at = self.now()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let contract = Contract {
                id: self.ids.generate(CONTRACT_ID_PREFIX, CONTRACT_ID_LEN),
                name: name.to_string(),
                blueprint_id: blueprint.id.clone(),
                status: ContractStatus::Created,
                field_values: FieldValues::new(),
                created_at: created_at.clone(),
                updated_at: created_at.clone(),
            };
            match self.store.append_contract(contract.clone()).await {
                Ok(()) => {
                    tracing::info!(
                        contract_id = %contract.id,
                        blueprint_id = %contract.blueprint_id,
                        name = %contract.name,
                        "created contract"
                    );
                    return Ok(contract);
                }
                Err(StorageError::DuplicateId { id, .. }) if attempt < self.max_attempts() => {
                    tracing::warn!(id = %id, attempt, "contract id collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub async fn list_contracts(&self) -> Result<Vec<Contract>, EngineError> {
        Ok(self.store.list_contracts().await?)
    }

    pub async fn get_contract(&self, id: &str) -> Result<Contract, EngineError> {
        self.store
            .get_contract(id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: "contract",
                id: id.to_string(),
            })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Open a working copy of a persisted contract.
    ///
    /// With `validation.reject_unknown_fields` the contract's blueprint is
    /// loaded so staged values can be checked. A blueprint reference that no
    /// longer resolves defines no fields: every staged value is refused with
    /// `UnknownField`, while status transitions stay available.
    pub async fn open_draft(&self, contract_id: &str) -> Result<DraftContract, EngineError> {
        let contract = self.get_contract(contract_id).await?;
        let schema = if self.config.validation.reject_unknown_fields {
            match self.store.get_blueprint(&contract.blueprint_id).await? {
                Some(blueprint) => FieldSchema::Strict(blueprint.fields),
                None => {
                    tracing::warn!(
                        contract_id = %contract.id,
                        blueprint_id = %contract.blueprint_id,
                        "blueprint missing, no field values can be staged"
                    );
                    FieldSchema::Strict(Vec::new())
                }
            }
        } else {
            FieldSchema::Open
        };
        Ok(DraftContract::open(contract, schema, Arc::clone(&self.clock)))
    }

    /// Move the draft's contract to `target`, committing its staged field
    /// values in the same write.
    pub async fn advance_draft(
        &self,
        draft: DraftContract,
        target: ContractStatus,
    ) -> Result<Contract, EngineError> {
        let (working, base_updated_at, _) = draft.into_parts();
        let now = self.stamp_after(&base_updated_at)?;
        let next = match lifecycle::apply_transition(&working, target, &now) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(contract_id = %working.id, from = %working.status, to = %target, "transition refused");
                return Err(e);
            }
        };
        self.store
            .replace_contract_if_unchanged(next.clone(), &base_updated_at)
            .await?;
        tracing::info!(
            contract_id = %next.id,
            from = %working.status,
            to = %next.status,
            "advanced contract"
        );
        Ok(next)
    }

    /// Persist the draft's staged field values without a status change.
    ///
    /// A draft with nothing staged writes nothing; the contract as currently
    /// stored is returned, which may be newer than the draft.
    pub async fn commit_draft(&self, draft: DraftContract) -> Result<Contract, EngineError> {
        let (mut working, base_updated_at, dirty) = draft.into_parts();
        if !dirty {
            return self.get_contract(&working.id).await;
        }
        lifecycle::check_editable(&working)?;
        working.updated_at = self.stamp_after(&base_updated_at)?;
        self.store
            .replace_contract_if_unchanged(working.clone(), &base_updated_at)
            .await?;
        tracing::info!(
            contract_id = %working.id,
            values = working.field_values.len(),
            "committed field values"
        );
        Ok(working)
    }

    /// Advance a persisted contract with no staged edits.
    pub async fn advance(
        &self,
        contract_id: &str,
        target: ContractStatus,
    ) -> Result<Contract, EngineError> {
        let draft = self.open_draft(contract_id).await?;
        self.advance_draft(draft, target).await
    }

    /// Set one field value and commit it immediately.
    pub async fn set_field_value(
        &self,
        contract_id: &str,
        field_id: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Contract, EngineError> {
        let mut draft = self.open_draft(contract_id).await?;
        draft.set_field_value(field_id, value)?;
        self.commit_draft(draft).await
    }

    // ── Reporting ────────────────────────────────────────────────────────────

    pub async fn group_counts(&self) -> Result<GroupCounts, EngineError> {
        let contracts = self.store.list_contracts().await?;
        Ok(report::count_by_group(&contracts))
    }

    pub async fn search_contracts(
        &self,
        filter: GroupFilter,
        search: &str,
    ) -> Result<Vec<Contract>, EngineError> {
        let contracts = self.store.list_contracts().await?;
        Ok(report::filter_contracts(&contracts, filter, search)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Filtered dashboard rows with blueprint names resolved.
    pub async fn dashboard_rows(
        &self,
        filter: GroupFilter,
        search: &str,
    ) -> Result<Vec<ContractRow>, EngineError> {
        let contracts = self.store.list_contracts().await?;
        let blueprints = self.store.list_blueprints().await?;
        let matched = report::filter_contracts(&contracts, filter, search);
        Ok(report::contract_rows(matched, &blueprints))
    }
}
