//! In-memory store implementations for tests, demos and seeding

use crate::error::{PricingError, Result};
use crate::model::CoefficientArtifact;
use crate::store::{
    ArtifactStore, CompetitorRecord, DemandRecord, Item, ObservationStore, SalesRecord,
};

/// Observation store backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObservationStore {
    items: Vec<Item>,
    sales: Vec<SalesRecord>,
    demand: Vec<DemandRecord>,
    competitor: Vec<CompetitorRecord>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn record_sale(&mut self, record: SalesRecord) {
        self.sales.push(record);
    }

    pub fn record_demand(&mut self, record: DemandRecord) {
        self.demand.push(record);
    }

    pub fn record_competitor(&mut self, record: CompetitorRecord) {
        self.competitor.push(record);
    }
}

fn filtered<T: Clone>(records: &[T], item_id: Option<i64>, id_of: impl Fn(&T) -> i64) -> Vec<T> {
    match item_id {
        Some(id) => records.iter().filter(|r| id_of(r) == id).cloned().collect(),
        None => records.to_vec(),
    }
}

impl ObservationStore for InMemoryObservationStore {
    fn list_sales(&self, item_id: Option<i64>) -> Result<Vec<SalesRecord>> {
        Ok(filtered(&self.sales, item_id, |r| r.item_id))
    }

    fn list_demand(&self, item_id: Option<i64>) -> Result<Vec<DemandRecord>> {
        Ok(filtered(&self.demand, item_id, |r| r.item_id))
    }

    fn list_competitor(&self, item_id: Option<i64>) -> Result<Vec<CompetitorRecord>> {
        Ok(filtered(&self.competitor, item_id, |r| r.item_id))
    }

    fn get_item(&self, item_id: i64) -> Result<Item> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or(PricingError::ItemNotFound(item_id))
    }
}

/// Artifact store holding the coefficient vector in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore {
    artifact: Option<CoefficientArtifact>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn load(&self) -> Result<Option<CoefficientArtifact>> {
        Ok(self.artifact.clone())
    }

    fn save(&mut self, artifact: &CoefficientArtifact) -> Result<()> {
        self.artifact = Some(artifact.clone());
        Ok(())
    }
}
