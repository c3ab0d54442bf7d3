use crate::core::id::MonotonicIdGenerator;
use crate::core::search;
use crate::core::{ConfigProvider, CorruptFilePolicy, IdGenerator, PlaceRepository, Storage};
use crate::domain::model::{PlaceDraft, PlaceRecord};
use crate::utils::error::{PlaceError, Result};
use crate::utils::validation::Validate;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// 產生器回傳已使用的 id 時最多重試的次數
const MAX_ID_ATTEMPTS: usize = 16;

/// In-memory list of places backed by a single JSON file.
///
/// Every mutation holds the list lock until the file write finishes, so the
/// file always reflects the last completed mutation. Newest places come first.
pub struct PlaceStore<S: Storage, G: IdGenerator = MonotonicIdGenerator> {
    storage: S,
    file_name: String,
    places: Mutex<Vec<PlaceRecord>>,
    ids: G,
}

impl<S: Storage> PlaceStore<S, MonotonicIdGenerator> {
    pub async fn open<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        Self::open_with_ids(storage, config, MonotonicIdGenerator::new()).await
    }
}

impl<S: Storage, G: IdGenerator> PlaceStore<S, G> {
    pub async fn open_with_ids<C: ConfigProvider>(storage: S, config: &C, ids: G) -> Result<Self> {
        let file_name = config.file_name().to_string();
        let places = load_places(&storage, &file_name, config.corrupt_policy()).await?;

        for place in &places {
            ids.observe(place.id);
        }

        tracing::info!(
            "📂 Loaded {} places from {}",
            places.len(),
            storage.describe(&file_name)
        );

        Ok(Self {
            storage,
            file_name,
            places: Mutex::new(places),
            ids,
        })
    }

    pub async fn list_all(&self) -> Vec<PlaceRecord> {
        self.places.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.places.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.places.lock().await.is_empty()
    }

    pub async fn get(&self, id: i64) -> Option<PlaceRecord> {
        self.places
            .lock()
            .await
            .iter()
            .find(|place| place.id == id)
            .cloned()
    }

    pub async fn search(&self, query: &str) -> Vec<PlaceRecord> {
        search::filter(&self.places.lock().await, query)
    }

    pub async fn add(&self, draft: PlaceDraft) -> Result<PlaceRecord> {
        draft.validate()?;

        let mut places = self.places.lock().await;
        let id = self.fresh_id(&places)?;

        let record = PlaceRecord::from_draft(id, draft);
        places.insert(0, record.clone());
        tracing::debug!("➕ Added place {} ({})", record.id, record.title);

        self.persist(&places).await?;
        Ok(record)
    }

    pub async fn update(&self, id: i64, draft: PlaceDraft) -> Result<PlaceRecord> {
        draft.validate()?;

        let mut places = self.places.lock().await;
        let place = places
            .iter_mut()
            .find(|place| place.id == id)
            .ok_or(PlaceError::NotFoundError { id })?;

        place.apply(draft);
        let record = place.clone();
        tracing::debug!("✏️ Updated place {} ({})", record.id, record.title);

        self.persist(&places).await?;
        Ok(record)
    }

    /// Returns whether a place was removed. The file is rewritten either way.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut places = self.places.lock().await;
        let before = places.len();
        places.retain(|place| place.id != id);
        let removed = places.len() != before;

        if removed {
            tracing::debug!("🗑️ Deleted place {}", id);
        } else {
            tracing::debug!("Delete of unknown place {} is a no-op", id);
        }

        self.persist(&places).await?;
        Ok(removed)
    }

    fn fresh_id(&self, places: &[PlaceRecord]) -> Result<i64> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id()?;
            if places.iter().all(|place| place.id != id) {
                return Ok(id);
            }
            tracing::debug!("Id {} already in use, drawing another", id);
        }
        Err(PlaceError::validation(
            "id",
            format!("no unused id after {} attempts", MAX_ID_ATTEMPTS),
        ))
    }

    pub fn location(&self) -> String {
        self.storage.describe(&self.file_name)
    }

    async fn persist(&self, places: &[PlaceRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(places)?;

        self.storage
            .write_file(&self.file_name, &data)
            .await
            .map_err(|e| {
                tracing::error!("❌ Failed to save places: {}", e);
                PlaceError::persistence(self.location(), e)
            })?;

        tracing::debug!("💾 Saved {} places to {}", places.len(), self.location());
        Ok(())
    }
}

async fn load_places<S: Storage>(
    storage: &S,
    file_name: &str,
    policy: CorruptFilePolicy,
) -> Result<Vec<PlaceRecord>> {
    let location = storage.describe(file_name);

    let bytes = match storage.read_file(file_name).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!("No places file at {}, starting empty", location);
            return Ok(Vec::new());
        }
        Err(e) => return degrade(policy, &location, e),
    };

    // 空檔案視同沒有資料
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    match serde_json::from_slice::<Option<Vec<PlaceRecord>>>(&bytes) {
        Ok(places) => Ok(dedupe_ids(places.unwrap_or_default())),
        Err(e) => degrade(policy, &location, e),
    }
}

fn degrade(
    policy: CorruptFilePolicy,
    location: &str,
    error: impl std::fmt::Display,
) -> Result<Vec<PlaceRecord>> {
    match policy {
        CorruptFilePolicy::StartEmpty => {
            tracing::warn!(
                "⚠️ Could not load places from {} ({}), starting with an empty list",
                location,
                error
            );
            Ok(Vec::new())
        }
        CorruptFilePolicy::Fail => Err(PlaceError::persistence(location, error)),
    }
}

/// 資料檔若有重複 id，保留先出現的那筆
fn dedupe_ids(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = HashSet::new();
    let total = places.len();
    let unique: Vec<PlaceRecord> = places
        .into_iter()
        .filter(|place| seen.insert(place.id))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            "⚠️ Dropped {} places with duplicate ids",
            total - unique.len()
        );
    }
    unique
}

#[async_trait::async_trait]
impl<S: Storage, G: IdGenerator> PlaceRepository for PlaceStore<S, G> {
    async fn list_all(&self) -> Vec<PlaceRecord> {
        PlaceStore::<S, G>::list_all(self).await
    }

    async fn add(&self, draft: PlaceDraft) -> Result<PlaceRecord> {
        PlaceStore::<S, G>::add(self, draft).await
    }

    async fn update(&self, id: i64, draft: PlaceDraft) -> Result<PlaceRecord> {
        PlaceStore::<S, G>::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        PlaceStore::<S, G>::delete(self, id).await
    }

    async fn get(&self, id: i64) -> Option<PlaceRecord> {
        PlaceStore::<S, G>::get(self, id).await
    }

    async fn search(&self, query: &str) -> Vec<PlaceRecord> {
        PlaceStore::<S, G>::search(self, query).await
    }
}
