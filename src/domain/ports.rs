use crate::domain::model::{PlaceDraft, PlaceRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// 檔案不存在時回傳 `Ok(None)`
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn describe(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn file_name(&self) -> &str;
    fn corrupt_policy(&self) -> CorruptFilePolicy;
}

pub trait IdGenerator: Send + Sync {
    /// id 空間用盡時回傳 `IdSpaceExhausted`
    fn next_id(&self) -> Result<i64>;
    /// 確保之後產生的 id 都大於 `id`
    fn observe(&self, id: i64);
}

/// What `PlaceStore::open` does with a places file it cannot read or parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptFilePolicy {
    #[default]
    StartEmpty,
    Fail,
}

/// The call contract between a front end and the place store.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn list_all(&self) -> Vec<PlaceRecord>;
    async fn add(&self, draft: PlaceDraft) -> Result<PlaceRecord>;
    async fn update(&self, id: i64, draft: PlaceDraft) -> Result<PlaceRecord>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn get(&self, id: i64) -> Option<PlaceRecord>;
    async fn search(&self, query: &str) -> Vec<PlaceRecord>;
}
