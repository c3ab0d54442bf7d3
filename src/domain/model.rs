use serde::{Deserialize, Serialize};

/// 一筆地點紀錄，也是資料檔中陣列的單一元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

impl PlaceRecord {
    pub fn from_draft(id: i64, draft: PlaceDraft) -> Self {
        let mut record = Self {
            id,
            title: String::new(),
            description: String::new(),
            image_path: None,
            latitude: None,
            longitude: None,
            address: None,
        };
        record.apply(draft);
        record
    }

    /// 以草稿覆寫除 id 以外的所有欄位
    pub fn apply(&mut self, draft: PlaceDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.image_path = draft.image_path;
        self.latitude = draft.latitude;
        self.longitude = draft.longitude;
        self.address = draft.address;
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything a caller supplies for `add` and `update`; the store owns the id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDraft {
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl PlaceDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }

    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<&PlaceRecord> for PlaceDraft {
    fn from(record: &PlaceRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            image_path: record.image_path.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            address: record.address.clone(),
        }
    }
}
