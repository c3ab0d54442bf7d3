use crate::domain::model::PlaceDraft;
use crate::utils::error::{PlaceError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名不可含路徑分隔符，資料檔必須落在 data_dir 底下
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(PlaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlaceError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(PlaceError::validation(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

/// 緯度與經度必須同時存在或同時缺席
pub fn validate_coordinate_pair(latitude: Option<f64>, longitude: Option<f64>) -> Result<()> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => {
            validate_range("latitude", lat, -90.0, 90.0)?;
            validate_range("longitude", lng, -180.0, 180.0)
        }
        (None, None) => Ok(()),
        (Some(_), None) => Err(PlaceError::validation(
            "longitude",
            "Longitude is required when latitude is given",
        )),
        (None, Some(_)) => Err(PlaceError::validation(
            "latitude",
            "Latitude is required when longitude is given",
        )),
    }
}

impl Validate for PlaceDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;
        validate_coordinate_pair(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("file_name", "places_database.json").is_ok());
        assert!(validate_file_name("file_name", "").is_err());
        assert!(validate_file_name("file_name", "../escape.json").is_err());
        assert!(validate_file_name("file_name", "nested/places.json").is_err());
    }

    #[test]
    fn test_validate_coordinate_pair() {
        assert!(validate_coordinate_pair(Some(52.1), Some(21.0)).is_ok());
        assert!(validate_coordinate_pair(None, None).is_ok());
        assert!(validate_coordinate_pair(Some(52.1), None).is_err());
        assert!(validate_coordinate_pair(None, Some(21.0)).is_err());
        assert!(validate_coordinate_pair(Some(91.0), Some(0.0)).is_err());
        assert!(validate_coordinate_pair(Some(0.0), Some(-180.5)).is_err());
        assert!(validate_coordinate_pair(Some(f64::NAN), Some(0.0)).is_err());
    }

    #[test]
    fn test_validate_draft() {
        let draft = PlaceDraft::new("   ", "blank title");
        match draft.validate() {
            Err(PlaceError::ValidationError { field, .. }) => assert_eq!(field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }

        let draft = PlaceDraft::new("Park", "").with_coordinate(52.1, 21.0);
        assert!(draft.validate().is_ok());
    }
}
