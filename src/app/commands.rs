use crate::config::{Command, PlaceArgs, UpdateArgs};
use crate::core::{PlaceDraft, PlaceRecord, PlaceRepository};
use crate::utils::error::{PlaceError, Result};
use std::io::Write;

impl From<PlaceArgs> for PlaceDraft {
    fn from(args: PlaceArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            image_path: args.image,
            latitude: args.latitude,
            longitude: args.longitude,
            address: args.address,
        }
    }
}

impl UpdateArgs {
    /// 以現有紀錄為底，只覆寫有指定的欄位
    pub fn merge_into(self, mut draft: PlaceDraft) -> PlaceDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }

        if self.clear_image {
            draft.image_path = None;
        } else if self.image.is_some() {
            draft.image_path = self.image;
        }

        if self.clear_location {
            draft.latitude = None;
            draft.longitude = None;
        } else if self.latitude.is_some() || self.longitude.is_some() {
            draft.latitude = self.latitude;
            draft.longitude = self.longitude;
        }

        if self.clear_address {
            draft.address = None;
        } else if self.address.is_some() {
            draft.address = self.address;
        }
        draft
    }
}

pub async fn run_command<R, W>(repo: &R, command: Command, json: bool, out: &mut W) -> Result<()>
where
    R: PlaceRepository + ?Sized,
    W: Write,
{
    match command {
        Command::Add(args) => {
            let record = repo.add(args.into()).await?;
            tracing::info!("✅ Added place {}", record.id);
            print_one(out, &record, json)?;
        }
        Command::List => {
            let places = repo.list_all().await;
            print_many(out, &places, json)?;
        }
        Command::Show { id } => {
            let record = repo.get(id).await.ok_or(PlaceError::NotFoundError { id })?;
            print_one(out, &record, json)?;
        }
        Command::Update { id, changes } => {
            let existing = repo.get(id).await.ok_or(PlaceError::NotFoundError { id })?;
            let draft = changes.merge_into(PlaceDraft::from(&existing));
            let record = repo.update(id, draft).await?;
            tracing::info!("✅ Updated place {}", record.id);
            print_one(out, &record, json)?;
        }
        Command::Delete { id } => {
            if repo.delete(id).await? {
                writeln!(out, "Deleted place {}", id)?;
            } else {
                writeln!(out, "No place with id {}", id)?;
            }
        }
        Command::Search { query } => {
            let places = repo.search(&query).await;
            tracing::debug!("🔍 {} places match {:?}", places.len(), query);
            print_many(out, &places, json)?;
        }
    }
    Ok(())
}

fn print_one<W: Write>(out: &mut W, record: &PlaceRecord, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, record)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", format_details(record))?;
    }
    Ok(())
}

fn print_many<W: Write>(out: &mut W, records: &[PlaceRecord], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No places")?;
    }
    for record in records {
        writeln!(out, "{}", format_summary(record))?;
    }
    Ok(())
}

pub fn format_summary(record: &PlaceRecord) -> String {
    match &record.address {
        Some(address) => format!("{}\t{}\t{}", record.id, record.title, address),
        None => format!("{}\t{}", record.id, record.title),
    }
}

pub fn format_details(record: &PlaceRecord) -> String {
    let mut text = format!("#{} {}\n", record.id, record.title);
    if !record.description.is_empty() {
        text.push_str(&format!("  {}\n", record.description));
    }
    if let Some(address) = &record.address {
        text.push_str(&format!("  Address: {}\n", address));
    }
    if let Some(coordinate) = record.coordinate() {
        text.push_str(&format!(
            "  Location: {:.6}, {:.6}\n",
            coordinate.latitude, coordinate.longitude
        ));
    }
    if let Some(image_path) = &record.image_path {
        text.push_str(&format!("  Photo: {}\n", image_path));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> PlaceDraft {
        PlaceDraft::new("Park", "Green space")
            .with_image_path("/img/park.jpg")
            .with_coordinate(52.1, 21.0)
            .with_address("Main St")
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let changes = UpdateArgs {
            title: Some("City Park".to_string()),
            ..Default::default()
        };
        let draft = changes.merge_into(existing());

        assert_eq!(draft.title, "City Park");
        assert_eq!(draft.description, "Green space");
        assert_eq!(draft.latitude, Some(52.1));
        assert_eq!(draft.address.as_deref(), Some("Main St"));
    }

    #[test]
    fn test_merge_clears_fields() {
        let changes = UpdateArgs {
            clear_image: true,
            clear_location: true,
            clear_address: true,
            ..Default::default()
        };
        let draft = changes.merge_into(existing());

        assert_eq!(draft.image_path, None);
        assert_eq!(draft.latitude, None);
        assert_eq!(draft.longitude, None);
        assert_eq!(draft.address, None);
    }

    #[test]
    fn test_format_details() {
        let record = PlaceRecord::from_draft(7, existing());
        let text = format_details(&record);

        assert!(text.starts_with("#7 Park\n"));
        assert!(text.contains("Address: Main St"));
        assert!(text.contains("Location: 52.100000, 21.000000"));
        assert!(text.contains("Photo: /img/park.jpg"));
    }
}
