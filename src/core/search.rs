use crate::domain::model::PlaceRecord;

/// Case-insensitive substring match over title, description and address.
/// Only an empty query matches everything; whitespace is part of the query.
pub fn matches(record: &PlaceRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    contains(&record.title)
        || contains(&record.description)
        || record.address.as_deref().map(contains).unwrap_or(false)
}

pub fn filter(records: &[PlaceRecord], query: &str) -> Vec<PlaceRecord> {
    records
        .iter()
        .filter(|record| matches(record, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PlaceDraft;

    fn sample() -> Vec<PlaceRecord> {
        vec![
            PlaceRecord::from_draft(3, PlaceDraft::new("Old Town", "Market square")),
            PlaceRecord::from_draft(
                2,
                PlaceDraft::new("Lake", "Swimming spot").with_address("Forest Road 4"),
            ),
            PlaceRecord::from_draft(1, PlaceDraft::new("Park", "Green space")),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let ids: Vec<i64> = filter(&sample(), "").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_whitespace_is_matched_literally() {
        assert!(filter(&sample(), "  ").is_empty());

        let records = vec![
            PlaceRecord::from_draft(1, PlaceDraft::new("Downtown", "")),
            PlaceRecord::from_draft(2, PlaceDraft::new("Old Town", "")),
        ];
        let ids: Vec<i64> = filter(&records, " town").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_matches_title_description_and_address() {
        assert_eq!(filter(&sample(), "old town")[0].id, 3);
        assert_eq!(filter(&sample(), "GREEN")[0].id, 1);
        assert_eq!(filter(&sample(), "forest")[0].id, 2);
        assert!(filter(&sample(), "castle").is_empty());
    }
}
