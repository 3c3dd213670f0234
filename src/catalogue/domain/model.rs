use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{ItemCondition, ItemStatus};
use crate::utils::date::serializer;

// ItemKind carries the kind specific attributes of a catalogue item.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ItemKind {
    Fiction {
        isbn: String,
    },
    NonFiction {
        isbn: String,
        dewey_class: String,
    },
    Magazine {
        issue_number: i64,
        publication_date: NaiveDate,
    },
    Movie {
        genre: String,
        rating: i64,
    },
    VideoGame {
        platform: String,
        genre: String,
        rating: i64,
    },
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Fiction { .. } => "Fiction",
            ItemKind::NonFiction { .. } => "Non-Fiction",
            ItemKind::Magazine { .. } => "Magazine",
            ItemKind::Movie { .. } => "Movie",
            ItemKind::VideoGame { .. } => "Video Game",
        }
    }
}

// ItemEntity is a lendable unit of the catalogue. The hold queue lists patron names in
// arrival order, the head of the queue is entitled to borrow next.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ItemEntity {
    pub item_id: String,
    pub version: i64,
    pub kind: ItemKind,
    pub title: String,
    pub creator: String,
    pub publication_year: i32,
    pub format: String,
    pub condition: ItemCondition,
    pub status: ItemStatus,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub hold_queue: Vec<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ItemEntity {
    pub fn new(kind: ItemKind, title: &str, creator: &str, publication_year: i32,
               format: &str, condition: ItemCondition) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            version: 0,
            kind,
            title: title.to_string(),
            creator: creator.to_string(),
            publication_year,
            format: format.to_string(),
            condition,
            status: ItemStatus::Available,
            due_date: None,
            hold_queue: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn queue_head(&self) -> Option<&str> {
        self.hold_queue.first().map(|name| name.as_str())
    }

    // 0-indexed position of the first entry for the patron
    pub fn queue_index(&self, patron_name: &str) -> Option<usize> {
        self.hold_queue.iter().position(|name| name == patron_name)
    }

    pub fn is_held(&self) -> bool {
        !self.hold_queue.is_empty()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }

    // mirrors the version bump the store applied on update
    pub(crate) fn mark_committed(&mut self) {
        self.version += 1;
    }
}

impl Identifiable for ItemEntity {
    fn id(&self) -> String {
        self.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::catalogue::domain::model::{ItemEntity, ItemKind};
    use crate::core::library::{ItemCondition, ItemStatus};

    #[tokio::test]
    async fn test_should_build_item() {
        let item = ItemEntity::new(ItemKind::Fiction { isbn: "978-0-06-112008-4".to_string() },
                                   "To Kill a Mockingbird", "Harper Lee", 1960, "Hardcover", ItemCondition::Standard);
        assert_eq!("Fiction", item.kind_name());
        assert_eq!(ItemStatus::Available, item.status);
        assert_eq!(None, item.due_date);
        assert_eq!(None, item.queue_head());
        assert!(!item.is_held());
    }

    #[tokio::test]
    async fn test_should_name_kinds() {
        let kinds = [
            ItemKind::NonFiction { isbn: "isbn".to_string(), dewey_class: "909".to_string() },
            ItemKind::Movie { genre: "Crime".to_string(), rating: 10 },
            ItemKind::VideoGame { platform: "NES".to_string(), genre: "Adventure".to_string(), rating: 9 },
        ];
        let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
        assert_eq!(vec!["Non-Fiction", "Movie", "Video Game"], names);
    }

    #[tokio::test]
    async fn test_should_find_queue_entries() {
        let mut item = ItemEntity::new(ItemKind::Movie { genre: "Drama".to_string(), rating: 9 },
                                       "Forrest Gump", "Robert Zemeckis", 1994, "Blu-ray", ItemCondition::Worn);
        item.hold_queue = vec!["eddie".to_string(), "bob".to_string()];
        assert_eq!(Some("eddie"), item.queue_head());
        assert_eq!(Some(1), item.queue_index("bob"));
        assert_eq!(None, item.queue_index("joseph"));
    }

    #[tokio::test]
    async fn test_should_serialize_item() {
        let item = ItemEntity::new(ItemKind::VideoGame { platform: "PC".to_string(), genre: "Sandbox".to_string(), rating: 8 },
                                   "Minecraft", "Mojang", 2011, "Digital", ItemCondition::New);
        let json = serde_json::to_string(&item).expect("should serialize");
        let loaded: ItemEntity = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(item, loaded);
    }
}
