use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;
use crate::catalogue::domain::model::{ItemEntity, ItemKind};
use crate::core::library::{ItemCondition, LibraryResult, Role};
use crate::patrons::domain::model::{PatronEntity, StaffEntity};
use crate::store::{LibraryStore, StoreChange};

const PATRONS: [&str; 5] = ["michel", "eddie", "joseph", "andrey", "bob"];
const LIBRARIANS: [&str; 1] = ["lauren"];
const ADMINS: [&str; 1] = ["adam"];

fn book(title: &str, creator: &str, year: i32, format: &str, condition: ItemCondition, isbn: &str) -> ItemEntity {
    ItemEntity::new(ItemKind::Fiction { isbn: isbn.to_string() }, title, creator, year, format, condition)
}

fn non_fiction(title: &str, creator: &str, year: i32, format: &str, condition: ItemCondition,
               isbn: &str, dewey_class: &str) -> ItemEntity {
    ItemEntity::new(ItemKind::NonFiction { isbn: isbn.to_string(), dewey_class: dewey_class.to_string() },
                    title, creator, year, format, condition)
}

fn movie(title: &str, creator: &str, year: i32, format: &str, condition: ItemCondition,
         genre: &str, rating: i64) -> ItemEntity {
    ItemEntity::new(ItemKind::Movie { genre: genre.to_string(), rating },
                    title, creator, year, format, condition)
}

#[allow(clippy::too_many_arguments)]
fn video_game(title: &str, creator: &str, year: i32, format: &str, condition: ItemCondition,
              platform: &str, genre: &str, rating: i64) -> ItemEntity {
    ItemEntity::new(ItemKind::VideoGame { platform: platform.to_string(), genre: genre.to_string(), rating },
                    title, creator, year, format, condition)
}

fn magazine(title: &str, creator: &str, format: &str, condition: ItemCondition,
            issue_number: i64, publication_date: NaiveDate) -> ItemEntity {
    ItemEntity::new(ItemKind::Magazine { issue_number, publication_date },
                    title, creator, 2023, format, condition)
}

fn issue_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

// Seeded ids derive from kind and title so every freshly seeded store agrees on them.
fn seed_id(item: &ItemEntity) -> String {
    let name = format!("{}/{}", item.kind_name(), item.title);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

// the twenty items a new branch opens with
pub fn default_items() -> Vec<ItemEntity> {
    use ItemCondition::{New, Standard, Worn};
    let items = vec![
        book("To Kill a Mockingbird", "Harper Lee", 1960, "Hardcover", Standard, "978-0-06-112008-4"),
        book("1984", "George Orwell", 1949, "Paperback", Worn, "978-0-452-28423-4"),
        book("Pride and Prejudice", "Jane Austen", 1813, "Hardcover", New, "978-0-19-280238-5"),
        book("Moby Dick", "Herman Melville", 1851, "Paperback", Worn, "978-0-14-243724-7"),
        book("The Hobbit", "J.R.R. Tolkien", 1937, "Hardcover", Standard, "978-0-618-00221-3"),
        non_fiction("Sapiens", "Yuval Noah Harari", 2011, "Paperback", Standard, "978-0-06-231609-7", "909"),
        non_fiction("The Selfish Gene", "Richard Dawkins", 1976, "Paperback", New, "978-0-19-878860-7", "576"),
        non_fiction("The Immortal Life of Henrietta Lacks", "Rebecca Skloot", 2010, "Hardcover", Worn, "978-1-4000-5217-2", "616"),
        non_fiction("A Short History of Nearly Everything", "Bill Bryson", 2003, "Paperback", Standard, "978-0-385-66094-5", "500"),
        non_fiction("Thinking, Fast and Slow", "Daniel Kahneman", 2011, "Hardcover", Worn, "978-0-374-53355-7", "153.4"),
        movie("Inception", "Christopher Nolan", 2010, "Blu-ray", Standard, "Sci-fi", 8),
        movie("The Godfather", "Francis Ford Coppola", 1972, "DVD", New, "Crime", 10),
        movie("Forrest Gump", "Robert Zemeckis", 1994, "Blu-ray", Worn, "Drama", 9),
        video_game("The Legend of Zelda", "Nintendo", 1986, "Cartridge", Worn, "NES", "Adventure", 9),
        video_game("Super Mario Bros.", "Nintendo", 1985, "Cartridge", Standard, "NES", "Platformer", 10),
        video_game("Halo: Combat Evolved", "Bungie", 2001, "Disc", Standard, "Xbox", "Shooter", 9),
        video_game("Minecraft", "Mojang", 2011, "Digital", New, "PC", "Sandbox", 8),
        magazine("National Geographic", "NG Society", "Print", New, 5, issue_date(2023, 5, 1)),
        magazine("Time", "Time Inc.", "Print", Standard, 15, issue_date(2023, 4, 15)),
        magazine("The Economist", "The Economist Group", "Print", Worn, 22, issue_date(2023, 5, 8)),
    ];
    items.into_iter().map(|item| ItemEntity { item_id: seed_id(&item), ..item }).collect()
}

pub fn default_changes() -> Vec<StoreChange> {
    let mut changes: Vec<StoreChange> = default_items().into_iter().map(StoreChange::SaveItem).collect();
    changes.extend(PATRONS.iter().map(|name| StoreChange::SavePatron(PatronEntity::new(name))));
    changes.extend(LIBRARIANS.iter().map(|name| StoreChange::SaveStaff(StaffEntity::new(name, Role::Librarian))));
    changes.extend(ADMINS.iter().map(|name| StoreChange::SaveStaff(StaffEntity::new(name, Role::Admin))));
    changes
}

// fills an empty store with the default catalogue, patrons and staff
pub async fn seed_store(store: &dyn LibraryStore) -> LibraryResult<usize> {
    let changes = default_changes();
    store.commit(&changes).await?;
    info!(records = changes.len(), "seeded empty store");
    Ok(changes.len())
}

#[cfg(test)]
mod tests {
    use crate::core::controller::AppState;
    use crate::core::library::Role;
    use crate::core::repository::RepositoryStore;
    use crate::store::memory_store::MemoryStore;
    use crate::store::LibraryStore;
    use crate::store::seed::{default_items, seed_store};

    #[tokio::test]
    async fn test_should_build_default_items() {
        let items = default_items();
        assert_eq!(20, items.len());
        let count = |name: &str| items.iter().filter(|item| item.kind_name() == name).count();
        assert_eq!(5, count("Fiction"));
        assert_eq!(5, count("Non-Fiction"));
        assert_eq!(3, count("Movie"));
        assert_eq!(4, count("Video Game"));
        assert_eq!(3, count("Magazine"));
    }

    #[tokio::test]
    async fn test_should_derive_stable_item_ids() {
        let first: Vec<String> = default_items().into_iter().map(|item| item.item_id).collect();
        let second: Vec<String> = default_items().into_iter().map(|item| item.item_id).collect();
        assert_eq!(first, second);
        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(20, unique.len());
    }

    #[tokio::test]
    async fn test_should_share_item_ids_between_seeded_stores() {
        let catalogue = AppState::new("dev", RepositoryStore::Memory).await;
        let loans = AppState::new("dev", RepositoryStore::Memory).await;
        let id = catalogue.load_library().await.expect("should load library")
            .lock().await.list_items(None, None)[0].item_id.to_string();
        let library = loans.load_library().await.expect("should load library");
        let res = library.lock().await.borrow("michel", id.as_str()).await;
        assert!(res.ok, "{:?}", res);
    }

    #[tokio::test]
    async fn test_should_seed_store() {
        let store = MemoryStore::new();
        let records = seed_store(&store).await.expect("should seed");
        assert_eq!(27, records);
        assert_eq!(20, store.all_items().await.expect("should load").len());
        assert_eq!(5, store.all_patrons().await.expect("should load").len());
        let staff = store.all_staff().await.expect("should load");
        assert_eq!(vec![Role::Librarian, Role::Admin], staff.iter().map(|s| s.role).collect::<Vec<Role>>());
    }
}
