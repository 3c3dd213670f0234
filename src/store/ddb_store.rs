use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem, Update};
use tracing::debug;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::holds::domain::model::{hold_key, HoldEntity};
use crate::loans::domain::model::{loan_key, LoanEntity};
use crate::patrons::domain::model::{PatronEntity, StaffEntity};
use crate::store::{LibraryStore, StoreChange};
use crate::utils::date::{format_day, DATE_FMT};
use crate::utils::ddb::{create_table, item_to_value, parse_float_attribute, parse_item, parse_string_attribute};

const ITEMS_TABLE: &str = "items";
const PATRONS_TABLE: &str = "patrons";
const STAFF_TABLE: &str = "staff";
const LOANS_TABLE: &str = "loans";
const HOLDS_TABLE: &str = "holds";

// TransactWriteItems accepts at most this many writes
const MAX_TRANSACT_ITEMS: usize = 100;

// (table, primary key) pairs with the names of their hash key attribute
pub(crate) const TABLES: [(&str, &str); 5] = [
    (ITEMS_TABLE, "item_id"),
    (PATRONS_TABLE, "name"),
    (STAFF_TABLE, "name"),
    (LOANS_TABLE, "loan_id"),
    (HOLDS_TABLE, "hold_id"),
];

#[derive(Debug)]
pub(crate) struct DDBStore {
    client: Client,
}

impl DDBStore {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
        }
    }

    // existing tables are left alone, dynamodb local keeps them across restarts
    pub(crate) async fn create_tables(&self) {
        for (table_name, pk) in TABLES {
            if let Err(err) = create_table(&self.client, table_name, pk).await {
                debug!(table = table_name, error = %err, "table not created");
            }
        }
    }

    async fn scan(&self, table_name: &str, item_id: Option<&str>) -> LibraryResult<Vec<HashMap<String, AttributeValue>>> {
        let mut records = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key);
            if let Some(item_id) = item_id {
                request = request
                    .filter_expression("item_id = :item_id")
                    .expression_attribute_values(":item_id", AttributeValue::S(item_id.to_string()));
            }
            let res = request.send().await?;
            if let Some(items) = res.items() {
                records.extend(items.iter().cloned());
            }
            match res.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(records)
    }

    async fn load_holds(&self, item_id: Option<&str>) -> LibraryResult<Vec<HoldEntity>> {
        let mut holds = self.scan(HOLDS_TABLE, item_id).await?.iter()
            .map(|map| serde_json::from_value::<HoldEntity>(item_to_value(map)))
            .collect::<Result<Vec<HoldEntity>, serde_json::Error>>()?;
        holds.sort_by_key(|hold| hold.position);
        Ok(holds)
    }

    async fn load_loans(&self) -> LibraryResult<Vec<LoanEntity>> {
        let loans = self.scan(LOANS_TABLE, None).await?.iter()
            .map(|map| serde_json::from_value::<LoanEntity>(item_to_value(map)))
            .collect::<Result<Vec<LoanEntity>, serde_json::Error>>()?;
        Ok(loans)
    }

    // Writes touching the same key collapse to the last one, a transaction may not
    // contain two operations on one item.
    async fn build_writes(&self, changes: &[StoreChange]) -> LibraryResult<Vec<TransactWriteItem>> {
        let mut writes: Vec<(String, TransactWriteItem)> = vec![];
        for change in changes {
            match change {
                StoreChange::SaveItem(item) => {
                    let stored = ItemEntity { hold_queue: vec![], ..item.clone() };
                    let put = Put::builder()
                        .table_name(ITEMS_TABLE)
                        .condition_expression("attribute_not_exists(item_id)")
                        .set_item(Some(parse_item(serde_json::to_value(&stored)?)?))
                        .build();
                    add_write(&mut writes, ITEMS_TABLE, item.id().as_str(), TransactWriteItem::builder().put(put).build());
                }
                StoreChange::UpdateItem(item) => {
                    add_write(&mut writes, ITEMS_TABLE, item.id().as_str(),
                              TransactWriteItem::builder().update(update_item(item)).build());
                }
                StoreChange::DeleteItem(id) => {
                    add_write(&mut writes, ITEMS_TABLE, id.as_str(),
                              delete_write(ITEMS_TABLE, "item_id", id.as_str()));
                }
                StoreChange::SaveLoan(loan) => {
                    add_write(&mut writes, LOANS_TABLE, loan.id().as_str(),
                              put_write(LOANS_TABLE, parse_item(serde_json::to_value(loan)?)?));
                }
                StoreChange::DeleteLoan { patron_name, item_id } => {
                    let key = loan_key(patron_name, item_id);
                    add_write(&mut writes, LOANS_TABLE, key.as_str(),
                              delete_write(LOANS_TABLE, "loan_id", key.as_str()));
                }
                StoreChange::SaveHold(hold) => {
                    add_write(&mut writes, HOLDS_TABLE, hold.id().as_str(),
                              put_write(HOLDS_TABLE, parse_item(serde_json::to_value(hold)?)?));
                }
                StoreChange::DeleteHold { patron_name, item_id } => {
                    let key = hold_key(item_id, patron_name);
                    add_write(&mut writes, HOLDS_TABLE, key.as_str(),
                              delete_write(HOLDS_TABLE, "hold_id", key.as_str()));
                }
                StoreChange::RenumberHolds { item_id, queue } => {
                    for stale in self.load_holds(Some(item_id.as_str())).await? {
                        if !queue.contains(&stale.patron_name) {
                            add_write(&mut writes, HOLDS_TABLE, stale.hold_id.as_str(),
                                      delete_write(HOLDS_TABLE, "hold_id", stale.hold_id.as_str()));
                        }
                    }
                    for hold in HoldEntity::from_queue(item_id, queue) {
                        add_write(&mut writes, HOLDS_TABLE, hold.hold_id.as_str(),
                                  put_write(HOLDS_TABLE, parse_item(serde_json::to_value(&hold)?)?));
                    }
                }
                StoreChange::SavePatron(patron) => {
                    add_write(&mut writes, PATRONS_TABLE, patron.name.as_str(),
                              put_write(PATRONS_TABLE, patron_attributes(patron)));
                }
                StoreChange::UpdatePatron(patron) => {
                    let update = Update::builder()
                        .table_name(PATRONS_TABLE)
                        .key("name", AttributeValue::S(patron.name.to_string()))
                        .update_expression("SET outstanding_fines = :outstanding_fines")
                        .condition_expression("attribute_exists(#name)")
                        .expression_attribute_names("#name", "name")
                        .expression_attribute_values(":outstanding_fines", AttributeValue::N(patron.outstanding_fines.to_string()))
                        .build();
                    add_write(&mut writes, PATRONS_TABLE, patron.name.as_str(),
                              TransactWriteItem::builder().update(update).build());
                }
                StoreChange::SaveStaff(staff) => {
                    add_write(&mut writes, STAFF_TABLE, staff.id().as_str(),
                              put_write(STAFF_TABLE, parse_item(serde_json::to_value(staff)?)?));
                }
            }
        }
        Ok(writes.into_iter().map(|(_, write)| write).collect())
    }
}

fn add_write(writes: &mut Vec<(String, TransactWriteItem)>, table_name: &str, id: &str, write: TransactWriteItem) {
    let key = format!("{}/{}", table_name, id);
    if let Some(existing) = writes.iter_mut().find(|(other, _)| other == &key) {
        existing.1 = write;
    } else {
        writes.push((key, write));
    }
}

fn put_write(table_name: &str, item: HashMap<String, AttributeValue>) -> TransactWriteItem {
    let put = Put::builder()
        .table_name(table_name)
        .set_item(Some(item))
        .build();
    TransactWriteItem::builder().put(put).build()
}

fn delete_write(table_name: &str, pk: &str, id: &str) -> TransactWriteItem {
    let delete = Delete::builder()
        .table_name(table_name)
        .key(pk, AttributeValue::S(id.to_string()))
        .build();
    TransactWriteItem::builder().delete(delete).build()
}

fn update_item(item: &ItemEntity) -> Update {
    let due_date = match item.due_date {
        Some(day) => AttributeValue::S(format_day(day)),
        None => AttributeValue::Null(true),
    };
    Update::builder()
        .table_name(ITEMS_TABLE)
        .key("item_id", AttributeValue::S(item.item_id.clone()))
        .update_expression("SET version = :version, #status = :status, due_date = :due_date, updated_at = :updated_at")
        .expression_attribute_names("#status", "status")
        .expression_attribute_values(":old_version", AttributeValue::N(item.version().to_string()))
        .expression_attribute_values(":version", AttributeValue::N((item.version() + 1).to_string()))
        .expression_attribute_values(":status", AttributeValue::S(item.status.to_string()))
        .expression_attribute_values(":due_date", due_date)
        .expression_attribute_values(":updated_at", AttributeValue::S(format!("{}", item.updated_at.format(DATE_FMT))))
        .condition_expression("attribute_exists(version) AND version = :old_version")
        .build()
}

fn patron_attributes(patron: &PatronEntity) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("name".to_string(), AttributeValue::S(patron.name.to_string())),
        ("outstanding_fines".to_string(), AttributeValue::N(patron.outstanding_fines.to_string())),
    ])
}

impl From<&HashMap<String, AttributeValue>> for PatronEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        PatronEntity {
            name: parse_string_attribute("name", map).unwrap_or_else(|| String::from("")),
            active_loans: vec![],
            active_holds: vec![],
            outstanding_fines: parse_float_attribute("outstanding_fines", map),
        }
    }
}

#[async_trait]
impl LibraryStore for DDBStore {
    async fn find_item(&self, id: &str) -> LibraryResult<Option<ItemEntity>> {
        let res = self.client
            .get_item()
            .table_name(ITEMS_TABLE)
            .key("item_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        match res.item() {
            Some(map) => {
                let mut item: ItemEntity = serde_json::from_value(item_to_value(map))?;
                item.hold_queue = self.load_holds(Some(id)).await?.into_iter()
                    .map(|hold| hold.patron_name).collect();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn all_items(&self) -> LibraryResult<Vec<ItemEntity>> {
        let holds = self.load_holds(None).await?;
        let mut items = vec![];
        for map in self.scan(ITEMS_TABLE, None).await? {
            let mut item: ItemEntity = serde_json::from_value(item_to_value(&map))?;
            item.hold_queue = holds.iter()
                .filter(|hold| hold.item_id == item.item_id)
                .map(|hold| hold.patron_name.to_string()).collect();
            items.push(item);
        }
        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }

    async fn all_patrons(&self) -> LibraryResult<Vec<PatronEntity>> {
        let loans = self.load_loans().await?;
        let holds = self.load_holds(None).await?;
        let mut patrons: Vec<PatronEntity> = self.scan(PATRONS_TABLE, None).await?.iter()
            .map(PatronEntity::from).collect();
        for patron in patrons.iter_mut() {
            patron.active_loans = loans.iter()
                .filter(|loan| loan.patron_name == patron.name)
                .map(|loan| loan.item_id.to_string()).collect();
            patron.active_holds = holds.iter()
                .filter(|hold| hold.patron_name == patron.name)
                .map(|hold| hold.item_id.to_string()).collect();
        }
        patrons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(patrons)
    }

    async fn all_staff(&self) -> LibraryResult<Vec<StaffEntity>> {
        let staff = self.scan(STAFF_TABLE, None).await?.iter()
            .map(|map| serde_json::from_value::<StaffEntity>(item_to_value(map)))
            .collect::<Result<Vec<StaffEntity>, serde_json::Error>>()?;
        Ok(staff)
    }

    async fn is_empty(&self) -> LibraryResult<bool> {
        for table_name in [ITEMS_TABLE, PATRONS_TABLE, STAFF_TABLE] {
            let res = self.client
                .scan()
                .table_name(table_name)
                .limit(1)
                .send()
                .await?;
            if res.items().map(|items| !items.is_empty()).unwrap_or(false) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn commit(&self, changes: &[StoreChange]) -> LibraryResult<()> {
        let writes = self.build_writes(changes).await?;
        if writes.is_empty() {
            return Ok(());
        }
        if writes.len() > MAX_TRANSACT_ITEMS {
            return Err(LibraryError::validation(
                format!("change set of {} writes exceeds {}", writes.len(), MAX_TRANSACT_ITEMS).as_str(),
                Some("TooManyWrites".to_string())));
        }
        let count = writes.len();
        self.client
            .transact_write_items()
            .set_transact_items(Some(writes))
            .send()
            .await?;
        debug!(writes = count, "committed change set");
        Ok(())
    }
}
