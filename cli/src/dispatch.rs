//! Executes a [`Command`] against the store.
//!
//! Both the explicit verbs and the `agent` verb end up here, so a sentence
//! and the equivalent flags take exactly the same path.

use stockroom_core::{Command, Item};
use stockroom_sqlite::{ItemStore, Result};
use tracing::debug;

/// What a command did, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(Item),
    Subtracted(Item),
    Updated(Item),
    Deleted(String),
    Listed(Vec<Item>),
}

pub fn execute(store: &ItemStore, command: &Command) -> Result<Outcome> {
    debug!(verb = %command.verb(), sku = command.sku(), "executing command");
    match command {
        Command::Add {
            sku,
            name,
            quantity,
            price,
        } => store
            .create_item(sku, name, *quantity, *price)
            .map(Outcome::Added),
        Command::Subtract { sku, quantity } => store
            .subtract_quantity(sku, *quantity)
            .map(Outcome::Subtracted),
        Command::Update { sku, patch } => store.update_item(sku, patch).map(Outcome::Updated),
        Command::Delete { sku } => {
            store.delete_item(sku)?;
            Ok(Outcome::Deleted(sku.clone()))
        }
        Command::List { sku } => store.list_items(sku.as_deref()).map(Outcome::Listed),
    }
}

#[cfg(test)]
mod tests {
    use stockroom_core::{FailureKind, ItemPatch};

    use super::*;

    fn store() -> ItemStore {
        ItemStore::open_in_memory().unwrap()
    }

    fn add(sku: &str, name: &str, quantity: i64, price: f64) -> Command {
        Command::Add {
            sku: sku.to_string(),
            name: name.to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_add_then_list_by_sku() {
        let store = store();
        let Outcome::Added(added) = execute(&store, &add("A100", "Apple", 50, 150.0)).unwrap()
        else {
            panic!("expected added outcome");
        };

        let listed = execute(
            &store,
            &Command::List {
                sku: Some("A100".to_string()),
            },
        )
        .unwrap();
        assert_eq!(listed, Outcome::Listed(vec![added]));
    }

    #[test]
    fn test_subtract_returns_new_quantity() {
        let store = store();
        execute(&store, &add("A100", "Apple", 50, 150.0)).unwrap();
        let outcome = execute(
            &store,
            &Command::Subtract {
                sku: "A100".to_string(),
                quantity: 5,
            },
        )
        .unwrap();
        let Outcome::Subtracted(item) = outcome else {
            panic!("expected subtracted outcome");
        };
        assert_eq!(item.quantity, 45);
    }

    #[test]
    fn test_update_changes_only_supplied_fields() {
        let store = store();
        execute(&store, &add("A100", "Apple", 45, 150.0)).unwrap();
        let outcome = execute(
            &store,
            &Command::Update {
                sku: "A100".to_string(),
                patch: ItemPatch::default().with_price(140.0),
            },
        )
        .unwrap();
        let Outcome::Updated(item) = outcome else {
            panic!("expected updated outcome");
        };
        assert_eq!((item.quantity, item.price), (45, 140.0));
        assert_eq!(item.name, "Apple");
    }

    #[test]
    fn test_delete_missing_sku_is_not_found() {
        let err = execute(
            &store(),
            &Command::Delete {
                sku: "NOPE".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let store = store();
        execute(&store, &add("A100", "Apple", 50, 150.0)).unwrap();
        let err = execute(&store, &add("A100", "Other", 1, 1.0)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::DuplicateKey);
        assert_eq!(store.get_item("A100").unwrap().name, "Apple");
    }
}
