//! Implements a flat-file JSON backed budget store.

use std::path::{Path, PathBuf};

use crate::{Error, models::Budget, stores::BudgetStore};

use super::{load_or_default, save};

/// Stores budgets in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonBudgetStore {
    path: PathBuf,
}

impl JsonBudgetStore {
    /// Create a store backed by `budgets.json` inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("budgets.json"),
        }
    }
}

impl BudgetStore for JsonBudgetStore {
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        load_or_default(&self.path)
    }

    fn upsert(&mut self, budget: Budget) -> Result<Budget, Error> {
        let mut budgets: Vec<Budget> = load_or_default(&self.path)?;

        let position = budgets.iter().position(|existing| {
            existing.category_id() == budget.category_id() && existing.month() == budget.month()
        });

        match position {
            Some(position) => budgets[position] = budget.clone(),
            None => budgets.push(budget.clone()),
        }

        save(&self.path, &budgets)?;

        Ok(budget)
    }
}

#[cfg(test)]
mod json_budget_store_tests {
    use crate::{
        models::{Budget, CategoryId},
        stores::BudgetStore,
    };

    use super::JsonBudgetStore;

    fn get_store() -> (tempfile::TempDir, JsonBudgetStore) {
        let data_dir = tempfile::tempdir().unwrap();
        let store = JsonBudgetStore::new(data_dir.path());

        (data_dir, store)
    }

    #[test]
    fn get_all_on_missing_file_returns_empty() {
        let (_data_dir, store) = get_store();

        assert_eq!(store.get_all().unwrap(), vec![]);
    }

    #[test]
    fn upsert_replaces_amount_for_same_category_and_month() {
        let (_data_dir, mut store) = get_store();
        let month = "2024-03".parse().unwrap();

        store
            .upsert(Budget::new(CategoryId::Food, month, 250.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Food, month, 300.0).unwrap())
            .unwrap();

        let all = store.get_all().unwrap();

        assert_eq!(all.len(), 1, "want a single budget record, got {all:?}");
        assert_eq!(all[0].amount(), 300.0);
    }

    #[test]
    fn upsert_keeps_budgets_for_other_months_and_categories() {
        let (data_dir, mut store) = get_store();
        let march = "2024-03".parse().unwrap();
        let april = "2024-04".parse().unwrap();

        store
            .upsert(Budget::new(CategoryId::Food, march, 250.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Food, april, 200.0).unwrap())
            .unwrap();
        store
            .upsert(Budget::new(CategoryId::Rent, march, 1200.0).unwrap())
            .unwrap();

        assert_eq!(store.get_all().unwrap().len(), 3);

        // A fresh store over the same directory sees the same data.
        let reopened = JsonBudgetStore::new(data_dir.path());
        assert_eq!(reopened.get_all().unwrap().len(), 3);
    }
}
