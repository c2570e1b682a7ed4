use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use brewshelf_core::{Entity, ProductId};

use crate::product::Product;

/// Keyed store of catalog products.
///
/// The repository has no validation responsibility: it trusts that products
/// handed to it were built through the validated constructors. "Not found"
/// is an ordinary outcome, never an error.
pub trait ProductRepository: Send + Sync {
    /// Insert a product. An already-present id is overwritten in place
    /// (identity uniqueness is the service's concern via id generation).
    fn add(&self, product: Product);

    /// All products in insertion order. The returned collection is isolated
    /// from the store; mutating it does not affect repository state.
    fn get_all(&self) -> Vec<Product>;

    fn get_by_id(&self, id: ProductId) -> Option<Product>;

    /// Replace the entry at `product.id()` if it exists. Returns whether the
    /// id existed; a missing id means no mutation.
    fn update(&self, product: Product) -> bool;

    /// Remove the entry if present; returns whether it existed.
    fn delete(&self, id: ProductId) -> bool;
}

#[derive(Debug, Default)]
struct Store {
    items: HashMap<ProductId, Product>,
    // Insertion-order index over `items`; overwriting keeps the original slot.
    order: Vec<ProductId>,
}

/// In-memory product store.
///
/// The map plus its order index is the only shared mutable state, guarded by
/// a single lock around each operation.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Store>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // The repository API is total, so there is no error channel for a
    // poisoned lock; recover the guarded data instead of propagating.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Store> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn add(&self, product: Product) {
        let id = *product.id();
        let mut store = self.write();
        if store.items.insert(id, product).is_none() {
            store.order.push(id);
        }
    }

    fn get_all(&self) -> Vec<Product> {
        let store = self.read();
        store
            .order
            .iter()
            .filter_map(|id| store.items.get(id))
            .cloned()
            .collect()
    }

    fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.read().items.get(&id).cloned()
    }

    fn update(&self, product: Product) -> bool {
        let id = *product.id();
        let mut store = self.write();
        if !store.items.contains_key(&id) {
            return false;
        }
        store.items.insert(id, product);
        true
    }

    fn delete(&self, id: ProductId) -> bool {
        let mut store = self.write();
        if store.items.remove(&id).is_none() {
            return false;
        }
        store.order.retain(|existing| *existing != id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{LeafType, RoastType};

    fn coffee(name: &str, weight: u32) -> Product {
        Product::coffee(ProductId::new(), name, 100.0, weight, RoastType::Beans).unwrap()
    }

    fn tea(name: &str, weight: u32) -> Product {
        Product::tea(ProductId::new(), name, 100.0, weight, LeafType::Black).unwrap()
    }

    #[test]
    fn get_all_preserves_insertion_order() {
        let repo = InMemoryProductRepository::new();
        repo.add(coffee("first", 100));
        repo.add(tea("second", 100));
        repo.add(coffee("third", 100));

        let names: Vec<_> = repo.get_all().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn add_on_existing_id_overwrites_in_place() {
        let repo = InMemoryProductRepository::new();
        let original = coffee("original", 100);
        let id = *original.id();
        repo.add(original);
        repo.add(tea("later", 100));

        let replacement = Product::coffee(id, "replaced", 50.0, 80, RoastType::Ground).unwrap();
        repo.add(replacement);

        let all = repo.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "replaced");
        assert_eq!(all[1].name(), "later");
    }

    #[test]
    fn returned_collection_is_isolated_from_the_store() {
        let repo = InMemoryProductRepository::new();
        repo.add(coffee("only", 100));

        let mut snapshot = repo.get_all();
        snapshot.clear();

        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn get_by_id_on_missing_id_is_none() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.get_by_id(ProductId::new()).is_none());
    }

    #[test]
    fn update_replaces_only_existing_entries() {
        let repo = InMemoryProductRepository::new();
        let stored = tea("before", 90);
        let id = *stored.id();
        repo.add(stored);

        let updated = Product::tea(id, "after", 120.0, 95, LeafType::Green).unwrap();
        assert!(repo.update(updated));
        assert_eq!(repo.get_by_id(id).unwrap().name(), "after");

        let phantom = tea("phantom", 10);
        assert!(!repo.update(phantom.clone()));
        assert!(repo.get_by_id(*phantom.id()).is_none());
        assert_eq!(repo.get_all().len(), 1);
    }

    #[test]
    fn delete_reports_existence_and_removes_from_iteration() {
        let repo = InMemoryProductRepository::new();
        let stored = coffee("doomed", 100);
        let id = *stored.id();
        repo.add(stored);

        assert!(repo.delete(id));
        assert!(repo.get_by_id(id).is_none());
        assert!(repo.get_all().is_empty());
        assert!(!repo.delete(id));
    }

    #[test]
    fn delete_then_re_add_moves_id_to_the_end() {
        let repo = InMemoryProductRepository::new();
        let first = coffee("first", 100);
        let id = *first.id();
        repo.add(first);
        repo.add(tea("second", 100));

        repo.delete(id);
        repo.add(Product::coffee(id, "first again", 100.0, 100, RoastType::Beans).unwrap());

        let names: Vec<_> = repo.get_all().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["second", "first again"]);
    }
}
