use std::mem::discriminant;
use std::sync::Arc;

use brewshelf_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{LeafType, Product, RoastType};
use crate::repository::ProductRepository;

/// Stateless façade in front of the repository.
///
/// The service is the only entry point presentation shells use: it generates
/// identities, routes construction through the validated product model and
/// applies the filtering rules. It holds no state of its own beyond the
/// repository handle.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Create a coffee entry under a fresh id.
    ///
    /// On a validation failure nothing reaches the repository.
    pub fn create_coffee(
        &self,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        roast: RoastType,
    ) -> DomainResult<Product> {
        let product = Product::coffee(ProductId::new(), name, price, weight, roast)?;
        self.repo.add(product.clone());
        tracing::info!(id = %product.id(), kind = "coffee", "product created");
        Ok(product)
    }

    /// Create a tea entry under a fresh id.
    pub fn create_tea(
        &self,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        leaf: LeafType,
    ) -> DomainResult<Product> {
        let product = Product::tea(ProductId::new(), name, price, weight, leaf)?;
        self.repo.add(product.clone());
        tracing::info!(id = %product.id(), kind = "tea", "product created");
        Ok(product)
    }

    /// All products, insertion order.
    pub fn get_all(&self) -> Vec<Product> {
        self.repo.get_all()
    }

    /// A missing id is `None`, not an error.
    pub fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.repo.get_by_id(id)
    }

    /// Products strictly lighter than `max_weight` grams, repository order.
    pub fn get_lighter_than(&self, max_weight: u32) -> Vec<Product> {
        self.repo
            .get_all()
            .into_iter()
            .filter(|p| p.weight() < max_weight)
            .collect()
    }

    /// Replace the coffee entry at `id` with freshly validated fields.
    ///
    /// `Ok(false)` when the id does not exist; `Err` when validation fails or
    /// the stored entry is not a coffee. The repository is untouched in every
    /// non-`Ok(true)` outcome.
    pub fn update_coffee(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        roast: RoastType,
    ) -> DomainResult<bool> {
        let updated = Product::coffee(id, name, price, weight, roast)?;
        self.replace(updated)
    }

    /// Replace the tea entry at `id`; same contract as [`Self::update_coffee`].
    pub fn update_tea(
        &self,
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        leaf: LeafType,
    ) -> DomainResult<bool> {
        let updated = Product::tea(id, name, price, weight, leaf)?;
        self.replace(updated)
    }

    /// Remove the entry at `id`; reports whether it existed.
    pub fn delete(&self, id: ProductId) -> bool {
        let existed = self.repo.delete(id);
        if existed {
            tracing::info!(id = %id, "product deleted");
        }
        existed
    }

    // An update never migrates an entry between variants: overwriting a tea
    // through the coffee path (or vice versa) is a conflict, not a silent
    // replacement. The existence check and the write are two repository calls;
    // the catalog serves a single client at a time, so nothing slips between.
    fn replace(&self, updated: Product) -> DomainResult<bool> {
        let id = *updated.id();
        let Some(existing) = self.repo.get_by_id(id) else {
            return Ok(false);
        };
        if discriminant(&existing) != discriminant(&updated) {
            return Err(DomainError::conflict(format!(
                "entry {id} is a {}, not a {}",
                existing.kind_label(),
                updated.kind_label()
            )));
        }
        let replaced = self.repo.update(updated);
        tracing::debug!(id = %id, replaced, "product updated");
        Ok(replaced)
    }
}
