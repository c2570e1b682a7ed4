use core::str::FromStr;

use serde::{Deserialize, Serialize};

use brewshelf_core::{DomainError, DomainResult, Entity, ProductId};

/// Roast of a coffee product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastType {
    Instant,
    Ground,
    Beans,
}

impl RoastType {
    pub const ALL: [RoastType; 3] = [RoastType::Instant, RoastType::Ground, RoastType::Beans];

    /// Human-readable label used in product descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            RoastType::Instant => "instant",
            RoastType::Ground => "ground",
            RoastType::Beans => "beans",
        }
    }
}

impl core::fmt::Display for RoastType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoastType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" => Ok(RoastType::Instant),
            "ground" => Ok(RoastType::Ground),
            "beans" => Ok(RoastType::Beans),
            other => Err(DomainError::validation(format!("unknown roast type: {other}"))),
        }
    }
}

/// Leaf of a tea product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafType {
    Black,
    Green,
}

impl LeafType {
    pub const ALL: [LeafType; 2] = [LeafType::Black, LeafType::Green];

    /// Human-readable label used in product descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            LeafType::Black => "black",
            LeafType::Green => "green",
        }
    }
}

impl core::fmt::Display for LeafType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeafType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(LeafType::Black),
            "green" => Ok(LeafType::Green),
            other => Err(DomainError::validation(format!("unknown leaf type: {other}"))),
        }
    }
}

/// A coffee catalog entry.
///
/// Only constructed through [`Product::coffee`], so every reachable value
/// satisfies the catalog invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    id: ProductId,
    name: String,
    price: f64,
    weight: u32,
    roast: RoastType,
}

impl Coffee {
    pub fn roast(&self) -> RoastType {
        self.roast
    }
}

/// A tea catalog entry.
///
/// Only constructed through [`Product::tea`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tea {
    id: ProductId,
    name: String,
    price: f64,
    weight: u32,
    leaf: LeafType,
}

impl Tea {
    pub fn leaf(&self) -> LeafType {
        self.leaf
    }
}

/// A sellable catalog item.
///
/// Closed sum type: the variant set is fixed (coffee, tea) and exhaustively
/// matched everywhere. A product's id and variant are assigned once at
/// creation; "updating" a product means building a fresh value with the same
/// id through the same validated constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
    Coffee(Coffee),
    Tea(Tea),
}

/// Shared construction invariants, checked in a fixed order so the reported
/// error is deterministic: name, then price, then weight.
fn validate(name: &str, price: f64, weight: u32) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name must not be blank"));
    }
    // NaN is rejected here too: a price that is not a number is not
    // non-negative.
    if price.is_nan() || price < 0.0 {
        return Err(DomainError::validation("price must not be negative"));
    }
    if weight == 0 {
        return Err(DomainError::validation("weight must be positive"));
    }
    Ok(())
}

impl Product {
    /// Build a coffee entry, validating name, price and weight.
    pub fn coffee(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        roast: RoastType,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate(&name, price, weight)?;
        Ok(Product::Coffee(Coffee {
            id,
            name,
            price,
            weight,
            roast,
        }))
    }

    /// Build a tea entry, validating name, price and weight.
    pub fn tea(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        weight: u32,
        leaf: LeafType,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate(&name, price, weight)?;
        Ok(Product::Tea(Tea {
            id,
            name,
            price,
            weight,
            leaf,
        }))
    }

    pub fn name(&self) -> &str {
        match self {
            Product::Coffee(c) => &c.name,
            Product::Tea(t) => &t.name,
        }
    }

    /// Price, unformatted. Rendering is a presentation concern.
    pub fn price(&self) -> f64 {
        match self {
            Product::Coffee(c) => c.price,
            Product::Tea(t) => t.price,
        }
    }

    /// Weight in grams, unformatted.
    pub fn weight(&self) -> u32 {
        match self {
            Product::Coffee(c) => c.weight,
            Product::Tea(t) => t.weight,
        }
    }

    /// Variant label ("Coffee" / "Tea").
    pub fn kind_label(&self) -> &'static str {
        match self {
            Product::Coffee(_) => "Coffee",
            Product::Tea(_) => "Tea",
        }
    }

    /// Human-readable one-line summary.
    pub fn description(&self) -> String {
        match self {
            Product::Coffee(c) => format!(
                "Coffee: {} ({}), price: {}, weight: {}g",
                c.name,
                c.roast.label(),
                c.price,
                c.weight
            ),
            Product::Tea(t) => format!(
                "Tea: {} ({}), price: {}, weight: {}g",
                t.name,
                t.leaf.label(),
                t.price,
                t.weight
            ),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        match self {
            Product::Coffee(c) => &c.id,
            Product::Tea(t) => &t.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> ProductId {
        ProductId::new()
    }

    fn validation_message(result: DomainResult<Product>) -> String {
        match result.unwrap_err() {
            DomainError::Validation(msg) => msg,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn coffee_preserves_fields_exactly() {
        let id = test_id();
        let p = Product::coffee(id, "Arabica", 799.0, 250, RoastType::Beans).unwrap();

        assert_eq!(*p.id(), id);
        assert_eq!(p.name(), "Arabica");
        assert_eq!(p.price(), 799.0);
        assert_eq!(p.weight(), 250);
        match &p {
            Product::Coffee(c) => assert_eq!(c.roast(), RoastType::Beans),
            Product::Tea(_) => panic!("expected a coffee"),
        }
    }

    #[test]
    fn tea_preserves_fields_exactly() {
        let p = Product::tea(test_id(), "Assam", 199.0, 90, LeafType::Black).unwrap();

        assert_eq!(p.name(), "Assam");
        assert_eq!(p.price(), 199.0);
        assert_eq!(p.weight(), 90);
        match &p {
            Product::Tea(t) => assert_eq!(t.leaf(), LeafType::Black),
            Product::Coffee(_) => panic!("expected a tea"),
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let msg = validation_message(Product::coffee(test_id(), "   ", 10.0, 50, RoastType::Beans));
        assert!(msg.contains("name"), "message should identify the field: {msg}");
    }

    #[test]
    fn negative_price_is_rejected() {
        let msg = validation_message(Product::tea(test_id(), "Assam", -0.01, 50, LeafType::Black));
        assert!(msg.contains("price"), "message should identify the field: {msg}");
    }

    #[test]
    fn nan_price_is_rejected() {
        let msg =
            validation_message(Product::tea(test_id(), "Assam", f64::NAN, 50, LeafType::Black));
        assert!(msg.contains("price"), "message should identify the field: {msg}");
    }

    #[test]
    fn zero_weight_is_rejected() {
        let msg = validation_message(Product::coffee(test_id(), "Monarch", 10.0, 0, RoastType::Ground));
        assert!(msg.contains("weight"), "message should identify the field: {msg}");
    }

    #[test]
    fn zero_price_is_valid() {
        let p = Product::tea(test_id(), "Sample", 0.0, 10, LeafType::Green).unwrap();
        assert_eq!(p.price(), 0.0);
    }

    #[test]
    fn violations_report_in_name_price_weight_order() {
        // All three invariants broken: the name check fires first.
        let msg =
            validation_message(Product::coffee(test_id(), "", -1.0, 0, RoastType::Instant));
        assert!(msg.contains("name"), "expected name error first, got: {msg}");

        // Name fine, price and weight broken: price fires next.
        let msg =
            validation_message(Product::coffee(test_id(), "Monarch", -1.0, 0, RoastType::Instant));
        assert!(msg.contains("price"), "expected price error next, got: {msg}");
    }

    #[test]
    fn description_renders_kind_name_subtype_price_and_weight() {
        let coffee = Product::coffee(test_id(), "Arabica", 799.0, 250, RoastType::Beans).unwrap();
        assert_eq!(
            coffee.description(),
            "Coffee: Arabica (beans), price: 799, weight: 250g"
        );

        let tea = Product::tea(test_id(), "Assam", 199.5, 90, LeafType::Green).unwrap();
        assert_eq!(
            tea.description(),
            "Tea: Assam (green), price: 199.5, weight: 90g"
        );
    }

    #[test]
    fn subtype_parsing_is_case_insensitive() {
        assert_eq!("BEANS".parse::<RoastType>().unwrap(), RoastType::Beans);
        assert_eq!(" ground ".parse::<RoastType>().unwrap(), RoastType::Ground);
        assert_eq!("Green".parse::<LeafType>().unwrap(), LeafType::Green);
        assert!("oolong".parse::<LeafType>().is_err());
    }

    #[test]
    fn product_serde_round_trip() {
        let p = Product::coffee(test_id(), "Arabica", 799.0, 250, RoastType::Beans).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
        assert!(json.contains("\"kind\":\"coffee\""));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every valid input constructs, and the fields round-trip
            /// exactly (no silent coercion).
            #[test]
            fn valid_inputs_always_construct(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                price in 0.0f64..1_000_000.0,
                weight in 1u32..1_000_000,
            ) {
                let p = Product::coffee(
                    ProductId::new(),
                    name.clone(),
                    price,
                    weight,
                    RoastType::Ground,
                ).unwrap();

                prop_assert_eq!(p.name(), name.as_str());
                prop_assert_eq!(p.price(), price);
                prop_assert_eq!(p.weight(), weight);
            }

            /// Property: whitespace-only names always fail with the name error,
            /// regardless of the other fields.
            #[test]
            fn blank_names_always_fail(
                name in "[ \t]{0,8}",
                price in -100.0f64..100.0,
                weight in 0u32..100,
            ) {
                let err = Product::tea(
                    ProductId::new(),
                    name,
                    price,
                    weight,
                    LeafType::Black,
                ).unwrap_err();

                match err {
                    DomainError::Validation(msg) => prop_assert!(msg.contains("name")),
                    other => prop_assert!(false, "expected Validation, got {:?}", other),
                }
            }
        }
    }
}
