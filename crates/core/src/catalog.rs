use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::domain::product::{Product, ProductId};

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    id: u32,
    name: &'static str,
    price: u64,
    rating: f64,
    discount: f64,
    popularity: f64,
    category: &'static str,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "Samsung Galaxy S24",
        price: 79_999,
        rating: 4.5,
        discount: 10.0,
        popularity: 90.0,
        category: "Mobile",
    },
    ProductSeed {
        id: 2,
        name: "iPhone 15 Pro",
        price: 129_999,
        rating: 4.8,
        discount: 5.0,
        popularity: 98.0,
        category: "Mobile",
    },
    ProductSeed {
        id: 3,
        name: "OnePlus 12",
        price: 65_999,
        rating: 4.3,
        discount: 8.0,
        popularity: 85.0,
        category: "Mobile",
    },
    ProductSeed {
        id: 4,
        name: "MacBook Air M3",
        price: 139_999,
        rating: 4.7,
        discount: 12.0,
        popularity: 95.0,
        category: "Laptop",
    },
    ProductSeed {
        id: 5,
        name: "HP Spectre x360",
        price: 119_999,
        rating: 4.4,
        discount: 15.0,
        popularity: 88.0,
        category: "Laptop",
    },
    ProductSeed {
        id: 6,
        name: "Dell XPS 13",
        price: 124_999,
        rating: 4.6,
        discount: 10.0,
        popularity: 92.0,
        category: "Laptop",
    },
];

impl From<&ProductSeed> for Product {
    fn from(seed: &ProductSeed) -> Self {
        Product {
            id: ProductId(seed.id),
            name: seed.name.to_string(),
            price: seed.price,
            rating: seed.rating,
            discount: seed.discount,
            popularity: seed.popularity,
            category: seed.category.to_string(),
        }
    }
}

static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("catalog contains duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {id}: {field} {reason}")]
    InvalidField { id: ProductId, field: &'static str, reason: String },
}

/// Read-only product catalog. Order is significant: it is the order
/// recommendations are presented in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate_products(&products)?;
        Ok(Self { products })
    }

    /// Process-wide built-in catalog, initialised on first use.
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN
            .get_or_init(|| {
                Arc::new(Catalog { products: PRODUCT_SEEDS.iter().map(Product::from).collect() })
            })
            .clone()
    }

    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, CatalogError> {
        let file = toml::from_str::<CatalogFile>(raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        Self::new(file.products)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw, path)
    }

    /// Resolves the catalog a session should use: the configured file when
    /// one is set, the built-in catalog otherwise.
    pub fn from_config(config: &CatalogConfig) -> Result<Arc<Catalog>, CatalogError> {
        match &config.path {
            Some(path) => {
                let catalog = Self::load(path)?;
                tracing::debug!(
                    event_name = "catalog.loaded",
                    path = %path.display(),
                    products = catalog.len(),
                    "catalog loaded from file"
                );
                Ok(Arc::new(catalog))
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name contains `needle`, ignoring case, in catalog order.
    pub fn matching_name(&self, needle: &str) -> Vec<Product> {
        let needle = needle.to_lowercase();
        self.products.iter().filter(|product| product.name_matches(&needle)).cloned().collect()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        validate_product(product)?;
    }
    Ok(())
}

fn validate_product(product: &Product) -> Result<(), CatalogError> {
    let invalid = |field: &'static str, reason: String| CatalogError::InvalidField {
        id: product.id,
        field,
        reason,
    };

    if product.name.trim().is_empty() {
        return Err(invalid("name", "must not be empty".to_string()));
    }
    if product.category.trim().is_empty() {
        return Err(invalid("category", "must not be empty".to_string()));
    }
    check_range(product.rating, 5.0).map_err(|reason| invalid("rating", reason))?;
    check_range(product.discount, 100.0).map_err(|reason| invalid("discount", reason))?;
    check_range(product.popularity, 100.0).map_err(|reason| invalid("popularity", reason))?;
    Ok(())
}

fn check_range(value: f64, max: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err("must be a finite number".to_string());
    }
    if !(0.0..=max).contains(&value) {
        return Err(format!("must be in range 0..={max}, got {value}"));
    }
    Ok(())
}
