use serde::Serialize;
use shortlist_core::config::AppConfig;
use shortlist_core::{ApplicationError, DomainError, Product, ProductId, SimilarityFinder};

use crate::commands::{open_session, CommandResult};
use crate::render;

#[derive(Debug, Serialize)]
struct SimilarReport {
    product: Product,
    similar: Vec<Product>,
}

pub fn run(config: &AppConfig, id: u32, json_output: bool) -> CommandResult {
    let session = match open_session("similar", config) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let Some(product) = session.catalog().find(ProductId(id)).cloned() else {
        let error = ApplicationError::from(DomainError::UnknownProduct(ProductId(id)));
        return CommandResult::from_error("similar", &error);
    };
    let similar = SimilarityFinder::new().find(&product, session.catalog().products());

    if json_output {
        return CommandResult::json("similar", &SimilarReport { product, similar });
    }

    let mut output = format!("[{}] {} ({})\n", product.id, product.name, product.category);
    output.push_str(&render::recommendations(&similar, &config.display));
    CommandResult::text(output)
}
