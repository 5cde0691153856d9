use serde::Serialize;
use shortlist_core::config::AppConfig;
use shortlist_core::{Ranker, ScoredProduct};

use crate::commands::{open_session, CommandResult};
use crate::render;

#[derive(Debug, Serialize)]
struct CatalogReport {
    products: Vec<ScoredProduct>,
}

pub fn run(config: &AppConfig, json_output: bool) -> CommandResult {
    let session = match open_session("catalog", config) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let ranker = Ranker::with_weights(config.ranking.weights());
    let products = ranker.ranked_scores(session.catalog().products());

    if json_output {
        return CommandResult::json("catalog", &CatalogReport { products });
    }
    CommandResult::text(render::ranked(&products, &config.display))
}
