use serde::Serialize;
use shortlist_core::config::AppConfig;
use shortlist_core::Product;

use crate::commands::{open_session, CommandResult};
use crate::render;

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    suggestions: Vec<Product>,
}

pub fn run(config: &AppConfig, query: &str, json_output: bool) -> CommandResult {
    let mut session = match open_session("search", config) {
        Ok(session) => session,
        Err(result) => return result,
    };

    let suggestions = session.type_query(query).to_vec();

    if json_output {
        return CommandResult::json("search", &SearchReport { query, suggestions });
    }
    CommandResult::text(render::suggestions(&suggestions))
}
