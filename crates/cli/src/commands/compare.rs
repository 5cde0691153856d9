use shortlist_core::config::AppConfig;
use shortlist_core::{ApplicationError, ProductId};

use crate::commands::{open_session, CommandResult};
use crate::render;

/// Selects each id in order, as if picked from the suggestion list, then
/// reports the resulting session.
pub fn run(config: &AppConfig, ids: &[u32], json_output: bool) -> CommandResult {
    let mut session = match open_session("compare", config) {
        Ok(session) => session,
        Err(result) => return result,
    };

    for id in ids {
        if let Err(error) = session.select(ProductId(*id)) {
            return CommandResult::from_error("compare", &ApplicationError::from(error));
        }
    }

    let view = session.view();
    if json_output {
        return CommandResult::json("compare", &view);
    }
    CommandResult::text(render::view(&view, &config.display))
}
