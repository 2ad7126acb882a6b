//! `POST /api/catalog` — replace the loaded reference data.
//!
//! Body: `{"units": [...], "weapons": [...], "skills": [...]}`; any key may
//! be omitted to leave that collection absent.

use crate::catalog::Catalog;
use crate::routes::util::error_span;
use crate::state;
use log::warn;

pub fn handle_post(body: &str) -> String {
    match Catalog::from_bundle_json(body) {
        Ok(catalog) => {
            let catalog = state::replace_catalog(catalog);
            format!(
                r#"<span class="status">Loaded {} units, {} weapons, {} skills</span>"#,
                catalog.units().map_or(0, |c| c.len()),
                catalog.weapons().map_or(0, |c| c.len()),
                catalog.skills().map_or(0, |c| c.len()),
            )
        }
        Err(e) => {
            warn!("catalog rejected: {}", e);
            error_span(&e)
        }
    }
}
