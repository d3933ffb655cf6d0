use std::{collections::HashSet, path::Path, sync::LazyLock};

use regex::Regex;

use super::{desk_id::DeskId, error::ServiceResult};

static DESK_ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bid\s*=\s*"([a-z][0-9]{4})""#).expect("desk id pattern is valid")
});

/// Desk ids embedded as element ids in a floor-plan SVG, in document order
/// without repeats.
pub fn scan_desk_ids(svg: &str) -> Vec<DeskId> {
    let mut seen = HashSet::new();
    DESK_ID_ATTRIBUTE
        .captures_iter(svg)
        .filter_map(|caps| DeskId::parse(&caps[1].to_ascii_uppercase()).ok())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

pub async fn read_desk_ids(path: &Path) -> ServiceResult<Vec<DeskId>> {
    let svg = tokio::fs::read_to_string(path).await?;
    Ok(scan_desk_ids(&svg))
}
