use std::collections::HashMap;

use crate::models::{CitationFragment, Source};

/// Collapses grounding citations to one entry per URI
///
/// Fragments missing either a URI or a title are dropped. When a URI repeats,
/// the later title wins but the entry keeps the position where that URI was
/// first seen.
pub fn dedupe_sources<I>(fragments: I) -> Vec<Source>
where
    I: IntoIterator<Item = CitationFragment>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut sources: Vec<Source> = Vec::new();

    for fragment in fragments {
        let (Some(uri), Some(title)) = (fragment.uri, fragment.title) else {
            continue;
        };
        if uri.is_empty() || title.is_empty() {
            continue;
        }

        match positions.get(&uri) {
            Some(&index) => sources[index].title = title,
            None => {
                positions.insert(uri.clone(), sources.len());
                sources.push(Source { title, uri });
            }
        }
    }

    sources
}
