use crate::api::models::{MediaItem, MediaKind};

/// Flat, order-preserving view of every playable item under the current
/// browse root. Folders are walked depth-first, pre-order; only
/// video/audio entries are kept, and folders themselves never appear.
///
/// The catalog is replaced wholesale on every browse response; entries
/// from a previously browsed directory are never retained. It exists
/// solely to answer "what comes after/before this path" when no playlist
/// is bound.
#[derive(Debug, Default)]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
}

impl MediaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, tree: &[MediaItem]) {
        let mut flat = Vec::new();
        collect(tree, &mut flat);
        self.items = flat;
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, path: &str) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.path == path)
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|item| item.path == path)
    }

    /// Item after `path` in flat order; `None` when `path` is absent or last.
    pub fn next_after(&self, path: &str) -> Option<&MediaItem> {
        let idx = self.position_of(path)?;
        self.items.get(idx + 1)
    }

    /// Item before `path` in flat order; `None` when `path` is absent or first.
    pub fn prev_before(&self, path: &str) -> Option<&MediaItem> {
        let idx = self.position_of(path)?;
        idx.checked_sub(1).and_then(|i| self.items.get(i))
    }
}

fn collect(nodes: &[MediaItem], out: &mut Vec<MediaItem>) {
    for node in nodes {
        match node.kind {
            MediaKind::Video | MediaKind::Audio => out.push(node.clone()),
            MediaKind::Folder => {
                if let Some(children) = &node.children {
                    collect(children, out);
                }
            }
        }
    }
}
