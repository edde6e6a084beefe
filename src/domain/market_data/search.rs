use super::entities::Asset;

/// Results shown when the search box is empty.
pub const EMPTY_TERM_LIMIT: usize = 20;
/// Results shown for a non-empty term.
pub const MATCH_LIMIT: usize = 25;

/// Asset list fetched once at load, filtered locally on every keystroke.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn replace(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn filter(&self, term: &str) -> Vec<Asset> {
        filter_assets(&self.assets, term)
    }
}

/// Case-insensitive substring match against symbol or name.
pub fn filter_assets(assets: &[Asset], term: &str) -> Vec<Asset> {
    let q = term.trim().to_lowercase();
    if q.is_empty() {
        return assets.iter().take(EMPTY_TERM_LIMIT).cloned().collect();
    }
    assets
        .iter()
        .filter(|asset| {
            asset.symbol.value().to_lowercase().contains(&q) || asset.name.to_lowercase().contains(&q)
        })
        .take(MATCH_LIMIT)
        .cloned()
        .collect()
}
