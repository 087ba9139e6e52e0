//! High-level programmatic API for datahub-catalog.
//!
//! [`Catalog`] wires the dataset repository, the code tables, the durable
//! flag store and the login gate together so callers do not need to know
//! the internal module structure.
//!
//! ```rust,no_run
//! use datahub_catalog::api::Catalog;
//! use datahub_catalog::config::Config;
//! use datahub_catalog::model::{DataSource, FlagKind};
//!
//! fn main() -> datahub_catalog::Result<()> {
//!     let mut catalog = Catalog::open(Config::load()?)?;
//!
//!     let mut state = catalog.new_state();
//!     state.set_source(DataSource::Imf);
//!     state.select_category("Asia");
//!
//!     let view = catalog.view(&state);
//!     println!("{}", view.heading);
//!     for row in &view.rows {
//!         println!("{}  {}", row.record.title, row.breadcrumb);
//!     }
//!
//!     catalog.toggle_flag("IMF.JPN.LABOUR_MARKET", FlagKind::Plus)?;
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::auth::AuthGate;
use crate::browser::{BrowseView, BrowserState};
use crate::config::Config;
use crate::dataset::Repository;
use crate::error::{CatalogError, Result};
use crate::filter::{facets, FilterCriteria, FilterEngine};
use crate::flags::{flag_filter_count, FlagSet, FlagStorage, FlagStore};
use crate::model::{CategoryTree, DataSource, DatasetRecord, FlagKind};
use crate::resolver::{children_of, CategoryResolver, CodeTables};

/// High-level client for catalog operations.
#[derive(Debug)]
pub struct Catalog {
    repository: Repository,
    tables: CodeTables,
    flags: FlagStorage,
    auth: AuthGate,
    config: Config,
    data_dir: PathBuf,
}

/// A flagged record together with the dataset it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FlaggedRecord<'a> {
    /// Owning dataset.
    pub source: DataSource,
    /// The record.
    pub record: &'a DatasetRecord,
    /// Its flags.
    pub flags: FlagSet,
}

impl Catalog {
    /// Open the catalog using the data directory from `config`.
    pub fn open(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        Self::open_in(config, &data_dir)
    }

    /// Open the catalog with an explicit data directory.
    pub fn open_in(config: Config, data_dir: &Path) -> Result<Self> {
        config.validate()?;
        let repository = Repository::load(&config.datasets)?;
        let flags = FlagStorage::open_in(data_dir);
        let auth = AuthGate::in_dir(data_dir, config.auth.required);
        debug!(data_dir = %data_dir.display(), flagged = flags.store().len(), "Opened catalog");

        Ok(Self {
            repository,
            tables: CodeTables::builtin(),
            flags,
            auth,
            config,
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Dataset repository.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Region and country tables.
    pub fn tables(&self) -> &CodeTables {
        &self.tables
    }

    /// Current flags.
    pub fn flags(&self) -> &FlagStore {
        self.flags.store()
    }

    /// Login gate.
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory holding durable state.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Fresh browsing state using the configured defaults.
    pub fn new_state(&self) -> BrowserState {
        BrowserState::new(
            self.config.browse.default_source,
            self.config.browse.page_size,
        )
    }

    /// Compute the page for a browsing state.
    pub fn view(&self, state: &BrowserState) -> BrowseView<'_> {
        BrowseView::build(
            self.repository.dataset(state.source()),
            &self.tables,
            self.flags.store(),
            state,
        )
    }

    /// Move `state` to `page`, clamped against its current filtered count.
    pub fn go_to_page(&self, state: &mut BrowserState, page: i64) -> usize {
        let total_items = self.filtered(state.source(), state.criteria()).len();
        state.go_to_page(page, total_items)
    }

    /// Every record of a source matching `criteria`, unpaginated.
    pub fn filtered(&self, source: DataSource, criteria: &FilterCriteria) -> Vec<&DatasetRecord> {
        FilterEngine::new(source, &self.tables).filter(
            self.repository.dataset(source).records(),
            criteria,
            self.flags.store(),
        )
    }

    /// Flip a flag on a known record and persist the store.
    pub fn toggle_flag(&mut self, record_id: &str, kind: FlagKind) -> Result<bool> {
        self.require_record(record_id)?;
        self.flags.toggle(record_id, kind)
    }

    /// Flags of a known record.
    pub fn flags_for(&self, record_id: &str) -> Result<FlagSet> {
        self.require_record(record_id)?;
        Ok(self.flags.store().get(record_id))
    }

    /// Records with a flag set, across both datasets.
    ///
    /// Stored ids that no longer match a record are skipped.
    pub fn flagged(&self, kind: Option<FlagKind>) -> Vec<FlaggedRecord<'_>> {
        self.flags
            .store()
            .iter()
            .filter(|(_, flags)| kind.map_or(true, |kind| flags.get(kind)))
            .filter_map(|(id, flags)| {
                self.repository
                    .find(id)
                    .map(|(source, record)| FlaggedRecord {
                        source,
                        record,
                        flags,
                    })
            })
            .collect()
    }

    /// Records of a source with a flag set.
    pub fn flag_count(&self, source: DataSource, kind: FlagKind) -> usize {
        flag_filter_count(
            self.repository.dataset(source).records(),
            self.flags.store(),
            kind,
        )
    }

    /// Records of a source in the cart.
    pub fn cart_count(&self, source: DataSource) -> usize {
        self.flag_count(source, FlagKind::Plus)
    }

    /// Category tree of a source.
    pub fn tree(&self, source: DataSource) -> &CategoryTree {
        CategoryResolver::new(&self.repository).categories_for(source)
    }

    /// Children of a tree node.
    pub fn children<S: AsRef<str>>(&self, source: DataSource, path: &[S]) -> Vec<String> {
        children_of(self.tree(source), path)
    }

    /// Subcategories (or, with `subcategory`, subsets) present in the records.
    pub fn facets(
        &self,
        source: DataSource,
        category: &str,
        subcategory: Option<&str>,
    ) -> Vec<String> {
        let records = self.repository.dataset(source).records();
        match subcategory {
            Some(subcategory) => facets::subsets_of(records, category, subcategory),
            None => facets::subcategories_of(records, category),
        }
    }

    fn require_record(&self, record_id: &str) -> Result<()> {
        if self.repository.find(record_id).is_some() {
            Ok(())
        } else {
            Err(CatalogError::UnknownRecord {
                record_id: record_id.to_string(),
            })
        }
    }
}
