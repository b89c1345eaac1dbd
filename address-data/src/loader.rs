//! Lazily loaded, cached address dataset.

use std::sync::{Mutex, OnceLock, PoisonError};

use address_core::{ADDRESS_TYPE_NAME, AddressFeature, Dataset, Filter, QuerySpec, Schema};
use camino::Utf8PathBuf;
use log::{debug, info};

use crate::resource::CHINA_POI_RESOURCE;
use crate::{BundledResources, DirectoryLocator, LoadError, ResourceLocator, read_addresses};

/// Loads the `address` feature type from a named CSV resource.
///
/// The schema, the parsed records and the replay queries are each computed
/// on first access and returned from cache afterwards. Concurrent first calls
/// compute each value once. A failed record load caches nothing, so the next
/// call starts over.
///
/// # Examples
/// ```
/// use address_data::AddressLoader;
///
/// # fn main() -> Result<(), address_data::LoadError> {
/// let loader = AddressLoader::bundled();
/// let records = loader.records()?;
/// assert!(!records.is_empty());
/// assert!(std::ptr::eq(records, loader.records()?));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AddressLoader<L = BundledResources> {
    locator: L,
    resource_name: String,
    schema: OnceLock<Schema>,
    records: OnceLock<Vec<AddressFeature>>,
    records_init: Mutex<()>,
    queries: OnceLock<Vec<QuerySpec>>,
}

impl AddressLoader<BundledResources> {
    /// Load the dataset compiled into this crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(BundledResources::default())
    }
}

impl AddressLoader<DirectoryLocator> {
    /// Load the dataset from the first of `dirs` that holds it.
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self::new(DirectoryLocator::new(dirs))
    }
}

impl<L: ResourceLocator> AddressLoader<L> {
    /// Load the dataset through `locator`.
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            resource_name: CHINA_POI_RESOURCE.to_owned(),
            schema: OnceLock::new(),
            records: OnceLock::new(),
            records_init: Mutex::new(()),
            queries: OnceLock::new(),
        }
    }

    /// Read records from `name` instead of the default resource.
    #[must_use]
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    /// Logical name of the resource records are read from.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Feature type name, always `"address"`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        ADDRESS_TYPE_NAME
    }

    /// Schema of the `address` feature type.
    pub fn schema(&self) -> &Schema {
        self.schema.get_or_init(AddressFeature::schema)
    }

    /// Every record of the resource, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ResourceNotFound`] when the resource cannot be
    /// located, [`LoadError::MalformedNumber`] when a coordinate does not
    /// parse, [`LoadError::MissingColumn`] for rows narrower than four
    /// columns, and [`LoadError::DataLoadFailure`] for any other read error.
    pub fn records(&self) -> Result<&[AddressFeature], LoadError> {
        if let Some(records) = self.records.get() {
            return Ok(records);
        }

        let _init = self
            .records_init
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(records) = self.records.get() {
            return Ok(records);
        }

        debug!("loading address records from {}", self.resource_name);
        let reader = self.locator.open(&self.resource_name)?;
        let parsed = read_addresses(reader, &self.resource_name)?;
        info!(
            "loaded {} address records from {}",
            parsed.len(),
            self.resource_name
        );
        Ok(self.records.get_or_init(|| parsed))
    }

    /// The single full-scan query over the `address` type.
    pub fn queries(&self) -> &[QuerySpec] {
        self.queries
            .get_or_init(|| vec![QuerySpec::select_all(self.type_name())])
    }

    /// Filter selecting every record.
    #[must_use]
    pub const fn subset_filter(&self) -> Filter {
        Filter::Include
    }
}

impl<L: ResourceLocator> Dataset for AddressLoader<L> {
    type Error = LoadError;

    fn type_name(&self) -> &str {
        Self::type_name(self)
    }

    fn schema(&self) -> &Schema {
        Self::schema(self)
    }

    fn features(&self) -> Result<&[AddressFeature], Self::Error> {
        self.records()
    }

    fn queries(&self) -> &[QuerySpec] {
        Self::queries(self)
    }

    fn subset_filter(&self) -> Filter {
        Self::subset_filter(self)
    }
}
