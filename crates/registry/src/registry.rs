//! Dual-keyed name/identifier registry
//!
//! A [`NameIdRegistry`] owns values reachable both by a caller-chosen name and
//! by an [`Identifier`] the registry mints on insert.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut profiles = ValueRegistry::<ActionProfile>::new();
//!
//! // Insert
//! let id = profiles.add("PlayerProfile", player_profile)?;
//! let (ai, ai_id) = profiles.emplace_with("AIProfile", || ActionProfile::load("ai"))?;
//!
//! // Look up by either key
//! let by_name = profiles.get_by_name("PlayerProfile");
//! let by_id = profiles.get(id);
//! ```
//!
//! ## Indexes
//!
//! - Value index: identifier -> owned value
//! - Name index: name -> identifier
//! - Inverted index (optional): identifier -> name, see
//!   [`RegistryConfig::reverse_index`]
//!
//! After every public call, each name resolves to a stored value, each stored
//! value has exactly one name, and the inverted index (when enabled) is the
//! exact inverse of the name index.
//!
//! ## Complexity
//!
//! | Operation                           | Default | With inverted index |
//! |-------------------------------------|---------|---------------------|
//! | insert, lookup by name or id        | O(1)    | O(1)                |
//! | `name_of`, `get_with_name`, `remove`| O(n)    | O(1)                |
//! | `remove_by_name`                    | O(1)    | O(1)                |
//!
//! The O(n) reverse lookups are a deliberate trade-off for small registries
//! that are rarely queried by identifier for their name.
//!
//! ## Failure
//!
//! Inserts reserve the name before storing the value. If storing fails, the
//! constructor returns an error, or the constructor panics, the reservation is
//! dropped and the registry is left exactly as it was.
//!
//! ## Concurrency
//!
//! No internal locking. Mutation needs `&mut self`; wrap the registry in a
//! lock to share it between threads.

use crate::config::{ConfigError, RegistryConfig};
use crate::error::{EmplaceError, RegistryError, RegistryResult};
use crate::ownership::{AsAny, Boxed, ByValue, Ownership};
use lodestone_core::{Identifier, IdentifierGenerator};
use rustc_hash::FxHashMap;
use std::any::{type_name, Any};
use std::collections::hash_map::Entry;
use std::convert::Infallible;
use std::fmt;
use tracing::{debug, trace, warn};

/// Registry that stores values directly
pub type ValueRegistry<T> = NameIdRegistry<ByValue<T>>;

/// Registry that stores exclusively owned `Box` handles
///
/// `T` may be unsized, e.g. `HandleRegistry<dyn Component>`.
pub type HandleRegistry<T> = NameIdRegistry<Boxed<T>>;

/// Owning container indexed by name and by minted identifier
///
/// Not `Clone`: every value has exactly one owner. Moving the registry moves
/// all of its entries.
pub struct NameIdRegistry<O: Ownership> {
    /// Owned values by identifier
    items: FxHashMap<Identifier, O::Owned>,
    /// Name -> identifier
    names: FxHashMap<String, Identifier>,
    /// Identifier -> name, when enabled
    reverse: Option<FxHashMap<Identifier, String>>,
    /// Mints identifiers for new entries
    generator: IdentifierGenerator,
    config: RegistryConfig,
}

/// A name entry that is removed again unless committed
///
/// Holding the name index borrow for the duration of an insert means the
/// entry is rolled back on every early return and on unwinding.
struct NameReservation<'a> {
    names: &'a mut FxHashMap<String, Identifier>,
    name: &'a str,
    committed: bool,
}

impl<'a> NameReservation<'a> {
    fn acquire(
        names: &'a mut FxHashMap<String, Identifier>,
        name: &'a str,
        id: Identifier,
    ) -> RegistryResult<Self> {
        if names.contains_key(name) {
            debug!(target: "lodestone::registry", name, "Duplicate name rejected");
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        names.insert(name.to_string(), id);
        Ok(NameReservation {
            names,
            name,
            committed: false,
        })
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for NameReservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.names.remove(self.name);
            trace!(target: "lodestone::registry", name = self.name, "Name reservation rolled back");
        }
    }
}

impl<O: Ownership> NameIdRegistry<O> {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create an empty registry with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        let capacity = config.initial_capacity;
        NameIdRegistry {
            items: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            reverse: config
                .reverse_index
                .then(|| FxHashMap::with_capacity_and_hasher(capacity, Default::default())),
            generator: IdentifierGenerator::from_entropy(),
            config,
        }
    }

    /// Replace the identifier generator (builder pattern)
    ///
    /// A seeded generator makes minted identifiers reproducible.
    pub fn with_generator(mut self, generator: IdentifierGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Get the configuration this registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ========== Insertion ==========

    /// Add a value under `name`
    ///
    /// Returns the freshly minted identifier of the new entry.
    ///
    /// # Errors
    ///
    /// - `DuplicateName` if `name` is already registered
    /// - `NameTooLong` if `name` exceeds the configured limit
    /// - `IdentifierCollision` if the minted identifier is already in use
    ///
    /// The registry is unchanged on error.
    pub fn add(&mut self, name: impl Into<String>, value: O::Owned) -> RegistryResult<Identifier> {
        self.insert_with(name.into(), || Ok::<_, Infallible>(value))
            .map(|(_, id)| id)
            .map_err(EmplaceError::into_registry_error)
    }

    /// Add a value under `name` and borrow it back
    ///
    /// Same failure behavior as [`add`](Self::add).
    pub fn emplace(
        &mut self,
        name: impl Into<String>,
        value: O::Owned,
    ) -> RegistryResult<(&mut O::Target, Identifier)> {
        let (owned, id) = self
            .insert_with(name.into(), || Ok::<_, Infallible>(value))
            .map_err(EmplaceError::into_registry_error)?;
        Ok((O::retrieve_mut(owned), id))
    }

    /// Construct a value in place under `name`
    ///
    /// The name is checked and reserved before `construct` runs; a duplicate
    /// name means `construct` is never called. If `construct` fails, its
    /// error is returned unchanged as [`EmplaceError::Construction`] after
    /// the reservation has been rolled back. A panic in `construct` also
    /// rolls the reservation back.
    pub fn emplace_with<F, E>(
        &mut self,
        name: impl Into<String>,
        construct: F,
    ) -> Result<(&mut O::Target, Identifier), EmplaceError<E>>
    where
        F: FnOnce() -> Result<O::Owned, E>,
    {
        let (owned, id) = self.insert_with(name.into(), construct)?;
        Ok((O::retrieve_mut(owned), id))
    }

    fn insert_with<F, E>(
        &mut self,
        name: String,
        construct: F,
    ) -> Result<(&mut O::Owned, Identifier), EmplaceError<E>>
    where
        F: FnOnce() -> Result<O::Owned, E>,
    {
        self.check_name(&name)?;

        let id = self.generator.next_identifier();
        let reservation = NameReservation::acquire(&mut self.names, &name, id)?;

        let owned = match construct() {
            Ok(owned) => owned,
            Err(err) => {
                debug!(target: "lodestone::registry", name = %name, "Construction failed, rolling back");
                return Err(EmplaceError::Construction(err));
            }
        };

        let slot = match self.items.entry(id) {
            Entry::Occupied(_) => {
                warn!(target: "lodestone::registry", id = %id, name = %name, "Identifier collision, rolling back");
                return Err(RegistryError::IdentifierCollision(id).into());
            }
            Entry::Vacant(vacant) => vacant.insert(owned),
        };
        reservation.commit();

        debug!(target: "lodestone::registry", id = %id, name = %name, "Entry added");
        if let Some(reverse) = self.reverse.as_mut() {
            reverse.insert(id, name);
        }
        Ok((slot, id))
    }

    fn check_name(&self, name: &str) -> RegistryResult<()> {
        match self.config.max_name_length {
            Some(max) if name.len() > max => Err(RegistryError::NameTooLong {
                length: name.len(),
                max,
            }),
            _ => Ok(()),
        }
    }

    // ========== Lookup ==========

    /// Get a value by identifier
    pub fn get(&self, id: Identifier) -> Option<&O::Target> {
        self.items.get(&id).map(O::retrieve)
    }

    /// Get a mutable value by identifier
    pub fn get_mut(&mut self, id: Identifier) -> Option<&mut O::Target> {
        self.items.get_mut(&id).map(O::retrieve_mut)
    }

    /// Get a value and its name by identifier
    ///
    /// O(n) unless the inverted index is enabled.
    pub fn get_with_name(&self, id: Identifier) -> Option<(&O::Target, &str)> {
        let value = self.get(id)?;
        let name = self.name_of(id)?;
        Some((value, name))
    }

    /// Get a value by name
    pub fn get_by_name(&self, name: &str) -> Option<&O::Target> {
        let id = self.names.get(name)?;
        self.get(*id)
    }

    /// Get a mutable value by name
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut O::Target> {
        let id = *self.names.get(name)?;
        self.get_mut(id)
    }

    /// Get a value and its identifier by name
    pub fn get_by_name_with_identifier(&self, name: &str) -> Option<(&O::Target, Identifier)> {
        let id = *self.names.get(name)?;
        self.get(id).map(|value| (value, id))
    }

    /// Get the identifier registered under `name`
    pub fn identifier_of(&self, name: &str) -> Option<Identifier> {
        self.names.get(name).copied()
    }

    /// Get the name of the entry with identifier `id`
    ///
    /// O(n) scan of the name index unless the inverted index is enabled.
    pub fn name_of(&self, id: Identifier) -> Option<&str> {
        match &self.reverse {
            Some(reverse) => reverse.get(&id).map(String::as_str),
            None => self
                .names
                .iter()
                .find(|(_, entry_id)| **entry_id == id)
                .map(|(name, _)| name.as_str()),
        }
    }

    /// Check if an entry with identifier `id` exists
    pub fn contains(&self, id: Identifier) -> bool {
        self.items.contains_key(&id)
    }

    /// Check if `name` is registered
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    // ========== Removal ==========

    /// Remove the entry with identifier `id`
    ///
    /// Returns true if an entry was removed. O(n) unless the inverted index
    /// is enabled.
    pub fn remove(&mut self, id: Identifier) -> bool {
        self.take(id).is_some()
    }

    /// Remove the entry registered under `name`
    ///
    /// Returns true if an entry was removed.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        self.take_by_name(name).is_some()
    }

    /// Remove the entry with identifier `id` and return its value
    pub fn take(&mut self, id: Identifier) -> Option<O::Owned> {
        let owned = self.items.remove(&id)?;
        let name = self.detach_name(id);
        debug!(target: "lodestone::registry", id = %id, name = ?name, "Entry removed");
        Some(owned)
    }

    /// Remove the entry registered under `name` and return its value
    pub fn take_by_name(&mut self, name: &str) -> Option<O::Owned> {
        let id = self.names.remove(name)?;
        if let Some(reverse) = self.reverse.as_mut() {
            reverse.remove(&id);
        }
        debug!(target: "lodestone::registry", id = %id, name, "Entry removed");
        self.items.remove(&id)
    }

    /// Remove the name entry pointing at `id`
    fn detach_name(&mut self, id: Identifier) -> Option<String> {
        let name = match self.reverse.as_mut() {
            Some(reverse) => reverse.remove(&id)?,
            None => self
                .names
                .iter()
                .find(|(_, entry_id)| **entry_id == id)
                .map(|(name, _)| name.clone())?,
        };
        self.names.remove(&name);
        Some(name)
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        let count = self.items.len();
        self.items.clear();
        self.names.clear();
        if let Some(reverse) = self.reverse.as_mut() {
            reverse.clear();
        }
        debug!(target: "lodestone::registry", count, "Registry cleared");
    }

    // ========== Introspection ==========

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over `(identifier, name, value)` in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (Identifier, &str, &O::Target)> + '_ {
        self.names.iter().filter_map(move |(name, id)| {
            self.items
                .get(id)
                .map(|owned| (*id, name.as_str(), O::retrieve(owned)))
        })
    }

    /// Iterate over registered names in unspecified order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }

    /// Iterate over identifiers in unspecified order
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.items.keys().copied()
    }
}

impl<T: ?Sized + AsAny> NameIdRegistry<Boxed<T>> {
    /// Construct a subtype in place and store it through a `Box<T>` handle
    ///
    /// `upcast` converts the concrete box into the stored handle, usually by
    /// unsizing coercion:
    ///
    /// ```rust,ignore
    /// let (transform, id) = components.emplace_as(
    ///     "Transform",
    ///     || Ok::<_, LoadError>(Transform::default()),
    ///     |handle: Box<Transform>| -> Box<dyn Component> { handle },
    /// )?;
    /// ```
    ///
    /// Returns a reference typed as the subtype.
    ///
    /// # Errors
    ///
    /// Same as [`emplace_with`](Self::emplace_with), plus `SubtypeMismatch`
    /// when `upcast` yields a handle to something other than a `U`. The
    /// registry is unchanged on error.
    pub fn emplace_as<U, F, E, C>(
        &mut self,
        name: impl Into<String>,
        construct: F,
        upcast: C,
    ) -> Result<(&mut U, Identifier), EmplaceError<E>>
    where
        U: Any,
        F: FnOnce() -> Result<U, E>,
        C: FnOnce(Box<U>) -> Box<T>,
    {
        let expected = type_name::<U>();
        let (_, id) = self
            .insert_with(name.into(), || -> Result<Box<T>, EmplaceError<E>> {
                let handle = match construct() {
                    Ok(value) => upcast(Box::new(value)),
                    Err(err) => return Err(EmplaceError::Construction(err)),
                };
                if AsAny::as_any(&*handle).is::<U>() {
                    Ok(handle)
                } else {
                    debug!(target: "lodestone::registry", expected, "Upcast changed the stored type");
                    Err(EmplaceError::Registry(RegistryError::SubtypeMismatch { expected }))
                }
            })
            .map_err(flatten)?;

        // The handle was checked to be a `U` before it was stored.
        self.items
            .get_mut(&id)
            .and_then(|handle| AsAny::as_any_mut(&mut **handle).downcast_mut::<U>())
            .map(|typed| (typed, id))
            .ok_or_else(|| EmplaceError::Registry(RegistryError::SubtypeMismatch { expected }))
    }
}

/// Collapse a construction step that itself reports emplace errors
fn flatten<E>(err: EmplaceError<EmplaceError<E>>) -> EmplaceError<E> {
    match err {
        EmplaceError::Registry(err) => EmplaceError::Registry(err),
        EmplaceError::Construction(inner) => inner,
    }
}

impl<O: Ownership> Default for NameIdRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Ownership> fmt::Debug for NameIdRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameIdRegistry")
            .field("len", &self.items.len())
            .field("reverse_index", &self.reverse.is_some())
            .field("max_name_length", &self.config.max_name_length)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
