//! Domain model (categories, selections, stores, outcomes, ...).

pub mod category;
pub mod selection;
pub mod store;
pub mod caption;
pub mod outcome;
pub mod errors;
pub mod ids;

pub use self::caption::CaptionTable;
pub use self::category::{ArtifactId, Category, NamingTemplate};
pub use self::errors::{ResolveError, SelectionError, SelectionLoadError, TemplateError};
pub use self::ids::SessionId;
pub use self::outcome::{Figure, OutcomeKind, ResolutionOutcome};
pub use self::selection::{Selection, SelectionLists};
pub use self::store::{Catalog, CatalogEntry, Location, StoreDescriptor, StoreKind};
