pub mod api;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod filter;
pub mod format;
pub mod forms;
pub mod guard;
pub mod list;
pub mod models;
pub mod pagination;
pub mod session;
pub mod stats;

pub use api::{AuthApi, ResourceApi, WritableResourceApi};
pub use config::Config;
pub use endpoints::{Endpoints, Scope};
pub use error::{ApiError, ApiResult};
pub use filter::{Filterable, Filters, Predicate, apply_filters};
pub use forms::{EntityForm, FormError, FormMode, FormState, Submission};
pub use guard::{GuardDecision, RouteAccess};
pub use list::{EmptyState, ListState, LoadOutcome, PageRequest};
pub use models::*;
pub use pagination::{PageItem, PageMeta, PaginatedResponse};
pub use session::{AuthError, MemoryTokenStore, Session, TokenStore, TokenStoreError};
pub use stats::{CountKind, SystemCounts};
