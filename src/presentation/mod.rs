/// Filter state rendered into query parameters
pub mod filters;
/// Page accumulation over resource models
pub mod pagination;

pub use filters::{FilterOperator, FilterValue, FiltersVm, OrderDirection};
pub use pagination::PaginationVm;
