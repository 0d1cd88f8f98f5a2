pub mod form;
pub mod geometry;
pub mod ids;
pub mod page_key;

pub use form::{ContentKind, FormDataBag, FormError, FormValue, bag_from_json_str, bag_from_value};
pub use geometry::{A4, PageGeometry, Rect, Size};
pub use ids::{LOCAL_FILE_SCHEME, ResourceUri};
pub use page_key::PageKey;
