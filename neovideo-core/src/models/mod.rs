pub mod cms_source;
pub mod home;
pub mod jiexi;

pub use cms_source::{CmsSource, NewCmsSource};
pub use home::HomeItem;
pub use jiexi::{JiexiSource, ParseRecord};
