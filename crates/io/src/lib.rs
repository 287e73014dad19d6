// File I/O: input spreadsheets, registries, template store, exports

pub mod csv;
pub mod error;
pub mod export;
pub mod load;
pub mod normalize;
pub mod registry;
pub mod report;
pub mod store;
pub mod table;
pub mod xlsx;

pub use error::{InputError, StoreError};
pub use load::load_inputs;
pub use normalize::{parse_on_hand_file, parse_template_file};
pub use registry::{FileConsumableRegistry, FileTruckRegistry, Truck};
pub use store::{DirTemplateStore, Template, TemplateMeta, TemplateStore};
