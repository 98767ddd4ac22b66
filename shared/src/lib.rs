//! Framework-free core of the paddock dashboard: season tables, driver codes,
//! colours, filter state, API queries and response schemas, and the chart
//! data transformers. The frontend crate only renders what this crate derives.

pub mod api;
pub mod color;
pub mod driver;
pub mod filter;
pub mod options;
pub mod scale;
pub mod schema;
pub mod season;
pub mod transform;

pub use api::{Endpoint, QueryError, SessionQuery};
pub use color::{DriverPalette, LegendEntry, Rgb};
pub use driver::{DriverCode, name_to_code};
pub use filter::FilterSelection;
pub use options::{ChartOptions, ColorMode, GroupBy};
pub use schema::DecodeError;
pub use season::SessionIdentifier;
