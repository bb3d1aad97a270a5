mod kpi;
mod nav;
mod section;

pub use kpi::{Kpi, KpiGrid};
pub use nav::Nav;
pub use section::Section;
